//! Call configuration, hooks and the caller pipeline through the public API.

use std::sync::{Arc, Mutex};

use api::call::{CallOptions, DefaultPaths, PathsConfig, RequestBody, create_config};
use api::path::PathBuilder;
use api::{
    ApiCaller, ApiDefinition, ApiError, ApiResponse, CallConfig, CallerHooks, ClientError,
    Endpoint, RequestExecutor, RestMethod, ValidationError, build_api,
};
use serde_json::{Value, json};

/// Records every request and answers with a canned response.
#[derive(Debug, Default)]
struct MockExecutor {
    requests: Mutex<Vec<CallConfig>>,
    responses: Mutex<Vec<ApiResponse>>,
}

impl MockExecutor {
    fn replying(responses: Vec<ApiResponse>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    fn requests(&self) -> Vec<CallConfig> {
        self.requests.lock().unwrap().clone()
    }
}

impl RequestExecutor for MockExecutor {
    async fn execute(&self, config: &CallConfig) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(config.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(ClientError::Connection("no canned response".to_string()).into());
        }
        Ok(responses.remove(0))
    }
}

fn paths() -> Arc<dyn PathsConfig> {
    Arc::new(DefaultPaths)
}

// ===========================================
// create_config
// ===========================================

#[test]
fn test_routes_path_query_and_body() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .path(PathBuilder::parse("users/:id").unwrap())
            .query_keys(["filter"])
            .build(),
    );

    let parts = create_config(
        &paths(),
        &endpoint,
        Some(json!({ "id": 1, "filter": "x", "name": "John" })),
        CallOptions::default(),
    )
    .unwrap();

    assert_eq!(Value::Object(parts.path_inputs), json!({ "id": 1 }));
    assert_eq!(Value::Object(parts.query_inputs), json!({ "filter": "x" }));
    assert_eq!(
        parts.config.data,
        Some(RequestBody::Json(json!({ "name": "John" })))
    );
    assert_eq!(parts.config.url, "users/1?filter=x");
}

#[test]
fn test_get_is_default_and_skips_loader() {
    let endpoint = Arc::new(Endpoint::builder().path(PathBuilder::fixed("status")).build());
    let parts = create_config(&paths(), &endpoint, None, CallOptions::default()).unwrap();

    assert_eq!(parts.config.method, RestMethod::Get);
    assert!(parts.config.meta.no_loader);
    assert_eq!(parts.config.data, None);

    let parts = create_config(
        &paths(),
        &endpoint,
        None,
        CallOptions::new().no_loader(false),
    )
    .unwrap();
    assert!(!parts.config.meta.no_loader);
}

#[test]
fn test_empty_remainder_is_no_body() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .delete(PathBuilder::parse("users/:id").unwrap())
            .build(),
    );
    let parts = create_config(
        &paths(),
        &endpoint,
        Some(json!({ "id": 3 })),
        CallOptions::default(),
    )
    .unwrap();
    assert_eq!(parts.result_input, None);
    assert_eq!(parts.config.data, None);
    assert!(!parts.config.meta.no_loader);
}

// ===========================================
// Hook composition
// ===========================================

#[tokio::test]
async fn test_hooks_run_in_registration_order() {
    let h1 = CallerHooks::new().before_request(|config| {
        Box::pin(async move {
            config.headers.insert("X-Step".to_string(), "h1".to_string());
            Ok(None)
        })
    });
    let h2 = CallerHooks::new().before_request(|config| {
        Box::pin(async move {
            let seen = config.headers.get("X-Step").cloned().unwrap_or_default();
            config.headers.insert("X-Step".to_string(), format!("{seen},h2"));
            Ok(None)
        })
    });

    let executor = MockExecutor::replying(vec![ApiResponse::ok(Value::Null)]);
    let caller = ApiCaller::builder(executor)
        .hooks(CallerHooks::merge([h1, h2]))
        .build();
    let endpoint = Arc::new(Endpoint::builder().path(PathBuilder::fixed("ping")).build());

    caller
        .call_raw(&endpoint, None, CallOptions::default())
        .await
        .unwrap();

    let requests = caller.executor().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers["X-Step"], "h1,h2");
}

#[tokio::test]
async fn test_caller_hooks_run_before_endpoint_hooks() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let caller_order = Arc::clone(&order);
    let caller_hooks = CallerHooks::new().before_config(move |_| {
        caller_order.lock().unwrap().push("caller");
        Box::pin(async { Ok(()) })
    });
    let endpoint_order = Arc::clone(&order);
    let endpoint_hooks = CallerHooks::new().before_config(move |_| {
        endpoint_order.lock().unwrap().push("endpoint");
        Box::pin(async { Ok(()) })
    });

    let endpoint = Arc::new(
        Endpoint::builder()
            .path(PathBuilder::fixed("ping"))
            .hooks(endpoint_hooks)
            .build(),
    );
    let caller = ApiCaller::builder(MockExecutor::replying(vec![ApiResponse::ok(Value::Null)]))
        .hooks(caller_hooks)
        .build();

    caller
        .call_raw(&endpoint, None, CallOptions::default())
        .await
        .unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["caller", "endpoint"]);
}

#[tokio::test]
async fn test_before_request_replacement_reaches_executor() {
    let endpoint = Arc::new(Endpoint::builder().path(PathBuilder::fixed("v1/items")).build());
    let caller = ApiCaller::builder(MockExecutor::replying(vec![ApiResponse::ok(Value::Null)]))
        .hooks(CallerHooks::new().before_request(|config| {
            Box::pin(async move {
                let mut next = config.clone();
                next.url = next.url.replace("v1", "v2");
                next.method = RestMethod::Head;
                Ok(Some(next))
            })
        }))
        .build();

    caller
        .call_raw(&endpoint, None, CallOptions::default())
        .await
        .unwrap();

    let request = &caller.executor().requests()[0];
    assert_eq!(request.url, "v2/items");
    assert_eq!(request.method, RestMethod::Head);
}

#[tokio::test]
async fn test_after_response_can_rescue_status() {
    let endpoint = Arc::new(Endpoint::builder().path(PathBuilder::fixed("items")).build());
    let caller = ApiCaller::builder(MockExecutor::replying(vec![ApiResponse::new(
        404,
        json!({ "message": "none yet" }),
    )]))
    .hooks(CallerHooks::new().after_response(|_, response| {
        Box::pin(async move {
            if response.status == 404 {
                return Ok(Some(ApiResponse::ok(json!([]))));
            }
            Ok(None)
        })
    }))
    .build();

    let items: Vec<String> = caller
        .call(&endpoint, None, CallOptions::default())
        .await
        .unwrap();
    assert!(items.is_empty());
}

// ===========================================
// Endpoint extensions in the pipeline
// ===========================================

#[tokio::test]
async fn test_validator_blocks_request() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .post(PathBuilder::fixed("users"))
            .validate(|ctx| {
                let email = ctx.body.as_ref().and_then(|b| b.get("email"));
                match email.and_then(Value::as_str) {
                    Some(e) if e.contains('@') => Ok(()),
                    _ => Err(ValidationError::field("email", "must be an address")),
                }
            })
            .build(),
    );
    let caller = ApiCaller::new(MockExecutor::replying(vec![ApiResponse::new(
        201,
        json!({ "id": 1 }),
    )]));

    let err = caller
        .call_raw(&endpoint, Some(json!({ "email": "nope" })), CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::Field { .. })));
    assert!(caller.executor().requests().is_empty());

    let response = caller
        .call_raw(
            &endpoint,
            Some(json!({ "email": "ann@example.com" })),
            CallOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(caller.executor().requests().len(), 1);
}

#[tokio::test]
async fn test_validator_reports_missing_path_argument() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .get(PathBuilder::parse("users/:id").unwrap())
            .validate(|ctx| {
                if ctx.path_inputs.contains_key("id") {
                    Ok(())
                } else {
                    Err(ValidationError::field("id", "is required"))
                }
            })
            .build(),
    );
    let caller = ApiCaller::new(MockExecutor::replying(vec![ApiResponse::ok(json!({}))]));

    let err = caller
        .call_raw(&endpoint, Some(json!({})), CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::Field { ref field, .. }) if field == "id"
    ));
    assert!(caller.executor().requests().is_empty());

    caller
        .call_raw(&endpoint, Some(json!({ "id": 4 })), CallOptions::default())
        .await
        .unwrap();
    assert_eq!(caller.executor().requests()[0].url, "users/4");
}

#[tokio::test]
async fn test_empty_path_argument_is_rejected() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .get(PathBuilder::parse("users/:id/posts").unwrap())
            .build(),
    );
    let caller = ApiCaller::new(MockExecutor::default());

    let err = caller
        .call_raw(&endpoint, Some(json!({ "id": "" })), CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Path(_)));
    assert!(caller.executor().requests().is_empty());
}

#[tokio::test]
async fn test_call_header_replaces_content_type_of_other_case() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .post(PathBuilder::fixed("upload"))
            .content_type("application/octet-stream")
            .build(),
    );
    let caller = ApiCaller::new(MockExecutor::replying(vec![ApiResponse::ok(json!({}))]));

    caller
        .call_raw(
            &endpoint,
            None,
            CallOptions::new().header("content-type", "text/csv"),
        )
        .await
        .unwrap();

    let request = &caller.executor().requests()[0];
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.headers["content-type"], "text/csv");
}

#[tokio::test]
async fn test_form_endpoint_sends_pairs() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .post(PathBuilder::fixed("oauth/token"))
            .as_form()
            .build(),
    );
    let caller = ApiCaller::new(MockExecutor::replying(vec![ApiResponse::ok(
        json!({ "access_token": "t" }),
    )]));

    caller
        .call_raw(
            &endpoint,
            Some(json!({ "grant_type": "client_credentials" })),
            CallOptions::default(),
        )
        .await
        .unwrap();

    let request = &caller.executor().requests()[0];
    assert_eq!(
        request.data,
        Some(RequestBody::Form(vec![(
            "grant_type".to_string(),
            "client_credentials".to_string()
        )]))
    );
    assert_eq!(
        request.headers["Content-Type"],
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn test_executor_error_goes_through_processor() {
    let endpoint = Arc::new(
        Endpoint::builder()
            .path(PathBuilder::fixed("items"))
            .error_processor(|err| match err {
                ApiError::Client(ClientError::Connection(reason)) => {
                    ApiError::hook(format!("offline: {reason}"))
                }
                other => other,
            })
            .build(),
    );
    let caller = ApiCaller::new(MockExecutor::default());

    let err = caller
        .call_raw(&endpoint, None, CallOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Hook failed: offline: no canned response");
}

// ===========================================
// build_api
// ===========================================

#[tokio::test]
async fn test_api_calls_by_dotted_name() {
    let definition = ApiDefinition::new().group(
        "users",
        ApiDefinition::new()
            .endpoint(
                "get",
                Endpoint::builder()
                    .get(PathBuilder::parse("users/:id").unwrap())
                    .build(),
            )
            .endpoint(
                "create",
                Endpoint::builder().post(PathBuilder::fixed("users")).build(),
            ),
    );
    let caller = ApiCaller::builder(MockExecutor::replying(vec![ApiResponse::new(
        201,
        json!({ "id": 5 }),
    )]))
    .base_url("https://api.example.com/v1")
    .unwrap()
    .build();
    let api = build_api(definition, caller).unwrap();

    assert_eq!(api.names().collect::<Vec<_>>(), vec!["users.create", "users.get"]);

    #[derive(serde::Deserialize)]
    struct Created {
        id: u64,
    }

    let created: Created = api
        .call("users.create", Some(json!({ "name": "Ann" })), CallOptions::default())
        .await
        .unwrap();
    assert_eq!(created.id, 5);

    let request = &api.caller().executor().requests()[0];
    assert_eq!(request.method, RestMethod::Post);
    assert_eq!(request.url, "https://api.example.com/v1/users");
    assert_eq!(
        request.meta.endpoint.name().map(|n| n.as_str()),
        Some("users.create")
    );
}
