//! Path template behavior through the public API.

use api::path;
use api::path::{CombineOptions, PathBuilder, PathInputs, TemplateStyle, combine_urls};
use api::PathError;

// ===========================================
// Optional segments
// ===========================================

fn user_profile() -> PathBuilder {
    PathBuilder::parse("user/:id?/profile/:version?").unwrap()
}

#[test]
fn test_optional_segments_are_omitted() {
    let path = user_profile();

    assert_eq!(path.build(&PathInputs::none()).unwrap(), "user/profile");
    assert_eq!(
        path.build(&PathInputs::named([("id", 123)])).unwrap(),
        "user/123/profile"
    );
    assert_eq!(
        path.build(&PathInputs::named([("version", 2)])).unwrap(),
        "user/profile/2"
    );
    assert_eq!(
        path.build(&PathInputs::named([("id", 123), ("version", 2)]))
            .unwrap(),
        "user/123/profile/2"
    );
}

#[test]
fn test_positional_matches_named() {
    let path = user_profile();
    assert_eq!(path.arg_names(), vec!["id", "version"]);

    let positional = path
        .build(&PathInputs::positional([None, Some("B")]))
        .unwrap();
    let named = path.build(&PathInputs::named([("version", "B")])).unwrap();
    assert_eq!(positional, named);
    assert_eq!(positional, "user/profile/B");
}

#[test]
fn test_named_inputs_ignore_unknown_keys() {
    let path = user_profile();
    let built = path
        .build(&PathInputs::named([("id", "7"), ("unrelated", "x")]))
        .unwrap();
    assert_eq!(built, "user/7/profile");
}

#[test]
fn test_required_values_are_kept_verbatim() {
    let path = PathBuilder::parse("users/:id/posts").unwrap();

    let err = path.build(&PathInputs::named([("id", "")])).unwrap_err();
    assert_eq!(err, PathError::missing("id"));
    assert_eq!(
        path.build(&PathInputs::named([("id", "/x")])).unwrap(),
        "users//x/posts"
    );
}

#[test]
fn test_positional_arity_is_checked() {
    let err = user_profile()
        .build(&PathInputs::positional([Some(1)]))
        .unwrap_err();
    assert_eq!(
        err,
        PathError::ArityMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_duplicate_names_are_rejected() {
    let err = PathBuilder::parse("a/:id/b/:id").unwrap_err();
    assert!(matches!(err, PathError::DuplicateArgument { .. }));

    let err = path!(PathBuilder::arg("id"), "x", PathBuilder::optional_arg("id")).unwrap_err();
    assert!(matches!(err, PathError::DuplicateArgument { .. }));
}

// ===========================================
// Composite builders
// ===========================================

fn composite() -> PathBuilder {
    path!(
        "api",
        PathBuilder::optional_arg("version"),
        PathBuilder::arg("id"),
        "profile",
        PathBuilder::arg("action"),
        "mode",
        PathBuilder::optional_arg("dry"),
    )
    .unwrap()
}

#[test]
fn test_composite_flattens_arguments() {
    let path = composite();
    assert_eq!(path.arg_names(), vec!["version", "id", "action", "dry"]);
    assert_eq!(path.template(), "api/:version?/:id/profile/:action/mode/:dry?");
    assert_eq!(
        path.template_in(&TemplateStyle::braces()),
        "api/{version}/{id}/profile/{action}/mode/{dry}"
    );
}

#[test]
fn test_composite_slices_positional_inputs() {
    let path = composite();
    let built = path
        .build(&PathInputs::positional([
            Some("v2"),
            Some("42"),
            Some("edit"),
            None,
        ]))
        .unwrap();
    assert_eq!(built, "api/v2/42/profile/edit/mode");
}

#[test]
fn test_composite_forwards_named_inputs() {
    let path = composite();
    let built = path
        .build(&PathInputs::named([
            ("id", "42"),
            ("action", "view"),
            ("dry", "true"),
        ]))
        .unwrap();
    assert_eq!(built, "api/42/profile/view/mode/true");
}

#[test]
fn test_composite_boundaries_applied_once() {
    let path = path!("/api/", PathBuilder::parse("users/:id").unwrap())
        .unwrap()
        .with_defaults(CombineOptions::default().with_start().with_trail());
    assert_eq!(
        path.build(&PathInputs::named([("id", 1)])).unwrap(),
        "/api/users/1/"
    );
}

#[test]
fn test_transforms_propagate_to_children() {
    let path = path!("files", PathBuilder::arg("name"))
        .unwrap()
        .with_build_transform("name", |value| value.to_string().replace(' ', "%20"))
        .with_template_transform("name", |_, placeholder| format!("{placeholder}*"));

    assert_eq!(
        path.build(&PathInputs::named([("name", "annual report")]))
            .unwrap(),
        "files/annual%20report"
    );
    assert_eq!(path.template(), "files/:name*");
}

#[test]
fn test_as_optional_group() {
    let scoped = path!(PathBuilder::arg("org"), PathBuilder::arg("team"))
        .unwrap()
        .as_optional();
    let path = path!("orgs", scoped, "repos").unwrap();
    assert_eq!(path.template(), "orgs/:org?/:team?/repos");
    assert_eq!(path.build(&PathInputs::none()).unwrap(), "orgs/repos");
    assert_eq!(
        path.build(&PathInputs::named([("team", "core")])).unwrap(),
        "orgs/core/repos"
    );
}

// ===========================================
// combine_urls
// ===========================================

#[test]
fn test_combine_urls_trims_and_joins() {
    let opts = CombineOptions::default();
    assert_eq!(combine_urls(["a/", "/b"], &opts), "a/b");
    assert_eq!(combine_urls(["", "/", "a"], &opts), "a");
    assert_eq!(combine_urls(["a/", "b"], &opts.without_trim()), "a//b");
}

#[test]
fn test_combine_urls_boundaries() {
    let empty: [&str; 0] = [];
    assert_eq!(combine_urls(empty, &CombineOptions::default().with_start()), "/");
    assert_eq!(
        combine_urls(["a", "b"], &CombineOptions::default().with_start().with_trail()),
        "/a/b/"
    );
    assert_eq!(
        combine_urls(["a.", ".b"], &CombineOptions::default().with_separator(".", '.')),
        "a.b"
    );
}
