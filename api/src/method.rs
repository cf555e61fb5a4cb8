//! HTTP method types for endpoint definitions.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// HTTP methods an endpoint can declare.
///
/// Endpoints that never set a method resolve to [`RestMethod::Get`] when a
/// call configuration is built.
///
/// ## Examples
///
/// ```rust
/// use api::RestMethod;
///
/// let method: RestMethod = "POST".parse().unwrap();
/// assert_eq!(method, RestMethod::Post);
/// assert_eq!(method.as_str(), "POST");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    #[default]
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// HTTP OPTIONS - Query supported methods.
    Options,
}

impl RestMethod {
    /// Returns the uppercase wire name of the method.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns `true` for methods whose calls should not toggle a loading
    /// indicator unless the caller asks for it.
    pub fn is_background_read(self) -> bool {
        matches!(self, Self::Get)
    }
}
