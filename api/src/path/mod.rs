//! Path templates.
//!
//! A small grammar for URL paths with required and optional arguments:
//!
//! - `users/:id` - `id` is required
//! - `users/:id?` - `id` may be omitted, and its segment disappears with it
//!
//! Builders render concrete paths ([`PathBuilder::build`]) or placeholder
//! templates for route registration ([`PathBuilder::template`]), and can be
//! combined with [`PathBuilder::combine`] or the [`path!`](crate::path!)
//! macro.
//!
//! ## Examples
//!
//! ```rust
//! use api::path;
//! use api::path::{PathBuilder, PathInputs};
//!
//! let version = PathBuilder::optional_arg("version");
//! let id = PathBuilder::arg("id");
//! let users = path!("api", version, "users", id).unwrap();
//!
//! assert_eq!(users.arg_names(), vec!["version", "id"]);
//! assert_eq!(users.template(), "api/:version?/users/:id");
//! assert_eq!(
//!     users.build(&PathInputs::named([("id", 7)])).unwrap(),
//!     "api/users/7"
//! );
//! ```

mod builder;
mod combine;
mod composite;
mod grammar;
mod segment;
mod template;
mod value;

pub use builder::{PathBuilder, PathPart, Segment};
pub use combine::{CombineOptions, combine_urls};
pub use composite::CompositeSegment;
pub use grammar::ArgumentInfo;
pub use segment::{BuildPath, BuildTransform, DynamicSegment, StaticSegment, TemplateTransform};
pub use template::TemplateStyle;
pub use value::{InputsRef, PathInputs, PathValue};

/// Combines static text and builders into one [`PathBuilder`].
///
/// String literals become fixed parts; anything else must convert into a
/// [`PathPart`]. Evaluates to `Result<PathBuilder, PathError>`.
///
/// [`PathError`]: crate::error::PathError
#[macro_export]
macro_rules! path {
    () => {
        $crate::path::PathBuilder::combine(::std::iter::empty::<$crate::path::PathPart>())
    };
    ($($part:expr),+ $(,)?) => {
        $crate::path::PathBuilder::combine([
            $($crate::path::PathPart::from($part)),+
        ])
    };
}
