//! Placeholder naming for rendered path templates.

use std::fmt;
use std::sync::Arc;

use super::ArgumentInfo;

/// How arguments are rendered by `template` calls.
///
/// Route-matching libraries disagree on placeholder syntax, so the style is
/// pluggable: `:name` / `:name?` (the default), `{name}`, any prefix/suffix
/// combination, or a custom function.
///
/// ## Examples
///
/// ```rust
/// use api::path::{PathBuilder, TemplateStyle};
///
/// let path = PathBuilder::parse("users/:id/posts/:post?").unwrap();
/// assert_eq!(path.template(), "users/:id/posts/:post?");
/// assert_eq!(path.template_in(&TemplateStyle::braces()), "users/{id}/posts/{post}");
/// ```
#[derive(Clone)]
pub enum TemplateStyle {
    Prefixed {
        prefix: String,
        suffix: String,
        optional_suffix: String,
    },
    Custom(Arc<dyn Fn(&ArgumentInfo) -> String + Send + Sync>),
}

impl TemplateStyle {
    /// `:name` for required and `:name?` for optional arguments.
    pub fn colon() -> Self {
        Self::prefix(":")
    }

    /// `{name}` regardless of optionality.
    pub fn braces() -> Self {
        Self::Prefixed {
            prefix: "{".to_string(),
            suffix: "}".to_string(),
            optional_suffix: String::new(),
        }
    }

    /// `{prefix}name`, with `?` appended for optional arguments.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefixed {
            prefix: prefix.into(),
            suffix: String::new(),
            optional_suffix: "?".to_string(),
        }
    }

    /// A fully custom placeholder function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&ArgumentInfo) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Renders the placeholder for one argument.
    pub fn placeholder(&self, arg: &ArgumentInfo) -> String {
        match self {
            Self::Prefixed {
                prefix,
                suffix,
                optional_suffix,
            } => {
                let optional = if arg.is_optional {
                    optional_suffix.as_str()
                } else {
                    ""
                };
                format!("{prefix}{}{suffix}{optional}", arg.name)
            }
            Self::Custom(f) => f(arg),
        }
    }
}

impl Default for TemplateStyle {
    fn default() -> Self {
        Self::colon()
    }
}

impl From<&str> for TemplateStyle {
    fn from(prefix: &str) -> Self {
        Self::prefix(prefix)
    }
}

impl fmt::Debug for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefixed {
                prefix,
                suffix,
                optional_suffix,
            } => f
                .debug_struct("Prefixed")
                .field("prefix", prefix)
                .field("suffix", suffix)
                .field("optional_suffix", optional_suffix)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
