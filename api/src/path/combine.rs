//! Joining path parts with separator, trimming and boundary rules.

/// Options controlling how path parts are joined.
///
/// The same options drive plain [`combine_urls`] calls, single builders and
/// composites, so paths assembled incrementally stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineOptions {
    /// Keep parts as given instead of stripping `trim_symbol` from their ends.
    pub no_trim: bool,
    /// Prepend `separator` to the result, even when it is empty.
    pub add_start: bool,
    /// Append `separator` to the result, even when it is empty.
    pub add_trail: bool,
    /// Text inserted between parts.
    pub separator: &'static str,
    /// Character stripped from both ends of every part.
    pub trim_symbol: char,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            no_trim: false,
            add_start: false,
            add_trail: false,
            separator: "/",
            trim_symbol: '/',
        }
    }
}

impl CombineOptions {
    /// Sets [`add_start`](Self::add_start).
    pub fn with_start(mut self) -> Self {
        self.add_start = true;
        self
    }

    /// Sets [`add_trail`](Self::add_trail).
    pub fn with_trail(mut self) -> Self {
        self.add_trail = true;
        self
    }

    /// Sets [`no_trim`](Self::no_trim).
    pub fn without_trim(mut self) -> Self {
        self.no_trim = true;
        self
    }

    /// Uses a custom separator and trim symbol.
    pub fn with_separator(mut self, separator: &'static str, trim_symbol: char) -> Self {
        self.separator = separator;
        self.trim_symbol = trim_symbol;
        self
    }

    /// Options for rendering the children of a composite: boundary
    /// decoration is applied once by the composite itself.
    pub(crate) fn inner(&self) -> Self {
        Self {
            add_start: false,
            add_trail: false,
            ..*self
        }
    }
}

/// Joins path parts into one path.
///
/// Empty parts are skipped, each part is trimmed of `trim_symbol` unless
/// `no_trim` is set (parts emptied by trimming are skipped too), and the
/// remainder is joined with `separator`. `add_start` / `add_trail` then add
/// the separator at the boundaries if it is not already there.
///
/// ## Examples
///
/// ```rust
/// use api::path::{combine_urls, CombineOptions};
///
/// assert_eq!(combine_urls(["a/", "/b"], &CombineOptions::default()), "a/b");
/// let empty: [&str; 0] = [];
/// assert_eq!(combine_urls(empty, &CombineOptions::default().with_start()), "/");
/// ```
pub fn combine_urls<I, S>(parts: I, options: &CombineOptions) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = String::new();

    for part in parts {
        let part = part.as_ref();
        let part = if options.no_trim {
            part
        } else {
            part.trim_matches(options.trim_symbol)
        };
        if part.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push_str(options.separator);
        }
        result.push_str(part);
    }

    if options.add_start && !result.starts_with(options.separator) {
        result.insert_str(0, options.separator);
    }
    if options.add_trail && !result.ends_with(options.separator) {
        result.push_str(options.separator);
    }

    result
}
