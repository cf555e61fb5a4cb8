//! The public path builder.

use std::sync::Arc;

use super::composite::CompositeSegment;
use super::grammar::parse_pattern;
use super::segment::{BuildPath, BuildTransform, DynamicSegment, StaticSegment, TemplateTransform};
use super::{ArgumentInfo, CombineOptions, InputsRef, PathInputs, PathValue, TemplateStyle};
use crate::error::PathError;

/// The three shapes a path builder can take.
#[derive(Debug, Clone)]
pub enum Segment {
    Static(StaticSegment),
    Dynamic(DynamicSegment),
    Composite(CompositeSegment),
}

impl Segment {
    fn set_build_transform(&mut self, name: &str, transform: &BuildTransform) {
        match self {
            Self::Static(_) => {}
            Self::Dynamic(d) => d.set_build_transform(name, transform),
            Self::Composite(c) => {
                for child in c.children_mut() {
                    child.segment.set_build_transform(name, transform);
                }
            }
        }
    }

    fn set_template_transform(&mut self, name: &str, transform: &TemplateTransform) {
        match self {
            Self::Static(_) => {}
            Self::Dynamic(d) => d.set_template_transform(name, transform),
            Self::Composite(c) => {
                for child in c.children_mut() {
                    child.segment.set_template_transform(name, transform);
                }
            }
        }
    }

    fn make_optional(&mut self) {
        match self {
            Self::Static(_) => {}
            Self::Dynamic(d) => d.make_optional(),
            Self::Composite(c) => {
                for child in c.children_mut() {
                    child.segment.make_optional();
                }
                c.refresh_args();
            }
        }
    }
}

impl BuildPath for Segment {
    fn args(&self) -> &[ArgumentInfo] {
        match self {
            Self::Static(s) => s.args(),
            Self::Dynamic(d) => d.args(),
            Self::Composite(c) => c.args(),
        }
    }

    fn render(&self, inputs: InputsRef<'_>, options: &CombineOptions) -> Result<String, PathError> {
        match self {
            Self::Static(s) => s.render(inputs, options),
            Self::Dynamic(d) => d.render(inputs, options),
            Self::Composite(c) => c.render(inputs, options),
        }
    }

    fn render_template(&self, style: &TemplateStyle, options: &CombineOptions) -> String {
        match self {
            Self::Static(s) => s.render_template(style, options),
            Self::Dynamic(d) => d.render_template(style, options),
            Self::Composite(c) => c.render_template(style, options),
        }
    }
}

/// One item passed to [`PathBuilder::combine`].
#[derive(Debug, Clone)]
pub enum PathPart {
    /// Fixed text, taken verbatim (no `:name` parsing).
    Static(String),
    /// A pre-built builder.
    Builder(PathBuilder),
}

impl From<&str> for PathPart {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for PathPart {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

impl From<PathBuilder> for PathPart {
    fn from(builder: PathBuilder) -> Self {
        Self::Builder(builder)
    }
}

/// Produces paths, or placeholder templates, from arguments.
///
/// Builders come in three shapes (see [`Segment`]): fixed text, a parsed
/// `:name` / `:name?` pattern, or a composite of other builders. All of
/// them accept positional or named [`PathInputs`] and share the same
/// [`CombineOptions`] rules.
///
/// Configuration methods consume and return the builder. A builder moved
/// into a composite is owned by it; clone before combining to reuse one.
///
/// ## Examples
///
/// ```rust
/// use api::path::{PathBuilder, PathInputs};
///
/// let path = PathBuilder::parse("user/:id?/profile/:version?").unwrap();
///
/// assert_eq!(path.build(&PathInputs::none()).unwrap(), "user/profile");
/// assert_eq!(
///     path.build(&PathInputs::named([("id", 123)])).unwrap(),
///     "user/123/profile"
/// );
/// assert_eq!(
///     path.build(&PathInputs::positional([None, Some(2)])).unwrap(),
///     "user/profile/2"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PathBuilder {
    segment: Segment,
    defaults: CombineOptions,
}

impl PathBuilder {
    fn from_segment(segment: Segment) -> Self {
        Self {
            segment,
            defaults: CombineOptions::default(),
        }
    }

    /// Parses a `:name` / `:name?` pattern.
    ///
    /// A pattern without markers yields the same builder as [`fixed`](Self::fixed).
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::DuplicateArgument`] if an argument name repeats.
    pub fn parse(pattern: &str) -> Result<Self, PathError> {
        let parsed = parse_pattern(pattern)?;
        if parsed.args.is_empty() {
            return Ok(Self::fixed(pattern));
        }
        Ok(Self::from_segment(Segment::Dynamic(DynamicSegment::from_parsed(parsed))))
    }

    /// Fixed text with no arguments.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::from_segment(Segment::Static(StaticSegment::new(text)))
    }

    /// A single required argument.
    pub fn arg(name: impl Into<String>) -> Self {
        Self::from_segment(Segment::Dynamic(DynamicSegment::single(name, false)))
    }

    /// A single optional argument.
    pub fn optional_arg(name: impl Into<String>) -> Self {
        Self::from_segment(Segment::Dynamic(DynamicSegment::single(name, true)))
    }

    /// Combines static text and builders into one builder.
    ///
    /// The result's arguments are the children's arguments in order. See
    /// also the [`path!`](crate::path!) macro.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::DuplicateArgument`] if two parts declare the same
    /// argument name.
    pub fn combine<I>(parts: I) -> Result<Self, PathError>
    where
        I: IntoIterator,
        I::Item: Into<PathPart>,
    {
        let children = parts
            .into_iter()
            .map(|part| match part.into() {
                PathPart::Static(text) => Self::fixed(text),
                PathPart::Builder(builder) => builder,
            })
            .collect();
        let composite = CompositeSegment::new(children)?;
        Ok(Self::from_segment(Segment::Composite(composite)))
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Arguments in first-occurrence order.
    pub fn args(&self) -> &[ArgumentInfo] {
        self.segment.args()
    }

    /// Argument names in first-occurrence order.
    pub fn arg_names(&self) -> Vec<&str> {
        self.args().iter().map(|a| a.name.as_str()).collect()
    }

    pub fn defaults(&self) -> &CombineOptions {
        &self.defaults
    }

    /// Builds a path using the builder's default options.
    ///
    /// ## Errors
    ///
    /// - [`PathError::MissingArgument`] if a required argument has no value
    /// - [`PathError::ArityMismatch`] if positional inputs have the wrong length
    pub fn build(&self, inputs: &PathInputs) -> Result<String, PathError> {
        self.build_with(inputs, &self.defaults)
    }

    /// Builds a path with explicit options.
    ///
    /// ## Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with(&self, inputs: &PathInputs, options: &CombineOptions) -> Result<String, PathError> {
        self.segment.render(inputs.view(), options)
    }

    /// Renders the template with `:name` / `:name?` placeholders.
    pub fn template(&self) -> String {
        self.template_in(&TemplateStyle::colon())
    }

    /// Renders the template in the given style with default options.
    pub fn template_in(&self, style: &TemplateStyle) -> String {
        self.template_with(style, &self.defaults)
    }

    /// Renders the template in the given style with explicit options.
    pub fn template_with(&self, style: &TemplateStyle, options: &CombineOptions) -> String {
        self.segment.render_template(style, options)
    }

    /// Sets the default options, propagating them to owned children.
    pub fn with_defaults(mut self, options: CombineOptions) -> Self {
        self.set_defaults(options);
        self
    }

    fn set_defaults(&mut self, options: CombineOptions) {
        self.defaults = options;
        if let Segment::Composite(c) = &mut self.segment {
            for child in c.children_mut() {
                child.set_defaults(options);
            }
        }
    }

    /// Overrides how values of argument `name` are rendered by `build`.
    ///
    /// Names the builder does not declare are ignored.
    pub fn with_build_transform<F>(mut self, name: &str, transform: F) -> Self
    where
        F: Fn(&PathValue) -> String + Send + Sync + 'static,
    {
        let transform: BuildTransform = Arc::new(transform);
        self.segment.set_build_transform(name, &transform);
        self
    }

    /// Overrides how argument `name` is rendered by `template`.
    ///
    /// The transform receives the placeholder the style would produce.
    pub fn with_template_transform<F>(mut self, name: &str, transform: F) -> Self
    where
        F: Fn(&ArgumentInfo, &str) -> String + Send + Sync + 'static,
    {
        let transform: TemplateTransform = Arc::new(transform);
        self.segment.set_template_transform(name, &transform);
        self
    }

    /// Marks every argument optional, for embedding in an optional group.
    pub fn as_optional(mut self) -> Self {
        self.segment.make_optional();
        self
    }
}

impl BuildPath for PathBuilder {
    fn args(&self) -> &[ArgumentInfo] {
        self.segment.args()
    }

    fn render(&self, inputs: InputsRef<'_>, options: &CombineOptions) -> Result<String, PathError> {
        self.segment.render(inputs, options)
    }

    fn render_template(&self, style: &TemplateStyle, options: &CombineOptions) -> String {
        self.segment.render_template(style, options)
    }
}
