//! Leaf builders: fixed text and parsed patterns.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::grammar::{ParsedPattern, Piece};
use super::value::check_arity;
use super::{ArgumentInfo, CombineOptions, InputsRef, PathValue, TemplateStyle, combine_urls};
use crate::error::PathError;

/// Per-argument override for turning a value into path text.
pub type BuildTransform = Arc<dyn Fn(&PathValue) -> String + Send + Sync>;

/// Per-argument override for placeholder text. Receives the argument and
/// the placeholder the active [`TemplateStyle`] would have produced.
pub type TemplateTransform = Arc<dyn Fn(&ArgumentInfo, &str) -> String + Send + Sync>;

/// The shared contract of every path builder shape.
///
/// `render` and `render_template` take `&self`: builders are never mutated
/// while producing output, so one builder can serve concurrent callers.
pub trait BuildPath {
    /// Arguments in first-occurrence order.
    fn args(&self) -> &[ArgumentInfo];

    /// Renders a concrete path.
    fn render(&self, inputs: InputsRef<'_>, options: &CombineOptions) -> Result<String, PathError>;

    /// Renders a placeholder template.
    fn render_template(&self, style: &TemplateStyle, options: &CombineOptions) -> String;
}

/// Fixed path text without arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSegment {
    text: String,
}

impl StaticSegment {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl BuildPath for StaticSegment {
    fn args(&self) -> &[ArgumentInfo] {
        &[]
    }

    fn render(&self, inputs: InputsRef<'_>, options: &CombineOptions) -> Result<String, PathError> {
        if let InputsRef::Positional(values) = inputs {
            check_arity(0, values.len())?;
        }
        Ok(combine_urls([&self.text], options))
    }

    fn render_template(&self, _style: &TemplateStyle, options: &CombineOptions) -> String {
        combine_urls([&self.text], options)
    }
}

/// A parsed pattern with at least one argument.
///
/// A segment that references an absent optional argument is dropped
/// together with its separator; literal text sharing that segment goes with
/// it (`:name?.json` disappears as a whole). Values are inserted verbatim,
/// and a required value that renders empty counts as missing.
#[derive(Clone)]
pub struct DynamicSegment {
    segments: Vec<Vec<Piece>>,
    args: Vec<ArgumentInfo>,
    build_transforms: HashMap<String, BuildTransform>,
    template_transforms: HashMap<String, TemplateTransform>,
}

impl DynamicSegment {
    pub(crate) fn from_parsed(parsed: ParsedPattern) -> Self {
        Self {
            segments: parsed.segments,
            args: parsed.args,
            build_transforms: HashMap::new(),
            template_transforms: HashMap::new(),
        }
    }

    pub(crate) fn single(name: impl Into<String>, is_optional: bool) -> Self {
        Self::from_parsed(ParsedPattern {
            segments: vec![vec![Piece::Arg(0)]],
            args: vec![ArgumentInfo::new(name, 0, is_optional)],
        })
    }

    fn has_arg(&self, name: &str) -> bool {
        self.args.iter().any(|a| a.name == name)
    }

    pub(crate) fn set_build_transform(&mut self, name: &str, transform: &BuildTransform) {
        if self.has_arg(name) {
            self.build_transforms
                .insert(name.to_string(), Arc::clone(transform));
        }
    }

    pub(crate) fn set_template_transform(&mut self, name: &str, transform: &TemplateTransform) {
        if self.has_arg(name) {
            self.template_transforms
                .insert(name.to_string(), Arc::clone(transform));
        }
    }

    pub(crate) fn make_optional(&mut self) {
        for arg in &mut self.args {
            arg.is_optional = true;
        }
    }

    fn render_value(&self, arg: &ArgumentInfo, value: &PathValue) -> String {
        match self.build_transforms.get(&arg.name) {
            Some(transform) => transform(value),
            None => value.to_string(),
        }
    }

    fn render_placeholder(&self, arg: &ArgumentInfo, style: &TemplateStyle) -> String {
        let placeholder = style.placeholder(arg);
        match self.template_transforms.get(&arg.name) {
            Some(transform) => transform(arg, &placeholder),
            None => placeholder,
        }
    }
}

impl BuildPath for DynamicSegment {
    fn args(&self) -> &[ArgumentInfo] {
        &self.args
    }

    fn render(&self, inputs: InputsRef<'_>, options: &CombineOptions) -> Result<String, PathError> {
        let values = inputs.resolve(&self.args)?;

        if let Some(arg) = self
            .args
            .iter()
            .find(|a| !a.is_optional && values[a.index].is_none())
        {
            return Err(PathError::missing(&arg.name));
        }

        let mut rendered = Vec::with_capacity(self.segments.len());
        'segments: for pieces in &self.segments {
            let last = pieces.len().saturating_sub(1);
            let mut out = String::new();
            for (position, piece) in pieces.iter().enumerate() {
                match piece {
                    Piece::Literal(text) => {
                        out.push_str(trim_literal(text, position == 0, position == last, options));
                    }
                    Piece::Arg(index) => {
                        let arg = &self.args[*index];
                        let Some(value) = values[*index] else {
                            continue 'segments;
                        };
                        let value = self.render_value(arg, value);
                        if value.is_empty() && !arg.is_optional {
                            return Err(PathError::missing(&arg.name));
                        }
                        out.push_str(&value);
                    }
                }
            }
            rendered.push(out);
        }

        // Argument values are kept verbatim; only literal text was trimmed.
        Ok(combine_urls(rendered, &options.without_trim()))
    }

    fn render_template(&self, style: &TemplateStyle, options: &CombineOptions) -> String {
        let rendered = self.segments.iter().map(|pieces| {
            pieces
                .iter()
                .map(|piece| match piece {
                    Piece::Literal(text) => text.clone(),
                    Piece::Arg(index) => self.render_placeholder(&self.args[*index], style),
                })
                .collect::<String>()
        });
        combine_urls(rendered, options)
    }
}

/// Trims `trim_symbol` from the outer edges of a segment's literal text.
fn trim_literal<'a>(text: &'a str, first: bool, last: bool, options: &CombineOptions) -> &'a str {
    if options.no_trim {
        return text;
    }
    let text = if first {
        text.trim_start_matches(options.trim_symbol)
    } else {
        text
    };
    if last {
        text.trim_end_matches(options.trim_symbol)
    } else {
        text
    }
}

impl fmt::Debug for DynamicSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut build_keys: Vec<_> = self.build_transforms.keys().collect();
        build_keys.sort();
        let mut template_keys: Vec<_> = self.template_transforms.keys().collect();
        template_keys.sort();

        f.debug_struct("DynamicSegment")
            .field("template", &self.render_template(&TemplateStyle::colon(), &CombineOptions::default()))
            .field("args", &self.args)
            .field("build_transforms", &build_keys)
            .field("template_transforms", &template_keys)
            .finish()
    }
}
