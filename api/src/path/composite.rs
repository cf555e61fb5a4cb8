//! Builders assembled from other builders.

use std::collections::HashSet;

use super::segment::BuildPath;
use super::value::check_arity;
use super::{ArgumentInfo, CombineOptions, InputsRef, PathBuilder, TemplateStyle, combine_urls};
use crate::error::PathError;

/// An ordered list of child builders rendered and joined as one path.
///
/// The composite owns its children: they are moved in at construction, so
/// later `with_*` calls on the composite can update them without affecting
/// any other builder.
#[derive(Debug, Clone)]
pub struct CompositeSegment {
    children: Vec<PathBuilder>,
    args: Vec<ArgumentInfo>,
}

impl CompositeSegment {
    /// Combines children, flattening their arguments in encounter order.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::DuplicateArgument`] if two children declare the
    /// same argument name.
    pub(crate) fn new(children: Vec<PathBuilder>) -> Result<Self, PathError> {
        let args = flatten_args(&children);
        let mut seen = HashSet::new();
        if let Some(dup) = args.iter().find(|a| !seen.insert(a.name.as_str())) {
            return Err(PathError::duplicate(&dup.name));
        }
        Ok(Self { children, args })
    }

    pub fn children(&self) -> &[PathBuilder] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [PathBuilder] {
        &mut self.children
    }

    /// Recomputes the flattened argument list after children changed.
    pub(crate) fn refresh_args(&mut self) {
        self.args = flatten_args(&self.children);
    }
}

fn flatten_args(children: &[PathBuilder]) -> Vec<ArgumentInfo> {
    children
        .iter()
        .flat_map(|child| child.args().iter())
        .enumerate()
        .map(|(index, arg)| ArgumentInfo {
            index,
            ..arg.clone()
        })
        .collect()
}

impl BuildPath for CompositeSegment {
    fn args(&self) -> &[ArgumentInfo] {
        &self.args
    }

    /// Positional inputs are sliced by child arity in child order; named
    /// inputs are handed to every child as-is.
    fn render(&self, inputs: InputsRef<'_>, options: &CombineOptions) -> Result<String, PathError> {
        let inner = options.inner();
        let mut rendered = Vec::with_capacity(self.children.len());

        match inputs {
            InputsRef::Positional(values) => {
                check_arity(self.args.len(), values.len())?;
                let mut offset = 0;
                for child in &self.children {
                    let arity = child.args().len();
                    let slice = &values[offset..offset + arity];
                    rendered.push(child.render(InputsRef::Positional(slice), &inner)?);
                    offset += arity;
                }
            }
            InputsRef::Named(_) => {
                for child in &self.children {
                    rendered.push(child.render(inputs, &inner)?);
                }
            }
        }

        // Children trimmed their own literal text; values pass through untouched.
        Ok(combine_urls(rendered, &options.without_trim()))
    }

    fn render_template(&self, style: &TemplateStyle, options: &CombineOptions) -> String {
        let inner = options.inner();
        let rendered = self
            .children
            .iter()
            .map(|child| child.render_template(style, &inner));
        combine_urls(rendered, options)
    }
}
