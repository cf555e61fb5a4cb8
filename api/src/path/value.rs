//! Path argument values and input shapes.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Number, Value};

use super::ArgumentInfo;
use crate::error::PathError;

/// A scalar that can be substituted into a path segment.
///
/// Values are rendered verbatim; use
/// [`PathBuilder::with_build_transform`](super::PathBuilder::with_build_transform)
/// for encoding or custom serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum PathValue {
    Str(String),
    Number(Number),
    Bool(bool),
}

impl PathValue {
    /// Converts a JSON scalar into a path value.
    ///
    /// `null` means "absent" and yields `Ok(None)`.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::UnsupportedValue`] for arrays and objects.
    pub fn from_json(name: &str, value: &Value) -> Result<Option<Self>, PathError> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Self::Bool(*b))),
            Value::Number(n) => Ok(Some(Self::Number(n.clone()))),
            Value::String(s) => Ok(Some(Self::Str(s.clone()))),
            Value::Array(_) => Err(PathError::UnsupportedValue {
                name: name.to_string(),
                kind: "array",
            }),
            Value::Object(_) => Err(PathError::UnsupportedValue {
                name: name.to_string(),
                kind: "object",
            }),
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PathValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PathValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PathValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! path_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PathValue {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

path_value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for PathValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Str(value.to_string()))
    }
}

/// Inputs for a single `build` call.
///
/// Positional inputs line up with the builder's `args()` by index; `None`
/// omits an optional argument. Named inputs are looked up by argument name
/// and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum PathInputs {
    Positional(Vec<Option<PathValue>>),
    Named(BTreeMap<String, PathValue>),
}

impl PathInputs {
    /// Named inputs with no values.
    pub fn none() -> Self {
        Self::Named(BTreeMap::new())
    }

    /// Builds named inputs from key/value pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PathValue>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds positional inputs.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<V>>,
        V: Into<PathValue>,
    {
        Self::Positional(values.into_iter().map(|v| v.map(Into::into)).collect())
    }

    /// Named inputs from a JSON object; `null` members count as absent.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::UnsupportedValue`] if a member is an array or
    /// an object.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, PathError> {
        let mut named = BTreeMap::new();
        for (name, value) in map {
            if let Some(value) = PathValue::from_json(name, value)? {
                named.insert(name.clone(), value);
            }
        }
        Ok(Self::Named(named))
    }

    /// Borrows the inputs for rendering.
    pub fn view(&self) -> InputsRef<'_> {
        match self {
            Self::Positional(values) => InputsRef::Positional(values),
            Self::Named(map) => InputsRef::Named(map),
        }
    }
}

impl Default for PathInputs {
    fn default() -> Self {
        Self::none()
    }
}

impl From<BTreeMap<String, PathValue>> for PathInputs {
    fn from(map: BTreeMap<String, PathValue>) -> Self {
        Self::Named(map)
    }
}

impl From<Vec<Option<PathValue>>> for PathInputs {
    fn from(values: Vec<Option<PathValue>>) -> Self {
        Self::Positional(values)
    }
}

/// Borrowed view of [`PathInputs`], passed down to child builders so a
/// composite can hand out positional sub-slices without copying.
#[derive(Debug, Clone, Copy)]
pub enum InputsRef<'a> {
    Positional(&'a [Option<PathValue>]),
    Named(&'a BTreeMap<String, PathValue>),
}

impl<'a> InputsRef<'a> {
    /// Looks up the value for every argument, in argument order.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::ArityMismatch`] when positional inputs do not
    /// have exactly one slot per argument.
    pub(crate) fn resolve(
        self,
        args: &[ArgumentInfo],
    ) -> Result<Vec<Option<&'a PathValue>>, PathError> {
        match self {
            Self::Positional(values) => {
                check_arity(args.len(), values.len())?;
                Ok(values.iter().map(Option::as_ref).collect())
            }
            Self::Named(map) => Ok(args.iter().map(|a| map.get(&a.name)).collect()),
        }
    }
}

pub(crate) fn check_arity(expected: usize, actual: usize) -> Result<(), PathError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PathError::ArityMismatch { expected, actual })
    }
}
