use crate::map::DicomMap;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The content of a single attribute inside a [`DicomMap`].
///
/// The set of variants is closed: every attribute of the imaging metadata
/// standard is either a text, a list of numbers, raw bytes or a sequence of
/// nested data sets. Cloning a value always produces an independent deep copy.
#[derive(Debug, Clone, PartialEq)]
pub enum DicomValue {
	/// The attribute is present but carries no value at all.
	Null,
	/// Text content. Multiple values are separated by a backslash.
	Str(String),
	Ints(Vec<i64>),
	Floats(Vec<f64>),
	Binary(Vec<u8>),
	/// Nested data set items.
	Sequence(Vec<DicomMap>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
	Null,
	Str,
	Ints,
	Floats,
	Binary,
	Sequence,
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Null => write!(f, "null"),
			Self::Str => write!(f, "string"),
			Self::Ints => write!(f, "integer"),
			Self::Floats => write!(f, "floating point"),
			Self::Binary => write!(f, "binary"),
			Self::Sequence => write!(f, "sequence"),
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
	#[error("a {kind} value cannot be represented as a string")]
	NotConvertible { kind: ValueKind },
}

impl DicomValue {
	pub const fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Str(_) => ValueKind::Str,
			Self::Ints(_) => ValueKind::Ints,
			Self::Floats(_) => ValueKind::Floats,
			Self::Binary(_) => ValueKind::Binary,
			Self::Sequence(_) => ValueKind::Sequence,
		}
	}

	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Whether the value holds no content (null, empty text, no items...).
	/// Find templates are made of such values.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Null => true,
			Self::Str(s) => s.is_empty(),
			Self::Ints(v) => v.is_empty(),
			Self::Floats(v) => v.is_empty(),
			Self::Binary(v) => v.is_empty(),
			Self::Sequence(items) => items.is_empty(),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Renders text and numeric values as a string.
	/// Numbers with multiplicity are joined by a backslash.
	pub fn to_string_value(&self) -> Result<Cow<'_, str>, ValueError> {
		match self {
			Self::Str(s) => Ok(Cow::Borrowed(s)),
			Self::Ints(v) => Ok(Cow::Owned(join_backslash(v))),
			Self::Floats(v) => Ok(Cow::Owned(join_backslash(v))),
			other => Err(ValueError::NotConvertible { kind: other.kind() }),
		}
	}
}

fn join_backslash<T: ToString>(values: &[T]) -> String {
	values
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("\\")
}

impl Display for DicomValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Null => write!(f, "(null)"),
			Self::Binary(bytes) => write!(f, "({} bytes)", bytes.len()),
			Self::Sequence(items) => write!(f, "({} items)", items.len()),
			Self::Str(s) => write!(f, "{s}"),
			Self::Ints(v) => write!(f, "{}", join_backslash(v)),
			Self::Floats(v) => write!(f, "{}", join_backslash(v)),
		}
	}
}

impl From<&str> for DicomValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for DicomValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<i64> for DicomValue {
	fn from(value: i64) -> Self {
		Self::Ints(vec![value])
	}
}

impl From<f64> for DicomValue {
	fn from(value: f64) -> Self {
		Self::Floats(vec![value])
	}
}

impl From<Vec<u8>> for DicomValue {
	fn from(value: Vec<u8>) -> Self {
		Self::Binary(value)
	}
}

impl From<Vec<DicomMap>> for DicomValue {
	fn from(items: Vec<DicomMap>) -> Self {
		Self::Sequence(items)
	}
}
