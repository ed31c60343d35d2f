use crate::value::DicomValue;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// UI (Unique Identifier) value representation.
pub type UI = String;

/// AE (Application Entity) value representation.
pub type AE = String;

/// The four levels of the imaging information model, from the root down.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceLevel {
	Patient,
	Study,
	Series,
	Instance,
}

impl ResourceLevel {
	/// All levels, ordered from the root (Patient) to the leaves (Instance).
	pub const ALL: [Self; 4] = [Self::Patient, Self::Study, Self::Series, Self::Instance];

	pub const fn parent(self) -> Option<Self> {
		match self {
			Self::Patient => None,
			Self::Study => Some(Self::Patient),
			Self::Series => Some(Self::Study),
			Self::Instance => Some(Self::Series),
		}
	}

	pub const fn child(self) -> Option<Self> {
		match self {
			Self::Patient => Some(Self::Study),
			Self::Study => Some(Self::Series),
			Self::Series => Some(Self::Instance),
			Self::Instance => None,
		}
	}
}

impl Display for ResourceLevel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Patient => write!(f, "PATIENT"),
			Self::Study => write!(f, "STUDY"),
			Self::Series => write!(f, "SERIES"),
			Self::Instance => write!(f, "IMAGE"),
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown query/retrieve level `{0}`")]
pub struct ParseLevelError(pub String);

impl FromStr for ResourceLevel {
	type Err = ParseLevelError;

	/// Parses a Query/Retrieve Level (0008,0052) value.
	/// Padding is ignored and the comparison is case-insensitive.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\0');
		match trimmed.to_ascii_uppercase().as_str() {
			"PATIENT" => Ok(Self::Patient),
			"STUDY" => Ok(Self::Study),
			"SERIES" => Ok(Self::Series),
			"IMAGE" | "INSTANCE" => Ok(Self::Instance),
			_ => Err(ParseLevelError(trimmed.to_owned())),
		}
	}
}

impl From<ResourceLevel> for DicomValue {
	fn from(level: ResourceLevel) -> Self {
		Self::Str(level.to_string())
	}
}
