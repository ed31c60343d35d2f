use crate::map::{tag_name, DicomMap};
use crate::types::{ParseLevelError, ResourceLevel};
use dicom::core::Tag;
use dicom::dictionary_std::tags;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Lookup of stored resources by identifying attribute.
///
/// Implemented by the storage layer of the archive.
pub trait ResourceIndex {
	/// Returns the public ids of every resource whose `tag` equals `value`.
	fn lookup_identifier(&self, tag: Tag, value: &str) -> Vec<String>;
}

/// The stored resource a retrieve request designates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveTarget {
	pub level: ResourceLevel,
	pub public_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetrieveError {
	#[error(transparent)]
	InvalidLevel(#[from] ParseLevelError),
	#[error("no identifier of the request designates a unique {0:?} resource")]
	UnknownResource(ResourceLevel),
	#[error("the request contains no usable identifier")]
	NoIdentifier,
}

/// Determines which stored resource a retrieve request designates.
///
/// The Query/Retrieve Level decides which identifier is looked up. Some
/// modalities omit the level; the identifiers are then tried from the
/// Instance level up to the Patient level until one designates a resource.
#[instrument(skip_all)]
pub fn resolve<I>(input: &DicomMap, index: &I) -> Result<RetrieveTarget, RetrieveError>
where
	I: ResourceIndex + ?Sized,
{
	for (tag, value) in input {
		if !value.is_null() {
			info!("  {tag}  {} = {value}", tag_name(*tag));
		}
	}

	let Some(level) = input.test_and_get_value(tags::QUERY_RETRIEVE_LEVEL) else {
		warn!("Query/Retrieve Level is missing, deducing it from the identifiers");
		return ResourceLevel::ALL
			.iter()
			.rev()
			.find_map(|&level| lookup(input, index, level))
			.ok_or(RetrieveError::NoIdentifier);
	};

	let level: ResourceLevel = level
		.to_string_value()
		.map_err(|_| ParseLevelError(level.to_string()))?
		.parse()?;
	lookup(input, index, level).ok_or(RetrieveError::UnknownResource(level))
}

fn lookup<I>(input: &DicomMap, index: &I, level: ResourceLevel) -> Option<RetrieveTarget>
where
	I: ResourceIndex + ?Sized,
{
	let tag = level.identifier_tag();
	let value = input.test_and_get_value(tag)?.to_string_value().ok()?;

	let mut ids = index.lookup_identifier(tag, &value);
	if ids.len() == 1 {
		ids.pop().map(|public_id| RetrieveTarget { level, public_id })
	} else {
		debug!(%tag, %value, matches = ids.len(), "Identifier does not designate a unique resource");
		None
	}
}
