use crate::types::ResourceLevel;
use crate::value::DicomValue;
use dicom::core::{DataDictionary, Tag};
use dicom::object::StandardDataDictionary;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
	#[error("tag {tag} is not present")]
	TagNotFound { tag: Tag },
}

/// An ordered collection of DICOM attributes.
///
/// The map owns every value it holds. Replacing or removing an attribute drops
/// the previous value, and [`Clone`] performs a deep copy so that two maps never
/// share storage. Iteration is in ascending tag order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DicomMap(BTreeMap<Tag, DicomValue>);

impl DicomMap {
	pub const fn new() -> Self {
		Self(BTreeMap::new())
	}

	/// Inserts the value, replacing (and dropping) any value already stored for the tag.
	pub fn set_value(&mut self, tag: Tag, value: impl Into<DicomValue>) {
		self.0.insert(tag, value.into());
	}

	pub fn get_value(&self, tag: Tag) -> Result<&DicomValue, MapError> {
		self.0.get(&tag).ok_or(MapError::TagNotFound { tag })
	}

	/// Like [`Self::get_value`], for callers treating a missing tag as "not provided".
	pub fn test_and_get_value(&self, tag: Tag) -> Option<&DicomValue> {
		self.0.get(&tag)
	}

	pub fn has_tag(&self, tag: Tag) -> bool {
		self.0.contains_key(&tag)
	}

	/// Removes the attribute. Removing an absent tag is a no-op.
	pub fn remove(&mut self, tag: Tag) {
		self.0.remove(&tag);
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, Tag, DicomValue> {
		self.0.iter()
	}

	pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
		self.0.keys().copied()
	}

	/// Projects the map onto the given tags.
	///
	/// Tags missing from `self` are skipped, so the result only ever contains
	/// tags that are present in both `self` and `tags`.
	pub fn extract_tags(&self, tags: &[Tag]) -> Self {
		tags.iter()
			.filter_map(|tag| self.0.get(tag).map(|value| (*tag, value.clone())))
			.collect()
	}

	/// Keeps the attributes native to the given level.
	pub fn extract(&self, level: ResourceLevel) -> Self {
		self.extract_tags(level.registry())
	}

	pub fn extract_patient_information(&self) -> Self {
		self.extract(ResourceLevel::Patient)
	}

	pub fn extract_study_information(&self) -> Self {
		self.extract(ResourceLevel::Study)
	}

	pub fn extract_series_information(&self) -> Self {
		self.extract(ResourceLevel::Series)
	}

	pub fn extract_instance_information(&self) -> Self {
		self.extract(ResourceLevel::Instance)
	}

	pub fn copy_tag_if_exists(&mut self, source: &Self, tag: Tag) {
		if let Some(value) = source.test_and_get_value(tag) {
			self.set_value(tag, value.clone());
		}
	}
}

impl FromIterator<(Tag, DicomValue)> for DicomMap {
	fn from_iter<T: IntoIterator<Item = (Tag, DicomValue)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Extend<(Tag, DicomValue)> for DicomMap {
	fn extend<T: IntoIterator<Item = (Tag, DicomValue)>>(&mut self, iter: T) {
		self.0.extend(iter);
	}
}

impl<'a> IntoIterator for &'a DicomMap {
	type Item = (&'a Tag, &'a DicomValue);
	type IntoIter = btree_map::Iter<'a, Tag, DicomValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl IntoIterator for DicomMap {
	type Item = (Tag, DicomValue);
	type IntoIter = btree_map::IntoIter<Tag, DicomValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Dictionary keyword of a tag, or `?` for private and unknown attributes.
pub fn tag_name(tag: Tag) -> &'static str {
	StandardDataDictionary
		.by_tag(tag)
		.map_or("?", |entry| entry.alias)
}

/// One line per attribute: `(GGGG,EEEE) Keyword = value`.
impl Display for DicomMap {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (tag, value) in &self.0 {
			writeln!(f, "{tag} {} = {value}", tag_name(*tag))?;
		}
		Ok(())
	}
}
