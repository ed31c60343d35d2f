//! Attributes native to each level of the Patient → Study → Series → Instance hierarchy.
//!
//! These tables decide which attributes are indexed per level and which ones
//! appear in find templates. They must stay identical across releases for
//! interoperability with existing archives.

use crate::types::ResourceLevel;
use dicom::core::Tag;
use dicom::dictionary_std::tags;

pub const PATIENT_TAGS: &[Tag] = &[
	tags::PATIENT_NAME,
	tags::PATIENT_ID,
	tags::PATIENT_BIRTH_DATE,
	tags::PATIENT_SEX,
	tags::OTHER_PATIENT_I_DS,
];

pub const STUDY_TAGS: &[Tag] = &[
	tags::STUDY_DATE,
	tags::STUDY_TIME,
	tags::ACCESSION_NUMBER,
	tags::STUDY_DESCRIPTION,
	tags::STUDY_INSTANCE_UID,
	tags::STUDY_ID,
];

pub const SERIES_TAGS: &[Tag] = &[
	tags::SERIES_DATE,
	tags::SERIES_TIME,
	tags::MODALITY,
	tags::MANUFACTURER,
	tags::STATION_NAME,
	tags::SERIES_DESCRIPTION,
	tags::BODY_PART_EXAMINED,
	tags::SEQUENCE_NAME,
	tags::PROTOCOL_NAME,
	tags::SERIES_INSTANCE_UID,
	tags::SERIES_NUMBER,
	tags::IMAGES_IN_ACQUISITION,
	tags::NUMBER_OF_SLICES,
];

pub const INSTANCE_TAGS: &[Tag] = &[
	tags::INSTANCE_CREATION_DATE,
	tags::INSTANCE_CREATION_TIME,
	tags::SOP_INSTANCE_UID,
	tags::ACQUISITION_NUMBER,
	tags::INSTANCE_NUMBER,
	tags::NUMBER_OF_FRAMES,
	tags::IMAGE_INDEX,
];

/// Keys that scope an ancestor level and must be searchable from every descendant level.
pub const CASCADING_KEYS: &[Tag] = &[
	tags::ACCESSION_NUMBER,
	tags::PATIENT_ID,
	tags::STUDY_INSTANCE_UID,
	tags::SERIES_INSTANCE_UID,
];

impl ResourceLevel {
	/// The attributes native to this level.
	pub const fn registry(self) -> &'static [Tag] {
		match self {
			Self::Patient => PATIENT_TAGS,
			Self::Study => STUDY_TAGS,
			Self::Series => SERIES_TAGS,
			Self::Instance => INSTANCE_TAGS,
		}
	}

	/// The ancestor keys a find request at this level may be constrained by.
	pub fn cascading_keys(self) -> &'static [Tag] {
		match self {
			Self::Patient => &[],
			Self::Study => &CASCADING_KEYS[..2],
			Self::Series => &CASCADING_KEYS[..3],
			Self::Instance => CASCADING_KEYS,
		}
	}

	/// The unique identifier of a resource at this level.
	pub const fn identifier_tag(self) -> Tag {
		match self {
			Self::Patient => tags::PATIENT_ID,
			Self::Study => tags::STUDY_INSTANCE_UID,
			Self::Series => tags::SERIES_INSTANCE_UID,
			Self::Instance => tags::SOP_INSTANCE_UID,
		}
	}
}
