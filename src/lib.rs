//! Attribute data model of a DICOM archive.
//!
//! A [`DicomMap`] holds the attributes of one data set or query. The
//! [`level`] tables decide which attributes belong to the Patient, Study,
//! Series and Instance levels, from which level-scoped extracts and find
//! templates are derived.

pub mod api;
pub mod bridge;
pub mod config;
pub mod level;
pub mod map;
pub mod query;
pub mod types;
pub mod uri;
pub mod value;

pub use map::{DicomMap, MapError};
pub use types::{ResourceLevel, AE, UI};
pub use value::DicomValue;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
	pub config: AppConfig,
}
