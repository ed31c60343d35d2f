use crate::map::DicomMap;
use crate::types::ResourceLevel;
use crate::value::DicomValue;

/// Builds the find template for a level.
///
/// Every attribute native to the level is present with an empty value, along
/// with the identifying keys of all ancestor levels so that a search can be
/// constrained by e.g. the PatientID of the studies it looks for.
pub fn setup_find_template(level: ResourceLevel) -> DicomMap {
	let mut template = DicomMap::new();
	fill_find_template(&mut template, level);
	template
}

/// Resets `result` to the find template of `level`.
pub fn fill_find_template(result: &mut DicomMap, level: ResourceLevel) {
	result.clear();

	for tag in level.registry() {
		result.set_value(*tag, DicomValue::from(""));
	}

	// Cascading keys always end up empty, even when native to the level.
	for tag in level.cascading_keys() {
		result.set_value(*tag, DicomValue::from(""));
	}
}

impl DicomMap {
	pub fn setup_find_patient_template() -> Self {
		setup_find_template(ResourceLevel::Patient)
	}

	pub fn setup_find_study_template() -> Self {
		setup_find_template(ResourceLevel::Study)
	}

	pub fn setup_find_series_template() -> Self {
		setup_find_template(ResourceLevel::Series)
	}

	pub fn setup_find_instance_template() -> Self {
		setup_find_template(ResourceLevel::Instance)
	}
}
