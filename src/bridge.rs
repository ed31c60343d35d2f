//! Conversion between [`DicomMap`] and the data sets of the dicom-rs object model.

use crate::map::DicomMap;
use crate::value::DicomValue;
use dicom::core::header::Header;
use dicom::core::value::{DataSetSequence, Value, C};
use dicom::core::{DataDictionary, DataElement, Length, PrimitiveValue, Tag, VR};
use dicom::object::{InMemDicomObject, StandardDataDictionary};
use tracing::{trace, warn};

impl From<&InMemDicomObject> for DicomMap {
	fn from(object: &InMemDicomObject) -> Self {
		let mut map = Self::new();
		for element in object {
			let tag = element.tag();
			match element.value() {
				Value::Primitive(value) => map.set_value(tag, DicomValue::from(value)),
				Value::Sequence(sequence) => {
					let items: Vec<Self> = sequence.items().iter().map(Self::from).collect();
					map.set_value(tag, items);
				}
				Value::PixelSequence(_) => trace!(%tag, "Skipped encapsulated pixel data"),
			}
		}
		map
	}
}

impl From<&PrimitiveValue> for DicomValue {
	fn from(value: &PrimitiveValue) -> Self {
		match value {
			PrimitiveValue::Empty => Self::Null,
			PrimitiveValue::U8(bytes) => Self::Binary(bytes.to_vec()),
			PrimitiveValue::I16(v) => Self::Ints(v.iter().map(|&n| i64::from(n)).collect()),
			PrimitiveValue::U16(v) => Self::Ints(v.iter().map(|&n| i64::from(n)).collect()),
			PrimitiveValue::I32(v) => Self::Ints(v.iter().map(|&n| i64::from(n)).collect()),
			PrimitiveValue::U32(v) => Self::Ints(v.iter().map(|&n| i64::from(n)).collect()),
			PrimitiveValue::I64(v) => Self::Ints(v.to_vec()),
			PrimitiveValue::U64(v) => v
				.iter()
				.map(|&n| i64::try_from(n))
				.collect::<Result<Vec<_>, _>>()
				.map_or_else(|_| Self::Str(value.to_str().into_owned()), Self::Ints),
			PrimitiveValue::F32(v) => Self::Floats(v.iter().map(|&n| f64::from(n)).collect()),
			PrimitiveValue::F64(v) => Self::Floats(v.to_vec()),
			// Text, dates, times and tags
			other => Self::Str(other.to_str().into_owned()),
		}
	}
}

impl DicomMap {
	/// Builds an in-memory data set holding the same attributes.
	///
	/// The value representation comes from the standard dictionary when the
	/// tag is known, and is derived from the value otherwise.
	pub fn to_in_mem_object(&self) -> InMemDicomObject {
		InMemDicomObject::from_element_iter(self.iter().map(|(tag, value)| {
			let vr = vr_of(*tag, value);
			match value {
				DicomValue::Sequence(items) => {
					let items: Vec<InMemDicomObject> =
						items.iter().map(Self::to_in_mem_object).collect();
					DataElement::new(
						*tag,
						VR::SQ,
						Value::Sequence(DataSetSequence::new(items, Length::UNDEFINED)),
					)
				}
				primitive => DataElement::new(*tag, vr, to_primitive(primitive, vr)),
			}
		}))
	}
}

fn vr_of(tag: Tag, value: &DicomValue) -> VR {
	if let Some(entry) = StandardDataDictionary.by_tag(tag) {
		return entry.vr.relaxed();
	}

	match value {
		DicomValue::Null => VR::UN,
		DicomValue::Str(_) => VR::LO,
		DicomValue::Ints(_) => VR::SL,
		DicomValue::Floats(_) => VR::FD,
		DicomValue::Binary(_) => VR::OB,
		DicomValue::Sequence(_) => VR::SQ,
	}
}

/// Encodes the value with the in-memory type its VR calls for.
fn to_primitive(value: &DicomValue, vr: VR) -> PrimitiveValue {
	match value {
		DicomValue::Null | DicomValue::Sequence(_) => PrimitiveValue::Empty,
		DicomValue::Ints(v) => ints_to_primitive(v, vr),
		DicomValue::Floats(v) => floats_to_primitive(v, vr),
		DicomValue::Str(s) => str_to_primitive(s, vr),
		DicomValue::Binary(bytes) => PrimitiveValue::U8(bytes.iter().copied().collect()),
	}
}

fn narrow<T: TryFrom<i64>>(values: &[i64]) -> Option<C<T>> {
	values.iter().map(|&n| T::try_from(n).ok()).collect()
}

fn decimal_strings<T: ToString>(values: &[T]) -> PrimitiveValue {
	PrimitiveValue::Strs(values.iter().map(ToString::to_string).collect())
}

fn ints_to_primitive(values: &[i64], vr: VR) -> PrimitiveValue {
	let narrowed = match vr {
		VR::US | VR::OW => narrow(values).map(PrimitiveValue::U16),
		VR::SS => narrow(values).map(PrimitiveValue::I16),
		VR::UL | VR::OL => narrow(values).map(PrimitiveValue::U32),
		VR::SL => narrow(values).map(PrimitiveValue::I32),
		VR::UV | VR::OV => narrow(values).map(PrimitiveValue::U64),
		VR::SV => Some(PrimitiveValue::I64(values.iter().copied().collect())),
		#[allow(clippy::cast_precision_loss)]
		VR::FL | VR::OF | VR::FD | VR::OD => Some(floats_to_primitive(
			&values.iter().map(|&n| n as f64).collect::<Vec<_>>(),
			vr,
		)),
		_ => Some(decimal_strings(values)),
	};

	narrowed.unwrap_or_else(|| {
		warn!(%vr, "Integer value out of range for its VR, encoding it as text");
		decimal_strings(values)
	})
}

fn floats_to_primitive(values: &[f64], vr: VR) -> PrimitiveValue {
	match vr {
		#[allow(clippy::cast_possible_truncation)]
		VR::FL | VR::OF => PrimitiveValue::F32(values.iter().map(|&n| n as f32).collect()),
		VR::FD | VR::OD => PrimitiveValue::F64(values.iter().copied().collect()),
		_ => decimal_strings(values),
	}
}

fn str_to_primitive(s: &str, vr: VR) -> PrimitiveValue {
	if s.is_empty() {
		return PrimitiveValue::Empty;
	}

	match vr {
		// A backslash is part of the text for these VRs
		VR::LT | VR::ST | VR::UT | VR::UR => PrimitiveValue::from(s),
		VR::US | VR::OW | VR::SS | VR::UL | VR::OL | VR::SL | VR::UV | VR::OV | VR::SV => {
			match s.split('\\').map(|n| n.trim().parse::<i64>()).collect::<Result<Vec<_>, _>>() {
				Ok(values) => ints_to_primitive(&values, vr),
				Err(err) => {
					warn!(%vr, "Kept non-numeric text as is: {err}");
					PrimitiveValue::from(s)
				}
			}
		}
		VR::FL | VR::OF | VR::FD | VR::OD => {
			match s.split('\\').map(|n| n.trim().parse::<f64>()).collect::<Result<Vec<_>, _>>() {
				Ok(values) => floats_to_primitive(&values, vr),
				Err(err) => {
					warn!(%vr, "Kept non-numeric text as is: {err}");
					PrimitiveValue::from(s)
				}
			}
		}
		_ if s.contains('\\') => PrimitiveValue::Strs(s.split('\\').map(str::to_owned).collect()),
		_ => PrimitiveValue::from(s),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dicom::dictionary_std::tags;

	fn sample_object() -> InMemDicomObject {
		let item = InMemDicomObject::from_element_iter([DataElement::new(
			tags::PATIENT_ID,
			VR::LO,
			PrimitiveValue::from("OTHER"),
		)]);

		InMemDicomObject::from_element_iter([
			DataElement::new(tags::PATIENT_ID, VR::LO, PrimitiveValue::from("P1")),
			DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("CT")),
			DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(512_u16)),
			DataElement::new(tags::PATIENT_WEIGHT, VR::DS, PrimitiveValue::Empty),
			DataElement::new(
				tags::OTHER_PATIENT_I_DS_SEQUENCE,
				VR::SQ,
				Value::Sequence(DataSetSequence::new(vec![item], Length::UNDEFINED)),
			),
		])
	}

	#[test]
	fn from_in_mem_object() {
		let map = DicomMap::from(&sample_object());

		assert_eq!(map.len(), 5);
		assert_eq!(map.get_value(tags::PATIENT_ID).unwrap().as_str(), Some("P1"));
		assert_eq!(map.get_value(tags::ROWS).unwrap(), &DicomValue::Ints(vec![512]));
		assert!(map.get_value(tags::PATIENT_WEIGHT).unwrap().is_null());

		let DicomValue::Sequence(items) = map.get_value(tags::OTHER_PATIENT_I_DS_SEQUENCE).unwrap()
		else {
			panic!("expected a sequence");
		};
		assert_eq!(items.len(), 1);
		assert_eq!(
			items[0].get_value(tags::PATIENT_ID).unwrap().as_str(),
			Some("OTHER")
		);
	}

	#[test]
	fn to_in_mem_object_uses_dictionary_vr() {
		let mut map = DicomMap::new();
		map.set_value(tags::MODALITY, "MR");
		map.set_value(tags::PATIENT_ID, "P1");

		let object = map.to_in_mem_object();
		let modality = object.element(tags::MODALITY).unwrap();
		assert_eq!(modality.vr(), VR::CS);
		assert_eq!(modality.to_str().unwrap(), "MR");
		assert_eq!(object.element(tags::PATIENT_ID).unwrap().vr(), VR::LO);
	}

	#[test]
	fn template_converts_to_empty_elements() {
		let object = DicomMap::setup_find_study_template().to_in_mem_object();
		let back = DicomMap::from(&object);

		assert_eq!(back.len(), DicomMap::setup_find_study_template().len());
		assert!(back.iter().all(|(_, value)| value.is_empty()));
	}

	#[test]
	fn roundtrip_keeps_binary_and_multi_valued_types() {
		let object = InMemDicomObject::from_element_iter([
			DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(512_u16)),
			DataElement::new(
				tags::IMAGE_TYPE,
				VR::CS,
				PrimitiveValue::Strs(["ORIGINAL", "PRIMARY"].map(String::from).into()),
			),
			DataElement::new(tags::SLICE_THICKNESS, VR::DS, PrimitiveValue::from("2.5")),
		]);

		let map = DicomMap::from(&object);
		assert_eq!(
			map.get_value(tags::IMAGE_TYPE).unwrap().as_str(),
			Some("ORIGINAL\\PRIMARY")
		);

		let back = map.to_in_mem_object();

		let rows = back.element(tags::ROWS).unwrap();
		assert_eq!(rows.vr(), VR::US);
		assert!(matches!(
			rows.value().primitive(),
			Some(PrimitiveValue::U16(values)) if values.as_slice() == [512]
		));

		let image_type = back.element(tags::IMAGE_TYPE).unwrap();
		assert_eq!(image_type.vr(), VR::CS);
		assert!(matches!(
			image_type.value().primitive(),
			Some(PrimitiveValue::Strs(_))
		));
		assert_eq!(image_type.value().multiplicity(), 2);
		assert_eq!(
			image_type.value().to_multi_str().unwrap().as_ref(),
			["ORIGINAL", "PRIMARY"]
		);

		let thickness = back.element(tags::SLICE_THICKNESS).unwrap();
		assert_eq!(thickness.vr(), VR::DS);
		assert_eq!(thickness.to_str().unwrap(), "2.5");
	}

	#[test]
	fn numbers_follow_the_dictionary_vr() {
		let mut map = DicomMap::new();
		map.set_value(tags::COLUMNS, DicomValue::Ints(vec![256]));
		map.set_value(tags::PIXEL_SPACING, DicomValue::Floats(vec![0.5, 0.5]));
		map.set_value(tags::INSTANCE_NUMBER, DicomValue::Ints(vec![7]));
		map.set_value(tags::ROWS, DicomValue::Ints(vec![70_000]));

		let object = map.to_in_mem_object();

		assert!(matches!(
			object.element(tags::COLUMNS).unwrap().value().primitive(),
			Some(PrimitiveValue::U16(_))
		));

		let spacing = object.element(tags::PIXEL_SPACING).unwrap();
		assert_eq!(spacing.vr(), VR::DS);
		assert_eq!(spacing.value().multiplicity(), 2);
		assert_eq!(spacing.to_str().unwrap(), "0.5\\0.5");

		assert_eq!(object.element(tags::INSTANCE_NUMBER).unwrap().to_str().unwrap(), "7");

		// Out of range for US
		assert!(matches!(
			object.element(tags::ROWS).unwrap().value().primitive(),
			Some(PrimitiveValue::Strs(_))
		));
	}
}
