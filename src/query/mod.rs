//! Query support built on top of [`DicomMap`](crate::map::DicomMap):
//! find templates per level and resolution of retrieve (C-MOVE) targets.

pub mod retrieve;
pub mod template;

pub use retrieve::{resolve, ResourceIndex, RetrieveError, RetrieveTarget};
pub use template::setup_find_template;
