use std::path::Path;
use thiserror::Error;

/// The non-empty path components of a URI, e.g. `["app", "index.html"]`.
pub type UriComponents = Vec<String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UriError {
	#[error("URI `{0}` is not absolute")]
	NotAbsolute(String),
}

pub fn split_uri_components(uri: &str) -> Result<UriComponents, UriError> {
	if !uri.starts_with('/') {
		return Err(UriError::NotAbsolute(uri.to_owned()));
	}

	Ok(uri
		.split('/')
		.filter(|component| !component.is_empty())
		.map(str::to_owned)
		.collect())
}

/// Whether `uri` equals `base` or lies below it.
pub fn is_child_uri(base: &[String], uri: &[String]) -> bool {
	uri.starts_with(base)
}

pub fn flatten_uri(components: &[String]) -> String {
	format!("/{}", components.join("/"))
}

/// Guesses the content type of a file from its extension.
pub fn autodetect_mime_type(path: &str) -> Option<mime::Mime> {
	let extension = Path::new(path)
		.file_name()
		.and_then(|name| name.to_str())
		.and_then(|name| name.rsplit_once('.'))
		.map(|(_, extension)| extension.to_ascii_lowercase())?;

	let mime = match extension.as_str() {
		"txt" => mime::TEXT_PLAIN,
		"xml" => mime::TEXT_XML,
		"js" => mime::APPLICATION_JAVASCRIPT,
		"json" => mime::APPLICATION_JSON,
		"pdf" => mime::APPLICATION_PDF,
		"css" => mime::TEXT_CSS,
		"html" => mime::TEXT_HTML,
		"gif" => mime::IMAGE_GIF,
		"jpg" | "jpeg" => mime::IMAGE_JPEG,
		"png" => mime::IMAGE_PNG,
		_ => return None,
	};
	Some(mime)
}
