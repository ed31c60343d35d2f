//! Serves the files below a directory of the local filesystem.

use crate::uri::{
	autodetect_mime_type, flatten_uri, is_child_uri, split_uri_components, UriComponents,
	UriError,
};
use axum::extract::{Path as UriPath, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, instrument};

#[derive(Debug, Error)]
pub enum StaticError {
	#[error("the path {} does not point to a directory", .0.display())]
	InvalidRoot(PathBuf),
	#[error(transparent)]
	InvalidUri(#[from] UriError),
	#[error("more than one static resource is served at {0}")]
	DuplicateBasePath(String),
}

/// Maps the URIs below a base path to the files below a root directory.
#[derive(Debug, Clone)]
pub struct StaticResources {
	base_uri: UriComponents,
	root: PathBuf,
	list_directory_content: bool,
}

impl StaticResources {
	/// Fails if `root` is not an existing directory.
	pub fn new(base_uri: &str, root: impl Into<PathBuf>) -> Result<Self, StaticError> {
		let base_uri = split_uri_components(base_uri)?;
		let root = root.into();
		if !root.is_dir() {
			return Err(StaticError::InvalidRoot(root));
		}

		Ok(Self {
			base_uri,
			root,
			list_directory_content: false,
		})
	}

	#[must_use]
	pub fn with_directory_listing(mut self, enabled: bool) -> Self {
		self.list_directory_content = enabled;
		self
	}

	pub const fn list_directory_content(&self) -> bool {
		self.list_directory_content
	}

	pub fn base_path(&self) -> String {
		flatten_uri(&self.base_uri)
	}

	pub fn is_served_uri(&self, uri: &[String]) -> bool {
		is_child_uri(&self.base_uri, uri)
	}

	pub fn routes<S>(self) -> Router<S>
	where
		S: Clone + Send + Sync + 'static,
	{
		let base = self.base_path();
		let wildcard = if self.base_uri.is_empty() {
			String::from("/{*path}")
		} else {
			format!("{base}/{{*path}}")
		};

		Router::new()
			.route(&base, any(serve_base))
			.route(&wildcard, any(serve_path))
			.with_state(Arc::new(self))
	}

	#[instrument(skip(self))]
	pub async fn handle(&self, method: &Method, uri: &[String]) -> Response {
		if *method != Method::GET {
			return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")]).into_response();
		}

		let Some(path) = self.resolve(uri) else {
			return StatusCode::NOT_FOUND.into_response();
		};

		match tokio::fs::metadata(&path).await {
			Ok(metadata) if metadata.is_file() => answer_file(&path).await,
			Ok(metadata) if metadata.is_dir() && self.list_directory_content => {
				match directory_content(uri, &path).await {
					Ok(html) => Html(html).into_response(),
					Err(err) => {
						error!("Failed to list directory {}: {err}", path.display());
						StatusCode::INTERNAL_SERVER_ERROR.into_response()
					}
				}
			}
			_ => StatusCode::NOT_FOUND.into_response(),
		}
	}

	fn resolve(&self, uri: &[String]) -> Option<PathBuf> {
		let relative = uri.strip_prefix(self.base_uri.as_slice())?;

		let mut path = self.root.clone();
		for component in relative {
			if component == "." || component == ".." || component.contains('\\') {
				return None;
			}
			path.push(component);
		}
		Some(path)
	}
}

async fn serve_base(State(resources): State<Arc<StaticResources>>, method: Method) -> Response {
	resources.handle(&method, &resources.base_uri).await
}

async fn serve_path(
	State(resources): State<Arc<StaticResources>>,
	method: Method,
	UriPath(path): UriPath<String>,
) -> Response {
	let mut uri = resources.base_uri.clone();
	uri.extend(
		path.split('/')
			.filter(|component| !component.is_empty())
			.map(str::to_owned),
	);
	resources.handle(&method, &uri).await
}

async fn answer_file(path: &Path) -> Response {
	match tokio::fs::read(path).await {
		Ok(content) => match path.to_str().and_then(autodetect_mime_type) {
			Some(mime) => ([(header::CONTENT_TYPE, mime.to_string())], content).into_response(),
			None => content.into_response(),
		},
		Err(err) => {
			error!("Failed to read {}: {err}", path.display());
			StatusCode::INTERNAL_SERVER_ERROR.into_response()
		}
	}
}

async fn directory_content(uri: &[String], path: &Path) -> std::io::Result<String> {
	let mut directories = Vec::new();
	let mut files = Vec::new();

	let mut entries = tokio::fs::read_dir(path).await?;
	while let Some(entry) = entries.next_entry().await? {
		let name = entry.file_name().to_string_lossy().into_owned();
		let file_type = entry.file_type().await?;
		if file_type.is_dir() {
			directories.push(name);
		} else if file_type.is_file() {
			files.push(name);
		}
	}
	directories.sort();
	files.sort();

	let flattened = flatten_uri(uri);
	let href = |name: &str| {
		if flattened.ends_with('/') {
			escape_html(&format!("{flattened}{name}"))
		} else {
			escape_html(&format!("{flattened}/{name}"))
		}
	};

	let mut html = String::from("<html>\n  <body>\n    <h1>Subdirectories</h1>\n    <ul>\n");
	if !uri.is_empty() {
		let parent = escape_html(&flattened);
		let _ = writeln!(html, "<li><a href=\"{parent}/..\">..</a></li>");
	}
	for name in &directories {
		let _ = writeln!(html, "<li><a href=\"{}\">{}</a></li>", href(name), escape_html(name));
	}
	html.push_str("    </ul>\n    <h1>Files</h1>\n    <ul>\n");
	for name in &files {
		let _ = writeln!(html, "<li><a href=\"{}\">{}</a></li>", href(name), escape_html(name));
	}
	html.push_str("    </ul>\n  </body>\n</html>\n");

	Ok(html)
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			c => escaped.push(c),
		}
	}
	escaped
}
