use crate::config::StaticResourceConfig;
use crate::AppState;
use axum::Router;
use std::collections::HashSet;

pub mod files;
mod home;

pub use files::{StaticError, StaticResources};

/// Builds the HTTP router.
/// Every static resource root is checked here so that a misconfiguration
/// stops the server before it accepts any request.
pub fn routes(resources: &[StaticResourceConfig]) -> Result<Router<AppState>, StaticError> {
	let mut router = Router::new();
	let mut root_is_served = false;
	let mut base_paths = HashSet::new();

	for resource in resources {
		let served = StaticResources::new(&resource.base_path, &resource.root)?
			.with_directory_listing(resource.list_directory);
		let base_path = served.base_path();
		if !base_paths.insert(base_path.clone()) {
			return Err(StaticError::DuplicateBasePath(base_path));
		}
		root_is_served |= base_path == "/";
		router = router.merge(served.routes());
	}

	if !root_is_served {
		router = router.merge(home::routes());
	}
	Ok(router)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{AppConfig, HttpServerConfig, ServerConfig, TelemetryConfig};
	use axum::body::{to_bytes, Body};
	use axum::http::{Request, StatusCode};
	use std::net::{IpAddr, Ipv4Addr};
	use std::path::Path;
	use tower::ServiceExt;

	fn state(resources: Vec<StaticResourceConfig>) -> AppState {
		AppState {
			config: AppConfig {
				telemetry: TelemetryConfig {
					level: tracing::Level::INFO,
					sentry: None,
				},
				server: ServerConfig {
					http: HttpServerConfig {
						interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
						port: 8080,
						graceful_shutdown: false,
						request_timeout: 60,
					},
				},
				static_resources: resources,
			},
		}
	}

	fn resource(base_path: &str, root: &Path) -> StaticResourceConfig {
		StaticResourceConfig {
			base_path: base_path.to_owned(),
			root: root.to_path_buf(),
			list_directory: false,
		}
	}

	async fn get(router: Router, uri: &str) -> (StatusCode, String) {
		let response = router
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, String::from_utf8(bytes.to_vec()).unwrap())
	}

	#[test]
	fn fails_fast_on_invalid_root() {
		let dir = tempfile::tempdir().unwrap();
		let resources = [resource("/app", &dir.path().join("missing"))];

		assert!(matches!(
			routes(&resources),
			Err(StaticError::InvalidRoot(_))
		));
	}

	#[test]
	fn rejects_duplicate_base_paths() {
		let dir = tempfile::tempdir().unwrap();
		let resources = [resource("/app", dir.path()), resource("/app/", dir.path())];

		assert!(matches!(
			routes(&resources),
			Err(StaticError::DuplicateBasePath(path)) if path == "/app"
		));
	}

	#[tokio::test]
	async fn home_and_static_resources() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("index.html"), "<html/>").unwrap();
		let resources = vec![resource("/app", dir.path())];

		let router = routes(&resources).unwrap().with_state(state(resources));

		let (status, body) = get(router.clone(), "/").await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.starts_with("This server is running DICOM-Archive"));
		assert!(body.contains("/app -> "));

		let (status, body) = get(router.clone(), "/app/index.html").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, "<html/>");

		let (status, _) = get(router, "/app/missing.html").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn static_resources_at_root_replace_home() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("index.html"), "<html/>").unwrap();
		let resources = vec![StaticResourceConfig {
			list_directory: true,
			..resource("/", dir.path())
		}];

		let router = routes(&resources).unwrap().with_state(state(resources));

		let (status, body) = get(router.clone(), "/").await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("<li><a href=\"/index.html\">index.html</a></li>"));
		assert!(!body.contains("<a href=\"//..\">"));

		let (status, body) = get(router, "/index.html").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, "<html/>");
	}
}
