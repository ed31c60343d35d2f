use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router<AppState> {
	Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
	let mut body = format!(
		"This server is running DICOM-Archive (v{})",
		env!("CARGO_PKG_VERSION")
	);
	for resource in &state.config.static_resources {
		body.push_str(&format!("\n{} -> {}", resource.base_path, resource.root.display()));
	}
	body
}
