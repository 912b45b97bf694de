pub mod maps;
pub mod metrics;
pub mod players;
pub mod status;
pub mod timeline;
pub mod vision;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use std::sync::Arc;

    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::AppConfig;
    use crate::provider::{DataProvider, FallbackProvider, SampleProvider};

    pub fn sample_app() -> axum::Router {
        build_router(AppState::sample_only(AppConfig::default()))
    }

    /// Router whose live source is `primary`, backed by the built-in samples.
    pub fn app_with_primary(primary: Arc<dyn DataProvider>) -> axum::Router {
        let provider = FallbackProvider::new(Some(primary), SampleProvider::builtin());
        build_router(AppState::with_provider(
            Arc::new(provider),
            AppConfig::default(),
        ))
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}
