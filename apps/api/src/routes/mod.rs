pub mod health;
pub mod resources;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};

use crate::models::{Employer, JobListing, Resource, User};
use crate::similarity::handlers::handle_similar;
use crate::state::AppState;
use crate::store::ResourceStore;

/// `/{collection}` and `/{collection}/:id` for one resource kind.
fn resource_routes<R>() -> Router<AppState>
where
    R: Resource,
    Arc<dyn ResourceStore<R>>: FromRef<AppState>,
{
    let collection = format!("/{}", R::COLLECTION);
    let item = format!("/{}/:id", R::COLLECTION);

    Router::new()
        .route(
            &collection,
            get(resources::handle_list::<R>).post(resources::handle_create::<R>),
        )
        .route(
            &item,
            get(resources::handle_get::<R>).delete(resources::handle_delete::<R>),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .merge(resource_routes::<User>())
        .merge(resource_routes::<Employer>())
        .merge(resource_routes::<JobListing>())
        .route("/listings/:id/similar", get(handle_similar))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::remote_jobs::testing::{candidates, StubSource};

    fn state_with(source: Arc<StubSource>) -> AppState {
        let config = Config::from_lookup(|_| None).unwrap();
        AppState::in_memory(source, config)
    }

    async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn backend_engineer() -> Value {
        json!({
            "title": "Backend Engineer",
            "location": "Remote",
            "type": "Full-time",
            "experience": "3+ years",
            "salary": "120k"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let state = state_with(Arc::new(StubSource::returning(vec![])));
        let (status, body) = send(&state, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }

    #[tokio::test]
    async fn test_create_list_get_delete_user() {
        let state = state_with(Arc::new(StubSource::returning(vec![])));
        let ada = json!({ "first_name": "Ada", "last_name": "Lovelace", "username": "ada" });

        let (status, first) = send(&state, "POST", "/users", Some(ada.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, second) = send(&state, "POST", "/users", Some(ada)).await;
        assert_ne!(first["id"], second["id"]);

        let (status, listed) = send(&state, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["users"].as_array().unwrap().len(), 2);
        assert_eq!(listed["users"][0]["username"], "ada");

        let uri = format!("/users/{}", first["id"]);
        let (status, fetched) = send(&state, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, first);

        let (status, _) = send(&state, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&state, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(&state, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_employers_have_their_own_collection() {
        let state = state_with(Arc::new(StubSource::returning(vec![])));
        let acme = json!({ "employer_name": "Acme", "username": "acme" });

        let (status, created) = send(&state, "POST", "/employers", Some(acme)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["employer_name"], "Acme");

        let (_, users) = send(&state, "GET", "/users", None).await;
        assert_eq!(users["users"], json!([]));
        let (_, employers) = send(&state, "GET", "/employers", None).await;
        assert_eq!(employers["employers"][0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_validation_error() {
        let state = state_with(Arc::new(StubSource::returning(vec![])));
        let (status, body) =
            send(&state, "POST", "/listings", Some(json!({ "title": "Backend Engineer" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, listed) = send(&state, "GET", "/listings", None).await;
        assert_eq!(listed["listings"], json!([]));
    }

    #[tokio::test]
    async fn test_similar_returns_listing_and_truncated_matches() {
        let source = Arc::new(StubSource::returning(candidates(7)));
        let state = state_with(source.clone());
        let (_, listing) = send(&state, "POST", "/listings", Some(backend_engineer())).await;

        let uri = format!("/listings/{}/similar?limit=5", listing["id"]);
        let (status, body) = send(&state, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["local_listing"], listing);
        let matches = body["remote_matches"].as_array().unwrap();
        assert_eq!(matches.len(), 5);
        assert_eq!(matches[0]["title"], "Remote Job 0");
        assert_eq!(matches[0]["company"], "Company 0");
        assert!(matches[0].get("publication_date").is_some());
        assert_eq!(source.terms(), vec!["Backend Engineer".to_string()]);
    }

    #[tokio::test]
    async fn test_similar_defaults_to_five() {
        let state = state_with(Arc::new(StubSource::returning(candidates(9))));
        let (_, listing) = send(&state, "POST", "/listings", Some(backend_engineer())).await;

        let uri = format!("/listings/{}/similar", listing["id"]);
        let (_, body) = send(&state, "GET", &uri, None).await;

        assert_eq!(body["remote_matches"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_similar_unknown_listing_is_404() {
        let source = Arc::new(StubSource::returning(candidates(3)));
        let state = state_with(source.clone());

        let (status, body) = send(&state, "GET", "/listings/41/similar", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Listing 41 not found");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_similar_rejects_bad_limits() {
        let source = Arc::new(StubSource::returning(candidates(3)));
        let state = state_with(source.clone());
        let (_, listing) = send(&state, "POST", "/listings", Some(backend_engineer())).await;

        for limit in ["0", "-3", "many"] {
            let uri = format!("/listings/{}/similar?limit={limit}", listing["id"]);
            let (status, body) = send(&state, "GET", &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "limit={limit}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_similar_upstream_failures_are_502() {
        for source in [StubSource::timing_out(), StubSource::failing_with(500)] {
            let state = state_with(Arc::new(source));
            let (_, listing) = send(&state, "POST", "/listings", Some(backend_engineer())).await;

            let uri = format!("/listings/{}/similar", listing["id"]);
            let (status, body) = send(&state, "GET", &uri, None).await;

            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
            assert!(body.get("remote_matches").is_none());
        }
    }
}
