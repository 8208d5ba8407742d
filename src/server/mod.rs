//! HTTP exposure
//!
//! One route: the GraphQL endpoint. Transport concerns stop here: the
//! handler decodes the request body, hands it to the executor, and encodes
//! the response. Execution outcomes are always `200 OK`; failures travel in
//! the response's `errors` array.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::graphql::{Executor, GraphqlRequest, GraphqlResponse};

/// Build the application router.
pub fn router(executor: Arc<Executor>, graphql_path: &str) -> Router {
    Router::new()
        .route(graphql_path, post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(executor)
}

async fn graphql_handler(
    State(executor): State<Arc<Executor>>,
    Json(request): Json<GraphqlRequest>,
) -> Json<GraphqlResponse> {
    Json(executor.execute(&request).await)
}
