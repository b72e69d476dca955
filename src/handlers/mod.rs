pub mod contact;
pub mod pages;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get, post},
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::service::ContactService;

/// Anything not matched below is answered with the portfolio page.
pub fn router(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/", any(pages::index))
        .route("/styles.css", get(pages::styles).fallback(pages::index))
        .route(
            "/contact",
            post(contact::submit_contact)
                .fallback(pages::index)
                .layer(DefaultBodyLimit::disable()),
        )
        .fallback(pages::index)
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
