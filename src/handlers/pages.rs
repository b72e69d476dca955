use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../assets/index.html");
const STYLES_CSS: &str = include_str!("../assets/styles.css");

pub async fn index() -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/html;charset=UTF-8")],
        INDEX_HTML,
    )
        .into_response()
}

pub async fn styles() -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/css; charset=UTF-8")],
        STYLES_CSS,
    )
        .into_response()
}
