use askama::Template;
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::error::AppError;
use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    static_hash: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Result<impl IntoResponse, AppError> {
    let template = IndexTemplate {
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
