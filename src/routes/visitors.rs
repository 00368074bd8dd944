use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Form, Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::db;
use crate::error::{AppError, MISSING_FIELDS};
use crate::models::{NewVisitor, Visitor};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/visitors", get(list_visitors).post(create_visitor))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Media types are case-insensitive and may carry parameters.
fn is_form_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Create-request body, read as JSON or as a urlencoded form depending on the
/// request's content type. Unreadable bodies are rejected as validation errors.
pub struct VisitorPayload(pub NewVisitor);

impl<S> FromRequest<S> for VisitorPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_form_content_type);

        if is_form {
            // `Form` matches the header byte-for-byte.
            req.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(FORM_CONTENT_TYPE),
            );
            let Form(input) = Form::<NewVisitor>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            return Ok(Self(input));
        }

        let Json(input) = Json::<NewVisitor>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(input))
    }
}

async fn list_visitors(State(state): State<AppState>) -> Result<Json<Vec<Visitor>>, AppError> {
    let visitors = db::list_visitors(&state.db)
        .await
        .map_err(AppError::storage("Error fetching visitors"))?;

    tracing::info!("fetched {} visitors", visitors.len());
    Ok(Json(visitors))
}

async fn create_visitor(
    State(state): State<AppState>,
    VisitorPayload(input): VisitorPayload,
) -> Result<impl IntoResponse, AppError> {
    let (name, email) = input
        .validate()
        .ok_or_else(|| AppError::Validation(MISSING_FIELDS.to_string()))?;

    let visitor = Visitor::new(name, email);
    db::insert_visitor(&state.db, &visitor)
        .await
        .map_err(AppError::storage("Error adding visitor"))?;

    tracing::info!("added new visitor: {}", visitor.name);
    Ok((StatusCode::CREATED, Json(visitor)))
}
