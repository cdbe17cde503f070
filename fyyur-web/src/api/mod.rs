//! HTTP handlers for fyyur-web

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::Uri,
    Form,
};
use fyyur_common::forms::FormData;

use crate::{ApiError, ApiResult};

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No page at {}", uri.path()))
}

/// Urlencoded form body with repeated keys kept
///
/// A missing content type or an undecodable body is answered with the HTML
/// error page instead of axum's plain-text rejection.
pub struct SubmittedForm(pub FormData);

#[async_trait]
impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(FormData::from_pairs(pairs)))
    }
}

/// Path ids that are not integers name nothing, so they are a 404
pub(crate) fn parse_id(raw: &str, what: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("{} {} not found", what, raw)))
}
