//! Landing page

use axum::{response::Html, routing::get, Router};

use crate::pages::home::home_page;
use crate::AppState;

/// GET /
pub async fn index() -> Html<String> {
    Html(home_page(None))
}

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
