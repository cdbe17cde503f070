//! Show handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use fyyur_common::db::{artists, shows, venues};
use fyyur_common::forms::{FormErrors, ShowForm};
use fyyur_common::{time, Error};
use tracing::{error, info};

use super::SubmittedForm;
use crate::pages::home::home_page;
use crate::pages::shows::{show_form_page, shows_page};
use crate::pages::Flash;
use crate::{ApiResult, AppState};

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let listings = shows::list_show_listings(&state.db).await?;
    Ok(Html(shows_page(&listings)))
}

/// Show form with the artist and venue choices loaded from the store
async fn render_form(state: &AppState, form: &ShowForm, errors: &FormErrors) -> ApiResult<String> {
    let artist_refs = artists::list_artist_refs(&state.db).await?;
    let venue_refs = venues::list_venue_refs(&state.db).await?;
    Ok(show_form_page(form, errors, &artist_refs, &venue_refs, None))
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let form = ShowForm::with_default_start(&time::now());
    Ok(Html(render_form(&state, &form, &FormErrors::default()).await?))
}

/// POST /shows/create
///
/// An unknown venue or artist id is a validation failure, reported on the
/// form like any other.
pub async fn create_show_submission(
    State(state): State<AppState>,
    SubmittedForm(data): SubmittedForm,
) -> ApiResult<Response> {
    let form = ShowForm::from_data(&data);

    let new_show = match form.bind() {
        Ok(show) => show,
        Err(errors) => {
            info!(errors = %errors, "Show form rejected");
            let page = render_form(&state, &form, &errors).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };

    let flash = match shows::create_show(&state.db, &new_show).await {
        Ok(show) => {
            info!(
                show_id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                "Show created"
            );
            Flash::success("Show was successfully listed!")
        }
        Err(Error::InvalidInput(message)) => {
            info!(reason = %message, "Show booking rejected");
            let errors = FormErrors::form_level(message);
            let page = render_form(&state, &form, &errors).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
        Err(e) => {
            error!(error = %e, "Failed to create show");
            Flash::error("An error occurred. Show could not be listed.")
        }
    };

    Ok(Html(home_page(Some(&flash))).into_response())
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
}
