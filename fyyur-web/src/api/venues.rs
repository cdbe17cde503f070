//! Venue handlers
//!
//! Listing, search, detail, create and edit. Validation failures re-render the
//! form with status 422; persistence failures are logged and acknowledged
//! with an error notice.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use fyyur_common::db::{shows, venues};
use fyyur_common::forms::{FormErrors, VenueForm};
use fyyur_common::time;
use fyyur_common::views::{
    group_by_location, partition_shows, search_entities, upcoming_counts_by_venue,
};
use tracing::{error, info};

use super::{parse_id, SubmittedForm};
use crate::pages::home::home_page;
use crate::pages::search::{search_results_page, Directory};
use crate::pages::venues::{venue_detail_page, venue_form_page, venues_page};
use crate::pages::Flash;
use crate::{ApiError, ApiResult, AppState};

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let now = time::now();
    let summaries = venues::list_venue_summaries(&state.db).await?;
    let show_times = shows::list_show_times(&state.db).await?;

    let upcoming = upcoming_counts_by_venue(&show_times, &now);
    let groups = group_by_location(summaries, &upcoming);

    Ok(Html(venues_page(&groups)))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    SubmittedForm(data): SubmittedForm,
) -> ApiResult<Html<String>> {
    let now = time::now();
    let term = data
        .text("search_term")
        .unwrap_or_default();

    let refs = venues::list_venue_refs(&state.db).await?;
    let show_times = shows::list_show_times(&state.db).await?;
    let results = search_entities(refs, &term, &upcoming_counts_by_venue(&show_times, &now));

    info!(term = %term, count = results.count, "Venue search");
    Ok(Html(search_results_page(Directory::Venues, term.trim(), &results)))
}

/// GET /venues/:venue_id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> ApiResult<Html<String>> {
    let venue_id = parse_id(&venue_id, "Venue")?;
    Ok(Html(render_detail(&state, venue_id, None).await?))
}

/// Detail page for a stored venue, with an optional notice on top
async fn render_detail(state: &AppState, venue_id: i64, flash: Option<&Flash>) -> ApiResult<String> {
    let now = time::now();
    let venue = venues::get_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", venue_id)))?;
    let history = partition_shows(venues::venue_shows(&state.db, venue_id).await?, &now);

    Ok(venue_detail_page(&venue, &history, flash))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(venue_form_page(
        None,
        &VenueForm::default(),
        &FormErrors::default(),
        None,
    ))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    SubmittedForm(data): SubmittedForm,
) -> Response {
    let form = VenueForm::from_data(&data);

    let new_venue = match form.bind() {
        Ok(venue) => venue,
        Err(errors) => {
            info!(errors = %errors, "Venue form rejected");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(venue_form_page(None, &form, &errors, None)),
            )
                .into_response();
        }
    };

    let flash = match venues::create_venue(&state.db, &new_venue).await {
        Ok(venue) => {
            info!(venue_id = venue.id, name = %venue.name, "Venue created");
            Flash::success(format!("Venue {} was successfully listed!", venue.name))
        }
        Err(e) => {
            error!(error = %e, name = %new_venue.name, "Failed to create venue");
            Flash::error(format!(
                "An error occurred. Venue {} could not be listed.",
                new_venue.name
            ))
        }
    };

    Html(home_page(Some(&flash))).into_response()
}

/// GET /venues/:venue_id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> ApiResult<Html<String>> {
    let venue_id = parse_id(&venue_id, "Venue")?;
    let venue = venues::get_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", venue_id)))?;

    Ok(Html(venue_form_page(
        Some(venue_id),
        &VenueForm::from_venue(&venue),
        &FormErrors::default(),
        None,
    )))
}

/// POST /venues/:venue_id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
    SubmittedForm(data): SubmittedForm,
) -> ApiResult<Response> {
    let venue_id = parse_id(&venue_id, "Venue")?;
    let existing = venues::get_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", venue_id)))?;

    let form = VenueForm::from_data(&data);
    let changes = match form.bind_onto(&existing) {
        Ok(changes) => changes,
        Err(errors) => {
            info!(venue_id, errors = %errors, "Venue edit rejected");
            let shown = form.merged_over(VenueForm::from_venue(&existing));
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(venue_form_page(Some(venue_id), &shown, &errors, None)),
            )
                .into_response());
        }
    };

    let flash = match venues::update_venue(&state.db, venue_id, &changes).await {
        Ok(venue) => {
            info!(venue_id, name = %venue.name, "Venue updated");
            Flash::success(format!("Venue {} was successfully updated!", venue.name))
        }
        Err(fyyur_common::Error::NotFound(msg)) => return Err(ApiError::NotFound(msg)),
        Err(e) => {
            error!(venue_id, error = %e, "Failed to update venue");
            Flash::error(format!(
                "An error occurred. Venue {} could not be updated.",
                existing.name
            ))
        }
    };

    Ok(Html(render_detail(&state, venue_id, Some(&flash)).await?).into_response())
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:venue_id", get(show_venue))
        .route(
            "/venues/:venue_id/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}
