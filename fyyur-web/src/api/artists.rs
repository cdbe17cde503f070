//! Artist handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use fyyur_common::db::{artists, shows, Artist};
use fyyur_common::forms::{ArtistForm, FormErrors};
use fyyur_common::time;
use fyyur_common::views::{partition_shows, search_entities, upcoming_counts_by_artist};
use tracing::{error, info};

use super::{parse_id, SubmittedForm};
use crate::pages::artists::{artist_detail_page, artist_form_page, artists_page};
use crate::pages::home::home_page;
use crate::pages::search::{search_results_page, Directory};
use crate::pages::Flash;
use crate::{ApiError, ApiResult, AppState};

async fn load_artist(state: &AppState, artist_id: i64) -> ApiResult<Artist> {
    artists::get_artist(&state.db, artist_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {} not found", artist_id)))
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let refs = artists::list_artist_refs(&state.db).await?;
    Ok(Html(artists_page(&refs)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    SubmittedForm(data): SubmittedForm,
) -> ApiResult<Html<String>> {
    let now = time::now();
    let term = data
        .text("search_term")
        .unwrap_or_default();

    let refs = artists::list_artist_refs(&state.db).await?;
    let show_times = shows::list_show_times(&state.db).await?;
    let results = search_entities(refs, &term, &upcoming_counts_by_artist(&show_times, &now));

    info!(term = %term, count = results.count, "Artist search");
    Ok(Html(search_results_page(Directory::Artists, term.trim(), &results)))
}

/// GET /artists/:artist_id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Html<String>> {
    let artist_id = parse_id(&artist_id, "Artist")?;
    Ok(Html(render_detail(&state, artist_id, None).await?))
}

async fn render_detail(state: &AppState, artist_id: i64, flash: Option<&Flash>) -> ApiResult<String> {
    let now = time::now();
    let artist = load_artist(state, artist_id).await?;
    let history = partition_shows(artists::artist_shows(&state.db, artist_id).await?, &now);

    Ok(artist_detail_page(&artist, &history, flash))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(artist_form_page(
        None,
        &ArtistForm::default(),
        &FormErrors::default(),
        None,
    ))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    SubmittedForm(data): SubmittedForm,
) -> Response {
    let form = ArtistForm::from_data(&data);

    let new_artist = match form.bind() {
        Ok(artist) => artist,
        Err(errors) => {
            info!(errors = %errors, "Artist form rejected");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(artist_form_page(None, &form, &errors, None)),
            )
                .into_response();
        }
    };

    let flash = match artists::create_artist(&state.db, &new_artist).await {
        Ok(artist) => {
            info!(artist_id = artist.id, name = %artist.name, "Artist created");
            Flash::success(format!("Artist {} was successfully listed!", artist.name))
        }
        Err(e) => {
            error!(error = %e, name = %new_artist.name, "Failed to create artist");
            Flash::error(format!(
                "An error occurred. Artist {} could not be listed.",
                new_artist.name
            ))
        }
    };

    Html(home_page(Some(&flash))).into_response()
}

/// GET /artists/:artist_id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Html<String>> {
    let artist_id = parse_id(&artist_id, "Artist")?;
    let artist = load_artist(&state, artist_id).await?;

    Ok(Html(artist_form_page(
        Some(artist_id),
        &ArtistForm::from_artist(&artist),
        &FormErrors::default(),
        None,
    )))
}

/// POST /artists/:artist_id/edit
///
/// Fields missing from the submission keep their stored values.
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    SubmittedForm(data): SubmittedForm,
) -> ApiResult<Response> {
    let artist_id = parse_id(&artist_id, "Artist")?;
    let existing = load_artist(&state, artist_id).await?;

    let form = ArtistForm::from_data(&data);
    let changes = match form.bind_onto(&existing) {
        Ok(changes) => changes,
        Err(errors) => {
            info!(artist_id, errors = %errors, "Artist edit rejected");
            let shown = form.merged_over(ArtistForm::from_artist(&existing));
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(artist_form_page(Some(artist_id), &shown, &errors, None)),
            )
                .into_response());
        }
    };

    let flash = match artists::update_artist(&state.db, artist_id, &changes).await {
        Ok(artist) => {
            info!(artist_id, name = %artist.name, "Artist updated");
            Flash::success(format!("Artist {} was successfully updated!", artist.name))
        }
        Err(fyyur_common::Error::NotFound(msg)) => return Err(ApiError::NotFound(msg)),
        Err(e) => {
            error!(artist_id, error = %e, "Failed to update artist");
            Flash::error(format!(
                "An error occurred. Artist {} could not be updated.",
                existing.name
            ))
        }
    };

    Ok(Html(render_detail(&state, artist_id, Some(&flash)).await?).into_response())
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:artist_id", get(show_artist))
        .route(
            "/artists/:artist_id/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}
