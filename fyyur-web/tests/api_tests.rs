//! HTTP routing integration tests
//!
//! Drives the full router with `oneshot` against an in-memory database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use fyyur_common::db::{
    artists, init_in_memory, seed::seed_demo_data, shows, venues, NewArtist, NewShow, NewVenue,
};
use fyyur_web::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn test_pool() -> SqlitePool {
    init_in_memory().await.unwrap()
}

fn app(pool: &SqlitePool) -> Router {
    build_router(AppState::new(pool.clone()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn venue(name: &str, city: &str, state: &str) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1 Main Street".to_string(),
        genres: vec!["Jazz".to_string()],
        ..Default::default()
    }
}

fn artist(name: &str) -> NewArtist {
    NewArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: vec!["Jazz".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_landing_page_serves_html() {
    let pool = test_pool().await;

    let response = app(&pool)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let pool = test_pool().await;
    let (status, body) = get(app(&pool), "/no/such/page").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404 Not Found"));
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let pool = test_pool().await;

    for uri in ["/venues/999", "/artists/999", "/venues/abc", "/artists/999/edit"] {
        let (status, _) = get(app(&pool), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_health_reports_json() {
    let pool = test_pool().await;

    let response = app(&pool)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "fyyur-web");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn test_venue_search_is_case_insensitive() {
    let pool = test_pool().await;
    venues::create_venue(&pool, &venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    venues::create_venue(&pool, &venue("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();

    for term in ["hop", "HOP", "Musical", "usic"] {
        let (status, body) =
            post_form(app(&pool), "/venues/search", &format!("search_term={}", term)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("The Musical Hop"), "term {}", term);
        assert!(!body.contains("Dueling Pianos"), "term {}", term);
        assert!(body.contains(": 1</h3>"), "term {}", term);
    }
}

#[tokio::test]
async fn test_blank_artist_search_matches_all() {
    let pool = test_pool().await;
    artists::create_artist(&pool, &artist("Guns N Petals")).await.unwrap();
    artists::create_artist(&pool, &artist("Matt Quevedo")).await.unwrap();

    let (status, body) = post_form(app(&pool), "/artists/search", "search_term=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("Matt Quevedo"));
}

#[tokio::test]
async fn test_create_venue_then_detail_page() {
    let pool = test_pool().await;

    let (status, body) = post_form(
        app(&pool),
        "/venues/create",
        "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street\
         &phone=123-123-1234&genres=Jazz&genres=Reggae&facebook_link=https%3A%2F%2Fwww.facebook.com%2FTheMusicalHop\
         &seeking_talent=n&seeking_talent=y&seeking_description=Looking+for+a+band",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Venue The Musical Hop was successfully listed!"));
    assert_eq!(venues::count_venues(&pool).await.unwrap(), 1);

    let refs = venues::list_venue_refs(&pool).await.unwrap();
    let (status, body) = get(app(&pool), &format!("/venues/{}", refs[0].id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>The Musical Hop</h1>"));
    assert!(body.contains("Reggae"));
    assert!(body.contains("Currently seeking talent"));
}

#[tokio::test]
async fn test_invalid_venue_form_rerendered_with_422() {
    let pool = test_pool().await;

    let (status, body) = post_form(
        app(&pool),
        "/venues/create",
        "name=Somewhere&city=&state=ZZ&address=1+Road&genres=Jazz&website=not-a-url",
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains(r#"value="Somewhere""#), "submitted input preserved");
    assert!(body.contains("This field is required."));
    assert!(body.contains("Invalid URL."));
    assert_eq!(venues::count_venues(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_artist_edit_changes_name_only() {
    let pool = test_pool().await;
    let mut original = artist("Guns N Petals");
    original.phone = Some("326-123-5000".to_string());
    original.seeking_venue = true;
    original.seeking_description = Some("Bay Area gigs".to_string());
    let created = artists::create_artist(&pool, &original).await.unwrap();

    let (status, body) = post_form(
        app(&pool),
        &format!("/artists/{}/edit", created.id),
        "name=Guns+N+Roses+Petals",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Artist Guns N Roses Petals was successfully updated!"));

    let loaded = artists::get_artist(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Guns N Roses Petals");
    assert_eq!(loaded.city, created.city);
    assert_eq!(loaded.phone, created.phone);
    assert_eq!(loaded.genres, created.genres);
    assert!(loaded.seeking_venue);
    assert_eq!(loaded.seeking_description, created.seeking_description);
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let pool = test_pool().await;
    let created = venues::create_venue(&pool, &venue("Park Square", "San Francisco", "CA"))
        .await
        .unwrap();

    let (status, body) = get(app(&pool), &format!("/venues/{}/edit", created.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Park Square""#));
    assert!(body.contains(r#"<option value="CA" selected>CA</option>"#));
}

#[tokio::test]
async fn test_show_with_unknown_artist_rejected() {
    let pool = test_pool().await;
    let hop = venues::create_venue(&pool, &venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let (status, body) = post_form(
        app(&pool),
        "/shows/create",
        &format!("artist_id=999&venue_id={}&start_time=2035-04-01+20%3A00%3A00", hop.id),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Artist 999 does not exist"));
    assert_eq!(shows::count_shows(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_show_listed() {
    let pool = test_pool().await;
    let hop = venues::create_venue(&pool, &venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let band = artists::create_artist(&pool, &artist("The Wild Sax Band")).await.unwrap();

    let (status, body) = post_form(
        app(&pool),
        "/shows/create",
        &format!(
            "artist_id={}&venue_id={}&start_time=2035-04-01T20%3A00",
            band.id, hop.id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Show was successfully listed!"));

    let (status, body) = get(app(&pool), "/shows").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The Wild Sax Band"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Sun 04, 01, 2035 8:00PM"));
}

#[tokio::test]
async fn test_venue_listing_groups_by_location() {
    let pool = test_pool().await;
    venues::create_venue(&pool, &venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    venues::create_venue(&pool, &venue("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();
    venues::create_venue(&pool, &venue("Park Square", "San Francisco", "CA"))
        .await
        .unwrap();

    let (status, body) = get(app(&pool), "/venues").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body.matches("<h3>San Francisco, CA</h3>").count(), 1);
    assert_eq!(body.matches("<h3>New York, NY</h3>").count(), 1);

    let sf = body.find("San Francisco, CA").unwrap();
    let ny = body.find("New York, NY").unwrap();
    let park = body.find("Park Square").unwrap();
    assert!(sf < ny, "groups in order of first occurrence");
    assert!(park < ny, "Park Square listed under San Francisco");
}

#[tokio::test]
async fn test_detail_page_splits_past_and_upcoming() {
    let pool = test_pool().await;
    let hop = venues::create_venue(&pool, &venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let band = artists::create_artist(&pool, &artist("The Wild Sax Band")).await.unwrap();

    for offset in [-30, 30, 60] {
        shows::create_show(
            &pool,
            &NewShow {
                venue_id: hop.id,
                artist_id: band.id,
                start_time: Utc::now() + Duration::days(offset),
            },
        )
        .await
        .unwrap();
    }

    let (status, body) = get(app(&pool), &format!("/venues/{}", hop.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("2 Upcoming Shows"));
    assert!(body.contains("1 Past Show<"));

    let (_, body) = get(app(&pool), &format!("/artists/{}", band.id)).await;
    assert!(body.contains("2 Upcoming Shows"));
    assert!(body.contains(&format!(r#"href="/venues/{}""#, hop.id)));
}

#[tokio::test]
async fn test_seeded_demo_data_browsable() {
    let pool = test_pool().await;
    assert!(seed_demo_data(&pool).await.unwrap());

    let (status, body) = get(app(&pool), "/venues").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Park Square Live Music &amp; Coffee"));

    let (status, body) = get(app(&pool), "/shows").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Guns N Petals"));
}

#[tokio::test]
async fn test_clearing_every_genre_on_edit_is_rejected() {
    let pool = test_pool().await;
    let hop = venues::create_venue(&pool, &venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let (_, form) = get(app(&pool), &format!("/venues/{}/edit", hop.id)).await;
    assert!(form.contains(r#"<input type="hidden" name="genres" value="">"#));

    // What a browser sends for the rendered form with no genre selected
    let (status, body) = post_form(
        app(&pool),
        &format!("/venues/{}/edit", hop.id),
        "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1+Main+Street\
         &genres=&seeking_talent=n",
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Select at least one genre."));
    let stored = venues::get_venue(&pool, hop.id).await.unwrap().unwrap();
    assert_eq!(stored.genres, vec!["Jazz"]);
}

#[tokio::test]
async fn test_failed_venue_insert_acknowledged_with_error_notice() {
    let pool = test_pool().await;
    sqlx::query(
        "CREATE TRIGGER reject_venues BEFORE INSERT ON venues \
         BEGIN SELECT RAISE(ABORT, 'disk quota exceeded'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (status, body) = post_form(
        app(&pool),
        "/venues/create",
        "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street&genres=Jazz",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Venue The Musical Hop could not be listed."));
    assert!(!body.contains("disk quota exceeded"));
    assert!(!body.contains("successfully listed"));
    assert_eq!(venues::count_venues(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_artist_update_keeps_stored_record() {
    let pool = test_pool().await;
    let created = artists::create_artist(&pool, &artist("Guns N Petals")).await.unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_artist_updates BEFORE UPDATE ON artists \
         BEGIN SELECT RAISE(ABORT, 'disk quota exceeded'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (status, body) = post_form(
        app(&pool),
        &format!("/artists/{}/edit", created.id),
        "name=Guns+N+Roses",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Artist Guns N Petals could not be updated."));
    assert!(!body.contains("disk quota exceeded"));
    let stored = artists::get_artist(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_server_fault_renders_generic_500_page() {
    let pool = test_pool().await;
    sqlx::query("DROP TABLE shows").execute(&pool).await.unwrap();
    sqlx::query("DROP TABLE venues").execute(&pool).await.unwrap();

    let (status, body) = get(app(&pool), "/venues").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("500 Server Error"));
    assert!(!body.contains("no such table"));
}

#[tokio::test]
async fn test_malformed_submission_gets_html_400() {
    let pool = test_pool().await;

    let response = app(&pool)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/venues/create")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("name=The+Musical+Hop"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));
    let (_, body) = read(response).await;
    assert!(body.contains("400 Bad Request"));
    assert_eq!(venues::count_venues(&pool).await.unwrap(), 0);
}
