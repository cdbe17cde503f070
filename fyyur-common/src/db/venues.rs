//! Venue database operations

use super::models::{CounterpartShow, EntityRef, NewVenue, Venue, VenueSummary};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    let genres: Json<Vec<String>> = row.try_get("genres")?;

    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website: row.try_get("website")?,
        genres: genres.0,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}

/// Insert a venue in its own transaction and return it with its new id
pub async fn create_venue(pool: &SqlitePool, venue: &NewVenue) -> Result<Venue> {
    let mut tx = pool.begin().await?;
    let id = insert_venue(&mut tx, venue).await?;
    tx.commit().await?;

    debug!(venue_id = id, "Venue inserted");
    Ok(venue.clone().with_id(id))
}

/// Insert on a caller-owned connection or transaction
pub(crate) async fn insert_venue(conn: &mut SqliteConnection, venue: &NewVenue) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, image_link, facebook_link,
            website, genres, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(Json(&venue.genres))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of an existing venue in one transaction
pub async fn update_venue(pool: &SqlitePool, id: i64, venue: &NewVenue) -> Result<Venue> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, website = ?, genres = ?,
            seeking_talent = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(Json(&venue.genres))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    // Dropping the transaction without commit rolls it back
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Venue {}", id)));
    }

    tx.commit().await?;

    debug!(venue_id = id, "Venue updated");
    Ok(venue.clone().with_id(id))
}

/// Load venue by id
pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, city, state, address, phone, image_link, facebook_link,
               website, genres, seeking_talent, seeking_description
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(venue_from_row).transpose()
}

/// All venues with their location, in store order
pub async fn list_venue_summaries(pool: &SqlitePool) -> Result<Vec<VenueSummary>> {
    let rows = sqlx::query("SELECT id, name, city, state FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| -> Result<VenueSummary> {
            Ok(VenueSummary {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
            })
        })
        .collect()
}

/// Id and name of every venue, in store order
pub async fn list_venue_refs(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| EntityRef { id, name })
        .collect())
}

/// Shows booked at a venue, joined to the performing artist
pub async fn venue_shows(pool: &SqlitePool, venue_id: i64) -> Result<Vec<CounterpartShow>> {
    let rows = sqlx::query(
        r#"
        SELECT a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<CounterpartShow> {
            Ok(CounterpartShow {
                counterpart_id: row.try_get("artist_id")?,
                counterpart_name: row.try_get("artist_name")?,
                counterpart_image_link: row.try_get("artist_image_link")?,
                start_time: row.try_get("start_time")?,
            })
        })
        .collect()
}

pub async fn count_venues(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
