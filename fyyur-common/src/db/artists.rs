//! Artist database operations

use super::models::{Artist, CounterpartShow, EntityRef, NewArtist};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let genres: Json<Vec<String>> = row.try_get("genres")?;

    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website: row.try_get("website")?,
        genres: genres.0,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}

/// Insert an artist in its own transaction and return it with its new id
pub async fn create_artist(pool: &SqlitePool, artist: &NewArtist) -> Result<Artist> {
    let mut tx = pool.begin().await?;
    let id = insert_artist(&mut tx, artist).await?;
    tx.commit().await?;

    debug!(artist_id = id, "Artist inserted");
    Ok(artist.clone().with_id(id))
}

pub(crate) async fn insert_artist(conn: &mut SqliteConnection, artist: &NewArtist) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, image_link, facebook_link, website,
            genres, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(Json(&artist.genres))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of an existing artist in one transaction
pub async fn update_artist(pool: &SqlitePool, id: i64, artist: &NewArtist) -> Result<Artist> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, genres = ?, seeking_venue = ?,
            seeking_description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(Json(&artist.genres))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Artist {}", id)));
    }

    tx.commit().await?;

    debug!(artist_id = id, "Artist updated");
    Ok(artist.clone().with_id(id))
}

/// Load artist by id
pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, city, state, phone, image_link, facebook_link, website,
               genres, seeking_venue, seeking_description
        FROM artists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(artist_from_row).transpose()
}

/// Id and name of every artist, in store order
pub async fn list_artist_refs(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| EntityRef { id, name })
        .collect())
}

/// Shows an artist is booked into, joined to the hosting venue
pub async fn artist_shows(pool: &SqlitePool, artist_id: i64) -> Result<Vec<CounterpartShow>> {
    let rows = sqlx::query(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<CounterpartShow> {
            Ok(CounterpartShow {
                counterpart_id: row.try_get("venue_id")?,
                counterpart_name: row.try_get("venue_name")?,
                counterpart_image_link: row.try_get("venue_image_link")?,
                start_time: row.try_get("start_time")?,
            })
        })
        .collect()
}

pub async fn count_artists(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
