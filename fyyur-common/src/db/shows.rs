//! Show database operations
//!
//! Shows are insert-only. Both foreign keys are checked inside the insert
//! transaction so a dangling id is reported as invalid input rather than as
//! a constraint failure.

use super::models::{NewShow, Show, ShowListing, ShowTime};
use crate::{Error, Result};
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

/// Insert a show after verifying its venue and artist exist
pub async fn create_show(pool: &SqlitePool, show: &NewShow) -> Result<Show> {
    let mut tx = pool.begin().await?;
    let created = insert_show(&mut tx, show).await?;
    tx.commit().await?;

    debug!(
        show_id = created.id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "Show inserted"
    );
    Ok(created)
}

pub(crate) async fn insert_show(conn: &mut SqliteConnection, show: &NewShow) -> Result<Show> {
    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(show.venue_id)
        .fetch_one(&mut *conn)
        .await?;
    if !venue_exists {
        return Err(Error::InvalidInput(format!(
            "Venue {} does not exist",
            show.venue_id
        )));
    }

    let artist_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
            .bind(show.artist_id)
            .fetch_one(&mut *conn)
            .await?;
    if !artist_exists {
        return Err(Error::InvalidInput(format!(
            "Artist {} does not exist",
            show.artist_id
        )));
    }

    let result = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .execute(&mut *conn)
        .await?;

    Ok(Show {
        id: result.last_insert_rowid(),
        venue_id: show.venue_id,
        artist_id: show.artist_id,
        start_time: show.start_time,
    })
}

/// Every show joined to its venue and artist, earliest first
pub async fn list_show_listings(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id AS show_id, s.start_time,
               v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ShowListing> {
            Ok(ShowListing {
                show_id: row.try_get("show_id")?,
                venue_id: row.try_get("venue_id")?,
                venue_name: row.try_get("venue_name")?,
                artist_id: row.try_get("artist_id")?,
                artist_name: row.try_get("artist_name")?,
                artist_image_link: row.try_get("artist_image_link")?,
                start_time: row.try_get("start_time")?,
            })
        })
        .collect()
}

/// Foreign keys and start time of every show
pub async fn list_show_times(pool: &SqlitePool) -> Result<Vec<ShowTime>> {
    let rows = sqlx::query("SELECT venue_id, artist_id, start_time FROM shows ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| -> Result<ShowTime> {
            Ok(ShowTime {
                venue_id: row.try_get("venue_id")?,
                artist_id: row.try_get("artist_id")?,
                start_time: row.try_get("start_time")?,
            })
        })
        .collect()
}

pub async fn count_shows(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
