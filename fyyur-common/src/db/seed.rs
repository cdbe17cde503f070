//! Demo records for a fresh database
//!
//! Three venues, three artists and five shows (two in the past, three far in
//! the future). Only loaded when all three tables are empty, and loaded in a
//! single transaction so a failed seed leaves the tables empty.

use super::artists::{count_artists, insert_artist};
use super::models::{NewArtist, NewShow, NewVenue};
use super::shows::{count_shows, insert_show};
use super::venues::{count_venues, insert_venue};
use crate::Result;
use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::info;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn demo_venues() -> Vec<NewVenue> {
    vec![
        NewVenue {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            genres: strings(&["Jazz", "Reggae", "Swing", "Classical", "Folk"]),
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .to_string(),
            ),
        },
        NewVenue {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            website: Some("https://www.theduelingpianos.com".to_string()),
            genres: strings(&["Classical", "R&B", "Hip-Hop"]),
            seeking_talent: false,
            seeking_description: None,
        },
        NewVenue {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            website: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            genres: strings(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn demo_artists() -> Vec<NewArtist> {
    vec![
        NewArtist {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            website: Some("https://www.gunsnpetalsband.com".to_string()),
            genres: strings(&["Rock n Roll"]),
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
            ),
        },
        NewArtist {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: Some("300-400-5000".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            website: None,
            genres: strings(&["Jazz"]),
            seeking_venue: false,
            seeking_description: None,
        },
        NewArtist {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("432-325-5432".to_string()),
            image_link: None,
            facebook_link: None,
            website: None,
            genres: strings(&["Jazz", "Classical"]),
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// Load the demo data if the database holds no venues, artists or shows
///
/// Returns true when records were inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool> {
    let existing = count_venues(pool).await? + count_artists(pool).await? + count_shows(pool).await?;
    if existing > 0 {
        info!("Database already has data; skipping demo seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut venue_ids = Vec::new();
    for venue in demo_venues() {
        venue_ids.push(insert_venue(&mut tx, &venue).await?);
    }

    let mut artist_ids = Vec::new();
    for artist in demo_artists() {
        artist_ids.push(insert_artist(&mut tx, &artist).await?);
    }

    // (venue index, artist index, start time)
    let bookings = [
        (0, 0, Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0)),
        (2, 1, Utc.with_ymd_and_hms(2019, 6, 15, 23, 0, 0)),
        (2, 2, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0)),
        (2, 2, Utc.with_ymd_and_hms(2035, 4, 8, 20, 0, 0)),
        (2, 2, Utc.with_ymd_and_hms(2035, 4, 15, 20, 0, 0)),
    ];

    let show_count = bookings.len();
    for (venue, artist, start_time) in bookings {
        let start_time = start_time
            .single()
            .ok_or_else(|| crate::Error::Internal("invalid demo show time".to_string()))?;
        insert_show(
            &mut tx,
            &NewShow {
                venue_id: venue_ids[venue],
                artist_id: artist_ids[artist],
                start_time,
            },
        )
        .await?;
    }

    tx.commit().await?;

    info!(
        venues = venue_ids.len(),
        artists = artist_ids.len(),
        shows = show_count,
        "Demo data loaded"
    );
    Ok(true)
}
