//! Show listing, show history sections and the show form

use fyyur_common::db::{EntityRef, ShowListing};
use fyyur_common::forms::{FormErrors, ShowForm};
use fyyur_common::time::{format_datetime, DateStyle};
use fyyur_common::views::{ShowEntry, ShowHistory};

use super::forms::{entity_select, form_errors, text_input};
use super::{attr, layout, text, Flash};

pub fn shows_page(shows: &[ShowListing]) -> String {
    let rows: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<li class="show">
    {image}
    <a href="/artists/{artist_id}">{artist_name}</a> playing at
    <a href="/venues/{venue_id}">{venue_name}</a>
    <time datetime="{machine}">{when}</time>
</li>"#,
                image = thumbnail(show.artist_image_link.as_deref(), &show.artist_name),
                artist_id = show.artist_id,
                artist_name = text(&show.artist_name),
                venue_id = show.venue_id,
                venue_name = text(&show.venue_name),
                machine = attr(&show.start_time.to_rfc3339()),
                when = text(&format_datetime(&show.start_time, DateStyle::Medium)),
            )
        })
        .collect();

    let body = if shows.is_empty() {
        "<h1>Shows</h1>\n<p>No shows listed yet.</p>".to_string()
    } else {
        format!("<h1>Shows</h1>\n<ul>{}</ul>", rows)
    };

    layout("Shows", None, &body)
}

/// Past and upcoming sections of a detail page; `counterpart_path` is where
/// each row links to (`/artists` on a venue page, `/venues` on an artist page)
pub fn history_section(history: &ShowHistory, counterpart_path: &str) -> String {
    format!(
        r#"<section class="shows">
    <h2>{upcoming_count} Upcoming {upcoming_noun}</h2>
    <ul>{upcoming}</ul>
    <h2>{past_count} Past {past_noun}</h2>
    <ul>{past}</ul>
</section>"#,
        upcoming_count = history.upcoming_count(),
        upcoming_noun = plural_shows(history.upcoming_count()),
        upcoming = entries(&history.upcoming, counterpart_path),
        past_count = history.past_count(),
        past_noun = plural_shows(history.past_count()),
        past = entries(&history.past, counterpart_path),
    )
}

fn plural_shows(count: usize) -> &'static str {
    if count == 1 {
        "Show"
    } else {
        "Shows"
    }
}

fn entries(entries: &[ShowEntry], counterpart_path: &str) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<li>{image}<a href="{path}/{id}">{name}</a> <time datetime="{machine}">{when}</time></li>"#,
                image = thumbnail(entry.counterpart_image_link.as_deref(), &entry.counterpart_name),
                path = counterpart_path,
                id = entry.counterpart_id,
                name = text(&entry.counterpart_name),
                machine = attr(&entry.start_time_formatted),
                when = text(&format_datetime(&entry.start_time, DateStyle::Full)),
            )
        })
        .collect()
}

fn thumbnail(image_link: Option<&str>, alt: &str) -> String {
    match image_link {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" width="48" height="48"> "#,
            attr(src),
            attr(alt)
        ),
        None => String::new(),
    }
}

pub fn show_form_page(
    form: &ShowForm,
    errors: &FormErrors,
    artists: &[EntityRef],
    venues: &[EntityRef],
    flash: Option<&Flash>,
) -> String {
    let body = format!(
        r#"<h1>List a new show</h1>
<form method="post" action="/shows/create">
    {form_errors}
    {artist}
    {venue}
    {start_time}
    <button class="button" type="submit">Create Show</button>
</form>"#,
        form_errors = form_errors(errors),
        artist = entity_select("Artist", "artist_id", artists, form.artist_id.as_deref(), errors),
        venue = entity_select("Venue", "venue_id", venues, form.venue_id.as_deref(), errors),
        start_time = text_input(
            "Start time (YYYY-MM-DD HH:MM:SS, UTC)",
            "start_time",
            form.start_time.as_deref(),
            "text",
            errors
        ),
    );

    layout("New Show", flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, hour: u32) -> ShowEntry {
        let start_time = Utc.with_ymd_and_hms(2019, 5, 21, hour, 30, 0).unwrap();
        ShowEntry {
            counterpart_id: 4,
            counterpart_name: name.to_string(),
            counterpart_image_link: None,
            start_time,
            start_time_formatted: fyyur_common::time::format_machine(&start_time),
        }
    }

    #[test]
    fn test_history_section_counts_and_links() {
        let history = ShowHistory {
            past: vec![entry("Guns N Petals", 21)],
            upcoming: Vec::new(),
        };

        let html = history_section(&history, "/artists");
        assert!(html.contains("0 Upcoming Shows"));
        assert!(html.contains("1 Past Show<"));
        assert!(html.contains(r#"<a href="/artists/4">Guns N Petals</a>"#));
        assert!(html.contains("Tuesday May, 21, 2019 at 9:30PM"));
        assert!(html.contains(r#"datetime="2019-05-21 21:30:00""#));
    }

    #[test]
    fn test_shows_page_uses_medium_format() {
        let listing = ShowListing {
            show_id: 1,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            artist_id: 4,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: Some("https://example.com/gnp.jpg".to_string()),
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
        };

        let page = shows_page(&[listing]);
        assert!(page.contains("Tue 05, 21, 2019 9:30PM"));
        assert!(page.contains(r#"src="https://example.com/gnp.jpg""#));
    }

    #[test]
    fn test_empty_shows_page() {
        assert!(shows_page(&[]).contains("No shows listed yet."));
    }
}
