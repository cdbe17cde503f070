//! Form binding and validation
//!
//! Submitted urlencoded pairs are collected into [`FormData`], read into a
//! per-entity form struct of raw strings, and bound into a `New*` record.
//! Binding either yields a fully validated record or a [`FormErrors`] with
//! every problem found; nothing is persisted on failure.
//!
//! Edit submissions are bound over the stored record, so a key missing from
//! the request keeps the stored value. Checkboxes are rendered with a hidden
//! `n` input ahead of the box; the last submitted value wins. The genre
//! select carries a hidden blank `genres` value, which is dropped here, so an
//! empty selection arrives as a present but empty list.

use crate::db::models::{Artist, NewArtist, NewShow, NewVenue, Venue};
use crate::time::{format_machine, parse_start_time};
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::HashMap;
use std::fmt;

/// US state codes accepted by the `state` field
pub const STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genres accepted by the `genres` field
pub const GENRES: [&str; 20] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

const MAX_NAME_LEN: usize = 200;
const MAX_FIELD_LEN: usize = 120;
const MAX_LINK_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 500;

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: Vec<(String, String)>,
}

impl FormErrors {
    /// Key for problems that belong to the whole form rather than one field
    pub const FORM: &'static str = "form";

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_string(), message.into()));
    }

    /// Single form-level error
    pub fn form_level(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(Self::FORM, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| f == field)
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Raw submitted fields; repeated keys keep every value in order
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: HashMap<String, Vec<String>>,
}

impl FormData {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_default().push(value);
        }
        Self { values }
    }

    /// Last value submitted under `key`
    pub fn text(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|v| v.last()).cloned()
    }

    /// Every value submitted under `key`
    pub fn all(&self, key: &str) -> Option<Vec<String>> {
        self.values.get(key).cloned()
    }
}

// ============================================================================
// Field helpers
// ============================================================================

fn required(errors: &mut FormErrors, field: &str, value: &Option<String>, max: usize) -> String {
    let value = value.as_deref().map(str::trim).unwrap_or("");
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > max {
        errors.add(field, format!("Must be at most {} characters.", max));
    }
    value.to_string()
}

fn optional(errors: &mut FormErrors, field: &str, value: &Option<String>, max: usize) -> Option<String> {
    let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    if value.chars().count() > max {
        errors.add(field, format!("Must be at most {} characters.", max));
    }
    Some(value.to_string())
}

fn state_code(errors: &mut FormErrors, value: &Option<String>) -> String {
    let state = required(errors, "state", value, MAX_FIELD_LEN);
    if !state.is_empty() && !STATES.contains(&state.as_str()) {
        errors.add("state", "Not a valid choice.");
    }
    state
}

fn genre_list(errors: &mut FormErrors, value: &Option<Vec<String>>) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in value.iter().flatten().map(|g| g.trim()).filter(|g| !g.is_empty()) {
        if !GENRES.contains(&genre) {
            errors.add("genres", format!("'{}' is not a valid choice.", genre));
        } else if !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    if genres.is_empty() && !errors.has("genres") {
        errors.add("genres", "Select at least one genre.");
    }
    genres
}

fn link(errors: &mut FormErrors, field: &str, value: &Option<String>) -> Option<String> {
    let value = optional(errors, field, value, MAX_LINK_LEN)?;
    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => {}
        _ => errors.add(field, "Invalid URL."),
    }
    Some(value)
}

fn phone(errors: &mut FormErrors, value: &Option<String>) -> Option<String> {
    let value = optional(errors, "phone", value, MAX_FIELD_LEN)?;
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')' | '+'));
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !allowed || !(7..=15).contains(&digits) {
        errors.add("phone", "Invalid phone number.");
    }
    Some(value)
}

fn checkbox(errors: &mut FormErrors, field: &str, value: &Option<String>) -> bool {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) => match v.as_str() {
            "y" | "yes" | "on" | "true" | "1" => true,
            "" | "n" | "no" | "off" | "false" | "0" => false,
            _ => {
                errors.add(field, "Not a valid choice.");
                false
            }
        },
    }
}

fn checkbox_value(flag: bool) -> Option<String> {
    Some(if flag { "y" } else { "n" }.to_string())
}

// ============================================================================
// Venue
// ============================================================================

/// Raw venue form fields; `None` means the key was not submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            facebook_link: data.text("facebook_link"),
            website: data.text("website"),
            genres: data.all("genres"),
            seeking_talent: data.text("seeking_talent"),
            seeking_description: data.text("seeking_description"),
        }
    }

    /// Form pre-populated from a stored venue
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: Some(venue.name.clone()),
            city: Some(venue.city.clone()),
            state: Some(venue.state.clone()),
            address: Some(venue.address.clone()),
            phone: Some(venue.phone.clone().unwrap_or_default()),
            image_link: Some(venue.image_link.clone().unwrap_or_default()),
            facebook_link: Some(venue.facebook_link.clone().unwrap_or_default()),
            website: Some(venue.website.clone().unwrap_or_default()),
            genres: Some(venue.genres.clone()),
            seeking_talent: checkbox_value(venue.seeking_talent),
            seeking_description: Some(venue.seeking_description.clone().unwrap_or_default()),
        }
    }

    /// Submitted fields over `base`; keys absent from the submission keep `base`
    pub fn merged_over(self, base: VenueForm) -> Self {
        Self {
            name: self.name.or(base.name),
            city: self.city.or(base.city),
            state: self.state.or(base.state),
            address: self.address.or(base.address),
            phone: self.phone.or(base.phone),
            image_link: self.image_link.or(base.image_link),
            facebook_link: self.facebook_link.or(base.facebook_link),
            website: self.website.or(base.website),
            genres: self.genres.or(base.genres),
            seeking_talent: self.seeking_talent.or(base.seeking_talent),
            seeking_description: self.seeking_description.or(base.seeking_description),
        }
    }

    pub fn is_seeking(&self) -> bool {
        checkbox(&mut FormErrors::default(), "seeking_talent", &self.seeking_talent)
    }

    /// Validate for a new venue
    pub fn bind(&self) -> Result<NewVenue, FormErrors> {
        let mut errors = FormErrors::default();

        let venue = NewVenue {
            name: required(&mut errors, "name", &self.name, MAX_NAME_LEN),
            city: required(&mut errors, "city", &self.city, MAX_FIELD_LEN),
            state: state_code(&mut errors, &self.state),
            address: required(&mut errors, "address", &self.address, MAX_FIELD_LEN),
            phone: phone(&mut errors, &self.phone),
            image_link: link(&mut errors, "image_link", &self.image_link),
            facebook_link: link(&mut errors, "facebook_link", &self.facebook_link),
            website: link(&mut errors, "website", &self.website),
            genres: genre_list(&mut errors, &self.genres),
            seeking_talent: checkbox(&mut errors, "seeking_talent", &self.seeking_talent),
            seeking_description: optional(
                &mut errors,
                "seeking_description",
                &self.seeking_description,
                MAX_DESCRIPTION_LEN,
            ),
        };

        if errors.is_empty() {
            Ok(venue)
        } else {
            Err(errors)
        }
    }

    /// Validate an edit of `existing`
    pub fn bind_onto(&self, existing: &Venue) -> Result<NewVenue, FormErrors> {
        self.clone()
            .merged_over(VenueForm::from_venue(existing))
            .bind()
    }
}

// ============================================================================
// Artist
// ============================================================================

/// Raw artist form fields; `None` means the key was not submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            facebook_link: data.text("facebook_link"),
            website: data.text("website"),
            genres: data.all("genres"),
            seeking_venue: data.text("seeking_venue"),
            seeking_description: data.text("seeking_description"),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: Some(artist.name.clone()),
            city: Some(artist.city.clone()),
            state: Some(artist.state.clone()),
            phone: Some(artist.phone.clone().unwrap_or_default()),
            image_link: Some(artist.image_link.clone().unwrap_or_default()),
            facebook_link: Some(artist.facebook_link.clone().unwrap_or_default()),
            website: Some(artist.website.clone().unwrap_or_default()),
            genres: Some(artist.genres.clone()),
            seeking_venue: checkbox_value(artist.seeking_venue),
            seeking_description: Some(artist.seeking_description.clone().unwrap_or_default()),
        }
    }

    pub fn merged_over(self, base: ArtistForm) -> Self {
        Self {
            name: self.name.or(base.name),
            city: self.city.or(base.city),
            state: self.state.or(base.state),
            phone: self.phone.or(base.phone),
            image_link: self.image_link.or(base.image_link),
            facebook_link: self.facebook_link.or(base.facebook_link),
            website: self.website.or(base.website),
            genres: self.genres.or(base.genres),
            seeking_venue: self.seeking_venue.or(base.seeking_venue),
            seeking_description: self.seeking_description.or(base.seeking_description),
        }
    }

    pub fn is_seeking(&self) -> bool {
        checkbox(&mut FormErrors::default(), "seeking_venue", &self.seeking_venue)
    }

    pub fn bind(&self) -> Result<NewArtist, FormErrors> {
        let mut errors = FormErrors::default();

        let artist = NewArtist {
            name: required(&mut errors, "name", &self.name, MAX_NAME_LEN),
            city: required(&mut errors, "city", &self.city, MAX_FIELD_LEN),
            state: state_code(&mut errors, &self.state),
            phone: phone(&mut errors, &self.phone),
            image_link: link(&mut errors, "image_link", &self.image_link),
            facebook_link: link(&mut errors, "facebook_link", &self.facebook_link),
            website: link(&mut errors, "website", &self.website),
            genres: genre_list(&mut errors, &self.genres),
            seeking_venue: checkbox(&mut errors, "seeking_venue", &self.seeking_venue),
            seeking_description: optional(
                &mut errors,
                "seeking_description",
                &self.seeking_description,
                MAX_DESCRIPTION_LEN,
            ),
        };

        if errors.is_empty() {
            Ok(artist)
        } else {
            Err(errors)
        }
    }

    pub fn bind_onto(&self, existing: &Artist) -> Result<NewArtist, FormErrors> {
        self.clone()
            .merged_over(ArtistForm::from_artist(existing))
            .bind()
    }
}

// ============================================================================
// Show
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

impl ShowForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            artist_id: data.text("artist_id"),
            venue_id: data.text("venue_id"),
            start_time: data.text("start_time"),
        }
    }

    /// Blank form with the start time defaulted to `now`
    pub fn with_default_start(now: &DateTime<Utc>) -> Self {
        Self {
            start_time: Some(format_machine(now)),
            ..Default::default()
        }
    }

    /// Validate ids and start time; existence of the ids is checked at insert
    pub fn bind(&self) -> Result<NewShow, FormErrors> {
        let mut errors = FormErrors::default();

        let artist_id = id_field(&mut errors, "artist_id", &self.artist_id);
        let venue_id = id_field(&mut errors, "venue_id", &self.venue_id);

        let start_time = match self.start_time.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("start_time", "This field is required.");
                None
            }
            Some(raw) => {
                let parsed = parse_start_time(raw);
                if parsed.is_none() {
                    errors.add("start_time", "Not a valid datetime value.");
                }
                parsed
            }
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => Ok(NewShow {
                venue_id,
                artist_id,
                start_time: start_time.trunc_subsecs(0),
            }),
            _ => Err(errors),
        }
    }
}

fn id_field(errors: &mut FormErrors, field: &str, value: &Option<String>) -> Option<i64> {
    let raw = value.as_deref().map(str::trim).unwrap_or("");
    if raw.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Must be a positive whole number.");
            None
        }
    }
}
