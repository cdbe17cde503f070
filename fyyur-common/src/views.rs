//! Read-side view models
//!
//! Pure functions over rows already loaded from the database:
//! - venues grouped by (city, state)
//! - shows partitioned into past and upcoming against one sampled "now"
//! - case-insensitive substring search over names
//!
//! None of these touch the database, so handlers load rows, sample the clock
//! once, and hand both in.

use crate::db::models::{CounterpartShow, EntityRef, ShowTime, VenueSummary};
use crate::time::format_machine;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A show is past when it started strictly before `now`
pub fn is_past(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    start_time < now
}

// ============================================================================
// Location grouping
// ============================================================================

/// Venue entry inside a location group
#[derive(Debug, Clone, PartialEq)]
pub struct VenueListing {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues sharing one exact (city, state) pair
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueListing>,
}

/// Group venues by exact (city, state)
///
/// Groups appear in order of first occurrence and venues keep their input
/// order inside each group, so the output is stable for a given store order.
pub fn group_by_location(
    venues: Vec<VenueSummary>,
    upcoming: &HashMap<i64, usize>,
) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.clone(), venue.state.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(LocationGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            groups.len() - 1
        });

        groups[slot].venues.push(VenueListing {
            id: venue.id,
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        });
    }

    groups
}

/// Number of upcoming shows per venue id
pub fn upcoming_counts_by_venue(times: &[ShowTime], now: &DateTime<Utc>) -> HashMap<i64, usize> {
    count_upcoming(times, now, |t| t.venue_id)
}

/// Number of upcoming shows per artist id
pub fn upcoming_counts_by_artist(times: &[ShowTime], now: &DateTime<Utc>) -> HashMap<i64, usize> {
    count_upcoming(times, now, |t| t.artist_id)
}

fn count_upcoming(
    times: &[ShowTime],
    now: &DateTime<Utc>,
    key: impl Fn(&ShowTime) -> i64,
) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for time in times.iter().filter(|t| !is_past(&t.start_time, now)) {
        *counts.entry(key(time)).or_insert(0) += 1;
    }
    counts
}

// ============================================================================
// Show history
// ============================================================================

/// One row of a venue's or artist's show history
#[derive(Debug, Clone, PartialEq)]
pub struct ShowEntry {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_time_formatted: String,
}

impl From<CounterpartShow> for ShowEntry {
    fn from(show: CounterpartShow) -> Self {
        Self {
            start_time_formatted: format_machine(&show.start_time),
            counterpart_id: show.counterpart_id,
            counterpart_name: show.counterpart_name,
            counterpart_image_link: show.counterpart_image_link,
            start_time: show.start_time,
        }
    }
}

/// Past and upcoming shows of one venue or artist
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShowHistory {
    pub past: Vec<ShowEntry>,
    pub upcoming: Vec<ShowEntry>,
}

impl ShowHistory {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Split shows into past and upcoming, keeping input order in each
pub fn partition_shows(shows: Vec<CounterpartShow>, now: &DateTime<Utc>) -> ShowHistory {
    let (past, upcoming): (Vec<_>, Vec<_>) = shows
        .into_iter()
        .partition(|show| is_past(&show.start_time, now));

    ShowHistory {
        past: past.into_iter().map(ShowEntry::from).collect(),
        upcoming: upcoming.into_iter().map(ShowEntry::from).collect(),
    }
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

/// Case-insensitive substring match; a blank term matches everything
pub fn name_matches(name: &str, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

/// Filter entities by name, keeping input order
pub fn search_entities(
    entities: Vec<EntityRef>,
    term: &str,
    upcoming: &HashMap<i64, usize>,
) -> SearchResults {
    let data: Vec<SearchHit> = entities
        .into_iter()
        .filter(|entity| name_matches(&entity.name, term))
        .map(|entity| SearchHit {
            num_upcoming_shows: upcoming.get(&entity.id).copied().unwrap_or(0),
            id: entity.id,
            name: entity.name,
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn summary(id: i64, name: &str, city: &str, state: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    fn show(id: i64, start_time: DateTime<Utc>) -> CounterpartShow {
        CounterpartShow {
            counterpart_id: id,
            counterpart_name: format!("Artist {}", id),
            counterpart_image_link: None,
            start_time,
        }
    }

    fn refs(names: &[&str]) -> Vec<EntityRef> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| EntityRef {
                id: i as i64 + 1,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_group_by_location_exhaustive_and_exact() {
        let venues = vec![
            summary(1, "The Musical Hop", "San Francisco", "CA"),
            summary(2, "The Dueling Pianos Bar", "New York", "NY"),
            summary(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            summary(4, "Lowercase City", "san francisco", "CA"),
        ];
        let groups = group_by_location(venues.clone(), &HashMap::new());

        assert_eq!(groups.len(), 3);
        assert_eq!((groups[0].city.as_str(), groups[0].state.as_str()), ("San Francisco", "CA"));
        assert_eq!(
            groups[0].venues.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(groups[1].city, "New York");
        assert_eq!(groups[2].city, "san francisco");

        // Every venue lands in exactly one group whose key is its own location
        for venue in &venues {
            let holders: Vec<&LocationGroup> = groups
                .iter()
                .filter(|g| g.venues.iter().any(|v| v.id == venue.id))
                .collect();
            assert_eq!(holders.len(), 1);
            assert_eq!(holders[0].city, venue.city);
            assert_eq!(holders[0].state, venue.state);
        }
    }

    #[test]
    fn test_group_same_city_different_state_split() {
        let groups = group_by_location(
            vec![
                summary(1, "A", "Portland", "OR"),
                summary(2, "B", "Portland", "ME"),
            ],
            &HashMap::new(),
        );
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_by_location(Vec::new(), &HashMap::new()).is_empty());
    }

    #[test]
    fn test_group_carries_upcoming_counts() {
        let counts = HashMap::from([(1, 3)]);
        let groups = group_by_location(vec![summary(1, "A", "X", "CA"), summary(2, "B", "X", "CA")], &counts);
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 3);
        assert_eq!(groups[0].venues[1].num_upcoming_shows, 0);
    }

    #[test]
    fn test_partition_by_strict_comparison() {
        let now = now();
        let shows = vec![
            show(1, now - Duration::days(30)),
            show(2, now - Duration::seconds(1)),
            show(3, now),
            show(4, now + Duration::days(7)),
        ];

        let history = partition_shows(shows, &now);

        let past: Vec<i64> = history.past.iter().map(|s| s.counterpart_id).collect();
        let upcoming: Vec<i64> = history.upcoming.iter().map(|s| s.counterpart_id).collect();
        assert_eq!(past, vec![1, 2]);
        assert_eq!(upcoming, vec![3, 4], "a show starting exactly now is upcoming");
        assert_eq!(history.past_count(), 2);
        assert_eq!(history.upcoming_count(), 2);
    }

    #[test]
    fn test_partition_entry_fields() {
        let start = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        let history = partition_shows(
            vec![CounterpartShow {
                counterpart_id: 4,
                counterpart_name: "Guns N Petals".to_string(),
                counterpart_image_link: Some("https://example.com/gnp.jpg".to_string()),
                start_time: start,
            }],
            &now(),
        );

        assert!(history.upcoming.is_empty());
        let entry = &history.past[0];
        assert_eq!(entry.counterpart_id, 4);
        assert_eq!(entry.counterpart_name, "Guns N Petals");
        assert_eq!(entry.counterpart_image_link.as_deref(), Some("https://example.com/gnp.jpg"));
        assert_eq!(entry.start_time_formatted, "2019-05-21 21:30:00");
    }

    #[test]
    fn test_partition_empty() {
        let history = partition_shows(Vec::new(), &now());
        assert_eq!(history.past_count(), 0);
        assert_eq!(history.upcoming_count(), 0);
    }

    #[test]
    fn test_upcoming_counts() {
        let now = now();
        let times = vec![
            ShowTime { venue_id: 1, artist_id: 10, start_time: now - Duration::days(1) },
            ShowTime { venue_id: 1, artist_id: 10, start_time: now + Duration::days(1) },
            ShowTime { venue_id: 1, artist_id: 11, start_time: now },
            ShowTime { venue_id: 2, artist_id: 11, start_time: now + Duration::days(2) },
        ];

        let by_venue = upcoming_counts_by_venue(&times, &now);
        assert_eq!(by_venue.get(&1), Some(&2));
        assert_eq!(by_venue.get(&2), Some(&1));

        let by_artist = upcoming_counts_by_artist(&times, &now);
        assert_eq!(by_artist.get(&10), Some(&1));
        assert_eq!(by_artist.get(&11), Some(&2));
    }

    #[test]
    fn test_name_matches_case_insensitive_substring() {
        for term in ["hop", "HOP", "Musical", "usic", "the musical hop"] {
            assert!(name_matches("The Musical Hop", term), "term {:?}", term);
        }
        assert!(!name_matches("The Musical Hop", "jazz"));
    }

    #[test]
    fn test_search_music_finds_two_venues() {
        let venues = refs(&[
            "The Musical Hop",
            "The Dueling Pianos Bar",
            "Park Square Live Music & Coffee",
        ]);
        let results = search_entities(venues, "Music", &HashMap::new());

        assert_eq!(results.count, 2);
        let names: Vec<&str> = results.data.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["The Musical Hop", "Park Square Live Music & Coffee"]);
    }

    #[test]
    fn test_search_artists_single_letter() {
        let artists = refs(&["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);

        let results = search_entities(artists.clone(), "A", &HashMap::new());
        assert_eq!(results.count, 3);

        let results = search_entities(artists, "band", &HashMap::new());
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");
    }

    #[test]
    fn test_search_empty_term_matches_all() {
        let results = search_entities(refs(&["One", "Two"]), "   ", &HashMap::new());
        assert_eq!(results.count, 2);
        assert_eq!(results.data.len(), results.count);
    }

    #[test]
    fn test_search_no_matches() {
        let results = search_entities(refs(&["One", "Two"]), "zzz", &HashMap::new());
        assert_eq!(results, SearchResults::default());
    }
}
