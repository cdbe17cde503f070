//! Search form and results, shared by venues and artists

use fyyur_common::views::SearchResults;

use super::{attr, layout, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    Venues,
    Artists,
}

impl Directory {
    pub fn path(self) -> &'static str {
        match self {
            Directory::Venues => "/venues",
            Directory::Artists => "/artists",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Directory::Venues => "Venues",
            Directory::Artists => "Artists",
        }
    }
}

pub fn search_form(directory: Directory, term: &str) -> String {
    format!(
        r#"<form method="post" action="{path}/search">
    <input type="search" name="search_term" value="{term}" placeholder="Find {what}">
    <button class="button" type="submit">Search</button>
</form>"#,
        path = directory.path(),
        term = attr(term),
        what = directory.title().to_lowercase(),
    )
}

pub fn search_results_page(directory: Directory, term: &str, results: &SearchResults) -> String {
    let items: String = results
        .data
        .iter()
        .map(|hit| {
            format!(
                r#"<li><a href="{path}/{id}">{name}</a> <small>({upcoming} upcoming)</small></li>"#,
                path = directory.path(),
                id = hit.id,
                name = text(&hit.name),
                upcoming = hit.num_upcoming_shows,
            )
        })
        .collect();

    let noun = if results.count == 1 { "result" } else { "results" };
    let body = format!(
        r#"{form}
<h3>Number of search results for "{term}": {count}</h3>
<p>{count} {noun}</p>
<ul>{items}</ul>"#,
        form = search_form(directory, term),
        term = text(term),
        count = results.count,
        noun = noun,
        items = items,
    );

    layout(&format!("Search {}", directory.title()), None, &body)
}
