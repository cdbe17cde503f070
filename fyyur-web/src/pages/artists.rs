//! Artist pages

use fyyur_common::db::{Artist, EntityRef};
use fyyur_common::forms::{ArtistForm, FormErrors};
use fyyur_common::views::ShowHistory;

use super::forms::{checkbox, form_errors, genre_select, state_select, text_input, textarea};
use super::search::{search_form, Directory};
use super::shows::history_section;
use super::{attr, genre_badges, layout, optional_link, text, Flash};

pub fn artists_page(artists: &[EntityRef]) -> String {
    let items: String = artists
        .iter()
        .map(|artist| {
            format!(
                r#"<li><a href="/artists/{}">{}</a></li>"#,
                artist.id,
                text(&artist.name)
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Artists</h1>
{search}
<p><a class="button" href="/artists/create">Post an artist</a></p>
{list}"#,
        search = search_form(Directory::Artists, ""),
        list = if artists.is_empty() {
            "<p>No artists listed yet.</p>".to_string()
        } else {
            format!("<ul>{}</ul>", items)
        },
    );

    layout("Artists", None, &body)
}

pub fn artist_detail_page(artist: &Artist, history: &ShowHistory, flash: Option<&Flash>) -> String {
    let seeking = if artist.seeking_venue {
        format!(
            r#"<p class="seeking"><strong>Currently seeking performance venues</strong></p><p>{}</p>"#,
            text(artist.seeking_description.as_deref().unwrap_or(""))
        )
    } else {
        r#"<p class="seeking">Not currently seeking performance venues</p>"#.to_string()
    };

    let image = artist
        .image_link
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}" width="300">"#, attr(src), attr(&artist.name)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<p>{genres}</p>
<p>{city}, {state}</p>
<p>{phone}</p>
{website}
{facebook}
{seeking}
{image}
<p><a class="button" href="/artists/{id}/edit">Edit</a></p>
{history}"#,
        name = text(&artist.name),
        id = artist.id,
        genres = genre_badges(&artist.genres),
        city = text(&artist.city),
        state = text(&artist.state),
        phone = text(artist.phone.as_deref().unwrap_or("No phone")),
        website = optional_link("Website", artist.website.as_deref()),
        facebook = optional_link("Facebook", artist.facebook_link.as_deref()),
        seeking = seeking,
        image = image,
        history = history_section(history, "/venues"),
    );

    layout(&artist.name, flash, &body)
}

/// Create form when `artist_id` is None, edit form otherwise
pub fn artist_form_page(
    artist_id: Option<i64>,
    form: &ArtistForm,
    errors: &FormErrors,
    flash: Option<&Flash>,
) -> String {
    let (title, action, submit) = match artist_id {
        Some(id) => ("Edit artist", format!("/artists/{}/edit", id), "Save Changes"),
        None => ("List a new artist", "/artists/create".to_string(), "Create Artist"),
    };
    let genres = form.genres.clone().unwrap_or_default();

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
    {form_errors}
    {name}
    {city}
    {state}
    {phone}
    {genres}
    {facebook}
    {image}
    {website}
    {seeking}
    {description}
    <button class="button" type="submit">{submit}</button>
</form>"#,
        title = title,
        action = action,
        form_errors = form_errors(errors),
        name = text_input("Name", "name", form.name.as_deref(), "text", errors),
        city = text_input("City", "city", form.city.as_deref(), "text", errors),
        state = state_select(form.state.as_deref(), errors),
        phone = text_input("Phone", "phone", form.phone.as_deref(), "tel", errors),
        genres = genre_select(&genres, errors),
        facebook = text_input("Facebook link", "facebook_link", form.facebook_link.as_deref(), "url", errors),
        image = text_input("Image link", "image_link", form.image_link.as_deref(), "url", errors),
        website = text_input("Website", "website", form.website.as_deref(), "url", errors),
        seeking = checkbox("Seeking venues", "seeking_venue", form.is_seeking(), errors),
        description = textarea(
            "Seeking description",
            "seeking_description",
            form.seeking_description.as_deref(),
            errors
        ),
        submit = submit,
    );

    layout(title, flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artists_page_lists_names() {
        let page = artists_page(&[EntityRef {
            id: 5,
            name: "Matt Quevedo".to_string(),
        }]);
        assert!(page.contains(r#"<a href="/artists/5">Matt Quevedo</a>"#));
        assert!(page.contains(r#"action="/artists/search""#));
    }

    #[test]
    fn test_detail_links_venues() {
        let artist = Artist {
            id: 6,
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("432-325-5432".to_string()),
            image_link: None,
            facebook_link: None,
            website: None,
            genres: vec!["Jazz".to_string(), "Classical".to_string()],
            seeking_venue: false,
            seeking_description: None,
        };

        let page = artist_detail_page(&artist, &ShowHistory::default(), Some(&Flash::success("saved")));
        assert!(page.contains("<h1>The Wild Sax Band</h1>"));
        assert!(page.contains("Not currently seeking performance venues"));
        assert!(page.contains("0 Upcoming Shows"));
        assert!(page.contains("saved"));
    }
}
