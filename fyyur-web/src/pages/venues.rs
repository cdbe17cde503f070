//! Venue pages

use fyyur_common::db::Venue;
use fyyur_common::forms::{FormErrors, VenueForm};
use fyyur_common::views::{LocationGroup, ShowHistory};

use super::forms::{checkbox, form_errors, genre_select, state_select, text_input, textarea};
use super::search::{search_form, Directory};
use super::shows::history_section;
use super::{attr, genre_badges, layout, optional_link, text, Flash};

/// Venue listing grouped by city and state
pub fn venues_page(groups: &[LocationGroup]) -> String {
    let sections: String = groups
        .iter()
        .map(|group| {
            let venues: String = group
                .venues
                .iter()
                .map(|venue| {
                    format!(
                        r#"<li><a href="/venues/{}">{}</a> <small>({} upcoming)</small></li>"#,
                        venue.id,
                        text(&venue.name),
                        venue.num_upcoming_shows
                    )
                })
                .collect();
            format!(
                r#"<section class="location">
    <h3>{}, {}</h3>
    <ul>{}</ul>
</section>"#,
                text(&group.city),
                text(&group.state),
                venues
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Venues</h1>
{search}
<p><a class="button" href="/venues/create">Post a venue</a></p>
{sections}"#,
        search = search_form(Directory::Venues, ""),
        sections = if groups.is_empty() {
            "<p>No venues listed yet.</p>".to_string()
        } else {
            sections
        },
    );

    layout("Venues", None, &body)
}

pub fn venue_detail_page(venue: &Venue, history: &ShowHistory, flash: Option<&Flash>) -> String {
    let seeking = if venue.seeking_talent {
        format!(
            r#"<p class="seeking"><strong>Currently seeking talent</strong></p><p>{}</p>"#,
            text(venue.seeking_description.as_deref().unwrap_or(""))
        )
    } else {
        r#"<p class="seeking">Not currently seeking talent</p>"#.to_string()
    };

    let image = venue
        .image_link
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}" width="300">"#, attr(src), attr(&venue.name)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<p>{genres}</p>
<p>{address}<br>{city}, {state}</p>
<p>{phone}</p>
{website}
{facebook}
{seeking}
{image}
<p><a class="button" href="/venues/{id}/edit">Edit</a></p>
{history}"#,
        name = text(&venue.name),
        id = venue.id,
        genres = genre_badges(&venue.genres),
        address = text(&venue.address),
        city = text(&venue.city),
        state = text(&venue.state),
        phone = text(venue.phone.as_deref().unwrap_or("No phone")),
        website = optional_link("Website", venue.website.as_deref()),
        facebook = optional_link("Facebook", venue.facebook_link.as_deref()),
        seeking = seeking,
        image = image,
        history = history_section(history, "/artists"),
    );

    layout(&venue.name, flash, &body)
}

/// Create form when `venue_id` is None, edit form otherwise
pub fn venue_form_page(
    venue_id: Option<i64>,
    form: &VenueForm,
    errors: &FormErrors,
    flash: Option<&Flash>,
) -> String {
    let (title, action, submit) = match venue_id {
        Some(id) => ("Edit venue", format!("/venues/{}/edit", id), "Save Changes"),
        None => ("List a new venue", "/venues/create".to_string(), "Create Venue"),
    };
    let genres = form.genres.clone().unwrap_or_default();

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
    {form_errors}
    {name}
    {city}
    {state}
    {address}
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
        address = text_input("Address", "address", form.address.as_deref(), "text", errors),
        phone = text_input("Phone", "phone", form.phone.as_deref(), "tel", errors),
        genres = genre_select(&genres, errors),
        facebook = text_input("Facebook link", "facebook_link", form.facebook_link.as_deref(), "url", errors),
        image = text_input("Image link", "image_link", form.image_link.as_deref(), "url", errors),
        website = text_input("Website", "website", form.website.as_deref(), "url", errors),
        seeking = checkbox("Seeking talent", "seeking_talent", form.is_seeking(), errors),
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
    use fyyur_common::views::VenueListing;

    #[test]
    fn test_venues_page_renders_groups() {
        let groups = vec![LocationGroup {
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            venues: vec![VenueListing {
                id: 1,
                name: "The Musical Hop".to_string(),
                num_upcoming_shows: 2,
            }],
        }];

        let page = venues_page(&groups);
        assert!(page.contains("<h3>San Francisco, CA</h3>"));
        assert!(page.contains(r#"<a href="/venues/1">The Musical Hop</a> <small>(2 upcoming)</small>"#));
    }

    #[test]
    fn test_edit_form_prefilled() {
        let venue = Venue {
            id: 3,
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: true,
            seeking_description: None,
        };

        let page = venue_form_page(
            Some(3),
            &VenueForm::from_venue(&venue),
            &FormErrors::default(),
            None,
        );
        assert!(page.contains(r#"action="/venues/3/edit""#));
        assert!(page.contains(r#"value="Park Square Live Music &amp; Coffee""#));
        assert!(page.contains(r#"<option value="CA" selected>CA</option>"#));
        assert!(page.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(page.contains(r#"value="y" checked"#));
    }
}
