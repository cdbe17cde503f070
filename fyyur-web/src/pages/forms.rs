//! Form field rendering shared by the venue, artist and show forms

use fyyur_common::forms::{FormErrors, GENRES, STATES};
use fyyur_common::db::EntityRef;

use super::{attr, text};

/// Messages recorded against one field
fn field_errors(errors: &FormErrors, field: &str) -> String {
    let items: Vec<String> = errors
        .for_field(field)
        .map(|message| format!("<li>{}</li>", text(message)))
        .collect();

    if items.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="errors">{}</ul>"#, items.join(""))
    }
}

/// Form-level messages, such as a show booking an unknown artist
pub fn form_errors(errors: &FormErrors) -> String {
    field_errors(errors, FormErrors::FORM)
}

pub fn text_input(
    label: &str,
    name: &str,
    value: Option<&str>,
    input_type: &str,
    errors: &FormErrors,
) -> String {
    format!(
        r#"<div class="field">
    <label for="{name}">{label}</label>
    <input type="{input_type}" id="{name}" name="{name}" value="{value}">
    {errors}
</div>"#,
        name = name,
        label = text(label),
        input_type = input_type,
        value = attr(value.unwrap_or("")),
        errors = field_errors(errors, name),
    )
}

pub fn textarea(label: &str, name: &str, value: Option<&str>, errors: &FormErrors) -> String {
    format!(
        r#"<div class="field">
    <label for="{name}">{label}</label>
    <textarea id="{name}" name="{name}" rows="3">{value}</textarea>
    {errors}
</div>"#,
        name = name,
        label = text(label),
        value = text(value.unwrap_or("")),
        errors = field_errors(errors, name),
    )
}

pub fn state_select(value: Option<&str>, errors: &FormErrors) -> String {
    let options: String = STATES
        .iter()
        .map(|code| option(code, code, value == Some(*code)))
        .collect();

    format!(
        r#"<div class="field">
    <label for="state">State</label>
    <select id="state" name="state">
        <option value="">--</option>
        {options}
    </select>
    {errors}
</div>"#,
        options = options,
        errors = field_errors(errors, "state"),
    )
}

/// Multi-select preceded by a hidden empty `genres` input, so clearing every
/// genre still submits the key and reaches validation
pub fn genre_select(selected: &[String], errors: &FormErrors) -> String {
    let options: String = GENRES
        .iter()
        .map(|genre| option(genre, genre, selected.iter().any(|s| s == genre)))
        .collect();

    format!(
        r#"<div class="field">
    <label for="genres">Genres</label>
    <input type="hidden" name="genres" value="">
    <select id="genres" name="genres" multiple size="8">
        {options}
    </select>
    {errors}
</div>"#,
        options = options,
        errors = field_errors(errors, "genres"),
    )
}

/// Checkbox preceded by a hidden `n` input so an unchecked box still submits
pub fn checkbox(label: &str, name: &str, checked: bool, errors: &FormErrors) -> String {
    format!(
        r#"<div class="field">
    <input type="hidden" name="{name}" value="n">
    <label><input type="checkbox" name="{name}" value="y"{checked}> {label}</label>
    {errors}
</div>"#,
        name = name,
        label = text(label),
        checked = if checked { " checked" } else { "" },
        errors = field_errors(errors, name),
    )
}

/// Select over existing venues or artists, keyed by id
pub fn entity_select(
    label: &str,
    name: &str,
    entities: &[EntityRef],
    value: Option<&str>,
    errors: &FormErrors,
) -> String {
    let value = value.map(str::trim);
    let options: String = entities
        .iter()
        .map(|entity| {
            let id = entity.id.to_string();
            let selected = value == Some(id.as_str());
            option(&id, &format!("{} (#{})", entity.name, entity.id), selected)
        })
        .collect();

    format!(
        r#"<div class="field">
    <label for="{name}">{label}</label>
    <select id="{name}" name="{name}">
        <option value="">--</option>
        {options}
    </select>
    {errors}
</div>"#,
        name = name,
        label = text(label),
        options = options,
        errors = field_errors(errors, name),
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        attr(value),
        if selected { " selected" } else { "" },
        text(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_keeps_value_and_errors() {
        let mut errors = FormErrors::default();
        errors.add("city", "This field is required.");

        let html = text_input("City", "city", Some(r#"San "Fran""#), "text", &errors);
        assert!(html.contains(r#"value="San &quot;Fran&quot;""#));
        assert!(html.contains("<li>This field is required.</li>"));
    }

    #[test]
    fn test_checkbox_has_hidden_default_first() {
        let html = checkbox("Seeking talent", "seeking_talent", true, &FormErrors::default());
        let hidden = html.find(r#"type="hidden""#).unwrap();
        let boxed = html.find(r#"type="checkbox""#).unwrap();
        assert!(hidden < boxed);
        assert!(html.contains(" checked"));
    }

    #[test]
    fn test_genre_select_marks_selected() {
        let html = genre_select(&["R&B".to_string()], &FormErrors::default());
        assert!(html.contains(r#"<option value="R&amp;B" selected>R&amp;B</option>"#));
        assert!(html.contains(r#"<option value="Jazz">Jazz</option>"#));
    }

    #[test]
    fn test_genre_select_submits_key_when_empty() {
        let html = genre_select(&[], &FormErrors::default());
        let hidden = html.find(r#"<input type="hidden" name="genres" value="">"#).unwrap();
        let select = html.find("<select").unwrap();
        assert!(hidden < select);
        assert!(!html.contains(" selected"));
    }

    #[test]
    fn test_state_select_marks_selected() {
        let html = state_select(Some("NY"), &FormErrors::default());
        assert!(html.contains(r#"<option value="NY" selected>NY</option>"#));
    }
}
