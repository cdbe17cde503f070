//! HTML page rendering
//!
//! Pages are plain `format!` strings wrapped in a shared layout. Every piece
//! of stored or submitted text goes through [`text`] or [`attr`] before it is
//! placed in markup.

use std::borrow::Cow;

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod search;
pub mod shows;
pub mod venues;

/// Escape for element content
pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escape for a double-quoted attribute value
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// One-shot notice shown at the top of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        let class = match self.kind {
            FlashKind::Success => "flash flash-success",
            FlashKind::Error => "flash flash-error",
        };
        format!(r#"<div class="{}">{}</div>"#, class, text(&self.message))
    }
}

/// Wrap page content in the site chrome
pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash = flash.map(Flash::render).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <style>
        * {{
            box-sizing: border-box;
        }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            margin: 0;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 15px 20px;
            display: flex;
            gap: 20px;
            align-items: center;
        }}
        header .brand {{
            font-size: 24px;
            font-weight: 600;
            color: #4a9eff;
            text-decoration: none;
        }}
        nav a {{
            color: #e0e0e0;
            margin-right: 15px;
            text-decoration: none;
        }}
        a {{
            color: #4a9eff;
        }}
        .content {{
            padding: 20px;
        }}
        h1, h2, h3 {{
            color: #4a9eff;
        }}
        .flash {{
            padding: 10px 15px;
            border-radius: 4px;
            margin-bottom: 20px;
        }}
        .flash-success {{
            background: #10b981;
            color: #fff;
        }}
        .flash-error {{
            background: #ef4444;
            color: #fff;
        }}
        .errors {{
            color: #ef4444;
            list-style: none;
            padding: 0;
            margin: 4px 0;
        }}
        .field {{
            margin-bottom: 12px;
        }}
        .field label {{
            display: block;
            font-weight: 600;
        }}
        .genre {{
            display: inline-block;
            background: #3a3a3a;
            border-radius: 10px;
            padding: 2px 10px;
            margin-right: 5px;
        }}
        .button {{
            display: inline-block;
            padding: 8px 16px;
            background: #4a9eff;
            color: white;
            border: none;
            border-radius: 4px;
            text-decoration: none;
            font-weight: 600;
            cursor: pointer;
        }}
    </style>
</head>
<body>
    <header>
        <a class="brand" href="/">Fyyur</a>
        <nav>
            <a href="/venues">Venues</a>
            <a href="/artists">Artists</a>
            <a href="/shows">Shows</a>
        </nav>
    </header>
    <div class="content">
        {flash}
        {body}
    </div>
</body>
</html>
"#,
        title = text(title),
        flash = flash,
        body = body,
    )
}

/// Genres as inline badges
pub(crate) fn genre_badges(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| format!(r#"<span class="genre">{}</span>"#, text(genre)))
        .collect::<Vec<_>>()
        .join("")
}

/// Link when a URL is present, otherwise nothing
pub(crate) fn optional_link(label: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            r#"<p>{}: <a href="{}">{}</a></p>"#,
            text(label),
            attr(url),
            text(url)
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_escapes_title_and_flash() {
        let page = layout(
            "<script>",
            Some(&Flash::success("Venue <b>Hop</b> was listed")),
            "<p>body</p>",
        );

        assert!(page.contains("&lt;script&gt; | Fyyur"));
        assert!(page.contains("Venue &lt;b&gt;Hop&lt;/b&gt; was listed"));
        assert!(page.contains("flash-success"));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_attr_escapes_quotes() {
        assert_eq!(attr(r#"a"b"#), "a&quot;b");
        assert_eq!(text("R&B"), "R&amp;B");
    }

    #[test]
    fn test_optional_link() {
        assert_eq!(optional_link("Website", None), "");
        assert!(optional_link("Website", Some("https://x.test/?a=1&b=2"))
            .contains(r#"href="https://x.test/?a=1&amp;b=2""#));
    }
}
