//! Error pages

use axum::http::StatusCode;

use super::{layout, text};

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = match status {
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::BAD_REQUEST => "Bad Request",
        s if s.is_server_error() => "Server Error",
        _ => "Error",
    };

    let body = format!(
        r#"<h1>{code} {heading}</h1>
<p>{message}</p>
<p><a href="/">Back to home</a></p>"#,
        code = status.as_u16(),
        heading = heading,
        message = text(message),
    );

    layout(heading, None, &body)
}
