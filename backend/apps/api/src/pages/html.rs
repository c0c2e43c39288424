//! HTML rendering helpers
//!
//! Plain server-rendered markup; every dynamic value goes through
//! [`escape`].

use std::borrow::Cow;

use auth::SessionClaims;
use axum::response::Html;
use kernel::error::field_errors::FieldErrors;

/// Escape text for HTML element content and quoted attribute values
pub fn escape(raw: &str) -> Cow<'_, str> {
    html_escape::encode_safe(raw)
}

/// Full page with navigation
pub fn layout(title: &str, session: Option<&SessionClaims>, body: &str) -> Html<String> {
    let nav = match session {
        Some(claims) => format!(
            r#"<a href="/">Home</a> <a href="/admin">Dashboard</a> <a href="/admin/donations">Donations</a> <a href="/admin/donations/create">Add donation</a>
<form method="post" action="/auth/logout" class="inline"><span>{}</span> <button type="submit">Log out</button></form>"#,
            escape(claims.label())
        ),
        None => r#"<a href="/">Home</a> <a href="/auth/login">Admin login</a>"#.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Myanmar Earthquake Relief</title>
</head>
<body>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

/// Request-level message above a form
pub fn banner(kind: &str, message: &str) -> String {
    format!(
        r#"<p class="banner banner-{}" role="alert">{}</p>"#,
        escape(kind),
        escape(message)
    )
}

/// First error for `field`, rendered next to its input
pub fn field_error(errors: &FieldErrors, field: &str) -> String {
    errors
        .first(field)
        .map(|message| format!(r#"<span class="field-error">{}</span>"#, escape(message)))
        .unwrap_or_default()
}

/// `<option>` list with `selected` on the current value
pub fn options(choices: &[&str], selected: &str) -> String {
    let mut out = String::from(r#"<option value="">Select...</option>"#);
    for choice in choices {
        let mark = if *choice == selected { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape(choice),
            mark
        ));
    }
    out
}
