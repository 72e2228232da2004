//! Server-side HTML views.
//!
//! Each view is a function from its data to a [`Page`]; pages are wrapped in
//! the shared layout when turned into a response.  Every value interpolated
//! into markup goes through [`escape`].

pub mod author;
pub mod book;
pub mod book_instance;
pub mod error;
pub mod genre;
pub mod index;
mod template;

use axum::response::{Html, IntoResponse, Response};

use crate::validation::FieldError;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>%title%</title>
<style>
body { font-family: sans-serif; margin: 0; display: flex; }
nav { min-width: 12em; padding: 1em; background: #f4f4f4; }
main { padding: 1em 2em; }
.errors { color: #a94442; }
.text-success { color: #3c763d; }
.text-danger { color: #a94442; }
.text-warning { color: #8a6d3b; }
</style>
</head>
<body>
<nav>
<ul>
<li><a href="/catalog">Home</a></li>
<li><a href="/catalog/books">All books</a></li>
<li><a href="/catalog/authors">All authors</a></li>
<li><a href="/catalog/genres">All genres</a></li>
<li><a href="/catalog/bookinstances">All book-instances</a></li>
</ul>
<hr>
<ul>
<li><a href="/catalog/author/create">Create new author</a></li>
<li><a href="/catalog/genre/create">Create new genre</a></li>
<li><a href="/catalog/book/create">Create new book</a></li>
<li><a href="/catalog/bookinstance/create">Create new book instance (copy)</a></li>
</ul>
</nav>
<main>
%content%
</main>
</body>
</html>
"#;

/// A rendered view, not yet wrapped in the layout
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub content: String,
}

impl Page {
    pub fn new(title: impl Into<String>, content: String) -> Self {
        Self { title: title.into(), content }
    }

    /// The complete HTML document
    pub fn render(&self) -> String {
        let title = escape(&self.title);
        template::apply(LAYOUT, &[("title", title.as_str()), ("content", self.content.as_str())])
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

/// Escapes text for use in element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn link(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape(href), escape(text))
}

/// Checklist failures above a re-rendered form
fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!(r#"<li data-field="{}">{}</li>"#, escape(&e.field), escape(&e.message)))
        .collect();
    format!(r#"<ul class="errors">{}</ul>"#, items)
}

fn selected(on: bool) -> &'static str {
    if on {
        " selected"
    } else {
        ""
    }
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}
