//! Author pages

use super::{error_list, escape, link, template, Page};
use crate::{
    models::{Author, Book},
    services::authors::AuthorWithBooks,
    validation::{AuthorForm, FieldError},
};

const FORM: &str = r#"<h1>%title%</h1>
<form method="POST">
<div><label for="first_name">First Name:</label>
<input id="first_name" type="text" name="first_name" placeholder="First name" value="%first_name%" required></div>
<div><label for="family_name">Family Name:</label>
<input id="family_name" type="text" name="family_name" placeholder="Family name" value="%family_name%" required></div>
<div><label for="date_of_birth">Date of birth:</label>
<input id="date_of_birth" type="date" name="date_of_birth" value="%date_of_birth%"></div>
<div><label for="date_of_death">Date of death:</label>
<input id="date_of_death" type="date" name="date_of_death" value="%date_of_death%"></div>
<button type="submit">Submit</button>
</form>
%errors%"#;

fn books_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "<p>This author has no books.</p>".to_string();
    }
    let items: String = books
        .iter()
        .map(|b| {
            let summary = b.summary.as_deref().map(escape).unwrap_or_default();
            format!("<dt>{}</dt><dd>{}</dd>", link(&b.url(), &b.title), summary)
        })
        .collect();
    format!("<dl>{}</dl>", items)
}

pub fn list(authors: &[Author]) -> Page {
    let items: String = if authors.is_empty() {
        "<li>There are no authors.</li>".to_string()
    } else {
        authors
            .iter()
            .map(|a| format!("<li>{} ({})</li>", link(&a.url(), &a.name()), escape(&a.lifespan())))
            .collect()
    };
    Page::new("Author List", format!("<h1>Author List</h1>\n<ul>{}</ul>", items))
}

pub fn detail(found: &AuthorWithBooks) -> Page {
    let author = &found.author;
    let content = format!(
        "<h1>Author: {}</h1>\n<p>{}</p>\n<h4>Books</h4>\n{}\n<hr>\n<p>{}</p>\n<p>{}</p>",
        escape(&author.name()),
        escape(&author.lifespan()),
        books_list(&found.books),
        link(&format!("{}/delete", author.url()), "Delete author"),
        link(&format!("{}/update", author.url()), "Update author"),
    );
    Page::new("Author Detail", content)
}

/// Create and update form; `title` tells which
pub fn form(title: &str, form: &AuthorForm, errors: &[FieldError]) -> Page {
    let content = template::apply(
        FORM,
        &[
            ("title", escape(title).as_str()),
            ("first_name", escape(&form.first_name).as_str()),
            ("family_name", escape(&form.family_name).as_str()),
            ("date_of_birth", escape(form.date_of_birth.as_deref().unwrap_or_default()).as_str()),
            ("date_of_death", escape(form.date_of_death.as_deref().unwrap_or_default()).as_str()),
            ("errors", error_list(errors).as_str()),
        ],
    );
    Page::new(title, content)
}

/// Delete confirmation; the button is only offered when nothing blocks it
pub fn delete(found: &AuthorWithBooks) -> Page {
    let author = &found.author;
    let body = if found.books.is_empty() {
        r#"<p>Do you really want to delete this Author?</p>
<form method="POST"><button type="submit">Delete</button></form>"#
            .to_string()
    } else {
        format!(
            "<p><strong>Delete the following books before attempting to delete this author.</strong></p>\n<h4>Books</h4>\n{}",
            books_list(&found.books)
        )
    };
    let content = format!(
        "<h1>Delete Author: {}</h1>\n<p>{}</p>\n{}",
        escape(&author.name()),
        escape(&author.lifespan()),
        body
    );
    Page::new("Delete Author", content)
}
