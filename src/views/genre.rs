//! Genre pages

use super::{error_list, escape, link, template, Page};
use crate::{
    models::{Book, Genre},
    services::genres::GenreWithBooks,
    validation::{FieldError, GenreForm},
};

const FORM: &str = r#"<h1>%title%</h1>
<form method="POST">
<div><label for="name">Genre:</label>
<input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." value="%name%" required></div>
<button type="submit">Submit</button>
</form>
%errors%"#;

fn books_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "<p>This genre has no books.</p>".to_string();
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

pub fn list(genres: &[Genre]) -> Page {
    let items: String = if genres.is_empty() {
        "<li>There are no genres.</li>".to_string()
    } else {
        genres.iter().map(|g| format!("<li>{}</li>", link(&g.url(), &g.name))).collect()
    };
    Page::new("Genre List", format!("<h1>Genre List</h1>\n<ul>{}</ul>", items))
}

pub fn detail(found: &GenreWithBooks) -> Page {
    let genre = &found.genre;
    let content = format!(
        "<h1>Genre: {}</h1>\n<h4>Books</h4>\n{}\n<hr>\n<p>{}</p>\n<p>{}</p>",
        escape(&genre.name),
        books_list(&found.books),
        link(&format!("{}/delete", genre.url()), "Delete genre"),
        link(&format!("{}/update", genre.url()), "Update genre"),
    );
    Page::new("Genre Detail", content)
}

pub fn form(title: &str, form: &GenreForm, errors: &[FieldError]) -> Page {
    let content = template::apply(
        FORM,
        &[
            ("title", escape(title).as_str()),
            ("name", escape(&form.name).as_str()),
            ("errors", error_list(errors).as_str()),
        ],
    );
    Page::new(title, content)
}

/// Delete confirmation; books filed under the genre keep a dangling reference
pub fn delete(found: &GenreWithBooks) -> Page {
    let disclosure = if found.books.is_empty() {
        String::new()
    } else {
        format!("<p>The following books are filed under this genre:</p>\n{}", books_list(&found.books))
    };
    let content = format!(
        "<h1>Delete Genre: {}</h1>\n{}\n<p>Do you really want to delete this Genre?</p>\n<form method=\"POST\"><button type=\"submit\">Delete</button></form>",
        escape(&found.genre.name),
        disclosure
    );
    Page::new("Delete Genre", content)
}
