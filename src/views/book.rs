//! Book pages

use super::{checked, error_list, escape, link, selected, template, Page};
use crate::{
    models::{BookInstance, BookInstanceStatus, PopulatedBook},
    services::books::{BookChoices, BookWithInstances},
    validation::{BookForm, FieldError},
};

const FORM: &str = r#"<h1>%title%</h1>
<form method="POST">
<div><label for="title">Title:</label>
<input id="title" type="text" name="title" placeholder="Name of book" value="%book_title%" required></div>
<div><label for="author">Author:</label>
<select id="author" name="author" required>
<option value="">--Please select an author--</option>
%authors%
</select></div>
<div><label for="summary">Summary:</label>
<textarea id="summary" name="summary" placeholder="Summary">%summary%</textarea></div>
<div><label for="isbn">ISBN:</label>
<input id="isbn" type="text" name="isbn" placeholder="ISBN13" value="%isbn%" required></div>
<div><label>Genre:</label>
%genres%
</div>
<button type="submit">Submit</button>
</form>
%errors%"#;

fn author_link(book: &PopulatedBook) -> String {
    match &book.author {
        Some(author) => link(&author.url(), &author.name()),
        None => String::new(),
    }
}

pub(super) fn status_class(instance: &BookInstance) -> &'static str {
    match instance.status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
    }
}

fn instances_list(instances: &[BookInstance]) -> String {
    if instances.is_empty() {
        return "<p>There are no copies of this book in the library.</p>".to_string();
    }
    instances
        .iter()
        .map(|i| {
            let due = if i.status == BookInstanceStatus::Available {
                String::new()
            } else {
                format!("<p><strong>Due back:</strong> {}</p>", i.due_back_formatted())
            };
            format!(
                "<hr>\n<p class=\"{}\">{}</p>\n<p><strong>Imprint:</strong> {}</p>\n{}<p><strong>Id:</strong> {}</p>\n",
                status_class(i),
                i.status,
                escape(&i.imprint),
                due,
                link(&i.url(), &i.id.to_string()),
            )
        })
        .collect()
}

fn summary_block(book: &PopulatedBook) -> String {
    let genres: Vec<String> = book.genres.iter().map(|g| link(&g.url(), &g.name)).collect();
    format!(
        "<p><strong>Author:</strong> {}</p>\n<p><strong>Summary:</strong> {}</p>\n<p><strong>ISBN:</strong> {}</p>\n<p><strong>Genre:</strong> {}</p>",
        author_link(book),
        escape(book.book.summary.as_deref().unwrap_or_default()),
        escape(&book.book.isbn),
        genres.join(", "),
    )
}

pub fn list(books: &[PopulatedBook]) -> Page {
    let items: String = if books.is_empty() {
        "<li>There are no books.</li>".to_string()
    } else {
        books
            .iter()
            .map(|b| {
                let by = b.author.as_ref().map(|a| a.name()).unwrap_or_default();
                format!("<li>{} ({})</li>", link(&b.book.url(), &b.book.title), escape(&by))
            })
            .collect()
    };
    Page::new("Book List", format!("<h1>Book List</h1>\n<ul>{}</ul>", items))
}

pub fn detail(found: &BookWithInstances) -> Page {
    let book = &found.book;
    let content = format!(
        "<h1>Title: {}</h1>\n{}\n<div>\n<h4>Copies</h4>\n{}</div>\n<hr>\n<p>{}</p>\n<p>{}</p>",
        escape(&book.book.title),
        summary_block(book),
        instances_list(&found.instances),
        link(&format!("{}/delete", book.book.url()), "Delete Book"),
        link(&format!("{}/update", book.book.url()), "Update Book"),
    );
    Page::new(book.book.title.clone(), content)
}

/// Create and update form; submitted genres stay checked
pub fn form(title: &str, form: &BookForm, choices: &BookChoices, errors: &[FieldError]) -> Page {
    let authors: String = choices
        .authors
        .iter()
        .map(|a| {
            let id = a.id.to_string();
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                id,
                selected(form.author == id),
                escape(&a.name())
            )
        })
        .collect();
    let genres: String = choices
        .genres
        .iter()
        .map(|g| {
            format!(
                r#"<div><input type="checkbox" name="genre" id="genre-{id}" value="{id}"{}><label for="genre-{id}">{}</label></div>"#,
                checked(form.has_genre(g)),
                escape(&g.name),
                id = g.id,
            )
        })
        .collect();

    let content = template::apply(
        FORM,
        &[
            ("title", escape(title).as_str()),
            ("book_title", escape(&form.title).as_str()),
            ("authors", authors.as_str()),
            ("summary", escape(form.summary.as_deref().unwrap_or_default()).as_str()),
            ("isbn", escape(&form.isbn).as_str()),
            ("genres", genres.as_str()),
            ("errors", error_list(errors).as_str()),
        ],
    );
    Page::new(title, content)
}

/// Delete confirmation; copies are disclosed but do not block deletion
pub fn delete(found: &BookWithInstances) -> Page {
    let book = &found.book;
    let disclosure = if found.instances.is_empty() {
        String::new()
    } else {
        format!("<h4>Copies</h4>\n{}", instances_list(&found.instances))
    };
    let content = format!(
        "<h1>Delete Book: {}</h1>\n{}\n{}\n<p>Do you really want to delete this Book?</p>\n<form method=\"POST\"><button type=\"submit\">Delete</button></form>",
        escape(&book.book.title),
        summary_block(book),
        disclosure,
    );
    Page::new("Delete Book", content)
}
