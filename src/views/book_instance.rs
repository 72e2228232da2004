//! Book copy pages

use super::{book::status_class, error_list, escape, link, selected, template, Page};
use crate::{
    models::{Book, BookInstanceStatus, PopulatedBookInstance},
    validation::{BookInstanceForm, FieldError},
};

const FORM: &str = r#"<h1>%title%</h1>
<form method="POST">
<div><label for="book">Book:</label>
<select id="book" name="book" required>
<option value="">--Please select a book--</option>
%books%
</select></div>
<div><label for="imprint">Imprint:</label>
<input id="imprint" type="text" name="imprint" placeholder="Publisher and date information" value="%imprint%" required></div>
<div><label for="due_back">Date when book available:</label>
<input id="due_back" type="date" name="due_back" value="%due_back%"></div>
<div><label for="status">Status:</label>
<select id="status" name="status">
%statuses%
</select></div>
<button type="submit">Submit</button>
</form>
%errors%"#;

fn book_title(found: &PopulatedBookInstance) -> &str {
    found.book.as_ref().map(|b| b.title.as_str()).unwrap_or_default()
}

fn book_link(found: &PopulatedBookInstance) -> String {
    match &found.book {
        Some(book) => link(&book.url(), &book.title),
        None => String::new(),
    }
}

fn facts(found: &PopulatedBookInstance) -> String {
    let instance = &found.instance;
    let due = if instance.status == BookInstanceStatus::Available {
        String::new()
    } else {
        format!("\n<p><strong>Due back:</strong> {}</p>", instance.due_back_formatted())
    };
    format!(
        "<p><strong>Title:</strong> {}</p>\n<p><strong>Imprint:</strong> {}</p>\n<p><strong>Status:</strong> <span class=\"{}\">{}</span></p>{}",
        book_link(found),
        escape(&instance.imprint),
        status_class(instance),
        instance.status,
        due,
    )
}

pub fn list(instances: &[PopulatedBookInstance]) -> Page {
    let items: String = if instances.is_empty() {
        "<li>There are no book copies in this library.</li>".to_string()
    } else {
        instances
            .iter()
            .map(|found| {
                let instance = &found.instance;
                let label = format!("{} : {}", book_title(found), instance.imprint);
                let due = if instance.status == BookInstanceStatus::Available {
                    String::new()
                } else {
                    format!(" (Due: {})", instance.due_back_formatted())
                };
                format!(
                    "<li>{} - <span class=\"{}\">{}</span>{}</li>",
                    link(&instance.url(), &label),
                    status_class(instance),
                    instance.status,
                    due,
                )
            })
            .collect()
    };
    Page::new("Book Instance List", format!("<h1>Book Instance List</h1>\n<ul>{}</ul>", items))
}

pub fn detail(found: &PopulatedBookInstance) -> Page {
    let instance = &found.instance;
    let content = format!(
        "<h1>ID: {}</h1>\n{}\n<hr>\n<p>{}</p>\n<p>{}</p>",
        instance.id,
        facts(found),
        link(&format!("{}/delete", instance.url()), "Delete BookInstance"),
        link(&format!("{}/update", instance.url()), "Update BookInstance"),
    );
    Page::new(format!("Copy: {}", book_title(found)), content)
}

/// Create and update form; the submitted book and status stay selected
pub fn form(title: &str, form: &BookInstanceForm, books: &[Book], errors: &[FieldError]) -> Page {
    let book_options: String = books
        .iter()
        .map(|b| {
            let id = b.id.to_string();
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                id,
                selected(form.book == id),
                escape(&b.title)
            )
        })
        .collect();
    let current = form.selected_status();
    let status_options: String = BookInstanceStatus::ALL
        .iter()
        .map(|s| format!(r#"<option value="{s}"{}>{s}</option>"#, selected(*s == current)))
        .collect();

    let content = template::apply(
        FORM,
        &[
            ("title", escape(title).as_str()),
            ("books", book_options.as_str()),
            ("imprint", escape(&form.imprint).as_str()),
            ("due_back", escape(form.due_back.as_deref().unwrap_or_default()).as_str()),
            ("statuses", status_options.as_str()),
            ("errors", error_list(errors).as_str()),
        ],
    );
    Page::new(title, content)
}

pub fn delete(found: &PopulatedBookInstance) -> Page {
    let content = format!(
        "<h1>Delete BookInstance</h1>\n<p>Do you really want to delete this BookInstance?</p>\n<div>\n<p><strong>ID:</strong> {}</p>\n{}\n</div>\n<form method=\"POST\"><button type=\"submit\">Delete</button></form>",
        found.instance.id,
        facts(found),
    );
    Page::new("Delete BookInstance", content)
}
