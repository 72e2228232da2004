//! Catalog home page

use super::{template, Page};
use crate::services::catalog::CatalogCounts;

const INDEX: &str = r#"<h1>Local Library Home</h1>
<p>Welcome to <em>LocalLibrary</em>, a very basic catalog of the books, authors and genres on our shelves.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
<li><strong>Books:</strong> %books%</li>
<li><strong>Copies:</strong> %copies%</li>
<li><strong>Copies available:</strong> %available%</li>
<li><strong>Authors:</strong> %authors%</li>
<li><strong>Genres:</strong> %genres%</li>
</ul>"#;

pub fn page(counts: &CatalogCounts) -> Page {
    let content = template::apply(
        INDEX,
        &[
            ("books", counts.books.to_string().as_str()),
            ("copies", counts.book_instances.to_string().as_str()),
            ("available", counts.book_instances_available.to_string().as_str()),
            ("authors", counts.authors.to_string().as_str()),
            ("genres", counts.genres.to_string().as_str()),
        ],
    );
    Page::new("Local Library Home", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_shown() {
        let counts = CatalogCounts {
            books: 7,
            book_instances: 12,
            book_instances_available: 5,
            authors: 3,
            genres: 2,
        };
        let content = page(&counts).content;
        assert!(content.contains("<strong>Books:</strong> 7"));
        assert!(content.contains("<strong>Copies available:</strong> 5"));
        assert!(content.contains("<strong>Genres:</strong> 2"));
    }
}
