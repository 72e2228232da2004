//! Resolution of stored references.
//!
//! Records keep their references as identifiers.  These helpers fetch the
//! referenced records in bulk (concurrently when there is more than one
//! collection involved) and attach them.  A reference to a record that no
//! longer exists resolves to nothing rather than failing.

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, PopulatedBook, PopulatedBookInstance, RecordId},
    repository::CatalogStore,
};

fn unique(ids: impl IntoIterator<Item = RecordId>) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = ids.into_iter().collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Attaches author and genres to every book, keeping the input order
pub async fn books(store: &dyn CatalogStore, books: Vec<Book>) -> AppResult<Vec<PopulatedBook>> {
    if books.is_empty() {
        return Ok(Vec::new());
    }

    let author_ids = unique(books.iter().map(|b| b.author));
    let genre_ids = unique(books.iter().flat_map(|b| b.genre.iter().copied()));
    let (authors, genres) =
        tokio::try_join!(store.find_authors(&author_ids), store.find_genres(&genre_ids))?;

    let authors: HashMap<_, _> = authors.into_iter().map(|a| (a.id, a)).collect();
    let genres: HashMap<_, _> = genres.into_iter().map(|g| (g.id, g)).collect();

    Ok(books
        .into_iter()
        .map(|book| PopulatedBook {
            author: authors.get(&book.author).cloned(),
            genres: book.genre.iter().filter_map(|id| genres.get(id).cloned()).collect(),
            book,
        })
        .collect())
}

pub async fn book(store: &dyn CatalogStore, book: Book) -> AppResult<PopulatedBook> {
    let mut populated = books(store, vec![book]).await?;
    // One book in, one book out.
    populated.pop().ok_or_else(|| AppError::Internal("populate lost a book".into()))
}

/// Attaches the book to every copy, keeping the input order
pub async fn book_instances(
    store: &dyn CatalogStore,
    instances: Vec<BookInstance>,
) -> AppResult<Vec<PopulatedBookInstance>> {
    if instances.is_empty() {
        return Ok(Vec::new());
    }

    let book_ids = unique(instances.iter().map(|i| i.book));
    let books: HashMap<_, _> =
        store.find_books(&book_ids).await?.into_iter().map(|b| (b.id, b)).collect();

    Ok(instances
        .into_iter()
        .map(|instance| PopulatedBookInstance { book: books.get(&instance.book).cloned(), instance })
        .collect())
}
