//! Record assembly into named-column row sets
//!
//! A [`RowSet`] is what the persistence sink receives: the destination table,
//! its ordered column names and one value per column for every row.

use crate::models::{FilmographyRow, ReviewEntry, TopListEntry};

pub const TOP_LIST_TABLE: &str = "top_250_movies";
pub const FILMOGRAPHY_TABLE: &str = "filmography_roles";
pub const REVIEWS_TABLE: &str = "movie_reviews";

/// Every table a pipeline can produce
pub const TABLES: [&str; 3] = [TOP_LIST_TABLE, FILMOGRAPHY_TABLE, REVIEWS_TABLE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSet {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RowSet {
    pub fn new(table: &str, columns: Vec<String>) -> Self {
        Self {
            table: table.to_string(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn top_list(entries: Vec<TopListEntry>) -> RowSet {
    let mut set = RowSet::new(TOP_LIST_TABLE, columns(&["Title", "Year", "Rating"]));
    set.rows = entries
        .into_iter()
        .map(|e| vec![e.title, e.year, e.rating])
        .collect();
    set
}

pub fn filmography(row: FilmographyRow) -> RowSet {
    let mut set = RowSet::new(
        FILMOGRAPHY_TABLE,
        row.cells().iter().map(|(key, _)| key.to_string()).collect(),
    );
    set.rows = vec![row.cells().iter().map(|(_, v)| v.clone()).collect()];
    set
}

pub fn reviews(entries: Vec<ReviewEntry>) -> RowSet {
    let mut set = RowSet::new(REVIEWS_TABLE, columns(&["Review Title", "Review Text"]));
    set.rows = entries.into_iter().map(|e| vec![e.title, e.text]).collect();
    set
}
