use crate::resolver::{LogicalKey, Role, Section};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ranked item of the top list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopListEntry {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rating")]
    pub rating: String,
}

/// One user review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    #[serde(rename = "Review Title")]
    pub title: String,
    #[serde(rename = "Review Text")]
    pub text: String,
}

/// Wide row with one comma-joined title list per (role, section).
///
/// Always holds every combination of [`Role::ALL`] and [`Section::ALL`], in
/// that order; absent sections are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmographyRow {
    cells: Vec<(LogicalKey, String)>,
}

impl FilmographyRow {
    pub fn keys() -> impl Iterator<Item = LogicalKey> {
        Role::ALL
            .into_iter()
            .flat_map(|role| Section::ALL.into_iter().map(move |section| LogicalKey::new(role, section)))
    }

    /// Fold per-entity title lists into the row; keys without results stay empty
    pub fn from_results(results: &BTreeMap<LogicalKey, Vec<String>>) -> Self {
        let cells = Self::keys()
            .map(|key| {
                let value = results.get(&key).map(|titles| titles.join(", ")).unwrap_or_default();
                (key, value)
            })
            .collect();
        Self { cells }
    }

    pub fn get(&self, key: &LogicalKey) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> &[(LogicalKey, String)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filmography_row_always_has_six_cells() {
        let row = FilmographyRow::from_results(&BTreeMap::new());
        assert_eq!(row.len(), 6);
        assert!(row.cells().iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_filmography_row_joins_titles() {
        let mut results = BTreeMap::new();
        results.insert(
            LogicalKey::new(Role::Actor, Section::Previous),
            vec!["Inception".to_string(), "Titanic".to_string()],
        );
        let row = FilmographyRow::from_results(&results);
        assert_eq!(row.len(), 6);
        assert_eq!(
            row.get(&LogicalKey::new(Role::Actor, Section::Previous)),
            Some("Inception, Titanic")
        );
        assert_eq!(row.get(&LogicalKey::new(Role::Writer, Section::Upcoming)), Some(""));
    }

    #[test]
    fn test_review_serializes_with_column_names() {
        let review = ReviewEntry {
            title: "Great".to_string(),
            text: "Loved it".to_string(),
        };
        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["Review Title"], "Great");
        assert_eq!(json["Review Text"], "Loved it");
    }
}
