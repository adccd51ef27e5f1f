use crate::assembler::TABLES;
use crate::error::ScrapeError;
use crate::persist::csv_path;
use rusqlite::{params_from_iter, Connection};
use serde_json::{Map, Value};
use std::path::Path;

pub fn open(path: &Path) -> Result<Connection, ScrapeError> {
    let conn = Connection::open(path)?;
    Ok(conn)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Replace `table` with the content of the CSV at `csv`: one TEXT column per
/// header field, all rows inserted in a single transaction
pub fn load_csv(conn: &mut Connection, csv: &Path, table: &str) -> Result<usize, ScrapeError> {
    let mut reader = csv::Reader::from_path(csv)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    log::info!("Loading '{}' into '{}' ({} columns)", csv.display(), table, headers.len());

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), [])?;
    let columns: Vec<String> = headers
        .iter()
        .map(|h| format!("{} TEXT", quote_ident(h)))
        .collect();
    tx.execute(
        &format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", ")),
        [],
    )?;

    let placeholders: Vec<String> = (1..=headers.len()).map(|i| format!("?{}", i)).collect();
    let mut count = 0;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(table),
            placeholders.join(", ")
        ))?;
        for record in reader.records() {
            let record = record?;
            stmt.execute(params_from_iter(record.iter()))?;
            count += 1;
        }
    }
    tx.commit()?;

    log::info!("Data from '{}' migrated to '{}' ({} rows)", csv.display(), table, count);
    Ok(count)
}

/// Load every known table from `<dir>/<table>.csv`; failures are logged per table
pub fn load_all(conn: &mut Connection, dir: &Path) -> Vec<(&'static str, Result<usize, ScrapeError>)> {
    TABLES
        .into_iter()
        .map(|table| {
            let outcome = load_csv(conn, &csv_path(dir, table), table);
            if let Err(e) = &outcome {
                log::error!("Error migrating '{}': {}", table, e);
            }
            (table, outcome)
        })
        .collect()
}

/// Every row of a known table as column -> value objects
pub fn fetch_all(conn: &Connection, table: &str) -> Result<Vec<Map<String, Value>>, ScrapeError> {
    if !TABLES.contains(&table) {
        return Err(ScrapeError::UnknownTable(table.to_string()));
    }

    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();

    let rows = stmt.query_map([], |row| {
        let mut object = Map::new();
        for (idx, column) in columns.iter().enumerate() {
            let value: Option<String> = row.get(idx)?;
            object.insert(column.clone(), value.map(Value::String).unwrap_or(Value::Null));
        }
        Ok(object)
    })?;

    let rows = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler;
    use crate::models::ReviewEntry;
    use crate::persist::{CsvSink, RecordSink};

    #[test]
    fn test_load_and_fetch_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path());
        sink.write(&assembler::reviews(vec![ReviewEntry {
            title: "Masterpiece".to_string(),
            text: "Says it all, \"really\".".to_string(),
        }]))
        .unwrap();

        let mut conn = Connection::open_in_memory().unwrap();
        let loaded = load_csv(&mut conn, &sink.path_for("movie_reviews"), "movie_reviews").unwrap();
        assert_eq!(loaded, 1);

        let rows = fetch_all(&conn, "movie_reviews").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Review Title"], "Masterpiece");
        assert_eq!(rows[0]["Review Text"], "Says it all, \"really\".");
    }

    #[test]
    fn test_reload_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("top_250_movies.csv");
        let mut conn = Connection::open_in_memory().unwrap();

        std::fs::write(&csv, "Title,Year,Rating\nA,1999,8.0\nB,2000,7.5\n").unwrap();
        load_csv(&mut conn, &csv, "top_250_movies").unwrap();
        std::fs::write(&csv, "Title,Year,Rating\nC,2001,9.0\n").unwrap();
        load_csv(&mut conn, &csv, "top_250_movies").unwrap();

        let rows = fetch_all(&conn, "top_250_movies").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Title"], "C");
    }

    #[test]
    fn test_load_all_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("top_250_movies.csv"),
            "Title,Year,Rating\nA,1999,8.0\n",
        )
        .unwrap();
        let mut conn = Connection::open_in_memory().unwrap();

        let outcomes = load_all(&mut conn, dir.path());
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], ("top_250_movies", Ok(1))));
        assert!(outcomes[1].1.is_err());
        assert!(outcomes[2].1.is_err());
    }

    #[test]
    fn test_fetch_rejects_unknown_tables() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            fetch_all(&conn, "sqlite_master"),
            Err(ScrapeError::UnknownTable(_))
        ));
    }
}
