//! CSV persistence for the pipeline tables.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Writes `rows` as a headed CSV table, replacing any existing file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;

    for row in rows {
        writer.serialize(row)
            .with_context(|| format!("Failed to write row to {:?}", path))?;
    }
    writer.flush()?;

    info!(rows = rows.len(), path = ?path, "Wrote table");
    Ok(())
}

pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path))?;

    reader.deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("Failed to parse CSV file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CentroidRecord, NeighborhoodSummary, NodeRecord};
    use std::fs;

    #[test]
    fn nulls_are_written_as_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neighborhood_data");

        let rows = vec![NeighborhoodSummary {
            neighborhood: "Carmel".to_string(),
            share_pct: None,
            diversity: 4,
            total_businesses: Some(6),
            total_food_businesses: None,
        }];
        write_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "SchName,share_%,diversity,total_businesses,total_food_businesses");
        assert_eq!(lines[1], "Carmel,,4,6,");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neighborhood_geopoints");
        let first = vec![
            CentroidRecord { neighborhood: Some("A".into()), longitude: 35.0, latitude: 32.8 },
            CentroidRecord { neighborhood: Some("B".into()), longitude: 35.1, latitude: 32.7 },
        ];
        write_table(&path, &first).unwrap();
        write_table(&path, &first[..1]).unwrap();

        let back: Vec<CentroidRecord> = read_table(&path).unwrap();
        assert_eq!(back, first[..1].to_vec());
    }

    #[test]
    fn empty_neighborhood_reads_back_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_dataset.csv");
        fs::write(
            &path,
            "SchName,name,subcategory,latitude,longitude,is_business,is_food\n\
             ,Kiosk,kiosk,32.8,35.0,True,False\n",
        )
        .unwrap();

        let rows: Vec<NodeRecord> = read_table(&path).unwrap();
        assert_eq!(rows[0].neighborhood, None);
        assert_eq!(rows[0].name.as_deref(), Some("Kiosk"));
        assert!(rows[0].is_business);
    }

    #[test]
    fn booleans_are_capitalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_dataset.csv");
        let rows = vec![NodeRecord {
            neighborhood: Some("Hadar".into()),
            name: None,
            subcategory: "vending_machine".into(),
            latitude: 32.8,
            longitude: 35.0,
            is_business: false,
            is_food: true,
        }];
        write_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1), Some("Hadar,,vending_machine,32.8,35.0,False,True"));

        let back: Vec<NodeRecord> = read_table(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn unknown_boolean_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_dataset.csv");
        fs::write(
            &path,
            "SchName,name,subcategory,latitude,longitude,is_business,is_food\n\
             Hadar,Kiosk,kiosk,32.8,35.0,yes,False\n",
        )
        .unwrap();
        let result: Result<Vec<NodeRecord>> = read_table(&path);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result: Result<Vec<CentroidRecord>> = read_table(Path::new("/nonexistent/neighborhood_geopoints"));
        assert!(result.is_err());
    }
}
