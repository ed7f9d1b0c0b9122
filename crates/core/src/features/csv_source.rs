//! CSV-backed feature source.
//!
//! Reads the offline track-features dataset: one row per Spotify track id
//! with (at least) `id`, `energy`, `valence`, `danceability` and `loudness`
//! columns. Other columns are ignored.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{FeatureSource, FeatureTable, FeatureTableError, FeatureVector};

const REQUIRED_COLUMNS: [&str; 5] = ["id", "energy", "valence", "danceability", "loudness"];

#[derive(Debug, Deserialize)]
struct FeatureRow {
    id: String,
    energy: f64,
    valence: f64,
    danceability: f64,
    loudness: f64,
}

/// Loads the feature table from a CSV file on every call.
#[derive(Debug, Clone)]
pub struct CsvFeatureSource {
    path: PathBuf,
}

impl CsvFeatureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeatureSource for CsvFeatureSource {
    async fn load_feature_table(&self) -> Result<FeatureTable, FeatureTableError> {
        let path = self.path.clone();
        if !path.exists() {
            return Err(FeatureTableError::NotFound(path.display().to_string()));
        }

        // The dataset is large; parse it off the async runtime.
        let (table, skipped) = tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)
                .map_err(|e| FeatureTableError::ReadError(e.to_string()))?;
            read_feature_table(file)
        })
        .await
        .map_err(|e| FeatureTableError::ReadError(e.to_string()))??;

        info!(
            path = %self.path.display(),
            tracks = table.len(),
            skipped,
            "Loaded feature table"
        );
        Ok(table)
    }
}

/// Parse a feature table from CSV. Returns the table and the number of rows
/// skipped because a value was missing, malformed or non-finite.
pub(crate) fn read_feature_table<R: Read>(
    reader: R,
) -> Result<(FeatureTable, usize), FeatureTableError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| FeatureTableError::ReadError(e.to_string()))?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(FeatureTableError::MissingColumn(column));
        }
    }

    let mut table = FeatureTable::new();
    let mut skipped = 0;

    for (line, row) in reader.deserialize::<FeatureRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                return Err(FeatureTableError::ReadError(e.to_string()));
            }
            Err(e) => {
                debug!(line = line + 2, error = %e, "Skipping malformed feature row");
                skipped += 1;
                continue;
            }
        };

        let features = FeatureVector::new(row.energy, row.valence, row.danceability, row.loudness);
        if row.id.is_empty() || !features.is_finite() {
            debug!(line = line + 2, id = %row.id, "Skipping unusable feature row");
            skipped += 1;
            continue;
        }

        table.insert(row.id, features);
    }

    Ok((table, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
id,name,artists,danceability,energy,loudness,valence
a1,\"Song, With Comma\",\"['X', 'Y']\",0.7,0.8,-5.0,0.6
b2,Quiet,['Z'],0.3,0.2,-12.0,0.9
c3,Broken,['Z'],0.3,high,-12.0,0.9
d4,Nan,['Z'],0.3,NaN,-12.0,0.9
";

    #[test]
    fn test_reads_required_columns_ignoring_others() {
        let (table, skipped) = read_feature_table(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(skipped, 2);
        assert_eq!(
            table.get("a1"),
            Some(&FeatureVector::new(0.8, 0.6, 0.7, -5.0))
        );
        assert_eq!(
            table.get("b2"),
            Some(&FeatureVector::new(0.2, 0.9, 0.3, -12.0))
        );
        assert!(table.get("c3").is_none());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "id,energy,valence,danceability\na1,0.1,0.2,0.3\n";
        let result = read_feature_table(csv.as_bytes());
        assert!(matches!(
            result,
            Err(FeatureTableError::MissingColumn("loudness"))
        ));
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let csv = "id,energy,valence,danceability,loudness\n";
        let (table, skipped) = read_feature_table(csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(skipped, 0);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let source = CsvFeatureSource::new(file.path());
        let table = source.load_feature_table().await.unwrap();
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = CsvFeatureSource::new("/nonexistent/features.csv");
        let result = source.load_feature_table().await;
        assert!(matches!(result, Err(FeatureTableError::NotFound(_))));
    }
}
