use std::collections::HashMap;

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::SheetError;

pub const SAMPLE_COLUMN: &str = "Sample";
pub const GENUS_COLUMN: &str = "Genus";
pub const SPECIES_COLUMN: &str = "Species";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub sample: String,
    /// Lower-cased; `None` when the cell is empty.
    pub genus: Option<String>,
    pub species: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataTable {
    records: HashMap<String, MetadataRecord>,
}

struct Columns {
    sample: usize,
    genus: usize,
    species: usize,
}

impl MetadataTable {
    pub fn load(path: &Utf8Path) -> Result<Self, SheetError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path.as_std_path())
            .map_err(|_| SheetError::MetadataRead(path.to_path_buf()))?;

        let headers = reader
            .headers()
            .map_err(|err| parse_error(path, err))?
            .clone();
        let columns = locate_columns(path, &headers)?;

        let mut records = HashMap::new();
        for row in reader.records() {
            let row = row.map_err(|err| parse_error(path, err))?;
            let sample = cell(&row, columns.sample).unwrap_or_default();
            if sample.is_empty() {
                warn!(%path, "skipping metadata row with empty sample id");
                continue;
            }
            let record = MetadataRecord {
                sample: sample.to_string(),
                genus: cell(&row, columns.genus).map(str::to_lowercase),
                species: cell(&row, columns.species).map(str::to_string),
            };
            if records.insert(record.sample.clone(), record).is_some() {
                warn!(%path, sample, "sample listed more than once in metadata, keeping the last row");
            }
        }
        debug!(%path, rows = records.len(), "loaded metadata table");

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, sample: &str) -> Option<&MetadataRecord> {
        self.records.get(sample)
    }

    pub fn genus_for(&self, sample: &str) -> Option<&str> {
        self.records
            .get(sample)
            .and_then(|record| record.genus.as_deref())
    }
}

fn locate_columns(path: &Utf8Path, headers: &StringRecord) -> Result<Columns, SheetError> {
    let position = |name: &str| {
        headers.iter().position(|header| {
            header
                .trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(name)
        })
    };
    let sample = position(SAMPLE_COLUMN);
    let genus = position(GENUS_COLUMN);
    let species = position(SPECIES_COLUMN);

    match (sample, genus, species) {
        (Some(sample), Some(genus), Some(species)) => Ok(Columns {
            sample,
            genus,
            species,
        }),
        _ => {
            let missing = [
                (SAMPLE_COLUMN, sample),
                (GENUS_COLUMN, genus),
                (SPECIES_COLUMN, species),
            ]
            .into_iter()
            .filter(|(_, found)| found.is_none())
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join(", ");
            Err(SheetError::MetadataColumns {
                path: path.to_path_buf(),
                missing,
            })
        }
    }
}

fn cell(row: &StringRecord, index: usize) -> Option<&str> {
    row.get(index).filter(|value| !value.is_empty())
}

fn parse_error(path: &Utf8Path, err: csv::Error) -> SheetError {
    SheetError::MetadataParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
