use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use serde::Serialize;
use tracing::info;

use crate::app::{ProgressEvent, ProgressSink, SampleSheet};
use crate::error::SheetError;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_sheet(sheet: &SampleSheet) -> io::Result<()> {
        Self::print_json(sheet)
    }

    /// Writes the sheet next to its final location first, then moves it in place.
    pub fn write_sheet(path: &Utf8Path, sheet: &SampleSheet) -> Result<(), SheetError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| SheetError::Filesystem(err.to_string()))?;
        let content = serde_json::to_vec_pretty(sheet)
            .map_err(|err| SheetError::Filesystem(err.to_string()))?;
        let mut temp = tempfile::Builder::new()
            .prefix("juno-samplesheet")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| SheetError::Filesystem(err.to_string()))?;
        temp.write_all(&content)
            .and_then(|_| temp.write_all(b"\n"))
            .map_err(|err| SheetError::Filesystem(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| SheetError::Filesystem(err.to_string()))?;
        Ok(())
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Forwards progress events to the tracing subscriber.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => info!(elapsed_ms = elapsed.as_millis() as u64, "{}", event.message),
            None => info!("{}", event.message),
        }
    }
}
