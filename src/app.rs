use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::discovery::{DiscoveryOptions, discover_samples};
use crate::domain::{Genus, SampleManifest};
use crate::error::SheetError;
use crate::metadata::MetadataTable;
use crate::resolver::resolve_manifest;

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub input_dir: Utf8PathBuf,
    pub recursive: bool,
    pub genus: Option<String>,
    pub metadata: Option<Utf8PathBuf>,
}

/// The resolved sample sheet together with the inputs it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct SampleSheet {
    pub created_at: String,
    pub input_dir: Utf8PathBuf,
    pub metadata: Option<Utf8PathBuf>,
    pub genus_override: Option<String>,
    pub samples: SampleManifest,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub fn build_sample_sheet(
    options: &BuildOptions,
    sink: &dyn ProgressSink,
) -> Result<SampleSheet, SheetError> {
    let started = Instant::now();

    let genus_override = options
        .genus
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(str::parse::<Genus>)
        .transpose()?;

    sink.event(ProgressEvent {
        message: format!("phase=Discover; scanning {}", options.input_dir),
        elapsed: None,
    });
    let discovered = discover_samples(
        &options.input_dir,
        &DiscoveryOptions {
            recursive: options.recursive,
        },
    )?;

    let metadata = match &options.metadata {
        Some(path) => {
            sink.event(ProgressEvent {
                message: format!("phase=Metadata; reading {path}"),
                elapsed: Some(started.elapsed()),
            });
            Some(MetadataTable::load(path)?)
        }
        None => None,
    };

    let samples = resolve_manifest(&discovered, genus_override.as_ref(), metadata.as_ref());
    sink.event(ProgressEvent {
        message: format!("phase=Resolve; {} samples", samples.len()),
        elapsed: Some(started.elapsed()),
    });

    Ok(SampleSheet {
        created_at: chrono::Utc::now().to_rfc3339(),
        input_dir: options.input_dir.clone(),
        metadata: options.metadata.clone(),
        genus_override: genus_override.map(|genus| genus.to_string()),
        samples,
    })
}
