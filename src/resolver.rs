use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{DiscoveredManifest, Genus, SampleEntry, SampleManifest};
use crate::metadata::MetadataTable;

/// Attaches a genus to every discovered sample.
///
/// Per sample, a genus from the metadata table wins over the override, and the
/// override wins over nothing. Metadata rows for samples that were not found
/// on disk are ignored. The override must already be validated, which is why
/// it arrives as a [`Genus`]; metadata values are taken as curated.
pub fn resolve_manifest(
    discovered: &DiscoveredManifest,
    genus_override: Option<&Genus>,
    metadata: Option<&MetadataTable>,
) -> SampleManifest {
    let mut entries = BTreeMap::new();
    for (sample, reads) in discovered.iter() {
        let from_metadata = metadata.and_then(|table| table.genus_for(sample));
        let genus = match (from_metadata, genus_override) {
            (Some(genus), _) => Some(genus.to_string()),
            (None, Some(genus)) => Some(genus.as_str().to_string()),
            (None, None) => None,
        };
        debug!(sample, genus = genus.as_deref().unwrap_or("-"), "resolved genus");
        entries.insert(
            sample.to_string(),
            SampleEntry {
                reads: reads.clone(),
                genus,
            },
        );
    }
    SampleManifest::from_entries(entries)
}
