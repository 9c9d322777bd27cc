use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::domain::{DiscoveredManifest, ReadPair, ReadSlot};
use crate::error::SheetError;
use crate::patterns::{expected_suffixes, match_file_name};

#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    pub recursive: bool,
}

#[derive(Debug)]
struct FoundRead {
    path: Utf8PathBuf,
    pattern: &'static str,
}

#[derive(Debug, Default)]
struct PartialPair {
    r1: Option<FoundRead>,
    r2: Option<FoundRead>,
}

impl PartialPair {
    fn slot_mut(&mut self, slot: ReadSlot) -> &mut Option<FoundRead> {
        match slot {
            ReadSlot::R1 => &mut self.r1,
            ReadSlot::R2 => &mut self.r2,
        }
    }
}

/// Hidden entries below the root; pruning a hidden directory skips its contents.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Scans `input_dir` for paired read files and groups them per sample.
///
/// Symlinked files are followed. Files that match no naming convention are
/// skipped. A sample with only one of its two read files, or whose mates use
/// different naming conventions, aborts the scan.
pub fn discover_samples(
    input_dir: &Utf8Path,
    options: &DiscoveryOptions,
) -> Result<DiscoveredManifest, SheetError> {
    if !input_dir.as_std_path().is_dir() {
        return Err(SheetError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(input_dir.as_std_path())
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut partial: BTreeMap<String, PartialPair> = BTreeMap::new();
    for entry in walker.into_iter().filter_entry(|entry| !is_hidden(entry)) {
        let entry = entry.map_err(|err| SheetError::Filesystem(err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        let Some(found) = match_file_name(name) else {
            debug!(file = name, "ignoring file without a read-file suffix");
            continue;
        };
        let relative = entry
            .path()
            .strip_prefix(input_dir.as_std_path())
            .map_err(|err| SheetError::Filesystem(err.to_string()))?;
        let relative = Utf8Path::from_path(relative)
            .ok_or_else(|| SheetError::Filesystem("invalid read file path".to_string()))?;
        let path = input_dir.join(relative);
        debug!(sample = %found.sample, slot = %found.slot, pattern = found.pattern, %path, "matched read file");

        let slot = partial
            .entry(found.sample.clone())
            .or_default()
            .slot_mut(found.slot);
        if let Some(first) = slot.as_ref() {
            return Err(SheetError::DuplicateRead {
                sample: found.sample,
                slot: found.slot.to_string(),
                first: first.path.clone(),
                second: path,
            });
        }
        *slot = Some(FoundRead {
            path,
            pattern: found.pattern,
        });
    }

    if partial.is_empty() {
        return Err(SheetError::NoMatchingFiles {
            dir: input_dir.to_path_buf(),
            expected: expected_suffixes().join(", "),
        });
    }

    let mut samples = BTreeMap::new();
    for (sample, pair) in partial {
        let reads = match pair {
            PartialPair {
                r1: Some(r1),
                r2: Some(r2),
            } => {
                if r1.pattern != r2.pattern {
                    return Err(SheetError::MixedNaming {
                        sample,
                        r1: r1.path,
                        r2: r2.path,
                    });
                }
                ReadPair {
                    r1: r1.path,
                    r2: r2.path,
                }
            }
            PartialPair {
                r1: Some(found),
                r2: None,
            } => return Err(incomplete(sample, ReadSlot::R2, found.path)),
            PartialPair {
                r1: None,
                r2: Some(found),
            } => return Err(incomplete(sample, ReadSlot::R1, found.path)),
            PartialPair { r1: None, r2: None } => continue,
        };
        samples.insert(sample, reads);
    }

    Ok(DiscoveredManifest::from_pairs(samples))
}

fn incomplete(sample: String, missing: ReadSlot, found: Utf8PathBuf) -> SheetError {
    SheetError::IncompletePair {
        sample,
        missing: missing.to_string(),
        found,
    }
}
