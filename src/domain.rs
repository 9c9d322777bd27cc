use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadSlot {
    R1,
    R2,
}

impl ReadSlot {
    pub fn from_designator(digit: &str) -> Option<Self> {
        match digit {
            "1" => Some(ReadSlot::R1),
            "2" => Some(ReadSlot::R2),
            _ => None,
        }
    }
}

impl fmt::Display for ReadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadSlot::R1 => write!(f, "R1"),
            ReadSlot::R2 => write!(f, "R2"),
        }
    }
}

/// Forward and reverse read files of one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPair {
    #[serde(rename = "R1")]
    pub r1: Utf8PathBuf,
    #[serde(rename = "R2")]
    pub r2: Utf8PathBuf,
}

/// Samples found on disk, before any genus has been attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredManifest {
    samples: BTreeMap<String, ReadPair>,
}

impl DiscoveredManifest {
    pub(crate) fn from_pairs(samples: BTreeMap<String, ReadPair>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, sample: &str) -> Option<&ReadPair> {
        self.samples.get(sample)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReadPair)> {
        self.samples.iter().map(|(id, pair)| (id.as_str(), pair))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEntry {
    #[serde(flatten)]
    pub reads: ReadPair,
    pub genus: Option<String>,
}

/// Fully resolved sample sheet. Only produced by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleManifest {
    samples: BTreeMap<String, SampleEntry>,
}

impl SampleManifest {
    pub(crate) fn from_entries(samples: BTreeMap<String, SampleEntry>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, sample: &str) -> Option<&SampleEntry> {
        self.samples.get(sample)
    }

    pub fn genus_of(&self, sample: &str) -> Option<&str> {
        self.samples
            .get(sample)
            .and_then(|entry| entry.genus.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleEntry)> {
        self.samples.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

static SUPPORTED_GENERA: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    [
        "acinetobacter",
        "bacillus",
        "bordetella",
        "brucella",
        "burkholderia",
        "campylobacter",
        "citrobacter",
        "clostridioides",
        "clostridium",
        "corynebacterium",
        "enterobacter",
        "enterococcus",
        "escherichia",
        "haemophilus",
        "helicobacter",
        "klebsiella",
        "legionella",
        "listeria",
        "moraxella",
        "mycobacterium",
        "neisseria",
        "proteus",
        "pseudomonas",
        "salmonella",
        "serratia",
        "shigella",
        "staphylococcus",
        "streptococcus",
        "vibrio",
        "yersinia",
    ]
    .into_iter()
    .collect()
});

pub struct GenusRegistry;

impl GenusRegistry {
    pub fn contains(name: &str) -> bool {
        SUPPORTED_GENERA.contains(name.trim().to_lowercase().as_str())
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SUPPORTED_GENERA.iter().copied()
    }
}

/// A user supplied genus that passed registry validation. Case is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Genus(String);

impl Genus {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Genus {
    type Err = SheetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if !GenusRegistry::contains(trimmed) {
            return Err(SheetError::UnsupportedGenus(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}
