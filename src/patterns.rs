//! Read-file naming conventions.
//!
//! Each convention is a [`ReadPattern`] descriptor. Descriptors are compiled
//! once and tried in order; the first one that matches a file name decides the
//! sample identifier and the read slot.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ReadSlot;

pub const BASE_EXTENSIONS: &[&str] = &["fastq", "fq"];
pub const COMPRESSION_SUFFIXES: &[&str] = &["gz"];

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub text: &'static str,
    pub required: bool,
}

impl Token {
    const fn required(text: &'static str) -> Self {
        Self {
            text,
            required: true,
        }
    }

    const fn optional(text: &'static str) -> Self {
        Self {
            text,
            required: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReadPattern {
    pub name: &'static str,
    /// Illumina `_S<n>` sample-number token between the identifier and the designator.
    pub sample_number: bool,
    /// Literal text preceding the read digit, e.g. `_R` in `_R1`.
    pub designator: &'static str,
    /// Tokens between the read digit and the extension, matched in order.
    pub trailing: &'static [Token],
}

pub const READ_PATTERNS: &[ReadPattern] = &[
    ReadPattern {
        name: "illumina",
        sample_number: true,
        designator: "_R",
        trailing: &[Token::required("_001"), Token::optional("_filt")],
    },
    ReadPattern {
        name: "r-designator",
        sample_number: false,
        designator: "_R",
        trailing: &[Token::optional("_001"), Token::optional("_filt")],
    },
    ReadPattern {
        name: "bare-digit",
        sample_number: false,
        designator: "_",
        trailing: &[Token::optional("_filt")],
    },
];

impl ReadPattern {
    fn to_regex(&self) -> String {
        let mut source = String::from(r"^(?P<id>.+?)");
        if self.sample_number {
            source.push_str(r"_S\d+");
        }
        source.push_str(&regex::escape(self.designator));
        source.push_str("(?P<read>[12])");
        for token in self.trailing {
            let escaped = regex::escape(token.text);
            if token.required {
                source.push_str(&escaped);
            } else {
                source.push_str(&format!("(?:{escaped})?"));
            }
        }
        source.push_str(&format!(
            r"\.(?:{})(?:\.(?:{}))?$",
            BASE_EXTENSIONS.join("|"),
            COMPRESSION_SUFFIXES.join("|")
        ));
        source
    }
}

struct CompiledPattern {
    pattern: &'static ReadPattern,
    regex: Regex,
}

static COMPILED: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    READ_PATTERNS
        .iter()
        .map(|pattern| CompiledPattern {
            pattern,
            regex: Regex::new(&pattern.to_regex()).expect("read pattern must compile"),
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMatch {
    pub sample: String,
    pub slot: ReadSlot,
    pub pattern: &'static str,
}

pub fn match_file_name(name: &str) -> Option<ReadMatch> {
    COMPILED.iter().find_map(|compiled| {
        let captures = compiled.regex.captures(name)?;
        let slot = ReadSlot::from_designator(captures.name("read")?.as_str())?;
        let sample = captures.name("id")?.as_str().to_string();
        Some(ReadMatch {
            sample,
            slot,
            pattern: compiled.pattern.name,
        })
    })
}

/// File-name endings accepted by the plain conventions, for error messages.
pub fn expected_suffixes() -> Vec<String> {
    let mut suffixes = Vec::new();
    for pattern in READ_PATTERNS.iter().filter(|pattern| !pattern.sample_number) {
        for digit in ["1", "2"] {
            for ext in BASE_EXTENSIONS {
                let plain = format!("{}{digit}.{ext}", pattern.designator);
                for compression in COMPRESSION_SUFFIXES {
                    suffixes.push(format!("{plain}.{compression}"));
                }
                suffixes.push(plain);
            }
        }
    }
    suffixes.dedup();
    suffixes
}
