use camino::Utf8PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SheetError {
    #[error("input directory does not exist or is not a directory: {0}")]
    InputDirMissing(Utf8PathBuf),

    #[error(
        "input directory ({dir}) does not contain files that end with one of the expected extensions ({expected})"
    )]
    #[diagnostic(help("paired files are expected to look like <sample>_R1.fastq.gz / <sample>_R2.fastq.gz"))]
    NoMatchingFiles { dir: Utf8PathBuf, expected: String },

    #[error("sample {sample} is missing its {missing} read file (found only {found})")]
    IncompletePair {
        sample: String,
        missing: String,
        found: Utf8PathBuf,
    },

    #[error("sample {sample} has more than one {slot} read file: {first} and {second}")]
    DuplicateRead {
        sample: String,
        slot: String,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },

    #[error("sample {sample} pairs read files named by different conventions: {r1} and {r2}")]
    MixedNaming {
        sample: String,
        r1: Utf8PathBuf,
        r2: Utf8PathBuf,
    },

    #[error(
        "the genus supplied ({0}) is not supported. You can leave the \"genus\" empty if you are not sure which organism your samples belong to"
    )]
    #[diagnostic(help("run `juno-samplesheet genera` to list supported genera"))]
    UnsupportedGenus(String),

    #[error("metadata table {path} is missing required column(s): {missing}")]
    MetadataColumns { path: Utf8PathBuf, missing: String },

    #[error("failed to read metadata table at {0}")]
    MetadataRead(Utf8PathBuf),

    #[error("failed to parse metadata table {path}: {message}")]
    MetadataParse { path: Utf8PathBuf, message: String },

    #[error("no input directory given (use --input or set input_dir in the config file)")]
    NoInputDir,

    #[error("failed to read config file at {0}")]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
