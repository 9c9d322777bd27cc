use std::fs;

use assert_matches::assert_matches;
use camino::{Utf8Path, Utf8PathBuf};

use juno_samplesheet::app::{BuildOptions, SampleSheet, build_sample_sheet};
use juno_samplesheet::error::SheetError;
use juno_samplesheet::output::JsonOutput;

const READ_FILES: &[&str] = &[
    "sample1_R1.fastq",
    "sample1_R2.fastq.gz",
    "sample2_R1_filt.fq",
    "sample2_R2_filt.fq.gz",
    "1234_R1.fastq.gz",
    "1234_R2.fastq.gz",
];

struct Fixture {
    _temp: tempfile::TempDir,
    samples: Utf8PathBuf,
    empty: Utf8PathBuf,
    metadata: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let samples = root.join("fake_dir_wsamples");
        let empty = root.join("fake_empty_dir");
        fs::create_dir_all(&samples).unwrap();
        fs::create_dir_all(&empty).unwrap();
        for name in READ_FILES {
            fs::write(samples.join(name), b"").unwrap();
        }
        let metadata = samples.join("fake_metadata.csv");
        fs::write(
            &metadata,
            "Sample,Genus,Species\nsample1,Salmonella,enterica\nsample2,Escherichia,coli\n1234,campylobacter,jejuni\n",
        )
        .unwrap();
        Self {
            _temp: temp,
            samples,
            empty,
            metadata,
        }
    }

    fn add_missing_sample(&self) {
        fs::write(self.samples.join("missingsamp_1.fastq"), b"").unwrap();
        fs::write(self.samples.join("missingsamp_2.fastq"), b"").unwrap();
    }

    fn build(&self, genus: Option<&str>, metadata: bool) -> Result<SampleSheet, SheetError> {
        let options = BuildOptions {
            input_dir: self.samples.clone(),
            recursive: false,
            genus: genus.map(str::to_string),
            metadata: metadata.then(|| self.metadata.clone()),
        };
        build_sample_sheet(&options, &JsonOutput)
    }
}

fn genera(sheet: &SampleSheet) -> Vec<(String, Option<String>)> {
    sheet
        .samples
        .iter()
        .map(|(id, entry)| (id.to_string(), entry.genus.clone()))
        .collect()
}

fn pair(sheet: &SampleSheet, dir: &Utf8Path, id: &str) -> (Utf8PathBuf, Utf8PathBuf) {
    let entry = sheet.samples.get(id).unwrap();
    assert!(entry.reads.r1.starts_with(dir));
    (entry.reads.r1.clone(), entry.reads.r2.clone())
}

#[test]
fn fails_with_empty_dir() {
    let fixture = Fixture::new();
    let options = BuildOptions {
        input_dir: fixture.empty.clone(),
        ..BuildOptions::default()
    };
    let err = build_sample_sheet(&options, &JsonOutput).unwrap_err();
    assert_matches!(err, SheetError::NoMatchingFiles { .. });
    assert!(
        err.to_string()
            .contains("does not contain files that end with one of the expected extensions")
    );
    assert!(err.to_string().contains("_R1.fastq.gz"));
}

#[test]
fn discovers_pairs_without_genus() {
    let fixture = Fixture::new();
    let sheet = fixture.build(None, false).unwrap();

    assert_eq!(sheet.samples.len(), 3);
    assert_eq!(
        pair(&sheet, &fixture.samples, "sample1"),
        (
            fixture.samples.join("sample1_R1.fastq"),
            fixture.samples.join("sample1_R2.fastq.gz")
        )
    );
    assert_eq!(
        pair(&sheet, &fixture.samples, "sample2"),
        (
            fixture.samples.join("sample2_R1_filt.fq"),
            fixture.samples.join("sample2_R2_filt.fq.gz")
        )
    );
    assert_eq!(
        pair(&sheet, &fixture.samples, "1234"),
        (
            fixture.samples.join("1234_R1.fastq.gz"),
            fixture.samples.join("1234_R2.fastq.gz")
        )
    );
    assert!(sheet.samples.iter().all(|(_, entry)| entry.genus.is_none()));
}

#[test]
fn override_genus_applies_to_every_sample() {
    let fixture = Fixture::new();
    let sheet = fixture.build(Some("salmonella"), false).unwrap();

    assert_eq!(sheet.genus_override.as_deref(), Some("salmonella"));
    assert!(
        sheet
            .samples
            .iter()
            .all(|(_, entry)| entry.genus.as_deref() == Some("salmonella"))
    );
}

#[test]
fn metadata_supplies_genus() {
    let fixture = Fixture::new();
    let sheet = fixture.build(None, true).unwrap();

    assert_eq!(
        genera(&sheet),
        vec![
            ("1234".to_string(), Some("campylobacter".to_string())),
            ("sample1".to_string(), Some("salmonella".to_string())),
            ("sample2".to_string(), Some("escherichia".to_string())),
        ]
    );
}

#[test]
fn metadata_overwrites_genus_unless_sample_absent() {
    let fixture = Fixture::new();
    fixture.add_missing_sample();
    let sheet = fixture.build(Some("salmonella"), true).unwrap();

    assert_eq!(sheet.samples.genus_of("sample2"), Some("escherichia"));
    assert_eq!(sheet.samples.genus_of("1234"), Some("campylobacter"));
    assert_eq!(sheet.samples.genus_of("missingsamp"), Some("salmonella"));
    assert_eq!(
        pair(&sheet, &fixture.samples, "missingsamp"),
        (
            fixture.samples.join("missingsamp_1.fastq"),
            fixture.samples.join("missingsamp_2.fastq")
        )
    );
}

#[test]
fn sample_absent_from_metadata_has_no_genus() {
    let fixture = Fixture::new();
    fixture.add_missing_sample();
    let sheet = fixture.build(None, true).unwrap();

    assert_eq!(sheet.samples.len(), 4);
    assert_eq!(sheet.samples.genus_of("sample1"), Some("salmonella"));
    assert_eq!(sheet.samples.genus_of("missingsamp"), None);
}

#[test]
fn metadata_rows_without_files_are_ignored() {
    let fixture = Fixture::new();
    fs::write(
        &fixture.metadata,
        "Sample,Genus,Species\nsample1,Salmonella,enterica\nghost,Listeria,monocytogenes\n",
    )
    .unwrap();
    let sheet = fixture.build(None, true).unwrap();

    assert!(sheet.samples.get("ghost").is_none());
    assert_eq!(sheet.samples.len(), 3);
}

#[test]
fn unsupported_genus_fails_regardless_of_metadata() {
    let fixture = Fixture::new();
    for with_metadata in [false, true] {
        let err = fixture.build(Some("fakegenus"), with_metadata).unwrap_err();
        assert_matches!(err, SheetError::UnsupportedGenus(_));
        assert!(
            err.to_string()
                .contains("not supported. You can leave the \"genus\" empty")
        );
    }
}

#[test]
fn repeated_builds_assign_identical_genera() {
    let fixture = Fixture::new();
    fixture.add_missing_sample();
    let first = fixture.build(Some("Salmonella"), true).unwrap();
    let second = fixture.build(Some("Salmonella"), true).unwrap();

    assert_eq!(first.samples, second.samples);
    assert_eq!(
        serde_json::to_vec(&first.samples).unwrap(),
        serde_json::to_vec(&second.samples).unwrap()
    );
}

#[test]
fn malformed_metadata_is_rejected_before_resolution() {
    let fixture = Fixture::new();
    fs::write(&fixture.metadata, "Sample,Species\nsample1,enterica\n").unwrap();
    let err = fixture.build(None, true).unwrap_err();
    assert_matches!(err, SheetError::MetadataColumns { .. });
}
