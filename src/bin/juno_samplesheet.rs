use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use juno_samplesheet::app::build_sample_sheet;
use juno_samplesheet::config::{ConfigLoader, Overrides};
use juno_samplesheet::domain::GenusRegistry;
use juno_samplesheet::error::SheetError;
use juno_samplesheet::output::{JsonOutput, LogProgress};

#[derive(Parser)]
#[command(name = "juno-samplesheet")]
#[command(about = "Build a validated sample sheet from a directory of paired-end reads")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Discover samples and resolve their genus")]
    Build(BuildArgs),
    #[command(about = "List supported genera")]
    Genera,
}

#[derive(Args)]
struct BuildArgs {
    #[arg(short, long)]
    input: Option<Utf8PathBuf>,

    #[arg(short, long)]
    metadata: Option<Utf8PathBuf>,

    #[arg(short, long)]
    genus: Option<String>,

    #[arg(long)]
    recursive: bool,

    #[arg(long)]
    config: Option<Utf8PathBuf>,

    #[arg(short, long)]
    output: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<SheetError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SheetError) -> u8 {
    match error {
        SheetError::InputDirMissing(_)
        | SheetError::NoMatchingFiles { .. }
        | SheetError::IncompletePair { .. }
        | SheetError::DuplicateRead { .. }
        | SheetError::MixedNaming { .. }
        | SheetError::NoInputDir
        | SheetError::UnsupportedGenus(_)
        | SheetError::MetadataColumns { .. } => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Genera => {
            for name in GenusRegistry::names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn run_build(args: BuildArgs) -> miette::Result<()> {
    let config = ConfigLoader::load(args.config.as_deref())?;
    let options = ConfigLoader::resolve_config(
        config,
        Overrides {
            input_dir: args.input,
            metadata: args.metadata,
            genus: args.genus,
            recursive: args.recursive,
        },
    )?;

    let sheet = build_sample_sheet(&options, &LogProgress)?;
    match args.output {
        Some(path) => {
            JsonOutput::write_sheet(&path, &sheet)?;
            eprintln!("wrote {} samples to {path}", sheet.samples.len());
        }
        None => JsonOutput::print_sheet(&sheet).into_diagnostic()?,
    }
    Ok(())
}
