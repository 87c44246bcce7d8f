use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resume_parser::intake::collect_documents;
use resume_parser::{output, query};
use resume_parser::{process_batch_parallel, BatchSummary, ParserConfig, ResumeCollection, ResumeRecordBuilder};

/// Resume Parser - pull names, contacts, experience, skills and education out of resumes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse every PDF/DOC/DOCX under a directory and write a CSV
    Parse {
        /// Directory containing resumes
        #[arg(default_value = "./resumes")]
        dir: PathBuf,

        /// Path of the CSV to write
        #[arg(short, long, default_value = "resume_data.csv")]
        output: PathBuf,

        #[command(flatten)]
        opts: ParseOpts,
    },

    /// Parse a directory of resumes and answer a question about them
    Query {
        /// Directory containing resumes
        dir: PathBuf,

        /// e.g. "experience greater than 5", "average experience", "python skill"
        question: String,

        #[command(flatten)]
        opts: ParseOpts,
    },
}

#[derive(clap::Args, Debug)]
struct ParseOpts {
    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// TOML file overriding keyword lists and patterns
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { dir, output, opts } => {
            let (collection, summary) = parse_dir(&dir, &opts)?;
            output::write_csv(&output, collection.records())?;

            for (file, reason) in &summary.skipped {
                println!("Skipped {}: {}", file, reason);
            }
            println!("Total files processed: {}", summary.parsed);
            println!("Total files skipped: {}", summary.skipped_count());
            println!("Results have been written to {}", output.display());
        }
        Command::Query { dir, question, opts } => {
            let (collection, _) = parse_dir(&dir, &opts)?;
            println!("{}", query::answer(&collection, &question).text());
        }
    }

    Ok(())
}

fn parse_dir(dir: &Path, opts: &ParseOpts) -> anyhow::Result<(ResumeCollection, BatchSummary)> {
    let config = match &opts.config {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };
    let builder = Arc::new(ResumeRecordBuilder::from_config(&config)?);

    let intake = collect_documents(dir);
    let mut collection = ResumeCollection::new();
    let mut summary = process_batch_parallel(builder, intake.documents, opts.workers, &mut collection);
    for (file, reason) in intake.unreadable {
        summary.record_skip(file, reason);
    }

    Ok((collection, summary))
}
