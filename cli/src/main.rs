//! sectionrank CLI - persona-driven section ranking tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sectionrank::{
    load_collection, load_layout, render, Approach, JudgeOptions, JsonFormat, LayoutClassifier,
    Method, Pipeline, SectionRank,
};

#[derive(Parser)]
#[command(name = "sectionrank")]
#[command(version)]
#[command(about = "Rank document sections against a persona and job-to-be-done", long_about = None)]
struct Cli {
    /// Input collection directory
    #[arg(value_name = "DIR")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a collection and write the output record
    Analyze {
        /// Input collection directory (query descriptor plus layout files)
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Show the sections detected in one layout file
    Sections {
        /// Layout file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Debug, Clone)]
struct RunArgs {
    /// Scoring and summarization family
    #[arg(long, value_enum, default_value = "nlp", env = "SECTIONRANK_APPROACH")]
    approach: ApproachArg,

    /// Scoring method for the nlp approach
    #[arg(long, value_enum, default_value = "auto", env = "SECTIONRANK_METHOD")]
    method: MethodArg,

    /// Judge model name
    #[arg(long, env = "SECTIONRANK_MODEL")]
    model: Option<String>,

    /// Judge executable
    #[arg(long, value_name = "PROGRAM")]
    judge_program: Option<String>,

    /// Number of top sections to keep
    #[arg(long, default_value = "5")]
    top_n: usize,

    /// Seconds allowed for one relevance rating
    #[arg(long, default_value = "10")]
    score_timeout: u64,

    /// Seconds allowed for one summary
    #[arg(long, default_value = "20")]
    summary_timeout: u64,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Disable parallel processing
    #[arg(long)]
    sequential: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ApproachArg {
    /// Keyword or embedding scoring with extractive summaries
    Nlp,
    /// Language-model judge for scoring and summaries
    Llm,
}

impl From<ApproachArg> for Approach {
    fn from(arg: ApproachArg) -> Self {
        match arg {
            ApproachArg::Nlp => Approach::Nlp,
            ApproachArg::Llm => Approach::Llm,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Embedding when a model is available, otherwise keyword
    Auto,
    /// Token overlap
    Keyword,
    /// Embedding similarity
    Embedding,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Auto => Method::Auto,
            MethodArg::Keyword => Method::Keyword,
            MethodArg::Embedding => Method::Embedding,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze { input, output, run }) => {
            cmd_analyze(&input, output.as_deref(), &run)
        }
        Some(Commands::Sections { input, json }) => cmd_sections(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&input, cli.output.as_deref(), &cli.run)
            } else {
                println!("{}", "Usage: sectionrank <DIR> [OUTPUT]".yellow());
                println!("       sectionrank --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_pipeline(run: &RunArgs) -> Pipeline {
    let mut judge = JudgeOptions::new()
        .with_score_timeout(Duration::from_secs(run.score_timeout))
        .with_summary_timeout(Duration::from_secs(run.summary_timeout));
    if let Some(ref model) = run.model {
        judge = judge.with_model(model);
    }
    if let Some(ref program) = run.judge_program {
        judge = judge.with_program(program);
    }

    let mut builder = SectionRank::new()
        .with_method(run.method.into())
        .with_top_n(run.top_n)
        .with_judge_options(judge);
    if Approach::from(run.approach) == Approach::Llm {
        builder = builder.llm();
    }
    if run.sequential {
        builder = builder.sequential();
    }
    builder.build()
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    run: &RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let collection_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let output_dir = output.unwrap_or(input).to_path_buf();
    log::debug!("Writing output to {}", output_dir.display());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Loading collection...");
    let collection = load_collection(input)?;
    pb.inc(1);

    pb.set_message("Ranking sections...");
    let pipeline = build_pipeline(run);
    let report = pipeline.run(&collection.documents, &collection.query)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    let format = if run.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let path = output_dir.join(report.output_file_name());
    render::write_json(&report.to_output(), &path, format)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!();
    println!("{} Collection: {}", "[INFO]".cyan(), collection_name);
    println!(
        "{} Analyzed {} documents, {} sections detected",
        "[INFO]".cyan(),
        report.documents.len(),
        report.total_sections
    );
    println!(
        "{} Approach: {}, method: {}",
        "[INFO]".cyan(),
        report.approach,
        report.method
    );
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_sections(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_layout(input)?;
    let sections = LayoutClassifier::default().classify(&layout.spans);

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    println!("{}", "Detected Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Document".bold(), layout.id);
    println!("{}: {}", "Spans".bold(), layout.spans.len());
    println!("{}: {}", "Pages".bold(), layout.page_count());
    println!();

    for section in &sections {
        let indent = "  ".repeat(usize::from(section.level.depth().saturating_sub(1)));
        println!(
            "{}{} {} {}",
            indent,
            section.level.to_string().dimmed(),
            section.title,
            format!("(p. {})", section.page_number).dimmed()
        );
    }

    println!("\n{} {} sections", "Total:".green().bold(), sections.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "sectionrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Persona-driven section ranking tool");
    println!();
    println!("License: MIT");
}
