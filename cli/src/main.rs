//! untoc CLI - document outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use untoc::input::read_document_file;
use untoc::{AnalysisOptions, HeadingLevel, JsonFormat, OutlineAnalyzer, OutlineResult};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "untoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer document titles and heading outlines from text fragments", long_about = None)]
struct Cli {
    /// Input fragment file, or a directory of fragment files
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file, or output directory when INPUT is a directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Analysis settings shared by all commands.
#[derive(clap::Args, Clone, Copy)]
struct Tuning {
    /// Header/footer zone as a fraction of page height
    #[arg(long, global = true, value_name = "RATIO")]
    zone_ratio: Option<f32>,

    /// Characters per page above which a document counts as text-heavy
    #[arg(long, global = true, value_name = "CHARS")]
    density_threshold: Option<f32>,

    /// Process batches on a single thread
    #[arg(long, global = true)]
    sequential: bool,
}

impl Tuning {
    fn options(self) -> AnalysisOptions {
        let mut options = AnalysisOptions::new();
        if let Some(ratio) = self.zone_ratio {
            options = options.with_zone_ratio(ratio);
        }
        if let Some(chars) = self.density_threshold {
            options = options.with_density_threshold(chars);
        }
        options.with_parallel(!self.sequential)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Infer outlines for every fragment file in a directory
    Batch {
        /// Directory of *.json fragment files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },

    /// Infer the outline of one fragment file
    Outline {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show how the outline of a fragment file was inferred
    Inspect {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of top-scoring candidates to list
        #[arg(long, default_value = "15")]
        top: usize,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.tuning.options();

    let result = match cli.command {
        Some(Commands::Batch { input, output }) => cmd_batch(&input, &output, options),
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact, options).map(|_| 0),
        Some(Commands::Inspect { input, top }) => cmd_inspect(&input, top, options).map(|_| 0),
        Some(Commands::Version) => {
            cmd_version();
            Ok(0)
        }
        None => match cli.input {
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| default_output_dir(&input));
                cmd_batch(&input, &output, options)
            }
            Some(input) => cmd_outline(&input, cli.output.as_deref(), false, options).map(|_| 0),
            None => {
                println!("{}", "Usage: untoc <INPUT> [OUTPUT]".yellow());
                println!("       untoc --help for more information");
                Ok(0)
            }
        },
    };

    match result {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// `<dir>_outlines` next to the input directory.
fn default_output_dir(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    input.with_file_name(format!("{}_outlines", name))
}

/// Fragment files in a directory, sorted by name.
fn fragment_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Infer one document and write `<stem>.json` into `output_dir`.
fn process_file(analyzer: &OutlineAnalyzer, input: &Path, output_dir: &Path) -> untoc::Result<PathBuf> {
    let doc = read_document_file(input)?;
    let result = analyzer.analyze(&doc)?;
    let json = untoc::render::to_json(&result, JsonFormat::Pretty)?;

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let target = output_dir.join(format!("{}.json", stem));
    fs::write(&target, json)?;
    Ok(target)
}

/// Returns the number of documents that failed.
fn cmd_batch(input: &Path, output: &Path, options: AnalysisOptions) -> CliResult<usize> {
    if !input.is_dir() {
        return Err(format!("{} is not a directory", input.display()).into());
    }
    fs::create_dir_all(output)?;
    if fs::canonicalize(input)? == fs::canonicalize(output)? {
        return Err("output directory must differ from the input directory".into());
    }

    let files = fragment_files(input)?;
    if files.is_empty() {
        println!("{} {}", "No fragment files in".yellow(), input.display());
        return Ok(0);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let parallel = options.parallel;
    let analyzer = OutlineAnalyzer::with_options(options);
    let run = |path: &PathBuf| {
        let outcome = process_file(&analyzer, path, output);
        if let Err(ref e) = outcome {
            log::warn!("Skipping {}: {}", path.display(), e);
        }
        pb.inc(1);
        (path.clone(), outcome)
    };
    let outcomes: Vec<(PathBuf, untoc::Result<PathBuf>)> = if parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };
    pb.finish_and_clear();

    let mut failed = 0;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(target) => println!(
                "  {} {} {}",
                path.file_name().unwrap_or_default().to_string_lossy(),
                "->".dimmed(),
                target.display()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("  {} {}: {}", "Failed".red().bold(), path.display(), e);
            }
        }
    }

    let written = outcomes.len() - failed;
    if failed == 0 {
        println!("\n{} {} outlines written", "Done!".green().bold(), written);
    } else {
        println!(
            "\n{} {} outlines written, {} failed",
            "Done.".yellow().bold(),
            written,
            failed
        );
    }
    Ok(failed)
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: AnalysisOptions,
) -> CliResult<()> {
    let doc = read_document_file(input)?;
    let result = OutlineAnalyzer::with_options(options).analyze(&doc)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = untoc::render::to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, top: usize, options: AnalysisOptions) -> CliResult<()> {
    let doc = read_document_file(input)?;
    let report = OutlineAnalyzer::with_options(options).analyze_report(&doc)?;

    println!("{}", "Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count);
    println!("{}: {}", "Fragments".bold(), doc.fragments.len());
    println!("{}: {}", "Class".bold(), report.class.as_str());

    println!();
    println!("{}", "Running headers/footers".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if report.running_text.is_empty() {
        println!("{}", "(none)".dimmed());
    }
    for text in report.running_text.iter() {
        println!("  {}", text);
    }

    println!();
    println!("{}", "Styles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    match &report.profile {
        Some(profile) => {
            println!("{}: {}", "Body".bold(), profile.body());
            for level in HeadingLevel::ALL {
                if let Some(style) = profile.style_for(level) {
                    println!("{}: {}", level.as_str().bold(), style);
                }
            }
        }
        None => println!("{}", "(no text)".dimmed()),
    }

    println!();
    println!("{}", "Title".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    match report.title_score {
        Some(score) => println!("{} {}", report.result.title, format!("({:.1})", score).dimmed()),
        None => println!("{}", "(none)".dimmed()),
    }

    println!();
    println!("{}", "Top candidates".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let mut ranked: Vec<_> = report.candidates.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    for candidate in ranked.into_iter().take(top) {
        let level = candidate.level.map_or("--", |l| l.as_str());
        let f = &candidate.features;
        println!(
            "{:>7.1} {} p{} {}",
            candidate.score,
            if candidate.level.is_some() {
                level.green()
            } else {
                level.dimmed()
            },
            candidate.fragment.page,
            candidate.text
        );
        println!(
            "        {}",
            format!(
                "size {:.1} bold {:.1} num {:.1} caps {:.1} kw {:.1} space {:.1} penalty -{:.1}",
                f.size, f.bold, f.numbering, f.capitalization, f.keyword, f.spacing, f.penalty
            )
            .dimmed()
        );
    }

    println!();
    print_summary(&report.result);

    Ok(())
}

fn print_summary(result: &OutlineResult) {
    println!(
        "{}: {} ({} H1, {} H2, {} H3)",
        "Outline".bold(),
        result.outline.len(),
        result.count_level(HeadingLevel::H1),
        result.count_level(HeadingLevel::H2),
        result.count_level(HeadingLevel::H3)
    );
}

fn cmd_version() {
    println!("{} {}", "untoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline inference tool");
    println!();
    println!("License: MIT");
}
