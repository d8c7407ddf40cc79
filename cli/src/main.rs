//! pdfoutline CLI - PDF title and heading outline tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::analyze::extract_title;
use pdfoutline::render::{to_json, to_markdown, to_text};
use pdfoutline::{
    BatchProcessor, Document, JsonFormat, OutlineOptions, Outliner, PdfParser,
    ReportStatus,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Infer the title and H1-H3 outline of a PDF from its typography", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    shared: SharedArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the outline of one document
    Outline {
        /// Input PDF file (or span dump with --spans)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Outline every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT", default_value = "input")]
        input_dir: PathBuf,

        /// Directory for JSON results
        #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT", default_value = "output")]
        output_dir: PathBuf,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the style histogram and heading style map
    Styles {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Read a JSON span dump instead of a PDF
    #[arg(long)]
    spans: bool,
}

#[derive(Args, Clone)]
struct SharedArgs {
    /// Treat "black" and "heavy" fonts as bold too
    #[arg(long, global = true)]
    extended_bold: bool,

    /// Fail on the first unreadable page
    #[arg(long, global = true)]
    strict: bool,

    /// Lay out pages on one thread
    #[arg(long, global = true)]
    sequential: bool,
}

impl SharedArgs {
    fn outliner(&self) -> Outliner {
        let mut outline_options = OutlineOptions::new();
        if self.extended_bold {
            outline_options = outline_options.extended_bold();
        }

        let mut outliner = Outliner::new().with_outline_options(outline_options);
        if self.strict {
            outliner = outliner.strict();
        }
        if self.sequential {
            outliner = outliner.sequential();
        }
        outliner
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON outline
    #[default]
    Json,
    /// Nested Markdown list
    Markdown,
    /// Indented plain text
    Text,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let outliner = cli.shared.outliner();

    let result = match cli.command {
        Some(Commands::Outline { input, output }) => cmd_outline(&outliner, &input, &output),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            compact,
        }) => cmd_batch(outliner, &input_dir, &output_dir, compact),
        Some(Commands::Styles { input }) => cmd_styles(&outliner, &input),
        Some(Commands::Info { input }) => cmd_info(&outliner, &input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(&outliner, &input, &cli.output)
            } else {
                println!("{}", "Usage: pdfoutline <FILE> [-o OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_document(
    outliner: &Outliner,
    input: &Path,
    spans: bool,
) -> Result<Document, pdfoutline::Error> {
    if spans {
        Document::from_json(&fs::read_to_string(input)?)
    } else {
        outliner.parse_file(input)
    }
}

fn cmd_outline(outliner: &Outliner, input: &Path, args: &OutputArgs) -> CliResult {
    let doc = load_document(outliner, input, args.spans)?;
    let result = outliner.outline_document(&doc);
    log::debug!(
        "{}: {} pages, {} headings",
        input.display(),
        doc.page_count(),
        result.heading_count()
    );

    let rendered = match args.format {
        Format::Json => {
            let format = if args.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            to_json(&result, format)?
        }
        Format::Markdown => to_markdown(&result),
        Format::Text => to_text(&result),
    };

    if let Some(path) = &args.output {
        fs::write(path, &rendered)?;
        println!(
            "{} {} ({} headings)",
            "Saved to".green(),
            path.display(),
            result.heading_count()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_batch(outliner: Outliner, input_dir: &Path, output_dir: &Path, compact: bool) -> CliResult {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let batch = BatchProcessor::new(input_dir, output_dir)
        .with_options(outliner)
        .with_json_format(format);

    let total = batch.inputs()?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            input_dir.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let summary = batch.run_with_progress(|report| {
        let name = report
            .input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for report in &summary.reports {
        let name = report.input.display();
        match &report.status {
            ReportStatus::Ok { headings } => {
                println!("  {} {} ({} headings)", "ok".green(), name, headings)
            }
            ReportStatus::Failed { error } => {
                println!("  {} {}: {}", "failed".red(), name, error)
            }
        }
    }
    println!(
        "\n{} {} succeeded, {} failed",
        "Done!".green().bold(),
        summary.succeeded(),
        summary.failed()
    );

    Ok(())
}

fn cmd_styles(outliner: &Outliner, input: &Path) -> CliResult {
    let doc = outliner.parse_file(input)?;
    let profile = outliner.pipeline().profile(&doc);

    println!("{}", "Style Histogram (pages 2+)".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if profile.ranked.is_empty() {
        println!("  {}", "(no body text)".dimmed());
    }
    for key in &profile.ranked {
        let count = profile.histogram.get(key).copied().unwrap_or(0);
        let marker = if profile.rejected == Some(*key) {
            " (rejected)".yellow().to_string()
        } else {
            String::new()
        };
        println!("  {:<14} {:>6}{}", key.to_string(), count, marker);
    }

    println!();
    println!("{}", "Heading Styles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if profile.style_map.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (level, key) in profile.style_map.entries() {
        println!("  {}: {}", level.to_string().bold(), key);
    }

    Ok(())
}

fn cmd_info(outliner: &Outliner, input: &Path) -> CliResult {
    let parser = PdfParser::open_with_options(input, outliner.parse_options().clone())?;
    let metadata = parser.metadata();
    let doc = parser.parse()?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), parser.version());
    println!("{}: {}", "Pages".bold(), parser.page_count());
    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Info title".bold(), title);
    }
    println!("{}: {}", "Title guess".bold(), extract_title(&doc));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline tool");
    println!();
    println!("License: MIT");
}
