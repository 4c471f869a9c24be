//! doclint CLI - heading and table formatting checker

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use doclint::rules::{standard_for, FONT_SIZE_TOLERANCE, SPACING_TOLERANCE};
use doclint::{
    detect_format_from_path, render, Doclint, DocumentSession, HeadingLevel, JsonFormat,
    ReportOptions, SourceRegistry, ValidateOptions,
};

/// Exit status when `--strict` is set and defects were found.
const EXIT_DEFECTS: i32 = 2;

#[derive(Parser)]
#[command(name = "doclint")]
#[command(version)]
#[command(about = "Check heading and table formatting in Word documents", long_about = None)]
struct Cli {
    /// Input document (.docx, .docm or .json snapshot)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate headings and tables
    Check(CheckArgs),

    /// Write the extracted paragraph and table views as a JSON snapshot
    Dump {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the heading formatting standard
    Standard,

    /// Show version information
    Version,
}

#[derive(Args)]
struct CheckArgs {
    /// Input document
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Output compact JSON (implies --json)
    #[arg(long)]
    compact: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Disable parallel processing
    #[arg(long)]
    sequential: bool,

    /// Check headings only
    #[arg(long, conflicts_with = "tables_only")]
    headings_only: bool,

    /// Check tables only
    #[arg(long)]
    tables_only: bool,

    /// Headings listed in the summary
    #[arg(long, default_value = "10")]
    max_headings: usize,

    /// Erroring headings shown with details
    #[arg(long, default_value = "5")]
    max_heading_errors: usize,

    /// Errors shown per table
    #[arg(long, default_value = "3")]
    max_table_errors: usize,

    /// Exit with status 2 when any defect is found
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    fn defaults(input: PathBuf) -> Self {
        Self {
            input,
            json: false,
            compact: false,
            output: None,
            sequential: false,
            headings_only: false,
            tables_only: false,
            max_headings: 10,
            max_heading_errors: 5,
            max_table_errors: 3,
            strict: false,
        }
    }

    fn validate_options(&self) -> ValidateOptions {
        let mut options = ValidateOptions::new().with_parallel(!self.sequential);
        if self.headings_only {
            options = options.headings_only();
        } else if self.tables_only {
            options = options.tables_only();
        }
        options
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions::new()
            .with_max_headings(self.max_headings)
            .with_max_erroring_headings(self.max_heading_errors)
            .with_max_table_errors(self.max_table_errors)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Check(args)) => run_check(&args),
        Some(Commands::Dump {
            input,
            output,
            compact,
        }) => cmd_dump(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Standard) => {
            cmd_standard();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: check if input is provided
            if let Some(input) = cli.input {
                run_check(&CheckArgs::defaults(input))
            } else {
                println!("{}", "Usage: doclint <FILE>".yellow());
                println!("       doclint --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_check(args: &CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let defects = cmd_check(args)?;
    if args.strict && defects > 0 {
        std::process::exit(EXIT_DEFECTS);
    }
    Ok(())
}

fn cmd_check(args: &CheckArgs) -> Result<usize, Box<dyn std::error::Error>> {
    log::debug!("Checking {}", args.input.display());
    let result = Doclint::new()
        .with_options(args.validate_options())
        .with_report_options(args.report_options())
        .validate(&args.input)?;
    let defects = result.report().defect_count();

    if args.json || args.compact {
        let format = if args.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        let json = result.to_json(format)?;
        write_output(&json, args.output.as_deref())?;
        return Ok(defects);
    }

    let text = result.to_text();
    if let Some(path) = args.output.as_deref() {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        for line in text.lines() {
            println!("{}", colorize_line(line));
        }
    }

    if defects == 0 {
        println!("{}", "No defects found".green().bold());
    } else {
        println!("{}", format!("{} defects found", defects).red().bold());
    }

    Ok(defects)
}

fn colorize_line(line: &str) -> String {
    if line.ends_with("check results") {
        line.cyan().bold().to_string()
    } else if line.ends_with(": errors found") || line == "Heading errors:" {
        line.red().to_string()
    } else if line.ends_with(": correct") || line.starts_with("All ") {
        line.green().to_string()
    } else if line.starts_with("  - ") || line.starts_with("  ... ") {
        line.yellow().to_string()
    } else {
        line.to_string()
    }
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_dump(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = doclint::snapshot_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&snapshot, format)?;
    write_output(&json, output)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let session = SourceRegistry::with_defaults().open(input)?;
    let metadata = session.metadata();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let paragraphs = session.paragraphs()?;
    let empty = paragraphs
        .iter()
        .filter(|p| p.trimmed_text().map_or(false, str::is_empty))
        .count();

    println!("{}: {}", "Paragraphs".bold(), paragraphs.len());
    println!("{}: {}", "Empty paragraphs".bold(), empty);
    println!("{}: {}", "Tables".bold(), session.tables()?.len());

    Ok(())
}

fn cmd_standard() {
    println!("{}", "Heading Standard".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "{:<6} {:>6} {:>5} {:>7} {:>7} {:>7} {:>7}",
        "Level", "Size", "Bold", "Italic", "Indent", "Before", "After"
    );
    for level in HeadingLevel::all() {
        let std = standard_for(level);
        println!(
            "{:<6} {:>6.1} {:>5} {:>7} {:>7.1} {:>7.1} {:>7.1}",
            level.get(),
            std.font_size,
            yes_no(std.bold),
            yes_no(std.italic),
            std.left_indent,
            std.space_before,
            std.space_after
        );
    }
    println!();
    println!(
        "Font size tolerance: ±{} pt, spacing tolerance: ±{} pt",
        FONT_SIZE_TOLERANCE, SPACING_TOLERANCE
    );
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn cmd_version() {
    println!("{} {}", "doclint".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading and table formatting checker for Word documents");
    println!();
    println!("License: MIT");
}
