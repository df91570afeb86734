//! adaptdoc CLI - accessible lesson resource converter

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use adaptdoc::{
    AccessibilityOptions, BlockStats, ExportFormat, LearnerCondition, OverflowPolicy,
    RenderOptions, Session, SourceDocument,
};

const SAMPLE_LESSON: &str = include_str!("sample.md");

#[derive(Parser)]
#[command(name = "adaptdoc")]
#[command(version)]
#[command(
    about = "Convert lesson Markdown to accessible HTML, Word and PowerPoint files",
    long_about = None
)]
struct Cli {
    /// Input Markdown file (`-` for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown to one or all output formats
    Convert {
        /// Input Markdown file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "all")]
        format: FormatArg,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the HTML fragment of a Markdown file
    Preview {
        /// Input Markdown file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information
    Info {
        /// Input Markdown file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the built-in sample lesson
    Sample {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Subject label used in filenames
    #[arg(short, long, env = "ADAPTDOC_SUBJECT")]
    subject: Option<String>,

    /// Document title (defaults to the first level-1 heading)
    #[arg(long)]
    title: Option<String>,

    /// Use the dyslexia-friendly font
    #[arg(long)]
    dyslexic: bool,

    /// Use larger text
    #[arg(long)]
    large_text: bool,

    /// Use extra line and letter spacing
    #[arg(long)]
    extra_spacing: bool,

    /// Use a cream background
    #[arg(long)]
    cream: bool,

    /// Learner conditions to adapt for (e.g. dyslexia,visual-processing)
    #[arg(long, value_delimiter = ',')]
    conditions: Vec<LearnerCondition>,

    /// JSON file with accessibility options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Move overflowing slide content to continuation slides
    #[arg(long)]
    continue_slides: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Standalone HTML
    Html,
    /// Printable HTML (print to PDF from the browser)
    Pdf,
    /// Word document
    Docx,
    /// PowerPoint presentation
    Pptx,
    /// JSON block dump
    Json,
    /// Every format
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Html => vec![ExportFormat::Html],
            FormatArg::Pdf => vec![ExportFormat::Pdf],
            FormatArg::Docx => vec![ExportFormat::Docx],
            FormatArg::Pptx => vec![ExportFormat::Pptx],
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::All => ExportFormat::all().to_vec(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            format,
            output,
            render,
        }) => cmd_convert(&input, format, output.as_deref(), &render),
        Some(Commands::Preview { input }) => cmd_preview(&input),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Sample { output }) => cmd_sample(output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert to every format if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, FormatArg::All, cli.output.as_deref(), &cli.render)
            } else {
                println!("{}", "Usage: adaptdoc <FILE> [OUTPUT]".yellow());
                println!("       adaptdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn render_options(args: &RenderArgs) -> Result<RenderOptions, Box<dyn std::error::Error>> {
    let from_file = match &args.options {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            serde_json::from_str::<AccessibilityOptions>(&json)
                .map_err(|e| format!("Invalid options file {}: {}", path.display(), e))?
        }
        None => AccessibilityOptions::default(),
    };

    let flags = AccessibilityOptions::new()
        .with_dyslexic_font(args.dyslexic)
        .with_large_text(args.large_text)
        .with_extra_spacing(args.extra_spacing)
        .with_cream_background(args.cream);

    let accessibility = from_file
        .union(flags)
        .union(AccessibilityOptions::for_conditions(&args.conditions));

    let overflow = if args.continue_slides {
        OverflowPolicy::Continue
    } else {
        OverflowPolicy::Drop
    };

    let mut options = RenderOptions::new()
        .with_accessibility(accessibility)
        .with_overflow(overflow);
    if let Some(title) = &args.title {
        options = options.with_title(title.clone());
    }
    Ok(options)
}

fn cmd_convert(
    input: &Path,
    format: FormatArg,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let options = render_options(args)?;
    let formats = format.formats();

    let pb = ProgressBar::new(formats.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing Markdown...");
    let source = SourceDocument::parse(read_input(input)?);
    pb.inc(1);

    let session = Session::new();
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        pb.set_message(format!("Generating {}...", format.key().to_uppercase()));
        let artifact =
            session.export_source(args.subject.as_deref(), &source, format.key(), &options)?;
        fs::write(output_dir.join(&artifact.filename), &artifact.bytes)?;
        written.push(artifact.filename);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    let last = written.len().saturating_sub(1);
    for (i, filename) in written.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    Ok(())
}

fn cmd_preview(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = read_input(input)?;
    println!("{}", adaptdoc::render::to_html_fragment(&markdown));
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = SourceDocument::parse(read_input(input)?);
    let stats = BlockStats::from_blocks(&source.blocks);
    let deck = adaptdoc::render::to_slide_model(&source.blocks, &RenderOptions::default());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {}",
        "Title".bold(),
        source
            .title()
            .unwrap_or_else(|| adaptdoc::render::DEFAULT_TITLE.to_string())
    );
    println!(
        "{}: {}",
        "Filename".bold(),
        adaptdoc::filename::base_name(None, &source.text)
    );
    println!("{}: {}", "Slides".bold(), deck.slide_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!(
        "{}: {} / {} / {}",
        "Headings (H1/H2/H3)".bold(),
        stats.heading_counts[0],
        stats.heading_counts[1],
        stats.heading_counts[2]
    );
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Math spans".bold(), stats.math_span_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_sample(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, SAMPLE_LESSON)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", SAMPLE_LESSON);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "adaptdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Accessible lesson resource converter");
    println!();
    println!("Formats: html, pdf (printable html), docx, pptx, json");
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_merge_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"largeText": true, "unknownKey": 1}"#).unwrap();

        let args = RenderArgs {
            options: Some(path),
            cream: true,
            continue_slides: true,
            ..Default::default()
        };
        let options = render_options(&args).unwrap();

        assert!(options.accessibility.large_text);
        assert!(options.accessibility.cream_background);
        assert!(!options.accessibility.dyslexic_friendly_font);
        assert_eq!(options.slides.overflow, OverflowPolicy::Continue);
    }

    #[test]
    fn test_render_options_conditions() {
        let args = RenderArgs {
            conditions: vec![LearnerCondition::Dyslexia],
            ..Default::default()
        };
        let options = render_options(&args).unwrap();
        assert!(options.accessibility.dyslexic_friendly_font);
        assert!(options.accessibility.extra_line_spacing);
    }

    #[test]
    fn test_bare_invocation_reads_render_flags_and_env() {
        std::env::set_var("ADAPTDOC_SUBJECT", "History");
        let cli = Cli::try_parse_from(["adaptdoc", "lesson.md", "out", "--dyslexic"]).unwrap();
        std::env::remove_var("ADAPTDOC_SUBJECT");

        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("lesson.md")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.render.subject.as_deref(), Some("History"));
        assert!(cli.render.dyslexic);
    }

    #[test]
    fn test_convert_writes_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lesson.md");
        fs::write(&input, SAMPLE_LESSON).unwrap();

        let args = RenderArgs {
            subject: Some("English".to_string()),
            ..Default::default()
        };
        cmd_convert(&input, FormatArg::All, Some(dir.path()), &args).unwrap();

        for name in [
            "English-Macbeth-Act-1-Scene-1.html",
            "English-Macbeth-Act-1-Scene-1-1.html",
            "English-Macbeth-Act-1-Scene-1-2.docx",
            "English-Macbeth-Act-1-Scene-1-3.pptx",
            "English-Macbeth-Act-1-Scene-1-4.json",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }
    }
}
