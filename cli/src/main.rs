//! relayout CLI - layout reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use relayout::parser::{JsonTokenExtractor, LineGrouper, RunClassifier};
use relayout::render::{to_json, TextNormalizer};
use relayout::{
    DocumentKind, ExtractedDocument, JsonDirSink, JsonFormat, Pipeline, Relayout, RenderOptions,
    SemanticSpan, SemanticTag, TokenExtractor, Upload, MAX_INPUT_BYTES,
};

#[derive(Parser)]
#[command(name = "relayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reconstruct HTML and text from PDF token dumps and DOCX conversions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct a PDF from a pdf2json token dump
    Pdf {
        /// Token dump (JSON)
        #[arg(value_name = "TOKENS")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Reconstruct a DOCX from a converter dump
    Docx {
        /// Conversion dump (JSON with "html" and "text")
        #[arg(value_name = "CONVERSION")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print grouped and classified lines of a token dump
    Lines {
        /// Token dump (JSON)
        #[arg(value_name = "TOKENS")]
        input: PathBuf,

        /// Baseline body font size in points
        #[arg(long, env = "RELAYOUT_BASELINE_PT", default_value = "12")]
        baseline: f32,
    },

    /// Normalize a plain-text file
    Normalize {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Normalization rules to apply
        #[arg(long, value_enum, default_value = "docx")]
        mode: KindArg,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct OutputArgs {
    /// Output directory (defaults to <input stem>_output)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print one artifact to stdout instead of writing files
    #[arg(long, value_enum)]
    print: Option<PrintFormat>,
}

#[derive(Args)]
struct PipelineArgs {
    /// Baseline body font size in points
    #[arg(long, env = "RELAYOUT_BASELINE_PT", default_value = "12")]
    baseline: f32,

    /// Upload size ceiling in bytes
    #[arg(long, env = "RELAYOUT_MAX_BYTES", default_value_t = MAX_INPUT_BYTES)]
    max_bytes: usize,

    /// Declared MIME type (defaults to the subcommand's type)
    #[arg(long)]
    mime: Option<String>,

    /// Bound extraction to this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Render pages on one thread
    #[arg(long)]
    sequential: bool,

    /// Emit span text without HTML escaping
    #[arg(long)]
    no_escape: bool,

    /// Store a JSON record of the result in this directory
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Owner id recorded with stored documents
    #[arg(long, env = "RELAYOUT_OWNER", default_value = "anonymous")]
    owner: String,
}

impl PipelineArgs {
    fn build(&self) -> Pipeline {
        let mut builder = Relayout::new()
            .with_json_collaborators()
            .with_baseline(self.baseline)
            .with_max_bytes(self.max_bytes)
            .with_render_options(RenderOptions::new().with_escape(!self.no_escape));
        if let Some(secs) = self.timeout {
            builder = builder.with_extract_timeout(Duration::from_secs(secs));
        }
        if self.sequential {
            builder = builder.sequential();
        }
        builder.build()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Trim only
    Pdf,
    /// Collapse line endings, blank lines and spaces
    Docx,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Pdf => DocumentKind::Pdf,
            KindArg::Docx => DocumentKind::Docx,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PrintFormat {
    /// HTML artifact
    Html,
    /// Normalized text artifact
    Text,
    /// Both artifacts as JSON
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Pdf {
            input,
            output,
            pipeline,
        }) => cmd_reconstruct(DocumentKind::Pdf, &input, &output, &pipeline),
        Some(Commands::Docx {
            input,
            output,
            pipeline,
        }) => cmd_reconstruct(DocumentKind::Docx, &input, &output, &pipeline),
        Some(Commands::Lines { input, baseline }) => cmd_lines(&input, baseline),
        Some(Commands::Normalize {
            input,
            mode,
            output,
        }) => cmd_normalize(&input, mode.into(), output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: relayout <pdf|docx> <DUMP> [-o DIR]".yellow());
            println!("       relayout --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_reconstruct(
    kind: DocumentKind,
    input: &Path,
    output: &OutputArgs,
    args: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = args.build();
    let mime = args.mime.as_deref().unwrap_or(kind.mime_type());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    if output.print.is_some() {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    pb.set_message("Reading upload...");
    let upload = Upload::from_file(input, mime)?.with_owner(&args.owner);
    pb.inc(1);

    pb.set_message(format!("Reconstructing {}...", kind));
    let doc = if args.timeout.is_some() {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(pipeline.process_async(upload.clone()))?
    } else {
        pipeline.process(&upload)?
    };
    pb.inc(1);

    if let Some(dir) = &args.store {
        pb.set_message("Storing record...");
        let record = pipeline.store(&upload, &doc, &JsonDirSink::new(dir))?;
        log::info!("Stored record {}", record.file_path);
    }
    pb.inc(1);

    if let Some(format) = output.print {
        pb.finish_and_clear();
        println!("{}", render_artifact(&doc, format)?);
        return Ok(());
    }

    let output_dir = output.output.clone().unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    write_outputs(&doc, &output_dir)?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.html", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());
    println!(
        "\n{}: {} pages, {} lines, {} headings, {} words",
        "Stats".bold(),
        doc.stats.page_count,
        doc.stats.line_count,
        doc.stats.heading_count,
        doc.stats.word_count
    );

    Ok(())
}

fn render_artifact(doc: &ExtractedDocument, format: PrintFormat) -> relayout::Result<String> {
    match format {
        PrintFormat::Html => Ok(doc.html.clone()),
        PrintFormat::Text => Ok(doc.text.clone()),
        PrintFormat::Json => to_json(doc, JsonFormat::Pretty),
    }
}

fn write_outputs(doc: &ExtractedDocument, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("extract.html"), &doc.html)?;
    fs::write(dir.join("extract.txt"), &doc.text)?;
    fs::write(dir.join("content.json"), to_json(doc, JsonFormat::Pretty)?)?;
    Ok(())
}

fn cmd_lines(input: &Path, baseline: f32) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let extraction = JsonTokenExtractor::new().extract(&data)?;

    let grouper = LineGrouper::default();
    let classifier =
        RunClassifier::new(relayout::ClassifierConfig::default().with_baseline(baseline));

    for page in &extraction.pages {
        println!("{} {}", "Page".cyan().bold(), page.number);
        println!("{}", "─".repeat(40).dimmed());

        for line in grouper.group_page(page) {
            let spans: Vec<String> = classifier
                .classify_line(&line)
                .iter()
                .map(|s| paint(s).to_string())
                .collect();
            println!("{} {}", format!("{:>6}", line.key).dimmed(), spans.join(" "));
        }
        println!();
    }

    Ok(())
}

fn paint(span: &SemanticSpan) -> ColoredString {
    let text = span.text.trim();
    match span.tag {
        SemanticTag::Heading2 => format!("## {}", text).cyan().bold(),
        SemanticTag::Heading3 => format!("### {}", text).cyan(),
        SemanticTag::Bold => text.bold(),
        SemanticTag::Italic => text.italic(),
        SemanticTag::Plain => text.normal(),
    }
}

fn cmd_normalize(
    input: &Path,
    kind: DocumentKind,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let normalized = TextNormalizer::new().normalize(&text, kind);

    if let Some(path) = output {
        fs::write(path, &normalized)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", normalized);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "relayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout reconstruction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/relayout".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ExtractedDocument::new("Hello", "<p>Hello</p>");
        write_outputs(&doc, dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("extract.html")).unwrap(),
            "<p>Hello</p>"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("extract.txt")).unwrap(),
            "Hello"
        );
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("content.json")).unwrap())
                .unwrap();
        assert_eq!(json["text"], "Hello");
    }

    #[test]
    fn test_render_artifact() {
        let doc = ExtractedDocument::new("t", "<b>h</b>");
        assert_eq!(render_artifact(&doc, PrintFormat::Html).unwrap(), "<b>h</b>");
        assert_eq!(render_artifact(&doc, PrintFormat::Text).unwrap(), "t");
        assert!(render_artifact(&doc, PrintFormat::Json)
            .unwrap()
            .contains("\"html\""));
    }

    #[test]
    fn test_cli_parses_pdf_command() {
        let cli = Cli::try_parse_from([
            "relayout",
            "pdf",
            "tokens.json",
            "--baseline",
            "10",
            "--print",
            "html",
            "--sequential",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Pdf {
                output, pipeline, ..
            }) => {
                assert_eq!(pipeline.baseline, 10.0);
                assert!(pipeline.sequential);
                assert!(output.print == Some(PrintFormat::Html));
                let built = pipeline.build();
                assert!(!built.options().parallel);
            }
            _ => panic!("Expected pdf command"),
        }
    }
}
