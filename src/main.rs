use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::{Confirm, Input};
use docsift::{
    config::Config,
    extractor::SourceFactory,
    language::LanguageGate,
    logging,
    models::RunReport,
    ocr::OcrEngine,
    pipeline::{ExtractOptions, ExtractRunner},
    utils,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Batch text extractor for PDF, DOC, DOCX and scanned documents")]
#[command(version)]
struct Cli {
    /// Files or directories to extract from; prompts interactively when empty
    #[arg(value_name = "PATH")]
    inputs: Vec<PathBuf>,

    /// Output folder for the extracted text files
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Extension filter, e.g. pdf,docx,doc (empty disables filtering)
    #[arg(long, value_delimiter = ',')]
    filetypes: Option<Vec<String>>,

    /// Allowed languages for the gibberish gate, ISO 639-3 codes,
    /// e.g. eng,fra (empty disables the gate)
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Replace accentuated characters by their ASCII counterpart
    #[arg(short = 'a', long)]
    ascii: bool,

    /// Disable the OCR fallback for unreadable documents
    #[arg(long)]
    no_ocr: bool,

    /// Force OCR for every document
    #[arg(long)]
    force_ocr: bool,

    /// Abort on the first extraction error instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Tesseract language code, e.g. fra
    #[arg(long, value_name = "LANG")]
    ocr_lang: Option<String>,

    /// Rasterization resolution for OCR on PDF pages
    #[arg(long, value_name = "DPI")]
    dpi: Option<u32>,

    /// Append console output to this log file as well
    #[arg(short = 'l', long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Verbose mode (show per-file diagnostics)
    #[arg(short, long)]
    verbose: bool,

    /// No console output (a log file, if given, is still written)
    #[arg(long)]
    silent: bool,

    /// Path to a configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    logging::init(cli.verbose, cli.silent, cli.log.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_default(),
    };

    if cli.inputs.is_empty() {
        let session = interactive_session()?;
        cli.inputs = session.inputs;
        cli.output = Some(session.output);
        cli.ascii = session.ascii;
        cli.no_ocr = !session.ocr;
    }

    let inputs = resolve_inputs(&cli.inputs)?;
    let output = match &cli.output {
        Some(dir) => utils::expand_path(&dir.to_string_lossy()),
        None => bail!("no output folder given (use -o/--output)"),
    };
    if !output.is_dir() {
        bail!(
            "output path does not exist or is not a directory: {}",
            output.display()
        );
    }

    // CLI flags win over the config file
    let filetypes = normalize_list(
        cli.filetypes
            .unwrap_or_else(|| config.extraction.filetypes.clone()),
    );
    let languages = normalize_list(
        cli.languages
            .unwrap_or_else(|| config.extraction.languages.clone()),
    )
    .unwrap_or_default();

    let gate = LanguageGate::from_codes(&languages, config.extraction.min_confidence);
    let mut ocr_engine = OcrEngine::new(&config.tools, &config.ocr);
    if cli.ocr_lang.is_some() {
        ocr_engine = ocr_engine.with_lang(cli.ocr_lang.clone());
    }
    if let Some(dpi) = cli.dpi {
        ocr_engine = ocr_engine.with_dpi(dpi);
    }

    let opts = ExtractOptions {
        filetypes,
        ocr: !cli.no_ocr,
        force_ocr: cli.force_ocr,
        tolerant: !cli.strict,
        ascii: cli.ascii,
    };

    if (opts.ocr || opts.force_ocr) && !ocr_engine.is_available() {
        warn!("tesseract not found; OCR fallback will fail on image-only documents");
    }

    let factory = SourceFactory::new(ocr_engine.clone(), config.tools.antiword_path());
    let runner = ExtractRunner::new(factory, ocr_engine, gate, opts);

    info!("extracting text contents, please wait...");
    let report = runner.run(&inputs, &output, !cli.silent).await?;
    print_summary(&report, &output);

    Ok(())
}

struct InteractiveSession {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    ascii: bool,
    ocr: bool,
}

/// Collect-then-run front end: prompt for paths and options, confirm, go.
fn interactive_session() -> Result<InteractiveSession> {
    println!("== docsift ==");

    let mut inputs = Vec::new();
    loop {
        let prompt = if inputs.is_empty() {
            "File or directory to extract from"
        } else {
            "Another file or directory (leave empty to continue)"
        };
        let entry: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(!inputs.is_empty())
            .interact_text()?;
        if entry.trim().is_empty() {
            break;
        }
        inputs.push(PathBuf::from(entry));
        if !Confirm::new()
            .with_prompt("Add another input?")
            .default(false)
            .interact()?
        {
            break;
        }
    }

    let output: String = Input::new()
        .with_prompt("Output folder for the extracted text files")
        .interact_text()?;

    let ocr = Confirm::new()
        .with_prompt("Use OCR for unreadable documents?")
        .default(true)
        .interact()?;

    let ascii = Confirm::new()
        .with_prompt("Replace accentuated characters by ASCII?")
        .default(false)
        .interact()?;

    if !Confirm::new()
        .with_prompt("Start extraction?")
        .default(true)
        .interact()?
    {
        bail!("aborted");
    }

    Ok(InteractiveSession {
        inputs,
        output: PathBuf::from(output),
        ascii,
        ocr,
    })
}

/// Expand and canonicalize inputs; every path must exist.
fn resolve_inputs(raw: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::with_capacity(raw.len());
    for path in raw {
        let expanded = utils::expand_path(&path.to_string_lossy());
        if !expanded.exists() {
            bail!("input path does not exist: {}", expanded.display());
        }
        let canonical = expanded
            .canonicalize()
            .with_context(|| format!("Failed to resolve input: {}", expanded.display()))?;
        inputs.push(canonical);
    }
    Ok(inputs)
}

/// An empty or all-empty list disables the corresponding feature.
fn normalize_list(values: Vec<String>) -> Option<Vec<String>> {
    let cleaned: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn print_summary(report: &RunReport, output: &std::path::Path) {
    info!(
        "total documents successfully extracted: {}",
        report.extracted.len()
    );
    if report.filtered > 0 {
        info!(
            "{} file(s) skipped by the extension filter",
            report.filtered
        );
    }
    if !report.unreadable.is_empty() {
        warn!(
            "total number of unreadable documents: {}",
            report.unreadable.len()
        );
        for path in &report.unreadable {
            warn!("  * {}", path.display());
        }
    }
    info!("saved extracted text contents to {}", output.display());
}
