use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use idfill::{
    models::{DocumentStatus, DocumentType, ExtractionReport, ExtractorConfig, RawDocument},
    processing::{load_document, load_transcript, OcrEngine},
    DocumentExtractor,
};

#[derive(Parser, Debug)]
#[command(name = "idfill")]
#[command(
    version,
    about = "Extract and consolidate personal details from Indian identity documents",
    long_about = None
)]
struct Cli {
    /// Document files (PDF, JPG, PNG or already-recognized TXT)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document type for every input (aadhaar, pan, voter_id, driving_license, passport, other).
    /// Detected from each file name when omitted.
    #[arg(short = 't', long = "type")]
    document_type: Option<DocumentType>,

    /// Treat every input as already-recognized text
    #[arg(long)]
    text: bool,

    /// Tesseract language(s), e.g. `eng+hin`
    #[arg(long)]
    lang: Option<String>,

    /// Maximum number of address lines kept from an Aadhaar card
    #[arg(long)]
    max_address_lines: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "tesseract")]
fn ocr_engine(config: &ExtractorConfig) -> Arc<dyn OcrEngine> {
    Arc::new(idfill::processing::TesseractOcr::new(config.tesseract_language.clone()))
}

#[cfg(not(feature = "tesseract"))]
fn ocr_engine(_config: &ExtractorConfig) -> Arc<dyn OcrEngine> {
    Arc::new(idfill::processing::PassthroughOcr)
}

fn load_config(cli: &Cli) -> Result<ExtractorConfig, idfill::utils::ExtractError> {
    let mut config = match &cli.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };
    if let Some(lang) = &cli.lang {
        config.tesseract_language = lang.clone();
    }
    if let Some(lines) = cli.max_address_lines {
        config.max_address_lines = lines;
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &ExtractionReport) {
    println!("\n===============================================");
    println!("        EXTRACTED PERSONAL INFORMATION");
    println!("===============================================\n");

    println!("DOCUMENTS:");
    for outcome in &report.documents {
        let status = match outcome.status {
            DocumentStatus::Completed => "COMPLETED",
            DocumentStatus::Empty => "EMPTY",
            DocumentStatus::Skipped => "SKIPPED",
            DocumentStatus::Failed => "FAILED",
        };
        match &outcome.message {
            Some(message) => println!(
                "  - {} [{}] {}: {}",
                outcome.document_id, outcome.document_type, status, message
            ),
            None => println!(
                "  - {} [{}] {}: {} field(s)",
                outcome.document_id,
                outcome.document_type,
                status,
                outcome.fields.len()
            ),
        }
    }

    println!("\nFIELDS:");
    for field in report.record.iter() {
        if field.is_placeholder() {
            println!("  {:<14} -", field.key);
        } else {
            println!(
                "  {:<14} {} ({}, {})",
                field.key, field.value, field.confidence, field.source
            );
        }
    }

    let review = report.record.low_confidence_keys();
    if report.record.has_extracted_data() && !review.is_empty() {
        let keys: Vec<&str> = review.iter().map(|k| k.as_str()).collect();
        println!("\nPlease review: {}", keys.join(", "));
    }
    if !report.record.has_extracted_data() {
        println!("\nNo personal data could be extracted from the documents.");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };

    let mut documents: Vec<RawDocument> = Vec::with_capacity(cli.inputs.len());
    for (index, path) in cli.inputs.iter().enumerate() {
        let id = format!("doc-{}", index + 1);
        let loaded = if cli.text {
            load_transcript(path, id, cli.document_type, &config)
        } else {
            load_document(path, id, cli.document_type, &config)
        };
        match loaded {
            Ok(document) => documents.push(document),
            Err(err) => error!("Cannot load {}: {}", path.display(), err),
        }
    }
    if documents.is_empty() {
        error!("No usable documents");
        process::exit(1);
    }
    info!("Loaded {} of {} document(s)", documents.len(), cli.inputs.len());

    let extractor = DocumentExtractor::new(ocr_engine(&config), config);
    let report = extractor.extract(&documents);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                error!("Failed to serialize report: {}", err);
                process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}
