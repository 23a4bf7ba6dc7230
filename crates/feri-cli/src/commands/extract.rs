//! Extract command - pull fields from a single certificate file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use feri_core::certificate::rules::pattern_set;
use feri_core::certificate::{CertificatePipeline, ExtractionOutcome, RecordExtractor};
use feri_core::models::config::FeriConfig;
use feri_core::models::record::{keys, DocumentFamily, FieldValue};
use feri_core::pdf::{PdfProcessor, PdfTextExtractor};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Document family hint (normal, maritime, ad, busia, possiano);
    /// omit to let the classifier decide
    #[arg(short = 'F', long)]
    family: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List the fields that found no match
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row, family field order)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_document_text(&args.input)?;
    let outcome = build_pipeline(args.family.as_deref(), &config)?.extract(&text)?;

    let output = format_record(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing && !outcome.missing_fields.is_empty() {
        eprintln!(
            "{} Fields without a match: {}",
            style("ℹ").blue(),
            outcome.missing_fields.join(", ")
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the config file when given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FeriConfig> {
    match config_path {
        Some(path) => Ok(FeriConfig::from_file(Path::new(path))?),
        None => Ok(FeriConfig::default()),
    }
}

/// Build a pipeline honoring the family hint chain: command line first,
/// then the config default, otherwise self-classification.
pub fn build_pipeline(
    family_arg: Option<&str>,
    config: &FeriConfig,
) -> anyhow::Result<CertificatePipeline> {
    let hint = family_arg.or(config.extraction.default_family.as_deref());
    let pipeline = match hint {
        Some(name) => {
            let family: DocumentFamily = name
                .parse()
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            CertificatePipeline::new().with_family(family)
        }
        None => CertificatePipeline::new(),
    };
    Ok(pipeline)
}

/// Read a document as one linear text stream.
///
/// PDFs go through the text extractor; anything else is treated as plain
/// text. An empty result is fine - the pipeline yields an empty record.
pub fn read_document_text(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension == "pdf" {
        let data = fs::read(path)?;
        let mut extractor = PdfTextExtractor::new();
        extractor.load(&data)?;
        Ok(extractor.extract_all()?.text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

pub fn format_record(outcome: &ExtractionOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&outcome.record)?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn value_to_string(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::List(items) => items.join("; "),
    }
}

/// One header row and one data row, columns in the family's field order,
/// empty cells for absent fields.
fn format_csv(outcome: &ExtractionOutcome) -> anyhow::Result<String> {
    let record = &outcome.record;
    let set = pattern_set(record.family);

    let mut columns: Vec<&str> = vec!["family"];
    columns.extend(set.field_keys());
    if set.derives_border {
        columns.push(keys::OUT_BOUND_BORDER);
    }

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(&columns)?;

    let row: Vec<String> = columns
        .iter()
        .map(|&col| {
            if col == "family" {
                record.family.to_string()
            } else {
                record.get(col).map(value_to_string).unwrap_or_default()
            }
        })
        .collect();
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ExtractionOutcome) -> String {
    let record = &outcome.record;
    let mut output = String::new();

    output.push_str(&format!("Family: {}\n", record.family));
    output.push('\n');

    for (key, value) in &record.fields {
        output.push_str(&format!("  {:<20} {}\n", key, value_to_string(value)));
    }

    if !outcome.missing_fields.is_empty() {
        output.push('\n');
        output.push_str(&format!(
            "Not found: {}\n",
            outcome.missing_fields.join(", ")
        ));
    }

    output
}
