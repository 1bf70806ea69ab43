//! Parse command - turn a single supplier document into an expense record.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use billscan_core::{BillscanError, ExpenseParser, ExpenseRecord, SourceDocument, SupplierRegistry};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Supplier code (see `billscan suppliers`)
    #[arg(short, long)]
    supplier: String,

    /// Input file (PDF, or text already rendered from one)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show contact and payment decisions
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Configuration problems surface before the document is touched
    let config = super::load_config(config_path)?;
    let registry = SupplierRegistry::builtin();
    let variant = registry.lookup(&args.supplier)?;
    let supplier_config = config.supplier(variant.code())?;

    info!("Processing file: {}", args.input.display());
    let document = SourceDocument::open(&args.input)?;

    let parser = ExpenseParser::new(variant, supplier_config, config.tax(), document);
    let record = parser.parse()?;

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output).map_err(BillscanError::from)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.summary {
        eprintln!();
        eprintln!("{} Contact: {}", style("ℹ").blue(), parser.supplier_email());
        eprintln!(
            "{} Payment method: {}",
            style("ℹ").blue(),
            parser.payment_method()
        );
        let paid = if parser.pay() {
            match parser.bank_account_id() {
                Some(id) => format!("yes (bank account {})", id),
                None => "yes".to_string(),
            }
        } else {
            "no".to_string()
        };
        eprintln!("{} Mark paid: {}", style("ℹ").blue(), paid);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &ExpenseRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExpenseRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_number",
        "issued_on",
        "name",
        "quantity",
        "unit_name",
        "unit_price",
        "vat_rate",
        "transferred_tax_liability",
    ])?;

    let number = record
        .invoice_number
        .as_deref()
        .or(record.original_number.as_deref())
        .unwrap_or_default();

    let issued_on = record.issued_on.to_string();
    for line in &record.lines {
        let quantity = line.quantity.to_string();
        let unit_price = line.unit_price.to_string();
        let vat_rate = line.vat_rate.to_string();
        let reverse_charge = line
            .transferred_tax_liability
            .map(|t| t.to_string())
            .unwrap_or_default();

        wtr.write_record([
            number,
            issued_on.as_str(),
            line.name.as_str(),
            quantity.as_str(),
            line.unit_name.as_deref().unwrap_or_default(),
            unit_price.as_str(),
            vat_rate.as_str(),
            reverse_charge.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExpenseRecord) -> String {
    let mut output = String::new();

    if let Some(number) = record.invoice_number.as_ref().or(record.original_number.as_ref()) {
        output.push_str(&format!("Document: {}\n", number));
    }
    if let Some(vs) = &record.variable_symbol {
        output.push_str(&format!("Variable symbol: {}\n", vs));
    }
    output.push_str(&format!("Issued: {}\n", record.issued_on));
    output.push_str(&format!("Due: {}\n", record.due_on));
    output.push_str(&format!("Taxable supply: {}\n", record.taxable_fulfillment_due));
    output.push_str(&format!("Payment: {}\n", record.payment_method));
    output.push('\n');

    output.push_str("Lines:\n");
    for line in &record.lines {
        let unit = line.unit_name.as_deref().unwrap_or("");
        output.push_str(&format!(
            "  {} x{}{} @ {} (VAT {}%)\n",
            line.name,
            line.quantity,
            if unit.is_empty() { String::new() } else { format!(" {}", unit) },
            line.unit_price,
            line.vat_rate,
        ));
    }
    output.push('\n');
    output.push_str(&format!("Total net: {}\n", record.total_net()));

    if let Some(note) = &record.private_note {
        output.push_str(&format!("\nNote:\n{}\n", note));
    }

    output
}
