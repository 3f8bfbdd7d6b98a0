use admission_extractor::export;
use admission_extractor::source::{self, PageSource, PdfDocument, TextDump};
use admission_extractor::{Config, Document, ExtractError, ResultExtractor};
use anyhow::Result;
use clap::{Arg, Command};
use std::path::Path;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run().await {
        match e.downcast_ref::<ExtractError>() {
            Some(ExtractError::PdfProcessing { .. }) => {
                println!("❌ The document could not be processed: {}", e);
                println!("   Check that the PDF has a text layer and try again.");
            }
            _ => println!("❌ Unexpected error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = Command::new("admission-extractor")
        .version("1.0")
        .about("Extracts admission results from university result PDFs")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("PDF file, text dump (.txt, pages separated by form feeds) or http(s) URL")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory (overrides the configuration)"),
        )
        .arg(
            Arg::new("org")
                .long("org")
                .value_name("NAME")
                .help("Organization code used in the output file name"),
        )
        .get_matches();

    let input = matches.get_one::<String>("input").unwrap();
    let config_file = matches.get_one::<String>("config").unwrap();

    // Load or create configuration
    let mut config = if Path::new(config_file).exists() {
        println!("📋 Loading configuration from: {}", config_file);
        Config::load_from_file(config_file)?
    } else {
        println!("📝 Creating default configuration file: {}", config_file);
        let default_config = Config::default();
        default_config.save_to_file(config_file)?;
        default_config
    };

    if let Some(org) = matches.get_one::<String>("org") {
        config.organization = org.clone();
    }

    let output_dir = matches
        .get_one::<String>("output")
        .cloned()
        .or_else(|| config.output_directory.clone())
        .unwrap_or_else(|| "output".to_string());

    println!("📂 Reading: {}", input);

    let document = if input.starts_with("http://") || input.starts_with("https://") {
        println!("🌐 Fetching data from: {}", input);
        let bytes = source::download(input).await?;
        extract(&PdfDocument::from_bytes(&bytes)?)?
    } else if input.to_lowercase().ends_with(".txt") {
        extract(&TextDump::open(input)?)?
    } else {
        extract(&PdfDocument::open(input)?)?
    };

    print_summary(&document);

    if document.records.is_empty() {
        anyhow::bail!("No result lines found in {}", input);
    }

    let path = export::export_to_file(
        &document.records,
        &config,
        &output_dir,
        &document.year,
        &document.period,
    )?;
    println!("✅ Results written to: {}", path.display());

    Ok(())
}

fn extract<P: PageSource>(source: &P) -> Result<Document> {
    let document = ResultExtractor::new().process_document(
        source,
        Some(|done, total, records| {
            println!("   📄 Page {}/{} processed, {} records so far", done, total, records);
        }),
    )?;
    Ok(document)
}

fn print_summary(document: &Document) {
    println!("\n📊 Summary");
    println!(
        "   Year: {}  Period: {}",
        if document.year.is_empty() { "unknown" } else { document.year.as_str() },
        if document.period.is_empty() { "unknown" } else { document.period.as_str() }
    );
    println!("   Records: {}", document.records.len());
    for (status, count) in document.status_counts() {
        println!("   {}: {}", status, count);
    }
}
