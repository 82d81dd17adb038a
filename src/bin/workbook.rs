//! workbook CLI - turns a product record into a printable PDF workbook

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use workbook_gen::{
    suggested_file_name, FontResource, FontSource, NormalizedContent, ProductData,
    WorkbookBuilder, WorkbookConfig,
};

#[derive(Parser)]
#[command(name = "workbook")]
#[command(version)]
#[command(about = "Generate a PDF workbook from a JSON product record", long_about = None)]
struct Cli {
    /// Product record (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Layout and colour overrides (JSON)
    #[arg(long, value_name = "FILE", env = "WORKBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Regular font program to embed instead of Helvetica
    #[arg(long, value_name = "FILE", requires_all = ["bold", "italic"])]
    regular: Option<PathBuf>,

    /// Bold font program
    #[arg(long, value_name = "FILE", requires_all = ["regular", "italic"])]
    bold: Option<PathBuf>,

    /// Italic font program
    #[arg(long, value_name = "FILE", requires_all = ["regular", "bold"])]
    italic: Option<PathBuf>,

    /// Record the current time as the creation date (output is no longer reproducible)
    #[arg(long)]
    stamp_date: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let product = read_product(&cli.input)?;

    let config = match &cli.config {
        Some(path) => WorkbookConfig::from_file(path)?,
        None => WorkbookConfig::default(),
    };

    let source = match (&cli.regular, &cli.bold, &cli.italic) {
        (Some(regular), Some(bold), Some(italic)) => FontSource::TrueType {
            regular: regular.clone(),
            bold: bold.clone(),
            italic: italic.clone(),
        },
        _ => FontSource::Standard,
    };
    let fonts = FontResource::load(&source)?;

    let content = NormalizedContent::from(&product);
    let mut document = WorkbookBuilder::new(&fonts, &config).build(&content);
    if cli.stamp_date {
        if let Some(info) = document.info.as_mut() {
            info.creation_date(chrono::Local::now().fixed_offset());
        }
    }

    fs::create_dir_all(&cli.output)?;
    let path = cli
        .output
        .join(suggested_file_name(product.title.as_deref()));
    let bytes = document.to_bytes()?;
    fs::write(&path, bytes)?;
    log::info!("wrote {} pages to {}", document.pages.len(), path.display());

    Ok(path)
}

fn read_product(path: &Path) -> Result<ProductData, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
