use anyhow::{Context, Result};
use clap::Parser;
use invoice_gen::invoice::layout::{layout_invoice, InvoiceStyle};
use invoice_gen::invoice::Invoice;
use invoice_gen::pagesize::A4;
use invoice_gen::{load_invoice, replay, Config, Face, Info, PdfSurface};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Render an invoice to a PDF file
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Invoice data as TOML; the built-in sample invoice is used when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(short, long, default_value = "invoice.pdf")]
    output: PathBuf,

    /// Font and image locations
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let invoice = match &cli.data {
        Some(path) => load_invoice(path)
            .with_context(|| format!("failed to read invoice data from {}", path.display()))?,
        None => Invoice::sample(chrono::Local::now().date_naive())?,
    };

    let mut surface = PdfSurface::new(A4);
    for face in Face::ALL {
        let path = config.fonts.path(face);
        surface
            .load_font(face, path)
            .with_context(|| format!("failed to load the {face:?} font from {}", path.display()))?;
    }
    let logo = surface
        .image_asset(&config.assets.logo)
        .with_context(|| format!("failed to load logo {}", config.assets.logo.display()))?;

    let style = InvoiceStyle {
        logo: Some(logo),
        ..InvoiceStyle::default()
    };
    let drawing = layout_invoice(&surface, &style, A4, &invoice).context("failed to lay out invoice")?;
    log::info!(
        "invoice {} for {}: total {}",
        invoice.number,
        invoice.billed_to.name,
        invoice.currency.format(drawing.totals.total)
    );

    replay(&mut surface, &drawing.instructions)?;
    surface.set_info(
        Info::new()
            .title(format!("Invoice {}", invoice.number))
            .author(&invoice.company.name),
    );

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    surface
        .finish(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!("wrote {}", cli.output.display());

    Ok(())
}
