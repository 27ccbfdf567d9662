use anyhow::{Context, Result};
use clap::Parser;
use invoice_gen::colours;
use invoice_gen::layout::Margins;
use invoice_gen::pagesize::A4;
use invoice_gen::{replay, Align, Config, DrawInstruction, Face, FontSpec, PdfSurface, Pt};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Write a one-line PDF, to check fonts and output work
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Where to write the PDF
    #[arg(short, long, default_value = "hello.pdf")]
    output: PathBuf,

    /// Font locations
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let font = FontSpec::new(Face::SansBold, 16.0);
    let path = config.fonts.path(font.face);
    let mut surface = PdfSurface::new(A4);
    surface
        .load_font(font.face, path)
        .with_context(|| format!("failed to load font {}", path.display()))?;

    // a centimetre, as in most word processors
    let margins = Margins::all(Pt(28.35));
    replay(
        &mut surface,
        &[DrawInstruction::text(
            margins.left,
            margins.top,
            "Hello, world",
            font,
            colours::BLACK,
            Align::Left,
        )],
    )?;

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    surface
        .finish(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!("wrote {}", cli.output.display());

    Ok(())
}
