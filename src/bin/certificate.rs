use anyhow::{Context, Result};
use clap::Parser;
use invoice_gen::certificate::{layout_certificate, CertificateDetails, CertificateStyle};
use invoice_gen::pagesize::{PageOrientation, A4};
use invoice_gen::{replay, Config, Face, Info, PdfSurface};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const ACHIEVEMENT: &str = "For successfully completing all twenty programming exercises in the \
    Gophercises programming course for budding Gophers (Go developers)";

/// Render a certificate of completion to a PDF file
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Who the certificate is awarded to
    #[arg(short, long)]
    name: String,

    /// Printed under the signature line
    #[arg(short, long, default_value = "Jon Calhoun")]
    instructor: String,

    /// Where to write the PDF
    #[arg(short, long, default_value = "cert.pdf")]
    output: PathBuf,

    /// Font and image locations
    #[arg(short, long)]
    config: Option<PathBuf>,
}

const LONG_FLAGS: [&str; 4] = ["name", "instructor", "output", "config"];

/// Rewrites single-dash long flags such as `-name` to `--name`, which clap would
/// otherwise read as `-n ame`
fn long_flags<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut rest_are_values = false;
    args.into_iter()
        .map(|arg| {
            if rest_are_values {
                return arg;
            }
            if arg == "--" {
                rest_are_values = true;
                return arg;
            }
            let flag = arg
                .strip_prefix('-')
                .filter(|flag| !flag.starts_with('-'))
                .map(|flag| flag.split('=').next().unwrap_or(flag));
            match flag {
                Some(flag) if LONG_FLAGS.contains(&flag) => format!("-{arg}"),
                _ => arg,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse_from(long_flags(std::env::args()));

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let page = A4.landscape();
    let mut surface = PdfSurface::new(page);
    for face in Face::ALL {
        let path = config.fonts.path(face);
        surface
            .load_font(face, path)
            .with_context(|| format!("failed to load the {face:?} font from {}", path.display()))?;
    }
    let logo = surface
        .image_asset(&config.assets.logo)
        .with_context(|| format!("failed to load logo {}", config.assets.logo.display()))?;
    let signature = surface
        .image_asset(&config.assets.signature)
        .with_context(|| {
            format!("failed to load signature {}", config.assets.signature.display())
        })?;

    let details = CertificateDetails {
        name: cli.name,
        date: chrono::Local::now().date_naive(),
        achievement: ACHIEVEMENT.to_string(),
        instructor: format!("Instructor - {}", cli.instructor),
    };
    let style = CertificateStyle {
        logo: Some(logo),
        signature: Some(signature),
        ..CertificateStyle::default()
    };
    let instructions = layout_certificate(&surface, &style, page, &details)
        .context("failed to lay out certificate")?;
    replay(&mut surface, &instructions)?;
    surface.set_info(
        Info::new()
            .title("Certificate of Completion")
            .subject(&details.name),
    );

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    surface
        .finish(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!("wrote certificate for {} to {}", details.name, cli.output.display());

    Ok(())
}
