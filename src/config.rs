//! File-based configuration: where fonts and images live, and invoice data.
//!
//! Every field has a default, so a missing config file or a partial one is fine:
//!
//! ```
//! use invoice_gen::Config;
//!
//! let config = Config::from_toml("[assets]\nlogo = \"brand/logo.png\"\n").unwrap();
//! assert_eq!(config.assets.logo.to_str(), Some("brand/logo.png"));
//! assert_eq!(config.assets.signature.to_str(), Some("images/sig.svg"));
//! ```

use crate::draw::Face;
use crate::error::ConfigError;
use crate::invoice::Invoice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The configuration file the programs look for when none is named
pub const DEFAULT_CONFIG_FILE: &str = "invoice-gen.toml";

/// TrueType files for each face
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontPaths {
    pub sans: PathBuf,
    pub sans_bold: PathBuf,
    pub serif: PathBuf,
    pub serif_italic: PathBuf,
}

impl Default for FontPaths {
    fn default() -> Self {
        FontPaths {
            sans: PathBuf::from("assets/fonts/sans.ttf"),
            sans_bold: PathBuf::from("assets/fonts/sans-bold.ttf"),
            serif: PathBuf::from("assets/fonts/serif.ttf"),
            serif_italic: PathBuf::from("assets/fonts/serif-italic.ttf"),
        }
    }
}

impl FontPaths {
    pub fn path(&self, face: Face) -> &Path {
        match face {
            Face::Sans => &self.sans,
            Face::SansBold => &self.sans_bold,
            Face::Serif => &self.serif,
            Face::SerifItalic => &self.serif_italic,
        }
    }
}

/// Images drawn on the documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub logo: PathBuf,
    /// The instructor's signature on certificates
    pub signature: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        AssetPaths {
            logo: PathBuf::from("images/logo.png"),
            signature: PathBuf::from("images/sig.svg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontPaths,
    pub assets: AssetPaths,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read the config at `path`. With no path, [DEFAULT_CONFIG_FILE] is used if it
    /// exists and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => {
                log::debug!("no configuration file, using defaults");
                return Ok(Config::default());
            }
        };
        log::debug!("reading configuration from {}", path.display());
        Config::from_toml(&std::fs::read_to_string(path)?)
    }
}

/// Parse invoice data. Line items are validated as they are read.
pub fn parse_invoice(source: &str) -> Result<Invoice, ConfigError> {
    Ok(toml::from_str(source)?)
}

pub fn load_invoice<P: AsRef<Path>>(path: P) -> Result<Invoice, ConfigError> {
    let path = path.as_ref();
    log::debug!("reading invoice data from {}", path.display());
    parse_invoice(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, TaxRate};
    use chrono::NaiveDate;
    use test_case::test_case;

    const INVOICE: &str = r#"
        number = "0000000456"
        issued = "2024-02-29"
        currency = "$"
        tax_rate = 0.175

        [company]
        name = "Gophercises Supply Co."
        contact = ["(123) 456-7890"]
        address = ["123 Fake St"]

        [billed_to]
        name = "Client Name"

        [[items]]
        description = "Drywall Sheet"
        unit_price = 822
        quantity = 50
    "#;

    #[test]
    fn empty_config_is_all_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test_case(Face::Sans, "assets/fonts/sans.ttf")]
    #[test_case(Face::SansBold, "assets/fonts/sans-bold.ttf")]
    #[test_case(Face::Serif, "assets/fonts/serif.ttf")]
    #[test_case(Face::SerifItalic, "assets/fonts/serif-italic.ttf")]
    fn default_font_paths(face: Face, expected: &str) {
        assert_eq!(FontPaths::default().path(face), Path::new(expected));
    }

    #[test]
    fn fonts_can_be_overridden_one_at_a_time() {
        let config = Config::from_toml("[fonts]\nserif = \"/usr/share/fonts/times.ttf\"\n").unwrap();
        assert_eq!(config.fonts.serif, PathBuf::from("/usr/share/fonts/times.ttf"));
        assert_eq!(config.fonts.sans, FontPaths::default().sans);
    }

    #[test]
    fn unknown_shapes_are_errors() {
        assert!(matches!(
            Config::from_toml("fonts = 3"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_files_are_io_errors() {
        assert!(matches!(
            Config::load(Some(Path::new("no/such/config.toml"))),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(load_invoice("no/such/invoice.toml"), Err(ConfigError::Io(_))));
    }

    #[test]
    fn invoices_parse_with_their_own_currency_and_rate() {
        let invoice = parse_invoice(INVOICE).unwrap();
        assert_eq!(invoice.number, "0000000456");
        assert_eq!(invoice.issued, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(invoice.currency, Currency::new("$"));
        assert_eq!(invoice.tax_rate, TaxRate::new(0.175).unwrap());
        assert_eq!(invoice.items.len(), 1);
        assert!(invoice.billed_to.address.is_empty());
    }

    #[test]
    fn invoice_defaults_match_the_sample() {
        let minimal = r#"
            number = "1"
            issued = "2024-01-01"
            [company]
            name = "A"
            [billed_to]
            name = "B"
        "#;
        let invoice = parse_invoice(minimal).unwrap();
        assert_eq!(invoice.currency, Currency::default());
        assert_eq!(invoice.tax_rate, TaxRate::DEFAULT);
        assert!(invoice.items.is_empty());
    }

    #[test_case("tax_rate = 1.5" ; "rate above one")]
    #[test_case("tax_rate = -0.1" ; "negative rate")]
    #[test_case("tax_rate = 0.12345" ; "rate finer than a basis point")]
    fn unrepresentable_tax_rates_are_rejected(line: &str) {
        let source = format!(
            "number = \"1\"\nissued = \"2024-01-01\"\n{line}\n[company]\nname = \"A\"\n[billed_to]\nname = \"B\"\n"
        );
        assert!(matches!(parse_invoice(&source), Err(ConfigError::Toml(_))));
    }
}
