use crate::draw::Face;
use thiserror::Error;

/// Errors in the data an invoice is built from. These are all caught before any
/// layout happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvoiceError {
    #[error("line item description must not be empty")]
    /// A line item had an empty or whitespace-only description
    EmptyDescription,

    #[error("line item `{description}` has a negative unit price ({pence} pence)")]
    /// A line item was priced below zero
    NegativeUnitPrice { description: String, pence: i64 },

    #[error("line item `{description}` has a negative quantity ({quantity})")]
    /// A line item had a quantity below zero
    NegativeQuantity { description: String, quantity: i64 },

    #[error("cannot format a negative amount of money ({0} pence)")]
    /// Money formatting only supports amounts of zero or more
    NegativeAmount(i64),

    #[error("tax rate {0} is not between 0 and 1")]
    /// The tax rate was NaN or outside of [0, 1]
    TaxRateOutOfRange(f64),

    #[error("tax rate {0} is finer than a hundredth of a percent")]
    /// The tax rate could not be held exactly in basis points
    TaxRateTooPrecise(f64),

    #[error("invoice amounts overflow the supported currency range")]
    /// Summing or multiplying amounts overflowed a 64-bit pence value
    Overflow,
}

/// All errors that rendering a document can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [usvg] failed to parse the image
    Svg(#[from] usvg::Error),

    #[error("failed to convert SVG to PDF: {0}")]
    /// [svg2pdf] could not convert a parsed SVG
    SvgConversion(String),

    #[error("no font has been loaded for the {0:?} face")]
    /// A draw instruction used a face the surface has no font for
    FontMissing(Face),

    #[error("page is missing from the document")]
    /// The page order refers to a page that is no longer in the document
    PageMissing,

    #[error(transparent)]
    /// The invoice data was invalid
    Invoice(#[from] InvoiceError),
}

/// Errors reading configuration or invoice data files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    /// The file could not be read
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// The file is not valid TOML, or does not have the expected shape
    Toml(#[from] toml::de::Error),
}
