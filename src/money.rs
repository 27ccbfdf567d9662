//! Integer money. Amounts are kept in pence (minor units) until they are formatted
//! for display, so no rounding ever happens in arithmetic.

use crate::error::InvoiceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of money in minor currency units
pub type Pence = u64;

/// The default currency symbol
pub const POUND: &str = "£";

/// How amounts are printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency {
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Currency {
            symbol: POUND.to_string(),
        }
    }
}

impl Currency {
    pub fn new<S: ToString>(symbol: S) -> Currency {
        Currency {
            symbol: symbol.to_string(),
        }
    }

    /// `<symbol><major>.<minor>`, the minor part always two digits
    pub fn format(&self, pence: Pence) -> String {
        format!("{}{}.{:02}", self.symbol, pence / 100, pence % 100)
    }

    /// Like [Currency::format] for signed input; negative amounts are rejected
    pub fn format_signed(&self, pence: i64) -> Result<String, InvoiceError> {
        let pence = Pence::try_from(pence).map_err(|_| InvoiceError::NegativeAmount(pence))?;
        Ok(self.format(pence))
    }
}

/// Format an amount in pounds sterling, e.g. `154463` becomes `£1544.63`
pub fn format_money(pence: i64) -> Result<String, InvoiceError> {
    Currency::default().format_signed(pence)
}

/// A tax rate between 0 and 1, held in basis points so that applying it is exact
/// integer arithmetic
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxRate {
    basis_points: u32,
}

impl TaxRate {
    /// 9%, charged when an invoice names no rate
    pub const DEFAULT: TaxRate = TaxRate { basis_points: 900 };

    /// Accepts fractions in `[0, 1]` that are a whole number of hundredths of a percent.
    /// Finer rates are rejected, not rounded.
    pub fn new(fraction: f64) -> Result<TaxRate, InvoiceError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(InvoiceError::TaxRateOutOfRange(fraction));
        }
        let scaled = fraction * 10_000.0;
        // allows for binary rounding in the multiplication
        if (scaled - scaled.round()).abs() > 1e-6 {
            return Err(InvoiceError::TaxRateTooPrecise(fraction));
        }
        Ok(TaxRate {
            basis_points: scaled.round() as u32,
        })
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points
    }

    pub fn as_fraction(&self) -> f64 {
        self.basis_points as f64 / 10_000.0
    }

    /// `floor(amount * rate)`
    pub fn apply(&self, amount: Pence) -> Result<Pence, InvoiceError> {
        amount
            .checked_mul(self.basis_points as Pence)
            .map(|scaled| scaled / 10_000)
            .ok_or(InvoiceError::Overflow)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::DEFAULT
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = InvoiceError;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        TaxRate::new(fraction)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> f64 {
        rate.as_fraction()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.basis_points / 100;
        match self.basis_points % 100 {
            0 => write!(f, "{whole}%"),
            frac => write!(f, "{whole}.{frac:02}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(154463, "£1544.63" ; "invoice total")]
    #[test_case(5, "£0.05" ; "pads single digit pence")]
    #[test_case(100, "£1.00" ; "whole pounds")]
    #[test_case(0, "£0.00" ; "zero")]
    #[test_case(1999, "£19.99" ; "just under twenty")]
    fn formats_pence_as_pounds(pence: i64, expected: &str) {
        assert_eq!(format_money(pence).unwrap(), expected);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert_eq!(format_money(-1), Err(InvoiceError::NegativeAmount(-1)));
    }

    #[test]
    fn currency_symbol_is_configurable() {
        assert_eq!(Currency::new("$").format(123456), "$1234.56");
    }

    #[test_case(141710, 12753 ; "floors the fractional penny")]
    #[test_case(100, 9 ; "exact")]
    #[test_case(0, 0 ; "nothing")]
    #[test_case(11, 0 ; "less than a penny")]
    fn nine_percent_tax_is_floored(subtotal: Pence, expected: Pence) {
        assert_eq!(TaxRate::new(0.09).unwrap().apply(subtotal).unwrap(), expected);
    }

    #[test]
    fn binary_fractions_do_not_lose_a_penny() {
        // 0.29 * 100 is 28.999999999999996 in floating point
        assert_eq!(TaxRate::new(0.29).unwrap().apply(100).unwrap(), 29);
    }

    #[test_case(-0.01 ; "negative")]
    #[test_case(1.5 ; "above one")]
    #[test_case(f64::NAN ; "not a number")]
    fn out_of_range_tax_rates_are_rejected(rate: f64) {
        assert!(matches!(
            TaxRate::new(rate),
            Err(InvoiceError::TaxRateOutOfRange(_))
        ));
    }

    #[test_case(0.12345 ; "thousandth of a percent")]
    #[test_case(0.090001 ; "nine percent and a bit")]
    #[test_case(1.0 / 3.0 ; "a third")]
    fn rates_finer_than_a_basis_point_are_rejected(rate: f64) {
        assert_eq!(TaxRate::new(rate), Err(InvoiceError::TaxRateTooPrecise(rate)));
    }

    #[test_case(0.1234, 10_000, 1234 ; "four decimal places")]
    #[test_case(0.0001, 9_999, 0 ; "one basis point floors")]
    #[test_case(0.175, 141710, 24799 ; "seventeen and a half percent")]
    fn exact_basis_point_rates_apply_exactly(rate: f64, subtotal: Pence, expected: Pence) {
        assert_eq!(TaxRate::new(rate).unwrap().apply(subtotal).unwrap(), expected);
    }

    #[test]
    fn tax_rates_display_as_percentages() {
        assert_eq!(TaxRate::DEFAULT.to_string(), "9%");
        assert_eq!(TaxRate::new(0.175).unwrap().to_string(), "17.50%");
    }

    #[test]
    fn overflowing_tax_is_an_error() {
        assert_eq!(TaxRate::new(1.0).unwrap().apply(u64::MAX), Err(InvoiceError::Overflow));
    }
}
