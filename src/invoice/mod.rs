//! The invoice model and its arithmetic. Layout lives in [layout].

use crate::error::InvoiceError;
use crate::money::{Currency, Pence, TaxRate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod layout;

/// One purchased product or service. Prices and quantities are validated when the
/// item is built, so an existing `LineItem` is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem", into = "RawLineItem")]
pub struct LineItem {
    description: String,
    unit_price: Pence,
    quantity: u64,
}

/// The unchecked shape of a line item, as written in data files
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLineItem {
    description: String,
    unit_price: i64,
    quantity: i64,
}

impl LineItem {
    /// Build a line item, rejecting empty descriptions and negative prices or quantities
    pub fn new<S: Into<String>>(
        description: S,
        unit_price: i64,
        quantity: i64,
    ) -> Result<LineItem, InvoiceError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(InvoiceError::EmptyDescription);
        }
        let Ok(unit_price) = Pence::try_from(unit_price) else {
            return Err(InvoiceError::NegativeUnitPrice {
                description,
                pence: unit_price,
            });
        };
        let Ok(quantity) = u64::try_from(quantity) else {
            return Err(InvoiceError::NegativeQuantity {
                description,
                quantity,
            });
        };
        Ok(LineItem {
            description,
            unit_price,
            quantity,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> Pence {
        self.unit_price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Unit price times quantity
    pub fn amount(&self) -> Result<Pence, InvoiceError> {
        self.unit_price
            .checked_mul(self.quantity)
            .ok_or(InvoiceError::Overflow)
    }
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = InvoiceError;

    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        LineItem::new(raw.description, raw.unit_price, raw.quantity)
    }
}

impl From<LineItem> for RawLineItem {
    fn from(item: LineItem) -> Self {
        RawLineItem {
            description: item.description,
            unit_price: item.unit_price as i64,
            quantity: item.quantity as i64,
        }
    }
}

/// Derived totals. `total == subtotal + tax` always holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct InvoiceTotals {
    pub subtotal: Pence,
    pub tax: Pence,
    pub total: Pence,
}

/// Sum the extended amounts of `items` and apply `tax_rate`, flooring the tax to
/// the penny
pub fn compute_totals(items: &[LineItem], tax_rate: TaxRate) -> Result<InvoiceTotals, InvoiceError> {
    let subtotal = items.iter().try_fold(0 as Pence, |sum, item| {
        sum.checked_add(item.amount()?).ok_or(InvoiceError::Overflow)
    })?;
    let tax = tax_rate.apply(subtotal)?;
    let total = subtotal.checked_add(tax).ok_or(InvoiceError::Overflow)?;
    Ok(InvoiceTotals {
        subtotal,
        tax,
        total,
    })
}

/// The business issuing the invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Company {
    pub name: String,
    /// Phone, email, website: printed as a block at the top right
    #[serde(default)]
    pub contact: Vec<String>,
    #[serde(default)]
    pub address: Vec<String>,
}

/// Who the invoice is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub address: Vec<String>,
}

/// Everything printed on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub issued: NaiveDate,
    pub company: Company,
    pub billed_to: Client,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub tax_rate: TaxRate,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Invoice {
    pub fn totals(&self) -> Result<InvoiceTotals, InvoiceError> {
        compute_totals(&self.items, self.tax_rate)
    }

    /// A builder's supply invoice, printed when no invoice data is given
    pub fn sample(issued: NaiveDate) -> Result<Invoice, InvoiceError> {
        Ok(Invoice {
            number: "0000000123".to_string(),
            issued,
            company: Company {
                name: "Gophercises Supply Co.".to_string(),
                contact: vec![
                    "(123) 456-7890".to_string(),
                    "jon@calhoun.io".to_string(),
                    "Gophercises.com".to_string(),
                ],
                address: vec![
                    "123 Fake St".to_string(),
                    "Some Town, PA".to_string(),
                    "12345".to_string(),
                ],
            },
            billed_to: Client {
                name: "Client Name".to_string(),
                address: vec![
                    "1 Client Address".to_string(),
                    "City, State, Country".to_string(),
                    "Postal Code".to_string(),
                ],
            },
            currency: Currency::default(),
            tax_rate: TaxRate::DEFAULT,
            items: vec![
                LineItem::new("2x6 Lumber - 8'", 375, 220)?,
                LineItem::new("Drywall Sheet", 822, 50)?,
                LineItem::new("Paint", 1455, 3)?,
                LineItem::new(
                    "Paint, with a description long enough that it has to wrap onto a second line",
                    1455,
                    3,
                )?,
                LineItem::new("Concrete (bag)", 2345, 4)?,
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<LineItem> {
        [(375, 220), (822, 50), (1455, 3), (1455, 3), (2345, 4)]
            .into_iter()
            .enumerate()
            .map(|(i, (price, qty))| LineItem::new(format!("item {i}"), price, qty).unwrap())
            .collect()
    }

    #[test]
    fn totals_for_the_sample_order() {
        let totals = compute_totals(&items(), TaxRate::new(0.09).unwrap()).unwrap();
        assert_eq!(totals.subtotal, 82500 + 41100 + 4365 + 4365 + 9380);
        assert_eq!(totals.subtotal, 141710);
        assert_eq!(totals.tax, 12753);
        assert_eq!(totals.total, 154463);
        assert_eq!(totals.total, totals.subtotal + totals.tax);
    }

    #[test]
    fn totals_are_idempotent_and_leave_items_untouched() {
        let items = items();
        let before = items.clone();
        let first = compute_totals(&items, TaxRate::DEFAULT).unwrap();
        let second = compute_totals(&items, TaxRate::DEFAULT).unwrap();
        assert_eq!(first, second);
        assert_eq!(items, before);
    }

    #[test]
    fn no_items_means_nothing_owed() {
        let totals = compute_totals(&[], TaxRate::DEFAULT).unwrap();
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn each_item_contributes_price_times_quantity() {
        for (price, qty) in [(0, 10), (10, 0), (1, 1), (999, 7), (123_456, 789)] {
            let item = LineItem::new("thing", price, qty).unwrap();
            assert_eq!(item.amount().unwrap(), (price * qty) as Pence);
            let totals = compute_totals(&[item], TaxRate::new(0.0).unwrap()).unwrap();
            assert_eq!(totals.subtotal, (price * qty) as Pence);
            assert_eq!(totals.total, totals.subtotal);
        }
    }

    #[test]
    fn malformed_items_are_rejected_at_construction() {
        assert_eq!(LineItem::new("  ", 1, 1), Err(InvoiceError::EmptyDescription));
        assert_eq!(
            LineItem::new("nails", -5, 1),
            Err(InvoiceError::NegativeUnitPrice {
                description: "nails".to_string(),
                pence: -5
            })
        );
        assert_eq!(
            LineItem::new("nails", 5, -1),
            Err(InvoiceError::NegativeQuantity {
                description: "nails".to_string(),
                quantity: -1
            })
        );
    }

    #[test]
    fn overflowing_amounts_are_an_error() {
        let item = LineItem::new("everything", i64::MAX, 3).unwrap();
        assert_eq!(
            compute_totals(&[item], TaxRate::DEFAULT),
            Err(InvoiceError::Overflow)
        );
    }

    #[test]
    fn line_items_deserialize_through_validation() {
        #[derive(Deserialize)]
        struct Items {
            items: Vec<LineItem>,
        }

        let ok: Items = toml::from_str(
            r#"
            [[items]]
            description = "Paint"
            unit_price = 1455
            quantity = 3
            "#,
        )
        .unwrap();
        assert_eq!(ok.items[0], LineItem::new("Paint", 1455, 3).unwrap());

        let bad = toml::from_str::<Items>(
            r#"
            [[items]]
            description = "Paint"
            unit_price = -1455
            quantity = 3
            "#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn sample_invoice_is_valid() {
        let invoice = Invoice::sample(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()).unwrap();
        assert_eq!(invoice.totals().unwrap().total, 154463);
    }
}
