//! Receipt

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    lines::{CartLine, Selection},
    pricing::{CartTotals, format_amount},
};

/// Errors writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Output could not be written
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Writes the cart as a table followed by its totals.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if writing to `out` fails.
pub fn write_receipt(
    mut out: impl io::Write,
    lines: &[CartLine],
    totals: &CartTotals,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    if lines.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Options", "Qty", "Unit Price", "Total"]);

    for line in lines {
        builder.push_record([
            line.id.clone(),
            line.name.clone(),
            describe_customizations(line),
            line.quantity.to_string(),
            format_amount(line.unit_price, currency),
            format_amount(line.line_total(), currency),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Items:     {}", totals.item_count)?;
    writeln!(out, "Subtotal:  {}", format_amount(totals.subtotal, currency))?;

    if totals.delivery_fee == Decimal::ZERO {
        writeln!(out, "Delivery:  Free")?;
    } else {
        writeln!(
            out,
            "Delivery:  {}",
            format_amount(totals.delivery_fee, currency)
        )?;
    }

    writeln!(out, "Total:     {}", format_amount(totals.total, currency))?;

    Ok(())
}

/// `patty: beef; extras: bacon, egg`, skipping empty multi-selections.
fn describe_customizations(line: &CartLine) -> String {
    let Some(customizations) = &line.customizations else {
        return String::new();
    };

    customizations
        .iter()
        .filter(|(_, selection)| !matches!(selection, Selection::Multiple(o) if o.is_empty()))
        .map(|(category, selection)| {
            let options: Vec<&str> = selection.options().collect();
            format!("{category}: {}", options.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{lines::Customizations, pricing::DeliveryPolicy};

    use super::*;

    fn render(lines: &[CartLine]) -> TestResult<String> {
        let totals = CartTotals::from_lines(lines, &DeliveryPolicy::default());
        let mut out = Vec::new();

        write_receipt(&mut out, lines, &totals, iso::USD)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn empty_cart() -> TestResult {
        assert_eq!(render(&[])?, "Your cart is empty\n");

        Ok(())
    }

    #[test]
    fn lists_lines_and_totals() -> TestResult {
        let mut customizations = Customizations::new();
        customizations.insert("patty".into(), Selection::Single("beef".into()));
        customizations.insert(
            "extras".into(),
            Selection::Multiple(vec!["bacon".into(), "egg".into()]),
        );
        customizations.insert("sauce".into(), Selection::Multiple(Vec::new()));

        let line = CartLine::new(
            "1",
            "Classic Cheeseburger",
            Decimal::new(12_99, 2),
            NonZeroU32::new(3).ok_or("non-zero")?,
            "",
            "1",
        )
        .with_customizations(customizations);

        let output = render(&[line])?;

        assert!(output.contains("Classic Cheeseburger"), "{output}");
        assert!(output.contains("extras: bacon, egg; patty: beef"), "{output}");
        assert!(!output.contains("sauce"), "{output}");
        assert!(output.contains("38.97"), "{output}");
        assert!(output.contains("Delivery:  Free"), "{output}");

        Ok(())
    }

    #[test]
    fn shows_delivery_fee_below_threshold() -> TestResult {
        let line = CartLine::new("2", "Fries", Decimal::new(3_50, 2), NonZeroU32::MIN, "", "1");

        let output = render(&[line])?;

        assert!(output.contains("2.99"), "{output}");
        assert!(output.contains("6.49"), "{output}");

        Ok(())
    }
}
