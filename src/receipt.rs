//! Receipt
//!
//! Renders a ledger snapshot as a printable receipt. Debug and demo surface
//! only; nothing here feeds back into the totals.

use std::io;

use thiserror::Error;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::snapshot::LedgerSnapshot;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a snapshot as an item table followed by a totals summary.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the receipt cannot be written.
pub fn write_receipt(
    mut out: impl io::Write,
    snapshot: &LedgerSnapshot<'_>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Variant", "Qty", "Unit", "Total"]);

    for line in snapshot.lines() {
        builder.push_record([
            line.name.clone(),
            line.variant.qualifiers().join(", "),
            line.quantity.to_string(),
            line.unit_price.to_string(),
            line.line_total.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::sharp());
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

    write_summary(&mut out, snapshot)
}

fn write_summary(
    out: &mut impl io::Write,
    snapshot: &LedgerSnapshot<'_>,
) -> Result<(), ReceiptError> {
    let discount_label = match snapshot.coupon_code() {
        Some(code) => format!("Discount ({code}):"),
        None => "Discount:".to_string(),
    };

    let rows = [
        ("Subtotal:".to_string(), snapshot.subtotal().to_string()),
        ("Tax:".to_string(), snapshot.tax().to_string()),
        ("Shipping:".to_string(), snapshot.shipping().to_string()),
        (discount_label, format!("-{}", snapshot.discount())),
        ("Total:".to_string(), snapshot.total().to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, " {label:<label_width$} {value:>value_width$}")
            .map_err(|_err| ReceiptError::IO)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{items::LineItem, ledger::Ledger, products::ProductKey, variants::VariantKey};

    use super::*;

    #[test]
    fn receipt_lists_items_and_totals() -> TestResult {
        let mut ledger = Ledger::new(USD);

        ledger.add_item(LineItem::with_variant(
            ProductKey::default(),
            VariantKey::from_strs(&["large"]),
            "Classic Mug",
            Money::from_minor(500, USD),
            2,
        ))?;
        ledger.update_shipping(Money::from_minor(100, USD))?;
        ledger.apply_coupon("SAVE1", Money::from_minor(100, USD))?;

        let snapshot = ledger.snapshot()?;
        let mut rendered = Vec::new();

        write_receipt(&mut rendered, &snapshot)?;

        let text = String::from_utf8(rendered)?;

        assert!(text.contains("Classic Mug"), "item name missing: {text}");
        assert!(text.contains("large"), "variant missing: {text}");
        assert!(text.contains("Subtotal:"), "summary missing: {text}");
        assert!(
            text.contains("Discount (SAVE1):"),
            "coupon code missing: {text}"
        );

        Ok(())
    }

    #[test]
    fn empty_snapshot_still_renders_summary() -> TestResult {
        let ledger = Ledger::new(USD);
        let snapshot = ledger.snapshot()?;
        let mut rendered = Vec::new();

        write_receipt(&mut rendered, &snapshot)?;

        let text = String::from_utf8(rendered)?;

        assert!(text.contains("Total:"), "summary missing: {text}");

        Ok(())
    }
}
