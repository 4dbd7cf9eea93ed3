use eframe::egui::{RichText, Ui};

use crate::data::summary::SummaryScalars;

// ---------------------------------------------------------------------------
// Metric row (top of the central panel)
// ---------------------------------------------------------------------------

/// Render the summary metrics side by side. Medians that are undefined are
/// left out.
pub fn metrics_row(ui: &mut Ui, summary: &SummaryScalars) {
    let mut cards = vec![("Rows", thousands(summary.row_count as i64))];
    if let Some(price) = summary.median_price {
        cards.push(("Median price", format!("${}", thousands(price as i64))));
    }
    if let Some(odometer) = summary.median_odometer {
        cards.push(("Median odometer", format!("{} mi", thousands(odometer as i64))));
    }
    if let Some(year) = summary.median_year {
        cards.push(("Median year", format!("{}", year as i64)));
    }

    ui.columns(cards.len(), |columns| {
        for (col, (label, value)) in columns.iter_mut().zip(cards) {
            col.strong(label);
            col.label(RichText::new(value).size(28.0).strong());
        }
    });
}

/// Format an integer with `,` thousands separators.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
        assert_eq!(thousands(-45000), "-45,000");
    }
}
