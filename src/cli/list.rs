use crate::cli::ui;
use crate::core::convert::format_rate;
use crate::core::rates::RateTable;

/// Renders all listed currencies with their base-relative rates.
pub fn render(table: &RateTable) -> String {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (1 {} =)", table.base())),
    ]);

    for code in table.currencies() {
        // Codes come from the table, so the lookup cannot fail.
        let rate = table.rate(code).expect("listed currency has a rate");
        out.add_row(vec![
            comfy_table::Cell::new(code),
            ui::value_cell(&format_rate(rate)),
        ]);
    }

    let mut output = format!(
        "{} currencies against {}\n\n{}",
        table.len(),
        ui::style_text(table.base(), ui::StyleType::Title),
        out
    );

    if let Some(updated) = table.last_update() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("Rates as of {}", updated.format("%Y-%m-%d %H:%M UTC")),
                ui::StyleType::Subtle
            )
        ));
    }

    output
}
