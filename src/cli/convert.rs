use crate::cli::ui;
use crate::core::convert::{Quote, format_amount, format_rate};

/// The exchange-rate line: `1 USD = 0.9000 EUR`.
pub fn rate_line(from: &str, to: &str, rate: f64) -> String {
    format!("1 {from} = {} {to}", format_rate(rate))
}

/// The conversion line: `10 USD = 9.00 EUR`.
///
/// With no amount entered the placeholders `0` and `0.00` are shown.
pub fn result_line(from: &str, to: &str, quote: &Quote) -> String {
    let amount = quote
        .amount
        .map_or("0".to_string(), |a| format_amount(a));
    let converted = quote
        .converted
        .map_or("0.00".to_string(), |c| format_amount(c));
    format!(
        "{amount} {from} = {} {to}",
        ui::style_text(&converted, ui::StyleType::ResultValue)
    )
}

/// Renders a full conversion: rate line above, result line below.
pub fn render(from: &str, to: &str, quote: &Quote) -> String {
    format!(
        "{}\n{}",
        ui::style_text(&rate_line(from, to, quote.rate), ui::StyleType::Subtle),
        result_line(from, to, quote)
    )
}
