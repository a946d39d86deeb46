//! Interactive conversion session.
//!
//! Holds the selected currency pair and the raw amount field, and applies
//! user actions one at a time. The rate snapshot itself is immutable; only
//! the selection state changes.

use crate::cli::convert as convert_view;
use crate::cli::list;
use crate::cli::ui;
use crate::core::convert::{AmountInput, parse_amount, quote, swap};
use crate::core::error::ConvertError;
use crate::core::rates::{RateTable, normalize_code};
use crate::core::state::LoadState;
use anyhow::Result;
use console::Term;
use tracing::debug;

const HELP: &str =
    "Enter an amount to convert, or: from <code> | to <code> | swap | list | help | quit";

/// Result of applying one line of user input.
pub enum Outcome {
    Render(String),
    Quit,
}

pub struct ConverterSession {
    state: LoadState,
    from: String,
    to: String,
    amount: String,
}

impl ConverterSession {
    /// Builds a session over a resolved load state.
    ///
    /// The source currency defaults to `preferred_from` when listed, and the
    /// destination to EUR when available, else the first other listed
    /// currency.
    pub fn new(state: LoadState, preferred_from: &str) -> Self {
        let (from, to) = match state.table() {
            Some(table) => {
                let preferred = normalize_code(preferred_from);
                let from = if table.contains(&preferred) {
                    preferred
                } else {
                    table.base().to_string()
                };
                let to = if table.contains("EUR") && from != "EUR" {
                    "EUR".to_string()
                } else {
                    table
                        .currencies()
                        .find(|c| *c != from)
                        .unwrap_or(from.as_str())
                        .to_string()
                };
                (from, to)
            }
            None => (normalize_code(preferred_from), "EUR".to_string()),
        };

        ConverterSession {
            state,
            from,
            to,
            amount: String::new(),
        }
    }

    pub fn from_currency(&self) -> &str {
        &self.from
    }

    pub fn to_currency(&self) -> &str {
        &self.to
    }

    fn table(&self) -> Option<&RateTable> {
        self.state.table()
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.amount = raw.trim().to_string();
    }

    pub fn set_from(&mut self, code: &str) -> Result<(), ConvertError> {
        self.from = self.checked_code(code)?;
        Ok(())
    }

    pub fn set_to(&mut self, code: &str) -> Result<(), ConvertError> {
        self.to = self.checked_code(code)?;
        Ok(())
    }

    pub fn swap_currencies(&mut self) {
        let (from, to) = swap(std::mem::take(&mut self.from), std::mem::take(&mut self.to));
        self.from = from;
        self.to = to;
        debug!(from = %self.from, to = %self.to, "Swapped currencies");
    }

    fn checked_code(&self, code: &str) -> Result<String, ConvertError> {
        let code = normalize_code(code);
        match self.table() {
            Some(table) if table.contains(&code) => Ok(code),
            _ => Err(ConvertError::UnknownCurrency(code)),
        }
    }

    /// Renders the converter panel for the current state.
    pub fn render(&self) -> String {
        match &self.state {
            LoadState::Loading => "Loading exchange rates...".to_string(),
            LoadState::Failed(message) => {
                ui::style_text(&format!("Error: {message}"), ui::StyleType::Error)
            }
            LoadState::Ready(table) => {
                // Invalid amount degrades to the empty display rather than
                // surfacing an error.
                let input = parse_amount(&self.amount).unwrap_or(AmountInput::Empty);
                let q = quote(table, &self.from, &self.to, input)
                    .expect("selected currencies come from the rate table");
                convert_view::render(&self.from, &self.to, &q)
            }
        }
    }

    /// Applies one line of user input and returns what to display next.
    pub fn apply(&mut self, line: &str) -> Outcome {
        let trimmed = line.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let argument = parts.next().map(str::trim).unwrap_or("");

        match (command.to_ascii_lowercase().as_str(), argument) {
            ("quit" | "exit" | "q", _) => Outcome::Quit,
            ("swap" | "s", _) => {
                self.swap_currencies();
                Outcome::Render(self.render())
            }
            ("list" | "l", _) => match self.table() {
                Some(table) => Outcome::Render(list::render(table)),
                None => Outcome::Render(self.render()),
            },
            ("help" | "h" | "?", _) => Outcome::Render(HELP.to_string()),
            ("from" | "f", code) | ("to" | "t", code) if !code.is_empty() => {
                let result = if matches!(command.to_ascii_lowercase().as_str(), "from" | "f") {
                    self.set_from(code)
                } else {
                    self.set_to(code)
                };
                match result {
                    Ok(()) => Outcome::Render(self.render()),
                    Err(e) => Outcome::Render(ui::style_text(&e.to_string(), ui::StyleType::Error)),
                }
            }
            _ => {
                self.set_amount(trimmed);
                Outcome::Render(self.render())
            }
        }
    }
}

/// Runs the interactive loop until the user quits or input ends.
pub fn run_session(state: LoadState, preferred_from: &str) -> Result<()> {
    let term = Term::stdout();
    let mut session = ConverterSession::new(state, preferred_from);

    term.write_line(&ui::style_text("Currency Converter", ui::StyleType::Title))?;
    term.write_line(&session.render())?;

    if session.table().is_none() {
        // Nothing to convert against; the failure panel has been shown.
        return Ok(());
    }
    term.write_line(&ui::style_text(HELP, ui::StyleType::Subtle))?;

    loop {
        term.write_str("> ")?;
        let line = match term.read_line() {
            Ok(line) => line,
            Err(_) => break,
        };
        match session.apply(&line) {
            Outcome::Quit => break,
            Outcome::Render(output) => term.write_line(&output)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoadError;

    fn ready_state() -> LoadState {
        let table = RateTable::new(
            "USD",
            vec![("EUR".to_string(), 0.9), ("JPY".to_string(), 150.0)],
            None,
        )
        .unwrap();
        let mut state = LoadState::new();
        state.resolve(Ok(table));
        state
    }

    fn plain(outcome: Outcome) -> String {
        match outcome {
            Outcome::Render(s) => console::strip_ansi_codes(&s).to_string(),
            Outcome::Quit => panic!("expected rendered output"),
        }
    }

    #[test]
    fn test_defaults_to_base_and_eur() {
        let session = ConverterSession::new(ready_state(), "USD");
        assert_eq!(session.from_currency(), "USD");
        assert_eq!(session.to_currency(), "EUR");
    }

    #[test]
    fn test_amount_entry_converts() {
        let mut session = ConverterSession::new(ready_state(), "USD");
        let output = plain(session.apply("10"));
        assert!(output.contains("1 USD = 0.9000 EUR"));
        assert!(output.contains("10.00 USD = 9.00 EUR"));
    }

    #[test]
    fn test_empty_amount_renders_placeholders() {
        let session = ConverterSession::new(ready_state(), "USD");
        let output = console::strip_ansi_codes(&session.render()).to_string();
        assert!(output.contains("0 USD = 0.00 EUR"));
    }

    #[test]
    fn test_invalid_amount_degrades_to_placeholders() {
        let mut session = ConverterSession::new(ready_state(), "USD");
        let output = plain(session.apply("ten dollars"));
        assert!(output.contains("0 USD = 0.00 EUR"));
    }

    #[test]
    fn test_swap_command() {
        let mut session = ConverterSession::new(ready_state(), "USD");
        session.apply("swap");
        assert_eq!(session.from_currency(), "EUR");
        assert_eq!(session.to_currency(), "USD");
        // Swapping twice restores the original pair.
        session.apply("swap");
        assert_eq!(session.from_currency(), "USD");
        assert_eq!(session.to_currency(), "EUR");
    }

    #[test]
    fn test_selecting_currencies() {
        let mut session = ConverterSession::new(ready_state(), "USD");
        session.apply("to jpy");
        assert_eq!(session.to_currency(), "JPY");
        session.apply("from EUR");
        assert_eq!(session.from_currency(), "EUR");
    }

    #[test]
    fn test_unknown_currency_is_rejected_and_selection_kept() {
        let mut session = ConverterSession::new(ready_state(), "USD");
        let output = plain(session.apply("to GBP"));
        assert!(output.contains("unknown currency: GBP"));
        assert_eq!(session.to_currency(), "EUR");
    }

    #[test]
    fn test_quit_command() {
        let mut session = ConverterSession::new(ready_state(), "USD");
        assert!(matches!(session.apply("quit"), Outcome::Quit));
    }

    #[test]
    fn test_failed_state_renders_error_panel() {
        let mut state = LoadState::new();
        state.resolve(Err(LoadError::Provider("invalid-key".to_string())));
        let session = ConverterSession::new(state, "USD");
        let output = console::strip_ansi_codes(&session.render()).to_string();
        assert_eq!(output, "Error: provider error: invalid-key");
    }

    #[test]
    fn test_loading_state_renders_placeholder() {
        let session = ConverterSession::new(LoadState::new(), "USD");
        assert_eq!(session.render(), "Loading exchange rates...");
    }
}
