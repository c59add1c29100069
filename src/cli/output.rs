use std::{fmt, io::Write};

use colored::Colorize;
use split_core::Tone;

use crate::errors::Result;

/// Message categories used by the report printer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    pub colors: bool,
    pub screen_reader_mode: bool,
}

impl OutputPreferences {
    fn styled(&self) -> bool {
        self.colors && !self.screen_reader_mode
    }
}

/// Writes report lines, styling them according to the preferences.
pub struct Printer<'a> {
    out: &'a mut dyn Write,
    prefs: OutputPreferences,
}

impl<'a> Printer<'a> {
    pub fn new(out: &'a mut dyn Write, prefs: OutputPreferences) -> Self {
        Self { out, prefs }
    }

    pub fn print(&mut self, kind: MessageKind, message: impl fmt::Display) -> Result<()> {
        let line = apply_style(kind, message, &self.prefs);
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn section(&mut self, title: impl fmt::Display) -> Result<()> {
        self.print(MessageKind::Section, title)
    }

    pub fn info(&mut self, message: impl fmt::Display) -> Result<()> {
        self.print(MessageKind::Info, message)
    }

    pub fn success(&mut self, message: impl fmt::Display) -> Result<()> {
        self.print(MessageKind::Success, message)
    }

    pub fn warning(&mut self, message: impl fmt::Display) -> Result<()> {
        self.print(MessageKind::Warning, message)
    }

    /// Colors `text` by balance tone: green credit, red debit, dimmed zero.
    pub fn toned(&self, text: &str, tone: Tone) -> String {
        if !self.prefs.styled() {
            return text.to_string();
        }
        match tone {
            Tone::Credit => text.green().to_string(),
            Tone::Debit => text.red().to_string(),
            Tone::Neutral => text.dimmed().to_string(),
        }
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Warning if prefs.screen_reader_mode => format!("Warning: {text}"),
        MessageKind::Warning => format!("[!] {text}"),
        MessageKind::Success if prefs.screen_reader_mode => format!("Done: {text}"),
        MessageKind::Success => format!("[ok] {text}"),
        MessageKind::Info => text,
    };

    if !prefs.styled() {
        return base;
    }

    match kind {
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Info => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escape_codes() {
        let mut buffer = Vec::new();
        let mut printer = Printer::new(&mut buffer, OutputPreferences::default());
        printer.section("Balances").unwrap();
        printer.warning("mismatch").unwrap();
        let rendered = printer.toned("+$1.00", Tone::Credit);
        assert_eq!(rendered, "+$1.00");

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "=== Balances ===\n[!] mismatch\n");
    }

    #[test]
    fn screen_reader_mode_spells_out_markers() {
        let prefs = OutputPreferences {
            colors: true,
            screen_reader_mode: true,
        };
        assert_eq!(apply_style(MessageKind::Warning, "late", &prefs), "Warning: late");
        assert_eq!(apply_style(MessageKind::Success, "saved", &prefs), "Done: saved");
    }
}
