//! CNAB-400 detail line parser
//!
//! Turns one fixed-width line into a [`DetailRecord`] following a [`Layout`]
//! table. Lines that are too short or that are not detail records (headers,
//! trailers, other record types) yield `None`; they are skipped, never
//! reported as errors.
//!
//! # Extraction
//!
//! - Stable fields (identifier, name, document, address, phone) are sliced
//!   from fixed character ranges and trimmed.
//! - Postal code and email are searched for inside a window, because their
//!   exact position depends on the length of the preceding address.
//! - The amount uses the layout's [`AmountSource`]: either a fixed field or
//!   a scan of the whole line for a zero-padded digit run closed by a known
//!   terminator.
//!
//! Field-level problems never abort a line: every extractor falls back to an
//! empty string or a zero amount.

use crate::core::formatters::{format_phone, format_postal_code};
use crate::core::layout::{AmountSource, FieldRange, Layout};
use crate::types::{CnabError, DetailRecord, Money};
use regex::Regex;

/// First 8-digit run, a CEP
const POSTAL_CODE_PATTERN: &str = r"[0-9]{8}";

/// Email token; must start with a letter so a postal code glued to the
/// address is not taken as part of the local part
const EMAIL_PATTERN: &str = r"[A-Za-z][A-Za-z0-9._%+-]*@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

/// Character-indexed view over a line
///
/// Layout ranges count characters, while `&str` indexing counts bytes; the
/// boundary table maps one to the other so slices stay zero-copy.
struct FixedLine<'a> {
    text: &'a str,
    bounds: Vec<usize>,
}

impl<'a> FixedLine<'a> {
    fn new(text: &'a str) -> Self {
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        FixedLine { text, bounds }
    }

    fn char_len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Slice a range, clamped to the line
    fn slice(&self, range: FieldRange) -> &'a str {
        let len = self.char_len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        &self.text[self.bounds[start]..self.bounds[end]]
    }

    fn field(&self, range: FieldRange) -> &'a str {
        self.slice(range).trim()
    }
}

/// Parser for detail lines of a single layout
///
/// Patterns are compiled once at construction; a parser is immutable and
/// can be shared between threads.
#[derive(Debug, Clone)]
pub struct LineParser {
    layout: Layout,
    amount_pattern: Option<Regex>,
    postal_code_pattern: Regex,
    email_pattern: Regex,
}

impl LineParser {
    /// Create a parser for a layout
    ///
    /// # Errors
    ///
    /// Returns `CnabError::InvalidPattern` if one of the extraction
    /// patterns does not compile.
    pub fn new(layout: Layout) -> Result<Self, CnabError> {
        let amount_pattern = layout
            .amount
            .pattern()
            .map(|source| Regex::new(&source))
            .transpose()?;

        Ok(LineParser {
            layout,
            amount_pattern,
            postal_code_pattern: Regex::new(POSTAL_CODE_PATTERN)?,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// The layout this parser reads
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether a line is long enough to hold a record
    pub fn is_record_length(&self, line: &str) -> bool {
        line.chars().count() >= self.layout.record_len
    }

    /// Parse one line
    ///
    /// # Returns
    ///
    /// * `Some(DetailRecord)` for a detail line of sufficient length
    /// * `None` for short lines and for any other record type
    pub fn parse(&self, line: &str) -> Option<DetailRecord> {
        let line = FixedLine::new(line);
        if line.char_len() < self.layout.record_len {
            return None;
        }
        if line.text.chars().next() != Some(self.layout.detail_marker) {
            return None;
        }

        let raw_id = line.field(self.layout.operation_id);
        let (operation_id, installment) = self.layout.operation_id_rule.split(raw_id);

        let phone = format_phone(line.field(self.layout.phone));

        Some(DetailRecord {
            customer_name: line.field(self.layout.customer_name).to_string(),
            document: self
                .layout
                .document_style
                .format(line.field(self.layout.document)),
            amount: self.extract_amount(&line),
            operation_id,
            installment,
            address: line.field(self.layout.address).to_string(),
            postal_code: self.extract_postal_code(&line),
            email: self.extract_email(&line),
            phone: (!phone.is_empty()).then_some(phone),
        })
    }

    fn extract_amount(&self, line: &FixedLine<'_>) -> Money {
        match (&self.layout.amount, &self.amount_pattern) {
            (AmountSource::Fixed(range), _) => Money::from_centavos_field(line.slice(*range)),
            (AmountSource::Terminated { .. }, Some(pattern)) => pattern
                .captures(line.text)
                .and_then(|caps| caps.get(1))
                .map(|centavos| Money::from_digits(centavos.as_str()))
                .unwrap_or(Money::ZERO),
            (AmountSource::Terminated { .. }, None) => Money::ZERO,
        }
    }

    fn extract_postal_code(&self, line: &FixedLine<'_>) -> String {
        self.postal_code_pattern
            .find(line.slice(self.layout.postal_code_window))
            .map(|cep| format_postal_code(cep.as_str()))
            .unwrap_or_default()
    }

    fn extract_email(&self, line: &FixedLine<'_>) -> Option<String> {
        self.email_pattern
            .find(line.slice(self.layout.email_window))
            .map(|email| email.as_str().to_lowercase())
    }
}
