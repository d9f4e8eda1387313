//! Declarative CNAB-400 layouts
//!
//! A [`Layout`] describes where every field of a detail record lives: fixed
//! character ranges for the stable fields, search windows for the fields
//! located by pattern, and the strategies used to extract the amount and to
//! derive the grouping key from the title identifier. Parsing logic only
//! reads the table, so a new file variant means a new table, not new code.
//!
//! Ranges are 0-based, end-exclusive and counted in characters.

use crate::cli::LayoutVersion;
use crate::core::formatters::{format_cpf_cnpj, format_document};

/// A half-open character range `[start, end)` within a record line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub start: usize,
    pub end: usize,
}

impl FieldRange {
    pub const fn new(start: usize, end: usize) -> Self {
        FieldRange { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// How the installment amount is located in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSource {
    /// A fixed centavos field; non-digit content yields zero
    Fixed(FieldRange),

    /// Scan the whole line for a run of at least `min_leading_zeros` zeros,
    /// followed by the centavos digits, followed by `terminator`
    ///
    /// Used when the amount drifts between file variants but is always
    /// followed by the same literal digits.
    Terminated {
        min_leading_zeros: usize,
        terminator: &'static str,
    },
}

impl AmountSource {
    /// Regex source for pattern-based strategies, `None` for fixed fields
    ///
    /// The first capture group holds the centavos digits.
    pub fn pattern(&self) -> Option<String> {
        match self {
            AmountSource::Fixed(_) => None,
            AmountSource::Terminated {
                min_leading_zeros,
                terminator,
            } => Some(format!(
                r"0{{{},}}([0-9]+){}",
                min_leading_zeros,
                regex::escape(terminator)
            )),
        }
    }
}

/// How the grouping key is derived from the raw title identifier
///
/// Title identifiers look like `2104757146-027`: a core operation number and
/// an installment suffix, optionally preceded by a bank prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationIdRule {
    /// Keep the full identifier, suffix included
    Verbatim,

    /// Keep only the core operation number
    ///
    /// A leading all-digit prefix of `bank_prefix_len` characters is removed
    /// when the part before the hyphen is exactly `bank_prefix_len +
    /// core_len` characters long. Everything from the hyphen onward is
    /// dropped.
    CoreNumber {
        bank_prefix_len: usize,
        core_len: usize,
    },
}

impl OperationIdRule {
    /// Split a trimmed raw identifier into `(operation_id, installment)`
    pub fn split(&self, raw: &str) -> (String, String) {
        let mut parts = raw.split('-');
        let head = parts.next().unwrap_or_default();
        let installment = match parts.next() {
            Some(suffix) => {
                let number = suffix.trim_start_matches('0');
                if number.is_empty() { "0" } else { number }
            }
            None => "",
        };

        let operation_id = match self {
            OperationIdRule::Verbatim => raw,
            OperationIdRule::CoreNumber {
                bank_prefix_len,
                core_len,
            } => strip_bank_prefix(head, *bank_prefix_len, *core_len),
        };

        (operation_id.to_string(), installment.to_string())
    }
}

fn strip_bank_prefix(head: &str, prefix_len: usize, core_len: usize) -> &str {
    if head.chars().count() != prefix_len + core_len {
        return head;
    }
    match head.char_indices().nth(prefix_len) {
        Some((split, _)) if head[..split].chars().all(|c| c.is_ascii_digit()) => &head[split..],
        _ => head,
    }
}

/// Which document formatter applies to the document field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStyle {
    /// Always normalize to an 11-digit CPF
    Personal,
    /// CPF for 11 digits, CNPJ for 14, raw digits otherwise
    PersonalOrCompany,
}

impl DocumentStyle {
    pub fn format(&self, raw: &str) -> String {
        match self {
            DocumentStyle::Personal => format_document(raw),
            DocumentStyle::PersonalOrCompany => format_cpf_cnpj(raw),
        }
    }
}

/// Field table of one CNAB-400 detail record variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    /// Minimum line length; shorter lines are not records
    pub record_len: usize,
    /// First character of a detail record
    pub detail_marker: char,
    pub operation_id: FieldRange,
    pub customer_name: FieldRange,
    pub document: FieldRange,
    pub address: FieldRange,
    pub phone: FieldRange,
    /// Window searched for the first 8-digit postal code
    pub postal_code_window: FieldRange,
    /// Window searched for the first email-shaped token
    pub email_window: FieldRange,
    pub amount: AmountSource,
    pub operation_id_rule: OperationIdRule,
    pub document_style: DocumentStyle,
}

/// UY3 layout exported one row per operation
///
/// The identifier window is widened to the left to catch the bank prefix,
/// and the amount is found by its `457` terminator because its offset
/// varies between files.
pub const UY3_AGGREGATED: Layout = Layout {
    name: "uy3-aggregated",
    record_len: 400,
    detail_marker: '1',
    operation_id: FieldRange::new(105, 122),
    customer_name: FieldRange::new(234, 274),
    document: FieldRange::new(220, 234),
    address: FieldRange::new(274, 326),
    phone: FieldRange::new(382, 394),
    postal_code_window: FieldRange::new(310, 340),
    email_window: FieldRange::new(326, 385),
    amount: AmountSource::Terminated {
        min_leading_zeros: 5,
        terminator: "457",
    },
    operation_id_rule: OperationIdRule::CoreNumber {
        bank_prefix_len: 3,
        core_len: 10,
    },
    document_style: DocumentStyle::Personal,
};

/// UY3 layout exported one row per installment
pub const UY3_INSTALLMENTS: Layout = Layout {
    name: "uy3-installments",
    record_len: 400,
    detail_marker: '1',
    operation_id: FieldRange::new(108, 122),
    customer_name: FieldRange::new(234, 274),
    document: FieldRange::new(220, 234),
    address: FieldRange::new(274, 326),
    phone: FieldRange::new(382, 394),
    postal_code_window: FieldRange::new(310, 340),
    email_window: FieldRange::new(326, 385),
    amount: AmountSource::Fixed(FieldRange::new(200, 207)),
    operation_id_rule: OperationIdRule::Verbatim,
    document_style: DocumentStyle::PersonalOrCompany,
};

impl Layout {
    /// Look up the field table for a layout version
    pub fn for_version(version: LayoutVersion) -> Layout {
        match version {
            LayoutVersion::Uy3Aggregated => UY3_AGGREGATED,
            LayoutVersion::Uy3Installments => UY3_INSTALLMENTS,
        }
    }

    /// All fixed ranges and windows of the table
    pub fn ranges(&self) -> Vec<FieldRange> {
        let mut ranges = vec![
            self.operation_id,
            self.customer_name,
            self.document,
            self.address,
            self.phone,
            self.postal_code_window,
            self.email_window,
        ];
        if let AmountSource::Fixed(range) = self.amount {
            ranges.push(range);
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::aggregated(UY3_AGGREGATED)]
    #[case::installments(UY3_INSTALLMENTS)]
    fn test_ranges_fit_in_record(#[case] layout: Layout) {
        for range in layout.ranges() {
            assert!(!range.is_empty(), "{:?} is empty in {}", range, layout.name);
            assert!(
                range.end <= layout.record_len,
                "{:?} exceeds record length in {}",
                range,
                layout.name
            );
        }
    }

    #[test]
    fn test_for_version() {
        assert_eq!(
            Layout::for_version(LayoutVersion::Uy3Aggregated),
            UY3_AGGREGATED
        );
        assert_eq!(
            Layout::for_version(LayoutVersion::Uy3Installments),
            UY3_INSTALLMENTS
        );
    }

    #[test]
    fn test_terminated_pattern() {
        assert_eq!(
            UY3_AGGREGATED.amount.pattern().as_deref(),
            Some(r"0{5,}([0-9]+)457")
        );
        assert_eq!(UY3_INSTALLMENTS.amount.pattern(), None);
    }

    const CORE: OperationIdRule = OperationIdRule::CoreNumber {
        bank_prefix_len: 3,
        core_len: 10,
    };

    #[rstest]
    #[case::plain("2104757146-027", "2104757146", "27")]
    #[case::bank_prefix("3292104757146-027", "2104757146", "27")]
    #[case::all_zero_suffix("2104757146-000", "2104757146", "0")]
    #[case::empty_suffix("2104757146-", "2104757146", "0")]
    #[case::no_suffix("2104757146", "2104757146", "")]
    #[case::short_key("A-1", "A", "1")]
    #[case::non_digit_prefix("AB92104757146-001", "AB92104757146", "1")]
    #[case::empty("", "", "")]
    fn test_core_number_split(
        #[case] raw: &str,
        #[case] expected_id: &str,
        #[case] expected_installment: &str,
    ) {
        let (id, installment) = CORE.split(raw);
        assert_eq!(id, expected_id);
        assert_eq!(installment, expected_installment);
    }

    #[test]
    fn test_verbatim_split_keeps_suffix() {
        let (id, installment) = OperationIdRule::Verbatim.split("2104757146-027");
        assert_eq!(id, "2104757146-027");
        assert_eq!(installment, "27");
    }

    #[rstest]
    #[case::personal(DocumentStyle::Personal, "12345678000195", "456.780.001-95")]
    #[case::company(DocumentStyle::PersonalOrCompany, "12345678000195", "12.345.678/0001-95")]
    fn test_document_style(
        #[case] style: DocumentStyle,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(style.format(raw), expected);
    }
}
