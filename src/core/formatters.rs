//! Field formatters
//!
//! Pure functions that normalize raw fixed-width substrings into display
//! forms. Every formatter is total: malformed input degrades to a best-effort
//! value (usually the stripped digits) instead of failing.

use crate::types::Money;

/// Number of digits in a CPF (personal taxpayer document)
const CPF_LEN: usize = 11;
/// Number of digits in a CNPJ (company taxpayer document)
const CNPJ_LEN: usize = 14;

/// Keep only the ASCII digits of `raw`
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Render a centavos digit string as `R$ 1.234,56`
///
/// Non-digits are ignored. Empty, zero or unrepresentable input renders as
/// `R$ 0,00`.
pub fn format_money(raw_digits: &str) -> String {
    Money::from_digits(raw_digits).to_string()
}

/// Format a document number as a CPF: `XXX.XXX.XXX-XX`
///
/// Longer inputs keep only their last 11 digits (system-added prefixes are
/// dropped); shorter inputs are left-padded with zeros.
pub fn format_document(raw: &str) -> String {
    let digits = digits_only(raw);
    let tail = &digits[digits.len().saturating_sub(CPF_LEN)..];
    let doc = format!("{:0>width$}", tail, width = CPF_LEN);
    format_cpf(&doc)
}

/// Format a document as CPF (11 digits) or CNPJ (14 digits)
///
/// Any other length is returned as the stripped digits.
pub fn format_cpf_cnpj(raw: &str) -> String {
    let doc = digits_only(raw);
    match doc.len() {
        CPF_LEN => format_cpf(&doc),
        CNPJ_LEN => format!(
            "{}.{}.{}/{}-{}",
            &doc[..2],
            &doc[2..5],
            &doc[5..8],
            &doc[8..12],
            &doc[12..]
        ),
        _ => doc,
    }
}

// `doc` must be exactly 11 ASCII digits
fn format_cpf(doc: &str) -> String {
    format!(
        "{}.{}.{}-{}",
        &doc[..3],
        &doc[3..6],
        &doc[6..9],
        &doc[9..]
    )
}

/// Format a postal code (CEP) as `XXXXX-XXX` when it has exactly 8 digits
pub fn format_postal_code(raw: &str) -> String {
    let cep = digits_only(raw);
    if cep.len() == 8 {
        format!("{}-{}", &cep[..5], &cep[5..])
    } else {
        cep
    }
}

/// Format a phone number with area code
///
/// 11 digits (mobile) → `(XX) XXXXX-XXXX`, 10 digits (landline) →
/// `(XX) XXXX-XXXX`, anything else → stripped digits.
pub fn format_phone(raw: &str) -> String {
    let tel = digits_only(raw);
    match tel.len() {
        11 => format!("({}) {}-{}", &tel[..2], &tel[2..7], &tel[7..]),
        10 => format!("({}) {}-{}", &tel[..2], &tel[2..6], &tel[6..]),
        _ => tel,
    }
}
