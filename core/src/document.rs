//! Check-digit validation for Brazilian taxpayer identifiers.
//!
//! # Design
//! Two formats are supported: the 11-digit personal identifier (CPF) and the
//! 14-digit entity identifier (CNPJ). Both carry two trailing check digits
//! computed with a weighted sum modulo 11. Input is reduced to its ASCII
//! digits before evaluation, so masked and unmasked forms validate the same.
//!
//! `validate_document` is the boolean entry point used by form fields.
//! `Document::parse` is the typed counterpart for code that wants to keep the
//! validated value around.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mask::{apply_mask, MaskKind};

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;

/// Which identifier format a digit string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// 11-digit individual taxpayer id (CPF).
    Personal,
    /// 14-digit organization taxpayer id (CNPJ).
    Entity,
}

impl DocumentKind {
    /// Detect the kind from the number of digits in `raw`.
    pub fn detect(raw: &str) -> Option<Self> {
        match digit_count(raw) {
            CPF_LEN => Some(DocumentKind::Personal),
            CNPJ_LEN => Some(DocumentKind::Entity),
            _ => None,
        }
    }
}

/// Why a string was rejected by `Document::parse`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("expected 11 or 14 digits, got {0}")]
    InvalidLength(usize),

    #[error("identifier is a single repeated digit")]
    RepeatedDigits,

    #[error("check digits do not match")]
    ChecksumMismatch,
}

/// Returns `raw` with every character that is not an ASCII digit removed.
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn digit_count(raw: &str) -> usize {
    raw.chars().filter(char::is_ascii_digit).count()
}

/// Validate a personal or entity identifier, masked or not.
///
/// Returns `false` for anything that is not exactly 11 or 14 digits after
/// stripping, for single-repeated-digit strings, and for bad check digits.
pub fn validate_document(raw: &str) -> bool {
    let digits = strip_non_digits(raw);
    match digits.len() {
        CPF_LEN => validate_cpf(&digits),
        CNPJ_LEN => validate_cnpj(&digits),
        _ => false,
    }
}

/// Validate an already-stripped 11-digit personal identifier.
pub fn validate_cpf(digits: &str) -> bool {
    check(digits, CPF_LEN, cpf_check_digit).is_ok()
}

/// Validate an already-stripped 14-digit entity identifier.
pub fn validate_cnpj(digits: &str) -> bool {
    check(digits, CNPJ_LEN, cnpj_check_digit).is_ok()
}

/// Shared two-pass check: the first check digit is computed over every digit
/// before it, the second over every digit before it including the first.
fn check(digits: &str, len: usize, check_digit: fn(&[u8]) -> u8) -> Result<(), DocumentError> {
    let values: Vec<u8> = digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    if values.len() != len || values.len() != digits.len() {
        return Err(DocumentError::InvalidLength(values.len()));
    }
    if values.iter().all(|&d| d == values[0]) {
        return Err(DocumentError::RepeatedDigits);
    }
    for position in [len - 2, len - 1] {
        if check_digit(&values[..position]) != values[position] {
            return Err(DocumentError::ChecksumMismatch);
        }
    }
    Ok(())
}

/// Weights run from `len + 1` down to 2; remainders of 10 collapse to 0.
fn cpf_check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();
    let remainder = 11 - sum % 11;
    if remainder >= 10 {
        0
    } else {
        remainder as u8
    }
}

/// Weights cycle 9..2 from the right, starting at `len - 7` on the left.
fn cnpj_check_digit(digits: &[u8]) -> u8 {
    let mut weight = digits.len() as u32 - 7;
    let mut sum = 0u32;
    for &d in digits {
        sum += u32::from(d) * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }
    match sum % 11 {
        0 | 1 => 0,
        r => (11 - r) as u8,
    }
}

/// A taxpayer identifier whose check digits have been verified.
///
/// Holds the bare digits; `Display` and serde use the masked form
/// (`111.444.777-35`, `11.222.333/0001-81`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Document {
    digits: String,
    kind: DocumentKind,
}

impl Document {
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let digits = strip_non_digits(raw);
        let kind = match digits.len() {
            CPF_LEN => DocumentKind::Personal,
            CNPJ_LEN => DocumentKind::Entity,
            n => return Err(DocumentError::InvalidLength(n)),
        };
        match kind {
            DocumentKind::Personal => check(&digits, CPF_LEN, cpf_check_digit)?,
            DocumentKind::Entity => check(&digits, CNPJ_LEN, cnpj_check_digit)?,
        }
        Ok(Self { digits, kind })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// The identifier without separators.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn masked(&self) -> String {
        apply_mask(&self.digits, MaskKind::Document)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

impl TryFrom<String> for Document {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Document::parse(&value)
    }
}

impl From<Document> for String {
    fn from(doc: Document) -> Self {
        doc.masked()
    }
}
