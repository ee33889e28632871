//! Progressive input masks.
//!
//! # Design
//! Every mask is a pure rewrite of a field's full current text: the input is
//! reduced to its digits, capped to the pattern's length, and separators are
//! placed by position. A separator is only emitted once a digit follows it,
//! so a half-typed value renders as a prefix of the final pattern.
//!
//! The document mask switches from the personal pattern (`000.000.000-00`)
//! to the entity pattern (`00.000.000/0000-00`) when the twelfth digit
//! arrives, which reshuffles the separators of what was already typed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::strip_non_digits;

/// Which mask a field uses. Names match the `data-mask` markup attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskKind {
    /// Personal or entity taxpayer id, picked by digit count.
    #[serde(rename = "document")]
    Document,
    /// Landline or mobile number with area code.
    #[serde(rename = "phone")]
    Phone,
    /// Postal code (CEP).
    #[serde(rename = "cep")]
    PostalCode,
    /// Amount typed in cents, shown in reais.
    #[serde(rename = "currency")]
    Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mask kind: {0}")]
pub struct UnknownMaskKind(pub String);

impl MaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MaskKind::Document => "document",
            MaskKind::Phone => "phone",
            MaskKind::PostalCode => "cep",
            MaskKind::Currency => "currency",
        }
    }

    /// Digits beyond this count are dropped. `None` means unbounded.
    pub fn max_digits(self) -> Option<usize> {
        match self {
            MaskKind::Document => Some(14),
            MaskKind::Phone => Some(11),
            MaskKind::PostalCode => Some(8),
            MaskKind::Currency => None,
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaskKind {
    type Err = UnknownMaskKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(MaskKind::Document),
            "phone" => Ok(MaskKind::Phone),
            "cep" => Ok(MaskKind::PostalCode),
            "currency" => Ok(MaskKind::Currency),
            other => Err(UnknownMaskKind(other.to_string())),
        }
    }
}

/// Reformat `raw` into the display pattern for `kind`.
///
/// Never fails: incomplete input yields a partially formatted string.
pub fn apply_mask(raw: &str, kind: MaskKind) -> String {
    let mut digits = strip_non_digits(raw);
    if let Some(max) = kind.max_digits() {
        digits.truncate(max);
    }
    match kind {
        MaskKind::Document => mask_document(&digits),
        MaskKind::Phone => mask_phone(&digits),
        MaskKind::PostalCode => group(&digits, &[5, 3], &["-"]),
        MaskKind::Currency => mask_currency(&digits),
    }
}

fn mask_document(digits: &str) -> String {
    if digits.len() <= 11 {
        group(digits, &[3, 3, 3, 2], &[".", ".", "-"])
    } else {
        group(digits, &[2, 3, 3, 4, 2], &[".", ".", "/", "-"])
    }
}

fn mask_phone(digits: &str) -> String {
    if digits.len() <= 2 {
        return digits.to_string();
    }
    let (area, number) = digits.split_at(2);
    let local = if digits.len() <= 10 {
        group(number, &[4, 4], &["-"])
    } else {
        group(number, &[5, 4], &["-"])
    };
    format!("({area}) {local}")
}

/// Cents in, `R$ 1.234,56` out. Works on the digit string directly so any
/// number of digits is accepted.
fn mask_currency(digits: &str) -> String {
    let significant = digits.trim_start_matches('0');
    let padded = format!("{significant:0>3}");
    let (integer, cents) = padded.split_at(padded.len() - 2);
    format!("R$ {},{cents}", group_thousands(integer))
}

/// Insert `.` every three digits counting from the right.
pub(crate) fn group_thousands(integer: &str) -> String {
    let mut out = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Split `digits` into consecutive groups of `sizes`, joining them with
/// `separators[k]` between group `k` and `k + 1`. The last group absorbs any
/// leftover digits.
fn group(digits: &str, sizes: &[usize], separators: &[&str]) -> String {
    let mut out = String::with_capacity(digits.len() + separators.len() * 2);
    let mut rest = digits;
    for (k, &size) in sizes.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        if k > 0 {
            out.push_str(separators[k - 1]);
        }
        let take = if k + 1 == sizes.len() {
            rest.len()
        } else {
            size.min(rest.len())
        };
        let (head, tail) = rest.split_at(take);
        out.push_str(head);
        rest = tail;
    }
    out
}
