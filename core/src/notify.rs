//! Toast notifications as plain data.
//!
//! The host owns the widget that actually shows a toast; the core only
//! decides what to say and how severe it is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a toast. Names match the toolkit's contextual colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toast level: {0}")]
pub struct UnknownToastLevel(pub String);

impl ToastLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Danger => "danger",
        }
    }

    /// Background class for the toast container, e.g. `bg-danger`.
    pub fn css_class(self) -> String {
        format!("bg-{}", self.as_str())
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastLevel {
    type Err = UnknownToastLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(ToastLevel::Info),
            "success" => Ok(ToastLevel::Success),
            "warning" => Ok(ToastLevel::Warning),
            "danger" => Ok(ToastLevel::Danger),
            other => Err(UnknownToastLevel(other.to_string())),
        }
    }
}

/// A message for the host to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    #[serde(default)]
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Danger)
    }
}
