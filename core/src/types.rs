//! Supplier DTOs for the `/suppliers` resource.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. The
//! document is carried as a validated `Document`, so a payload with bad check
//! digits fails to deserialize instead of reaching the form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    #[default]
    Ativo,
    Inativo,
    Suspenso,
}

/// A supplier returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub document: Document,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub status: SupplierStatus,
}

/// Request payload for creating a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupplier {
    pub name: String,
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub postal_code: String,
}

/// Request payload for updating a supplier. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSupplier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SupplierStatus>,
}
