//! In-memory supplier API used as a fixture for the client.
//!
//! Mutating requests must carry an `x-csrftoken` header (any value), and
//! supplier documents go through the same check-digit validation the pages
//! use. Documents are stored in their masked form and must be unique.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use gestao_core::{apply_mask, validate_document, MaskKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::warn;
use uuid::Uuid;

pub const CSRF_HEADER: &str = "x-csrftoken";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub postal_code: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateSupplier {
    pub name: String,
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub postal_code: String,
}

#[derive(Deserialize)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub status: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Supplier>>>;

type Rejection = (StatusCode, Json<Value>);

const STATUSES: [&str; 3] = ["ativo", "inativo", "suspenso"];

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/api/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, detail: &str) -> Rejection {
    (status, Json(json!({ "detail": detail })))
}

fn require_csrf(headers: &HeaderMap) -> Result<(), Rejection> {
    if headers.contains_key(CSRF_HEADER) {
        Ok(())
    } else {
        warn!("rejected mutating request without anti-forgery token");
        Err(reject(StatusCode::FORBIDDEN, "CSRF token missing"))
    }
}

async fn list_suppliers(State(db): State<Db>) -> Json<Vec<Supplier>> {
    let suppliers = db.read().await;
    let mut list: Vec<Supplier> = suppliers.values().cloned().collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    Json(list)
}

async fn create_supplier(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateSupplier>,
) -> Result<(StatusCode, Json<Supplier>), Rejection> {
    require_csrf(&headers)?;
    if !validate_document(&input.document) {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "invalid document"));
    }
    let document = apply_mask(&input.document, MaskKind::Document);
    let mut suppliers = db.write().await;
    if suppliers.values().any(|s| s.document == document) {
        return Err(reject(StatusCode::CONFLICT, "document already registered"));
    }
    let supplier = Supplier {
        id: Uuid::new_v4(),
        name: input.name,
        document,
        phone: apply_mask(&input.phone, MaskKind::Phone),
        postal_code: apply_mask(&input.postal_code, MaskKind::PostalCode),
        status: STATUSES[0].to_string(),
    };
    suppliers.insert(supplier.id, supplier.clone());
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn get_supplier(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, StatusCode> {
    let suppliers = db.read().await;
    suppliers.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_supplier(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<UpdateSupplier>,
) -> Result<Json<Supplier>, Rejection> {
    require_csrf(&headers)?;
    if let Some(status) = &input.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "invalid status"));
        }
    }
    let mut suppliers = db.write().await;
    let supplier = suppliers
        .get_mut(&id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "not found"))?;
    if let Some(name) = input.name {
        supplier.name = name;
    }
    if let Some(phone) = input.phone {
        supplier.phone = apply_mask(&phone, MaskKind::Phone);
    }
    if let Some(postal_code) = input.postal_code {
        supplier.postal_code = apply_mask(&postal_code, MaskKind::PostalCode);
    }
    if let Some(status) = input.status {
        supplier.status = status;
    }
    Ok(Json(supplier.clone()))
}

async fn delete_supplier(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    require_csrf(&headers)?;
    let mut suppliers = db.write().await;
    suppliers
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "not found"))
}
