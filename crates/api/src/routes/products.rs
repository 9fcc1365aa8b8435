//! Product route handlers.
//!
//! Every handler here sits behind the access token guard.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use inventario_core::{Product, ProductChanges, ProductDraft, ProductId};

use crate::db::RepositoryError;
use crate::error::Result;
use crate::middleware::CurrentIdentity;
use crate::state::AppState;

/// List every product, soft-deleted ones included.
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products().list().await)
}

/// Show a live product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    Ok(Json(state.products().get(id).await?))
}

/// Create a product. Responds `201` with the stored record.
pub async fn create(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(draft) = payload?;
    let fields = draft.validate()?;

    let product = state.products().create(fields).await?;
    tracing::info!(product_id = %product.id, by = %identity.email, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Overwrite the provided fields of a live product.
pub async fn update(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductChanges>, JsonRejection>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    let Json(changes) = payload?;

    let product = state.products().update(id, changes).await?;
    tracing::info!(product_id = %id, by = %identity.email, "Product updated");

    Ok(Json(product))
}

/// Soft-delete a live product.
pub async fn destroy(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> Result<&'static str> {
    let id = parse_id(&id)?;
    state.products().delete(id).await?;
    tracing::info!(product_id = %id, by = %identity.email, "Product deleted");

    Ok("Producto eliminado")
}

/// Path segments that are not integers cannot name a product.
fn parse_id(raw: &str) -> std::result::Result<ProductId, RepositoryError> {
    raw.parse().map_err(|_| RepositoryError::NotFound)
}
