//! Catalogue product types.
//!
//! [`Product`] is the stored record. Inbound payloads arrive as
//! [`ProductDraft`] (create) or [`ProductChanges`] (partial update) and are
//! validated here, before any store is touched.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Errors produced while validating product input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// A required field was absent or `null`.
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// The product name is empty or only whitespace.
    #[error("producto cannot be empty")]
    EmptyName,
    /// The price is negative, NaN or infinite.
    #[error("precio must be a non-negative number")]
    InvalidPrice,
    /// The stock quantity is negative.
    #[error("stock cannot be negative")]
    NegativeStock,
    /// An update carried no fields at all.
    #[error("no fields to update")]
    NoChanges,
}

/// A product in the catalogue.
///
/// Records are never physically removed: a deleted product keeps its row
/// with `eliminado = true` so that its ID is never handed out again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Name or description.
    pub producto: String,
    /// Brand identifier.
    pub marca: i64,
    /// Product line identifier.
    pub linea: i64,
    /// Unit price.
    pub precio: f64,
    /// Units on hand.
    pub stock: i64,
    /// Soft-delete flag.
    #[serde(default)]
    pub eliminado: bool,
}

impl Product {
    /// Build a live product from validated input.
    #[must_use]
    pub fn new(id: ProductId, fields: NewProduct) -> Self {
        Self {
            id,
            producto: fields.producto,
            marca: fields.marca,
            linea: fields.linea,
            precio: fields.precio,
            stock: fields.stock,
            eliminado: false,
        }
    }

    /// Whether the product is visible to lookups, updates and deletes.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.eliminado
    }

    /// Overwrite the fields present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(producto) = changes.producto {
            self.producto = producto;
        }
        if let Some(marca) = changes.marca {
            self.marca = marca;
        }
        if let Some(linea) = changes.linea {
            self.linea = linea;
        }
        if let Some(precio) = changes.precio {
            self.precio = precio;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
    }

    /// Check the stored field constraints, e.g. for records loaded from a seed file.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ProductError`].
    pub fn validate(&self) -> Result<(), ProductError> {
        check_name(&self.producto)?;
        check_price(self.precio)?;
        check_stock(self.stock)
    }
}

/// Validated fields for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub producto: String,
    pub marca: i64,
    pub linea: i64,
    pub precio: f64,
    pub stock: i64,
}

/// Create payload as received; every field is optional until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    pub producto: Option<String>,
    pub marca: Option<i64>,
    pub linea: Option<i64>,
    pub precio: Option<f64>,
    pub stock: Option<i64>,
}

impl ProductDraft {
    /// Require every field and check its constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::MissingField`] for the first absent field, or
    /// the first violated value constraint.
    pub fn validate(self) -> Result<NewProduct, ProductError> {
        let producto = self.producto.ok_or(ProductError::MissingField("producto"))?;
        let marca = self.marca.ok_or(ProductError::MissingField("marca"))?;
        let linea = self.linea.ok_or(ProductError::MissingField("linea"))?;
        let precio = self.precio.ok_or(ProductError::MissingField("precio"))?;
        let stock = self.stock.ok_or(ProductError::MissingField("stock"))?;

        check_name(&producto)?;
        check_price(precio)?;
        check_stock(stock)?;

        Ok(NewProduct {
            producto,
            marca,
            linea,
            precio,
            stock,
        })
    }
}

/// Partial update payload. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductChanges {
    pub producto: Option<String>,
    pub marca: Option<i64>,
    pub linea: Option<i64>,
    pub precio: Option<f64>,
    pub stock: Option<i64>,
}

impl ProductChanges {
    /// Returns `true` if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.producto.is_none()
            && self.marca.is_none()
            && self.linea.is_none()
            && self.precio.is_none()
            && self.stock.is_none()
    }

    /// Check the provided values.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NoChanges`] for an empty update, otherwise the
    /// first violated value constraint.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.is_empty() {
            return Err(ProductError::NoChanges);
        }
        if let Some(producto) = &self.producto {
            check_name(producto)?;
        }
        if let Some(precio) = self.precio {
            check_price(precio)?;
        }
        if let Some(stock) = self.stock {
            check_stock(stock)?;
        }
        Ok(())
    }
}

fn check_name(producto: &str) -> Result<(), ProductError> {
    if producto.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(())
}

fn check_price(precio: f64) -> Result<(), ProductError> {
    if !precio.is_finite() || precio < 0.0 {
        return Err(ProductError::InvalidPrice);
    }
    Ok(())
}

const fn check_stock(stock: i64) -> Result<(), ProductError> {
    if stock < 0 {
        return Err(ProductError::NegativeStock);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shampoo_draft() -> ProductDraft {
        ProductDraft {
            producto: Some("Shampoo".to_string()),
            marca: Some(1),
            linea: Some(2),
            precio: Some(10.0),
            stock: Some(5),
        }
    }

    #[test]
    fn test_draft_validates_complete_payload() {
        let fields = shampoo_draft().validate().unwrap();
        let product = Product::new(ProductId::new(4), fields);
        assert_eq!(product.producto, "Shampoo");
        assert_eq!(product.marca, 1);
        assert_eq!(product.linea, 2);
        assert!((product.precio - 10.0).abs() < f64::EPSILON);
        assert_eq!(product.stock, 5);
        assert!(product.is_live());
    }

    #[test]
    fn test_draft_reports_first_missing_field() {
        let draft = ProductDraft {
            linea: None,
            ..shampoo_draft()
        };
        assert_eq!(draft.validate(), Err(ProductError::MissingField("linea")));

        assert_eq!(
            ProductDraft::default().validate(),
            Err(ProductError::MissingField("producto"))
        );
    }

    #[test]
    fn test_draft_rejects_bad_values() {
        let blank = ProductDraft {
            producto: Some("   ".to_string()),
            ..shampoo_draft()
        };
        assert_eq!(blank.validate(), Err(ProductError::EmptyName));

        let negative_price = ProductDraft {
            precio: Some(-1.0),
            ..shampoo_draft()
        };
        assert_eq!(negative_price.validate(), Err(ProductError::InvalidPrice));

        let negative_stock = ProductDraft {
            stock: Some(-3),
            ..shampoo_draft()
        };
        assert_eq!(negative_stock.validate(), Err(ProductError::NegativeStock));
    }

    #[test]
    fn test_draft_deserializes_with_missing_fields() {
        let draft: ProductDraft = serde_json::from_str(r#"{"producto":"Jabon","marca":3}"#).unwrap();
        assert_eq!(draft.producto.as_deref(), Some("Jabon"));
        assert_eq!(draft.marca, Some(3));
        assert!(draft.precio.is_none());
    }

    #[test]
    fn test_apply_changes_only_provided_fields() {
        let mut product = Product::new(ProductId::FIRST, shampoo_draft().validate().unwrap());
        let before = product.clone();

        product.apply(ProductChanges {
            precio: Some(999.0),
            ..ProductChanges::default()
        });

        assert!((product.precio - 999.0).abs() < f64::EPSILON);
        assert_eq!(product.producto, before.producto);
        assert_eq!(product.marca, before.marca);
        assert_eq!(product.linea, before.linea);
        assert_eq!(product.stock, before.stock);
        assert_eq!(product.eliminado, before.eliminado);
    }

    #[test]
    fn test_changes_validation() {
        assert_eq!(
            ProductChanges::default().validate(),
            Err(ProductError::NoChanges)
        );
        let bad = ProductChanges {
            stock: Some(-1),
            ..ProductChanges::default()
        };
        assert_eq!(bad.validate(), Err(ProductError::NegativeStock));
        let good = ProductChanges {
            producto: Some("Acondicionador".to_string()),
            ..ProductChanges::default()
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product::new(ProductId::new(7), shampoo_draft().validate().unwrap());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "producto": "Shampoo",
                "marca": 1,
                "linea": 2,
                "precio": 10.0,
                "stock": 5,
                "eliminado": false
            })
        );
    }

    #[test]
    fn test_seed_record_defaults_eliminado() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"producto":"Crema","marca":2,"linea":1,"precio":350.5,"stock":12}"#,
        )
        .unwrap();
        assert!(!product.eliminado);
        assert!(product.validate().is_ok());
    }
}
