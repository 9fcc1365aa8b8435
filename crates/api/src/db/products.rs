//! Product catalogue store.
//!
//! Products are kept in insertion order. Deletes are soft: the record stays
//! in the catalogue with `eliminado = true`, is hidden from `get`, `update`
//! and `delete`, and its ID is never reused.

use std::collections::HashSet;
use std::path::Path;

use tokio::sync::RwLock;

use inventario_core::{NewProduct, Product, ProductChanges, ProductId};

use super::{RepositoryError, SeedError};

/// In-memory product catalogue.
#[derive(Debug)]
pub struct ProductStore {
    inner: RwLock<Catalogue>,
}

#[derive(Debug)]
struct Catalogue {
    products: Vec<Product>,
    /// `None` once `i64::MAX` has been allocated.
    next_id: Option<ProductId>,
}

impl Catalogue {
    fn live_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id && p.is_live())
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Catalogue {
                products: Vec::new(),
                next_id: Some(ProductId::FIRST),
            }),
        }
    }

    /// Create a catalogue pre-populated with `products`, kept in the given order.
    ///
    /// New IDs continue after the highest seeded ID.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidId` if an ID is not positive or has no
    /// successor, `SeedError::DuplicateId` if two records share an ID, or
    /// `SeedError::InvalidProduct` if a record violates a field constraint.
    pub fn with_products(products: Vec<Product>) -> Result<Self, SeedError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !product.id.is_valid() || product.id.next().is_none() {
                return Err(SeedError::InvalidId(product.id));
            }
            if !seen.insert(product.id) {
                return Err(SeedError::DuplicateId(product.id));
            }
            product
                .validate()
                .map_err(|source| SeedError::InvalidProduct {
                    id: product.id,
                    source,
                })?;
        }

        let next_id = products
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(Some(ProductId::FIRST), |max| max.next());

        Ok(Self {
            inner: RwLock::new(Catalogue { products, next_id }),
        })
    }

    /// Load a catalogue from a JSON file holding an array of products.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the file cannot be read or parsed, or if its
    /// contents are rejected by [`ProductStore::with_products`].
    pub fn from_seed_file(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Self::with_products(products)
    }

    /// Every record in insertion order, soft-deleted ones included.
    pub async fn list(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }

    /// Get a live product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has this ID or the
    /// record is soft-deleted.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id && p.is_live())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Get a record by ID regardless of its soft-delete flag.
    pub async fn get_including_deleted(&self, id: ProductId) -> Option<Product> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Append a new live product and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IdsExhausted` once `i64::MAX` has been
    /// allocated; the catalogue is left unchanged.
    pub async fn create(&self, fields: NewProduct) -> Result<Product, RepositoryError> {
        let mut catalogue = self.inner.write().await;
        let id = catalogue.next_id.ok_or(RepositoryError::IdsExhausted)?;
        catalogue.next_id = id.next();

        let product = Product::new(id, fields);
        catalogue.products.push(product.clone());
        Ok(product)
    }

    /// Overwrite the provided fields of a live product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if `changes` is empty or carries an
    /// invalid value (nothing is modified), or `RepositoryError::NotFound` if
    /// no live record has this ID.
    pub async fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, RepositoryError> {
        changes.validate()?;

        let mut catalogue = self.inner.write().await;
        let product = catalogue.live_mut(id).ok_or(RepositoryError::NotFound)?;
        product.apply(changes);
        Ok(product.clone())
    }

    /// Soft-delete a live product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no live record has this ID.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut catalogue = self.inner.write().await;
        let product = catalogue.live_mut(id).ok_or(RepositoryError::NotFound)?;
        product.eliminado = true;
        Ok(())
    }

    /// Number of records, soft-deleted ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    /// Returns `true` if the catalogue holds no records at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use inventario_core::ProductError;

    use super::*;

    fn shampoo() -> NewProduct {
        NewProduct {
            producto: "Shampoo".to_string(),
            marca: 1,
            linea: 2,
            precio: 10.0,
            stock: 5,
        }
    }

    fn seeded(id: i64, eliminado: bool) -> Product {
        Product {
            eliminado,
            ..Product::new(ProductId::new(id), shampoo())
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = ProductStore::new();
        let created = store.create(shampoo()).await.unwrap();
        assert_eq!(created.id, ProductId::FIRST);

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(!fetched.eliminado);
        assert_eq!(fetched.producto, "Shampoo");
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = ProductStore::new();
        let first = store.create(shampoo()).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(shampoo()).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(Some(second.id), first.id.next());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let store = ProductStore::new();
        let created = store.create(shampoo()).await.unwrap();

        store.delete(created.id).await.unwrap();

        assert!(matches!(
            store.get(created.id).await,
            Err(RepositoryError::NotFound)
        ));
        let raw = store.get_including_deleted(created.id).await.unwrap();
        assert!(raw.eliminado);
        assert_eq!(raw.producto, "Shampoo");
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = ProductStore::new();
        let created = store.create(shampoo()).await.unwrap();
        store.delete(created.id).await.unwrap();

        assert!(matches!(
            store.delete(created.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            store.delete(ProductId::new(99)).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_includes_deleted_in_insertion_order() {
        let store = ProductStore::new();
        let a = store.create(shampoo()).await.unwrap();
        let b = store
            .create(NewProduct {
                producto: "Jabon".to_string(),
                ..shampoo()
            })
            .await
            .unwrap();
        store.delete(a.id).await.unwrap();

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, a.id);
        assert!(listed[0].eliminado);
        assert_eq!(listed[1].id, b.id);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let store = ProductStore::new();
        let created = store.create(shampoo()).await.unwrap();

        let updated = store
            .update(
                created.id,
                ProductChanges {
                    precio: Some(999.0),
                    ..ProductChanges::default()
                },
            )
            .await
            .unwrap();

        assert!((updated.precio - 999.0).abs() < f64::EPSILON);
        assert_eq!(
            Product {
                precio: created.precio,
                ..updated
            },
            created
        );
    }

    #[tokio::test]
    async fn test_update_missing_or_deleted_is_not_found() {
        let store = ProductStore::new();
        let created = store.create(shampoo()).await.unwrap();
        store.delete(created.id).await.unwrap();

        let changes = ProductChanges {
            precio: Some(999.0),
            ..ProductChanges::default()
        };
        assert!(matches!(
            store.update(created.id, changes.clone()).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            store.update(ProductId::new(42), changes).await,
            Err(RepositoryError::NotFound)
        ));

        let raw = store.get_including_deleted(created.id).await.unwrap();
        assert!((raw.precio - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record_untouched() {
        let store = ProductStore::new();
        let created = store.create(shampoo()).await.unwrap();

        let result = store
            .update(
                created.id,
                ProductChanges {
                    producto: Some("Nuevo".to_string()),
                    stock: Some(-1),
                    ..ProductChanges::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Invalid(ProductError::NegativeStock))
        ));
        assert_eq!(store.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_seed_continues_after_highest_id() {
        let store = ProductStore::with_products(vec![seeded(3, false), seeded(8, true)]).unwrap();
        assert_eq!(store.len().await, 2);
        assert!(store.get(ProductId::new(8)).await.is_err());

        let created = store.create(shampoo()).await.unwrap();
        assert_eq!(created.id, ProductId::new(9));
    }

    #[test]
    fn test_seed_rejects_duplicates_and_invalid_records() {
        let dup = ProductStore::with_products(vec![seeded(1, false), seeded(1, false)]);
        assert!(matches!(dup, Err(SeedError::DuplicateId(id)) if id == ProductId::new(1)));

        let mut bad = seeded(2, false);
        bad.precio = -5.0;
        let invalid = ProductStore::with_products(vec![bad]);
        assert!(matches!(
            invalid,
            Err(SeedError::InvalidProduct {
                source: ProductError::InvalidPrice,
                ..
            })
        ));
    }

    #[test]
    fn test_seed_rejects_out_of_range_ids() {
        for raw in [i64::MAX, 0, -3] {
            let result = ProductStore::with_products(vec![seeded(raw, false)]);
            assert!(
                matches!(result, Err(SeedError::InvalidId(id)) if id == ProductId::new(raw)),
                "seed id {raw} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_fails_once_ids_run_out() {
        let store = ProductStore::with_products(vec![seeded(i64::MAX - 1, false)]).unwrap();

        let last = store.create(shampoo()).await.unwrap();
        assert_eq!(last.id, ProductId::new(i64::MAX));

        assert!(matches!(
            store.create(shampoo()).await,
            Err(RepositoryError::IdsExhausted)
        ));
        assert_eq!(store.len().await, 2);
    }

    #[test]
    fn test_seed_file_missing() {
        let result = ProductStore::from_seed_file(Path::new("/nonexistent/productos.json"));
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}
