//! # Catalog Container
//!
//! The service/product catalog: flat append/remove containers keyed by
//! identifier.
//!
//! ## Two Slices, One Lookup
//! Services and products persist as independent state slices and render in
//! separate lists, but a sale may mix both, so price resolution searches
//! the combined catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           Catalog                                   │
//! │                                                                     │
//! │   services: [Manicure 50.00] [Pedicure 65.00] [Massage 120.00]      │
//! │   products: [Nail polish 25.00] [Cuticle oil 18.50]                 │
//! │                                                                     │
//! │   add_service / add_product ──► validated append                    │
//! │   remove(id)                ──► idempotent removal from either list │
//! │   lookup(id)                ──► search services, then products      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::CoreResult;
use crate::types::{CatalogItem, ItemKind};
use crate::validation::{validate_name, validate_price_cents};

/// The service/product catalog.
///
/// ## Invariants
/// - Entries are immutable once added (no edit operation exists)
/// - `price_cents` is always positive (validated on add)
/// - Ids are unique across both lists (UUID v4, caller-supplied)
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<CatalogItem>,
    products: Vec<CatalogItem>,
}

impl Catalog {
    /// Rebuilds a catalog from its two persisted slices.
    pub fn from_slices(services: Vec<CatalogItem>, products: Vec<CatalogItem>) -> Self {
        Catalog { services, products }
    }

    /// Adds a service to the catalog.
    ///
    /// ## Errors
    /// Validation failure on an empty name or non-positive price; the
    /// catalog is unchanged.
    pub fn add_service(
        &mut self,
        id: String,
        name: &str,
        price_cents: i64,
    ) -> CoreResult<CatalogItem> {
        self.add(id, name, price_cents, ItemKind::Service)
    }

    /// Adds a product to the catalog.
    pub fn add_product(
        &mut self,
        id: String,
        name: &str,
        price_cents: i64,
    ) -> CoreResult<CatalogItem> {
        self.add(id, name, price_cents, ItemKind::Product)
    }

    fn add(
        &mut self,
        id: String,
        name: &str,
        price_cents: i64,
        kind: ItemKind,
    ) -> CoreResult<CatalogItem> {
        validate_name(name, "name")?;
        validate_price_cents(price_cents)?;

        let item = CatalogItem {
            id,
            name: name.trim().to_string(),
            price_cents,
            kind,
        };

        match kind {
            ItemKind::Service => self.services.push(item.clone()),
            ItemKind::Product => self.products.push(item.clone()),
        }
        Ok(item)
    }

    /// Removes an entry by id from whichever list holds it.
    ///
    /// Returns the removed entry so callers know which slice changed.
    /// Idempotent: removing an unknown id is a silent no-op returning
    /// `None`. Existing sales that reference the removed item keep their
    /// snapshot amounts.
    pub fn remove(&mut self, id: &str) -> Option<CatalogItem> {
        if let Some(index) = self.services.iter().position(|item| item.id == id) {
            return Some(self.services.remove(index));
        }
        if let Some(index) = self.products.iter().position(|item| item.id == id) {
            return Some(self.products.remove(index));
        }
        None
    }

    /// Looks up an entry by id across both lists.
    pub fn lookup(&self, id: &str) -> Option<&CatalogItem> {
        self.services
            .iter()
            .chain(self.products.iter())
            .find(|item| item.id == id)
    }

    /// The service list, in insertion order.
    pub fn services(&self) -> &[CatalogItem] {
        &self.services
    }

    /// The product list, in insertion order.
    pub fn products(&self) -> &[CatalogItem] {
        &self.products
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
