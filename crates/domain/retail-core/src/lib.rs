use serde::{Deserialize, Serialize};

pub mod error;
pub mod fixtures;

pub use error::OrderError;

/// Universal product code; the identity key for products within an order.
pub type Upc = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub title: String,
    pub upc: Upc,
    pub image: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub products: Vec<Product>,
}

impl Order {
    /// Builds an order, rejecting empty ids, empty UPCs and duplicate UPCs.
    pub fn validated(id: impl Into<String>, products: Vec<Product>) -> Result<Self, OrderError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(OrderError::EmptyId);
        }

        {
            let mut seen = std::collections::HashSet::new();
            for p in &products {
                if p.upc.trim().is_empty() {
                    return Err(OrderError::EmptyUpc {
                        title: p.title.clone(),
                    });
                }
                if !seen.insert(p.upc.as_str()) {
                    return Err(OrderError::DuplicateUpc { upc: p.upc.clone() });
                }
            }
        }

        Ok(Self { id, products })
    }

    pub fn product(&self, upc: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.upc == upc)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FoundStatus {
    #[default]
    Unknown,
    Found,
    NotFound,
}

impl FoundStatus {
    /// `Found` goes back to `Unknown`; anything else becomes `Found`.
    pub fn toggled_found(self) -> Self {
        match self {
            FoundStatus::Found => FoundStatus::Unknown,
            FoundStatus::NotFound | FoundStatus::Unknown => FoundStatus::Found,
        }
    }

    /// `NotFound` goes back to `Unknown`; anything else becomes `NotFound`.
    pub fn toggled_not_found(self) -> Self {
        match self {
            FoundStatus::NotFound => FoundStatus::Unknown,
            FoundStatus::Found | FoundStatus::Unknown => FoundStatus::NotFound,
        }
    }
}

/// A product paired with its picking status.
///
/// Treated as a value: status changes produce a new `FindableProduct`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FindableProduct {
    pub product: Product,
    pub status: FoundStatus,
}

impl FindableProduct {
    pub fn unknown(product: Product) -> Self {
        Self {
            product,
            status: FoundStatus::Unknown,
        }
    }

    pub fn with_status(&self, status: FoundStatus) -> Self {
        Self {
            product: self.product.clone(),
            status,
        }
    }

    pub fn upc(&self) -> &str {
        &self.product.upc
    }
}
