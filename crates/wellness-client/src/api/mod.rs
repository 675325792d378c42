//! # Backend Collaborators
//!
//! The three seams between the engines and the pharmacy backend.
//!
//! ```text
//! ┌──────────────┐   CatalogApi::list_products    ┌─────────────────────┐
//! │              │ ─────────────────────────────► │                     │
//! │  Storefront  │   OrderApi::create_order       │  HttpApi (reqwest)  │
//! │              │ ─────────────────────────────► │        or           │
//! └──────────────┘                                │  test fakes         │
//! ┌──────────────────┐ LocationApi::list_locations│                     │
//! │ LocationSelector │ ─────────────────────────► │                     │
//! └──────────────────┘                            └─────────────────────┘
//! ```

mod dto;
mod http;

use async_trait::async_trait;
use std::fmt;
use wellness_core::{LocationId, LocationLevel, LocationNode, OrderRecord, Product};

use crate::error::ClientResult;

pub use dto::{LocationDto, MedicineDto, MedicineRef, SaleRequest};
pub use http::HttpApi;

/// Bearer token for order calls.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for a blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(AuthToken(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches the product list, restricted to non-expired products when
    /// `only_available` is set.
    async fn list_products(&self, only_available: bool) -> ClientResult<Vec<Product>>;
}

#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Creates one sale record. Any 2xx means committed.
    async fn create_order(&self, record: &OrderRecord, token: &AuthToken) -> ClientResult<()>;
}

#[async_trait]
pub trait LocationApi: Send + Sync {
    /// Lists the nodes at `level` under `parent` (`None` for provinces).
    async fn list_locations(
        &self,
        level: LocationLevel,
        parent: Option<LocationId>,
    ) -> ClientResult<Vec<LocationNode>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token() {
        assert!(AuthToken::new("   ").is_none());
        let token = AuthToken::new(" abc ").unwrap();
        assert_eq!(token.as_str(), "abc");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
    }
}
