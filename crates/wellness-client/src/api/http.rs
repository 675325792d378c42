//! # HTTP Collaborator
//!
//! `reqwest` implementation of the three backend traits.
//!
//! ## Endpoints
//! ```text
//! ┌───────────────────────────────┬────────────────────────────────────────┐
//! │ list_products(false)          │ GET  {base}/medicines                  │
//! │ list_products(true)           │ GET  {base}/medicines/non-expired      │
//! │ create_order                  │ POST {base}/sales    (Bearer token)    │
//! │ list_locations(PROVINCE)      │ GET  {base}/locations/provinces        │
//! │ list_locations(DISTRICT, p)   │ GET  {base}/locations/districts?provinceId=p │
//! │ list_locations(SECTOR, d)     │ GET  {base}/locations/sectors?districtId=d   │
//! │ list_locations(CELL, s)       │ GET  {base}/locations/cells?sectorId=s       │
//! │ list_locations(VILLAGE, c)    │ GET  {base}/locations/villages?cellId=c      │
//! └───────────────────────────────┴────────────────────────────────────────┘
//! ```
//!
//! The client is built without a request timeout. A hung backend keeps the
//! caller waiting.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;
use wellness_core::{LocationId, LocationLevel, LocationNode, OrderRecord, Product};

use super::dto::{LocationDto, MedicineDto, SaleRequest};
use super::{AuthToken, CatalogApi, LocationApi, OrderApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Pharmacy backend over HTTP. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// `base_url` must end in `/` for paths to nest under it.
    pub fn new(base_url: Url) -> Self {
        HttpApi {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.base_url()?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Maps non-2xx responses to `ClientError::Http`, taking the message from
/// the body's `message` field when there is one.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    warn!(status = status.as_u16(), %message, "Backend returned an error");
    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}

fn children_path(level: LocationLevel) -> Option<(&'static str, &'static str)> {
    match level {
        LocationLevel::Province => None,
        LocationLevel::District => Some(("locations/districts", "provinceId")),
        LocationLevel::Sector => Some(("locations/sectors", "districtId")),
        LocationLevel::Cell => Some(("locations/cells", "sectorId")),
        LocationLevel::Village => Some(("locations/villages", "cellId")),
    }
}

#[async_trait]
impl CatalogApi for HttpApi {
    async fn list_products(&self, only_available: bool) -> ClientResult<Vec<Product>> {
        let path = if only_available {
            "medicines/non-expired"
        } else {
            "medicines"
        };
        let medicines: Vec<MedicineDto> = self.get_json(self.endpoint(path)?).await?;
        let fetched = medicines.len();
        let products: Vec<Product> = medicines
            .into_iter()
            .filter_map(MedicineDto::into_product)
            .collect();
        if products.len() < fetched {
            warn!(skipped = fetched - products.len(), "Skipped medicines without a selling price");
        }
        Ok(products)
    }
}

#[async_trait]
impl OrderApi for HttpApi {
    async fn create_order(&self, record: &OrderRecord, token: &AuthToken) -> ClientResult<()> {
        let url = self.endpoint("sales")?;
        debug!(%url, product_id = %record.product_id, quantity = record.quantity, "POST");

        let response = self
            .client
            .post(url)
            .bearer_auth(token.as_str())
            .json(&SaleRequest::from(record))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl LocationApi for HttpApi {
    async fn list_locations(
        &self,
        level: LocationLevel,
        parent: Option<LocationId>,
    ) -> ClientResult<Vec<LocationNode>> {
        let url = match (children_path(level), parent) {
            (None, _) => self.endpoint("locations/provinces")?,
            (Some((path, param)), Some(parent)) => {
                let mut url = self.endpoint(path)?;
                url.query_pairs_mut().append_pair(param, &parent.to_string());
                url
            }
            (Some(_), None) => {
                return Err(ClientError::InvalidConfig(format!(
                    "{} options need a parent id",
                    level
                )))
            }
        };

        let dtos: Vec<LocationDto> = self.get_json(url).await?;
        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_node(level, parent))
            .collect())
    }
}
