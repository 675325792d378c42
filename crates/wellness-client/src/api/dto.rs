//! Wire shapes of the pharmacy REST API.
//!
//! The backend speaks camelCase JSON and prices in doubles. Conversion to
//! `Money` happens here and nowhere else.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use wellness_core::{
    LocationId, LocationLevel, LocationNode, Money, OrderRecord, PaymentMethod, Product, ProductId,
};

/// Rounds a wire amount to the nearest minor unit.
pub(crate) fn money_from_wire(amount: f64) -> Money {
    Money::from_minor((amount * 100.0).round() as i64)
}

pub(crate) fn money_to_wire(amount: Money) -> f64 {
    amount.minor() as f64 / 100.0
}

// =============================================================================
// Medicines
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub selling_price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_expired: Option<bool>,
}

impl MedicineDto {
    /// `None` when the backend sent no price; such a medicine cannot be sold.
    /// A missing quantity counts as out of stock.
    pub fn into_product(self) -> Option<Product> {
        let price = self.selling_price?;
        Some(Product {
            id: ProductId::new(self.id),
            name: self.name,
            category: self.category.unwrap_or_default(),
            description: self.description,
            selling_price: money_from_wire(price),
            quantity: u32::try_from(self.quantity.unwrap_or(0).max(0)).unwrap_or(u32::MAX),
            expiry_date: self.expiry_date,
            is_expired: self.is_expired.unwrap_or(false),
        })
    }
}

// =============================================================================
// Sales
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineRef {
    pub id: i64,
}

/// Body of `POST /sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub medicine: MedicineRef,
    pub quantity: u32,
    pub total_price: f64,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    /// Backend stores a zone-less local date-time; we send UTC.
    pub sale_date: NaiveDateTime,
}

impl From<&OrderRecord> for SaleRequest {
    fn from(record: &OrderRecord) -> Self {
        SaleRequest {
            medicine: MedicineRef {
                id: record.product_id.get(),
            },
            quantity: record.quantity,
            total_price: money_to_wire(record.total_price),
            customer_name: record.customer_name.clone(),
            customer_phone: record.customer_phone.clone(),
            payment_method: record.payment_method,
            sale_date: record.sale_date.naive_utc(),
        }
    }
}

// =============================================================================
// Locations
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl LocationDto {
    /// Converts to a node, trusting `requested` when the type is missing
    /// or unknown and `parent` when the body carries no `parentId`.
    pub fn into_node(self, requested: LocationLevel, parent: Option<LocationId>) -> LocationNode {
        let level = self
            .kind
            .as_deref()
            .and_then(|kind| LocationLevel::ALL.into_iter().find(|l| l.as_str() == kind))
            .unwrap_or(requested);

        LocationNode {
            id: LocationId::new(self.id),
            name: self.name,
            level,
            parent_id: self.parent_id.map(LocationId::new).or(parent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_medicine_to_product() {
        let json = r#"{
            "id": 7,
            "name": "Amoxicillin 250mg",
            "category": "ANTIBIOTIC",
            "sellingPrice": 1200.5,
            "quantity": 12,
            "expiryDate": "2027-06-30",
            "isExpired": false
        }"#;
        let product = serde_json::from_str::<MedicineDto>(json)
            .unwrap()
            .into_product()
            .unwrap();

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.selling_price, Money::from_minor(120_050));
        assert_eq!(product.quantity, 12);
        assert_eq!(product.expiry_date, NaiveDate::from_ymd_opt(2027, 6, 30));
        assert!(!product.is_expired);
    }

    #[test]
    fn test_null_price_and_quantity_decode() {
        let json = r#"[
            {"id": 1, "name": "Unpriced", "sellingPrice": null, "quantity": 3},
            {"id": 2, "name": "Uncounted", "sellingPrice": 250.0, "quantity": null}
        ]"#;
        let medicines: Vec<MedicineDto> = serde_json::from_str(json).unwrap();
        let mut products = medicines.into_iter().map(MedicineDto::into_product);

        assert_eq!(products.next().unwrap(), None);
        let uncounted = products.next().unwrap().unwrap();
        assert_eq!(uncounted.quantity, 0);
        assert!(!uncounted.is_available());
    }

    #[test]
    fn test_wire_price_rounding() {
        assert_eq!(money_from_wire(0.1 + 0.2), Money::from_minor(30));
        assert_eq!(money_from_wire(19.999), Money::from_minor(2000));
        assert_eq!(money_to_wire(Money::from_major(1000)), 1000.0);
    }

    #[test]
    fn test_sale_request_shape() {
        let record = OrderRecord {
            product_id: ProductId::new(3),
            product_name: "Paracetamol".to_string(),
            quantity: 2,
            total_price: Money::from_major(1000),
            customer_name: "Aline".to_string(),
            customer_phone: "0788123456".to_string(),
            payment_method: PaymentMethod::MobileMoney,
            sale_date: Utc.with_ymd_and_hms(2026, 3, 1, 10, 42, 0).unwrap(),
        };

        let json = serde_json::to_value(SaleRequest::from(&record)).unwrap();
        assert_eq!(json["medicine"]["id"], 3);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["totalPrice"], 1000.0);
        assert_eq!(json["customerName"], "Aline");
        assert_eq!(json["paymentMethod"], "MOBILE_MONEY");
        assert_eq!(json["saleDate"], "2026-03-01T10:42:00");
    }

    #[test]
    fn test_location_dto_level() {
        let dto: LocationDto =
            serde_json::from_str(r#"{"id": 10, "name": "Gasabo", "type": "DISTRICT", "parentId": 1}"#)
                .unwrap();
        let node = dto.into_node(LocationLevel::Sector, Some(LocationId::new(9)));
        assert_eq!(node.level, LocationLevel::District);
        assert_eq!(node.parent_id, Some(LocationId::new(1)));

        let dto: LocationDto = serde_json::from_str(r#"{"id": 1, "name": "Kigali"}"#).unwrap();
        let node = dto.into_node(LocationLevel::Province, None);
        assert_eq!(node.level, LocationLevel::Province);
        assert_eq!(node.parent_id, None);

        let dto: LocationDto = serde_json::from_str(r#"{"id": 10, "name": "Gasabo"}"#).unwrap();
        let node = dto.into_node(LocationLevel::District, Some(LocationId::new(1)));
        assert_eq!(node.parent_id, Some(LocationId::new(1)));
    }
}
