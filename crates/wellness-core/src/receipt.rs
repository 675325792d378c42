//! # Receipt
//!
//! The itemized summary handed to the customer once every order record
//! has been accepted.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Receipt 3f2a…            2026-03-01 10:42   │
//! │  Aline Uwase · +250 788 123 456              │
//! │  ──────────────────────────────────────────  │
//! │  Paracetamol        2 × 500.00    1000.00    │
//! │  Amoxicillin        1 × 1200.00   1200.00    │
//! │  ──────────────────────────────────────────  │
//! │  Subtotal                         2200.00    │
//! │  Delivery (HOME_DELIVERY)         2000.00    │
//! │  Total                            4200.00    │
//! └──────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::checkout::CheckoutContext;
use crate::money::Money;
use crate::types::{DeliveryMethod, PaymentMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&CartLine> for ReceiptLine {
    fn from(line: &CartLine) -> Self {
        ReceiptLine {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Client-side receipt number (UUID v4).
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl Receipt {
    /// Issues a receipt for `cart` as submitted with `context`.
    ///
    /// `surcharge` is the home delivery fee in force; the total always
    /// matches `cart.totals_with(delivery, surcharge).total`.
    pub fn issue(
        cart: &Cart,
        context: &CheckoutContext,
        surcharge: Money,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let delivery_method = context.delivery.method();
        let totals = cart.totals_with(delivery_method, surcharge);

        Receipt {
            id: Uuid::new_v4(),
            issued_at,
            customer_name: context.customer_name.clone(),
            customer_phone: context.customer_phone.clone(),
            payment_method: context.payment_method,
            delivery_method,
            delivery_address: context.delivery.address().map(str::to_string),
            lines: cart.lines().iter().map(ReceiptLine::from).collect(),
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::Delivery;
    use crate::types::{Product, ProductId};
    use crate::HOME_DELIVERY_SURCHARGE;

    #[test]
    fn test_receipt_matches_cart_totals() {
        let mut cart = Cart::new();
        let product = Product {
            id: ProductId::new(1),
            name: "Paracetamol".to_string(),
            category: "ANALGESIC".to_string(),
            description: None,
            selling_price: Money::from_major(500),
            quantity: 5,
            expiry_date: None,
            is_expired: false,
        };
        cart.add(&product).unwrap();
        cart.add(&product).unwrap();

        let context = CheckoutContext {
            customer_name: "Aline".to_string(),
            customer_phone: "0788123456".to_string(),
            customer_email: None,
            delivery: Delivery::HomeDelivery {
                address: "KG 11 Ave".to_string(),
            },
            payment_method: PaymentMethod::MobileMoney,
        };

        let receipt = Receipt::issue(&cart, &context, HOME_DELIVERY_SURCHARGE, Utc::now());
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].line_total, Money::from_major(1000));
        assert_eq!(receipt.subtotal, Money::from_major(1000));
        assert_eq!(receipt.delivery_fee, Money::from_major(2000));
        assert_eq!(receipt.total, cart.total(DeliveryMethod::HomeDelivery));
        assert_eq!(receipt.delivery_address.as_deref(), Some("KG 11 Ave"));
    }
}
