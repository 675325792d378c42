use std::str::FromStr;

use clap::{Args, ValueEnum};
use tracing::{info, warn};
use wellness_client::{ClientConfig, HttpApi, Storefront, StorefrontSettings};
use wellness_core::{AddOutcome, DeliveryMethod, PaymentMethod, ProductId};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Payment {
    Cash,
    MobileMoney,
    Card,
    BankTransfer,
}

impl From<Payment> for PaymentMethod {
    fn from(payment: Payment) -> Self {
        match payment {
            Payment::Cash => PaymentMethod::Cash,
            Payment::MobileMoney => PaymentMethod::MobileMoney,
            Payment::Card => PaymentMethod::Card,
            Payment::BankTransfer => PaymentMethod::BankTransfer,
        }
    }
}

/// `ID` or `ID:QTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    product_id: ProductId,
    quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match raw.split_once(':') {
            Some((id, quantity)) => (id, quantity),
            None => (raw, "1"),
        };

        let id = id
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid product id '{}': {}", id, e))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
        if quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }

        Ok(ItemSpec {
            product_id: ProductId::new(id),
            quantity,
        })
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Bearer token from the pharmacy login
    #[arg(long, env = "WELLNESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Product to buy as ID or ID:QTY (repeatable)
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, value_enum, default_value = "cash")]
    payment: Payment,

    /// Delivery address; pickup when omitted
    #[arg(long)]
    address: Option<String>,
}

pub(crate) async fn run(args: OrderArgs, config: &ClientConfig) -> CliResult<()> {
    let api = HttpApi::from_config(config)?;
    let mut store = Storefront::new(api, StorefrontSettings::from(config));

    store.login(&args.token)?;
    store.refresh_catalog().await?;

    for item in &args.items {
        for _ in 0..item.quantity {
            if let AddOutcome::Capped(quantity) = store.add_to_cart(item.product_id)? {
                warn!(product_id = %item.product_id, requested = item.quantity, quantity, "Only {} in stock", quantity);
                break;
            }
        }
    }

    store.open_cart()?;
    let draft = store.proceed_to_checkout()?;
    draft.customer_name = args.name;
    draft.customer_phone = args.phone;
    draft.customer_email = args.email;
    draft.payment_method = args.payment.into();
    if let Some(address) = args.address {
        draft.delivery_method = DeliveryMethod::HomeDelivery;
        draft.delivery_address = address;
    }

    let receipt = store.submit_order().await.map_err(|err| {
        if store.cart().is_some_and(|cart| !cart.is_empty()) {
            warn!("Cart kept; re-run the same order to retry");
        }
        CliError::from(err)
    })?;

    info!(receipt_id = %receipt.id, total = %config.format_money(receipt.total), "Order placed");
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_spec_parsing() {
        assert_eq!(
            "12".parse::<ItemSpec>().unwrap(),
            ItemSpec {
                product_id: ProductId::new(12),
                quantity: 1
            }
        );
        assert_eq!("12:3".parse::<ItemSpec>().unwrap().quantity, 3);
        assert!("12:0".parse::<ItemSpec>().is_err());
        assert!("abc".parse::<ItemSpec>().is_err());
        assert!("4:-1".parse::<ItemSpec>().is_err());
    }
}
