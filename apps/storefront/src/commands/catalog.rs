use clap::Args;
use wellness_client::{ClientConfig, HttpApi, Storefront, StorefrontSettings};
use wellness_core::catalog::ALL_CATEGORIES;

use crate::error::CliResult;

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Case-insensitive substring of the product name
    #[arg(long, default_value = "")]
    search: String,

    /// Category filter; ALL shows every category
    #[arg(long, default_value = ALL_CATEGORIES)]
    category: String,
}

pub(crate) async fn run(args: CatalogArgs, config: &ClientConfig) -> CliResult<()> {
    let api = HttpApi::from_config(config)?;
    let mut store = Storefront::new(api, StorefrontSettings::from(config));
    store.refresh_catalog().await?;

    println!("categories: {}", store.categories().join(", "));
    for product in store.browse(&args.search, &args.category) {
        println!(
            "{:>6}  {:<32} {:<16} {:>14}  stock {}",
            product.id,
            product.name,
            product.category,
            config.format_money(product.selling_price),
            product.quantity
        );
    }

    Ok(())
}
