//! # Trolley CLI
//!
//! Command-line host for the cart store.
//!
//! ## Usage
//! ```bash
//! # Add one unit of product 3 to the cart
//! trolley add 3
//!
//! # Set product 3 to exactly 4 units
//! trolley amount 3 4
//!
//! # Remove product 3 entirely
//! trolley remove 3
//!
//! # Print the cart
//! trolley show
//! ```
//!
//! Each invocation opens the persisted cart, applies one operation, and
//! prints the resulting cart. Failure messages go to stderr, exactly as
//! the store's notifier reports them.

use std::env;

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use trolley_core::Cart;
use trolley_store::{
    AmountUpdate, CartStore, FileStore, HttpStockLookup, Notifier, StoreConfig,
};

/// Notifier that prints store failures for the terminal user.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn print_usage() {
    println!("Trolley - shopping cart CLI");
    println!();
    println!("Usage: trolley <COMMAND>");
    println!();
    println!("Commands:");
    println!("  add <id>           Add one unit of a product");
    println!("  remove <id>        Remove a product's line");
    println!("  amount <id> <n>    Set a product's line to n units");
    println!("  show               Print the cart");
    println!();
    println!("Environment:");
    println!("  TROLLEY_SERVICE_URL   Catalog service base URL");
    println!("  TROLLEY_STORAGE_KEY   Snapshot storage key");
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    println!("{:>6}  {:<30} {:>8} {:>6} {:>10}", "id", "title", "price", "qty", "subtotal");
    for line in cart.lines() {
        println!(
            "{:>6}  {:<30} {:>8} {:>6} {:>10}",
            line.product.id,
            line.product.title,
            line.product.price.to_string(),
            line.amount,
            line.subtotal().to_string(),
        );
    }
    println!();
    println!("{} item(s), total {}", cart.total_amount(), cart.subtotal());
}

fn parse_id(raw: &str) -> Result<u64, String> {
    raw.parse()
        .map_err(|_| format!("invalid product id: {raw}"))
}

fn parse_amount(raw: &str) -> Result<i64, String> {
    raw.parse().map_err(|_| format!("invalid amount: {raw}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing. Quiet by default; RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || matches!(args[1].as_str(), "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let config = StoreConfig::load();
    let mut store = CartStore::open(
        HttpStockLookup::new(&config.service_url),
        FileStore::at_default_location()?,
        StderrNotifier,
        &config.storage_key,
    );

    match args[1].as_str() {
        "add" => {
            let id = parse_id(args.get(2).ok_or("usage: trolley add <id>")?)?;
            store.add_product(id).await;
        }
        "remove" => {
            let id = parse_id(args.get(2).ok_or("usage: trolley remove <id>")?)?;
            store.remove_product(id);
        }
        "amount" => {
            let id = parse_id(args.get(2).ok_or("usage: trolley amount <id> <n>")?)?;
            let amount = parse_amount(args.get(3).ok_or("usage: trolley amount <id> <n>")?)?;
            store
                .update_product_amount(AmountUpdate {
                    product_id: id,
                    amount,
                })
                .await;
        }
        "show" => {}
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            std::process::exit(2);
        }
    }

    print_cart(store.cart());
    Ok(())
}
