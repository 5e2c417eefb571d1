//! # Seed Data Loader
//!
//! Fills a database with sample clients, products and orders for
//! development, then prints each table.
//!
//! ## Usage
//! ```bash
//! # Use the configured database (orderdesk.toml / ORDERDESK_DB_PATH)
//! cargo run -p orderdesk-db --bin seed
//!
//! # Specify database path
//! cargo run -p orderdesk-db --bin seed -- --db ./data/orderdesk.db
//!
//! # Explicit config file, JSON summary instead of tables
//! cargo run -p orderdesk-db --bin seed -- --config ./orderdesk.toml --json
//! ```
//!
//! Orders go through `OrderService`, so stock levels in the summary
//! reflect them.

use std::env;
use std::path::PathBuf;

use orderdesk_core::{Client, Product};
use orderdesk_db::config::{AppConfig, DEFAULT_LOG_FILTER};
use orderdesk_db::{Database, DbConfig, EntityDescriptor, Tabulation};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (name, address, email, age)
const CLIENTS: &[(&str, &str, &str, i64)] = &[
    ("Ana Popescu", "12 Main St", "ana@example.com", 30),
    ("Bogdan Ionescu", "4 Elm Ave", "bogdan@example.com", 41),
    ("Carmen Dumitru", "77 Oak Rd", "carmen.d@example.org", 27),
    ("Dan Radu", "9 Birch Ln", "dan.radu@example.net", 55),
];

/// (name, stock, price)
const PRODUCTS: &[(&str, i64, f64)] = &[
    ("Widget", 10, 5.0),
    ("Gizmo", 25, 12.5),
    ("Sprocket", 100, 0.75),
    ("Flux Capacitor", 1, 1999.99),
];

/// (client index, product index, quantity)
const ORDERS: &[(usize, usize, i64)] = &[(0, 0, 3), (1, 1, 2), (2, 2, 40), (3, 3, 2)];

struct Args {
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        db_path: None,
        config_path: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    parsed.db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => {
                println!("Orderdesk Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file (overrides config)");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("      --json           Print the summary as JSON");
                println!("  -h, --help           Show this help message");
                return None;
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    Some(parsed)
}

/// `RUST_LOG` wins; otherwise the configured filter.
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = parse_args() else {
        return Ok(());
    };

    let (mut config, load_failure) = AppConfig::load_or_fallback(args.config_path);
    if let Some(path) = args.db_path {
        config.database.path = path;
    }

    init_tracing(&config.logging.filter);

    if let Some(e) = load_failure {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::from(&config.database)).await?;
    info!(path = %config.database.path.display(), "Connected");

    let clients = db.client_service()?;
    let products = db.product_service()?;
    let orders = db.order_service()?;

    if !clients.list_clients().await?.is_empty() {
        warn!("Database already has clients; skipping seed to avoid duplicates");
    } else {
        let mut client_ids = Vec::with_capacity(CLIENTS.len());
        for (name, address, email, age) in CLIENTS {
            let client = clients
                .add_client(Client::new(*name, *address, *email, *age))
                .await?;
            client_ids.push(client.id);
        }

        let mut product_ids = Vec::with_capacity(PRODUCTS.len());
        for (name, stock, price) in PRODUCTS {
            let product = products
                .add_product(Product::new(*name, *stock, *price))
                .await?;
            product_ids.push(product.id);
        }

        for (client, product, quantity) in ORDERS {
            if let Err(e) = orders
                .create_order(client_ids[*client], product_ids[*product], *quantity)
                .await
            {
                warn!(code = e.code(), error = %e, "Order skipped");
            }
        }

        info!(
            clients = client_ids.len(),
            products = product_ids.len(),
            "Seed complete"
        );
    }

    let all_clients = clients.list_clients().await?;
    let all_products = products.list_products().await?;
    let all_orders = orders.list_orders().await?;

    if args.json {
        let summary = serde_json::json!({
            "clients": all_clients,
            "products": all_products,
            "orders": all_orders,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", Tabulation::from_entities(&EntityDescriptor::of()?, &all_clients));
        println!("{}", Tabulation::from_entities(&EntityDescriptor::of()?, &all_products));
        println!("{}", Tabulation::from_entities(&EntityDescriptor::of()?, &all_orders));
    }

    db.close().await;
    Ok(())
}
