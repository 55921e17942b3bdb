//! # Seed Data Generator
//!
//! Populates the database with shops, products, and inventory for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products across 4 shops (default)
//! cargo run -p mandi-db --bin seed
//!
//! # Generate custom amounts
//! cargo run -p mandi-db --bin seed -- --products 350 --shops 6
//!
//! # Specify database path
//! cargo run -p mandi-db --bin seed -- --db ./data/mandi.db
//! ```
//!
//! ## Generated Data
//! Creates realistic grocery catalog data:
//! - Shops with bazaar-style names, all active
//! - Products across staples, lentils, spices, oil, tea, and snacks
//! - Inventory linking roughly three quarters of the (shop, product)
//!   pairs, with deterministic stock levels and shop markups
//!
//! Prices, stock levels, and shop coverage are derived from the product
//! index, so repeated runs against a fresh database produce the same
//! catalog.

use std::env;

use mandi_core::{Money, NewInventory, NewProduct, NewShop, ProductListQuery};
use mandi_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Shop names used in creation order; `--shops` caps how many are created.
const SHOP_NAMES: &[&str] = &[
    "Saddar Bazaar Store",
    "Clifton Mart",
    "Gulberg Grocers",
    "Empress Market Stall",
    "Hyderi General Store",
    "Tariq Road Traders",
];

/// Product catalog: (category, unit of sale, names).
const CATALOG: &[(&str, &str, &[&str])] = &[
    (
        "Staples",
        "bag",
        &[
            "Basmati Rice",
            "Super Kernel Rice",
            "Broken Rice",
            "Atta Flour",
            "Maida Flour",
            "Besan",
            "Sugar",
            "Brown Sugar",
            "Rock Salt",
            "Sea Salt",
        ],
    ),
    (
        "Lentils",
        "kg",
        &[
            "Daal Chana",
            "Daal Masoor",
            "Daal Moong",
            "Daal Mash",
            "Kala Chana",
            "Safaid Chana",
            "Red Kidney Beans",
            "Black Eyed Peas",
        ],
    ),
    (
        "Spices",
        "packet",
        &[
            "Red Chilli Powder",
            "Turmeric Powder",
            "Coriander Powder",
            "Cumin Seeds",
            "Garam Masala",
            "Black Pepper",
            "Cardamom",
            "Cinnamon Sticks",
            "Cloves",
            "Dried Fenugreek",
        ],
    ),
    (
        "Oil & Ghee",
        "tin",
        &[
            "Cooking Oil",
            "Sunflower Oil",
            "Canola Oil",
            "Banaspati Ghee",
            "Desi Ghee",
            "Olive Oil",
            "Mustard Oil",
        ],
    ),
    (
        "Tea & Beverages",
        "box",
        &[
            "Black Tea",
            "Green Tea",
            "Elaichi Tea",
            "Instant Coffee",
            "Rooh Afza",
            "Tang Orange",
            "Lemon Squash",
        ],
    ),
    (
        "Snacks",
        "pcs",
        &[
            "Nimko Mix",
            "Chana Chips",
            "Salted Peanuts",
            "Roasted Cashews",
            "Dates",
            "Raisins",
            "Papadum",
            "Rusk",
        ],
    ),
];

/// Pack sizes appended to product names, with price addons in cents.
const SIZES: &[(&str, i64)] = &[
    ("250g", 0),
    ("500g", 120),
    ("1kg", 260),
    ("2kg", 520),
    ("5kg", 1400),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut product_count: usize = 200;
    let mut shop_count: usize = 4;
    let mut db_path = String::from("./mandi_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    product_count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--shops" | "-s" => {
                if i + 1 < args.len() {
                    shop_count = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mandi Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>  Number of products to generate (default: 200)");
                println!("  -s, --shops <N>     Number of shops to create (default: 4, max: 6)");
                println!("  -d, --db <PATH>     Database file path (default: ./mandi_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let shop_count = shop_count.clamp(1, SHOP_NAMES.len());

    println!("🌱 Mandi Catalog Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Shops:    {}", shop_count);
    println!("Products: {}", product_count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.catalog().count_products().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Create shops
    println!();
    println!("Creating shops...");
    let mut shops = Vec::with_capacity(shop_count);
    for name in SHOP_NAMES.iter().take(shop_count) {
        let shop = db
            .shops()
            .create_shop(&NewShop {
                name: name.to_string(),
            })
            .await?;
        println!("  ✓ {}", shop.name);
        shops.push(shop);
    }

    // Generate products and stock them
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let mut stocked = 0;
    let mut first_pair: Option<(String, String)> = None;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category, unit, names)) in CATALOG.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated >= product_count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + name_idx * 20 + size_idx;
                let input = generate_product(category, name, size, *price_addon, seed);
                let base_price = input.base_price;

                let product = match db.catalog().create_product(&input).await {
                    Ok(product) => product,
                    Err(e) => {
                        eprintln!("Failed to insert {}: {}", input.name, e);
                        continue;
                    }
                };

                generated += 1;

                // Stock roughly three quarters of the (shop, product) pairs.
                for (shop_idx, shop) in shops.iter().enumerate() {
                    if (seed + shop_idx) % 4 == 0 {
                        continue;
                    }

                    let markup = ((seed * 11 + shop_idx * 29) % 500 + 50) as i64;
                    let stock_quantity = ((seed * 7 + shop_idx * 13) % 101) as i64;
                    let result = db
                        .catalog()
                        .add_inventory(
                            &shop.shop_id,
                            &product.product_id,
                            &NewInventory {
                                stock_quantity,
                                selling_price: base_price + Money::from_cents(markup),
                                unit: unit.to_string(),
                            },
                        )
                        .await;

                    match result {
                        Ok(record) => {
                            stocked += 1;
                            if first_pair.is_none() && record.stock_quantity > 0 {
                                first_pair =
                                    Some((record.product_id.clone(), record.shop_id.clone()));
                            }
                        }
                        Err(e) => {
                            eprintln!("Failed to stock {} in {}: {}", product.name, shop.name, e)
                        }
                    }
                }

                if generated % 50 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} products ({} inventory records) in {:?}",
        generated, stocked, elapsed
    );
    println!(
        "  Rate: {:.0} products/second",
        generated as f64 / elapsed.as_secs_f64()
    );

    // Verify the catalog reads back
    println!();
    println!("Verifying catalog...");
    let page = db.catalog().list_products(&ProductListQuery::default()).await?;
    println!(
        "  Listing: {} distinct products, {} rows on page 1",
        page.pagination.total,
        page.items.len()
    );

    let rice = db
        .catalog()
        .list_products(&ProductListQuery {
            search: Some("rice".to_string()),
            ..Default::default()
        })
        .await?;
    println!("  Search 'rice': {} products", rice.pagination.total);

    if let Some((product_id, shop_id)) = first_pair {
        if let Some(avail) = db.catalog().check_availability(&product_id, &shop_id).await? {
            println!(
                "  Availability spot check: {} units on hand",
                avail.stock_quantity
            );
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Sets up tracing so repository debug lines show up under `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mandi=info,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Generates a single product input with deterministic pricing.
fn generate_product(
    category: &str,
    name: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
) -> NewProduct {
    // Base price 199-999 cents before the pack-size addon
    let base = 199 + ((seed * 17) % 800) as i64;

    NewProduct {
        name: format!("{} {}", name, size),
        description: Some(format!("{} - {}", category, name)),
        base_price: Money::from_cents(base + price_addon),
        image_url: None,
    }
}
