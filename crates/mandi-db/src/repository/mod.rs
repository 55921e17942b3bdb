//! # Repository Module
//!
//! Database repository implementations for the Mandi catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  API Handler                                                           │
//! │       │                                                                 │
//! │       │  db.catalog().list_products(&query)                            │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CatalogRepository                                                     │
//! │  ├── list_products(&self, query)                                       │
//! │  ├── get_product_in_shop(&self, product_id, shop_id)                   │
//! │  ├── add_inventory(&self, shop_id, product_id, input)                  │
//! │  └── soft_delete_product(&self, product_id)                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (mock the repository)                                  │
//! │  • SQL is isolated in one place                                        │
//! │  • Can swap database implementations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`] - Product listing, lookup, inventory, soft-delete
//! - [`ShopRepository`] - Shop CRUD and the active/inactive toggle
//!
//! [`CatalogRepository`]: catalog::CatalogRepository
//! [`ShopRepository`]: shop::ShopRepository

pub mod catalog;
pub mod shop;
