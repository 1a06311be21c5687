//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - countries(id, name)
//! - cities(id, name, country_id)
//! - shops(id, name, address, city_id, parking_area)
//! - positions(id, name)
//! - workers(id, name, surname, salary, email, phone_number, position_id, shop_id)
//! - categories(id, name)
//! - products(id, name, price, discount, category_id, quantity, is_in_stock, shop_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, ShopStore};
