//! Schema model - plain records for the shop catalogue
//!
//! Relationships are explicit foreign-key fields; nothing is tracked or
//! loaded lazily. Related rows are attached by the store's eager fetches
//! into the `*Details` views at the bottom of this module.
//!
//! - `Country` 1—* `City`
//! - `City` 1—* `Shop`
//! - `Shop` 1—* `Worker`, 1—* `Product`
//! - `Position` 1—* `Worker`
//! - `Category` 1—* `Product`

use rust_decimal::Decimal;
use serde::Serialize;

/// A country, parent of cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

impl Country {
    /// Create a new country for insertion (id will be set by DB)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0, // Set by DB
            name: name.into(),
        }
    }
}

/// A city inside a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    /// Foreign key to `countries.id`
    pub country_id: i64,
}

impl City {
    pub fn new(name: impl Into<String>, country_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            country_id,
        }
    }
}

/// A shop located in a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub address: String,
    /// Foreign key to `cities.id`
    pub city_id: i64,
    /// Free-form parking description ("Yes", "No", ...)
    pub parking_area: String,
}

impl Shop {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city_id: i64,
        parking_area: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
            city_id,
            parking_area: parking_area.into(),
        }
    }
}

/// A job position held by workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub id: i64,
    pub name: String,
}

impl Position {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: 0, name: name.into() }
    }
}

/// A worker employed at one shop in one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// Monthly salary, fixed-point
    pub salary: Decimal,
    pub email: String,
    pub phone_number: String,
    /// Foreign key to `positions.id`
    pub position_id: i64,
    /// Foreign key to `shops.id`
    pub shop_id: i64,
}

impl Worker {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        salary: Decimal,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        position_id: i64,
        shop_id: i64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            surname: surname.into(),
            salary,
            email: email.into(),
            phone_number: phone_number.into(),
            position_id,
            shop_id,
        }
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: 0, name: name.into() }
    }
}

/// A product stocked by one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub discount: Decimal,
    /// Foreign key to `categories.id`
    pub category_id: i64,
    pub quantity: i32,
    pub is_in_stock: bool,
    /// Foreign key to `shops.id`
    pub shop_id: i64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        discount: Decimal,
        category_id: i64,
        quantity: i32,
        is_in_stock: bool,
        shop_id: i64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
            discount,
            category_id,
            quantity,
            is_in_stock,
            shop_id,
        }
    }
}

// ========== Eager-loaded views ==========

/// A worker with its position attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerDetails {
    #[serde(flatten)]
    pub worker: Worker,
    /// `None` when the position row is missing
    pub position: Option<Position>,
}

/// A product with its category attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

/// A shop with its city, workers and products attached.
///
/// Workers and products are ordered by ascending id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopDetails {
    #[serde(flatten)]
    pub shop: Shop,
    /// `None` when the city link is absent
    pub city: Option<City>,
    pub workers: Vec<WorkerDetails>,
    pub products: Vec<ProductDetails>,
}

impl ShopDetails {
    /// City name, if the city row was found
    pub fn city_name(&self) -> Option<&str> {
        self.city.as_ref().map(|c| c.name.as_str())
    }
}

impl WorkerDetails {
    pub fn position_name(&self) -> Option<&str> {
        self.position.as_ref().map(|p| p.name.as_str())
    }
}
