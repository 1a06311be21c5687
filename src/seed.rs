//! Sample-data seeder
//!
//! Inserts the fixed sample catalogue once. Each stage commits before the
//! next one starts, since later rows reference ids assigned by earlier
//! stages. A database with any country row is left untouched.

use rust_decimal::Decimal;

use crate::Result;
use crate::model::{Category, City, Country, Position, Product, Shop, Worker};
use crate::storage::ShopStore;

/// What `initialize` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Country rows already existed; nothing was inserted
    AlreadySeeded,
    /// The sample catalogue was inserted
    Seeded(SeedCounts),
}

/// Rows inserted per table by a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedCounts {
    pub countries: usize,
    pub cities: usize,
    pub positions: usize,
    pub shops: usize,
    pub workers: usize,
    pub categories: usize,
    pub products: usize,
}

impl SeedCounts {
    pub fn total(&self) -> usize {
        self.countries
            + self.cities
            + self.positions
            + self.shops
            + self.workers
            + self.categories
            + self.products
    }
}

impl std::fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedOutcome::AlreadySeeded => write!(f, "Database already seeded; nothing inserted"),
            SeedOutcome::Seeded(counts) => write!(
                f,
                "Seeded {} rows ({} countries, {} cities, {} positions, {} shops, {} workers, {} categories, {} products)",
                counts.total(),
                counts.countries,
                counts.cities,
                counts.positions,
                counts.shops,
                counts.workers,
                counts.categories,
                counts.products,
            ),
        }
    }
}

/// Seed the sample catalogue if the database has no countries yet.
///
/// The schema is created by `ShopStore::open`, so this only inserts rows.
pub fn initialize(store: &mut ShopStore) -> Result<SeedOutcome> {
    if store.has_countries()? {
        tracing::info!("countries present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut counts = SeedCounts::default();

    let (countries, cities, positions) = store.transaction(|tx| {
        let ukraine = tx.insert_country(&Country::new("Ukraine"))?;
        let poland = tx.insert_country(&Country::new("Poland"))?;
        let kyiv = tx.insert_city(&City::new("Kyiv", ukraine))?;
        let warsaw = tx.insert_city(&City::new("Warsaw", poland))?;
        let manager = tx.insert_position(&Position::new("Manager"))?;
        let cashier = tx.insert_position(&Position::new("Cashier"))?;
        Ok(([ukraine, poland], [kyiv, warsaw], [manager, cashier]))
    })?;
    counts.countries = countries.len();
    counts.cities = cities.len();
    counts.positions = positions.len();
    tracing::info!("seeded countries, cities and positions");

    let shops = store.transaction(|tx| {
        let shop_a = tx.insert_shop(&Shop::new("Shop A", "Street 1", cities[0], "Yes"))?;
        let shop_b = tx.insert_shop(&Shop::new("Shop B", "Street 2", cities[1], "No"))?;
        Ok([shop_a, shop_b])
    })?;
    counts.shops = shops.len();
    tracing::info!("seeded shops");

    let workers = store.transaction(|tx| {
        let john = tx.insert_worker(&Worker::new(
            "John",
            "Doe",
            Decimal::from(5000),
            "john@example.com",
            "123456789",
            positions[0],
            shops[0],
        ))?;
        let jane = tx.insert_worker(&Worker::new(
            "Jane",
            "Doe",
            Decimal::from(4000),
            "jane@example.com",
            "987654321",
            positions[1],
            shops[1],
        ))?;
        Ok([john, jane])
    })?;
    counts.workers = workers.len();
    tracing::info!("seeded workers");

    let categories = store.transaction(|tx| {
        let electronics = tx.insert_category(&Category::new("Electronics"))?;
        let clothing = tx.insert_category(&Category::new("Clothing"))?;
        Ok([electronics, clothing])
    })?;
    counts.categories = categories.len();
    tracing::info!("seeded categories");

    let products = store.transaction(|tx| {
        let laptop = tx.insert_product(&Product::new(
            "Laptop",
            Decimal::from(1000),
            Decimal::from(100),
            categories[0],
            10,
            true,
            shops[0],
        ))?;
        let t_shirt = tx.insert_product(&Product::new(
            "T-Shirt",
            Decimal::from(20),
            Decimal::from(5),
            categories[1],
            50,
            true,
            shops[1],
        ))?;
        Ok([laptop, t_shirt])
    })?;
    counts.products = products.len();
    tracing::info!("seeded products");

    Ok(SeedOutcome::Seeded(counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_every_table() {
        let mut store = ShopStore::open_in_memory().unwrap();

        let outcome = initialize(&mut store).unwrap();
        let SeedOutcome::Seeded(counts) = outcome else {
            panic!("expected a fresh seed, got {outcome:?}");
        };
        assert_eq!(counts.total(), 14);

        let stats = store.stats().unwrap();
        assert_eq!(stats.countries, 2);
        assert_eq!(stats.cities, 2);
        assert_eq!(stats.positions, 2);
        assert_eq!(stats.shops, 2);
        assert_eq!(stats.workers, 2);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.products, 2);
    }

    #[test]
    fn test_seed_counts_match_table_rows() {
        let mut store = ShopStore::open_in_memory().unwrap();
        let SeedOutcome::Seeded(counts) = initialize(&mut store).unwrap() else {
            panic!("expected a fresh seed");
        };

        let stats = store.stats().unwrap();
        let reported = [
            ("countries", counts.countries),
            ("cities", counts.cities),
            ("shops", counts.shops),
            ("positions", counts.positions),
            ("workers", counts.workers),
            ("categories", counts.categories),
            ("products", counts.products),
        ];
        for (table, rows) in stats.rows() {
            let (_, count) = reported.iter().find(|(name, _)| *name == table).unwrap();
            assert_eq!(*count, rows, "{table}");
        }
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut store = ShopStore::open_in_memory().unwrap();
        initialize(&mut store).unwrap();
        let before = store.stats().unwrap();

        let outcome = initialize(&mut store).unwrap();
        assert_eq!(outcome, SeedOutcome::AlreadySeeded);
        assert_eq!(store.stats().unwrap(), before);
    }

    #[test]
    fn test_seed_skips_when_any_country_exists() {
        let mut store = ShopStore::open_in_memory().unwrap();
        store.insert_country(&Country::new("Elsewhere")).unwrap();

        assert_eq!(initialize(&mut store).unwrap(), SeedOutcome::AlreadySeeded);
        assert_eq!(store.count_shops().unwrap(), 0);
    }

    #[test]
    fn test_seeded_children_reference_existing_shops() {
        let mut store = ShopStore::open_in_memory().unwrap();
        initialize(&mut store).unwrap();

        let shop_ids: Vec<i64> = store.list_shops().unwrap().iter().map(|s| s.id).collect();
        for worker in store.list_workers().unwrap() {
            assert!(shop_ids.contains(&worker.shop_id));
        }
        for product in store.list_products().unwrap() {
            assert!(shop_ids.contains(&product.shop_id));
        }
    }

    #[test]
    fn test_seeded_values() {
        let mut store = ShopStore::open_in_memory().unwrap();
        initialize(&mut store).unwrap();

        let workers = store.list_workers().unwrap();
        assert_eq!(workers[0].email, "john@example.com");
        assert_eq!(workers[0].salary, Decimal::from(5000));
        assert_eq!(workers[1].phone_number, "987654321");

        let products = store.list_products().unwrap();
        assert_eq!(products[0].name, "Laptop");
        assert_eq!(products[0].discount, Decimal::from(100));
        assert_eq!(products[1].quantity, 50);

        let shops = store.list_shops().unwrap();
        assert_eq!(shops[0].parking_area, "Yes");
        assert_eq!(shops[1].parking_area, "No");
    }
}
