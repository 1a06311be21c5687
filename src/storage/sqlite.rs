//! SQLite storage implementation

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::schema;
use crate::model::{
    Category, City, Country, Position, Product, ProductDetails, Shop, ShopDetails, Worker,
    WorkerDetails,
};
use crate::{Error, Result};

const SHOP_COLUMNS: &str = "id, name, address, city_id, parking_area";
const CITY_COLUMNS: &str = "id, name, country_id";
const WORKER_COLUMNS: &str =
    "id, name, surname, salary, email, phone_number, position_id, shop_id";
const PRODUCT_COLUMNS: &str =
    "id, name, price, discount, category_id, quantity, is_in_stock, shop_id";

/// SQLite-backed storage for the shop catalogue
///
/// The connection closes when the store is dropped.
pub struct ShopStore {
    conn: Connection,
}

impl ShopStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!("opened database {}", path.display());
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Enable foreign keys and create missing tables
    fn initialize_schema(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", true)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Country Operations ==========

    /// Insert a country, returning its assigned id
    pub fn insert_country(&self, country: &Country) -> Result<i64> {
        self.conn
            .execute("INSERT INTO countries (name) VALUES (?1)", params![country.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_countries(&self) -> Result<Vec<Country>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM countries ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Country {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_countries(&self) -> Result<usize> {
        self.count_rows("countries")
    }

    /// True once any country row exists
    pub fn has_countries(&self) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM countries LIMIT 1", [], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    // ========== City Operations ==========

    pub fn insert_city(&self, city: &City) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO cities (name, country_id) VALUES (?1, ?2)",
            params![city.name, city.country_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_city(&self, id: i64) -> Result<Option<City>> {
        self.conn
            .query_row(
                &format!("SELECT {CITY_COLUMNS} FROM cities WHERE id = ?1"),
                [id],
                row_to_city,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn list_cities(&self) -> Result<Vec<City>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CITY_COLUMNS} FROM cities ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_city)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Cities belonging to one country
    pub fn cities_for_country(&self, country_id: i64) -> Result<Vec<City>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CITY_COLUMNS} FROM cities WHERE country_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([country_id], row_to_city)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_cities(&self) -> Result<usize> {
        self.count_rows("cities")
    }

    // ========== Shop Operations ==========

    pub fn insert_shop(&self, shop: &Shop) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO shops (name, address, city_id, parking_area) VALUES (?1, ?2, ?3, ?4)",
            params![shop.name, shop.address, shop.city_id, shop.parking_area],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_shops(&self) -> Result<Vec<Shop>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SHOP_COLUMNS} FROM shops ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_shop)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_shops(&self) -> Result<usize> {
        self.count_rows("shops")
    }

    // ========== Position Operations ==========

    pub fn insert_position(&self, position: &Position) -> Result<i64> {
        self.conn
            .execute("INSERT INTO positions (name) VALUES (?1)", params![position.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_position(&self, id: i64) -> Result<Option<Position>> {
        self.conn
            .query_row("SELECT id, name FROM positions WHERE id = ?1", [id], |row| {
                Ok(Position {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .optional()
            .map_err(Into::into)
    }

    pub fn list_positions(&self) -> Result<Vec<Position>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM positions ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Position {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_positions(&self) -> Result<usize> {
        self.count_rows("positions")
    }

    // ========== Worker Operations ==========

    pub fn insert_worker(&self, worker: &Worker) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO workers (name, surname, salary, email, phone_number, position_id, shop_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                worker.name,
                worker.surname,
                worker.salary.to_string(),
                worker.email,
                worker.phone_number,
                worker.position_id,
                worker.shop_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_workers(&self) -> Result<Vec<Worker>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {WORKER_COLUMNS} FROM workers ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_worker)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Workers employed at one shop
    pub fn workers_for_shop(&self, shop_id: i64) -> Result<Vec<Worker>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE shop_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([shop_id], row_to_worker)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_workers(&self) -> Result<usize> {
        self.count_rows("workers")
    }

    // ========== Category Operations ==========

    pub fn insert_category(&self, category: &Category) -> Result<i64> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![category.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.conn
            .query_row("SELECT id, name FROM categories WHERE id = ?1", [id], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .optional()
            .map_err(Into::into)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_categories(&self) -> Result<usize> {
        self.count_rows("categories")
    }

    // ========== Product Operations ==========

    pub fn insert_product(&self, product: &Product) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO products (name, price, discount, category_id, quantity, is_in_stock, shop_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                product.name,
                product.price.to_string(),
                product.discount.to_string(),
                product.category_id,
                product.quantity,
                product.is_in_stock,
                product.shop_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_products(&self) -> Result<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))?;
        let rows = stmt
            .query_map([], row_to_product)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Products stocked by one shop
    pub fn products_for_shop(&self, shop_id: i64) -> Result<Vec<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE shop_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([shop_id], row_to_product)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_products(&self) -> Result<usize> {
        self.count_rows("products")
    }

    // ========== Eager Fetches ==========

    /// Load every shop with its city, workers (with position) and products
    /// (with category) attached.
    ///
    /// Three joined queries, grouped by shop id in memory. Shops, workers
    /// and products come back in ascending id order.
    pub fn load_shop_details(&self) -> Result<Vec<ShopDetails>> {
        let mut workers_by_shop: HashMap<i64, Vec<WorkerDetails>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT w.id, w.name, w.surname, w.salary, w.email, w.phone_number,
                       w.position_id, w.shop_id, p.id, p.name
                FROM workers w
                LEFT JOIN positions p ON p.id = w.position_id
                ORDER BY w.id
                "#,
            )?;
            let rows = stmt.query_map([], |row| {
                let worker = row_to_worker(row)?;
                let position = match row.get::<_, Option<i64>>(8)? {
                    Some(id) => Some(Position { id, name: row.get(9)? }),
                    None => None,
                };
                Ok(WorkerDetails { worker, position })
            })?;
            for details in rows {
                let details = details?;
                workers_by_shop
                    .entry(details.worker.shop_id)
                    .or_default()
                    .push(details);
            }
        }

        let mut products_by_shop: HashMap<i64, Vec<ProductDetails>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT p.id, p.name, p.price, p.discount, p.category_id, p.quantity,
                       p.is_in_stock, p.shop_id, c.id, c.name
                FROM products p
                LEFT JOIN categories c ON c.id = p.category_id
                ORDER BY p.id
                "#,
            )?;
            let rows = stmt.query_map([], |row| {
                let product = row_to_product(row)?;
                let category = match row.get::<_, Option<i64>>(8)? {
                    Some(id) => Some(Category { id, name: row.get(9)? }),
                    None => None,
                };
                Ok(ProductDetails { product, category })
            })?;
            for details in rows {
                let details = details?;
                products_by_shop
                    .entry(details.product.shop_id)
                    .or_default()
                    .push(details);
            }
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT s.id, s.name, s.address, s.city_id, s.parking_area,
                   c.id, c.name, c.country_id
            FROM shops s
            LEFT JOIN cities c ON c.id = s.city_id
            ORDER BY s.id
            "#,
        )?;
        let shops = stmt
            .query_map([], |row| {
                let shop = row_to_shop(row)?;
                let city = match row.get::<_, Option<i64>>(5)? {
                    Some(id) => Some(City {
                        id,
                        name: row.get(6)?,
                        country_id: row.get(7)?,
                    }),
                    None => None,
                };
                Ok((shop, city))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let details = shops
            .into_iter()
            .map(|(shop, city)| ShopDetails {
                workers: workers_by_shop.remove(&shop.id).unwrap_or_default(),
                products: products_by_shop.remove(&shop.id).unwrap_or_default(),
                shop,
                city,
            })
            .collect();
        Ok(details)
    }

    // ========== Bulk Operations ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }

    /// Run `f` inside a transaction; commit on success, roll back on error
    ///
    /// A failed COMMIT (e.g. a deferred constraint) is rolled back too, so the
    /// connection is always back in autocommit mode afterwards.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.begin_transaction()?;
        let result = f(self).and_then(|value| self.commit().map(|()| value));
        if result.is_err() && !self.conn.is_autocommit() {
            if let Err(rollback_err) = self.rollback() {
                tracing::warn!("rollback failed: {}", rollback_err);
            }
        }
        result
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            countries: self.count_countries()?,
            cities: self.count_cities()?,
            shops: self.count_shops()?,
            positions: self.count_positions()?,
            workers: self.count_workers()?,
            categories: self.count_categories()?,
            products: self.count_products()?,
        })
    }

    /// `table` must be one of `schema::TABLES`
    fn count_rows(&self, table: &str) -> Result<usize> {
        debug_assert!(schema::TABLES.contains(&table));
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn row_to_city(row: &rusqlite::Row) -> rusqlite::Result<City> {
    Ok(City {
        id: row.get(0)?,
        name: row.get(1)?,
        country_id: row.get(2)?,
    })
}

fn row_to_shop(row: &rusqlite::Row) -> rusqlite::Result<Shop> {
    Ok(Shop {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        city_id: row.get(3)?,
        parking_area: row.get(4)?,
    })
}

/// Expects `WORKER_COLUMNS` at positions 0..8
fn row_to_worker(row: &rusqlite::Row) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: row.get(0)?,
        name: row.get(1)?,
        surname: row.get(2)?,
        salary: decimal_column(row, 3, "workers.salary")?,
        email: row.get(4)?,
        phone_number: row.get(5)?,
        position_id: row.get(6)?,
        shop_id: row.get(7)?,
    })
}

/// Expects `PRODUCT_COLUMNS` at positions 0..8
fn row_to_product(row: &rusqlite::Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: decimal_column(row, 2, "products.price")?,
        discount: decimal_column(row, 3, "products.discount")?,
        category_id: row.get(4)?,
        quantity: row.get(5)?,
        is_in_stock: row.get(6)?,
        shop_id: row.get(7)?,
    })
}

fn decimal_column(
    row: &rusqlite::Row,
    idx: usize,
    column: &'static str,
) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(Error::InvalidDecimal { column, value: raw }),
        )
    })
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub countries: usize,
    pub cities: usize,
    pub shops: usize,
    pub positions: usize,
    pub workers: usize,
    pub categories: usize,
    pub products: usize,
}

impl DbStats {
    /// (table, row count) pairs in schema order
    pub fn rows(&self) -> [(&'static str, usize); 7] {
        [
            ("countries", self.countries),
            ("cities", self.cities),
            ("shops", self.shops),
            ("positions", self.positions),
            ("workers", self.workers),
            ("categories", self.categories),
            ("products", self.products),
        ]
    }
}
