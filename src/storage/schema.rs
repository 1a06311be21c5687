//! Database schema definitions

/// SQL to create the countries table
pub const CREATE_COUNTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS countries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

/// SQL to create the cities table
pub const CREATE_CITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    country_id INTEGER NOT NULL REFERENCES countries(id)
)
"#;

/// SQL to create the shops table
pub const CREATE_SHOPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS shops (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    city_id INTEGER NOT NULL REFERENCES cities(id),
    parking_area TEXT NOT NULL
)
"#;

/// SQL to create the positions table
pub const CREATE_POSITIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS positions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

/// SQL to create the workers table
/// Money columns hold the canonical decimal string
pub const CREATE_WORKERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS workers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    surname TEXT NOT NULL,
    salary TEXT NOT NULL,
    email TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    position_id INTEGER NOT NULL REFERENCES positions(id),
    shop_id INTEGER NOT NULL REFERENCES shops(id)
)
"#;

/// SQL to create the categories table
pub const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

/// SQL to create the products table
pub const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price TEXT NOT NULL,
    discount TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    quantity INTEGER NOT NULL,
    is_in_stock INTEGER NOT NULL CHECK (is_in_stock IN (0, 1)),
    shop_id INTEGER NOT NULL REFERENCES shops(id)
)
"#;

/// SQL to create indexes on every foreign-key column
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_cities_country ON cities(country_id)",
    "CREATE INDEX IF NOT EXISTS idx_shops_city ON shops(city_id)",
    "CREATE INDEX IF NOT EXISTS idx_workers_position ON workers(position_id)",
    "CREATE INDEX IF NOT EXISTS idx_workers_shop ON workers(shop_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_shop ON products(shop_id)",
];

/// All table names, parents before children
pub const TABLES: &[&str] = &[
    "countries",
    "cities",
    "shops",
    "positions",
    "workers",
    "categories",
    "products",
];

/// All schema creation statements, in dependency order
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_COUNTRIES_TABLE,
        CREATE_CITIES_TABLE,
        CREATE_SHOPS_TABLE,
        CREATE_POSITIONS_TABLE,
        CREATE_WORKERS_TABLE,
        CREATE_CATEGORIES_TABLE,
        CREATE_PRODUCTS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
