//! Shop report rendering
//!
//! One block per shop: a header line, the workers, the products, and a
//! trailing blank line. Missing city or position links print as `Unknown`.

use std::io::{self, Write};

use crate::model::ShopDetails;

/// Placeholder for an absent parent row
pub const UNKNOWN: &str = "Unknown";
pub const NO_WORKERS: &str = "- No workers available.";
pub const NO_PRODUCTS: &str = "- No products available.";

/// Write the plain-text report for `shops` in the given order
pub fn write_text<W: Write>(out: &mut W, shops: &[ShopDetails]) -> io::Result<()> {
    for details in shops {
        writeln!(
            out,
            "Shop: {}, Address: {}, City: {}",
            details.shop.name,
            details.shop.address,
            details.city_name().unwrap_or(UNKNOWN)
        )?;

        writeln!(out, "Workers:")?;
        if details.workers.is_empty() {
            writeln!(out, "{NO_WORKERS}")?;
        }
        for worker in &details.workers {
            writeln!(
                out,
                "- {} {}, Position: {}",
                worker.worker.name,
                worker.worker.surname,
                worker.position_name().unwrap_or(UNKNOWN)
            )?;
        }

        writeln!(out, "Products:")?;
        if details.products.is_empty() {
            writeln!(out, "{NO_PRODUCTS}")?;
        }
        for product in &details.products {
            writeln!(
                out,
                "- {}, Price: {}, In Stock: {}",
                product.product.name, product.product.price, product.product.is_in_stock
            )?;
        }

        writeln!(out)?;
    }
    Ok(())
}

/// Render the plain-text report into a string
pub fn render_text(shops: &[ShopDetails]) -> io::Result<String> {
    let mut buf = Vec::new();
    write_text(&mut buf, shops)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Render the report as a JSON array of shops with nested relations
pub fn render_json(shops: &[ShopDetails]) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(shops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Category, City, Position, Product, ProductDetails, Shop, Worker, WorkerDetails,
    };
    use crate::{ShopStore, seed};
    use rust_decimal::Decimal;

    fn seeded_report() -> Vec<ShopDetails> {
        let mut store = ShopStore::open_in_memory().unwrap();
        seed::initialize(&mut store).unwrap();
        store.load_shop_details().unwrap()
    }

    fn bare_shop(name: &str) -> ShopDetails {
        ShopDetails {
            shop: Shop {
                id: 7,
                name: name.to_string(),
                address: "Street 7".to_string(),
                city_id: 3,
                parking_area: "No".to_string(),
            },
            city: None,
            workers: Vec::new(),
            products: Vec::new(),
        }
    }

    #[test]
    fn test_seeded_report_text() {
        let text = render_text(&seeded_report()).unwrap();
        let expected = "\
Shop: Shop A, Address: Street 1, City: Kyiv
Workers:
- John Doe, Position: Manager
Products:
- Laptop, Price: 1000, In Stock: true

Shop: Shop B, Address: Street 2, City: Warsaw
Workers:
- Jane Doe, Position: Cashier
Products:
- T-Shirt, Price: 20, In Stock: true

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_shop_prints_placeholders() {
        let text = render_text(&[bare_shop("Shop Z")]).unwrap();
        assert_eq!(
            text,
            "Shop: Shop Z, Address: Street 7, City: Unknown\nWorkers:\n- No workers available.\nProducts:\n- No products available.\n\n"
        );
    }

    #[test]
    fn test_missing_position_prints_unknown() {
        let mut details = bare_shop("Shop Z");
        details.city = Some(City { id: 3, name: "Lviv".to_string(), country_id: 1 });
        details.workers.push(WorkerDetails {
            worker: Worker::new("Ann", "Lee", Decimal::from(1), "a@example.com", "1", 9, 7),
            position: None,
        });
        details.products.push(ProductDetails {
            product: Product::new("Mug", Decimal::new(450, 2), Decimal::ZERO, 1, 0, false, 7),
            category: Some(Category { id: 1, name: "Kitchen".to_string() }),
        });

        let text = render_text(&[details]).unwrap();
        assert!(text.contains("City: Lviv"));
        assert!(text.contains("- Ann Lee, Position: Unknown"));
        assert!(text.contains("- Mug, Price: 4.50, In Stock: false"));
    }

    #[test]
    fn test_empty_report_is_empty() {
        assert_eq!(render_text(&[]).unwrap(), "");
    }

    #[test]
    fn test_json_report_nests_relations() {
        let json = render_json(&seeded_report()).unwrap();
        let shops = json.as_array().unwrap();
        assert_eq!(shops.len(), 2);
        assert_eq!(shops[0]["name"], "Shop A");
        assert_eq!(shops[0]["city"]["name"], "Kyiv");
        assert_eq!(shops[0]["workers"][0]["position"]["name"], "Manager");
        assert_eq!(shops[1]["products"][0]["price"], "20");
        assert_eq!(shops[1]["products"][0]["category"]["name"], "Clothing");

        let mut details = bare_shop("Shop Z");
        details.workers.push(WorkerDetails {
            worker: Worker::new("Ann", "Lee", Decimal::from(1), "a@example.com", "1", 9, 7),
            position: Some(Position::new("Clerk")),
        });
        let json = render_json(&[details]).unwrap();
        assert!(json[0]["city"].is_null());
    }
}
