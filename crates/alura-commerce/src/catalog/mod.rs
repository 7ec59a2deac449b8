//! Product catalog module.
//!
//! The catalog is the read-only data source behind every price lookup. It is
//! built once at startup, either from the built-in collection or from a JSON
//! catalog file, and shared behind an `Arc`.

mod product;

pub use product::Product;

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use product::ProductRecord;

/// An immutable, ordered list of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CommerceError::DuplicateProduct(product.id));
            }
            if product.price.amount_cents < 0 {
                return Err(CommerceError::InvalidPrice {
                    id: product.id,
                    price: product.price.to_decimal(),
                });
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog file: a JSON array of
    /// `{id, name, price, category, image}` records with decimal prices.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let products = records
            .into_iter()
            .map(|r| {
                if !r.price.is_finite() || r.price < 0.0 {
                    return Err(CommerceError::InvalidPrice {
                        id: r.id,
                        price: r.price,
                    });
                }
                Ok(Product::new(
                    r.id,
                    r.name,
                    Money::from_decimal(r.price),
                    r.category,
                    r.image_ref,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(products)
    }

    /// The six products of the Alura collection.
    pub fn alura_collection() -> Self {
        let product = |id: u32, name: &str, cents: i64, category: &str, image: &str| {
            Product::new(
                ProductId::new(id),
                name,
                Money::new(cents),
                category,
                format!("https://placehold.co/600x600/{image}"),
            )
        };

        Self {
            products: vec![
                product(101, "The Renewal Peptide Serum", 4900, "Beauty & Skincare", "FCFBF6/333333?text=Clean+Serum"),
                product(102, "The Classic Tailored Blazer", 15900, "Fashion", "D4AFB9/333333?text=Linen+Jacket"),
                product(103, "Woven Bamboo Basket Set", 7500, "Home & Lifestyle", "0A7D69/FCFBF6?text=Storage+Basket"),
                product(104, "Merino Wool Knit Dress", 12900, "Fashion", "B88691/333333?text=Knit+Dress"),
                product(105, "Ceramic Minimalist Diffuser", 6500, "Home & Lifestyle", "FCFBF6/0A7D69?text=Diffuser"),
                product(106, "Barrier Repair Cleansing Balm", 3200, "Beauty & Skincare", "D4AFB9/333333?text=Cleansing+Balm"),
            ],
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Check whether a product exists.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products in a category (case-insensitive match).
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alura_collection() {
        let catalog = Catalog::alura_collection();
        assert_eq!(catalog.len(), 6);

        let serum = catalog.get(ProductId::new(101)).unwrap();
        assert_eq!(serum.name, "The Renewal Peptide Serum");
        assert_eq!(serum.price, Money::new(4900));
        assert!(catalog.get(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_categories() {
        let catalog = Catalog::alura_collection();
        assert_eq!(
            catalog.categories(),
            vec!["Beauty & Skincare", "Fashion", "Home & Lifestyle"]
        );
        let fashion: Vec<_> = catalog.in_category("fashion").map(|p| p.id.get()).collect();
        assert_eq!(fashion, vec![102, 104]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": 1, "name": "Candle", "price": 18.5, "category": "Home", "image": "candle.png"},
            {"id": 2, "name": "Soap", "price": 6.0, "category": "Bath", "image_ref": "soap.png"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().price.amount_cents, 1850);
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().image_ref, "soap.png");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 1, "name": "A", "price": 1.0, "category": "X", "image": "a"},
            {"id": 1, "name": "B", "price": 2.0, "category": "X", "image": "b"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::DuplicateProduct(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"id": 7, "name": "A", "price": -1.0, "category": "X", "image": "a"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
