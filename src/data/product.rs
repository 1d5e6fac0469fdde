//! Product models and the session catalog.
//!
//! The catalog is fixed once the page has loaded: nothing in the
//! application inserts, edits or removes products afterwards.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used for products that never expire.
pub const INDETERMINATE_LABEL: &str = "Indeterminado";

/// Day/month/year, as the inventory team writes dates.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for a product list.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share the same code.
    #[error("Duplicate product code: {0}")]
    DuplicateCode(String),

    /// Prices must be finite and non-negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Expirations are `dd/mm/yyyy` or the indeterminate sentinel.
    #[error("Invalid expiration: {0:?}")]
    InvalidExpiration(String),
}

/// A non-negative currency amount, kept in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    /// Build a price from a whole number of cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    pub fn cents(self) -> u64 {
        self.0
    }

    /// The amount as a plain number, for spreadsheet cells.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for Price {
    type Error = CatalogError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidPrice(value));
        }
        Ok(Self((value * 100.0).round() as u64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_f64()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// When a product expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Expiration {
    /// Expires on the given day.
    On(NaiveDate),
    /// Never expires (hardware, furniture, ...).
    Indeterminate,
}

impl Expiration {
    /// The expiration day, if there is one.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Expiration::On(date) => Some(*date),
            Expiration::Indeterminate => None,
        }
    }
}

impl FromStr for Expiration {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(INDETERMINATE_LABEL) || s.eq_ignore_ascii_case("indeterminate") {
            return Ok(Expiration::Indeterminate);
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Expiration::On)
            .map_err(|_| CatalogError::InvalidExpiration(s.to_string()))
    }
}

impl TryFrom<String> for Expiration {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Expiration> for String {
    fn from(expiration: Expiration) -> Self {
        expiration.to_string()
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiration::On(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Expiration::Indeterminate => f.write_str(INDETERMINATE_LABEL),
        }
    }
}

/// A single stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub description: String,
    pub category: String,
    pub expiration: Expiration,
    pub quantity: u32,
    pub unit_price: Price,
}

impl Product {
    pub fn new(
        code: &str,
        description: &str,
        category: &str,
        expiration: Expiration,
        quantity: u32,
        unit_price: Price,
    ) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            expiration,
            quantity,
            unit_price,
        }
    }

    /// Check whether the description, code or category contains `needle`.
    ///
    /// `needle` must already be lower-cased; the fields are lower-cased here.
    pub fn matches(&self, needle: &str) -> bool {
        self.description.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// The ordered, fixed list of products for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting duplicate product codes.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.code.as_str()) {
                return Err(CatalogError::DuplicateCode(product.code.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The four products the page ships with.
    pub fn sample() -> Self {
        Self {
            products: vec![
                Product::new(
                    "PROD001",
                    "Café Premium 500g",
                    "Alimentos",
                    seed_date(2025, 12, 30),
                    50,
                    Price::from_cents(25_90),
                ),
                Product::new(
                    "PROD002",
                    "Açúcar Cristal 1kg",
                    "Alimentos",
                    seed_date(2026, 6, 14),
                    100,
                    Price::from_cents(5_50),
                ),
                Product::new(
                    "ELE005",
                    "Mouse Gamer RGB",
                    "Eletrônicos",
                    Expiration::Indeterminate,
                    12,
                    Price::from_cents(125_00),
                ),
                Product::new(
                    "MOV003",
                    "Cadeira de Escritório",
                    "Móveis",
                    Expiration::Indeterminate,
                    5,
                    Price::from_cents(450_00),
                ),
            ],
        }
    }

    /// Load a catalog from a JSON file holding an array of products.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a catalog from a JSON array of products.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(content)?;
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::sample()
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> Expiration {
    NaiveDate::from_ymd_opt(year, month, day).map_or(Expiration::Indeterminate, Expiration::On)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_price_display_has_two_decimals() {
        assert_eq!(Price::from_cents(25_90).to_string(), "R$ 25.90");
        assert_eq!(Price::from_cents(5_50).to_string(), "R$ 5.50");
        assert_eq!(Price::from_cents(450_00).to_string(), "R$ 450.00");
        assert_eq!(Price::from_cents(7).to_string(), "R$ 0.07");
    }

    #[test]
    fn test_price_from_float_rounds_to_cents() {
        assert_eq!(Price::try_from(25.90).unwrap().cents(), 2590);
        assert_eq!(Price::try_from(0.0).unwrap().cents(), 0);
        assert!(Price::try_from(-1.0).is_err());
        assert!(Price::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_expiration_parse_and_display() {
        let date: Expiration = "30/12/2025".parse().unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2025, 12, 30));
        assert_eq!(date.to_string(), "30/12/2025");

        let never: Expiration = "indeterminado".parse().unwrap();
        assert_eq!(never, Expiration::Indeterminate);
        assert_eq!(never.to_string(), INDETERMINATE_LABEL);
        assert_eq!("Indeterminate".parse::<Expiration>().unwrap(), Expiration::Indeterminate);

        assert!("2025-12-30".parse::<Expiration>().is_err());
    }

    #[test]
    fn test_sample_catalog_order() {
        let catalog = ProductCatalog::sample();
        let codes: Vec<&str> = catalog.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["PROD001", "PROD002", "ELE005", "MOV003"]);
    }

    #[test]
    fn test_matches_is_case_insensitive_over_three_fields() {
        let catalog = ProductCatalog::sample();
        let cafe = catalog.get(0).unwrap();
        assert!(cafe.matches("café"));
        assert!(cafe.matches("prod0"));
        assert!(cafe.matches("alim"));
        assert!(!cafe.matches("30/12"));
        assert!(!cafe.matches("zz"));
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let product = ProductCatalog::sample().get(0).unwrap().clone();
        let result = ProductCatalog::new(vec![product.clone(), product]);
        assert!(matches!(result, Err(CatalogError::DuplicateCode(code)) if code == "PROD001"));
    }

    #[test]
    fn test_load_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[
                {{"code": "A1", "description": "Arroz 5kg", "category": "Alimentos",
                  "expiration": "01/02/2027", "quantity": 8, "unit_price": 22.5}},
                {{"code": "B2", "description": "Mesa", "category": "Móveis",
                  "expiration": "Indeterminado", "quantity": 3, "unit_price": 300}}
            ]"#
        )
        .unwrap();

        let catalog = ProductCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().unit_price, Price::from_cents(22_50));
        assert_eq!(catalog.get(1).unwrap().expiration, Expiration::Indeterminate);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProductCatalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        let json = r#"[{"code": "X", "description": "x", "category": "x",
            "expiration": "Indeterminado", "quantity": 1, "unit_price": -3.0}]"#;
        assert!(matches!(ProductCatalog::parse(json), Err(CatalogError::Parse(_))));
    }
}
