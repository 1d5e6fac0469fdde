//! Stock alerts shown in the notification dropdown.
//!
//! Two kinds of alert are raised from the catalog: products running low and
//! products expiring soon. Each kind is sorted most urgent first and capped
//! at [`AlertThresholds::max_items`].

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use super::product::ProductCatalog;

/// Thresholds for raising stock alerts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Quantities strictly below this are low stock.
    pub low_stock_below: u32,
    /// Products expiring within this many days (today included) are flagged.
    pub expiring_within_days: i64,
    /// Maximum alerts of each kind.
    pub max_items: usize,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_stock_below: 10,
            expiring_within_days: 30,
            max_items: 5,
        }
    }
}

/// A single notification entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAlert {
    LowStock {
        code: String,
        description: String,
        quantity: u32,
    },
    ExpiringSoon {
        code: String,
        description: String,
        date: NaiveDate,
        days_left: i64,
    },
}

impl StockAlert {
    /// One-line text for the dropdown.
    pub fn message(&self) -> String {
        match self {
            StockAlert::LowStock {
                description,
                quantity,
                ..
            } => format!("Low stock: {} ({} left)", description, quantity),
            StockAlert::ExpiringSoon {
                description,
                days_left: 0,
                ..
            } => format!("Expires today: {}", description),
            StockAlert::ExpiringSoon {
                description,
                days_left,
                ..
            } => format!("Expiring in {} days: {}", days_left, description),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            StockAlert::LowStock { code, .. } | StockAlert::ExpiringSoon { code, .. } => code,
        }
    }
}

/// Compute the alerts for `catalog` as of `today`.
///
/// Low-stock alerts come first (lowest quantity first), then expirations
/// (soonest first). Already expired products are not reported.
pub fn stock_alerts(
    catalog: &ProductCatalog,
    today: NaiveDate,
    thresholds: &AlertThresholds,
) -> Vec<StockAlert> {
    let mut low: Vec<_> =
        catalog.iter().filter(|p| p.quantity < thresholds.low_stock_below).collect();
    low.sort_by_key(|p| p.quantity);

    let days = thresholds.expiring_within_days;
    let horizon = Duration::try_days(days)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
    let mut expiring: Vec<_> = catalog
        .iter()
        .filter_map(|p| p.expiration.date().map(|d| (p, d)))
        .filter(|(_, d)| *d >= today && *d <= horizon)
        .collect();
    expiring.sort_by_key(|(_, d)| *d);

    let low = low.into_iter().take(thresholds.max_items).map(|p| StockAlert::LowStock {
        code: p.code.clone(),
        description: p.description.clone(),
        quantity: p.quantity,
    });
    let expiring =
        expiring.into_iter().take(thresholds.max_items).map(|(p, date)| StockAlert::ExpiringSoon {
            code: p.code.clone(),
            description: p.description.clone(),
            date,
            days_left: (date - today).num_days(),
        });

    low.chain(expiring).collect()
}
