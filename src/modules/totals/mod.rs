// Totals module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{LineItem, TaxBreakdown, TaxMethod, Totals, TotalsConfig};
pub use services::TotalsEngine;
