// Payments module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{PaymentInput, PaymentRecord};
pub use services::{LedgerUpdate, PaymentLedger};
