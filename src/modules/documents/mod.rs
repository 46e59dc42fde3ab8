// Documents module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{Document, DocumentKind, PaymentStatus};
pub use services::TotalsRenderer;
