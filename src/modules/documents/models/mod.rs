mod document;

pub use document::{Document, DocumentKind, DocumentPayload, PaymentStatus};
