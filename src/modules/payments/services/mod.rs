pub mod payment_ledger;

pub use payment_ledger::{LedgerUpdate, PaymentLedger};
