pub mod totals_engine;

pub use totals_engine::TotalsEngine;
