mod line_item;
mod totals;
mod totals_config;

pub use line_item::LineItem;
pub use totals::{TaxBreakdown, Totals};
pub use totals_config::{TaxMethod, TotalsConfig};
