pub mod totals_renderer;

pub use totals_renderer::{RenderedDocument, RenderedTotals, TotalsRenderer};
