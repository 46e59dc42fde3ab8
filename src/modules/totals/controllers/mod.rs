pub mod totals_controller;

pub use totals_controller::configure;
