//! Data module - chart data file loading

mod loader;

pub use loader::{DataLoader, Datum, PieData, DEFAULT_TITLE};
