//! Core conversion engine, simulation and session state

pub mod amount;
pub mod config;
pub mod convert;
pub mod log;
pub mod selection;
pub mod session;
pub mod simulator;
pub mod state;
pub mod ticker;
pub mod unit;

// Re-export main types for cleaner imports
pub use convert::{convert, format_amount, parse_amount};
pub use selection::{SelectionError, SelectionList, reorder, set_at};
pub use session::Session;
pub use simulator::{HistoricalPoint, generate_history, refresh_rates};
pub use state::{ApplicationState, View};
pub use unit::{Catalog, Unit, UnitKind, find_by_code, list_units};
