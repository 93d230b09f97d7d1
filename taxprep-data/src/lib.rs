//! Versioned statutory tables for the tax calculation engine.
//!
//! Tables are swapped as a unit: [`year_2025`] builds the complete federal
//! table set for tax year 2025 and [`states`] the ten-state configuration.
//! Custom bracket schedules can be loaded from CSV via
//! [`BracketScheduleLoader`].

mod loader;
mod states;
mod year_2025;

pub use loader::{BracketScheduleLoader, BracketScheduleRecord, LoaderError};
pub use states::states;
pub use year_2025::year_2025;
