//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod error;
pub mod log;
pub mod rates;
pub mod state;

// Re-export main types for cleaner imports
pub use convert::{AmountInput, Quote};
pub use error::{ConvertError, LoadError};
pub use rates::{RateSnapshotProvider, RateTable};
pub use state::LoadState;
