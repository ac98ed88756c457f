//! Utils Module - Helper Functions & Shared Utilities

pub mod currency;
pub mod logging;

pub use currency::*;
pub use logging::*;
