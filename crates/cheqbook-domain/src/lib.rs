//! cheqbook-domain
//!
//! Pure domain models (Instrument, DateWindow, DayProjection, etc.).
//! No I/O, no clocks, no storage. Only data types and core enums.

pub mod common;
pub mod instrument;
pub mod projection;
pub mod summary;
pub mod window;

pub use common::*;
pub use instrument::*;
pub use projection::*;
pub use summary::*;
pub use window::*;
