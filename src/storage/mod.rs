//! Storage layer for session aliases

pub mod clock;
pub mod models;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::*;
pub use store::DocumentStore;
