//! Firestore client initialization
//!
//! Builds the one database handle a run writes through. A missing or broken
//! credential file is reported once at startup and then surfaces as an error
//! on the first write.

mod handle;

pub use handle::{shared, DatabaseHandle};
