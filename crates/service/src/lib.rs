//! Service layer providing the read-side queries and aggregates behind the public API.
//! - Separates query composition from the HTTP layer.
//! - Reuses entity definitions and derived fields in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod db;
pub mod stats;
#[cfg(test)]
pub mod test_support;
