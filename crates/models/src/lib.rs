//! Persisted content records and their write-side rules.
//! Each entity module owns its SeaORM model, validation and the mutations the admin console uses.

pub mod errors;
pub mod db;
pub mod services;
pub mod projects;
pub mod testimonials;
