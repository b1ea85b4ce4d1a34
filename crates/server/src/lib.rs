pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;
pub mod links;
pub mod presentation;

pub use startup::run;
