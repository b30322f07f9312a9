pub mod errors;
pub mod db;
pub mod enabled;
pub mod resource;
pub mod user;
pub mod organization;
pub mod common;

pub use enabled::Enabled;
pub use resource::{AuditTrail, Fillable, Lifecycle, Resource, Timestamps};

#[cfg(test)]
mod tests;
