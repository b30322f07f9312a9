//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every mutation reports back through a uniform `Outcome` record.

pub mod errors;
pub mod outcome;
pub mod pagination;
pub mod filters;
pub mod relations;
pub mod repository;
pub mod requests;
pub mod exports;
pub mod service;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use outcome::{Level, Outcome};
pub use service::{CrudService, ServiceConfig};
