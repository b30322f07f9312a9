//! Records owned by an organization.
pub mod profile;
pub mod business;
pub mod contact;
pub mod additional;
pub mod market;
pub mod marketing;
