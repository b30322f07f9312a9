//! Form requests: the authorization predicate and field rules a controller
//! checks before handing input to a service.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::errors::ServiceError;

mod common;
mod organization;

pub use common::{AdditionalRequest, BusinessRequest, ContactRequest, MarketRequest, MarketingRequest, ProfileRequest};
pub use organization::OrganizationRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    MaxLength(usize),
    Email,
    Url,
}

/// Rules for one field together with its submitted value.
#[derive(Clone, Debug)]
pub struct FieldRules {
    pub field: &'static str,
    pub value: Option<String>,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(field: &'static str, value: Option<String>, rules: &[Rule]) -> Self {
        Self { field, value, rules: rules.to_vec() }
    }

    pub fn check(&self) -> Vec<String> {
        let label = self.field.replace('_', " ");
        let value = self.value.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let mut messages = Vec::new();
        for rule in &self.rules {
            match (rule, value) {
                (Rule::Required, None) => messages.push(format!("The {label} field is required.")),
                (Rule::MaxLength(max), Some(v)) if v.chars().count() > *max => {
                    messages.push(format!("The {label} may not be greater than {max} characters."))
                }
                (Rule::Email, Some(v)) if !is_email(v) => messages.push(format!("The {label} must be a valid email address.")),
                (Rule::Url, Some(v)) if !is_url(v) => messages.push(format!("The {label} format is invalid.")),
                _ => {}
            }
        }
        messages
    }
}

fn is_email(v: &str) -> bool {
    match v.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !v.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn is_url(v: &str) -> bool {
    let rest = v.strip_prefix("https://").or_else(|| v.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !v.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Messages per field, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: String) {
        self.0.entry(field).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, field: &str) -> Option<&[String]> { self.0.get(field).map(Vec::as_slice) }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ { self.0.keys().copied() }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        f.write_str(&all.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for ServiceError {
    fn from(e: ValidationErrors) -> Self { ServiceError::Validation(e.to_string()) }
}

pub trait FormRequest {
    /// Whether the current user may make this request.
    fn authorize(&self) -> bool { true }

    fn rules(&self) -> Vec<FieldRules>;

    fn validate(&self) -> Result<(), ValidationErrors> {
        collect(self.rules())
    }

    /// Validation for partial updates: fields the request leaves out are
    /// skipped, submitted ones get every rule including `Required`.
    fn validate_submitted(&self) -> Result<(), ValidationErrors> {
        collect(self.rules().into_iter().filter(|f| f.value.is_some()))
    }
}

fn collect(fields: impl IntoIterator<Item = FieldRules>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in fields {
        for message in field.check() {
            errors.add(field.field, message);
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Empty strings clear nullable columns.
pub(crate) fn non_blank(v: String) -> Option<String> {
    if v.trim().is_empty() { None } else { Some(v) }
}
