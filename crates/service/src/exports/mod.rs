//! Spreadsheet projections of listing results.
//!
//! The file writer is an outside collaborator; an [`Export`] only yields the
//! ordered rows it should write.

use std::fmt::Write as _;

use models::Lifecycle;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::relations::Loaded;

mod common;
mod organization;

/// Per-entity columns placed between `#` and the lifecycle columns.
pub trait Exportable: Lifecycle + Sized {
    fn columns(row: &Loaded<Self>) -> Vec<(&'static str, String)>;
}

/// Ordered `(heading, cell)` pairs of one spreadsheet row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportRow(pub Vec<(&'static str, String)>);

impl ExportRow {
    pub fn headings(&self) -> Vec<&'static str> { self.0.iter().map(|(h, _)| *h).collect() }

    pub fn get(&self, heading: &str) -> Option<&str> {
        self.0.iter().find(|(h, _)| *h == heading).map(|(_, v)| v.as_str())
    }
}

impl Serialize for ExportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (heading, value) in &self.0 {
            map.serialize_entry(heading, value)?;
        }
        map.end()
    }
}

pub struct Export<M> {
    rows: Vec<Loaded<M>>,
    datetime_format: String,
    super_admin: bool,
}

impl<M: Exportable> Export<M> {
    pub fn new(rows: Vec<Loaded<M>>, datetime_format: impl Into<String>) -> Self {
        Self { rows, datetime_format: datetime_format.into(), super_admin: false }
    }

    /// Super admins also see the deletion and audit columns.
    pub fn for_super_admin(mut self, super_admin: bool) -> Self {
        self.super_admin = super_admin;
        self
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn rows(&self) -> Vec<ExportRow> { self.rows.iter().map(|row| self.map(row)).collect() }

    fn map(&self, row: &Loaded<M>) -> ExportRow {
        let item = &row.item;
        let ts = item.timestamps();
        let mut cells = vec![("#", item.key().to_string())];
        cells.extend(M::columns(row));
        cells.push(("Enabled", item.enabled().label().to_string()));
        cells.push(("Created", self.format(ts.created_at)));
        cells.push(("Updated", self.format(ts.updated_at)));

        if self.super_admin {
            let name = |u: &Option<models::user::Model>| u.as_ref().map(|u| u.name.clone()).unwrap_or_default();
            cells.push(("Deleted", self.format(ts.deleted_at)));
            cells.push(("Created By", name(&row.creator)));
            cells.push(("Updated By", name(&row.editor)));
            cells.push(("Deleted By", name(&row.destroyer)));
        }
        ExportRow(cells)
    }

    fn format(&self, at: Option<DateTimeWithTimeZone>) -> String {
        let Some(at) = at else { return String::new() };
        let mut out = String::new();
        // chrono reports malformed patterns as fmt errors
        if write!(out, "{}", at.format(&self.datetime_format)).is_err() {
            return at.to_rfc3339();
        }
        out
    }
}

/// Cell text for an optional value.
pub(crate) fn cell<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Name of the loaded owning organization, if any.
pub(crate) fn owner<M>(row: &Loaded<M>) -> String {
    row.organization.as_ref().map(|o| o.name.clone()).unwrap_or_default()
}
