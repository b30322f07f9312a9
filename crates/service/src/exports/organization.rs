use models::organization;

use super::{cell, Exportable};
use crate::relations::Loaded;

impl Exportable for organization::Model {
    fn columns(row: &Loaded<Self>) -> Vec<(&'static str, String)> {
        vec![("Name", row.item.name.clone()), ("Remarks", cell(&row.item.remarks))]
    }
}
