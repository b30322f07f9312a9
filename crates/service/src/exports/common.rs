use models::common::{additional, business, contact, market, marketing, profile};

use super::{cell, owner, Exportable};
use crate::relations::Loaded;

impl Exportable for profile::Model {
    fn columns(row: &Loaded<Self>) -> Vec<(&'static str, String)> {
        let m = &row.item;
        vec![
            ("Organization", owner(row)),
            ("Alias", cell(&m.alias)),
            ("Short Description", cell(&m.short_description)),
            ("Website", cell(&m.website)),
        ]
    }
}

impl Exportable for business::Model {
    fn columns(row: &Loaded<Self>) -> Vec<(&'static str, String)> {
        let m = &row.item;
        vec![
            ("Organization", owner(row)),
            ("Legal Name", cell(&m.legal_name)),
            ("Business Type", cell(&m.business_type)),
            ("Tax ID", cell(&m.tax_id)),
            ("VAT ID", cell(&m.vat_id)),
            ("Stock Symbol", cell(&m.stock_symbol)),
            ("Annual Revenue", cell(&m.annual_revenue)),
            ("Total Employee", cell(&m.total_employee)),
            ("Founded", cell(&m.founded_at)),
        ]
    }
}

impl Exportable for contact::Model {
    fn columns(row: &Loaded<Self>) -> Vec<(&'static str, String)> {
        let m = &row.item;
        vec![
            ("Organization", owner(row)),
            ("Phone", cell(&m.phone)),
            ("Email", cell(&m.email)),
            ("Fax", cell(&m.fax)),
        ]
    }
}

macro_rules! named_columns {
    ($($module:ident),+) => {$(
        impl Exportable for $module::Model {
            fn columns(row: &Loaded<Self>) -> Vec<(&'static str, String)> {
                let m = &row.item;
                vec![
                    ("Organization", owner(row)),
                    ("Name", m.name.clone()),
                    ("Display Name", cell(&m.display_name)),
                    ("Description", cell(&m.description)),
                    ("Website", cell(&m.website)),
                ]
            }
        }
    )+};
}

named_columns!(additional, market, marketing);
