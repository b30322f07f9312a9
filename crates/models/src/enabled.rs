//! The enabled/disabled option set every organization table carries.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Enabled {
    #[default]
    #[sea_orm(string_value = "yes")]
    Yes,
    #[sea_orm(string_value = "no")]
    No,
}

impl Enabled {
    pub fn as_str(&self) -> &'static str {
        match self {
            Enabled::Yes => "yes",
            Enabled::No => "no",
        }
    }

    /// Label used in listings and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Enabled::Yes => "Yes",
            Enabled::No => "No",
        }
    }

    pub fn is_enabled(&self) -> bool { matches!(self, Enabled::Yes) }
}

impl std::fmt::Display for Enabled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
