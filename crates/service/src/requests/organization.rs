use models::{organization, Enabled, Fillable};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::{non_blank, FieldRules, FormRequest, Rule};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationRequest {
    pub name: Option<String>,
    pub remarks: Option<String>,
    pub enabled: Option<Enabled>,
}

impl FormRequest for OrganizationRequest {
    fn rules(&self) -> Vec<FieldRules> {
        vec![
            FieldRules::new("name", self.name.clone(), &[Rule::Required, Rule::MaxLength(255)]),
            FieldRules::new("remarks", self.remarks.clone(), &[Rule::MaxLength(65_535)]),
        ]
    }
}

impl Fillable<organization::ActiveModel> for OrganizationRequest {
    fn fill(self, am: &mut organization::ActiveModel) {
        if let Some(name) = self.name {
            am.name = Set(name.trim().to_string());
        }
        if let Some(remarks) = self.remarks {
            am.remarks = Set(non_blank(remarks));
        }
        if let Some(enabled) = self.enabled {
            am.enabled = Set(enabled);
        }
    }
}
