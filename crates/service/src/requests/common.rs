//! Requests for the records an organization owns.

use chrono::NaiveDate;
use models::common::{additional, business, contact, market, marketing, profile};
use models::{Enabled, Fillable};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::{non_blank, FieldRules, FormRequest, Rule};

const SHORT: Rule = Rule::MaxLength(255);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub organization_id: Option<i32>,
    pub alias: Option<String>,
    pub short_description: Option<String>,
    pub website: Option<String>,
    pub enabled: Option<Enabled>,
}

impl FormRequest for ProfileRequest {
    fn rules(&self) -> Vec<FieldRules> {
        vec![
            FieldRules::new("organization_id", self.organization_id.map(|id| id.to_string()), &[Rule::Required]),
            FieldRules::new("alias", self.alias.clone(), &[SHORT]),
            FieldRules::new("short_description", self.short_description.clone(), &[SHORT]),
            FieldRules::new("website", self.website.clone(), &[Rule::Url, SHORT]),
        ]
    }
}

impl Fillable<profile::ActiveModel> for ProfileRequest {
    fn fill(self, am: &mut profile::ActiveModel) {
        if let Some(id) = self.organization_id {
            am.organization_id = Set(id);
        }
        if let Some(v) = self.alias {
            am.alias = Set(non_blank(v));
        }
        if let Some(v) = self.short_description {
            am.short_description = Set(non_blank(v));
        }
        if let Some(v) = self.website {
            am.website = Set(non_blank(v));
        }
        if let Some(enabled) = self.enabled {
            am.enabled = Set(enabled);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRequest {
    pub organization_id: Option<i32>,
    pub founded_at: Option<NaiveDate>,
    pub total_employee: Option<i32>,
    pub annual_revenue: Option<String>,
    pub stock_symbol: Option<String>,
    pub legal_name: Option<String>,
    pub gln_number: Option<String>,
    pub tax_type: Option<String>,
    pub tax_id: Option<String>,
    pub tax_certificate: Option<String>,
    pub tax_expire: Option<NaiveDate>,
    pub state_tax_id: Option<String>,
    pub regional_tax_id: Option<String>,
    pub vat_id: Option<String>,
    pub vat_document: Option<String>,
    pub business_type: Option<String>,
    pub enabled: Option<Enabled>,
}

impl FormRequest for BusinessRequest {
    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = vec![FieldRules::new("organization_id", self.organization_id.map(|id| id.to_string()), &[Rule::Required])];
        for (field, value) in [
            ("annual_revenue", &self.annual_revenue),
            ("stock_symbol", &self.stock_symbol),
            ("legal_name", &self.legal_name),
            ("gln_number", &self.gln_number),
            ("tax_type", &self.tax_type),
            ("tax_id", &self.tax_id),
            ("tax_certificate", &self.tax_certificate),
            ("state_tax_id", &self.state_tax_id),
            ("regional_tax_id", &self.regional_tax_id),
            ("vat_id", &self.vat_id),
            ("vat_document", &self.vat_document),
            ("business_type", &self.business_type),
        ] {
            rules.push(FieldRules::new(field, value.clone(), &[SHORT]));
        }
        rules
    }
}

impl Fillable<business::ActiveModel> for BusinessRequest {
    fn fill(self, am: &mut business::ActiveModel) {
        if let Some(id) = self.organization_id {
            am.organization_id = Set(id);
        }
        if self.founded_at.is_some() {
            am.founded_at = Set(self.founded_at);
        }
        if self.total_employee.is_some() {
            am.total_employee = Set(self.total_employee);
        }
        if self.tax_expire.is_some() {
            am.tax_expire = Set(self.tax_expire);
        }
        let text = [
            (self.annual_revenue, &mut am.annual_revenue),
            (self.stock_symbol, &mut am.stock_symbol),
            (self.legal_name, &mut am.legal_name),
            (self.gln_number, &mut am.gln_number),
            (self.tax_type, &mut am.tax_type),
            (self.tax_id, &mut am.tax_id),
            (self.tax_certificate, &mut am.tax_certificate),
            (self.state_tax_id, &mut am.state_tax_id),
            (self.regional_tax_id, &mut am.regional_tax_id),
            (self.vat_id, &mut am.vat_id),
            (self.vat_document, &mut am.vat_document),
            (self.business_type, &mut am.business_type),
        ];
        for (value, slot) in text {
            if let Some(v) = value {
                *slot = Set(non_blank(v));
            }
        }
        if let Some(enabled) = self.enabled {
            am.enabled = Set(enabled);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub organization_id: Option<i32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub fax: Option<String>,
    pub enabled: Option<Enabled>,
}

impl FormRequest for ContactRequest {
    fn rules(&self) -> Vec<FieldRules> {
        vec![
            FieldRules::new("phone", self.phone.clone(), &[SHORT]),
            FieldRules::new("email", self.email.clone(), &[Rule::Email, SHORT]),
            FieldRules::new("fax", self.fax.clone(), &[SHORT]),
        ]
    }
}

impl Fillable<contact::ActiveModel> for ContactRequest {
    fn fill(self, am: &mut contact::ActiveModel) {
        if self.organization_id.is_some() {
            am.organization_id = Set(self.organization_id);
        }
        if let Some(v) = self.phone {
            am.phone = Set(non_blank(v));
        }
        if let Some(v) = self.email {
            am.email = Set(non_blank(v));
        }
        if let Some(v) = self.fax {
            am.fax = Set(non_blank(v));
        }
        if let Some(enabled) = self.enabled {
            am.enabled = Set(enabled);
        }
    }
}

/// Shape shared by additionals, markets and marketings.
macro_rules! named_request {
    ($(#[$meta:meta])* $name:ident, $module:ident, strict = $strict:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            pub organization_id: Option<i32>,
            pub name: Option<String>,
            pub display_name: Option<String>,
            pub description: Option<String>,
            pub website: Option<String>,
            pub enabled: Option<Enabled>,
        }

        impl FormRequest for $name {
            fn rules(&self) -> Vec<FieldRules> {
                if !$strict {
                    return Vec::new();
                }
                vec![
                    FieldRules::new("name", self.name.clone(), &[Rule::Required, SHORT]),
                    FieldRules::new("display_name", self.display_name.clone(), &[SHORT]),
                    FieldRules::new("website", self.website.clone(), &[Rule::Url, SHORT]),
                ]
            }
        }

        impl Fillable<$module::ActiveModel> for $name {
            fn fill(self, am: &mut $module::ActiveModel) {
                if self.organization_id.is_some() {
                    am.organization_id = Set(self.organization_id);
                }
                if let Some(v) = self.name {
                    am.name = Set(v.trim().to_string());
                }
                if let Some(v) = self.display_name {
                    am.display_name = Set(non_blank(v));
                }
                if let Some(v) = self.description {
                    am.description = Set(non_blank(v));
                }
                if let Some(v) = self.website {
                    am.website = Set(non_blank(v));
                }
                if let Some(enabled) = self.enabled {
                    am.enabled = Set(enabled);
                }
            }
        }
    };
}

named_request!(
    /// Accepted as submitted; no field rules are enforced.
    AdditionalRequest, additional, strict = false
);
named_request!(MarketRequest, market, strict = true);
named_request!(MarketingRequest, marketing, strict = true);

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelBehavior, ActiveValue};

    #[test]
    fn additional_request_has_no_rules() {
        let req = AdditionalRequest::default();
        assert!(req.rules().is_empty());
        assert!(req.validate().is_ok());
        assert!(req.authorize());
    }

    #[test]
    fn market_request_requires_name_and_valid_website() {
        let req = MarketRequest { website: Some("acme.test".into()), ..Default::default() };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "website"]);
    }

    #[test]
    fn contact_email_is_checked() {
        let bad = ContactRequest { email: Some("nobody".into()), ..Default::default() };
        assert!(bad.validate().is_err());
        let good = ContactRequest { email: Some("info@acme.test".into()), phone: Some("+880 1700 000000".into()), ..Default::default() };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn profile_and_business_need_an_organization() {
        assert!(ProfileRequest::default().validate().unwrap_err().get("organization_id").is_some());
        let b = BusinessRequest { organization_id: Some(1), legal_name: Some("x".repeat(256)), ..Default::default() };
        let errors = b.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["legal_name"]);
    }

    #[test]
    fn business_fill_sets_dates_and_text() {
        let mut am = business::ActiveModel::new();
        BusinessRequest {
            organization_id: Some(2),
            founded_at: NaiveDate::from_ymd_opt(1998, 5, 1),
            tax_id: Some("TIN-1".into()),
            vat_id: Some(String::new()),
            ..Default::default()
        }
        .fill(&mut am);
        assert_eq!(am.organization_id, ActiveValue::Set(2));
        assert_eq!(am.founded_at, ActiveValue::Set(NaiveDate::from_ymd_opt(1998, 5, 1)));
        assert_eq!(am.tax_id, ActiveValue::Set(Some("TIN-1".into())));
        assert_eq!(am.vat_id, ActiveValue::Set(None));
        assert!(am.legal_name.is_not_set());
        assert!(am.tax_expire.is_not_set());
    }

    #[test]
    fn marketing_fill_trims_name() {
        let mut am = marketing::ActiveModel::new();
        MarketingRequest { name: Some(" Email ".into()), organization_id: Some(5), ..Default::default() }.fill(&mut am);
        assert_eq!(am.name, ActiveValue::Set("Email".to_string()));
        assert_eq!(am.organization_id, ActiveValue::Set(Some(5)));
    }
}
