use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::enabled::Enabled;
use crate::resource::resource;
use crate::{organization, user};

/// Legal, tax and financial registration of an organization.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organization_businesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub founded_at: Option<Date>,
    pub total_employee: Option<i32>,
    pub annual_revenue: Option<String>,
    pub stock_symbol: Option<String>,
    pub legal_name: Option<String>,
    pub gln_number: Option<String>,
    pub tax_type: Option<String>,
    pub tax_id: Option<String>,
    pub tax_certificate: Option<String>,
    pub tax_expire: Option<Date>,
    pub state_tax_id: Option<String>,
    pub regional_tax_id: Option<String>,
    pub vat_id: Option<String>,
    pub vat_document: Option<String>,
    pub business_type: Option<String>,
    pub enabled: Enabled,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub deleted_by: Option<i32>,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Organization,
    CreatedBy,
    UpdatedBy,
    DeletedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Organization => Entity::belongs_to(organization::Entity).from(Column::OrganizationId).to(organization::Column::Id).into(),
            Relation::CreatedBy => Entity::belongs_to(user::Entity).from(Column::CreatedBy).to(user::Column::Id).into(),
            Relation::UpdatedBy => Entity::belongs_to(user::Entity).from(Column::UpdatedBy).to(user::Column::Id).into(),
            Relation::DeletedBy => Entity::belongs_to(user::Entity).from(Column::DeletedBy).to(user::Column::Id).into(),
        }
    }
}

impl Related<organization::Entity> for Entity {
    fn to() -> RelationDef { Relation::Organization.def() }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self { enabled: Set(Enabled::default()), ..<Self as ActiveModelTrait>::default() }
    }
}

resource! { label = "Business", search = [LegalName, BusinessType, TaxId, VatId, StockSymbol], organization = OrganizationId(organization_id) }
