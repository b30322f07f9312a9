//! Market segment an organization operates in.
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::enabled::Enabled;
use crate::resource::resource;
use crate::{organization, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organization_markets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: Option<i32>,
    pub name: String,
    pub display_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub website: Option<String>,
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

resource! { label = "Market", search = [Name, DisplayName, Description], organization = OrganizationId(organization_id) }
