use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::common::{additional, business, contact, market, marketing, profile};
use crate::enabled::Enabled;
use crate::resource::resource;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
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
    CreatedBy,
    UpdatedBy,
    DeletedBy,
    Profiles,
    Businesses,
    Contacts,
    Additionals,
    Markets,
    Marketings,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CreatedBy => Entity::belongs_to(user::Entity).from(Column::CreatedBy).to(user::Column::Id).into(),
            Relation::UpdatedBy => Entity::belongs_to(user::Entity).from(Column::UpdatedBy).to(user::Column::Id).into(),
            Relation::DeletedBy => Entity::belongs_to(user::Entity).from(Column::DeletedBy).to(user::Column::Id).into(),
            Relation::Profiles => Entity::has_many(profile::Entity).into(),
            Relation::Businesses => Entity::has_many(business::Entity).into(),
            Relation::Contacts => Entity::has_many(contact::Entity).into(),
            Relation::Additionals => Entity::has_many(additional::Entity).into(),
            Relation::Markets => Entity::has_many(market::Entity).into(),
            Relation::Marketings => Entity::has_many(marketing::Entity).into(),
        }
    }
}

impl Related<profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::Profiles.def() }
}

impl Related<business::Entity> for Entity {
    fn to() -> RelationDef { Relation::Businesses.def() }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contacts.def() }
}

impl Related<additional::Entity> for Entity {
    fn to() -> RelationDef { Relation::Additionals.def() }
}

impl Related<market::Entity> for Entity {
    fn to() -> RelationDef { Relation::Markets.def() }
}

impl Related<marketing::Entity> for Entity {
    fn to() -> RelationDef { Relation::Marketings.def() }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self { enabled: Set(Enabled::default()), ..<Self as ActiveModelTrait>::default() }
    }
}

resource! { label = "Organization", search = [Name, Remarks] }
