//! Capabilities shared by the organization entity family.
//!
//! Every organization table carries the same lifecycle columns (`enabled`,
//! the audit user ids and the timestamp triple with the `deleted_at`
//! soft-delete marker). [`Resource`] exposes those columns to generic code
//! so one repository implementation serves all of them.

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::EntityTrait;

use crate::enabled::Enabled;

/// Ids of the users that created, last updated and trashed a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditTrail {
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub deleted_by: Option<i32>,
}

impl AuditTrail {
    pub fn user_ids(&self) -> impl Iterator<Item = i32> {
        [self.created_by, self.updated_by, self.deleted_by].into_iter().flatten()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

/// Read access to the lifecycle columns of a loaded row.
pub trait Lifecycle {
    fn key(&self) -> i32;
    fn enabled(&self) -> Enabled;
    fn audit_trail(&self) -> AuditTrail;
    fn timestamps(&self) -> Timestamps;

    /// Owning organization, for tables that reference one.
    fn organization_id(&self) -> Option<i32> { None }
}

pub trait Resource: EntityTrait {
    /// Human label used in outcome messages, e.g. `Organization`.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;
    fn enabled_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn updated_by_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
    fn deleted_by_column() -> Self::Column;

    /// Columns matched by the free-text `search` filter.
    fn search_columns() -> Vec<Self::Column>;

    /// `organization_id` column for tables owned by an organization.
    fn organization_column() -> Option<Self::Column> { None }

    fn stamp_created(am: &mut Self::ActiveModel, at: DateTimeWithTimeZone, by: Option<i32>);
    fn stamp_updated(am: &mut Self::ActiveModel, at: DateTimeWithTimeZone, by: Option<i32>);
}

/// Copies validated request fields onto an active model. Fields the request
/// does not carry are left untouched.
pub trait Fillable<A>: Send {
    fn fill(self, am: &mut A);
}

/// Implements [`Resource`] for the entity in the invoking module, plus the
/// audit [`Linked`](sea_orm::Linked) paths to `users`.
macro_rules! resource {
    (label = $label:literal, search = [$($search:ident),+ $(,)?] $(, organization = $org:ident($org_field:ident))? $(,)?) => {
        impl $crate::resource::Resource for Entity {
            const LABEL: &'static str = $label;

            fn id_column() -> Column { Column::Id }
            fn enabled_column() -> Column { Column::Enabled }
            fn updated_at_column() -> Column { Column::UpdatedAt }
            fn updated_by_column() -> Column { Column::UpdatedBy }
            fn deleted_at_column() -> Column { Column::DeletedAt }
            fn deleted_by_column() -> Column { Column::DeletedBy }

            fn search_columns() -> Vec<Column> { vec![$(Column::$search),+] }

            $(fn organization_column() -> Option<Column> { Some(Column::$org) })?

            fn stamp_created(am: &mut ActiveModel, at: sea_orm::prelude::DateTimeWithTimeZone, by: Option<i32>) {
                am.created_at = sea_orm::Set(Some(at));
                am.updated_at = sea_orm::Set(Some(at));
                am.created_by = sea_orm::Set(by);
                am.updated_by = sea_orm::Set(by);
            }

            fn stamp_updated(am: &mut ActiveModel, at: sea_orm::prelude::DateTimeWithTimeZone, by: Option<i32>) {
                am.updated_at = sea_orm::Set(Some(at));
                am.updated_by = sea_orm::Set(by);
            }
        }

        impl $crate::resource::Lifecycle for Model {
            fn key(&self) -> i32 { self.id }

            fn enabled(&self) -> $crate::enabled::Enabled { self.enabled }

            fn audit_trail(&self) -> $crate::resource::AuditTrail {
                $crate::resource::AuditTrail {
                    created_by: self.created_by,
                    updated_by: self.updated_by,
                    deleted_by: self.deleted_by,
                }
            }

            fn timestamps(&self) -> $crate::resource::Timestamps {
                $crate::resource::Timestamps {
                    created_at: self.created_at,
                    updated_at: self.updated_at,
                    deleted_at: self.deleted_at,
                }
            }

            $(fn organization_id(&self) -> Option<i32> { Option::from(self.$org_field) })?
        }

        pub struct CreatedBy;

        impl sea_orm::Linked for CreatedBy {
            type FromEntity = Entity;
            type ToEntity = $crate::user::Entity;

            fn link(&self) -> Vec<sea_orm::RelationDef> { vec![sea_orm::RelationTrait::def(&Relation::CreatedBy)] }
        }

        pub struct UpdatedBy;

        impl sea_orm::Linked for UpdatedBy {
            type FromEntity = Entity;
            type ToEntity = $crate::user::Entity;

            fn link(&self) -> Vec<sea_orm::RelationDef> { vec![sea_orm::RelationTrait::def(&Relation::UpdatedBy)] }
        }

        pub struct DeletedBy;

        impl sea_orm::Linked for DeletedBy {
            type FromEntity = Entity;
            type ToEntity = $crate::user::Entity;

            fn link(&self) -> Vec<sea_orm::RelationDef> { vec![sea_orm::RelationTrait::def(&Relation::DeletedBy)] }
        }

        impl Model {
            pub fn is_trashed(&self) -> bool { self.deleted_at.is_some() }

            pub async fn created_by_user<C: sea_orm::ConnectionTrait>(&self, db: &C) -> Result<Option<$crate::user::Model>, sea_orm::DbErr> {
                sea_orm::ModelTrait::find_linked(self, CreatedBy).one(db).await
            }

            pub async fn updated_by_user<C: sea_orm::ConnectionTrait>(&self, db: &C) -> Result<Option<$crate::user::Model>, sea_orm::DbErr> {
                sea_orm::ModelTrait::find_linked(self, UpdatedBy).one(db).await
            }

            pub async fn deleted_by_user<C: sea_orm::ConnectionTrait>(&self, db: &C) -> Result<Option<$crate::user::Model>, sea_orm::DbErr> {
                sea_orm::ModelTrait::find_linked(self, DeletedBy).one(db).await
            }
        }
    };
}

pub(crate) use resource;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_trail_skips_missing_users() {
        let trail = AuditTrail { created_by: Some(1), updated_by: None, deleted_by: Some(4) };
        assert_eq!(trail.user_ids().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(AuditTrail::default().user_ids().count(), 0);
    }
}
