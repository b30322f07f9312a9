//! Eager loading of the audit users and the owning organization.
//!
//! Each requested relation target is fetched with a single `IN (...)` query
//! over the ids referenced by the whole result set.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use models::{organization, user, Lifecycle};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EagerRelation {
    #[serde(rename = "createdBy", alias = "created_by")]
    CreatedBy,
    #[serde(rename = "updatedBy", alias = "updated_by")]
    UpdatedBy,
    #[serde(rename = "deletedBy", alias = "deleted_by")]
    DeletedBy,
    #[serde(rename = "organization")]
    Organization,
}

impl EagerRelation {
    pub const AUDIT: [EagerRelation; 3] = [EagerRelation::CreatedBy, EagerRelation::UpdatedBy, EagerRelation::DeletedBy];
    pub const ALL: [EagerRelation; 4] =
        [EagerRelation::CreatedBy, EagerRelation::UpdatedBy, EagerRelation::DeletedBy, EagerRelation::Organization];

    pub fn as_str(&self) -> &'static str {
        match self {
            EagerRelation::CreatedBy => "createdBy",
            EagerRelation::UpdatedBy => "updatedBy",
            EagerRelation::DeletedBy => "deletedBy",
            EagerRelation::Organization => "organization",
        }
    }

    fn is_audit(&self) -> bool { !matches!(self, EagerRelation::Organization) }
}

impl FromStr for EagerRelation {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "createdBy" | "created_by" => Ok(Self::CreatedBy),
            "updatedBy" | "updated_by" => Ok(Self::UpdatedBy),
            "deletedBy" | "deleted_by" => Ok(Self::DeletedBy),
            "organization" => Ok(Self::Organization),
            other => Err(ServiceError::Validation(format!("unknown relation: {other}"))),
        }
    }
}

/// Parse relation names, rejecting unknown ones and dropping duplicates.
pub fn parse_relations<I, S>(names: I) -> Result<Vec<EagerRelation>, ServiceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for name in names {
        let rel = name.as_ref().parse::<EagerRelation>()?;
        if !out.contains(&rel) {
            out.push(rel);
        }
    }
    Ok(out)
}

/// A row with whichever relations were requested.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Loaded<M> {
    #[serde(flatten)]
    pub item: M,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub creator: Option<user::Model>,
    #[serde(rename = "updatedBy", skip_serializing_if = "Option::is_none")]
    pub editor: Option<user::Model>,
    #[serde(rename = "deletedBy", skip_serializing_if = "Option::is_none")]
    pub destroyer: Option<user::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<organization::Model>,
}

impl<M> Loaded<M> {
    pub fn new(item: M) -> Self {
        Self { item, creator: None, editor: None, destroyer: None, organization: None }
    }

    pub fn into_inner(self) -> M { self.item }
}

/// Attach already fetched users and organizations to `rows`.
pub fn attach<M: Lifecycle>(
    rows: Vec<M>,
    relations: &[EagerRelation],
    users: &HashMap<i32, user::Model>,
    organizations: &HashMap<i32, organization::Model>,
) -> Vec<Loaded<M>> {
    let lookup = |id: Option<i32>| id.and_then(|id| users.get(&id).cloned());
    rows.into_iter()
        .map(|item| {
            let trail = item.audit_trail();
            let mut loaded = Loaded::new(item);
            for rel in relations {
                match rel {
                    EagerRelation::CreatedBy => loaded.creator = lookup(trail.created_by),
                    EagerRelation::UpdatedBy => loaded.editor = lookup(trail.updated_by),
                    EagerRelation::DeletedBy => loaded.destroyer = lookup(trail.deleted_by),
                    EagerRelation::Organization => {
                        loaded.organization = loaded.item.organization_id().and_then(|id| organizations.get(&id).cloned())
                    }
                }
            }
            loaded
        })
        .collect()
}

/// Ids of the users referenced through the requested audit relations.
pub fn referenced_users<M: Lifecycle>(rows: &[M], relations: &[EagerRelation]) -> BTreeSet<i32> {
    let mut ids = BTreeSet::new();
    for row in rows {
        let trail = row.audit_trail();
        for rel in relations {
            let id = match rel {
                EagerRelation::CreatedBy => trail.created_by,
                EagerRelation::UpdatedBy => trail.updated_by,
                EagerRelation::DeletedBy => trail.deleted_by,
                EagerRelation::Organization => None,
            };
            ids.extend(id);
        }
    }
    ids
}

pub async fn load<C, M>(db: &C, rows: Vec<M>, relations: &[EagerRelation]) -> Result<Vec<Loaded<M>>, ServiceError>
where
    C: ConnectionTrait,
    M: Lifecycle,
{
    let mut users = HashMap::new();
    let mut organizations = HashMap::new();

    if relations.iter().any(EagerRelation::is_audit) {
        let ids = referenced_users(&rows, relations);
        if !ids.is_empty() {
            users = user::Entity::find()
                .filter(user::Column::Id.is_in(ids))
                .all(db)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect();
        }
    }
    if relations.contains(&EagerRelation::Organization) {
        let ids: BTreeSet<i32> = rows.iter().filter_map(Lifecycle::organization_id).collect();
        if !ids.is_empty() {
            organizations = organization::Entity::find()
                .filter(organization::Column::Id.is_in(ids))
                .all(db)
                .await?
                .into_iter()
                .map(|o| (o.id, o))
                .collect();
        }
    }

    Ok(attach(rows, relations, &users, &organizations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::common::profile;
    use models::Enabled;

    fn person(id: i32) -> user::Model {
        user::Model { id, name: format!("user {id}"), email: format!("u{id}@example.com"), created_at: None, updated_at: None }
    }

    fn org(id: i32) -> organization::Model {
        organization::Model {
            id,
            name: format!("org {id}"),
            remarks: None,
            enabled: Enabled::Yes,
            created_by: Some(1),
            updated_by: Some(2),
            deleted_by: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn parses_camel_and_snake_case() {
        let rels = parse_relations(["createdBy", "updated_by", "organization", "createdBy"]).unwrap();
        assert_eq!(rels, vec![EagerRelation::CreatedBy, EagerRelation::UpdatedBy, EagerRelation::Organization]);
        let parsed: EagerRelation = serde_json::from_str("\"deleted_by\"").unwrap();
        assert_eq!(parsed, EagerRelation::DeletedBy);
    }

    #[test]
    fn unknown_relation_is_a_validation_error() {
        let err = parse_relations(["createdBy", "owner"]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("owner")));
    }

    #[test]
    fn collects_only_requested_user_ids() {
        let rows = vec![org(1), org(2)];
        let ids = referenced_users(&rows, &[EagerRelation::CreatedBy]);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1]);
        assert!(referenced_users(&rows, &[EagerRelation::Organization]).is_empty());
    }

    #[test]
    fn attaches_requested_relations_only() {
        let users: HashMap<_, _> = [(1, person(1)), (2, person(2))].into_iter().collect();
        let loaded = attach(vec![org(7)], &[EagerRelation::CreatedBy], &users, &HashMap::new());
        assert_eq!(loaded[0].creator.as_ref().map(|u| u.id), Some(1));
        assert!(loaded[0].editor.is_none());

        let v = serde_json::to_value(&loaded[0]).unwrap();
        assert_eq!(v["name"], "org 7");
        assert_eq!(v["created_by"], 1);
        assert_eq!(v["createdBy"]["email"], "u1@example.com");
        assert!(v.get("updatedBy").is_none());
    }

    #[test]
    fn attaches_owning_organization() {
        let owner = org(3);
        let p = profile::Model {
            id: 1,
            organization_id: 3,
            alias: None,
            short_description: None,
            website: None,
            enabled: Enabled::Yes,
            created_by: None,
            updated_by: None,
            deleted_by: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        };
        let orgs: HashMap<_, _> = [(3, owner.clone())].into_iter().collect();
        let loaded = attach(vec![p], &EagerRelation::ALL, &HashMap::new(), &orgs);
        assert_eq!(loaded[0].organization, Some(owner));
        assert!(loaded[0].creator.is_none());
    }
}
