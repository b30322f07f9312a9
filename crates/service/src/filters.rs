//! Listing filters shared by every organization resource.

use models::{Enabled, Resource};
use sea_orm::{ColumnTrait, Condition, EntityTrait, IdenStatic, Iterable, Order, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};

/// Soft-delete visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trashed {
    #[default]
    Without,
    With,
    Only,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn order(self) -> Order {
        match self {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub search: Option<String>,
    pub enabled: Option<Enabled>,
    pub organization_id: Option<i32>,
    pub trashed: Trashed,
    pub sort: Option<String>,
    pub direction: Direction,
    pub page: Option<u64>,
}

impl Filters {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// 1-based page number; values beyond `u32::MAX` saturate.
    pub fn page(&self) -> u32 {
        let page = self.page.unwrap_or(1).max(1);
        u32::try_from(page).unwrap_or(u32::MAX)
    }

    /// Whether a soft-deleted row passes the `trashed` filter.
    pub fn admits_trashed(&self, trashed: bool) -> bool {
        match self.trashed {
            Trashed::Without => !trashed,
            Trashed::With => true,
            Trashed::Only => trashed,
        }
    }
}

/// Column named by `sort`, falling back to the primary key.
pub fn sort_column<E: Resource>(name: Option<&str>) -> E::Column {
    name.and_then(|n| E::Column::iter().find(|c| c.as_str() == n)).unwrap_or_else(E::id_column)
}

pub fn apply<E: Resource>(mut query: Select<E>, filters: &Filters) -> Select<E> {
    if let Some(term) = filters.search_term() {
        let pattern = format!("%{term}%");
        let any = E::search_columns()
            .into_iter()
            .fold(Condition::any(), |cond, col| cond.add(col.like(pattern.as_str())));
        query = query.filter(any);
    }
    if let Some(enabled) = filters.enabled {
        query = query.filter(E::enabled_column().eq(enabled));
    }
    if let (Some(org), Some(col)) = (filters.organization_id, E::organization_column()) {
        query = query.filter(col.eq(org));
    }
    query = match filters.trashed {
        Trashed::Without => query.filter(E::deleted_at_column().is_null()),
        Trashed::With => query,
        Trashed::Only => query.filter(E::deleted_at_column().is_not_null()),
    };

    let column = sort_column::<E>(filters.sort.as_deref());
    let tie_break = column.as_str() != E::id_column().as_str();
    query = query.order_by(column, filters.direction.order());
    if tie_break {
        query = query.order_by(E::id_column(), Order::Asc);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::organization;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(filters: &Filters) -> String {
        apply(organization::Entity::find(), filters).build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn deserializes_query_map() {
        let f: Filters = serde_json::from_value(serde_json::json!({
            "search": "acme",
            "enabled": "no",
            "trashed": "only",
            "sort": "name",
            "direction": "desc",
            "page": 3
        }))
        .unwrap();
        assert_eq!(f.search_term(), Some("acme"));
        assert_eq!(f.enabled, Some(Enabled::No));
        assert_eq!(f.trashed, Trashed::Only);
        assert_eq!(f.direction, Direction::Desc);
        assert_eq!(f.page(), 3);
    }

    #[test]
    fn defaults_hide_trashed_and_sort_by_id() {
        let f = Filters::default();
        assert_eq!(f.page(), 1);
        assert_eq!(Filters { page: Some(u64::MAX), ..Filters::default() }.page(), u32::MAX);
        assert!(f.admits_trashed(false));
        assert!(!f.admits_trashed(true));
        let q = sql(&f);
        assert!(q.contains(r#""deleted_at" IS NULL"#), "{q}");
        assert!(q.contains(r#"ORDER BY "organizations"."id" ASC"#), "{q}");
    }

    #[test]
    fn blank_search_is_ignored() {
        let f = Filters { search: Some("   ".into()), ..Filters::default() };
        assert_eq!(f.search_term(), None);
        assert!(!sql(&f).contains("LIKE"));
    }

    #[test]
    fn search_spans_searchable_columns() {
        let q = sql(&Filters { search: Some("acme".into()), ..Filters::default() });
        assert!(q.contains(r#""name" LIKE '%acme%'"#), "{q}");
        assert!(q.contains(r#""remarks" LIKE '%acme%'"#), "{q}");
        assert!(q.contains(" OR "), "{q}");
    }

    #[test]
    fn unknown_sort_column_falls_back_to_id() {
        let f = Filters { sort: Some("password".into()), direction: Direction::Desc, ..Filters::default() };
        let q = sql(&f);
        assert!(q.contains(r#"ORDER BY "organizations"."id" DESC"#), "{q}");
        assert!(!q.contains("password"));
    }

    #[test]
    fn known_sort_column_keeps_id_as_tie_break() {
        let q = sql(&Filters { sort: Some("name".into()), ..Filters::default() });
        assert!(q.contains(r#"ORDER BY "organizations"."name" ASC, "organizations"."id" ASC"#), "{q}");
    }

    #[test]
    fn organization_filter_skips_unscoped_tables() {
        let f = Filters { organization_id: Some(4), trashed: Trashed::With, ..Filters::default() };
        assert!(!sql(&f).contains("organization_id"));
        let scoped = apply(models::common::profile::Entity::find(), &f).build(DbBackend::Sqlite).to_string();
        assert!(scoped.contains(r#""organization_id" = 4"#), "{scoped}");
        assert!(!scoped.contains(r#""deleted_at" IS"#), "{scoped}");
    }
}
