use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait, IdenStatic, ModelTrait, Set};

use super::setup_test_db;
use crate::common::{contact, profile};
use crate::resource::Resource;
use crate::{organization, user, Enabled};

async fn create_organization<C: sea_orm::ConnectionTrait>(db: &C, name: &str, by: Option<i32>) -> Result<organization::Model> {
    let mut am = organization::ActiveModel::new();
    am.name = Set(name.to_string());
    organization::Entity::stamp_created(&mut am, Utc::now().into(), by);
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn test_new_organization_is_enabled_and_stamped() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, "Admin", "admin@example.com").await?;
    let org = create_organization(&db, "Acme", Some(author.id)).await?;

    assert_eq!(org.enabled, Enabled::Yes);
    assert_eq!(org.created_by, Some(author.id));
    assert_eq!(org.updated_by, Some(author.id));
    assert_eq!(org.created_at, org.updated_at);
    assert!(!org.is_trashed());
    Ok(())
}

#[tokio::test]
async fn test_audit_links_resolve_users() -> Result<()> {
    let db = setup_test_db().await?;
    let author = user::create(&db, "Admin", "admin@example.com").await?;
    let org = create_organization(&db, "Acme", Some(author.id)).await?;

    let creator = org.created_by_user(&db).await?;
    assert_eq!(creator.map(|u| u.email), Some("admin@example.com".to_string()));
    assert!(org.deleted_by_user(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_children_relate_to_organization() -> Result<()> {
    let db = setup_test_db().await?;
    let org = create_organization(&db, "Acme", None).await?;

    let mut p = profile::ActiveModel::new();
    p.organization_id = Set(org.id);
    p.alias = Set(Some("ACME".into()));
    let p = p.insert(&db).await?;

    let mut c = contact::ActiveModel::new();
    c.organization_id = Set(Some(org.id));
    c.email = Set(Some("info@acme.test".into()));
    c.insert(&db).await?;

    let profiles = org.find_related(profile::Entity).all(&db).await?;
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].enabled, Enabled::Yes);
    let owner = p.find_related(organization::Entity).one(&db).await?;
    assert_eq!(owner.map(|o| o.id), Some(org.id));
    assert_eq!(org.find_related(contact::Entity).all(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_deleting_organization_cascades_to_children() -> Result<()> {
    let db = setup_test_db().await?;
    let org = create_organization(&db, "Acme", None).await?;
    let mut p = profile::ActiveModel::new();
    p.organization_id = Set(org.id);
    p.insert(&db).await?;

    organization::Entity::delete_by_id(org.id).exec(&db).await?;
    assert!(profile::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_user_create_validates_input() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(user::create(&db, "Nobody", "not-an-email").await.is_err());
    assert!(user::create(&db, "  ", "x@example.com").await.is_err());
    Ok(())
}

#[test]
fn test_resource_metadata() {
    let names = |cols: Vec<organization::Column>| cols.iter().map(|c| c.as_str().to_string()).collect::<Vec<_>>();
    assert_eq!(names(organization::Entity::search_columns()), vec!["name", "remarks"]);
    assert_eq!(organization::Entity::LABEL, "Organization");
    assert!(organization::Entity::organization_column().is_none());
    assert_eq!(profile::Entity::organization_column().map(|c| c.as_str().to_string()), Some("organization_id".to_string()));
    assert_eq!(contact::Entity::LABEL, "Contact");
}

#[test]
fn test_stamp_updated_leaves_creation_columns() {
    let mut am = organization::ActiveModel::new();
    organization::Entity::stamp_updated(&mut am, Utc::now().into(), Some(9));
    assert_eq!(am.updated_by, Set(Some(9)));
    assert!(am.created_by.is_not_set());
    assert!(am.created_at.is_not_set());
    assert_eq!(am.enabled, Set(Enabled::Yes));
}

#[tokio::test]
async fn test_lifecycle_accessors() -> Result<()> {
    use crate::resource::Lifecycle;

    let db = setup_test_db().await?;
    let org = create_organization(&db, "Acme", None).await?;
    let mut c = contact::ActiveModel::new();
    c.organization_id = Set(Some(org.id));
    let c = c.insert(&db).await?;

    assert_eq!(org.key(), org.id);
    assert_eq!(org.organization_id(), None);
    assert_eq!(c.organization_id(), Some(org.id));
    assert_eq!(c.enabled(), Enabled::Yes);
    assert!(org.timestamps().created_at.is_some());
    assert!(c.timestamps().created_at.is_none());
    assert_eq!(org.audit_trail().user_ids().count(), 0);
    Ok(())
}
