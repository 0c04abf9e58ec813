use tierforge_core::db::{open_db, open_db_in_memory};
use tierforge_core::{
    NewTemplateItem, SessionLoadError, SqliteTemplateRepository, TemplateRepoError,
    TemplateRepository, TierlistSession,
};
use uuid::Uuid;

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

fn items(urls: &[&str]) -> Vec<NewTemplateItem> {
    urls.iter()
        .map(|url| NewTemplateItem {
            image_url: (*url).to_string(),
        })
        .collect()
}

#[test]
fn create_and_get_round_trip() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();

    let created = repo
        .create_template("Best Snacks", &items(&["a.png", "b.png"]))
        .unwrap();

    let loaded = repo.get_template(created.template_uuid).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Best Snacks");
}

#[test]
fn created_items_keep_template_order() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();

    let created = repo
        .create_template("Ordered", &items(&["one.png", "two.png", "three.png"]))
        .unwrap();

    let stored = repo.list_template_items(created.template_uuid).unwrap();
    let urls: Vec<_> = stored.iter().map(|item| item.image_url.clone()).collect();
    let orders: Vec<_> = stored.iter().map(|item| item.sort_order).collect();
    assert_eq!(urls, ["one.png", "two.png", "three.png"]);
    assert_eq!(orders, [0, 1, 2]);
}

#[test]
fn create_rejects_blank_name() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();

    let err = repo.create_template("   ", &items(&["a.png"])).unwrap_err();
    assert!(matches!(err, TemplateRepoError::BlankName));
    assert!(repo.list_templates().unwrap().is_empty());
}

#[test]
fn create_rejects_empty_item_list() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();

    let err = repo.create_template("Empty", &[]).unwrap_err();
    assert!(matches!(err, TemplateRepoError::EmptyItems));
}

#[test]
fn create_rejects_blank_image_url() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();

    let err = repo
        .create_template("Broken", &items(&["a.png", "  "]))
        .unwrap_err();
    assert!(matches!(err, TemplateRepoError::BlankImageUrl { index: 1 }));
    assert!(repo.list_templates().unwrap().is_empty());
}

#[test]
fn delete_template_removes_items_with_it() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let created = repo
        .create_template("Doomed", &items(&["a.png", "b.png"]))
        .unwrap();

    repo.delete_template(created.template_uuid).unwrap();

    assert!(repo.get_template(created.template_uuid).unwrap().is_none());
    assert!(repo
        .list_template_items(created.template_uuid)
        .unwrap()
        .is_empty());

    let err = repo.delete_template(created.template_uuid).unwrap_err();
    assert!(matches!(err, TemplateRepoError::NotFound(id) if id == created.template_uuid));
}

#[test]
fn list_templates_returns_all_created() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let first = repo.create_template("First", &items(&["a.png"])).unwrap();
    let second = repo.create_template("Second", &items(&["b.png"])).unwrap();

    let listed = repo.list_templates().unwrap();
    let ids: Vec<_> = listed.iter().map(|record| record.template_uuid).collect();
    assert_eq!(listed.len(), 2);
    assert!(ids.contains(&first.template_uuid));
    assert!(ids.contains(&second.template_uuid));
}

#[test]
fn load_from_store_builds_session_with_positional_names() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let created = repo
        .create_template("Best Snacks", &items(&["a.png", "b.png"]))
        .unwrap();

    let session = TierlistSession::load_from_store(&repo, created.template_uuid).unwrap();

    assert_eq!(session.template_name(), Some("Best Snacks"));
    assert_eq!(session.catalog().len(), 2);
    let names: Vec<_> = session
        .catalog()
        .items()
        .iter()
        .map(|item| item.display_name.clone())
        .collect();
    assert_eq!(names, ["Item 1", "Item 2"]);
}

#[test]
fn load_from_store_reports_unknown_template() {
    let conn = setup();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let missing = Uuid::new_v4();

    let err = TierlistSession::load_from_store(&repo, missing).unwrap_err();
    assert!(matches!(err, SessionLoadError::UnknownTemplate(id) if id == missing));
}

#[test]
fn file_backed_store_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tierforge.sqlite3");

    {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
        repo.create_template("Persisted", &items(&["a.png"])).unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let listed = repo.list_templates().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Persisted");
}
