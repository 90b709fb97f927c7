//! File-backed template store

use rsvpkit_editor::{BuilderSession, FileStore, PaletteItem, ParentRef, StoreError, TemplateStore};
use rsvpkit_model::{FieldType, Template};
use tempfile::TempDir;

fn store() -> (TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("templates")).unwrap();
    (dir, store)
}

#[test]
fn test_save_assigns_id_and_writes_json() {
    let (_dir, mut store) = store();
    let mut template = Template::new("Launch Night");

    let id = store.save(&mut template).unwrap();
    assert!(id.starts_with("template-"));
    assert_eq!(template.id.as_deref(), Some(id.as_str()));
    assert!(template.updated_at.is_none());

    let path = store.path_for(&id);
    assert!(path.exists());
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("\"title\": \"Launch Night\""));
}

#[test]
fn test_second_save_keeps_id_and_stamps_update() {
    let (_dir, mut store) = store();
    let mut template = Template::new("Launch Night");
    let id = store.save(&mut template).unwrap();
    let created = template.created_at;

    template.title = "Launch Night II".to_string();
    assert_eq!(store.save(&mut template).unwrap(), id);

    let loaded = store.load(&id).unwrap();
    assert_eq!(loaded.title, "Launch Night II");
    assert_eq!(loaded.created_at, created);
    assert!(loaded.updated_at.is_some());
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_session_round_trip_through_disk() -> anyhow::Result<()> {
    let (_dir, mut store) = store();
    let mut session = BuilderSession::new(Template::new("Reunion"));
    session.append(PaletteItem::Field(FieldType::Heading), ParentRef::Root);
    session.append(PaletteItem::Field(FieldType::Radio), ParentRef::Root);

    let id = session.save(&mut store)?;
    let loaded = store.load(&id)?;
    assert_eq!(&loaded, session.template());

    let summary = &store.list()?[0];
    assert_eq!(summary.id, id);
    assert_eq!(summary.title, "Reunion");
    assert_eq!(summary.node_count, 2);
    Ok(())
}

#[test]
fn test_list_ignores_other_files_and_sorts() {
    let (_dir, mut store) = store();
    std::fs::write(store.dir().join("notes.txt"), "not a template").unwrap();

    let mut ids: Vec<String> = ["B", "A", "C"]
        .iter()
        .map(|title| store.save(&mut Template::new(*title)).unwrap())
        .collect();
    ids.sort();

    let listed: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn test_delete_and_missing() {
    let (_dir, mut store) = store();
    let mut template = Template::new("Temp");
    let id = store.save(&mut template).unwrap();

    store.delete(&id).unwrap();
    assert!(matches!(store.load(&id), Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete(&id), Err(StoreError::NotFound(_))));
}

#[test]
fn test_corrupt_file_is_a_json_error() {
    let (_dir, store) = store();
    std::fs::write(store.path_for("broken"), "{ not json").unwrap();
    assert!(matches!(store.load("broken"), Err(StoreError::Json(_))));
}
