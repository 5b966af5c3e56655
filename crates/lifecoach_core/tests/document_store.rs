use lifecoach_core::db::open_db_in_memory;
use lifecoach_core::{Collection, DocumentStore, RepoError, SqliteDocumentStore};
use serde_json::json;

#[test]
fn set_then_get_returns_same_body() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    let body = json!({"title": "Week 1", "nested": {"n": 3}});
    store
        .set_document("alice", Collection::Planners, "Week 1", &body)
        .unwrap();

    let loaded = store
        .get_document("alice", Collection::Planners, "Week 1")
        .unwrap();
    assert_eq!(loaded, Some(body));
}

#[test]
fn set_replaces_the_whole_document() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    store
        .set_document("alice", Collection::Planners, "p", &json!({"a": 1, "b": 2}))
        .unwrap();
    store
        .set_document("alice", Collection::Planners, "p", &json!({"c": 3}))
        .unwrap();

    let loaded = store
        .get_document("alice", Collection::Planners, "p")
        .unwrap()
        .unwrap();
    assert_eq!(loaded, json!({"c": 3}));
}

#[test]
fn missing_document_is_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    assert_eq!(
        store
            .get_document("alice", Collection::WheelOfLife, "01-Jan-26")
            .unwrap(),
        None
    );
}

#[test]
fn documents_are_scoped_by_user_and_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    store
        .set_document("alice", Collection::Planners, "shared", &json!(1))
        .unwrap();
    store
        .set_document("bob", Collection::Planners, "shared", &json!(2))
        .unwrap();
    store
        .set_document("alice", Collection::Habits, "shared", &json!(3))
        .unwrap();

    assert_eq!(
        store
            .get_document("bob", Collection::Planners, "shared")
            .unwrap(),
        Some(json!(2))
    );
    assert_eq!(
        store
            .list_document_ids("alice", Collection::Planners)
            .unwrap(),
        vec!["shared".to_string()]
    );
    assert!(store
        .list_document_ids("carol", Collection::Planners)
        .unwrap()
        .is_empty());
}

#[test]
fn list_is_sorted_by_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);
    for id in ["charlie", "alpha", "bravo"] {
        store
            .set_document("u", Collection::Planners, id, &json!({}))
            .unwrap();
    }
    assert_eq!(
        store.list_document_ids("u", Collection::Planners).unwrap(),
        vec!["alpha", "bravo", "charlie"]
    );
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);
    store
        .set_document("u", Collection::Habits, "h1", &json!({}))
        .unwrap();

    assert!(store.delete_document("u", Collection::Habits, "h1").unwrap());
    assert!(!store.delete_document("u", Collection::Habits, "h1").unwrap());
}

#[test]
fn add_document_generates_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    let first = store
        .add_document("u", Collection::Habits, &json!({"n": 1}))
        .unwrap();
    let second = store
        .add_document("u", Collection::Habits, &json!({"n": 2}))
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(
        store.list_document_ids("u", Collection::Habits).unwrap().len(),
        2
    );
}

#[test]
fn invalid_ids_never_reach_storage() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    let err = store
        .set_document("u", Collection::Planners, "a/b", &json!({}))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidDocumentId(_)));
    assert!(store
        .list_document_ids("u", Collection::Planners)
        .unwrap()
        .is_empty());
}

#[test]
fn corrupt_body_surfaces_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO documents (user_id, collection, doc_id, body) VALUES ('u', 'planners', 'bad', 'not json');",
        [],
    )
    .unwrap();
    let store = SqliteDocumentStore::new(&conn);

    let err = store
        .get_document("u", Collection::Planners, "bad")
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
