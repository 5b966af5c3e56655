use lifecoach_core::db::open_db_in_memory;
use lifecoach_core::{
    Collection, DocumentStore, HabitService, HabitServiceError, LifeArea, ModelError,
    SqliteDocumentStore,
};

#[test]
fn add_list_toggle_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = HabitService::new(SqliteDocumentStore::new(&conn), "alice");

    let meditate = service.add_habit("Meditate", LifeArea::Mind).unwrap();
    let walk = service.add_habit("Evening walk", LifeArea::Body).unwrap();
    assert!(!meditate.id.is_empty());
    assert_ne!(meditate.id, walk.id);

    let habits = service.list_habits().unwrap();
    assert_eq!(habits.len(), 2);
    assert!(habits.iter().all(|habit| !habit.completed));

    let toggled = service.toggle_habit(&meditate.id).unwrap();
    assert!(toggled.completed);
    let reloaded = service.list_habits().unwrap();
    let stored = reloaded
        .iter()
        .find(|habit| habit.id == meditate.id)
        .unwrap();
    assert!(stored.completed);
    assert_eq!(stored.category, LifeArea::Mind);

    service.delete_habit(&walk.id).unwrap();
    assert_eq!(service.list_habits().unwrap().len(), 1);
}

#[test]
fn blank_names_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = HabitService::new(SqliteDocumentStore::new(&conn), "alice");

    assert!(matches!(
        service.add_habit("   ", LifeArea::Money),
        Err(HabitServiceError::Model(ModelError::EmptyName))
    ));
    assert!(service.list_habits().unwrap().is_empty());
}

#[test]
fn unknown_ids_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = HabitService::new(SqliteDocumentStore::new(&conn), "alice");

    assert!(matches!(
        service.toggle_habit("nope"),
        Err(HabitServiceError::HabitNotFound(_))
    ));
    assert!(matches!(
        service.delete_habit("nope"),
        Err(HabitServiceError::HabitNotFound(_))
    ));
}

#[test]
fn habits_are_private_to_each_user() {
    let conn = open_db_in_memory().unwrap();
    let alice = HabitService::new(SqliteDocumentStore::new(&conn), "alice");
    let bob = HabitService::new(SqliteDocumentStore::new(&conn), "bob");

    alice.add_habit("Journal", LifeArea::Soul).unwrap();
    assert!(bob.list_habits().unwrap().is_empty());
}

#[test]
fn listing_skips_undecodable_habits() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);
    let service = HabitService::new(SqliteDocumentStore::new(&conn), "alice");

    let read = service.add_habit("Read", LifeArea::Mind).unwrap();
    store
        .set_document(
            "alice",
            Collection::Habits,
            "broken",
            &serde_json::json!({ "name": 5 }),
        )
        .unwrap();

    let habits = service.list_habits().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].id, read.id);
}
