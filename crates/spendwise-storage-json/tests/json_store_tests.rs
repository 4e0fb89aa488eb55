use std::fs;

use chrono::NaiveDate;
use spendwise_core::{CoreError, RecordStore};
use spendwise_domain::{Buying, Category, Goal, Person, Price, Records};
use spendwise_storage_json::{load_records_from_path, save_records_to_path, JsonRecordStore};
use tempfile::tempdir;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 2, d).unwrap()
}

#[test]
fn open_requires_initialized_store() {
    let dir = tempdir().expect("tempdir");
    let err = JsonRecordStore::open(dir.path().join("records.json")).unwrap_err();
    assert!(err.is_storage_failure());
    assert!(err.to_string().contains("not initialized"));
}

#[test]
fn initialize_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("data").join("records.json");

    let mut store = JsonRecordStore::initialize(&path).expect("initialize");
    store
        .insert_person(Person::new("Popova Svetlana"))
        .expect("insert person");
    store.commit().expect("commit");

    let again = JsonRecordStore::initialize(&path).expect("initialize again");
    assert_eq!(again.records().people.len(), 1);
    assert!(!again.is_dirty());
}

#[test]
fn committed_records_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let mut store = JsonRecordStore::initialize(&path).expect("initialize");

    let person = store.insert_person(Person::new("Popova Svetlana")).unwrap();
    let category = store.insert_category(Category::new("supermarket")).unwrap();
    store
        .insert_buying(Buying::new(
            person,
            category,
            "okey",
            date(14),
            Price::new(4_000).unwrap(),
        ))
        .unwrap();
    let goal = Goal::new(person, "auto", date(1), 500_000).unwrap();
    let goal_id = store.insert_goal(goal.clone()).unwrap();
    let mut topped = goal;
    topped.current_amount = 20_000;
    store.save_goal(&topped).unwrap();
    assert!(store.is_dirty());
    store.commit().expect("commit");
    assert!(!store.is_dirty());

    let reopened = JsonRecordStore::open(&path).expect("reopen");
    assert_eq!(reopened.records().buyings.len(), 1);
    let stored = reopened.goal(goal_id).unwrap();
    assert_eq!(stored.current_amount, 20_000);
    assert_eq!(stored.revision, 1);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn rollback_discards_uncommitted_changes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let mut store = JsonRecordStore::initialize(&path).expect("initialize");
    store.insert_person(Person::new("Ivanova Anna")).unwrap();
    store.rollback().expect("rollback");
    assert!(store.records().people.is_empty());
    assert!(!store.is_dirty());
}

#[test]
fn failed_writes_do_not_mark_store_dirty() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonRecordStore::initialize(dir.path().join("records.json")).unwrap();
    let orphan = Goal::new(uuid::Uuid::new_v4(), "orphan", date(1), 10).unwrap();
    assert!(matches!(
        store.insert_goal(orphan),
        Err(CoreError::PersonNotFound(_))
    ));
    assert!(!store.is_dirty());
}

#[test]
fn textual_prices_in_snapshot_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    fs::write(
        &path,
        r#"{
            "people": [],
            "categories": [],
            "buyings": [{
                "id": "6f1c2d3e-0000-4000-8000-000000000001",
                "shop_name": "diksi",
                "purchase_date": "2020-02-02",
                "price": "750",
                "person_id": "6f1c2d3e-0000-4000-8000-000000000002",
                "category_id": "6f1c2d3e-0000-4000-8000-000000000003"
            }],
            "created_at": "2020-02-01T00:00:00Z",
            "updated_at": "2020-02-01T00:00:00Z"
        }"#,
    )
    .unwrap();
    let err = JsonRecordStore::open(&path).unwrap_err();
    assert!(matches!(err, CoreError::Serde(_)));
}

#[test]
fn newer_schema_versions_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    fs::write(
        &path,
        r#"{"created_at":"2020-02-01T00:00:00Z","updated_at":"2020-02-01T00:00:00Z","schema_version":99}"#,
    )
    .unwrap();
    let err = JsonRecordStore::open(&path).unwrap_err();
    assert!(matches!(err, CoreError::Storage(message) if message.contains("99")));
}

#[test]
fn snapshots_with_invalid_goals_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let person = Person::new("Popova Svetlana");
    let mut goal = Goal::new(person.id, "auto", date(1), 500_000).unwrap();
    goal.target_amount = 0;

    let mut records = Records::new();
    records.people.push(person);
    records.goals.push(goal);
    save_records_to_path(&records, &path).expect("write snapshot");

    let err = JsonRecordStore::open(&path).unwrap_err();
    assert!(err.is_storage_failure());
    assert!(matches!(err, CoreError::Storage(message) if message.contains("invalid goal")));
}

#[test]
fn snapshots_with_negative_limits_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let mut category = Category::new("supermarket");
    category.limit = Some(-1);

    let mut records = Records::new();
    records.categories.push(category);
    save_records_to_path(&records, &path).expect("write snapshot");

    let err = load_records_from_path(&path).unwrap_err();
    assert!(matches!(err, CoreError::Storage(message) if message.contains("invalid category")));
}
