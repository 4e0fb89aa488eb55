use chrono::NaiveDate;
use serde_json::json;
use spendwise_domain::{Buying, NotificationChannel, Price, Records};
use uuid::Uuid;

#[test]
fn buying_with_textual_price_is_rejected() {
    let raw = json!({
        "id": Uuid::new_v4(),
        "shop_name": "diksi",
        "purchase_date": "2020-02-02",
        "price": "750",
        "person_id": Uuid::new_v4(),
        "category_id": Uuid::new_v4(),
    });
    assert!(serde_json::from_value::<Buying>(raw).is_err());
}

#[test]
fn buying_with_negative_price_is_rejected() {
    let raw = json!({
        "id": Uuid::new_v4(),
        "shop_name": "diksi",
        "purchase_date": "2020-02-02",
        "price": -750,
        "person_id": Uuid::new_v4(),
        "category_id": Uuid::new_v4(),
    });
    let err = serde_json::from_value::<Buying>(raw).unwrap_err();
    assert!(err.to_string().contains("negative"), "unexpected error: {err}");
}

#[test]
fn buying_serializes_price_as_integer() {
    let buying = Buying::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "drugstore",
        NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        "700".parse::<Price>().unwrap(),
    );
    let value = serde_json::to_value(&buying).unwrap();
    assert_eq!(value["price"], json!(700));
    assert!(value.get("title").is_none());
}

#[test]
fn channel_uses_lowercase_labels() {
    assert_eq!(
        serde_json::to_value(NotificationChannel::Email).unwrap(),
        json!("email")
    );
    assert_eq!(NotificationChannel::default(), NotificationChannel::Push);
}

#[test]
fn records_fill_missing_collections() {
    let raw = json!({
        "created_at": "2020-02-01T00:00:00Z",
        "updated_at": "2020-02-01T00:00:00Z",
    });
    let records: Records = serde_json::from_value(raw).unwrap();
    assert!(records.people.is_empty());
    assert!(records.buyings.is_empty());
    assert_eq!(records.schema_version, spendwise_domain::CURRENT_SCHEMA_VERSION);
}
