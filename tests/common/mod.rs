#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use spendwise::{
    spendwise_config::Config,
    spendwise_core::{FixedClock, RecordStore},
    spendwise_domain::{Account, Buying, Category, Goal, Person, Price},
    Session,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a configuration whose data root is a fresh temporary directory.
pub fn test_config() -> Config {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    Config {
        data_root: Some(base.join("data")),
        ..Config::default()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct Seeded {
    pub svetlana: Uuid,
    pub anna: Uuid,
    pub supermarket: Uuid,
    pub health: Uuid,
    pub auto_goal: Uuid,
}

/// Opens an initialized session pinned to `today` and fills it with February 2020 data.
pub fn seeded_session(today: NaiveDate) -> (Session, Seeded) {
    let config = test_config();
    Session::initialize(&config).expect("initialize store");
    let mut session = Session::open(config)
        .expect("open session")
        .with_clock(FixedClock::new(today));

    let seeded = session
        .unit_of_work(|unit| {
            let store = unit.store();
            let svetlana = store.insert_person(Person::new("Popova Svetlana"))?;
            let anna = store.insert_person(Person::new("Ivanova Anna"))?;
            let supermarket = store.insert_category(Category::new("supermarket"))?;
            let health = store.insert_category(Category::new("health"))?;
            let beauty = store.insert_category(Category::new("beauty"))?;
            let clothes = store.insert_category(Category::new("clothes"))?;

            let rows = [
                (svetlana, beauty, "rivegaushe", date(2020, 2, 2), "2000", Some("parfum")),
                (svetlana, health, "drugstore", date(2020, 2, 1), "700", None),
                (anna, clothes, "uniqlo", date(2020, 2, 10), "2000", None),
                (svetlana, supermarket, "okey", date(2020, 2, 14), "4000", Some("food for birthday")),
                (anna, supermarket, "magnit", date(2020, 2, 15), "1000", None),
                (svetlana, supermarket, "diksi", date(2020, 2, 2), "750", None),
            ];
            for (person, category, shop, day, raw_price, title) in rows {
                let price: Price = raw_price.parse()?;
                let mut buying = Buying::new(person, category, shop, day, price);
                if let Some(title) = title {
                    buying = buying.with_title(title);
                }
                store.insert_buying(buying)?;
            }

            let auto_goal = store.insert_goal(
                Goal::new(svetlana, "auto", date(2020, 2, 1), 500_000)?
                    .with_target_date(date(2020, 7, 1)),
            )?;
            store.insert_account(Account::new("SberCardSalary", 60_000).owned_by(svetlana))?;
            store.insert_account(Account::new("MySavings", 100_000).owned_by(svetlana))?;
            store.insert_account(Account::new("Tinkoff", 30_000).owned_by(anna))?;

            Ok(Seeded {
                svetlana,
                anna,
                supermarket,
                health,
                auto_goal,
            })
        })
        .expect("seed records");
    (session, seeded)
}
