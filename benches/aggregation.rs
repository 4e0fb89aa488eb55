use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spendwise::spendwise_core::{MemoryStore, RecordStore, StatisticsAggregator};
use spendwise::spendwise_domain::{Buying, Category, Person, Price};
use spendwise::spendwise_storage_json::{load_records_from_path, save_records_to_path};
use tempfile::tempdir;
use uuid::Uuid;

fn build_sample_store(buying_count: usize) -> (MemoryStore, Uuid) {
    let mut store = MemoryStore::new();
    let person = store
        .insert_person(Person::new("Benchmark"))
        .expect("insert person");
    let categories: Vec<Uuid> = ["supermarket", "health", "beauty", "clothes", "transport"]
        .into_iter()
        .map(|title| store.insert_category(Category::new(title)).expect("insert category"))
        .collect();

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for idx in 0..buying_count {
        let day = start + Days::new((idx % 365) as u64);
        let price = Price::new(100 + (idx % 5_000) as i64).unwrap();
        let category = categories[idx % categories.len()];
        store
            .insert_buying(Buying::new(person, category, "shop", day, price))
            .expect("insert buying");
    }
    (store, person)
}

fn bench_aggregation(c: &mut Criterion) {
    let (store, person) = build_sample_store(black_box(10_000));
    let stats = StatisticsAggregator::new(&store);
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

    c.bench_function("summarize_10k", |b| {
        b.iter(|| black_box(stats.summarize(person, start, end).expect("summarize")))
    });

    c.bench_function("per_category_totals_10k", |b| {
        b.iter(|| {
            black_box(
                stats
                    .per_category_totals(person, start, end)
                    .expect("per category totals"),
            )
        })
    });
}

fn bench_records_io(c: &mut Criterion) {
    let (store, _) = build_sample_store(10_000);
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");

    c.bench_function("records_save_10k", |b| {
        b.iter(|| save_records_to_path(store.records(), &path).expect("save records"))
    });

    save_records_to_path(store.records(), &path).expect("seed");

    c.bench_function("records_load_10k", |b| {
        b.iter(|| black_box(load_records_from_path(&path).expect("load records")))
    });
}

criterion_group!(benches, bench_aggregation, bench_records_io);
criterion_main!(benches);
