use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde::{Deserialize, Serialize};

use fabdesk_store::{
    commit, EditSession, Entity, EntityStore, Field, Filter, NoReferences, Query,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    id: u64,
    name: String,
    city: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl Entity for Row {
    const COLLECTION: &'static str = "rows";
    const LABEL: &'static str = "row";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::optional_text("city"),
        Field::status(&["active", "inactive"]),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "city"];

    fn id(&self) -> u64 {
        self.id
    }
    fn created_at(&self) -> &str {
        &self.created_at
    }
    fn updated_at(&self) -> &str {
        &self.updated_at
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

fn rows(n: u64) -> Vec<Row> {
    (1..=n)
        .map(|i| Row {
            id: i,
            name: format!("customer {i}"),
            city: if i % 3 == 0 { "Shanghai".into() } else { "Guangzhou".into() },
            status: if i % 2 == 0 { "active".into() } else { "inactive".into() },
            created_at: "2024-01-15".into(),
            updated_at: "2024-01-15".into(),
        })
        .collect()
}

fn bench_query_term(c: &mut Criterion) {
    let all = rows(1000);
    let q = Query::new().with_term("shang").with_filter(Filter::status("active"));
    c.bench_function("query_term_and_status_1000", |b| {
        b.iter(|| q.apply(black_box(&all)).len());
    });
}

fn bench_commit_create(c: &mut Criterion) {
    c.bench_function("commit_create_into_1000", |b| {
        b.iter_batched(
            || EntityStore::in_memory(rows(1000)).unwrap(),
            |mut store| {
                let mut form = EditSession::new();
                form.open_create();
                form.stage("name", "new customer").unwrap();
                form.stage("status", "active").unwrap();
                commit(&mut store, &mut form, &NoReferences).unwrap()
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_query_term, bench_commit_create);
criterion_main!(benches);
