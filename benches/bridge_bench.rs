use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::hint::black_box;
use vegalite_bridge::api::extract;
use vegalite_bridge::core::{ChartNode, Table};
use vegalite_bridge::host::ComponentArgs;

fn generated_table(rows: usize) -> Arc<Table> {
    let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();
    columns.insert(
        "t".to_owned(),
        (0..rows).map(|i| json!(i as f64)).collect(),
    );
    columns.insert(
        "price".to_owned(),
        (0..rows).map(|i| json!(100.0 + (i % 37) as f64 * 0.25)).collect(),
    );
    Table::from_columns(columns)
        .expect("valid generated table")
        .shared()
}

fn layered_chart(layers: usize, rows: usize) -> ChartNode {
    let shared = generated_table(rows);
    ChartNode::layers(
        (0..layers)
            .map(|i| {
                let table = if i % 2 == 0 {
                    Arc::clone(&shared)
                } else {
                    generated_table(rows)
                };
                ChartNode::object()
                    .with_data(&table)
                    .with("mark", "line")
                    .with("encoding", json!({"x": {"field": "t"}, "y": {"field": "price"}}))
            })
            .collect(),
    )
}

fn bench_extract_layered_chart(c: &mut Criterion) {
    let chart = layered_chart(16, 1_000);

    c.bench_function("extract_layered_chart_16x1k", |b| {
        b.iter(|| {
            let _ = extract(black_box(&chart)).expect("extraction should succeed");
        })
    });
}

fn bench_wire_payload_10k(c: &mut Criterion) {
    let chart = layered_chart(4, 10_000);
    let extracted = extract(&chart).expect("extraction should succeed");
    let args = ComponentArgs::new(extracted.spec, extracted.datasets, None, json!({}))
        .expect("valid args");

    c.bench_function("wire_payload_10k", |b| {
        b.iter(|| {
            let _ = black_box(&args).to_json_value();
        })
    });

    c.bench_function("content_instance_id_10k", |b| {
        b.iter(|| {
            let _ = black_box(&args).instance_id();
        })
    });
}

criterion_group!(
    benches,
    bench_extract_layered_chart,
    bench_wire_payload_10k
);
criterion_main!(benches);
