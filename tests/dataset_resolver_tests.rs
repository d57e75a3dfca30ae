use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Value, json};
use vegalite_bridge::api::{
    DATAFRAME_SENTINEL, DataInput, DatasetPayloadMap, normalize, normalize_into,
};
use vegalite_bridge::core::Table;

fn table(rows: Value) -> Arc<Table> {
    Table::try_from(rows).expect("valid table").shared()
}

fn bar_spec() -> Value {
    json!({
        "data": {"url": "data/cars.json"},
        "selection": {"clicked": {"type": "multi", "encodings": ["x"]}},
        "mark": "bar",
        "encoding": {
            "x": {"field": "a", "type": "nominal"},
            "y": {"field": "b", "type": "quantitative"}
        }
    })
}

#[test]
fn single_table_rewrites_data_to_sentinel() {
    let rows = json!([{"a": "A", "b": 10}]);
    let (spec, datasets) =
        normalize(bar_spec(), DataInput::Single(table(rows.clone()))).expect("normalize");

    assert_eq!(spec["data"], json!({"name": "DATAFRAME_DATA"}));
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets.names().collect::<Vec<_>>(), [DATAFRAME_SENTINEL]);
    assert_eq!(
        Value::Object(datasets.to_json_map()),
        json!({"DATAFRAME_DATA": [{"a": "A", "b": 10}]})
    );
}

#[test]
fn single_table_rewrite_touches_nothing_else() {
    let original = bar_spec();
    let (spec, _) =
        normalize(original.clone(), DataInput::from(Table::default())).expect("normalize");

    let mut expected = original;
    expected["data"] = json!({"name": DATAFRAME_SENTINEL});
    assert_eq!(spec, expected);
}

#[test]
fn single_table_normalization_is_idempotent() {
    let shared = table(json!([{"x": 1.5}, {"x": 2.5}]));
    let (once, first) =
        normalize(bar_spec(), DataInput::Single(Arc::clone(&shared))).expect("first");
    let (twice, second) =
        normalize(once.clone(), DataInput::Single(Arc::clone(&shared))).expect("second");

    assert_eq!(once, twice);
    assert_eq!(first, second);
}

#[test]
fn single_table_is_shared_not_copied() {
    let shared = table(json!([{"x": 1}]));
    let (_, datasets) =
        normalize(bar_spec(), DataInput::Single(Arc::clone(&shared))).expect("normalize");
    assert!(Arc::ptr_eq(datasets.get(DATAFRAME_SENTINEL).expect("sentinel"), &shared));
}

#[test]
fn single_table_requires_object_spec() {
    let result = normalize(json!(["not", "a", "spec"]), DataInput::from(Table::default()));
    assert!(result.is_err());
}

#[test]
fn named_mapping_leaves_spec_unchanged() {
    let spec = json!({
        "selection": {"brush": {"type": "interval"}},
        "layer": [
            {"data": {"name": "a"}, "mark": "line"},
            {"data": {"name": "b"}, "mark": "point"}
        ]
    });
    let mut tables = IndexMap::new();
    tables.insert("a".to_owned(), table(json!([{"t": 1}])));
    tables.insert("b".to_owned(), table(json!([{"t": 2}])));

    let (patched, datasets) = normalize(spec.clone(), DataInput::Named(tables)).expect("normalize");

    assert_eq!(patched, spec);
    assert_eq!(datasets.names().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn auxiliary_tables_keep_spec_data_and_last_write_wins() {
    let spec = json!({"data": {"name": "hist_data"}, "selection": {"b": {"type": "interval"}}});
    let first = table(json!([{"x": 1}]));
    let second = table(json!([{"x": 2}]));

    let (patched, datasets) = normalize(
        spec.clone(),
        DataInput::Auxiliary(vec![
            ("hist_data".to_owned(), Arc::clone(&first)),
            ("extra".to_owned(), table(json!([]))),
            ("hist_data".to_owned(), Arc::clone(&second)),
        ]),
    )
    .expect("normalize");

    assert_eq!(patched, spec);
    assert_eq!(datasets.len(), 2);
    assert!(Arc::ptr_eq(datasets.get("hist_data").expect("hist_data"), &second));
}

#[test]
fn empty_auxiliary_input_yields_empty_map() {
    let spec = bar_spec();
    let (patched, datasets) = normalize(spec.clone(), DataInput::none()).expect("normalize");
    assert_eq!(patched, spec);
    assert!(datasets.is_empty());
}

#[test]
fn normalize_into_overwrites_existing_entries() {
    let mut datasets = DatasetPayloadMap::new();
    datasets.insert(DATAFRAME_SENTINEL, table(json!([{"stale": true}])));
    datasets.insert("keep", table(json!([{"k": 1}])));

    let fresh = table(json!([{"fresh": true}]));
    normalize_into(bar_spec(), DataInput::Single(Arc::clone(&fresh)), &mut datasets)
        .expect("normalize");

    assert_eq!(datasets.len(), 2);
    assert!(Arc::ptr_eq(datasets.get(DATAFRAME_SENTINEL).expect("sentinel"), &fresh));
    assert!(datasets.contains("keep"));
}

#[test]
fn row_order_is_preserved() {
    let rows = json!([{"x": 3}, {"x": 1}, {"x": 2}]);
    let (_, datasets) =
        normalize(bar_spec(), DataInput::Single(table(rows.clone()))).expect("normalize");
    assert_eq!(
        datasets
            .get(DATAFRAME_SENTINEL)
            .expect("sentinel")
            .to_json_value(),
        rows
    );
}
