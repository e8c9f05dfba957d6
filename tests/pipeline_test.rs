//! Integration tests for running the typecaster inside a record pipeline

use auto_typecast::{
    FilterChain, FnFilter, NdjsonReader, NdjsonWriter, RecordFilter, TypecastConfig, Typecaster,
    Value,
};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn load_example_config() -> Typecaster {
    TypecastConfig::load_from_file("config/auto_typecast.yaml")
        .expect("Failed to load example config")
        .build()
        .expect("Failed to build typecaster")
}

#[test]
fn test_example_config() {
    let caster = load_example_config();

    assert_eq!(caster.max_depth(), 0);
    assert_eq!(caster.ignore_key_pattern(), Some("^(id|zip_code|phone)$"));
}

#[test]
fn test_ndjson_stream() {
    let caster = load_example_config();
    let input = concat!(
        "{\"id\":\"0042\",\"status\":\"200\",\"latency\":\"0.25\",\"ok\":\"true\"}\n",
        "\n",
        "{\"id\":\"7\",\"user\":{\"zip_code\":\"01234\",\"age\":\"31\",\"tags\":[\"nil\",\"x\"]}}\n",
    );

    let mut out = Vec::new();
    let mut writer = NdjsonWriter::new(&mut out);
    for record in NdjsonReader::new(input.as_bytes()) {
        writer.write(&caster.filter(record.unwrap())).unwrap();
    }
    writer.flush().unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        vec![
            r#"{"id":"0042","status":200,"latency":0.25,"ok":true}"#,
            r#"{"id":"7","user":{"zip_code":"01234","age":31,"tags":[null,"x"]}}"#,
        ]
    );
}

#[test]
fn test_chain_with_typecaster() {
    let drop_nulls = FnFilter::new("drop_nulls", |record: Value| match record {
        Value::Map(map) => Value::Map(map.into_iter().filter(|(_, v)| *v != Value::Null).collect()),
        other => other,
    });

    let chain = FilterChain::new()
        .add_shared(Arc::new(Typecaster::new()) as Arc<dyn RecordFilter>)
        .add(drop_nulls);

    let out = chain.apply(Value::from(json!({"a": "null", "b": "1", "c": "nil?"})));

    assert_eq!(chain.len(), 2);
    assert_eq!(out, Value::from(json!({"b": 1, "c": "nil?"})));
}

#[test]
fn test_shared_across_threads() {
    let caster = Arc::new(Typecaster::builder().unlimited_depth().build().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let caster = Arc::clone(&caster);
            thread::spawn(move || {
                let record = Value::from(json!({"n": i.to_string(), "l": [format!("{}.5", i)]}));
                caster.filter(record)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(
            out,
            Value::from(json!({"n": i as i64, "l": [i as f64 + 0.5]}))
        );
    }
}
