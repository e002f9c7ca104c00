#![no_main]

use libfuzzer_sys::fuzz_target;

// from_version_payload(v) → to_json → from_version_payload must be stable.
fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(blocks) = dvmeta::from_version_payload(&value) else {
        return;
    };
    let rebuilt = serde_json::json!({
        "metadataBlocks": blocks
            .iter()
            .map(|b| {
                let fields: Vec<_> = b
                    .fields
                    .iter()
                    .map(|(k, v)| serde_json::json!({"typeName": k, "value": wrap(v)}))
                    .collect();
                (b.name.clone(), serde_json::json!({ "fields": fields }))
            })
            .collect::<serde_json::Map<_, _>>()
    });
    let again = dvmeta::from_version_payload(&rebuilt).expect("rebuilt payload must parse");
    assert_eq!(blocks, again);
});

fn wrap(value: &dvmeta::FieldValue) -> serde_json::Value {
    match value {
        dvmeta::FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        dvmeta::FieldValue::List(items) => items.iter().map(wrap).collect(),
        dvmeta::FieldValue::Compound(children) => children
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::json!({"typeName": k, "value": wrap(v)})))
            .collect::<serde_json::Map<_, _>>()
            .into(),
    }
}
