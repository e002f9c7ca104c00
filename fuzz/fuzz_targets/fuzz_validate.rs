#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use dvmeta::*;
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static CITATION: LazyLock<MetadataBlock> = LazyLock::new(|| {
    let fields = [
        MetadataFieldInfo::primitive("title", MetadataFieldType::Text).required(),
        MetadataFieldInfo::compound(
            "author",
            [
                MetadataFieldInfo::primitive("authorName", MetadataFieldType::Text).required(),
                MetadataFieldInfo::controlled_vocabulary("authorIdentifierScheme", ["ORCID"]),
            ],
        )
        .multiple()
        .required(),
        MetadataFieldInfo::controlled_vocabulary("subject", ["Law", "Medicine"]).multiple(),
        MetadataFieldInfo::primitive("productionDate", MetadataFieldType::Date),
    ];
    MetadataBlock::new(
        "citation",
        fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
    )
});

const KEYS: [&str; 6] = [
    "title",
    "author",
    "authorName",
    "authorIdentifierScheme",
    "subject",
    "productionDate",
];

/// Generate a field value tree, at most `depth` levels deep.
fn arbitrary_field_value(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<FieldValue> {
    let choice = if depth == 0 { 0 } else { u.int_in_range(0..=2)? };
    match choice {
        0 => {
            let text = match u.int_in_range(0..=4)? {
                0 => String::new(),
                1 => "ORCID".to_string(),
                2 => "Law".to_string(),
                3 => "2020-01-01".to_string(),
                _ => String::arbitrary(u)?,
            };
            Ok(FieldValue::Text(text))
        }
        1 => {
            let len = u.int_in_range(0..=4)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arbitrary_field_value(u, depth - 1)?);
            }
            Ok(FieldValue::List(items))
        }
        _ => {
            let len = u.int_in_range(0..=3)?;
            let mut entries = FieldMap::new();
            for _ in 0..len {
                let key = *u.choose(&KEYS)?;
                entries.insert(key.to_string(), arbitrary_field_value(u, depth - 1)?);
            }
            Ok(FieldValue::Compound(entries))
        }
    }
}

fn arbitrary_dataset(u: &mut Unstructured<'_>) -> arbitrary::Result<NewDataset> {
    let mut values = MetadataBlockValues::new("citation");
    for key in KEYS {
        if bool::arbitrary(u)? {
            values.fields.insert(key.to_string(), arbitrary_field_value(u, 3)?);
        }
    }
    Ok(NewDataset::new(vec![values]))
}

// Validation must never panic and must be deterministic.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(dataset) = arbitrary_dataset(&mut u) else {
        return;
    };

    let blocks = std::slice::from_ref(&*CITATION);
    let first = validate(&dataset, blocks);
    assert_eq!(first, validate(&dataset, blocks));
    if let Err(ValidationError::Field(e)) = first {
        let _ = e.to_string();
    }
});
