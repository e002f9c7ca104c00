use dvmeta::*;
use proptest::prelude::*;

fn schema() -> MetadataBlock {
    let fields = [
        MetadataFieldInfo::primitive("title", MetadataFieldType::Text).required(),
        MetadataFieldInfo::compound(
            "author",
            [
                MetadataFieldInfo::primitive("authorName", MetadataFieldType::Text).required(),
                MetadataFieldInfo::controlled_vocabulary("authorIdentifierScheme", ["ORCID", "ISNI"]),
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
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Law".to_string()),
        Just("ORCID".to_string()),
        Just("2020-01-01".to_string()),
        "[a-zA-Z0-9 -]{0,10}",
    ]
}

fn arb_value() -> impl Strategy<Value = FieldValue> {
    let leaf = arb_text().prop_map(FieldValue::Text);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FieldValue::List),
            prop::collection::vec(
                (
                    prop_oneof![
                        Just("authorName".to_string()),
                        Just("authorIdentifierScheme".to_string()),
                        Just("other".to_string()),
                    ],
                    inner,
                ),
                0..3,
            )
            .prop_map(FieldValue::compound),
        ]
    })
}

fn arb_dataset() -> impl Strategy<Value = NewDataset> {
    prop::collection::vec(
        (
            prop_oneof![
                Just("title"),
                Just("author"),
                Just("subject"),
                Just("productionDate"),
            ],
            arb_value(),
        ),
        0..5,
    )
    .prop_map(|fields| {
        let mut values = MetadataBlockValues::new("citation");
        for (key, value) in fields {
            values.fields.insert(key.to_string(), value);
        }
        NewDataset::new(vec![values])
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    // Same input, same outcome; neither input is touched.
    #[test]
    fn validation_is_idempotent_and_pure(dataset in arb_dataset()) {
        let blocks = [schema()];
        let blocks_before = blocks.clone();
        let dataset_before = dataset.clone();

        let first = validate(&dataset, &blocks);
        let second = validate(&dataset, &blocks);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&blocks, &blocks_before);
        prop_assert_eq!(&dataset, &dataset_before);
    }

    // Concurrent passes over one shared schema agree with a sequential pass.
    #[test]
    fn shared_schema_across_threads(a in arb_dataset(), b in arb_dataset()) {
        let blocks = [schema()];
        let validator = Validator::new();
        let (ra, rb) = std::thread::scope(|s| {
            let ha = s.spawn(|| validator.validate(&a, &blocks));
            let hb = s.spawn(|| validator.validate(&b, &blocks));
            (ha.join().unwrap(), hb.join().unwrap())
        });
        prop_assert_eq!(ra, validate(&a, &blocks));
        prop_assert_eq!(rb, validate(&b, &blocks));
    }
}
