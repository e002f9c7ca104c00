use super::common::fixture;
use dvmeta::*;

#[test]
fn citation_envelope_parses_in_declared_order() {
    let block = parse_metadata_block(&fixture("citation.json")).unwrap();
    assert_eq!(block.name, "citation");
    assert_eq!(block.display_name, "Citation Metadata");
    let keys: Vec<&str> = block.metadata_fields.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "title",
            "author",
            "datasetContact",
            "dsDescription",
            "subject",
            "productionDate"
        ]
    );

    let author = block.field("author").unwrap();
    assert!(author.is_nested());
    assert!(author.multiple);
    assert!(author.is_required);
    assert_eq!(author.type_class, MetadataFieldTypeClass::Compound);
    let children: Vec<&str> = author
        .child_fields
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        children,
        ["authorName", "authorAffiliation", "authorIdentifierScheme"]
    );

    let scheme = author.child_field("authorIdentifierScheme").unwrap();
    assert!(scheme.is_controlled_vocabulary);
    assert_eq!(
        scheme.controlled_vocabulary_values.as_ref().map(Vec::len),
        Some(8)
    );
}

#[test]
fn domain_model_field_names_are_accepted() {
    let input = r#"{
      "name": "citation",
      "metadataFields": {
        "author": {
          "name": "author",
          "type": "NONE",
          "typeClass": "compound",
          "multiple": true,
          "childMetadataFields": {
            "authorName": {"name": "authorName", "type": "TEXT", "typeClass": "primitive"}
          }
        }
      }
    }"#;
    let block = parse_metadata_block(input).unwrap();
    assert!(block.field("author").unwrap().child_field("authorName").is_some());
}

#[test]
fn block_list_parses() {
    let input = r#"{"status": "OK", "data": [
        {"name": "citation", "fields": {}},
        {"name": "geospatial", "fields": {}}
    ]}"#;
    let blocks = parse_metadata_blocks(input).unwrap();
    let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["citation", "geospatial"]);
}

#[test]
fn unknown_field_type_is_unknown_variant() {
    let input = r#"{"name": "citation", "fields": {
        "title": {"name": "title", "type": "DATETIME", "typeClass": "primitive"}
    }}"#;
    let err = parse_metadata_block(input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownVariant);
}

#[test]
fn missing_type_class_is_type_mismatch() {
    let input = r#"{"name": "citation", "fields": {"title": {"name": "title", "type": "TEXT"}}}"#;
    let err = parse_metadata_block(input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TypeMismatch);
}

#[test]
fn error_envelope_is_reported() {
    let input = r#"{"status": "ERROR", "message": "Can't find metadata block 'geo'"}"#;
    let err = parse_metadata_block(input).unwrap_err();
    assert!(err.message.contains("Can't find metadata block"));
}

#[test]
fn empty_input_is_syntax_error() {
    assert_eq!(parse_dataset("  \n").unwrap_err().kind, ParseErrorKind::Syntax);
    assert_eq!(parse_metadata_block("").unwrap_err().kind, ParseErrorKind::Syntax);
}

#[test]
fn dataset_fixture_parses_all_value_shapes() {
    let dataset = parse_dataset(&fixture("dataset.json")).unwrap();
    assert_eq!(dataset.license.as_ref().unwrap().name, "CC0 1.0");
    let fields = &dataset.metadata_block_values[0].fields;

    assert!(matches!(fields["title"], FieldValue::Text(_)));
    assert_eq!(
        fields["subject"],
        FieldValue::from(vec!["Earth and Environmental Sciences", "Physics"])
    );
    let authors = fields["author"].as_list().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(
        authors[1].as_compound().unwrap()["authorIdentifierScheme"],
        FieldValue::from("ORCID")
    );
}

#[test]
fn numeric_field_value_is_rejected_with_path() {
    let input = r#"{"metadataBlockValues": [
        {"name": "citation", "fields": {"title": "ok", "productionDate": 2020}}
    ]}"#;
    let err = parse_dataset(input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TypeMismatch);
    assert_eq!(
        err.path.as_deref(),
        Some("metadataBlockValues[0].fields.productionDate")
    );
}

#[test]
fn nested_null_is_rejected() {
    let input = r#"{"metadataBlockValues": [
        {"name": "citation", "fields": {"author": [{"authorName": null}]}}
    ]}"#;
    let err = parse_dataset(input).unwrap_err();
    assert_eq!(err.path.as_deref(), Some("metadataBlockValues[0].fields.author"));
}

#[test]
fn unknown_top_level_dataset_key_is_rejected() {
    let err = parse_dataset(r#"{"metadataBlocks": []}"#).unwrap_err();
    assert_eq!(err.path.as_deref(), Some("metadataBlocks"));
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_submission_parses() {
    let input = r#"
metadataBlockValues:
  - name: citation
    fields:
      title: "Ocean data"
      subject:
        - Physics
      author:
        - authorName: "Doe, Jane"
"#;
    let dataset = parse_dataset(input).unwrap();
    let fields = &dataset.metadata_block_values[0].fields;
    assert_eq!(fields["title"], FieldValue::from("Ocean data"));
    assert_eq!(
        fields["author"],
        FieldValue::List(vec![FieldValue::compound([("authorName", "Doe, Jane")])])
    );
}
