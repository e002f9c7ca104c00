use dvmeta::*;

fn error(parent: Option<&str>, position: Option<usize>, kind: FieldErrorKind) -> FieldValidationError {
    FieldValidationError {
        block: "citation".to_string(),
        field: "authorName".to_string(),
        parent_field: parent.map(str::to_string),
        position,
        kind,
    }
}

#[test]
fn message_without_provenance() {
    let e = error(None, None, FieldErrorKind::EmptyField);
    assert_eq!(
        e.to_string(),
        "There was an error when validating the field authorName from metadata block citation. \
         Reason was: The field should not be empty."
    );
}

#[test]
fn message_with_parent_and_position() {
    let e = error(Some("author"), Some(2), FieldErrorKind::ControlledVocabulary);
    assert_eq!(
        e.to_string(),
        "There was an error when validating the field authorName from metadata block citation \
         with parent field author in position 2. \
         Reason was: The field does not have a valid controlled vocabulary value."
    );
}

#[test]
fn position_zero_is_rendered() {
    let e = error(Some("author"), Some(0), FieldErrorKind::EmptyField);
    assert!(e.to_string().contains(" in position 0."), "{}", e);
}

#[test]
fn date_reason_names_accepted_formats() {
    let e = error(
        None,
        None,
        FieldErrorKind::DateFormat {
            accepted: "YYYY-MM-DD".to_string(),
        },
    );
    assert_eq!(e.reason(), "The field requires a valid date format (YYYY-MM-DD).");
}

#[test]
fn shape_reasons() {
    let cases = [
        (ShapeMismatch::ExpectedArray, "Expecting an array of values."),
        (
            ShapeMismatch::ExpectedChildFieldArray,
            "Expecting an array of child fields, not strings.",
        ),
        (
            ShapeMismatch::ExpectedStringArray,
            "Expecting an array of strings, not child fields.",
        ),
        (ShapeMismatch::InvalidArray, "The provided array of values is not valid."),
        (
            ShapeMismatch::ExpectedSingleField,
            "Expecting a single field, not an array.",
        ),
        (ShapeMismatch::ExpectedString, "Expecting a string, not child fields."),
        (ShapeMismatch::ExpectedChildFields, "Expecting child fields, not a string."),
    ];
    for (mismatch, reason) in cases {
        let e = error(None, None, FieldErrorKind::Shape(mismatch));
        assert_eq!(e.shape(), Some(mismatch));
        assert!(e.to_string().ends_with(&format!("Reason was: {}", reason)), "{}", e);
    }
}

#[test]
fn validation_error_display_is_transparent() {
    let field = error(None, None, FieldErrorKind::EmptyField);
    let wrapped = ValidationError::from(field.clone());
    assert_eq!(wrapped.to_string(), field.to_string());
    assert_eq!(wrapped.as_field(), Some(&field));

    let read = ValidationError::from(ReadError::new("metadata block geo not found"));
    assert_eq!(
        read.to_string(),
        "There was an error when reading the resource. Reason was: metadata block geo not found"
    );
    assert_eq!(read.as_field(), None);
}

#[test]
fn field_error_serializes_structurally() {
    let e = error(Some("author"), Some(1), FieldErrorKind::Shape(ShapeMismatch::InvalidArray));
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["field"], "authorName");
    assert_eq!(json["parent_field"], "author");
    assert_eq!(json["position"], 1);
    assert_eq!(json["kind"]["kind"], "shape");
    assert_eq!(json["kind"]["detail"], "invalid_array");

    let back: FieldValidationError = serde_json::from_value(json).unwrap();
    assert_eq!(back, e);
}
