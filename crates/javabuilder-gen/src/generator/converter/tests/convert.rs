use crate::{
  generator::{
    ast::{BuilderFactory, MetadataError, TypeParser},
    converter::{ConversionError, ConversionOutput, MetadataConverter},
    metrics::GenerationWarning,
    strategy::StrategyKind,
  },
  utils::{DeclarationFile, TypeDeclaration},
};

fn declaration(json: &str) -> TypeDeclaration {
  let file = DeclarationFile::from_json(format!(r#"{{"types": [{json}]}}"#).as_bytes()).unwrap();
  file.types.into_iter().next().unwrap()
}

fn convert(json: &str) -> Result<ConversionOutput, ConversionError> {
  MetadataConverter::default().convert(&declaration(json))
}

#[test]
fn test_convert_defaults() {
  let output = convert(
    r#"{"name": "com.example.Person", "properties": [
      {"getter": "getName", "type": "String"},
      {"getter": "isActive", "type": "boolean", "has_default": true}
    ]}"#,
  )
  .unwrap();
  assert!(output.warnings.is_empty());

  let metadata = output.metadata;
  assert_eq!(metadata.builder_type().qualified_name(), "com.example.Person.Builder");
  assert_eq!(metadata.builder_factory(), Some(BuilderFactory::NoArgsConstructor));
  assert!(!metadata.interface_type());
  assert!(!metadata.gwt_compatible());

  let properties = metadata.properties();
  assert_eq!(properties[0].name, "name");
  assert_eq!(properties[0].capitalized_name, "Name");
  assert_eq!(properties[0].all_caps_name, "NAME");
  assert_eq!(properties[0].getter_name, "getName");
  assert_eq!(properties[0].boxed_type, properties[0].declared_type);
  assert!(properties[0].tracks_unset());
  assert_eq!(properties[1].name, "active");
  assert_eq!(properties[1].boxed_type.to_string(), "java.lang.Boolean");
  assert!(!properties[1].tracks_unset());
}

#[test]
fn test_convert_builder_options() {
  let metadata = convert(
    r#"{"name": "com.example.Shape", "kind": "interface",
        "builder": {"name": "Factory", "factory": "new_builder_method", "serializable": true}}"#,
  )
  .unwrap()
  .metadata;
  assert!(metadata.interface_type());
  assert!(metadata.builder_serializable());
  assert_eq!(metadata.builder_type().nested_path(), "Shape.Factory");
  assert_eq!(metadata.new_builder_expression().as_deref(), Some("Shape.newBuilder()"));
}

#[test]
fn test_imports_resolve_property_types() {
  let metadata = convert(
    r#"{"name": "com.example.Person",
        "imports": ["java.util.List", "com.google.common.base.Optional"],
        "properties": [
          {"getter": "getTags", "type": "List<String>"},
          {"getter": "getNickname", "type": "Optional<String>"},
          {"getter": "getAddress", "type": "Address"}
        ]}"#,
  )
  .unwrap()
  .metadata;
  let kinds = metadata
    .properties()
    .iter()
    .map(|property| property.strategy.kind())
    .collect::<Vec<_>>();
  assert_eq!(kinds, vec![StrategyKind::List, StrategyKind::Optional, StrategyKind::Default]);
  assert_eq!(metadata.properties()[2].declared_type.to_string(), "com.example.Address");
}

#[test]
fn test_fully_checked_cast_follows_value_field_type() {
  let metadata = convert(
    r#"{"name": "com.example.Person", "properties": [
      {"getter": "getName", "type": "String"},
      {"getter": "getTags", "type": "java.util.List<String>"},
      {"getter": "getNickname", "type": "java.util.Optional<String>"},
      {"getter": "getScores", "type": "int[]"}
    ]}"#,
  )
  .unwrap()
  .metadata;
  let checked = metadata
    .properties()
    .iter()
    .map(|property| property.fully_checked_cast)
    .collect::<Vec<_>>();
  assert_eq!(checked, vec![true, false, true, true]);
}

#[test]
fn test_gwt_serializable_without_factory_is_downgraded() {
  let output = convert(r#"{"name": "com.example.Person", "builder": {"factory": null}, "gwt_serializable": true}"#).unwrap();
  assert!(!output.metadata.gwt_serializable());
  assert!(!output.metadata.gwt_compatible());
  assert_eq!(
    output.warnings,
    vec![GenerationWarning::GwtSerializationDisabled {
      type_name: "com.example.Person".to_string(),
    }]
  );
}

#[test]
fn test_gwt_serializable_implies_compatible() {
  let metadata = convert(r#"{"name": "com.example.Person", "gwt_serializable": true}"#)
    .unwrap()
    .metadata;
  assert!(metadata.gwt_serializable());
  assert!(metadata.gwt_compatible());
}

#[test]
fn test_invalid_type_name() {
  let error = convert(r#"{"name": "com.example..Person"}"#).unwrap_err();
  assert!(matches!(error, ConversionError::InvalidTypeName { .. }));
  assert_eq!(error.to_string(), "'com.example..Person' is not a valid type name");
}

#[test]
fn test_invalid_builder_name() {
  let error = convert(r#"{"name": "com.example.Person", "builder": {"name": "My Builder"}}"#).unwrap_err();
  assert!(matches!(error, ConversionError::InvalidBuilderName { .. }));
}

#[test]
fn test_invalid_import() {
  let error = convert(r#"{"name": "com.example.Person", "imports": ["java.util."]}"#).unwrap_err();
  assert!(matches!(error, ConversionError::InvalidImport { .. }));
}

#[test]
fn test_invalid_getter() {
  let error = convert(r#"{"name": "com.example.Person", "properties": [{"getter": "get-name", "type": "String"}]}"#)
    .unwrap_err();
  assert!(matches!(error, ConversionError::InvalidGetter { .. }));
  assert_eq!(error.to_string(), "getter 'get-name' is not a valid Java identifier");
}

#[test]
fn test_invalid_property_type() {
  let error = convert(
    r#"{"name": "com.example.Person", "properties": [{"getter": "getScores", "type": "java.util.List<int>"}]}"#,
  )
  .unwrap_err();
  let ConversionError::InvalidPropertyType { getter, source } = error else {
    panic!("expected an invalid property type");
  };
  assert_eq!(getter, "getScores");
  assert_eq!(TypeParser::new("").parse("java.util.List<int>").unwrap_err(), source);
}

#[test]
fn test_duplicate_property_names() {
  let error = convert(
    r#"{"name": "com.example.Person", "properties": [
      {"getter": "getName", "type": "String"},
      {"getter": "getName", "type": "String"}
    ]}"#,
  )
  .unwrap_err();
  assert_eq!(error.to_string(), "duplicate property 'name' on com.example.Person");
}

#[test]
fn test_property_constant_collision() {
  let error = convert(
    r#"{"name": "com.example.Person", "properties": [
      {"getter": "getUrl", "type": "String"},
      {"getter": "getURL", "type": "String"},
      {"getter": "getAddress2", "type": "String"}
    ]}"#,
  )
  .unwrap_err();
  assert!(matches!(
    error,
    ConversionError::Metadata(MetadataError::DuplicatePropertyConstant { .. })
  ));
  assert_eq!(
    error.to_string(),
    "properties 'url' and 'URL' of com.example.Person both map to the constant URL"
  );
}
