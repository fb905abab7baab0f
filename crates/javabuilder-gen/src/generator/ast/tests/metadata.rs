use crate::{
  generator::ast::{BuilderFactory, ClassName, Metadata, MetadataError},
  tests::common::{default_property, name_and_age, person, string_type},
};

#[test]
fn test_derived_class_names() {
  let metadata = Metadata::builder().target(person()).build().unwrap();

  assert_eq!(metadata.builder_type().qualified_name(), "com.example.Person.Builder");
  assert_eq!(metadata.generated_builder().qualified_name(), "com.example.Person_Builder");
  assert_eq!(metadata.value_type().nested_path(), "Person_Builder.Value");
  assert_eq!(metadata.partial_type().nested_path(), "Person_Builder.Partial");
  assert_eq!(metadata.property_enum().nested_path(), "Person_Builder.Property");
  assert_eq!(metadata.builder_factory(), None);
  assert!(!metadata.interface_type());
  assert!(!metadata.has_unset_properties());
}

#[test]
fn test_nested_target_flattens_generated_name() {
  let target = ClassName::top_level("com.example", "Outer").nested("Person");
  let metadata = Metadata::builder().target(target).build().unwrap();

  assert_eq!(metadata.generated_builder().qualified_name(), "com.example.Outer_Person_Builder");
  assert_eq!(metadata.builder_type().nested_path(), "Outer.Person.Builder");
}

#[test]
fn test_tracked_properties() {
  let required = Metadata::builder()
    .target(person())
    .properties(name_and_age(false))
    .build()
    .unwrap();
  assert_eq!(required.tracked_properties().count(), 2);
  assert!(required.has_unset_properties());
  assert!(!required.has_optional_properties());

  let defaulted = Metadata::builder()
    .target(person())
    .properties(name_and_age(true))
    .build()
    .unwrap();
  assert_eq!(defaulted.tracked_properties().count(), 0);
}

#[test]
fn test_duplicate_property_rejected() {
  let mut properties = name_and_age(false);
  properties.push(properties[0].clone());

  let error = Metadata::builder()
    .target(person())
    .properties(properties)
    .build()
    .unwrap_err();
  assert_eq!(
    error,
    MetadataError::DuplicateProperty {
      type_name: "com.example.Person".to_string(),
      name: "name".to_string(),
    }
  );
  assert_eq!(error.to_string(), "duplicate property 'name' on com.example.Person");
}

#[test]
fn test_colliding_property_constants_rejected() {
  let properties = vec![
    default_property("url", string_type(), string_type(), false),
    default_property("URL", string_type(), string_type(), false),
  ];
  let error = Metadata::builder()
    .target(person())
    .properties(properties)
    .build()
    .unwrap_err();
  assert_eq!(
    error,
    MetadataError::DuplicatePropertyConstant {
      type_name: "com.example.Person".to_string(),
      constant: "URL".to_string(),
      first: "url".to_string(),
      second: "URL".to_string(),
    }
  );
  assert_eq!(
    error.to_string(),
    "properties 'url' and 'URL' of com.example.Person both map to the constant URL"
  );
}

#[test]
fn test_colliding_constants_allowed_without_unset_tracking() {
  let properties = vec![
    default_property("url", string_type(), string_type(), true),
    default_property("URL", string_type(), string_type(), true),
  ];
  let metadata = Metadata::builder()
    .target(person())
    .properties(properties)
    .build()
    .unwrap();
  assert_eq!(metadata.properties().len(), 2);
}

#[test]
fn test_gwt_serializable_requires_factory() {
  let error = Metadata::builder()
    .target(person())
    .gwt_serializable(true)
    .build()
    .unwrap_err();
  assert!(matches!(error, MetadataError::GwtSerializableWithoutFactory { .. }));
}

#[test]
fn test_new_builder_expressions() {
  let builder = person().nested("Builder");
  assert_eq!(
    BuilderFactory::NoArgsConstructor.new_builder_expression(&builder, &person()),
    "new Person.Builder()"
  );
  assert_eq!(
    BuilderFactory::BuilderMethod.new_builder_expression(&builder, &person()),
    "Person.builder()"
  );
  assert_eq!(
    BuilderFactory::NewBuilderMethod.new_builder_expression(&builder, &person()),
    "Person.newBuilder()"
  );

  let metadata = Metadata::builder()
    .target(person())
    .builder_factory(BuilderFactory::BuilderMethod)
    .build()
    .unwrap();
  assert_eq!(metadata.new_builder_expression().as_deref(), Some("Person.builder()"));
}

#[test]
fn test_builder_factory_from_json() {
  let factories: Vec<BuilderFactory> =
    serde_json::from_str(r#"["no_args_constructor", "builder_method", "new_builder_method"]"#).unwrap();
  assert_eq!(
    factories,
    vec![
      BuilderFactory::NoArgsConstructor,
      BuilderFactory::BuilderMethod,
      BuilderFactory::NewBuilderMethod,
    ]
  );
}
