use std::{collections::HashSet, path::PathBuf};

use crate::{
  generator::{
    codegen::SourceLevel,
    metrics::GenerationWarning,
    orchestrator::{CodegenConfig, Orchestrator},
  },
  utils::DeclarationFile,
};

const DECLARATIONS: &str = r#"{"types": [
  {"name": "com.example.Person", "properties": [
    {"getter": "getName", "type": "String"},
    {"getter": "getAge", "type": "int", "has_default": true},
    {"getter": "getTags", "type": "java.util.List<String>"}
  ]},
  {"name": "com.example.geo.Address", "gwt_serializable": true, "properties": [
    {"getter": "getStreet", "type": "String"},
    {"getter": "getLines", "type": "java.util.Map<Integer, String>"}
  ]},
  {"name": "Outer.Inner", "properties": []}
]}"#;

fn orchestrator(json: &str, only: Option<&[&str]>) -> Orchestrator {
  let declarations = DeclarationFile::from_json(json.as_bytes()).unwrap();
  let only = only.map(|names| names.iter().map(ToString::to_string).collect::<HashSet<_>>());
  Orchestrator::new(declarations, CodegenConfig::builder().build(), only)
}

#[test]
fn test_generate_one_file_per_type() {
  let output = orchestrator(DECLARATIONS, None).generate().unwrap();

  let paths = output.files.iter().map(|file| file.path.clone()).collect::<Vec<_>>();
  assert_eq!(
    paths,
    vec![
      PathBuf::from("com/example/Person_Builder.java"),
      PathBuf::from("com/example/geo/Address_Builder.java"),
      PathBuf::from("Outer_Inner_Builder.java"),
    ]
  );
  assert_eq!(output.files[0].type_name, "com.example.Person");
  assert!(output.files[0].code.starts_with("package com.example;\n"));
  assert!(!output.files[2].code.starts_with("package"));
}

#[test]
fn test_generate_records_statistics() {
  let stats = orchestrator(DECLARATIONS, None).generate().unwrap().stats;

  assert_eq!(stats.types_declared, 3);
  assert_eq!(stats.types_generated, 3);
  assert_eq!(stats.types_filtered, 0);
  assert_eq!(stats.properties_generated, 5);
  assert_eq!(stats.required_properties, 2);
  assert_eq!(stats.gwt_serializers_generated, 1);
  assert_eq!(stats.strategies.get("Default"), Some(&3));
  assert_eq!(stats.strategies.get("List"), Some(&1));
  assert_eq!(stats.strategies.get("Map"), Some(&1));
  assert_eq!(stats.strategies.get("Set"), None);
  assert!(stats.warnings.is_empty());
}

#[test]
fn test_only_matches_simple_and_qualified_names() {
  let output = orchestrator(DECLARATIONS, Some(&["Person", "com.example.geo.Address"]))
    .generate()
    .unwrap();
  assert_eq!(output.files.len(), 2);
  assert_eq!(output.stats.types_filtered, 1);
  assert!(output.stats.warnings.is_empty());
}

#[test]
fn test_only_warns_about_unknown_names() {
  let output = orchestrator(DECLARATIONS, Some(&["Person", "Missing"])).generate().unwrap();
  assert_eq!(output.files.len(), 1);
  assert_eq!(output.stats.types_filtered, 2);
  assert_eq!(
    output.stats.warnings,
    vec![GenerationWarning::UnknownOnlyType {
      type_name: "Missing".to_string(),
    }]
  );
  assert_eq!(output.stats.types_skipped(), 0);
}

#[test]
fn test_only_name_suffix_selects_nothing_and_warns() {
  let output = orchestrator(DECLARATIONS, Some(&["example.Person"])).generate().unwrap();
  assert!(output.files.is_empty());
  assert_eq!(output.stats.types_filtered, 3);
  assert_eq!(
    output.stats.warnings,
    vec![GenerationWarning::UnknownOnlyType {
      type_name: "example.Person".to_string(),
    }]
  );
}

#[test]
fn test_failed_type_does_not_stop_generation() {
  let output = orchestrator(
    r#"{"types": [
      {"name": "com.example.Broken", "properties": [{"getter": "getValue", "type": "java.util.List<"}]},
      {"name": "com.example.Person", "properties": [{"getter": "getName", "type": "String"}]}
    ]}"#,
    None,
  )
  .generate()
  .unwrap();

  assert_eq!(output.files.len(), 1);
  assert_eq!(output.files[0].type_name, "com.example.Person");
  assert_eq!(output.stats.types_skipped(), 1);
  let GenerationWarning::TypeConversionFailed { type_name, error } = &output.stats.warnings[0] else {
    panic!("expected a conversion failure");
  };
  assert_eq!(type_name, "com.example.Broken");
  assert_eq!(error, "getter 'getValue' has an invalid type");
}

#[test]
fn test_gwt_downgrade_is_reported() {
  let output = orchestrator(
    r#"{"types": [{"name": "com.example.Person", "gwt_serializable": true, "builder": {"factory": null}}]}"#,
    None,
  )
  .generate()
  .unwrap();

  assert_eq!(output.files.len(), 1);
  assert_eq!(output.stats.gwt_serializers_generated, 0);
  assert_eq!(output.stats.types_skipped(), 0);
  assert!(matches!(
    output.stats.warnings.as_slice(),
    [GenerationWarning::GwtSerializationDisabled { .. }]
  ));
}

#[test]
fn test_generate_with_header_prefixes_banner() {
  let output = orchestrator(DECLARATIONS, Some(&["Person"]))
    .generate_with_header("types.json")
    .unwrap();
  let code = &output.files[0].code;
  assert!(code.starts_with(
    "// AUTO-GENERATED CODE - DO NOT EDIT!\n// Source: types.json\n// Generated by `javabuilder-gen`\n\npackage com.example;\n"
  ));
}

#[test]
fn test_source_level_reaches_generated_code() {
  let declarations = DeclarationFile::from_json(DECLARATIONS.as_bytes()).unwrap();
  let only = Some(HashSet::from(["Person".to_string()]));

  let java6 = Orchestrator::new(declarations.clone(), CodegenConfig::builder().build(), only.clone())
    .generate()
    .unwrap();
  let java7 = Orchestrator::new(
    declarations,
    CodegenConfig::builder().source_level(SourceLevel::Java7).build(),
    only,
  )
  .generate()
  .unwrap();

  assert!(java6.files[0].code.contains("new ArrayList<String>()"));
  assert!(java7.files[0].code.contains("new ArrayList<>()"));
}

#[test]
fn test_custom_generator_name() {
  let declarations = DeclarationFile::from_json(DECLARATIONS.as_bytes()).unwrap();
  let config = CodegenConfig::builder().generator_name("acme-builders").build();
  let output = Orchestrator::new(declarations, config, Some(HashSet::from(["Inner".to_string()])))
    .generate_with_header("types.json")
    .unwrap();
  let code = &output.files[0].code;
  assert!(code.contains("// Generated by `acme-builders`\n"));
  assert!(code.contains("@Generated(\"acme-builders\")"));
}

#[test]
fn test_generation_is_deterministic() {
  let first = orchestrator(DECLARATIONS, None).generate().unwrap();
  let second = orchestrator(DECLARATIONS, None).generate().unwrap();
  assert_eq!(first.files, second.files);
}
