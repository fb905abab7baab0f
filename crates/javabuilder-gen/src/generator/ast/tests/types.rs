use crate::generator::ast::{
  ClassName, PrimitiveType, TypeMirror, TypeParseError, TypeParser, WildcardBound, is_java_identifier, known_types,
};

fn parser() -> TypeParser {
  TypeParser::new("com.example")
}

#[test]
fn test_class_name_parse_splits_package() {
  let entry = ClassName::parse("java.util.Map.Entry").unwrap();
  assert_eq!(entry.package(), "java.util");
  assert_eq!(entry.simple_names(), ["Map", "Entry"]);
  assert_eq!(entry.simple_name(), "Entry");
  assert_eq!(entry.top_level_class(), *known_types::MAP);
  assert_eq!(entry.qualified_name(), "java.util.Map.Entry");
  assert_eq!(entry, *known_types::MAP_ENTRY);
}

#[test]
fn test_class_name_parse_lowercase_only() {
  let class = ClassName::parse("com.example.thing").unwrap();
  assert_eq!(class.package(), "com.example");
  assert_eq!(class.simple_name(), "thing");
}

#[test]
fn test_class_name_parse_rejects_bad_segments() {
  assert!(ClassName::parse("com..Person").is_err());
  assert!(ClassName::parse("com.example.9Lives").is_err());
  assert!(ClassName::parse("").is_err());
}

#[test]
fn test_flat_and_nested_names() {
  let inner = ClassName::top_level("com.example", "Outer").nested("Person");
  assert_eq!(inner.flat_name(), "Outer_Person");
  assert_eq!(inner.nested_path(), "Outer.Person");
  assert_eq!(inner.to_string(), "com.example.Outer.Person");
}

#[test]
fn test_default_package_qualified_name() {
  let class = ClassName::top_level("", "Person");
  assert_eq!(class.qualified_name(), "Person");
  assert!(!class.is_java_lang());
}

#[test]
fn test_boxing_table() {
  for primitive in [PrimitiveType::Int, PrimitiveType::Char, PrimitiveType::Boolean] {
    assert_eq!(PrimitiveType::from_boxed(&primitive.boxed_class()), Some(primitive));
  }
  assert_eq!(PrimitiveType::Int.boxed_class().simple_name(), "Integer");
  assert_eq!(PrimitiveType::Char.stream_suffix(), "Char");
  assert_eq!(PrimitiveType::from_boxed(&known_types::OBJECT), None);
}

#[test]
fn test_parse_primitives_and_arrays() {
  assert_eq!(parser().parse("int").unwrap(), TypeMirror::Primitive(PrimitiveType::Int));
  assert_eq!(
    parser().parse("byte[][]").unwrap(),
    TypeMirror::Array(Box::new(TypeMirror::Array(Box::new(PrimitiveType::Byte.into()))))
  );
  assert_eq!(parser().parse("  long ").unwrap(), TypeMirror::from(PrimitiveType::Long));
}

#[test]
fn test_parse_resolves_java_lang_and_package() {
  assert_eq!(
    parser().parse("String").unwrap(),
    TypeMirror::class(ClassName::top_level("java.lang", "String"))
  );
  assert_eq!(
    parser().parse("Address").unwrap(),
    TypeMirror::class(ClassName::top_level("com.example", "Address"))
  );
  assert_eq!(
    parser().parse("Address.Line").unwrap(),
    TypeMirror::class(ClassName::top_level("com.example", "Address").nested("Line"))
  );
}

#[test]
fn test_parse_uses_imports() {
  let parser = parser().with_imports([known_types::LIST.clone(), known_types::MAP.clone()]);
  let parsed = parser.parse("Map<String, List<? extends Number>>").unwrap();
  assert_eq!(parsed.to_string(), "java.util.Map<java.lang.String, java.util.List<? extends java.lang.Number>>");
  assert_eq!(
    parser.parse("Map.Entry<String, ?>").unwrap().type_arguments()[1],
    TypeMirror::Wildcard(WildcardBound::Unbounded)
  );
}

#[test]
fn test_parse_qualified_generic() {
  let parsed = parser().parse("java.util.Set< ? super Integer >").unwrap();
  let declared = parsed.as_declared().unwrap();
  assert_eq!(declared.class, *known_types::SET);
  assert_eq!(
    declared.type_arguments,
    vec![TypeMirror::Wildcard(WildcardBound::Super(Box::new(
      PrimitiveType::Int.boxed_class().into()
    )))]
  );
}

#[test]
fn test_parse_errors() {
  assert_eq!(parser().parse("void"), Err(TypeParseError::Void));
  assert!(matches!(
    parser().parse("List<int>"),
    Err(TypeParseError::PrimitiveTypeArgument {
      primitive: PrimitiveType::Int,
      ..
    })
  ));
  assert!(matches!(parser().parse("List<>"), Err(TypeParseError::EmptyTypeArguments { .. })));
  assert!(matches!(parser().parse("List<String"), Err(TypeParseError::UnexpectedEnd { .. })));
  assert!(matches!(
    parser().parse("String]"),
    Err(TypeParseError::UnexpectedToken { found: ']', .. })
  ));
  assert!(matches!(parser().parse("List<? sup String>"), Err(TypeParseError::UnexpectedToken { .. })));
  assert!(parser().parse("").is_err());
}

#[test]
fn test_java_identifiers() {
  assert!(is_java_identifier("getName"));
  assert!(is_java_identifier("_x$1"));
  assert!(!is_java_identifier("1x"));
  assert!(!is_java_identifier("get-name"));
  assert!(!is_java_identifier(""));
}
