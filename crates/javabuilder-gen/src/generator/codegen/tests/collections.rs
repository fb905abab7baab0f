use crate::{
  generator::{
    ast::{PrimitiveType, TypeMirror, known_types},
    codegen::{CodeGenerator, SourceBuilder, SourceLevel},
    strategy::{ListStrategy, MapStrategy, SetStrategy, Strategy},
  },
  tests::common::{integer_type, list_of, person_metadata, property, simple_source, string_type},
};

fn set_of(element: TypeMirror) -> TypeMirror {
  TypeMirror::generic(known_types::SET.clone(), vec![element])
}

fn map_of(key: TypeMirror, value: TypeMirror) -> TypeMirror {
  TypeMirror::generic(known_types::MAP.clone(), vec![key, value])
}

fn tags_property() -> crate::generator::ast::Property {
  let strategy = Strategy::Set(SetStrategy {
    element_type: string_type(),
    unboxed_type: None,
  });
  property("tags", set_of(string_type()), set_of(string_type()), strategy)
}

fn scores_property() -> crate::generator::ast::Property {
  let strategy = Strategy::Map(MapStrategy {
    key_type: string_type(),
    value_type: integer_type(),
    unboxed_key_type: None,
    unboxed_value_type: Some(PrimitiveType::Int),
  });
  let declared = map_of(string_type(), integer_type());
  property("scores", declared.clone(), declared, strategy)
}

#[test]
fn test_set_property_builder_api() {
  let source = simple_source(&person_metadata(vec![tags_property()]));

  assert!(source.contains("  private LinkedHashSet<String> tags = new LinkedHashSet<String>();\n"));
  assert!(source.contains(
    "  public Person.Builder addTags(String element) {\n    this.tags.add(Preconditions.checkNotNull(element));\n"
  ));
  assert!(source.contains("  public Person.Builder addTags(String... elements) {\n"));
  assert!(source.contains("  public Person.Builder addAllTags(Iterable<? extends String> elements) {\n"));
  assert!(source.contains(
    "  public Person.Builder removeTags(String element) {\n    this.tags.remove(Preconditions.checkNotNull(element));\n"
  ));
  assert!(source.contains("  public Set<String> getTags() {\n    return Collections.unmodifiableSet(tags);\n"));
  assert!(source.contains("      this.tags = ImmutableSet.copyOf(builder.tags);\n"));
  assert!(source.contains("    addAllTags(((Person_Builder) template).tags);\n"));
}

#[test]
fn test_set_property_never_tracks_unset() {
  let source = simple_source(&person_metadata(vec![tags_property()]));

  assert!(!source.contains("_unsetProperties"));
  assert!(!source.contains("private enum Property"));
  assert!(source.contains("  public Person.Builder clear() {\n    tags.clear();\n    return (Person.Builder) this;\n"));
}

#[test]
fn test_map_property_builder_api() {
  let source = simple_source(&person_metadata(vec![scores_property()]));

  assert!(source.contains("  private LinkedHashMap<String, Integer> scores = new LinkedHashMap<String, Integer>();\n"));
  assert!(source.contains(
    "   * @throws NullPointerException if {@code key} is null\n   */\n  public Person.Builder putScores(String key, int value) {\n    Preconditions.checkNotNull(key);\n    this.scores.put(key, value);\n"
  ));
  assert!(source.contains(
    "  public Person.Builder putAllScores(Map<? extends String, ? extends Integer> map) {\n    for (Map.Entry<? extends String, ? extends Integer> entry : map.entrySet()) {\n      putScores(entry.getKey(), entry.getValue());\n"
  ));
  assert!(source.contains("  public Person.Builder removeScores(String key) {\n"));
  assert!(source.contains("  public Person.Builder clearScores() {\n"));
  assert!(source.contains("  public Map<String, Integer> getScores() {\n    return Collections.unmodifiableMap(scores);\n"));
  assert!(source.contains("      this.scores = ImmutableMap.copyOf(builder.scores);\n"));
  assert!(source.contains("    putAllScores(value.getScores());\n"));
}

#[test]
fn test_java7_uses_diamond_operator() {
  let names = Strategy::List(ListStrategy {
    element_type: string_type(),
    unboxed_type: None,
  });
  let metadata = person_metadata(vec![
    property("names", list_of(string_type()), list_of(string_type()), names),
    tags_property(),
    scores_property(),
  ]);

  let mut code = SourceBuilder::simple().with_source_level(SourceLevel::Java7);
  CodeGenerator::default().write_builder_source(&mut code, &metadata).unwrap();
  let source = code.finish().unwrap();

  assert!(source.contains("  private ArrayList<String> names = new ArrayList<>();\n"));
  assert!(source.contains("  private LinkedHashSet<String> tags = new LinkedHashSet<>();\n"));
  assert!(source.contains("  private LinkedHashMap<String, Integer> scores = new LinkedHashMap<>();\n"));
}

#[test]
fn test_collection_properties_skip_clear_template() {
  let source = simple_source(&person_metadata(vec![tags_property(), scores_property()]));
  assert!(!source.contains("template = new Person.Builder()"));
}
