use crate::generator::{
  ast::{BuilderFactory, ClassName, Metadata, PrimitiveType, Property, TypeMirror, known_types},
  codegen::{CodeGenerator, SourceBuilder},
  strategy::{DefaultStrategy, Strategy},
};

pub(crate) fn person() -> ClassName {
  ClassName::top_level("com.example", "Person")
}

pub(crate) fn string_type() -> TypeMirror {
  TypeMirror::class(ClassName::top_level("java.lang", "String"))
}

pub(crate) fn integer_type() -> TypeMirror {
  TypeMirror::class(PrimitiveType::Int.boxed_class())
}

pub(crate) fn list_of(element: TypeMirror) -> TypeMirror {
  TypeMirror::generic(known_types::LIST.clone(), vec![element])
}

/// A property named `name` with getter `get<Name>` and every derived name filled in.
pub(crate) fn property(name: &str, declared_type: TypeMirror, boxed_type: TypeMirror, strategy: Strategy) -> Property {
  let capitalized = format!("{}{}", name[..1].to_uppercase(), &name[1..]);
  Property::builder()
    .name(name)
    .capitalized_name(capitalized.clone())
    .all_caps_name(name.to_uppercase())
    .getter_name(format!("get{capitalized}"))
    .declared_type(declared_type)
    .boxed_type(boxed_type)
    .fully_checked_cast(true)
    .strategy(strategy)
    .build()
}

pub(crate) fn default_property(name: &str, declared_type: TypeMirror, boxed_type: TypeMirror, has_default: bool) -> Property {
  let capitalized = format!("{}{}", name[..1].to_uppercase(), &name[1..]);
  let strategy = Strategy::Default(DefaultStrategy::new(format!("set{capitalized}"), has_default));
  property(name, declared_type, boxed_type, strategy)
}

/// `String name` and `int age`, both required unless `has_default`.
pub(crate) fn name_and_age(has_default: bool) -> Vec<Property> {
  vec![
    default_property("name", string_type(), string_type(), has_default),
    default_property("age", PrimitiveType::Int.into(), integer_type(), has_default),
  ]
}

pub(crate) fn person_metadata(properties: Vec<Property>) -> Metadata {
  Metadata::builder()
    .target(person())
    .builder_factory(BuilderFactory::NoArgsConstructor)
    .properties(properties)
    .build()
    .unwrap()
}

/// Builder source for `metadata` with simple class names and no imports.
pub(crate) fn simple_source(metadata: &Metadata) -> String {
  let mut code = SourceBuilder::simple();
  CodeGenerator::default().write_builder_source(&mut code, metadata).unwrap();
  code.finish().unwrap()
}
