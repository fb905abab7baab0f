//! Property strategies.
//!
//! Every property of a generated builder is bound to exactly one [`Strategy`]
//! by trying the factories in [`FACTORIES`] in order. The bound strategy then
//! owns every piece of emitted code that touches the property: the builder
//! field and accessors, the Value/Partial fields, merging and clearing.

mod default;
mod list;
mod map;
mod optional;
mod set;


pub use default::{DefaultPropertyFactory, DefaultStrategy};
pub use list::{ListPropertyFactory, ListStrategy};
pub use map::{MapPropertyFactory, MapStrategy};
pub use optional::{OptionalPropertyFactory, OptionalStrategy, OptionalType};
pub use set::{SetPropertyFactory, SetStrategy};
use strum::{Display, EnumIter};

use crate::generator::{
  ast::{Metadata, PrimitiveType, Property, TypeMirror},
  codegen::SourceBuilder,
  converter::TypeUtils,
};

/// Inputs a factory inspects when deciding whether it handles a property.
pub struct PropertyConfig<'a> {
  pub declared_type: &'a TypeMirror,
  pub capitalized_name: &'a str,
  pub has_default: bool,
  pub types: &'a dyn TypeUtils,
}

pub trait StrategyFactory {
  /// Returns `None` when the declared type is not a shape this factory handles.
  fn create(&self, config: &PropertyConfig<'_>) -> Option<Strategy>;
}

/// Factories in priority order. The default factory accepts every type, so
/// it must stay last.
pub const FACTORIES: &[&dyn StrategyFactory] = &[
  &ListPropertyFactory,
  &SetPropertyFactory,
  &MapPropertyFactory,
  &OptionalPropertyFactory,
  &DefaultPropertyFactory,
];

pub fn bind_strategy(config: &PropertyConfig<'_>) -> Strategy {
  FACTORIES
    .iter()
    .find_map(|factory| factory.create(config))
    .unwrap_or_else(|| Strategy::Default(DefaultPropertyFactory::bind(config)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum StrategyKind {
  Default,
  Optional,
  List,
  Set,
  Map,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
  Default(DefaultStrategy),
  Optional(OptionalStrategy),
  List(ListStrategy),
  Set(SetStrategy),
  Map(MapStrategy),
}

impl Strategy {
  pub fn kind(&self) -> StrategyKind {
    match self {
      Self::Default(_) => StrategyKind::Default,
      Self::Optional(_) => StrategyKind::Optional,
      Self::List(_) => StrategyKind::List,
      Self::Set(_) => StrategyKind::Set,
      Self::Map(_) => StrategyKind::Map,
    }
  }

  pub fn as_generator(&self) -> &dyn PropertyCodeGenerator {
    match self {
      Self::Default(strategy) => strategy,
      Self::Optional(strategy) => strategy,
      Self::List(strategy) => strategy,
      Self::Set(strategy) => strategy,
      Self::Map(strategy) => strategy,
    }
  }
}

/// Emission hooks a strategy provides for its property.
///
/// Builder-level code is emitted at two-space indentation, Value and Partial
/// members at four, and statements inside their bodies at six.
pub trait PropertyCodeGenerator {
  /// Whether the property starts unset and must be set before `build()`.
  fn tracks_unset(&self) -> bool {
    false
  }

  fn add_builder_field_declaration(&self, code: &mut SourceBuilder, property: &Property);

  fn add_builder_field_accessors(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata);

  /// Type of the field holding the property in the Value and Partial classes.
  fn value_field_type(&self, property: &Property) -> TypeMirror {
    property.declared_type.clone()
  }

  /// Whether the Value field may legitimately hold `null`.
  fn value_field_nullable(&self) -> bool {
    false
  }

  fn add_value_field_declaration(&self, code: &mut SourceBuilder, property: &Property) {
    code.add_line(
      "    private final %s %s;",
      &[&self.value_field_type(property), &property.name],
    );
  }

  fn add_final_field_assignment(&self, code: &mut SourceBuilder, property: &Property, final_field: &str, builder: &str) {
    code.add_line("      %s = %s.%s;", &[&final_field, &builder, &property.name]);
  }

  fn add_partial_field_assignment(
    &self,
    code: &mut SourceBuilder,
    property: &Property,
    final_field: &str,
    builder: &str,
  ) {
    self.add_final_field_assignment(code, property, final_field, builder);
  }

  /// The body of the Value and Partial getter, after any unset check.
  fn add_value_getter_body(&self, code: &mut SourceBuilder, property: &Property) {
    code.add_line("      return %s;", &[&property.name]);
  }

  fn add_merge_from_value(&self, code: &mut SourceBuilder, property: &Property, value: &str);

  fn add_merge_from_builder(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata, builder: &str);

  /// Replays a deserialized field value onto a fresh builder.
  fn add_set_from_result(&self, code: &mut SourceBuilder, property: &Property, builder: &str, variable: &str);

  /// Whether `clear()` needs a freshly constructed builder to copy from.
  fn is_template_required_in_clear(&self) -> bool;

  fn add_clear(&self, code: &mut SourceBuilder, property: &Property, template: &str);

  fn add_partial_clear(&self, code: &mut SourceBuilder, property: &Property);
}

/// Unboxed counterpart of `element`, if it has one.
pub(crate) fn unboxed(types: &dyn TypeUtils, element: &TypeMirror) -> Option<PrimitiveType> {
  types.unboxed_type(element).ok()
}

/// The first type argument of `declared_type`, resolved to its upper bound.
/// Raw types are treated as collections of `Object`.
pub(crate) fn type_argument(types: &dyn TypeUtils, declared_type: &TypeMirror, index: usize) -> TypeMirror {
  declared_type.type_arguments().get(index).map_or_else(
    || TypeMirror::class(crate::generator::ast::known_types::OBJECT.clone()),
    |argument| types.upper_bound(argument),
  )
}

/// `unboxed` when present, otherwise `element`.
pub(crate) fn element_or_unboxed(element: &TypeMirror, unboxed: Option<PrimitiveType>) -> TypeMirror {
  unboxed.map_or_else(|| element.clone(), TypeMirror::Primitive)
}
