use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use strum::{Display, EnumIter};

use super::{ClassName, Property};
use crate::generator::strategy::StrategyKind;

const VALUE_CLASS: &str = "Value";
const PARTIAL_CLASS: &str = "Partial";
const PROPERTY_ENUM: &str = "Property";

/// How a fresh user-visible builder is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderFactory {
  #[strum(to_string = "new Builder()")]
  NoArgsConstructor,
  #[strum(to_string = "builder()")]
  BuilderMethod,
  #[strum(to_string = "newBuilder()")]
  NewBuilderMethod,
}

impl BuilderFactory {
  /// Java expression creating a new builder, e.g. `new Person.Builder()`.
  pub fn new_builder_expression(self, builder: &ClassName, target: &ClassName) -> String {
    match self {
      Self::NoArgsConstructor => format!("new {}()", builder.nested_path()),
      Self::BuilderMethod => format!("{}.builder()", target.nested_path()),
      Self::NewBuilderMethod => format!("{}.newBuilder()", target.nested_path()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MetadataError {
  #[strum(to_string = "duplicate property '{name}' on {type_name}")]
  DuplicateProperty { type_name: String, name: String },
  #[strum(to_string = "properties '{first}' and '{second}' of {type_name} both map to the constant {constant}")]
  DuplicatePropertyConstant {
    type_name: String,
    constant: String,
    first: String,
    second: String,
  },
  #[strum(to_string = "{type_name} requests GWT serialization but has no builder factory")]
  GwtSerializableWithoutFactory { type_name: String },
}

impl std::error::Error for MetadataError {}

/// Everything the code generator needs to know about one target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
  target: ClassName,
  interface_type: bool,
  builder_type: ClassName,
  builder_factory: Option<BuilderFactory>,
  generated_builder: ClassName,
  value_type: ClassName,
  partial_type: ClassName,
  property_enum: ClassName,
  properties: Vec<Property>,
  builder_serializable: bool,
  gwt_compatible: bool,
  gwt_serializable: bool,
}

#[bon::bon]
impl Metadata {
  /// The builder class defaults to `<Target>.Builder` and the generated
  /// superclass to `<Outer_Target>_Builder` in the target's package.
  #[builder]
  pub fn new(
    target: ClassName,
    #[builder(default)] interface_type: bool,
    builder_type: Option<ClassName>,
    builder_factory: Option<BuilderFactory>,
    generated_builder: Option<ClassName>,
    #[builder(default)] properties: Vec<Property>,
    #[builder(default)] builder_serializable: bool,
    #[builder(default)] gwt_compatible: bool,
    #[builder(default)] gwt_serializable: bool,
  ) -> Result<Self, MetadataError> {
    let mut seen = HashSet::new();
    if let Some(duplicate) = properties.iter().find(|property| !seen.insert(property.name.as_str())) {
      return Err(MetadataError::DuplicateProperty {
        type_name: target.qualified_name(),
        name: duplicate.name.clone(),
      });
    }
    // Only tracked properties get a constant in the generated enum.
    let mut constants = HashMap::new();
    for property in properties.iter().filter(|property| property.tracks_unset()) {
      if let Some(first) = constants.insert(property.all_caps_name.as_str(), property.name.as_str()) {
        return Err(MetadataError::DuplicatePropertyConstant {
          type_name: target.qualified_name(),
          constant: property.all_caps_name.clone(),
          first: first.to_string(),
          second: property.name.clone(),
        });
      }
    }
    if gwt_serializable && builder_factory.is_none() {
      return Err(MetadataError::GwtSerializableWithoutFactory {
        type_name: target.qualified_name(),
      });
    }

    let generated_builder = generated_builder
      .unwrap_or_else(|| ClassName::top_level(target.package(), format!("{}_Builder", target.flat_name())));
    Ok(Self {
      builder_type: builder_type.unwrap_or_else(|| target.nested("Builder")),
      value_type: generated_builder.nested(VALUE_CLASS),
      partial_type: generated_builder.nested(PARTIAL_CLASS),
      property_enum: generated_builder.nested(PROPERTY_ENUM),
      generated_builder,
      target,
      interface_type,
      builder_factory,
      properties,
      builder_serializable,
      gwt_compatible,
      gwt_serializable,
    })
  }
}

impl Metadata {
  pub fn target(&self) -> &ClassName {
    &self.target
  }

  pub fn interface_type(&self) -> bool {
    self.interface_type
  }

  pub fn builder_type(&self) -> &ClassName {
    &self.builder_type
  }

  pub fn builder_factory(&self) -> Option<BuilderFactory> {
    self.builder_factory
  }

  pub fn generated_builder(&self) -> &ClassName {
    &self.generated_builder
  }

  pub fn value_type(&self) -> &ClassName {
    &self.value_type
  }

  pub fn partial_type(&self) -> &ClassName {
    &self.partial_type
  }

  pub fn property_enum(&self) -> &ClassName {
    &self.property_enum
  }

  pub fn properties(&self) -> &[Property] {
    &self.properties
  }

  pub fn builder_serializable(&self) -> bool {
    self.builder_serializable
  }

  pub fn gwt_compatible(&self) -> bool {
    self.gwt_compatible
  }

  pub fn gwt_serializable(&self) -> bool {
    self.gwt_serializable
  }

  /// Properties that start unset and are listed in the generated enum.
  pub fn tracked_properties(&self) -> impl Iterator<Item = &Property> {
    self.properties.iter().filter(|property| property.tracks_unset())
  }

  pub fn has_unset_properties(&self) -> bool {
    self.tracked_properties().next().is_some()
  }

  pub fn has_optional_properties(&self) -> bool {
    self
      .properties
      .iter()
      .any(|property| property.strategy.kind() == StrategyKind::Optional)
  }

  /// `preferred`, prefixed with underscores until no property field of the
  /// same name would shadow or be shadowed by a local in generated code.
  pub fn local_name(&self, preferred: &str) -> String {
    let mut name = preferred.to_string();
    while self.properties.iter().any(|property| property.name == name) {
      name.insert(0, '_');
    }
    name
  }

  /// `new Person.Builder()` or the equivalent static factory call.
  pub fn new_builder_expression(&self) -> Option<String> {
    self
      .builder_factory
      .map(|factory| factory.new_builder_expression(&self.builder_type, &self.target))
  }
}
