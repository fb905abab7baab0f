//! Turns type declarations into [`Metadata`] ready for code generation.

pub(crate) mod naming;
mod type_utils;

#[cfg(test)]
mod tests;

pub use type_utils::{StandardTypeUtils, TypeUtils};

use crate::{
  generator::{
    ast::{ClassName, Metadata, MetadataError, Property, TypeMirror, TypeParseError, TypeParser, is_java_identifier},
    metrics::GenerationWarning,
    strategy::{PropertyConfig, bind_strategy},
  },
  utils::{PropertyDeclaration, TypeDeclaration, TypeKind},
};

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
  #[error("'{name}' is not a valid type name")]
  InvalidTypeName {
    name: String,
    #[source]
    source: TypeParseError,
  },
  #[error("'{name}' is not a valid import")]
  InvalidImport {
    name: String,
    #[source]
    source: TypeParseError,
  },
  #[error("builder name '{name}' is not a valid Java identifier")]
  InvalidBuilderName { name: String },
  #[error("getter '{getter}' is not a valid Java identifier")]
  InvalidGetter { getter: String },
  #[error("getter '{getter}' has an invalid type")]
  InvalidPropertyType {
    getter: String,
    #[source]
    source: TypeParseError,
  },
  #[error(transparent)]
  Metadata(#[from] MetadataError),
}

#[derive(Debug, Clone)]
pub struct ConversionOutput {
  pub metadata: Metadata,
  pub warnings: Vec<GenerationWarning>,
}

pub struct MetadataConverter<'a> {
  types: &'a dyn TypeUtils,
}

impl Default for MetadataConverter<'static> {
  fn default() -> Self {
    Self::new(&StandardTypeUtils)
  }
}

impl<'a> MetadataConverter<'a> {
  pub fn new(types: &'a dyn TypeUtils) -> Self {
    Self { types }
  }

  pub fn convert(&self, declaration: &TypeDeclaration) -> Result<ConversionOutput, ConversionError> {
    let target = ClassName::parse(&declaration.name).map_err(|source| ConversionError::InvalidTypeName {
      name: declaration.name.clone(),
      source,
    })?;
    let builder = &declaration.builder;
    if !is_java_identifier(&builder.name) {
      return Err(ConversionError::InvalidBuilderName {
        name: builder.name.clone(),
      });
    }

    let imports = declaration
      .imports
      .iter()
      .map(|import| {
        ClassName::parse(import).map_err(|source| ConversionError::InvalidImport {
          name: import.clone(),
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    let parser = TypeParser::new(target.package()).with_imports(imports);

    let declared_types = declaration
      .properties
      .iter()
      .map(|property| Self::parse_property_type(&parser, property))
      .collect::<Result<Vec<_>, _>>()?;
    let getters = declaration
      .properties
      .iter()
      .zip(&declared_types)
      .map(|(property, declared_type)| (property.getter.as_str(), declared_type))
      .collect::<Vec<_>>();
    let names = naming::property_names(&getters);

    let properties = declaration
      .properties
      .iter()
      .zip(declared_types)
      .zip(names)
      .map(|((property, declared_type), name)| self.convert_property(property, declared_type, name))
      .collect::<Vec<_>>();

    let mut warnings = vec![];
    let mut gwt_serializable = declaration.gwt_serializable;
    if gwt_serializable && builder.factory.is_none() {
      warnings.push(GenerationWarning::GwtSerializationDisabled {
        type_name: target.qualified_name(),
      });
      gwt_serializable = false;
    }

    let metadata = Metadata::builder()
      .builder_type(target.nested(builder.name.clone()))
      .maybe_builder_factory(builder.factory)
      .interface_type(declaration.kind == TypeKind::Interface)
      .properties(properties)
      .builder_serializable(builder.serializable)
      .gwt_compatible(declaration.gwt_compatible || gwt_serializable)
      .gwt_serializable(gwt_serializable)
      .target(target)
      .build()?;

    Ok(ConversionOutput { metadata, warnings })
  }

  fn parse_property_type(parser: &TypeParser, property: &PropertyDeclaration) -> Result<TypeMirror, ConversionError> {
    if !is_java_identifier(&property.getter) {
      return Err(ConversionError::InvalidGetter {
        getter: property.getter.clone(),
      });
    }
    parser
      .parse(&property.type_expr)
      .map_err(|source| ConversionError::InvalidPropertyType {
        getter: property.getter.clone(),
        source,
      })
  }

  fn convert_property(&self, declaration: &PropertyDeclaration, declared_type: TypeMirror, name: String) -> Property {
    let capitalized_name = naming::capitalize(&name);
    let strategy = bind_strategy(&PropertyConfig {
      declared_type: &declared_type,
      capitalized_name: &capitalized_name,
      has_default: declaration.has_default,
      types: self.types,
    });

    let mut property = Property::builder()
      .all_caps_name(naming::all_caps(&name))
      .boxed_type(self.types.boxed_type(&declared_type))
      .declared_type(declared_type)
      .capitalized_name(capitalized_name)
      .getter_name(declaration.getter.clone())
      .name(name)
      .strategy(strategy)
      .build();
    property.fully_checked_cast = is_reifiable(&property.generator().value_field_type(&property));
    property
  }
}

/// Whether a cast to `ty` can be fully checked at runtime.
fn is_reifiable(ty: &TypeMirror) -> bool {
  match ty {
    TypeMirror::Primitive(_) => true,
    TypeMirror::Declared(declared) => declared.type_arguments.is_empty(),
    TypeMirror::Array(component) => is_reifiable(component),
    TypeMirror::Wildcard(_) => false,
  }
}
