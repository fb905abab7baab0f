//! Emission of the generated builder superclass.
//!
//! [`CodeGenerator::write_builder_source`] walks the [`Phase`]s in order and
//! hands every property-specific fragment to the property's bound strategy.

mod gwt;
pub mod source;
mod value_types;

#[cfg(test)]
mod tests;

pub use source::{SourceArg, SourceBuilder, SourceError, SourceLevel, TypeShortener};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::generator::ast::{ClassName, Metadata, known_types};

/// Value of the `@Generated` annotation on every emitted builder.
pub const GENERATOR_NAME: &str = "javabuilder-gen";

/// Sections of the generated compilation unit, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
  Header,
  PropertyEnum,
  Fields,
  Accessors,
  ValueType,
  GwtSerializer,
  Build,
  MergeFromValue,
  MergeFromBuilder,
  Clear,
  PartialType,
  BuildPartial,
  Footer,
}

impl Phase {
  fn applies_to(self, metadata: &Metadata) -> bool {
    match self {
      Self::PropertyEnum => metadata.has_unset_properties(),
      Self::GwtSerializer => metadata.gwt_serializable(),
      _ => true,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
  #[error("failed to emit {phase} for {type_name}")]
  Emission {
    type_name: String,
    phase: Phase,
    #[source]
    source: SourceError,
  },
}

#[derive(Debug, Clone)]
pub struct CodeGenerator {
  generated_by: String,
}

impl Default for CodeGenerator {
  fn default() -> Self {
    Self::new(GENERATOR_NAME)
  }
}

impl CodeGenerator {
  pub fn new(generated_by: impl Into<String>) -> Self {
    Self {
      generated_by: generated_by.into(),
    }
  }

  /// Writes the builder superclass for `metadata` into `code`.
  ///
  /// Stops at the first phase whose templates fail to expand; `code` must be
  /// discarded in that case.
  pub fn write_builder_source(&self, code: &mut SourceBuilder, metadata: &Metadata) -> Result<(), GenerationError> {
    code.reserve_member_types(member_types(metadata));
    for phase in Phase::iter().filter(|phase| phase.applies_to(metadata)) {
      self.emit(phase, code, metadata);
      if let Some(source) = code.take_error() {
        return Err(GenerationError::Emission {
          type_name: metadata.target().qualified_name(),
          phase,
          source,
        });
      }
    }
    Ok(())
  }

  fn emit(&self, phase: Phase, code: &mut SourceBuilder, metadata: &Metadata) {
    match phase {
      Phase::Header => self.add_class_header(code, metadata),
      Phase::PropertyEnum => add_property_enum(code, metadata),
      Phase::Fields => add_fields(code, metadata),
      Phase::Accessors => {
        for property in metadata.properties() {
          property.generator().add_builder_field_accessors(code, property, metadata);
        }
      }
      Phase::ValueType => value_types::add_value_type(code, metadata),
      Phase::GwtSerializer => gwt::add_custom_field_serializer(code, metadata),
      Phase::Build => add_build(code, metadata),
      Phase::MergeFromValue => add_merge_from_value(code, metadata),
      Phase::MergeFromBuilder => add_merge_from_builder(code, metadata),
      Phase::Clear => add_clear(code, metadata),
      Phase::PartialType => value_types::add_partial_type(code, metadata),
      Phase::BuildPartial => add_build_partial(code, metadata),
      Phase::Footer => {
        code.line("}");
      }
    }
  }

  fn add_class_header(&self, code: &mut SourceBuilder, metadata: &Metadata) {
    code
      .line("/**")
      .add_line(" * Auto-generated superclass of {@link %s},", &[metadata.builder_type()])
      .add_line(" * derived from the API of {@link %s}.", &[metadata.target()])
      .line(" */")
      .add_line("@%s(\"%s\")", &[&*known_types::GENERATED, &self.generated_by]);
    if metadata.gwt_compatible() {
      code.add_line("@%s", &[&*known_types::GWT_COMPATIBLE]);
    }
    if metadata.builder_serializable() {
      code.add_line(
        "abstract class %s implements %s {",
        &[metadata.generated_builder(), &*known_types::SERIALIZABLE],
      );
    } else {
      code.add_line("abstract class %s {", &[metadata.generated_builder()]);
    }
    code.line("").add_line(
      "  private static final %s COMMA_JOINER = %s.on(\", \").skipNulls();",
      &[&*known_types::JOINER, &*known_types::JOINER],
    );
  }
}

/// Classes declared inside the generated builder, plus the user's builder itself.
fn member_types(metadata: &Metadata) -> Vec<ClassName> {
  let mut members = vec![
    metadata.value_type().clone(),
    metadata.partial_type().clone(),
    metadata.property_enum().clone(),
    metadata.builder_type().clone(),
  ];
  if metadata.gwt_serializable() {
    let serializer = format!("{}_CustomFieldSerializer", metadata.value_type().simple_name());
    members.push(metadata.generated_builder().nested(serializer));
  }
  members
}

fn add_property_enum(code: &mut SourceBuilder, metadata: &Metadata) {
  code
    .line("")
    .add_line("  private enum %s {", &[&metadata.property_enum().simple_name()]);
  for property in metadata.tracked_properties() {
    code.add_line("    %s(\"%s\"),", &[&property.all_caps_name, &property.name]);
  }
  code
    .line("    ;")
    .line("")
    .line("    private final String name;")
    .line("")
    .add_line("    private %s(String name) {", &[&metadata.property_enum().simple_name()])
    .line("      this.name = name;")
    .line("    }")
    .line("")
    .line("    @Override public String toString() {")
    .line("      return name;")
    .line("    }")
    .line("  }");
}

fn add_fields(code: &mut SourceBuilder, metadata: &Metadata) {
  code.line("");
  for property in metadata.properties() {
    property.generator().add_builder_field_declaration(code, property);
  }
  if metadata.has_unset_properties() {
    code
      .add_line(
        "  private final %s<%s> _unsetProperties =",
        &[&*known_types::ENUM_SET, metadata.property_enum()],
      )
      .add_line(
        "      %s.allOf(%s.class);",
        &[&*known_types::ENUM_SET, metadata.property_enum()],
      );
  }
}

fn add_build(code: &mut SourceBuilder, metadata: &Metadata) {
  code
    .line("")
    .line("  /**")
    .add_line(
      "   * Returns a newly-created {@link %s} based on the contents of the {@code %s}.",
      &[metadata.target(), &metadata.builder_type().simple_name()],
    );
  if metadata.has_unset_properties() {
    code
      .line("   *")
      .line("   * @throws IllegalStateException if any field has not been set");
  }
  code
    .line("   */")
    .add_line("  public %s build() {", &[metadata.target()]);
  if metadata.has_unset_properties() {
    code.add_line(
      "    %s.checkState(_unsetProperties.isEmpty(), \"Not set: %%s\", _unsetProperties);",
      &[&*known_types::PRECONDITIONS],
    );
  }
  code
    .add_line("    return new %s(this);", &[metadata.value_type()])
    .line("  }");
}

fn add_merge_from_value(code: &mut SourceBuilder, metadata: &Metadata) {
  code
    .line("")
    .line("  /**")
    .add_line(
      "   * Sets all property values using the given {@code %s} as a template.",
      &[metadata.target()],
    )
    .line("   */")
    .add_line(
      "  public %s mergeFrom(%s value) {",
      &[metadata.builder_type(), metadata.target()],
    );
  for property in metadata.properties() {
    property.generator().add_merge_from_value(code, property, "value");
  }
  code
    .add_line("    return (%s) this;", &[metadata.builder_type()])
    .line("  }");
}

fn add_merge_from_builder(code: &mut SourceBuilder, metadata: &Metadata) {
  code
    .line("")
    .line("  /**")
    .add_line(
      "   * Copies values from the given {@code %s}.",
      &[&metadata.builder_type().simple_name()],
    );
  if metadata.has_unset_properties() {
    code.line("   * Does not affect any properties not set on the input.");
  }
  let template = metadata.local_name("template");
  code
    .line("   */")
    .add_line(
      "  public %1$s mergeFrom(%1$s %2$s) {",
      &[metadata.builder_type(), &template],
    );
  if metadata.has_unset_properties() {
    code
      .line("    // Upcast to access the private _unsetProperties field.")
      .line("    // Otherwise, oddly, we get an access violation.")
      .add_line(
        "    %s<%s> %s = ((%s) %s)._unsetProperties;",
        &[
          &*known_types::ENUM_SET,
          metadata.property_enum(),
          &metadata.local_name("_templateUnset"),
          metadata.generated_builder(),
          &template,
        ],
      );
  }
  for property in metadata.properties() {
    property
      .generator()
      .add_merge_from_builder(code, property, metadata, &template);
  }
  code
    .add_line("    return (%s) this;", &[metadata.builder_type()])
    .line("  }");
}

/// Without a builder factory there is no template to copy defaults from, so
/// every property is cleared the way a partial clear would and every tracked
/// property is marked unset again.
fn add_clear(code: &mut SourceBuilder, metadata: &Metadata) {
  code
    .line("")
    .line("  /**")
    .line("   * Resets the state of this builder.")
    .line("   */")
    .add_line("  public %s clear() {", &[metadata.builder_type()]);

  match metadata.new_builder_expression() {
    Some(new_builder) => {
      let needs_template = metadata.has_unset_properties()
        || metadata
          .properties()
          .iter()
          .any(|property| property.generator().is_template_required_in_clear());
      let template = metadata.local_name("template");
      if needs_template {
        code.add_line(
          "    %s %s = %s;",
          &[metadata.generated_builder(), &template, &new_builder],
        );
      }
      for property in metadata.properties() {
        property.generator().add_clear(code, property, &template);
      }
      if metadata.has_unset_properties() {
        code
          .line("    _unsetProperties.clear();")
          .add_line("    _unsetProperties.addAll(%s._unsetProperties);", &[&template]);
      }
    }
    None => {
      for property in metadata.properties() {
        property.generator().add_partial_clear(code, property);
      }
      if metadata.has_unset_properties() {
        code.line("    _unsetProperties.clear();").add_line(
          "    _unsetProperties.addAll(%s.allOf(%s.class));",
          &[&*known_types::ENUM_SET, metadata.property_enum()],
        );
      }
    }
  }

  code
    .add_line("    return (%s) this;", &[metadata.builder_type()])
    .line("  }");
}

fn add_build_partial(code: &mut SourceBuilder, metadata: &Metadata) {
  code
    .line("")
    .line("  /**")
    .add_line("   * Returns a newly-created partial {@link %s}", &[metadata.target()])
    .add_line(
      "   * based on the contents of the {@code %s}.",
      &[&metadata.builder_type().simple_name()],
    )
    .line("   * State checking will not be performed.");
  if metadata.has_unset_properties() {
    code
      .line("   * Unset properties will throw an {@link UnsupportedOperationException}")
      .line("   * when accessed via the partial object.");
  }
  code
    .line("   *")
    .line("   * <p>Partials should only ever be used in tests.")
    .line("   */")
    .add_line("  @%s()", &[&*known_types::VISIBLE_FOR_TESTING])
    .add_line("  public %s buildPartial() {", &[metadata.target()])
    .add_line("    return new %s(this);", &[metadata.partial_type()])
    .line("  }");
}
