use super::{PropertyCodeGenerator, PropertyConfig, Strategy, StrategyFactory};
use crate::generator::{
  ast::{Metadata, Property, known_types},
  codegen::SourceBuilder,
};

/// Accepts every property; the fallback when no other factory matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertyFactory;

impl DefaultPropertyFactory {
  pub fn bind(config: &PropertyConfig<'_>) -> DefaultStrategy {
    DefaultStrategy {
      setter_name: format!("set{}", config.capitalized_name),
      has_default: config.has_default,
    }
  }
}

impl StrategyFactory for DefaultPropertyFactory {
  fn create(&self, config: &PropertyConfig<'_>) -> Option<Strategy> {
    Some(Strategy::Default(Self::bind(config)))
  }
}

/// Plain get/set semantics with null-hostile setters. A property with no
/// default value must be set before the builder can build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultStrategy {
  pub setter_name: String,
  pub has_default: bool,
}

impl DefaultStrategy {
  pub fn new(setter_name: impl Into<String>, has_default: bool) -> Self {
    Self {
      setter_name: setter_name.into(),
      has_default,
    }
  }

  fn unset_constant(metadata: &Metadata, property: &Property) -> String {
    format!("{}.{}", metadata.property_enum().nested_path(), property.all_caps_name)
  }
}

impl PropertyCodeGenerator for DefaultStrategy {
  fn tracks_unset(&self) -> bool {
    !self.has_default
  }

  fn add_builder_field_declaration(&self, code: &mut SourceBuilder, property: &Property) {
    code.add_line("  private %s %s;", &[&property.declared_type, &property.name]);
  }

  fn add_builder_field_accessors(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata) {
    let builder = metadata.builder_type();
    let primitive = property.declared_type.is_primitive();

    // set(T value)
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Sets the value to be returned by {@link %s#%s()}.",
        &[metadata.target(), &property.getter_name],
      )
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder.simple_name()]);
    if !primitive {
      code.add_line("   * @throws NullPointerException if {@code %s} is null", &[&property.name]);
    }
    code.line("   */").add_line(
      "  public %s %s(%s %s) {",
      &[builder, &self.setter_name, &property.declared_type, &property.name],
    );
    if primitive {
      code.add_line("    this.%1$s = %1$s;", &[&property.name]);
    } else {
      code.add_line(
        "    this.%1$s = %2$s.checkNotNull(%1$s);",
        &[&property.name, &*known_types::PRECONDITIONS],
      );
    }
    if self.tracks_unset() {
      code.add_line(
        "    _unsetProperties.remove(%s);",
        &[&Self::unset_constant(metadata, property)],
      );
    }
    code.add_line("    return (%s) this;", &[builder]).line("  }");

    // get()
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Returns the value that will be returned by {@link %s#%s()}.",
        &[metadata.target(), &property.getter_name],
      );
    if self.tracks_unset() {
      code
        .line("   *")
        .line("   * @throws IllegalStateException if the field has not been set");
    }
    code.line("   */").add_line(
      "  public %s get%s() {",
      &[&property.declared_type, &property.capitalized_name],
    );
    if self.tracks_unset() {
      code
        .add_line("    %s.checkState(", &[&*known_types::PRECONDITIONS])
        .add_line(
          "        !_unsetProperties.contains(%s),",
          &[&Self::unset_constant(metadata, property)],
        )
        .add_line("        \"%s not set\");", &[&property.name]);
    }
    code.add_line("    return %s;", &[&property.name]).line("  }");
  }

  fn add_merge_from_value(&self, code: &mut SourceBuilder, property: &Property, value: &str) {
    code.add_line(
      "    %s(%s.%s());",
      &[&self.setter_name, &value, &property.getter_name],
    );
  }

  fn add_merge_from_builder(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata, builder: &str) {
    if self.tracks_unset() {
      code
        .add_line(
          "    if (!%s.contains(%s)) {",
          &[&metadata.local_name("_templateUnset"), &Self::unset_constant(metadata, property)],
        )
        .add_line(
          "      %s(%s.get%s());",
          &[&self.setter_name, &builder, &property.capitalized_name],
        )
        .line("    }");
    } else {
      code.add_line(
        "    %s(%s.get%s());",
        &[&self.setter_name, &builder, &property.capitalized_name],
      );
    }
  }

  fn add_set_from_result(&self, code: &mut SourceBuilder, _property: &Property, builder: &str, variable: &str) {
    code.add_line("        %s.%s(%s);", &[&builder, &self.setter_name, &variable]);
  }

  fn is_template_required_in_clear(&self) -> bool {
    true
  }

  fn add_clear(&self, code: &mut SourceBuilder, property: &Property, template: &str) {
    code.add_line("    %1$s = %2$s.%1$s;", &[&property.name, &template]);
  }

  fn add_partial_clear(&self, code: &mut SourceBuilder, property: &Property) {
    if !property.declared_type.is_primitive() {
      code.add_line("    %s = null;", &[&property.name]);
    }
  }
}
