use super::{
  PropertyCodeGenerator, PropertyConfig, Strategy, StrategyFactory, element_or_unboxed, type_argument, unboxed,
};
use crate::generator::{
  ast::{Metadata, PrimitiveType, Property, TypeMirror, known_types},
  codegen::SourceBuilder,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ListPropertyFactory;

impl StrategyFactory for ListPropertyFactory {
  fn create(&self, config: &PropertyConfig<'_>) -> Option<Strategy> {
    let raw_types = [
      &*known_types::COLLECTION,
      &*known_types::LIST,
      &*known_types::IMMUTABLE_LIST,
    ];
    if !config.types.erases_to_any_of(config.declared_type, &raw_types) {
      return None;
    }
    let element_type = type_argument(config.types, config.declared_type, 0);
    let unboxed_type = unboxed(config.types, &element_type);
    Some(Strategy::List(ListStrategy {
      element_type,
      unboxed_type,
    }))
  }
}

/// Append-only list properties backed by an `ArrayList` and frozen into an
/// `ImmutableList` on build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStrategy {
  pub element_type: TypeMirror,
  pub unboxed_type: Option<PrimitiveType>,
}

impl PropertyCodeGenerator for ListStrategy {
  fn add_builder_field_declaration(&self, code: &mut SourceBuilder, property: &Property) {
    let template = if code.source_level().supports_diamond_operator() {
      "  private %1$s<%2$s> %3$s = new %1$s<>();"
    } else {
      "  private %1$s<%2$s> %3$s = new %1$s<%2$s>();"
    };
    code.add_line(
      template,
      &[&*known_types::ARRAY_LIST, &self.element_type, &property.name],
    );
  }

  fn add_builder_field_accessors(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata) {
    let builder = metadata.builder_type();
    let builder_name = builder.simple_name();
    let element = element_or_unboxed(&self.element_type, self.unboxed_type);
    let name = &property.name;
    let capitalized = &property.capitalized_name;

    // add(T element)
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Adds {@code element} to the list to be returned from {@link %s#%s()}.",
        &[metadata.target(), &property.getter_name],
      )
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name]);
    if self.unboxed_type.is_none() {
      code.line("   * @throws NullPointerException if {@code element} is null");
    }
    code
      .line("   */")
      .add_line("  public %s add%s(%s element) {", &[builder, capitalized, &element]);
    if self.unboxed_type.is_some() {
      code.add_line("    this.%s.add(element);", &[name]);
    } else {
      code.add_line(
        "    this.%s.add(%s.checkNotNull(element));",
        &[name, &*known_types::PRECONDITIONS],
      );
    }
    code.add_line("    return (%s) this;", &[builder]).line("  }");

    // add(T... elements)
    code
      .line("")
      .line("  /**")
      .line("   * Adds each element of {@code elements} to the list to be returned from")
      .add_line("   * {@link %s#%s()}.", &[metadata.target(), &property.getter_name])
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name]);
    if self.unboxed_type.is_none() {
      code
        .line("   * @throws NullPointerException if {@code elements} is null or contains a")
        .line("   *     null element");
    }
    code
      .line("   */")
      .add_line("  public %s add%s(%s... elements) {", &[builder, capitalized, &element])
      .add_line("    %1$s.ensureCapacity(%1$s.size() + elements.length);", &[name])
      .add_line("    for (%s element : elements) {", &[&element])
      .add_line("      add%s(element);", &[capitalized])
      .line("    }")
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // addAll(Iterable<? extends T> elements)
    code
      .line("")
      .line("  /**")
      .line("   * Adds each element of {@code elements} to the list to be returned from")
      .add_line("   * {@link %s#%s()}.", &[metadata.target(), &property.getter_name])
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name])
      .line("   * @throws NullPointerException if {@code elements} is null or contains a")
      .line("   *     null element")
      .line("   */")
      .add_line(
        "  public %s addAll%s(%s<? extends %s> elements) {",
        &[builder, capitalized, &*known_types::ITERABLE, &self.element_type],
      )
      .add_line("    if (elements instanceof %s) {", &[&*known_types::COLLECTION])
      .add_line(
        "      %1$s.ensureCapacity(%1$s.size() + ((%2$s<?>) elements).size());",
        &[name, &*known_types::COLLECTION],
      )
      .line("    }")
      .add_line("    for (%s element : elements) {", &[&element])
      .add_line("      add%s(element);", &[capitalized])
      .line("    }")
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // clear()
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Clears the list to be returned from {@link %s#%s()}.",
        &[metadata.target(), &property.getter_name],
      )
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name])
      .line("   */")
      .add_line("  public %s clear%s() {", &[builder, capitalized])
      .add_line("    this.%s.clear();", &[name])
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // get()
    code
      .line("")
      .line("  /**")
      .line("   * Returns an unmodifiable view of the list that will be returned by")
      .add_line("   * {@link %s#%s()}.", &[metadata.target(), &property.getter_name])
      .line("   * Changes to this builder will be reflected in the view.")
      .line("   */")
      .add_line(
        "  public %s<%s> get%s() {",
        &[&*known_types::LIST, &self.element_type, capitalized],
      )
      .add_line("    return %s.unmodifiableList(%s);", &[&*known_types::COLLECTIONS, name])
      .line("  }");
  }

  fn add_final_field_assignment(&self, code: &mut SourceBuilder, property: &Property, final_field: &str, builder: &str) {
    code.add_line(
      "      %s = %s.copyOf(%s.%s);",
      &[&final_field, &*known_types::IMMUTABLE_LIST, &builder, &property.name],
    );
  }

  fn add_merge_from_value(&self, code: &mut SourceBuilder, property: &Property, value: &str) {
    code.add_line(
      "    addAll%s(%s.%s());",
      &[&property.capitalized_name, &value, &property.getter_name],
    );
  }

  fn add_merge_from_builder(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata, builder: &str) {
    code.add_line(
      "    addAll%s(((%s) %s).%s);",
      &[
        &property.capitalized_name,
        metadata.generated_builder(),
        &builder,
        &property.name,
      ],
    );
  }

  fn add_set_from_result(&self, code: &mut SourceBuilder, property: &Property, builder: &str, variable: &str) {
    code.add_line(
      "        %s.addAll%s(%s);",
      &[&builder, &property.capitalized_name, &variable],
    );
  }

  fn is_template_required_in_clear(&self) -> bool {
    false
  }

  fn add_clear(&self, code: &mut SourceBuilder, property: &Property, _template: &str) {
    code.add_line("    %s.clear();", &[&property.name]);
  }

  fn add_partial_clear(&self, code: &mut SourceBuilder, property: &Property) {
    code.add_line("    %s.clear();", &[&property.name]);
  }
}
