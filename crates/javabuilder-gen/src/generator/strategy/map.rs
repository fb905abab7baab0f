use super::{
  PropertyCodeGenerator, PropertyConfig, Strategy, StrategyFactory, element_or_unboxed, type_argument, unboxed,
};
use crate::generator::{
  ast::{Metadata, PrimitiveType, Property, TypeMirror, WildcardBound, known_types},
  codegen::SourceBuilder,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MapPropertyFactory;

impl StrategyFactory for MapPropertyFactory {
  fn create(&self, config: &PropertyConfig<'_>) -> Option<Strategy> {
    let raw_types = [&*known_types::MAP, &*known_types::IMMUTABLE_MAP];
    if !config.types.erases_to_any_of(config.declared_type, &raw_types) {
      return None;
    }
    let key_type = type_argument(config.types, config.declared_type, 0);
    let value_type = type_argument(config.types, config.declared_type, 1);
    Some(Strategy::Map(MapStrategy {
      unboxed_key_type: unboxed(config.types, &key_type),
      unboxed_value_type: unboxed(config.types, &value_type),
      key_type,
      value_type,
    }))
  }
}

/// Insertion-ordered map properties backed by a `LinkedHashMap` and frozen
/// into an `ImmutableMap` on build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapStrategy {
  pub key_type: TypeMirror,
  pub value_type: TypeMirror,
  pub unboxed_key_type: Option<PrimitiveType>,
  pub unboxed_value_type: Option<PrimitiveType>,
}

impl MapStrategy {
  fn extends(bound: &TypeMirror) -> TypeMirror {
    TypeMirror::Wildcard(WildcardBound::Extends(Box::new(bound.clone())))
  }
}

impl PropertyCodeGenerator for MapStrategy {
  fn add_builder_field_declaration(&self, code: &mut SourceBuilder, property: &Property) {
    let template = if code.source_level().supports_diamond_operator() {
      "  private %1$s<%2$s, %3$s> %4$s = new %1$s<>();"
    } else {
      "  private %1$s<%2$s, %3$s> %4$s = new %1$s<%2$s, %3$s>();"
    };
    code.add_line(
      template,
      &[
        &*known_types::LINKED_HASH_MAP,
        &self.key_type,
        &self.value_type,
        &property.name,
      ],
    );
  }

  fn add_builder_field_accessors(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata) {
    let builder = metadata.builder_type();
    let builder_name = builder.simple_name();
    let key = element_or_unboxed(&self.key_type, self.unboxed_key_type);
    let value = element_or_unboxed(&self.value_type, self.unboxed_value_type);
    let name = &property.name;
    let capitalized = &property.capitalized_name;

    // put(K key, V value)
    code
      .line("")
      .line("  /**")
      .line("   * Associates {@code key} with {@code value} in the map to be returned from")
      .add_line("   * {@link %s#%s()}.", &[metadata.target(), &property.getter_name])
      .line("   * If the map previously contained a mapping for the key,")
      .line("   * the old value is replaced by the specified value.")
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name]);
    match (self.unboxed_key_type, self.unboxed_value_type) {
      (None, None) => {
        code.line("   * @throws NullPointerException if either {@code key} or {@code value} are null");
      }
      (None, Some(_)) => {
        code.line("   * @throws NullPointerException if {@code key} is null");
      }
      (Some(_), None) => {
        code.line("   * @throws NullPointerException if {@code value} is null");
      }
      (Some(_), Some(_)) => {}
    }
    code
      .line("   */")
      .add_line("  public %s put%s(%s key, %s value) {", &[builder, capitalized, &key, &value]);
    if self.unboxed_key_type.is_none() {
      code.add_line("    %s.checkNotNull(key);", &[&*known_types::PRECONDITIONS]);
    }
    if self.unboxed_value_type.is_none() {
      code.add_line("    %s.checkNotNull(value);", &[&*known_types::PRECONDITIONS]);
    }
    code
      .add_line("    this.%s.put(key, value);", &[name])
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // putAll(Map<? extends K, ? extends V> map)
    let key_bound = Self::extends(&self.key_type);
    let value_bound = Self::extends(&self.value_type);
    code
      .line("")
      .line("  /**")
      .line("   * Associates all of {@code map}'s keys and values in the map to be returned from")
      .add_line("   * {@link %s#%s()}.", &[metadata.target(), &property.getter_name])
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name])
      .line("   * @throws NullPointerException if {@code map} is null or contains a")
      .line("   *     null key or value")
      .line("   */")
      .add_line(
        "  public %s putAll%s(%s<%s, %s> map) {",
        &[builder, capitalized, &*known_types::MAP, &key_bound, &value_bound],
      )
      .add_line(
        "    for (%s<%s, %s> entry : map.entrySet()) {",
        &[&*known_types::MAP_ENTRY, &key_bound, &value_bound],
      )
      .add_line("      put%s(entry.getKey(), entry.getValue());", &[capitalized])
      .line("    }")
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // remove(K key)
    code
      .line("")
      .line("  /**")
      .line("   * Removes the mapping for {@code key} from the map to be returned from")
      .add_line("   * {@link %s#%s()}, if one is present.", &[metadata.target(), &property.getter_name])
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder_name]);
    if self.unboxed_key_type.is_none() {
      code.line("   * @throws NullPointerException if {@code key} is null");
    }
    code
      .line("   */")
      .add_line("  public %s remove%s(%s key) {", &[builder, capitalized, &key]);
    if self.unboxed_key_type.is_none() {
      code.add_line("    %s.checkNotNull(key);", &[&*known_types::PRECONDITIONS]);
    }
    code
      .add_line("    this.%s.remove(key);", &[name])
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // clear()
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Removes all of the mappings from the map to be returned from {@link %s#%s()}.",
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
      .line("   * Returns an unmodifiable view of the map that will be returned by")
      .add_line("   * {@link %s#%s()}.", &[metadata.target(), &property.getter_name])
      .line("   * Changes to this builder will be reflected in the view.")
      .line("   */")
      .add_line(
        "  public %s<%s, %s> get%s() {",
        &[&*known_types::MAP, &self.key_type, &self.value_type, capitalized],
      )
      .add_line("    return %s.unmodifiableMap(%s);", &[&*known_types::COLLECTIONS, name])
      .line("  }");
  }

  fn add_final_field_assignment(&self, code: &mut SourceBuilder, property: &Property, final_field: &str, builder: &str) {
    code.add_line(
      "      %s = %s.copyOf(%s.%s);",
      &[&final_field, &*known_types::IMMUTABLE_MAP, &builder, &property.name],
    );
  }

  fn add_merge_from_value(&self, code: &mut SourceBuilder, property: &Property, value: &str) {
    code.add_line(
      "    putAll%s(%s.%s());",
      &[&property.capitalized_name, &value, &property.getter_name],
    );
  }

  fn add_merge_from_builder(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata, builder: &str) {
    code.add_line(
      "    putAll%s(((%s) %s).%s);",
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
      "        %s.putAll%s(%s);",
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
