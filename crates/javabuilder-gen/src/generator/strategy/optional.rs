use super::{
  PropertyCodeGenerator, PropertyConfig, Strategy, StrategyFactory, element_or_unboxed, type_argument, unboxed,
};
use crate::generator::{
  ast::{ClassName, Metadata, PrimitiveType, Property, TypeMirror, WildcardBound, known_types},
  codegen::SourceBuilder,
  converter::TypeUtils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalType {
  Guava,
  Java8,
}

impl OptionalType {
  pub fn class(self) -> &'static ClassName {
    match self {
      Self::Guava => &known_types::GUAVA_OPTIONAL,
      Self::Java8 => &known_types::JAVA_OPTIONAL,
    }
  }

  fn absent_method(self) -> &'static str {
    match self {
      Self::Guava => "absent",
      Self::Java8 => "empty",
    }
  }

  fn nullable_factory(self) -> &'static str {
    match self {
      Self::Guava => "fromNullable",
      Self::Java8 => "ofNullable",
    }
  }

  fn of(types: &dyn TypeUtils, ty: &TypeMirror) -> Option<Self> {
    if types.erases_to_any_of(ty, &[&*known_types::GUAVA_OPTIONAL]) {
      Some(Self::Guava)
    } else if types.erases_to_any_of(ty, &[&*known_types::JAVA_OPTIONAL]) {
      Some(Self::Java8)
    } else {
      None
    }
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalPropertyFactory;

impl StrategyFactory for OptionalPropertyFactory {
  fn create(&self, config: &PropertyConfig<'_>) -> Option<Strategy> {
    let optional_type = OptionalType::of(config.types, config.declared_type)?;
    let element_type = type_argument(config.types, config.declared_type, 0);
    let unboxed_type = unboxed(config.types, &element_type);
    Some(Strategy::Optional(OptionalStrategy::new(
      optional_type,
      config.capitalized_name,
      element_type,
      unboxed_type,
    )))
  }
}

/// Optional-wrapped properties, stored as a nullable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalStrategy {
  pub optional_type: OptionalType,
  pub setter_name: String,
  pub nullable_setter_name: String,
  pub clear_name: String,
  pub element_type: TypeMirror,
  pub unboxed_type: Option<PrimitiveType>,
}

impl OptionalStrategy {
  pub fn new(
    optional_type: OptionalType,
    capitalized_name: &str,
    element_type: TypeMirror,
    unboxed_type: Option<PrimitiveType>,
  ) -> Self {
    Self {
      optional_type,
      setter_name: format!("set{capitalized_name}"),
      nullable_setter_name: format!("setNullable{capitalized_name}"),
      clear_name: format!("clear{capitalized_name}"),
      element_type,
      unboxed_type,
    }
  }

  fn optional_of(&self, argument: TypeMirror) -> TypeMirror {
    TypeMirror::generic(self.optional_type.class().clone(), vec![argument])
  }

  fn add_javadoc(code: &mut SourceBuilder, property: &Property, metadata: &Metadata) {
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Sets the value to be returned by {@link %s#%s()}.",
        &[metadata.target(), &property.getter_name],
      )
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&metadata.builder_type().simple_name()]);
  }
}

impl PropertyCodeGenerator for OptionalStrategy {
  fn add_builder_field_declaration(&self, code: &mut SourceBuilder, property: &Property) {
    code
      .line("  // Store a nullable object instead of an Optional. Escape analysis then")
      .line("  // allows the JVM to optimize away the Optional objects created by and")
      .line("  // passed to our API.")
      .add_line("  private %s %s = null;", &[&self.element_type, &property.name]);
  }

  fn add_builder_field_accessors(&self, code: &mut SourceBuilder, property: &Property, metadata: &Metadata) {
    let builder = metadata.builder_type();
    let optional = self.optional_type.class();

    // set(T value)
    Self::add_javadoc(code, property, metadata);
    if self.unboxed_type.is_none() {
      code.add_line("   * @throws NullPointerException if {@code %s} is null", &[&property.name]);
    }
    code.line("   */").add_line(
      "  public %s %s(%s %s) {",
      &[
        builder,
        &self.setter_name,
        &element_or_unboxed(&self.element_type, self.unboxed_type),
        &property.name,
      ],
    );
    if self.unboxed_type.is_some() {
      code.add_line("    this.%1$s = %1$s;", &[&property.name]);
    } else {
      code.add_line(
        "    this.%1$s = %2$s.checkNotNull(%1$s);",
        &[&property.name, &*known_types::PRECONDITIONS],
      );
    }
    code.add_line("    return (%s) this;", &[builder]).line("  }");

    // set(Optional<? extends T> value)
    let wildcard = TypeMirror::Wildcard(WildcardBound::Extends(Box::new(self.element_type.clone())));
    Self::add_javadoc(code, property, metadata);
    code
      .line("   */")
      .add_line(
        "  public %s %s(%s %s) {",
        &[builder, &self.setter_name, &self.optional_of(wildcard), &property.name],
      )
      .add_line("    if (%s.isPresent()) {", &[&property.name])
      .add_line("      return %s(%s.get());", &[&self.setter_name, &property.name])
      .line("    } else {")
      .add_line("      return %s();", &[&self.clear_name])
      .line("    }")
      .line("  }");

    // setNullable(@Nullable T value)
    Self::add_javadoc(code, property, metadata);
    code
      .line("   */")
      .add_line(
        "  public %s %s(@%s %s %s) {",
        &[
          builder,
          &self.nullable_setter_name,
          &*known_types::NULLABLE,
          &self.element_type,
          &property.name,
        ],
      )
      .add_line("    if (%s != null) {", &[&property.name])
      .add_line("      return %s(%s);", &[&self.setter_name, &property.name])
      .line("    } else {")
      .add_line("      return %s();", &[&self.clear_name])
      .line("    }")
      .line("  }");

    // clear()
    let absent = self.optional_type.absent_method();
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Sets the value to be returned by {@link %s#%s()}",
        &[metadata.target(), &property.getter_name],
      )
      .add_line("   * to {@link %1$s#%2$s() %1$s.%2$s()}.", &[optional, &absent])
      .line("   *")
      .add_line("   * @return this {@code %s} object", &[&builder.simple_name()])
      .line("   */")
      .add_line("  public %s %s() {", &[builder, &self.clear_name])
      .add_line("    this.%s = null;", &[&property.name])
      .add_line("    return (%s) this;", &[builder])
      .line("  }");

    // get()
    code
      .line("")
      .line("  /**")
      .add_line(
        "   * Returns the value that will be returned by {@link %s#%s()}.",
        &[metadata.target(), &property.getter_name],
      )
      .line("   */")
      .add_line(
        "  public %s get%s() {",
        &[&self.optional_of(self.element_type.clone()), &property.capitalized_name],
      )
      .add_line(
        "    return %s.%s(%s);",
        &[optional, &self.optional_type.nullable_factory(), &property.name],
      )
      .line("  }");
  }

  fn value_field_type(&self, _property: &Property) -> TypeMirror {
    self.element_type.clone()
  }

  fn value_field_nullable(&self) -> bool {
    true
  }

  fn add_value_field_declaration(&self, code: &mut SourceBuilder, property: &Property) {
    code
      .line("    // Store a nullable object instead of an Optional. Escape analysis then")
      .line("    // allows the JVM to optimize away the Optional objects created by our")
      .line("    // getter method.")
      .add_line("    private final %s %s;", &[&self.element_type, &property.name]);
  }

  fn add_value_getter_body(&self, code: &mut SourceBuilder, property: &Property) {
    code.add_line(
      "      return %s.%s(%s);",
      &[
        self.optional_type.class(),
        &self.optional_type.nullable_factory(),
        &property.name,
      ],
    );
  }

  fn add_merge_from_value(&self, code: &mut SourceBuilder, property: &Property, value: &str) {
    code.add_line(
      "    %s(%s.%s());",
      &[&self.setter_name, &value, &property.getter_name],
    );
  }

  fn add_merge_from_builder(&self, code: &mut SourceBuilder, property: &Property, _metadata: &Metadata, builder: &str) {
    code.add_line(
      "    %s(%s.get%s());",
      &[&self.setter_name, &builder, &property.capitalized_name],
    );
  }

  fn add_set_from_result(&self, code: &mut SourceBuilder, _property: &Property, builder: &str, variable: &str) {
    code.add_line(
      "        %s.%s(%s);",
      &[&builder, &self.nullable_setter_name, &variable],
    );
  }

  fn is_template_required_in_clear(&self) -> bool {
    true
  }

  fn add_clear(&self, code: &mut SourceBuilder, property: &Property, template: &str) {
    code.add_line("    %1$s = %2$s.%1$s;", &[&property.name, &template]);
  }

  fn add_partial_clear(&self, code: &mut SourceBuilder, property: &Property) {
    code.add_line("    %s = null;", &[&property.name]);
  }
}
