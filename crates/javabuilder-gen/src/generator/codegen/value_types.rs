//! The nested `Value` and `Partial` classes of a generated builder.

use itertools::Itertools;

use super::SourceBuilder;
use crate::generator::ast::{ClassName, Metadata, PrimitiveType, Property, known_types};

pub(super) fn add_value_type(code: &mut SourceBuilder, metadata: &Metadata) {
  code.line("");
  if metadata.gwt_serializable() {
    code
      .add_line("  @%s(serializable = true)", &[&*known_types::GWT_COMPATIBLE])
      .add_line(
        "  static final class %s %s %s {",
        &[&metadata.value_type().simple_name(), &inheritance(metadata), metadata.target()],
      );
  } else {
    code.add_line(
      "  private static final class %s %s %s {",
      &[&metadata.value_type().simple_name(), &inheritance(metadata), metadata.target()],
    );
  }
  for property in metadata.properties() {
    property.generator().add_value_field_declaration(code, property);
  }

  code
    .line("")
    .add_line(
      "    private %s(%s builder) {",
      &[&metadata.value_type().simple_name(), metadata.generated_builder()],
    );
  for property in metadata.properties() {
    property
      .generator()
      .add_final_field_assignment(code, property, &format!("this.{}", property.name), "builder");
  }
  code.line("    }");

  for property in metadata.properties() {
    add_getter_header(code, property);
    property.generator().add_value_getter_body(code, property);
    code.line("    }");
  }

  // equals
  let other = add_equals_header(code, metadata, metadata.value_type());
  for property in metadata.properties() {
    add_field_inequality(code, property, property.generator().value_field_nullable(), &other);
  }
  code.line("      return true;").line("    }");

  // hashCode
  let fields = metadata.properties().iter().map(|property| property.name.as_str()).join(", ");
  code
    .line("")
    .line("    @Override")
    .line("    public int hashCode() {");
  if fields.is_empty() {
    code.add_line("      return %s.hashCode(new Object[] {});", &[&*known_types::ARRAYS]);
  } else {
    code.add_line(
      "      return %s.hashCode(new Object[] { %s });",
      &[&*known_types::ARRAYS, &fields],
    );
  }
  code.line("    }");

  // toString
  add_to_string_header(code);
  let type_name = metadata.target().simple_name();
  if metadata.properties().is_empty() {
    code.line(&format!("      return \"{type_name}{{}}\";"));
  } else if metadata.has_optional_properties() {
    let items = metadata
      .properties()
      .iter()
      .map(|property| {
        if property.generator().value_field_nullable() {
          present_only(property)
        } else {
          labelled(property)
        }
      })
      .collect::<Vec<_>>();
    add_joined_to_string(code, &format!("\"{type_name}{{\""), &items);
  } else {
    code.line(&format!("      return \"{type_name}{{\""));
    let last = metadata.properties().len() - 1;
    for (index, property) in metadata.properties().iter().enumerate() {
      let suffix = if index == last { "\"}\"" } else { "\", \"" };
      code.line(&format!(
        "          + \"{name}=\" + {name} + {suffix}{terminator}",
        name = property.name,
        terminator = if index == last { ";" } else { "" },
      ));
    }
  }
  code.line("    }").line("  }");
}

pub(super) fn add_partial_type(code: &mut SourceBuilder, metadata: &Metadata) {
  let tracked = metadata.has_unset_properties();

  code.line("").add_line(
    "  private static final class %s %s %s {",
    &[&metadata.partial_type().simple_name(), &inheritance(metadata), metadata.target()],
  );
  for property in metadata.properties() {
    property.generator().add_value_field_declaration(code, property);
  }
  if tracked {
    code.add_line(
      "    private final %s<%s> _unsetProperties;",
      &[&*known_types::ENUM_SET, metadata.property_enum()],
    );
  }

  code.line("").add_line(
    "    %s(%s builder) {",
    &[&metadata.partial_type().simple_name(), metadata.generated_builder()],
  );
  for property in metadata.properties() {
    property
      .generator()
      .add_partial_field_assignment(code, property, &format!("this.{}", property.name), "builder");
  }
  if tracked {
    code.line("      this._unsetProperties = builder._unsetProperties.clone();");
  }
  code.line("    }");

  for property in metadata.properties() {
    add_getter_header(code, property);
    if property.tracks_unset() {
      code
        .add_line(
          "      if (_unsetProperties.contains(%s.%s)) {",
          &[metadata.property_enum(), &property.all_caps_name],
        )
        .line(&format!(
          "        throw new UnsupportedOperationException(\"{} not set\");",
          property.name
        ))
        .line("      }");
    }
    property.generator().add_value_getter_body(code, property);
    code.line("    }");
  }

  // equals
  let other = add_equals_header(code, metadata, metadata.partial_type());
  for property in metadata.properties() {
    let null_safe = property.generator().value_field_nullable() || property.tracks_unset();
    add_field_inequality(code, property, null_safe, &other);
  }
  if tracked {
    code.add_line("      return _unsetProperties.equals(%s._unsetProperties);", &[&other]);
  } else {
    code.line("      return true;");
  }
  code.line("    }");

  // hashCode
  let result = metadata.local_name("result");
  code
    .line("")
    .line("    @Override")
    .line("    public int hashCode() {")
    .add_line("      int %s = 1;", &[&result]);
  for property in metadata.properties() {
    code.add_line("      %s *= 31;", &[&result]);
    match property.generator().value_field_type(property).as_primitive() {
      Some(primitive) => {
        code.add_line(
          "      %s += ((%s) %s).hashCode();",
          &[&result, &primitive.boxed_class(), &property.name],
        );
      }
      None => {
        code.add_line(
          "      %1$s += ((%2$s == null) ? 0 : %2$s.hashCode());",
          &[&result, &property.name],
        );
      }
    }
  }
  if tracked {
    code
      .add_line("      %s *= 31;", &[&result])
      .add_line("      %s += _unsetProperties.hashCode();", &[&result]);
  }
  code.add_line("      return %s;", &[&result]).line("    }");

  // toString
  add_to_string_header(code);
  let type_name = metadata.target().simple_name();
  if metadata.properties().is_empty() {
    code.line(&format!("      return \"partial {type_name}{{}}\";"));
  } else {
    let items = metadata
      .properties()
      .iter()
      .map(|property| {
        if property.tracks_unset() {
          set_only(metadata.property_enum(), property)
        } else if property.generator().value_field_nullable() {
          present_only(property)
        } else {
          labelled(property)
        }
      })
      .collect::<Vec<_>>();
    add_joined_to_string(code, &format!("\"partial {type_name}{{\""), &items);
  }
  code.line("    }").line("  }");
}

fn inheritance(metadata: &Metadata) -> &'static str {
  if metadata.interface_type() { "implements" } else { "extends" }
}

fn add_getter_header(code: &mut SourceBuilder, property: &Property) {
  code
    .line("")
    .line("    @Override")
    .add_line(
      "    public %s %s() {",
      &[&property.declared_type, &property.getter_name],
    );
}

/// Returns the name of the local holding the cast argument.
fn add_equals_header(code: &mut SourceBuilder, metadata: &Metadata, class: &ClassName) -> String {
  let obj = metadata.local_name("obj");
  let other = metadata.local_name("other");
  code
    .line("")
    .line("    @Override")
    .add_line("    public boolean equals(Object %s) {", &[&obj])
    .add_line("      if (!(%s instanceof %s)) {", &[&obj, class])
    .line("        return false;")
    .line("      }")
    .add_line("      %1$s %2$s = (%1$s) %3$s;", &[class, &other, &obj]);
  other
}

fn add_to_string_header(code: &mut SourceBuilder) {
  code
    .line("")
    .line("    @Override")
    .line("    public String toString() {");
}

/// Emits `if (<field differs>) { return false; }`. Floating point fields are
/// compared by bit pattern so that `NaN` equals itself.
fn add_field_inequality(code: &mut SourceBuilder, property: &Property, null_safe: bool, other: &str) {
  let name = &property.name;
  match property.generator().value_field_type(property).as_primitive() {
    Some(PrimitiveType::Float) => {
      code.add_line(
        "      if (%1$s.floatToIntBits(%2$s) != %1$s.floatToIntBits(%3$s.%2$s)) {",
        &[&PrimitiveType::Float.boxed_class(), name, &other],
      );
    }
    Some(PrimitiveType::Double) => {
      code.add_line(
        "      if (%1$s.doubleToLongBits(%2$s) != %1$s.doubleToLongBits(%3$s.%2$s)) {",
        &[&PrimitiveType::Double.boxed_class(), name, &other],
      );
    }
    Some(_) => {
      code.add_line("      if (%1$s != %2$s.%1$s) {", &[name, &other]);
    }
    None if null_safe => {
      code
        .add_line("      if (%1$s != %2$s.%1$s", &[name, &other])
        .add_line("          && (%1$s == null || !%1$s.equals(%2$s.%1$s))) {", &[name, &other]);
    }
    None => {
      code.add_line("      if (!%1$s.equals(%2$s.%1$s)) {", &[name, &other]);
    }
  }
  code.line("        return false;").line("      }");
}

fn labelled(property: &Property) -> String {
  format!("\"{0}=\" + {0}", property.name)
}

fn present_only(property: &Property) -> String {
  format!("({0} != null ? \"{0}=\" + {0} : null)", property.name)
}

fn set_only(property_enum: &ClassName, property: &Property) -> String {
  format!(
    "(!_unsetProperties.contains({}.{})\n                  ? \"{name}=\" + {name} : null)",
    property_enum.nested_path(),
    property.all_caps_name,
    name = property.name,
  )
}

fn add_joined_to_string(code: &mut SourceBuilder, prefix: &str, items: &[String]) {
  code
    .line(&format!("      return {prefix}"))
    .line("          + COMMA_JOINER.join(");
  let last = items.len().saturating_sub(1);
  for (index, item) in items.iter().enumerate() {
    let terminator = if index == last { ")" } else { "," };
    code.line(&format!("              {item}{terminator}"));
  }
  code.line("          + \"}\";");
}
