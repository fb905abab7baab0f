//! GWT RPC custom field serializer for the Value class.

use super::SourceBuilder;
use crate::generator::ast::{Metadata, known_types};

pub(super) fn add_custom_field_serializer(code: &mut SourceBuilder, metadata: &Metadata) {
  let value = metadata.value_type();
  let Some(new_builder) = metadata.new_builder_expression() else {
    return;
  };

  code
    .line("")
    .add_line("  @%s", &[&*known_types::GWT_COMPATIBLE])
    .add_line("  public static class %s_CustomFieldSerializer", &[&value.simple_name()])
    .add_line(
      "      extends %s<%s> {",
      &[&*known_types::CUSTOM_FIELD_SERIALIZER, value],
    )
    .line("")
    .line("    @Override")
    .add_line(
      "    public void deserializeInstance(%s reader, %s instance) {}",
      &[&*known_types::SERIALIZATION_STREAM_READER, value],
    )
    .line("")
    .line("    @Override")
    .line("    public boolean hasCustomInstantiateInstance() {")
    .line("      return true;")
    .line("    }")
    .line("");

  let unchecked = metadata
    .properties()
    .iter()
    .any(|property| !property.fully_checked_cast);
  if unchecked {
    code.add_line("    @%s(\"unchecked\")", &[&*known_types::SUPPRESS_WARNINGS]);
  }
  // Each field is read into a local named after the property.
  let reader = metadata.local_name("reader");
  let builder = metadata.local_name("builder");
  code
    .line("    @Override")
    .add_line(
      "    public %s instantiateInstance(%s %s)",
      &[value, &*known_types::SERIALIZATION_STREAM_READER, &reader],
    )
    .add_line("        throws %s {", &[&*known_types::SERIALIZATION_EXCEPTION])
    .add_line("      %s %s = %s;", &[metadata.builder_type(), &builder, &new_builder]);
  for property in metadata.properties() {
    let generator = property.generator();
    let field_type = generator.value_field_type(property);
    code.line("      {");
    match field_type.as_primitive() {
      Some(primitive) => {
        code.add_line(
          "        %s %s = %s.read%s();",
          &[&field_type, &property.name, &reader, &primitive.stream_suffix()],
        );
      }
      None => {
        code.add_line(
          "        %1$s %2$s = (%1$s) %3$s.readObject();",
          &[&field_type, &property.name, &reader],
        );
      }
    }
    generator.add_set_from_result(code, property, &builder, &property.name);
    code.line("      }");
  }
  code
    .add_line("      return (%s) %s.build();", &[value, &builder])
    .line("    }")
    .line("")
    .line("    @Override")
    .add_line(
      "    public void serializeInstance(%s writer, %s instance)",
      &[&*known_types::SERIALIZATION_STREAM_WRITER, value],
    )
    .add_line("        throws %s {", &[&*known_types::SERIALIZATION_EXCEPTION]);
  for property in metadata.properties() {
    match property.generator().value_field_type(property).as_primitive() {
      Some(primitive) => {
        code.add_line(
          "      writer.write%s(instance.%s);",
          &[&primitive.stream_suffix(), &property.name],
        );
      }
      None => {
        code.add_line("      writer.writeObject(instance.%s);", &[&property.name]);
      }
    }
  }
  code.line("    }").line("  }");
}
