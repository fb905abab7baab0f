use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{
    ast::Metadata,
    metrics::GenerationStats,
    orchestrator::{CodegenConfig, Orchestrator},
  },
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::DeclarationLoader,
};

struct PropertyRow {
  type_name: String,
  property: String,
  getter: String,
  declared_type: String,
  strategy: String,
  required: bool,
}

fn property_rows(types: &[Metadata]) -> Vec<PropertyRow> {
  types
    .iter()
    .flat_map(|metadata| {
      metadata.properties().iter().map(|property| PropertyRow {
        type_name: metadata.target().nested_path(),
        property: property.name.clone(),
        getter: format!("{}()", property.getter_name),
        declared_type: property.declared_type.to_string(),
        strategy: property.strategy.kind().to_string(),
        required: property.tracks_unset(),
      })
    })
    .collect()
}

pub async fn list_properties(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let declarations = DeclarationLoader::open(input).await?.parse()?;
  let orchestrator = Orchestrator::new(declarations, CodegenConfig::builder().build(), None);

  let mut stats = GenerationStats::default();
  let types = orchestrator.convert_types(&mut stats);

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["TYPE", "PROPERTY", "GETTER", "DECLARED TYPE", "STRATEGY", "REQUIRED"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for entry in property_rows(&types) {
    let mut row = Row::new();
    row.add_cell(Cell::new(entry.type_name).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(
      Cell::new(entry.property)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(entry.getter).fg(IntoComfyColor::into(colors.muted())));
    row.add_cell(Cell::new(entry.declared_type).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(
      Cell::new(entry.strategy)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    let required = if entry.required { "yes" } else { "no" };
    row.add_cell(Cell::new(required).set_alignment(CellAlignment::Center));
    table.add_row(row);
  }

  println!("{table}");

  for warning in &stats.warnings {
    eprintln!(
      "{} {}",
      "Warning:".with(colors.accent()),
      format!("{warning}").with(colors.primary())
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::DeclarationFile;

  #[test]
  fn test_property_rows_follow_declaration_order() {
    let declarations = DeclarationFile::from_json(
      br#"{"types": [{
        "name": "com.example.Person",
        "properties": [
          {"getter": "getName", "type": "String"},
          {"getter": "getNicknames", "type": "java.util.List<String>"},
          {"getter": "getAge", "type": "int", "has_default": true}
        ]
      }]}"#,
    )
    .unwrap();
    let orchestrator = Orchestrator::new(declarations, CodegenConfig::builder().build(), None);
    let types = orchestrator.convert_types(&mut GenerationStats::default());

    let rows = property_rows(&types);
    let summary = rows
      .iter()
      .map(|row| (row.property.as_str(), row.strategy.as_str(), row.required))
      .collect::<Vec<_>>();
    assert_eq!(
      summary,
      vec![("name", "Default", true), ("nicknames", "List", false), ("age", "Default", false)]
    );
    assert_eq!(rows[0].type_name, "Person");
    assert_eq!(rows[1].getter, "getNicknames()");
  }
}
