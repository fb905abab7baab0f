use std::path::Path;

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde::Deserialize;

use crate::generator::ast::BuilderFactory;

const DEFAULT_BUILDER_NAME: &str = "Builder";

/// Root of a declaration file: the types to generate builders for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationFile {
  pub types: Vec<TypeDeclaration>,
}

impl DeclarationFile {
  pub fn from_json(json: &[u8]) -> anyhow::Result<Self> {
    serde_json::from_slice(json).context("invalid declaration file")
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
  #[default]
  AbstractClass,
  Interface,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDeclaration {
  /// Fully qualified name of the target type, e.g. `com.example.Person`.
  pub name: String,
  #[serde(default)]
  pub kind: TypeKind,
  #[serde(default)]
  pub builder: BuilderDeclaration,
  #[serde(default)]
  pub gwt_compatible: bool,
  #[serde(default)]
  pub gwt_serializable: bool,
  /// Qualified names visible by simple name in property types.
  #[serde(default)]
  pub imports: Vec<String>,
  #[serde(default)]
  pub properties: Vec<PropertyDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuilderDeclaration {
  /// Simple name of the user builder nested in the target type.
  #[serde(default = "default_builder_name")]
  pub name: String,
  /// `null` when the builder cannot be created by generated code.
  #[serde(default = "default_builder_factory")]
  pub factory: Option<BuilderFactory>,
  #[serde(default)]
  pub serializable: bool,
}

impl Default for BuilderDeclaration {
  fn default() -> Self {
    Self {
      name: default_builder_name(),
      factory: default_builder_factory(),
      serializable: false,
    }
  }
}

fn default_builder_name() -> String {
  DEFAULT_BUILDER_NAME.to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_builder_factory() -> Option<BuilderFactory> {
  Some(BuilderFactory::NoArgsConstructor)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDeclaration {
  pub getter: String,
  /// Java type expression, e.g. `List<? extends Number>`.
  #[serde(rename = "type")]
  pub type_expr: String,
  #[serde(default)]
  pub has_default: bool,
}

pub struct DeclarationLoader {
  file: AsyncMmapFile,
}

impl DeclarationLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Self { file })
  }

  pub fn parse(&self) -> anyhow::Result<DeclarationFile> {
    DeclarationFile::from_json(self.file.as_slice())
  }
}
