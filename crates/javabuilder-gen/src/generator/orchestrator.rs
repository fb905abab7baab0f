//! Orchestration for the declaration to Java builder generation pipeline.
//!
//! The [`Orchestrator`] converts every declared type into [`Metadata`], runs
//! the [`CodeGenerator`] over it and collects one [`GeneratedFile`] per type.
//! A type that fails to convert or emit is reported as a warning and skipped;
//! the remaining types are still generated.
//!
//! ## Usage
//!
//! ```no_run
//! use javabuilder_gen::generator::orchestrator::{CodegenConfig, Orchestrator};
//! use javabuilder_gen::utils::DeclarationFile;
//!
//! # fn example() -> anyhow::Result<()> {
//! let json = std::fs::read("types.json")?;
//! let declarations = DeclarationFile::from_json(&json)?;
//!
//! let orchestrator = Orchestrator::new(declarations, CodegenConfig::builder().build(), None);
//! let output = orchestrator.generate_with_header("types.json")?;
//!
//! println!("Generated {} builders", output.stats.types_generated);
//! # Ok(())
//! # }
//! ```

use std::{collections::HashSet, path::PathBuf};

use crate::{
  generator::{
    ast::Metadata,
    codegen::{CodeGenerator, GENERATOR_NAME, GenerationError, Phase, SourceBuilder, SourceLevel},
    converter::MetadataConverter,
    metrics::{GenerationStats, GenerationWarning},
  },
  utils::{DeclarationFile, TypeDeclaration},
};

/// Settings shared by every generated builder.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct CodegenConfig {
  #[builder(default)]
  pub source_level: SourceLevel,
  #[builder(into, default = GENERATOR_NAME.to_string())]
  pub generator_name: String,
}

/// One emitted compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
  /// Path relative to the output root, e.g. `com/example/Person_Builder.java`.
  pub path: PathBuf,
  /// Qualified name of the target type.
  pub type_name: String,
  pub code: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedFinalOutput {
  pub files: Vec<GeneratedFile>,
  pub stats: GenerationStats,
}

pub struct Orchestrator {
  declarations: DeclarationFile,
  config: CodegenConfig,
  only: Option<HashSet<String>>,
}

impl Orchestrator {
  /// `only` restricts generation to the named types, matched against either
  /// the qualified or the simple type name.
  pub fn new(declarations: DeclarationFile, config: CodegenConfig, only: Option<HashSet<String>>) -> Self {
    Self {
      declarations,
      config,
      only,
    }
  }

  fn is_selected(&self, declaration: &TypeDeclaration) -> bool {
    let Some(only) = &self.only else {
      return true;
    };
    only.iter().any(|name| names_declaration(name, declaration))
  }

  /// Converts every selected declaration, recording failures and warnings in `stats`.
  pub fn convert_types(&self, stats: &mut GenerationStats) -> Vec<Metadata> {
    let converter = MetadataConverter::default();
    stats.record_declared(self.declarations.types.len());

    if let Some(only) = &self.only {
      let unknown = only.iter().filter(|name| {
        !self
          .declarations
          .types
          .iter()
          .any(|declaration| names_declaration(name, declaration))
      });
      let mut unknown = unknown.cloned().collect::<Vec<_>>();
      unknown.sort();
      stats.record_warnings(
        unknown
          .into_iter()
          .map(|type_name| GenerationWarning::UnknownOnlyType { type_name }),
      );
    }

    let mut converted = vec![];
    for declaration in &self.declarations.types {
      if !self.is_selected(declaration) {
        stats.record_filtered();
        continue;
      }
      match converter.convert(declaration) {
        Ok(output) => {
          stats.record_warnings(output.warnings);
          converted.push(output.metadata);
        }
        Err(error) => stats.record_warning(GenerationWarning::TypeConversionFailed {
          type_name: declaration.name.clone(),
          error: error.to_string(),
        }),
      }
    }
    converted
  }

  /// Generates one Java compilation unit per selected type, without file headers.
  pub fn generate(&self) -> anyhow::Result<GeneratedFinalOutput> {
    let mut stats = GenerationStats::default();
    let generator = CodeGenerator::new(self.config.generator_name.clone());

    let mut files = vec![];
    for metadata in self.convert_types(&mut stats) {
      match self.generate_type(&generator, &metadata) {
        Ok(code) => {
          stats.record_type(&metadata);
          files.push(GeneratedFile {
            path: Self::output_path(&metadata),
            type_name: metadata.target().qualified_name(),
            code,
          });
        }
        Err(error) => stats.record_warning(GenerationWarning::TypeGenerationFailed {
          type_name: metadata.target().qualified_name(),
          error: format!("{:#}", anyhow::Error::from(error)),
        }),
      }
    }

    Ok(GeneratedFinalOutput { files, stats })
  }

  /// Like [`Self::generate`], with an auto-generated banner naming the
  /// declaration file at the top of every compilation unit.
  pub fn generate_with_header(&self, source_path: &str) -> anyhow::Result<GeneratedFinalOutput> {
    let mut output = self.generate()?;
    for file in &mut output.files {
      file.code = format!(
        "// AUTO-GENERATED CODE - DO NOT EDIT!\n// Source: {source_path}\n// Generated by `{}`\n\n{}",
        self.config.generator_name, file.code
      );
    }
    Ok(output)
  }

  fn generate_type(&self, generator: &CodeGenerator, metadata: &Metadata) -> Result<String, GenerationError> {
    let mut code = SourceBuilder::for_package(metadata.target().package(), self.config.source_level);
    generator.write_builder_source(&mut code, metadata)?;
    code.finish().map_err(|source| GenerationError::Emission {
      type_name: metadata.target().qualified_name(),
      phase: Phase::Footer,
      source,
    })
  }

  fn output_path(metadata: &Metadata) -> PathBuf {
    let generated = metadata.generated_builder();
    let mut path = generated.package().split('.').filter(|segment| !segment.is_empty()).collect::<PathBuf>();
    path.push(format!("{}.java", generated.simple_name()));
    path
  }
}

/// An `--only` entry names a declaration by its qualified or its simple name.
fn names_declaration(name: &str, declaration: &TypeDeclaration) -> bool {
  let simple_name = declaration.name.rsplit('.').next().unwrap_or(&declaration.name);
  name == declaration.name || name == simple_name
}
