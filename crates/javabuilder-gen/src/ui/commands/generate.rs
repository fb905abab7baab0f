use std::{collections::HashSet, path::PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    codegen::SourceLevel,
    metrics::GenerationStats,
    orchestrator::{CodegenConfig, GeneratedFile, Orchestrator},
  },
  ui::{Colors, GenerateCommand},
  utils::{DeclarationFile, DeclarationLoader},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub source_level: SourceLevel,
  pub verbose: bool,
  pub quiet: bool,
  pub only_types: Option<HashSet<String>>,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      source_level,
      only,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }

    Ok(Self {
      input,
      output,
      source_level,
      verbose,
      quiet,
      only_types: parse_only(only)?,
    })
  }

  async fn load_declarations(&self) -> anyhow::Result<DeclarationFile> {
    DeclarationLoader::open(&self.input).await?.parse()
  }

  fn create_orchestrator(&self, declarations: DeclarationFile) -> Orchestrator {
    let config = CodegenConfig::builder().source_level(self.source_level).build();
    Orchestrator::new(declarations, config, self.only_types.clone())
  }

  async fn write_file(&self, file: &GeneratedFile) -> anyhow::Result<PathBuf> {
    let path = self.output.join(&file.path);
    if let Some(parent) = path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &file.code).await?;
    Ok(path)
  }
}

fn parse_only(only: Option<Vec<String>>) -> anyhow::Result<Option<HashSet<String>>> {
  let Some(names) = only else {
    return Ok(None);
  };

  let mut selected = HashSet::new();
  for name in names {
    let name = name.trim();
    if name.is_empty() {
      anyhow::bail!("--only contains an empty type name");
    }
    selected.insert(name.to_string());
  }
  Ok(Some(selected))
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading declarations from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(
      &format!("Generating {} builders...", self.config.source_level)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Types generated:", stats.types_generated.to_string());
    if stats.types_filtered > 0 {
      self.stat("", format!("{} filtered by --only", stats.types_filtered));
    }
    if stats.types_skipped() > 0 {
      self.stat("", format!("{} skipped", stats.types_skipped()));
    }
    self.stat(
      "Properties:",
      format!(
        "{} ({} required)",
        stats.properties_generated, stats.required_properties
      ),
    );
    for (strategy, count) in &stats.strategies {
      self.stat("", format!("{count} {}", strategy.to_lowercase()));
    }
    if stats.gwt_serializers_generated > 0 {
      self.stat("GWT serializers:", stats.gwt_serializers_generated.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &stats.warnings {
      let should_print = warning.is_skipped_item() || self.config.verbose;
      if !should_print {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_file(&self, path: &std::path::Path) {
    if self.config.verbose {
      println!("              {}", path.display().to_string().with(self.colors.info()));
    }
  }

  fn log_success(&self, count: usize) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {count} Java builder sources").with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let declarations = config.load_declarations().await?;

  logger.log_generating();
  let orchestrator = config.create_orchestrator(declarations);
  let source_path = config.input.display().to_string();
  let output = orchestrator.generate_with_header(&source_path)?;
  logger.print_statistics(&output.stats);

  logger.log_writing();
  for file in &output.files {
    let path = config.write_file(file).await?;
    logger.log_file(&path);
  }

  logger.log_success(output.files.len());
  Ok(())
}
