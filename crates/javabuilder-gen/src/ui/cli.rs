use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::codegen::SourceLevel;

#[derive(Parser, Debug)]
#[command(name = "javabuilder-gen")]
#[command(author, version, about = "Java builder class generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a declaration file
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate Java builder superclasses from a declaration file
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the JSON declaration file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Root directory for the generated sources; package directories are created below it
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Java source level of the generated code (java6 or java7)
  #[arg(long, value_name = "LEVEL", default_value = "java6")]
  pub source_level: SourceLevel,

  /// Generate only the listed types (comma-separated, qualified or simple names)
  #[arg(long, value_name = "TYPES", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every declared property with its type and bound strategy
  Properties {
    /// Path to the JSON declaration file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
