use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::languages::TargetLanguage;

#[derive(Parser, Debug)]
#[command(name = "swagger-sdk-gen")]
#[command(author, version, about = "Swagger 2.0 to multi-language SDK generator")]
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
  /// List information from a Swagger document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate SDK sources from a Swagger document
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the Swagger 2.0 document (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Directory that generated targets are written under
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Target languages rendered with the built-in templates (comma-separated)
  #[arg(
    short,
    long,
    value_enum,
    value_name = "LANGS",
    value_delimiter = ',',
    required_unless_present = "task"
  )]
  pub languages: Vec<TargetLanguage>,

  /// Render task file describing custom targets, templates and fixups
  #[arg(short, long, value_name = "FILE", conflicts_with = "languages")]
  pub task: Option<PathBuf>,

  /// Include only specific operations (comma-separated operation ids)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Exclude specific operations (comma-separated operation ids)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub exclude: Option<Vec<String>>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the Swagger document
  Operations {
    /// Path to the Swagger 2.0 document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// List the target languages with built-in templates
  Languages,
}
