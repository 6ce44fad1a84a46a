//! CLI argument definitions for `kata`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kata",
    version,
    about = "Inspect technique catalogs and drive the cascading technique selector",
    long_about = "Inspect technique catalogs and drive the cascading technique selector.\n\n\
                  A catalog is an XML hierarchy, a JSON table file, or a directory with a\n\
                  catalog.toml manifest. Without a CATALOG argument the KATA_CATALOG\n\
                  environment variable or the bundled catalog is used."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Load catalogs with integrity errors instead of refusing them.
    #[arg(long = "lenient", global = true)]
    pub lenient: bool,

    /// Image shown while a selector has no choice (overrides the manifest).
    #[arg(long = "placeholder", value_name = "IMAGE", global = true)]
    pub placeholder: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a catalog and report its integrity issues.
    Check(CheckArgs),

    /// List the candidates of the first step, or those following a value.
    Values(ValuesArgs),

    /// Select values step by step and show the resulting selectors.
    Walk(WalkArgs),

    /// Render the selector as HTML.
    Render(RenderArgs),

    /// Export the catalog as the legacy JavaScript data script.
    ExportJs(ExportJsArgs),
}

#[derive(Args)]
pub struct CatalogArg {
    /// Catalog file or directory.
    #[arg(long = "catalog", short = 'c', value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Catalog file or directory.
    #[arg(value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Fail on warnings too.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ValuesArgs {
    /// Catalog file or directory.
    #[arg(value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// List the values that may follow this one.
    #[arg(long = "from", value_name = "VALUE")]
    pub from: Option<String>,
}

#[derive(Args)]
pub struct WalkArgs {
    #[command(flatten)]
    pub catalog: CatalogArg,

    /// Values to select, one per step, starting at step 0.
    #[arg(value_name = "VALUE", required_unless_present = "at")]
    pub values: Vec<String>,

    /// Afterwards change an existing step (`-----` clears it); repeatable.
    #[arg(long = "at", value_name = "STEP=VALUE")]
    pub at: Vec<String>,

    /// Show the preview for this step's thumbnail afterwards.
    #[arg(long = "hover", value_name = "STEP")]
    pub hover: Option<usize>,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Catalog file or directory.
    #[arg(value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Values to select before rendering.
    #[arg(long = "select", value_name = "VALUE", num_args = 1..)]
    pub select: Vec<String>,

    /// Afterwards change an existing step (`-----` clears it); repeatable.
    #[arg(long = "at", value_name = "STEP=VALUE")]
    pub at: Vec<String>,

    /// Hover this step's thumbnail before rendering.
    #[arg(long = "hover", value_name = "STEP")]
    pub hover: Option<usize>,

    /// Write to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Indent the markup.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Args)]
pub struct ExportJsArgs {
    /// Catalog file or directory.
    #[arg(value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Write to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Leave out the generation time stamp.
    #[arg(long = "no-timestamp")]
    pub no_timestamp: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
