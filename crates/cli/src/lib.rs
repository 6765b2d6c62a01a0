mod clean;
mod generate;
mod inspect;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rescat_core::config::{GeneratorConfig, ShardGranularity, Visibility};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rescat",
    version,
    about = "Generates sharded, statically-typed Rust accessors for a resource tree",
    long_about = "rescat scans a resource directory (drawable/, font/, values/, ...), groups qualified \
                  variants into logical resources and emits one Rust module per bounded shard plus a \
                  root module exposing every resource under a stable accessor name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the resource catalog
    #[command(
        long_about = "Scans RES_DIR and writes the generated modules into OUT_DIR. The output is \
                            replaced atomically and left untouched when already up to date."
    )]
    Generate {
        /// Resource root whose first-level directories name resource types
        #[arg(value_name = "RES_DIR")]
        root: PathBuf,
        /// Directory receiving mod.rs and the shard files
        #[arg(value_name = "OUT_DIR")]
        out: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
        /// Print the generation report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how the catalog would be sharded, without writing anything
    Inspect {
        /// Resource root whose first-level directories name resource types
        #[arg(value_name = "RES_DIR")]
        root: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Remove a previously generated output directory
    Clean {
        #[arg(value_name = "OUT_DIR")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    PerType,
    Namespace,
}

impl From<GranularityArg> for ShardGranularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::PerType => ShardGranularity::PerType,
            GranularityArg::Namespace => ShardGranularity::Namespace,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VisibilityArg {
    Public,
    Crate,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::Public => Visibility::Public,
            VisibilityArg::Crate => Visibility::Crate,
        }
    }
}

/// Generator settings: an optional JSON file, overridden field by field by flags.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Maximum resources per shard
    #[arg(long, value_name = "N")]
    pub max_shard_size: Option<usize>,
    #[arg(long, value_enum)]
    pub granularity: Option<GranularityArg>,
    /// Visibility of the generated namespace modules and functions
    #[arg(long, value_enum)]
    pub visibility: Option<VisibilityArg>,
    /// Path of the runtime crate in generated code
    #[arg(long, value_name = "PATH")]
    pub runtime_crate: Option<String>,
    /// Prefix prepended to every emitted resource path
    #[arg(long, value_name = "PREFIX")]
    pub path_prefix: Option<String>,
    /// Annotate accessors with a content hash
    #[arg(long)]
    pub content_hash: bool,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
        let mut config = rescat_runtime::load_config(self.config.as_deref())?;

        if let Some(size) = self.max_shard_size {
            config.max_shard_size = size;
        }
        if let Some(granularity) = self.granularity {
            config.granularity = granularity.into();
        }
        if let Some(visibility) = self.visibility {
            config.visibility = visibility.into();
        }
        if let Some(runtime_crate) = &self.runtime_crate {
            config.runtime_crate = runtime_crate.clone();
        }
        if let Some(prefix) = &self.path_prefix {
            config.path_prefix = prefix.clone();
        }
        if self.content_hash {
            config.content_hash = true;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Generate { .. } => "generate",
        Commands::Inspect { .. } => "inspect",
        Commands::Clean { .. } => "clean",
    };
    let _guard = rescat_runtime::init_logging(component, true);

    match cli.command {
        Commands::Generate {
            root,
            out,
            config,
            json,
        } => generate::run(root, out, config.resolve()?, json),
        Commands::Inspect { root, config } => inspect::run(root, config.resolve()?),
        Commands::Clean { out } => clean::run(out),
    }
}
