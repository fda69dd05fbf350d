use clap::{Parser, Subcommand};
use docs_manifest::config::{self, ManifestConfig, Overrides};
use docs_manifest::{logging, output, scan};
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags shared by commands that scan a tree.
#[derive(clap::Args, Clone, Debug)]
struct ScanArgs {
    /// Root directory of the docs tree (e.g. /data/update-server/docs)
    #[arg(long)]
    root: PathBuf,

    /// URL prefix to prepend to asset paths [default: /docs]
    #[arg(long)]
    base_url_prefix: Option<String>,

    /// Top-level directory to include; repeatable. Omit to index every
    /// non-hidden top-level directory
    #[arg(long = "include", value_name = "DIR")]
    include: Vec<String>,

    /// Settings file (TOML); command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long, short)]
    quiet: bool,
}

impl ScanArgs {
    fn overrides(&self, output: Option<String>) -> Overrides {
        Overrides {
            base_url_prefix: self.base_url_prefix.clone(),
            output,
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            quiet: self.quiet.then_some(true),
        }
    }

    fn resolve(&self, output: Option<String>) -> Result<ManifestConfig, config::ConfigError> {
        let settings = config::load_settings(self.config.as_deref(), &self.overrides(output))?;
        Ok(ManifestConfig::new(&self.root, settings))
    }
}

#[derive(Parser)]
#[command(name = "docs-manifest")]
#[command(about = "Generate a documentation manifest (docs-manifest.json)")]
#[command(long_about = "\
Generate a documentation manifest (docs-manifest.json)

Scans a documentation tree and writes a JSON list describing every
HTML/PDF document, with titles, categories, versions and tags inferred
from the directory structure.

Tree structure:

  docs/
  ├── guides/                      # Collection / category \"Guides\"
  │   ├── EN-2.1/                  # Version \"EN 2.1\", language \"EN\"
  │   │   ├── setup.html           # ┐ one document: \"Setup\"
  │   │   └── setup.pdf            # ┘
  │   └── faq.html                 # Document without a version
  └── .internal/                   # Hidden: never indexed

Only .pdf and .html files are listed. Reruns on an unchanged tree
produce identical output.

Run 'docs-manifest gen-config' to print a documented settings file.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the tree and write the manifest
    Generate {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output directory (trailing /) or file [default: dl-index/]
        #[arg(long)]
        output: Option<String>,
    },
    /// Scan the tree and list the entries without writing anything
    Check {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Print a stock settings file with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("warning: logging disabled: {err}");
    }

    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Generate { scan: args, output: target } => {
            let config = args.resolve(target)?;
            let generated = scan::generate(&config)?;
            if !config.quiet {
                output::print_generate_output(&generated.scan, &generated.output_path);
            }
        }
        Command::Check { scan: args } => {
            let config = args.resolve(None)?;
            let scan = scan::scan(&config)?;
            if !config.quiet {
                output::print_check_output(&scan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
