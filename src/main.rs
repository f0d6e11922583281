use by_example::code_panel::{CopyState, StdoutClipboard};
use by_example::theme::ThemePreference;
use by_example::{config, generate, output, registry, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; called a single time at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "by-example")]
#[command(about = "Static site generator for code-by-example documentation")]
#[command(long_about = "\
Static site generator for code-by-example documentation

A route registry lists every page, markdown files hold the prose, and
example sources become highlighted code panels with a copy button.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── routes.toml                  # Route registry: sections and entries
  ├── index.md                     # Home page intro (optional)
  ├── assets/                      # Static assets (favicon, fonts) → copied to output root
  ├── basic_examples/
  │   ├── index.md                 # Section intro (optional)
  │   └── hello_world.md           # Page for route /basic_examples/hello_world
  └── example_code/                # Sources included with ```rust file=...

Registry format:

  [[section]]
  title = \"Basic\"
  slug = \"basic_examples\"          # optional: generates /basic_examples/

  [[section.entry]]
  route = \"/basic_examples/hello_world\"
  title = \"Hello World\"
  description = \"Learn how to use the console output\"

Run 'by-example gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".by-example-temp", global = true)]
    temp_dir: PathBuf,

    /// Log progress (info level); otherwise RUST_LOG applies, default warn
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build {
        /// Theme the pages are rendered with before the page script runs
        #[arg(long, value_enum)]
        theme: Option<ThemePreference>,
    },
    /// Validate content directory without building
    Check,
    /// List the route registry
    Routes,
    /// Print a page's code block, exactly as its copy button copies it
    Snippet {
        /// Page route, e.g. /basic_examples/hello_world
        route: String,
        /// Code block number on the page, starting at 1
        #[arg(long, default_value_t = 1)]
        index: usize,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.source, &cli.output, None)?;
            output::print_generate_output(&report);
        }
        Command::Build { theme } => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report =
                generate::generate_from_manifest(&manifest, &cli.source, &cli.output, theme)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_check_output(&manifest);
        }
        Command::Routes => {
            let registry = registry::load_registry(&cli.source)?;
            output::print_routes(&registry);
        }
        Command::Snippet { route, index } => {
            let manifest = scan::scan(&cli.source)?;
            let page = manifest
                .page(&route)
                .ok_or_else(|| format!("no page for route {route}"))?;
            let block = index
                .checked_sub(1)
                .and_then(|i| page.code_blocks.get(i))
                .ok_or_else(|| {
                    format!(
                        "{route} has {} code block(s); --index {index} is out of range",
                        page.code_blocks.len()
                    )
                })?;
            let mut copy = block.copy_affordance(&manifest.config.code);
            let mut clipboard = StdoutClipboard::new();
            if copy.copy_to(&mut clipboard, Instant::now()) == CopyState::Failed {
                return Err("could not write snippet to stdout".into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` enables INFO level, otherwise RUST_LOG or WARN. Logs go to
/// stderr so command output on stdout stays pipeable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}
