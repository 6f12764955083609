use clap::{Parser, Subcommand, ValueEnum};
use simple_blog::content::{self, Manifest};
use simple_blog::registry::ManifestRegistry;
use simple_blog::{config, output, pipeline};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Plan the pages of a Markdown blog")]
#[command(long_about = "\
Plan the pages of a Markdown blog

Every Markdown file under the content directory is a post. Its URL comes
from its location, posts are ordered newest first by their front matter
date, and each planned page links to the posts before and after it.

Content structure:

  content/
  ├── config.toml              # Site config (optional)
  ├── hello-world/
  │   └── index.md             # → /hello-world/
  ├── my-second-post.md        # → /my-second-post/
  └── .drafts/                 # Hidden directories are skipped

Front matter (YAML-style or TOML):

  ---                          +++
  title: Hello World           title = \"Hello World\"
  date: 2015-05-01             date = 2015-05-01
  ---                          +++

Run 'simple-blog gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory for stage manifests (manifest.json, pages.json)
    #[arg(long, default_value = ".simple-blog-temp", global = true)]
    temp_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true, env = "SIMPLE_BLOG_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Plan page records from <temp-dir>/manifest.json (ignores --source)
    Plan,
    /// Run the full pipeline: scan → plan
    Build,
    /// Validate content without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match cli.command {
        Command::Scan => {
            let manifest = content::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Plan => {
            let manifest_content = std::fs::read_to_string(cli.temp_dir.join("manifest.json"))?;
            let manifest: Manifest = serde_json::from_str(&manifest_content)?;
            let pages = plan_to_disk(&manifest, &cli.temp_dir)?;
            output::print_plan_output(&pages);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = content::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Planning pages");
            let pages = plan_to_disk(&manifest, &cli.temp_dir)?;
            output::print_plan_output(&pages);

            println!(
                "==> Build complete: {}",
                cli.temp_dir.join("pages.json").display()
            );
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = content::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(manifest: &Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}

fn plan_to_disk(
    manifest: &Manifest,
    temp_dir: &Path,
) -> Result<Vec<simple_blog::types::PageRecord>, Box<dyn std::error::Error>> {
    let pages = pipeline::plan_manifest(manifest);
    let mut registry = ManifestRegistry::new(temp_dir.join("pages.json"));
    pipeline::register(&pages, &mut registry)?;
    Ok(registry.finish()?)
}

/// Install a stderr tracing subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8, format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default = match verbose {
        0 => "simple_blog=warn",
        1 => "simple_blog=info",
        2 => "simple_blog=debug",
        _ => "simple_blog=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}
