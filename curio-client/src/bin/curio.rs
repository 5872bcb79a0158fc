//! `curio` command line tool

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use curio_client::files::{load_framework, load_tags};
use curio_client::{ClientConfig, HttpClient, init_logger};
use curio_engine::{
    BulkApplier, BulkPolicy, EngineConfig, FrameworkFilter, RegistryClient, RenderOptions,
    TagSession, TagStore, append_synchronized, detail, render,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "curio", version, about = "Dynamic asset tagging")]
struct Cli {
    /// Tag service base URL
    #[arg(long, global = true, env = "CURIO_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the tag service
    #[arg(long, global = true, env = "CURIO_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, global = true, env = "CURIO_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a tag set file as chips
    Render(RenderArgs),
    /// Add a framework's missing fields to a tag set file
    Sync {
        #[arg(long)]
        tags: PathBuf,
        #[arg(long)]
        framework: PathBuf,
        /// Overwrite the tag file instead of printing
        #[arg(long)]
        write: bool,
    },
    /// Check every framework-derived tag against its template
    Validate {
        #[arg(long)]
        tags: PathBuf,
    },
    /// Read frameworks or tags from the tag service
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },
    /// Apply one tag set to many files through the tag service
    Bulk {
        /// Target file ids
        #[arg(long = "file", required = true)]
        files: Vec<String>,
        #[arg(long)]
        tags: PathBuf,
        #[arg(long, value_enum, default_value_t = PolicyArg::Merge)]
        policy: PolicyArg,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    #[arg(long)]
    tags: PathBuf,
    #[arg(long, value_enum, default_value_t = ModeArg::Grouped)]
    mode: ModeArg,
    /// Maximum number of tag chips
    #[arg(long)]
    max: Option<usize>,
    /// Show the empty-state chip when nothing has a value
    #[arg(long)]
    placeholder: bool,
    /// Every tag, untruncated, ignoring --max
    #[arg(long, conflicts_with_all = ["max", "mode"])]
    detail: bool,
    /// Print the chip summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum FetchTarget {
    Framework { id: String },
    Frameworks {
        #[arg(long)]
        organization_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    Tags { file_id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Grouped,
    Exploded,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Replace,
    Merge,
}

impl From<PolicyArg> for BulkPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Replace => BulkPolicy::Replace,
            PolicyArg::Merge => BulkPolicy::Merge,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn http_client(cli: &Cli) -> anyhow::Result<HttpClient> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token);
    }
    config.build_http_client().context("Failed to build HTTP client")
}

fn run_render(args: &RenderArgs) -> anyhow::Result<()> {
    let tags = load_tags(&args.tags)?;
    let config = EngineConfig::from_env();

    let summary = if args.detail {
        detail(&tags, &config.render)
    } else {
        let mut options = match args.mode {
            ModeArg::Grouped => RenderOptions::grouped(),
            ModeArg::Exploded => RenderOptions::exploded(),
        };
        options = options.with_limit(args.max.into());
        if args.placeholder {
            options = options.with_placeholder();
        }
        render(&tags, &options, &config.render)
    };

    if args.json {
        return print_json(&summary);
    }
    for chip in &summary.chips {
        println!("[{}] {}", chip.color, chip.label);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Render(args) => run_render(args),
        Command::Sync {
            tags,
            framework,
            write,
        } => {
            let mut current = load_tags(tags)?;
            let framework = curio_engine::normalize_framework(load_framework(framework)?);
            let added = append_synchronized(&mut current, &framework);
            tracing::info!(added, framework_id = %framework.id, "Synchronized tag file");
            if *write {
                let text = serde_json::to_string_pretty(&current)?;
                std::fs::write(tags, text)
                    .with_context(|| format!("Failed to write {}", tags.display()))?;
                println!("Added {} tag(s) to {}", added, tags.display());
                Ok(())
            } else {
                print_json(&current)
            }
        }
        Command::Validate { tags } => {
            let session = TagSession::new("local", load_tags(tags)?);
            session.validate()?;
            println!("{} tag(s) valid", session.tags().len());
            Ok(())
        }
        Command::Fetch { target } => {
            let client = http_client(&cli)?;
            match target {
                FetchTarget::Framework { id } => {
                    let registry = RegistryClient::new(client);
                    print_json(&registry.fetch_framework(id).await?)
                }
                FetchTarget::Frameworks {
                    organization_id,
                    name,
                } => {
                    let registry = RegistryClient::new(client);
                    let filter = FrameworkFilter {
                        organization_id: organization_id.clone(),
                        name: name.clone(),
                    };
                    print_json(&registry.fetch_framework_list(&filter).await?)
                }
                FetchTarget::Tags { file_id } => print_json(&client.fetch_tags(file_id).await?),
            }
        }
        Command::Bulk {
            files,
            tags,
            policy,
        } => {
            let client = http_client(&cli)?;
            let tags = load_tags(tags)?;
            let summary = BulkApplier::new(client)
                .apply(files, &tags, (*policy).into())
                .await?;
            print_json(&summary)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logger(&cli.log_level, cli.log_json)?;
    run(cli).await
}
