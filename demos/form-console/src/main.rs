//! Command-line front end for the kfunc tool catalog.
//!
//! Lists spaces and tools, prints a tool's input schema and runs a tool with
//! `--field name=value` pairs standing in for a submitted form.

mod tools;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use kfunc::forms::FormValues;
use kfunc::tools::catalog::ToolCatalog;
use kfunc::tools::tool::{submit, ToolContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "form-console", version, about = "Describe and run kfunc tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the spaces tools are grouped under.
    Spaces,
    /// List the tools in a space.
    Tools {
        /// Space name.
        space: String,
    },
    /// Print a tool's input schema as JSON.
    Schema {
        /// Tool identifier.
        id: String,
    },
    /// Bind the given fields onto a fresh form and run the tool.
    Run {
        /// Tool identifier.
        id: String,
        /// Submitted value as `name=value`; repeat for multi-valued fields.
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let catalog = ToolCatalog::new();
    tools::register_all(&catalog);
    info!(tools = catalog.len(), "catalog ready");

    match cli.command {
        Command::Spaces => {
            for space in catalog.list_spaces() {
                println!("{space}");
            }
        }
        Command::Tools { space } => {
            for tool in catalog.list_by_space(&space) {
                println!("{}\t{}\t{}", tool.id(), tool.name(), tool.description());
            }
        }
        Command::Schema { id } => {
            let tool = catalog.get(&id).ok_or_else(|| anyhow!("unknown tool `{id}`"))?;
            let schema = serde_json::to_string_pretty(&tool.schema())
                .context("failed to render schema")?;
            println!("{schema}");
        }
        Command::Run { id, fields } => {
            let tool = catalog.get(&id).ok_or_else(|| anyhow!("unknown tool `{id}`"))?;
            let values: FormValues = fields.into_iter().collect();
            info!(tool = %id, fields = values.len(), "running tool");

            let output = submit(tool.as_ref(), &ToolContext::new(), &values)
                .await
                .with_context(|| format!("tool `{id}` failed"))?;
            println!("{output}");
        }
    }

    Ok(())
}
