//! ScholarNet CLI: faculty lookup from the command line
//!
//! Connects to a Neo4j-compatible server through `RemoteFactory`, or with
//! `--embedded` runs against the bundled sample graph in-process.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

use scholarnet::query::GraphQuery;
use scholarnet::{Entity, EntityProfile, LookupOutcome, NeighborhoodView, Resolution, Resolver, ResolverConfig};
use scholarnet_sdk::{ConnectionFactory, EmbeddedFactory, RemoteFactory, StoreConfig};

#[derive(Parser)]
#[command(name = "scholarnet", version, about = "Faculty, publication and keyword lookup")]
struct Cli {
    /// Server HTTP URL
    #[arg(long, global = true, env = "SCHOLARNET_URL")]
    url: Option<String>,

    /// Database name
    #[arg(long, global = true, env = "SCHOLARNET_DATABASE")]
    database: Option<String>,

    /// User for basic auth
    #[arg(long, global = true, env = "SCHOLARNET_USER")]
    user: Option<String>,

    /// Password for basic auth
    #[arg(long, global = true, env = "SCHOLARNET_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// YAML file with `store:` and `resolver:` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Use the bundled sample graph instead of a server
    #[arg(long, global = true)]
    embedded: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a name and show its publications and keywords
    Lookup { name: String },
    /// Resolve a name to a single faculty member
    Resolve { name: String },
    /// Suggest faculty names resembling the query
    Suggest {
        name: String,

        /// How many names to sample from the store
        #[arg(long, default_value_t = 10)]
        sample: usize,
    },
    /// Show properties and relationships of a faculty member
    Describe { name: String },
    /// List labels and relationship types in the store
    Schema,
    /// Check the connection
    Ping,
    /// Interactive lookup prompt
    Shell,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    store: StoreConfig,
    resolver: ResolverConfig,
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let yaml = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: FileConfig = serde_yaml::from_str(&yaml).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

impl Cli {
    /// File settings, then flags and environment on top
    fn store_config(&self, mut store: StoreConfig) -> Result<StoreConfig> {
        if let Some(url) = &self.url {
            store.url = url.clone();
        }
        if let Some(database) = &self.database {
            store.database = database.clone();
        }
        if let Some(user) = &self.user {
            store.user = user.clone();
        }
        if let Some(password) = &self.password {
            store.password = password.clone();
        }
        store.validate().context("invalid store settings")?;
        Ok(store)
    }

    fn factory(&self, store: StoreConfig) -> Result<Arc<dyn ConnectionFactory>> {
        if self.embedded {
            let factory = EmbeddedFactory::sample().context("building sample graph")?;
            return Ok(Arc::new(factory));
        }
        let store = self.store_config(store)?;
        Ok(Arc::new(RemoteFactory::new(store).context("building HTTP client")?))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let factory = cli.factory(config.store)?;
    let resolver = Resolver::new(factory.clone(), config.resolver)?;

    let result = match &cli.command {
        Commands::Lookup { name } => run_lookup(&resolver, name, &cli.format).await,
        Commands::Resolve { name } => run_resolve(&resolver, name, &cli.format).await,
        Commands::Suggest { name, sample } => run_suggest(&resolver, name, *sample, &cli.format).await,
        Commands::Describe { name } => run_describe(&resolver, name, &cli.format).await,
        Commands::Schema => run_schema(&resolver, &cli.format).await,
        Commands::Ping => run_ping(factory.as_ref()).await,
        Commands::Shell => run_shell(&resolver, factory.as_ref(), &cli.format).await,
    };

    factory.shutdown().await;
    result
}

async fn run_lookup(resolver: &Resolver, name: &str, format: &OutputFormat) -> Result<()> {
    let outcome = resolver.lookup(name).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Table => {
            if let LookupOutcome::Found(view) = &outcome {
                println!("{}", neighborhood_table(view));
            }
            println!("{}", outcome.summary());
        }
    }
    Ok(())
}

async fn run_resolve(resolver: &Resolver, name: &str, format: &OutputFormat) -> Result<()> {
    let resolution = resolver.resolve(name).await?;

    match (format, &resolution) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(&resolution)?),
        (OutputFormat::Table, Resolution::Found { entity, tier }) => {
            println!("{}", entity_table(entity));
            println!("Matched by {} name comparison", tier.as_str());
        }
        (OutputFormat::Table, Resolution::NotFound) => println!("No faculty member matches '{}'", name.trim()),
    }
    Ok(())
}

async fn run_suggest(resolver: &Resolver, name: &str, sample: usize, format: &OutputFormat) -> Result<()> {
    let suggestions = resolver.suggest(name, sample).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
        OutputFormat::Table => println!("{}", suggestions),
    }
    Ok(())
}

async fn run_describe(resolver: &Resolver, name: &str, format: &OutputFormat) -> Result<()> {
    let profile = resolver.describe(name).await?;

    match (format, &profile) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(&profile)?),
        (OutputFormat::Table, Some(profile)) => println!("{}", profile_table(profile)),
        (OutputFormat::Table, None) => println!("No faculty member matches '{}'", name.trim()),
    }
    Ok(())
}

async fn run_schema(resolver: &Resolver, format: &OutputFormat) -> Result<()> {
    let schema = resolver.probe_schema().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schema)?),
        OutputFormat::Table => {
            let mut table = new_table(&["Labels", "Relationship types"]);
            let rows = schema.labels.len().max(schema.relationship_types.len());
            for i in 0..rows {
                table.add_row(vec![
                    schema.labels.get(i).cloned().unwrap_or_default(),
                    schema.relationship_types.get(i).cloned().unwrap_or_default(),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

async fn run_ping(factory: &dyn ConnectionFactory) -> Result<()> {
    let mut conn = factory.acquire().await.context("connecting to store")?;
    let result = conn.execute(&GraphQuery::Ping).await?;
    let message = result.rows().next().and_then(|row| row.str("message")).unwrap_or("(no reply)");
    println!("{} to {}", message, conn.server_info());
    Ok(())
}

async fn run_shell(resolver: &Resolver, factory: &dyn ConnectionFactory, format: &OutputFormat) -> Result<()> {
    println!("ScholarNet Interactive Shell");
    println!("Type a faculty name, or :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("scholarnet> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let outcome = match trimmed {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :schema   Show labels and relationship types");
                println!("  :ping     Check the connection");
                println!("  :quit     Exit shell");
                println!("  <name>    Look up a faculty member");
                continue;
            }
            ":schema" => run_schema(resolver, format).await,
            ":ping" => run_ping(factory).await,
            name => run_lookup(resolver, name, format).await,
        };
        if let Err(e) = outcome {
            eprintln!("Error: {:#}", e);
        }
    }

    println!("Bye!");
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn neighborhood_table(view: &NeighborhoodView) -> Table {
    let mut table = new_table(&["#", "Publication", "Citations", "Keywords"]);
    for (rank, primary) in view.primary.iter().enumerate() {
        let keywords: Vec<String> = primary
            .secondary
            .iter()
            .map(|k| format!("{} ({})", k.display_name(), format_weight(k.weight)))
            .collect();
        table.add_row(vec![
            (rank + 1).to_string(),
            primary.item.display_name().to_string(),
            format_weight(primary.item.weight),
            keywords.join(", "),
        ]);
    }
    table
}

fn entity_table(entity: &Entity) -> Table {
    let mut table = new_table(&["Field", "Value"]);
    table.add_row(vec!["id".to_string(), entity.id.clone()]);
    table.add_row(vec!["name".to_string(), entity.name.clone()]);
    table.add_row(vec!["labels".to_string(), entity.labels.join(", ")]);
    for (key, value) in &entity.attributes {
        table.add_row(vec![key.clone(), format_table_value(value)]);
    }
    table
}

fn profile_table(profile: &EntityProfile) -> Table {
    let mut table = new_table(&["Field", "Value"]);
    table.add_row(vec!["name".to_string(), profile.name.clone()]);
    table.add_row(vec!["properties".to_string(), profile.property_keys.join(", ")]);
    table.add_row(vec!["relationships".to_string(), profile.relationship_types.join(", ")]);
    table.add_row(vec!["connected labels".to_string(), profile.connected_labels.join(", ")]);
    table
}

fn format_weight(weight: Option<f64>) -> String {
    match weight {
        Some(w) if w.fract() == 0.0 => format!("{}", w as i64),
        Some(w) => format!("{:.2}", w),
        None => "-".to_string(),
    }
}

fn format_table_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => serde_json::to_string(v).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(Some(120.0)), "120");
        assert_eq!(format_weight(Some(0.875)), "0.88");
        assert_eq!(format_weight(None), "-");
    }

    #[test]
    fn test_flags_override_file() {
        let cli = Cli::parse_from(["scholarnet", "--url", "http://graph:7474", "--database", "academic", "ping"]);
        let store = cli.store_config(StoreConfig { user: "reader".into(), ..StoreConfig::default() }).unwrap();
        assert_eq!(store.url, "http://graph:7474");
        assert_eq!(store.database, "academic");
        assert_eq!(store.user, "reader");
    }

    #[test]
    fn test_file_config_sections() {
        let config: FileConfig =
            serde_yaml::from_str("store:\n  database: academic\nresolver:\n  primary_limit: 7\n").unwrap();
        assert_eq!(config.store.database, "academic");
        assert_eq!(config.resolver.primary_limit, 7);
        assert_eq!(config.resolver.secondary_limit, 3);
    }
}
