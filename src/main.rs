use anyhow::Context;
use clap::{Parser, Subcommand};
use schemaql::{
    config,
    schema_catalog::{ResolveMode, SchemaConfig},
    server, translator,
};

const DEFAULT_SCHEMA: &str = "schemas/commerce.yaml";

/// SchemaQL - translate logical-schema SQL into physical-schema SQL
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema YAML (tables, columns, hierarchy)
    #[arg(long, global = true)]
    schema: Option<String>,

    /// Render unknown tables and columns as written instead of failing
    #[arg(long, global = true)]
    passthrough_unknown: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server with these settings. Without a subcommand the
    /// server starts from SCHEMAQL_* environment variables.
    Serve {
        /// HTTP server host address
        #[arg(long, default_value = "0.0.0.0")]
        http_host: String,

        /// HTTP server port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,

        /// Per-request timeout in seconds
        #[arg(long)]
        request_timeout_secs: Option<u64>,

        /// Largest accepted request body in bytes
        #[arg(long)]
        max_body_bytes: Option<usize>,
    },
    /// Translate one query and print the physical SQL
    Translate {
        /// Logical SQL query
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to INFO, override with RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let schema_path = cli
        .schema
        .clone()
        .unwrap_or_else(|| DEFAULT_SCHEMA.to_string());

    match cli.command {
        Some(Command::Translate { query }) => {
            let (catalog, hierarchy) = SchemaConfig::from_yaml_file(&schema_path)
                .and_then(|schema| schema.build())
                .with_context(|| format!("loading schema {}", schema_path))?;
            let mode = if cli.passthrough_unknown {
                ResolveMode::PassthroughOnMiss
            } else {
                ResolveMode::Strict
            };
            match translator::translate(&query, &catalog, &hierarchy, mode) {
                Ok(translation) => {
                    println!("{}", translation.sql);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("{}: {}", e.kind(), e);
                    std::process::exit(2);
                }
            }
        }
        Some(Command::Serve {
            http_host,
            http_port,
            request_timeout_secs,
            max_body_bytes,
        }) => {
            let config = config::ServerConfig::from_cli(config::CliConfig {
                http_host,
                http_port,
                schema_path,
                passthrough_unknown: cli.passthrough_unknown,
                request_timeout_secs,
                max_body_bytes,
            })?;
            serve(config).await
        }
        None => {
            let mut config = config::ServerConfig::from_env()?;
            if let Some(schema) = cli.schema {
                config.schema_path = schema;
            }
            if cli.passthrough_unknown {
                config.passthrough_unknown = true;
            }
            serve(config).await
        }
    }
}

async fn serve(config: config::ServerConfig) -> anyhow::Result<()> {
    println!("\nSchemaQL v{}\n", env!("CARGO_PKG_VERSION"));
    if let Err(e) = server::run_with_config(config).await {
        log::error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}
