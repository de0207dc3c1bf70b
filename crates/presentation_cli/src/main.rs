//! GPT action API CLI
//!
//! Fetches the specification document and policy from a running server,
//! calls registered endpoints, and exports the sample API's document offline.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::HttpVerb;
use infrastructure::AppConfig;
use presentation_http::demo::build_demo_api;
use reqwest::{Method, header::AUTHORIZATION};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// GPT action API CLI
#[derive(Parser)]
#[command(name = "gpt-api-cli")]
#[command(author, version, about = "GPT action API CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the specification document from a running server
    Schema {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Fetch the privacy policy from a running server
    Policy {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Call a registered endpoint
    ///
    /// Example: gpt-api-cli call --verb post --path /sendmessage --data '{"message":"hi"}'
    Call {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,

        /// HTTP verb (get, post, put, delete, patch)
        #[arg(long, default_value = "get")]
        verb: HttpVerb,

        /// Endpoint path, e.g. /sendmessage
        #[arg(long)]
        path: String,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,

        /// Bearer token sent in the Authorization header
        #[arg(long, env = "GPT_API_TOKEN")]
        token: Option<String>,
    },

    /// Print the sample API's specification document without starting a server
    ExportSchema {
        /// Configuration file for the API info section
        #[arg(short, long, env = "GPT_API_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Check server health
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Join a server URL and an endpoint path
fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

const fn method_for(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Get => Method::GET,
        HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Delete => Method::DELETE,
        HttpVerb::Patch => Method::PATCH,
    }
}

/// Pretty-print JSON bodies, pass anything else through
fn format_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

async fn call_endpoint(
    client: &reqwest::Client,
    url: &str,
    verb: HttpVerb,
    path: &str,
    data: Option<String>,
    token: Option<String>,
) -> anyhow::Result<()> {
    let target = endpoint_url(url, path);
    debug!(%verb, %target, "Calling endpoint");

    let mut request = client.request(method_for(verb), &target);
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(data) = data {
        if !verb.accepts_body() {
            warn!(%verb, "Sending a body with a verb that usually has none");
        }
        let body: serde_json::Value =
            serde_json::from_str(&data).context("--data is not valid JSON")?;
        request = request.json(&body);
    }

    let resp = request.send().await?;
    let status = resp.status();
    let body = resp.text().await?;

    println!("{verb} {target} -> {status}");
    if !body.is_empty() {
        println!("{}", format_body(&body));
    }

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Schema { url } => {
            let resp = client
                .get(endpoint_url(&url, "/gpt/schema"))
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;

            println!("{}", format_body(&resp));
        },

        Commands::Policy { url } => {
            let resp = client
                .get(endpoint_url(&url, "/privacypolicy"))
                .send()
                .await?;

            if resp.status() == reqwest::StatusCode::NOT_FOUND {
                println!("No privacy policy is configured on {url}");
                std::process::exit(1);
            }

            println!("{}", resp.error_for_status()?.text().await?);
        },

        Commands::Call {
            url,
            verb,
            path,
            data,
            token,
        } => {
            call_endpoint(&client, &url, verb, &path, data, token).await?;
        },

        Commands::ExportSchema { config } => {
            let config = match config {
                Some(path) => AppConfig::load_from(&path)?,
                None => AppConfig::load()?,
            };
            let api = build_demo_api(config.api.into_api_info())?;
            println!("{}", api.spec_document().to_pretty_json()?);
        },

        Commands::Health { url } => match client.get(endpoint_url(&url, "/health")).send().await {
            Ok(resp) if resp.status().is_success() => {
                println!("✅ Healthy");
            },
            Ok(resp) => {
                println!("❌ Unhealthy: HTTP {}", resp.status());
                std::process::exit(1);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },
    }

    Ok(())
}
