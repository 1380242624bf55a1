//! toolcall-agent: answer one question with a tool-calling model.
//!
//! Usage:
//!   toolcall-agent [--finance] <query...>
//!
//! Configuration comes from the environment (and `.env`), see `TOOLCALL_*`.

use anyhow::Context;
use toolcall_agent::tools::{self, ToolsConfig};
use toolcall_agent::{ClientConfig, ToolCallingChatClient};
use tracing_subscriber::EnvFilter;

const FINANCE_PROMPT: &str = "You are a helpful finance assistant. \
If the company symbol is not known, use the get_company_symbol tool.";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("help" | "--help" | "-h") => {
            print_usage();
            if args.is_empty() {
                std::process::exit(1);
            }
        }
        Some("version" | "--version" | "-V") => {
            println!("toolcall-agent {}", env!("CARGO_PKG_VERSION"));
        }
        Some(_) => {
            if let Err(e) = run(&args) {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"toolcall-agent: tool-calling chat client

USAGE:
    toolcall-agent [--finance] <query...>

OPTIONS:
    --finance                   Register finance tools instead of weather tools

ENVIRONMENT:
    TOOLCALL_BASE_URL           OpenAI-compatible base URL (default http://localhost:1234/v1)
    TOOLCALL_MODEL              Model identifier
    TOOLCALL_API_KEY            Bearer token (falls back to GROQ_API_KEY)
    TOOLCALL_TIMEOUT_SECS       Request timeout in seconds
    TOOLCALL_SYSTEM_PROMPT      System persona text
    RUST_LOG                    Log filter (e.g. toolcall_agent=debug)"#
    );
}

fn run(args: &[String]) -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let finance = args.iter().any(|a| a == "--finance");
    let query = args
        .iter()
        .filter(|a| a.as_str() != "--finance")
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("no query given");
    }

    let mut config = ClientConfig::from_env().context("invalid configuration")?;
    if finance && std::env::var("TOOLCALL_SYSTEM_PROMPT").is_err() {
        config.system_prompt = FINANCE_PROMPT.to_string();
    }

    let mut client = ToolCallingChatClient::new(config)?;
    if finance {
        tools::register_finance_tools(&mut client)?;
    } else {
        tools::register_weather_tools(&mut client, &ToolsConfig::default())?;
    }

    let answer = client.query(&query)?;
    println!("{}", answer.content);
    tracing::info!(
        requests = answer.stats.requests_sent,
        tool_calls = answer.stats.tool_calls,
        duration_ms = answer.stats.duration_ms,
        "done"
    );
    Ok(())
}
