use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "compare-cli")]
#[command(about = "Command-line client for the route comparator API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the directions provider is ready
    Status,
    /// Run a comparison and show both routes
    Compare,
    /// Show what the comparator is currently displaying
    State,
    /// Dismiss the current result or error
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/health", base)).send().await?,
        Commands::Compare => client.post(format!("{}/api/compare", base)).send().await?,
        Commands::State => client.get(format!("{}/api/state", base)).send().await?,
        Commands::Reset => client.post(format!("{}/api/reset", base)).send().await?,
    };

    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Pretty-print the body. Returns false for non-success responses.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", body);
        return Ok(true);
    }

    match status {
        StatusCode::CONFLICT => eprintln!("A comparison is already running"),
        StatusCode::SERVICE_UNAVAILABLE => eprintln!("Directions provider is not ready"),
        _ => eprintln!("Error: API returned status {}", status),
    }
    eprintln!("{}", body);
    Ok(false)
}
