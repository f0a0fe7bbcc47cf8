use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "flights-cli")]
#[command(about = "Command-line client for the flight gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active provider and which credentials are present
    Health,
    /// Search flights through the gateway
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Origin IATA code
    #[arg(long)]
    origin: String,
    /// Destination IATA code
    #[arg(long)]
    destination: String,
    /// Outbound date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Return date; makes the search round trip where supported
    #[arg(long)]
    return_date: Option<String>,
    #[arg(long)]
    currency: Option<String>,
    /// Maximum results (capped at 50 by the gateway)
    #[arg(long)]
    max: Option<u32>,
    /// Comma-separated airline codes to keep
    #[arg(long)]
    include: Option<String>,
}

impl SearchArgs {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("date", self.date.clone()),
        ];
        let optional = [
            ("returnDate", self.return_date.clone()),
            ("currency", self.currency.clone()),
            ("max", self.max.map(|m| m.to_string())),
            ("include", self.include.clone()),
        ];
        query.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
        query
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Search(args) => {
            let res = client
                .get(format!("{}/amadeus/flights", base))
                .query(&args.query())
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
