use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "sre-cli")]
#[command(about = "Drive the SRE demo service from the terminal", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Service status
    Home,
    /// Health check
    Health,
    /// Request an artificial delay
    Latency {
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
    },
    /// Trigger a simulated Kubernetes failure
    Kubernetes {
        #[arg(long, default_value = "pod_crash")]
        error_type: String,
    },
    /// Fire requests at the chaos endpoint and tally the results
    Chaos {
        #[arg(long, default_value_t = 0.5)]
        failure_rate: f64,

        #[arg(long, default_value_t = 1)]
        requests: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Home => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Latency { delay_ms } => {
            let started = std::time::Instant::now();
            let res = client
                .get(format!("{}/api/latency", base))
                .query(&[("delay_ms", delay_ms)])
                .send()
                .await?;
            print_response(res).await?;
            println!("elapsed: {:?}", started.elapsed());
        }
        Commands::Kubernetes { error_type } => {
            let res = client
                .get(format!("{}/api/kubernetes", base))
                .query(&[("error_type", error_type)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Chaos { failure_rate, requests } => {
            if requests <= 1 {
                let res = client
                    .get(format!("{}/api/chaos", base))
                    .query(&[("failure_rate", failure_rate)])
                    .send()
                    .await?;
                print_response(res).await?;
                return Ok(());
            }

            let mut survived = 0;
            let mut failed = 0;
            for _ in 0..requests {
                let res = client
                    .get(format!("{}/api/chaos", base))
                    .query(&[("failure_rate", failure_rate)])
                    .send()
                    .await?;
                if res.status() == StatusCode::INTERNAL_SERVER_ERROR {
                    failed += 1;
                } else {
                    survived += 1;
                }
            }
            println!(
                "survived: {}  failed: {}  observed failure rate: {:.3}",
                survived,
                failed,
                failed as f64 / requests as f64
            );
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("status: {}", status);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
