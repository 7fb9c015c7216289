//! Health command - probes a running Bazaar server.

use std::time::Duration;

use crate::cli::HealthArgs;

pub async fn run(args: HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("http://{}:{}/health", args.host, args.port);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            println!("Server at {url} is healthy: {body}");
            Ok(())
        }
        Ok(response) => {
            eprintln!("Server at {url} returned {}", response.status());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Could not reach {url}: {e}");
            std::process::exit(1);
        }
    }
}
