use std::collections::HashMap;

use clap::Parser;
use reqwest::Client;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of a running instance
    #[arg(default_value = "http://127.0.0.1:1111")]
    base_url: String,

    /// Key for the sync export endpoint
    #[arg(long)]
    sync_key: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let client = Client::new();

    let endpoints = [
        ("/api/health", "health check"),
        ("/api/ping", "ping"),
        ("/api/hot", "hot list"),
        ("/api/debug", "debug dump"),
        ("/api/gaps", "gap list"),
    ];

    for (endpoint, description) in endpoints {
        check(&client, &args.base_url, endpoint, description).await;
    }

    if let Some(key) = &args.sync_key {
        let endpoint = format!("/api/sync?key={key}");
        check(&client, &args.base_url, &endpoint, "sync export").await;
    }

    record(&client, &args.base_url).await;
}

async fn check(client: &Client, base_url: &str, endpoint: &str, description: &str) {
    println!("\nChecking {description} ({endpoint})");

    let response = client
        .get(format!("{base_url}{endpoint}"))
        .send()
        .await
        .unwrap();

    println!("Status: {}", response.status());

    let body = response.text().await.unwrap();
    println!("Body: {}", snippet(&body));
}

async fn record(client: &Client, base_url: &str) {
    println!("\nRecording via GET");
    let response = client
        .get(format!("{base_url}/api/record"))
        .query(&[("q", "test keyword")])
        .send()
        .await
        .unwrap();
    println!("Status: {}", response.status());
    println!("Body: {}", snippet(&response.text().await.unwrap()));

    println!("\nRecording via POST");
    let payload = HashMap::from([("keyword", "another test")]);
    let response = client
        .post(format!("{base_url}/api/record"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    println!("Status: {}", response.status());
    println!("Body: {}", snippet(&response.text().await.unwrap()));
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
