use clap::{Parser, Subcommand};
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};

use gh_proxy::routing::{Resolution, Router};

#[derive(Parser)]
#[command(name = "gh-proxy-cli")]
#[command(about = "Inspect how gh-proxy resolves paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which route a path matches and the upstream URL it maps to
    Resolve {
        path: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch a path through a running proxy and summarize the response
    Fetch {
        path: String,
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { path, json } => resolve(&path, json)?,
        Commands::Fetch { path, url } => fetch(&url, &path).await?,
    }

    Ok(())
}

fn resolve(path: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let resolution = Router::default().resolve(path);

    if json {
        let value = match &resolution {
            Resolution::Fetch(d) => serde_json::json!({
                "route": d.route,
                "upstream": d.upstream.as_str(),
                "max_age_secs": d.policy.max_age_secs,
            }),
            Resolution::Index => serde_json::json!({ "route": { "kind": "index" } }),
            Resolution::NoMatch => serde_json::json!({ "route": { "kind": "unmatched" } }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match resolution {
        Resolution::Fetch(d) => {
            println!("route:    {}", d.route.kind());
            println!("upstream: {}", d.upstream);
            println!("max-age:  {}", d.policy.max_age_secs);
        }
        Resolution::Index => println!("route:    index"),
        Resolution::NoMatch => println!("route:    unmatched (400)"),
    }
    Ok(())
}

async fn fetch(base: &str, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}{}", base.trim_end_matches('/'), path);
    let res = reqwest::get(&url).await?;

    println!("{} {}", res.status(), url);
    for name in [CONTENT_TYPE, CACHE_CONTROL, ACCESS_CONTROL_ALLOW_ORIGIN] {
        if let Some(value) = res.headers().get(&name) {
            println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }

    let status = res.status();
    let body = res.bytes().await?;
    if status.is_success() {
        println!("{} bytes", body.len());
    } else {
        eprintln!("{}", String::from_utf8_lossy(&body));
    }
    Ok(())
}
