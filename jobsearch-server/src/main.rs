use log::{error, info};

use clap::Parser;
use jobsearch_server::config::Config;
use jobsearch_server::page::Endpoints;
use jobsearch_server::registry;
use jobsearch_server::routes::{landing, routes};
use warp::Filter;

/// Recurring job search server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File path to the configuration
    #[arg(short, long)]
    config_path: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    pretty_env_logger::init();
    let Config {
        address,
        base_path,
        registry,
    } = match Config::read(&args.config_path) {
        Ok(config) => config,
        Err(err) => {
            error!("Config error: {}", err);
            return;
        }
    };
    let registry = match registry::build(registry).await {
        Ok(registry) => registry,
        Err(err) => {
            error!("Job registry error: {}", err);
            return;
        }
    };
    let landing = match landing(&base_path) {
        Ok(landing) => landing,
        Err(err) => {
            error!("Invalid mount point: {}", err);
            return;
        }
    };
    info!(
        "Serving job search on http://{}{}",
        address,
        Endpoints::new(&base_path).search()
    );
    warp::serve(
        routes(&base_path, registry)
            .or(landing)
            .with(cors())
            .with(warp::log("jobsearch::api")),
    )
    .run(address)
    .await;
}

fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec![
            "User-Agent",
            "Sec-Fetch-Mode",
            "Referer",
            "Origin",
            "Access-Control-Request-Method",
            "Access-Control-Request-Headers",
            "Content-Type",
        ])
        .allow_methods(vec!["GET", "POST"])
}
