use log::{error, info};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use recipe_box::{api, search_first, AppConfig, MealDbSource, RecipeStore};

const USAGE: &str = "Usage: recipe-box [serve | search <recipe name>]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the command from command-line arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let config = AppConfig::load()?;

    match args.first().map(String::as_str) {
        None | Some("serve") => serve(config).await,
        Some("search") => {
            let name = args[1..].join(" ");
            let source = MealDbSource::new(&config)?;
            let recipe = search_first(&source, &name).await?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Some(other) => Err(format!("Unknown command '{other}'. {USAGE}").into()),
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecipeStore::connect_with_retry(&config).await.map_err(|e| {
        error!("Failed to connect to the recipe store after multiple attempts");
        e
    })?;
    let source = Arc::new(MealDbSource::new(&config)?);
    let app = api::router(api::AppState::new(store.clone(), source));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down gracefully...");
    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("SIGINT signal received.");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("SIGTERM signal received.");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
