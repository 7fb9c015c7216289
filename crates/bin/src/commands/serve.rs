//! Serve command - runs the Bazaar web server.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::flag as signal_flag;

use bazaar::SystemClock;
use bazaar::server::{AppState, router};
use bazaar::store::{Database, InMemory};

use crate::cli::ServeArgs;

pub async fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create the store
    let store = match InMemory::load_from_file(&args.data_file) {
        Ok(store) => {
            tracing::info!("Loaded store from {}", args.data_file.display());
            store
        }
        Err(e) => {
            tracing::warn!("Failed to load store: {e:?}. Creating a new one.");
            InMemory::new()
        }
    };
    let store = Arc::new(store);
    let db: Arc<dyn Database> = store.clone();

    let state = AppState::new(db, &args.secret, Arc::new(SystemClock))?;
    let app = router(state);

    // Set up graceful shutdown signal handling
    let term_signal = Arc::new(AtomicBool::new(false));
    for signal in signal_hook::consts::TERM_SIGNALS {
        let _ = signal_flag::register(*signal, Arc::clone(&term_signal));
    }

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!("Bazaar server starting on http://{local_addr}");
    println!();
    println!("Press Ctrl+C to shutdown");

    let store_for_shutdown = store.clone();
    let data_file = args.data_file.clone();

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !term_signal.load(Ordering::Relaxed) {
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }

            tracing::info!("Shutdown signal received, saving store...");
            match store_for_shutdown.save_to_file(&data_file) {
                Ok(_) => {
                    tracing::info!("Store saved successfully");
                    println!("\nStore saved successfully");
                }
                Err(e) => {
                    tracing::error!("Failed to save store: {e:?}");
                    eprintln!("Failed to save store: {e:?}");
                }
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}
