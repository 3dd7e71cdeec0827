//! Demonstrates tracing integration with the retry executor
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use backoff_retry::{Retry, RetryPolicy};

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    let executor = match Retry::new(
        RetryPolicy::default()
            .with_max_retries(4)
            .with_base_delay(Duration::from_millis(10)),
    ) {
        Ok(executor) => executor,
        Err(e) => {
            tracing::error!("Invalid policy: {}", e);
            return;
        }
    };

    // Retries are logged at debug, exhaustion at warn
    let result = executor.call(|| Err::<(), _>("disk busy"));

    match result {
        Ok(()) => tracing::info!("Write completed"),
        Err(e) => tracing::error!("Write failed: {}", e),
    }
}
