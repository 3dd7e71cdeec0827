//! Async Fetch Example
//!
//! Retries an async operation without blocking the runtime.
//!
//! Run with: cargo run --example async_fetch --features async

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use backoff_retry::{Retry, RetryPolicy};

async fn fetch(attempts: Arc<AtomicU32>) -> Result<String, String> {
    let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
    println!("  Attempt {}", n);
    tokio::time::sleep(Duration::from_millis(5)).await;
    if n < 3 {
        Err(format!("upstream reset on attempt {}", n))
    } else {
        Ok("payload".to_string())
    }
}

#[tokio::main]
async fn main() {
    let policy = RetryPolicy::default().with_base_delay(Duration::from_millis(50));
    let executor = match Retry::new(policy) {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("Invalid policy: {}", e);
            return;
        }
    };

    let attempts = Arc::new(AtomicU32::new(0));
    let result = executor.call_async(|| fetch(Arc::clone(&attempts))).await;

    match result {
        Ok(body) => println!("Response: {}", body),
        Err(e) => println!("Request failed: {}", e),
    }
    println!("Total attempts: {}", attempts.load(Ordering::SeqCst));
}
