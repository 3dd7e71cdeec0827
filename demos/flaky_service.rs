//! Flaky Service Example
//!
//! Demonstrates blocking retry patterns:
//! - One-shot retry with the default policy
//! - A reusable executor wrapping an operation
//! - Inspecting the backoff schedule
//! - Rejecting a policy that allows no attempts
//!
//! Run with: cargo run --example flaky_service

use std::cell::Cell;
use std::time::Duration;

use backoff_retry::{retry, Retry, RetryError, RetryPolicy};

// ==================== One-shot Retry ====================

/// Example 1: retry an operation that fails twice before succeeding.
fn example_one_shot() {
    println!("\n=== Example 1: One-shot Retry ===");

    let attempts = Cell::new(0);
    let result = retry(
        || {
            attempts.set(attempts.get() + 1);
            println!("  Attempt {}", attempts.get());
            if attempts.get() < 3 {
                Err("503 service unavailable")
            } else {
                Ok("200 ok")
            }
        },
        RetryPolicy::default().with_base_delay(Duration::from_millis(50)),
    );

    println!("Result: {:?}", result);
}

// ==================== Wrapped Operation ====================

/// Example 2: wrap an operation once and call it repeatedly.
fn example_wrapped() {
    println!("\n=== Example 2: Wrapped Operation ===");

    let executor = match Retry::new(
        RetryPolicy::default()
            .with_max_retries(3)
            .with_base_delay(Duration::from_millis(20)),
    ) {
        Ok(executor) => executor,
        Err(e) => {
            println!("Invalid policy: {}", e);
            return;
        }
    };

    let mut calls = 0u32;
    let mut read_sensor = executor.wrap(move || {
        calls += 1;
        if calls % 2 == 1 {
            Err(format!("checksum mismatch on read {}", calls))
        } else {
            Ok(20.5 + f64::from(calls))
        }
    });

    for _ in 0..3 {
        println!("  Reading: {:?}", read_sensor());
    }
}

// ==================== Backoff Schedule ====================

/// Example 3: print the delay range after each failed attempt.
fn example_schedule() {
    println!("\n=== Example 3: Backoff Schedule ===");

    let policy = RetryPolicy::new(10, Duration::from_millis(100), Duration::from_secs(5));
    for attempt in 0..policy.max_retries() - 1 {
        let (low, high) = policy.delay_bounds(attempt);
        println!("  after attempt {}: {:?} ..= {:?}", attempt + 1, low, high);
    }
}

// ==================== Invalid Policy ====================

/// Example 4: a policy with no attempts is rejected before running anything.
fn example_invalid_policy() {
    println!("\n=== Example 4: Invalid Policy ===");

    let result = retry(
        || Ok::<_, String>("never runs"),
        RetryPolicy::default().with_max_retries(0),
    );

    match result {
        Err(RetryError::InvalidPolicy(e)) => println!("Rejected: {}", e),
        other => println!("Unexpected: {:?}", other),
    }
}

fn main() {
    println!("======================================");
    println!("        Flaky Service Example         ");
    println!("======================================");

    example_one_shot();
    example_wrapped();
    example_schedule();
    example_invalid_policy();
}
