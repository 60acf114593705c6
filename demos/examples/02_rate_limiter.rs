use std::sync::Arc;
use std::time::Duration;

use flip::RateLimitConfig;
use flip_ratelimit::RateLimiter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A tiny window for demo purposes: 2 calls per second
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        max_calls: 2,
        period: Duration::from_secs(1),
    }));
    let start = tokio::time::Instant::now();

    // Three workers contend for the same window; admissions come in pairs.
    let mut tasks = Vec::new();
    for worker in 0..3 {
        let limiter = Arc::clone(&limiter);
        tasks.push(tokio::spawn(async move {
            for call in 0..2 {
                limiter.acquire().await;
                println!(
                    "worker {worker} call {call} admitted at {:>5} ms",
                    start.elapsed().as_millis()
                );
            }
        }));
    }
    for t in tasks {
        t.await?;
    }

    let state = limiter.state().await;
    println!(
        "window: {}/{} used, resets in {:?}",
        state.in_window, state.limit, state.reset_in
    );
    Ok(())
}
