//! Common test utilities and helpers
//!
//! - Event and account fixtures
//! - Store construction over the in-memory backend
//! - Backend service helpers (feature `ssr`)

#![allow(dead_code)]

pub mod fixtures;
#[cfg(feature = "ssr")]
pub mod server;

pub use fixtures::*;
#[cfg(feature = "ssr")]
pub use server::*;

use std::future::Future;
use std::time::Duration;

/// Poll `condition` until it holds, failing the test after two seconds
pub async fn eventually<F>(what: &str, mut condition: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Run `future` with a two second timeout
pub async fn within<T>(future: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(2), future)
        .await
        .expect("timed out")
}
