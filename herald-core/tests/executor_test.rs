//! Background and delayed dispatch through wired services

mod common;

use common::services;
use herald_core::config::{Config, ExecutorConfig};
use herald_core::{DispatchRequest, ExecutorError};
use std::time::Duration;
use tempfile::TempDir;

fn request(to: &str) -> DispatchRequest {
    DispatchRequest::new(to, "Batch").with_body("Hello")
}

#[tokio::test]
async fn test_submitted_dispatches_all_complete() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        executor: ExecutorConfig {
            max_concurrency: 2,
            queue_capacity: 8,
        },
        ..Config::default()
    };
    let (services, transport) = services(dir.path(), config);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            services
                .executor
                .submit(request(&format!("user{}@example.com", i)))
                .unwrap()
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(transport.sent().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_dispatch_waits_for_delay() {
    let dir = TempDir::new().unwrap();
    let (services, transport) = services(dir.path(), Config::default());

    let scheduled = services
        .timer
        .schedule(request("a@example.com"), Duration::from_secs(10));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(transport.sent().is_empty());

    let receipt = scheduled.outcome().await.unwrap();
    assert_eq!(receipt.recipients, 1);
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_dispatch_after_shutdown_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (services, transport) = services(dir.path(), Config::default());

    let scheduled = services
        .timer
        .schedule(request("a@example.com"), Duration::from_secs(10));
    services.executor.shutdown();

    let result = scheduled.outcome().await;
    assert!(matches!(result, Err(ExecutorError::ShutDown)));
    assert!(transport.sent().is_empty());
}
