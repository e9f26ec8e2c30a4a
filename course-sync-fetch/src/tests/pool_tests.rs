use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn all_items_complete() {
    let pool = WorkerPool::new(8);
    let outcome: PoolOutcome<u32, String> = pool
        .run((0..100u32).collect(), |n| async move { Ok(n * 2) })
        .await;

    let mut results = outcome.results;
    results.sort_unstable();
    assert_eq!(results, (0..100u32).map(|n| n * 2).collect::<Vec<_>>());
    assert_eq!(outcome.failed, 0);
    assert!(outcome.first_error.is_none());
}

#[tokio::test]
async fn zero_workers_is_clamped() {
    let pool = WorkerPool::new(0);
    assert_eq!(pool.workers(), 1);
    let outcome: PoolOutcome<u32, String> = pool.run(vec![1, 2, 3], |n| async move { Ok(n) }).await;
    assert_eq!(outcome.results.len(), 3);
}

#[tokio::test]
async fn empty_input() {
    let outcome: PoolOutcome<u32, String> = WorkerPool::new(4)
        .run(Vec::new(), |n: u32| async move { Ok(n) })
        .await;
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.failed, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failures_are_dropped_and_counted() {
    let outcome = WorkerPool::new(3)
        .run((0..20u32).collect(), |n| async move {
            if n % 5 == 0 {
                Err(format!("item {n} failed"))
            } else {
                Ok(n)
            }
        })
        .await;

    assert_eq!(outcome.results.len(), 16);
    assert!(outcome.results.iter().all(|n| n % 5 != 0));
    assert_eq!(outcome.failed, 4);
    let first = outcome.first_error.unwrap();
    assert!(first.starts_with("item ") && first.ends_with(" failed"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_never_exceeds_worker_count() {
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let task_active = active.clone();
    let task_peak = peak.clone();
    let outcome: PoolOutcome<(), String> = WorkerPool::new(3)
        .run((0..30u32).collect(), move |_| {
            let active = task_active.clone();
            let peak = task_peak.clone();
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

    assert_eq!(outcome.results.len(), 30);
    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert!(peak.load(Ordering::SeqCst) >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn more_workers_than_items() {
    let outcome: PoolOutcome<u32, String> = WorkerPool::new(300)
        .run(vec![7, 8, 9], |n| async move { Ok(n) })
        .await;
    let mut results = outcome.results;
    results.sort_unstable();
    assert_eq!(results, vec![7, 8, 9]);
}
