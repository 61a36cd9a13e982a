//! Progress reporting and the bounded per-repository worker pool

use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use super::config::PROGRESS_TEMPLATE;

const PROGRESS_TICK_INTERVAL_MS: u64 = 120;

/// Creates a stderr spinner counting finished repositories.
///
/// Hidden when `visible` is false or stderr is not a terminal, so piped
/// output only ever contains the table or outcome lines.
pub fn create_progress_bar(label: &str, visible: bool) -> ProgressBar {
    if !visible || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_prefix(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_INTERVAL_MS));
    pb
}

/// Runs `work` once per item with at most `jobs` in flight, returning results
/// in the order of `items`.
///
/// Everything for one item happens inside its own future, so work on a single
/// repository stays serialized while different repositories overlap.
pub async fn run_bounded<I, T, F, Fut>(
    items: Vec<I>,
    jobs: usize,
    progress: &ProgressBar,
    work: F,
) -> Vec<T>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = T>,
{
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let total = items.len();
    let mut futures = FuturesUnordered::new();

    for (index, item) in items.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let task = work(item);
        futures.push(async move {
            // The semaphore is never closed, so acquire only fails if that changes
            let _permit = semaphore.acquire().await.ok();
            (index, task.await)
        });
    }

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    while let Some((index, value)) = futures.next().await {
        progress.inc(1);
        slots[index] = Some(value);
    }
    progress.finish_and_clear();

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_results_keep_input_order() {
        let items: Vec<u64> = vec![30, 5, 20, 1, 10];
        let results = run_bounded(items.clone(), 5, &ProgressBar::hidden(), |ms| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            ms * 2
        })
        .await;
        assert_eq!(results, vec![60, 10, 40, 2, 20]);
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_jobs() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let results = run_bounded((0..12).collect::<Vec<_>>(), 3, &ProgressBar::hidden(), |i| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                i
            }
        })
        .await;

        assert_eq!(results.len(), 12);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_zero_jobs_still_makes_progress() {
        let results = run_bounded(vec![1, 2], 0, &ProgressBar::hidden(), |i| async move { i }).await;
        assert_eq!(results, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_progress_counts_items() {
        let pb = ProgressBar::hidden();
        pb.set_length(4);
        run_bounded(vec![(); 4], 2, &pb, |_| async {}).await;
        assert_eq!(pb.position(), 4);
    }
}
