use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use flip_core::{CurrencyPair, FetchReport, FlipError, PairFailure, PairResult};
use futures::FutureExt;
use tokio::sync::Mutex;

use crate::Flip;
use crate::core::check_args;

type Outcome = (CurrencyPair, Result<PairResult, FlipError>);

impl Flip {
    /// Fetch offers for many pairs using the configured per-pair limit.
    ///
    /// # Errors
    /// See [`fetch_all`](Self::fetch_all).
    pub async fn fetch_offers(
        &self,
        league: &str,
        pairs: &[CurrencyPair],
    ) -> Result<FetchReport, FlipError> {
        self.fetch_all(league, pairs, self.cfg.offers_per_pair).await
    }

    /// Fetch up to `limit` viable offers for each pair.
    ///
    /// Behavior:
    /// - Pairs are queued and drained by a fixed pool of `workers` tasks; each
    ///   worker runs one pair's pipeline to completion before taking the next.
    /// - Every network call still goes through the source's rate limiter, so
    ///   workers only overlap latency, never the limit.
    /// - Pairs with no viable offers are dropped. Pairs whose pipeline failed,
    ///   including by panicking, are listed in `FetchReport::failures`; they
    ///   never abort the batch.
    /// - Result order follows completion, not input order.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty league or a zero limit.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "flip::fetch_all",
            skip(self, pairs),
            fields(pairs = pairs.len(), workers = self.cfg.workers),
            err
        )
    )]
    pub async fn fetch_all(
        &self,
        league: &str,
        pairs: &[CurrencyPair],
        limit: usize,
    ) -> Result<FetchReport, FlipError> {
        check_args(league, limit)?;
        if pairs.is_empty() {
            return Ok(FetchReport::default());
        }

        let queue: Arc<Mutex<VecDeque<CurrencyPair>>> =
            Arc::new(Mutex::new(pairs.iter().cloned().collect()));
        let sink: Arc<Mutex<Vec<Outcome>>> =
            Arc::new(Mutex::new(Vec::with_capacity(pairs.len())));
        let workers = self.cfg.workers.clamp(1, pairs.len());

        let mut current = Vec::with_capacity(workers);
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let flip = self.clone();
            let queue = Arc::clone(&queue);
            let sink = Arc::clone(&sink);
            let slot = Arc::new(Mutex::new(None));
            current.push(Arc::clone(&slot));
            let league = league.to_string();
            handles.push(tokio::spawn(async move {
                flip.drain(&queue, &sink, &slot, &league, limit).await;
            }));
        }
        let joined = futures::future::join_all(handles).await;

        let mut outcomes = std::mem::take(&mut *sink.lock().await);
        for (handle, slot) in joined.into_iter().zip(current) {
            if let Err(e) = handle
                && let Some(pair) = slot.lock().await.take()
            {
                // The worker died between taking a pair and recording it.
                let error = FlipError::Other(format!("pair worker failed: {e}"));
                outcomes.push((pair, Err(error)));
            }
        }

        let mut report = FetchReport::default();
        for (pair, res) in outcomes {
            match res {
                Ok(result) if result.offers.is_empty() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(pair = %pair, "no viable offers; dropped");
                }
                Ok(result) => report.results.push(result),
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(pair = %pair, error = %error, "pair failed");
                    report.failures.push(PairFailure { pair, error });
                }
            }
        }
        Ok(report)
    }

    /// Worker loop: take pairs off the queue until it is empty.
    ///
    /// `slot` holds the pair being worked on, so a worker that dies still
    /// leaves a trace of it. A panic inside one pair's pipeline is recorded as
    /// that pair's failure and the worker moves on.
    async fn drain(
        &self,
        queue: &Mutex<VecDeque<CurrencyPair>>,
        sink: &Mutex<Vec<Outcome>>,
        slot: &Mutex<Option<CurrencyPair>>,
        league: &str,
        limit: usize,
    ) {
        loop {
            let Some(pair) = queue.lock().await.pop_front() else {
                break;
            };
            *slot.lock().await = Some(pair.clone());

            let res = AssertUnwindSafe(self.fetch_for_pair(league, &pair, limit))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(FlipError::Other(format!(
                        "pair pipeline panicked: {}",
                        panic_message(&*panic)
                    )))
                });

            sink.lock().await.push((pair, res));
            *slot.lock().await = None;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
