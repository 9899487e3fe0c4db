//! Single-flight de-duplication for refresh and identity fetches.
//!
//! INVARIANT
//! =========
//! At most one execution of a given operation is outstanding
//! process-wide. The first caller installs a shared future; concurrent
//! callers clone and await the same one and observe the same result.
//! The slot is cleared a short linger after resolution so a burst of
//! near-simultaneous 401s collapses into one refresh.

#[cfg(test)]
#[path = "flight_test.rs"]
mod tests;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};

type Flight<T> = Shared<BoxFuture<'static, T>>;

pub(crate) struct Singleflight<T: Clone> {
    slot: Arc<Mutex<Option<Flight<T>>>>,
    linger: Duration,
}

impl<T> Singleflight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(linger: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            linger,
        }
    }

    /// Join the in-flight execution, or start one from `make`.
    pub(crate) async fn run<F>(&self, make: impl FnOnce() -> F) -> T
    where
        F: Future<Output = T> + Send + 'static,
    {
        let flight = {
            let mut slot = lock(&self.slot);
            if let Some(existing) = slot.as_ref() {
                existing.clone()
            } else {
                let flight = make().boxed().shared();
                *slot = Some(flight.clone());
                self.spawn_clear(flight.clone());
                flight
            }
        };

        flight.await
    }

    /// Clear the slot once the flight resolves and the linger passes,
    /// unless a newer flight has replaced it in the meantime.
    fn spawn_clear(&self, flight: Flight<T>) {
        let slot = Arc::clone(&self.slot);
        let linger = self.linger;
        tokio::spawn(async move {
            flight.clone().await;
            tokio::time::sleep(linger).await;
            let mut slot = lock(&slot);
            if slot.as_ref().is_some_and(|current| current.ptr_eq(&flight)) {
                *slot = None;
            }
        });
    }
}

fn lock<T>(slot: &Mutex<Option<Flight<T>>>) -> std::sync::MutexGuard<'_, Option<Flight<T>>>
where
    T: Clone,
{
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
