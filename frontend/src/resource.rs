//! 远程资源状态
//!
//! Every screen that reads from the API goes through [`Remote`]: one signal
//! holding `Loading`, `Ready(value)` or `Failed(reason)`. Failures are logged
//! and the screen renders its empty default, so a failed fetch never leaves a
//! spinner running.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use crate::error::ApiResult;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    /// Converts a finished call, logging the failure.
    pub fn settle(result: ApiResult<T>, label: &str) -> Self {
        match result {
            Ok(value) => FetchState::Ready(value),
            Err(e) => {
                log::warn!("[Fetch] {} failed: {}", label, e);
                FetchState::Failed(e.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T: Clone + Default> FetchState<T> {
    /// The loaded value, or the empty value while loading or after a failure.
    pub fn value_or_default(&self) -> T {
        self.ready().cloned().unwrap_or_default()
    }
}

/// A reactive handle on one remote value.
pub struct Remote<T: Send + Sync + 'static> {
    state: RwSignal<FetchState<T>>,
}

impl<T: Send + Sync + 'static> Clone for Remote<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Remote<T> {}

impl<T> Remote<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(FetchState::Loading),
        }
    }

    pub fn state(&self) -> RwSignal<FetchState<T>> {
        self.state
    }

    /// Tracked read of the value, empty until loaded.
    pub fn get_or_default(&self) -> T {
        self.state.with(FetchState::value_or_default)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(FetchState::is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error().map(str::to_string))
    }

    /// Shows the loading state and fetches in the background.
    pub fn load<Fut>(&self, label: &'static str, fetch: Fut)
    where
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        self.state.set(FetchState::Loading);
        self.refresh(label, fetch);
    }

    /// Fetches in the background while the current value stays on screen.
    pub fn refresh<Fut>(&self, label: &'static str, fetch: Fut)
    where
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let this = *self;
        spawn_local(async move {
            this.settle(label, fetch).await;
        });
    }

    /// Awaits `fetch` and stores its outcome. Returns `false` when the owning
    /// screen went away in the meantime and the outcome was dropped.
    pub async fn settle<Fut>(&self, label: &'static str, fetch: Fut) -> bool
    where
        Fut: Future<Output = ApiResult<T>>,
    {
        let outcome = FetchState::settle(fetch.await, label);
        if self.state.try_set(outcome).is_some() {
            log::debug!("[Fetch] {} resolved after its screen closed, dropped", label);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::{FARMER_TOKEN, offline_api};
    use fertiflow_shared::Order;

    #[tokio::test]
    async fn failed_fetch_settles_to_empty() {
        let remote: Remote<Vec<Order>> = Remote::new();
        assert!(remote.is_loading());

        let api = offline_api();
        assert!(remote.settle("orders", api.my_orders(Some(FARMER_TOKEN))).await);

        assert!(!remote.is_loading());
        assert!(remote.get_or_default().is_empty());
        assert!(remote.error().is_some());
    }

    #[tokio::test]
    async fn successful_fetch_is_ready() {
        let remote: Remote<u64> = Remote::new();
        remote.settle("count", async { Ok(3) }).await;

        assert_eq!(remote.state().get_untracked(), FetchState::Ready(3));
        assert_eq!(remote.error(), None);
    }

    #[tokio::test]
    async fn late_response_after_dispose_is_dropped() {
        let remote: Remote<u64> = Remote::new();
        remote.state().dispose();

        let delivered = remote.settle("count", async { Ok(9) }).await;
        assert!(!delivered);
    }

    #[test]
    fn settle_maps_errors_to_reason() {
        let state: FetchState<Vec<u8>> =
            FetchState::settle(Err(ApiError::Network("down".into())), "bytes");
        assert_eq!(state.error(), Some("network error: down"));
        assert!(state.value_or_default().is_empty());
    }
}
