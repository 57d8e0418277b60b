use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiResult;

/// Reactive view of one backend query.
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    version: RwSignal<u64>,
}

// Manual impls: derive would demand `T: Copy`.
impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    /// Run the query again with the same inputs.
    pub fn refetch(&self) {
        self.version.update(|v| *v += 1);
    }
}

/// Hook running `fetch` whenever the signals it reads change.
///
/// Signals must be read synchronously in `fetch` (before the returned
/// future) to be tracked. Only the newest request may write its result; an
/// older response arriving late is dropped.
pub fn use_query<T, F, Fut>(fetch: F) -> QueryState<T>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let state = QueryState {
        data: RwSignal::new(None),
        loading: RwSignal::new(true),
        error: RwSignal::new(None),
        version: RwSignal::new(0),
    };
    let latest = StoredValue::new(0u64);

    Effect::new(move |_| {
        state.version.track();
        let request = fetch();

        let id = latest.get_value() + 1;
        latest.set_value(id);
        state.loading.set(true);
        state.error.set(None);

        spawn_local(async move {
            let result = request.await;
            if latest.try_get_value() != Some(id) {
                log::debug!("dropping stale response for request {id}");
                return;
            }
            match result {
                Ok(data) => state.data.set(Some(data)),
                Err(e) => {
                    log::warn!("query failed: {e}");
                    state.error.set(Some(e.to_string()));
                }
            }
            state.loading.set(false);
        });
    });

    state
}
