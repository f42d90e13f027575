//! Background fetch tasks.
//!
//! Each task runs one API call and reports back over the `AppEvent` channel.
//! Panics are caught and reported as a failure of the same fetch, so the
//! event loop always hears back.

use crate::api::PokeApi;
use crate::app::AppEvent;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Run a future and turn a panic into an `Err` carrying the panic message.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&'static str>() {
            format!("task panicked: {s}")
        } else if let Some(s) = panic.downcast_ref::<String>() {
            format!("task panicked: {s}")
        } else {
            "task panicked".to_string()
        }
    })
}

async fn send(tx: &mpsc::Sender<AppEvent>, event: AppEvent, name: &'static str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, event = name, "Channel send failed (receiver dropped)");
    }
}

/// Start the two startup fetches concurrently: the entry page and the
/// category list. Neither is retried.
pub fn spawn_initial_load(api: &PokeApi, page_limit: u32, event_tx: &mpsc::Sender<AppEvent>) {
    let entries_api = api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = catch_task_panic(entries_api.list_entries(page_limit, 0))
            .await
            .and_then(|r| r.map_err(|e| e.to_string()));
        send(&tx, AppEvent::EntriesLoaded(result), "EntriesLoaded").await;
    });

    let categories_api = api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = catch_task_panic(categories_api.list_categories())
            .await
            .and_then(|r| r.map_err(|e| e.to_string()));
        send(&tx, AppEvent::CategoriesLoaded(result), "CategoriesLoaded").await;
    });

    tracing::debug!(page_limit, "Spawned initial load");
}

/// Fetch the members of one category. Results for the same category may
/// arrive out of order; the catalog keeps whichever lands last.
pub fn spawn_category_members(api: &PokeApi, category: String, event_tx: &mpsc::Sender<AppEvent>) {
    let api = api.clone();
    let tx = event_tx.clone();
    tracing::debug!(category = %category, "Spawning category member fetch");
    tokio::spawn(async move {
        let result = catch_task_panic(api.fetch_category_detail(&category))
            .await
            .and_then(|r| r.map(|detail| detail.member_names()).map_err(|e| e.to_string()));
        send(
            &tx,
            AppEvent::CategoryMembersLoaded { category, result },
            "CategoryMembersLoaded",
        )
        .await;
    });
}
