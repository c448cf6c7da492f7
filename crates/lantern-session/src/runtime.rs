//! Startup and the event loop.
//!
//! The subsystem runs on a single-threaded runtime. It loads the document map
//! once, then multiplexes host input, timer wakeups and visibility changes
//! until the host closes its event channel.

use std::sync::Arc;

use lantern_config::Config;
use lantern_index::{DocumentIndex, IndexSource};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::{
    controller::{InputController, InputEvent},
    host::Host,
    schedule::TokioScheduler,
};

/// Loads the index from `source` and serves `host` until `events` closes.
///
/// Events that arrive while the index is loading are discarded. If the
/// subsystem is disabled or the index cannot be loaded, events are consumed
/// and ignored. Returns the host once the channel closes.
pub async fn run<H: Host>(
    host: H,
    config: &Config,
    source: &IndexSource,
    mut events: mpsc::UnboundedReceiver<InputEvent>,
    visibility: watch::Receiver<bool>,
) -> H {
    if !config.site.search_enabled {
        info!("search disabled by configuration");
        drain(&mut events).await;
        return host;
    }

    let index = match DocumentIndex::load(source).await {
        Ok(index) => index.with_settings(&config.search),
        Err(err) => {
            error!(source = %source, error = %err, "search unavailable");
            drain(&mut events).await;
            return host;
        }
    };

    let mut discarded = 0usize;
    while events.try_recv().is_ok() {
        discarded += 1;
    }
    if discarded > 0 {
        debug!(discarded, "dropped input received while loading");
    }

    serve(host, Arc::new(index), config, events, visibility).await
}

/// Serves `host` from an already-built index until `events` closes.
///
/// Once the channel closes, timers already scheduled are allowed to fire so
/// pending render batches and navigation complete.
pub async fn serve<H: Host>(
    host: H,
    index: Arc<DocumentIndex>,
    config: &Config,
    mut events: mpsc::UnboundedReceiver<InputEvent>,
    mut visibility: watch::Receiver<bool>,
) -> H {
    let (scheduler, mut wakeups) = TokioScheduler::new();
    let documents = index.documents();
    let mut controller =
        InputController::from_config(host, index, scheduler.clone(), documents, config);

    visibility.mark_unchanged();
    let mut watching_visibility = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => controller.handle_event(event),
                None => break,
            },
            Some(wakeup) = wakeups.recv() => controller.handle_wakeup(wakeup),
            changed = visibility.changed(), if watching_visibility => match changed {
                Ok(()) => controller.visibility_changed(&visibility),
                Err(_) => watching_visibility = false,
            },
        }
    }

    loop {
        // A timer sends before it finishes, so once none are pending every
        // wakeup is already queued.
        let idle = scheduler.pending() == 0;
        match wakeups.try_recv() {
            Ok(wakeup) => {
                controller.handle_wakeup(wakeup);
                continue;
            }
            Err(_) if idle => break,
            Err(_) => {}
        }
        match wakeups.recv().await {
            Some(wakeup) => controller.handle_wakeup(wakeup),
            None => break,
        }
    }

    controller.into_host()
}

/// Consumes events until the sender side closes.
async fn drain(events: &mut mpsc::UnboundedReceiver<InputEvent>) {
    while events.recv().await.is_some() {}
}
