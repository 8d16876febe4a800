//! Event loop that owns a tab's [`SessionRouter`].
//!
//! All router mutations happen on one task, fed by three sources:
//! commands from the UI, storage events from other contexts, and the
//! validation timer. The timer exists only while the tab is authenticated;
//! leaving that state drops it, so a stale tick can never fire after logout.
//! Settled navigations are published on a watch channel so the UI sees
//! redirects it did not ask for.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::routing::machine::{Navigation, SessionRouter};
use crate::session::StorageEvents;

const COMMAND_BUFFER: usize = 16;

enum Command {
    Navigate(String, oneshot::Sender<Navigation>),
    LoginCompleted(oneshot::Sender<Navigation>),
    Logout(oneshot::Sender<Navigation>),
    Shutdown,
}

/// Cheap handle for talking to a running router task.
#[derive(Clone)]
pub struct RouterHandle {
    commands: mpsc::Sender<Command>,
    updates: watch::Receiver<Navigation>,
}

/// Owns the router task; dropping it without `shutdown` leaves the task
/// running until every [`RouterHandle`] is gone.
pub struct RouterDriver {
    handle: RouterHandle,
    task: JoinHandle<()>,
}

impl RouterDriver {
    /// Starts the tab: runs the initial-load check and begins listening.
    pub fn spawn(mut router: SessionRouter, events: StorageEvents, period: Duration) -> Self {
        let initial = router.start();
        let (updates_tx, updates) = watch::channel(initial);
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(run(router, rx, events, updates_tx, period));
        Self {
            handle: RouterHandle { commands, updates },
            task,
        }
    }

    pub fn handle(&self) -> RouterHandle {
        self.handle.clone()
    }

    /// Tears the tab down: cancels the timer and deregisters the storage listener.
    pub async fn shutdown(self) {
        let _ = self.handle.commands.send(Command::Shutdown).await;
        if let Err(e) = self.task.await {
            warn!("Router task ended abnormally: {e}");
        }
    }
}

impl RouterHandle {
    pub async fn navigate(&self, path: &str) -> Option<Navigation> {
        self.request(|tx| Command::Navigate(path.to_string(), tx)).await
    }

    /// Notifies the router that a login persisted a session.
    pub async fn login_completed(&self) -> Option<Navigation> {
        self.request(Command::LoginCompleted).await
    }

    pub async fn logout(&self) -> Option<Navigation> {
        self.request(Command::Logout).await
    }

    /// Latest settled navigation.
    pub fn current(&self) -> Navigation {
        self.updates.borrow().clone()
    }

    /// Subscription to every settled navigation, including timer and
    /// storage-driven redirects.
    pub fn watch(&self) -> watch::Receiver<Navigation> {
        self.updates.clone()
    }

    async fn request(
        &self,
        build: impl FnOnce(oneshot::Sender<Navigation>) -> Command,
    ) -> Option<Navigation> {
        let (tx, rx) = oneshot::channel();
        self.commands.send(build(tx)).await.ok()?;
        rx.await.ok()
    }
}

async fn run(
    mut router: SessionRouter,
    mut commands: mpsc::Receiver<Command>,
    mut events: StorageEvents,
    updates: watch::Sender<Navigation>,
    period: Duration,
) {
    let mut validator = timer_for(&router, None, period);
    let mut listening = true;

    loop {
        let (outcome, reply) = tokio::select! {
            biased;

            _ = tick(&mut validator), if validator.is_some() => (router.validate(), None),

            event = events.changed(), if listening => match event {
                Some(event) => {
                    debug!("Storage changed in another context: key '{}'", event.key);
                    (router.storage_changed(), None)
                }
                None => {
                    listening = false;
                    (None, None)
                }
            },

            cmd = commands.recv() => match cmd {
                Some(Command::Navigate(path, reply)) => (Some(router.navigate(&path)), Some(reply)),
                Some(Command::LoginCompleted(reply)) => {
                    let nav = router.complete_login().unwrap_or_else(|| router.snapshot());
                    (Some(nav), Some(reply))
                }
                Some(Command::Logout(reply)) => {
                    let nav = router.logout().unwrap_or_else(|| router.snapshot());
                    (Some(nav), Some(reply))
                }
                Some(Command::Shutdown) | None => break,
            },
        };

        if let Some(nav) = outcome {
            validator = timer_for(&router, validator, period);
            // publish first so a caller woken by the reply reads the same state
            updates.send_replace(nav.clone());
            if let Some(reply) = reply {
                let _ = reply.send(nav);
            }
        }
    }

    info!("Router stopped");
}

/// Keeps the running timer while authenticated, starts one on entry,
/// and drops it on exit.
fn timer_for(router: &SessionRouter, current: Option<Interval>, period: Duration) -> Option<Interval> {
    if !router.state().is_authenticated() {
        if current.is_some() {
            debug!("Session validation timer cancelled");
        }
        return None;
    }
    current.or_else(|| {
        debug!("Session validation timer started ({}s)", period.as_secs());
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(interval)
    })
}

async fn tick(validator: &mut Option<Interval>) {
    match validator {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
