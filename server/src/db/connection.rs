//! Process-wide memoized database connection.
//!
//! The first caller starts connecting and parks the in-flight attempt in the
//! manager; callers arriving meanwhile await that same attempt. A success is
//! cached for the lifetime of the manager, a failure resets it so the next
//! call starts over.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

/// A failed connection attempt. Cloneable so every waiter receives it.
#[derive(Debug, Clone, Error)]
#[error("Failed to connect to database: {0}")]
pub struct ConnectError(#[source] Arc<sqlx::Error>);

impl From<sqlx::Error> for ConnectError {
    fn from(e: sqlx::Error) -> Self {
        ConnectError(Arc::new(e))
    }
}

/// Something that can open a reusable database handle.
pub trait Connect: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    fn connect(&self) -> BoxFuture<'static, Result<Self::Handle, sqlx::Error>>;
}

/// Opens a Postgres pool from the configured URL.
#[derive(Debug, Clone)]
pub struct PgConnector {
    url: String,
    max_connections: u32,
    acquire_timeout: Duration,
}

impl PgConnector {
    pub fn new(url: impl Into<String>, max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            max_connections,
            acquire_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.database_url.clone(),
            config.max_connections,
            config.acquire_timeout,
        )
    }
}

impl Connect for PgConnector {
    type Handle = PgPool;

    fn connect(&self) -> BoxFuture<'static, Result<PgPool, sqlx::Error>> {
        let options = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout);
        let url = self.url.clone();

        async move { options.connect(&url).await }.boxed()
    }
}

type PendingConnect<H> = Shared<BoxFuture<'static, Result<H, ConnectError>>>;

enum Slot<H> {
    Idle,
    Pending {
        attempt: u64,
        future: PendingConnect<H>,
    },
    Ready(H),
}

struct State<H> {
    attempts: u64,
    slot: Slot<H>,
}

pub struct ConnectionManager<C: Connect> {
    connector: C,
    state: Mutex<State<C::Handle>>,
}

impl<C: Connect> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            state: Mutex::new(State {
                attempts: 0,
                slot: Slot::Idle,
            }),
        }
    }

    /// Returns the cached handle, joining or starting a connection attempt
    /// if there is none yet.
    pub async fn acquire(&self) -> Result<C::Handle, ConnectError> {
        let (attempt, pending) = {
            let mut guard = self.lock();
            let state = &mut *guard;
            match &state.slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Pending { attempt, future } => (*attempt, future.clone()),
                Slot::Idle => {
                    state.attempts += 1;
                    let attempt = state.attempts;
                    info!(attempt, "Connecting to database");

                    let future = self
                        .connector
                        .connect()
                        .map_err(ConnectError::from)
                        .boxed()
                        .shared();
                    state.slot = Slot::Pending {
                        attempt,
                        future: future.clone(),
                    };
                    (attempt, future)
                }
            }
        };

        let outcome = pending.await;

        let mut guard = self.lock();
        let state = &mut *guard;
        // Only the attempt that is still parked may settle the slot.
        if matches!(&state.slot, Slot::Pending { attempt: current, .. } if *current == attempt) {
            state.slot = match &outcome {
                Ok(handle) => {
                    info!(attempt, "Connected to database");
                    Slot::Ready(handle.clone())
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Database connection attempt failed");
                    Slot::Idle
                }
            };
        }

        outcome
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.lock().slot, Slot::Ready(_))
    }

    fn lock(&self) -> MutexGuard<'_, State<C::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
