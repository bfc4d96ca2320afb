use std::fs;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    auth::{AuthError, OtpGateway},
    config::{BackendConfig, RuntimeConfig},
    core::store::{ListingStore, StoreError},
    listing::{Listing, ListingDraft},
    persist::{PersistError, Slot, memory::MemorySlot, sqlite::SqliteSlot},
};

use super::events::BackendEvent;

/// Failure of a backend command.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The listing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The OTP gateway failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The backend task is gone.
    #[error("backend channel closed")]
    ChannelClosed,
}

/// Cloneable front for the backend task.
///
/// Every command is processed to completion before the next one starts, so
/// concurrent `add_listing` calls from any number of clones never overwrite
/// each other's records.
pub struct BackendHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<BackendEvent>,
}

impl Clone for BackendHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    GetListings {
        resp: oneshot::Sender<Result<Vec<Listing>, RuntimeError>>,
    },
    AddListing {
        draft: ListingDraft,
        resp: oneshot::Sender<Result<Listing, RuntimeError>>,
    },
    SendOtp {
        phone: String,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    VerifyOtp {
        phone: String,
        code: String,
        resp: oneshot::Sender<Result<bool, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

/// Moves `store` and `otp` into a new task and returns its handle.
pub fn spawn_backend<S, G>(store: ListingStore<S>, otp: G, config: &RuntimeConfig) -> BackendHandle
where
    S: Slot + 'static,
    G: OtpGateway + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<BackendEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        tracing::debug!("backend started");

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut store, &otp, &events_tx_loop).await;
            if done {
                break;
            }
        }

        if let Err(err) = store.flush() {
            tracing::warn!(error = %err, "final flush failed");
        }
        tracing::debug!("backend stopped");
    });

    BackendHandle { cmd_tx, events_tx }
}

/// Opens the slot named by `config` and spawns a backend over it.
///
/// With no storage path the listings live in memory for the process lifetime.
pub fn spawn_from_config(config: &BackendConfig) -> Result<BackendHandle, RuntimeError> {
    let slot: Box<dyn Slot> = match &config.storage.path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Persist(PersistError::Message(format!(
                        "create {}: {e}",
                        parent.display()
                    )))
                })?;
            }
            Box::new(SqliteSlot::open(path).map_err(StoreError::from)?)
        }
        None => Box::new(MemorySlot::new()),
    };

    let store = ListingStore::open(slot, config.store_options());
    Ok(spawn_backend(store, config.otp_stub(), &config.runtime))
}

impl BackendHandle {
    /// Receiver for events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<BackendEvent> {
        self.events_tx.subscribe()
    }

    /// See [`ListingStore::get_listings`].
    pub async fn get_listings(&self) -> Result<Vec<Listing>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::GetListings { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// See [`ListingStore::add_listing`].
    pub async fn add_listing(&self, draft: ListingDraft) -> Result<Listing, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::AddListing { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Sends a one-time code to `phone`.
    pub async fn send_otp(&self, phone: impl Into<String>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SendOtp {
                phone: phone.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Checks `code` for `phone`.
    pub async fn verify_otp(
        &self,
        phone: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::VerifyOtp {
                phone: phone.into(),
                code: code.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Flushes storage and stops the task.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

impl OtpGateway for BackendHandle {
    async fn send_otp(&self, phone: &str) -> Result<(), AuthError> {
        BackendHandle::send_otp(self, phone)
            .await
            .map_err(into_auth_error)
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<bool, AuthError> {
        BackendHandle::verify_otp(self, phone, code)
            .await
            .map_err(into_auth_error)
    }
}

fn into_auth_error(err: RuntimeError) -> AuthError {
    match err {
        RuntimeError::Auth(inner) => inner,
        other => AuthError::Gateway(other.to_string()),
    }
}

async fn handle_command<S: Slot, G: OtpGateway>(
    cmd: Command,
    store: &mut ListingStore<S>,
    otp: &G,
    events_tx: &broadcast::Sender<BackendEvent>,
) -> bool {
    match cmd {
        Command::GetListings { resp } => {
            let res = store.get_listings().await.map_err(RuntimeError::from);
            match &res {
                Ok(listings) => {
                    let _ = events_tx.send(BackendEvent::ListingsLoaded {
                        count: listings.len(),
                    });
                }
                Err(err) => tracing::warn!(error = %err, "failed to load listings"),
            }
            let _ = resp.send(res);
        }
        Command::AddListing { draft, resp } => {
            let res = store.add_listing(draft).await.map_err(RuntimeError::from);
            match &res {
                Ok(listing) => {
                    let _ = events_tx.send(BackendEvent::ListingAdded {
                        id: listing.id.clone(),
                    });
                }
                Err(err) => tracing::warn!(error = %err, "failed to add listing"),
            }
            let _ = resp.send(res);
        }
        Command::SendOtp { phone, resp } => {
            let res = otp.send_otp(&phone).await.map_err(RuntimeError::from);
            if res.is_ok() {
                let _ = events_tx.send(BackendEvent::OtpSent);
            }
            let _ = resp.send(res);
        }
        Command::VerifyOtp { phone, code, resp } => {
            let res = otp
                .verify_otp(&phone, &code)
                .await
                .map_err(RuntimeError::from);
            if let Ok(accepted) = &res {
                let _ = events_tx.send(BackendEvent::OtpChecked {
                    accepted: *accepted,
                });
            }
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(store.flush().map_err(RuntimeError::from));
            return true;
        }
    }

    false
}
