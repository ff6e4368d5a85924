//! Ingestion orchestrator.
//!
//! One ingestion pass: fetch everything the mail source has, drop the
//! messages the store already knows, persist the rest one by one in
//! fetch order, and aggregate the outcome. Passes are driven by an
//! external trigger; there is no timer or background loop here.

use tracing::{debug, info, warn};

use crate::source::MailSource;
use crate::store::{MessageStore, StoreError};
use crate::{Error, Result};

/// Outcome of one ingestion pass.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Number of messages durably persisted.
    pub saved: usize,
    /// Number of fetched messages skipped as already known.
    pub skipped: usize,
    /// Per-message persistence failures. Non-empty failures with a
    /// non-zero `saved` still count as an overall success.
    pub failures: Vec<IngestFailure>,
}

/// A single message whose persistence failed during a pass.
#[derive(Debug)]
pub struct IngestFailure {
    /// Source identifier of the message.
    pub uidl: String,
    /// The underlying store failure.
    pub error: StoreError,
}

/// Run one ingestion pass against the given source and store.
///
/// Fetch failures abort the pass before anything is written. Persistence
/// failures are isolated per message: the loop records them and carries
/// on, and messages committed before a failure (or before cancellation
/// at an await point) stay committed.
///
/// # Errors
///
/// Returns an error if the fetch fails, if the dedup lookup fails, or if
/// at least one message was attempted and none could be persisted — in
/// that last case the error wraps the first recorded failure.
pub async fn run_ingestion<S, P>(source: &S, store: &P) -> Result<IngestReport>
where
    S: MailSource,
    P: MessageStore,
{
    info!("starting ingestion pass");

    let fetched = source.fetch_all().await?;
    if fetched.is_empty() {
        info!("mailbox is empty, nothing to ingest");
        return Ok(IngestReport::default());
    }
    debug!(fetched = fetched.len(), "fetched messages from source");

    // Partition preserves fetch order within both halves.
    let (new, skipped) = match store.dedup_window().await? {
        Some(known) => {
            let (new, known_msgs): (Vec<_>, Vec<_>) = fetched
                .into_iter()
                .partition(|message| !known.contains(&message.uidl));
            (new, known_msgs.len())
        }
        None => (fetched, 0),
    };

    if new.is_empty() {
        info!(skipped, "no new messages");
        return Ok(IngestReport {
            skipped,
            ..IngestReport::default()
        });
    }

    let mut saved = 0;
    let mut failures = Vec::new();

    for message in &new {
        match store.persist(message).await {
            Ok(id) => {
                debug!(uidl = %message.uidl, id, "message persisted");
                saved += 1;
            }
            Err(error) => {
                warn!(uidl = %message.uidl, %error, "failed to persist message");
                failures.push(IngestFailure {
                    uidl: message.uidl.clone(),
                    error,
                });
            }
        }
    }

    if saved == 0 && !failures.is_empty() {
        let first = failures.swap_remove(0);
        return Err(Error::NothingPersisted {
            uidl: first.uidl,
            source: first.error,
        });
    }

    info!(
        saved,
        skipped,
        failed = failures.len(),
        "ingestion pass complete"
    );

    Ok(IngestReport {
        saved,
        skipped,
        failures,
    })
}
