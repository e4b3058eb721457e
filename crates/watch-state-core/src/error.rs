use thiserror::Error;
use watch_state_remote::RemoteError;

/// Failures surfaced to callers of the saved-list store. Read-path failures
/// (list reload, catalog lookups, corrupt storage) are absorbed to empty
/// results and logged instead; only mutations on the authoritative store
/// propagate, because a failed save must not render as saved.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("remote write failed: {0}")]
    RemoteWrite(#[source] RemoteError),
}
