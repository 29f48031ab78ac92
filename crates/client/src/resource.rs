use std::future::Future;

use tokio::sync::mpsc;

use crate::error::RepoError;

/// Result of an in-flight or completed asynchronous operation.
///
/// `Loading` is the initial state; `Success` and `Error` are terminal.
/// A consumer sees `Loading` again only when it explicitly starts a new
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resource::Loading)
    }
}

/// Observation side of one operation: yields `Loading`, then the terminal
/// state, then closes. Dropping the receiver is the cancellation boundary;
/// the spawned task stops emitting but the in-flight request is not
/// aborted.
pub type ResourceStream<T> = mpsc::Receiver<Resource<T>>;

/// Runs `op` on its own task and exposes it as a resource sequence.
///
/// Capacity two: both sends complete without waiting on the observer, so
/// the task finishes even if nobody ever reads.
pub(crate) fn spawn_resource<T, F>(op: F) -> ResourceStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, RepoError>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(2);
    tokio::spawn(async move {
        if tx.send(Resource::Loading).await.is_err() {
            return;
        }
        let terminal = match op.await {
            Ok(value) => Resource::Success(value),
            Err(err) => {
                tracing::debug!("operation failed: {err}");
                Resource::Error(err.to_string())
            }
        };
        let _ = tx.send(terminal).await;
    });
    rx
}
