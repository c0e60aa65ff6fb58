//! Async driver: sends an attempt and races it against the response timer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::editor::SourceEditor;
use crate::indicator::BusyIndicator;
use crate::request::ValidationRequest;
use crate::response::parse_response;
use crate::transport::{TransportError, ValidatorTransport};

use super::controller::{Trigger, ValidationSession};

pub type SharedSession<E, B> = Arc<Mutex<ValidationSession<E, B>>>;

/// Run one attempt to completion.
///
/// The session lock is only held while state changes, never across the request.
/// When the timer wins, the timeout is applied and the request is still awaited;
/// its response renders normally. Returns the attempt's sequence number, or
/// `None` if nothing was sent.
pub async fn run_validation<T, E, B>(
    session: &SharedSession<E, B>,
    transport: &T,
    request: ValidationRequest,
    trigger: Trigger,
) -> Option<u64>
where
    T: ValidatorTransport + ?Sized,
    E: SourceEditor + Default,
    B: BusyIndicator + Default,
{
    let (attempt, timeout) = {
        let mut session = session.lock().await;
        let attempt = session.begin(request, trigger)?;
        (attempt, session.timeout())
    };

    let response = transport.send(&attempt.request);
    tokio::pin!(response);

    let outcome = tokio::select! {
        outcome = &mut response => outcome,
        _ = tokio::time::sleep(timeout) => {
            session.lock().await.on_timeout(attempt.seq);
            response.await
        }
    };

    let outcome =
        outcome.and_then(|body| parse_response(&body).map_err(TransportError::from));

    session.lock().await.on_response(attempt.seq, outcome);
    Some(attempt.seq)
}

/// Run an attempt in the background
pub fn spawn_validation<T, E, B>(
    session: SharedSession<E, B>,
    transport: Arc<T>,
    request: ValidationRequest,
    trigger: Trigger,
) -> JoinHandle<Option<u64>>
where
    T: ValidatorTransport + ?Sized + 'static,
    E: SourceEditor + Default + Send + 'static,
    B: BusyIndicator + Default + Send + 'static,
{
    tokio::spawn(async move { run_validation(&session, transport.as_ref(), request, trigger).await })
}
