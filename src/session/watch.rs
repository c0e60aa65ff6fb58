//! Watch mode: revalidate a local file whenever it changes on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::editor::SourceEditor;
use crate::indicator::BusyIndicator;
use crate::request::{DocumentRef, ValidationRequest};
use crate::transport::ValidatorTransport;

use super::controller::{Trigger, ValidationSession};
use super::driver::{run_validation, SharedSession};

/// Quiet period after a change before the file is read
const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    DocumentChanged,
    WatcherError(notify::Error),
}

/// Read a local file into a file-upload document
pub async fn read_document(path: &Path) -> Result<DocumentRef> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.csl".to_string());
    Ok(DocumentRef::File { name, bytes })
}

/// Watch `path` and start a new attempt on every change.
///
/// Attempts run concurrently; a response overtaken by a newer attempt is
/// discarded by the session. `on_render` is called after each attempt that is
/// still the latest one. Runs until the watcher channel closes.
pub async fn watch_file<T, E, B, F>(
    session: SharedSession<E, B>,
    transport: Arc<T>,
    path: PathBuf,
    on_render: F,
) -> Result<()>
where
    T: ValidatorTransport + ?Sized + 'static,
    E: SourceEditor + Default + Send + 'static,
    B: BusyIndicator + Default + Send + 'static,
    F: Fn(&ValidationSession<E, B>) + Send + Sync + 'static,
{
    let path = std::fs::canonicalize(&path)
        .with_context(|| format!("Cannot watch {}", path.display()))?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let watched = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    if event.paths.iter().any(|p| p.ends_with(&watched)) {
                        let _ = tx.send(WatcherEvent::DocumentChanged);
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    // Editors often replace the file, so watch the directory
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    log::info!("Watching {} for changes", path.display());

    let on_render = Arc::new(on_render);

    while let Some(event) = rx.recv().await {
        match event {
            WatcherEvent::DocumentChanged => {
                // One save usually arrives as several events
                tokio::time::sleep(SETTLE_DELAY).await;
                let merged = drain_changes(&mut rx);
                if merged > 0 {
                    log::debug!("Merged {} queued change events", merged);
                }

                let document = match read_document(&path).await {
                    Ok(document) => document,
                    Err(e) => {
                        log::warn!("{:#}", e);
                        continue;
                    }
                };
                log::info!("Document changed: {}", path.display());

                let schema_version = session.lock().await.schema_version().to_string();
                let request = ValidationRequest::new(document, schema_version);

                let session = session.clone();
                let transport = transport.clone();
                let on_render = on_render.clone();
                tokio::spawn(async move {
                    let Some(seq) =
                        run_validation(&session, transport.as_ref(), request, Trigger::FileChanged)
                            .await
                    else {
                        return;
                    };
                    let session = session.lock().await;
                    if session.latest_seq() == seq {
                        (*on_render)(&*session);
                    }
                });
            }
            WatcherEvent::WatcherError(e) => {
                log::error!("File watcher error: {}", e);
            }
        }
    }

    drop(watcher);
    Ok(())
}

/// Consume change events already queued, returning how many were dropped
fn drain_changes(rx: &mut mpsc::UnboundedReceiver<WatcherEvent>) -> usize {
    let mut merged = 0;
    while let Ok(event) = rx.try_recv() {
        match event {
            WatcherEvent::DocumentChanged => merged += 1,
            WatcherEvent::WatcherError(e) => log::error!("File watcher error: {}", e),
        }
    }
    merged
}
