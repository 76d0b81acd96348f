//! Optimistic document synchronization.
//!
//! Local edits apply immediately; persistence runs in the background via
//! replace-writes (delete everything, insert the current snapshot). Remote
//! change notices trigger a reload, except during this session's own save
//! window, whose echoes are drained and discarded.

use crate::document::Document;
use crate::session::SessionProvider;
use crate::store::{ElementRecord, RemoteError, RemoteStore, Subscription};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default autosave interval.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Periodic save scheduling.
///
/// Owns no timer; the embedder calls [`SyncEngine::tick`] on whatever cadence
/// it likes and the interval check happens here.
#[derive(Debug, Clone)]
pub struct AutoSave {
    enabled: bool,
    interval: Duration,
    last_fire: Option<Instant>,
}

impl AutoSave {
    /// Create an enabled scheduler with the default interval.
    pub fn new() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_fire: None,
        }
    }

    /// Whether autosave is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable autosave. Disabling resets the interval clock.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.last_fire = None;
        }
    }

    /// Change the save interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Whether a save should fire now.
    ///
    /// Fires only when enabled, outside preview, with unsaved changes, and
    /// after the interval has elapsed since the last fire. The first check
    /// with unsaved changes fires immediately.
    pub fn should_fire(&self, unsaved_changes: bool, preview: bool) -> bool {
        if !self.enabled || preview || !unsaved_changes {
            return false;
        }
        match self.last_fire {
            Some(at) => at.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Record that a save fired.
    pub fn note_fired(&mut self) {
        self.last_fire = Some(Instant::now());
    }

    /// Forget the last fire time.
    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the engine's activity flags for UI indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStatus {
    pub is_loading: bool,
    pub is_saving: bool,
    pub unsaved_changes: bool,
}

/// Coordinates the document with the remote store and session.
pub struct SyncEngine<R: RemoteStore, S: SessionProvider> {
    remote: Arc<R>,
    session: Arc<S>,
    subscription: Option<Subscription>,
    is_loading: bool,
    is_saving: bool,
    autosave: AutoSave,
}

impl<R: RemoteStore, S: SessionProvider> SyncEngine<R, S> {
    /// Create an engine over the given store and session.
    pub fn new(remote: Arc<R>, session: Arc<S>) -> Self {
        Self {
            remote,
            session,
            subscription: None,
            is_loading: false,
            is_saving: false,
            autosave: AutoSave::new(),
        }
    }

    /// Subscribe to remote changes and perform the initial load.
    pub async fn start(&mut self, doc: &mut Document) -> Result<(), RemoteError> {
        self.subscription = Some(self.remote.subscribe());
        self.load(doc).await
    }

    /// Current activity flags.
    pub fn status(&self, doc: &Document) -> SyncStatus {
        SyncStatus {
            is_loading: self.is_loading,
            is_saving: self.is_saving,
            unsaved_changes: doc.has_unsaved_changes(),
        }
    }

    /// Autosave scheduler, for interval and enablement control.
    pub fn autosave_mut(&mut self) -> &mut AutoSave {
        &mut self.autosave
    }

    /// Replace the document with the remote snapshot.
    ///
    /// Concurrent calls coalesce: a load that arrives while one is already
    /// in flight returns immediately. On failure the local document is left
    /// intact.
    pub async fn load(&mut self, doc: &mut Document) -> Result<(), RemoteError> {
        let Some(principal) = self.session.current_principal() else {
            self.session.begin_reauth();
            return Err(RemoteError::NotSignedIn);
        };
        if self.is_loading {
            return Ok(());
        }
        self.is_loading = true;
        let result = self.remote.list(principal).await;
        self.is_loading = false;

        match result {
            Ok(records) => {
                let elements = records.into_iter().map(ElementRecord::into_element).collect();
                doc.replace_all(elements);
                log::debug!("loaded {} elements", doc.len());
                Ok(())
            }
            Err(err) => {
                if err == RemoteError::CredentialsExpired {
                    self.session.begin_reauth();
                }
                log::error!("load failed: {err}");
                Err(err)
            }
        }
    }

    /// Persist the document as a replace-write.
    ///
    /// On success the document is marked clean; on failure it stays dirty so
    /// the next autosave retries. Either way, notices that arrived during
    /// the save window are this session's own echoes and are discarded.
    pub async fn save(&mut self, doc: &mut Document) -> Result<(), RemoteError> {
        let Some(principal) = self.session.current_principal() else {
            self.session.begin_reauth();
            return Err(RemoteError::NotSignedIn);
        };

        self.is_saving = true;
        let result = self.write_snapshot(doc, principal).await;
        if let Some(subscription) = &self.subscription {
            let echoes = subscription.drain();
            if echoes > 0 {
                log::debug!("ignored {echoes} change notices from own save");
            }
        }
        self.is_saving = false;

        match result {
            Ok(()) => {
                doc.mark_saved();
                log::debug!("saved {} elements", doc.len());
                Ok(())
            }
            Err(err) => {
                if err == RemoteError::CredentialsExpired {
                    self.session.begin_reauth();
                }
                log::error!("save failed: {err}");
                Err(err)
            }
        }
    }

    async fn write_snapshot(
        &self,
        doc: &Document,
        principal: crate::session::PrincipalId,
    ) -> Result<(), RemoteError> {
        let records: Vec<ElementRecord> = doc
            .elements()
            .iter()
            .map(|el| ElementRecord::from_element(el, principal))
            .collect();
        // Not transactional: a failure after delete_all leaves the remote
        // collection empty until the next successful save.
        self.remote.delete_all(principal).await?;
        if !records.is_empty() {
            self.remote.insert_many(records).await?;
        }
        Ok(())
    }

    /// React to queued remote change notices by reloading once.
    ///
    /// Skipped entirely while a save is in flight. Any number of queued
    /// notices collapse into a single load.
    pub async fn poll_remote_changes(&mut self, doc: &mut Document) -> Result<(), RemoteError> {
        if self.is_saving {
            return Ok(());
        }
        let pending = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => 0,
        };
        if pending == 0 {
            return Ok(());
        }
        log::debug!("remote changed, reloading");
        self.load(doc).await
    }

    /// Drive the autosave schedule. Call on a steady cadence.
    pub async fn tick(&mut self, doc: &mut Document, preview: bool) -> Result<(), RemoteError> {
        if !self.autosave.should_fire(doc.has_unsaved_changes(), preview) {
            return Ok(());
        }
        self.autosave.note_fired();
        self.save(doc).await
    }
}
