//! The overlay's transport controller.
//!
//! `Session` is a cheap, cloneable handle owning both stores, the bridge and
//! the toast queue. Every player-bar action goes through it: the store is
//! mutated first, then the matching command is sent through the bridge.
//! Whenever an action changes which track is current, the track-change
//! effect runs before the action returns.
//!
//! Locks are never held across each other or across an await.

use crate::bridge::{Bridge, DeliveryPolicy};
use crate::player::{
    AutoAdvance, DisplayMode, PlaybackStatus, PlayerState, PlayerStore,
};
use crate::playlist::{
    PlaylistMode, PlaylistState, PlaylistStore, current_track,
};
use crate::ranking::find_by_url;
use crate::toast::{Toast, ToastKind, ToastQueue};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;
use vcp_config::{ConfigError, RuntimeConfig};
use vcp_contracts::{
    CommandChannel, InboundEnvelope, OutboundCommand, RankingSource,
};
use vcp_model::{PlaylistEntry, RankingCategory, Track, VideoId};

#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

struct Inner {
    playlist: Mutex<PlaylistStore>,
    player: Mutex<PlayerStore>,
    advance: Mutex<AutoAdvance>,
    runtime: Mutex<RuntimeConfig>,
    toasts: Mutex<ToastQueue>,
    pending_close: Mutex<Option<JoinHandle<()>>>,
    bridge: Bridge,
    ranking: Option<Arc<dyn RankingSource>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let playlist_len = self.inner.playlist.lock().state().len();
        let player = self.inner.player.lock().state().clone();
        f.debug_struct("Session")
            .field("playlist_len", &playlist_len)
            .field("player", &player)
            .field("bridge", &self.inner.bridge)
            .field("has_ranking", &self.inner.ranking.is_some())
            .finish()
    }
}

impl Session {
    pub fn new(
        channel: Arc<dyn CommandChannel>,
        config: RuntimeConfig,
    ) -> Self {
        Self::build(channel, config, None)
    }

    pub fn new_with_ranking(
        channel: Arc<dyn CommandChannel>,
        config: RuntimeConfig,
        ranking: Arc<dyn RankingSource>,
    ) -> Self {
        Self::build(channel, config, Some(ranking))
    }

    fn build(
        channel: Arc<dyn CommandChannel>,
        config: RuntimeConfig,
        ranking: Option<Arc<dyn RankingSource>>,
    ) -> Self {
        let base = config.base();
        let epsilon = config.auto_advance_epsilon();
        let inner = Inner {
            playlist: Mutex::new(PlaylistStore::new()),
            player: Mutex::new(PlayerStore::new(base.playback.initial_volume)),
            advance: Mutex::new(AutoAdvance::new(epsilon)),
            toasts: Mutex::new(ToastQueue::new(base.toast.lifetime())),
            pending_close: Mutex::new(None),
            bridge: Bridge::new(
                channel,
                DeliveryPolicy::from_runtime(&config),
            ),
            runtime: Mutex::new(config),
            ranking,
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    // ---------- reads ----------

    pub fn playlist(&self) -> PlaylistState {
        self.inner.playlist.lock().state().clone()
    }

    pub fn player(&self) -> PlayerState {
        self.inner.player.lock().state().clone()
    }

    pub fn current_track(&self) -> Option<Track> {
        current_track(self.inner.playlist.lock().state()).cloned()
    }

    pub fn bridge(&self) -> &Bridge {
        &self.inner.bridge
    }

    pub fn config(&self) -> RuntimeConfig {
        self.inner.runtime.lock().clone()
    }

    /// Live toasts; expired ones are dropped first.
    pub fn toasts(&self) -> Vec<Toast> {
        let mut toasts = self.inner.toasts.lock();
        toasts.prune(tokio::time::Instant::now());
        toasts.active().cloned().collect()
    }

    /// Watch page of the current track, for the "open on site" button.
    pub fn watch_url(&self) -> Option<Url> {
        let track = self.current_track()?;
        let base =
            self.inner.runtime.lock().base().ranking.watch_base_url.clone();
        match track.watch_url(&base) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!("[Session] No watch url for {}: {}", track.id, err);
                None
            }
        }
    }

    /// Apply new tunables. Affects commands sent after the call.
    pub fn reconfigure(
        &self,
        config: RuntimeConfig,
    ) -> Result<(), ConfigError> {
        config.effective()?;
        self.inner
            .advance
            .lock()
            .set_epsilon(config.auto_advance_epsilon());
        self.inner
            .bridge
            .set_policy(DeliveryPolicy::from_runtime(&config));
        *self.inner.runtime.lock() = config;
        Ok(())
    }

    // ---------- playlist ----------

    /// Replace the playlist and start at `start` (clamped).
    pub fn load_playlist(&self, entries: Vec<PlaylistEntry>, start: usize) {
        self.cancel_close();
        let count = entries.len();
        self.with_cursor(|playlist| playlist.set_playlist_at(entries, start));
        info!("[Session] Playlist loaded with {} entries", count);
    }

    pub fn append(&self, entries: Vec<PlaylistEntry>) {
        self.cancel_close();
        self.with_cursor(|playlist| playlist.append_entries(entries));
    }

    pub fn clear_playlist(&self) {
        self.with_cursor(PlaylistStore::clear);
    }

    pub fn next(&self) -> bool {
        self.with_cursor(PlaylistStore::next)
    }

    pub fn previous(&self) -> bool {
        self.with_cursor(PlaylistStore::previous)
    }

    pub fn select(&self, index: usize) -> usize {
        self.with_cursor(|playlist| playlist.set_current_index(index))
    }

    pub fn remove(&self, index: usize) -> Option<PlaylistEntry> {
        self.with_cursor(|playlist| playlist.remove_at(index))
    }

    // ---------- transport ----------

    pub fn play(&self) {
        self.set_status(PlaybackStatus::Playing);
    }

    pub fn pause(&self) {
        self.set_status(PlaybackStatus::Paused);
    }

    pub fn toggle_playback(&self) -> PlaybackStatus {
        let status = self.inner.player.lock().toggle_playback();
        self.inner.bridge.send_command(status_command(status));
        status
    }

    /// Seek to `fraction`. The store shows the target right away; the frame
    /// confirms through its next progress report.
    pub fn seek(&self, fraction: f64) -> f64 {
        let target = self.inner.player.lock().set_progress(fraction);
        self.inner.bridge.send_command(OutboundCommand::seek(target));
        target
    }

    pub fn set_volume(&self, level: f64) -> f64 {
        let volume = self.inner.player.lock().set_volume(level);
        self.inner.bridge.send_command(OutboundCommand::volume(volume));
        volume
    }

    pub fn fullscreen(&self) {
        self.inner.bridge.send_command(OutboundCommand::Fullscreen);
    }

    // ---------- presentation ----------

    /// Picture-in-picture on, or back to whatever the sidebar implies.
    pub fn toggle_pip(&self) -> DisplayMode {
        let sidebar = self.inner.playlist.lock().state().mode();
        let mut player = self.inner.player.lock();
        let next = match player.state().display_mode() {
            DisplayMode::Pip => match sidebar {
                PlaylistMode::Full => DisplayMode::Full,
                PlaylistMode::Hidden => DisplayMode::Hidden,
            },
            _ => DisplayMode::Pip,
        };
        player.set_display_mode(next);
        next
    }

    /// Open or close the sidebar. The player follows unless it floats.
    pub fn toggle_expand(&self) -> PlaylistMode {
        let mode = self.inner.playlist.lock().toggle_mode();
        let mut player = self.inner.player.lock();
        if player.state().display_mode() != DisplayMode::Pip {
            player.set_display_mode(match mode {
                PlaylistMode::Full => DisplayMode::Full,
                PlaylistMode::Hidden => DisplayMode::Hidden,
            });
        }
        mode
    }

    /// Hide everything now, wipe state once the exit animation is over.
    ///
    /// Loading a playlist before the delay elapses keeps the new playlist.
    pub fn close(&self) {
        self.inner.player.lock().set_display_mode(DisplayMode::Hidden);
        self.inner.playlist.lock().set_mode(PlaylistMode::Hidden);

        let delay = self.inner.runtime.lock().base().teardown.close_delay();
        let Ok(handle) = Handle::try_current() else {
            self.finish_close();
            return;
        };

        let weak = Arc::downgrade(&self.inner);
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                Session { inner }.finish_close();
            }
        });
        if let Some(previous) = self.inner.pending_close.lock().replace(task) {
            previous.abort();
        }
    }

    /// Stop every timer and drop the inbound subscription. The session
    /// stays usable; loading a playlist re-arms it.
    pub fn teardown(&self) {
        self.cancel_close();
        self.inner.bridge.shutdown();
        debug!("[Session] Torn down");
    }

    // ---------- inbound ----------

    /// Feed one raw window message. Returns true when it changed state.
    pub fn handle_inbound(&self, raw: &Value) -> bool {
        match InboundEnvelope::decode(raw) {
            Some(envelope) => self.apply_envelope(envelope),
            None => false,
        }
    }

    // ---------- ranking ----------

    /// Replace the playlist with one ranking category.
    ///
    /// On failure a toast is shown and the playlist is left alone.
    pub async fn load_category(&self, category: RankingCategory) -> bool {
        let failure = format!("Could not load {}", category.display_name());
        let Some(source) = self.inner.ranking.clone() else {
            self.toast_error(failure);
            return false;
        };

        match source.fetch_category(category).await {
            Some(entries) if !entries.is_empty() => {
                self.load_playlist(entries, 0);
                true
            }
            _ => {
                self.toast_error(failure);
                false
            }
        }
    }

    /// Append the ranked video linked by `url`.
    pub async fn add_from_url(&self, url: &str) -> Option<PlaylistEntry> {
        let rankings = match self.inner.ranking.clone() {
            Some(source) => source.fetch_all().await,
            None => Vec::new(),
        };

        let Some(entry) = find_by_url(&rankings, url) else {
            self.toast_error("This video is not in any ranking");
            return None;
        };
        self.append(vec![entry.clone()]);
        Some(entry)
    }

    /// Load the whole ranking containing the video at `url`, starting at it.
    pub async fn play_from_url(&self, url: &str) -> bool {
        let rankings = match self.inner.ranking.clone() {
            Some(source) => source.fetch_all().await,
            None => Vec::new(),
        };

        let found = rankings.into_iter().find_map(|ranking| {
            let index = ranking
                .entries
                .iter()
                .position(|entry| entry.track.id.appears_in(url))?;
            Some((ranking.entries, index))
        });
        match found {
            Some((entries, index)) => {
                self.load_playlist(entries, index);
                true
            }
            None => {
                self.toast_error("This video is not in any ranking");
                false
            }
        }
    }

    // ---------- internals ----------

    fn set_status(&self, status: PlaybackStatus) {
        self.inner.player.lock().set_playback_status(status);
        self.inner.bridge.send_command(status_command(status));
    }

    fn toast_error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("[Session] {}", message);
        self.inner.toasts.lock().push(message, ToastKind::Error);
    }

    fn current_id(&self) -> Option<VideoId> {
        current_id_of(self.inner.playlist.lock().state())
    }

    /// Run a playlist mutation, then the track-change effect if the current
    /// track is a different one afterwards.
    fn with_cursor<R>(
        &self,
        mutate: impl FnOnce(&mut PlaylistStore) -> R,
    ) -> R {
        self.move_cursor(Cause::User, mutate)
    }

    fn move_cursor<R>(
        &self,
        cause: Cause,
        mutate: impl FnOnce(&mut PlaylistStore) -> R,
    ) -> R {
        let (before, result, after) = {
            let mut playlist = self.inner.playlist.lock();
            let before = current_id_of(playlist.state());
            let result = mutate(&mut playlist);
            let after = current_id_of(playlist.state());
            (before, result, after)
        };
        if before != after {
            self.on_track_changed(after, cause);
        }
        result
    }

    fn on_track_changed(&self, current: Option<VideoId>, cause: Cause) {
        let bridge = &self.inner.bridge;
        bridge.cancel_pending();
        // After an auto-advance the frame keeps reporting the old track's
        // end until the new one loads; stay latched until progress drops.
        if cause == Cause::User {
            self.inner.advance.lock().rearm();
        }
        self.inner.player.lock().set_progress(0.0);

        let Some(id) = current else {
            debug!("[Session] No current track");
            bridge.unbind_inbound();
            self.inner
                .player
                .lock()
                .set_playback_status(PlaybackStatus::Paused);
            return;
        };

        debug!("[Session] Current track is now {}", id);
        let weak = Arc::downgrade(&self.inner);
        let bound = id.clone();
        bridge.bind_inbound(move |envelope| {
            route_inbound(&weak, &bound, envelope);
        });

        if self.inner.runtime.lock().autoplay() {
            self.set_status(PlaybackStatus::Playing);
        }
    }

    fn apply_envelope(&self, envelope: InboundEnvelope) -> bool {
        let InboundEnvelope::Progress { percentage } = envelope else {
            return false;
        };
        if self.current_id().is_none() {
            return false;
        }

        let progress = self.inner.player.lock().set_progress(percentage);
        if !self.inner.advance.lock().observe(progress) {
            return true;
        }

        if !self.move_cursor(Cause::TrackEnded, PlaylistStore::next) {
            debug!("[Session] Last entry finished; stopping");
        }
        true
    }

    fn finish_close(&self) {
        self.inner.pending_close.lock().take();
        self.inner.player.lock().reset();
        self.clear_playlist();
        debug!("[Session] Closed");
    }

    fn cancel_close(&self) {
        if let Some(task) = self.inner.pending_close.lock().take() {
            task.abort();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    User,
    TrackEnded,
}

/// Inbound messages are only honoured while the track they were bound for
/// is still current.
fn route_inbound(
    weak: &Weak<Inner>,
    bound: &VideoId,
    envelope: InboundEnvelope,
) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let session = Session { inner };
    if session.current_id().as_ref() == Some(bound) {
        session.apply_envelope(envelope);
    }
}

fn current_id_of(state: &PlaylistState) -> Option<VideoId> {
    current_track(state).map(|track| track.id.clone())
}

fn status_command(status: PlaybackStatus) -> OutboundCommand {
    match status {
        PlaybackStatus::Playing => OutboundCommand::Play,
        PlaybackStatus::Paused => OutboundCommand::Pause,
    }
}
