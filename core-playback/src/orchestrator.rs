//! # Playback Orchestrator
//!
//! Owns the play queue, reconciles engine lifecycle signals into observable
//! state, and drives the engine through queue transitions.
//!
//! ## Overview
//!
//! The orchestrator sits between two asynchronous worlds: callers issuing
//! control commands (play, pause, jump) and the embedded media engine pushing
//! lifecycle signals on a channel. Observable state only changes when the
//! engine confirms a transition; commands themselves are fire-and-forget.
//!
//! Auto-advance after a track ends (or fails) is deferred by a short grace
//! delay and guarded by a queue generation counter, so an explicit user
//! action in the meantime cancels the pending advance instead of racing it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core_playback::PlayerOrchestrator;
//! use core_runtime::{EventBus, PlaybackTuning};
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! # fn engine() -> Arc<dyn bridge_traits::MediaEngine> { unimplemented!() }
//! # async fn run() {
//! let (signal_tx, signal_rx) = mpsc::unbounded_channel();
//! let events = EventBus::new(100);
//! let player = PlayerOrchestrator::new(engine(), signal_rx, events, PlaybackTuning::default());
//! // Host binding forwards engine callbacks into signal_tx.
//! # let _ = signal_tx;
//! # let _ = player;
//! # }
//! ```

use crate::error::{PlaybackError, Result};
use crate::queue::PlayQueue;
use crate::state::PlayerState;
use bridge_traits::{EngineSignal, EngineState, MediaEngine};
use core_metadata::Track;
use core_runtime::{CoreEvent, EventBus, PlaybackEvent, PlaybackTuning};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Maximum accepted volume percentage.
const MAX_VOLUME: u8 = 100;

/// Shared orchestrator state.
///
/// Spawned tasks (polling, grace delays) hold only a [`Weak`] reference so
/// they cannot keep the orchestrator alive after it is dropped. The mutex is
/// never held across an await point.
struct Inner {
    engine: Arc<dyn MediaEngine>,
    events: EventBus,
    tuning: PlaybackTuning,
    /// Set once the engine signals readiness. Commands before that are
    /// silently dropped.
    ready: AtomicBool,
    state: Mutex<PlayerState>,
    /// Bumped on every cursor mutation. Pending grace-delayed advances
    /// capture the value at schedule time and abandon themselves if it has
    /// moved on by the time the delay elapses.
    generation: AtomicU64,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn emit(&self, event: PlaybackEvent) {
        self.events.emit(CoreEvent::Playback(event)).ok();
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Classify the readiness gate. Control surfaces map the transient
    /// [`PlaybackError::EngineNotReady`] to a silent no-op instead of
    /// surfacing it.
    fn require_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(PlaybackError::EngineNotReady)
        }
    }

    /// Load the track at the cursor into the engine (the engine autoplays a
    /// freshly loaded track). Failures surface through the engine's own
    /// error signal, so they are only logged here.
    async fn load_current(&self) {
        let track_id = {
            let state = self.state.lock();
            match state.current_track() {
                Some(track) => track.id.as_str().to_string(),
                None => return,
            }
        };
        if let Err(e) = self.engine.load_track(&track_id).await {
            warn!(track_id = %track_id, error = %e, "Failed to load track");
        }
    }

    fn stop_polling(&self) {
        if let Some(handle) = self.poll_task.lock().take() {
            handle.abort();
        }
    }

    /// Start the once-per-interval position poll, replacing any running one.
    /// The loop terminates on its own as soon as the engine leaves the
    /// playing state, so stale loops never outlive a pause or track change.
    fn start_polling(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let interval = self.tuning.poll_interval;
        let handle = tokio::spawn(async move {
            loop {
                sleep(interval).await;
                let Some(inner) = weak.upgrade() else { break };
                match inner.engine.engine_state().await {
                    Ok(EngineState::Playing) => {}
                    _ => break,
                }
                let position = inner.engine.position().await;
                let duration = inner.engine.duration().await;
                let (Ok(position), Ok(duration)) = (position, duration) else {
                    // Transient query failure; keep the last known values
                    // and try again next tick.
                    continue;
                };
                let track_id = {
                    let mut state = inner.state.lock();
                    state.position = position;
                    state.duration = duration;
                    state.current_track().map(|t| t.id.as_str().to_string())
                };
                if let Some(track_id) = track_id {
                    inner.emit(PlaybackEvent::PositionChanged {
                        track_id,
                        position_ms: position.as_millis() as u64,
                        duration_ms: duration.as_millis() as u64,
                    });
                }
            }
        });
        if let Some(old) = self.poll_task.lock().replace(handle) {
            old.abort();
        }
    }

    /// Schedule an auto-advance after `delay`. The advance only fires if the
    /// queue generation and cursor are both unchanged when the delay elapses;
    /// any user-driven navigation in between invalidates it.
    fn schedule_advance(self: &Arc<Self>, delay: Duration) {
        let weak = Arc::downgrade(self);
        let generation = self.generation.load(Ordering::SeqCst);
        let cursor = self.state.lock().queue.cursor();
        tokio::spawn(async move {
            sleep(delay).await;
            let Some(inner) = weak.upgrade() else { return };
            if inner.generation.load(Ordering::SeqCst) != generation {
                debug!("Pending auto-advance superseded by user action");
                return;
            }
            if inner.state.lock().queue.cursor() != cursor {
                return;
            }
            inner.advance(true).await;
        });
    }

    /// Move the cursor forward and play, or finish the queue at the end.
    async fn advance(self: &Arc<Self>, forward: bool) {
        let outcome = {
            let mut state = self.state.lock();
            let moved = if forward {
                state.queue.advance()
            } else {
                state.queue.retreat()
            };
            if moved {
                state.current_track().map(|t| TrackRef::of(t, state.queue.cursor()))
            } else if forward {
                // Reached the end of the queue: stop rather than wrap.
                state.is_playing = false;
                Some(TrackRef::queue_end(state.queue.cursor()))
            } else {
                // Already at the first track: stay put.
                None
            }
        };
        match outcome {
            Some(TrackRef::Track { track_id, title, index }) => {
                self.bump_generation();
                self.emit(PlaybackEvent::TrackChanged {
                    track_id,
                    title,
                    index,
                });
                if self.is_ready() {
                    self.load_current().await;
                }
            }
            Some(TrackRef::QueueEnd { last_index }) => {
                self.stop_polling();
                info!(last_index, "Queue finished");
                self.emit(PlaybackEvent::QueueEnded { last_index });
            }
            None => {}
        }
    }

    async fn handle_signal(self: &Arc<Self>, signal: EngineSignal) {
        debug!(signal = %signal.description(), "Engine signal");
        match signal {
            EngineSignal::Ready => {
                self.ready.store(true, Ordering::SeqCst);
                let volume = self.state.lock().volume;
                if let Err(e) = self.engine.set_volume(volume).await {
                    warn!(error = %e, "Failed to apply initial volume");
                }
            }
            EngineSignal::Playing => {
                let track_id = {
                    let mut state = self.state.lock();
                    state.is_playing = true;
                    state.current_track().map(|t| t.id.as_str().to_string())
                };
                if let Some(track_id) = track_id {
                    self.emit(PlaybackEvent::Playing { track_id });
                }
                self.start_polling();
            }
            EngineSignal::Paused => {
                let track_id = {
                    let mut state = self.state.lock();
                    state.is_playing = false;
                    state.current_track().map(|t| t.id.as_str().to_string())
                };
                self.stop_polling();
                if let Some(track_id) = track_id {
                    self.emit(PlaybackEvent::Paused { track_id });
                }
            }
            EngineSignal::Buffering => {
                debug!("Engine buffering");
            }
            EngineSignal::Cued => {
                // A cued track is loaded but not rolling; kick it off.
                if let Err(e) = self.engine.play().await {
                    warn!(error = %e, "Failed to start cued track");
                }
            }
            EngineSignal::Ended => {
                self.state.lock().is_playing = false;
                self.stop_polling();
                self.schedule_advance(self.tuning.ended_grace);
            }
            EngineSignal::Error { code } => {
                let track_id = {
                    let mut state = self.state.lock();
                    state.is_playing = false;
                    state.current_track().map(|t| t.id.as_str().to_string())
                };
                warn!(code, track_id = ?track_id, "Engine failed on current track, skipping");
                self.stop_polling();
                self.emit(PlaybackEvent::TrackFailed { track_id, code });
                self.schedule_advance(self.tuning.error_grace);
            }
        }
    }
}

/// Intermediate extracted under the state lock so the lock is released
/// before any await.
enum TrackRef {
    Track {
        track_id: String,
        title: String,
        index: usize,
    },
    QueueEnd {
        last_index: usize,
    },
}

impl TrackRef {
    fn of(track: &Track, index: usize) -> Self {
        TrackRef::Track {
            track_id: track.id.as_str().to_string(),
            title: track.title.clone(),
            index,
        }
    }

    fn queue_end(last_index: usize) -> Self {
        TrackRef::QueueEnd { last_index }
    }
}

/// Queue-aware playback controller over an injected [`MediaEngine`].
///
/// Create one per engine instance. Dropping the orchestrator aborts its
/// background tasks.
pub struct PlayerOrchestrator {
    inner: Arc<Inner>,
    signal_task: JoinHandle<()>,
}

impl PlayerOrchestrator {
    /// Build an orchestrator over an engine binding and the channel its host
    /// feeds lifecycle signals into. The signal loop runs until the sender
    /// side of the channel is dropped.
    pub fn new(
        engine: Arc<dyn MediaEngine>,
        mut signals: mpsc::UnboundedReceiver<EngineSignal>,
        events: EventBus,
        tuning: PlaybackTuning,
    ) -> Self {
        let inner = Arc::new(Inner {
            engine,
            events,
            state: Mutex::new(PlayerState::new(tuning.initial_volume)),
            tuning,
            ready: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            poll_task: Mutex::new(None),
        });
        let loop_inner = Arc::clone(&inner);
        let signal_task = tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                loop_inner.handle_signal(signal).await;
            }
            debug!("Engine signal channel closed");
        });
        Self { inner, signal_task }
    }

    /// Whether the engine has signalled readiness.
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> PlayerState {
        self.inner.state.lock().clone()
    }

    /// Replace the queue and start playing from `start_index` (clamped to
    /// the first track when out of range). Invalidates any pending
    /// auto-advance from the previous queue.
    pub async fn load_queue(&self, tracks: Vec<Track>, start_index: usize) {
        let queue = PlayQueue::new(tracks, start_index);
        let queue_len = queue.len();
        let current = {
            let mut state = self.inner.state.lock();
            state.queue = queue;
            state.is_playing = false;
            state.position = Duration::ZERO;
            state.duration = Duration::ZERO;
            state.current_track().map(|t| TrackRef::of(t, state.queue.cursor()))
        };
        self.inner.bump_generation();
        self.inner.stop_polling();
        match current {
            Some(TrackRef::Track { track_id, title, index }) => {
                info!(track_id = %track_id, index, queue_len, "Queue loaded");
                self.inner.emit(PlaybackEvent::TrackChanged {
                    track_id,
                    title,
                    index,
                });
                if self.inner.is_ready() {
                    self.inner.load_current().await;
                }
            }
            _ => {
                debug!("Empty queue loaded");
            }
        }
    }

    /// Resume playback. Silent no-op until the engine is ready.
    pub async fn play(&self) -> Result<()> {
        if let Err(e) = self.inner.require_ready() {
            debug!(error = %e, "Dropping play command");
            return Ok(());
        }
        self.inner.engine.play().await?;
        Ok(())
    }

    /// Pause playback. Silent no-op until the engine is ready.
    pub async fn pause(&self) -> Result<()> {
        if let Err(e) = self.inner.require_ready() {
            debug!(error = %e, "Dropping pause command");
            return Ok(());
        }
        self.inner.engine.pause().await?;
        Ok(())
    }

    /// Seek within the current track. Silent no-op until the engine is
    /// ready. The observed position updates immediately rather than waiting
    /// for the next poll tick.
    pub async fn seek_to(&self, position: Duration) -> Result<()> {
        if let Err(e) = self.inner.require_ready() {
            debug!(error = %e, "Dropping seek command");
            return Ok(());
        }
        self.inner.engine.seek(position).await?;
        self.inner.state.lock().position = position;
        Ok(())
    }

    /// Set the volume percentage, clamped to 100. The snapshot updates
    /// immediately; the engine is only told once it is ready (the stored
    /// value is applied on the ready signal).
    pub async fn set_volume(&self, level: u8) -> Result<()> {
        let level = level.min(MAX_VOLUME);
        self.inner.state.lock().volume = level;
        if let Err(e) = self.inner.require_ready() {
            debug!(error = %e, "Deferring volume until engine readiness");
            return Ok(());
        }
        self.inner.engine.set_volume(level).await?;
        Ok(())
    }

    /// Skip to the next track. At the end of the queue this stops playback
    /// and emits a queue-ended event instead of wrapping.
    pub async fn advance_to_next(&self) {
        self.inner.advance(true).await;
    }

    /// Return to the previous track. At the first track this is a no-op.
    pub async fn advance_to_previous(&self) {
        self.inner.advance(false).await;
    }

    /// Jump straight to a queue position. Rejects out-of-range indices
    /// without touching the cursor.
    pub async fn play_at(&self, index: usize) -> Result<()> {
        let current = {
            let mut state = self.inner.state.lock();
            state.queue.jump(index)?;
            state.current_track().map(|t| TrackRef::of(t, index))
        };
        self.inner.bump_generation();
        if let Some(TrackRef::Track { track_id, title, index }) = current {
            self.inner.emit(PlaybackEvent::TrackChanged {
                track_id,
                title,
                index,
            });
            if self.inner.is_ready() {
                self.inner.load_current().await;
            }
        }
        Ok(())
    }
}

impl Drop for PlayerOrchestrator {
    fn drop(&mut self) {
        self.signal_task.abort();
        self.inner.stop_polling();
    }
}
