//! Playback controller - binds one streaming media handle to the transport
//! controls and keeps them consistent across media events and user input.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub type PlatformMediaHandle = web::WebMediaHandle;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformMediaHandle = NullMediaHandle;

/// The controller as wired to this target's media backend.
pub type Controller = PlaybackController<PlatformMediaHandle>;

/// One playable media resource bound to a single source URI.
///
/// Only the operations the controller actually drives are part of the trait;
/// position and duration arrive through [`MediaEvent`]s instead of being
/// polled from the handle.
pub trait MediaHandle: Sized {
    /// Bind a new handle to `uri`. Construction failures are not recoverable
    /// here and propagate to the caller.
    fn open(uri: &str) -> Result<Self, String>;
    fn source_uri(&self) -> &str;
    /// Start playback. Autoplay rejections are the environment's business,
    /// so this is fire-and-forget.
    fn play(&self);
    /// Best-effort pause. A retired or detached resource may refuse.
    fn try_pause(&self) -> Result<(), String>;
    fn paused(&self) -> bool;
    fn set_current_time(&self, seconds: f64);
    fn set_volume(&self, volume: f64);
}

/// Events the media pipeline reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    MetadataLoaded { duration: f64 },
    TimeUpdate { position: f64 },
    Play,
    Pause,
    CanPlayThrough,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Up,
    Muted,
}

/// Everything the transport UI renders, owned by the controller instance.
/// Components read this snapshot instead of poking at named elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportState {
    pub visible: bool,
    pub controls_enabled: bool,
    pub play_icon: PlayIcon,
    pub volume_icon: VolumeIcon,
    pub elapsed: String,
    pub duration: String,
    pub seek_value: u32,
    pub seek_max: u32,
}

impl TransportState {
    fn hidden() -> Self {
        Self {
            visible: false,
            controls_enabled: false,
            play_icon: PlayIcon::Play,
            volume_icon: VolumeIcon::Up,
            elapsed: String::new(),
            duration: String::new(),
            seek_value: 0,
            seek_max: 0,
        }
    }
}

impl Default for TransportState {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Owns the live media handle and reconciles user-driven seek input against
/// the continuously-arriving playback-position events.
///
/// Each `load` bumps a generation counter and every media event carries the
/// generation it was bound under, so a late callback from a retired handle
/// can never reach the UI.
pub struct PlaybackController<H: MediaHandle> {
    handle: Option<H>,
    generation: u64,
    scrubbing: bool,
    metadata_loaded: bool,
    volume: f64,
    transport: TransportState,
}

impl<H: MediaHandle> Default for PlaybackController<H> {
    fn default() -> Self {
        Self {
            handle: None,
            generation: 0,
            scrubbing: false,
            metadata_loaded: false,
            volume: 1.0,
            transport: TransportState::hidden(),
        }
    }
}

impl<H: MediaHandle> PlaybackController<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Open `media_uri` in a fresh handle, or stop and hide the player when
    /// no URI is supplied. The previous handle always gets a pause attempt
    /// before it is discarded; a refusal is swallowed since the resource may
    /// already be detached.
    pub fn load(&mut self, media_uri: Option<&str>) -> Result<(), String> {
        if let Some(previous) = self.handle.take() {
            let _ = previous.try_pause();
        }

        self.transport = TransportState::hidden();
        self.scrubbing = false;
        self.metadata_loaded = false;
        self.generation += 1;

        let Some(uri) = media_uri else {
            return Ok(());
        };

        let handle = H::open(uri)?;
        handle.set_volume(self.volume);
        self.handle = Some(handle);

        // Shown before metadata is known: controls stay disabled until the
        // pipeline signals it can play through.
        self.transport.visible = true;
        self.transport.volume_icon = volume_icon_for(self.volume);
        self.transport.elapsed = "Loading".to_string();
        Ok(())
    }

    /// Apply a media-pipeline event that was bound under `generation`.
    /// Stale-generation events belong to a retired handle and are dropped.
    pub fn apply_event(&mut self, generation: u64, event: MediaEvent) {
        if generation != self.generation || self.handle.is_none() {
            return;
        }

        match event {
            MediaEvent::LoadStart => {
                self.transport.elapsed = "Loading".to_string();
                self.transport.duration.clear();
            }
            MediaEvent::MetadataLoaded { duration } => {
                let duration = if duration.is_finite() { duration } else { 0.0 };
                self.metadata_loaded = true;
                self.transport.elapsed = time_string(0.0);
                self.transport.duration = time_string(duration);
                self.transport.seek_max = duration.max(0.0).floor() as u32;
            }
            MediaEvent::TimeUpdate { position } => {
                // The elapsed label tracks the authoritative position even
                // mid-scrub; only the slider is held back for the user.
                self.transport.elapsed = time_string(position);
                if self.metadata_loaded && !self.scrubbing {
                    self.transport.seek_value = position.max(0.0).floor() as u32;
                }
            }
            MediaEvent::Play => {
                self.transport.play_icon = PlayIcon::Pause;
            }
            MediaEvent::Pause => {
                self.transport.play_icon = PlayIcon::Play;
            }
            MediaEvent::CanPlayThrough => {
                self.transport.controls_enabled = true;
            }
            MediaEvent::Waiting => {
                self.transport.controls_enabled = false;
            }
        }
    }

    /// Play if paused, pause otherwise. The icon flips on the handle's own
    /// play/pause events rather than here.
    pub fn toggle_play(&mut self) {
        if let Some(handle) = &self.handle {
            if handle.paused() {
                handle.play();
            } else {
                let _ = handle.try_pause();
            }
        }
    }

    /// The user is dragging the seek slider; show the pending value and stop
    /// the playback clock from fighting the drag.
    pub fn scrub_input(&mut self, value: u32) {
        if self.handle.is_none() || !self.metadata_loaded {
            return;
        }
        self.scrubbing = true;
        self.transport.seek_value = value.min(self.transport.seek_max);
    }

    /// The user released the seek slider: apply the committed position and
    /// resume playback if the handle was playing before the seek.
    pub fn commit_seek(&mut self, value: u32) {
        let Some(handle) = &self.handle else {
            return;
        };
        if !self.metadata_loaded {
            return;
        }
        let value = value.min(self.transport.seek_max);
        let was_playing = !handle.paused();
        handle.set_current_time(value as f64);
        if was_playing {
            handle.play();
        }
        self.scrubbing = false;
        self.transport.seek_value = value;
    }

    /// Apply a volume slider value (0.0-1.0). The muted glyph shows only
    /// when the value is exactly zero.
    pub fn set_volume(&mut self, value: f64) {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { self.volume };
        self.volume = value;
        self.transport.volume_icon = volume_icon_for(value);
        if let Some(handle) = &self.handle {
            handle.set_volume(value);
        }
    }
}

fn volume_icon_for(volume: f64) -> VolumeIcon {
    if volume == 0.0 {
        VolumeIcon::Muted
    } else {
        VolumeIcon::Up
    }
}

/// Format a position in seconds as `M:SS`, or `H:MM:SS` once hours appear.
/// Minutes are only zero-padded when an hour digit precedes them.
pub fn time_string(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    let hh = total / 3600;
    let mm = (total - hh * 3600) / 60;
    let ss = total % 60;

    if hh > 0 {
        format!("{hh}:{mm:02}:{ss:02}")
    } else {
        format!("{mm}:{ss:02}")
    }
}

/// Inert backend for non-browser builds; the browser element lives in
/// `web::WebMediaHandle`.
#[cfg(not(target_arch = "wasm32"))]
pub struct NullMediaHandle {
    uri: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaHandle for NullMediaHandle {
    fn open(uri: &str) -> Result<Self, String> {
        Ok(Self {
            uri: uri.to_string(),
        })
    }

    fn source_uri(&self) -> &str {
        &self.uri
    }

    fn play(&self) {}

    fn try_pause(&self) -> Result<(), String> {
        Ok(())
    }

    fn paused(&self) -> bool {
        true
    }

    fn set_current_time(&self, _seconds: f64) {}

    fn set_volume(&self, _volume: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct FakeMediaState {
        uri: String,
        current_time: f64,
        volume: f64,
        paused: bool,
        pause_attempts: u32,
        play_calls: u32,
        refuse_pause: bool,
    }

    struct FakeMediaHandle {
        uri: String,
        state: Rc<RefCell<FakeMediaState>>,
    }

    thread_local! {
        static OPENED: RefCell<Vec<Rc<RefCell<FakeMediaState>>>> =
            RefCell::new(Vec::new());
    }

    /// Snapshot of every handle opened on this thread, including retired
    /// ones, so tests can check pause attempts after a handle is discarded.
    fn opened() -> Vec<Rc<RefCell<FakeMediaState>>> {
        OPENED.with(|log| log.borrow().clone())
    }

    fn reset_opened() {
        OPENED.with(|log| log.borrow_mut().clear());
    }

    impl MediaHandle for FakeMediaHandle {
        fn open(uri: &str) -> Result<Self, String> {
            if uri.starts_with("bad://") {
                return Err(format!("cannot create media resource for {uri}"));
            }
            let state = Rc::new(RefCell::new(FakeMediaState {
                uri: uri.to_string(),
                volume: 1.0,
                paused: true,
                refuse_pause: uri.starts_with("brittle://"),
                ..FakeMediaState::default()
            }));
            OPENED.with(|log| log.borrow_mut().push(state.clone()));
            Ok(Self {
                uri: uri.to_string(),
                state,
            })
        }

        fn source_uri(&self) -> &str {
            &self.uri
        }

        fn play(&self) {
            let mut state = self.state.borrow_mut();
            state.play_calls += 1;
            state.paused = false;
        }

        fn try_pause(&self) -> Result<(), String> {
            let mut state = self.state.borrow_mut();
            state.pause_attempts += 1;
            if state.refuse_pause {
                return Err("media resource already detached".to_string());
            }
            state.paused = true;
            Ok(())
        }

        fn paused(&self) -> bool {
            self.state.borrow().paused
        }

        fn set_current_time(&self, seconds: f64) {
            self.state.borrow_mut().current_time = seconds;
        }

        fn set_volume(&self, volume: f64) {
            self.state.borrow_mut().volume = volume;
        }
    }

    fn controller_with(uri: &str) -> PlaybackController<FakeMediaHandle> {
        let mut controller = PlaybackController::new();
        controller.load(Some(uri)).expect("load should succeed");
        controller
    }

    fn metadata_loaded(
        controller: &mut PlaybackController<FakeMediaHandle>,
        duration: f64,
    ) {
        let generation = controller.generation();
        controller.apply_event(generation, MediaEvent::MetadataLoaded { duration });
        controller.apply_event(generation, MediaEvent::CanPlayThrough);
    }

    #[test]
    fn time_string_formats_minutes_and_hours() {
        assert_eq!(time_string(0.0), "0:00");
        assert_eq!(time_string(59.0), "0:59");
        assert_eq!(time_string(60.0), "1:00");
        assert_eq!(time_string(3599.0), "59:59");
        assert_eq!(time_string(3661.0), "1:01:01");
    }

    #[test]
    fn time_string_floors_fractional_seconds() {
        assert_eq!(time_string(59.9), "0:59");
        assert_eq!(time_string(-5.0), "0:00");
    }

    #[test]
    fn load_none_hides_transport_without_creating_a_handle() {
        reset_opened();
        let mut controller: PlaybackController<FakeMediaHandle> =
            PlaybackController::new();
        controller.load(None).expect("clearing is infallible");

        assert!(!controller.transport().visible);
        assert!(controller.handle().is_none());
        assert!(opened().is_empty());
    }

    #[test]
    fn load_shows_transport_disabled_with_loading_label() {
        reset_opened();
        let controller = controller_with("a.mp3");

        let transport = controller.transport();
        assert!(transport.visible);
        assert!(!transport.controls_enabled);
        assert_eq!(transport.elapsed, "Loading");
        assert_eq!(transport.duration, "");
    }

    #[test]
    fn clearing_playback_pauses_the_live_handle() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        controller.toggle_play();

        controller.load(None).expect("clearing is infallible");

        let handles = opened();
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].borrow().pause_attempts, 1);
        assert!(!controller.transport().visible);
        assert!(controller.handle().is_none());
    }

    #[test]
    fn switching_tracks_retires_the_previous_handle() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        controller.load(Some("b.mp3")).expect("load should succeed");

        let handles = opened();
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].borrow().uri, "a.mp3");
        assert_eq!(handles[0].borrow().pause_attempts, 1);
        assert_eq!(handles[1].borrow().pause_attempts, 0);
        assert_eq!(handles[1].borrow().uri, "b.mp3");
        assert_eq!(controller.handle().map(|h| h.source_uri()), Some("b.mp3"));
    }

    #[test]
    fn pause_refusal_during_teardown_is_swallowed() {
        reset_opened();
        let mut controller = controller_with("brittle://a.mp3");
        controller
            .load(Some("b.mp3"))
            .expect("a refused pause must not fail the next load");

        let handles = opened();
        assert_eq!(handles[0].borrow().pause_attempts, 1);
        assert_eq!(controller.handle().map(|h| h.source_uri()), Some("b.mp3"));
    }

    #[test]
    fn construction_failure_propagates_and_leaves_player_hidden() {
        reset_opened();
        let mut controller: PlaybackController<FakeMediaHandle> =
            PlaybackController::new();
        let err = controller.load(Some("bad://a.mp3"));

        assert!(err.is_err());
        assert!(controller.handle().is_none());
        assert!(!controller.transport().visible);
    }

    #[test]
    fn metadata_sets_labels_and_seek_range() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        let generation = controller.generation();
        controller.apply_event(
            generation,
            MediaEvent::MetadataLoaded { duration: 245.7 },
        );

        let transport = controller.transport();
        assert_eq!(transport.elapsed, "0:00");
        assert_eq!(transport.duration, "4:05");
        assert_eq!(transport.seek_max, 245);
    }

    #[test]
    fn loadstart_resets_labels() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        metadata_loaded(&mut controller, 100.0);
        let generation = controller.generation();

        controller.apply_event(generation, MediaEvent::LoadStart);
        assert_eq!(controller.transport().elapsed, "Loading");
        assert_eq!(controller.transport().duration, "");
    }

    #[test]
    fn time_updates_sync_slider_only_after_metadata() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        let generation = controller.generation();

        controller.apply_event(generation, MediaEvent::TimeUpdate { position: 7.3 });
        assert_eq!(controller.transport().elapsed, "0:07");
        assert_eq!(controller.transport().seek_value, 0);

        metadata_loaded(&mut controller, 100.0);
        controller.apply_event(generation, MediaEvent::TimeUpdate { position: 9.8 });
        assert_eq!(controller.transport().elapsed, "0:09");
        assert_eq!(controller.transport().seek_value, 9);
    }

    #[test]
    fn scrubbing_suppresses_slider_sync_but_not_the_elapsed_label() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        metadata_loaded(&mut controller, 100.0);
        let generation = controller.generation();

        controller.scrub_input(30);
        assert!(controller.is_scrubbing());
        assert_eq!(controller.transport().seek_value, 30);

        controller.apply_event(generation, MediaEvent::TimeUpdate { position: 12.0 });
        assert_eq!(controller.transport().seek_value, 30);
        assert_eq!(controller.transport().elapsed, "0:12");
    }

    #[test]
    fn commit_applies_the_value_and_ends_the_scrub() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        metadata_loaded(&mut controller, 100.0);

        controller.scrub_input(30);
        controller.commit_seek(30);

        assert!(!controller.is_scrubbing());
        assert_eq!(controller.transport().seek_value, 30);
        let handles = opened();
        assert_eq!(handles[0].borrow().current_time, 30.0);
    }

    #[test]
    fn commit_while_playing_resumes_playback() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        metadata_loaded(&mut controller, 100.0);
        controller.toggle_play();

        controller.commit_seek(42);

        let state = opened()[0].clone();
        assert!(!state.borrow().paused);
        assert_eq!(state.borrow().play_calls, 2);
    }

    #[test]
    fn commit_while_paused_stays_paused() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        metadata_loaded(&mut controller, 100.0);

        controller.commit_seek(42);

        let state = opened()[0].clone();
        assert!(state.borrow().paused);
        assert_eq!(state.borrow().play_calls, 0);
        assert_eq!(state.borrow().current_time, 42.0);
    }

    #[test]
    fn scrub_input_before_metadata_is_ignored() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        controller.scrub_input(10);

        assert!(!controller.is_scrubbing());
        assert_eq!(controller.transport().seek_value, 0);
    }

    #[test]
    fn toggle_play_flips_between_play_and_pause() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        controller.toggle_play();
        let state = opened()[0].clone();
        assert!(!state.borrow().paused);

        controller.toggle_play();
        assert!(state.borrow().paused);
        assert_eq!(state.borrow().play_calls, 1);
        assert_eq!(state.borrow().pause_attempts, 1);
    }

    #[test]
    fn play_pause_events_drive_the_toggle_icon() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        let generation = controller.generation();

        controller.apply_event(generation, MediaEvent::Play);
        assert_eq!(controller.transport().play_icon, PlayIcon::Pause);

        controller.apply_event(generation, MediaEvent::Pause);
        assert_eq!(controller.transport().play_icon, PlayIcon::Play);
    }

    #[test]
    fn waiting_and_can_play_through_gate_the_controls() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        let generation = controller.generation();
        assert!(!controller.transport().controls_enabled);

        for _ in 0..3 {
            controller.apply_event(generation, MediaEvent::CanPlayThrough);
            assert!(controller.transport().controls_enabled);
            controller.apply_event(generation, MediaEvent::Waiting);
            assert!(!controller.transport().controls_enabled);
        }
        controller.apply_event(generation, MediaEvent::CanPlayThrough);
        assert!(controller.transport().controls_enabled);
    }

    #[test]
    fn volume_zero_shows_the_muted_glyph() {
        reset_opened();
        let mut controller = controller_with("a.mp3");

        controller.set_volume(0.0);
        assert_eq!(controller.transport().volume_icon, VolumeIcon::Muted);
        assert_eq!(opened()[0].borrow().volume, 0.0);

        controller.set_volume(0.01);
        assert_eq!(controller.transport().volume_icon, VolumeIcon::Up);
    }

    #[test]
    fn volume_survives_a_track_switch() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        controller.set_volume(0.3);

        controller.load(Some("b.mp3")).expect("load should succeed");
        assert_eq!(opened()[1].borrow().volume, 0.3);
    }

    #[test]
    fn stale_generation_events_from_a_retired_handle_are_dropped() {
        reset_opened();
        let mut controller = controller_with("a.mp3");
        metadata_loaded(&mut controller, 100.0);
        let retired_generation = controller.generation();

        controller.load(Some("b.mp3")).expect("load should succeed");
        metadata_loaded(&mut controller, 200.0);
        controller.apply_event(
            retired_generation,
            MediaEvent::TimeUpdate { position: 55.0 },
        );

        assert_eq!(controller.transport().seek_value, 0);
        assert_eq!(controller.transport().duration, "3:20");
    }

    #[test]
    fn events_without_a_live_handle_are_ignored() {
        reset_opened();
        let mut controller: PlaybackController<FakeMediaHandle> =
            PlaybackController::new();
        controller.load(None).expect("clearing is infallible");
        let generation = controller.generation();

        controller.apply_event(generation, MediaEvent::CanPlayThrough);
        assert!(!controller.transport().controls_enabled);
        assert!(!controller.transport().visible);
    }
}
