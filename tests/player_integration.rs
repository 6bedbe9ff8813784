// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the player core
//!
//! These tests drive a complete `Player` against the headless media element,
//! scripting the environment the way a browser would report it.

use approx::assert_abs_diff_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use touchplay::application::port::{MediaEvent, MediaResource};
use touchplay::config::PlayerConfig;
use touchplay::domain::geometry::{Point, Rect};
use touchplay::domain::video::QualityOption;
use touchplay::error::{MediaError, PendingRequest};
use touchplay::infrastructure::headless::{HeadlessFullscreen, HeadlessMedia};
use touchplay::player::{GestureAction, Surface, TouchInput};
use touchplay::{Action, Player, PlayerProps};

type TestPlayer = Player<HeadlessMedia, HeadlessFullscreen>;

struct Harness {
    player: TestPlayer,
    media: HeadlessMedia,
    fullscreen: HeadlessFullscreen,
    now: Instant,
}

impl Harness {
    fn with_config(props: PlayerProps, config: PlayerConfig) -> Self {
        let media = HeadlessMedia::new();
        let fullscreen = HeadlessFullscreen::new();
        let mut player = TestPlayer::new(props, config);
        player.mount(media.clone(), fullscreen.clone());
        Self {
            player,
            media,
            fullscreen,
            now: Instant::now(),
        }
    }

    fn new(props: PlayerProps) -> Self {
        Self::with_config(props, PlayerConfig::default())
    }

    /// A mounted player whose source has loaded `duration` seconds of media.
    fn ready(duration: f64) -> Self {
        let mut harness = Self::new(qualities());
        harness.media.finish_loading(duration);
        harness.pump();
        harness
    }

    fn pump(&mut self) {
        self.player.pump(self.now);
    }

    fn wait(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.pump();
    }

    fn touch(&mut self, input: TouchInput) -> Option<GestureAction> {
        self.player.handle_touch(input, self.now)
    }
}

fn qualities() -> PlayerProps {
    PlayerProps::new(vec![
        QualityOption::new("480p", "https://cdn.test/480.mp4", 480),
        QualityOption::new("1080p", "https://cdn.test/1080.mp4", 1080),
        QualityOption::new("720p", "https://cdn.test/720.mp4", 720),
    ])
}

fn option(label: &str) -> QualityOption {
    match label {
        "480p" => QualityOption::new("480p", "https://cdn.test/480.mp4", 480),
        "720p" => QualityOption::new("720p", "https://cdn.test/720.mp4", 720),
        _ => QualityOption::new("1080p", "https://cdn.test/1080.mp4", 1080),
    }
}

fn start_at(x: f64, y: f64) -> TouchInput {
    TouchInput::Start {
        position: Point::new(x, y),
        touches: 1,
    }
}

fn move_to(x: f64, y: f64) -> TouchInput {
    TouchInput::Move {
        position: Point::new(x, y),
    }
}

fn end_at(x: f64, y: f64) -> TouchInput {
    TouchInput::End {
        position: Point::new(x, y),
    }
}

// =============================================================================
// Seeking
// =============================================================================

#[test]
fn test_seek_clamps_into_duration() {
    let mut h = Harness::ready(120.0);

    h.player.seek(500.0);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 120.0);

    h.player.seek(-30.0);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 0.0);
}

#[test]
fn test_skip_composes_with_seek_clamping() {
    let mut h = Harness::ready(120.0);
    h.player.seek(5.0);
    h.pump();

    h.player.skip(-10.0);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 0.0);

    h.player.seek(115.0);
    h.pump();
    h.player.perform(Action::Skip(10.0), h.now);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 120.0);
}

#[test]
fn test_seek_before_metadata_is_ignored() {
    let mut h = Harness::new(qualities());
    assert!(!h.player.seek(30.0));
    h.pump();
    assert_abs_diff_eq!(h.media.current_time(), 0.0);
    assert_abs_diff_eq!(h.player.state().current_time, 0.0);
}

// =============================================================================
// Volume
// =============================================================================

#[test]
fn test_volume_and_mute_coupling() {
    let mut h = Harness::ready(60.0);

    h.player.set_volume(0.0);
    h.pump();
    assert!(h.player.state().muted);

    h.player.set_volume(0.5);
    h.pump();
    assert!(!h.player.state().muted);
    assert_abs_diff_eq!(h.player.state().volume, 0.5);

    h.player.toggle_mute();
    h.pump();
    assert!(h.player.state().muted);
    assert_abs_diff_eq!(h.player.state().volume, 0.5);
}

// =============================================================================
// Quality switching
// =============================================================================

#[test]
fn test_quality_switch_restores_position_speed_and_play() {
    let mut h = Harness::ready(300.0);
    assert_eq!(h.media.src(), "https://cdn.test/1080.mp4");

    h.player.toggle_play();
    h.player.change_speed(1.5);
    h.player.seek(42.0);
    h.pump();
    assert!(h.player.state().playing);

    assert!(h.player.change_quality(&option("480p")));
    assert!(h.player.state().loading);
    assert_eq!(h.player.state().quality, Some(option("480p")));
    assert_abs_diff_eq!(h.player.state().buffered, 0.0);
    h.pump();

    h.media.finish_loading(300.0);
    h.pump();

    let state = h.player.state();
    assert_eq!(h.media.src(), "https://cdn.test/480.mp4");
    assert_abs_diff_eq!(state.current_time, 42.0, epsilon = 1.0);
    assert!(state.playing);
    assert!(!state.loading);
    assert_abs_diff_eq!(h.media.playback_rate(), 1.5);
    assert_abs_diff_eq!(h.player.speed().value(), 1.5);
}

#[test]
fn test_quality_switch_while_paused_stays_paused() {
    let mut h = Harness::ready(300.0);
    h.player.seek(12.0);
    h.pump();

    h.player.change_quality(&option("720p"));
    h.pump();
    h.media.finish_loading(300.0);
    h.pump();

    assert!(!h.player.state().playing);
    assert!(h.media.paused());
    assert_abs_diff_eq!(h.player.state().current_time, 12.0);
}

#[test]
fn test_second_switch_discards_first_completion() {
    let mut h = Harness::ready(300.0);
    h.player.toggle_play();
    h.player.seek(42.0);
    h.pump();

    h.player.change_quality(&option("720p"));
    h.pump();
    h.player.change_quality(&option("480p"));
    h.pump();

    h.media.finish_loading(300.0);
    h.pump();

    let state = h.player.state();
    assert_eq!(h.media.src(), "https://cdn.test/480.mp4");
    assert_eq!(state.quality, Some(option("480p")));
    assert_abs_diff_eq!(state.current_time, 42.0, epsilon = 1.0);
    assert!(state.playing);
    assert!(!state.loading);

    // One restore only: a second data-ready signal changes nothing.
    h.media.fire(MediaEvent::LoadedData);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 42.0, epsilon = 1.0);
}

#[test]
fn test_speed_change_while_switch_is_loading_is_kept() {
    let mut h = Harness::ready(300.0);
    h.player.change_speed(1.5);
    assert!(h.player.change_quality_by_label("720p"));
    h.pump();

    h.player.change_speed(2.0);
    h.media.finish_loading(300.0);
    h.pump();

    assert_abs_diff_eq!(h.player.speed().value(), 2.0);
    assert_abs_diff_eq!(h.media.playback_rate(), h.player.speed().value());
}

#[test]
fn test_failed_switch_leaves_player_paused() {
    let mut h = Harness::ready(300.0);
    h.player.toggle_play();
    h.pump();
    assert!(h.player.state().playing);

    h.player.change_quality_by_label("480p");
    h.pump();
    h.media.fail(MediaError::Network("connection reset".into()));
    h.pump();

    assert!(h.media.paused());
    assert!(!h.player.state().playing);
    assert!(!h.player.state().loading);

    // A paused player keeps its controls on screen.
    h.player.show_controls_temporarily(h.now);
    h.wait(10_000);
    assert!(h.player.state().show_controls);
}

#[test]
fn test_unmount_during_switch_makes_completion_a_no_op() {
    let mut h = Harness::ready(300.0);
    h.player.seek(42.0);
    h.pump();
    h.player.change_quality(&option("720p"));

    h.player.unmount();
    h.media.finish_loading(300.0);
    h.pump();

    assert!(h.media.is_released());
    assert_eq!(h.media.pending_events(), 0);
    assert_abs_diff_eq!(h.media.current_time(), 0.0);
}

// =============================================================================
// Gestures
// =============================================================================

#[test]
fn test_gesture_classification() {
    let mut h = Harness::ready(300.0);
    h.player.seek(100.0);
    h.pump();
    h.player.set_surface(Surface::fullscreen(300.0, 200.0));

    // |dx| = 60, |dy| = 5: a horizontal seek drag, not a tap.
    h.touch(start_at(100.0, 100.0));
    let action = h.touch(move_to(160.0, 105.0));
    assert!(matches!(action, Some(GestureAction::Seek(_))));
    assert_eq!(h.touch(end_at(160.0, 105.0)), None);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 160.0, epsilon = 1e-6);

    // Still tap at 10% of the width: skip back.
    h.touch(start_at(30.0, 100.0));
    assert_eq!(h.touch(end_at(30.0, 100.0)), Some(GestureAction::Skip(-10.0)));
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 150.0, epsilon = 1e-6);

    // Still tap at 50%: toggle playback.
    h.touch(start_at(150.0, 100.0));
    assert_eq!(h.touch(end_at(150.0, 100.0)), Some(GestureAction::TogglePlay));
    h.pump();
    assert!(h.player.state().playing);
}

#[test]
fn test_vertical_drag_sets_volume() {
    let mut h = Harness::ready(300.0);
    h.player.set_volume(0.5);
    h.pump();
    h.player.set_surface(Surface::fullscreen(300.0, 600.0));

    h.touch(start_at(150.0, 400.0));
    h.touch(move_to(155.0, 250.0));
    h.pump();
    assert_abs_diff_eq!(h.player.state().volume, 1.0);

    h.touch(move_to(155.0, 700.0));
    h.touch(end_at(155.0, 700.0));
    h.pump();
    assert_abs_diff_eq!(h.player.state().volume, 0.0);
    assert!(h.player.state().muted);
}

#[test]
fn test_touch_on_controls_is_excluded() {
    let mut h = Harness::ready(300.0);
    h.player.set_surface(Surface::fullscreen(300.0, 200.0));
    h.player
        .set_control_regions([Rect::new(0.0, 150.0, 300.0, 50.0)].into_iter().collect());

    h.touch(start_at(20.0, 170.0));
    assert_eq!(h.touch(move_to(200.0, 170.0)), None);
    assert_eq!(h.touch(end_at(200.0, 170.0)), None);
    h.pump();
    assert_abs_diff_eq!(h.player.state().current_time, 0.0);
    assert!(!h.player.state().playing);
}

// =============================================================================
// Controls auto-hide
// =============================================================================

#[test]
fn test_controls_hide_after_timeout_while_playing() {
    let mut h = Harness::ready(300.0);
    h.player.toggle_play();
    h.pump();

    h.player.show_controls_temporarily(h.now);
    h.wait(2999);
    assert!(h.player.state().show_controls);
    h.wait(1);
    assert!(!h.player.state().show_controls);
}

#[test]
fn test_activity_restarts_hide_timer() {
    let mut h = Harness::ready(300.0);
    h.player.toggle_play();
    h.pump();

    h.player.show_controls_temporarily(h.now);
    h.wait(2000);
    h.player.handle_pointer_activity(h.now);
    h.wait(1500);
    assert!(
        h.player.state().show_controls,
        "the first deadline must not fire"
    );
    h.wait(1500);
    assert!(!h.player.state().show_controls);
}

#[test]
fn test_configured_hide_delay() {
    let config = touchplay::config::from_toml_str("[controls]\nhide_delay_ms = 1000\n");
    let mut h = Harness::with_config(qualities(), config);
    h.media.finish_loading(30.0);
    h.player.toggle_play();
    h.pump();

    h.player.show_controls_temporarily(h.now);
    h.wait(1000);
    assert!(!h.player.state().show_controls);
}

// =============================================================================
// Loading, buffering, errors
// =============================================================================

#[test]
fn test_loading_is_level_triggered() {
    let mut h = Harness::ready(300.0);

    h.media.fire(MediaEvent::Waiting);
    h.pump();
    assert!(h.player.state().loading);

    h.media.fire(MediaEvent::Waiting);
    h.media.fire(MediaEvent::CanPlay);
    h.pump();
    assert!(!h.player.state().loading);
}

#[test]
fn test_buffered_is_monotonic_within_a_source() {
    let mut h = Harness::ready(300.0);
    h.media
        .set_buffered([(0.0, 30.0), (60.0, 90.0)].into_iter().collect());
    h.pump();
    assert_abs_diff_eq!(h.player.state().buffered, 90.0);

    h.media.set_buffered([(0.0, 45.0)].into_iter().collect());
    h.pump();
    assert_abs_diff_eq!(h.player.state().buffered, 90.0);
}

#[test]
fn test_media_error_is_surfaced_and_cleared_on_reload() {
    let mut h = Harness::ready(300.0);
    h.media.starve();
    h.media.fail(MediaError::Decode("corrupt frame".into()));
    h.pump();

    assert!(!h.player.state().loading);
    assert_eq!(
        h.player.error().map(MediaError::key),
        Some("error-media-decode")
    );

    h.player.change_quality(&option("480p"));
    h.pump();
    assert!(h.player.error().is_none());
}

// =============================================================================
// Rejected requests
// =============================================================================

#[test]
fn test_rejected_play_keeps_state_paused() {
    let mut h = Harness::ready(300.0);
    h.media.block_play(Some("NotAllowedError"));

    h.player.toggle_play();
    h.pump();

    assert!(!h.player.state().playing);
    let rejection = h.player.last_rejection().expect("rejection recorded");
    assert_eq!(rejection.request, PendingRequest::Play);
    assert_eq!(rejection.reason, "NotAllowedError");
}

#[test]
fn test_fullscreen_follows_environment_only() {
    let mut h = Harness::ready(300.0);
    h.fullscreen.deny_requests(Some("no user gesture"));

    h.player.toggle_fullscreen();
    assert!(!h.player.state().fullscreen);
    h.pump();
    assert!(!h.player.state().fullscreen);
    assert_eq!(
        h.player.last_rejection().map(|r| r.request),
        Some(PendingRequest::EnterFullscreen)
    );

    h.fullscreen.deny_requests(None);
    h.player.toggle_fullscreen();
    assert!(
        !h.player.state().fullscreen,
        "state is never set optimistically"
    );
    h.pump();
    assert!(h.player.state().fullscreen);

    h.fullscreen.user_exit();
    h.pump();
    assert!(!h.player.state().fullscreen);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_playback_end_clears_playing_and_flushes_time() {
    let config = touchplay::config::from_toml_str("[playback]\ntime_update_throttle_ms = 5000\n");
    let mut h = Harness::with_config(qualities(), config);
    h.media.finish_loading(10.0);
    h.player.toggle_play();
    h.pump();

    h.media.advance(4.0);
    h.pump();
    h.media.advance(20.0);
    h.wait(100);

    assert!(!h.player.state().playing);
    assert_abs_diff_eq!(h.player.state().current_time, 10.0);
}

#[test]
fn test_listeners_observe_every_change() {
    let mut h = Harness::ready(300.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = h
        .player
        .subscribe(Box::new(move |state| sink.borrow_mut().push(state.playing)));

    h.player.toggle_play();
    h.pump();
    h.player.toggle_play();
    h.pump();
    assert_eq!(*seen.borrow(), vec![true, false]);

    assert!(h.player.unsubscribe(id));
    h.player.toggle_play();
    h.pump();
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_single_source_mounts_as_auto() {
    let h = Harness::new(PlayerProps::new("https://cdn.test/clip.webm").with_title("Clip"));
    assert_eq!(h.media.src(), "https://cdn.test/clip.webm");
    assert_eq!(
        h.player.state().quality.as_ref().map(|q| q.label.as_str()),
        Some("Auto")
    );
    assert!(!h.player.qualities().is_selectable());
    assert_eq!(h.player.title(), Some("Clip"));
}
