// Host-side tests for the music volume panel state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod panel {
    include!("../src/core/panel.rs");
}

use constants::*;
use panel::*;

/// Records host calls and keeps a fake timer table.
#[derive(Default)]
struct FakeHost {
    visible: bool,
    playing: bool,
    volume: f64,
    fill: String,
    next_handle: i32,
    // (handle, token, delay)
    timers: Vec<(i32, u64, u32)>,
    cancelled: Vec<i32>,
    refuse_timers: bool,
}

impl FakeHost {
    fn armed(&self) -> Vec<(i32, u64, u32)> {
        self.timers
            .iter()
            .copied()
            .filter(|(h, _, _)| !self.cancelled.contains(h))
            .collect()
    }
}

impl PanelHost for FakeHost {
    fn set_panel_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn arm_hide_timer(&mut self, delay_ms: u32, token: u64) -> Option<i32> {
        if self.refuse_timers {
            return None;
        }
        self.next_handle += 1;
        self.timers.push((self.next_handle, token, delay_ms));
        Some(self.next_handle)
    }

    fn cancel_hide_timer(&mut self, handle: i32) {
        self.cancelled.push(handle);
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_slider_fill(&mut self, css_background: &str) {
        self.fill = css_background.to_string();
    }
}

fn panel() -> VolumePanel<FakeHost> {
    VolumePanel::new(FakeHost::default(), DEFAULT_VOLUME)
}

/// Fire every timer that is still armed, like the browser would.
fn fire_armed(p: &mut VolumePanel<FakeHost>) {
    let armed = p.host().armed();
    for (handle, token, _) in armed {
        p.host_mut().cancelled.push(handle);
        p.hide_timer_fired(token);
    }
}

#[test]
fn starts_hidden_paused_with_default_volume() {
    let p = panel();
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(!p.is_playing());
    assert!(!p.has_pending_hide());
    assert_eq!(p.host().volume, 0.4);
}

#[test]
fn toggle_play_shows_then_hides() {
    let mut p = panel();
    p.toggle_play();
    assert!(p.is_playing());
    assert!(p.host().playing);
    assert_eq!(p.visibility(), Visibility::Visible);
    assert!(p.host().visible);
    assert_eq!(p.host().armed().len(), 1);
    assert_eq!(p.host().armed()[0].2, PANEL_HIDE_DELAY_MS);

    p.toggle_play();
    assert!(!p.is_playing());
    assert!(!p.host().playing);
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(p.host().armed().is_empty());
}

#[test]
fn show_is_ignored_while_paused() {
    let mut p = panel();
    p.show();
    p.pointer_enter();
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(p.host().timers.is_empty());
}

#[test]
fn hide_then_show_leaves_exactly_one_timer() {
    let mut p = panel();
    p.toggle_play();
    p.hide();
    p.show();
    assert_eq!(p.host().armed().len(), 1);
    assert!(p.has_pending_hide());
}

#[test]
fn repeated_hover_never_stacks_timers() {
    let mut p = panel();
    p.toggle_play();
    for _ in 0..5 {
        p.pointer_enter();
        p.pointer_leave();
    }
    assert_eq!(p.host().armed().len(), 1);
}

#[test]
fn timer_expiry_hides_panel() {
    let mut p = panel();
    p.toggle_play();
    fire_armed(&mut p);
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(!p.has_pending_hide());
    // Music keeps playing; only the panel hides
    assert!(p.is_playing());
}

#[test]
fn stale_timer_is_ignored() {
    let mut p = panel();
    p.toggle_play();
    let (_, first_token, _) = p.host().armed()[0];
    p.pointer_enter();
    p.hide_timer_fired(first_token);
    assert_eq!(p.visibility(), Visibility::Visible);
    assert!(p.has_pending_hide());
}

#[test]
fn pointer_leave_arms_hide_even_when_paused() {
    let mut p = panel();
    p.pointer_leave();
    assert_eq!(p.host().armed().len(), 1);
    fire_armed(&mut p);
    assert_eq!(p.visibility(), Visibility::Hidden);
}

#[test]
fn rejected_playback_reverts_state() {
    let mut p = panel();
    p.toggle_play();
    p.playback_rejected();
    assert!(!p.is_playing());
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(p.host().armed().is_empty());
    // Next click tries to play again
    p.toggle_play();
    assert!(p.is_playing());
}

#[test]
fn unavailable_timer_hides_panel_immediately() {
    let mut p = VolumePanel::new(
        FakeHost {
            refuse_timers: true,
            ..FakeHost::default()
        },
        DEFAULT_VOLUME,
    );
    p.toggle_play();
    assert!(p.is_playing());
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(!p.host().visible);
    assert!(!p.has_pending_hide());
    p.pointer_leave();
    assert_eq!(p.visibility(), Visibility::Hidden);
    assert!(p.host().cancelled.is_empty());
}

#[test]
fn slider_sets_volume_and_fill() {
    let mut p = panel();
    p.set_volume_percent(75.0);
    assert_eq!(p.host().volume, 0.75);
    assert_eq!(p.host().fill, "linear-gradient(to right, white 75%, #ccc 0%)");
    // Does not touch visibility
    assert_eq!(p.visibility(), Visibility::Hidden);
}

#[test]
fn slider_clamps_out_of_range_values() {
    let mut p = panel();
    p.set_volume_percent(150.0);
    assert_eq!(p.host().volume, 1.0);
    p.set_volume_percent(-5.0);
    assert_eq!(p.host().volume, 0.0);
    p.set_volume_percent(f64::NAN);
    assert_eq!(p.host().volume, 0.0);
}

#[test]
fn slider_fill_css_format() {
    assert_eq!(
        slider_fill_css(0.0),
        "linear-gradient(to right, white 0%, #ccc 0%)"
    );
    assert_eq!(
        slider_fill_css(40.0),
        "linear-gradient(to right, white 40%, #ccc 0%)"
    );
}
