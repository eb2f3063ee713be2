use super::constants::PANEL_HIDE_DELAY_MS;

/// Side effects the volume panel needs from its environment.
///
/// The browser implementation drives the `<audio>` element, the panel's
/// CSS class and `setTimeout`; tests record the calls.
pub trait PanelHost {
    fn set_panel_visible(&mut self, visible: bool);
    /// Arm a single-shot timer that must call
    /// [`VolumePanel::hide_timer_fired`] with `token`. Returns a handle for
    /// cancellation, or `None` if the timer could not be armed.
    fn arm_hide_timer(&mut self, delay_ms: u32, token: u64) -> Option<i32>;
    fn cancel_hide_timer(&mut self, handle: i32);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f64);
    fn set_slider_fill(&mut self, css_background: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingHide {
    token: u64,
    handle: i32,
}

/// CSS background for the slider track filled up to `percent`.
pub fn slider_fill_css(percent: f64) -> String {
    format!("linear-gradient(to right, white {}%, #ccc 0%)", percent)
}

/// Play/pause toggle plus the auto-hiding volume panel.
///
/// At most one hide timer is pending at any time: arming a new one cancels
/// the previous one, and a timer that fires with a stale token is ignored.
pub struct VolumePanel<H: PanelHost> {
    host: H,
    visibility: Visibility,
    playing: bool,
    pending: Option<PendingHide>,
    next_token: u64,
}

impl<H: PanelHost> VolumePanel<H> {
    pub fn new(mut host: H, initial_volume: f64) -> Self {
        host.set_volume(initial_volume.clamp(0.0, 1.0));
        Self {
            host,
            visibility: Visibility::Hidden,
            playing: false,
            pending: None,
            next_token: 0,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn has_pending_hide(&self) -> bool {
        self.pending.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Music icon click.
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.host.pause();
            self.playing = false;
            self.hide();
        } else {
            self.host.play();
            self.playing = true;
            self.show();
        }
    }

    /// The browser refused to start playback.
    pub fn playback_rejected(&mut self) {
        if self.playing {
            self.playing = false;
            self.hide();
        }
    }

    pub fn pointer_enter(&mut self) {
        if self.playing {
            self.show();
        }
    }

    pub fn pointer_leave(&mut self) {
        self.schedule_hide();
    }

    /// Show the panel and restart the auto-hide countdown. No-op while paused.
    pub fn show(&mut self) {
        if !self.playing {
            return;
        }
        self.set_visibility(Visibility::Visible);
        self.schedule_hide();
    }

    pub fn hide(&mut self) {
        self.cancel_pending();
        self.set_visibility(Visibility::Hidden);
    }

    pub fn hide_timer_fired(&mut self, token: u64) {
        match self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                self.hide();
            }
            _ => log::debug!("[music] ignoring stale hide timer {}", token),
        }
    }

    /// Slider input in `0..=100`.
    pub fn set_volume_percent(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let percent = value.clamp(0.0, 100.0);
        self.host.set_volume(percent / 100.0);
        self.host.set_slider_fill(&slider_fill_css(percent));
    }

    fn schedule_hide(&mut self) {
        self.cancel_pending();
        let token = self.next_token;
        self.next_token += 1;
        match self.host.arm_hide_timer(PANEL_HIDE_DELAY_MS, token) {
            Some(handle) => self.pending = Some(PendingHide { token, handle }),
            None => {
                log::warn!("[music] hide timer unavailable, hiding now");
                self.set_visibility(Visibility::Hidden);
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            self.host.cancel_hide_timer(p.handle);
        }
    }

    fn set_visibility(&mut self, v: Visibility) {
        self.visibility = v;
        self.host.set_panel_visible(v == Visibility::Visible);
    }
}
