use crate::constants::{
    BACKGROUND_MUSIC_ID, MUSIC_ICON_ID, PANEL_SHOW_CLASS, VOLUME_CONTROL_ID, VOLUME_SLIDER_ID,
};
use crate::core::{PanelHost, VolumePanel, DEFAULT_VOLUME};
use crate::dom;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type MusicPanel = Rc<RefCell<VolumePanel<DomPanelHost>>>;

/// Browser side of the volume panel: the `<audio>` element, the panel's
/// `show` class, the slider track and `setTimeout`.
pub struct DomPanelHost {
    window: web::Window,
    audio: web::HtmlMediaElement,
    panel: web::Element,
    slider: web::HtmlElement,
    controller: Weak<RefCell<VolumePanel<DomPanelHost>>>,
}

impl PanelHost for DomPanelHost {
    fn set_panel_visible(&mut self, visible: bool) {
        let classes = self.panel.class_list();
        let res = if visible {
            classes.add_1(PANEL_SHOW_CLASS)
        } else {
            classes.remove_1(PANEL_SHOW_CLASS)
        };
        if let Err(e) = res {
            log::warn!("[music] class toggle failed: {:?}", e);
        }
    }

    fn arm_hide_timer(&mut self, delay_ms: u32, token: u64) -> Option<i32> {
        let controller = self.controller.clone();
        let cb = Closure::once_into_js(move || {
            if let Some(panel) = controller.upgrade() {
                panel.borrow_mut().hide_timer_fired(token);
            }
        });
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                delay_ms as i32,
            ) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("[music] setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_hide_timer(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }

    fn play(&mut self) {
        let promise = match self.audio.play() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[music] play() threw: {:?}", e);
                self.reject_later();
                return;
            }
        };
        let controller = self.controller.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[music] playback rejected: {:?}", e);
                if let Some(panel) = controller.upgrade() {
                    panel.borrow_mut().playback_rejected();
                }
            }
        });
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            log::warn!("[music] pause() threw: {:?}", e);
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn set_slider_fill(&mut self, css_background: &str) {
        _ = self
            .slider
            .style()
            .set_property("background", css_background);
    }
}

impl DomPanelHost {
    // Runs after the current borrow of the panel has ended.
    fn reject_later(&self) {
        let controller = self.controller.clone();
        spawn_local(async move {
            if let Some(panel) = controller.upgrade() {
                panel.borrow_mut().playback_rejected();
            }
        });
    }
}

/// Look up the music widgets and attach their listeners.
pub fn wire_music_controls(document: &web::Document) -> anyhow::Result<MusicPanel> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let icon: web::Element = dom::element_by_id(document, MUSIC_ICON_ID)?;
    let audio: web::HtmlMediaElement = dom::element_by_id(document, BACKGROUND_MUSIC_ID)?;
    let panel: web::Element = dom::element_by_id(document, VOLUME_CONTROL_ID)?;
    let slider: web::HtmlInputElement = dom::element_by_id(document, VOLUME_SLIDER_ID)?;

    let controller: MusicPanel = Rc::new_cyclic(|weak| {
        RefCell::new(VolumePanel::new(
            DomPanelHost {
                window,
                audio,
                panel,
                slider: slider.clone().into(),
                controller: weak.clone(),
            },
            DEFAULT_VOLUME,
        ))
    });

    let c = controller.clone();
    dom::add_listener(&icon, "click", move |_| c.borrow_mut().toggle_play());
    let c = controller.clone();
    dom::add_listener(&icon, "mouseenter", move |_| c.borrow_mut().pointer_enter());
    let c = controller.clone();
    dom::add_listener(&icon, "mouseleave", move |_| c.borrow_mut().pointer_leave());

    let c = controller.clone();
    let input = slider.clone();
    dom::add_listener(&slider, "input", move |_| match input.value().parse::<f64>() {
        Ok(v) => c.borrow_mut().set_volume_percent(v),
        Err(_) => log::debug!("[music] ignoring slider value {:?}", input.value()),
    });

    log::info!("[music] controls wired (volume {})", DEFAULT_VOLUME);
    Ok(controller)
}
