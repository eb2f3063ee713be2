#![cfg(target_arch = "wasm32")]
use crate::core::GlitchPass;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod music;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glitch-backdrop starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Burger menu button handler, called from the page's `onclick`.
#[wasm_bindgen(js_name = toggleMenu)]
pub fn toggle_menu() {
    dom::toggle_nav_links();
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if let Err(e) = dom::hide_scrollbars(&document) {
        log::warn!("[page] could not hide scrollbars: {:?}", e);
    }
    // The music widget is optional; the backdrop runs without it.
    if let Err(e) = music::wire_music_controls(&document) {
        log::warn!("[music] controls unavailable: {:?}", e);
    }

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, constants::CANVAS_ID)?;
    let viewport = dom::viewport(&window);
    let (w, h) = viewport.physical_size();
    canvas.set_width(w);
    canvas.set_height(h);

    let mut glitch = GlitchPass::from_entropy();
    let gpu = frame::init_gpu(&canvas, &mut glitch).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(canvas, gpu, glitch)));
    frame_ctx.borrow_mut().resize(viewport);

    events::wire_resize(&window, frame_ctx.clone());
    events::wire_scroll(&window, frame_ctx.clone());
    assets::spawn_model_load(window.clone(), frame_ctx.clone());

    // Scene animation + rendering driven by requestAnimationFrame
    frame::start_loop(frame_ctx);
    Ok(())
}
