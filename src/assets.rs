use crate::constants::MODEL_PATH;
use crate::core::{decode_glb, ModelData};
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_bytes(window: &web::Window, path: &str) -> anyhow::Result<Vec<u8>> {
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("fetch failed: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} {}", resp.status(), resp.status_text());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("reading body failed: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_model(window: &web::Window) -> anyhow::Result<ModelData> {
    let bytes = fetch_bytes(window, MODEL_PATH).await?;
    log::debug!("[model] fetched {} bytes", bytes.len());
    Ok(decode_glb(&bytes)?)
}

/// Load the backdrop model in the background and hand it to the frame loop.
///
/// On failure the error is logged and the scene keeps rendering without it.
pub fn spawn_model_load(window: web::Window, frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    wasm_bindgen_futures::spawn_local(async move {
        match load_model(&window).await {
            Ok(model) => frame_ctx.borrow_mut().attach_model(model),
            Err(e) => log::error!("[model] failed to load {}: {:?}", MODEL_PATH, e),
        }
    });
}
