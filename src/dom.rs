use crate::constants::{HIDE_SCROLLBAR_CSS, NAV_ACTIVE_CLASS, NAV_LINKS_SELECTOR};
use crate::core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[dom] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Element lookup that reports which id was missing.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has unexpected type: {:?}", id, e))
}

/// Current window size in CSS pixels together with the device pixel ratio.
pub fn viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport {
        css_width: css(window.inner_width()),
        css_height: css(window.inner_height()),
        pixel_ratio: window.device_pixel_ratio(),
    }
}

/// Scroll position, total scrollable height and viewport height.
pub fn scroll_metrics(window: &web::Window) -> (f64, f64, f64) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (scroll_y, scroll_height, viewport_height)
}

/// Keep the page vertically scrollable while hiding its scrollbars.
pub fn hide_scrollbars(document: &web::Document) -> anyhow::Result<()> {
    if let Some(body) = document.body() {
        let s = body.style();
        _ = s.set_property("overflow-x", "hidden");
        _ = s.set_property("overflow-y", "scroll");
    }
    let head = document
        .head()
        .ok_or_else(|| anyhow::anyhow!("document has no <head>"))?;
    let style = document
        .create_element("style")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    style.set_text_content(Some(HIDE_SCROLLBAR_CSS));
    head.append_child(&style)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

pub fn toggle_nav_links() {
    let Some(document) = window_document() else {
        return;
    };
    match document.query_selector(NAV_LINKS_SELECTOR) {
        Ok(Some(el)) => {
            _ = el.class_list().toggle(NAV_ACTIVE_CLASS);
        }
        _ => log::warn!("[menu] {} not found", NAV_LINKS_SELECTOR),
    }
}
