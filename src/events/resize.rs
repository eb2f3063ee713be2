use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_resize(window: &web::Window, frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let w = window.clone();
    dom::add_listener(window, "resize", move |_| {
        let viewport = dom::viewport(&w);
        log::debug!(
            "[resize] {}x{} @{}",
            viewport.css_width,
            viewport.css_height,
            viewport.pixel_ratio
        );
        frame_ctx.borrow_mut().resize(viewport);
    });
}
