use crate::core::scroll_fraction;
use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Page scroll position drives the camera yaw target.
pub fn wire_scroll(window: &web::Window, frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let w = window.clone();
    dom::add_listener(window, "scroll", move |_| {
        let (scroll_y, scroll_height, viewport_height) = dom::scroll_metrics(&w);
        let fraction = scroll_fraction(scroll_y, scroll_height, viewport_height);
        frame_ctx.borrow_mut().on_scroll(fraction);
    });
}
