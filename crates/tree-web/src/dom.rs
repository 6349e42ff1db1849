use tree_core::Mode;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{element_id}");
    }
}

/// Register a window-level listener for the lifetime of the page.
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Show `text` in the status line, or hide it when `None`.
pub fn set_status(text: Option<&str>) {
    let Some(el) = window_document().and_then(|d| d.get_element_by_id("status")) else {
        return;
    };
    match text {
        Some(t) => {
            el.set_text_content(Some(t));
            let _ = el.class_list().remove_1("hidden");
        }
        None => {
            el.set_text_content(None);
            let _ = el.class_list().add_1("hidden");
        }
    }
}

/// Reflect the current mode on the two mode buttons.
pub fn set_mode_buttons(document: &web::Document, mode: Mode) {
    for (id, owner) in [("btn-chaos", Mode::Chaos), ("btn-formed", Mode::Formed)] {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("active", mode == owner);
        }
    }
}
