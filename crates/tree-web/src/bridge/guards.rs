//! Owners of the browser resources the bridge acquires. Each releases its
//! resource on drop, so any early return during startup cleans up whatever
//! was already acquired.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// A loaded gesture recognizer; closed on drop.
pub(crate) struct RecognizerGuard {
    handle: JsValue,
}

impl RecognizerGuard {
    pub(crate) fn new(handle: JsValue) -> Self {
        Self { handle }
    }

    pub(crate) fn handle(&self) -> &JsValue {
        &self.handle
    }
}

impl Drop for RecognizerGuard {
    fn drop(&mut self) {
        let close = js_sys::Reflect::get(&self.handle, &JsValue::from_str("close"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        if let Some(close) = close {
            if let Err(e) = close.call0(&self.handle) {
                log::warn!("[bridge] recognizer close failed: {e:?}");
            }
        }
        log::info!("[bridge] recognizer released");
    }
}

/// Camera stream plus the video element it plays into; tracks stopped on drop.
pub(crate) struct CameraGuard {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
}

impl CameraGuard {
    pub(crate) fn new(stream: web::MediaStream, video: web::HtmlVideoElement) -> Self {
        Self { stream, video }
    }

    pub(crate) fn video(&self) -> &web::HtmlVideoElement {
        &self.video
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        self.video.remove();
        log::info!("[bridge] camera released");
    }
}

pub(crate) type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling animation-frame callback; cancelled on drop.
pub(crate) struct FrameLoopGuard {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoopGuard {
    /// Run `body` once per animation frame until the guard is dropped.
    pub(crate) fn start(mut body: impl FnMut() + 'static) -> Self {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick_weak = Rc::downgrade(&tick);
        let pending_inner = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_inner.set(None);
            body();
            if let Some(tick) = tick_weak.upgrade() {
                pending_inner.set(request_frame(&tick));
            }
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&tick));
        Self { tick, pending }
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let cb = slot.as_ref()?;
    window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

impl Drop for FrameLoopGuard {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}
