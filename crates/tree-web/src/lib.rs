#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{
    BridgeLifecycle, Mode, OrbitCamera, Scene, SceneParams, SharedControl, StartOutcome,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod bridge;
mod dom;
mod frame;
mod input;
mod render;

const STATUS_LOADING: &str = "Initializing Magic...";

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::add_window_listener("resize", move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    });
}

fn wire_mode_buttons(document: &web::Document, control: &SharedControl) {
    for (id, mode) in [("btn-chaos", Mode::Chaos), ("btn-formed", Mode::Formed)] {
        let control = control.clone();
        dom::add_click_listener(document, id, move || {
            control.set_mode(mode);
        });
    }
    dom::set_mode_buttons(document, control.mode());
}

/// Owns the gesture bridge across page hide/show cycles. The scene keeps
/// running on button input alone if the bridge fails.
#[derive(Clone)]
struct BridgeSlot {
    control: SharedControl,
    producer: Rc<RefCell<Option<bridge::PoseProducer>>>,
    lifecycle: Rc<RefCell<BridgeLifecycle>>,
}

impl BridgeSlot {
    fn new(control: SharedControl) -> Self {
        Self {
            control,
            producer: Rc::new(RefCell::new(None)),
            lifecycle: Rc::new(RefCell::new(BridgeLifecycle::default())),
        }
    }

    fn start(&self) {
        let Some(ticket) = self.lifecycle.borrow_mut().begin() else {
            return;
        };
        dom::set_status(Some(STATUS_LOADING));
        let slot = self.clone();
        spawn_local(async move {
            let result = bridge::start(slot.control.clone()).await;
            let outcome = slot.lifecycle.borrow_mut().finish(ticket, result.is_ok());
            match (outcome, result) {
                (StartOutcome::Stale { restart }, result) => {
                    // dropping the producer releases camera and recognizer
                    drop(result);
                    log::info!("[bridge] page hidden during startup; released");
                    if restart {
                        slot.start();
                    }
                }
                (StartOutcome::Current, Ok(p)) => {
                    *slot.producer.borrow_mut() = Some(p);
                    dom::set_status(None);
                }
                (StartOutcome::Current, Err(e)) => {
                    log::error!("[bridge] {e}");
                    dom::set_status(Some(e.user_message()));
                }
            }
        });
    }

    fn stop(&self) {
        self.lifecycle.borrow_mut().hide();
        if self.producer.borrow_mut().take().is_some() {
            log::info!("[bridge] page hidden; released camera and recognizer");
        }
    }

    fn resume(&self) {
        self.lifecycle.borrow_mut().show();
        self.start();
    }
}

fn spawn_bridge(control: SharedControl) {
    let slot = BridgeSlot::new(control);

    let slot_hide = slot.clone();
    dom::add_window_listener("pagehide", move || slot_hide.stop());

    if let Some(window) = web::window() {
        let slot_show = slot.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
            // restored from the back/forward cache
            if ev.persisted() {
                log::info!("[bridge] page restored; restarting");
                slot_show.resume();
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    slot.start();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let control = SharedControl::new(Mode::default());
    wire_mode_buttons(&document, &control);

    let orbit = Rc::new(RefCell::new(OrbitCamera::default()));
    input::wire_orbit_controls(&canvas, orbit.clone());

    let scene = Scene::new(SceneParams::default(), rand::random())?;
    let gpu = frame::init_gpu(&canvas, &scene).await?;

    spawn_bridge(control.clone());

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        control,
        orbit,
        gpu,
        canvas,
        document,
        started: now,
        last_instant: now,
        shown_mode: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
