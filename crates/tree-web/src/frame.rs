use crate::dom;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{Mode, OrbitCamera, Scene, SharedControl};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Clamp for frames after the tab was hidden; progress smoothing saturates anyway.
const MAX_FRAME_DT_SEC: f32 = 0.1;

pub struct FrameContext<'a> {
    pub scene: Scene,
    pub control: SharedControl,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub gpu: render::GpuState<'a>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub started: Instant,
    pub last_instant: Instant,
    pub shown_mode: Option<Mode>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let elapsed_sec = (now - self.started).as_secs_f32();

        let control = self.control.snapshot();
        if self.shown_mode != Some(control.mode) {
            dom::set_mode_buttons(&self.document, control.mode);
            self.shown_mode = Some(control.mode);
        }

        self.scene.update(control, dt_sec, elapsed_sec);
        {
            let mut orbit = self.orbit.borrow_mut();
            orbit.step(dt_sec);
            orbit.apply(self.gpu.camera_mut());
        }

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        match self.gpu.render(self.scene.buffers(), self.scene.group_matrix()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("[gpu] render error: {e:?}"),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Scene,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, scene.buffers()).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
