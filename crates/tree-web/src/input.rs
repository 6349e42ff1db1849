use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::OrbitCamera;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last: Vec2,
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Orbit the camera with a primary-button drag on the canvas and zoom with
/// the wheel. Moves are queued on `orbit`; the frame loop applies them.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    // pointerdown
    {
        let drag = drag.clone();
        let canvas_down = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            *drag.borrow_mut() = DragState {
                active: true,
                pointer_id: ev.pointer_id(),
                last: client_pos(&ev),
            };
            let _ = canvas_down.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag = drag.clone();
        let orbit = orbit.clone();
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if !d.active || ev.pointer_id() != d.pointer_id {
                return;
            }
            let pos = client_pos(&ev);
            let delta = pos - d.last;
            d.last = pos;
            let height = canvas_move.client_height() as f32;
            orbit.borrow_mut().drag(delta.x, delta.y, height);
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerup / pointercancel
    {
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if d.pointer_id == ev.pointer_id() {
                d.active = false;
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            for event in ["pointerup", "pointercancel"] {
                let _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            }
        }
        closure.forget();
    }

    // wheel
    {
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            orbit.borrow_mut().zoom(ev.delta_y() as f32);
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
