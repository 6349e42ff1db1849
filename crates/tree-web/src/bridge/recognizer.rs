//! Thin `Reflect` layer over the host page's gesture recognizer object.

use glam::Vec2;
use js_sys::{Array, Function, Reflect};
use tree_core::{BridgeError, GestureFrame};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const FACTORY: &str = "createGestureRecognizer";

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

/// Await `window.createGestureRecognizer()` provided by the page.
pub(crate) async fn load(window: &web::Window) -> Result<JsValue, BridgeError> {
    let factory = method(window, FACTORY)
        .ok_or_else(|| BridgeError::ModelLoad(format!("window.{FACTORY} is not defined")))?;
    let promise = factory
        .call0(window)
        .map_err(|e| BridgeError::ModelLoad(format!("{e:?}")))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|e| BridgeError::ModelLoad(format!("{FACTORY} did not return a promise: {e:?}")))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| BridgeError::ModelLoad(format!("{e:?}")))
}

/// Run one recognition on the current video frame.
pub(crate) fn recognize(
    recognizer: &JsValue,
    video: &web::HtmlVideoElement,
    now_ms: f64,
) -> Result<GestureFrame, BridgeError> {
    let run = method(recognizer, "recognizeForVideo")
        .ok_or_else(|| BridgeError::Inference("recognizeForVideo missing".into()))?;
    let result = run
        .call2(recognizer, video, &JsValue::from_f64(now_ms))
        .map_err(|e| BridgeError::Inference(format!("{e:?}")))?;
    Ok(parse_result(&result))
}

fn first(target: &JsValue, key: &str) -> Option<JsValue> {
    let list = Reflect::get(target, &JsValue::from_str(key))
        .ok()?
        .dyn_into::<Array>()
        .ok()?;
    let item = list.get(0);
    (!item.is_undefined()).then_some(item)
}

/// `{ gestures: [[{categoryName}]], landmarks: [[{x, y, z}]] }` → frame of the first hand.
fn parse_result(result: &JsValue) -> GestureFrame {
    let label = first(result, "gestures")
        .and_then(|hand| hand.dyn_into::<Array>().ok())
        .map(|categories| categories.get(0))
        .and_then(|top| Reflect::get(&top, &JsValue::from_str("categoryName")).ok())
        .and_then(|name| name.as_string());

    let mut frame = GestureFrame {
        label,
        ..GestureFrame::empty()
    };
    if let Some(points) = first(result, "landmarks").and_then(|h| h.dyn_into::<Array>().ok()) {
        for lm in points.iter() {
            let coord = |k: &str| {
                Reflect::get(&lm, &JsValue::from_str(k))
                    .ok()
                    .and_then(|v| v.as_f64())
            };
            if let (Some(x), Some(y)) = (coord("x"), coord("y")) {
                frame.landmarks.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    frame
}
