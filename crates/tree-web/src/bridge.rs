//! External control bridge: webcam frames → gesture recognizer → shared control.

mod guards;
mod recognizer;

use guards::{CameraGuard, FrameLoopGuard, RecognizerGuard};
use tree_core::{
    frame_is_usable, interpret_frame, BridgeError, PredictionThrottle, SharedControl,
    CAMERA_IDEAL_HEIGHT, CAMERA_IDEAL_WIDTH,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Running pose producer. Dropping it stops recognition, the camera and the
/// recognizer, in that order.
pub struct PoseProducer {
    _frames: FrameLoopGuard,
    _camera: CameraGuard,
    _recognizer: RecognizerGuard,
}

/// Load the recognizer, open the camera and start throttled recognition that
/// writes into `control`.
pub async fn start(control: SharedControl) -> Result<PoseProducer, BridgeError> {
    let window = web::window().ok_or_else(|| BridgeError::Camera("no window".into()))?;

    let recognizer = RecognizerGuard::new(recognizer::load(&window).await?);
    log::info!("[bridge] gesture recognizer ready");

    let camera = open_camera(&window).await?;
    log::info!("[bridge] camera streaming");

    let video = camera.video().clone();
    let handle = recognizer.handle().clone();
    let mut throttle = PredictionThrottle::default();
    let mut last_label: Option<String> = None;
    let frames = FrameLoopGuard::start(move || {
        if !frame_is_usable(video.video_width(), video.video_height()) {
            return;
        }
        let now_ms = js_sys::Date::now();
        if !throttle.ready(now_ms) {
            return;
        }
        match recognizer::recognize(&handle, &video, now_ms) {
            Ok(frame) => {
                if frame.label != last_label {
                    log::debug!("[pose] gesture {:?}", frame.label);
                    last_label = frame.label.clone();
                }
                control.apply(interpret_frame(&frame));
            }
            // transient; try again next frame
            Err(e) => log::warn!("[bridge] {e}"),
        }
    });

    Ok(PoseProducer {
        _frames: frames,
        _camera: camera,
        _recognizer: recognizer,
    })
}

fn camera_error(e: JsValue) -> BridgeError {
    match e.dyn_ref::<web::DomException>() {
        Some(ex) => BridgeError::from_camera_exception(&ex.name(), ex.message()),
        None => BridgeError::Camera(format!("{e:?}")),
    }
}

fn ideal(value: u32) -> Result<JsValue, BridgeError> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"ideal".into(), &JsValue::from(value)).map_err(camera_error)?;
    Ok(obj.into())
}

async fn open_camera(window: &web::Window) -> Result<CameraGuard, BridgeError> {
    let document = window
        .document()
        .ok_or_else(|| BridgeError::Camera("no document".into()))?;
    let video = document
        .create_element("video")
        .map_err(camera_error)?
        .dyn_into::<web::HtmlVideoElement>()
        .map_err(|_| BridgeError::Camera("created element is not a video".into()))?;
    video.set_muted(true);
    video.set_autoplay(true);
    let _ = video.set_attribute("playsinline", "");
    let _ = video.set_attribute("class", "webcam");

    let video_opts = js_sys::Object::new();
    js_sys::Reflect::set(&video_opts, &"facingMode".into(), &"user".into()).map_err(camera_error)?;
    js_sys::Reflect::set(&video_opts, &"width".into(), &ideal(CAMERA_IDEAL_WIDTH)?).map_err(camera_error)?;
    js_sys::Reflect::set(&video_opts, &"height".into(), &ideal(CAMERA_IDEAL_HEIGHT)?).map_err(camera_error)?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video_opts);
    constraints.set_audio(&JsValue::FALSE);

    let devices = window.navigator().media_devices().map_err(camera_error)?;
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(camera_error)?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(camera_error)?
        .dyn_into::<web::MediaStream>()
        .map_err(camera_error)?;

    video.set_src_object(Some(&stream));
    let camera = CameraGuard::new(stream, video);
    if let Some(body) = document.body() {
        body.append_child(camera.video()).map_err(camera_error)?;
    }
    // autoplay covers the muted case; a rejected play() only delays the first frame
    let _ = camera.video().play();
    Ok(camera)
}
