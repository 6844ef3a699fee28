//! WASM application entry point.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rowscroll_core::{Event, MotionPreference, Point, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, EventTarget, HtmlCanvasElement, MediaQueryList, MouseEvent, TouchEvent, WheelEvent,
    Window,
};

use super::canvas2d::Canvas2DRenderer;
use super::events::{
    client_origin, mouse_event_to_rowscroll, touch_event_to_rowscroll, viewport_size,
    wheel_event_to_rowscroll,
};
use super::media::MediaLayer;
use super::runtime::{urls, Runtime};
use crate::{logging, AppError};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Everything a frame or an event handler touches.
struct Inner {
    runtime: Runtime,
    renderer: Canvas2DRenderer,
    media: MediaLayer,
    canvas: HtmlCanvasElement,
    window: Window,
}

impl Inner {
    fn origin(&self) -> Point {
        client_origin(&self.canvas)
    }

    fn dispatch(&mut self, event: &Event) {
        let command = self.runtime.handle(event);
        for url in urls(&command) {
            tracing::info!(url, "opening link");
            if self
                .window
                .open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
                .is_err()
            {
                tracing::warn!(url, "window.open failed");
            }
        }
    }

    fn resize(&mut self) {
        let Some(size) = viewport_size(&self.window) else {
            return;
        };
        self.renderer
            .resize(size.width, size.height, self.window.device_pixel_ratio());
        self.dispatch(&Event::Resize {
            width: size.width,
            height: size.height,
        });
    }

    /// Draw one frame; `false` once idle.
    fn frame(&mut self, timestamp_ms: f64) -> bool {
        let Some(frame) = self.runtime.frame(timestamp_ms) else {
            return false;
        };
        self.renderer.render(&frame.commands);
        if let Err(err) = self.media.apply(frame.surface.as_ref(), &frame.media) {
            tracing::warn!(?err, "media layer update failed");
        }
        true
    }
}

/// State shared between the app handle and its callbacks.
struct Shared {
    inner: RefCell<Inner>,
    window: Window,
    frame_callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    pending: Cell<Option<i32>>,
}

impl Shared {
    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Option<R> {
        self.inner.try_borrow_mut().ok().map(|mut inner| f(&mut inner))
    }

    /// Request an animation frame unless one is pending.
    fn schedule(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let id = self.frame_callback.borrow().as_ref().and_then(|cb| {
            self.window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok()
        });
        self.pending.set(id);
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        self.frame_callback.borrow_mut().take();
    }
}

/// DOM listener removed on drop.
struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        name: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            name,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// The film list mounted on a canvas.
#[wasm_bindgen]
pub struct App {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl App {
    /// Mount the built-in film list on the canvas with id `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<App, JsValue> {
        Ok(Self::mount(canvas_id, None)?)
    }

    /// Mount a list described by a YAML manifest.
    pub fn with_manifest(canvas_id: &str, yaml: &str) -> Result<App, JsValue> {
        Ok(Self::mount(canvas_id, Some(yaml))?)
    }

    /// Current view state as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        let inner = self
            .shared
            .inner
            .try_borrow()
            .map_err(|_| JsValue::from_str("App is busy"))?;
        Ok(inner.runtime.state_json()?)
    }

    /// Current view state as a JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        js_sys::JSON::parse(&self.state_json()?)
    }

    /// Override the reduced-motion preference.
    pub fn set_reduced_motion(&self, reduce: bool) {
        self.shared.with_inner(|inner| {
            inner
                .runtime
                .set_motion(MotionPreference::from_reduce_query(reduce));
        });
        self.shared.schedule();
    }

    /// Stop the frame loop, remove listeners and the media layer.
    pub fn unmount(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        self.listeners.clear();
        self.shared.cancel();
        self.shared.with_inner(|inner| inner.media.detach());
        tracing::info!("unmounted");
    }
}

impl App {
    fn mount(canvas_id: &str, manifest: Option<&str>) -> Result<Self, AppError> {
        console_error_panic_hook::set_once();
        logging::init(logging::DEFAULT_LEVEL).ok();

        let window = window().ok_or_else(|| AppError::Dom("No window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| AppError::Dom("No document".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AppError::Dom(format!("Canvas '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::Dom("Element is not a canvas".to_string()))?;

        let motion_query = window.match_media(REDUCED_MOTION_QUERY).ok().flatten();
        let motion = MotionPreference::from_reduce_query(
            motion_query.as_ref().is_some_and(MediaQueryList::matches),
        );
        let viewport = viewport_size(&window).unwrap_or(Size::new(
            canvas.width() as f32,
            canvas.height() as f32,
        ));

        let runtime = match manifest {
            Some(yaml) => Runtime::from_manifest(yaml, viewport, motion)?,
            None => Runtime::builtin(viewport, motion)?,
        };
        let mut renderer = Canvas2DRenderer::new(canvas.clone()).map_err(AppError::Dom)?;
        renderer.resize(viewport.width, viewport.height, window.device_pixel_ratio());
        let media = MediaLayer::new(&document)?;

        let shared = Rc::new(Shared {
            inner: RefCell::new(Inner {
                runtime,
                renderer,
                media,
                canvas: canvas.clone(),
                window: window.clone(),
            }),
            window: window.clone(),
            frame_callback: RefCell::new(None),
            pending: Cell::new(None),
        });
        install_frame_callback(&shared);

        let mut listeners = Vec::new();
        for name in ["mousemove", "mousedown", "click", "mouseleave"] {
            listeners.push(mouse_listener(&shared, canvas.as_ref(), name)?);
        }
        // releases outside the canvas still end a drag
        listeners.push(mouse_listener(&shared, document.as_ref(), "mouseup")?);
        for name in ["touchstart", "touchend", "touchcancel"] {
            listeners.push(touch_listener(&shared, canvas.as_ref(), name)?);
        }
        listeners.push(wheel_listener(&shared, canvas.as_ref())?);
        listeners.push(resize_listener(&shared, window.as_ref())?);
        if let Some(query) = motion_query {
            listeners.push(motion_listener(&shared, query)?);
        }

        shared.schedule();
        tracing::info!(canvas = canvas_id, ?motion, "mounted");

        Ok(Self { shared, listeners })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn install_frame_callback(shared: &Rc<Shared>) {
    let weak: Weak<Shared> = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp_ms: f64| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        shared.pending.set(None);
        // one idle frame after the last drawn one resets the clock
        if shared.with_inner(|inner| inner.frame(timestamp_ms)).unwrap_or(true) {
            shared.schedule();
        }
    });
    *shared.frame_callback.borrow_mut() = Some(callback);
}

fn mouse_listener(shared: &Rc<Shared>, target: &EventTarget, name: &'static str) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        shared.with_inner(|inner| {
            if let Some(event) = mouse_event_to_rowscroll(e, name, inner.origin()) {
                inner.dispatch(&event);
            }
        });
        shared.schedule();
    });
    Listener::new(target, name, callback)
}

fn touch_listener(shared: &Rc<Shared>, target: &EventTarget, name: &'static str) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        let Some(e) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        shared.with_inner(|inner| {
            for event in touch_event_to_rowscroll(e, name, inner.origin()) {
                inner.dispatch(&event);
            }
        });
        shared.schedule();
    });
    Listener::new(target, name, callback)
}

fn wheel_listener(shared: &Rc<Shared>, target: &EventTarget) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        let Some(e) = e.dyn_ref::<WheelEvent>() else {
            return;
        };
        e.prevent_default();
        shared.with_inner(|inner| {
            let page = inner.runtime.list().viewport().height;
            let event = wheel_event_to_rowscroll(e, inner.origin(), page);
            inner.dispatch(&event);
        });
        shared.schedule();
    });
    Listener::new(target, "wheel", callback)
}

fn resize_listener(shared: &Rc<Shared>, target: &EventTarget) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        shared.with_inner(Inner::resize);
        shared.schedule();
    });
    Listener::new(target, "resize", callback)
}

fn motion_listener(shared: &Rc<Shared>, query: MediaQueryList) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    let target: EventTarget = query.clone().into();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        let motion = MotionPreference::from_reduce_query(query.matches());
        shared.with_inner(|inner| inner.runtime.set_motion(motion));
        shared.schedule();
    });
    Listener::new(&target, "change", callback)
}

/// Module start hook.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
