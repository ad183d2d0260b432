#![forbid(unsafe_code)]

//! Browser bindings.
//!
//! Everything here is single-threaded and host-driven: the browser event
//! loop serializes focus callbacks and interval firings, so the session
//! lives in an `Rc<RefCell<_>>` shared by the wired callbacks.
//!
//! The repeating poll is scheduled with `setInterval` and its callback is
//! intentionally leaked (`Closure::forget`): the poll has no cancellation
//! path and runs until the page is unloaded, at which point the browser
//! reclaims it.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use pagewake_core::activator::ActivatorConfig;
use pagewake_core::directive::FadeSpeed;
use pagewake_core::dom::{LogSink, PageDom};
use pagewake_core::event::PageEvent;
use pagewake_core::sketch::{SketchCaps, SketchInstance, SketchRegistry};
use pagewake_runtime::PageSession;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::WebSetupError;
use crate::options::PageWakeOptions;

#[wasm_bindgen]
extern "C" {
    /// Sketch-runtime lookup by identifier.
    ///
    /// `catch` so that a page without the sketch runtime loaded degrades to
    /// an absent instance instead of an uncaught `ReferenceError`.
    #[wasm_bindgen(js_namespace = Processing, js_name = getInstanceById, catch)]
    fn sketch_instance_by_id(id: &str) -> Result<JsValue, JsValue>;
}

impl From<WebSetupError> for JsValue {
    fn from(err: WebSetupError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

// ---------------------------------------------------------------------------
// Host capabilities over web-sys
// ---------------------------------------------------------------------------

/// [`PageDom`] over the real document.
pub(crate) struct WebDom {
    document: Document,
}

impl WebDom {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }
}

impl PageDom for WebDom {
    fn focus_element(&mut self, id: &str) {
        if let Some(element) = self.html_element(id) {
            let _ = element.focus();
        }
    }

    fn hide_element(&mut self, id: &str, fade: FadeSpeed) {
        let Some(element) = self.html_element(id) else {
            return;
        };
        let ms = fade.duration().as_millis() as i32;
        let style = element.style();
        let _ = style.set_property("transition", &format!("opacity {ms}ms ease-out"));
        let _ = style.set_property("opacity", "0");

        // Take the element out of flow once the fade has played.
        let Some(window) = web_sys::window() else {
            return;
        };
        let faded = element.clone();
        let conceal = Closure::once_into_js(move || {
            let _ = faded.style().set_property("display", "none");
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(conceal.unchecked_ref(), ms);
    }
}

/// [`LogSink`] over the browser console.
pub(crate) struct ConsoleLog;

impl LogSink for ConsoleLog {
    fn log(&mut self, text: &str) {
        web_sys::console::log_1(&JsValue::from_str(text));
    }
}

// ---------------------------------------------------------------------------
// Duck-typed sketch instances
// ---------------------------------------------------------------------------

/// A sketch instance behind a `JsValue`, capabilities probed at wrap time.
///
/// A property that is a function counts as a present capability; anything
/// else (absent, non-function) means the capability is not exposed.
pub(crate) struct JsSketch {
    value: JsValue,
    loop_fn: Option<Function>,
    unmute_fn: Option<Function>,
}

impl JsSketch {
    fn wrap(value: JsValue) -> Self {
        let loop_fn = probe_function(&value, "loop");
        let unmute_fn = probe_function(&value, "unmute");
        Self {
            value,
            loop_fn,
            unmute_fn,
        }
    }
}

fn probe_function(value: &JsValue, name: &str) -> Option<Function> {
    js_sys::Reflect::get(value, &JsValue::from_str(name))
        .ok()
        .and_then(|prop| prop.dyn_into::<Function>().ok())
}

impl SketchInstance for JsSketch {
    fn caps(&self) -> SketchCaps {
        let mut caps = SketchCaps::empty();
        caps.set(SketchCaps::LOOP, self.loop_fn.is_some());
        caps.set(SketchCaps::UNMUTE, self.unmute_fn.is_some());
        caps
    }

    fn resume_loop(&mut self) {
        if let Some(f) = &self.loop_fn {
            let _ = f.call0(&self.value);
        }
    }

    fn unmute(&mut self) {
        if let Some(f) = &self.unmute_fn {
            let _ = f.call0(&self.value);
        }
    }
}

/// Registry backed by the sketch runtime's global lookup.
///
/// The wrapped instance only lives in `current` for the duration of one
/// lookup; the next lookup re-probes from scratch.
#[derive(Default)]
pub(crate) struct JsSketchRegistry {
    current: Option<JsSketch>,
}

impl SketchRegistry for JsSketchRegistry {
    fn lookup(&mut self, id: &str) -> Option<&mut dyn SketchInstance> {
        self.current = match sketch_instance_by_id(id) {
            Ok(value) if !value.is_null() && !value.is_undefined() => Some(JsSketch::wrap(value)),
            _ => None,
        };
        self.current
            .as_mut()
            .map(|sketch| sketch as &mut dyn SketchInstance)
    }
}

// ---------------------------------------------------------------------------
// JS entry points
// ---------------------------------------------------------------------------

type WebSession = PageSession<WebDom, JsSketchRegistry, ConsoleLog>;

/// The page activator.
///
/// Construct when the page structure has finished loading, then call
/// [`start`] once:
///
/// ```js
/// import init, { PageWake } from "pagewake-web";
///
/// await init();
/// document.addEventListener("DOMContentLoaded", () => {
///     new PageWake(null).start();
/// });
/// ```
///
/// [`start`]: PageWake::start
#[wasm_bindgen]
pub struct PageWake {
    session: Rc<RefCell<WebSession>>,
    interval_id: Option<i32>,
}

#[wasm_bindgen]
impl PageWake {
    /// Create an activator for this page.
    ///
    /// `options` is an optional JSON string; see the options schema for the
    /// accepted fields. Fails only when the host has no window/document or
    /// the options don't parse.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<PageWake, JsValue> {
        let options = PageWakeOptions::parse(options.as_deref())
            .map_err(|err| WebSetupError::BadOptions(err.to_string()))?;
        Self::with_config(options.into_config())
    }

    /// Wire the page and start the poll.
    ///
    /// Attaches a focus listener to every `<canvas>` element and starts the
    /// repeating poll. Idempotent: at most one interval is ever created per
    /// activator, so calling again is a no-op.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.interval_id.is_some() {
            return Ok(());
        }
        self.attach_focus_listeners()?;
        self.interval_id = Some(self.start_poll()?);
        Ok(())
    }

    /// Whether the poll is running.
    #[wasm_bindgen(getter)]
    pub fn started(&self) -> bool {
        self.interval_id.is_some()
    }
}

impl PageWake {
    fn with_config(config: ActivatorConfig) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or(WebSetupError::NoWindow)?
            .document()
            .ok_or(WebSetupError::NoDocument)?;
        let session = PageSession::new(
            config,
            WebDom::new(document),
            JsSketchRegistry::default(),
            ConsoleLog,
        );
        Ok(Self {
            session: Rc::new(RefCell::new(session)),
            interval_id: None,
        })
    }

    fn attach_focus_listeners(&self) -> Result<(), JsValue> {
        let session = Rc::clone(&self.session);
        let on_focus = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            session.borrow_mut().dispatch(PageEvent::CanvasFocused);
        });

        // One shared listener for every canvas on the page.
        let canvases = self
            .session
            .borrow()
            .dom()
            .document()
            .get_elements_by_tag_name("canvas");
        for index in 0..canvases.length() {
            if let Some(canvas) = canvases.item(index) {
                canvas
                    .add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref())?;
            }
        }
        on_focus.forget();
        Ok(())
    }

    fn start_poll(&self) -> Result<i32, JsValue> {
        let window = web_sys::window().ok_or(WebSetupError::NoWindow)?;
        let interval = self.session.borrow().config().poll_interval;
        let interval_ms = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);

        let session = Rc::clone(&self.session);
        let on_tick = Closure::<dyn FnMut()>::new(move || {
            session.borrow_mut().dispatch(PageEvent::PollTick);
        });
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            on_tick.as_ref().unchecked_ref(),
            interval_ms,
        )?;
        // Page-lifetime poll: the callback outlives this struct.
        on_tick.forget();
        Ok(id)
    }
}

/// Construct and start an activator in one call.
///
/// Convenience for pages that don't need to keep the handle around.
#[wasm_bindgen]
pub fn activate(options: Option<String>) -> Result<(), JsValue> {
    let mut page = PageWake::new(options)?;
    page.start()
}
