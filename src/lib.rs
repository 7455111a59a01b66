// browser IDE simulation: terminal, source control, pipelines and assistant
// state, driven from the host page through the `Ide` handle
pub mod ai;
pub mod command;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod file_tree;
pub mod fixtures;
pub mod gemini;
pub mod highlight;
pub mod history;
pub mod logging;
pub mod project;
pub mod reducer;
pub mod scheduler;
pub mod session;
pub mod suggest;
pub mod theme;
pub mod vcs;
pub mod workbench;

pub use ai::{AiService, OfflineAi};
pub use config::IdeConfig;
pub use context::IdeContext;
pub use reducer::Action;
pub use workbench::Workbench;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use gemini::GeminiClient;

// state shared between the handle and its pending futures
struct Shared {
    bench: RefCell<Workbench>,
    on_update: RefCell<Option<js_sys::Function>>,
    // due time of the timer currently armed, if any
    armed: Cell<Option<u64>>,
    epoch_ms: f64,
}

impl Shared {
    fn clock(&self) -> u64 {
        (js_sys::Date::now() - self.epoch_ms).max(0.0) as u64
    }

    // keep the logical clock level with wall time so new delays start now
    fn sync_clock(&self) {
        let now = self.clock();
        let fired = self.bench.borrow_mut().advance_to(now);
        if fired > 0 {
            log::debug!("caught up {} overdue continuations", fired);
        }
    }

    fn snapshot_js(&self) -> Result<JsValue, JsValue> {
        let bench = self.bench.borrow();
        serde_wasm_bindgen::to_value(&bench.snapshot()).map_err(JsValue::from)
    }

    // invoked after changes the page did not ask for directly
    fn notify(&self) {
        let callback = self.on_update.borrow().clone();
        if let Some(callback) = callback {
            match self.snapshot_js() {
                Ok(state) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &state) {
                        log::warn!("update callback threw: {:?}", e);
                    }
                }
                Err(e) => log::error!("snapshot failed: {:?}", e),
            }
        }
    }
}

/// Ships queued AI requests and arms a timer for the next continuation.
fn pump(shared: &Rc<Shared>) {
    let requests = shared.bench.borrow_mut().take_requests();
    for request in requests {
        send_request(shared, request);
    }
    arm_timer(shared);
}

#[cfg(target_arch = "wasm32")]
fn send_request(shared: &Rc<Shared>, request: ai::AiRequest) {
    let ai = shared.bench.borrow().ai();
    let pending = request.send(ai.as_ref());
    let shared = Rc::clone(shared);
    wasm_bindgen_futures::spawn_local(async move {
        let reply = pending.await;
        shared.bench.borrow_mut().deliver(reply);
        shared.notify();
        pump(&shared);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn send_request(shared: &Rc<Shared>, request: ai::AiRequest) {
    let ai = shared.bench.borrow().ai();
    let reply = futures::executor::block_on(request.send(ai.as_ref()));
    shared.bench.borrow_mut().deliver(reply);
}

#[cfg(target_arch = "wasm32")]
fn arm_timer(shared: &Rc<Shared>) {
    let Some(due) = shared.bench.borrow().next_due() else {
        return;
    };
    if matches!(shared.armed.get(), Some(armed) if armed <= due) {
        return;
    }
    shared.armed.set(Some(due));
    let delay = due.saturating_sub(shared.clock()).min(u32::MAX as u64) as u32;
    let shared = Rc::clone(shared);
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(delay).await;
        if shared.armed.get() == Some(due) {
            shared.armed.set(None);
        }
        let now = shared.clock();
        let fired = shared.bench.borrow_mut().advance_to(now);
        if fired > 0 {
            shared.notify();
        }
        pump(&shared);
    });
}

// no event loop off the browser; the native host drives the clock itself
#[cfg(not(target_arch = "wasm32"))]
fn arm_timer(_shared: &Rc<Shared>) {}

#[wasm_bindgen]
pub struct Ide {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Ide {
    /// `config` is an optional JSON document; missing keys take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<Ide, JsValue> {
        logging::init();
        let config = IdeConfig::from_json(config.as_deref().unwrap_or_default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let backend: Rc<dyn AiService> = if config.has_ai_key() {
            Rc::new(GeminiClient::new(config.ai.clone()))
        } else {
            log::info!("no API key configured; assistant runs offline");
            Rc::new(OfflineAi)
        };
        let shared = Shared {
            bench: RefCell::new(Workbench::new(config, backend)),
            on_update: RefCell::new(None),
            armed: Cell::new(None),
            epoch_ms: js_sys::Date::now(),
        };
        Ok(Ide { shared: Rc::new(shared) })
    }

    /// Applies one action object (`{ type: "submit" }`, ...) and returns the
    /// new state.
    pub fn dispatch(&self, action: JsValue) -> Result<JsValue, JsValue> {
        let action: Action = serde_wasm_bindgen::from_value(action)
            .map_err(|e| JsValue::from_str(&format!("bad action: {}", e)))?;
        self.shared.sync_clock();
        self.shared.bench.borrow_mut().dispatch(action);
        pump(&self.shared);
        self.shared.snapshot_js()
    }

    /// Runs a command line as if typed at the prompt.
    pub fn submit(&self, line: &str) -> Result<JsValue, JsValue> {
        self.shared.sync_clock();
        self.shared.bench.borrow_mut().submit(line);
        pump(&self.shared);
        self.shared.snapshot_js()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        self.shared.snapshot_js()
    }

    pub fn highlight(&self, line: &str) -> Result<JsValue, JsValue> {
        let spans = self.shared.bench.borrow().highlight(line);
        serde_wasm_bindgen::to_value(&spans).map_err(JsValue::from)
    }

    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        let hits = self.shared.bench.borrow().search(query);
        serde_wasm_bindgen::to_value(&hits).map_err(JsValue::from)
    }

    /// Called with a fresh snapshot whenever a timer or AI reply changes
    /// state.
    pub fn set_update_callback(&self, callback: js_sys::Function) {
        *self.shared.on_update.borrow_mut() = Some(callback);
    }
}
