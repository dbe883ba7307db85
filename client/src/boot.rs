//! WebAssembly start-up.
//!
//! Installs the panic hook and console logger, waits for the document to be
//! parsed, then scans it, starts the chrome, and wires listeners. The
//! running instance is kept in a thread-local so JavaScript can inspect it
//! through [`chrome_state_json`].

use std::cell::RefCell;
use std::rc::Rc;

use layout::chrome::Chrome;
use layout::config::ChromeConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::util::dom::{DomSurface, PageNodes, read_config, viewport_width};
use crate::util::events::{self, SharedChrome};
use crate::util::storage::BrowserStore;

thread_local! {
    static ACTIVE: RefCell<Option<SharedChrome>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = match read_config(&document) {
        Ok(config) => {
            init_logging(config.level());
            config
        }
        Err(err) => {
            let config = ChromeConfig::default();
            init_logging(config.level());
            log::warn!("{err}; using default chrome config");
            config
        }
    };

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let cb = Closure::<dyn FnMut()>::once(move || boot(&window, &doc, &config));
        if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref()) {
            log::error!("could not wait for DOMContentLoaded: {err:?}");
        }
        cb.forget();
    } else {
        boot(&window, &document, &config);
    }
}

/// Current chrome state as JSON, or `null` before start-up completes.
#[wasm_bindgen]
pub fn chrome_state_json() -> String {
    ACTIVE.with(|active| {
        let Some(chrome) = active.borrow().as_ref().map(Rc::clone) else {
            return "null".to_owned();
        };
        let Ok(chrome) = chrome.try_borrow() else {
            return "null".to_owned();
        };
        serde_json::to_string(&chrome.snapshot()).unwrap_or_else(|err| {
            log::warn!("chrome snapshot not serializable: {err}");
            "null".to_owned()
        })
    })
}

fn boot(window: &Window, document: &Document, config: &ChromeConfig) {
    let nodes = PageNodes::scan(document);
    let width = viewport_width(window).unwrap_or(config.mobile_breakpoint_px);
    let inventory = nodes.inventory(width);

    let (chrome, commands) = Chrome::start(inventory, config, BrowserStore::open(), DomSurface::new(nodes.clone()));
    let chrome: SharedChrome = Rc::new(RefCell::new(chrome));
    events::run(&chrome, commands);
    events::wire(&chrome, &nodes, window, document);

    ACTIVE.with(|active| *active.borrow_mut() = Some(chrome));
}

fn init_logging(level: log::Level) {
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger not installed: {err}");
    }
}
