//! DOM event listeners and command execution.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget`. Every handler translates the DOM event into a
//! [`UiEvent`] and goes through [`dispatch`]; nothing here decides behavior.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use layout::chrome::{Chrome, Command, UiEvent};
use layout::sidebar::SidebarEvent;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, Node, Window};

use crate::util::dom::{DomSurface, PageNodes, viewport_width};
use crate::util::storage::BrowserStore;

/// The page's single chrome instance, shared by every listener.
pub type SharedChrome = Rc<RefCell<Chrome<BrowserStore, DomSurface>>>;

/// Feed `event` to the chrome and carry out the resulting commands.
pub fn dispatch(chrome: &SharedChrome, event: UiEvent) {
    let commands = match chrome.try_borrow_mut() {
        Ok(mut chrome) => chrome.handle(event),
        Err(err) => {
            log::warn!("dropped {event:?}: {err}");
            return;
        }
    };
    run(chrome, commands);
}

/// Execute commands returned by the chrome.
pub fn run(chrome: &SharedChrome, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::Schedule { delay_ms, event } => {
                let chrome = Rc::clone(chrome);
                Timeout::new(delay_ms, move || dispatch(&chrome, event)).forget();
            }
        }
    }
}

/// Attach every listener the scanned page supports.
pub fn wire(chrome: &SharedChrome, nodes: &PageNodes, window: &Window, document: &Document) {
    if let Some(switch) = nodes.theme_switch.clone() {
        let chrome = Rc::clone(chrome);
        let target = switch.clone();
        listen(&target, "change", move |_| {
            dispatch(&chrome, UiEvent::ThemeSwitchChanged { checked: switch.checked() });
        });
    }

    if nodes.has_sidebar() {
        if let Some(sidebar) = &nodes.sidebar {
            wire_sidebar(chrome, sidebar, nodes.menu_toggle.clone(), window, document);
        }
    }

    for (index, submenu) in nodes.submenus.iter().enumerate() {
        let chrome = Rc::clone(chrome);
        listen(&submenu.anchor, "click", move |event| {
            event.prevent_default();
            dispatch(&chrome, UiEvent::SubmenuClicked { index });
        });
    }

    for (index, alert) in nodes.alerts.iter().enumerate() {
        let Some(button) = &alert.close_button else {
            continue;
        };
        let chrome = Rc::clone(chrome);
        listen(button, "click", move |_| dispatch(&chrome, UiEvent::AlertCloseClicked { index }));
    }
}

fn wire_sidebar(
    chrome: &SharedChrome,
    sidebar: &Element,
    menu_toggle: Option<Element>,
    window: &Window,
    document: &Document,
) {
    if let Some(toggle) = &menu_toggle {
        let chrome = Rc::clone(chrome);
        listen(toggle, "click", move |event| {
            event.stop_propagation();
            dispatch(&chrome, UiEvent::Sidebar(SidebarEvent::ToggleClicked));
        });
    }

    {
        let chrome = Rc::clone(chrome);
        listen(sidebar, "mouseenter", move |_| dispatch(&chrome, UiEvent::Sidebar(SidebarEvent::PointerEntered)));
    }
    {
        let chrome = Rc::clone(chrome);
        listen(sidebar, "mouseleave", move |_| dispatch(&chrome, UiEvent::Sidebar(SidebarEvent::PointerLeft)));
    }

    {
        let chrome = Rc::clone(chrome);
        let sidebar = sidebar.clone();
        listen(document, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_ref::<Node>().cloned());
            let inside = |container: &Node| target.as_ref().is_some_and(|node| container.contains(Some(node)));
            let sidebar_node: &Node = &sidebar;
            let inside_sidebar = inside(sidebar_node);
            let inside_toggle = menu_toggle.as_ref().is_some_and(|toggle| {
                let toggle_node: &Node = toggle;
                inside(toggle_node)
            });
            dispatch(&chrome, UiEvent::Sidebar(SidebarEvent::DocumentClicked { inside_sidebar, inside_toggle }));
        });
    }

    {
        let chrome = Rc::clone(chrome);
        let window_for_cb = window.clone();
        listen(window, "resize", move |_| {
            if let Some(width) = viewport_width(&window_for_cb) {
                dispatch(&chrome, UiEvent::Sidebar(SidebarEvent::Resized { width }));
            }
        });
    }
}

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("could not listen for {kind}: {err:?}");
    }
    closure.forget();
}
