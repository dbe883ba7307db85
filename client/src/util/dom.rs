//! Element lookup and the `web-sys` rendering surface.
//!
//! [`PageNodes::scan`] runs once at start-up and keeps every element the
//! controllers can address, in document order, so a
//! [`Target`](layout::surface::Target) index resolves to an element without
//! querying the DOM again.

use layout::alerts::AlertSpec;
use layout::chrome::PageInventory;
use layout::config::{ChromeConfig, ConfigError};
use layout::submenu::{OPEN_CLASS, SubmenuSpec};
use layout::surface::{ClassPatch, Surface, Target};
use layout::theme::Theme;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

use crate::util::selectors;

/// Elements of one submenu parent.
#[derive(Debug, Clone)]
pub struct SubmenuNodes {
    pub anchor: Element,
    pub container: Option<Element>,
    pub arrow: Option<Element>,
}

/// Elements of one flash alert.
#[derive(Debug, Clone)]
pub struct AlertNodes {
    pub alert: Element,
    pub close_button: Option<Element>,
}

/// Every element the page chrome reads or writes.
#[derive(Debug, Clone, Default)]
pub struct PageNodes {
    pub root: Option<Element>,
    pub sidebar: Option<Element>,
    pub main_content: Option<Element>,
    pub menu_toggle: Option<Element>,
    pub theme_switch: Option<HtmlInputElement>,
    pub theme_buttons: Vec<Element>,
    pub submenus: Vec<SubmenuNodes>,
    pub alerts: Vec<AlertNodes>,
}

impl PageNodes {
    /// Look up every element of the DOM contract. Missing pieces stay `None`
    /// or empty and disable only their own behavior.
    #[must_use]
    pub fn scan(document: &Document) -> Self {
        let submenus = select_all(document, selectors::SUBMENU_PARENTS)
            .into_iter()
            .filter_map(|item| {
                let anchor = select_in(&item, selectors::SUBMENU_ANCHOR)?;
                let arrow = select_in(&anchor, selectors::SUBMENU_ARROW);
                let container = select_in(&item, selectors::SUBMENU_CONTAINER);
                Some(SubmenuNodes { anchor, container, arrow })
            })
            .collect();

        let alerts = select_all(document, selectors::ALERTS)
            .into_iter()
            .map(|alert| {
                let close_button = select_in(&alert, selectors::ALERT_CLOSE);
                AlertNodes { alert, close_button }
            })
            .collect();

        Self {
            root: document.document_element(),
            sidebar: select_one(document, selectors::SIDEBAR),
            main_content: select_one(document, selectors::MAIN_CONTENT),
            menu_toggle: document.get_element_by_id(selectors::MENU_TOGGLE_ID),
            theme_switch: document
                .get_element_by_id(selectors::THEME_SWITCH_ID)
                .and_then(|el| el.dyn_ref::<HtmlInputElement>().cloned()),
            theme_buttons: select_all(document, selectors::THEME_BUTTONS),
            submenus,
            alerts,
        }
    }

    /// Both layout containers are present.
    #[must_use]
    pub fn has_sidebar(&self) -> bool {
        self.sidebar.is_some() && self.main_content.is_some()
    }

    /// Describe the scanned page for [`layout::chrome::Chrome::start`].
    #[must_use]
    pub fn inventory(&self, viewport_width: f64) -> PageInventory {
        PageInventory {
            server_theme: self.root.as_ref().and_then(|root| root.get_attribute(selectors::SERVER_THEME_ATTR)),
            has_theme_switch: self.theme_switch.is_some(),
            theme_button_values: self
                .theme_buttons
                .iter()
                .map(|button| button.get_attribute(selectors::THEME_BUTTON_VALUE_ATTR))
                .collect(),
            has_sidebar: self.has_sidebar(),
            viewport_width,
            submenus: self
                .submenus
                .iter()
                .map(|nodes| SubmenuSpec {
                    has_container: nodes.container.is_some(),
                    initially_open: nodes
                        .container
                        .as_ref()
                        .is_some_and(|c| c.class_list().contains(OPEN_CLASS)),
                    has_arrow: nodes.arrow.is_some(),
                })
                .collect(),
            alerts: self
                .alerts
                .iter()
                .map(|nodes| AlertSpec { auto_dismiss: matches_selector(&nodes.alert, selectors::AUTO_DISMISS_ALERT) })
                .collect(),
        }
    }
}

/// Read the optional JSON override from the root element.
///
/// # Errors
///
/// Returns the parse or validation error of a present but bad attribute.
pub fn read_config(document: &Document) -> Result<ChromeConfig, ConfigError> {
    match document.document_element().and_then(|root| root.get_attribute(selectors::CONFIG_ATTR)) {
        Some(raw) => ChromeConfig::from_json(&raw),
        None => Ok(ChromeConfig::default()),
    }
}

/// `window.innerWidth` in CSS pixels.
#[must_use]
pub fn viewport_width(window: &Window) -> Option<f64> {
    match window.inner_width() {
        Ok(width) => width.as_f64(),
        Err(err) => {
            log::warn!("innerWidth unavailable: {err:?}");
            None
        }
    }
}

/// [`Surface`] that writes straight into the scanned elements.
#[derive(Debug, Clone)]
pub struct DomSurface {
    nodes: PageNodes,
}

impl DomSurface {
    #[must_use]
    pub fn new(nodes: PageNodes) -> Self {
        Self { nodes }
    }

    fn element(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Sidebar => self.nodes.sidebar.as_ref(),
            Target::MainContent => self.nodes.main_content.as_ref(),
            Target::ThemeButton(i) => self.nodes.theme_buttons.get(i),
            Target::Submenu(i) => self.nodes.submenus.get(i).and_then(|n| n.container.as_ref()),
            Target::SubmenuArrow(i) => self.nodes.submenus.get(i).and_then(|n| n.arrow.as_ref()),
            Target::Alert(i) => self.nodes.alerts.get(i).map(|n| &n.alert),
        }
    }
}

impl Surface for DomSurface {
    fn apply_classes(&mut self, target: Target, patch: &ClassPatch) {
        let Some(element) = self.element(target) else {
            log::debug!("no element for {target:?}");
            return;
        };
        let classes = element.class_list();
        for &(class, on) in patch.entries() {
            if let Err(err) = classes.toggle_with_force(class, on) {
                log::warn!("toggling {class} on {target:?} failed: {err:?}");
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        let Some(root) = &self.nodes.root else {
            return;
        };
        for attr in [selectors::SERVER_THEME_ATTR, selectors::THEME_ATTR] {
            if let Err(err) = root.set_attribute(attr, theme.as_str()) {
                log::warn!("setting {attr} failed: {err:?}");
            }
        }
    }

    fn set_toggle_checked(&mut self, checked: bool) {
        if let Some(switch) = &self.nodes.theme_switch {
            switch.set_checked(checked);
        }
    }

    fn detach(&mut self, target: Target) {
        if let Some(element) = self.element(target) {
            element.remove();
        }
    }
}

fn select_one(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("invalid selector {selector}: {err:?}");
            None
        }
    }
}

fn select_in(scope: &Element, selector: &str) -> Option<Element> {
    match scope.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("invalid selector {selector}: {err:?}");
            None
        }
    }
}

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("invalid selector {selector}: {err:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

fn matches_selector(element: &Element, selector: &str) -> bool {
    element.matches(selector).unwrap_or(false)
}
