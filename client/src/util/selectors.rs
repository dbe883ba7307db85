//! DOM contract: the selectors and attributes the server templates provide.

#[cfg(test)]
#[path = "selectors_test.rs"]
mod selectors_test;

/// Root attribute carrying the server-resolved theme.
pub const SERVER_THEME_ATTR: &str = "data-bs-theme";
/// Secondary root attribute mirrored for non-Bootstrap styles.
pub const THEME_ATTR: &str = "data-theme";
/// Optional root attribute holding a JSON `ChromeConfig` override.
pub const CONFIG_ATTR: &str = "data-chrome-config";

pub const SIDEBAR: &str = ".sidebar";
pub const MAIN_CONTENT: &str = ".main-content";
/// Id of the hamburger button in the top navbar.
pub const MENU_TOGGLE_ID: &str = "menuToggle";
/// Id of the light/dark checkbox switch.
pub const THEME_SWITCH_ID: &str = "theme-toggle-switch";
pub const THEME_BUTTONS: &str = ".theme-option-button";
/// Attribute on theme option buttons naming the theme they select.
pub const THEME_BUTTON_VALUE_ATTR: &str = "value";

/// Navigation items that own a nested submenu.
pub const SUBMENU_PARENTS: &str = ".sidebar-nav .has-submenu";
/// Anchor of a submenu parent, relative to the item.
pub const SUBMENU_ANCHOR: &str = ":scope > a";
/// Submenu container, relative to the item.
pub const SUBMENU_CONTAINER: &str = ".submenu";
/// Arrow icon, relative to the anchor.
pub const SUBMENU_ARROW: &str = ".arrow .fas";

pub const ALERTS: &str = ".alert";
/// Close button, relative to the alert.
pub const ALERT_CLOSE: &str = ".btn-close";
/// Alerts matching this dismiss themselves after a delay.
pub const AUTO_DISMISS_ALERT: &str = ".alert-dismissible.fade.show";
