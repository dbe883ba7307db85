//! Default values shared across controllers.

/// Viewports narrower than this many CSS pixels use the mobile layout.
pub const MOBILE_BREAKPOINT_PX: f64 = 992.0;

/// Storage key holding the persisted theme (`light` or `dark`).
pub const THEME_STORAGE_KEY: &str = "theme";

/// Storage key holding the persisted desktop sidebar mode (`full` or `icons`).
pub const SIDEBAR_STORAGE_KEY: &str = "desktopSidebarState";

/// Delay before an auto-dismiss alert starts fading out.
pub const ALERT_AUTO_DISMISS_MS: u32 = 5_000;

/// Length of the alert fade transition; the element is detached afterwards.
pub const ALERT_FADE_MS: u32 = 150;
