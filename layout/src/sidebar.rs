//! Sidebar layout state machine.
//!
//! The sidebar has two independent layouts. Below the breakpoint it is an
//! overlay that is either open or collapsed and always starts collapsed.
//! At or above the breakpoint it is either fully expanded or reduced to an
//! icon rail; the icon rail expands temporarily while hovered. The desktop
//! choice is persisted, the mobile and hover flags never are.
//!
//! [`transition`] is a pure function over [`SidebarState`]. Each state maps
//! to a complete [`ClassPatch`] over every class this module manages, so
//! applying a state always clears whatever the previous state left behind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ChromeConfig;
use crate::store::{ParseError, PreferenceStore, persist};
use crate::surface::{ClassPatch, Surface, Target};

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

pub const FULL_CLASS: &str = "desktop-full-open";
pub const ICONS_CLASS: &str = "desktop-icon-only";
pub const HOVER_EXPANDED_CLASS: &str = "hover-expanded";
pub const MOBILE_OPEN_CLASS: &str = "mobile-overlay-open";
pub const MOBILE_COLLAPSED_CLASS: &str = "mobile-collapsed";
/// Hides the sidebar until the first layout is applied.
pub const INITIALIZING_CLASS: &str = "sidebar-initializing";

pub const MAIN_FULL_CLASS: &str = "sidebar-desktop-full-open";
pub const MAIN_ICONS_CLASS: &str = "sidebar-desktop-icon-only";
pub const MAIN_MOBILE_HIDDEN_CLASS: &str = "sidebar-mobile-hidden";

const SIDEBAR_CLASSES: [&str; 5] =
    [FULL_CLASS, ICONS_CLASS, HOVER_EXPANDED_CLASS, MOBILE_OPEN_CLASS, MOBILE_COLLAPSED_CLASS];
const MAIN_CLASSES: [&str; 3] = [MAIN_FULL_CLASS, MAIN_ICONS_CLASS, MAIN_MOBILE_HIDDEN_CLASS];

/// Layout family selected by viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Mobile,
    Desktop,
}

impl Viewport {
    /// Mobile iff `width < breakpoint`. No hysteresis.
    #[must_use]
    pub fn classify(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint { Self::Mobile } else { Self::Desktop }
    }
}

/// Persisted desktop sidebar preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopMode {
    /// Labels visible, content pushed right.
    Full,
    /// Icon rail only.
    #[default]
    Icons,
}

impl DesktopMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Icons => "icons",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Full => Self::Icons,
            Self::Icons => Self::Full,
        }
    }

    /// Parse `raw`, falling back to `fallback` when absent or invalid.
    #[must_use]
    pub fn coerce(raw: Option<&str>, fallback: Self) -> Self {
        match raw.map(str::parse::<Self>) {
            Some(Ok(mode)) => mode,
            Some(Err(err)) => {
                log::debug!("{err}; using {fallback}");
                fallback
            }
            None => fallback,
        }
    }
}

impl FromStr for DesktopMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "icons" => Ok(Self::Icons),
            other => Err(ParseError { kind: "desktop sidebar mode", value: other.to_owned() }),
        }
    }
}

impl fmt::Display for DesktopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual mode of the sidebar. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SidebarState {
    MobileClosed,
    MobileOpen,
    DesktopFull,
    DesktopIcons,
    DesktopIconsHoverExpanded,
}

impl SidebarState {
    /// State after (re)initialization: mobile always starts closed, desktop
    /// follows the persisted mode.
    #[must_use]
    pub fn initial(viewport: Viewport, mode: DesktopMode) -> Self {
        match (viewport, mode) {
            (Viewport::Mobile, _) => Self::MobileClosed,
            (Viewport::Desktop, DesktopMode::Full) => Self::DesktopFull,
            (Viewport::Desktop, DesktopMode::Icons) => Self::DesktopIcons,
        }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        match self {
            Self::MobileClosed | Self::MobileOpen => Viewport::Mobile,
            Self::DesktopFull | Self::DesktopIcons | Self::DesktopIconsHoverExpanded => Viewport::Desktop,
        }
    }

    /// Desktop mode this state belongs to; `None` on mobile.
    #[must_use]
    pub fn desktop_mode(self) -> Option<DesktopMode> {
        match self {
            Self::DesktopFull => Some(DesktopMode::Full),
            Self::DesktopIcons | Self::DesktopIconsHoverExpanded => Some(DesktopMode::Icons),
            Self::MobileClosed | Self::MobileOpen => None,
        }
    }

    fn sidebar_on(self) -> &'static [&'static str] {
        match self {
            Self::MobileClosed => &[MOBILE_COLLAPSED_CLASS],
            Self::MobileOpen => &[MOBILE_OPEN_CLASS],
            Self::DesktopFull => &[FULL_CLASS],
            Self::DesktopIcons => &[ICONS_CLASS],
            Self::DesktopIconsHoverExpanded => &[ICONS_CLASS, HOVER_EXPANDED_CLASS],
        }
    }

    fn main_on(self) -> &'static [&'static str] {
        match self {
            Self::MobileClosed => &[MAIN_MOBILE_HIDDEN_CLASS],
            Self::MobileOpen => &[],
            Self::DesktopFull => &[MAIN_FULL_CLASS],
            Self::DesktopIcons | Self::DesktopIconsHoverExpanded => &[MAIN_ICONS_CLASS],
        }
    }

    /// Full patch for the sidebar element.
    #[must_use]
    pub fn sidebar_patch(self) -> ClassPatch {
        full_patch(&SIDEBAR_CLASSES, self.sidebar_on())
    }

    /// Full patch for the main content element.
    #[must_use]
    pub fn main_patch(self) -> ClassPatch {
        full_patch(&MAIN_CLASSES, self.main_on())
    }
}

fn full_patch(managed: &[&'static str], on: &[&'static str]) -> ClassPatch {
    managed.iter().fold(ClassPatch::new(), |patch, &class| patch.with(class, on.contains(&class)))
}

/// Input to the sidebar state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SidebarEvent {
    /// The menu toggle control was clicked.
    ToggleClicked,
    /// A click reached the document.
    DocumentClicked {
        /// The click target is the sidebar or inside it.
        inside_sidebar: bool,
        /// The click target is the menu toggle or inside it.
        inside_toggle: bool,
    },
    /// The pointer entered the sidebar.
    PointerEntered,
    /// The pointer left the sidebar.
    PointerLeft,
    /// The window was resized to `width` CSS pixels.
    Resized { width: f64 },
}

/// Result of one [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: SidebarState,
    /// Desktop mode to write to storage.
    pub persist: Option<DesktopMode>,
    /// Every open submenu must close.
    pub collapse_submenus: bool,
}

impl Transition {
    fn stay(state: SidebarState) -> Self {
        Self { state, persist: None, collapse_submenus: false }
    }
}

/// Pure transition function.
///
/// `stored_mode` is the persisted desktop mode, consulted only when a resize
/// reinitializes the layout.
#[must_use]
pub fn transition(state: SidebarState, event: SidebarEvent, breakpoint: f64, stored_mode: DesktopMode) -> Transition {
    use SidebarState::{DesktopFull, DesktopIcons, DesktopIconsHoverExpanded, MobileClosed, MobileOpen};

    match (state, event) {
        (MobileClosed, SidebarEvent::ToggleClicked) => Transition::stay(MobileOpen),
        (MobileOpen, SidebarEvent::ToggleClicked) => Transition::stay(MobileClosed),
        (DesktopFull | DesktopIcons | DesktopIconsHoverExpanded, SidebarEvent::ToggleClicked) => {
            let mode = state.desktop_mode().unwrap_or_default().toggled();
            Transition {
                state: SidebarState::initial(Viewport::Desktop, mode),
                persist: Some(mode),
                collapse_submenus: false,
            }
        }
        (MobileOpen, SidebarEvent::DocumentClicked { inside_sidebar: false, inside_toggle: false }) => {
            Transition::stay(MobileClosed)
        }
        (DesktopIcons, SidebarEvent::PointerEntered) => Transition::stay(DesktopIconsHoverExpanded),
        (_, SidebarEvent::PointerLeft) => Transition {
            state: if state == DesktopIconsHoverExpanded { DesktopIcons } else { state },
            persist: None,
            collapse_submenus: true,
        },
        (_, SidebarEvent::Resized { width }) => {
            Transition::stay(SidebarState::initial(Viewport::classify(width, breakpoint), stored_mode))
        }
        _ => Transition::stay(state),
    }
}

/// Owns the sidebar state and renders it onto the sidebar and main content.
#[derive(Debug, Clone)]
pub struct SidebarController {
    state: SidebarState,
    breakpoint: f64,
    storage_key: String,
    default_mode: DesktopMode,
    /// Mode last chosen on this page; outranks storage, which may have
    /// rejected the write.
    chosen: Option<DesktopMode>,
}

impl SidebarController {
    /// Apply the initial layout for `viewport_width` and reveal the sidebar.
    pub fn start<S, F>(viewport_width: f64, config: &ChromeConfig, store: &S, surface: &mut F) -> Self
    where
        S: PreferenceStore,
        F: Surface,
    {
        let mut controller = Self {
            state: SidebarState::MobileClosed,
            breakpoint: config.mobile_breakpoint_px,
            storage_key: config.sidebar_storage_key.clone(),
            default_mode: config.default_desktop_mode,
            chosen: None,
        };
        let viewport = Viewport::classify(viewport_width, controller.breakpoint);
        controller.state = SidebarState::initial(viewport, controller.stored_mode(store));
        log::debug!("initial sidebar {:?} at width {viewport_width}", controller.state);

        let mut sidebar = controller.state.sidebar_patch();
        sidebar.set(INITIALIZING_CLASS, false);
        surface.apply_classes(Target::Sidebar, &sidebar);
        surface.apply_classes(Target::MainContent, &controller.state.main_patch());
        controller
    }

    /// Feed one event through the state machine, persisting and rendering
    /// the result. Resizes always re-render; other events only on change.
    pub fn handle<S, F>(&mut self, event: SidebarEvent, store: &mut S, surface: &mut F) -> Transition
    where
        S: PreferenceStore,
        F: Surface,
    {
        let stored_mode = self.stored_mode(store);
        let next = transition(self.state, event, self.breakpoint, stored_mode);
        if let Some(mode) = next.persist {
            self.chosen = Some(mode);
            persist(store, &self.storage_key, mode.as_str());
        }
        let changed = next.state != self.state;
        if changed {
            log::debug!("sidebar {:?} -> {:?} on {event:?}", self.state, next.state);
        }
        self.state = next.state;
        if changed || matches!(event, SidebarEvent::Resized { .. }) {
            self.render(surface);
        }
        next
    }

    #[must_use]
    pub fn state(&self) -> SidebarState {
        self.state
    }

    fn stored_mode<S: PreferenceStore>(&self, store: &S) -> DesktopMode {
        if let Some(mode) = self.chosen {
            return mode;
        }
        DesktopMode::coerce(store.get(&self.storage_key).as_deref(), self.default_mode)
    }

    fn render<F: Surface>(&self, surface: &mut F) {
        surface.apply_classes(Target::Sidebar, &self.state.sidebar_patch());
        surface.apply_classes(Target::MainContent, &self.state.main_patch());
    }
}
