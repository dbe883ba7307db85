//! Start-up and event dispatch for the whole page chrome.
//!
//! [`Chrome`] owns one instance of every controller plus the preference store
//! and rendering surface they share. The host builds a [`PageInventory`] once
//! the document is loaded, calls [`Chrome::start`], then forwards each DOM
//! event as a [`UiEvent`]. Both return [`Command`]s the host must carry out
//! (currently only delayed re-delivery of an event).

use serde::{Deserialize, Serialize};

use crate::alerts::{AlertController, AlertSpec};
use crate::config::ChromeConfig;
use crate::sidebar::{SidebarController, SidebarEvent, SidebarState};
use crate::store::PreferenceStore;
use crate::submenu::{SubmenuController, SubmenuSpec};
use crate::surface::Surface;
use crate::theme::{Theme, ThemeController};

#[cfg(test)]
#[path = "chrome_test.rs"]
mod chrome_test;

/// What the server rendered, as far as the controllers are concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInventory {
    /// Root `data-bs-theme` attribute as rendered.
    pub server_theme: Option<String>,
    pub has_theme_switch: bool,
    /// `value` attribute of each theme option button, in document order.
    pub theme_button_values: Vec<Option<String>>,
    /// Both the sidebar and the main content container are present.
    pub has_sidebar: bool,
    /// `window.innerWidth` at start-up.
    pub viewport_width: f64,
    pub submenus: Vec<SubmenuSpec>,
    pub alerts: Vec<AlertSpec>,
}

/// A DOM event translated for the controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// The theme switch changed to `checked`.
    ThemeSwitchChanged { checked: bool },
    /// Anything the sidebar state machine consumes.
    Sidebar(SidebarEvent),
    /// The anchor of submenu parent `index` was clicked.
    SubmenuClicked { index: usize },
    /// The close button of alert `index` was clicked.
    AlertCloseClicked { index: usize },
    /// The auto-dismiss delay of alert `index` elapsed.
    AlertAutoDismissDue { index: usize },
    /// The fade-out of alert `index` completed.
    AlertFadeFinished { index: usize },
}

/// Work the host must perform on behalf of the controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Deliver `event` back through [`Chrome::handle`] after `delay_ms`.
    Schedule { delay_ms: u32, event: UiEvent },
}

/// Serializable view of the current chrome state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeSnapshot {
    pub theme: Theme,
    /// `None` when the page has no sidebar.
    pub sidebar: Option<SidebarState>,
    pub open_submenus: Vec<usize>,
    pub visible_alerts: Vec<usize>,
}

/// Every controller on the page, with the store and surface they share.
pub struct Chrome<S, F> {
    store: S,
    surface: F,
    theme: ThemeController,
    sidebar: Option<SidebarController>,
    submenus: SubmenuController,
    alerts: AlertController,
}

impl<S: PreferenceStore, F: Surface> Chrome<S, F> {
    /// Initialize theme, sidebar, submenus, and alerts, in that order.
    #[must_use]
    pub fn start(inventory: PageInventory, config: &ChromeConfig, mut store: S, mut surface: F) -> (Self, Vec<Command>) {
        let theme = ThemeController::start(
            inventory.server_theme.as_deref(),
            inventory.has_theme_switch,
            inventory.theme_button_values,
            config,
            &mut store,
            &mut surface,
        );

        let sidebar = if inventory.has_sidebar {
            Some(SidebarController::start(inventory.viewport_width, config, &store, &mut surface))
        } else {
            log::debug!("sidebar or main content missing; sidebar behavior disabled");
            None
        };

        let submenus = SubmenuController::new(&inventory.submenus);
        let alerts = AlertController::new(&inventory.alerts, config);
        let commands = alerts
            .auto_dismiss_schedule()
            .into_iter()
            .map(|(index, delay_ms)| Command::Schedule { delay_ms, event: UiEvent::AlertAutoDismissDue { index } })
            .collect();

        log::info!(
            "chrome started: theme={}, sidebar={:?}, {} submenu(s), {} alert(s)",
            theme.theme(),
            sidebar.as_ref().map(SidebarController::state),
            submenus.len(),
            inventory.alerts.len()
        );

        let chrome = Self { store, surface, theme, sidebar, submenus, alerts };
        (chrome, commands)
    }

    /// Route one event to its controller.
    pub fn handle(&mut self, event: UiEvent) -> Vec<Command> {
        match event {
            UiEvent::ThemeSwitchChanged { checked } => {
                let theme = self.theme.on_switch_changed(checked, &mut self.store, &mut self.surface);
                log::info!("theme switched to {theme}");
                Vec::new()
            }
            UiEvent::Sidebar(event) => {
                let Some(sidebar) = self.sidebar.as_mut() else {
                    return Vec::new();
                };
                let transition = sidebar.handle(event, &mut self.store, &mut self.surface);
                if transition.collapse_submenus {
                    self.submenus.close_all(&mut self.surface);
                }
                Vec::new()
            }
            UiEvent::SubmenuClicked { index } => {
                self.submenus.toggle(index, &mut self.surface);
                Vec::new()
            }
            UiEvent::AlertCloseClicked { index } | UiEvent::AlertAutoDismissDue { index } => self
                .alerts
                .dismiss(index, &mut self.surface)
                .map(|delay_ms| Command::Schedule { delay_ms, event: UiEvent::AlertFadeFinished { index } })
                .into_iter()
                .collect(),
            UiEvent::AlertFadeFinished { index } => {
                self.alerts.finish(index, &mut self.surface);
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ChromeSnapshot {
        ChromeSnapshot {
            theme: self.theme.theme(),
            sidebar: self.sidebar.as_ref().map(SidebarController::state),
            open_submenus: self.submenus.open_indices(),
            visible_alerts: self.alerts.visible_indices(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn surface(&self) -> &F {
        &self.surface
    }
}
