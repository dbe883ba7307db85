//! Flash alert dismissal.
//!
//! An alert leaves the page in two steps: the `show` class is removed so the
//! fade transition runs, then the element is detached once the fade is over.
//! Alerts rendered as auto-dismissible start the same sequence on their own
//! after a fixed delay. The host owns the timers; this module only says how
//! long to wait.

use serde::{Deserialize, Serialize};

use crate::config::ChromeConfig;
use crate::surface::{ClassPatch, Surface, Target};

#[cfg(test)]
#[path = "alerts_test.rs"]
mod alerts_test;

/// Class that keeps a fading alert visible.
pub const SHOW_CLASS: &str = "show";

/// Server-rendered shape of one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSpec {
    /// Rendered as `.alert-dismissible.fade.show`.
    pub auto_dismiss: bool,
}

/// Lifecycle of one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPhase {
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, Copy)]
struct Alert {
    spec: AlertSpec,
    phase: AlertPhase,
}

/// Tracks every alert on the page in document order.
#[derive(Debug, Clone)]
pub struct AlertController {
    alerts: Vec<Alert>,
    auto_dismiss_ms: u32,
    fade_ms: u32,
}

impl AlertController {
    #[must_use]
    pub fn new(specs: &[AlertSpec], config: &ChromeConfig) -> Self {
        let alerts = specs.iter().map(|spec| Alert { spec: *spec, phase: AlertPhase::Visible }).collect();
        Self { alerts, auto_dismiss_ms: config.alert_auto_dismiss_ms, fade_ms: config.alert_fade_ms }
    }

    /// `(index, delay_ms)` for every alert that dismisses itself.
    #[must_use]
    pub fn auto_dismiss_schedule(&self) -> Vec<(usize, u32)> {
        self.alerts
            .iter()
            .enumerate()
            .filter(|(_, alert)| alert.spec.auto_dismiss && alert.phase == AlertPhase::Visible)
            .map(|(index, _)| (index, self.auto_dismiss_ms))
            .collect()
    }

    /// Start fading alert `index`.
    ///
    /// Returns the delay after which [`AlertController::finish`] should run,
    /// or `None` if the alert is unknown or already on its way out.
    pub fn dismiss<F: Surface>(&mut self, index: usize, surface: &mut F) -> Option<u32> {
        let alert = self.alerts.get_mut(index)?;
        if alert.phase != AlertPhase::Visible {
            return None;
        }
        alert.phase = AlertPhase::Fading;
        surface.apply_classes(Target::Alert(index), &ClassPatch::new().with(SHOW_CLASS, false));
        log::debug!("dismissing alert {index}");
        Some(self.fade_ms)
    }

    /// Detach a fading alert. Returns whether anything was removed.
    pub fn finish<F: Surface>(&mut self, index: usize, surface: &mut F) -> bool {
        let Some(alert) = self.alerts.get_mut(index) else {
            return false;
        };
        if alert.phase != AlertPhase::Fading {
            return false;
        }
        alert.phase = AlertPhase::Removed;
        surface.detach(Target::Alert(index));
        true
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Option<AlertPhase> {
        self.alerts.get(index).map(|alert| alert.phase)
    }

    /// Indices of alerts not yet dismissed.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.alerts
            .iter()
            .enumerate()
            .filter_map(|(index, alert)| (alert.phase == AlertPhase::Visible).then_some(index))
            .collect()
    }
}
