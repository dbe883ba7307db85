//! Rendering adapter between the controllers and the page.
//!
//! Controllers never touch the DOM. They describe the classes an element
//! should carry as a [`ClassPatch`] and hand it to a [`Surface`] together
//! with a [`Target`]. The browser implementation lives in the `client` crate;
//! [`MemorySurface`] is the in-memory implementation used by tests and by
//! hosts that only want the resulting state.

use std::collections::{BTreeSet, HashMap};

use crate::theme::Theme;

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

/// An element the controllers can restyle.
///
/// Indexed variants refer to the n-th element of that kind in document order,
/// matching the order of the corresponding list in
/// [`PageInventory`](crate::chrome::PageInventory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// The `.sidebar` container.
    Sidebar,
    /// The `.main-content` container.
    MainContent,
    /// A `.theme-option-button`.
    ThemeButton(usize),
    /// A `.submenu` container inside a `.has-submenu` item.
    Submenu(usize),
    /// The `.arrow .fas` icon inside a submenu parent's anchor.
    SubmenuArrow(usize),
    /// A `.alert` element.
    Alert(usize),
}

/// Ordered set of class toggles applied to one element.
///
/// Each entry forces a class on or off; classes not mentioned are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatch {
    entries: Vec<(&'static str, bool)>,
}

impl ClassPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ClassPatch::set`].
    #[must_use]
    pub fn with(mut self, class: &'static str, on: bool) -> Self {
        self.set(class, on);
        self
    }

    /// Force `class` on or off, replacing any earlier entry for it.
    pub fn set(&mut self, class: &'static str, on: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == class) {
            entry.1 = on;
        } else {
            self.entries.push((class, on));
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[(&'static str, bool)] {
        &self.entries
    }

    /// Whether the patch turns `class` on, off, or leaves it alone (`None`).
    #[must_use]
    pub fn state_of(&self, class: &str) -> Option<bool> {
        self.entries.iter().find(|(name, _)| *name == class).map(|(_, on)| *on)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sink for every visual side effect the controllers produce.
pub trait Surface {
    /// Force each class in `patch` on or off on `target`.
    fn apply_classes(&mut self, target: Target, patch: &ClassPatch);

    /// Write the theme into the root `data-bs-theme` and `data-theme` attributes.
    fn set_theme(&mut self, theme: Theme);

    /// Sync the checked state of the theme switch.
    fn set_toggle_checked(&mut self, checked: bool);

    /// Remove `target` from the document.
    fn detach(&mut self, target: Target);
}

/// In-memory [`Surface`] that records the resulting page state.
#[derive(Debug, Default)]
pub struct MemorySurface {
    classes: HashMap<Target, BTreeSet<String>>,
    theme: Option<Theme>,
    toggle_checked: Option<bool>,
    detached: BTreeSet<Target>,
    patch_count: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `target` classes it carries before any controller runs, as if
    /// they had been rendered by the server.
    pub fn seed(&mut self, target: Target, classes: &[&str]) {
        let set = self.classes.entry(target).or_default();
        set.extend(classes.iter().map(|c| (*c).to_owned()));
    }

    #[must_use]
    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.classes.get(&target).is_some_and(|set| set.contains(class))
    }

    /// Classes currently on `target`, sorted.
    #[must_use]
    pub fn classes(&self, target: Target) -> Vec<&str> {
        self.classes
            .get(&target)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    #[must_use]
    pub fn toggle_checked(&self) -> Option<bool> {
        self.toggle_checked
    }

    #[must_use]
    pub fn is_detached(&self, target: Target) -> bool {
        self.detached.contains(&target)
    }

    /// Number of `apply_classes` calls received.
    #[must_use]
    pub fn patch_count(&self) -> usize {
        self.patch_count
    }
}

impl Surface for MemorySurface {
    fn apply_classes(&mut self, target: Target, patch: &ClassPatch) {
        self.patch_count += 1;
        let set = self.classes.entry(target).or_default();
        for &(class, on) in patch.entries() {
            if on {
                set.insert(class.to_owned());
            } else {
                set.remove(class);
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    fn set_toggle_checked(&mut self, checked: bool) {
        self.toggle_checked = Some(checked);
    }

    fn detach(&mut self, target: Target) {
        self.detached.insert(target);
    }
}
