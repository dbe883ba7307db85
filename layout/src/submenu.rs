//! Nested navigation disclosure.
//!
//! Each `.has-submenu` item toggles its own `.submenu` independently of its
//! siblings. The only cross-group rule is [`SubmenuController::close_all`],
//! which runs when the pointer leaves the sidebar.

use serde::{Deserialize, Serialize};

use crate::surface::{ClassPatch, Surface, Target};

#[cfg(test)]
#[path = "submenu_test.rs"]
mod submenu_test;

/// Class marking an expanded submenu container.
pub const OPEN_CLASS: &str = "open";
/// Arrow icon shown while the group is open.
pub const ARROW_OPEN_CLASS: &str = "fa-chevron-down";
/// Arrow icon shown while the group is closed.
pub const ARROW_CLOSED_CLASS: &str = "fa-chevron-right";

/// Server-rendered shape of one submenu parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuSpec {
    /// The item contains a `.submenu` container.
    pub has_container: bool,
    /// The container was rendered with the open class.
    pub initially_open: bool,
    /// The anchor contains an `.arrow .fas` icon.
    pub has_arrow: bool,
}

#[derive(Debug, Clone, Copy)]
struct Group {
    spec: SubmenuSpec,
    open: bool,
}

/// Open/closed state of every submenu group, in document order.
#[derive(Debug, Clone, Default)]
pub struct SubmenuController {
    groups: Vec<Group>,
}

impl SubmenuController {
    /// Track `specs`, trusting the server-rendered open state.
    #[must_use]
    pub fn new(specs: &[SubmenuSpec]) -> Self {
        let groups = specs
            .iter()
            .map(|spec| Group { spec: *spec, open: spec.has_container && spec.initially_open })
            .collect();
        Self { groups }
    }

    /// Flip group `index` and return its new state.
    ///
    /// Returns `None` when the index is unknown or the item has no container.
    pub fn toggle<F: Surface>(&mut self, index: usize, surface: &mut F) -> Option<bool> {
        let group = self.groups.get_mut(index)?;
        if !group.spec.has_container {
            return None;
        }
        group.open = !group.open;
        let group = *group;
        render(index, group, surface);
        Some(group.open)
    }

    /// Close every open group and reset its arrow. Returns how many closed.
    pub fn close_all<F: Surface>(&mut self, surface: &mut F) -> usize {
        let mut closed = 0;
        for (index, group) in self.groups.iter_mut().enumerate() {
            if group.open {
                group.open = false;
                render(index, *group, surface);
                closed += 1;
            }
        }
        if closed > 0 {
            log::debug!("collapsed {closed} submenu(s)");
        }
        closed
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.groups.get(index).is_some_and(|group| group.open)
    }

    /// Indices of open groups in document order.
    #[must_use]
    pub fn open_indices(&self) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(index, group)| group.open.then_some(index))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Arrow icon patch for a group in the given state.
#[must_use]
pub fn arrow_patch(open: bool) -> ClassPatch {
    ClassPatch::new().with(ARROW_OPEN_CLASS, open).with(ARROW_CLOSED_CLASS, !open)
}

fn render<F: Surface>(index: usize, group: Group, surface: &mut F) {
    surface.apply_classes(Target::Submenu(index), &ClassPatch::new().with(OPEN_CLASS, group.open));
    if group.spec.has_arrow {
        surface.apply_classes(Target::SubmenuArrow(index), &arrow_patch(group.open));
    }
}
