use super::menu::MenuId;
use ratatui::layout::Rect;
use std::collections::BTreeMap;

/// Area a floating menu owns for outside-click purposes: its trigger plus the
/// visible part of the menu itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DismissRegion {
    pub trigger: Rect,
    pub menu: Rect,
}

impl DismissRegion {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        rect_contains(self.trigger, col, row) || rect_contains(self.menu, col, row)
    }
}

/// The overlay surface's dismissal listeners, one per open menu.
#[derive(Clone, Debug, Default)]
pub struct OverlayLayer {
    listeners: BTreeMap<MenuId, DismissRegion>,
}

impl OverlayLayer {
    /// Registers (or replaces) the listener for `id`.
    pub fn register(&mut self, id: MenuId, region: DismissRegion) {
        self.listeners.insert(id, region);
    }

    pub fn release(&mut self, id: MenuId) {
        self.listeners.remove(&id);
    }

    pub fn release_all(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[cfg(test)]
    pub fn is_registered(&self, id: MenuId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Menus whose own region does not contain the click. Each listener is
    /// evaluated independently of the others.
    pub fn outside(&self, col: u16, row: u16) -> Vec<MenuId> {
        self.listeners
            .iter()
            .filter(|(_, region)| !region.contains(col, row))
            .map(|(id, _)| *id)
            .collect()
    }
}

pub(crate) fn rect_contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
