use super::overlay::{DismissRegion, OverlayLayer};
use crate::domain::{
    ButtonSpec, FilterSetters, MenuDescriptor, MenuEntry, Measurement, Point, PositionEngine,
    RouteKey, Size, TargetBox, route_slots,
};
use ratatui::layout::Rect;

/// Position of a menu within its route's filter bar.
pub type MenuId = usize;

/// Where a menu opens: its trigger, the body it must stay inside, and its own size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MenuPlacement {
    pub trigger: Rect,
    pub body: Rect,
    pub size: (u16, u16),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OpenMenu {
    /// Top-left corner in cells; may lie above the body.
    pub origin: (i32, i32),
    pub size: (u16, u16),
    pub trigger: Rect,
    /// Index into the descriptor's items; always a button.
    pub highlighted: Option<usize>,
}

impl OpenMenu {
    /// The part of the menu that lands inside `body`.
    pub fn visible_rect(&self, body: Rect) -> Rect {
        let (x, y) = self.origin;
        let left = x.max(i32::from(body.x));
        let top = y.max(i32::from(body.y));
        let right = (x + i32::from(self.size.0)).min(i32::from(body.x) + i32::from(body.width));
        let bottom =
            (y + i32::from(self.size.1)).min(i32::from(body.y) + i32::from(body.height));
        if right <= left || bottom <= top {
            return Rect::new(body.x, body.y, 0, 0);
        }
        Rect::new(
            clamp_u16(left),
            clamp_u16(top),
            clamp_u16(right - left),
            clamp_u16(bottom - top),
        )
    }

    /// Row of item `index`, counting the top border.
    pub fn item_row(&self, index: usize) -> i32 {
        self.origin.1 + 1 + i32::try_from(index).unwrap_or(i32::MAX - 1)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MenuItem {
    #[default]
    Closed,
    Open(OpenMenu),
}

impl MenuItem {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn open_state(&self) -> Option<&OpenMenu> {
        match self {
            Self::Open(open) => Some(open),
            Self::Closed => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HighlightMove {
    Up,
    Down,
}

/// Open/closed state for every menu of the current route's filter bar.
#[derive(Clone, Debug, Default)]
pub struct FilterBar {
    route: Option<RouteKey>,
    items: Vec<MenuItem>,
}

impl FilterBar {
    /// Remounts the bar when the section changes; keeps menu state otherwise.
    pub fn sync(&mut self, key: RouteKey, overlay: &mut OverlayLayer) {
        if self.route == Some(key) {
            return;
        }
        self.close_all(overlay);
        self.route = Some(key);
        self.items = vec![MenuItem::Closed; route_slots(key).len()];
    }

    #[cfg(test)]
    pub fn route(&self) -> Option<RouteKey> {
        self.route
    }

    pub fn item(&self, id: MenuId) -> Option<&MenuItem> {
        self.items.get(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn open_ids(&self) -> Vec<MenuId> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_open())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn any_open(&self) -> bool {
        self.items.iter().any(MenuItem::is_open)
    }

    /// Trigger click: opens a closed menu, closes an open one. Hidden menus ignore it.
    pub fn toggle(
        &mut self,
        id: MenuId,
        descriptor: &MenuDescriptor,
        placement: MenuPlacement,
        engine: &PositionEngine,
        overlay: &mut OverlayLayer,
    ) {
        if !descriptor.visible {
            return;
        }
        match self.items.get(id) {
            Some(MenuItem::Open(_)) => self.close(id, overlay),
            Some(MenuItem::Closed) => self.open(id, descriptor, placement, engine, overlay),
            None => {}
        }
    }

    pub fn open(
        &mut self,
        id: MenuId,
        descriptor: &MenuDescriptor,
        placement: MenuPlacement,
        engine: &PositionEngine,
        overlay: &mut OverlayLayer,
    ) {
        if !descriptor.visible || id >= self.items.len() {
            return;
        }

        let anchor = engine.compute(&measure(placement));
        let open = OpenMenu {
            origin: (
                i32::from(placement.body.x) + anchor.x.floor() as i32,
                i32::from(placement.body.y) + anchor.y.floor() as i32,
            ),
            size: placement.size,
            trigger: placement.trigger,
            highlighted: initial_highlight(descriptor),
        };
        overlay.register(
            id,
            DismissRegion {
                trigger: placement.trigger,
                menu: open.visible_rect(placement.body),
            },
        );
        self.items[id] = MenuItem::Open(open);
        tracing::debug!(
            menu = id,
            label = descriptor.label,
            x = open.origin.0,
            y = open.origin.1,
            listeners = overlay.listener_count(),
            "menu opened"
        );
    }

    pub fn close(&mut self, id: MenuId, overlay: &mut OverlayLayer) {
        if let Some(item) = self.items.get_mut(id) {
            if item.is_open() {
                tracing::debug!(menu = id, "menu closed");
            }
            *item = MenuItem::Closed;
        }
        overlay.release(id);
    }

    pub fn close_all(&mut self, overlay: &mut OverlayLayer) {
        for item in &mut self.items {
            *item = MenuItem::Closed;
        }
        overlay.release_all();
    }

    /// Invokes the option's setter, then closes the menu.
    pub fn select<S: FilterSetters + ?Sized>(
        &mut self,
        id: MenuId,
        button: &ButtonSpec,
        setters: &mut S,
        overlay: &mut OverlayLayer,
    ) {
        button.on_click.dispatch(setters);
        self.close(id, overlay);
    }

    /// Closes every open menu the click landed outside of.
    pub fn dismiss_outside(
        &mut self,
        col: u16,
        row: u16,
        overlay: &mut OverlayLayer,
    ) -> Vec<MenuId> {
        let outside = overlay.outside(col, row);
        for id in &outside {
            self.close(*id, overlay);
        }
        outside
    }

    /// Drops open state for menus whose descriptor is no longer visible.
    pub fn close_hidden(&mut self, descriptors: &[MenuDescriptor], overlay: &mut OverlayLayer) {
        for (id, descriptor) in descriptors.iter().enumerate() {
            if !descriptor.visible && self.items.get(id).is_some_and(MenuItem::is_open) {
                self.close(id, overlay);
            }
        }
    }

    pub fn move_highlight(
        &mut self,
        id: MenuId,
        descriptor: &MenuDescriptor,
        direction: HighlightMove,
    ) {
        let Some(MenuItem::Open(open)) = self.items.get_mut(id) else {
            return;
        };
        let buttons: Vec<usize> = button_indices(descriptor).collect();
        if buttons.is_empty() {
            open.highlighted = None;
            return;
        }
        let current = open
            .highlighted
            .and_then(|index| buttons.iter().position(|candidate| *candidate == index));
        let next = match (current, direction) {
            (None, _) => 0,
            (Some(pos), HighlightMove::Up) => pos.saturating_sub(1),
            (Some(pos), HighlightMove::Down) => (pos + 1).min(buttons.len() - 1),
        };
        open.highlighted = Some(buttons[next]);
    }

    pub fn highlighted_button<'a>(
        &self,
        id: MenuId,
        descriptor: &'a MenuDescriptor,
    ) -> Option<&'a ButtonSpec> {
        let open = self.items.get(id)?.open_state()?;
        descriptor.items.get(open.highlighted?)?.as_button()
    }

    /// Index of the button under a click inside an open menu, if any.
    pub fn entry_at(
        &self,
        id: MenuId,
        descriptor: &MenuDescriptor,
        body: Rect,
        col: u16,
        row: u16,
    ) -> Option<usize> {
        let open = self.items.get(id)?.open_state()?;
        let visible = open.visible_rect(body);
        if !super::overlay::rect_contains(visible, col, row) {
            return None;
        }
        let left = open.origin.0 + 1;
        let right = open.origin.0 + i32::from(open.size.0) - 1;
        if i32::from(col) < left || i32::from(col) >= right {
            return None;
        }
        let index = usize::try_from(i32::from(row) - open.item_row(0)).ok()?;
        descriptor.items.get(index)?.as_button().map(|_| index)
    }
}

fn measure(placement: MenuPlacement) -> Measurement {
    let MenuPlacement {
        trigger,
        body,
        size,
    } = placement;
    Measurement {
        body: Size {
            width: f64::from(body.width),
            height: f64::from(body.height),
        },
        target: TargetBox {
            width: f64::from(trigger.width),
            height: f64::from(trigger.height),
            relative: Point {
                x: f64::from(trigger.x) - f64::from(body.x),
                y: f64::from(trigger.y) - f64::from(body.y),
            },
        },
        element: Size {
            width: f64::from(size.0),
            height: f64::from(size.1),
        },
    }
}

fn button_indices(descriptor: &MenuDescriptor) -> impl Iterator<Item = usize> + '_ {
    descriptor
        .items
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches!(entry, MenuEntry::Button(_)))
        .map(|(index, _)| index)
}

fn initial_highlight(descriptor: &MenuDescriptor) -> Option<usize> {
    descriptor
        .items
        .iter()
        .position(|entry| entry.as_button().is_some_and(|button| button.active))
        .or_else(|| button_indices(descriptor).next())
}

fn clamp_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}
