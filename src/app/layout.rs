use super::hotkeys::hotkey_for_route;
use super::menu::MenuPlacement;
use crate::domain::{
    Domain, INSIGHT_ROUTE_KEYS, MenuDescriptor, MenuEntry, Route, domain_hotkey_hint,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Section row plus domain row.
pub const HEADER_ROWS: u16 = 2;
const MIN_MENU_INNER_WIDTH: usize = 14;
const TRIGGER_GAP: u16 = 1;

pub fn body_area(terminal_size: (u16, u16)) -> Rect {
    Rect::new(0, 0, terminal_size.0, terminal_size.1)
}

pub fn content_area(terminal_size: (u16, u16)) -> Rect {
    let (width, height) = terminal_size;
    if height <= HEADER_ROWS + 1 {
        return Rect::new(0, 0, width, height);
    }
    Rect::new(0, HEADER_ROWS, width, height - HEADER_ROWS - 1)
}

/// Bottom row of the screen.
pub fn filter_bar_area(terminal_size: (u16, u16)) -> Option<Rect> {
    let (width, height) = terminal_size;
    if width == 0 || height <= HEADER_ROWS + 1 {
        return None;
    }
    Some(Rect::new(0, height - 1, width, 1))
}

pub fn trigger_label(descriptor: &MenuDescriptor) -> String {
    format!(" {} ▾ ", descriptor.label)
}

/// Trigger boxes aligned with `descriptors`; hidden menus get `None`.
pub fn filter_triggers(
    terminal_size: (u16, u16),
    descriptors: &[MenuDescriptor],
) -> Vec<Option<Rect>> {
    let Some(bar) = filter_bar_area(terminal_size) else {
        return vec![None; descriptors.len()];
    };

    let widths: Vec<Option<u16>> = descriptors
        .iter()
        .map(|descriptor| {
            descriptor.visible.then(|| {
                usize_to_u16(UnicodeWidthStr::width(trigger_label(descriptor).as_str()))
            })
        })
        .collect();
    let visible = widths.iter().flatten().count();
    let total = widths
        .iter()
        .flatten()
        .fold(0u16, |acc, width| acc.saturating_add(*width))
        .saturating_add(TRIGGER_GAP.saturating_mul(usize_to_u16(visible.saturating_sub(1))));

    let mut x = bar.x.saturating_add(bar.width.saturating_sub(total) / 2);
    let right = bar.x.saturating_add(bar.width);
    widths
        .into_iter()
        .map(|width| {
            let width = width?;
            if x >= right {
                return None;
            }
            let rect = Rect::new(x, bar.y, width.min(right - x), 1);
            x = x.saturating_add(width).saturating_add(TRIGGER_GAP);
            Some(rect)
        })
        .collect()
}

pub fn menu_entry_text(entry: &MenuEntry) -> String {
    match entry {
        MenuEntry::Button(button) => match button.description {
            Some(description) => format!("{}  {description}", button.label),
            None => button.label.to_string(),
        },
        MenuEntry::Separator => String::new(),
    }
}

/// Outer size of a floating menu: widest entry plus border and padding.
pub fn menu_size(descriptor: &MenuDescriptor) -> (u16, u16) {
    let inner = descriptor
        .items
        .iter()
        .map(|entry| UnicodeWidthStr::width(menu_entry_text(entry).as_str()))
        .max()
        .unwrap_or(0)
        .max(MIN_MENU_INNER_WIDTH);
    let width = usize_to_u16(inner.saturating_add(4));
    let height = usize_to_u16(descriptor.items.len().saturating_add(2));
    (width, height)
}

pub fn menu_placement(
    terminal_size: (u16, u16),
    trigger: Rect,
    descriptor: &MenuDescriptor,
) -> MenuPlacement {
    MenuPlacement {
        trigger,
        body: body_area(terminal_size),
        size: menu_size(descriptor),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeaderEntry {
    pub label: String,
    pub hint: Option<char>,
    pub route: Route,
}

impl HeaderEntry {
    pub fn text(&self) -> String {
        match self.hint {
            Some(hint) => format!(" {} [{hint}] ", self.label),
            None => format!(" {} ", self.label),
        }
    }
}

pub fn section_entries() -> Vec<HeaderEntry> {
    let mut routes = vec![Route::Overview];
    routes.extend(INSIGHT_ROUTE_KEYS.iter().copied().map(Route::Insight));
    routes.push(Route::Settings);
    routes
        .into_iter()
        .map(|route| HeaderEntry {
            label: route.key().label().to_string(),
            hint: hotkey_for_route(&route),
            route,
        })
        .collect()
}

pub fn domain_entries(domains: &[Domain]) -> Vec<HeaderEntry> {
    domains
        .iter()
        .enumerate()
        .map(|(index, domain)| HeaderEntry {
            label: domain.title.clone(),
            hint: domain_hotkey_hint(index),
            route: Route::domain(&domain.id),
        })
        .collect()
}

/// Click boxes for header entries laid out left to right on `row`.
pub fn header_boxes(row: u16, width: u16, entries: &[HeaderEntry]) -> Vec<Option<Rect>> {
    let mut x = 1u16;
    entries
        .iter()
        .map(|entry| {
            let entry_width = usize_to_u16(UnicodeWidthStr::width(entry.text().as_str()));
            if x >= width {
                return None;
            }
            let rect = Rect::new(x, row, entry_width.min(width - x), 1);
            x = x.saturating_add(entry_width);
            Some(rect)
        })
        .collect()
}

pub fn usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterState, RouteKey, Sorting, resolve};

    #[test]
    fn triggers_are_centered_on_the_bottom_row() {
        let descriptors = resolve(RouteKey::Pages, &FilterState::default());
        let triggers = filter_triggers((80, 24), &descriptors);
        // " Top ▾ " = 7, " 7 days ▾ " = 10, gap 1
        assert_eq!(
            triggers,
            vec![Some(Rect::new(31, 23, 7, 1)), Some(Rect::new(39, 23, 10, 1))]
        );
    }

    #[test]
    fn hidden_menu_has_no_trigger() {
        let state = FilterState {
            sorting: Sorting::Recent,
            ..FilterState::default()
        };
        let descriptors = resolve(RouteKey::Pages, &state);
        let triggers = filter_triggers((80, 24), &descriptors);
        assert!(triggers[0].is_some());
        assert_eq!(triggers[1], None);
    }

    #[test]
    fn menu_size_counts_separators_as_rows() {
        let descriptors = resolve(RouteKey::Sizes, &FilterState::default());
        let (_, height) = menu_size(&descriptors[1]);
        assert_eq!(height, 9);
    }

    #[test]
    fn tiny_terminal_has_no_filter_bar() {
        assert_eq!(filter_bar_area((80, 3)), None);
        let descriptors = resolve(RouteKey::Pages, &FilterState::default());
        assert_eq!(filter_triggers((80, 3), &descriptors), vec![None, None]);
    }

    #[test]
    fn header_lists_hotkeys_for_sections_and_first_ten_domains() {
        let sections = section_entries();
        assert_eq!(
            sections.first().map(HeaderEntry::text),
            Some(" Overview [o] ".to_string())
        );
        assert_eq!(sections.len(), 12);

        let domains: Vec<Domain> = (0..12)
            .map(|index| Domain {
                id: format!("{index}"),
                title: format!("site{index}"),
            })
            .collect();
        let entries = domain_entries(&domains);
        assert_eq!(entries[9].hint, Some('9'));
        assert_eq!(entries[10].hint, None);
    }
}
