use super::layout::{
    body_area, domain_entries, filter_triggers, header_boxes, section_entries,
};
use super::overlay::rect_contains;
use super::{AppCommand, AppModel, HighlightMove, MenuItem};
use crate::domain::MenuEntry;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

pub(super) fn update_on_mouse(model: AppModel, mouse: MouseEvent) -> (AppModel, AppCommand) {
    let mut model = model;
    if model.terminal_size.0 == 0 || model.terminal_size.1 == 0 {
        return (model, AppCommand::None);
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => apply_scroll(&mut model, HighlightMove::Up),
        MouseEventKind::ScrollDown => apply_scroll(&mut model, HighlightMove::Down),
        MouseEventKind::Down(MouseButton::Left) => {
            apply_left_click(&mut model, mouse.column, mouse.row);
        }
        _ => {}
    }

    (model, AppCommand::None)
}

fn apply_scroll(model: &mut AppModel, direction: HighlightMove) {
    let Some(id) = model.filter_bar.open_ids().last().copied() else {
        return;
    };
    let descriptors = model.descriptors();
    if let Some(descriptor) = descriptors.get(id) {
        model.filter_bar.move_highlight(id, descriptor, direction);
    }
}

fn apply_left_click(model: &mut AppModel, col: u16, row: u16) {
    if model.help_open {
        model.help_open = false;
        return;
    }

    let descriptors = model.descriptors();
    let body = body_area(model.terminal_size);

    // Options first: the overlay sits above everything else.
    for id in model.filter_bar.open_ids().into_iter().rev() {
        let Some(descriptor) = descriptors.get(id) else {
            continue;
        };
        let button = model
            .filter_bar
            .entry_at(id, descriptor, body, col, row)
            .and_then(|index| descriptor.items.get(index))
            .and_then(MenuEntry::as_button);
        if let Some(button) = button {
            model.select_button(id, button);
            return;
        }
    }

    // Borders and separators belong to the menu; the view underneath never sees them.
    let on_menu = model.filter_bar.open_ids().into_iter().any(|id| {
        model
            .filter_bar
            .item(id)
            .and_then(MenuItem::open_state)
            .is_some_and(|open| rect_contains(open.visible_rect(body), col, row))
    });
    if on_menu {
        return;
    }

    model
        .filter_bar
        .dismiss_outside(col, row, &mut model.overlay);

    let triggers = filter_triggers(model.terminal_size, &descriptors);
    if let Some(id) = triggers
        .iter()
        .position(|trigger| trigger.is_some_and(|rect| rect_contains(rect, col, row)))
    {
        model.toggle_menu(id, &descriptors);
        return;
    }

    if let Some(route) = hit_test_header(model, col, row) {
        model.navigate(route);
    }
}

fn hit_test_header(model: &AppModel, col: u16, row: u16) -> Option<crate::domain::Route> {
    let width = model.terminal_size.0;
    let entries = match row {
        0 => section_entries(),
        1 => domain_entries(&model.domains),
        _ => return None,
    };
    let boxes = header_boxes(row, width, &entries);
    boxes
        .iter()
        .position(|rect| rect.is_some_and(|rect| rect_contains(rect, col, row)))
        .and_then(|index| entries.get(index))
        .map(|entry| entry.route.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::domain::{Domain, FilterChange, Range, Route, RouteKey, SizesType, Sorting};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    fn tab() -> KeyEvent {
        KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn pages_model() -> AppModel {
        AppModel::new(Route::Insight(RouteKey::Pages), Vec::new())
            .with_terminal_size(100, 30)
    }

    fn trigger(model: &AppModel, id: usize) -> Rect {
        let triggers = filter_triggers(model.terminal_size, &model.descriptors());
        match triggers.get(id).copied().flatten() {
            Some(rect) => rect,
            None => panic!("trigger {id} should be visible"),
        }
    }

    fn open_menu(model: &AppModel, id: usize) -> crate::app::OpenMenu {
        match model.filter_bar.item(id).and_then(MenuItem::open_state) {
            Some(open) => *open,
            None => panic!("menu {id} should be open"),
        }
    }

    #[test]
    fn clicking_a_trigger_toggles_its_menu() {
        let model = pages_model();
        let rect = trigger(&model, 0);

        let (model, cmd) = crate::app::update(model, click(rect.x, rect.y));
        assert_eq!(cmd, AppCommand::None);
        assert_eq!(model.filter_bar.open_ids(), vec![0]);

        let (model, _) = crate::app::update(model, click(rect.x + 1, rect.y));
        assert!(!model.filter_bar.any_open());
        assert_eq!(model.overlay.listener_count(), 0);
    }

    #[test]
    fn clicking_an_option_invokes_it_once_and_closes() {
        let model = pages_model();
        let rect = trigger(&model, 1);
        let (model, _) = crate::app::update(model, click(rect.x, rect.y));
        let open = open_menu(&model, 1);

        // Range items: 24 hours, 7 days, 30 days, 6 months
        let row = u16::try_from(open.item_row(2)).unwrap_or(0);
        let col = u16::try_from(open.origin.0 + 2).unwrap_or(0);
        let (model, _) = crate::app::update(model, click(col, row));

        assert_eq!(model.filters.state.range, Range::Last30Days);
        assert_eq!(model.filters.state.sorting, Sorting::Top);
        assert!(!model.filter_bar.any_open());
        assert_eq!(model.overlay.listener_count(), 0);
    }

    #[test]
    fn outside_click_closes_without_selecting() {
        let model = pages_model();
        let rect = trigger(&model, 0);
        let (model, _) = crate::app::update(model, click(rect.x, rect.y));
        let before = model.filters;

        let (model, _) = crate::app::update(model, click(2, 10));
        assert!(!model.filter_bar.any_open());
        assert_eq!(model.filters, before);
    }

    #[test]
    fn clicking_another_trigger_swaps_menus() {
        let model = pages_model();
        let first = trigger(&model, 0);
        let second = trigger(&model, 1);
        let (model, _) = crate::app::update(model, click(first.x, first.y));
        let (model, _) = crate::app::update(model, click(second.x, second.y));
        assert_eq!(model.filter_bar.open_ids(), vec![1]);
        assert_eq!(model.overlay.listener_count(), 1);
    }

    #[test]
    fn choosing_new_sorting_hides_the_range_trigger() {
        let model = pages_model();
        let rect = trigger(&model, 0);
        let (model, _) = crate::app::update(model, click(rect.x, rect.y));
        let open = open_menu(&model, 0);
        let row = u16::try_from(open.item_row(1)).unwrap_or(0);
        let col = u16::try_from(open.origin.0 + 2).unwrap_or(0);
        let (model, _) = crate::app::update(model, click(col, row));

        assert_eq!(model.filters.state.sorting, Sorting::New);
        let triggers = filter_triggers(model.terminal_size, &model.descriptors());
        assert_eq!(triggers[1], None);
    }

    #[test]
    fn header_click_navigates() {
        let model = AppModel::new(
            Route::Overview,
            vec![Domain {
                id: "abc".to_string(),
                title: "example.com".to_string(),
            }],
        )
        .with_terminal_size(200, 30);

        let (model, _) = crate::app::update(model, click(2, 1));
        assert_eq!(model.route, Route::domain("abc"));

        // " Overview [o] " is 14 wide starting at column 1; " Views [v] " follows.
        let (model, _) = crate::app::update(model, click(16, 0));
        assert_eq!(model.route, Route::Insight(RouteKey::Views));
    }

    #[test]
    fn click_on_menu_chrome_over_the_header_is_swallowed() {
        let model = AppModel::new(
            Route::Insight(RouteKey::Sizes),
            vec![Domain {
                id: "abc".to_string(),
                title: "example.com".to_string(),
            }],
        )
        .with_terminal_size(40, 12);
        let (model, _) = crate::app::update(model, AppEvent::Key(tab()));
        let (model, _) = crate::app::update(model, AppEvent::Key(tab()));
        let open = open_menu(&model, 1);
        // The sizes menu is tall enough to reach the domain row.
        assert!(open.origin.1 < 2, "origin {:?}", open.origin);

        let border_row = u16::try_from(open.origin.1.max(0)).unwrap_or(0);
        let (model, _) = crate::app::update(model, click(5, border_row));
        assert_eq!(model.route, Route::Insight(RouteKey::Sizes));
        assert_eq!(model.filter_bar.open_ids(), vec![1]);

        // The separator row is inert too.
        let separator_row = u16::try_from(open.item_row(3)).unwrap_or(0);
        let (model, _) = crate::app::update(model, click(5, separator_row));
        assert_eq!(model.filters.state.sizes_type, SizesType::BrowserResolution);
        assert_eq!(model.filter_bar.open_ids(), vec![1]);
    }

    #[test]
    fn scroll_moves_the_highlight() {
        let model = pages_model();
        let rect = trigger(&model, 0);
        let (model, _) = crate::app::update(model, click(rect.x, rect.y));
        let scroll = AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        let (model, _) = crate::app::update(model, scroll);
        let descriptors = model.descriptors();
        assert_eq!(
            model
                .filter_bar
                .highlighted_button(0, &descriptors[0])
                .map(|button| button.on_click),
            Some(FilterChange::Sorting(Sorting::New))
        );
    }
}
