mod theme;

use crate::app::{
    AppModel, HeaderEntry, MenuItem, OpenMenu, body_area, content_area, domain_entries,
    filter_bar_area, filter_triggers, menu_entry_text, section_entries, trigger_label,
};
use crate::domain::{
    BrowsersType, CompositeDimension, DevicesType, FilterState, MenuDescriptor, MenuEntry,
    MenuSlot, Route, SystemsType,
};
use ratatui::prelude::*;
use ratatui::widgets::*;

pub fn render(frame: &mut Frame, model: &AppModel) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let size = (area.width, area.height);
    let descriptors = model.descriptors();

    frame.render_widget(Block::default().style(Style::default().bg(theme::BG)), area);
    render_header(frame, area, model);
    render_content(frame, content_area(size), model, &descriptors);
    render_filter_bar(frame, size, model, &descriptors);

    // Floating menus go last so nothing paints over them.
    render_open_menus(frame, size, model, &descriptors);

    if model.help_open {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, model: &AppModel) {
    let sections_row = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(header_line(&section_entries(), &model.route))
            .style(Style::default().bg(theme::BAR_BG)),
        sections_row,
    );

    if area.height < 2 {
        return;
    }
    let domains_row = Rect::new(area.x, area.y.saturating_add(1), area.width, 1);
    let line = if model.domains.is_empty() {
        Line::from(Span::styled(
            " No domains configured",
            Style::default().fg(theme::DIM),
        ))
    } else {
        header_line(&domain_entries(&model.domains), &model.route)
    };
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::SURFACE)),
        domains_row,
    );
}

/// Entries start at column 1, matching the click boxes from the layout module.
fn header_line(entries: &[HeaderEntry], active: &Route) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for entry in entries {
        let is_active = &entry.route == active;
        let (label_style, hint_style) = if is_active {
            let style = Style::default()
                .fg(theme::BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD);
            (style, style)
        } else {
            (
                Style::default().fg(theme::FG),
                Style::default().fg(theme::DIM),
            )
        };
        spans.push(Span::styled(format!(" {}", entry.label), label_style));
        match entry.hint {
            Some(hint) => spans.push(Span::styled(format!(" [{hint}] "), hint_style)),
            None => spans.push(Span::styled(" ", label_style)),
        }
    }
    Line::from(spans)
}

fn render_content(
    frame: &mut Frame,
    area: Rect,
    model: &AppModel,
    descriptors: &[MenuDescriptor],
) {
    if area.height == 0 {
        return;
    }
    let area = inner_area(area);
    let muted = Style::default().fg(theme::MUTED);
    let dim = Style::default().fg(theme::DIM);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Route    ", muted),
            Span::styled(model.route.path(), Style::default().fg(theme::FG)),
        ]),
        Line::from(""),
    ];

    if descriptors.is_empty() {
        lines.push(Line::from(Span::styled("No filters for this section.", dim)));
    } else {
        lines.push(Line::from(Span::styled(
            "Filters",
            muted.add_modifier(Modifier::BOLD),
        )));
        for descriptor in descriptors {
            let value = if descriptor.visible {
                Span::styled(descriptor.label, Style::default().fg(theme::ACCENT))
            } else {
                Span::styled("hidden", dim)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", slot_title(descriptor.slot)), muted),
                value,
            ]));
            if let MenuSlot::SortingWithToggle(dimension) = descriptor.slot {
                let (title, value) = composite_detail(dimension, &model.filters.state);
                lines.push(Line::from(vec![
                    Span::styled(format!("  {title:<10}"), muted),
                    Span::styled(value, Style::default().fg(theme::FG)),
                ]));
            }
        }
    }

    if let Some(notice) = &model.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(theme::ERROR),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Keys: letters/digits navigate  Tab filters  ?=help  q=quit",
        dim,
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(section_title(model))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn section_title(model: &AppModel) -> String {
    match &model.route {
        Route::Domain { id } => model
            .domains
            .iter()
            .find(|domain| &domain.id == id)
            .map_or_else(|| format!("Domain {id}"), |domain| domain.title.clone()),
        route => route.key().label().to_string(),
    }
}

fn slot_title(slot: MenuSlot) -> &'static str {
    match slot {
        MenuSlot::Sorting | MenuSlot::SortingWithToggle(_) => "Sorting",
        MenuSlot::Range => "Range",
        MenuSlot::Interval => "Interval",
        MenuSlot::ViewsType => "Views",
        MenuSlot::ReferrersType => "Referrers",
        MenuSlot::SizesType => "Sizes",
    }
}

fn composite_detail(
    dimension: CompositeDimension,
    state: &FilterState,
) -> (&'static str, &'static str) {
    let shown = match dimension {
        CompositeDimension::Systems => state.systems_type == SystemsType::WithVersion,
        CompositeDimension::Devices => state.devices_type == DevicesType::WithModel,
        CompositeDimension::Browsers => state.browsers_type == BrowsersType::WithVersion,
    };
    let title = match dimension {
        CompositeDimension::Devices => "Models",
        CompositeDimension::Systems | CompositeDimension::Browsers => "Versions",
    };
    (title, if shown { "shown" } else { "hidden" })
}

fn render_filter_bar(
    frame: &mut Frame,
    size: (u16, u16),
    model: &AppModel,
    descriptors: &[MenuDescriptor],
) {
    let Some(bar) = filter_bar_area(size) else {
        return;
    };
    frame.render_widget(Block::default().style(Style::default().bg(theme::BAR_BG)), bar);

    let triggers = filter_triggers(size, descriptors);
    for (id, (descriptor, trigger)) in descriptors.iter().zip(&triggers).enumerate() {
        let Some(rect) = trigger else {
            continue;
        };
        let open = model.filter_bar.item(id).is_some_and(MenuItem::is_open);
        let style = if open {
            Style::default()
                .fg(theme::BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::FG).bg(theme::SURFACE)
        };
        frame.render_widget(Paragraph::new(trigger_label(descriptor)).style(style), *rect);
    }
}

fn render_open_menus(
    frame: &mut Frame,
    size: (u16, u16),
    model: &AppModel,
    descriptors: &[MenuDescriptor],
) {
    let body = body_area(size);
    for id in model.filter_bar.open_ids() {
        let (Some(descriptor), Some(open)) = (
            descriptors.get(id),
            model.filter_bar.item(id).and_then(MenuItem::open_state),
        ) else {
            continue;
        };
        render_menu(frame, body, descriptor, open);
    }
}

/// Draws the part of a menu that falls inside `body`; borders on clipped edges are dropped.
fn render_menu(frame: &mut Frame, body: Rect, descriptor: &MenuDescriptor, open: &OpenMenu) {
    let visible = open.visible_rect(body);
    if visible.width == 0 || visible.height == 0 {
        return;
    }
    frame.render_widget(Clear, visible);

    let top = open.origin.1;
    let bottom = top + i32::from(open.size.1) - 1;
    let left = open.origin.0;
    let right = left + i32::from(open.size.0) - 1;

    let mut borders = Borders::NONE;
    if top >= i32::from(visible.y) {
        borders |= Borders::TOP;
    }
    if bottom < i32::from(visible.bottom()) {
        borders |= Borders::BOTTOM;
    }
    if left >= i32::from(visible.x) {
        borders |= Borders::LEFT;
    }
    if right < i32::from(visible.right()) {
        borders |= Borders::RIGHT;
    }
    frame.render_widget(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().bg(theme::SURFACE)),
        visible,
    );

    let inner_left = (left + 1).max(i32::from(visible.x));
    let inner_right = right.min(i32::from(visible.right()));
    if inner_right <= inner_left {
        return;
    }
    let x = clamp_u16(inner_left);
    let width = clamp_u16(inner_right - inner_left);

    for (index, entry) in descriptor.items.iter().enumerate() {
        let row = open.item_row(index);
        if row <= top || row >= bottom {
            continue;
        }
        if row < i32::from(visible.y) || row >= i32::from(visible.bottom()) {
            continue;
        }
        let line_area = Rect::new(x, clamp_u16(row), width, 1);
        let highlighted = open.highlighted == Some(index);
        frame.render_widget(Paragraph::new(menu_line(entry, width, highlighted)), line_area);
    }
}

fn menu_line(entry: &MenuEntry, width: u16, highlighted: bool) -> Line<'static> {
    let button = match entry {
        MenuEntry::Separator => {
            return Line::from(Span::styled(
                "─".repeat(usize::from(width)),
                Style::default().fg(theme::BORDER),
            ));
        }
        MenuEntry::Button(button) => button,
    };

    let mut label_style = Style::default().fg(theme::FG);
    let mut description_style = Style::default().fg(theme::DIM);
    if button.active {
        label_style = label_style.fg(theme::ACCENT).add_modifier(Modifier::BOLD);
    }
    if highlighted {
        label_style = label_style.bg(theme::ACCENT_BG).add_modifier(Modifier::REVERSED);
        description_style = description_style
            .bg(theme::ACCENT_BG)
            .add_modifier(Modifier::REVERSED);
    }

    let text = menu_entry_text(entry);
    let label_len = button.label.len();
    let (label, description) = text.split_at(label_len.min(text.len()));
    Line::from(vec![
        Span::styled(format!(" {label}"), label_style),
        Span::styled(format!("{description} "), description_style),
    ])
}

fn clamp_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

fn inner_area(area: Rect) -> Rect {
    if area.width < 40 || area.height < 12 {
        return area;
    }
    area.inner(Margin {
        vertical: 1,
        horizontal: 2,
    })
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let text = vec![
        Line::from("Sections"),
        Line::from("  - o: overview    v: views    p: pages"),
        Line::from("  - r: referrers   d: durations   e: events"),
        Line::from("  - s: settings"),
        Line::from("  - 0-9: first ten domains"),
        Line::from("  - Click a header entry to open any section"),
        Line::from(""),
        Line::from("Filters"),
        Line::from("  - Tab: open the next filter menu"),
        Line::from("  - Up/Down: move the highlight"),
        Line::from("  - Enter or click: pick an option"),
        Line::from("  - Esc or click elsewhere: close"),
        Line::from(""),
        Line::from("Global"),
        Line::from("  - Ctrl+R: reload config"),
        Line::from("  - q, Ctrl+Q or Ctrl+C: quit"),
        Line::from("  - F1 or ?: toggle this help"),
    ];

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().bg(theme::SURFACE).fg(theme::FG))
            .padding(Padding::horizontal(1))
            .title("Help (F1 or ? to close)"),
    );
    frame.render_widget(paragraph, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
