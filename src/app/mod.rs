mod hotkeys;
mod layout;
mod menu;
mod mouse;
mod overlay;

use crate::domain::{
    BrowsersType, ButtonSpec, DevicesType, Domain, FilterSetters, FilterState, Interval,
    MenuDescriptor, PositionEngine, Range, ReferrersType, Route, SizesType, Sorting, SystemsType,
    ViewsType, resolve,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::sync::Arc;
use thiserror::Error;

pub use hotkeys::{HotkeyDispatcher, ROUTE_HOTKEYS, hotkey_for_route};
pub use layout::{
    HeaderEntry, body_area, content_area, domain_entries, filter_bar_area, filter_triggers,
    menu_entry_text, section_entries, trigger_label,
};
pub use menu::{FilterBar, HighlightMove, MenuId, MenuItem, OpenMenu};
pub use overlay::OverlayLayer;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ResolveConfigPath(#[from] crate::infra::ResolveConfigPathError),

    #[error(transparent)]
    LoadConfig(#[from] crate::infra::LoadConfigError),
}

/// Owner of the live filter snapshot. Every setter applies synchronously, so
/// the next `resolve` sees the new value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilterStore {
    pub state: FilterState,
}

impl FilterSetters for FilterStore {
    fn set_sorting(&mut self, value: Sorting) {
        tracing::debug!(value = value.as_str(), "set sorting filter");
        self.state.set_sorting(value);
    }

    fn set_range(&mut self, value: Range) {
        tracing::debug!(value = value.as_str(), "set range filter");
        self.state.set_range(value);
    }

    fn set_interval(&mut self, value: Interval) {
        tracing::debug!(value = value.as_str(), "set interval filter");
        self.state.set_interval(value);
    }

    fn set_views_type(&mut self, value: ViewsType) {
        tracing::debug!(value = value.as_str(), "set views type filter");
        self.state.set_views_type(value);
    }

    fn set_referrers_type(&mut self, value: ReferrersType) {
        tracing::debug!(value = value.as_str(), "set referrers type filter");
        self.state.set_referrers_type(value);
    }

    fn set_systems_type(&mut self, value: SystemsType) {
        tracing::debug!(value = value.as_str(), "set systems type filter");
        self.state.set_systems_type(value);
    }

    fn set_devices_type(&mut self, value: DevicesType) {
        tracing::debug!(value = value.as_str(), "set devices type filter");
        self.state.set_devices_type(value);
    }

    fn set_browsers_type(&mut self, value: BrowsersType) {
        tracing::debug!(value = value.as_str(), "set browsers type filter");
        self.state.set_browsers_type(value);
    }

    fn set_sizes_type(&mut self, value: SizesType) {
        tracing::debug!(value = value.as_str(), "set sizes type filter");
        self.state.set_sizes_type(value);
    }
}

#[derive(Clone, Debug)]
pub struct AppModel {
    pub route: Route,
    pub filters: FilterStore,
    pub domains: Arc<[Domain]>,
    pub hotkeys: HotkeyDispatcher,
    pub filter_bar: FilterBar,
    pub overlay: OverlayLayer,
    pub engine: PositionEngine,
    pub terminal_size: (u16, u16),
    pub notice: Option<String>,
    pub help_open: bool,
}

impl AppModel {
    pub fn new(route: Route, domains: Vec<Domain>) -> Self {
        let domains: Arc<[Domain]> = domains.into();
        let mut filter_bar = FilterBar::default();
        let mut overlay = OverlayLayer::default();
        filter_bar.sync(route.key(), &mut overlay);
        Self {
            route,
            filters: FilterStore::default(),
            hotkeys: HotkeyDispatcher::bind(domains.clone()),
            domains,
            filter_bar,
            overlay,
            engine: PositionEngine::new(1.0),
            terminal_size: (0, 0),
            notice: None,
            help_open: false,
        }
    }

    pub fn with_menu_padding(mut self, padding: u16) -> Self {
        self.engine = PositionEngine::new(f64::from(padding));
        self
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    /// Menu anchors are measured against the old size, so a resize closes them.
    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        if self.terminal_size != (width, height) {
            self.filter_bar.close_all(&mut self.overlay);
        }
        self.terminal_size = (width, height);
        self
    }

    pub fn set_domains(&mut self, domains: Vec<Domain>) {
        self.domains = domains.into();
        self.hotkeys.rebind_domains(self.domains.clone());
    }

    pub fn descriptors(&self) -> Vec<MenuDescriptor> {
        resolve(self.route.key(), &self.filters.state)
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        tracing::info!(from = %self.route.path(), to = %route.path(), "navigate");
        self.route = route;
        self.filter_bar.sync(self.route.key(), &mut self.overlay);
    }

    /// Runs `button` from menu `id`, then closes menus the new state hides.
    fn select_button(&mut self, id: MenuId, button: &ButtonSpec) {
        self.filter_bar
            .select(id, button, &mut self.filters, &mut self.overlay);
        let descriptors = self.descriptors();
        self.filter_bar.close_hidden(&descriptors, &mut self.overlay);
    }

    fn open_menu(&mut self, id: MenuId, descriptors: &[MenuDescriptor]) {
        let triggers = filter_triggers(self.terminal_size, descriptors);
        let (Some(descriptor), Some(Some(trigger))) = (descriptors.get(id), triggers.get(id))
        else {
            return;
        };
        let placement = layout::menu_placement(self.terminal_size, *trigger, descriptor);
        self.filter_bar
            .open(id, descriptor, placement, &self.engine, &mut self.overlay);
    }

    fn toggle_menu(&mut self, id: MenuId, descriptors: &[MenuDescriptor]) {
        let triggers = filter_triggers(self.terminal_size, descriptors);
        let (Some(descriptor), Some(Some(trigger))) = (descriptors.get(id), triggers.get(id))
        else {
            return;
        };
        let placement = layout::menu_placement(self.terminal_size, *trigger, descriptor);
        self.filter_bar
            .toggle(id, descriptor, placement, &self.engine, &mut self.overlay);
    }
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    ReloadConfig,
}

pub fn update(model: AppModel, event: AppEvent) -> (AppModel, AppCommand) {
    match event {
        AppEvent::Key(key) => update_on_key(model, key),
        AppEvent::Mouse(mouse) => mouse::update_on_mouse(model, mouse),
    }
}

fn update_on_key(model: AppModel, key: KeyEvent) -> (AppModel, AppCommand) {
    let mut model = model;
    model.notice = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => (model, AppCommand::Quit),
            KeyCode::Char('r') => (model, AppCommand::ReloadConfig),
            _ => (model, AppCommand::None),
        };
    }

    if model.help_open {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => model.help_open = false,
            KeyCode::Char('q') => return (model, AppCommand::Quit),
            _ => {}
        }
        return (model, AppCommand::None);
    }

    if model.filter_bar.any_open() {
        if let Some(handled) = update_open_menu(&mut model, key) {
            return (model, handled);
        }
    }

    match key.code {
        KeyCode::F(1) | KeyCode::Char('?') => {
            model.filter_bar.close_all(&mut model.overlay);
            model.help_open = true;
            return (model, AppCommand::None);
        }
        KeyCode::Char('q') => return (model, AppCommand::Quit),
        KeyCode::Tab => {
            open_next_menu(&mut model);
            return (model, AppCommand::None);
        }
        _ => {}
    }

    if let Some(route) = model.hotkeys.dispatch(&key) {
        model.navigate(route);
    }
    (model, AppCommand::None)
}

/// Keys consumed by the open menu. `None` lets the key fall through to the
/// global bindings.
fn update_open_menu(model: &mut AppModel, key: KeyEvent) -> Option<AppCommand> {
    let id = *model.filter_bar.open_ids().last()?;
    let descriptors = model.descriptors();
    let descriptor = descriptors.get(id)?;

    match key.code {
        KeyCode::Esc => {
            model.filter_bar.close_all(&mut model.overlay);
        }
        KeyCode::Up => model.filter_bar.move_highlight(id, descriptor, HighlightMove::Up),
        KeyCode::Down => model
            .filter_bar
            .move_highlight(id, descriptor, HighlightMove::Down),
        KeyCode::Enter => {
            if let Some(button) = model.filter_bar.highlighted_button(id, descriptor) {
                model.select_button(id, button);
            }
        }
        _ => return None,
    }
    Some(AppCommand::None)
}

/// Opens the visible menu after the currently open one, closing the rest.
fn open_next_menu(model: &mut AppModel) {
    let descriptors = model.descriptors();
    if descriptors.is_empty() {
        return;
    }
    let start = model
        .filter_bar
        .open_ids()
        .last()
        .map_or(0, |id| id + 1);
    model.filter_bar.close_all(&mut model.overlay);

    let count = descriptors.len();
    let next = (0..count)
        .map(|offset| (start + offset) % count)
        .find(|id| descriptors[*id].visible);
    if let Some(id) = next {
        model.open_menu(id, &descriptors);
    }
}
