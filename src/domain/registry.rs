use crate::domain::{
    BrowsersType, DevicesType, FilterChange, FilterState, Interval, Range, ReferrersType,
    RouteKey, SizesType, Sorting, SystemsType, ViewsType,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeDimension {
    Systems,
    Devices,
    Browsers,
}

/// Which menu occupies a position in a route's filter bar.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSlot {
    Sorting,
    /// Sorting buttons, a separator, then the single "switch detail" toggle.
    SortingWithToggle(CompositeDimension),
    Range,
    Interval,
    ViewsType,
    ReferrersType,
    SizesType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Always,
    WhenSorting(Sorting),
}

impl Visibility {
    pub fn evaluate(self, state: &FilterState) -> bool {
        match self {
            Self::Always => true,
            Self::WhenSorting(sorting) => state.sorting == sorting,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotConfig {
    pub slot: MenuSlot,
    pub visibility: Visibility,
}

const fn always(slot: MenuSlot) -> SlotConfig {
    SlotConfig {
        slot,
        visibility: Visibility::Always,
    }
}

const SORTING: SlotConfig = always(MenuSlot::Sorting);
const INTERVAL: SlotConfig = always(MenuSlot::Interval);
const RANGE_WHEN_TOP: SlotConfig = SlotConfig {
    slot: MenuSlot::Range,
    visibility: Visibility::WhenSorting(Sorting::Top),
};

const VIEWS_SLOTS: [SlotConfig; 2] = [always(MenuSlot::ViewsType), INTERVAL];
const PAGES_SLOTS: [SlotConfig; 2] = [SORTING, RANGE_WHEN_TOP];
const REFERRERS_SLOTS: [SlotConfig; 3] =
    [SORTING, always(MenuSlot::ReferrersType), RANGE_WHEN_TOP];
const DURATIONS_SLOTS: [SlotConfig; 1] = [INTERVAL];
const EVENTS_SLOTS: [SlotConfig; 2] = [INTERVAL, SORTING];
const SYSTEMS_SLOTS: [SlotConfig; 2] = [
    always(MenuSlot::SortingWithToggle(CompositeDimension::Systems)),
    RANGE_WHEN_TOP,
];
const DEVICES_SLOTS: [SlotConfig; 2] = [
    always(MenuSlot::SortingWithToggle(CompositeDimension::Devices)),
    RANGE_WHEN_TOP,
];
const BROWSERS_SLOTS: [SlotConfig; 2] = [
    always(MenuSlot::SortingWithToggle(CompositeDimension::Browsers)),
    RANGE_WHEN_TOP,
];
const SIZES_SLOTS: [SlotConfig; 3] = [SORTING, always(MenuSlot::SizesType), RANGE_WHEN_TOP];
const LANGUAGES_SLOTS: [SlotConfig; 2] = [SORTING, RANGE_WHEN_TOP];

/// The filter bar layout for a route. Sections without filters map to an empty slice.
pub fn route_slots(key: RouteKey) -> &'static [SlotConfig] {
    match key {
        RouteKey::Views => &VIEWS_SLOTS,
        RouteKey::Pages => &PAGES_SLOTS,
        RouteKey::Referrers => &REFERRERS_SLOTS,
        RouteKey::Durations => &DURATIONS_SLOTS,
        RouteKey::Events => &EVENTS_SLOTS,
        RouteKey::Systems => &SYSTEMS_SLOTS,
        RouteKey::Devices => &DEVICES_SLOTS,
        RouteKey::Browsers => &BROWSERS_SLOTS,
        RouteKey::Sizes => &SIZES_SLOTS,
        RouteKey::Languages => &LANGUAGES_SLOTS,
        RouteKey::Overview | RouteKey::Domain | RouteKey::Settings => &[],
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ButtonSpec {
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub active: bool,
    pub on_click: FilterChange,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEntry {
    Button(ButtonSpec),
    Separator,
}

impl MenuEntry {
    pub fn as_button(&self) -> Option<&ButtonSpec> {
        match self {
            Self::Button(button) => Some(button),
            Self::Separator => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MenuDescriptor {
    pub slot: MenuSlot,
    pub label: &'static str,
    pub items: Vec<MenuEntry>,
    pub visible: bool,
}

impl MenuDescriptor {
    #[cfg(test)]
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonSpec> {
        self.items.iter().filter_map(MenuEntry::as_button)
    }
}

/// Builds the filter bar for `key` from the current snapshot. Pure; call it on every render.
pub fn resolve(key: RouteKey, state: &FilterState) -> Vec<MenuDescriptor> {
    let slots = route_slots(key);
    if slots.is_empty() {
        return Vec::new();
    }

    let sorting_buttons = sorting_buttons(state);
    let sorting_item = entries_from(&sorting_buttons);
    let range_item = entries_from(&range_buttons(state));
    let interval_item = entries_from(&interval_buttons(state));

    slots
        .iter()
        .map(|config| {
            let (label, items) = match config.slot {
                MenuSlot::Sorting => (state.sorting.label(), sorting_item.clone()),
                MenuSlot::Range => (state.range.label(), range_item.clone()),
                MenuSlot::Interval => (state.interval.label(), interval_item.clone()),
                MenuSlot::ViewsType => (state.views_type.label(), views_type_entries(state)),
                MenuSlot::ReferrersType => {
                    (state.referrers_type.label(), referrers_type_entries(state))
                }
                MenuSlot::SizesType => (state.sizes_type.label(), sizes_type_entries(state)),
                MenuSlot::SortingWithToggle(dimension) => {
                    let mut items = sorting_item.clone();
                    items.push(MenuEntry::Separator);
                    items.push(MenuEntry::Button(composite_toggle(dimension, state)));
                    (state.sorting.label(), items)
                }
            };
            MenuDescriptor {
                slot: config.slot,
                label,
                items,
                visible: config.visibility.evaluate(state),
            }
        })
        .collect()
}

/// The member of a two-value pair that `current` is not.
pub fn other_of<T: Copy + PartialEq>(current: T, pair: [T; 2]) -> T {
    debug_assert!(pair[0] != pair[1], "toggle pair must hold two distinct values");
    debug_assert!(pair.contains(&current), "current value must belong to its toggle pair");
    if pair[0] == current { pair[1] } else { pair[0] }
}

fn button(
    label: &'static str,
    description: Option<&'static str>,
    change: FilterChange,
    state: &FilterState,
) -> ButtonSpec {
    ButtonSpec {
        label,
        description,
        active: change.is_current(state),
        on_click: change,
    }
}

fn entries_from(buttons: &[ButtonSpec]) -> Vec<MenuEntry> {
    buttons.iter().cloned().map(MenuEntry::Button).collect()
}

fn sorting_buttons(state: &FilterState) -> [ButtonSpec; 3] {
    [
        button(
            "Top",
            Some("Top entries first"),
            FilterChange::Sorting(Sorting::Top),
            state,
        ),
        button(
            "New",
            Some("New entries only"),
            FilterChange::Sorting(Sorting::New),
            state,
        ),
        button(
            "Recent",
            Some("Sorted by time"),
            FilterChange::Sorting(Sorting::Recent),
            state,
        ),
    ]
}

fn range_buttons(state: &FilterState) -> [ButtonSpec; 4] {
    [
        button(
            "24 hours",
            Some("Show the last 24 hours"),
            FilterChange::Range(Range::Last24Hours),
            state,
        ),
        button(
            "7 days",
            Some("Show the last 7 days"),
            FilterChange::Range(Range::Last7Days),
            state,
        ),
        button(
            "30 days",
            Some("Show the last 30 days"),
            FilterChange::Range(Range::Last30Days),
            state,
        ),
        button(
            "6 months",
            Some("Show the last 6 months"),
            FilterChange::Range(Range::Last6Months),
            state,
        ),
    ]
}

fn interval_buttons(state: &FilterState) -> [ButtonSpec; 3] {
    [
        button(
            "Daily",
            Some("Grouped by day"),
            FilterChange::Interval(Interval::Daily),
            state,
        ),
        button(
            "Monthly",
            Some("Grouped by month"),
            FilterChange::Interval(Interval::Monthly),
            state,
        ),
        button(
            "Yearly",
            Some("Grouped by year"),
            FilterChange::Interval(Interval::Yearly),
            state,
        ),
    ]
}

fn views_type_entries(state: &FilterState) -> Vec<MenuEntry> {
    entries_from(&[
        button(
            "Unique",
            Some("Unique site views"),
            FilterChange::ViewsType(ViewsType::Unique),
            state,
        ),
        button(
            "Total",
            Some("Total page views"),
            FilterChange::ViewsType(ViewsType::Total),
            state,
        ),
    ])
}

fn referrers_type_entries(state: &FilterState) -> Vec<MenuEntry> {
    entries_from(&[
        button(
            "Source parameter",
            Some("Prefer source parameter"),
            FilterChange::ReferrersType(ReferrersType::WithSource),
            state,
        ),
        button(
            "↳ Only referrers",
            None,
            FilterChange::ReferrersType(ReferrersType::NoSource),
            state,
        ),
        button(
            "↳ Only sources",
            None,
            FilterChange::ReferrersType(ReferrersType::OnlySource),
            state,
        ),
    ])
}

fn sizes_type_entries(state: &FilterState) -> Vec<MenuEntry> {
    let mut items = entries_from(&[
        button(
            "Browser sizes",
            Some("Width and height combined"),
            FilterChange::SizesType(SizesType::BrowserResolution),
            state,
        ),
        button(
            "↳ Widths",
            None,
            FilterChange::SizesType(SizesType::BrowserWidth),
            state,
        ),
        button(
            "↳ Heights",
            None,
            FilterChange::SizesType(SizesType::BrowserHeight),
            state,
        ),
    ]);
    items.push(MenuEntry::Separator);
    items.extend(entries_from(&[
        button(
            "Screen sizes",
            Some("Width and height combined"),
            FilterChange::SizesType(SizesType::ScreenResolution),
            state,
        ),
        button(
            "↳ Widths",
            None,
            FilterChange::SizesType(SizesType::ScreenWidth),
            state,
        ),
        button(
            "↳ Heights",
            None,
            FilterChange::SizesType(SizesType::ScreenHeight),
            state,
        ),
    ]));
    items
}

fn composite_toggle(dimension: CompositeDimension, state: &FilterState) -> ButtonSpec {
    let toggle = match dimension {
        CompositeDimension::Systems => {
            let target = other_of(
                state.systems_type,
                [SystemsType::WithVersion, SystemsType::NoVersion],
            );
            let (label, description) = match target {
                SystemsType::WithVersion => ("Show versions", "Include system version"),
                SystemsType::NoVersion => ("Hide versions", "Exclude system version"),
            };
            button(label, Some(description), FilterChange::SystemsType(target), state)
        }
        CompositeDimension::Devices => {
            let target = other_of(
                state.devices_type,
                [DevicesType::WithModel, DevicesType::NoModel],
            );
            let (label, description) = match target {
                DevicesType::WithModel => ("Show models", "Include device model"),
                DevicesType::NoModel => ("Hide models", "Exclude device model"),
            };
            button(label, Some(description), FilterChange::DevicesType(target), state)
        }
        CompositeDimension::Browsers => {
            let target = other_of(
                state.browsers_type,
                [BrowsersType::WithVersion, BrowsersType::NoVersion],
            );
            let (label, description) = match target {
                BrowsersType::WithVersion => ("Show versions", "Include browser version"),
                BrowsersType::NoVersion => ("Hide versions", "Exclude browser version"),
            };
            button(label, Some(description), FilterChange::BrowsersType(target), state)
        }
    };
    debug_assert!(!toggle.active, "detail toggle must switch to the inactive value");
    toggle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterSetters, INSIGHT_ROUTE_KEYS};

    fn slots_of(descriptors: &[MenuDescriptor]) -> Vec<MenuSlot> {
        descriptors.iter().map(|descriptor| descriptor.slot).collect()
    }

    #[test]
    fn route_table_rows() {
        use CompositeDimension::{Browsers, Devices, Systems};
        use Visibility::{Always, WhenSorting};
        let top = WhenSorting(Sorting::Top);
        let rows: [(RouteKey, &[(MenuSlot, Visibility)]); 10] = [
            (
                RouteKey::Views,
                &[(MenuSlot::ViewsType, Always), (MenuSlot::Interval, Always)],
            ),
            (
                RouteKey::Pages,
                &[(MenuSlot::Sorting, Always), (MenuSlot::Range, top)],
            ),
            (
                RouteKey::Referrers,
                &[
                    (MenuSlot::Sorting, Always),
                    (MenuSlot::ReferrersType, Always),
                    (MenuSlot::Range, top),
                ],
            ),
            (RouteKey::Durations, &[(MenuSlot::Interval, Always)]),
            (
                RouteKey::Events,
                &[(MenuSlot::Interval, Always), (MenuSlot::Sorting, Always)],
            ),
            (
                RouteKey::Systems,
                &[
                    (MenuSlot::SortingWithToggle(Systems), Always),
                    (MenuSlot::Range, top),
                ],
            ),
            (
                RouteKey::Devices,
                &[
                    (MenuSlot::SortingWithToggle(Devices), Always),
                    (MenuSlot::Range, top),
                ],
            ),
            (
                RouteKey::Browsers,
                &[
                    (MenuSlot::SortingWithToggle(Browsers), Always),
                    (MenuSlot::Range, top),
                ],
            ),
            (
                RouteKey::Sizes,
                &[
                    (MenuSlot::Sorting, Always),
                    (MenuSlot::SizesType, Always),
                    (MenuSlot::Range, top),
                ],
            ),
            (
                RouteKey::Languages,
                &[(MenuSlot::Sorting, Always), (MenuSlot::Range, top)],
            ),
        ];

        let state = FilterState::default();
        for (key, expected) in rows {
            let table: Vec<(MenuSlot, Visibility)> = route_slots(key)
                .iter()
                .map(|config| (config.slot, config.visibility))
                .collect();
            assert_eq!(table, expected, "route {key:?}");

            let slots: Vec<MenuSlot> = expected.iter().map(|(slot, _)| *slot).collect();
            assert_eq!(slots_of(&resolve(key, &state)), slots, "route {key:?}");
        }
    }

    #[test]
    fn range_shows_only_under_top_sorting() {
        let mut with_range = 0;
        for key in INSIGHT_ROUTE_KEYS {
            if !route_slots(key).iter().any(|config| config.slot == MenuSlot::Range) {
                continue;
            }
            with_range += 1;
            for sorting in Sorting::ALL {
                let mut state = FilterState::default();
                state.set_sorting(sorting);
                for descriptor in resolve(key, &state) {
                    let expected = descriptor.slot != MenuSlot::Range || sorting == Sorting::Top;
                    assert_eq!(
                        descriptor.visible, expected,
                        "route {key:?} slot {:?} sorting {sorting:?}",
                        descriptor.slot
                    );
                }
            }
        }
        assert_eq!(with_range, 7);
    }

    #[test]
    fn literal_orders_for_selected_routes() {
        let state = FilterState::default();
        assert_eq!(
            slots_of(&resolve(RouteKey::Referrers, &state)),
            vec![MenuSlot::Sorting, MenuSlot::ReferrersType, MenuSlot::Range]
        );
        assert_eq!(
            slots_of(&resolve(RouteKey::Views, &state)),
            vec![MenuSlot::ViewsType, MenuSlot::Interval]
        );
        assert_eq!(
            slots_of(&resolve(RouteKey::Events, &state)),
            vec![MenuSlot::Interval, MenuSlot::Sorting]
        );
    }

    #[test]
    fn sections_without_filters_resolve_to_nothing() {
        let state = FilterState::default();
        assert!(resolve(RouteKey::Overview, &state).is_empty());
        assert!(resolve(RouteKey::Domain, &state).is_empty());
        assert!(resolve(RouteKey::Settings, &state).is_empty());
    }

    #[test]
    fn exactly_one_active_button_per_simple_dimension() {
        let mut state = FilterState::default();
        state.set_sorting(Sorting::Recent);
        state.set_sizes_type(SizesType::ScreenHeight);
        for key in INSIGHT_ROUTE_KEYS {
            for descriptor in resolve(key, &state) {
                if matches!(descriptor.slot, MenuSlot::SortingWithToggle(_)) {
                    continue;
                }
                let active = descriptor.buttons().filter(|button| button.active).count();
                assert_eq!(active, 1, "{key:?} {:?}", descriptor.slot);
            }
        }
    }

    #[test]
    fn menu_label_names_the_current_value() {
        let mut state = FilterState::default();
        state.set_range(Range::Last30Days);
        state.set_referrers_type(ReferrersType::OnlySource);
        let labels: Vec<&str> = resolve(RouteKey::Referrers, &state)
            .iter()
            .map(|descriptor| descriptor.label)
            .collect();
        assert_eq!(labels, vec!["Top", "Sources", "30 days"]);
    }

    #[test]
    fn composite_toggle_offers_only_the_other_state() {
        let cases = [
            (RouteKey::Systems, FilterChange::SystemsType(SystemsType::WithVersion)),
            (RouteKey::Systems, FilterChange::SystemsType(SystemsType::NoVersion)),
            (RouteKey::Devices, FilterChange::DevicesType(DevicesType::WithModel)),
            (RouteKey::Devices, FilterChange::DevicesType(DevicesType::NoModel)),
            (RouteKey::Browsers, FilterChange::BrowsersType(BrowsersType::WithVersion)),
            (RouteKey::Browsers, FilterChange::BrowsersType(BrowsersType::NoVersion)),
        ];

        for (key, current) in cases {
            let mut state = FilterState::default();
            current.dispatch(&mut state);

            let descriptors = resolve(key, &state);
            let menu = &descriptors[0];
            assert_eq!(menu.items.len(), 5);
            assert_eq!(menu.items[3], MenuEntry::Separator);

            let toggles: Vec<&ButtonSpec> = menu
                .buttons()
                .filter(|button| !matches!(button.on_click, FilterChange::Sorting(_)))
                .collect();
            assert_eq!(toggles.len(), 1);
            assert!(!toggles[0].active);
            assert_ne!(toggles[0].on_click, current);

            let mut after = state;
            toggles[0].on_click.dispatch(&mut after);
            assert_ne!(after, state);
        }
    }

    #[test]
    fn with_version_renders_the_hide_button() {
        let mut state = FilterState::default();
        state.set_browsers_type(BrowsersType::WithVersion);
        let descriptors = resolve(RouteKey::Browsers, &state);
        let toggle = descriptors[0].buttons().last().cloned();
        assert_eq!(
            toggle.map(|button| (button.label, button.on_click)),
            Some((
                "Hide versions",
                FilterChange::BrowsersType(BrowsersType::NoVersion)
            ))
        );
    }

    #[test]
    fn range_is_gated_on_top_sorting() {
        let mut state = FilterState::default();
        state.set_sorting(Sorting::New);
        let hidden = resolve(RouteKey::Pages, &state);
        assert!(hidden[0].visible);
        assert!(!hidden[1].visible);

        state.set_sorting(Sorting::Top);
        let shown = resolve(RouteKey::Pages, &state);
        assert!(shown[1].visible);
        assert_eq!(slots_of(&hidden), slots_of(&shown));
    }

    #[test]
    fn shared_menus_are_identical_across_routes() {
        let state = FilterState::default();
        let pages = resolve(RouteKey::Pages, &state);
        let languages = resolve(RouteKey::Languages, &state);
        assert_eq!(pages[0], languages[0]);
        assert_eq!(pages[1], languages[1]);
    }

    #[test]
    fn other_of_picks_the_remaining_member() {
        assert_eq!(other_of(1, [1, 2]), 2);
        assert_eq!(other_of(2, [1, 2]), 1);
        assert_eq!(
            other_of(DevicesType::NoModel, [DevicesType::WithModel, DevicesType::NoModel]),
            DevicesType::WithModel
        );
    }
}
