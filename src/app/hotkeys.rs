use crate::domain::{Domain, Route, RouteKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteHotkey {
    pub key: char,
    pub route: Route,
}

pub const ROUTE_HOTKEYS: [RouteHotkey; 7] = [
    RouteHotkey {
        key: 'o',
        route: Route::Overview,
    },
    RouteHotkey {
        key: 'v',
        route: Route::Insight(RouteKey::Views),
    },
    RouteHotkey {
        key: 'p',
        route: Route::Insight(RouteKey::Pages),
    },
    RouteHotkey {
        key: 'r',
        route: Route::Insight(RouteKey::Referrers),
    },
    RouteHotkey {
        key: 'd',
        route: Route::Insight(RouteKey::Durations),
    },
    RouteHotkey {
        key: 'e',
        route: Route::Insight(RouteKey::Events),
    },
    RouteHotkey {
        key: 's',
        route: Route::Settings,
    },
];

pub fn hotkey_for_route(route: &Route) -> Option<char> {
    ROUTE_HOTKEYS
        .iter()
        .find(|hotkey| &hotkey.route == route)
        .map(|hotkey| hotkey.key)
}

/// Digit keys bound to a specific domain list. Replaced wholesale on rebind.
#[derive(Clone, Debug, Default)]
struct DigitBinding {
    domains: Arc<[Domain]>,
}

impl DigitBinding {
    fn lookup(&self, digit: u32) -> Option<Route> {
        let index = usize::try_from(digit).ok()?;
        self.domains.get(index).map(|domain| Route::domain(&domain.id))
    }
}

/// Global key bindings for the dashboard. Holds exactly one digit binding at a time.
#[derive(Clone, Debug, Default)]
pub struct HotkeyDispatcher {
    digits: DigitBinding,
}

impl HotkeyDispatcher {
    pub fn bind(domains: Arc<[Domain]>) -> Self {
        Self {
            digits: DigitBinding { domains },
        }
    }

    /// Swaps in a binding over the new domain list; the old one is dropped.
    pub fn rebind_domains(&mut self, domains: Arc<[Domain]>) {
        tracing::debug!(domains = domains.len(), "digit hotkeys rebound");
        self.digits = DigitBinding { domains };
    }

    pub fn bound_domains(&self) -> usize {
        self.digits.domains.len()
    }

    /// Navigation target for a key press, if it is bound. Modified keys never match.
    pub fn dispatch(&self, key: &KeyEvent) -> Option<Route> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return None;
        }
        let KeyCode::Char(character) = key.code else {
            return None;
        };
        if let Some(digit) = character.to_digit(10) {
            return self.digits.lookup(digit);
        }
        ROUTE_HOTKEYS
            .iter()
            .find(|hotkey| hotkey.key == character)
            .map(|hotkey| hotkey.route.clone())
    }
}
