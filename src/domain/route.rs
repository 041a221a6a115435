use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKey {
    Overview,
    Domain,
    Views,
    Pages,
    Referrers,
    Durations,
    Events,
    Systems,
    Devices,
    Browsers,
    Sizes,
    Languages,
    Settings,
}

pub const INSIGHT_ROUTE_KEYS: [RouteKey; 10] = [
    RouteKey::Views,
    RouteKey::Pages,
    RouteKey::Referrers,
    RouteKey::Durations,
    RouteKey::Events,
    RouteKey::Systems,
    RouteKey::Devices,
    RouteKey::Browsers,
    RouteKey::Sizes,
    RouteKey::Languages,
];

impl RouteKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Domain => "Domain",
            Self::Views => "Views",
            Self::Pages => "Pages",
            Self::Referrers => "Referrers",
            Self::Durations => "Durations",
            Self::Events => "Events",
            Self::Systems => "Systems",
            Self::Devices => "Devices",
            Self::Browsers => "Browsers",
            Self::Sizes => "Sizes",
            Self::Languages => "Languages",
            Self::Settings => "Settings",
        }
    }

    /// Path segment under `/insights/`, if this is an insight section.
    pub fn insight_name(self) -> Option<&'static str> {
        match self {
            Self::Views => Some("views"),
            Self::Pages => Some("pages"),
            Self::Referrers => Some("referrers"),
            Self::Durations => Some("durations"),
            Self::Events => Some("events"),
            Self::Systems => Some("systems"),
            Self::Devices => Some("devices"),
            Self::Browsers => Some("browsers"),
            Self::Sizes => Some("sizes"),
            Self::Languages => Some("languages"),
            Self::Overview | Self::Domain | Self::Settings => None,
        }
    }

    fn from_insight_name(name: &str) -> Option<Self> {
        INSIGHT_ROUTE_KEYS
            .iter()
            .copied()
            .find(|key| key.insight_name() == Some(name))
    }
}

/// A navigable location. `Route::parse` is the router: it turns a path string
/// into the coarse section the filter bar keys on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    Overview,
    Domain { id: String },
    Insight(RouteKey),
    Settings,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        if trimmed == "/" {
            return Some(Self::Overview);
        }
        if trimmed == "/settings" {
            return Some(Self::Settings);
        }
        if let Some(name) = trimmed.strip_prefix("/insights/") {
            return RouteKey::from_insight_name(name).map(Self::Insight);
        }
        if let Some(id) = trimmed.strip_prefix("/domains/") {
            if id.is_empty() || id.contains('/') {
                return None;
            }
            return Some(Self::Domain { id: id.to_string() });
        }
        None
    }

    pub fn key(&self) -> RouteKey {
        match self {
            Self::Overview => RouteKey::Overview,
            Self::Domain { .. } => RouteKey::Domain,
            Self::Insight(key) => *key,
            Self::Settings => RouteKey::Settings,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Overview => "/".to_string(),
            Self::Domain { id } => format!("/domains/{id}"),
            Self::Insight(key) => match key.insight_name() {
                Some(name) => format!("/insights/{name}"),
                None => "/".to_string(),
            },
            Self::Settings => "/settings".to_string(),
        }
    }

    pub fn domain(id: &str) -> Self {
        Self::Domain { id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_section_pattern() {
        assert_eq!(Route::parse("/"), Some(Route::Overview));
        assert_eq!(Route::parse("/settings"), Some(Route::Settings));
        assert_eq!(
            Route::parse("/insights/referrers"),
            Some(Route::Insight(RouteKey::Referrers))
        );
        assert_eq!(Route::parse("/domains/abc-123"), Some(Route::domain("abc-123")));
        assert_eq!(Route::parse("/insights/sizes/").map(|r| r.key()), Some(RouteKey::Sizes));
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/insights/unknown"), None);
        assert_eq!(Route::parse("/domains/"), None);
        assert_eq!(Route::parse("/domains/a/b"), None);
        assert_eq!(Route::parse("/elsewhere"), None);
    }

    #[test]
    fn path_is_inverse_of_parse() {
        for key in INSIGHT_ROUTE_KEYS {
            let route = Route::Insight(key);
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(Route::domain("x").path(), "/domains/x");
    }
}
