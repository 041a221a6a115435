use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sorting {
    #[default]
    Top,
    New,
    Recent,
}

impl Sorting {
    pub const ALL: [Self; 3] = [Self::Top, Self::New, Self::Recent];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::New => "new",
            Self::Recent => "recent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::New => "New",
            Self::Recent => "Recent",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Range {
    Last24Hours,
    #[default]
    Last7Days,
    Last30Days,
    Last6Months,
}

impl Range {
    pub const ALL: [Self; 4] = [
        Self::Last24Hours,
        Self::Last7Days,
        Self::Last30Days,
        Self::Last6Months,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last6Months => "6mo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Last24Hours => "24 hours",
            Self::Last7Days => "7 days",
            Self::Last30Days => "30 days",
            Self::Last6Months => "6 months",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl Interval {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Monthly, Self::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewsType {
    #[default]
    Unique,
    Total,
}

impl ViewsType {
    pub const ALL: [Self; 2] = [Self::Unique, Self::Total];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Total => "total",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unique => "Unique",
            Self::Total => "Total",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferrersType {
    #[default]
    WithSource,
    NoSource,
    OnlySource,
}

impl ReferrersType {
    pub const ALL: [Self; 3] = [Self::WithSource, Self::NoSource, Self::OnlySource];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithSource => "with_source",
            Self::NoSource => "no_source",
            Self::OnlySource => "only_source",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WithSource => "Combined",
            Self::NoSource => "Referrers",
            Self::OnlySource => "Sources",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemsType {
    WithVersion,
    #[default]
    NoVersion,
}

impl SystemsType {
    pub const ALL: [Self; 2] = [Self::WithVersion, Self::NoVersion];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithVersion => "with_version",
            Self::NoVersion => "no_version",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicesType {
    WithModel,
    #[default]
    NoModel,
}

impl DevicesType {
    pub const ALL: [Self; 2] = [Self::WithModel, Self::NoModel];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithModel => "with_model",
            Self::NoModel => "no_model",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowsersType {
    WithVersion,
    #[default]
    NoVersion,
}

impl BrowsersType {
    pub const ALL: [Self; 2] = [Self::WithVersion, Self::NoVersion];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithVersion => "with_version",
            Self::NoVersion => "no_version",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizesType {
    #[default]
    BrowserResolution,
    BrowserWidth,
    BrowserHeight,
    ScreenResolution,
    ScreenWidth,
    ScreenHeight,
}

impl SizesType {
    pub const ALL: [Self; 6] = [
        Self::BrowserResolution,
        Self::BrowserWidth,
        Self::BrowserHeight,
        Self::ScreenResolution,
        Self::ScreenWidth,
        Self::ScreenHeight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrowserResolution => "browser_resolution",
            Self::BrowserWidth => "browser_width",
            Self::BrowserHeight => "browser_height",
            Self::ScreenResolution => "screen_resolution",
            Self::ScreenWidth => "screen_width",
            Self::ScreenHeight => "screen_height",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BrowserResolution => "Browser sizes",
            Self::BrowserWidth => "Browser widths",
            Self::BrowserHeight => "Browser heights",
            Self::ScreenResolution => "Screen sizes",
            Self::ScreenWidth => "Screen widths",
            Self::ScreenHeight => "Screen heights",
        }
    }
}

/// Snapshot of every filter dimension. Each field always holds exactly one value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FilterState {
    pub sorting: Sorting,
    pub range: Range,
    pub interval: Interval,
    pub views_type: ViewsType,
    pub referrers_type: ReferrersType,
    pub systems_type: SystemsType,
    pub devices_type: DevicesType,
    pub browsers_type: BrowsersType,
    pub sizes_type: SizesType,
}

/// One setter per dimension. Implemented by whoever owns the `FilterState`.
pub trait FilterSetters {
    fn set_sorting(&mut self, value: Sorting);
    fn set_range(&mut self, value: Range);
    fn set_interval(&mut self, value: Interval);
    fn set_views_type(&mut self, value: ViewsType);
    fn set_referrers_type(&mut self, value: ReferrersType);
    fn set_systems_type(&mut self, value: SystemsType);
    fn set_devices_type(&mut self, value: DevicesType);
    fn set_browsers_type(&mut self, value: BrowsersType);
    fn set_sizes_type(&mut self, value: SizesType);
}

/// A setter call bound to its argument: what a menu option does when picked.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum FilterChange {
    Sorting(Sorting),
    Range(Range),
    Interval(Interval),
    ViewsType(ViewsType),
    ReferrersType(ReferrersType),
    SystemsType(SystemsType),
    DevicesType(DevicesType),
    BrowsersType(BrowsersType),
    SizesType(SizesType),
}

impl FilterChange {
    pub fn dispatch<S: FilterSetters + ?Sized>(self, setters: &mut S) {
        match self {
            Self::Sorting(value) => setters.set_sorting(value),
            Self::Range(value) => setters.set_range(value),
            Self::Interval(value) => setters.set_interval(value),
            Self::ViewsType(value) => setters.set_views_type(value),
            Self::ReferrersType(value) => setters.set_referrers_type(value),
            Self::SystemsType(value) => setters.set_systems_type(value),
            Self::DevicesType(value) => setters.set_devices_type(value),
            Self::BrowsersType(value) => setters.set_browsers_type(value),
            Self::SizesType(value) => setters.set_sizes_type(value),
        }
    }

    /// Whether `state` already holds the value this change would set.
    pub fn is_current(self, state: &FilterState) -> bool {
        match self {
            Self::Sorting(value) => state.sorting == value,
            Self::Range(value) => state.range == value,
            Self::Interval(value) => state.interval == value,
            Self::ViewsType(value) => state.views_type == value,
            Self::ReferrersType(value) => state.referrers_type == value,
            Self::SystemsType(value) => state.systems_type == value,
            Self::DevicesType(value) => state.devices_type == value,
            Self::BrowsersType(value) => state.browsers_type == value,
            Self::SizesType(value) => state.sizes_type == value,
        }
    }
}

impl FilterSetters for FilterState {
    fn set_sorting(&mut self, value: Sorting) {
        self.sorting = value;
    }

    fn set_range(&mut self, value: Range) {
        self.range = value;
    }

    fn set_interval(&mut self, value: Interval) {
        self.interval = value;
    }

    fn set_views_type(&mut self, value: ViewsType) {
        self.views_type = value;
    }

    fn set_referrers_type(&mut self, value: ReferrersType) {
        self.referrers_type = value;
    }

    fn set_systems_type(&mut self, value: SystemsType) {
        self.systems_type = value;
    }

    fn set_devices_type(&mut self, value: DevicesType) {
        self.devices_type = value;
    }

    fn set_browsers_type(&mut self, value: BrowsersType) {
        self.browsers_type = value;
    }

    fn set_sizes_type(&mut self, value: SizesType) {
        self.sizes_type = value;
    }
}

pub fn parse_sorting(value: &str) -> Option<Sorting> {
    Sorting::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_range(value: &str) -> Option<Range> {
    Range::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_interval(value: &str) -> Option<Interval> {
    Interval::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_views_type(value: &str) -> Option<ViewsType> {
    ViewsType::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_referrers_type(value: &str) -> Option<ReferrersType> {
    ReferrersType::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_systems_type(value: &str) -> Option<SystemsType> {
    SystemsType::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_devices_type(value: &str) -> Option<DevicesType> {
    DevicesType::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_browsers_type(value: &str) -> Option<BrowsersType> {
    BrowsersType::ALL.into_iter().find(|item| item.as_str() == value)
}

pub fn parse_sizes_type(value: &str) -> Option<SizesType> {
    SizesType::ALL.into_iter().find(|item| item.as_str() == value)
}
