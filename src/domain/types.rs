use serde::{Deserialize, Serialize};

/// A tracked site, as listed in the header and bound to the digit hotkeys.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub title: String,
}

/// Number of domains reachable through the digit hotkeys `0`-`9`.
pub const DOMAIN_HOTKEY_SLOTS: usize = 10;

/// The digit shown next to a domain entry, only for the first ten.
pub fn domain_hotkey_hint(index: usize) -> Option<char> {
    if index < DOMAIN_HOTKEY_SLOTS {
        u32::try_from(index)
            .ok()
            .and_then(|digit| char::from_digit(digit, 10))
    } else {
        None
    }
}
