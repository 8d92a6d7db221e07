//! Which endpoint a map click fills.

use std::str::FromStr;

use thiserror::Error;

use crate::EndpointRole;

/// What a click does when pickup and drop-off are both already set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WhenBothSet {
    /// Move the drop-off to the clicked point.
    #[default]
    ReplaceDropoff,
    /// Move the pickup to the clicked point.
    ReplacePickup,
    /// Leave both endpoints alone.
    Ignore,
}

/// Unrecognised [`WhenBothSet`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown click policy {0:?}; expected replace-dropoff, replace-pickup or ignore")]
pub struct ParseWhenBothSetError(String);

impl FromStr for WhenBothSet {
    type Err = ParseWhenBothSetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replace-dropoff" => Ok(Self::ReplaceDropoff),
            "replace-pickup" => Ok(Self::ReplacePickup),
            "ignore" => Ok(Self::Ignore),
            _ => Err(ParseWhenBothSetError(value.to_owned())),
        }
    }
}

/// Role assignment for map clicks.
///
/// An unset pickup is filled first, then an unset drop-off. Once both are
/// set, [`WhenBothSet`] decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickPolicy {
    /// Behaviour once both endpoints are set.
    pub when_both_set: WhenBothSet,
}

impl ClickPolicy {
    /// Policy with the given both-set behaviour.
    #[must_use]
    pub const fn new(when_both_set: WhenBothSet) -> Self {
        Self { when_both_set }
    }

    /// Role a click should fill, or `None` when it should be ignored.
    #[must_use]
    pub const fn assign(&self, pickup_set: bool, dropoff_set: bool) -> Option<EndpointRole> {
        if !pickup_set {
            return Some(EndpointRole::Pickup);
        }
        if !dropoff_set {
            return Some(EndpointRole::Dropoff);
        }
        match self.when_both_set {
            WhenBothSet::ReplaceDropoff => Some(EndpointRole::Dropoff),
            WhenBothSet::ReplacePickup => Some(EndpointRole::Pickup),
            WhenBothSet::Ignore => None,
        }
    }
}
