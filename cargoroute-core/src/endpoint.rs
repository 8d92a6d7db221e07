//! Trip endpoints: the free-text address and which side of the trip it names.

use crate::Coordinate;

/// Which end of the trip an input applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EndpointRole {
    /// Where the van collects the load.
    Pickup,
    /// Where the load is delivered.
    Dropoff,
}

impl EndpointRole {
    /// Both roles in trip order.
    pub const ALL: [Self; 2] = [Self::Pickup, Self::Dropoff];

    /// Map-marker label for the role.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            Self::Pickup => 'P',
            Self::Dropoff => 'D',
        }
    }
}

impl std::fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "drop-off",
        })
    }
}

/// Address text as typed by the user or produced by reverse geocoding.
///
/// Surrounding whitespace is dropped on construction; a blank address means
/// the endpoint is unset.
///
/// # Examples
///
/// ```
/// use cargoroute_core::Address;
///
/// assert!(Address::new("   ").is_unset());
/// assert_eq!(Address::new(" 30 Rockefeller Plaza ").as_str(), "30 Rockefeller Plaza");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Address(String);

impl Address {
    /// Wrap address text, trimming surrounding whitespace.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().trim().to_owned())
    }

    /// Format a coordinate as address text with four decimal places.
    ///
    /// Used as the last resort when no reverse geocoder produced a name.
    #[must_use]
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self(coordinate.to_string())
    }

    /// Whether the address is blank.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
