//! The three compartments and their reserved group IDs.

use std::fmt;

use sir_core::GroupId;

/// Epidemic compartment of a pedestrian.
///
/// Each compartment is backed by exactly one group whose ID is reserved:
///
/// | Compartment   | Group ID |
/// |---------------|----------|
/// | `Susceptible` | 0        |
/// | `Infected`    | 1        |
/// | `Recovered`   | 2        |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SirType {
    Susceptible,
    Infected,
    Recovered,
}

impl SirType {
    pub const ALL: [SirType; 3] = [SirType::Susceptible, SirType::Infected, SirType::Recovered];

    /// The reserved group ID for this compartment.
    #[inline]
    pub const fn group_id(self) -> GroupId {
        match self {
            SirType::Susceptible => GroupId(0),
            SirType::Infected => GroupId(1),
            SirType::Recovered => GroupId(2),
        }
    }

    /// Inverse of [`group_id`](Self::group_id).  `None` for IDs outside the
    /// reserved range.
    pub const fn from_group_id(id: GroupId) -> Option<SirType> {
        match id.0 {
            0 => Some(SirType::Susceptible),
            1 => Some(SirType::Infected),
            2 => Some(SirType::Recovered),
            _ => None,
        }
    }

    /// Susceptible and Infected groups outlive their last member; the
    /// Recovered group does not.
    #[inline]
    pub const fn is_persistent(self) -> bool {
        matches!(self, SirType::Susceptible | SirType::Infected)
    }
}

impl fmt::Display for SirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SirType::Susceptible => "susceptible",
            SirType::Infected => "infected",
            SirType::Recovered => "recovered",
        };
        f.write_str(name)
    }
}
