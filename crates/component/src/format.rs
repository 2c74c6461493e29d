//! Text decorations and colours.

use serde::{Deserialize, Serialize};

/// A decoration a component can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underlined,
    /// Struck-through text.
    Strikethrough,
    /// Obfuscated ("magic") text.
    Obfuscated,
}

impl Decoration {
    /// All decorations, in the order they are stored.
    pub const ALL: [Self; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Underlined,
        Self::Strikethrough,
        Self::Obfuscated,
    ];
}

/// State of a decoration on a single component.
///
/// `NotSet` means the component inherits the value resolved for its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    /// Inherit from the parent.
    #[default]
    NotSet,
    /// Explicitly enabled.
    True,
    /// Explicitly disabled.
    False,
}

impl TriState {
    /// Returns whether the state is [`TriState::NotSet`].
    #[must_use]
    pub const fn is_not_set(&self) -> bool {
        matches!(self, Self::NotSet)
    }

    /// Resolve against the value inherited from the parent.
    #[must_use]
    pub const fn resolve(self, inherited: bool) -> bool {
        match self {
            Self::NotSet => inherited,
            Self::True => true,
            Self::False => false,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::NotSet, Self::from)
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        match value {
            TriState::NotSet => None,
            TriState::True => Some(true),
            TriState::False => Some(false),
        }
    }
}

/// The sixteen named chat colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_inherits_when_not_set() {
        assert!(TriState::NotSet.resolve(true));
        assert!(!TriState::NotSet.resolve(false));
        assert!(!TriState::False.resolve(true));
        assert!(TriState::True.resolve(false));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(TriState::from(None), TriState::NotSet);
        assert_eq!(Option::<bool>::from(TriState::False), Some(false));
    }
}
