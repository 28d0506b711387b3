//! The fixed eight-action set (cardinal + diagonal moves).

use crate::error::ActionError;
use crate::position::Offset;
use std::fmt;

/// One of the eight moves available to the agent.
///
/// The set is closed: every action is a unit step along one or both axes.
/// Each action has a fixed display glyph used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Action {
    /// `(-1, 0)`
    Left = 0,
    /// `(1, 0)`
    Right = 1,
    /// `(0, -1)`
    Down = 2,
    /// `(0, 1)`
    Up = 3,
    /// `(-1, 1)`
    UpLeft = 4,
    /// `(1, 1)`
    UpRight = 5,
    /// `(1, -1)`
    DownRight = 6,
    /// `(-1, -1)`
    DownLeft = 7,
}

impl Action {
    /// All actions, in canonical order.
    pub const ALL: [Action; 8] = [
        Action::Left,
        Action::Right,
        Action::Down,
        Action::Up,
        Action::UpLeft,
        Action::UpRight,
        Action::DownRight,
        Action::DownLeft,
    ];

    /// Number of actions in the fixed set.
    pub const COUNT: usize = 8;

    /// Move one cell in negative x.
    pub const LEFT: Action = Action::Left;
    /// Move one cell in positive x.
    pub const RIGHT: Action = Action::Right;
    /// Move one cell in negative y.
    pub const DOWN: Action = Action::Down;
    /// Move one cell in positive y.
    pub const UP: Action = Action::Up;

    /// Returns the `(dx, dy)` displacement of this action.
    pub const fn offset(self) -> Offset {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Down => (0, -1),
            Action::Up => (0, 1),
            Action::UpLeft => (-1, 1),
            Action::UpRight => (1, 1),
            Action::DownRight => (1, -1),
            Action::DownLeft => (-1, -1),
        }
    }

    /// Arrow glyph for diagnostics.
    pub const fn glyph(self) -> char {
        match self {
            Action::Left => '←',
            Action::Right => '→',
            Action::Down => '↓',
            Action::Up => '↑',
            Action::UpLeft => '↖',
            Action::UpRight => '↗',
            Action::DownRight => '↘',
            Action::DownLeft => '↙',
        }
    }

    /// Position of this action in [`Action::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up the action with the given displacement.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownOffset`] if no action moves by `offset`.
    pub fn from_offset(offset: Offset) -> Result<Self, ActionError> {
        Self::ALL
            .into_iter()
            .find(|a| a.offset() == offset)
            .ok_or(ActionError::UnknownOffset {
                dx: offset.0,
                dy: offset.1,
            })
    }
}

impl TryFrom<Offset> for Action {
    type Error = ActionError;

    fn try_from(offset: Offset) -> Result<Self, Self::Error> {
        Self::from_offset(offset)
    }
}

impl From<Action> for Offset {
    fn from(a: Action) -> Self {
        a.offset()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
