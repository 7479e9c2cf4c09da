//! Menu entries.

use std::fmt;

/// One line of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    FindById,
    ListAll,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    /// All entries in menu order.
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Create,
        MenuChoice::FindById,
        MenuChoice::ListAll,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> u8 {
        match self {
            MenuChoice::Create => 1,
            MenuChoice::FindById => 2,
            MenuChoice::ListAll => 3,
            MenuChoice::Update => 4,
            MenuChoice::Delete => 5,
            MenuChoice::Exit => 6,
        }
    }

    /// Parse a typed answer; anything but 1-6 is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let number: u8 = raw.trim().parse().ok()?;
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Create => "Create user",
            MenuChoice::FindById => "Find user by id",
            MenuChoice::ListAll => "List all users",
            MenuChoice::Update => "Update user",
            MenuChoice::Delete => "Delete user",
            MenuChoice::Exit => "Exit",
        };
        write!(f, "{}. {}", self.number(), label)
    }
}
