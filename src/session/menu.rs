/*!
 * Menu key decoding.
 */

/// Action picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// (S)et arguments
    SetArguments,
    /// (L)ist previous arguments
    ListRecords,
    /// (A)dd arguments; only offered while a pair is set
    AddArguments,
    /// (Q)uit
    Quit,
    /// Anything else
    Invalid,
}

impl MenuAction {
    /// Decode the first non-blank character of an input line, case-insensitively
    pub fn from_input(line: &str, has_arguments: bool) -> Self {
        let key = line.trim_start().chars().next().map(|c| c.to_ascii_uppercase());

        match key {
            Some('S') => Self::SetArguments,
            Some('L') => Self::ListRecords,
            Some('A') if has_arguments => Self::AddArguments,
            Some('Q') => Self::Quit,
            _ => Self::Invalid,
        }
    }

    /// Menu lines to show, in display order
    pub fn menu_lines(has_arguments: bool) -> Vec<&'static str> {
        let mut lines = vec!["(S)et arguments", "(L)ist previous arguments (database)"];
        if has_arguments {
            lines.push("(A)dd arguments");
        }
        lines.push("(Q)uit");
        lines
    }
}
