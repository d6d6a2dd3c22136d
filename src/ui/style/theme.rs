use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: Style,
    pub row_highlight: Style,
    pub prompt: Style,
    pub empty: Style,
    pub status: Style,
    pub error: Style,
    pub control: Style,
    pub control_disabled: Style,
    pub pager_label: Style,
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

impl Theme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        self.header
    }

    #[must_use]
    pub fn row_highlight_style(&self) -> Style {
        self.row_highlight
    }

    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn status_style(&self, is_error: bool) -> Style {
        if is_error { self.error } else { self.status }
    }

    /// Style for a pager or download control in the given state.
    #[must_use]
    pub fn control_style(&self, enabled: bool) -> Style {
        if enabled {
            self.control
        } else {
            self.control_disabled
        }
    }

    #[must_use]
    pub fn pager_label_style(&self) -> Style {
        self.pager_label
    }
}

/// Definition for a built-in theme bundled with the application.
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
    pub name: &'static str,
    pub theme: Theme,
    pub aliases: &'static [&'static str],
}

impl ThemeDefinition {
    pub const fn new(name: &'static str, theme: Theme) -> Self {
        Self {
            name,
            theme,
            aliases: &[],
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

const SLATE: Theme = Theme {
    header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    row_highlight: Style::new().bg(Color::DarkGray),
    prompt: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    empty: Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    status: Style::new().fg(Color::Gray),
    error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
    control: Style::new().fg(Color::Black).bg(Color::Cyan),
    control_disabled: Style::new().fg(Color::DarkGray),
    pager_label: Style::new().fg(Color::White),
};

const PAPER: Theme = Theme {
    header: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
    row_highlight: Style::new().bg(Color::Gray),
    prompt: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
    empty: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    status: Style::new().fg(Color::DarkGray),
    error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
    control: Style::new().fg(Color::White).bg(Color::Blue),
    control_disabled: Style::new().fg(Color::Gray),
    pager_label: Style::new().fg(Color::Black),
};

const BUILTINS: [ThemeDefinition; 2] = [
    ThemeDefinition::new("slate", SLATE).with_aliases(&["dark", "default"]),
    ThemeDefinition::new("paper", PAPER).with_aliases(&["light"]),
];

#[must_use]
pub fn builtin_themes() -> &'static [ThemeDefinition] {
    &BUILTINS
}

#[must_use]
pub fn default_theme() -> Theme {
    SLATE
}

/// Look up a built-in theme by name or alias, ignoring ASCII case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    BUILTINS
        .iter()
        .find(|definition| definition.matches(name.trim()))
        .map(|definition| definition.theme)
}

/// Canonical theme names, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|definition| definition.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(by_name("Light"), Some(PAPER));
        assert_eq!(by_name(" dark "), Some(SLATE));
        assert_eq!(by_name("paper"), Some(PAPER));
    }

    #[test]
    fn unknown_theme_is_none() {
        assert_eq!(by_name("solarized"), None);
    }

    #[test]
    fn names_list_canonical_entries() {
        assert_eq!(names().collect::<Vec<_>>(), vec!["slate", "paper"]);
    }
}
