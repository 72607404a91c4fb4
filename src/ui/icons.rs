//! Static icon registry.
//!
//! Maps the semantic names used across the UI to a symbol in the icon set
//! (the component name the web client renders) and a terminal glyph for the
//! CLI. The mapping is fixed at compile time.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Logo,
    Close,
    Spinner,
    ChevronLeft,
    ChevronRight,
    Check,
    Warning,
    Trash,
    Settings,
    User,
    Logout,
    Shield,
    Laptop,
    Smartphone,
    Tablet,
    Globe,
}

impl Icon {
    pub const ALL: [Self; 16] = [
        Self::Logo,
        Self::Close,
        Self::Spinner,
        Self::ChevronLeft,
        Self::ChevronRight,
        Self::Check,
        Self::Warning,
        Self::Trash,
        Self::Settings,
        Self::User,
        Self::Logout,
        Self::Shield,
        Self::Laptop,
        Self::Smartphone,
        Self::Tablet,
        Self::Globe,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Close => "close",
            Self::Spinner => "spinner",
            Self::ChevronLeft => "chevron_left",
            Self::ChevronRight => "chevron_right",
            Self::Check => "check",
            Self::Warning => "warning",
            Self::Trash => "trash",
            Self::Settings => "settings",
            Self::User => "user",
            Self::Logout => "logout",
            Self::Shield => "shield",
            Self::Laptop => "laptop",
            Self::Smartphone => "smartphone",
            Self::Tablet => "tablet",
            Self::Globe => "globe",
        }
    }

    /// Component name in the web client's icon set.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Logo => "Command",
            Self::Close => "X",
            Self::Spinner => "Loader2",
            Self::ChevronLeft => "ChevronLeft",
            Self::ChevronRight => "ChevronRight",
            Self::Check => "Check",
            Self::Warning => "AlertTriangle",
            Self::Trash => "Trash",
            Self::Settings => "Settings",
            Self::User => "User",
            Self::Logout => "LogOut",
            Self::Shield => "ShieldCheck",
            Self::Laptop => "Laptop",
            Self::Smartphone => "Smartphone",
            Self::Tablet => "Tablet",
            Self::Globe => "Globe",
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Logo => "◆",
            Self::Close => "✕",
            Self::Spinner => "◌",
            Self::ChevronLeft => "‹",
            Self::ChevronRight => "›",
            Self::Check => "✓",
            Self::Warning => "⚠",
            Self::Trash => "🗑",
            Self::Settings => "⚙",
            Self::User => "👤",
            Self::Logout => "⇥",
            Self::Shield => "🛡",
            Self::Laptop => "💻",
            Self::Smartphone => "📱",
            Self::Tablet => "▭",
            Self::Globe => "🌐",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.name() == name)
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown icon: {s}"))
    }
}

/// Looks up the icon-set symbol for a semantic name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    Icon::from_name(name).map(Icon::symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_name_resolves_to_itself() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_name(icon.name()), Some(icon));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Icon::ALL.iter().map(|i| i.name()).collect();
        assert_eq!(names.len(), Icon::ALL.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("close"), Some("X"));
        assert_eq!(lookup("spinner"), Some("Loader2"));
        assert_eq!(lookup("logo"), Some("Command"));
        assert_eq!(lookup("nonexistent"), None);
        assert!("Close".parse::<Icon>().is_err());
    }
}
