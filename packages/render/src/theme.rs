//! Light/dark theme flag. Only ever changes class names, never structure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(pub String);

const EDITOR_BASE_CLASSES: [&str; 5] = [
    "prose max-w-none w-full",
    "min-h-[60vh] p-8",
    "rounded-lg border bg-card shadow-sm",
    "outline-none transition-all duration-200",
    "focus:ring-2 focus:ring-primary/20",
];

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn prose_class(&self) -> &'static str {
        match self {
            Theme::Light => "prose-stone",
            Theme::Dark => "prose-invert",
        }
    }

    /// Class list of the editable document surface
    pub fn editor_class(&self) -> String {
        let mut classes = EDITOR_BASE_CLASSES.join(" ");
        classes.push(' ');
        classes.push_str(self.prose_class());
        classes
    }

    /// Class list of the outermost container
    pub fn root_class(&self) -> String {
        format!("folio {}", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_class_varies_only_in_prose_variant() {
        let light = Theme::Light.editor_class();
        let dark = Theme::Dark.editor_class();
        assert!(light.ends_with("prose-stone"));
        assert!(dark.ends_with("prose-invert"));
        assert_eq!(
            light.trim_end_matches("prose-stone"),
            dark.trim_end_matches("prose-invert")
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
