//! Locales and localized role descriptions.
//!
//! Role descriptions are looked up through the [`RoleDescriptions`] trait so
//! the bridge is not tied to one string-resource mechanism. The built-in
//! [`EnglishRoleDescriptions`] table only answers for English locales; other
//! locales get no description and the platform falls back to the class name.

use std::fmt;

use horizon_semantics_core::Role;

/// A language/region pair parsed from a locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parse a BCP 47 (`en-US`) or POSIX (`en_US.UTF-8`) tag.
    ///
    /// Encoding and modifier suffixes are dropped. An empty tag yields the
    /// `und` (undetermined) language.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let mut parts = tag.split(['-', '_']).filter(|p| !p.is_empty());

        let language = parts
            .next()
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "und".to_string());
        let region = parts
            .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_uppercase);

        Self { language, region }
    }

    /// The system locale, falling back to `en-US` when it cannot be detected.
    pub fn current() -> Self {
        Self::parse(&sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()))
    }

    /// Lowercase language subtag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether the language is English, regardless of region.
    pub fn is_english(&self) -> bool {
        self.language == "en"
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::parse("en-US")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Source of human-readable role descriptions.
pub trait RoleDescriptions: Send + Sync {
    /// Describe `role` for `locale`, or `None` to leave the description unset.
    fn describe(&self, role: Role, locale: &Locale) -> Option<String>;
}

impl<F> RoleDescriptions for F
where
    F: Fn(Role, &Locale) -> Option<String> + Send + Sync,
{
    fn describe(&self, role: Role, locale: &Locale) -> Option<String> {
        self(role, locale)
    }
}

/// Built-in English role descriptions.
///
/// Only roles whose native class does not already convey their meaning have
/// an entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishRoleDescriptions;

impl EnglishRoleDescriptions {
    /// The English description of `role`, if it has one.
    pub fn lookup(role: Role) -> Option<&'static str> {
        let description = match role {
            Role::Link => "Link",
            Role::Search => "Search Field",
            Role::Image => "Image",
            Role::ImageButton => "Button, Image",
            Role::Alert => "Alert",
            Role::Combobox => "Combo Box",
            Role::Menu => "Menu",
            Role::Menubar => "Menu Bar",
            Role::Menuitem => "Menu Item",
            Role::Progressbar => "Progress Bar",
            Role::Radiogroup => "Radio Group",
            Role::Scrollbar => "Scroll Bar",
            Role::Spinbutton => "Spin Button",
            Role::Tab => "Tab",
            Role::Tablist => "Tab List",
            Role::Timer => "Timer",
            Role::Toolbar => "Tool Bar",
            Role::Header => "Heading",
            Role::Summary => "Summary",
            _ => return None,
        };
        Some(description)
    }
}

impl RoleDescriptions for EnglishRoleDescriptions {
    fn describe(&self, role: Role, locale: &Locale) -> Option<String> {
        if !locale.is_english() {
            return None;
        }
        Self::lookup(role).map(str::to_owned)
    }
}
