//! Semantic roles and their native class mapping.
//!
//! Roles are referenced by producers through their lowercase name (for example
//! `"imagebutton"`), never by ordinal, so new roles may be appended without
//! breaking existing metadata.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Native class names reported to the platform accessibility service.
///
/// Assistive technology picks an interaction model from the class name, so
/// roles without a closer native analogue share [`native_class::VIEW`].
pub mod native_class {
    /// Generic fallback class.
    pub const VIEW: &str = "android.view.View";
    /// Push button.
    pub const BUTTON: &str = "android.widget.Button";
    /// Editable text field.
    pub const EDIT_TEXT: &str = "android.widget.EditText";
    /// Static image.
    pub const IMAGE_VIEW: &str = "android.widget.ImageView";
    /// Clickable image.
    pub const IMAGE_BUTTON: &str = "android.widget.ImageButton";
    /// Key on a soft keyboard.
    pub const KEYBOARD_KEY: &str = "android.inputmethodservice.Keyboard$Key";
    /// Static text.
    pub const TEXT_VIEW: &str = "android.widget.TextView";
    /// Value adjustable along a range.
    pub const SEEK_BAR: &str = "android.widget.SeekBar";
    /// Two-state switch.
    pub const SWITCH: &str = "android.widget.Switch";
    /// Checkbox.
    pub const CHECK_BOX: &str = "android.widget.CheckBox";
    /// Radio button.
    pub const RADIO_BUTTON: &str = "android.widget.RadioButton";
    /// Spin button.
    pub const SPIN_BUTTON: &str = "android.widget.SpinButton";
}

/// The semantic role of an element.
///
/// The set is closed for a given release but may grow; producers refer to
/// roles by [`Role::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Role {
    /// No particular role.
    #[default]
    None,
    /// Something that triggers an action when activated.
    Button,
    /// A hyperlink.
    Link,
    /// A search field.
    Search,
    /// An image.
    Image,
    /// An image that behaves like a button.
    ImageButton,
    /// A key on a keyboard.
    KeyboardKey,
    /// Static text.
    Text,
    /// Something that can be incremented or decremented.
    Adjustable,
    /// Summary text shown when the app starts.
    Summary,
    /// A section heading.
    Header,
    /// Important and usually time-sensitive information.
    Alert,
    /// A checkbox.
    Checkbox,
    /// A combo box.
    Combobox,
    /// Editable text.
    EditableText,
    /// A menu.
    Menu,
    /// A container of menus.
    Menubar,
    /// An item within a menu.
    Menuitem,
    /// A progress indicator.
    Progressbar,
    /// A radio button.
    Radiobutton,
    /// A group of radio buttons.
    Radiogroup,
    /// A scroll bar.
    Scrollbar,
    /// A spin button.
    Spinbutton,
    /// A two-state switch.
    Switch,
    /// A tab.
    Tab,
    /// A container of tabs.
    Tablist,
    /// A counter of elapsed or remaining time.
    Timer,
    /// A container of action buttons.
    Toolbar,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 28] = [
        Self::None,
        Self::Button,
        Self::Link,
        Self::Search,
        Self::Image,
        Self::ImageButton,
        Self::KeyboardKey,
        Self::Text,
        Self::Adjustable,
        Self::Summary,
        Self::Header,
        Self::Alert,
        Self::Checkbox,
        Self::Combobox,
        Self::EditableText,
        Self::Menu,
        Self::Menubar,
        Self::Menuitem,
        Self::Progressbar,
        Self::Radiobutton,
        Self::Radiogroup,
        Self::Scrollbar,
        Self::Spinbutton,
        Self::Switch,
        Self::Tab,
        Self::Tablist,
        Self::Timer,
        Self::Toolbar,
    ];

    /// The name producers use for this role.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Button => "button",
            Self::Link => "link",
            Self::Search => "search",
            Self::Image => "image",
            Self::ImageButton => "imagebutton",
            Self::KeyboardKey => "keyboardkey",
            Self::Text => "text",
            Self::Adjustable => "adjustable",
            Self::Summary => "summary",
            Self::Header => "header",
            Self::Alert => "alert",
            Self::Checkbox => "checkbox",
            Self::Combobox => "combobox",
            Self::EditableText => "editabletext",
            Self::Menu => "menu",
            Self::Menubar => "menubar",
            Self::Menuitem => "menuitem",
            Self::Progressbar => "progressbar",
            Self::Radiobutton => "radiobutton",
            Self::Radiogroup => "radiogroup",
            Self::Scrollbar => "scrollbar",
            Self::Spinbutton => "spinbutton",
            Self::Switch => "switch",
            Self::Tab => "tab",
            Self::Tablist => "tablist",
            Self::Timer => "timer",
            Self::Toolbar => "toolbar",
        }
    }

    /// Parse a role from its name, ignoring ASCII case.
    ///
    /// There is no fallback: an unrecognized name usually means the producer
    /// and this taxonomy are out of sync, so it is reported as
    /// [`Error::InvalidRole`].
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::invalid_role(name))
    }

    /// The native class name assistive technology uses for this role.
    pub fn native_class(self) -> &'static str {
        use native_class::*;

        match self {
            Self::Button => BUTTON,
            Self::EditableText | Self::Search => EDIT_TEXT,
            Self::Image => IMAGE_VIEW,
            Self::ImageButton => IMAGE_BUTTON,
            Self::KeyboardKey => KEYBOARD_KEY,
            Self::Text => TEXT_VIEW,
            Self::Adjustable => SEEK_BAR,
            Self::Switch => SWITCH,
            Self::Checkbox => CHECK_BOX,
            Self::Radiobutton => RADIO_BUTTON,
            Self::Spinbutton => SPIN_BUTTON,
            Self::None
            | Self::Link
            | Self::Summary
            | Self::Header
            | Self::Alert
            | Self::Combobox
            | Self::Menu
            | Self::Menubar
            | Self::Menuitem
            | Self::Progressbar
            | Self::Radiogroup
            | Self::Scrollbar
            | Self::Tab
            | Self::Tablist
            | Self::Timer
            | Self::Toolbar => VIEW,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
