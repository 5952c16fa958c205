// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Accessibility role attached to a fragment.
///
/// Only [`AccessibilityRole::Link`] changes layout output (it makes the fragment
/// clickable); the other roles are decoded so that malformed input can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[non_exhaustive]
#[allow(missing_docs, reason = "Variants are named after the role keywords.")]
pub enum AccessibilityRole {
    #[default]
    None,
    Button,
    DropDownList,
    ToggleButton,
    Link,
    Search,
    Image,
    ImageButton,
    KeyboardKey,
    Text,
    Adjustable,
    Summary,
    Header,
    Alert,
    CheckBox,
    ComboBox,
    Menu,
    MenuBar,
    MenuItem,
    ProgressBar,
    Radio,
    RadioGroup,
    ScrollBar,
    SpinButton,
    Switch,
    Tab,
    TabList,
    Timer,
    List,
    Grid,
    Toolbar,
}

impl AccessibilityRole {
    /// Parses a role keyword.
    ///
    /// ```
    /// use text_primitives::AccessibilityRole;
    ///
    /// assert_eq!(AccessibilityRole::parse("link"), Some(AccessibilityRole::Link));
    /// assert_eq!(AccessibilityRole::parse("checkbox"), Some(AccessibilityRole::CheckBox));
    /// assert_eq!(AccessibilityRole::parse("hyperlink"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "none" => Self::None,
            "button" => Self::Button,
            "dropdownlist" => Self::DropDownList,
            "togglebutton" => Self::ToggleButton,
            "link" => Self::Link,
            "search" => Self::Search,
            "image" | "img" => Self::Image,
            "imagebutton" => Self::ImageButton,
            "keyboardkey" => Self::KeyboardKey,
            "text" => Self::Text,
            "adjustable" => Self::Adjustable,
            "summary" => Self::Summary,
            "header" | "heading" => Self::Header,
            "alert" => Self::Alert,
            "checkbox" => Self::CheckBox,
            "combobox" => Self::ComboBox,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "progressbar" => Self::ProgressBar,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "scrollbar" => Self::ScrollBar,
            "spinbutton" => Self::SpinButton,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "timer" => Self::Timer,
            "list" => Self::List,
            "grid" => Self::Grid,
            "toolbar" => Self::Toolbar,
            _ => return None,
        })
    }
}
