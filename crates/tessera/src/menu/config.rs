//! Menu definitions and resolver configuration loaded from TOML.
//!
//! ```toml
//! max_ancestor_depth = 256
//!
//! [[default_menu]]
//! label = "Files"
//!
//! [[default_menu]]
//! title = "Open"
//! icon = "ph:folder-open"
//! shortcut = "⌘O"
//!
//! [[default_menu]]
//! divider = true
//!
//! [[default_menu]]
//! title = "Share"
//! items = [{ title = "Email" }, { title = "Copy Link", disabled = true }]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults::default_menu;
use super::item::{MenuAction, MenuItem, MenuToggle, Submenu};
use crate::error::{Error, Result};

/// Default ceiling on the number of nodes an ancestor walk visits.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 4096;

/// The loose, data-only shape of a menu entry.
///
/// Every field is optional; [`MenuDefinition::into_item`] decides which kind
/// of [`MenuItem`] the entry is. Precedence, highest first: `divider`,
/// `items` (submenu), `label` without `title`, `checked` (toggle), action.
/// `selected` is accepted as another name for `checked`; any other unknown
/// key is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuDefinition {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub shortcut: Option<String>,
    pub disabled: bool,
    pub divider: bool,
    pub label: Option<String>,
    pub items: Option<Vec<MenuDefinition>>,
    #[serde(alias = "selected")]
    pub checked: Option<bool>,
}

impl MenuDefinition {
    /// Convert into a menu item. `path` names the entry in error messages.
    pub fn into_item(self, path: &str) -> Result<MenuItem> {
        if self.divider {
            return Ok(MenuItem::Divider);
        }

        if let Some(children) = self.items {
            let title = self
                .title
                .ok_or_else(|| Error::invalid_menu_item(path, "submenu requires a title"))?;
            let items = build_menu_at(children, &format!("{path}.items"))?;
            let mut submenu = Submenu::new(title, items);
            submenu.icon = self.icon;
            return Ok(MenuItem::Submenu(submenu));
        }

        let title = match (self.title, self.label) {
            (Some(title), _) => title,
            (None, Some(label)) => return Ok(MenuItem::Label(label)),
            (None, None) => {
                return Err(Error::invalid_menu_item(
                    path,
                    "entry needs a title, a label or divider = true",
                ))
            }
        };

        let item = match self.checked {
            Some(checked) => MenuItem::Toggle(MenuToggle {
                icon: self.icon,
                shortcut: self.shortcut,
                enabled: !self.disabled,
                ..MenuToggle::new(title, checked)
            }),
            None => MenuItem::Action(MenuAction {
                icon: self.icon,
                shortcut: self.shortcut,
                enabled: !self.disabled,
                ..MenuAction::new(title)
            }),
        };
        Ok(item)
    }
}

/// Convert a list of definitions into menu items, in order.
pub fn build_menu(definitions: Vec<MenuDefinition>) -> Result<Vec<MenuItem>> {
    build_menu_at(definitions, "menu")
}

fn build_menu_at(definitions: Vec<MenuDefinition>, path: &str) -> Result<Vec<MenuItem>> {
    definitions
        .into_iter()
        .enumerate()
        .map(|(i, definition)| definition.into_item(&format!("{path}[{i}]")))
        .collect()
}

/// Configuration for a [`ContextMenuRegistry`](super::ContextMenuRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextMenuConfig {
    /// Ceiling on the number of nodes an ancestor walk visits.
    pub max_ancestor_depth: usize,
    /// Replacement for the built-in default menu.
    pub default_menu: Option<Vec<MenuDefinition>>,
}

impl Default for ContextMenuConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            default_menu: None,
        }
    }
}

impl ContextMenuConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            target: tessera_core::logging::targets::MENU,
            path = %path.display(),
            "loaded context menu configuration"
        );
        Ok(config)
    }

    /// Check value ranges and that the default menu definitions convert.
    pub fn validate(&self) -> Result<()> {
        if self.max_ancestor_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_ancestor_depth must be at least 1".to_string(),
            ));
        }
        self.default_items().map(|_| ())
    }

    /// The default menu this configuration describes.
    pub fn default_items(&self) -> Result<Vec<MenuItem>> {
        match &self.default_menu {
            Some(definitions) => build_menu_at(definitions.clone(), "default_menu"),
            None => Ok(default_menu()),
        }
    }
}
