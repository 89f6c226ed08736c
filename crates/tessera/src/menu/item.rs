//! Menu item model.
//!
//! A context menu is an ordered `Vec<MenuItem>`. Each entry is exactly one of
//! an action, a toggle, a divider, a group label or a submenu; the enum makes
//! the combinations that make no sense (a divider with a title, a submenu
//! that also dispatches an action) unrepresentable.

use std::fmt;
use std::sync::Arc;

/// A callback attached to a menu entry.
///
/// Two callbacks compare equal only if they are the same allocation.
pub struct Callback<Args>(Arc<dyn Fn(Args) + Send + Sync>);

impl<Args> Callback<Args> {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, args: Args) {
        (self.0)(args)
    }
}

impl<Args> Clone for Callback<Args> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<Args> PartialEq for Callback<Args> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<Args> fmt::Debug for Callback<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A clickable leaf entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuAction {
    /// Display text.
    pub title: String,
    /// Icon name (e.g. `"ph:folder-open"`), resolved by the presentation layer.
    pub icon: Option<String>,
    /// Shortcut hint shown next to the title. Display only.
    pub shortcut: Option<String>,
    /// Disabled entries are shown but never dispatch.
    pub enabled: bool,
    /// Invoked when the entry is chosen.
    pub on_trigger: Option<Callback<()>>,
}

impl MenuAction {
    /// Create an enabled action with no icon, shortcut or callback.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            shortcut: None,
            enabled: true,
            on_trigger: None,
        }
    }

    /// Builder: set the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Builder: set the shortcut hint.
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Builder: set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder: set the callback.
    pub fn on_trigger<F>(mut self, f: F) -> Self
    where
        F: Fn(()) + Send + Sync + 'static,
    {
        self.on_trigger = Some(Callback::new(f));
        self
    }
}

/// A checkable entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuToggle {
    /// Display text.
    pub title: String,
    /// Icon name.
    pub icon: Option<String>,
    /// Shortcut hint.
    pub shortcut: Option<String>,
    /// Disabled entries are shown but never dispatch.
    pub enabled: bool,
    /// Current checked state, as supplied by the menu producer.
    pub checked: bool,
    /// Invoked with the requested new state when the entry is chosen.
    pub on_toggle: Option<Callback<bool>>,
}

impl MenuToggle {
    /// Create an enabled toggle.
    pub fn new(title: impl Into<String>, checked: bool) -> Self {
        Self {
            title: title.into(),
            icon: None,
            shortcut: None,
            enabled: true,
            checked,
            on_toggle: None,
        }
    }

    /// Builder: set the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Builder: set the shortcut hint.
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Builder: set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder: set the callback.
    pub fn on_toggle<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle = Some(Callback::new(f));
        self
    }
}

/// A nested menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Submenu {
    /// Display text.
    pub title: String,
    /// Icon name.
    pub icon: Option<String>,
    /// Child entries, in display order.
    pub items: Vec<MenuItem>,
}

impl Submenu {
    /// Create a submenu.
    pub fn new(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            items,
        }
    }

    /// Builder: set the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One entry of a context menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    /// A clickable leaf action.
    Action(MenuAction),
    /// A checkable leaf.
    Toggle(MenuToggle),
    /// A visual separator.
    Divider,
    /// A non-interactive group heading.
    Label(String),
    /// A nested menu.
    Submenu(Submenu),
}

impl MenuItem {
    /// Create an action entry.
    pub fn action(title: impl Into<String>) -> Self {
        Self::Action(MenuAction::new(title))
    }

    /// Create a toggle entry.
    pub fn toggle(title: impl Into<String>, checked: bool) -> Self {
        Self::Toggle(MenuToggle::new(title, checked))
    }

    /// Create a divider.
    pub fn divider() -> Self {
        Self::Divider
    }

    /// Create a group label.
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create a submenu entry.
    pub fn submenu(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self::Submenu(Submenu::new(title, items))
    }

    /// The display title, if this kind of entry has one.
    ///
    /// Labels report their text; dividers have none.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Action(action) => Some(&action.title),
            Self::Toggle(toggle) => Some(&toggle.title),
            Self::Submenu(submenu) => Some(&submenu.title),
            Self::Label(text) => Some(text),
            Self::Divider => None,
        }
    }

    /// Check if this entry is a divider.
    pub fn is_divider(&self) -> bool {
        matches!(self, Self::Divider)
    }

    /// Check if this entry opens a submenu.
    pub fn is_submenu(&self) -> bool {
        matches!(self, Self::Submenu(_))
    }

    /// Whether choosing this entry can do anything.
    ///
    /// A submenu is interactive if any entry inside it is.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Action(action) => action.enabled,
            Self::Toggle(toggle) => toggle.enabled,
            Self::Submenu(submenu) => submenu.items.iter().any(MenuItem::is_enabled),
            Self::Divider | Self::Label(_) => false,
        }
    }

    /// Child entries of a submenu, empty for every other kind.
    pub fn children(&self) -> &[MenuItem] {
        match self {
            Self::Submenu(submenu) => &submenu.items,
            _ => &[],
        }
    }

    /// Dispatch this entry as if the user chose it.
    ///
    /// Returns `true` if a callback ran. Submenus only open, so they never
    /// dispatch; neither do dividers, labels or disabled entries.
    pub fn trigger(&self) -> bool {
        match self {
            Self::Action(action) if action.enabled => match &action.on_trigger {
                Some(callback) => {
                    callback.call(());
                    true
                }
                None => false,
            },
            Self::Toggle(toggle) if toggle.enabled => match &toggle.on_toggle {
                Some(callback) => {
                    callback.call(!toggle.checked);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Find an entry by its title path, descending through submenus.
///
/// `find(&items, &["Share", "Email"])` returns the "Email" entry of the
/// "Share" submenu.
pub fn find<'a>(items: &'a [MenuItem], path: &[&str]) -> Option<&'a MenuItem> {
    let (first, rest) = path.split_first()?;
    let item = items
        .iter()
        .find(|item| !matches!(item, MenuItem::Label(_)) && item.title() == Some(*first))?;
    if rest.is_empty() {
        Some(item)
    } else {
        find(item.children(), rest)
    }
}
