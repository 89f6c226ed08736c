//! The application's baseline context menu.

use super::item::{MenuAction, MenuItem, Submenu};

fn entry(title: &str, icon: &str, shortcut: &str) -> MenuItem {
    MenuItem::Action(
        MenuAction::new(title)
            .with_icon(icon)
            .with_shortcut(shortcut),
    )
}

/// The menu shown wherever no node in the ancestor chain has its own binding.
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::label("Main Menu"),
        MenuItem::divider(),
        entry("Open", "ph:folder-open", "⌘O"),
        entry("Save", "ph:floppy-disk", "⌘S"),
        entry("Export", "ph:export", "⇧⌘E"),
        MenuItem::divider(),
        entry("Edit", "ph:pencil", "⌘E"),
        MenuItem::Submenu(
            Submenu::new(
                "Share",
                vec![
                    entry("Email", "ph:envelope", "⌘M"),
                    entry("Slack", "logos:slack", "⌘L"),
                    entry("Copy Link", "ph:link", "⌘C"),
                ],
            )
            .with_icon("ph:share-network"),
        ),
        MenuItem::divider(),
        entry("Preferences", "ph:gear", "⌘,"),
        entry("Help", "ph:question", "F1"),
        MenuItem::divider(),
        entry("Log out", "ph:sign-out", "⇧⌘Q"),
    ]
}
