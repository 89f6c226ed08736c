//! Walkthrough of context menus and selection in a small file-manager shell.
//!
//! Run with logging enabled:
//!
//! ```text
//! RUST_LOG=tessera=trace cargo run -p tessera --example desktop_shell
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tessera::menu::{ContextMenuRegistry, MenuAction, MenuItem, MenuProducer, MenuToggle};
use tessera::selection::{ItemList, SelectModifiers, SelectionController};
use tessera::tessera_core::{NodeTree, NodeTreeDebug};
use tracing_subscriber::EnvFilter;

fn print_menu(label: &str, items: &[MenuItem], depth: usize) {
    if depth == 0 {
        println!("{label}:");
    }
    let indent = "  ".repeat(depth + 1);
    for item in items {
        match item {
            MenuItem::Divider => println!("{indent}----"),
            MenuItem::Label(text) => println!("{indent}[{text}]"),
            MenuItem::Action(action) => println!(
                "{indent}{}{}",
                action.title,
                action
                    .shortcut
                    .as_deref()
                    .map(|s| format!("  ({s})"))
                    .unwrap_or_default()
            ),
            MenuItem::Toggle(toggle) => {
                let mark = if toggle.checked { "x" } else { " " };
                println!("{indent}[{mark}] {}", toggle.title);
            }
            MenuItem::Submenu(submenu) => {
                println!("{indent}{} >", submenu.title);
                print_menu(label, &submenu.items, depth + 1);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Visual tree: body -> window -> { toolbar, file-list -> rows }
    let mut tree = NodeTree::new();
    let body = tree.create("body");
    tree.set_root_boundary(body, true)?;
    let window = tree.create_child(body, "window")?;
    let toolbar = tree.create_child(window, "toolbar")?;
    tree.set_suppression_marker(toolbar, true)?;
    let file_list = tree.create_child(window, "file-list")?;
    let rows: Vec<_> = (0..4)
        .map(|i| tree.create_child(file_list, format!("row-{i}")))
        .collect::<Result<_, _>>()?;

    println!("{}", NodeTreeDebug::new().format_subtree(&tree, body)?);

    let files = Arc::new(ItemList::new(vec![
        "notes.md".to_string(),
        "budget.xlsx".to_string(),
        "photo.png".to_string(),
        "todo.txt".to_string(),
    ]));
    let selection = Arc::new(Mutex::new(SelectionController::new(files.clone())));
    let show_hidden = Arc::new(Mutex::new(false));

    let mut menus = ContextMenuRegistry::new();
    {
        let selection = selection.clone();
        let show_hidden = show_hidden.clone();
        menus.set(
            &tree,
            file_list,
            MenuProducer::new(move || {
                let count = selection.lock().selected_count();
                let hidden = *show_hidden.lock();
                let toggle_target = show_hidden.clone();
                vec![
                    MenuItem::label(format!("{count} selected")),
                    MenuItem::Action(MenuAction::new("Open").with_enabled(count == 1)),
                    MenuItem::Action(
                        MenuAction::new("Delete")
                            .with_shortcut("⌫")
                            .with_enabled(count > 0),
                    ),
                    MenuItem::divider(),
                    MenuItem::Toggle(
                        MenuToggle::new("Show hidden files", hidden)
                            .on_toggle(move |state| *toggle_target.lock() = state),
                    ),
                ]
            }),
        );
    }

    {
        let mut selection = selection.lock();
        selection.select(files.get(1).unwrap_or_default(), SelectModifiers::NONE);
        selection.select(files.get(3).unwrap_or_default(), SelectModifiers::SHIFT);
        println!("selected: {:?}", selection.selected());
    }

    let row_menu = menus.resolve(&tree, rows[2]);
    print_menu("row-2", &row_menu.items(), 0);

    if let Some(toggle) = row_menu
        .items()
        .iter()
        .find(|item| item.title() == Some("Show hidden files"))
    {
        toggle.trigger();
    }
    // Same resolved menu, produced again at display time.
    print_menu("row-2 after toggle", &row_menu.items(), 0);

    let toolbar_menu = menus.resolve(&tree, toolbar);
    println!("toolbar suppressed: {}", toolbar_menu.is_suppressed());

    print_menu("window", &menus.resolve(&tree, window).items(), 0);

    let removed = tree.destroy(file_list)?;
    let reclaimed = menus.reclaim(|id| tree.contains(id));
    println!("destroyed {} nodes, reclaimed {reclaimed} bindings", removed.len());

    Ok(())
}
