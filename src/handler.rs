use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Handle a key event.
///
/// Each key fully completes its tree mutation before the caller repaints;
/// there is no other input modality.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Any keypress dismisses a stale status message.
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Right | KeyCode::Char('l') => app.expand_selected(),
        KeyCode::Left | KeyCode::Char('h') => app.collapse_selected(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.enter_selected(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::tree::NodeKind;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        File::create(dir.path().join("alpha").join("inner.txt")).unwrap();
        File::create(dir.path().join("zed.txt")).unwrap();
        let app = App::new(dir.path(), crate::theme::dark_theme(), true).unwrap();
        (dir, app)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::from(code));
    }

    #[test]
    fn q_quits() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn esc_quits() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let (_dir, mut app) = setup_app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_key_event(&mut app, key);
        assert!(app.should_quit);
    }

    #[test]
    fn arrows_move_selection() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.tree.selected_index, 1);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tree.selected_index, 0);
        // No wraparound at the top.
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tree.selected_index, 0);
    }

    #[test]
    fn vim_keys_move_selection() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.tree.selected_index, 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.tree.selected_index, 0);
    }

    #[test]
    fn right_expands_selected_dir() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Down); // ".." -> alpha
        press(&mut app, KeyCode::Right);
        let names: Vec<&str> = app.tree.flat_items.iter().map(|i| i.name.as_str()).collect();
        assert!(names.contains(&"inner.txt"));
    }

    #[test]
    fn left_collapses_expanded_dir() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Left);
        let names: Vec<&str> = app.tree.flat_items.iter().map(|i| i.name.as_str()).collect();
        assert!(!names.contains(&"inner.txt"));
    }

    #[test]
    fn enter_descends_into_dir() {
        let (dir, mut app) = setup_app();
        press(&mut app, KeyCode::Down); // alpha
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tree.root_path, dir.path().join("alpha"));
    }

    #[test]
    fn home_end_jump() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::End);
        assert_eq!(app.tree.selected_index, app.tree.flat_items.len() - 1);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.tree.selected_index, 0);
    }

    #[test]
    fn unbound_key_is_ignored() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.should_quit);
        assert_eq!(app.tree.selected_index, 0);
    }

    #[test]
    fn selection_in_bounds_after_random_walk() {
        let (_dir, mut app) = setup_app();
        let keys = [
            KeyCode::Down,
            KeyCode::Right,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Left,
            KeyCode::Up,
            KeyCode::Right,
            KeyCode::End,
            KeyCode::Left,
            KeyCode::Down,
        ];
        for code in keys {
            press(&mut app, code);
            assert!(
                app.tree.selected_index < app.tree.flat_items.len(),
                "selection out of bounds after {code:?}"
            );
        }
        // The walk must have left a coherent tree: every row still resolves.
        assert!(app
            .tree
            .flat_items
            .iter()
            .all(|i| i.is_parent_link || i.kind == NodeKind::Directory || i.path.is_file()));
    }
}
