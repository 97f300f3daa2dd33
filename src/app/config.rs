use gtk::gdk;
use gtk4 as gtk;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StartCapture,
    Cancel,
    Copy,
    Save,
}

impl Action {
    pub fn label(&self) -> &str {
        match self {
            Action::StartCapture => "Start Capture",
            Action::Cancel => "Cancel Capture / Close Viewer",
            Action::Copy => "Copy to Clipboard",
            Action::Save => "Save Image",
        }
    }

    #[cfg(test)]
    pub fn all() -> &'static [Action] {
        &[Action::StartCapture, Action::Cancel, Action::Copy, Action::Save]
    }
}

#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: gdk::Key,
    pub modifiers: gdk::ModifierType,
}

#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    bindings: HashMap<Action, Shortcut>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            Action::StartCapture,
            Shortcut {
                key: gdk::Key::n,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );
        bindings.insert(
            Action::Cancel,
            Shortcut {
                key: gdk::Key::Escape,
                modifiers: gdk::ModifierType::empty(),
            },
        );
        bindings.insert(
            Action::Copy,
            Shortcut {
                key: gdk::Key::c,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );
        bindings.insert(
            Action::Save,
            Shortcut {
                key: gdk::Key::s,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );

        Self { bindings }
    }
}

impl ShortcutConfig {
    pub fn get_action(&self, key: gdk::Key, modifiers: gdk::ModifierType) -> Option<Action> {
        // Filter out irrelevant modifiers like NumLock/CapsLock/ScrollLock
        let mask = gdk::ModifierType::CONTROL_MASK
            | gdk::ModifierType::SHIFT_MASK
            | gdk::ModifierType::ALT_MASK
            | gdk::ModifierType::SUPER_MASK
            | gdk::ModifierType::META_MASK;

        let clean_mods = modifiers & mask;
        let key = key.to_lower();

        self.bindings
            .iter()
            .find(|(_, shortcut)| shortcut.key == key && shortcut.modifiers == clean_mods)
            .map(|(action, _)| *action)
    }

    pub fn get_shortcut_label(&self, action: Action) -> String {
        if let Some(sc) = self.bindings.get(&action) {
            return gtk::accelerator_get_label(sc.key, sc.modifiers).to_string();
        }
        String::new()
    }
}

/// Fixed tunables of the application. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pause between hiding the overlay and reading screen pixels
    pub settle_delay: Duration,
    /// How often the pointer position is checked for the cancel button
    pub hover_poll_interval: Duration,
    /// The cancel button shows while the pointer is this close to the top edge
    pub hover_zone: f64,
    pub overlay_opacity: f64,
    /// Selection outline color (RGB) and width
    pub outline_rgb: (f64, f64, f64),
    pub outline_width: f64,
    pub thumbnail_width: i32,
    pub thumbnail_height: i32,
    pub thumbnail_margin: i32,
    pub launcher_size: (i32, i32),
    pub gallery_size: (i32, i32),
    pub viewer_size: (i32, i32),
    pub default_file_name: String,
    pub shortcuts: ShortcutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            hover_poll_interval: Duration::from_millis(100),
            hover_zone: 50.0,
            overlay_opacity: 0.5,
            outline_rgb: (1.0, 0.0, 0.0),
            outline_width: 2.0,
            thumbnail_width: 200,
            thumbnail_height: 150,
            thumbnail_margin: 10,
            launcher_size: (400, 300),
            gallery_size: (800, 600),
            viewer_size: (700, 700),
            default_file_name: "image.png".to_string(),
            shortcuts: ShortcutConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let shortcuts = ShortcutConfig::default();
        assert_eq!(
            shortcuts.get_action(gdk::Key::c, gdk::ModifierType::CONTROL_MASK),
            Some(Action::Copy)
        );
        assert_eq!(
            shortcuts.get_action(gdk::Key::s, gdk::ModifierType::CONTROL_MASK),
            Some(Action::Save)
        );
        assert_eq!(
            shortcuts.get_action(gdk::Key::Escape, gdk::ModifierType::empty()),
            Some(Action::Cancel)
        );
        assert_eq!(
            shortcuts.get_action(gdk::Key::n, gdk::ModifierType::CONTROL_MASK),
            Some(Action::StartCapture)
        );
    }

    #[test]
    fn test_lock_modifiers_are_ignored() {
        let shortcuts = ShortcutConfig::default();
        let mods = gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::LOCK_MASK;
        assert_eq!(shortcuts.get_action(gdk::Key::C, mods), Some(Action::Copy));
    }

    #[test]
    fn test_unbound_keys() {
        let shortcuts = ShortcutConfig::default();
        assert_eq!(
            shortcuts.get_action(gdk::Key::c, gdk::ModifierType::empty()),
            None
        );
        assert_eq!(
            shortcuts.get_action(
                gdk::Key::s,
                gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::SHIFT_MASK
            ),
            None
        );
    }

    #[test]
    fn test_every_action_is_bound() {
        let shortcuts = ShortcutConfig::default();
        for action in Action::all() {
            assert!(shortcuts.bindings.contains_key(action), "{:?}", action);
        }
    }

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.hover_poll_interval, Duration::from_millis(100));
        assert_eq!((config.thumbnail_width, config.thumbnail_height), (200, 150));
        assert_eq!(config.default_file_name, "image.png");
    }
}
