//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for wizard actions (next, submit, suggest)
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
///
/// Ctrl is accepted on every platform as well.
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display
#[cfg(target_os = "macos")]
pub const SUBMIT_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_SHORTCUT: &str = "^S";

/// Suggestion shortcut display
#[cfg(target_os = "macos")]
pub const SUGGEST_SHORTCUT: &str = "Cmd+G";

#[cfg(not(target_os = "macos"))]
pub const SUGGEST_SHORTCUT: &str = "^G";

/// Modifier of the direct step jump (Option on macOS)
#[cfg(target_os = "macos")]
pub const JUMP_MODIFIER: &str = "Opt";

#[cfg(not(target_os = "macos"))]
pub const JUMP_MODIFIER: &str = "Alt";

/// Direct step jump display for the reachable steps, e.g. `Alt+1-5`
pub fn jump_shortcut(first: u8, last: u8) -> String {
    format!("{JUMP_MODIFIER}+{first}-{last}")
}

/// Whether `modifiers` hold the action modifier (or Ctrl)
pub fn is_action(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | ACTION_MODIFIER)
}
