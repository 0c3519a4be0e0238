use crate::config::ColorMode;
use std::io::IsTerminal;

/// Check if stderr is connected to a TTY; all of regan's output goes there
pub fn is_stderr_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Determine if colors should be used based on CLI color mode and environment
pub fn should_use_colors_with_mode(color_mode: &ColorMode) -> bool {
    match color_mode {
        ColorMode::Never => false,
        // Even with Always, respect NO_COLOR
        ColorMode::Always => std::env::var("NO_COLOR").is_err(),
        ColorMode::Auto => should_use_colors_auto(),
    }
}

fn should_use_colors_auto() -> bool {
    if !is_stderr_tty() {
        return false;
    }

    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    true
}

/// Emoji prefixes only make sense on an interactive terminal
pub fn should_use_emoji_for_stderr() -> bool {
    is_stderr_tty() && std::env::var("NO_EMOJI").is_err()
}
