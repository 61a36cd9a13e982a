//! Terminal capability detection

const NO_COLOR_ENV: &str = "NO_COLOR";

/// Whether stdout can show ANSI styling.
///
/// False when stdout is not a terminal, when `NO_COLOR` is set to anything
/// non-empty, or when the console rules out escape sequences (`CLICOLOR=0`,
/// dumb terminals).
pub fn colors_supported() -> bool {
    !no_color_requested(std::env::var_os(NO_COLOR_ENV).as_deref())
        && console::Term::stdout().is_term()
        && console::colors_enabled()
}

fn no_color_requested(value: Option<&std::ffi::OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_no_color_requires_a_value() {
        assert!(!no_color_requested(None));
        assert!(!no_color_requested(Some(OsStr::new(""))));
        assert!(no_color_requested(Some(OsStr::new("1"))));
    }
}
