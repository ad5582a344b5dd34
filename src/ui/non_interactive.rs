//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, SetupError};

use super::{parse_answer, OutputMode, Prompt, SpinnerHandle, UserInterface};

const OVERRIDE_PREFIX: &str = "TCLTK_SETUP_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Questions are answered from `TCLTK_SETUP_PROMPT_<KEY>` environment
/// variables when present, otherwise with the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(OVERRIDE_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", hint);
        }
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", OVERRIDE_PREFIX, prompt.key.to_uppercase());
        match self.env_overrides.get(&env_key) {
            Some(value) => parse_answer(value).ok_or_else(|| SetupError::ConfigValidationError {
                message: format!("{} must be yes or no, got '{}'", env_key, value),
            }),
            None => Ok(prompt.default),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            show: self.mode.shows_status(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints only the final line.
struct LineSpinner {
    show: bool,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("  ✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("  ○ {}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(key: &str, value: &str) -> NonInteractiveUI {
        let mut overrides = HashMap::new();
        overrides.insert(key.to_string(), value.to_string());
        NonInteractiveUI::with_overrides(OutputMode::Silent, overrides)
    }

    #[test]
    fn confirm_uses_default_without_override() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        assert!(ui.confirm(&Prompt::new("install", "Install?", true)).unwrap());
        assert!(!ui.confirm(&Prompt::new("install", "Install?", false)).unwrap());
    }

    #[test]
    fn confirm_honours_env_override() {
        let mut ui = ui_with("TCLTK_SETUP_PROMPT_INSTALL", "no");
        assert!(!ui.confirm(&Prompt::new("install", "Install?", true)).unwrap());
    }

    #[test]
    fn confirm_rejects_garbage_override() {
        let mut ui = ui_with("TCLTK_SETUP_PROMPT_INSTALL", "perhaps");
        let err = ui
            .confirm(&Prompt::new("install", "Install?", true))
            .unwrap_err();
        assert!(err.to_string().contains("TCLTK_SETUP_PROMPT_INSTALL"));
    }

    #[test]
    fn non_interactive_reports_not_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Normal);
    }
}
