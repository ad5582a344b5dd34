//! The `locate` command: run only the library search.

use serde_json::json;

use crate::cli::args::LocateArgs;
use crate::config::SetupConfig;
use crate::error::Result;
use crate::locator::{locate, ResolvedLocation, SearchPlan};
use crate::shell::HostPlatform;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct LocateCommand<'a> {
    config: &'a SetupConfig,
    platform: HostPlatform,
    args: LocateArgs,
}

impl<'a> LocateCommand<'a> {
    pub fn new(config: &'a SetupConfig, platform: HostPlatform, args: LocateArgs) -> Self {
        Self {
            config,
            platform,
            args,
        }
    }

    /// Configured plan with `--root`/`--fallback` applied.
    pub fn search_plan(&self) -> SearchPlan {
        self.config
            .search_plan(self.platform)
            .with_overrides(Some(self.args.roots.clone()), self.args.fallback.clone())
    }
}

fn render_location(location: &ResolvedLocation, ui: &mut dyn UserInterface) {
    if let Some(dir) = &location.tcl_runtime {
        ui.message(&format!("tcl runtime: {}", dir.display()));
    }
    if let Some(dir) = &location.tk_runtime {
        ui.message(&format!("tk runtime: {}", dir.display()));
    }
    for file in &location.files {
        ui.message(&format!("  {} -> {}", file.pattern, file.path.display()));
    }
}

impl Command for LocateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let plan = self.search_plan();
        let required = self.config.required_files(self.platform);
        let target = self.config.supported_version.as_version();

        let outcome = locate(&target, &plan, &required);

        if self.args.json {
            let value = match &outcome {
                Ok(location) => json!({
                    "version": target,
                    "found": true,
                    "location": location,
                }),
                Err(failure) => json!({
                    "version": target,
                    "found": false,
                    "missing": failure.missing,
                    "location": failure.partial,
                }),
            };
            let text = serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?;
            println!("{}", text);
        } else {
            match &outcome {
                Ok(location) => {
                    ui.success(&format!("Found Tcl/Tk {} support files", target));
                    render_location(location, ui);
                }
                Err(failure) => {
                    ui.error(&format!(
                        "Could not locate Tcl/Tk {} support files: {}",
                        target,
                        failure.missing.join(", ")
                    ));
                    render_location(&failure.partial, ui);
                }
            }
        }

        Ok(match outcome {
            Ok(_) => CommandResult::success(),
            Err(_) => CommandResult::failure(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::RequiredFile;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(files: Vec<RequiredFile>) -> SetupConfig {
        let mut config = SetupConfig::default();
        config.search.required_files = Some(files);
        config
    }

    #[test]
    fn cli_roots_replace_configured_roots() {
        let config = SetupConfig::default();
        let cmd = LocateCommand::new(
            &config,
            HostPlatform::Linux,
            LocateArgs {
                roots: vec!["/opt/tcl".into()],
                fallback: Some("/opt".into()),
                json: false,
            },
        );
        let plan = cmd.search_plan();
        assert_eq!(plan.roots, vec![std::path::PathBuf::from("/opt/tcl")]);
        assert_eq!(plan.fallback, Some("/opt".into()));
    }

    #[test]
    fn no_cli_roots_keeps_defaults() {
        let config = SetupConfig::default();
        let cmd = LocateCommand::new(&config, HostPlatform::Linux, LocateArgs::default());
        assert_eq!(cmd.search_plan().roots[0], std::path::PathBuf::from("/usr/lib"));
    }

    #[test]
    fn reports_found_files() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("tclConfig.sh"), "").unwrap();

        let config = config_with(vec![RequiredFile::tcl("tclConfig.sh")]);
        let cmd = LocateCommand::new(
            &config,
            HostPlatform::Linux,
            LocateArgs {
                roots: vec![temp.path().to_path_buf()],
                fallback: Some(temp.path().to_path_buf()),
                json: false,
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message(&format!("tcl runtime: {}", sub.display())));
    }

    #[test]
    fn missing_files_fail_with_exit_one() {
        let temp = TempDir::new().unwrap();
        let config = config_with(vec![RequiredFile::tk("tk.h")]);
        let cmd = LocateCommand::new(
            &config,
            HostPlatform::Linux,
            LocateArgs {
                roots: vec![temp.path().to_path_buf()],
                fallback: Some(temp.path().to_path_buf()),
                json: false,
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("tk.h"));
    }
}
