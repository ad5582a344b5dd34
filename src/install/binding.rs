//! Installs the language binding against the located Tcl/Tk.

use std::path::Path;

use tracing::info;

use crate::config::BindingSettings;
use crate::error::{Result, SetupError};
use crate::locator::{ResolvedLocation, Role};
use crate::shell::{HostPlatform, Invocation};
use crate::version::SupportedVersion;

use super::{run_checked, CommandRunner};

/// `gem install tk -- --with-tcltkversion=8.6 --with-tcl-lib=...`
///
/// Library directories come from the resolved shared libraries, falling
/// back to each role's runtime directory. Flags whose directory is unknown
/// are left out.
pub fn binding_invocation(
    settings: &BindingSettings,
    version: &SupportedVersion,
    location: &ResolvedLocation,
    platform: HostPlatform,
) -> Invocation {
    let mut invocation = Invocation::new(&settings.program)
        .args(["install", settings.package.as_str(), "--"])
        .arg(format!("--with-tcltkversion={}", version));

    let flags = [
        ("--with-tcl-lib", library_dir(location, Role::Tcl, platform)),
        ("--with-tk-lib", library_dir(location, Role::Tk, platform)),
        ("--with-tcl-include", location.include_dir(Role::Tcl)),
        ("--with-tk-include", location.include_dir(Role::Tk)),
    ];
    for (flag, dir) in flags {
        if let Some(dir) = dir {
            invocation = invocation.arg(format!("{}={}", flag, dir.display()));
        }
    }

    invocation
}

fn library_dir(location: &ResolvedLocation, role: Role, platform: HostPlatform) -> Option<&Path> {
    let ext = format!(".{}", platform.library_extension());
    location
        .files
        .iter()
        .filter(|f| f.role == role)
        .find(|f| {
            f.path
                .file_name()
                .map(|n| n.to_string_lossy().to_ascii_lowercase().contains(&ext))
                .unwrap_or(false)
        })
        .and_then(|f| f.path.parent())
        .or_else(|| location.runtime(role))
}

/// Run the binding install; any failure is terminal.
pub fn install_binding(
    invocation: &Invocation,
    settings: &BindingSettings,
    run: CommandRunner<'_>,
) -> Result<()> {
    run_checked(run, invocation).map_err(|message| SetupError::BindingInstallFailed {
        package: settings.package.clone(),
        message,
    })?;
    info!(package = %settings.package, "Binding installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ResolvedFile;
    use crate::shell::CommandResult;
    use std::path::PathBuf;
    use std::time::Duration;

    fn file(pattern: &str, role: Role, path: &str) -> ResolvedFile {
        ResolvedFile {
            pattern: pattern.to_string(),
            role,
            path: PathBuf::from(path),
        }
    }

    fn location() -> ResolvedLocation {
        ResolvedLocation {
            tcl_runtime: Some(PathBuf::from("/usr/lib/tcl8.6")),
            tk_runtime: Some(PathBuf::from("/usr/lib/tk8.6")),
            files: vec![
                file("tclConfig.sh", Role::Tcl, "/usr/lib/tcl8.6/tclConfig.sh"),
                file("tkConfig.sh", Role::Tk, "/usr/lib/tk8.6/tkConfig.sh"),
                file(
                    "libtcl8.6.so*",
                    Role::Tcl,
                    "/usr/lib/x86_64-linux-gnu/libtcl8.6.so",
                ),
                file("tcl.h", Role::Tcl, "/usr/include/tcl8.6/tcl.h"),
                file("tk.h", Role::Tk, "/usr/include/tcl8.6/tk.h"),
            ],
        }
    }

    #[test]
    fn builds_gem_command_with_directories() {
        let inv = binding_invocation(
            &BindingSettings::default(),
            &SupportedVersion::default(),
            &location(),
            HostPlatform::Linux,
        );

        assert_eq!(inv.program, PathBuf::from("gem"));
        assert_eq!(
            inv.args,
            vec![
                "install",
                "tk",
                "--",
                "--with-tcltkversion=8.6",
                "--with-tcl-lib=/usr/lib/x86_64-linux-gnu",
                "--with-tk-lib=/usr/lib/tk8.6",
                "--with-tcl-include=/usr/include/tcl8.6",
                "--with-tk-include=/usr/include/tcl8.6",
            ]
        );
    }

    #[test]
    fn unknown_directories_are_omitted() {
        let inv = binding_invocation(
            &BindingSettings::default(),
            &SupportedVersion::default(),
            &ResolvedLocation::default(),
            HostPlatform::Linux,
        );
        assert_eq!(inv.args, vec!["install", "tk", "--", "--with-tcltkversion=8.6"]);
    }

    #[test]
    fn failure_is_binding_install_failed() {
        let settings = BindingSettings::default();
        let inv = Invocation::new("gem").arg("install");
        let run = |_: &Invocation| -> Result<CommandResult> {
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                "ERROR: Failed to build gem native extension.".to_string(),
                Duration::ZERO,
            ))
        };

        let err = install_binding(&inv, &settings, &run).unwrap_err();
        match err {
            SetupError::BindingInstallFailed { package, message } => {
                assert_eq!(package, "tk");
                assert!(message.contains("native extension"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
