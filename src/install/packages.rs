//! Package-manager commands for installing and removing Tcl/Tk.

use crate::detection::PackageManager;
use crate::shell::Invocation;
use crate::version::SupportedVersion;

/// The commands that install Tcl/Tk with one package manager, and the
/// commands that undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub manager: PackageManager,
    pub install: Vec<Invocation>,
    pub rollback: Vec<Invocation>,
}

impl InstallPlan {
    /// Build the plan for `manager`.
    ///
    /// Commands for managers that need root get `sudo` unless `elevated`.
    pub fn for_manager(
        manager: PackageManager,
        supported: &SupportedVersion,
        elevated: bool,
    ) -> Self {
        let packages = packages(manager, supported);
        let exe = manager.executable();

        let (install, rollback) = match manager {
            PackageManager::Apt => (
                vec![
                    Invocation::new(exe).arg("update"),
                    Invocation::new(exe)
                        .args(["install", "-y"])
                        .args(packages.iter().cloned()),
                ],
                vec![Invocation::new(exe)
                    .args(["remove", "-y"])
                    .args(packages.iter().cloned())],
            ),
            PackageManager::Dnf => (
                vec![Invocation::new(exe)
                    .args(["install", "-y"])
                    .args(packages.iter().cloned())],
                vec![Invocation::new(exe)
                    .args(["remove", "-y"])
                    .args(packages.iter().cloned())],
            ),
            PackageManager::Pacman => (
                vec![Invocation::new(exe)
                    .args(["-S", "--noconfirm"])
                    .args(packages.iter().cloned())],
                vec![Invocation::new(exe)
                    .args(["-R", "--noconfirm"])
                    .args(packages.iter().cloned())],
            ),
            PackageManager::Homebrew => (
                vec![
                    Invocation::new(exe)
                        .arg("install")
                        .args(packages.iter().cloned()),
                    Invocation::new(exe)
                        .args(["link", "--overwrite", "--force"])
                        .args(packages.iter().cloned()),
                ],
                vec![
                    Invocation::new(exe)
                        .arg("unlink")
                        .args(packages.iter().cloned()),
                    Invocation::new(exe)
                        .arg("uninstall")
                        .args(packages.iter().cloned()),
                ],
            ),
            PackageManager::Chocolatey => (
                vec![Invocation::new(exe)
                    .arg("install")
                    .args(packages.iter().cloned())
                    .arg("-y")],
                vec![Invocation::new(exe)
                    .arg("uninstall")
                    .args(packages.iter().cloned())
                    .arg("-y")],
            ),
        };

        let sudo = manager.needs_root() && !elevated;
        let wrap = |cmds: Vec<Invocation>| -> Vec<Invocation> {
            if sudo {
                cmds.into_iter().map(Invocation::elevated).collect()
            } else {
                cmds
            }
        };

        Self {
            manager,
            install: wrap(install),
            rollback: wrap(rollback),
        }
    }
}

/// Package names for `manager`.
pub fn packages(manager: PackageManager, supported: &SupportedVersion) -> Vec<String> {
    let v = supported.as_str();
    match manager {
        PackageManager::Apt => vec![
            format!("tcl{v}"),
            format!("tk{v}"),
            format!("tcl{v}-dev"),
            format!("tk{v}-dev"),
        ],
        PackageManager::Dnf => ["tcl", "tk", "tcl-devel", "tk-devel"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        PackageManager::Pacman => vec!["tcl".to_string(), "tk".to_string()],
        PackageManager::Homebrew => vec![format!("tcl-tk@{}", supported.major())],
        PackageManager::Chocolatey => vec!["activetcl".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(cmds: &[Invocation]) -> Vec<String> {
        cmds.iter().map(Invocation::display).collect()
    }

    #[test]
    fn apt_updates_then_installs_versioned_packages_with_sudo() {
        let plan = InstallPlan::for_manager(PackageManager::Apt, &SupportedVersion::default(), false);
        assert_eq!(
            rendered(&plan.install),
            vec![
                "sudo apt-get update",
                "sudo apt-get install -y tcl8.6 tk8.6 tcl8.6-dev tk8.6-dev",
            ]
        );
        assert_eq!(
            rendered(&plan.rollback),
            vec!["sudo apt-get remove -y tcl8.6 tk8.6 tcl8.6-dev tk8.6-dev"]
        );
    }

    #[test]
    fn elevated_process_skips_sudo() {
        let plan = InstallPlan::for_manager(PackageManager::Dnf, &SupportedVersion::default(), true);
        assert_eq!(
            rendered(&plan.install),
            vec!["dnf install -y tcl tk tcl-devel tk-devel"]
        );
    }

    #[test]
    fn pacman_rollback_removes() {
        let plan =
            InstallPlan::for_manager(PackageManager::Pacman, &SupportedVersion::default(), true);
        assert_eq!(rendered(&plan.rollback), vec!["pacman -R --noconfirm tcl tk"]);
    }

    #[test]
    fn homebrew_installs_and_force_links_without_sudo() {
        let plan =
            InstallPlan::for_manager(PackageManager::Homebrew, &SupportedVersion::default(), false);
        assert_eq!(
            rendered(&plan.install),
            vec![
                "brew install tcl-tk@8",
                "brew link --overwrite --force tcl-tk@8",
            ]
        );
        assert_eq!(
            rendered(&plan.rollback),
            vec!["brew unlink tcl-tk@8", "brew uninstall tcl-tk@8"]
        );
    }

    #[test]
    fn chocolatey_installs_activetcl() {
        let plan =
            InstallPlan::for_manager(PackageManager::Chocolatey, &SupportedVersion::default(), false);
        assert_eq!(rendered(&plan.install), vec!["choco install activetcl -y"]);
        assert_eq!(rendered(&plan.rollback), vec!["choco uninstall activetcl -y"]);
    }
}
