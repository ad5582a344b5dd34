//! Opens and closes a Tk window through the binding.

use tracing::info;

use crate::config::SmokeTestSettings;
use crate::error::{Result, SetupError};
use crate::shell::Invocation;
use crate::version::VersionString;

use super::{run_checked, CommandRunner};

/// The script passed to `ruby -e`. `{title}` is replaced with the window title.
const SMOKE_SCRIPT: &str = r#"require 'tk'
root = TkRoot.new { title '{title}' }
Tk.after(1000) { root.destroy }
Tk.mainloop
"#;

/// `ruby -e <script>` for a window titled with the installed version.
pub fn smoke_invocation(settings: &SmokeTestSettings, version: &VersionString) -> Invocation {
    let title = format!("Tcl/Tk {}", version);
    Invocation::new(&settings.program)
        .arg("-e")
        .arg(SMOKE_SCRIPT.replace("{title}", &title))
}

/// Run the smoke test; any failure is terminal.
pub fn run_smoke_test(invocation: &Invocation, run: CommandRunner<'_>) -> Result<()> {
    run_checked(run, invocation).map_err(|message| SetupError::SmokeTestFailed { message })?;
    info!("Smoke test window opened and closed");
    Ok(())
}
