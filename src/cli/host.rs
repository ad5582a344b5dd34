//! The real collaborators a command runs against.

use std::time::Duration;

use tracing::debug;

use crate::config::SetupConfig;
use crate::detection::{PackageManager, PackageManagerDetector, TclshProber, VersionProbe};
use crate::error::Result;
use crate::runner::WorkflowContext;
use crate::shell::{
    execute_streaming, is_elevated, CommandOptions, CommandResult, HostPlatform, Invocation,
    OutputLine,
};

/// Host services shared by all commands.
pub struct Host {
    pub platform: HostPlatform,
    pub elevated: bool,
    pub package_manager: Option<PackageManager>,
    pub probe: Box<dyn VersionProbe>,
    pub run_command: Box<dyn Fn(&Invocation) -> Result<CommandResult>>,
    pub sleep: Box<dyn Fn(Duration)>,
}

impl Host {
    /// Detect the platform and wire up real process execution.
    ///
    /// With `echo_output`, command output is mirrored to the terminal as
    /// well as the log.
    pub fn detect(config: &SetupConfig, echo_output: bool) -> Result<Self> {
        let platform = HostPlatform::current()?;
        let package_manager = PackageManagerDetector::new().detect(platform);
        debug!(%platform, ?package_manager, "Host detected");

        let probe = TclshProber::new(config.executables(), config.interpreter_dirs(platform));

        Ok(Self {
            platform,
            elevated: is_elevated(),
            package_manager,
            probe: Box::new(probe),
            run_command: Box::new(move |invocation: &Invocation| run_logged(invocation, echo_output)),
            sleep: Box::new(std::thread::sleep),
        })
    }

    pub fn workflow_context(&self) -> WorkflowContext<'_> {
        WorkflowContext {
            probe: self.probe.as_ref(),
            run_command: self.run_command.as_ref(),
            sleep: self.sleep.as_ref(),
            package_manager: self.package_manager,
            platform: self.platform,
            elevated: self.elevated,
        }
    }
}

fn run_logged(invocation: &Invocation, echo: bool) -> Result<CommandResult> {
    let program = invocation.program.display().to_string();
    execute_streaming(
        invocation,
        &CommandOptions::default(),
        Box::new(move |line: OutputLine| match line {
            OutputLine::Stdout(text) => {
                debug!(program = %program, "{}", text);
                if echo {
                    println!("    {}", text);
                }
            }
            OutputLine::Stderr(text) => {
                debug!(program = %program, stream = "stderr", "{}", text);
                if echo {
                    eprintln!("    {}", text);
                }
            }
        }),
    )
}
