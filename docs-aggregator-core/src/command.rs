use std::path::Path;
use std::process::Command;

use tracing::{error, info};

use crate::error::{Error, Result};

/// Runs `program args..` to completion, optionally inside `cwd`.
///
/// A launch failure or a non-zero exit is an error naming the tool.
pub(crate) fn run_tool(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    let invocation = format!("{program} {}", args.join(" "));

    match cmd.status() {
        Ok(s) if s.success() => {
            info!(command = %invocation, status = ?s, "External tool finished");
            Ok(())
        }
        Ok(s) => {
            error!(command = %invocation, "External tool exited with non-zero code: {}", s);
            Err(Error::ExternalTool {
                tool: invocation,
                status: s.to_string(),
            })
        }
        Err(e) => {
            error!(error = ?e, command = %invocation, "Failed to launch external tool");
            Err(Error::ToolLaunch {
                tool: program.to_string(),
                source: e,
            })
        }
    }
}
