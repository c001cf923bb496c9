use async_trait::async_trait;
use ferrous_arpwatch_domain::DomainError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs an OS introspection command and returns its standard output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, DomainError>;
}

/// Spawns real processes, each bounded by `timeout` and killed when the
/// timeout elapses.
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, DomainError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(DomainError::CommandExecutionFailure {
                    program: program.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(DomainError::CommandTimeout {
                    program: program.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
        };

        if !output.status.success() {
            return Err(DomainError::CommandExecutionFailure {
                program: program.to_string(),
                reason: output.status.to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(program, bytes = stdout.len(), "Command completed");
        Ok(stdout)
    }
}
