#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_arpwatch_domain::DomainError;
use ferrous_arpwatch_infrastructure::system::CommandRunner;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Answers commands from a table keyed by the full command line. Unknown
/// commands behave like a missing binary.
#[derive(Default)]
pub struct ScriptedCommandRunner {
    outputs: Arc<RwLock<HashMap<String, Result<String, DomainError>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn on(self, command_line: &str, stdout: &str) -> Self {
        self.outputs
            .write()
            .await
            .insert(command_line.to_string(), Ok(stdout.to_string()));
        self
    }

    pub async fn failing(self, command_line: &str) -> Self {
        let program = command_line.split_whitespace().next().unwrap_or_default();
        self.outputs.write().await.insert(
            command_line.to_string(),
            Err(DomainError::CommandExecutionFailure {
                program: program.to_string(),
                reason: "exit status: 1".to_string(),
            }),
        );
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, DomainError> {
        let mut command_line = program.to_string();
        for arg in args {
            command_line.push(' ');
            command_line.push_str(arg);
        }
        self.calls.write().await.push(command_line.clone());

        match self.outputs.read().await.get(&command_line) {
            Some(result) => result.clone(),
            None => Err(DomainError::CommandExecutionFailure {
                program: program.to_string(),
                reason: "No such file or directory (os error 2)".to_string(),
            }),
        }
    }
}
