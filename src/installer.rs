//! Template package installation through the dotnet CLI.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use std::process::Stdio;
use tokio::process::Command;

/// Installs and uninstalls template packages by catalog id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateInstaller: Send + Sync {
    async fn install(&self, package_id: &str) -> Result<()>;
    async fn uninstall(&self, package_id: &str) -> Result<()>;
}

/// Runs `dotnet new install` / `dotnet new uninstall`.
pub struct DotnetCli {
    program: String,
}

impl Default for DotnetCli {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

impl DotnetCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn run_new(&self, action: &str, package_id: &str) -> Result<()> {
        if package_id.trim().is_empty() {
            bail!("Package id must not be empty");
        }

        debug!("Running {} new {} {}", self.program, action, package_id);
        let output = Command::new(&self.program)
            .args(["new", action, package_id])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {} new {}", self.program, action))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} new {} {} failed ({}): {}",
                self.program,
                action,
                package_id,
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl TemplateInstaller for DotnetCli {
    async fn install(&self, package_id: &str) -> Result<()> {
        self.run_new("install", package_id).await
    }

    async fn uninstall(&self, package_id: &str) -> Result<()> {
        self.run_new("uninstall", package_id).await
    }
}
