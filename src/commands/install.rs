use anyhow::Result;

use crate::installer::{DotnetCli, TemplateInstaller};

/// Install a template package by id
#[tracing::instrument]
pub async fn install(package_id: &str) -> Result<()> {
    run_install(&DotnetCli::default(), package_id).await
}

/// Uninstall a template package by id
#[tracing::instrument]
pub async fn uninstall(package_id: &str) -> Result<()> {
    run_uninstall(&DotnetCli::default(), package_id).await
}

pub async fn run_install<I: TemplateInstaller>(installer: &I, package_id: &str) -> Result<()> {
    installer.install(package_id).await?;
    println!("Installed {}", package_id);
    Ok(())
}

pub async fn run_uninstall<I: TemplateInstaller>(installer: &I, package_id: &str) -> Result<()> {
    installer.uninstall(package_id).await?;
    println!("Uninstalled {}", package_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::MockTemplateInstaller;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_run_install() {
        let mut installer = MockTemplateInstaller::new();
        installer
            .expect_install()
            .with(eq("Foo.Templates"))
            .times(1)
            .returning(|_| Ok(()));

        assert!(run_install(&installer, "Foo.Templates").await.is_ok());
    }

    #[tokio::test]
    async fn test_run_uninstall_failure() {
        let mut installer = MockTemplateInstaller::new();
        installer
            .expect_uninstall()
            .with(eq("Foo.Templates"))
            .returning(|_| Err(anyhow::anyhow!("dotnet exited with status 1")));

        let err = run_uninstall(&installer, "Foo.Templates").await.unwrap_err();
        assert!(err.to_string().contains("status 1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_install_needs_no_package_locations() {
        // No runtime, home directory or catalog client is involved
        let installer = DotnetCli::new("true");
        assert!(run_install(&installer, "Foo.Templates").await.is_ok());
        assert!(run_uninstall(&installer, "Foo.Templates").await.is_ok());
    }
}
