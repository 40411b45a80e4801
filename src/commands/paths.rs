use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use crate::runtime::Runtime;
use crate::service::PackageLocations;

/// Resolve where built-in and installed packages live.
#[tracing::instrument(skip(runtime))]
pub fn resolve_locations<R: Runtime>(
    runtime: &R,
    dotnet_root: Option<PathBuf>,
    packages_dir: Option<PathBuf>,
) -> Result<PackageLocations> {
    let dotnet_root = match dotnet_root {
        Some(path) => path,
        None => default_dotnet_root(runtime),
    };
    let packages_dir = match packages_dir {
        Some(path) => path,
        None => default_packages_dir(runtime)?,
    };

    info!("Using dotnet root: {}", dotnet_root.display());
    info!("Using packages directory: {}", packages_dir.display());

    Ok(PackageLocations {
        templates_root: dotnet_root.join("templates"),
        packages_dir,
    })
}

/// `DOTNET_ROOT` if set, otherwise the platform's standard install location.
#[tracing::instrument(skip(runtime))]
pub fn default_dotnet_root<R: Runtime>(runtime: &R) -> PathBuf {
    match runtime.env_var("DOTNET_ROOT") {
        Ok(root) if !root.is_empty() => PathBuf::from(root),
        _ => system_dotnet_root(),
    }
}

/// `~/.templateengine/packages`
#[tracing::instrument(skip(runtime))]
pub fn default_packages_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let home_dir = runtime
        .home_dir()
        .context("Could not find home directory")?;
    Ok(home_dir.join(".templateengine").join("packages"))
}

#[cfg(target_os = "macos")]
fn system_dotnet_root() -> PathBuf {
    PathBuf::from("/usr/local/share/dotnet")
}

#[cfg(target_os = "windows")]
fn system_dotnet_root() -> PathBuf {
    PathBuf::from(r"C:\Program Files\dotnet")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_dotnet_root() -> PathBuf {
    PathBuf::from("/usr/share/dotnet")
}
