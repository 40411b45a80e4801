//! Command implementations behind the `tplpkg` binary.

pub mod config;
mod install;
mod list;
mod paths;
mod templates;

pub use config::{Config, ConfigOptions};
pub use install::{install, run_install, run_uninstall, uninstall};
pub use list::{list, run_list};
pub use paths::{default_dotnet_root, default_packages_dir, resolve_locations};
pub use templates::{inspect, templates};
