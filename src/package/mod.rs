//! Package identity, discovery and reconciliation.
//!
//! Local template packages are plain archives on disk. Their name and
//! version come from the file name; the reconciler uses that to annotate
//! catalog records with installation status.

mod discovery;
mod identity;
mod reconcile;

pub use discovery::{find_built_in_packages, find_package_archives};
pub use identity::{PackageIdentity, has_archive_extension, parse_identity};
pub use reconcile::{latest_versions, merge};
