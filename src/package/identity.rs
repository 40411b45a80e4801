//! Package identity derived from conventional archive file names.
//!
//! Package archives are named `<name>.<major>.<minor>.<patch>[-<suffix>].<ext>`,
//! e.g. `Microsoft.DotNet.Web.ProjectTemplates.8.0.1.nupkg`. Anything else
//! parses to an empty identity rather than an error.

/// Recognised archive extensions, compared case-insensitively.
const ARCHIVE_EXTENSIONS: &[&str] = &[".nupkg", ".zip", ".tar.gz", ".tgz"];

/// Name and version of a package as encoded in its archive file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
}

impl PackageIdentity {
    /// True when the file name did not follow the package naming convention.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.version.is_empty()
    }
}

/// Parse a package identity from a file name or path.
///
/// Only the last path component is considered (either separator style).
/// The name ends at the first dot that is followed by a well-formed version,
/// so prerelease suffixes containing dotted numbers stay in the version.
pub fn parse_identity(file_name: &str) -> PackageIdentity {
    let base_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);

    let Some(stem) = strip_archive_extension(base_name) else {
        return PackageIdentity::default();
    };

    for (dot, _) in stem.match_indices('.') {
        let version = &stem[dot + 1..];
        if is_version(version) {
            return PackageIdentity {
                name: stem[..dot].to_string(),
                version: version.to_string(),
            };
        }
    }

    PackageIdentity::default()
}

/// True when the file name ends with a recognised archive extension.
pub fn has_archive_extension(file_name: &str) -> bool {
    strip_archive_extension(file_name).is_some()
}

fn strip_archive_extension(file_name: &str) -> Option<&str> {
    let lower = file_name.to_ascii_lowercase();
    ARCHIVE_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| &file_name[..file_name.len() - ext.len()])
}

/// `major.minor.patch`, each purely numeric, optionally followed by `-<anything>`.
fn is_version(candidate: &str) -> bool {
    let core = match candidate.split_once('-') {
        Some((core, _suffix)) => core,
        None => candidate,
    };

    let parts: Vec<&str> = core.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, version: &str) -> PackageIdentity {
        PackageIdentity {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_parse_simple_name() {
        assert_eq!(
            parse_identity("Foo.Templates.1.2.3.nupkg"),
            identity("Foo.Templates", "1.2.3")
        );
    }

    #[test]
    fn test_parse_prerelease_suffix() {
        assert_eq!(
            parse_identity("Microsoft.DotNet.Common.ItemTemplates.9.0.0-preview.7.24405.7.nupkg"),
            identity(
                "Microsoft.DotNet.Common.ItemTemplates",
                "9.0.0-preview.7.24405.7"
            )
        );
    }

    #[test]
    fn test_parse_uses_last_path_component() {
        assert_eq!(
            parse_identity("/usr/share/dotnet/templates/8.0.1/Foo.8.0.1.nupkg"),
            identity("Foo", "8.0.1")
        );
        assert_eq!(
            parse_identity(r"C:\Program Files\dotnet\templates\Foo.8.0.1.nupkg"),
            identity("Foo", "8.0.1")
        );
    }

    #[test]
    fn test_parse_other_archive_extensions() {
        assert_eq!(parse_identity("Foo.1.0.0.zip"), identity("Foo", "1.0.0"));
        assert_eq!(parse_identity("Foo.1.0.0.tar.gz"), identity("Foo", "1.0.0"));
        assert_eq!(parse_identity("Foo.1.0.0.TGZ"), identity("Foo", "1.0.0"));
        assert_eq!(parse_identity("Foo.1.0.0.NUPKG"), identity("Foo", "1.0.0"));
    }

    #[test]
    fn test_parse_first_version_wins() {
        assert_eq!(
            parse_identity("Foo.1.2.3-beta.4.5.6.nupkg"),
            identity("Foo", "1.2.3-beta.4.5.6")
        );
        assert_eq!(
            parse_identity("Foo.1.0.0.1.nupkg"),
            identity("Foo.1", "0.0.1")
        );
    }

    #[test]
    fn test_name_with_prerelease_segment_splits_early() {
        // Names carrying their own x.y.z-suffix segment do not round-trip
        assert_eq!(
            parse_identity("Foo.1.0.0-x.Bar.2.0.0.nupkg"),
            identity("Foo", "1.0.0-x.Bar.2.0.0")
        );
    }

    #[test]
    fn test_parse_non_conforming_names_are_empty() {
        for name in [
            "",
            "Foo.nupkg",
            "Foo.1.2.nupkg",
            "Foo.1.2.3",
            "Foo.1.2.3.txt",
            "Foo.a.b.c.nupkg",
            "Foo.1..3.nupkg",
            "Foo.1.2.3beta.nupkg",
        ] {
            let parsed = parse_identity(name);
            assert!(parsed.is_empty(), "expected empty identity for {:?}", name);
            assert_eq!(parsed, PackageIdentity::default());
        }
    }

    #[test]
    fn test_parse_recovers_constructed_names() {
        for (name, version) in [
            ("A", "0.0.0"),
            ("Company.Product.Templates", "10.20.30"),
            ("lower.case", "1.0.0-rc.1"),
            ("With-Dash", "2.1.0-alpha-build.17"),
        ] {
            let file_name = format!("{}.{}.nupkg", name, version);
            assert_eq!(parse_identity(&file_name), identity(name, version));
        }
    }

    #[test]
    fn test_has_archive_extension() {
        assert!(has_archive_extension("Foo.1.0.0.nupkg"));
        assert!(has_archive_extension("bundle.tar.gz"));
        assert!(!has_archive_extension("readme.md"));
        assert!(!has_archive_extension("Foo.1.0.0.nupkg.sha512"));
    }
}
