//! Template manifests found inside package archives.
//!
//! A package may carry any number of templates, each described by a
//! `.template.config/template.json` file and optionally an `ide.host.json`
//! next to it that points at an icon.

mod inspector;
mod json;
mod layout;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use inspector::{ManifestError, extract_manifests};
pub use layout::{ManifestLocation, locate_manifest, resolve_entry_path};

/// Contents of a `template.json`. Only the fields shown to users are typed;
/// everything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TemplateManifest {
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<ShortName>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classifications: Vec<String>,
    #[serde(default)]
    pub group_identity: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Manifest types whose top-level keys are matched ignoring ASCII case.
pub(crate) trait ManifestFields {
    /// Typed field names as spelled in the JSON
    const FIELDS: &'static [&'static str];
}

impl ManifestFields for TemplateManifest {
    const FIELDS: &'static [&'static str] = &[
        "identity",
        "name",
        "shortName",
        "author",
        "description",
        "classifications",
        "groupIdentity",
        "tags",
    ];
}

impl TemplateManifest {
    /// String value of a tag such as `language` or `type`.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).and_then(Value::as_str)
    }
}

/// `shortName` is either a single string or a list of aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShortName {
    Single(String),
    Many(Vec<String>),
}

impl ShortName {
    pub fn names(&self) -> Vec<&str> {
        match self {
            ShortName::Single(name) => vec![name.as_str()],
            ShortName::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Contents of an `ide.host.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdeHostManifest {
    /// Icon path relative to the manifest's directory
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestFields for IdeHostManifest {
    const FIELDS: &'static [&'static str] = &["icon"];
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Everything known about one template in a package, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeTemplateManifest {
    pub package_name: String,
    pub package_version: String,
    /// `data:image/<ext>;base64,<payload>`
    pub base64_icon: Option<String>,
    pub is_built_in: bool,
    pub template_manifest: TemplateManifest,
    pub ide_host_manifest: Option<IdeHostManifest>,
}
