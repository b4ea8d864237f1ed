//! The `catalog.yml` document model.

use std::{path::Path, result::Result as StdResult};

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Mapping;

use crate::error::{Error, Result};

/// Catalog metadata for a single repository item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogYaml {
    /// Stable catalog identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    /// Catalog item type name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(crate) item_type: Option<String>,
    /// Short description shown in the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) short_description: Option<String>,
    /// Link to the documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) documentation_url: Option<String>,
    /// Link to the source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) source_code_url: Option<String>,
    /// Ordered, de-duplicated tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) tags: IndexSet<String>,
    /// Owners of the catalog item.
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) owners: Vec<CatalogYamlOwner>,
    /// Keys this tool does not manage, kept as written.
    #[serde(flatten)]
    pub(crate) extra: Mapping,
}

/// An owner entry of a catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogYamlOwner {
    /// Owner name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    /// Owner email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<String>,
    /// Owner profile or web page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
}

impl CatalogYaml {
    /// Parse catalog YAML read from `path`; empty and null documents yield defaults.
    pub(crate) fn parse(contents: &str, path: &Path) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: Option<Self> =
            serde_yaml::from_str(contents).map_err(|error| Error::DescriptorParse {
                path: path.to_path_buf(),
                source: error,
            })?;
        Ok(parsed.unwrap_or_default())
    }

    /// Serialize the catalog to YAML.
    pub(crate) fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|error| Error::DescriptorSerialize { source: error })
    }
}

/// Return true when an optional field is missing or only whitespace.
pub fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Deserialize a collection, treating an explicit YAML null as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> StdResult<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
