//! Billboard resource library shared by the layers of a land cover.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LandCoverError;

/// A named billboard image with its default size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillboardResource {
    /// Name symbols use to reference this resource.
    pub name: String,
    /// Image location.
    pub url: String,
    /// Default world-space width.
    pub width: f32,
    /// Default world-space height.
    pub height: f32,
}

/// Library definition as written in a manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library name.
    pub name: String,
    /// Resources in declaration order.
    pub resources: Vec<BillboardResource>,
}

/// Immutable set of billboard resources, looked up by name.
///
/// Held behind an `Arc` by every layer built from the same land cover.
#[derive(Clone, Debug)]
pub struct ResourceLibrary {
    name: String,
    resources: Vec<BillboardResource>,
    name_to_index: HashMap<String, usize>,
}

impl ResourceLibrary {
    /// Builds the library from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LandCoverError::DuplicateResource`] if two resources share a name.
    pub fn initialize(config: &LibraryConfig) -> Result<Self, LandCoverError> {
        let mut name_to_index = HashMap::with_capacity(config.resources.len());
        for (index, resource) in config.resources.iter().enumerate() {
            if name_to_index.insert(resource.name.clone(), index).is_some() {
                return Err(LandCoverError::DuplicateResource {
                    library: config.name.clone(),
                    resource: resource.name.clone(),
                });
            }
        }
        log::debug!(
            "initialized resource library \"{}\" with {} resources",
            config.name,
            config.resources.len()
        );
        Ok(Self {
            name: config.name.clone(),
            resources: config.resources.clone(),
            name_to_index,
        })
    }

    /// Library name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a resource by name.
    pub fn get(&self, name: &str) -> Option<&BillboardResource> {
        self.name_to_index.get(name).map(|&i| &self.resources[i])
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the library has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> BillboardResource {
        BillboardResource {
            name: name.into(),
            url: format!("{name}.png"),
            width: 1.0,
            height: 2.0,
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let lib = ResourceLibrary::initialize(&LibraryConfig {
            name: "trees".into(),
            resources: vec![resource("pine"), resource("birch")],
        })
        .unwrap();
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.get("birch").unwrap().url, "birch.png");
        assert!(lib.get("oak").is_none());
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let result = ResourceLibrary::initialize(&LibraryConfig {
            name: "trees".into(),
            resources: vec![resource("pine"), resource("pine")],
        });
        assert!(matches!(
            result,
            Err(LandCoverError::DuplicateResource { ref resource, .. }) if resource == "pine"
        ));
    }
}
