//! Symbols attached to a biome in configuration.
//!
//! Only billboards are rendered by land cover; other kinds are accepted by the
//! parser and reported as unrecognized when the biome is configured.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::library::ResourceLibrary;

/// Width used when neither the symbol nor its resource sets one.
pub const DEFAULT_BILLBOARD_WIDTH: f32 = 10.0;
/// Height used when neither the symbol nor its resource sets one.
pub const DEFAULT_BILLBOARD_HEIGHT: f32 = 15.0;

/// A configured biome symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Symbol {
    /// Camera-facing textured quad.
    Billboard(BillboardSymbol),
    /// 3D model instance.
    Model(ModelSymbol),
    /// Screen-space icon.
    Icon(IconSymbol),
}

impl Symbol {
    /// Short name of the symbol kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Billboard(_) => "billboard",
            Self::Model(_) => "model",
            Self::Icon(_) => "icon",
        }
    }

    /// Returns the billboard description if this symbol is a billboard.
    pub fn as_billboard(&self) -> Option<&BillboardSymbol> {
        match self {
            Self::Billboard(billboard) => Some(billboard),
            Self::Model(_) | Self::Icon(_) => None,
        }
    }
}

/// A billboard given directly by URL or by a library resource name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillboardSymbol {
    /// Image location.
    pub url: Option<String>,
    /// Name of a resource in the land cover's library.
    pub resource: Option<String>,
    /// Width override.
    pub width: Option<f32>,
    /// Height override.
    pub height: Option<f32>,
}

/// A model symbol. Not rendered by land cover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSymbol {
    /// Model location.
    pub url: String,
    /// Uniform scale.
    #[serde(default)]
    pub scale: Option<f32>,
}

/// An icon symbol. Not rendered by land cover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IconSymbol {
    /// Icon image location.
    pub url: String,
}

/// A billboard symbol with its URL and size fully determined.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedBillboard {
    /// Image location.
    pub url: String,
    /// World-space width.
    pub width: f32,
    /// World-space height.
    pub height: f32,
}

impl BillboardSymbol {
    /// Resolves the image location and size.
    ///
    /// A named resource supplies the URL and default size; the symbol's own
    /// width and height take precedence. An explicit `url` wins over the
    /// resource's URL.
    pub fn resolve(
        &self,
        library: Option<&ResourceLibrary>,
    ) -> Result<ResolvedBillboard, Diagnostic> {
        let resource = match &self.resource {
            Some(name) => Some(library.and_then(|lib| lib.get(name)).ok_or_else(|| {
                Diagnostic::UnresolvedBillboard {
                    resource: Some(name.clone()),
                }
            })?),
            None => None,
        };

        let url = self
            .url
            .clone()
            .or_else(|| resource.map(|r| r.url.clone()))
            .ok_or(Diagnostic::UnresolvedBillboard { resource: None })?;

        let width = self
            .width
            .or(resource.map(|r| r.width))
            .unwrap_or(DEFAULT_BILLBOARD_WIDTH);
        let height = self
            .height
            .or(resource.map(|r| r.height))
            .unwrap_or(DEFAULT_BILLBOARD_HEIGHT);

        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Diagnostic::InvalidBillboardSize { url, width, height });
        }

        Ok(ResolvedBillboard { url, width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{BillboardResource, LibraryConfig};

    fn library() -> ResourceLibrary {
        ResourceLibrary::initialize(&LibraryConfig {
            name: "default".into(),
            resources: vec![BillboardResource {
                name: "pine".into(),
                url: "trees/pine.png".into(),
                width: 3.0,
                height: 9.0,
            }],
        })
        .unwrap()
    }

    #[test]
    fn test_only_billboards_have_billboard_capability() {
        let bb = Symbol::Billboard(BillboardSymbol::default());
        let model = Symbol::Model(ModelSymbol {
            url: "rock.osgb".into(),
            scale: None,
        });
        assert!(bb.as_billboard().is_some());
        assert!(model.as_billboard().is_none());
        assert_eq!(model.kind(), "model");
    }

    #[test]
    fn test_direct_url_uses_defaults() {
        let symbol = BillboardSymbol {
            url: Some("grass.png".into()),
            ..Default::default()
        };
        let resolved = symbol.resolve(None).unwrap();
        assert_eq!(resolved.url, "grass.png");
        assert_eq!(resolved.width, DEFAULT_BILLBOARD_WIDTH);
        assert_eq!(resolved.height, DEFAULT_BILLBOARD_HEIGHT);
    }

    #[test]
    fn test_resource_supplies_url_and_size() {
        let lib = library();
        let symbol = BillboardSymbol {
            resource: Some("pine".into()),
            height: Some(12.0),
            ..Default::default()
        };
        let resolved = symbol.resolve(Some(&lib)).unwrap();
        assert_eq!(resolved.url, "trees/pine.png");
        assert_eq!(resolved.width, 3.0);
        assert_eq!(resolved.height, 12.0);
    }

    #[test]
    fn test_unknown_resource_is_unresolved() {
        let lib = library();
        let symbol = BillboardSymbol {
            resource: Some("oak".into()),
            ..Default::default()
        };
        assert_eq!(
            symbol.resolve(Some(&lib)).unwrap_err(),
            Diagnostic::UnresolvedBillboard {
                resource: Some("oak".into())
            }
        );
    }

    #[test]
    fn test_missing_url_is_unresolved() {
        assert_eq!(
            BillboardSymbol::default().resolve(None).unwrap_err(),
            Diagnostic::UnresolvedBillboard { resource: None }
        );
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let symbol = BillboardSymbol {
            url: Some("bush.png".into()),
            width: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            symbol.resolve(None),
            Err(Diagnostic::InvalidBillboardSize { .. })
        ));
    }
}
