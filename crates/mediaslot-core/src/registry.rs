//! Asset registry: the fixed logical assets and their current paths.

use crate::config::AssetsConfig;

/// Logical assets known to the static pass. The set is fixed; only the
/// paths change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticAsset {
    Logo,
    Banner,
}

impl StaticAsset {
    pub const ALL: [StaticAsset; 2] = [StaticAsset::Logo, StaticAsset::Banner];

    /// Tag / logical name, e.g. `logo`.
    pub fn name(self) -> &'static str {
        match self {
            StaticAsset::Logo => "logo",
            StaticAsset::Banner => "banner",
        }
    }

    /// Default `alt` text of the replacement image.
    pub fn label(self) -> &'static str {
        match self {
            StaticAsset::Logo => "Logo",
            StaticAsset::Banner => "Banner",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistry {
    logo: String,
    banner: String,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::from_config(&AssetsConfig::default())
    }
}

impl AssetRegistry {
    pub fn from_config(cfg: &AssetsConfig) -> Self {
        Self {
            logo: cfg.logo.clone(),
            banner: cfg.banner.clone(),
        }
    }

    pub fn path(&self, asset: StaticAsset) -> &str {
        match asset {
            StaticAsset::Logo => &self.logo,
            StaticAsset::Banner => &self.banner,
        }
    }

    /// Path for a logical name, `None` if the name is not a known asset.
    pub fn get(&self, name: &str) -> Option<&str> {
        StaticAsset::from_name(name).map(|a| self.path(a))
    }

    /// Sets the path of a known asset. Unknown names are ignored and return `false`.
    pub fn update(&mut self, name: &str, path: impl Into<String>) -> bool {
        let Some(asset) = StaticAsset::from_name(name) else {
            return false;
        };
        let slot = match asset {
            StaticAsset::Logo => &mut self.logo,
            StaticAsset::Banner => &mut self.banner,
        };
        *slot = path.into();
        true
    }
}
