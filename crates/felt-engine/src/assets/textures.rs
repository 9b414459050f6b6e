use serde::{Deserialize, Serialize};

/// Root every texture path is resolved against.
pub const TEXTURE_ROOT: &str = "/textures";

/// Stable id of a texture entry in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureId(pub u32);

/// One catalog entry: either a single diffuse map or a full map set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TextureEntry {
    Diffuse {
        diffuse: String,
    },
    Standard {
        ao: String,
        diffuse: String,
        normal: String,
        roughness: String,
    },
}

/// Catalog of texture paths handed to the renderer as JSON.
/// Decoding happens on the renderer side; this only names files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureCatalog {
    entries: Vec<TextureEntry>,
}

impl TextureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single diffuse texture at `/textures/{file}`.
    pub fn diffuse(&mut self, file: &str) -> TextureId {
        self.insert(TextureEntry::Diffuse {
            diffuse: format!("{}/{}", TEXTURE_ROOT, file),
        })
    }

    /// Register the map set `/textures/{name}/{ao,diffuse,normal,roughness}.{ext}`.
    pub fn standard(&mut self, name: &str, ext: &str) -> TextureId {
        let map = |kind: &str| format!("{}/{}/{}.{}", TEXTURE_ROOT, name, kind, ext);
        self.insert(TextureEntry::Standard {
            ao: map("ao"),
            diffuse: map("diffuse"),
            normal: map("normal"),
            roughness: map("roughness"),
        })
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureEntry> {
        self.entries.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize for the renderer. Entry order is the id order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a catalog back from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn insert(&mut self, entry: TextureEntry) -> TextureId {
        // Paths are unique; re-registering returns the existing id.
        if let Some(idx) = self.entries.iter().position(|e| *e == entry) {
            return TextureId(idx as u32);
        }
        self.entries.push(entry);
        TextureId(self.entries.len() as u32 - 1)
    }
}

/// Textures the table uses: the felt map set and one diffuse map per
/// numbered ball.
#[derive(Debug, Clone)]
pub struct TableTextures {
    pub catalog: TextureCatalog,
    pub felt: TextureId,
    /// Index `n - 1` holds ball `n`.
    balls: Vec<TextureId>,
}

impl TableTextures {
    pub fn new() -> Self {
        let mut catalog = TextureCatalog::new();
        let felt = catalog.standard("felt", "png");
        let balls = (1..=15)
            .map(|n| catalog.diffuse(&format!("balls/{}.jpg", n)))
            .collect();
        Self { catalog, felt, balls }
    }

    /// Texture of a numbered ball. Ball 0 (the cue ball) is untextured.
    pub fn ball(&self, number: u8) -> Option<TextureId> {
        match number {
            0 => None,
            n => self.balls.get(n as usize - 1).copied(),
        }
    }
}

impl Default for TableTextures {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diffuse_path() {
        let mut catalog = TextureCatalog::new();
        let id = catalog.diffuse("balls/3.jpg");
        assert_eq!(
            catalog.get(id),
            Some(&TextureEntry::Diffuse { diffuse: "/textures/balls/3.jpg".into() })
        );
    }

    #[test]
    fn standard_map_set() {
        let mut catalog = TextureCatalog::new();
        let id = catalog.standard("felt", "png");
        match catalog.get(id).unwrap() {
            TextureEntry::Standard { ao, diffuse, normal, roughness } => {
                assert_eq!(ao, "/textures/felt/ao.png");
                assert_eq!(diffuse, "/textures/felt/diffuse.png");
                assert_eq!(normal, "/textures/felt/normal.png");
                assert_eq!(roughness, "/textures/felt/roughness.png");
            }
            other => panic!("expected Standard, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_registration_reuses_id() {
        let mut catalog = TextureCatalog::new();
        let a = catalog.diffuse("balls/1.jpg");
        let b = catalog.diffuse("balls/1.jpg");
        assert_eq!(a, b);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn table_textures_cover_fifteen_balls() {
        let textures = TableTextures::new();
        assert_eq!(textures.catalog.len(), 16);
        assert_eq!(textures.ball(0), None);
        assert!(textures.ball(15).is_some());
        assert_eq!(textures.ball(16), None);
        assert_ne!(textures.ball(1), textures.ball(2));
    }

    #[test]
    fn catalog_json_shape() {
        let textures = TableTextures::new();
        let json = textures.catalog.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 16);
        assert_eq!(entries[0]["kind"], "standard");
        assert_eq!(entries[1]["kind"], "diffuse");
        assert_eq!(entries[1]["diffuse"], "/textures/balls/1.jpg");

        let parsed = TextureCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.len(), 16);
    }
}
