use serde::{Deserialize, Serialize};

use crate::api::types::StageId;
use crate::error::WorkshopError;

/// Glyph used when nothing has been written yet.
pub const PLACEHOLDER_GLYPH: &str = "福";

/// The fixed set of reference characters offered in the writing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphCatalog {
    glyphs: Vec<String>,
}

impl GlyphCatalog {
    pub fn new(glyphs: Vec<String>) -> Self {
        Self { glyphs }
    }

    /// Parse a catalog from a JSON object `{ "glyphs": [...] }`.
    /// An empty list falls back to the placeholder glyph.
    pub fn from_json(json: &str) -> Result<Self, WorkshopError> {
        let mut catalog: Self = serde_json::from_str(json)?;
        if catalog.glyphs.is_empty() {
            catalog.glyphs.push(PLACEHOLDER_GLYPH.to_string());
        }
        Ok(catalog)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.glyphs.get(index).map(String::as_str)
    }

    pub fn first(&self) -> &str {
        self.get(0).unwrap_or(PLACEHOLDER_GLYPH)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(String::as_str)
    }
}

impl Default for GlyphCatalog {
    fn default() -> Self {
        Self::new(
            ["福", "禄", "寿", "喜", "春", "龙", "凤", "和"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

/// Display name and icon of one crafting stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageLabel {
    pub stage: StageId,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Labels for the progress indicator, keyed by stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCatalog {
    labels: Vec<StageLabel>,
}

impl StageCatalog {
    pub fn from_json(json: &str) -> Result<Self, WorkshopError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn label(&self, stage: StageId) -> Option<&StageLabel> {
        self.labels.iter().find(|l| l.stage == stage)
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        let label = |stage, name: &str, description: &str, icon: &str| StageLabel {
            stage,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        };
        Self {
            labels: vec![
                label(StageId::Writing, "写样", "Write the character on xuan paper", "✍"),
                label(StageId::Mounting, "上板", "Paste the sheet face-down onto the block", "📋"),
                label(StageId::Carving, "刻版", "Carve the block with a chisel", "🔪"),
                label(StageId::Inking, "刷墨", "Brush ink over the carved block", "🖌"),
                label(StageId::Printing, "印刷", "Lay paper on the block and rub the print", "📜"),
            ],
        }
    }
}
