// Overlay collection - Ordered text annotations owned by a clip

use serde::{Deserialize, Serialize};

use crate::domain::errors::*;

/// Identifier of an overlay, unique within its collection
pub type OverlayId = String;

const ID_PREFIX: &str = "overlay-";

/// Positioned text annotation. Geometry and color are stored, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: OverlayId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: u32,
    pub color: String,
}

/// Starting values for a freshly added overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayTemplate {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: u32,
    pub color: String,
}

impl Default for OverlayTemplate {
    fn default() -> Self {
        Self {
            text: "Your text".to_string(),
            x: 50.0,
            y: 50.0,
            font_size: 32,
            color: "#FFFFFF".to_string(),
        }
    }
}

/// Fields to merge into an existing overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPatch {
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub font_size: Option<u32>,
    pub color: Option<String>,
}

impl OverlayPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// Insertion-ordered overlays of one clip.
///
/// Ids come from a counter that only moves forward, so an id removed during
/// an editing session is never handed out again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TextOverlay>", into = "Vec<TextOverlay>")]
pub struct OverlayCollection {
    items: Vec<TextOverlay>,
    next_seq: u64,
}

impl OverlayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new overlay built from `template` and return its id
    pub fn add(&mut self, template: OverlayTemplate) -> OverlayId {
        let id = self.fresh_id();
        self.items.push(TextOverlay {
            id: id.clone(),
            text: template.text,
            x: template.x,
            y: template.y,
            font_size: template.font_size.max(1),
            color: template.color,
        });
        id
    }

    /// Merge `patch` into the overlay with `id`. Order is left as is.
    pub fn update(&mut self, id: &str, patch: OverlayPatch) -> Result<(), DomainError> {
        if patch.font_size == Some(0) {
            return Err(ValidationError::InvalidFontSize.into());
        }

        let overlay = self
            .items
            .iter_mut()
            .find(|overlay| overlay.id == id)
            .ok_or_else(|| DomainError::not_found(Entity::Overlay, id))?;

        if let Some(text) = patch.text {
            overlay.text = text;
        }
        if let Some(x) = patch.x {
            overlay.x = x;
        }
        if let Some(y) = patch.y {
            overlay.y = y;
        }
        if let Some(font_size) = patch.font_size {
            overlay.font_size = font_size;
        }
        if let Some(color) = patch.color {
            overlay.color = color;
        }
        Ok(())
    }

    /// Remove the overlay with `id`; remaining ids are kept as they are
    pub fn remove(&mut self, id: &str) -> Result<TextOverlay, DomainError> {
        let index = self
            .items
            .iter()
            .position(|overlay| overlay.id == id)
            .ok_or_else(|| DomainError::not_found(Entity::Overlay, id))?;
        Ok(self.items.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&TextOverlay> {
        self.items.iter().find(|overlay| overlay.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextOverlay> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn fresh_id(&mut self) -> OverlayId {
        loop {
            self.next_seq += 1;
            let candidate = format!("{}{}", ID_PREFIX, self.next_seq);
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl PartialEq for OverlayCollection {
    // The counter is session state, not content
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<TextOverlay>> for OverlayCollection {
    fn from(items: Vec<TextOverlay>) -> Self {
        let next_seq = items
            .iter()
            .filter_map(|overlay| overlay.id.strip_prefix(ID_PREFIX))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { items, next_seq }
    }
}

impl From<OverlayCollection> for Vec<TextOverlay> {
    fn from(collection: OverlayCollection) -> Self {
        collection.items
    }
}

impl<'a> IntoIterator for &'a OverlayCollection {
    type Item = &'a TextOverlay;
    type IntoIter = std::slice::Iter<'a, TextOverlay>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
