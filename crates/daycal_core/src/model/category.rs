//! Category record used to tag and color tasks.

use super::{validate_color, validate_id, OwnerId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub owner_id: OwnerId,
    pub name: String,
    /// `#rrggbb` color applied to tasks without a custom color.
    pub color: String,
}

impl Category {
    /// Creates a category with a generated id. Name is trimmed.
    pub fn new(owner_id: OwnerId, name: &str, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.trim().to_string(),
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_color(&self.color)
    }
}

/// Selectable category colors as `(hex, label)`, in picker order.
pub const CATEGORY_PALETTE: &[(&str, &str)] = &[
    ("#dc2626", "Rojo 600"),
    ("#ea580c", "Naranja 600"),
    ("#d97706", "Ámbar 600"),
    ("#ca8a04", "Amarillo 600"),
    ("#65a30d", "Lima 600"),
    ("#16a34a", "Verde 600"),
    ("#059669", "Esmeralda 600"),
    ("#0d9488", "Teal 600"),
    ("#0891b2", "Cian 600"),
    ("#0284c7", "Celeste 600"),
    ("#2563eb", "Azul 600"),
    ("#4f46e5", "Índigo 600"),
    ("#7c3aed", "Violeta 600"),
    ("#9333ea", "Púrpura 600"),
    ("#c026d3", "Fucsia 600"),
    ("#db2777", "Rosa 600"),
    ("#e11d48", "Rosa fuerte 600"),
    ("#475569", "Pizarra 600"),
    ("#4b5563", "Gris 600"),
    ("#525252", "Neutral 600"),
    ("#57534e", "Piedra 600"),
    ("#ef4444", "Rojo 500"),
    ("#f97316", "Naranja 500"),
    ("#f59e0b", "Ámbar 500"),
    ("#eab308", "Amarillo 500"),
    ("#84cc16", "Lima 500"),
    ("#22c55e", "Verde 500"),
    ("#10b981", "Esmeralda 500"),
    ("#14b8a6", "Teal 500"),
    ("#06b6d4", "Cian 500"),
    ("#0ea5e9", "Celeste 500"),
    ("#3b82f6", "Azul 500"),
    ("#6366f1", "Índigo 500"),
    ("#8b5cf6", "Violeta 500"),
    ("#a855f7", "Púrpura 500"),
    ("#d946ef", "Fucsia 500"),
    ("#ec4899", "Rosa 500"),
    ("#f43f5e", "Rosa fuerte 500"),
    ("#78716c", "Piedra 500"),
    ("#64748b", "Pizarra 500"),
];

/// First palette color not in `used` (case-insensitive), if any is left.
pub fn free_palette_color<S: AsRef<str>>(used: &[S]) -> Option<&'static str> {
    CATEGORY_PALETTE
        .iter()
        .map(|(hex, _)| *hex)
        .find(|hex| !used.iter().any(|u| u.as_ref().eq_ignore_ascii_case(hex)))
}
