//! Per-listing attributes the search conditions filter on.

use std::collections::HashMap;

use common::{
    facet_catalog::{ARCHITECTURE, DECORATION, FacetCatalog, PIECES, TYPE_LIEU},
    sanitize::sanitize_text_field,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub type ListingId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    TypeLieu,
    Architecture,
    Decoration,
    Pieces,
}

impl ListingField {
    pub const ALL: [ListingField; 4] = [
        ListingField::TypeLieu,
        ListingField::Architecture,
        ListingField::Decoration,
        ListingField::Pieces,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ListingField::TypeLieu => TYPE_LIEU,
            ListingField::Architecture => ARCHITECTURE,
            ListingField::Decoration => DECORATION,
            ListingField::Pieces => PIECES,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    fn description(&self) -> &'static str {
        match self {
            ListingField::TypeLieu => "Type de lieu (Habitations, Bureaux, Industrie, etc.)",
            ListingField::Architecture => "Architecture style (Classique, Moderne, Industrielle, Futuriste)",
            ListingField::Decoration => "Décoration style (Ethnique, Minimaliste, Design, Contemporain)",
            ListingField::Pieces => "Pièces & éléments (Bureau, Open space, etc.)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldInput {
    Text,
    Select { options: Vec<String> },
}

/// Declaration of one string attribute stored on every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFieldDefinition {
    pub field: ListingField,
    pub key: String,
    pub label: String,
    pub description: String,
    /// One value per listing.
    pub single: bool,
    pub show_in_rest: bool,
    pub input: FieldInput,
}

/// The four listing attributes, labelled and optioned from the catalog.
pub fn listing_meta_fields(catalog: &FacetCatalog) -> Vec<MetaFieldDefinition> {
    ListingField::ALL
        .into_iter()
        .map(|field| {
            let facet = catalog.facet(field.key());
            let input = match field {
                ListingField::Architecture | ListingField::Decoration => FieldInput::Select {
                    options: facet.map(|f| f.top_level().iter().map(|node| node.name.clone()).collect()).unwrap_or_default(),
                },
                ListingField::TypeLieu | ListingField::Pieces => FieldInput::Text,
            };
            MetaFieldDefinition {
                field,
                key: field.key().to_string(),
                label: facet.map(|f| f.label.clone()).unwrap_or_else(|| field.key().to_string()),
                description: field.description().to_string(),
                single: true,
                show_in_rest: true,
                input,
            }
        })
        .collect()
}

pub trait ListingMetaStore: Send + Sync {
    fn get(&self, listing: ListingId, field: ListingField) -> Option<String>;
    fn set(&self, listing: ListingId, field: ListingField, value: String);

    /// Whether the current editor may change this listing.
    fn can_edit(&self, _listing: ListingId) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    values: RwLock<HashMap<(ListingId, ListingField), String>>,
}

impl ListingMetaStore for InMemoryListingStore {
    fn get(&self, listing: ListingId, field: ListingField) -> Option<String> {
        self.values.read().get(&(listing, field)).cloned()
    }

    fn set(&self, listing: ListingId, field: ListingField, value: String) {
        self.values.write().insert((listing, field), value);
    }
}

/// Request facts checked before a listing edit is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditGuard {
    pub token_valid: bool,
    pub is_autosave: bool,
    pub can_edit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidToken,
    Autosave,
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved {
        fields: Vec<ListingField>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        ignored: Vec<String>,
    },
    Skipped { reason: SkipReason },
}

/// Writes the submitted attributes of a listing, as plain text.
///
/// Fields absent from the submission keep their stored value. Unknown keys
/// are not written and come back as `ignored`.
pub fn save_listing_meta(
    store: &dyn ListingMetaStore,
    listing: ListingId,
    submission: &HashMap<String, String>,
    guard: EditGuard,
) -> SaveOutcome {
    let skipped = if !guard.token_valid {
        Some(SkipReason::InvalidToken)
    } else if guard.is_autosave {
        Some(SkipReason::Autosave)
    } else if !guard.can_edit {
        Some(SkipReason::Forbidden)
    } else {
        None
    };
    if let Some(reason) = skipped {
        debug!("listing {} meta not saved: {:?}", listing, reason);
        return SaveOutcome::Skipped { reason };
    }

    let mut fields = vec![];
    for field in ListingField::ALL {
        if let Some(raw) = submission.get(field.key()) {
            store.set(listing, field, sanitize_text_field(raw));
            fields.push(field);
        }
    }
    let mut ignored: Vec<String> =
        submission.keys().filter(|key| ListingField::from_key(key).is_none()).cloned().collect();
    ignored.sort();
    info!("listing {} meta saved: {:?}, ignored: {:?}", listing, fields, ignored);
    SaveOutcome::Saved { fields, ignored }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFormField {
    pub definition: MetaFieldDefinition,
    pub value: String,
}

/// Administrative edit form of a listing: one input per attribute, filled
/// with the stored value.
pub fn edit_form(store: &dyn ListingMetaStore, listing: ListingId, catalog: &FacetCatalog) -> Vec<EditFormField> {
    listing_meta_fields(catalog)
        .into_iter()
        .map(|definition| EditFormField {
            value: store.get(listing, definition.field).unwrap_or_default(),
            definition,
        })
        .collect()
}
