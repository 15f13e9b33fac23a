//! Typed search request carried in the results page URL.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::facet_catalog::{ARCHITECTURE, DECORATION, PIECES, TYPE_LIEU};
use crate::sanitize::sanitize_non_empty;

pub const TYPE_PROJET: &str = "type_projet";
pub const REFERENCE: &str = "reference";
pub const LOCATION: &str = "location";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Residential,
    Commercial,
    Industrial,
    Hospitality,
    Other,
    /// A token outside the known list, matched as-is.
    Unlisted(String),
}

impl ProjectType {
    pub const KNOWN: [ProjectType; 5] = [
        ProjectType::Residential,
        ProjectType::Commercial,
        ProjectType::Industrial,
        ProjectType::Hospitality,
        ProjectType::Other,
    ];

    pub fn from_token(token: &str) -> Self {
        match token {
            "residential" => Self::Residential,
            "commercial" => Self::Commercial,
            "industrial" => Self::Industrial,
            "hospitality" => Self::Hospitality,
            "other" => Self::Other,
            other => Self::Unlisted(other.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
            Self::Hospitality => "hospitality",
            Self::Other => "other",
            Self::Unlisted(token) => token,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Residential => "Résidentiel",
            Self::Commercial => "Commercial",
            Self::Industrial => "Industriel",
            Self::Hospitality => "Hôtellerie",
            Self::Other => "Autre",
            Self::Unlisted(token) => token,
        }
    }
}

/// Every field is sanitized and non-empty once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub project_type: Option<ProjectType>,
    pub reference: Option<String>,
    pub location: Option<String>,
    pub type_lieu: Option<String>,
    pub architecture: Option<String>,
    pub decoration: Option<String>,
    pub pieces: Vec<String>,
}

impl SearchRequest {
    /// Parses a raw `application/x-www-form-urlencoded` query string.
    ///
    /// `pieces` may repeat, either as `pieces` or `pieces[]`. Unknown keys are
    /// ignored. For single-valued keys the last occurrence wins.
    pub fn from_query_string(raw_query: &str) -> Self {
        let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
        let mut request = SearchRequest::default();
        for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
            let Some(value) = sanitize_non_empty(&value) else {
                continue;
            };
            match key.as_ref() {
                TYPE_PROJET => request.project_type = Some(ProjectType::from_token(&value)),
                REFERENCE => request.reference = Some(value),
                LOCATION => request.location = Some(value),
                TYPE_LIEU => request.type_lieu = Some(value),
                ARCHITECTURE => request.architecture = Some(value),
                DECORATION => request.decoration = Some(value),
                "pieces" | "pieces[]" => {
                    if !request.pieces.contains(&value) {
                        request.pieces.push(value);
                    }
                }
                _ => {}
            }
        }
        request
    }

    /// Canonical encoding, with `pieces` repeated once per value.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(project_type) = &self.project_type {
            serializer.append_pair(TYPE_PROJET, project_type.token());
        }
        let singles = [
            (REFERENCE, &self.reference),
            (LOCATION, &self.location),
            (TYPE_LIEU, &self.type_lieu),
            (ARCHITECTURE, &self.architecture),
            (DECORATION, &self.decoration),
        ];
        for (key, value) in singles {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        for piece in &self.pieces {
            serializer.append_pair(PIECES, piece);
        }
        serializer.finish()
    }

    /// Single-select facet value by catalog key.
    pub fn facet_value(&self, key: &str) -> Option<&str> {
        match key {
            TYPE_LIEU => self.type_lieu.as_deref(),
            ARCHITECTURE => self.architecture.as_deref(),
            DECORATION => self.decoration.as_deref(),
            _ => None,
        }
    }

    pub fn set_facet_value(&mut self, key: &str, value: Option<String>) {
        match key {
            TYPE_LIEU => self.type_lieu = value,
            ARCHITECTURE => self.architecture = value,
            DECORATION => self.decoration = value,
            _ => {}
        }
    }

    /// Multi-select facet values by catalog key.
    pub fn facet_values(&self, key: &str) -> &[String] {
        match key {
            PIECES => &self.pieces,
            _ => &[],
        }
    }

    pub fn set_facet_values(&mut self, key: &str, values: Vec<String>) {
        if key == PIECES {
            self.pieces = values;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SearchRequest::default()
    }
}
