//! Static facet tree definitions and lookups.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TYPE_LIEU: &str = "type_lieu";
pub const ARCHITECTURE: &str = "architecture";
pub const DECORATION: &str = "decoration";
pub const PIECES: &str = "pieces";

/// Facets a search request can carry, paired with whether each holds several values.
pub const REQUEST_FACETS: [(&str, bool); 4] =
    [(TYPE_LIEU, false), (ARCHITECTURE, false), (DECORATION, false), (PIECES, true)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FacetNode>,
}

impl FacetNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: vec![] }
    }

    pub fn branch(name: impl Into<String>, children: Vec<FacetNode>) -> Self {
        Self { name: name.into(), children }
    }

    /// A node with children navigates deeper instead of committing a value.
    pub fn is_drill_down(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSection {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub items: Vec<FacetNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacetMode {
    HierarchicalSingle,
    FlatSingle,
    FlatMultiSectioned,
}

impl FacetMode {
    pub fn is_single_select(&self) -> bool {
        !matches!(self, FacetMode::FlatMultiSectioned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FacetLayout {
    HierarchicalSingle { roots: Vec<FacetNode> },
    FlatSingle { items: Vec<FacetNode> },
    FlatMultiSectioned { sections: Vec<FacetSection> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetDefinition {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub layout: FacetLayout,
}

impl FacetDefinition {
    pub fn mode(&self) -> FacetMode {
        match &self.layout {
            FacetLayout::HierarchicalSingle { .. } => FacetMode::HierarchicalSingle,
            FacetLayout::FlatSingle { .. } => FacetMode::FlatSingle,
            FacetLayout::FlatMultiSectioned { .. } => FacetMode::FlatMultiSectioned,
        }
    }

    /// Resolves a value to its catalog node.
    ///
    /// Tree layouts search every level. Sectioned layouts only consider the
    /// top-level items of each section, which is where submenus hang from.
    pub fn find_node(&self, value: &str) -> Option<&FacetNode> {
        match &self.layout {
            FacetLayout::HierarchicalSingle { roots } => find_node_by_value(roots, value),
            FacetLayout::FlatSingle { items } => find_node_by_value(items, value),
            FacetLayout::FlatMultiSectioned { sections } => sections
                .iter()
                .flat_map(|section| section.items.iter())
                .find(|item| item.name == value),
        }
    }

    /// The first level shown when the panel opens.
    pub fn top_level(&self) -> &[FacetNode] {
        match &self.layout {
            FacetLayout::HierarchicalSingle { roots } => roots,
            FacetLayout::FlatSingle { items } => items,
            FacetLayout::FlatMultiSectioned { .. } => &[],
        }
    }

    pub fn sections(&self) -> &[FacetSection] {
        match &self.layout {
            FacetLayout::FlatMultiSectioned { sections } => sections,
            _ => &[],
        }
    }
}

/// Depth-first, pre-order search over every level. First match wins.
pub fn find_node_by_value<'a>(nodes: &'a [FacetNode], value: &str) -> Option<&'a FacetNode> {
    find_path(nodes, value).and_then(|path| path.last().copied())
}

/// Chain of nodes from a root down to the first node named `value`.
pub fn find_path<'a>(nodes: &'a [FacetNode], value: &str) -> Option<Vec<&'a FacetNode>> {
    for node in nodes {
        if node.name == value {
            return Some(vec![node]);
        }
        if let Some(mut path) = find_path(&node.children, value) {
            path.insert(0, node);
            return Some(path);
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("facet key `{0}` is defined more than once")]
    DuplicateFacetKey(String),
    #[error("facet `{facet}` contains an empty value name")]
    EmptyName { facet: String },
    #[error("facet `{facet}`: `{name}` appears twice under `{parent}`")]
    DuplicateSibling { facet: String, parent: String, name: String },
    #[error("facet `{facet}`: value `{name}` is not unique within the facet")]
    DuplicateValue { facet: String, name: String },
    #[error("facet `{0}` has no matching search request field")]
    UnsupportedFacet(String),
    #[error("facet `{facet}` cannot use mode {found:?} (multi-value request field: {multi})")]
    ModeMismatch { facet: String, found: FacetMode, multi: bool },
    #[error("invalid catalog json: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCatalog {
    pub facets: Vec<FacetDefinition>,
}

impl FacetCatalog {
    pub fn facet(&self, key: &str) -> Option<&FacetDefinition> {
        self.facets.iter().find(|facet| facet.key == key)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: FacetCatalog = serde_json::from_str(json).map_err(|e| CatalogError::Json(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load-time check that every facet maps onto a request field and every
    /// value a lookup can reach is unambiguous.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut keys = BTreeSet::new();
        for facet in &self.facets {
            if !keys.insert(facet.key.as_str()) {
                return Err(CatalogError::DuplicateFacetKey(facet.key.clone()));
            }
            check_request_field(facet)?;
            match &facet.layout {
                FacetLayout::HierarchicalSingle { roots: nodes } | FacetLayout::FlatSingle { items: nodes } => {
                    check_siblings(&facet.key, &facet.label, nodes)?;
                    let mut seen = BTreeSet::new();
                    check_tree_unique(&facet.key, nodes, &mut seen)?;
                }
                FacetLayout::FlatMultiSectioned { sections } => {
                    let mut seen = BTreeSet::new();
                    for section in sections {
                        check_siblings(&facet.key, &section.name, &section.items)?;
                        for item in &section.items {
                            if !seen.insert(item.name.as_str()) {
                                return Err(CatalogError::DuplicateValue { facet: facet.key.clone(), name: item.name.clone() });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// The catalog shipped with the filters.
    pub fn builtin() -> Self {
        use FacetNode as N;
        let type_lieu = FacetDefinition {
            key: TYPE_LIEU.to_string(),
            label: "Type de lieu".to_string(),
            layout: FacetLayout::HierarchicalSingle {
                roots: vec![
                    N::branch("Habitations", vec![
                        N::branch("Appartement", vec![
                            N::leaf("Appartement moderne"),
                            N::leaf("Appartement classique"),
                            N::leaf("Studio"),
                            N::leaf("Loft"),
                        ]),
                        N::branch("Maison", vec![
                            N::leaf("Maison individuelle"),
                            N::leaf("Villa"),
                            N::leaf("Maison de ville"),
                        ]),
                        N::leaf("Chalet"),
                        N::leaf("Château"),
                    ]),
                    N::branch("Bureaux", vec![
                        N::leaf("Bureau individuel"),
                        N::leaf("Open space"),
                        N::leaf("Espace coworking"),
                        N::leaf("Siège social"),
                    ]),
                    N::branch("Industrie", vec![N::leaf("Entrepôt"), N::leaf("Usine"), N::leaf("Atelier")]),
                    N::branch("Commerce", vec![
                        N::leaf("Boutique"),
                        N::leaf("Restaurant"),
                        N::leaf("Café"),
                        N::leaf("Showroom"),
                    ]),
                    N::branch("Hôtellerie", vec![N::leaf("Hôtel"), N::leaf("Auberge"), N::leaf("Gîte")]),
                    N::leaf("Autre"),
                ],
            },
        };
        let architecture = FacetDefinition {
            key: ARCHITECTURE.to_string(),
            label: "Architecture".to_string(),
            layout: FacetLayout::FlatSingle {
                items: ["Classique", "Moderne", "Industrielle", "Futuriste"].into_iter().map(N::leaf).collect(),
            },
        };
        let decoration = FacetDefinition {
            key: DECORATION.to_string(),
            label: "Décoration".to_string(),
            layout: FacetLayout::FlatSingle {
                items: ["Ethnique", "Minimaliste", "Design", "Contemporain"].into_iter().map(N::leaf).collect(),
            },
        };
        let interior = [
            "Salon", "Cuisine", "Chambre", "Salle de bain", "Bureau", "Salle à manger", "Bibliothèque",
            "Cave à vin", "Home cinéma", "Gym", "Spa", "Dressing", "Buanderie", "Cellier", "Garage",
            "Atelier", "Salle de jeux", "Bureau à domicile", "Salle de réunion", "Hall d'entrée",
            "Couloir", "Débarras", "Chambre d'amis", "Suite parentale", "Nursery", "Chambre d'enfant",
            "Salle de bain d'appoint", "WC", "Mezzanine", "Grenier",
        ]
        .into_iter()
        .map(|name| match name {
            "Bureau" => N::branch(name, vec![N::leaf("Bureau"), N::leaf("Open space")]),
            _ => N::leaf(name),
        })
        .collect();
        let exterior = [
            "Terrasse", "Jardin", "Piscine", "Balcon", "Cour", "Parking", "Garage extérieur",
            "Abri de jardin", "Serre", "Potager", "Verger", "Allée", "Portail", "Clôture",
        ]
        .into_iter()
        .map(N::leaf)
        .collect();
        let pieces = FacetDefinition {
            key: PIECES.to_string(),
            label: "Pièces & éléments".to_string(),
            layout: FacetLayout::FlatMultiSectioned {
                sections: vec![
                    FacetSection { name: "Pièces intérieures".to_string(), image: Some("interieur.jpg".to_string()), items: interior },
                    FacetSection { name: "Éléments extérieurs".to_string(), image: Some("exterieur.jpg".to_string()), items: exterior },
                ],
            },
        };
        Self { facets: vec![type_lieu, architecture, decoration, pieces] }
    }
}

fn check_siblings(facet: &str, parent: &str, nodes: &[FacetNode]) -> Result<(), CatalogError> {
    let mut names = BTreeSet::new();
    for node in nodes {
        if node.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { facet: facet.to_string() });
        }
        if !names.insert(node.name.as_str()) {
            return Err(CatalogError::DuplicateSibling {
                facet: facet.to_string(),
                parent: parent.to_string(),
                name: node.name.clone(),
            });
        }
        check_siblings(facet, &node.name, &node.children)?;
    }
    Ok(())
}

fn check_tree_unique<'a>(facet: &str, nodes: &'a [FacetNode], seen: &mut BTreeSet<&'a str>) -> Result<(), CatalogError> {
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            return Err(CatalogError::DuplicateValue { facet: facet.to_string(), name: node.name.clone() });
        }
        check_tree_unique(facet, &node.children, seen)?;
    }
    Ok(())
}

fn check_request_field(facet: &FacetDefinition) -> Result<(), CatalogError> {
    let Some(&(_, multi)) = REQUEST_FACETS.iter().find(|(key, _)| *key == facet.key) else {
        return Err(CatalogError::UnsupportedFacet(facet.key.clone()));
    };
    let found = facet.mode();
    if found.is_single_select() == multi {
        return Err(CatalogError::ModeMismatch { facet: facet.key.clone(), found, multi });
    }
    Ok(())
}
