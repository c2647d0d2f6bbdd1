//! Domain types shared by the catalog, the io layer and the search engine.

use serde::{Deserialize, Serialize};

pub type AreaId = String;
pub type CategoryId = String;
pub type ItemId = String;

/// A named filing system: an ordered list of areas.
///
/// Area ids are unique within a hierarchy, category ids within an area and
/// item ids within a category. The search engine never checks this; see
/// [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub name: String,
    #[serde(default)]
    pub areas: Vec<Area>,
}

/// Top level of the hierarchy, e.g. `10-19 Administration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Second level, e.g. `11 HR Documents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}

/// Leaf, e.g. `11.01 Contracts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Category {
    /// Items in declared order; empty when the category has none.
    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Which level of the hierarchy a document or result stands for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Area,
    Category,
    Item,
}

/// What an ancestor contributes to a descendant's searchable text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AncestorText {
    /// Ancestor name only; tags and descriptions stay on their own node.
    #[default]
    Name,
    /// Name, description and tags of every ancestor.
    Full,
}

/// One ranked hit.
///
/// The node fields borrow from the hierarchy that was searched. `score` is
/// always positive; `matched_terms` holds the query terms that matched, in
/// query order and without repeats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    pub kind: NodeKind,
    pub area: &'a Area,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<&'a Item>,
    pub score: f64,
    pub matched_terms: Vec<String>,
}

impl ScoredResult<'_> {
    /// Id of the node this result stands for.
    pub fn id(&self) -> &str {
        match (self.item, self.category) {
            (Some(item), _) => &item.id,
            (None, Some(category)) => &category.id,
            (None, None) => &self.area.id,
        }
    }

    /// Display name of the node this result stands for.
    pub fn name(&self) -> &str {
        match (self.item, self.category) {
            (Some(item), _) => &item.name,
            (None, Some(category)) => &category.name,
            (None, None) => &self.area.name,
        }
    }

    /// `id name`, the way nodes are listed in the tree.
    pub fn label(&self) -> String {
        format!("{} {}", self.id(), self.name())
    }

    /// Ancestor ids followed by the node id, e.g. `10-19 › 11 › 11.01`.
    pub fn path(&self) -> String {
        let mut parts = vec![self.area.id.as_str()];
        if let Some(category) = self.category {
            parts.push(&category.id);
        }
        if let Some(item) = self.item {
            parts.push(&item.id);
        }
        parts.join(" › ")
    }
}
