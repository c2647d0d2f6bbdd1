//! Editable, id-indexed view of a filing system.
//!
//! [`Catalog`] owns one [`Hierarchy`] and keeps id→position maps next to it so
//! lookups and edits by id do not scan. Search reads `catalog.hierarchy()`.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Area, Category, Hierarchy, Item};
use crate::validation::validate_system;

/// Replacement values for a node's free-text fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUpdate {
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Addresses an area or one of its categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Area(&'a str),
    Category { area: &'a str, category: &'a str },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    hierarchy: Hierarchy,
    areas: HashMap<String, usize>,
    categories: HashMap<(String, String), usize>,
    items: HashMap<(String, String, String), usize>,
}

impl Catalog {
    /// Validates `hierarchy` (unique ids included) and indexes it.
    pub fn new(hierarchy: Hierarchy) -> Result<Self> {
        validate_system(&hierarchy)?;
        let mut catalog = Self {
            hierarchy,
            areas: HashMap::new(),
            categories: HashMap::new(),
            items: HashMap::new(),
        };
        catalog.reindex();
        Ok(catalog)
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn into_hierarchy(self) -> Hierarchy {
        self.hierarchy
    }

    pub fn name(&self) -> &str {
        &self.hierarchy.name
    }

    pub fn area(&self, area_id: &str) -> Option<&Area> {
        self.areas.get(area_id).map(|&i| &self.hierarchy.areas[i])
    }

    pub fn category(&self, area_id: &str, category_id: &str) -> Option<&Category> {
        let a = *self.areas.get(area_id)?;
        let c = *self.categories.get(&(area_id.to_string(), category_id.to_string()))?;
        Some(&self.hierarchy.areas[a].categories[c])
    }

    pub fn item(&self, area_id: &str, category_id: &str, item_id: &str) -> Option<&Item> {
        let key = (area_id.to_string(), category_id.to_string(), item_id.to_string());
        let i = *self.items.get(&key)?;
        self.category(area_id, category_id)?.items().get(i)
    }

    pub fn update_area(&mut self, area_id: &str, update: NodeUpdate) -> Result<()> {
        let area = self.area_mut(area_id)?;
        apply_update(&mut area.description, &mut area.tags, update);
        tracing::info!(area = area_id, "area updated");
        Ok(())
    }

    pub fn update_category(
        &mut self,
        area_id: &str,
        category_id: &str,
        update: NodeUpdate,
    ) -> Result<()> {
        let category = self.category_mut(area_id, category_id)?;
        apply_update(&mut category.description, &mut category.tags, update);
        tracing::info!(area = area_id, category = category_id, "category updated");
        Ok(())
    }

    /// Adds a lowercased tag to the target. Returns `false` if it was already there.
    pub fn add_tag(&mut self, target: Target<'_>, tag: &str) -> Result<bool> {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return Err(Error::Operation("empty tag".to_string()));
        }
        let tags = match target {
            Target::Area(area) => &mut self.area_mut(area)?.tags,
            Target::Category { area, category } => &mut self.category_mut(area, category)?.tags,
        };
        if tags.contains(&tag) {
            return Ok(false);
        }
        tracing::info!(?target, tag = %tag, "tag added");
        tags.push(tag);
        Ok(true)
    }

    pub fn add_category(&mut self, area_id: &str, category: Category) -> Result<()> {
        let key = (area_id.to_string(), category.id.clone());
        let a = self.area_index(area_id)?;
        if self.categories.contains_key(&key) {
            return Err(Error::Duplicate(format!(
                "category {} in area {}",
                category.id, area_id
            )));
        }
        let categories = &mut self.hierarchy.areas[a].categories;
        tracing::info!(area = area_id, category = %category.id, "category added");
        self.categories.insert(key, categories.len());
        for (i, item) in category.items().iter().enumerate() {
            self.items
                .insert((area_id.to_string(), category.id.clone(), item.id.clone()), i);
        }
        categories.push(category);
        Ok(())
    }

    pub fn add_item(&mut self, area_id: &str, category_id: &str, item: Item) -> Result<()> {
        let key = (area_id.to_string(), category_id.to_string(), item.id.clone());
        if self.items.contains_key(&key) {
            return Err(Error::Duplicate(format!(
                "item {} in category {}",
                item.id, category_id
            )));
        }
        let category = self.category_mut(area_id, category_id)?;
        let items = category.items.get_or_insert_with(Vec::new);
        tracing::info!(area = area_id, category = category_id, item = %item.id, "item added");
        items.push(item);
        let position = items.len() - 1;
        self.items.insert(key, position);
        Ok(())
    }

    fn area_index(&self, area_id: &str) -> Result<usize> {
        self.areas
            .get(area_id)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("area {area_id}")))
    }

    fn area_mut(&mut self, area_id: &str) -> Result<&mut Area> {
        let a = self.area_index(area_id)?;
        Ok(&mut self.hierarchy.areas[a])
    }

    fn category_mut(&mut self, area_id: &str, category_id: &str) -> Result<&mut Category> {
        let a = self.area_index(area_id)?;
        let c = *self
            .categories
            .get(&(area_id.to_string(), category_id.to_string()))
            .ok_or_else(|| Error::NotFound(format!("category {category_id} in area {area_id}")))?;
        Ok(&mut self.hierarchy.areas[a].categories[c])
    }

    fn reindex(&mut self) {
        self.areas.clear();
        self.categories.clear();
        self.items.clear();
        for (a, area) in self.hierarchy.areas.iter().enumerate() {
            self.areas.insert(area.id.clone(), a);
            for (c, category) in area.categories.iter().enumerate() {
                self.categories.insert((area.id.clone(), category.id.clone()), c);
                for (i, item) in category.items().iter().enumerate() {
                    let key = (area.id.clone(), category.id.clone(), item.id.clone());
                    self.items.insert(key, i);
                }
            }
        }
    }
}

fn apply_update(description: &mut String, tags: &mut Vec<String>, update: NodeUpdate) {
    if let Some(d) = update.description {
        *description = d;
    }
    if let Some(t) = update.tags {
        *tags = t;
    }
}

/// Every loaded system, one of which is active.
#[derive(Debug, Clone, Default)]
pub struct Library {
    systems: Vec<Hierarchy>,
    active: usize,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the system with the same name, or appends a new one.
    /// Returns the position of the stored system.
    pub fn load_system(&mut self, system: Hierarchy) -> usize {
        if let Some(i) = self.systems.iter().position(|s| s.name == system.name) {
            tracing::info!(system = %system.name, "system replaced");
            self.systems[i] = system;
            i
        } else {
            tracing::info!(system = %system.name, "system loaded");
            self.systems.push(system);
            self.systems.len() - 1
        }
    }

    pub fn systems(&self) -> &[Hierarchy] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn active(&self) -> Option<&Hierarchy> {
        self.systems.get(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.systems.len() {
            return Err(Error::NotFound(format!("system #{index}")));
        }
        self.active = index;
        Ok(())
    }

    /// Makes the system called `name` active.
    pub fn activate(&mut self, name: &str) -> Result<&Hierarchy> {
        let i = self
            .systems
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| Error::NotFound(format!("system {name}")))?;
        self.active = i;
        Ok(&self.systems[i])
    }
}
