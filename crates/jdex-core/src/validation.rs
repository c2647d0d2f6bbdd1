//! Schema checks applied to hierarchies before they enter the catalog.
//!
//! The first violation found is reported; nothing is repaired.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::types::{Area, Category, Hierarchy};

pub const MAX_SYSTEM_NAME_CHARS: usize = 100;
pub const MAX_AREAS: usize = 20;
pub const MAX_DOMAINS: usize = 10;
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub fn validate_system(system: &Hierarchy) -> Result<()> {
    if system.name.trim().is_empty() {
        return Err(invalid("System name is required"));
    }
    if system.name.chars().count() > MAX_SYSTEM_NAME_CHARS {
        return Err(invalid(format!(
            "System name must be under {MAX_SYSTEM_NAME_CHARS} characters"
        )));
    }
    if system.areas.len() > MAX_AREAS {
        return Err(invalid(format!("Maximum {MAX_AREAS} areas allowed")));
    }

    let mut area_ids = HashSet::new();
    for area in &system.areas {
        validate_area(area)?;
        if !area_ids.insert(area.id.as_str()) {
            return Err(Error::Duplicate(format!("area {}", area.id)));
        }
    }
    Ok(())
}

pub fn validate_domains(systems: &[Hierarchy]) -> Result<()> {
    if systems.len() > MAX_DOMAINS {
        return Err(invalid(format!("Maximum {MAX_DOMAINS} domains allowed")));
    }
    systems.iter().try_for_each(validate_system)
}

fn validate_area(area: &Area) -> Result<()> {
    required(&area.id, "Area ID is required")?;
    required(&area.name, "Area name is required")?;

    let mut category_ids = HashSet::new();
    for category in &area.categories {
        validate_category(category)?;
        if !category_ids.insert(category.id.as_str()) {
            return Err(Error::Duplicate(format!("category {} in area {}", category.id, area.id)));
        }
    }
    Ok(())
}

fn validate_category(category: &Category) -> Result<()> {
    required(&category.id, "Category ID is required")?;
    required(&category.name, "Category name is required")?;

    let mut item_ids = HashSet::new();
    for item in category.items() {
        required(&item.id, "Item ID is required")?;
        required(&item.name, "Item name is required")?;
        if !item_ids.insert(item.id.as_str()) {
            return Err(Error::Duplicate(format!("item {} in category {}", item.id, category.id)));
        }
    }
    Ok(())
}

fn required(value: &str, message: &str) -> Result<()> {
    if value.is_empty() { Err(invalid(message)) } else { Ok(()) }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation(message.into())
}
