//! Free-text quick-add: `Name [NN]` lines and trailing `#hashtags`.
//!
//! Under a category, `Invoices [3]` creates item `<prefix>.<category>.03`;
//! under an area it creates category `03`. A line ending in `#word` tags the
//! target instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, Target};
use crate::error::{Error, Result};
use crate::types::{Category, Item};

/// What [`apply`] did with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickAdd {
    Item(Item),
    Category(Category),
    Tag(String),
}

static SYSTEM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][0-9]+").expect("system prefix pattern"));
static ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\[([0-9]+)\]$").expect("item pattern"));
// ASCII word characters only
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)$").expect("hashtag pattern"));

/// Leading letter followed by digits, e.g. `d1` from `d1-Prive`. Empty when absent.
pub fn extract_system_prefix(system_name: &str) -> &str {
    SYSTEM_PREFIX.find(system_name).map_or("", |m| m.as_str())
}

/// Parses `Name [NN]` into `("Name", "NN")`.
pub fn parse_item_pattern(input: &str) -> Option<(&str, &str)> {
    let caps = ITEM_PATTERN.captures(input.trim())?;
    let name = caps.get(1)?.as_str().trim();
    let number = caps.get(2)?.as_str();
    if name.is_empty() {
        return None;
    }
    Some((name, number))
}

/// `prefix.category.NN`, or `category.NN` without a prefix.
pub fn build_item_id(system_prefix: &str, category_id: &str, number: &str) -> String {
    let number = pad_number(number);
    if system_prefix.is_empty() {
        format!("{category_id}.{number}")
    } else {
        format!("{system_prefix}.{category_id}.{number}")
    }
}

/// Lowercased word of a `#word` at the very end of `text`.
pub fn trailing_hashtag(text: &str) -> Option<String> {
    HASHTAG.captures(text).map(|caps| caps[1].to_lowercase())
}

/// Applies one quick-add line to `target` in `catalog`.
pub fn apply(catalog: &mut Catalog, target: Target<'_>, line: &str) -> Result<QuickAdd> {
    if let Some((name, number)) = parse_item_pattern(line) {
        return match target {
            Target::Category { area, category } => {
                let prefix = extract_system_prefix(catalog.name()).to_string();
                let item = Item {
                    id: build_item_id(&prefix, category, number),
                    name: name.to_string(),
                };
                catalog.add_item(area, category, item.clone())?;
                Ok(QuickAdd::Item(item))
            }
            Target::Area(area) => {
                let category = Category {
                    id: pad_number(number),
                    name: name.to_string(),
                    items: Some(Vec::new()),
                    ..Category::default()
                };
                catalog.add_category(area, category.clone())?;
                Ok(QuickAdd::Category(category))
            }
        };
    }
    if let Some(tag) = trailing_hashtag(line.trim_end()) {
        catalog.add_tag(target, &tag)?;
        return Ok(QuickAdd::Tag(tag));
    }
    Err(Error::Operation(format!("nothing to add in {line:?}")))
}

fn pad_number(number: &str) -> String {
    format!("{number:0>2}")
}
