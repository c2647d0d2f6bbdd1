//! Flattens a hierarchy into scorable documents, one per area, category and item.
//!
//! Documents are emitted area first, then each of its categories followed
//! immediately by that category's items. The ranker uses this order to break
//! score ties.

use jdex_core::types::{AncestorText, Area, Category, Hierarchy, Item, NodeKind};

/// A node plus the text it is scored on. Lives for one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub kind: NodeKind,
    pub area: &'a Area,
    pub category: Option<&'a Category>,
    pub item: Option<&'a Item>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusOptions {
    pub ancestor_text: AncestorText,
}

pub fn build_corpus(hierarchy: &Hierarchy) -> Vec<Document<'_>> {
    build_corpus_with(hierarchy, &CorpusOptions::default())
}

pub fn build_corpus_with<'a>(
    hierarchy: &'a Hierarchy,
    options: &CorpusOptions,
) -> Vec<Document<'a>> {
    let mut docs = Vec::new();
    for area in &hierarchy.areas {
        let area_text = own_text(&area.name, &area.description, &area.tags);
        let area_as_ancestor = ancestor_text(options.ancestor_text, &area.name, &area_text);
        docs.push(Document {
            kind: NodeKind::Area,
            area,
            category: None,
            item: None,
            text: area_text.clone(),
        });

        for category in &area.categories {
            let category_text = own_text(&category.name, &category.description, &category.tags);
            let category_as_ancestor =
                ancestor_text(options.ancestor_text, &category.name, &category_text);
            docs.push(Document {
                kind: NodeKind::Category,
                area,
                category: Some(category),
                item: None,
                text: join([category_text.as_str(), area_as_ancestor]),
            });

            for item in category.items() {
                docs.push(Document {
                    kind: NodeKind::Item,
                    area,
                    category: Some(category),
                    item: Some(item),
                    text: join([
                        item.name.as_str(),
                        item.id.as_str(),
                        category_as_ancestor,
                        area_as_ancestor,
                    ]),
                });
            }
        }
    }
    tracing::trace!(documents = docs.len(), "corpus built");
    docs
}

/// Name, then description if any, then tags.
fn own_text(name: &str, description: &str, tags: &[String]) -> String {
    let mut parts = vec![name];
    if !description.is_empty() {
        parts.push(description);
    }
    parts.extend(tags.iter().map(String::as_str));
    join(parts)
}

fn ancestor_text<'t>(mode: AncestorText, name: &'t str, full: &'t str) -> &'t str {
    match mode {
        AncestorText::Name => name,
        AncestorText::Full => full,
    }
}

fn join<'s>(parts: impl IntoIterator<Item = &'s str>) -> String {
    parts.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ")
}
