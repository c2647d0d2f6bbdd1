use jdex_core::traits::HierarchySearch;
use jdex_core::types::{AncestorText, Area, Category, Hierarchy, Item, NodeKind, ScoredResult};
use jdex_search::{build_corpus, build_corpus_with, search, Bm25Search, CorpusOptions};

fn work() -> Hierarchy {
    serde_json::from_str(
        r#"{
          "name": "Work",
          "areas": [{
            "id": "10-19", "name": "Administration", "description": "", "tags": ["hr"],
            "categories": [{
              "id": "11", "name": "HR Documents",
              "description": "Employee records", "tags": ["employees"],
              "items": [{ "id": "11.01", "name": "Contracts" }]
            }]
          }]
        }"#,
    )
    .expect("fixture")
}

fn legal() -> Hierarchy {
    Hierarchy {
        name: "Home".into(),
        areas: vec![Area {
            id: "20-29".into(),
            name: "Household".into(),
            description: "Running the house".into(),
            tags: vec!["legal".into()],
            categories: vec![Category {
                id: "21".into(),
                name: "Garden".into(),
                description: "Plants and tools".into(),
                tags: vec!["outdoor".into()],
                items: Some(vec![Item { id: "21.01".into(), name: "Seeds".into() }]),
            }],
        }],
    }
}

fn labels(results: &[ScoredResult<'_>]) -> Vec<String> {
    results.iter().map(ScoredResult::label).collect()
}

#[test]
fn corpus_emits_area_categories_then_items_in_order() {
    let mut h = work();
    h.areas.push(Area { id: "20-29".into(), name: "Finance".into(), ..Area::default() });
    let docs = build_corpus(&h);
    let kinds: Vec<NodeKind> = docs.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [NodeKind::Area, NodeKind::Category, NodeKind::Item, NodeKind::Area]);
    assert_eq!(docs[0].text, "Administration hr", "empty description skipped");
    assert_eq!(docs[1].text, "HR Documents Employee records employees Administration");
    assert_eq!(docs[2].text, "Contracts 11.01 HR Documents Administration");
    assert_eq!(docs[2].item.map(|i| i.id.as_str()), Some("11.01"));
    assert_eq!(docs[3].area.name, "Finance");
}

#[test]
fn corpus_full_ancestor_text_carries_tags_down() {
    let h = work();
    let docs = build_corpus_with(&h, &CorpusOptions { ancestor_text: AncestorText::Full });
    assert_eq!(docs[1].text, "HR Documents Employee records employees Administration hr");
    assert_eq!(
        docs[2].text,
        "Contracts 11.01 HR Documents Employee records employees Administration hr"
    );
}

#[test]
fn empty_query_and_empty_hierarchy_return_nothing() {
    assert!(search(&work(), "").is_empty());
    assert!(search(&work(), "   \t").is_empty());
    assert!(search(&Hierarchy::default(), "anything").is_empty());
    assert!(build_corpus(&Hierarchy::default()).is_empty());
}

#[test]
fn end_to_end_employee_query() {
    let h = work();
    let results = search(&h, "employee");
    assert_eq!(labels(&results), ["11 HR Documents"], "only the category mentions employees");
    let hit = &results[0];
    assert_eq!(hit.kind, NodeKind::Category);
    assert_eq!(hit.matched_terms, ["employee"]);
    assert!(hit.score > 0.0);
    assert!(
        std::ptr::eq(hit.category.unwrap(), &h.areas[0].categories[0]),
        "borrows the caller's node"
    );
}

#[test]
fn substring_and_case_insensitive_matching() {
    let h = work();
    let results = search(&h, "doc");
    assert!(labels(&results).contains(&"11 HR Documents".to_string()));

    let results = search(&h, "ADMIN");
    assert_eq!(results.len(), 3, "area, category and item all carry the area name");
    assert!(results.iter().all(|r| r.matched_terms == ["admin"]));
}

#[test]
fn area_tag_does_not_bleed_into_children() {
    let h = legal();
    let results = search(&h, "legal");
    assert_eq!(labels(&results), ["20-29 Household"]);

    let results = search(&h, "outdoor");
    assert_eq!(labels(&results), ["21 Garden"], "category tag stays off the area and item");
}

#[test]
fn area_name_reaches_nested_items() {
    let h = legal();
    let results = search(&h, "household");
    assert_eq!(results.len(), 3);
    let item = results.iter().find(|r| r.kind == NodeKind::Item).expect("item hit");
    assert_eq!(item.path(), "20-29 › 21 › 21.01");
}

#[test]
fn results_are_positive_sorted_and_tagged() {
    let h = work();
    for query in ["hr", "records contracts", "administration documents employee", "11"] {
        let results = search(&h, query);
        assert!(!results.is_empty(), "{query}");
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score, "{query}: not sorted");
        }
        for r in &results {
            assert!(r.score > 0.0);
            assert!(!r.matched_terms.is_empty());
        }
    }
}

#[test]
fn shorter_document_ranks_first_on_equal_term_frequency() {
    let h = work();
    let results = search(&h, "hr");
    assert_eq!(labels(&results)[0], "10-19 Administration");
}

#[test]
fn ties_keep_corpus_order() {
    let h = Hierarchy {
        name: "Tie".into(),
        areas: ["A", "B", "C"]
            .into_iter()
            .enumerate()
            .map(|(i, id)| Area { id: id.into(), name: format!("box{i}"), ..Area::default() })
            .collect(),
    };
    let results = search(&h, "box");
    assert_eq!(labels(&results), ["A box0", "B box1", "C box2"]);
}

#[test]
fn unmatched_terms_contribute_nothing() {
    let h = work();
    let with_noise = search(&h, "employee zzz");
    let plain = search(&h, "employee");
    assert_eq!(with_noise.len(), plain.len());
    assert!((with_noise[0].score - plain[0].score).abs() < 1e-12);
    assert_eq!(with_noise[0].matched_terms, ["employee"]);
}

// Repeated query terms are scored per occurrence. Whether this should
// deduplicate is open; the test pins the current behaviour.
#[test]
fn repeated_query_terms_amplify_score() {
    let h = work();
    let once = search(&h, "employee");
    let twice = search(&h, "employee employee");
    assert!((twice[0].score - 2.0 * once[0].score).abs() < 1e-9);
    assert_eq!(twice[0].matched_terms, ["employee"], "matched terms stay unique");
}

#[test]
fn scores_match_the_bm25_formula() {
    let h = work();
    let results = search(&h, "employee");
    // 3 docs with 2, 6 and 5 tokens; df = 1; tf = 2 ("employee", "employees")
    let n = 3.0_f64;
    let df = 1.0_f64;
    let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
    let avg = (2.0 + 6.0 + 5.0) / 3.0;
    let tf = 2.0;
    let expected = idf * tf * 2.5 / (tf + 1.5 * (1.0 - 0.75 + 0.75 * 6.0 / avg));
    assert!((results[0].score - expected).abs() < 1e-12, "{} vs {}", results[0].score, expected);
}

#[test]
fn search_is_idempotent_and_leaves_input_untouched() {
    let h = work();
    let before = h.clone();
    let first = search(&h, "hr documents");
    let second = search(&h, "hr documents");
    assert_eq!(first, second);
    assert_eq!(h, before);
}

#[test]
fn trait_object_uses_configured_options() {
    let h = legal();
    let options = CorpusOptions { ancestor_text: AncestorText::Full };
    let engine: Box<dyn HierarchySearch> = Box::new(Bm25Search::new(options));
    let results = engine.search(&h, "legal");
    assert_eq!(results.len(), 3, "full ancestor text surfaces the category and item too");
    assert_eq!(results[0].kind, NodeKind::Area, "shortest document ranks first");
}

#[test]
fn tokenless_corpus_matches_nothing() {
    let h = Hierarchy {
        name: "Blank".into(),
        areas: vec![Area { id: "10-19".into(), name: String::new(), ..Area::default() }],
    };
    let corpus = build_corpus(&h);
    assert_eq!(corpus.len(), 1);
    assert!(corpus[0].text.is_empty(), "an unnamed area has no text");
    assert!(search(&h, "a").is_empty(), "zero average length scores nothing");
}
