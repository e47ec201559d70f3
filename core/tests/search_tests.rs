use blogsearch_core::{
    search, tokenize, Analyzer, BuildError, DocId, DocumentRecord, DocumentStore, FieldWeights, InvertedIndex,
    SearchConfig, SearchEngine, TokenizerConfig,
};

fn posts() -> Vec<DocumentRecord> {
    serde_json::from_str(include_str!("fixtures/posts.json")).unwrap()
}

fn ids(engine: &SearchEngine, q: &str) -> Vec<DocId> {
    engine.search(q, 10).unwrap().into_iter().map(|h| h.record.id).collect()
}

#[test]
fn powershell_tagged_posts_rank_first() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    let hits = engine.search("powershell", 10).unwrap();
    // "PowerShellGet" and "PowerShell’s" are distinct terms, so only the tagged posts match
    assert_eq!(hits.len(), 3);
    for hit in &hits {
        assert!(hit.record.tags.iter().any(|t| t == "powershell"), "{} is not tagged powershell", hit.record.title);
    }
    // title + excerpt + tag beats tag + one other field
    assert_eq!(hits[0].record.title, "Validating Self-Signed Certificates From .Net and PowerShell");
}

#[test]
fn tagged_posts_outrank_excerpt_only_mentions() {
    let mut records = posts();
    records.push(DocumentRecord {
        id: 7,
        title: "Scripting notes".into(),
        excerpt: "Some powershell here, and more powershell there, and powershell again.".into(),
        tags: vec!["scripting".into()],
        categories: vec![],
        url: "https://example.org/scripting-notes/".into(),
        teaser: None,
    });
    let engine = SearchEngine::new(records, SearchConfig::default()).unwrap();
    let hits = engine.search("powershell", 10).unwrap();
    assert_eq!(hits.len(), 4);
    let tagged_floor = hits[..3].iter().map(|h| h.score).fold(f32::INFINITY, f32::min);
    for hit in &hits[..3] {
        assert!(hit.record.tags.iter().any(|t| t == "powershell"));
    }
    assert_eq!(hits[3].record.id, 7);
    assert!(hits[3].score < tagged_floor);
}

#[test]
fn frustrated_matches_only_fresh_start() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    let hits = engine.search("frustrated", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.title, "A Fresh Start");
    assert!(!hits.iter().any(|h| h.record.title == "Missing Content"));
}

#[test]
fn or_policy_unions_terms() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    let both = ids(&engine, "frustrated casting");
    assert!(both.contains(&2));
    assert!(both.contains(&5));
    assert!(both.contains(&6));
}

#[test]
fn absent_term_is_empty_not_error() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    assert!(engine.search("xyzzy-not-present", 10).unwrap().is_empty());
}

#[test]
fn empty_query_and_zero_limit() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    assert!(engine.search("", 10).unwrap().is_empty());
    assert!(engine.search("   ", 10).unwrap().is_empty());
    assert!(engine.search("powershell", 0).unwrap().is_empty());
}

#[test]
fn every_title_term_finds_its_document() {
    let records = posts();
    let store = DocumentStore::new(records.clone()).unwrap();
    let analyzer = Analyzer::default();
    let index = InvertedIndex::build(store.all(), &analyzer).unwrap();
    for rec in &records {
        for term in tokenize(&rec.title) {
            let hits = search(&index, &store, &analyzer, &FieldWeights::default(), &term, store.len()).unwrap();
            assert!(hits.iter().any(|h| h.record.id == rec.id), "term {term:?} did not find {}", rec.title);
        }
    }
}

#[test]
fn building_twice_gives_identical_rankings() {
    let a = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    let b = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    for q in ["powershell", "site news", "casting classes", "the", "developer brain", "frustrated upset"] {
        assert_eq!(a.search(q, 10).unwrap(), b.search(q, 10).unwrap(), "query {q:?}");
    }
}

#[test]
fn duplicate_ids_leave_active_index_alone() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    let before = engine.search("powershell", 10).unwrap();

    let mut bad = posts();
    bad[1].id = bad[0].id;
    assert_eq!(engine.rebuild(bad), Err(BuildError::DuplicateId(0)));

    assert_eq!(engine.search("powershell", 10).unwrap(), before);
    assert_eq!(engine.stats().num_docs, 7);
}

#[test]
fn custom_weights_change_ranking() {
    let config = SearchConfig {
        weights: FieldWeights { title: 10.0, excerpt: 1.0, tags: 1.0, match_boost: 0.0 },
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(posts(), config).unwrap();
    let hits = engine.search("powershell", 10).unwrap();
    // title matches dominate; the post without powershell in its title drops to third
    assert_eq!(hits[0].record.id, 3);
    assert_eq!(hits[1].record.id, 5);
    assert_eq!(hits[2].record.id, 6);
    assert_eq!(hits[0].score, 12.0);
}

#[test]
fn stemming_config_matches_inflections() {
    let plain = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    assert!(ids(&plain, "frustrate").is_empty());

    let config = SearchConfig { tokenizer: TokenizerConfig { stopwords: true, stem: true }, ..SearchConfig::default() };
    let stemmed = SearchEngine::new(posts(), config).unwrap();
    assert_eq!(ids(&stemmed, "frustrate"), vec![2]);
    assert!(ids(&stemmed, "the").is_empty());
}

#[test]
fn stats_reflect_corpus() {
    let engine = SearchEngine::new(posts(), SearchConfig::default()).unwrap();
    let stats = engine.stats();
    assert_eq!(stats.num_docs, 7);
    assert_eq!(stats.generation, 1);
    assert!(stats.num_terms > 0);
    assert!(stats.num_postings >= stats.num_terms);
}
