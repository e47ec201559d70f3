use crate::config::TokenizerConfig;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[^\p{L}\p{M}\p{N}\s]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Tokenize text using NFKC normalization, lowercasing and punctuation stripping.
///
/// Punctuation is deleted rather than treated as a separator, so `self-signed`
/// yields the single term `selfsigned`.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    PUNCT
        .replace_all(&normalized, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Term normalization shared by the index builder and the query engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analyzer {
    config: TokenizerConfig,
}

impl Analyzer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        let mut terms = tokenize(text);
        if self.config.stopwords {
            terms.retain(|t| !STOPWORDS.contains(t.as_str()));
        }
        if self.config.stem {
            terms = terms.into_iter().map(|t| STEMMER.stem(&t).into_owned()).collect();
        }
        terms
    }
}
