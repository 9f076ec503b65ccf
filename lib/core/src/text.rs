//! Text analysis for the TF-IDF vectorizer
//!
//! Lower-cases, extracts tokens of two or more word characters, drops English
//! stop words and expands the surviving tokens into n-grams.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Standard English stop-word list
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

#[inline]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Split lower-cased text into word-character runs (`\w+`), keeping single characters
pub fn words(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Analyzer settings shared by fit and projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub stop_words: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 2,
            stop_words: true,
        }
    }
}

impl Analyzer {
    /// Tokenize text: lowercase, tokens of 2+ word chars, stop words removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words || !is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize and expand into n-grams joined by a single space
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let mut terms = Vec::new();

        for n in self.ngram_min..=self.ngram_max {
            if n == 0 || n > tokens.len() {
                continue;
            }
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }

        terms
    }
}
