//! Text preprocessing for candidate requirements.
//!
//! Turns a candidate string into a [`FeatureSet`]: tokens (original casing),
//! lemmas, part-of-speech tags and the stop words that were filtered out.
//! Lemmatization and tagging are small rule sets tuned for requirement prose;
//! no model or external data is involved, so output is deterministic.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use super::extractor::CandidateRequirement;

/// English stop words.
///
/// Modal verbs (`must`, `should`, `shall`, `will`, `can`, ...) are deliberately
/// absent: they carry the requirement force and feed the shape patterns.
const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "nor", "for", "yet", "so", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    "mine", "yours", "hers", "ours", "theirs", "this", "that", "these", "those", "who", "whom",
    "which", "what", "whose", "is", "am", "are", "was", "were", "be", "been", "being", "have",
    "has", "had", "having", "do", "does", "did", "doing", "in", "on", "at", "to", "from", "by",
    "with", "of", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "up", "down", "out", "off", "over", "under", "again", "further", "here",
    "there", "where", "when", "why", "how", "all", "each", "every", "both", "few", "more", "most",
    "other", "some", "any", "no", "not", "only", "own", "same", "than", "too", "very", "just",
    "also", "now", "then", "once", "always", "never", "if", "because", "as", "until", "while",
    "although", "though", "s", "t", "ve", "re", "ll", "d", "m",
];

/// Words, numbers (with decimals and a trailing percent sign) or single punctuation marks.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['\-.][\p{L}\p{N}]+)*%?|[^\s\p{L}\p{N}]")
        .expect("Invalid regex: token pattern")
});

/// Forms the suffix rules get wrong.
static IRREGULAR_LEMMAS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("ran", "run"),
        ("made", "make"),
        ("sent", "send"),
        ("built", "build"),
        ("found", "find"),
        ("paid", "pay"),
        ("bought", "buy"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("kept", "keep"),
        ("left", "leave"),
        ("took", "take"),
        ("taken", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("saw", "see"),
        ("seen", "see"),
        ("wrote", "write"),
        ("written", "write"),
        ("got", "get"),
        ("gotten", "get"),
        ("went", "go"),
        ("gone", "go"),
        ("came", "come"),
        ("told", "tell"),
        ("said", "say"),
        ("held", "hold"),
        ("brought", "bring"),
        ("shown", "show"),
        ("used", "use"),
        ("using", "use"),
        ("created", "create"),
        ("creating", "create"),
        ("stored", "store"),
        ("storing", "store"),
        ("restored", "restore"),
        ("restoring", "restore"),
        ("invited", "invite"),
        ("inviting", "invite"),
        ("choosing", "choose"),
        ("cancelled", "cancel"),
        ("cancelling", "cancel"),
        ("caches", "cache"),
        ("cached", "cache"),
        ("caching", "cache"),
        ("scaled", "scale"),
        ("scaling", "scale"),
        ("focused", "focus"),
        ("guided", "guide"),
        ("targeted", "target"),
        ("based", "base"),
        ("embed", "embed"),
        ("hundred", "hundred"),
        ("faster", "fast"),
        ("fastest", "fast"),
        ("quicker", "quick"),
        ("better", "good"),
        ("best", "good"),
        ("slower", "slow"),
        ("larger", "large"),
        ("higher", "high"),
        ("lower", "low"),
        ("smaller", "small"),
        ("simpler", "simple"),
        ("safer", "safe"),
        ("bigger", "big"),
        ("children", "child"),
        ("people", "person"),
        ("men", "man"),
        ("women", "woman"),
        ("data", "data"),
        ("criteria", "criterion"),
        ("analyses", "analysis"),
        ("indices", "index"),
        ("series", "series"),
        ("media", "media"),
        ("friendly", "friendly"),
        ("family", "family"),
        ("daily", "daily"),
        ("something", "something"),
        ("nothing", "nothing"),
        ("anything", "anything"),
        ("everything", "everything"),
    ]
    .into_iter()
    .collect()
});

/// Closed word classes with fixed Penn Treebank tags.
static CLOSED_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let groups: &[(&'static str, &[&'static str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "that", "these", "those", "each", "every", "all", "some",
                "any", "no", "another", "both", "either", "neither",
            ],
        ),
        (
            "PRP",
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
                "myself", "itself", "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "its", "our", "their"]),
        (
            "MD",
            &["can", "could", "may", "might", "must", "shall", "should", "will", "would"],
        ),
        ("TO", &["to"]),
        (
            "IN",
            &[
                "in", "on", "at", "by", "for", "from", "with", "within", "without", "of", "about",
                "against", "between", "into", "through", "during", "before", "after", "above",
                "below", "under", "over", "per", "than", "as", "if", "because", "while", "until",
                "upon", "via", "across", "among", "since", "unless", "whether", "so", "although",
                "though",
            ],
        ),
        ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
        ("WDT", &["which"]),
        ("WP", &["what", "who", "whom"]),
        ("WP$", &["whose"]),
        ("WRB", &["when", "where", "why", "how"]),
        ("EX", &["there"]),
        ("RP", &["up", "down", "out", "off"]),
        (
            "RB",
            &[
                "not", "never", "always", "also", "very", "too", "just", "only", "often", "already",
                "then", "now", "again", "here", "once", "further", "more", "most",
            ],
        ),
        ("VB", &["be", "have", "do"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBP", &["are", "am"]),
        ("VBD", &["was", "were", "had", "did"]),
        ("VBN", &["been", "done"]),
        ("VBG", &["being", "having", "doing"]),
    ];

    let mut map = HashMap::new();
    for (tag, words) in groups {
        for word in *words {
            map.entry(*word).or_insert(*tag);
        }
    }
    map
});

const BE_FORMS: &[&str] = &["be", "is", "are", "am", "was", "were", "been", "being"];
const HAVE_FORMS: &[&str] = &["have", "has", "had", "having"];

/// Stem endings that lost a silent `e` when `-ed`/`-ing` was attached.
const E_RESTORING_ENDINGS: &[&str] = &[
    "at", "et", "ut", "ot", "as", "is", "us", "os", "id", "od", "ud", "ar", "ir", "ur", "ag",
    "ang", "rg", "dg", "rs", "ns", "ws", "in", "ul", "ib", "bl", "pl", "dl", "gl", "tl", "kl", "fl",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["able", "ible", "ful", "ous", "ive", "less", "ical", "ient"];

/// Linguistic features of one candidate requirement.
///
/// `tokens`, `lemmas` and `pos_tags` are index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// The candidate these features were derived from
    pub candidate: CandidateRequirement,
    /// Tokens in original casing, punctuation included
    pub tokens: Vec<String>,
    /// Base forms; stop words and punctuation are only lowercased
    pub lemmas: Vec<String>,
    /// `(token, Penn tag)` pairs
    pub pos_tags: Vec<(String, String)>,
    /// Distinct stop words filtered from the lexicon view
    pub stopwords_removed: BTreeSet<String>,
    /// Indices of content tokens (not stop words, not punctuation)
    content_indices: Vec<usize>,
}

impl FeatureSet {
    /// Feature set with no tokens, used for text that cannot be segmented.
    pub fn empty(candidate: CandidateRequirement) -> Self {
        Self {
            candidate,
            tokens: vec![],
            lemmas: vec![],
            pos_tags: vec![],
            stopwords_removed: BTreeSet::new(),
            content_indices: vec![],
        }
    }

    /// Candidate text the features describe.
    pub fn text(&self) -> &str {
        &self.candidate.text
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lemmas of content words, in order. This is the view lexicon matching uses.
    pub fn content_lemmas(&self) -> impl Iterator<Item = &str> {
        self.content_indices.iter().map(|&i| self.lemmas[i].as_str())
    }

    /// Lemmas of content tokens tagged as verbs.
    pub fn verb_lemmas(&self) -> impl Iterator<Item = &str> {
        self.content_indices
            .iter()
            .filter(|&&i| self.pos_tags[i].1.starts_with("VB"))
            .map(|&i| self.lemmas[i].as_str())
    }

    /// Content tokens tagged as verbs, lowercased.
    pub fn verbs(&self) -> Vec<String> {
        self.tokens_tagged("VB")
    }

    /// Content tokens tagged as nouns, lowercased.
    pub fn nouns(&self) -> Vec<String> {
        self.tokens_tagged("NN")
    }

    fn tokens_tagged(&self, prefix: &str) -> Vec<String> {
        self.content_indices
            .iter()
            .filter(|&&i| self.pos_tags[i].1.starts_with(prefix))
            .map(|&i| self.tokens[i].to_lowercase())
            .collect()
    }
}

/// Produces feature sets from candidate requirements.
pub struct TextPreprocessor {
    stopwords: HashSet<&'static str>,
    /// Base forms read as finite verbs after a noun subject ("the system sends")
    known_verbs: HashSet<String>,
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPreprocessor {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS_EN.iter().copied().collect(),
            known_verbs: HashSet::new(),
        }
    }

    /// Preprocessor that also recognizes `verbs` (base forms) in third-person
    /// singular after a noun subject.
    pub fn with_verbs<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_verbs: verbs.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word.to_lowercase().as_str())
    }

    /// Normalizes one word the way content lemmas are produced.
    ///
    /// Stop words and non-words are only lowercased. Lexicon terms go through
    /// this too, so bank and input meet in the same space.
    pub fn normalize_word(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if self.stopwords.contains(lower.as_str()) || !is_word(&lower) {
            lower
        } else {
            lemmatize(&lower)
        }
    }

    /// Run the full pipeline on a candidate.
    pub fn process(&self, candidate: CandidateRequirement) -> FeatureSet {
        let tokens = tokenize(&candidate.text);
        if tokens.is_empty() {
            return FeatureSet::empty(candidate);
        }

        let normalized: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut stopwords_removed = BTreeSet::new();
        let mut content_indices = Vec::new();
        for (i, word) in normalized.iter().enumerate() {
            if self.stopwords.contains(word.as_str()) {
                stopwords_removed.insert(word.clone());
            } else if is_word(word) {
                content_indices.push(i);
            }
        }

        let lemmas = normalized
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if content_indices.binary_search(&i).is_ok() {
                    lemmatize(word)
                } else {
                    word.clone()
                }
            })
            .collect();

        let pos_tags = tag_tokens(&tokens, &normalized, &self.known_verbs)
            .into_iter()
            .zip(&tokens)
            .map(|(tag, token)| (token.clone(), tag.to_string()))
            .collect();

        FeatureSet {
            candidate,
            tokens,
            lemmas,
            pos_tags,
            stopwords_removed,
            content_indices,
        }
    }

    /// Convenience wrapper for text that did not come from the extractor.
    pub fn process_text(&self, text: &str) -> FeatureSet {
        self.process(CandidateRequirement::new(text, 0))
    }
}

/// Split text into word, number and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Reduce a word to its base form.
pub fn lemmatize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(base) = IRREGULAR_LEMMAS.get(lower.as_str()) {
        return (*base).to_string();
    }
    if lower.chars().count() <= 3 || !lower.chars().all(char::is_alphabetic) {
        return lower;
    }
    lemmatize_regular(&lower).unwrap_or(lower)
}

fn lemmatize_regular(word: &str) -> Option<String> {
    for suffix in ["ies", "ied", "iest", "ier"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return (stem.chars().count() >= 2).then(|| format!("{}y", stem));
        }
    }
    if word.ends_with("sses") || ["xes", "ches", "shes", "zzes"].iter().any(|s| word.ends_with(s)) {
        return word.strip_suffix("es").map(str::to_string);
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return verb_stem(stem);
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if word.ends_with("eed") {
            return None;
        }
        return verb_stem(stem);
    }
    if let Some(stem) = word.strip_suffix("ily") {
        return Some(format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("bly") {
        return Some(format!("{}ble", stem));
    }
    if let Some(stem) = word.strip_suffix("ly") {
        return (stem.chars().count() >= 4 && !word.ends_with("ply")).then(|| stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        let keep = ["ss", "us", "is"].iter().any(|s| word.ends_with(s));
        return (!keep && stem.chars().count() >= 3).then(|| stem.to_string());
    }
    None
}

/// Undo `-ed`/`-ing` spelling changes: doubled consonants and dropped `e`.
fn verb_stem(stem: &str) -> Option<String> {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n < 3 || !chars.iter().copied().any(is_vowel) {
        return None;
    }

    let last = chars[n - 1];
    // Three-letter stems keep their double: add, egg, err
    if n > 3 && last == chars[n - 2] && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
        return Some(chars[..n - 1].iter().collect());
    }
    if matches!(last, 'v' | 'c') || (last == 'z' && chars[n - 2] != 'z') {
        return Some(format!("{}e", stem));
    }

    // "qu" acts as a consonant: requir(e), acquir(e)
    let vowel_pair = is_vowel(chars[n - 2])
        && is_vowel(chars[n - 3])
        && !(chars[n - 3] == 'u' && n >= 4 && chars[n - 4] == 'q');
    if !vowel_pair && E_RESTORING_ENDINGS.iter().any(|e| stem.ends_with(e)) {
        return Some(format!("{}e", stem));
    }
    Some(stem.to_string())
}

/// Assign a Penn Treebank tag to every token.
fn tag_tokens(tokens: &[String], normalized: &[String], known_verbs: &HashSet<String>) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::with_capacity(tokens.len());
    for (i, word) in normalized.iter().enumerate() {
        let tag = if !is_word(word) {
            punctuation_tag(word)
        } else if word.starts_with(|c: char| c.is_ascii_digit()) {
            "CD"
        } else if let Some(tag) = CLOSED_CLASS.get(word.as_str()) {
            *tag
        } else {
            tag_open_class(i, &tokens[i], normalized, &tags, known_verbs)
        };
        tags.push(tag);
    }
    tags
}

fn punctuation_tag(token: &str) -> &'static str {
    match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "'" => "''",
        _ => "SYM",
    }
}

fn tag_open_class(
    i: usize,
    original: &str,
    normalized: &[String],
    previous: &[&str],
    known_verbs: &HashSet<String>,
) -> &'static str {
    let word = normalized[i].as_str();
    let prev_tag = previous.last().copied();

    if matches!(prev_tag, Some("MD") | Some("TO")) {
        return "VB";
    }
    // Adverb between modal and verb: "must quickly respond"
    if prev_tag == Some("RB") && i >= 2 && matches!(previous[i - 2], "MD" | "TO") && !word.ends_with("ly") {
        return "VB";
    }

    if let Some(prev_word) = i.checked_sub(1).map(|j| normalized[j].as_str()) {
        if BE_FORMS.contains(&prev_word) {
            return if word.ends_with("ly") && !word.contains('-') {
                "RB"
            } else if word.ends_with("ed") {
                "VBN"
            } else if word.ends_with("ing") {
                "VBG"
            } else {
                "JJ"
            };
        }
        if HAVE_FORMS.contains(&prev_word) && word.ends_with("ed") {
            return "VBN";
        }
        if matches!(prev_word, "i" | "we" | "you" | "they") {
            return "VBP";
        }
        if matches!(prev_word, "he" | "she" | "it") && word.ends_with('s') {
            return "VBZ";
        }
    }

    // Sentence-initial open word is read as an imperative unless it is the
    // subject of a following modal or auxiliary.
    if i == 0 && !word.ends_with("ly") && !word.ends_with("ing") {
        let next = normalized.get(1).map(String::as_str);
        let next_is_predicate = next.is_some_and(|n| {
            BE_FORMS.contains(&n) || HAVE_FORMS.contains(&n) || CLOSED_CLASS.get(n) == Some(&"MD")
        });
        if !next_is_predicate {
            return "VB";
        }
    }

    // Finite verb after a noun subject: "the system sends", "the admin deletes"
    if matches!(prev_tag, Some("NN") | Some("NNP"))
        && word.ends_with('s')
        && !previous.iter().any(|t| t.starts_with("VB") || *t == "MD")
        && known_verbs.contains(&lemmatize(word))
    {
        return "VBZ";
    }

    suffix_tag(original, word, i)
}

fn suffix_tag(original: &str, word: &str, index: usize) -> &'static str {
    if word.ends_with("ing") && word.len() > 4 {
        "VBG"
    } else if word.ends_with("ed") && !word.ends_with("eed") && word.len() > 3 {
        "VBD"
    } else if word.ends_with("ly") && word.contains('-') {
        "JJ"
    } else if word.ends_with("ly") && word.len() > 4 {
        "RB"
    } else if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "JJ"
    } else if index > 0 && original.chars().next().is_some_and(char::is_uppercase) {
        "NNP"
    } else if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        "NNS"
    } else {
        "NN"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_of(features: &FeatureSet) -> Vec<&str> {
        features.pos_tags.iter().map(|(_, t)| t.as_str()).collect()
    }

    #[test]
    fn test_tokenize_keeps_punctuation_and_numbers() {
        let tokens = tokenize("The system shall be available 99.9% of the time.");
        assert_eq!(
            tokens,
            vec!["The", "system", "shall", "be", "available", "99.9%", "of", "the", "time", "."]
        );
    }

    #[test]
    fn test_tokenize_hyphenated_word() {
        let tokens = tokenize("should be user-friendly, intuitive");
        assert_eq!(tokens, vec!["should", "be", "user-friendly", ",", "intuitive"]);
    }

    #[test]
    fn test_lemmatize_regular_forms() {
        assert_eq!(lemmatize("seconds"), "second");
        assert_eq!(lemmatize("users"), "user");
        assert_eq!(lemmatize("queries"), "query");
        assert_eq!(lemmatize("processes"), "process");
        assert_eq!(lemmatize("encrypted"), "encrypt");
        assert_eq!(lemmatize("loading"), "load");
        assert_eq!(lemmatize("running"), "run");
        assert_eq!(lemmatize("deleted"), "delete");
        assert_eq!(lemmatize("updated"), "update");
        assert_eq!(lemmatize("saving"), "save");
        assert_eq!(lemmatize("authorized"), "authorize");
        assert_eq!(lemmatize("required"), "require");
        assert_eq!(lemmatize("easily"), "easy");
        assert_eq!(lemmatize("reliably"), "reliable");
        assert_eq!(lemmatize("quickly"), "quick");
    }

    #[test]
    fn test_lemmatize_short_and_silent_e_stems() {
        assert_eq!(lemmatize("added"), "add");
        assert_eq!(lemmatize("adding"), "add");
        assert_eq!(lemmatize("stopped"), "stop");
        assert_eq!(lemmatize("scheduled"), "schedule");
        assert_eq!(lemmatize("subscribed"), "subscribe");
        assert_eq!(lemmatize("browsing"), "browse");
        assert_eq!(lemmatize("invited"), "invite");
        assert_eq!(lemmatize("restored"), "restore");
        assert_eq!(lemmatize("caches"), "cache");
        assert_eq!(lemmatize("searches"), "search");
    }

    #[test]
    fn test_lemmatize_leaves_base_forms_alone() {
        for word in ["speed", "status", "access", "secure", "available", "string", "load", "need"] {
            assert_eq!(lemmatize(word), word, "'{}' should be unchanged", word);
        }
    }

    #[test]
    fn test_lemmatize_irregular() {
        assert_eq!(lemmatize("faster"), "fast");
        assert_eq!(lemmatize("created"), "create");
        assert_eq!(lemmatize("Children"), "child");
    }

    #[test]
    fn test_feature_lengths_align() {
        let pre = TextPreprocessor::new();
        let features = pre.process_text("The system must load within 2 seconds.");

        assert_eq!(features.tokens.len(), features.lemmas.len());
        assert_eq!(features.tokens.len(), features.pos_tags.len());
        assert_eq!(features.tokens[0], "The");
        assert!(features.stopwords_removed.contains("the"));
    }

    #[test]
    fn test_content_lemmas_skip_stopwords_and_punctuation() {
        let pre = TextPreprocessor::new();
        let features = pre.process_text("The system must load within 2 seconds.");
        let content: Vec<&str> = features.content_lemmas().collect();

        assert_eq!(content, vec!["system", "must", "load", "within", "2", "second"]);
    }

    #[test]
    fn test_modal_is_not_a_stopword() {
        let pre = TextPreprocessor::new();
        assert!(!pre.is_stopword("must"));
        assert!(!pre.is_stopword("Should"));
        assert!(pre.is_stopword("The"));
    }

    #[test]
    fn test_tagging_modal_verb_phrase() {
        let pre = TextPreprocessor::new();
        let features = pre.process_text("The system must load within 2 seconds");

        assert_eq!(tags_of(&features), vec!["DT", "NN", "MD", "VB", "IN", "CD", "NNS"]);
    }

    #[test]
    fn test_tagging_imperative_clause() {
        let pre = TextPreprocessor::new();
        let features = pre.process_text("register an account");

        assert_eq!(tags_of(&features), vec!["VB", "DT", "NN"]);
        assert_eq!(features.verbs(), vec!["register"]);
        assert_eq!(features.nouns(), vec!["account"]);
    }

    #[test]
    fn test_tagging_subject_before_modal() {
        let pre = TextPreprocessor::new();
        let features = pre.process_text("Users should reset passwords");

        assert_eq!(tags_of(&features), vec!["NNS", "MD", "VB", "NNS"]);
        let verbs: Vec<&str> = features.verb_lemmas().collect();
        assert_eq!(verbs, vec!["reset"]);
    }

    #[test]
    fn test_tagging_predicate_adjective() {
        let pre = TextPreprocessor::new();
        let features = pre.process_text("The application must be secure");

        assert_eq!(tags_of(&features), vec!["DT", "NN", "MD", "VB", "JJ"]);
    }

    #[test]
    fn test_tagging_finite_verb_after_noun_subject() {
        let pre = TextPreprocessor::with_verbs(["send", "delete"]);

        let features = pre.process_text("The system sends a confirmation email");
        assert_eq!(tags_of(&features), vec!["DT", "NN", "VBZ", "DT", "NN", "NN"]);
        assert_eq!(features.verb_lemmas().collect::<Vec<_>>(), vec!["send"]);

        let features = pre.process_text("The admin deletes inactive accounts");
        assert_eq!(features.pos_tags[2], ("deletes".to_string(), "VBZ".to_string()));
    }

    #[test]
    fn test_plural_noun_after_noun_stays_noun() {
        let pre = TextPreprocessor::with_verbs(["send"]);
        let features = pre.process_text("The user accounts must be locked");
        assert_eq!(features.pos_tags[2].1, "NNS");

        // Without a verb lexicon the tagger cannot tell
        let features = TextPreprocessor::new().process_text("The system sends a confirmation email");
        assert_eq!(features.pos_tags[2].1, "NNS");
    }

    #[test]
    fn test_empty_text_gives_empty_features() {
        let pre = TextPreprocessor::new();

        let features = pre.process_text("");
        assert!(features.is_empty());
        assert!(features.lemmas.is_empty());
        assert!(features.pos_tags.is_empty());

        let features = pre.process_text("   \t ");
        assert!(features.is_empty());
    }

    #[test]
    fn test_normalize_word_matches_content_lemmas() {
        let pre = TextPreprocessor::new();
        assert_eq!(pre.normalize_word("Seconds"), "second");
        assert_eq!(pre.normalize_word("to"), "to");
        assert_eq!(pre.normalize_word("user-friendly"), "user-friendly");
    }
}
