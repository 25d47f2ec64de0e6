//! Unsupervised keyword extraction with YAKE.
//!
//! Every word is scored from statistical features of its occurrences (casing,
//! position, frequency, context relatedness and sentence spread) and candidate
//! phrases of up to `n` words combine the scores of their terms. Lower scores
//! are better. Near-duplicate phrases are dropped with a string similarity
//! threshold.

use std::collections::{HashMap, HashSet};

use crate::config::KeywordConfig;
use crate::stopwords::StopwordSet;
use crate::tokenize::{sent_tokenize, word_tokenize};

/// A keyword phrase and its YAKE score (lower is more relevant).
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub phrase: String,
    pub score: f64,
}

/// YAKE extractor for phrases of up to `ngram` words.
#[derive(Debug, Clone)]
pub struct YakeExtractor {
    ngram: usize,
    top: usize,
    dedup_threshold: f64,
    window: usize,
    stopwords: &'static StopwordSet,
}

impl YakeExtractor {
    pub fn new(ngram: usize) -> Self {
        Self { ngram: ngram.max(1), top: 20, dedup_threshold: 0.9, window: 1, stopwords: StopwordSet::keywords() }
    }

    pub fn from_config(config: &KeywordConfig, ngram: usize) -> Self {
        Self::new(ngram)
            .with_top(config.top)
            .with_dedup_threshold(config.dedup_threshold)
            .with_window(config.window_size)
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    pub fn with_dedup_threshold(mut self, threshold: f64) -> Self {
        self.dedup_threshold = threshold;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Extracts at most `top` keywords from `text`, best first.
    ///
    /// ```rust
    /// use lexiscope_core::keywords::YakeExtractor;
    ///
    /// let keywords = YakeExtractor::new(2).extract("Solar panels cut bills. Solar panels need sun.");
    /// assert!(keywords.iter().any(|k| k.phrase == "Solar panels"));
    /// assert!(keywords.iter().all(|k| k.phrase.split(' ').count() <= 2));
    /// ```
    pub fn extract(&self, text: &str) -> Vec<Keyword> {
        if self.top == 0 {
            return Vec::new();
        }

        let mut corpus = Corpus::build(text, self.ngram, self.window, self.stopwords);
        if !corpus.score_terms() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &Candidate)> = corpus
            .candidates
            .iter()
            .filter(|c| corpus.is_valid(c))
            .map(|c| (corpus.candidate_score(c), c))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut kept: Vec<(f64, &Candidate)> = Vec::new();
        for (score, candidate) in scored {
            if self.dedup_threshold < 1.0
                && kept.iter().any(|(_, k)| similarity(&candidate.key, &k.key) > self.dedup_threshold)
            {
                continue;
            }
            kept.push((score, candidate));
            if kept.len() == self.top {
                break;
            }
        }

        kept.into_iter()
            .map(|(score, candidate)| Keyword { phrase: candidate.surface.clone(), score })
            .collect()
    }
}

/// Character-level similarity in `[0, 1]`: twice the longest common
/// subsequence over the combined length.
///
/// ```rust
/// use lexiscope_core::keywords::similarity;
///
/// assert_eq!(similarity("policy", "policy"), 1.0);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diagonal + 1 } else { above.max(row[j]) };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Casing class of one word occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Digit,
    Unusual,
    Acronym,
    Name,
    Plain,
}

impl Tag {
    fn of(word: &str, position: usize) -> Self {
        if word.replace(',', "").parse::<f64>().is_ok() {
            return Tag::Digit;
        }

        let digits = word.chars().filter(char::is_ascii_digit).count();
        let alpha = word.chars().filter(|c| c.is_alphabetic()).count();
        let punct = word.chars().filter(char::is_ascii_punctuation).count();
        if (digits > 0 && alpha > 0) || (digits == 0 && alpha == 0) || punct > 1 {
            return Tag::Unusual;
        }

        let upper = word.chars().filter(|c| c.is_uppercase()).count();
        if upper == word.chars().count() {
            return Tag::Acronym;
        }

        let first_upper = word.chars().next().is_some_and(char::is_uppercase);
        if upper == 1 && first_upper && word.chars().count() > 1 && position > 0 {
            return Tag::Name;
        }

        Tag::Plain
    }

    fn code(self) -> char {
        match self {
            Tag::Digit => 'd',
            Tag::Unusual => 'u',
            Tag::Acronym => 'a',
            Tag::Name => 'n',
            Tag::Plain => 'p',
        }
    }

    fn is_excluded(self) -> bool {
        matches!(self, Tag::Digit | Tag::Unusual)
    }
}

#[derive(Debug, Default)]
struct Term {
    stopword: bool,
    tf: f64,
    tf_acronym: f64,
    tf_name: f64,
    /// Distinct sentence ids, ascending.
    sentences: Vec<usize>,
    score: f64,
}

impl Term {
    fn add_occurrence(&mut self, tag: Tag, sentence: usize) {
        self.tf += 1.0;
        match tag {
            Tag::Acronym => self.tf_acronym += 1.0,
            Tag::Name => self.tf_name += 1.0,
            _ => {}
        }
        if self.sentences.last() != Some(&sentence) {
            self.sentences.push(sentence);
        }
    }

    fn median_sentence(&self) -> f64 {
        let n = self.sentences.len();
        if n == 0 {
            return 0.0;
        }
        if n % 2 == 1 {
            self.sentences[n / 2] as f64
        } else {
            (self.sentences[n / 2 - 1] + self.sentences[n / 2]) as f64 / 2.0
        }
    }
}

#[derive(Debug)]
struct Candidate {
    surface: String,
    key: String,
    terms: Vec<usize>,
    tags: HashSet<String>,
    tf: f64,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    tag: Tag,
    surface: &'a str,
    term: usize,
}

#[derive(Debug, Default)]
struct Corpus {
    terms: Vec<Term>,
    term_index: HashMap<String, usize>,
    edges: HashMap<(usize, usize), f64>,
    candidates: Vec<Candidate>,
    candidate_index: HashMap<String, usize>,
    sentence_count: usize,
}

impl Corpus {
    fn build(text: &str, ngram: usize, window: usize, stopwords: &StopwordSet) -> Self {
        let mut corpus = Corpus::default();

        for sentence in sent_tokenize(text) {
            let words: Vec<&str> = word_tokenize(sentence)
                .into_iter()
                .filter(|w| !(w.starts_with(['\'', '’']) && w.chars().count() > 1))
                .collect();
            if words.is_empty() {
                continue;
            }

            let sentence_id = corpus.sentence_count;
            corpus.sentence_count += 1;

            let mut block: Vec<Token> = Vec::new();
            for (position, word) in words.into_iter().enumerate() {
                if word.chars().all(|c| c.is_ascii_punctuation()) {
                    block.clear();
                    continue;
                }

                let tag = Tag::of(word, position);
                let term = corpus.term_id(word, stopwords);
                corpus.terms[term].add_occurrence(tag, sentence_id);

                if !tag.is_excluded() {
                    for previous in &block[block.len().saturating_sub(window)..] {
                        if !previous.tag.is_excluded() {
                            *corpus.edges.entry((previous.term, term)).or_insert(0.0) += 1.0;
                        }
                    }
                }

                let token = Token { tag, surface: word, term };
                corpus.add_candidate(&[token]);
                for from in (block.len().saturating_sub(ngram - 1)..block.len()).rev() {
                    let mut phrase = block[from..].to_vec();
                    phrase.push(token);
                    corpus.add_candidate(&phrase);
                }

                block.push(token);
            }
        }

        corpus
    }

    fn term_id(&mut self, word: &str, stopwords: &StopwordSet) -> usize {
        let lower = word.to_lowercase();
        let plain_stopword = stopwords.contains(&lower);
        let key = match lower.strip_suffix('s') {
            Some(stem) if lower.chars().count() > 3 => stem.to_string(),
            _ => lower,
        };

        if let Some(&id) = self.term_index.get(&key) {
            return id;
        }

        let letters = key.chars().filter(|c| !c.is_ascii_punctuation()).count();
        let stopword = plain_stopword || stopwords.contains(&key) || letters < 3;

        let id = self.terms.len();
        self.terms.push(Term { stopword, ..Term::default() });
        self.term_index.insert(key, id);
        id
    }

    fn add_candidate(&mut self, tokens: &[Token]) {
        let surface = tokens.iter().map(|t| t.surface).collect::<Vec<_>>().join(" ");
        let key = surface.to_lowercase();
        let tags: String = tokens.iter().map(|t| t.tag.code()).collect();

        if let Some(&id) = self.candidate_index.get(&key) {
            let candidate = &mut self.candidates[id];
            candidate.tf += 1.0;
            candidate.tags.insert(tags);
            return;
        }

        self.candidate_index.insert(key.clone(), self.candidates.len());
        self.candidates.push(Candidate {
            surface,
            key,
            terms: tokens.iter().map(|t| t.term).collect(),
            tags: HashSet::from([tags]),
            tf: 1.0,
        });
    }

    /// Scores every term. Returns false when no term is a content word.
    fn score_terms(&mut self) -> bool {
        let content: Vec<f64> = self.terms.iter().filter(|t| !t.stopword).map(|t| t.tf).collect();
        if content.is_empty() || self.sentence_count == 0 {
            return false;
        }

        let max_tf = self.terms.iter().map(|t| t.tf).fold(0.0, f64::max);
        let mean = content.iter().sum::<f64>() / content.len() as f64;
        let std = (content.iter().map(|tf| (tf - mean).powi(2)).sum::<f64>() / content.len() as f64).sqrt();

        let n = self.terms.len();
        let (mut in_degree, mut in_weight) = (vec![0.0; n], vec![0.0; n]);
        let (mut out_degree, mut out_weight) = (vec![0.0; n], vec![0.0; n]);
        for (&(from, to), &weight) in &self.edges {
            out_degree[from] += 1.0;
            out_weight[from] += weight;
            in_degree[to] += 1.0;
            in_weight[to] += weight;
        }

        let sentences = self.sentence_count as f64;
        for (id, term) in self.terms.iter_mut().enumerate() {
            let left = if in_weight[id] == 0.0 { 0.0 } else { in_degree[id] / in_weight[id] };
            let right = if out_weight[id] == 0.0 { 0.0 } else { out_degree[id] / out_weight[id] };

            let relatedness = (0.5 + left * (term.tf / max_tf)) + (0.5 + right * (term.tf / max_tf));
            let frequency = term.tf / (mean + std);
            let spread = term.sentences.len() as f64 / sentences;
            let casing = term.tf_acronym.max(term.tf_name) / (1.0 + term.tf.ln());
            let position = (3.0 + term.median_sentence()).ln().ln();

            term.score =
                (position * relatedness) / (casing + (frequency / relatedness) + (spread / relatedness));
        }

        true
    }

    fn is_valid(&self, candidate: &Candidate) -> bool {
        let clean_tags = candidate.tags.iter().any(|t| !t.contains(['u', 'd']));
        let bounded = match (candidate.terms.first(), candidate.terms.last()) {
            (Some(&first), Some(&last)) => !self.terms[first].stopword && !self.terms[last].stopword,
            _ => false,
        };
        clean_tags && bounded
    }

    fn candidate_score(&self, candidate: &Candidate) -> f64 {
        let mut sum = 0.0;
        let mut product = 1.0;

        for (i, &id) in candidate.terms.iter().enumerate() {
            let term = &self.terms[id];
            if !term.stopword {
                sum += term.score;
                product *= term.score;
                continue;
            }

            // stopwords inside a phrase weigh by how strongly they bind their neighbours
            let from_prev = i
                .checked_sub(1)
                .map(|p| candidate.terms[p])
                .map_or(0.0, |prev| self.edge_weight(prev, id) / self.terms[prev].tf);
            let to_next = candidate
                .terms
                .get(i + 1)
                .map_or(0.0, |&next| self.edge_weight(id, next) / self.terms[next].tf);
            let bond = from_prev * to_next;

            product *= 2.0 - bond;
            sum -= 1.0 - bond;
        }

        product / ((sum + 1.0) * candidate.tf)
    }

    fn edge_weight(&self, from: usize, to: usize) -> f64 {
        self.edges.get(&(from, to)).copied().unwrap_or(0.0)
    }
}
