//! Randomized domain values for request parameters and UI fixtures
//!
//! Every call produces a fresh, plausible value. Nothing is remembered
//! between calls, so two calls may return the same value.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Airport Gap ids known to resolve on the public demo service
pub const AIRPORT_IDS: &[&str] = &[
    "GKA", "MAG", "HGU", "LAE", "POM", "WWK", "UAK", "GOH", "SFJ", "THU",
    "AEY", "EGS", "KIX", "NRT", "HND", "JFK", "LAX", "ORD",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore",
    "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud",
    "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo",
    "consequat", "duis", "aute", "irure", "in", "reprehenderit", "voluptate",
    "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie",
    "Avery", "Quinn", "Robin", "Drew", "Harper", "Rowan", "Sasha", "Kai",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Ivanova", "Garcia", "Kim", "Novak", "Schmidt", "Rossi", "Tanaka",
    "Silva", "Larsen", "Dubois", "Kowalski", "Okafor", "Nguyen", "Petrov", "Haddad",
];

const NOTE_TOPICS: &[&str] = &[
    "Layover spot", "Good lounges", "Close to the city", "Visited in spring",
    "Great view on approach", "Fast security", "Next trip", "Family visit",
];

/// Producer of arbitrary domain values.
///
/// `new()` draws from OS entropy; `seeded()` yields the same sequence for the
/// same seed, which keeps unit tests stable.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random airport id from [`AIRPORT_IDS`]
    pub fn airport_id(&mut self) -> String {
        self.pick(AIRPORT_IDS).to_string()
    }

    /// Free-text note attached to a favorite airport
    pub fn airport_note(&mut self) -> String {
        let topic = self.pick(NOTE_TOPICS);
        format!("{} #{}", topic, self.rng.gen_range(1..1000))
    }

    pub fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    /// Human readable "First Last"
    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    /// RealWorld username: lowercase, no spaces, numeric suffix
    pub fn username(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        format!("{}_{}{}", first, last, self.rng.gen_range(100..100_000))
    }

    pub fn email(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        format!("{}.{}{}@example.com", first, last, self.rng.gen_range(100..100_000))
    }

    /// 12 alphanumeric characters
    pub fn password(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect()
    }

    pub fn word(&mut self) -> String {
        self.pick(LOREM).to_string()
    }

    /// Capitalized sentence of 4 to 9 words ending with a period
    pub fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(4..=9);
        let words: Vec<&str> = (0..count).map(|_| self.pick(LOREM)).collect();
        let mut sentence = capitalize(&words.join(" "));
        sentence.push('.');
        sentence
    }

    /// 3 to 5 sentences
    pub fn paragraph(&mut self) -> String {
        let count = self.rng.gen_range(3..=5);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `count` paragraphs separated by newlines
    pub fn paragraphs(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| self.paragraph())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        // Pools are non-empty constants
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
