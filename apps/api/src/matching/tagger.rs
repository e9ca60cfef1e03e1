//! Linguistic tagging: assigns a part of speech and an optional named-entity kind
//! to every token of a text.
//!
//! `Tagger` is the seam: the keyword extractor receives an `Arc<dyn Tagger>` at
//! construction. `LexiconTagger` is the built-in rule-based backend. It is built
//! once at startup and is read-only afterwards.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+|[^\w\s]+").expect("token pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
}

impl PartOfSpeech {
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Acronyms: AWS, SQL, IBM.
    Organization,
    /// Capitalised words inside a sentence: people, products, places.
    Name,
    /// Four-digit years.
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
    pub entity: Option<EntityKind>,
}

impl TaggedToken {
    fn new(text: &str, pos: PartOfSpeech, entity: Option<EntityKind>) -> Self {
        Self {
            text: text.to_string(),
            pos,
            entity,
        }
    }
}

pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicon
// ────────────────────────────────────────────────────────────────────────────

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some", "all",
    "no", "our", "your", "their", "its", "my", "his", "her", "both", "either", "neither",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "we", "they", "he", "she", "it", "me", "us", "them", "him", "who", "whom",
    "whose", "what", "which", "myself", "yourself", "ourselves", "themselves", "itself",
    "someone", "anyone", "everyone",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off",
    "over", "under", "across", "within", "without", "per", "via", "as", "like", "than",
    "among", "around", "toward", "towards", "upon", "onto",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "whereas",
    "whether", "since", "unless", "until", "when", "where", "then",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do",
    "does", "did", "will", "would", "can", "could", "should", "may", "might", "must", "shall",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "dozen",
];

/// Verbs in every position, including irregular past forms the suffix rules miss.
const COMMON_VERBS: &[&str] = &[
    "join", "seek", "want", "need", "make", "get", "take", "ensure", "create", "apply",
    "bring", "thrive", "grow", "enjoy", "love", "own", "write", "deploy", "implement",
    "develop", "deliver", "maintain", "manage", "collaborate", "communicate", "coordinate",
    "analyze", "analyse", "optimize", "optimise", "improve", "automate", "integrate",
    "migrate", "troubleshoot", "configure", "establish", "execute", "define", "identify",
    "contribute", "participate", "led", "built", "ran", "wrote", "made", "drove", "grew",
    "won", "taught", "began", "oversaw", "brought",
];

/// Words that are verbs in a verb slot and nouns elsewhere ("design services" vs
/// "system design").
const ACTION_VERBS: &[&str] = &[
    "design", "build", "lead", "drive", "support", "test", "architect", "mentor", "work",
    "use", "help", "review", "plan", "research", "partner", "document", "report", "train",
    "monitor", "scale", "launch", "operate", "present", "leverage", "change", "program",
];

const COMMON_ADJECTIVES: &[&str] = &[
    "strong", "excellent", "good", "great", "new", "senior", "junior", "relevant", "key",
    "best", "high", "large", "small", "multiple", "various", "other", "proven", "solid",
    "deep", "fast", "ideal", "plus", "nice", "able", "familiar", "hands",
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "well", "just", "only", "too", "even", "more", "most", "less",
    "least", "often", "always", "never", "currently", "preferably", "ideally", "etc",
];

/// Words whose suffix would otherwise mark them as verbs, adverbs or adjectives.
const NOUN_OVERRIDES: &[&str] = &[
    "engineering", "marketing", "accounting", "learning", "training", "testing",
    "programming", "computing", "networking", "banking", "nursing", "consulting",
    "manufacturing", "modeling", "modelling", "scheduling", "billing", "staffing", "hosting",
    "logging", "monitoring", "debugging", "budgeting", "forecasting", "underwriting",
    "auditing", "recruiting", "onboarding", "executive", "objective", "initiative",
    "representative", "detective", "narrative", "incentive", "analytics", "feed", "speed",
    "seed", "family", "supply", "assembly", "july", "italy",
];

/// Acronyms spelled like function words. Read as acronyms outside all-caps lines.
const FUNCTION_WORD_ACRONYMS: &[&str] = &["IT", "US"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical"];

/// Where a token sits in its line.
#[derive(Debug, Clone, Copy)]
struct Position {
    sentence_start: bool,
    /// After a subject pronoun, an auxiliary, "to", or a verb coordination.
    verb_slot: bool,
    /// The whole line is upper-case, so capitalisation says nothing about names.
    all_caps_line: bool,
}

/// Rule-based tagger over a closed-class lexicon plus capitalisation and suffix rules.
///
/// Rules, in order:
/// 1. no alphanumeric character → punctuation
/// 2. all digits → numeral (four-digit years 1900–2099 carry a date entity)
/// 3. closed-class lexicon hit (looked up lower-cased) → that tag
/// 4. action verb in a verb slot → verb
/// 5. in an all-caps line → open-class rules on the lower-cased word, no entity
/// 6. acronym (two or more chars, all upper-case letters or digits) → proper noun + organization
/// 7. capitalised and not sentence-initial → proper noun + name
/// 8. noun overrides, then suffix rules (-ly adverb, -ing/-ed verb, adjective suffixes)
/// 9. otherwise → noun
///
/// Each line starts a new sentence, as does any token after `.`, `!`, `?` or `:`.
/// A sentence start is also a verb slot, so imperative bullets read as verbs.
pub struct LexiconTagger {
    closed_class: HashMap<&'static str, PartOfSpeech>,
    action_verbs: HashSet<&'static str>,
    noun_overrides: HashSet<&'static str>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        let groups: [(&[&'static str], PartOfSpeech); 9] = [
            (DETERMINERS, PartOfSpeech::Determiner),
            (PRONOUNS, PartOfSpeech::Pronoun),
            (ADPOSITIONS, PartOfSpeech::Adposition),
            (CONJUNCTIONS, PartOfSpeech::Conjunction),
            (AUXILIARIES, PartOfSpeech::Auxiliary),
            (NUMBER_WORDS, PartOfSpeech::Numeral),
            (COMMON_VERBS, PartOfSpeech::Verb),
            (COMMON_ADJECTIVES, PartOfSpeech::Adjective),
            (ADVERBS, PartOfSpeech::Adverb),
        ];

        let mut closed_class = HashMap::new();
        for (words, pos) in groups {
            for word in words {
                closed_class.entry(*word).or_insert(pos);
            }
        }

        Self {
            closed_class,
            action_verbs: ACTION_VERBS.iter().copied().collect(),
            noun_overrides: NOUN_OVERRIDES.iter().copied().collect(),
        }
    }

    fn tag_word(&self, word: &str, at: Position) -> TaggedToken {
        if !word.chars().any(char::is_alphanumeric) {
            return TaggedToken::new(word, PartOfSpeech::Punctuation, None);
        }

        if word.chars().all(|c| c.is_ascii_digit()) {
            let entity = is_year(word).then_some(EntityKind::Date);
            return TaggedToken::new(word, PartOfSpeech::Numeral, entity);
        }

        let acronym = !at.all_caps_line && is_acronym(word);
        if acronym && FUNCTION_WORD_ACRONYMS.contains(&word) {
            return TaggedToken::new(
                word,
                PartOfSpeech::ProperNoun,
                Some(EntityKind::Organization),
            );
        }

        let lower = word.to_lowercase();

        if let Some(pos) = self.closed_class.get(lower.as_str()) {
            return TaggedToken::new(word, *pos, None);
        }

        if at.verb_slot && self.action_verbs.contains(lower.as_str()) {
            return TaggedToken::new(word, PartOfSpeech::Verb, None);
        }

        if acronym {
            return TaggedToken::new(
                word,
                PartOfSpeech::ProperNoun,
                Some(EntityKind::Organization),
            );
        }

        if !at.all_caps_line
            && !at.sentence_start
            && word.chars().next().is_some_and(char::is_uppercase)
        {
            return TaggedToken::new(word, PartOfSpeech::ProperNoun, Some(EntityKind::Name));
        }

        TaggedToken::new(word, self.open_class(&lower), None)
    }

    fn open_class(&self, lower: &str) -> PartOfSpeech {
        if self.noun_overrides.contains(lower) || self.action_verbs.contains(lower) {
            return PartOfSpeech::Noun;
        }
        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ly") {
            PartOfSpeech::Adverb
        } else if (len > 5 && lower.ends_with("ing")) || (len > 3 && lower.ends_with("ed")) {
            PartOfSpeech::Verb
        } else if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            PartOfSpeech::Adjective
        } else {
            PartOfSpeech::Noun
        }
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tokens = Vec::new();

        for line in text.lines() {
            let all_caps_line = line.chars().any(char::is_alphabetic)
                && !line.chars().any(char::is_lowercase);
            let mut sentence_start = true;
            let mut verb_slot = false;
            let mut after_verb = false;

            for m in TOKEN_RE.find_iter(line) {
                let at = Position {
                    sentence_start,
                    verb_slot: sentence_start || verb_slot,
                    all_caps_line,
                };
                let token = self.tag_word(m.as_str(), at);

                match token.pos {
                    PartOfSpeech::Punctuation => {
                        sentence_start =
                            sentence_start || token.text.contains(['.', '!', '?', ':']);
                        // "design, build and deploy"
                        verb_slot = after_verb && token.text.contains(',');
                    }
                    PartOfSpeech::Adverb => {
                        // "will also design", "Quickly deploy"
                        verb_slot = verb_slot || sentence_start;
                        sentence_start = false;
                    }
                    pos => {
                        sentence_start = false;
                        verb_slot = match pos {
                            PartOfSpeech::Auxiliary | PartOfSpeech::Pronoun => true,
                            PartOfSpeech::Adposition => token.text.eq_ignore_ascii_case("to"),
                            PartOfSpeech::Conjunction => after_verb,
                            _ => false,
                        };
                        if pos != PartOfSpeech::Conjunction {
                            after_verb = pos == PartOfSpeech::Verb;
                        }
                    }
                }
                tokens.push(token);
            }
        }

        tokens
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().next().is_some_and(|c| c.is_uppercase())
        && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn is_year(word: &str) -> bool {
    word.len() == 4 && word.parse::<u16>().is_ok_and(|y| (1900..=2099).contains(&y))
}
