//! Dictionary-free English noun lemmatizer.
//!
//! Reduces plural nouns to their singular form in two steps:
//!
//! 1. **Exceptions**: irregular plurals (`children`, `mice`, `wolves`,
//!    `criteria`, ...) are looked up in a fixed table.
//! 2. **Detachment rules**: regular suffixes are rewritten, longest first
//!    (`-ches` → `-ch`, `-ies` → `-y`, `-s` → ``).
//!
//! Rules only fire on lowercase suffixes, so case-folding beforehand gives
//! the best coverage. Words of three characters or fewer and words ending in
//! `-ss`, `-us`, `-is` or `-ous` are left alone, which keeps `gas`, `class`,
//! `status`, `analysis` and `famous` intact.
//!
//! Every word is treated as a noun. Verb forms without a noun suffix pass
//! through unchanged (`running`, `went`).

use std::borrow::Cow;

use rustc_hash::FxHashMap;

#[rustfmt::skip]
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"), ("men", "man"), ("women", "woman"), ("people", "person"),
    ("mice", "mouse"), ("lice", "louse"), ("geese", "goose"), ("feet", "foot"),
    ("teeth", "tooth"), ("oxen", "ox"), ("dice", "die"),
    ("knives", "knife"), ("wives", "wife"), ("lives", "life"), ("wolves", "wolf"),
    ("leaves", "leaf"), ("halves", "half"), ("selves", "self"), ("shelves", "shelf"),
    ("thieves", "thief"), ("loaves", "loaf"), ("calves", "calf"), ("elves", "elf"),
    ("scarves", "scarf"), ("sheaves", "sheaf"),
    ("data", "datum"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
    ("analyses", "analysis"), ("crises", "crisis"), ("theses", "thesis"),
    ("hypotheses", "hypothesis"), ("diagnoses", "diagnosis"), ("axes", "axis"),
    ("indices", "index"), ("matrices", "matrix"), ("vertices", "vertex"),
    ("appendices", "appendix"), ("cacti", "cactus"), ("fungi", "fungus"),
    ("nuclei", "nucleus"), ("radii", "radius"), ("alumni", "alumnus"), ("stimuli", "stimulus"),
    ("potatoes", "potato"), ("tomatoes", "tomato"), ("heroes", "hero"), ("echoes", "echo"),
    ("vetoes", "veto"), ("torpedoes", "torpedo"),
];

/// Suffix rewrites, tried in order. The first matching suffix wins.
#[rustfmt::skip]
const DETACHMENT: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("ies", "y"),
    ("s", ""),
];

const MIN_LEN: usize = 4;

/// Rule-based English lemmatizer.
#[derive(Debug, Clone)]
pub struct EnglishLemmatizer {
    irregular: FxHashMap<&'static str, &'static str>,
}

impl Default for EnglishLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishLemmatizer {
    /// Creates a lemmatizer with the built-in exception table.
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
        }
    }

    /// Returns the lemma of `word`, borrowing it when unchanged.
    pub fn lemma<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if let Some(&lemma) = self.irregular.get(word) {
            return Cow::Borrowed(lemma);
        }

        if word.chars().count() < MIN_LEN || is_protected(word) {
            return Cow::Borrowed(word);
        }

        for &(suffix, replacement) in DETACHMENT {
            if let Some(stem) = word.strip_suffix(suffix) {
                if replacement.is_empty() {
                    return Cow::Borrowed(stem);
                }
                let mut out = String::with_capacity(stem.len() + replacement.len());
                out.push_str(stem);
                out.push_str(replacement);
                return Cow::Owned(out);
            }
        }

        Cow::Borrowed(word)
    }
}

#[inline]
fn is_protected(word: &str) -> bool {
    ["ss", "us", "is", "ous"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        EnglishLemmatizer::new().lemma(word).into_owned()
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(lemma("cats"), "cat");
        assert_eq!(lemma("tests"), "test");
        assert_eq!(lemma("houses"), "house");
    }

    #[test]
    fn sibilant_plurals() {
        assert_eq!(lemma("churches"), "church");
        assert_eq!(lemma("dishes"), "dish");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("classes"), "class");
        assert_eq!(lemma("buzzes"), "buzz");
    }

    #[test]
    fn ies_becomes_y() {
        assert_eq!(lemma("studies"), "study");
        assert_eq!(lemma("cities"), "city");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("mice"), "mouse");
        assert_eq!(lemma("wolves"), "wolf");
        assert_eq!(lemma("criteria"), "criterion");
        assert_eq!(lemma("potatoes"), "potato");
    }

    #[test]
    fn short_words_untouched() {
        assert_eq!(lemma("gas"), "gas");
        assert_eq!(lemma("was"), "was");
        assert_eq!(lemma("is"), "is");
    }

    #[test]
    fn protected_endings_untouched() {
        assert_eq!(lemma("class"), "class");
        assert_eq!(lemma("status"), "status");
        assert_eq!(lemma("analysis"), "analysis");
        assert_eq!(lemma("famous"), "famous");
    }

    #[test]
    fn singular_passthrough_is_borrowed() {
        let l = EnglishLemmatizer::new();
        assert!(matches!(l.lemma("table"), Cow::Borrowed("table")));
    }

    #[test]
    fn uppercase_suffix_not_rewritten() {
        assert_eq!(lemma("CATS"), "CATS");
    }

    #[test]
    fn verb_forms_are_not_lemmatized() {
        assert_eq!(lemma("running"), "running");
        assert_eq!(lemma("went"), "went");
        assert_eq!(lemma("walked"), "walked");
    }

    #[test]
    fn non_latin_passthrough() {
        assert_eq!(lemma("кошки"), "кошки");
        assert_eq!(lemma("猫"), "猫");
    }
}
