//! Per-language gloss rules.
//!
//! Wiktionary glosses can either define a word or point at another word's
//! inflected form ("past tense of run"). Telling the two apart, and pulling
//! the lemma back out of the latter, is language-of-glosses specific: each
//! supported target language gets a [Deinflector] strategy, looked up through
//! [for_target]. Unknown languages classify everything as a definition.
use lazy_static::lazy_static;
use regex::Regex;

/// What a gloss turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A genuine definition, to be kept in the lemma dictionary.
    Definition,
    /// A pointer to another word's inflected form.
    InflectionReference,
}

/// A recovered (lemma, grammatical labels) pair for one surface form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deinflection {
    pub lemma: String,
    pub labels: Vec<String>,
}

/// Language-specific classification and extraction rules.
///
/// `classify` gates whether a sense flows into the lemma dictionary or the
/// deinflection table; `extract` recovers the lemma and label from glosses
/// that classified as inflection references.
pub trait Deinflector: Sync {
    fn classify(&self, glosses: &[String]) -> Classification;

    fn extract(&self, surface: &str, glosses: &[String]) -> Option<Deinflection>;

    /// Normalization applied to the surface form before it is recorded.
    fn normalize_surface(&self, form: &str) -> String {
        form.to_string()
    }
}

/// Rules for the given gloss language, if supported.
pub fn for_target(iso: &str) -> Option<&'static dyn Deinflector> {
    match iso {
        "en" => Some(&English),
        "fr" => Some(&French),
        "de" => Some(&German),
        _ => None,
    }
}

const INFLECTION_OF: &str = "inflection of";

lazy_static! {
    /// "past tense of run", "plural of cat", "third-person singular form of be"...
    /// The descriptor has to end in a closed set of grammatical words so that
    /// ordinary genitive glosses ("a kind of dog") stay definitions.
    static ref DESCRIPTOR_OF: Regex = Regex::new(
        r"^((?:[A-Za-z-]+ ){0,6}(?:tense|participle|plural|singular|form|gerund|comparative|superlative)) of (\S+)$"
    ).unwrap();
    static ref PAREN_ASIDE: Regex = Regex::new(r" \(.+?\)").unwrap();
    static ref DU_VERBE: Regex = Regex::new(r"^(.*)du verbe\s+(.*)$").unwrap();
    static ref DU_WORD: Regex = Regex::new(r"\bdu\b").unwrap();
    static ref PLURIEL_DE: Regex = Regex::new(
        r"^((?:(?:Masculin|Féminin)\s)?(?:[pP]luriel|[sS]ingulier)) de ([^\s]*)$"
    ).unwrap();
    static ref PLURIEL_DE_LOOSE: Regex = Regex::new(
        r"((?:(?:Masculin|Féminin)\s)?(?:[pP]luriel|[sS]ingulier)) de ([^\s]+)"
    ).unwrap();
    static ref FR_PRONOUN_PREFIX: Regex =
        Regex::new(r"(qu')?(ils/elles|il/elle/on)\s*").unwrap();
    static ref DES_VERBS: Regex = Regex::new(
        r"des (?:Verbs|Adjektivs|Substantivs|Demonstrativpronomens|Possessivpronomens|Pronomens)"
    ).unwrap();
    static ref DES_VERBS_FULL: Regex = Regex::new(
        r"^(.*)des (?:Verbs|Adjektivs|Substantivs|Demonstrativpronomens|Possessivpronomens|Pronomens) (.*)$"
    ).unwrap();
}

/// English glosses: "inflection of <lemma>: ..." or "<descriptor> of <lemma>".
pub struct English;

impl Deinflector for English {
    fn classify(&self, glosses: &[String]) -> Classification {
        let inflection = glosses.iter().any(|gloss| {
            gloss.contains(INFLECTION_OF) || DESCRIPTOR_OF.is_match(gloss.trim())
        });
        if inflection {
            Classification::InflectionReference
        } else {
            Classification::Definition
        }
    }

    fn extract(&self, surface: &str, glosses: &[String]) -> Option<Deinflection> {
        let first = glosses.first()?;

        if let Some(idx) = first.find(INFLECTION_OF) {
            // lemma is everything after the phrase, asides stripped, cut at
            // the first colon
            let tail = &first[idx + INFLECTION_OF.len()..];
            let tail = PAREN_ASIDE.replace_all(tail, "");
            let lemma = tail.split(':').next().unwrap_or("").trim().to_string();

            let label = glosses.get(1)?.trim().to_string();
            if label.is_empty() || label.contains(INFLECTION_OF) {
                return None;
            }
            if lemma.is_empty() || surface == lemma {
                return None;
            }
            return Some(Deinflection {
                lemma,
                labels: vec![label],
            });
        }

        let caps = DESCRIPTOR_OF.captures(first.trim())?;
        let label = caps.get(1)?.as_str().trim().to_string();
        let lemma = caps
            .get(2)?
            .as_str()
            .trim_end_matches([':', '.'])
            .to_string();
        if label.is_empty() || lemma.is_empty() || surface == lemma {
            return None;
        }
        Some(Deinflection {
            lemma,
            labels: vec![label],
        })
    }
}

/// French glosses: "... du verbe <lemma>" or "(Masculin|Féminin)? (Pluriel|Singulier) de <lemma>".
pub struct French;

impl French {
    /// The lemma tail of a "du verbe" match must not itself contain the word
    /// "du", otherwise the gloss was cut in the wrong place.
    fn match_du_verbe(gloss: &str) -> Option<(String, String)> {
        let caps = DU_VERBE.captures(gloss)?;
        let label = caps.get(1)?.as_str();
        let lemma = caps.get(2)?.as_str();
        if DU_WORD.is_match(lemma) {
            return None;
        }
        Some((label.to_string(), lemma.to_string()))
    }
}

impl Deinflector for French {
    fn classify(&self, glosses: &[String]) -> Classification {
        let inflection = glosses.iter().any(|gloss| {
            Self::match_du_verbe(gloss).is_some() || PLURIEL_DE_LOOSE.is_match(gloss)
        });
        if inflection {
            Classification::InflectionReference
        } else {
            Classification::Definition
        }
    }

    fn extract(&self, surface: &str, glosses: &[String]) -> Option<Deinflection> {
        let first = glosses.first()?;

        let (label, lemma) = Self::match_du_verbe(first).or_else(|| {
            let caps = PLURIEL_DE.captures(first.trim())?;
            Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
        })?;

        let label = label.trim().to_string();
        let lemma = lemma.trim_end_matches('.').trim().to_string();
        if label.is_empty() || lemma.is_empty() || surface == lemma {
            return None;
        }
        Some(Deinflection {
            lemma,
            labels: vec![label],
        })
    }

    /// Conjugation tables gloss forms together with their subject pronoun
    /// ("qu'ils/elles chantent"); only the verb form itself is a lookup key.
    fn normalize_surface(&self, form: &str) -> String {
        FR_PRONOUN_PREFIX.replace(form, "").to_string()
    }
}

/// German glosses: "... des (Verbs|Adjektivs|Substantivs|...) <lemma>".
pub struct German;

impl Deinflector for German {
    fn classify(&self, glosses: &[String]) -> Classification {
        if glosses.iter().any(|gloss| DES_VERBS.is_match(gloss)) {
            Classification::InflectionReference
        } else {
            Classification::Definition
        }
    }

    fn extract(&self, surface: &str, glosses: &[String]) -> Option<Deinflection> {
        let first = glosses.first()?;
        let caps = DES_VERBS_FULL.captures(first)?;
        let label = caps.get(1)?.as_str().trim().to_string();
        let lemma = caps.get(2)?.as_str().trim().to_string();
        if label.is_empty() || lemma.is_empty() || surface == lemma {
            return None;
        }
        Some(Deinflection {
            lemma,
            labels: vec![label],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glosses(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn english_descriptor_classifies() {
        let rules = for_target("en").unwrap();
        assert_eq!(
            rules.classify(&glosses(&["past tense of run"])),
            Classification::InflectionReference
        );
        assert_eq!(
            rules.classify(&glosses(&["plural of cat"])),
            Classification::InflectionReference
        );
        assert_eq!(
            rules.classify(&glosses(&["a kind of dog"])),
            Classification::Definition
        );
        assert_eq!(
            rules.classify(&glosses(&["a red fruit"])),
            Classification::Definition
        );
    }

    #[test]
    fn english_inflection_of_classifies() {
        let rules = for_target("en").unwrap();
        assert_eq!(
            rules.classify(&glosses(&["inflection of laufen:", "first-person singular present"])),
            Classification::InflectionReference
        );
    }

    #[test]
    fn english_extract_descriptor() {
        let rules = for_target("en").unwrap();
        let d = rules.extract("ran", &glosses(&["past tense of run"])).unwrap();
        assert_eq!(d.lemma, "run");
        assert_eq!(d.labels, vec!["past tense".to_string()]);
    }

    #[test]
    fn english_extract_inflection_of() {
        let rules = for_target("en").unwrap();
        let d = rules
            .extract(
                "lief",
                &glosses(&["inflection of laufen (strong verb):", "first-person singular preterite"]),
            )
            .unwrap();
        assert_eq!(d.lemma, "laufen");
        assert_eq!(d.labels, vec!["first-person singular preterite".to_string()]);
    }

    #[test]
    fn english_extract_requires_label() {
        let rules = for_target("en").unwrap();
        // no second gloss element: no usable description
        assert!(rules.extract("lief", &glosses(&["inflection of laufen:"])).is_none());
        // description still contains the phrase: malformed source entry
        assert!(rules
            .extract(
                "lief",
                &glosses(&["inflection of laufen:", "see inflection of laufen"])
            )
            .is_none());
    }

    #[test]
    fn english_extract_drops_self_reference() {
        let rules = for_target("en").unwrap();
        assert!(rules.extract("run", &glosses(&["inflection of run:", "imperative"])).is_none());
    }

    #[test]
    fn french_du_verbe() {
        let rules = for_target("fr").unwrap();
        let g = glosses(&["Première personne du singulier du présent de l’indicatif du verbe chanter"]);
        assert_eq!(rules.classify(&g), Classification::InflectionReference);
        let d = rules.extract("chante", &g).unwrap();
        assert_eq!(d.lemma, "chanter");
        assert_eq!(
            d.labels,
            vec!["Première personne du singulier du présent de l’indicatif".to_string()]
        );
    }

    #[test]
    fn french_pluriel_de() {
        let rules = for_target("fr").unwrap();
        let g = glosses(&["Pluriel de chat."]);
        assert_eq!(rules.classify(&g), Classification::InflectionReference);
        let d = rules.extract("chats", &g).unwrap();
        assert_eq!(d.lemma, "chat");
        assert_eq!(d.labels, vec!["Pluriel".to_string()]);
    }

    #[test]
    fn french_pronoun_prefix_stripped() {
        let rules = for_target("fr").unwrap();
        assert_eq!(rules.normalize_surface("qu'ils/elles chantent"), "chantent");
        assert_eq!(rules.normalize_surface("il/elle/on chante"), "chante");
        assert_eq!(rules.normalize_surface("chantons"), "chantons");
    }

    #[test]
    fn german_des_verbs() {
        let rules = for_target("de").unwrap();
        let g = glosses(&["2. Person Plural Indikativ Präsens Aktiv des Verbs laufen"]);
        assert_eq!(rules.classify(&g), Classification::InflectionReference);
        let d = rules.extract("lauft", &g).unwrap();
        assert_eq!(d.lemma, "laufen");
        assert_eq!(d.labels, vec!["2. Person Plural Indikativ Präsens Aktiv".to_string()]);
    }

    #[test]
    fn unknown_language_has_no_rules() {
        assert!(for_target("sq").is_none());
        assert!(for_target("").is_none());
    }
}
