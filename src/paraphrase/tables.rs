//! Static vocabularies for each paraphrase style
//!
//! Every style owns an ordered substitution table (trigger phrase to
//! candidate replacements) and a list of sentence starters. Tables are
//! applied in declaration order, so a replacement produced by an earlier
//! trigger can be picked up by a later one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Writing style selecting which vocabulary the paraphraser applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Academic,
    Casual,
    Professional,
    Creative,
}

pub type SubstitutionTable = &'static [(&'static str, &'static [&'static str])];

const ACADEMIC_PHRASES: SubstitutionTable = &[
    ("I think", &["it can be argued that", "research suggests", "evidence indicates"]),
    ("I believe", &["evidence suggests", "studies demonstrate", "findings indicate"]),
    ("shows", &["demonstrates", "illustrates", "elucidates"]),
    ("but", &["however", "nevertheless", "conversely"]),
    ("uses", &["utilizes", "employs", "implements"]),
    ("many", &["numerous", "multiple", "various"]),
    ("big", &["substantial", "significant", "considerable"]),
    ("important", &["significant", "crucial", "essential"]),
    ("looks at", &["examines", "investigates", "analyzes"]),
    ("talks about", &["discusses", "addresses", "explores"]),
    ("good", &["favorable", "advantageous", "beneficial"]),
    ("bad", &["unfavorable", "detrimental", "adverse"]),
    ("problem", &["challenge", "obstacle", "impediment"]),
    ("idea", &["concept", "proposition", "hypothesis"]),
    ("change", &["transformation", "modification", "alteration"]),
];

const CASUAL_PHRASES: SubstitutionTable = &[
    ("therefore", &["so", "that's why", "because of that"]),
    ("however", &["but", "though", "still"]),
    ("additionally", &["also", "plus", "on top of that"]),
    ("demonstrate", &["show", "prove", "point out"]),
    ("obtain", &["get", "grab", "pick up"]),
    ("purchase", &["buy", "get", "pick up"]),
    ("require", &["need", "want", "gotta have"]),
    ("utilize", &["use", "work with", "try"]),
    ("commence", &["start", "begin", "kick off"]),
    ("terminate", &["end", "stop", "finish"]),
    ("approximately", &["about", "around", "roughly"]),
    ("sufficient", &["enough", "plenty", "lots"]),
    ("assist", &["help", "give a hand", "pitch in"]),
    ("attempt", &["try", "give it a shot", "take a crack at"]),
    ("communicate", &["talk", "chat", "get in touch"]),
];

const PROFESSIONAL_PHRASES: SubstitutionTable = &[
    ("get", &["obtain", "acquire", "procure"]),
    ("use", &["utilize", "employ", "implement"]),
    ("start", &["initiate", "commence", "begin"]),
    ("end", &["conclude", "finalize", "complete"]),
    ("but", &["however", "nevertheless", "nonetheless"]),
    ("show", &["demonstrate", "illustrate", "indicate"]),
    ("help", &["assist", "facilitate", "support"]),
    ("make", &["create", "develop", "establish"]),
    ("look", &["examine", "analyze", "assess"]),
    ("talk", &["discuss", "communicate", "confer"]),
    ("problem", &["challenge", "issue", "matter"]),
    ("good", &["satisfactory", "favorable", "positive"]),
    ("quick", &["expeditious", "prompt", "timely"]),
    ("team", &["group", "unit", "department"]),
    ("plan", &["strategy", "approach", "methodology"]),
];

const CREATIVE_PHRASES: SubstitutionTable = &[
    ("walk", &["stroll", "saunter", "meander"]),
    ("said", &["exclaimed", "declared", "proclaimed"]),
    ("happy", &["overjoyed", "elated", "ecstatic"]),
    ("sad", &["heartbroken", "melancholic", "despondent"]),
    ("angry", &["furious", "enraged", "livid"]),
    ("big", &["enormous", "colossal", "gigantic"]),
    ("small", &["tiny", "minuscule", "diminutive"]),
    ("good", &["magnificent", "splendid", "marvelous"]),
    ("bad", &["dreadful", "atrocious", "abysmal"]),
    ("look", &["gaze", "peer", "observe"]),
    ("beautiful", &["stunning", "breathtaking", "mesmerizing"]),
    ("scary", &["terrifying", "haunting", "chilling"]),
    ("run", &["dash", "sprint", "bolt"]),
    ("laugh", &["chuckle", "giggle", "chortle"]),
    ("think", &["ponder", "contemplate", "muse"]),
];

const ACADEMIC_STARTERS: &[&str] = &[
    "Furthermore,",
    "Moreover,",
    "In addition,",
    "Consequently,",
    "Therefore,",
    "Thus,",
    "Subsequently,",
    "As a result,",
];

const CASUAL_STARTERS: &[&str] = &[
    "Plus,",
    "Also,",
    "So,",
    "Anyway,",
    "Well,",
    "You know,",
    "Like,",
    "By the way,",
];

const PROFESSIONAL_STARTERS: &[&str] = &[
    "Additionally,",
    "Furthermore,",
    "Moreover,",
    "Subsequently,",
    "In light of this,",
    "With respect to,",
    "Considering this,",
    "As noted,",
];

const CREATIVE_STARTERS: &[&str] = &[
    "Suddenly,",
    "Mysteriously,",
    "Without warning,",
    "In a flash,",
    "Like magic,",
    "To everyone's surprise,",
    "As fate would have it,",
    "In that moment,",
];

/// A trigger phrase compiled into a whole-word, case-insensitive matcher
pub struct CompiledTrigger {
    pub phrase: &'static str,
    pub pattern: Regex,
    pub candidates: &'static [&'static str],
}

fn compile(table: SubstitutionTable) -> Vec<CompiledTrigger> {
    table
        .iter()
        .filter_map(|&(phrase, candidates)| {
            let source = format!(r"(?i)\b{}\b", regex::escape(phrase));
            match Regex::new(&source) {
                Ok(pattern) => Some(CompiledTrigger { phrase, pattern, candidates }),
                Err(err) => {
                    tracing::warn!("Skipping trigger {:?}: {}", phrase, err);
                    None
                }
            }
        })
        .collect()
}

static ACADEMIC_TRIGGERS: Lazy<Vec<CompiledTrigger>> = Lazy::new(|| compile(ACADEMIC_PHRASES));
static CASUAL_TRIGGERS: Lazy<Vec<CompiledTrigger>> = Lazy::new(|| compile(CASUAL_PHRASES));
static PROFESSIONAL_TRIGGERS: Lazy<Vec<CompiledTrigger>> =
    Lazy::new(|| compile(PROFESSIONAL_PHRASES));
static CREATIVE_TRIGGERS: Lazy<Vec<CompiledTrigger>> = Lazy::new(|| compile(CREATIVE_PHRASES));

impl Style {
    pub fn all() -> &'static [Style] {
        &[Self::Academic, Self::Casual, Self::Professional, Self::Creative]
    }

    /// Parse a style tag, ignoring case. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(tag.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Casual => "casual",
            Self::Professional => "professional",
            Self::Creative => "creative",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Academic => "Formal academic style",
            Self::Casual => "Casual and conversational",
            Self::Professional => "Professional and polished",
            Self::Creative => "Vivid, narrative wording",
        }
    }

    /// Raw substitution table in application order
    pub fn substitutions(&self) -> SubstitutionTable {
        match self {
            Self::Academic => ACADEMIC_PHRASES,
            Self::Casual => CASUAL_PHRASES,
            Self::Professional => PROFESSIONAL_PHRASES,
            Self::Creative => CREATIVE_PHRASES,
        }
    }

    pub fn starters(&self) -> &'static [&'static str] {
        match self {
            Self::Academic => ACADEMIC_STARTERS,
            Self::Casual => CASUAL_STARTERS,
            Self::Professional => PROFESSIONAL_STARTERS,
            Self::Creative => CREATIVE_STARTERS,
        }
    }

    pub(crate) fn triggers(&self) -> &'static [CompiledTrigger] {
        match self {
            Self::Academic => &ACADEMIC_TRIGGERS,
            Self::Casual => &CASUAL_TRIGGERS,
            Self::Professional => &PROFESSIONAL_TRIGGERS,
            Self::Creative => &CREATIVE_TRIGGERS,
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown style: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_well_formed() {
        for style in Style::all() {
            assert!(!style.starters().is_empty());
            for (phrase, candidates) in style.substitutions() {
                assert!(!phrase.trim().is_empty(), "{} has an empty trigger", style);
                assert!(!candidates.is_empty(), "{} trigger {:?} has no candidates", style, phrase);
            }
            assert_eq!(style.triggers().len(), style.substitutions().len());
        }
    }

    #[test]
    fn test_style_parse() {
        assert_eq!(Style::parse("academic"), Some(Style::Academic));
        assert_eq!(Style::parse("CASUAL"), Some(Style::Casual));
        assert_eq!(Style::parse(" creative "), Some(Style::Creative));
        assert_eq!(Style::parse("ultra"), None);
        assert_eq!(Style::parse(""), None);
        assert!("professional".parse::<Style>().is_ok());
        assert!("shorten".parse::<Style>().is_err());
    }

    #[test]
    fn test_triggers_match_whole_words_only() {
        let but = Style::Academic
            .triggers()
            .iter()
            .find(|t| t.phrase == "but")
            .expect("academic table has 'but'");

        assert!(but.pattern.is_match("I agree, But not fully"));
        assert!(!but.pattern.is_match("a butter knife"));
        assert!(!but.pattern.is_match("attribute"));
    }

    #[test]
    fn test_multi_word_trigger() {
        let think = Style::Academic
            .triggers()
            .iter()
            .find(|t| t.phrase == "I think")
            .expect("academic table has 'I think'");

        assert!(think.pattern.is_match("well, i think so"));
        assert!(!think.pattern.is_match("I thinking"));
    }
}
