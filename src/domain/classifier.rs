//! Keyword fallback classifier
//!
//! Used whenever no advice provider answer is available. Rules are evaluated
//! in table order and the first rule with a keyword contained in the
//! lower-cased question wins. A keyword only counts where a word starts, so
//! "rash" matches "rashes" but not "crash".

use super::Department;

/// A keyword set mapped to a canned advisory
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub advice: &'static str,
    pub department: Department,
}

impl KeywordRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| contains_at_word_start(lowered, k))
    }

    /// Advisory text ending with the department line
    pub fn response(&self) -> String {
        format!("{}\n{}", self.advice, self.department.label_line())
    }
}

fn contains_at_word_start(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(i, _)| {
        text[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Precedence is the slice order.
pub const RULES: &[KeywordRule] = &[
    KeywordRule {
        name: "dizziness",
        keywords: &["dizzy", "dizziness", "vertigo", "lightheaded", "light-headed", "spinning"],
        advice: "Dizziness or vertigo can come from inner-ear or neurological causes. \
                 Sit or lie down when it starts, drink some water and avoid driving until it settles. \
                 A neurologist can help find the cause if it keeps coming back.",
        department: Department::Neurology,
    },
    KeywordRule {
        name: "headache",
        keywords: &["headache", "head ache", "migraine", "head pain", "head hurts"],
        advice: "Headaches are often linked to stress, dehydration or lack of sleep, \
                 but severe or persistent ones deserve a proper check. \
                 Rest in a quiet, dark room and see a neurologist if the pain is intense or keeps returning.",
        department: Department::Neurology,
    },
    KeywordRule {
        name: "cardiac",
        keywords: &[
            "chest",
            "heart pain",
            "heartbeat",
            "heart beat",
            "palpitation",
            "breathless",
            "shortness of breath",
            "cardiac",
        ],
        advice: "Chest discomfort or breathlessness should never be ignored. \
                 If the pain is severe, spreading to the arm or jaw, or comes with sweating, call emergency services right away. \
                 Otherwise, book a cardiology consultation as soon as possible.",
        department: Department::Cardiology,
    },
    KeywordRule {
        name: "gastrointestinal",
        keywords: &[
            "stomach",
            "abdominal",
            "abdomen",
            "nausea",
            "vomit",
            "diarrhea",
            "diarrhoea",
            "constipation",
            "indigestion",
            "heartburn",
            "acid reflux",
            "bloating",
        ],
        advice: "Stomach and digestive troubles are often related to diet or infection. \
                 Stay hydrated, eat light meals and avoid spicy or fatty food for a while. \
                 A gastroenterologist can help if the symptoms last more than a few days.",
        department: Department::Gastroenterology,
    },
    KeywordRule {
        name: "dermatologic",
        keywords: &["rash", "acne", "itch", "skin", "eczema", "hives", "pimple", "blister"],
        advice: "Skin problems like rashes, itching or acne are best looked at by a specialist. \
                 Keep the area clean, avoid scratching and skip new cosmetics until you are seen. \
                 A dermatologist can recommend the right treatment.",
        department: Department::Dermatology,
    },
    KeywordRule {
        name: "orthopedic",
        keywords: &[
            "joint",
            "knee",
            "back pain",
            "bone",
            "fracture",
            "sprain",
            "shoulder",
            "ankle",
            "muscle",
        ],
        advice: "Joint, bone or muscle pain often improves with rest, ice and gentle movement. \
                 Avoid heavy lifting until it eases. \
                 An orthopedic specialist can check for injuries if the pain persists or limits movement.",
        department: Department::Orthopedics,
    },
    KeywordRule {
        name: "ophthalmologic",
        keywords: &["eye", "vision", "blurry", "blurred", "sight"],
        advice: "Changes in vision or eye discomfort should be checked early. \
                 Rest your eyes, limit screen time and avoid rubbing them. \
                 An ophthalmologist can examine your eyes and find the cause.",
        department: Department::Ophthalmology,
    },
];

/// Used when no rule matches
pub static DEFAULT_RULE: KeywordRule = KeywordRule {
    name: "default",
    keywords: &[],
    advice: "Thanks for describing how you feel. \
             A general physician can assess your symptoms and guide you to the right specialist if needed.",
    department: Department::GeneralMedicine,
};

/// Deterministic, total mapping from free text to a canned advisory
#[derive(Debug, Clone, Copy)]
pub struct KeywordClassifier {
    rules: &'static [KeywordRule],
    default: &'static KeywordRule,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            rules: RULES,
            default: &DEFAULT_RULE,
        }
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the rule that applies to the question
    pub fn rule_for(&self, question: &str) -> &'static KeywordRule {
        let lowered = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .unwrap_or(self.default)
    }

    pub fn classify(&self, question: &str) -> String {
        self.rule_for(question).response()
    }
}
