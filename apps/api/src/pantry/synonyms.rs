//! Synonym table. Regional and colloquial ingredient names mapped to a canonical name.
//!
//! Lookups are exact on the lower-cased phrase. Anything not listed here passes through
//! the parser untouched with a guessed category.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::IngredientCategory::{self, *};

/// (phrase, canonical name, category)
const SYNONYMS: &[(&str, &str, IngredientCategory)] = &[
    // Grains & flours
    ("atta", "wheat flour", Grain),
    ("wheat flour", "wheat flour", Grain),
    ("rice", "rice", Grain),
    ("basmati rice", "basmati rice", Grain),
    ("jeera rice", "rice", Grain),
    ("besan", "gram flour", Grain),
    ("rava", "semolina", Grain),
    ("sooji", "semolina", Grain),
    // Vegetables
    ("aloo", "potato", Vegetable),
    ("potato", "potato", Vegetable),
    ("onion", "onion", Vegetable),
    ("pyaz", "onion", Vegetable),
    ("tomato", "tomato", Vegetable),
    ("tamatar", "tomato", Vegetable),
    ("palak", "spinach", Vegetable),
    ("spinach", "spinach", Vegetable),
    ("bhindi", "okra", Vegetable),
    ("okra", "okra", Vegetable),
    ("gobhi", "cauliflower", Vegetable),
    ("cauliflower", "cauliflower", Vegetable),
    ("green chili", "green chili", Vegetable),
    ("hari mirch", "green chili", Vegetable),
    ("ginger", "ginger", Vegetable),
    ("adrak", "ginger", Vegetable),
    ("garlic", "garlic", Vegetable),
    ("lehsun", "garlic", Vegetable),
    // Pulses & proteins
    ("moong dal", "moong dal", Protein),
    ("toor dal", "toor dal", Protein),
    ("arhar dal", "toor dal", Protein),
    ("chana dal", "chana dal", Protein),
    ("masoor dal", "masoor dal", Protein),
    ("urad dal", "urad dal", Protein),
    ("rajma", "kidney beans", Protein),
    ("chole", "chickpeas", Protein),
    ("paneer", "paneer", Protein),
    // Dairy
    ("curd", "curd", Dairy),
    ("dahi", "curd", Dairy),
    ("milk", "milk", Dairy),
    ("doodh", "milk", Dairy),
    ("ghee", "ghee", Dairy),
    // Oils
    ("oil", "cooking oil", Oil),
    ("mustard oil", "mustard oil", Oil),
    ("coconut oil", "coconut oil", Oil),
    // Spices
    ("turmeric", "turmeric", Spice),
    ("haldi", "turmeric", Spice),
    ("cumin", "cumin seeds", Spice),
    ("jeera", "cumin seeds", Spice),
    ("coriander", "coriander seeds", Spice),
    ("dhania", "coriander seeds", Spice),
    ("mustard seeds", "mustard seeds", Spice),
    ("rai", "mustard seeds", Spice),
    ("red chili powder", "red chili powder", Spice),
    ("garam masala", "garam masala", Spice),
    ("salt", "salt", Spice),
    ("namak", "salt", Spice),
];

/// Canonical names the "spices" shorthand expands into, in emission order.
pub const BASIC_SPICES: &[&str] = &[
    "turmeric",
    "cumin seeds",
    "coriander seeds",
    "red chili powder",
    "salt",
];

lazy_static! {
    static ref SYNONYM_INDEX: HashMap<&'static str, (&'static str, IngredientCategory)> =
        SYNONYMS
            .iter()
            .map(|&(phrase, canonical, category)| (phrase, (canonical, category)))
            .collect();
}

/// Exact lookup of a lower-cased phrase.
pub fn lookup(phrase: &str) -> Option<(&'static str, IngredientCategory)> {
    SYNONYM_INDEX.get(phrase).copied()
}

/// Best-effort category for a phrase the table does not know.
pub fn guess_category(phrase: &str) -> IngredientCategory {
    if phrase.contains("dal") || phrase.contains("bean") {
        Protein
    } else if phrase.contains("flour") || phrase.contains("rice") {
        Grain
    } else {
        Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_names_map_to_canonical() {
        assert_eq!(lookup("aloo"), Some(("potato", Vegetable)));
        assert_eq!(lookup("pyaz"), Some(("onion", Vegetable)));
        assert_eq!(lookup("haldi"), Some(("turmeric", Spice)));
        assert_eq!(lookup("atta"), Some(("wheat flour", Grain)));
        assert_eq!(lookup("oil"), Some(("cooking oil", Oil)));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("aloo bhujia"), None);
        assert_eq!(lookup(" aloo"), None);
    }

    #[test]
    fn test_guess_category() {
        assert_eq!(guess_category("black dal"), Protein);
        assert_eq!(guess_category("green beans"), Protein);
        assert_eq!(guess_category("rice flour"), Grain);
        assert_eq!(guess_category("brown rice"), Grain);
        assert_eq!(guess_category("jaggery"), Other);
    }

    #[test]
    fn test_basic_spices_are_all_in_table() {
        for spice in BASIC_SPICES {
            let (canonical, category) = SYNONYMS
                .iter()
                .find(|(_, c, _)| c == spice)
                .map(|&(_, c, cat)| (c, cat))
                .expect("basic spice missing from synonym table");
            assert_eq!(canonical, *spice);
            assert_eq!(category, Spice);
        }
    }
}
