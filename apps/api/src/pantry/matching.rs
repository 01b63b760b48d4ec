//! Ingredient matching: the single predicate deciding whether a pantry item
//! satisfies a named ingredient.
//!
//! Matching is bidirectional substring containment, case-insensitive: "basmati rice"
//! satisfies "rice" and "rice" satisfies "basmati rice". The looseness is intentional;
//! it absorbs plurals ("onions" vs "onion") and qualifiers. Every caller goes through
//! `names_overlap`, so a stricter matcher only needs to change that one function.

use super::PantryItem;

/// Quantity and unit of the first pantry item matching an ingredient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<'a> {
    pub quantity: f64,
    pub unit: &'a str,
}

/// True if either name contains the other (case-insensitive). A blank name matches nothing.
pub fn names_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// True if any pantry item matches `name`.
pub fn has_ingredient(items: &[PantryItem], name: &str) -> bool {
    items.iter().any(|item| names_overlap(&item.name, name))
}

/// Quantity of the first pantry item matching `name`, if any.
pub fn ingredient_quantity<'a>(items: &'a [PantryItem], name: &str) -> Option<Quantity<'a>> {
    items
        .iter()
        .find(|item| names_overlap(&item.name, name))
        .map(|item| Quantity {
            quantity: item.quantity,
            unit: &item.unit,
        })
}
