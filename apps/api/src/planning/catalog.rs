//! Recipe Template Catalog and essentials table.
//!
//! Both tables are built once at startup and shared read-only through `Arc<Catalog>`.
//! Tests substitute their own catalogs through `Catalog::new`.

use thiserror::Error;

use crate::pantry::matching::has_ingredient;
use crate::pantry::PantryItem;
use crate::planning::models::{Rupees, MAX_SPICE, MIN_SPICE};

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeTemplate {
    pub name: &'static str,
    /// Canonical names; ALL must be in the pantry for the recipe to be eligible.
    pub required_ingredients: &'static [&'static str],
    pub time: &'static str,
    pub spice: u8,
    pub steps: &'static [&'static str],
}

impl RecipeTemplate {
    /// All-or-nothing eligibility against a normalized pantry.
    pub fn is_satisfied_by(&self, pantry: &[PantryItem]) -> bool {
        self.required_ingredients
            .iter()
            .all(|ingredient| has_ingredient(pantry, ingredient))
    }
}

/// A staple the shopping list suggests when the pantry lacks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Essential {
    pub name: &'static str,
    pub category: &'static str,
    pub cost: Rupees,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("recipe catalog is empty")]
    NoRecipes,

    #[error("essentials table is empty")]
    NoEssentials,

    #[error("recipe '{0}' has no required ingredients")]
    NoIngredients(&'static str),

    #[error("recipe '{0}' has no steps")]
    NoSteps(&'static str),

    #[error("recipe '{name}' has spice {spice}, expected 1-5")]
    Spice { name: &'static str, spice: u8 },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<RecipeTemplate>,
    essentials: Vec<Essential>,
}

impl Catalog {
    /// Validates and wraps a recipe table and an essentials table.
    pub fn new(
        recipes: Vec<RecipeTemplate>,
        essentials: Vec<Essential>,
    ) -> Result<Self, CatalogError> {
        if recipes.is_empty() {
            return Err(CatalogError::NoRecipes);
        }
        if essentials.is_empty() {
            return Err(CatalogError::NoEssentials);
        }
        for recipe in &recipes {
            if recipe.required_ingredients.is_empty() {
                return Err(CatalogError::NoIngredients(recipe.name));
            }
            if recipe.steps.is_empty() {
                return Err(CatalogError::NoSteps(recipe.name));
            }
            if !(MIN_SPICE..=MAX_SPICE).contains(&recipe.spice) {
                return Err(CatalogError::Spice {
                    name: recipe.name,
                    spice: recipe.spice,
                });
            }
        }
        Ok(Self {
            recipes,
            essentials,
        })
    }

    /// The built-in North Indian pantry catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(BUILTIN_RECIPES.to_vec(), BUILTIN_ESSENTIALS.to_vec())
    }

    /// Recipes in declaration order.
    pub fn recipes(&self) -> &[RecipeTemplate] {
        &self.recipes
    }

    pub fn essentials(&self) -> &[Essential] {
        &self.essentials
    }

    /// Recipes whose every required ingredient is in the pantry, in declaration order.
    pub fn eligible<'a>(
        &'a self,
        pantry: &'a [PantryItem],
    ) -> impl Iterator<Item = &'a RecipeTemplate> + 'a {
        self.recipes.iter().filter(move |r| r.is_satisfied_by(pantry))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in tables
// ────────────────────────────────────────────────────────────────────────────

const BUILTIN_RECIPES: &[RecipeTemplate] = &[
    RecipeTemplate {
        name: "Fresh Roti",
        required_ingredients: &["wheat flour", "salt"],
        time: "20 mins",
        spice: 1,
        steps: &[
            "Mix wheat flour with a pinch of salt",
            "Add water gradually to make soft dough",
            "Knead well and let rest for 15 minutes",
            "Roll into circles and cook on hot tawa",
            "Serve hot with any curry or dal",
        ],
    },
    RecipeTemplate {
        name: "Aloo Paratha",
        required_ingredients: &["wheat flour", "potato", "green chili", "salt"],
        time: "35 mins",
        spice: 2,
        steps: &[
            "Boil and mash potatoes with green chili and salt",
            "Make dough with wheat flour and water",
            "Roll dough, add potato filling, seal and roll again",
            "Cook on tawa with a little oil or ghee",
            "Serve hot with curd or pickle",
        ],
    },
    RecipeTemplate {
        name: "Simple Aloo Sabzi",
        required_ingredients: &["potato", "onion", "turmeric", "salt"],
        time: "25 mins",
        spice: 2,
        steps: &[
            "Cut potatoes into cubes and onions into slices",
            "Heat oil, add cumin seeds if available",
            "Add onions and cook until golden",
            "Add potatoes, turmeric, salt and mix well",
            "Cover and cook until potatoes are tender",
        ],
    },
    RecipeTemplate {
        name: "Jeera Rice",
        required_ingredients: &["rice", "cumin seeds", "salt"],
        time: "20 mins",
        spice: 1,
        steps: &[
            "Wash and soak rice for 15 minutes",
            "Heat ghee or oil, add cumin seeds",
            "Add rice and water in a 1:2 ratio",
            "Add salt and bring to boil",
            "Simmer covered until rice is cooked",
        ],
    },
    RecipeTemplate {
        name: "Simple Dal",
        required_ingredients: &["toor dal", "turmeric", "salt"],
        time: "30 mins",
        spice: 2,
        steps: &[
            "Wash dal and pressure cook with turmeric and salt",
            "Heat oil or ghee in a pan, add cumin seeds if available",
            "Add cooked dal and simmer",
            "Adjust consistency with water",
            "Garnish with coriander if available",
        ],
    },
    RecipeTemplate {
        name: "Pyaz ki Sabzi",
        required_ingredients: &["onion", "turmeric", "red chili powder", "salt"],
        time: "15 mins",
        spice: 3,
        steps: &[
            "Slice onions thinly",
            "Heat oil, add mustard seeds if available",
            "Add onions and cook until golden",
            "Add turmeric, red chili powder and salt",
            "Cook until onions are caramelized",
        ],
    },
    RecipeTemplate {
        name: "Tadka Dal",
        required_ingredients: &[
            "toor dal",
            "turmeric",
            "cumin seeds",
            "mustard seeds",
            "onion",
            "tomato",
        ],
        time: "35 mins",
        spice: 3,
        steps: &[
            "Pressure cook dal with turmeric and salt",
            "Heat oil, add cumin and mustard seeds",
            "Add chopped onions, cook until golden",
            "Add tomatoes and cook until soft",
            "Pour in cooked dal and simmer",
            "Garnish with coriander",
        ],
    },
    RecipeTemplate {
        name: "Mixed Vegetable Curry",
        required_ingredients: &["potato", "onion", "tomato", "turmeric", "coriander seeds"],
        time: "30 mins",
        spice: 3,
        steps: &[
            "Chop all vegetables into equal pieces",
            "Heat oil, add cumin seeds",
            "Add onions and cook until translucent",
            "Add tomatoes and spices",
            "Add vegetables and water",
            "Simmer until tender",
        ],
    },
    RecipeTemplate {
        name: "Nutritious Khichdi",
        required_ingredients: &["rice", "moong dal", "turmeric", "cumin seeds"],
        time: "25 mins",
        spice: 1,
        steps: &[
            "Wash rice and dal together",
            "Heat ghee, add cumin seeds",
            "Add the rice-dal mixture with turmeric",
            "Add water in a 1:3 ratio and salt",
            "Pressure cook until soft and mushy",
        ],
    },
];

const BUILTIN_ESSENTIALS: &[Essential] = &[
    Essential {
        name: "toor dal",
        category: "Pulses",
        cost: Rupees(80),
    },
    Essential {
        name: "rice",
        category: "Grains",
        cost: Rupees(60),
    },
    Essential {
        name: "onions",
        category: "Vegetables",
        cost: Rupees(40),
    },
    Essential {
        name: "tomatoes",
        category: "Vegetables",
        cost: Rupees(50),
    },
    Essential {
        name: "curd",
        category: "Dairy",
        cost: Rupees(30),
    },
    Essential {
        name: "cooking oil",
        category: "Oil & Ghee",
        cost: Rupees(100),
    },
    Essential {
        name: "green coriander",
        category: "Vegetables",
        cost: Rupees(20),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::parser::parse_pantry;

    fn recipe(name: &'static str) -> RecipeTemplate {
        RecipeTemplate {
            name,
            required_ingredients: &["rice"],
            time: "10 mins",
            spice: 2,
            steps: &["Cook"],
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.recipes().len(), 9);
        assert_eq!(catalog.essentials().len(), 7);
        assert_eq!(catalog.recipes()[0].name, "Fresh Roti");
    }

    #[test]
    fn test_empty_tables_rejected() {
        assert_eq!(
            Catalog::new(vec![], BUILTIN_ESSENTIALS.to_vec()).unwrap_err(),
            CatalogError::NoRecipes
        );
        assert_eq!(
            Catalog::new(vec![recipe("Rice")], vec![]).unwrap_err(),
            CatalogError::NoEssentials
        );
    }

    #[test]
    fn test_malformed_recipes_rejected() {
        let essentials = BUILTIN_ESSENTIALS.to_vec();

        let mut r = recipe("Nothing");
        r.required_ingredients = &[];
        assert_eq!(
            Catalog::new(vec![r], essentials.clone()).unwrap_err(),
            CatalogError::NoIngredients("Nothing")
        );

        let mut r = recipe("Stepless");
        r.steps = &[];
        assert_eq!(
            Catalog::new(vec![r], essentials.clone()).unwrap_err(),
            CatalogError::NoSteps("Stepless")
        );

        let mut r = recipe("Inferno");
        r.spice = 9;
        assert_eq!(
            Catalog::new(vec![r], essentials).unwrap_err(),
            CatalogError::Spice {
                name: "Inferno",
                spice: 9
            }
        );
    }

    #[test]
    fn test_eligibility_is_all_or_nothing() {
        let catalog = Catalog::builtin().unwrap();
        // wheat flour + potato + salt, but no green chili: paratha is not eligible
        let pantry = parse_pantry("atta, aloo, salt");
        let eligible: Vec<&str> = catalog.eligible(&pantry).map(|r| r.name).collect();
        assert_eq!(eligible, vec!["Fresh Roti"]);
    }

    #[test]
    fn test_eligible_keeps_declaration_order() {
        let catalog = Catalog::builtin().unwrap();
        let pantry = parse_pantry("atta, aloo, green chili, basic spices, rice");
        let eligible: Vec<&str> = catalog.eligible(&pantry).map(|r| r.name).collect();
        assert_eq!(eligible, vec!["Fresh Roti", "Aloo Paratha", "Jeera Rice"]);
    }
}
