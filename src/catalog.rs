use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub category: String,
    pub price: u64,
}

/// Fixed ten-item catalog plus the recipe table. Prices are whole rupees.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    by_name: HashMap<String, usize>,
    recipes: HashMap<String, Vec<String>>,
}

impl Catalog {
    pub fn standard() -> Self {
        let items = [
            ("milk", "dairy", 30),
            ("bread", "bakery", 25),
            ("eggs", "poultry", 6),
            ("rice", "grains", 60),
            ("sugar", "grocery", 40),
            ("pasta", "grocery", 50),
            ("cheese", "dairy", 70),
            ("tomato", "vegetable", 20),
            ("potato", "vegetable", 30),
            ("peanut butter", "grocery", 120),
        ]
        .into_iter()
        .map(|(name, category, price)| CatalogItem {
            name: String::from(name),
            category: String::from(category),
            price,
        })
        .collect();

        let recipes = [
            ("peanut butter sandwich", vec!["bread", "peanut butter"]),
            ("pasta", vec!["pasta", "tomato"]),
        ]
        .into_iter()
        .map(|(recipe, ingredients)| {
            (
                String::from(recipe),
                ingredients.into_iter().map(String::from).collect(),
            )
        })
        .collect();

        Catalog::new(items, recipes)
    }

    pub fn new(items: Vec<CatalogItem>, recipes: HashMap<String, Vec<String>>) -> Self {
        let by_name = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.name.clone(), index))
            .collect();

        Catalog {
            items,
            by_name,
            recipes,
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn find(&self, name: &str) -> Option<&CatalogItem> {
        self.by_name.get(name).map(|index| &self.items[*index])
    }

    /// Recipe names match case-insensitively.
    pub fn recipe_ingredients(&self, recipe: &str) -> Option<&[String]> {
        self.recipes
            .get(recipe.to_lowercase().as_str())
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_ten_items() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.items().len(), 10);
        assert_eq!(catalog.find("milk").unwrap().price, 30);
        assert_eq!(catalog.find("peanut butter").unwrap().price, 120);
        assert!(catalog.find("caviar").is_none());
    }

    #[test]
    fn recipes_match_case_insensitively() {
        let catalog = Catalog::standard();
        let ingredients = catalog.recipe_ingredients("Peanut Butter Sandwich").unwrap();
        assert_eq!(ingredients, ["bread", "peanut butter"]);
        assert!(catalog.recipe_ingredients("lasagna").is_none());
    }
}
