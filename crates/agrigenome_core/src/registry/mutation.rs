use crate::error::RegistryError;
use crate::plant::PlantRef;
use agrigenome_data::PlantId;

/// Two parent species that may produce `child` when crossed.
#[derive(Debug, Clone)]
pub struct MutationRecipe {
    pub parents: (PlantId, PlantId),
    pub child: PlantRef,
    pub chance: f64,
}

impl MutationRecipe {
    /// A recipe crossing `first` with `second` into `child`.
    #[must_use]
    pub fn new(first: PlantId, second: PlantId, child: PlantRef, chance: f64) -> Self {
        Self {
            parents: (first, second),
            child,
            chance,
        }
    }

    /// Parent order does not matter.
    #[must_use]
    pub fn matches(&self, a: &PlantId, b: &PlantId) -> bool {
        (&self.parents.0 == a && &self.parents.1 == b)
            || (&self.parents.0 == b && &self.parents.1 == a)
    }

    fn same_cross(&self, other: &Self) -> bool {
        self.matches(&other.parents.0, &other.parents.1) && self.child == other.child
    }
}

/// Species mutation recipes, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct MutationRegistry {
    recipes: Vec<MutationRecipe>,
}

impl MutationRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe. Out-of-range chances and repeats of the same cross are rejected.
    pub fn add(&mut self, recipe: MutationRecipe) -> Result<(), RegistryError> {
        let id = format!(
            "{} + {} -> {}",
            recipe.parents.0,
            recipe.parents.1,
            recipe.child.id()
        );
        if !(0.0..=1.0).contains(&recipe.chance) {
            return Err(RegistryError::invalid(
                "mutation",
                id,
                "chance must be in [0.0, 1.0]",
            ));
        }
        if self.recipes.iter().any(|r| r.same_cross(&recipe)) {
            return Err(RegistryError::duplicate("mutation", id));
        }
        self.recipes.push(recipe);
        Ok(())
    }

    /// Recipes whose parents are `a` and `b`, in insertion order.
    pub fn matching<'a>(
        &'a self,
        a: &'a PlantId,
        b: &'a PlantId,
    ) -> impl Iterator<Item = &'a MutationRecipe> + 'a {
        self.recipes.iter().filter(move |r| r.matches(a, b))
    }

    /// All recipes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MutationRecipe> {
        self.recipes.iter()
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether no recipes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::PlantDefinition;

    fn recipe(a: &str, b: &str, child: &str, chance: f64) -> MutationRecipe {
        MutationRecipe::new(
            PlantId::new(a),
            PlantId::new(b),
            PlantRef::new(PlantDefinition::new(child, 4)),
            chance,
        )
    }

    #[test]
    fn test_matching_ignores_order() {
        let mut registry = MutationRegistry::new();
        registry.add(recipe("carrot", "potato", "beet", 0.5)).unwrap();
        registry.add(recipe("wheat", "potato", "melon", 0.5)).unwrap();
        let a = PlantId::new("potato");
        let b = PlantId::new("carrot");
        let found: Vec<_> = registry.matching(&a, &b).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].child.id().as_str(), "beet");
    }

    #[test]
    fn test_duplicate_recipe_rejected() {
        let mut registry = MutationRegistry::new();
        registry.add(recipe("carrot", "potato", "beet", 0.5)).unwrap();
        let err = registry
            .add(recipe("potato", "carrot", "beet", 0.9))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_chance_rejected() {
        let mut registry = MutationRegistry::new();
        assert!(registry.add(recipe("a", "b", "c", 1.5)).is_err());
        assert!(registry.is_empty());
    }
}
