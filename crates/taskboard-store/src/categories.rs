//! Category management.
//!
//! Categories are looked up by id or by case-insensitive name. Lookups that
//! miss suggest the closest existing name by Levenshtein distance.

use strsim::levenshtein;
use taskboard_core::{Clock, SystemClock};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ManagerError, ManagerResult};
use crate::kv::KeyValueStore;
use crate::model::{Category, DEFAULT_CATEGORY_COLOR};
use crate::storage::Storage;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Display name used when a task references a missing category.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown Category";

/// Color used when a task references a missing category.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#6c757d";

/// Finds the best matching name from a list of candidates.
///
/// Returns `None` for an exact match or when nothing is close enough.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}

/// True for `#rgb` or `#rrggbb` hex colors.
fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn validate_category(name: &str, color: &str) -> ManagerResult<()> {
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("Category name is required".to_string());
    }
    if !is_hex_color(color) {
        errors.push(format!("Color must be a hex value like {DEFAULT_CATEGORY_COLOR}"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ManagerError::Validation(errors))
    }
}

/// Owns the category list.
#[derive(Debug)]
pub struct CategoryManager<S, C = SystemClock> {
    storage: Storage<S, C>,
    categories: Vec<Category>,
}

impl<S: KeyValueStore, C: Clock> CategoryManager<S, C> {
    /// Loads categories, seeding the defaults into an empty store.
    pub fn new(storage: Storage<S, C>) -> ManagerResult<Self> {
        storage.initialize()?;
        let categories = storage.categories()?;
        Ok(Self {
            storage,
            categories,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Case-insensitive name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == name)
    }

    /// Resolves a category by id or name.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::CategoryNotFound`, with a suggestion when a
    /// similarly named category exists.
    pub fn resolve(&self, name_or_id: &str) -> ManagerResult<&Category> {
        if let Some(category) = self.get(name_or_id).or_else(|| self.find_by_name(name_or_id)) {
            return Ok(category);
        }

        let suggestion =
            find_similar_name(name_or_id, self.categories.iter().map(|c| c.name.as_str()));
        Err(ManagerError::CategoryNotFound {
            identifier: name_or_id.to_string(),
            suggestion,
        })
    }

    /// Display name for a category id, falling back to "Unknown Category".
    pub fn name_for(&self, id: &str) -> &str {
        self.get(id).map_or(UNKNOWN_CATEGORY_NAME, |c| c.name.as_str())
    }

    /// Color for a category id, falling back to a neutral gray.
    pub fn color_for(&self, id: &str) -> &str {
        self.get(id).map_or(UNKNOWN_CATEGORY_COLOR, |c| c.color.as_str())
    }

    /// Creates a category. Names are unique, ignoring case.
    pub fn add(&mut self, name: &str, color: Option<&str>) -> ManagerResult<Category> {
        let name = name.trim();
        let color = color.map_or(DEFAULT_CATEGORY_COLOR, str::trim);
        validate_category(name, color)?;

        if self.find_by_name(name).is_some() {
            return Err(ManagerError::DuplicateCategory(name.to_string()));
        }

        let category = Category::new(
            Uuid::new_v4().to_string(),
            name,
            color,
            self.storage.clock().now(),
        );
        let mut staged = self.categories.clone();
        staged.push(category.clone());
        self.commit(staged)?;
        debug!(id = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    /// Renames and/or recolors a category. `None` keeps the current value.
    pub fn update(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<&str>,
    ) -> ManagerResult<Category> {
        let index = self.index_of(id)?;
        let current = &self.categories[index];

        let name = name.map_or(current.name.as_str(), str::trim).to_string();
        let color = color.map_or(current.color.as_str(), str::trim).to_string();
        validate_category(&name, &color)?;

        if self
            .categories
            .iter()
            .any(|c| c.id != id && c.name.to_lowercase() == name.to_lowercase())
        {
            return Err(ManagerError::DuplicateCategory(name));
        }

        let mut staged = self.categories.clone();
        let category = &mut staged[index];
        category.name = name;
        category.color = color;
        let updated = category.clone();
        self.commit(staged)?;
        Ok(updated)
    }

    /// Deletes a category that no task references.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::CategoryInUse` with the number of referencing tasks.
    pub fn delete(&mut self, id: &str) -> ManagerResult<Category> {
        let index = self.index_of(id)?;

        let count = self
            .storage
            .tasks()?
            .iter()
            .filter(|t| t.category_id == id)
            .count();
        if count > 0 {
            return Err(ManagerError::CategoryInUse {
                id: id.to_string(),
                count,
            });
        }

        let mut staged = self.categories.clone();
        let removed = staged.remove(index);
        self.commit(staged)?;
        debug!(id = %removed.id, "category deleted");
        Ok(removed)
    }

    fn index_of(&self, id: &str) -> ManagerResult<usize> {
        self.categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ManagerError::CategoryNotFound {
                identifier: id.to_string(),
                suggestion: None,
            })
    }

    /// Writes `categories` to storage, then adopts them as the current list.
    fn commit(&mut self, categories: Vec<Category>) -> ManagerResult<()> {
        self.storage.save_categories(&categories)?;
        self.categories = categories;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use taskboard_core::{FixedClock, Task};

    fn clock() -> FixedClock {
        FixedClock::from_ymd("2025-12-09").unwrap()
    }

    fn manager(store: &MemoryStore) -> CategoryManager<&MemoryStore, FixedClock> {
        CategoryManager::new(Storage::with_clock(store, clock())).unwrap()
    }

    #[test]
    fn test_find_similar_name_typo() {
        let names = ["Work", "Personal", "Shopping"];
        assert_eq!(
            find_similar_name("Wrok", names.iter().copied()),
            Some("Work".to_string())
        );
        assert_eq!(
            find_similar_name("shoping", names.iter().copied()),
            Some("Shopping".to_string())
        );
    }

    #[test]
    fn test_find_similar_name_exact_or_far() {
        let names = ["Work", "Personal"];
        assert_eq!(find_similar_name("work", names.iter().copied()), None);
        assert_eq!(find_similar_name("Gardening", names.iter().copied()), None);
        assert_eq!(find_similar_name("x", std::iter::empty()), None);
    }

    #[test]
    fn test_seeds_default_categories() {
        let store = MemoryStore::new();
        let cm = manager(&store);
        assert_eq!(cm.categories().len(), 3);
        assert_eq!(cm.name_for("default-personal"), "Personal");
    }

    #[test]
    fn test_resolve_by_id_and_name() {
        let store = MemoryStore::new();
        let cm = manager(&store);
        assert_eq!(cm.resolve("default-work").unwrap().name, "Work");
        assert_eq!(cm.resolve("SHOPPING").unwrap().id, "default-shopping");

        let err = cm.resolve("Persnal").unwrap_err();
        assert_eq!(
            err.to_string(),
            "category 'Persnal' not found. Did you mean 'Personal'?"
        );
    }

    #[test]
    fn test_unknown_category_fallbacks() {
        let store = MemoryStore::new();
        let cm = manager(&store);
        assert_eq!(cm.name_for("gone"), UNKNOWN_CATEGORY_NAME);
        assert_eq!(cm.color_for("gone"), UNKNOWN_CATEGORY_COLOR);
        assert_eq!(cm.color_for("default-work"), "#3498db");
    }

    #[test]
    fn test_add_category() {
        let store = MemoryStore::new();
        let mut cm = manager(&store);

        let category = cm.add("  Garden ", None).unwrap();
        assert_eq!(category.name, "Garden");
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);

        let reloaded = manager(&store);
        assert!(reloaded.find_by_name("garden").is_some());
    }

    #[test]
    fn test_add_rejects_duplicates_and_bad_input() {
        let store = MemoryStore::new();
        let mut cm = manager(&store);

        assert!(matches!(
            cm.add("work", None),
            Err(ManagerError::DuplicateCategory(_))
        ));

        let err = cm.add("  ", Some("blue")).unwrap_err();
        assert_eq!(err.validation_errors().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_update_category() {
        let store = MemoryStore::new();
        let mut cm = manager(&store);

        let updated = cm.update("default-work", Some("Office"), None).unwrap();
        assert_eq!(updated.name, "Office");
        assert_eq!(updated.color, "#3498db");

        // Renaming to its own name in a different case is fine
        assert!(cm.update("default-work", Some("OFFICE"), Some("#fff")).is_ok());

        assert!(matches!(
            cm.update("default-work", Some("personal"), None),
            Err(ManagerError::DuplicateCategory(_))
        ));
        assert!(matches!(
            cm.update("missing", Some("X"), None),
            Err(ManagerError::CategoryNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_refuses_in_use() {
        let store = MemoryStore::new();
        let storage = Storage::with_clock(&store, clock());
        let mut cm = CategoryManager::new(storage.clone()).unwrap();
        storage
            .save_tasks(&[
                Task::new("t1", "One", "default-work", clock().now()),
                Task::new("t2", "Two", "default-work", clock().now()),
            ])
            .unwrap();

        let err = cm.delete("default-work").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot delete category: it is being used by 2 task(s)"
        );

        let removed = cm.delete("default-shopping").unwrap();
        assert_eq!(removed.name, "Shopping");
        assert_eq!(storage.categories().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_writes_leave_categories_unchanged() {
        let store = MemoryStore::new();
        let mut cm = manager(&store);
        let before = cm.categories().to_vec();
        store.set_simulate_write_error(true);

        assert!(matches!(cm.add("Garden", None), Err(ManagerError::Store(_))));
        assert!(cm.update("default-work", Some("Office"), None).is_err());
        assert!(cm.delete("default-shopping").is_err());

        assert_eq!(cm.categories(), before.as_slice());
        assert!(cm.find_by_name("garden").is_none());
        assert_eq!(cm.name_for("default-work"), "Work");
    }
}
