use std::collections::HashMap;

use crate::types::{Category, MenuEntry, MenuId};

/// Menu entries per category plus the active category.
///
/// Only the active category is guaranteed fresh; the others keep whatever was
/// last loaded for them (empty until first selected).
#[derive(Clone, Debug)]
pub struct MenuState {
    entries: HashMap<Category, Vec<MenuEntry>>,
    active: Category,
}

impl MenuState {
    pub fn new(active: Category) -> Self {
        let entries = Category::ALL.into_iter().map(|c| (c, Vec::new())).collect();
        Self { entries, active }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn set_active(&mut self, category: Category) {
        self.active = category;
    }

    pub fn entries(&self, category: Category) -> &[MenuEntry] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_entries(&self) -> &[MenuEntry] {
        self.entries(self.active)
    }

    pub fn find(&self, id: &MenuId) -> Option<&MenuEntry> {
        self.active_entries().iter().find(|e| &e.id == id)
    }

    /// Replace the listing for `category` with a fresh fetch result
    pub fn replace(&mut self, category: Category, entries: Vec<MenuEntry>) {
        self.entries.insert(category, entries);
    }

    /// Remove the active-category entry with `id`. Local only.
    pub fn remove(&mut self, id: &MenuId) -> Option<MenuEntry> {
        let list = self.entries.get_mut(&self.active)?;
        let pos = list.iter().position(|e| &e.id == id)?;
        Some(list.remove(pos))
    }

    /// Flip the sold-out flag of the active-category entry with `id`.
    /// Returns the new flag. Local only.
    pub fn toggle_sold_out(&mut self, id: &MenuId) -> Option<bool> {
        let entry = self
            .entries
            .get_mut(&self.active)?
            .iter_mut()
            .find(|e| &e.id == id)?;
        entry.sold_out = !entry.sold_out;
        Some(entry.sold_out)
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new(Category::default())
    }
}
