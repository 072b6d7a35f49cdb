use cafe_menu_client::{Category, ClientError, MenuApi, MenuEntry, MenuId, MenuState};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const EMPTY_NAME_MESSAGE: &str = "Please enter a value!";

/// Screen states for the TUI state machine
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Browse,
    Compose,                                // Name field focused
    Rename { id: MenuId, input: String },   // Prompt seeded with the current name
    ConfirmRemove(MenuId),
    Message(String, bool),                  // Message, is_error
}

/// Application state
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,

    pub menu: MenuState,
    pub selected: usize,

    // Add-menu form field
    pub name_input: String,

    pub is_loading: bool,
    pub last_error: Option<String>,

    api: Arc<dyn MenuApi>,
}

impl App {
    pub fn new(api: Arc<dyn MenuApi>, category: Category) -> Self {
        Self {
            screen: Screen::Browse,
            should_quit: false,
            menu: MenuState::new(category),
            selected: 0,
            name_input: String::new(),
            is_loading: false,
            last_error: None,
            api,
        }
    }

    pub fn active_category(&self) -> Category {
        self.menu.active()
    }

    pub fn header(&self) -> String {
        format!("{} Menu Management", self.active_category().label())
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.menu.active_entries().get(self.selected)
    }

    // Navigation helpers
    pub fn select_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_down(&mut self) {
        if self.selected < self.menu.active_entries().len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.menu.active_entries().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn go_back(&mut self) {
        match &self.screen {
            Screen::Compose
            | Screen::Rename { .. }
            | Screen::ConfirmRemove(_)
            | Screen::Message(_, _) => self.screen = Screen::Browse,
            Screen::Browse => {}
        }
    }

    fn show_error(&mut self, message: String) {
        self.last_error = Some(message.clone());
        self.screen = Screen::Message(message, true);
    }

    // Transitions that talk to the backend

    pub async fn init(&mut self) -> anyhow::Result<()> {
        self.reload().await
    }

    /// Re-fetch the active category. On failure the previous listing is kept.
    pub async fn reload(&mut self) -> anyhow::Result<()> {
        let category = self.active_category();
        self.is_loading = true;
        self.last_error = None;

        let result = self.api.list_by_category(category).await;
        self.is_loading = false;

        match result {
            Ok(entries) => self.apply_listing(category, entries),
            Err(e) => {
                error!(%category, error = %e, "Failed to load menu");
                self.show_error(format!("Failed to load {} menu: {}", category, e));
            }
        }
        Ok(())
    }

    /// Listings are keyed by the category they were fetched for, so a late
    /// response can never land in another category's slot.
    fn apply_listing(&mut self, category: Category, entries: Vec<MenuEntry>) {
        self.menu.replace(category, entries);
        if category == self.active_category() {
            self.clamp_selection();
        }
    }

    pub async fn select_category(&mut self, category: Category) -> anyhow::Result<()> {
        info!(from = %self.active_category(), to = %category, "Switching category");
        self.menu.set_active(category);
        self.selected = 0;
        self.reload().await
    }

    pub async fn add_entry(&mut self) -> anyhow::Result<()> {
        let name = self.name_input.trim().to_string();
        if name.is_empty() {
            self.screen = Screen::Message(EMPTY_NAME_MESSAGE.to_string(), true);
            return Ok(());
        }

        let category = self.active_category();
        let created = self.api.create_menu(category, &name).await;
        if let Err(e) = &created {
            error!(%category, %name, error = %e, "Failed to create menu");
        }

        // Reload regardless so the list shows what the backend actually holds
        self.reload().await?;
        self.name_input.clear();

        if let Err(e) = created {
            self.report_write_failure("add", &name, e);
        }
        Ok(())
    }

    /// Open the rename prompt for the selected entry
    pub fn begin_rename(&mut self) {
        if let Some(entry) = self.selected_entry().cloned() {
            self.screen = Screen::Rename {
                id: entry.id,
                input: entry.name,
            };
        }
    }

    pub async fn rename_entry(&mut self, id: &MenuId, new_name: &str) -> anyhow::Result<()> {
        let name = new_name.trim();
        if name.is_empty() {
            self.screen = Screen::Message(EMPTY_NAME_MESSAGE.to_string(), true);
            return Ok(());
        }

        let category = self.active_category();
        let updated = self.api.update_menu(category, name, id).await;
        match &updated {
            Ok(entry) => info!(%category, id = %entry.id, name = %entry.name, "Menu renamed"),
            Err(e) => error!(%category, %id, %name, error = %e, "Failed to rename menu"),
        }

        self.screen = Screen::Browse;
        self.reload().await?;

        if let Err(e) = updated {
            self.report_write_failure("rename", name, e);
        }
        Ok(())
    }

    fn report_write_failure(&mut self, action: &str, name: &str, e: ClientError) {
        self.show_error(format!("Failed to {} \"{}\": {}", action, name, e));
    }

    // Local-only transitions (no backend endpoint exists for these)

    pub fn request_remove(&mut self) {
        if let Some(id) = self.selected_entry().map(|e| e.id.clone()) {
            self.screen = Screen::ConfirmRemove(id);
        }
    }

    pub fn remove_entry(&mut self, id: &MenuId) -> bool {
        match self.menu.remove(id) {
            Some(entry) => {
                info!(category = %self.active_category(), %id, name = %entry.name, "Menu removed locally");
                self.clamp_selection();
                self.screen = Screen::Message(format!("Removed \"{}\"", entry.name), false);
                true
            }
            None => {
                warn!(%id, "Remove requested for unknown menu id");
                self.screen = Screen::Browse;
                false
            }
        }
    }

    pub fn toggle_sold_out(&mut self, id: &MenuId) -> Option<bool> {
        let flag = self.menu.toggle_sold_out(id);
        match flag {
            Some(sold_out) => info!(%id, sold_out, "Sold-out toggled locally"),
            None => warn!(%id, "Sold-out toggle for unknown menu id"),
        }
        flag
    }
}
