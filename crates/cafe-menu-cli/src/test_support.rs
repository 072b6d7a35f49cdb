use async_trait::async_trait;
use cafe_menu_client::{Category, ClientError, MenuApi, MenuEntry, MenuId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    List(Category),
    Create(Category, String),
    Update(Category, String, MenuId),
}

/// In-memory backend that records every call it receives
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    menus: Mutex<HashMap<Category, Vec<MenuEntry>>>,
    next_id: AtomicU64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl RecordingApi {
    pub fn seeded() -> Arc<Self> {
        let mut menus = HashMap::new();
        menus.insert(
            Category::Espresso,
            vec![
                MenuEntry::new("1", "Americano"),
                MenuEntry::new("5", "Cafe Latte"),
                MenuEntry::new("9", "Cold Brew"),
            ],
        );
        menus.insert(
            Category::Desert,
            vec![
                MenuEntry::new("2", "Cheesecake"),
                MenuEntry::new("3", "Tiramisu"),
            ],
        );

        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            menus: Mutex::new(menus),
            next_id: AtomicU64::new(100),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn server_error(method: &'static str, category: Category) -> ClientError {
        ClientError::Status {
            method,
            url: format!("http://test/category/{}/menu", category),
            status: 500,
        }
    }
}

#[async_trait]
impl MenuApi for RecordingApi {
    async fn list_by_category(&self, category: Category) -> Result<Vec<MenuEntry>, ClientError> {
        self.record(Call::List(category));
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::server_error("GET", category));
        }
        let menus = self.menus.lock().unwrap();
        Ok(menus.get(&category).cloned().unwrap_or_default())
    }

    async fn create_menu(&self, category: Category, name: &str) -> Result<(), ClientError> {
        self.record(Call::Create(category, name.to_string()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::server_error("POST", category));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.menus
            .lock()
            .unwrap()
            .entry(category)
            .or_default()
            .push(MenuEntry::new(id, name));
        Ok(())
    }

    async fn update_menu(
        &self,
        category: Category,
        name: &str,
        id: &MenuId,
    ) -> Result<MenuEntry, ClientError> {
        self.record(Call::Update(category, name.to_string(), id.clone()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::server_error("PUT", category));
        }
        let mut menus = self.menus.lock().unwrap();
        let entry = menus
            .get_mut(&category)
            .and_then(|list| list.iter_mut().find(|e| &e.id == id))
            .ok_or_else(|| Self::server_error("PUT", category))?;
        entry.name = name.to_string();
        Ok(entry.clone())
    }
}
