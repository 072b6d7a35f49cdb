use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{Category, MenuEntry, MenuId};

/// Remote menu operations. One attempt per call, no retry.
#[async_trait]
pub trait MenuApi: Send + Sync {
    async fn list_by_category(&self, category: Category) -> Result<Vec<MenuEntry>, ClientError>;

    /// Response body is ignored; callers re-fetch the listing afterwards.
    async fn create_menu(&self, category: Category, name: &str) -> Result<(), ClientError>;

    async fn update_menu(
        &self,
        category: Category,
        name: &str,
        id: &MenuId,
    ) -> Result<MenuEntry, ClientError>;
}
