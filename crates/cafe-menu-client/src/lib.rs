pub mod api;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use api::MenuApi;
pub use error::ClientError;
pub use http::{HttpMenuClient, DEFAULT_BASE_URL};
pub use state::MenuState;
pub use types::{Category, MenuEntry, MenuId};
