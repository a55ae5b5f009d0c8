pub mod assistant;
pub mod pagination;
pub mod query;
pub mod related;
pub mod sections;
pub mod theme;
pub mod toc;

pub use crate::domain::ports::{ChatBackend, ConfigProvider, PreferenceStore};
pub use crate::utils::error::Result;
pub use assistant::{create_chat_session, ChatSession};
pub use query::{BlogFilter, Portfolio, ProjectFilter, QueryResult, SkillFilter};
pub use theme::{ColorScheme, Theme, ThemeController};
