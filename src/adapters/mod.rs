// Adapters layer: concrete implementations of the domain ports (preference
// storage, the external chat service).

pub mod gemini;
pub mod storage;

pub use gemini::GeminiClient;
pub use storage::{FilePreferenceStore, MemoryPreferenceStore};
