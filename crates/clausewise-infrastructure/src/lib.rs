pub mod dir_clause_repository;
pub mod groq_generator;
pub mod paths;
pub mod plain_text_extractor;
pub mod secret;
pub mod toml_session_repository;

pub use crate::dir_clause_repository::DirClauseRepository;
pub use crate::groq_generator::GroqGenerator;
pub use crate::plain_text_extractor::PlainTextExtractor;
pub use crate::toml_session_repository::TomlSessionRepository;
