pub mod chat_panel;
pub mod transcript;
