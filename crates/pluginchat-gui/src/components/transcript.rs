use dioxus::prelude::*;
use pluginchat_models::{StatusLine, TranscriptEntry};
use pluginchat_panel::markup::{render_entry, render_status};

/// The append-only chat history. Entry HTML is escaped by `render_entry`.
#[component]
pub fn TranscriptList(entries: Vec<TranscriptEntry>) -> Element {
    rsx! {
        div { id: "chatHistory",
            for (idx, entry) in entries.iter().enumerate() {
                div { key: "{idx}", dangerous_inner_html: render_entry(entry) }
            }
        }
    }
}

/// The transient "in progress" slot below the history.
#[component]
pub fn StatusBar(status: StatusLine) -> Element {
    rsx! {
        div { id: "statusBar", dangerous_inner_html: render_status(&status) }
    }
}
