use dioxus::prelude::*;

use crate::components::transcript::{StatusBar, TranscriptList};
use crate::state::{PanelCommand, PanelState};

const SCROLL_TO_BOTTOM: &str = r"
    const history = document.getElementById('chatHistory');
    if (history) { history.scrollTop = history.scrollHeight; }
    const status = document.getElementById('statusBar');
    if (status) { status.scrollIntoView(false); }
";

const FOCUS_PROMPT: &str = "document.getElementById('prompt')?.focus();";

/// The chat surface: header, transcript, status slot and prompt row.
#[component]
pub fn ChatPanel(mut panel: Signal<Option<PanelState>>) -> Element {
    // Effects read only these memos, so typing into the prompt does not
    // re-trigger them.
    let scroll_generation =
        use_memo(move || panel.read().as_ref().map(|p| p.view.scroll_generation()));
    let focus_requests = use_memo(move || panel.read().as_ref().map(|p| p.focus_requests));

    use_effect(move || {
        if scroll_generation().is_some() {
            let _ = document::eval(SCROLL_TO_BOTTOM);
        }
    });

    // Focus the prompt on creation and on every reveal.
    use_effect(move || {
        if focus_requests().is_some() {
            let _ = document::eval(FOCUS_PROMPT);
        }
    });

    let state = panel.read();
    let Some(current) = state.as_ref() else {
        return rsx! {};
    };
    let title = current.options.title.clone();
    let icon_uri = current.options.icon_uri.clone();
    let entries = current.view.transcript().to_vec();
    let status = current.view.status().clone();
    let input = current.view.input().to_string();
    drop(state);

    let mut submit = move || {
        let message = {
            let mut state = panel.write();
            state.as_mut().and_then(|p| {
                p.view.submit().map(|message| (message, p.commands.clone()))
            })
        };
        if let Some((message, commands)) = message {
            if commands.unbounded_send(PanelCommand::Submit(message)).is_err() {
                tracing::warn!("panel task gone, prompt dropped");
            }
        }
    };

    rsx! {
        div { id: "mainFlex",
            div { id: "headerBar",
                if let Some(icon) = icon_uri {
                    img { src: "{icon}", alt: "{title}", width: "30", height: "30" }
                }
                span { id: "headerTitle", "{title}" }
                button {
                    class: "panel-close",
                    title: "Close",
                    onclick: move |_| {
                        if let Some(p) = panel.read().as_ref() {
                            let _ = p.commands.unbounded_send(PanelCommand::Close);
                        }
                    },
                    "×"
                }
            }
            div { id: "chat",
                TranscriptList { entries }
                StatusBar { status }
            }
            div { id: "promptRow",
                input {
                    id: "prompt",
                    r#type: "text",
                    placeholder: "Describe your plugin idea here…",
                    autocomplete: "off",
                    value: "{input}",
                    oninput: move |evt: Event<FormData>| {
                        if let Some(p) = panel.write().as_mut() {
                            p.view.set_input(evt.value());
                        }
                    },
                    onkeydown: move |evt: Event<KeyboardData>| {
                        if evt.key() == Key::Enter {
                            submit();
                        }
                    },
                }
                button {
                    id: "send",
                    onclick: move |_| submit(),
                    "Send"
                }
            }
        }
    }
}
