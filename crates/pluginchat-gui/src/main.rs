mod components;
mod state;

use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::mpsc as futures_mpsc;
use futures::StreamExt;
use pluginchat_panel::{ChatView, PanelOpen, SurfaceEndpoint, SurfaceSignal};

use components::chat_panel::ChatPanel;
use state::{PanelCommand, PanelState, Shell};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let shell = use_hook(|| Shell::new().map(Rc::new).map_err(|e| e.to_string()));
    let panel: Signal<Option<PanelState>> = use_signal(|| None);

    let shell = match shell {
        Ok(shell) => shell,
        Err(e) => {
            return rsx! {
                style { {include_str!("style.css")} }
                div { class: "empty-state error",
                    p { "Invalid generation service configuration: {e}" }
                }
            };
        }
    };

    rsx! {
        style { {include_str!("style.css")} }
        div { class: "app-root",
            div { class: "host-toolbar",
                span { class: "host-title", "Plugin Workbench" }
                button {
                    class: "host-command",
                    onclick: move |_| {
                        let shell = shell.clone();
                        // Runs on the runtime task so the controller can spawn
                        // its subscriptions.
                        spawn(async move {
                            open_chat_panel(&shell, panel);
                        });
                    },
                    "Open chat panel"
                }
            }

            if panel.read().is_some() {
                ChatPanel { panel }
            } else {
                div { class: "empty-state",
                    p { "No chat panel open. Use \"Open chat panel\" to start." }
                }
            }
        }
    }
}

/// The host's "open chat panel" command.
fn open_chat_panel(shell: &Shell, mut panel: Signal<Option<PanelState>>) {
    match shell.controller.open_or_focus() {
        PanelOpen::Created => {
            let Some(endpoint) = shell.take_presented() else {
                tracing::warn!("controller created a panel but presented nothing");
                return;
            };
            let (commands, command_rx) = futures_mpsc::unbounded();
            let options = endpoint.options().clone();
            panel.set(Some(PanelState {
                id: endpoint.id(),
                view: ChatView::new(&options.greeting),
                options,
                focus_requests: 0,
                commands,
            }));
            spawn(run_panel(endpoint, panel, command_rx));
        }
        // The reveal arrives through the surface itself.
        PanelOpen::Revealed => {}
    }
}

/// Owns the surface endpoint for as long as the panel is displayed.
async fn run_panel(
    mut endpoint: SurfaceEndpoint,
    mut panel: Signal<Option<PanelState>>,
    mut commands: futures_mpsc::UnboundedReceiver<PanelCommand>,
) {
    let id = endpoint.id();
    tracing::info!(panel_id = %id, "panel displayed");

    loop {
        tokio::select! {
            signal = endpoint.recv() => {
                let Some(signal) = signal else {
                    break;
                };
                let mut state = panel.write();
                let Some(current) = state.as_mut().filter(|p| p.id == id) else {
                    break;
                };
                match signal {
                    SurfaceSignal::Event(event) => {
                        current.view.apply(&event);
                    }
                    SurfaceSignal::Reveal => {
                        current.focus_requests += 1;
                        dioxus::desktop::window().set_focus();
                    }
                }
            }
            command = commands.next() => {
                match command {
                    Some(PanelCommand::Submit(message)) => {
                        endpoint.send(message);
                    }
                    Some(PanelCommand::Close) | None => {
                        endpoint.close();
                        break;
                    }
                }
            }
        }
    }

    // Surface gone: drop its state unless a newer panel already replaced it.
    let is_current = panel.read().as_ref().is_some_and(|p| p.id == id);
    if is_current {
        panel.set(None);
    }
    tracing::info!(panel_id = %id, "panel closed");
}
