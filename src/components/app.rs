use crate::api::{self, Asset, MediaStatus};
use crate::components::{AssetDetail, AssetList, Player};
use crate::diagnostics::log_event;
use crate::playback::Controller;
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let assets = use_signal(Vec::<Asset>::new);
    let selected_asset = use_signal(|| None::<Asset>);
    let media_status = use_signal(|| None::<MediaStatus>);
    let mut app_error = use_signal(|| None::<String>);
    let controller = use_signal(Controller::new);

    // Provide state via context
    use_context_provider(|| assets);
    use_context_provider(|| selected_asset);
    use_context_provider(|| media_status);
    use_context_provider(|| app_error);
    use_context_provider(|| controller);

    // Initial asset-list fetch; failures land in the error banner.
    {
        let mut assets = assets.clone();
        let mut app_error = app_error.clone();
        use_effect(move || {
            spawn(async move {
                match api::fetch_assets().await {
                    Ok(list) => {
                        log_event("assets", &format!("loaded {} assets", list.len()));
                        assets.set(list);
                    }
                    Err(err) => {
                        log_event("assets", &err);
                        app_error.set(Some(format!("Error loading app. {err}")));
                    }
                }
            });
        });
    }

    rsx! {
        div { class: "min-h-screen bg-zinc-950 text-zinc-100 pb-32",
            if let Some(message) = app_error() {
                button {
                    id: "app-error",
                    r#type: "button",
                    class: "fixed top-3 left-1/2 -translate-x-1/2 z-[60] max-w-xl rounded-lg border border-rose-500/35 bg-rose-500/10 px-4 py-2 text-left text-sm text-rose-200 shadow-lg",
                    onclick: move |_| app_error.set(None),
                    "{message}"
                }
            }
            header { class: "border-b border-zinc-800/60 bg-zinc-950/90 px-6 py-4",
                h1 { class: "text-xl font-semibold tracking-tight", "Audioshelf" }
                p { class: "text-xs text-zinc-500", "Remotely-hosted media assets" }
            }
            main { class: "mx-auto grid max-w-5xl gap-6 px-6 py-6 md:grid-cols-2",
                AssetList {}
                AssetDetail {}
            }
            Player {}
        }
    }
}
