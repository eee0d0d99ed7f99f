use crate::api::{self, Asset, MediaStatus};
use crate::components::Icon;
use crate::diagnostics::log_event;
use crate::playback::Controller;
use dioxus::prelude::*;

#[component]
pub fn AssetList() -> Element {
    let assets = use_context::<Signal<Vec<Asset>>>();

    rsx! {
        section {
            id: "asset-list",
            class: "rounded-xl border border-zinc-800/60 bg-zinc-900/40",
            h2 { class: "border-b border-zinc-800/60 px-4 py-3 text-sm font-medium text-zinc-300",
                "Assets"
            }
            if assets().is_empty() {
                p { class: "px-4 py-6 text-sm text-zinc-500", "No assets yet" }
            }
            for asset in assets() {
                AssetRow { key: "{asset.id}", asset: asset.clone() }
            }
        }
    }
}

/// Select `asset`, resolve its media status, and hand the resulting URI (or
/// its absence) to the playback controller.
async fn open_asset(
    asset: Asset,
    mut selected_asset: Signal<Option<Asset>>,
    mut media_status: Signal<Option<MediaStatus>>,
    mut controller: Signal<Controller>,
) -> Result<(), String> {
    let asset_id = asset.id.clone();
    selected_asset.set(Some(asset));
    media_status.set(None);

    let status = api::fetch_media_status(&asset_id)
        .await
        .map_err(|err| format!("Error opening asset {asset_id}. {err}"))?;
    let uri = status.uri.clone();
    media_status.set(Some(status));

    log_event(
        "player",
        &format!("load {}", uri.as_deref().unwrap_or("(no media)")),
    );
    controller
        .write()
        .load(uri.as_deref())
        .map_err(|err| format!("Error opening asset {asset_id}. {err}"))?;

    #[cfg(target_arch = "wasm32")]
    crate::playback::web::bind_media_events(controller);

    Ok(())
}

#[component]
fn AssetRow(asset: Asset) -> Element {
    let selected_asset = use_context::<Signal<Option<Asset>>>();
    let media_status = use_context::<Signal<Option<MediaStatus>>>();
    let mut app_error = use_context::<Signal<Option<String>>>();
    let controller = use_context::<Signal<Controller>>();
    // One open in flight per row; a click while busy is rejected, not queued.
    let mut busy = use_signal(|| false);

    let date_label = asset
        .date
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    let on_open = {
        let asset = asset.clone();
        move |_| {
            if busy() {
                return;
            }
            busy.set(true);
            let asset = asset.clone();
            spawn(async move {
                if let Err(err) = open_asset(asset, selected_asset, media_status, controller).await
                {
                    log_event("assets", &err);
                    app_error.set(Some(err));
                }
                busy.set(false);
            });
        }
    };

    rsx! {
        button {
            r#type: "button",
            class: "flex w-full items-center gap-3 border-b border-zinc-800/40 px-4 py-3 text-left transition-colors last:border-b-0 hover:bg-zinc-800/40",
            onclick: on_open,
            div { class: "flex h-9 w-9 flex-shrink-0 items-center justify-center rounded-lg bg-zinc-800 text-zinc-400",
                if busy() {
                    Icon { name: "loader".to_string(), class: "w-4 h-4".to_string() }
                } else {
                    Icon { name: "music".to_string(), class: "w-4 h-4".to_string() }
                }
            }
            div { class: "min-w-0 flex-1",
                p { class: "asset-title truncate text-sm font-medium text-white",
                    {asset.display_title().to_string()}
                }
                p { class: "asset-author truncate text-xs text-zinc-400",
                    {asset.display_author().to_string()}
                }
            }
            span { class: "asset-date flex-shrink-0 text-xs text-zinc-500", "{date_label}" }
        }
    }
}
