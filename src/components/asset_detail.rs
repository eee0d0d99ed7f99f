use crate::api::{Asset, MediaStatus};
use dioxus::prelude::*;

#[component]
pub fn AssetDetail() -> Element {
    let selected_asset = use_context::<Signal<Option<Asset>>>();
    let media_status = use_context::<Signal<Option<MediaStatus>>>();

    let status_label = media_status()
        .map(|status| status.display_status().to_string())
        .unwrap_or_else(|| "Media not found".to_string());

    rsx! {
        section {
            id: "asset-detail",
            class: "rounded-xl border border-zinc-800/60 bg-zinc-900/40 p-4",
            {match selected_asset() {
                Some(asset) => rsx! {
                    h2 {
                        id: "asset-detail-title",
                        class: "text-lg font-semibold text-white",
                        {asset.display_title().to_string()}
                    }
                    dl { class: "mt-3 space-y-2 text-sm",
                        div {
                            dt { class: "text-xs uppercase tracking-wide text-zinc-500", "Id" }
                            dd { id: "asset-id", class: "text-zinc-300", "{asset.id}" }
                        }
                        div {
                            dt { class: "text-xs uppercase tracking-wide text-zinc-500", "Author" }
                            dd { id: "asset-author", class: "text-zinc-300",
                                {asset.display_author().to_string()}
                            }
                        }
                        div {
                            dt { class: "text-xs uppercase tracking-wide text-zinc-500", "Description" }
                            dd { id: "asset-description", class: "text-zinc-300",
                                {asset.body.clone().unwrap_or_default()}
                            }
                        }
                        div {
                            dt { class: "text-xs uppercase tracking-wide text-zinc-500", "Media" }
                            dd { id: "asset-media-status", class: "text-zinc-300", "{status_label}" }
                        }
                    }
                },
                None => rsx! {
                    p { class: "py-6 text-center text-sm text-zinc-500",
                        "Select an asset to see its details"
                    }
                },
            }}
        }
    }
}
