//! Typed client for the asset server's JSON endpoints.

pub mod models;

pub use models::*;

use once_cell::sync::Lazy;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Resolve the server origin. In the browser the client is served by the
/// same origin it talks to; native builds fall back to the dev server.
fn api_base() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return origin;
        }
        String::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        DEFAULT_API_BASE.to_string()
    }
}

/// `GET /assets` - the full asset list, sorted newest first.
pub async fn fetch_assets() -> Result<Vec<Asset>, String> {
    let url = format!("{}/assets", api_base());
    let response = HTTP_CLIENT
        .get(&url)
        .send()
        .await
        .map_err(|err| format!("Error fetching asset list. {err}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Error fetching asset list. {status} {body}"));
    }

    let mut assets: Vec<Asset> = response
        .json()
        .await
        .map_err(|err| format!("Error decoding asset list. {err}"))?;
    sort_newest_first(&mut assets);
    Ok(assets)
}

/// `GET /assets/{id}/media_status` - whether playable media exists for the
/// asset, and the streaming URI when it does.
pub async fn fetch_media_status(asset_id: &str) -> Result<MediaStatus, String> {
    let url = format!("{}/assets/{}/media_status", api_base(), asset_id);
    let response = HTTP_CLIENT
        .get(&url)
        .send()
        .await
        .map_err(|err| format!("Error fetching media status for {asset_id}. {err}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!(
            "Error fetching media status for {asset_id}. {status} {body}"
        ));
    }

    response
        .json()
        .await
        .map_err(|err| format!("Error decoding media status for {asset_id}. {err}"))
}
