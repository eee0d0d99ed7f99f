use dioxus::prelude::*;

mod api;
mod components;
mod diagnostics;
mod playback;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#09090b" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
