use crate::components::Icon;
use crate::playback::{Controller, PlayIcon, VolumeIcon};
use dioxus::prelude::*;

/// Transport controls for the playback controller: play/pause toggle, seek
/// slider, volume slider, and the elapsed/duration labels. Everything shown
/// here is read from the controller's transport snapshot.
#[component]
pub fn Player() -> Element {
    let mut controller = use_context::<Signal<Controller>>();

    let (transport, volume) = {
        let read = controller.read();
        (read.transport().clone(), read.volume())
    };

    let on_toggle_play = move |_| controller.write().toggle_play();

    let on_seek_input = move |event: Event<FormData>| {
        if let Ok(value) = event.value().parse::<f64>() {
            controller.write().scrub_input(value.max(0.0) as u32);
        }
    };

    let on_seek_commit = move |event: Event<FormData>| {
        if let Ok(value) = event.value().parse::<f64>() {
            controller.write().commit_seek(value.max(0.0) as u32);
        }
    };

    let on_volume_input = move |event: Event<FormData>| {
        if let Ok(value) = event.value().parse::<f64>() {
            controller.write().set_volume(value);
        }
    };

    rsx! {
        div {
            id: "player",
            class: if transport.visible { "fixed bottom-0 left-0 right-0 z-50 border-t border-zinc-800/60 bg-zinc-950/90 backdrop-blur-xl" } else { "hidden" },
            div { class: "mx-auto flex max-w-5xl items-center gap-3 px-4 py-3 md:gap-4 md:px-6",
                button {
                    id: "play-pause-btn",
                    r#type: "button",
                    disabled: !transport.controls_enabled,
                    class: "flex h-10 w-10 flex-shrink-0 items-center justify-center rounded-full bg-white text-black shadow-lg transition-transform enabled:hover:scale-105 disabled:opacity-40",
                    onclick: on_toggle_play,
                    Icon {
                        name: match transport.play_icon {
                            PlayIcon::Play => "play".to_string(),
                            PlayIcon::Pause => "pause".to_string(),
                        },
                        class: "w-5 h-5".to_string(),
                    }
                }
                span {
                    id: "elapsed-label",
                    class: "w-14 flex-shrink-0 text-right text-xs text-zinc-400",
                    "{transport.elapsed}"
                }
                input {
                    id: "seek-slider",
                    r#type: "range",
                    min: "0",
                    max: "{transport.seek_max}",
                    value: "{transport.seek_value}",
                    disabled: !transport.controls_enabled,
                    class: "h-1.5 flex-1 cursor-pointer appearance-none rounded-full bg-zinc-800 accent-emerald-500 disabled:cursor-not-allowed",
                    oninput: on_seek_input,
                    onchange: on_seek_commit,
                }
                span {
                    id: "duration-label",
                    class: "w-14 flex-shrink-0 text-xs text-zinc-400",
                    "{transport.duration}"
                }
                div { class: "hidden items-center gap-2 md:flex",
                    span { id: "volume-icon", class: "text-zinc-400",
                        Icon {
                            name: match transport.volume_icon {
                                VolumeIcon::Up => "volume-up".to_string(),
                                VolumeIcon::Muted => "volume-mute".to_string(),
                            },
                            class: "w-5 h-5".to_string(),
                        }
                    }
                    input {
                        id: "volume-slider",
                        r#type: "range",
                        min: "0",
                        max: "1",
                        step: "0.01",
                        value: "{volume}",
                        disabled: !transport.controls_enabled,
                        class: "h-1.5 w-24 cursor-pointer appearance-none rounded-full bg-zinc-800 accent-zinc-400 disabled:cursor-not-allowed",
                        oninput: on_volume_input,
                    }
                }
            }
        }
    }
}
