//! Browser media backend: one `HtmlAudioElement` per handle, with event
//! closures dispatching generation-tagged [`MediaEvent`]s into the controller.

use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::HtmlAudioElement;

use super::{MediaEvent, MediaHandle, PlaybackController};

pub struct WebMediaHandle {
    element: HtmlAudioElement,
    uri: String,
}

impl WebMediaHandle {
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaHandle for WebMediaHandle {
    fn open(uri: &str) -> Result<Self, String> {
        let element = HtmlAudioElement::new_with_src(uri)
            .map_err(|err| format!("failed to create audio element for {uri}: {err:?}"))?;
        let _ = element.set_attribute("preload", "metadata");
        Ok(Self {
            element,
            uri: uri.to_string(),
        })
    }

    fn source_uri(&self) -> &str {
        &self.uri
    }

    fn play(&self) {
        if let Ok(promise) = self.element.play() {
            wasm_bindgen_futures::spawn_local(async move {
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            });
        }
    }

    fn try_pause(&self) -> Result<(), String> {
        self.element
            .pause()
            .map_err(|err| format!("pause failed: {err:?}"))
    }

    fn paused(&self) -> bool {
        self.element.paused()
    }

    fn set_current_time(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume.clamp(0.0, 1.0));
    }
}

/// Install the per-handle event bindings on the controller's live element.
/// Call once right after a successful `load`. Each closure carries the
/// generation the handle was bound under, so anything firing after the
/// handle is retired lands in `apply_event`'s stale-generation check, which
/// is why leaking the closures with `forget` is acceptable.
pub fn bind_media_events(mut controller: Signal<PlaybackController<WebMediaHandle>>) {
    let bound = {
        let read = controller.read();
        read.handle()
            .map(|handle| (handle.element().clone(), read.generation()))
    };
    let Some((element, generation)) = bound else {
        return;
    };
    let runtime = Runtime::current();

    let install = move |make_event: Box<dyn Fn() -> MediaEvent>| -> js_sys::Function {
        let runtime = runtime.clone();
        let callback = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime.clone());
            controller.write().apply_event(generation, make_event());
        }) as Box<dyn FnMut()>);
        let function = callback.as_ref().unchecked_ref::<js_sys::Function>().clone();
        callback.forget();
        function
    };

    element.set_onloadstart(Some(&install(Box::new(|| MediaEvent::LoadStart))));

    let metadata_element = element.clone();
    element.set_onloadedmetadata(Some(&install(Box::new(move || {
        MediaEvent::MetadataLoaded {
            duration: metadata_element.duration(),
        }
    }))));

    let position_element = element.clone();
    element.set_ontimeupdate(Some(&install(Box::new(move || MediaEvent::TimeUpdate {
        position: position_element.current_time(),
    }))));

    element.set_onplay(Some(&install(Box::new(|| MediaEvent::Play))));
    element.set_onpause(Some(&install(Box::new(|| MediaEvent::Pause))));
    element.set_oncanplaythrough(Some(&install(Box::new(|| MediaEvent::CanPlayThrough))));
    element.set_onwaiting(Some(&install(Box::new(|| MediaEvent::Waiting))));
}
