// SPDX-License-Identifier: MPL-2.0
//! Browser adapters over a `<video>` element and the document.
//!
//! DOM listeners push into a queue the player drains with `poll_event`, so
//! the core handles browser events at its own pace, on the same thread.
//! Promise rejections from `play()` are caught here and queued as
//! [`MediaEvent::PlayRejected`]; fullscreen refusals arrive through the
//! document's `fullscreenerror` event.
//!
//! `release` removes every listener; closures are owned by the adapter and
//! dropped with it, never leaked.

use crate::application::port::{
    FullscreenEvent, FullscreenHost, MediaEvent, MediaResource, TimeRanges,
};
use crate::error::{Error, MediaError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, HtmlVideoElement};

type Listener = Closure<dyn FnMut(Event)>;

/// Queue shared between DOM callbacks and the adapter.
#[derive(Debug)]
struct Queue<E> {
    events: VecDeque<E>,
    released: bool,
}

impl<E> Queue<E> {
    fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            events: VecDeque::new(),
            released: false,
        }))
    }

    fn push(&mut self, event: E) {
        if !self.released {
            self.events.push_back(event);
        }
    }
}

/// Best-effort readable form of a rejection value (`NotAllowedError`, ...).
fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.name());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn listen(target: &EventTarget, event_type: &'static str, listener: &Listener) -> Result<()> {
    target
        .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
        .map_err(|e| Error::Web(format!("Failed to listen for {event_type}: {}", describe(&e))))
}

fn unlisten(target: &EventTarget, listeners: &mut Vec<(&'static str, Listener)>) {
    for (event_type, listener) in listeners.drain(..) {
        if let Err(e) = target
            .remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
        {
            log::debug!("Failed to remove {event_type} listener: {}", describe(&e));
        }
    }
}

// =============================================================================
// WebMedia
// =============================================================================

/// [`MediaResource`] over an `HtmlVideoElement`.
pub struct WebMedia {
    video: HtmlVideoElement,
    queue: Rc<RefCell<Queue<MediaEvent>>>,
    listeners: Vec<(&'static str, Listener)>,
}

impl WebMedia {
    /// Subscribes to the element's media events.
    pub fn new(video: HtmlVideoElement) -> Result<Self> {
        let queue = Queue::shared();
        let mut listeners = Vec::with_capacity(MediaEvent::DOM_TYPES.len());

        for &event_type in MediaEvent::DOM_TYPES {
            let sink = Rc::clone(&queue);
            let element = video.clone();
            let listener = Listener::new(move |event: Event| {
                let kind = event.type_();
                let event = if kind == "error" {
                    let error = element.error().map_or_else(
                        || MediaError::Other("unknown media error".to_string()),
                        |e| MediaError::from_code(e.code(), &e.message()),
                    );
                    MediaEvent::Error(error)
                } else if let Some(event) = MediaEvent::from_dom_type(&kind) {
                    event
                } else {
                    return;
                };
                sink.borrow_mut().push(event);
            });
            listen(&video, event_type, &listener)?;
            listeners.push((event_type, listener));
        }

        Ok(Self {
            video,
            queue,
            listeners,
        })
    }

    #[must_use]
    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaResource for WebMedia {
    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn volume(&self) -> f64 {
        self.video.volume()
    }

    fn muted(&self) -> bool {
        self.video.muted()
    }

    fn playback_rate(&self) -> f64 {
        self.video.playback_rate()
    }

    fn buffered(&self) -> TimeRanges {
        let ranges = self.video.buffered();
        (0..ranges.length())
            .filter_map(|i| Some((ranges.start(i).ok()?, ranges.end(i).ok()?)))
            .collect()
    }

    fn play(&mut self) {
        let promise = match self.video.play() {
            Ok(promise) => promise,
            Err(reason) => {
                self.queue
                    .borrow_mut()
                    .push(MediaEvent::PlayRejected(describe(&reason)));
                return;
            }
        };
        let sink = Rc::clone(&self.queue);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(reason) = JsFuture::from(promise).await {
                sink.borrow_mut()
                    .push(MediaEvent::PlayRejected(describe(&reason)));
            }
        });
    }

    fn pause(&mut self) {
        if let Err(e) = self.video.pause() {
            log::warn!("pause() failed: {}", describe(&e));
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.video.set_volume(volume);
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.video.set_playback_rate(rate);
    }

    fn set_src(&mut self, url: &str) {
        self.video.set_src(url);
    }

    fn load(&mut self) {
        self.video.load();
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.queue.borrow_mut().events.pop_front()
    }

    fn release(&mut self) {
        unlisten(&self.video, &mut self.listeners);
        let mut queue = self.queue.borrow_mut();
        queue.released = true;
        queue.events.clear();
    }
}

impl Drop for WebMedia {
    fn drop(&mut self) {
        unlisten(&self.video, &mut self.listeners);
    }
}

// =============================================================================
// WebFullscreen
// =============================================================================

/// [`FullscreenHost`] over the document's Fullscreen API, showing `container`.
pub struct WebFullscreen {
    document: Document,
    container: Element,
    queue: Rc<RefCell<Queue<FullscreenEvent>>>,
    listeners: Vec<(&'static str, Listener)>,
}

impl WebFullscreen {
    pub fn new(document: Document, container: Element) -> Result<Self> {
        let queue = Queue::shared();
        let mut listeners = Vec::with_capacity(2);

        let sink = Rc::clone(&queue);
        let changed = Listener::new(move |_: Event| {
            sink.borrow_mut().push(FullscreenEvent::Changed);
        });
        listen(&document, "fullscreenchange", &changed)?;
        listeners.push(("fullscreenchange", changed));

        let sink = Rc::clone(&queue);
        let refused = Listener::new(move |_: Event| {
            sink.borrow_mut().push(FullscreenEvent::Rejected(
                "fullscreen request refused".to_string(),
            ));
        });
        listen(&document, "fullscreenerror", &refused)?;
        listeners.push(("fullscreenerror", refused));

        Ok(Self {
            document,
            container,
            queue,
            listeners,
        })
    }

    /// Adapter for the player's container in the current window's document.
    pub fn for_container(container: Element) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Web("No document available".to_string()))?;
        Self::new(document, container)
    }
}

impl FullscreenHost for WebFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_fullscreen(&mut self) {
        if let Err(reason) = self.container.request_fullscreen() {
            self.queue
                .borrow_mut()
                .push(FullscreenEvent::Rejected(describe(&reason)));
        }
    }

    fn exit_fullscreen(&mut self) {
        if self.is_fullscreen() {
            self.document.exit_fullscreen();
        } else {
            self.queue.borrow_mut().push(FullscreenEvent::Rejected(
                "not in fullscreen".to_string(),
            ));
        }
    }

    fn poll_event(&mut self) -> Option<FullscreenEvent> {
        self.queue.borrow_mut().events.pop_front()
    }

    fn release(&mut self) {
        unlisten(&self.document, &mut self.listeners);
        let mut queue = self.queue.borrow_mut();
        queue.released = true;
        queue.events.clear();
    }
}

impl Drop for WebFullscreen {
    fn drop(&mut self) {
        unlisten(&self.document, &mut self.listeners);
    }
}
