// Browser binding: web-sys implementations of the drivers plus DOM event wiring.
// JS is plumbing; every decision is made by the controller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Promise, Reflect};
use log::{debug, error, warn, Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    HtmlVideoElement, KeyboardEvent, TouchEvent, Window,
};

use crate::controller::Slideshow;
use crate::drivers::{FullscreenDriver, MediaDriver, TimerDriver, ViewRenderer};
use crate::error::{Result, SlideshowError};
use crate::types::*;

pub type WebSlideshow = Slideshow<DomView, WebMedia, WebFullscreen, WebTimers>;
type Shared = Rc<RefCell<WebSlideshow>>;

// -------------------------------------------------------------------------
// Logging
// -------------------------------------------------------------------------

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Route `log` records to the browser console. Safe to call more than once.
pub fn install_console_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// -------------------------------------------------------------------------
// Drivers
// -------------------------------------------------------------------------

/// Slides, dots, counter, progress bar and play button.
pub struct DomView {
    slides: Vec<Element>,
    dots: Vec<Element>,
    counter: Element,
    progress_bar: HtmlElement,
    play_button: Element,
}

impl ViewRenderer for DomView {
    fn set_active(&mut self, index: usize) {
        for (i, slide) in self.slides.iter().enumerate() {
            let active = i == index;
            let _ = slide.class_list().toggle_with_force("active", active);
            let _ = slide.set_attribute("aria-hidden", if active { "false" } else { "true" });
        }
    }

    fn set_indicator(&mut self, index: usize, selected: bool) {
        if let Some(dot) = self.dots.get(index) {
            let _ = dot.set_attribute("aria-selected", if selected { "true" } else { "false" });
        }
    }

    fn set_counter_text(&mut self, text: &str) {
        self.counter.set_text_content(Some(text));
    }

    fn set_progress(&mut self, percent: f64) {
        let _ = self
            .progress_bar
            .style()
            .set_property("width", &format!("{}%", percent));
    }

    fn set_playing(&mut self, playing: bool) {
        self.play_button
            .set_text_content(Some(if playing { "⏸" } else { "▶" }));
    }
}

pub struct WebMedia {
    video: HtmlVideoElement,
}

impl MediaDriver for WebMedia {
    fn play(&mut self) -> Result<()> {
        let promise = self
            .video
            .play()
            .map_err(|e| SlideshowError::PlaybackBlocked(describe(&e)))?;
        report_rejection(promise, SlideshowError::PlaybackBlocked);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.video
            .pause()
            .map_err(|e| SlideshowError::PlaybackBlocked(describe(&e)))
    }

    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&mut self, secs: f64) {
        self.video.set_current_time(secs);
    }
}

pub struct WebFullscreen {
    document: Document,
    root: Element,
}

impl FullscreenDriver for WebFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_enter(&mut self) -> Result<()> {
        let promise = call_promise(&self.root, "requestFullscreen")
            .map_err(|e| SlideshowError::FullscreenDenied(describe(&e)))?;
        report_rejection(promise, SlideshowError::FullscreenDenied);
        Ok(())
    }

    fn request_exit(&mut self) -> Result<()> {
        let promise = call_promise(&self.document, "exitFullscreen")
            .map_err(|e| SlideshowError::FullscreenDenied(describe(&e)))?;
        report_rejection(promise, SlideshowError::FullscreenDenied);
        Ok(())
    }
}

/// Call a promise-returning method by name. Browsers that return nothing get a resolved promise.
fn call_promise(target: &JsValue, method: &str) -> std::result::Result<Promise, JsValue> {
    let func: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    let value = func.call0(target)?;
    Ok(value
        .dyn_into::<Promise>()
        .unwrap_or_else(|_| Promise::resolve(&JsValue::UNDEFINED)))
}

fn report_rejection(promise: Promise, wrap: fn(String) -> SlideshowError) {
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            warn!("{}", wrap(describe(&e)));
        }
    });
}

/// `setInterval`-backed timers. Ticks are delivered through a weak reference to the slideshow.
pub struct WebTimers {
    window: Window,
    target: Weak<RefCell<WebSlideshow>>,
}

impl WebTimers {
    fn bind(&mut self, target: Weak<RefCell<WebSlideshow>>) {
        self.target = target;
    }
}

impl TimerDriver for WebTimers {
    fn start_interval(&mut self, kind: TimerKind, period_ms: u32) -> Option<TimerHandle> {
        let target = self.target.clone();
        let tick = Closure::<dyn FnMut()>::new(move || {
            let Some(shared) = target.upgrade() else {
                return;
            };
            // A tick queued behind a running handler is dropped; the next one catches up.
            match shared.try_borrow_mut() {
                Ok(mut slideshow) => slideshow.on_timer(kind),
                Err(_) => debug!("{:?} tick skipped: slideshow busy", kind),
            };
        })
        .into_js_value();
        let period = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(tick.unchecked_ref(), period)
        {
            Ok(id) => Some(TimerHandle::new(id)),
            Err(e) => {
                error!("setInterval failed for {:?}: {}", kind, describe(&e));
                None
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.window.clear_interval_with_handle(handle.id());
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_millis(js_sys::Date::now())
    }
}

// -------------------------------------------------------------------------
// Mounting
// -------------------------------------------------------------------------

fn by_id(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SlideshowError::MissingElement(format!("#{}", id)))
}

fn dom_error(e: JsValue) -> SlideshowError {
    SlideshowError::Dom(describe(&e))
}

/// Create one indicator button per slide inside the dots container.
fn build_dots(document: &Document, container: &Element, ids: &DomIds, count: usize) -> Result<Vec<Element>> {
    let mut dots = Vec::with_capacity(count);
    for i in 0..count {
        let button = document.create_element("button").map_err(dom_error)?;
        for (name, value) in [
            ("type", "button"),
            ("role", "tab"),
            ("aria-controls", ids.slides.as_str()),
        ] {
            button.set_attribute(name, value).map_err(dom_error)?;
        }
        button
            .set_attribute("title", &format!("Slide {}", i + 1))
            .map_err(dom_error)?;
        container.append_child(&button).map_err(dom_error)?;
        dots.push(button);
    }
    Ok(dots)
}

/// Find the slideshow markup, build the controller, wire events and render.
pub fn mount(mut config: SlideshowConfig) -> Result<Shared> {
    let window = web_sys::window().ok_or_else(|| SlideshowError::MissingElement("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| SlideshowError::MissingElement("document".into()))?;
    let ids = config.dom.clone();

    let slides_el = by_id(&document, &ids.slides)?;
    let slide_nodes = slides_el.query_selector_all(".slide").map_err(dom_error)?;
    let slides: Vec<Element> = (0..slide_nodes.length())
        .filter_map(|i| slide_nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    if slides.is_empty() {
        return Err(SlideshowError::MissingElement(format!("#{} .slide", ids.slides)));
    }
    config.slide_count = slides.len();
    if config.video_slide.map_or(false, |v| v >= slides.len()) {
        warn!("video slide {:?} not present; video handling disabled", config.video_slide);
        config.video_slide = None;
    }

    let dots_el = by_id(&document, &ids.dots)?;
    let dots = build_dots(&document, &dots_el, &ids, slides.len())?;
    let progress_bar: HtmlElement = by_id(&document, &ids.progress_bar)?
        .dyn_into()
        .map_err(|_| SlideshowError::MissingElement(format!("#{} is not an HTML element", ids.progress_bar)))?;
    let view = DomView {
        slides,
        dots: dots.clone(),
        counter: by_id(&document, &ids.counter)?,
        progress_bar,
        play_button: by_id(&document, &ids.play_button)?,
    };

    let video = document
        .get_element_by_id(&ids.video)
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());
    let media = video.clone().map(|video| WebMedia { video });

    let fullscreen = WebFullscreen {
        document: document.clone(),
        root: by_id(&document, &ids.presentation)?,
    };
    let timers = WebTimers {
        window: window.clone(),
        target: Weak::new(),
    };

    let slideshow = Slideshow::new(config, view, media, fullscreen, timers)?;
    let shared: Shared = Rc::new(RefCell::new(slideshow));
    shared.borrow_mut().timers_mut().bind(Rc::downgrade(&shared));

    for (i, dot) in dots.iter().enumerate() {
        listen(dot, "click", &shared, false, move |s, _: Event| s.go_to(i as i64))?;
    }
    listen(&by_id(&document, &ids.prev_button)?, "click", &shared, false, |s, _: Event| s.prev())?;
    listen(&by_id(&document, &ids.next_button)?, "click", &shared, false, |s, _: Event| s.next())?;
    listen(&by_id(&document, &ids.play_button)?, "click", &shared, false, |s, _: Event| {
        s.toggle_autoplay()
    })?;
    listen(&by_id(&document, &ids.fullscreen_button)?, "click", &shared, false, |s, _: Event| {
        s.toggle_fullscreen()
    })?;
    listen(&slides_el, "dblclick", &shared, false, |s, _: Event| s.toggle_fullscreen())?;

    listen(&window, "keydown", &shared, false, |s, event: KeyboardEvent| {
        let key = Key::from_dom(&event.key());
        if s.key_down(key, event.default_prevented()) {
            event.prevent_default();
        }
    })?;

    listen(&slides_el, "touchstart", &shared, true, |s, event: TouchEvent| {
        let list = event.touches();
        let touches: Vec<TouchPoint> = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| TouchPoint::new(f64::from(t.client_x()), f64::from(t.client_y())))
            .collect();
        s.touch_start(&touches);
    })?;
    listen(&slides_el, "touchend", &shared, false, |s, event: TouchEvent| {
        if let Some(t) = event.changed_touches().get(0) {
            s.touch_end(TouchPoint::new(f64::from(t.client_x()), f64::from(t.client_y())));
        }
    })?;

    if let Some(video) = &video {
        listen(video, "ended", &shared, false, |s, _: Event| s.video_ended())?;
    }

    shared.borrow_mut().init();
    Ok(shared)
}

/// Attach a listener that borrows the slideshow for the duration of one event.
fn listen<E>(
    target: &EventTarget,
    name: &'static str,
    shared: &Shared,
    passive: bool,
    mut handler: impl FnMut(&mut WebSlideshow, E) + 'static,
) -> Result<()>
where
    E: JsCast + 'static,
{
    let weak = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut slideshow) = shared.try_borrow_mut() else {
            warn!("dropping re-entrant {} event", name);
            return;
        };
        match event.dyn_into::<E>() {
            Ok(event) => handler(&mut slideshow, event),
            Err(_) => debug!("unexpected event type for {}", name),
        }
    });
    let result = if passive {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            callback.as_ref().unchecked_ref(),
            &options,
        )
    } else {
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
    };
    result.map_err(dom_error)?;
    callback.forget();
    Ok(())
}
