// Browser tests for the DOM binding. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use slideshow_core::{init, mount};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"
<div id="presentation">
  <div id="slides">
    <section class="slide">1</section>
    <section class="slide">2</section>
    <section class="slide">3</section>
    <section class="slide">4</section>
    <section class="slide"><video id="videoSlide5" muted playsinline></video></section>
    <section class="slide">6</section>
    <section class="slide">7</section>
  </div>
  <button id="btnPrev"></button>
  <button id="btnNext"></button>
  <button id="btnPlay"></button>
  <button id="btnFullscreen"></button>
  <span id="counter"></span>
  <div id="dots"></div>
  <div id="progressBar"></div>
</div>
"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture() -> Document {
    let document = document();
    document.body().unwrap().set_inner_html(MARKUP);
    document
}

fn by_id(document: &Document, id: &str) -> HtmlElement {
    document
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn slides(document: &Document) -> Vec<Element> {
    let list = document.query_selector_all("#slides .slide").unwrap();
    (0..list.length())
        .map(|i| list.item(i).unwrap().dyn_into::<Element>().unwrap())
        .collect()
}

#[wasm_bindgen_test]
fn mount_renders_first_slide_and_dots() {
    init();
    let document = fixture();
    let handle = mount("{}").unwrap();

    assert_eq!(handle.index(), 0);
    assert_eq!(by_id(&document, "counter").text_content().unwrap(), "1 / 7");
    assert_eq!(by_id(&document, "btnPlay").text_content().unwrap(), "▶");

    let dots = by_id(&document, "dots").children();
    assert_eq!(dots.length(), 7);
    let first = dots.item(0).unwrap();
    assert_eq!(first.get_attribute("aria-selected").as_deref(), Some("true"));
    assert_eq!(first.get_attribute("role").as_deref(), Some("tab"));
    assert_eq!(first.get_attribute("title").as_deref(), Some("Slide 1"));

    let slides = slides(&document);
    assert!(slides[0].class_list().contains("active"));
    assert_eq!(slides[1].get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn buttons_and_dots_navigate() {
    let document = fixture();
    let handle = mount("{}").unwrap();

    by_id(&document, "btnNext").click();
    assert_eq!(handle.index(), 1);
    assert_eq!(by_id(&document, "counter").text_content().unwrap(), "2 / 7");

    by_id(&document, "btnPrev").click();
    by_id(&document, "btnPrev").click();
    assert_eq!(handle.index(), 6);

    let dots = by_id(&document, "dots").children();
    dots.item(2)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    assert_eq!(handle.index(), 2);
    assert!(slides(&document)[2].class_list().contains("active"));
}

#[wasm_bindgen_test]
fn play_button_toggles_autoplay() {
    let document = fixture();
    let handle = mount("{}").unwrap();

    by_id(&document, "btnPlay").click();
    assert_eq!(by_id(&document, "btnPlay").text_content().unwrap(), "⏸");
    assert!(handle.state_json().unwrap().contains("\"autoplay\":true"));

    by_id(&document, "btnPlay").click();
    assert_eq!(by_id(&document, "btnPlay").text_content().unwrap(), "▶");
    assert_eq!(
        by_id(&document, "progressBar").style().get_property_value("width").unwrap(),
        "0%"
    );
}

#[wasm_bindgen_test]
fn keyboard_navigation() {
    let _document = fixture();
    let handle = mount("{}").unwrap();
    let window = web_sys::window().unwrap();

    let press = |key: &str| {
        let init = web_sys::KeyboardEventInit::new();
        init.set_key(key);
        init.set_cancelable(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        window.dispatch_event(&event).unwrap();
        event
    };

    press("End");
    assert_eq!(handle.index(), 6);
    press("Home");
    assert_eq!(handle.index(), 0);
    press("ArrowRight");
    assert_eq!(handle.index(), 1);

    let event = press(" ");
    assert!(event.default_prevented());
    assert!(handle.state_json().unwrap().contains("\"autoplay\":true"));
}

#[wasm_bindgen_test]
fn missing_markup_is_reported() {
    document().body().unwrap().set_inner_html("<div></div>");
    let err = mount("{}").err().unwrap();
    assert!(err.as_string().unwrap().contains("Missing element"));
}
