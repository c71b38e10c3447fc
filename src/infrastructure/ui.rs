use leptos::{ReadSignal, RwSignal, SignalGet, SignalSet, create_effect, create_rw_signal};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::application::StatusIndicator;
use crate::domain::{
    errors::{AppResult, UiError},
    logging::LogComponent,
};
use crate::log_warn;

/// Class that reveals the status label
pub const VISIBLE_CLASS: &str = "in";

pub fn browser_document() -> AppResult<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| UiError::WindowUnavailable.into())
}

/// First element matching `selector`
pub fn query_element(document: &Document, selector: &str) -> AppResult<Element> {
    document
        .query_selector(selector)
        .map_err(|e| UiError::DomOperation(format!("bad selector {selector}: {e:?}")))?
        .ok_or_else(|| UiError::ElementNotFound(selector.to_string()).into())
}

/// Status label and display fragment driven by Leptos signals
#[derive(Clone, Copy)]
pub struct DomStatusIndicator {
    visible: RwSignal<bool>,
    display_html: RwSignal<Option<String>>,
}

impl DomStatusIndicator {
    pub fn bind(label: Element, display: Element) -> AppResult<Self> {
        let label = label
            .dyn_into::<HtmlElement>()
            .map_err(|_| UiError::DomOperation("status label is not an HTML element".to_string()))?;

        let visible = create_rw_signal(false);
        let display_html = create_rw_signal(None::<String>);

        create_effect(move |_| toggle_status_label(&label, visible.get()));
        create_effect(move |_| {
            if let Some(html) = display_html.get() {
                display.set_inner_html(&html);
            }
        });

        Ok(Self { visible, display_html })
    }

    pub fn visible(&self) -> ReadSignal<bool> {
        self.visible.read_only()
    }
}

impl StatusIndicator for DomStatusIndicator {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn replace_display(&self, html: &str) {
        self.display_html.set(Some(html.to_string()));
    }
}

fn toggle_status_label(label: &HtmlElement, show: bool) {
    // reading layout forces a reflow so the CSS fade restarts
    let _ = label.offset_width();
    if let Err(e) = label.class_list().toggle_with_force(VISIBLE_CLASS, show) {
        log_warn!(LogComponent::Infrastructure("UI"), "status label toggle failed: {:?}", e);
    }
}
