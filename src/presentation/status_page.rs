use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::PageTransitionEvent;

use crate::application::StatusPoller;
use crate::domain::{
    chart::{ChartDimensions, ChartUpdater},
    errors::AppResult,
    logging::LogComponent,
    time::TimeProvider,
};
use crate::infrastructure::{
    BrowserTimeProvider, DomStatusIndicator, StatusHttpClient, StatusPageConfig,
    dto::timeline_from_dto,
    rendering::SvgChartSurface,
    ui::{browser_document, query_element},
};
use crate::{log_info, log_warn};

pub type PagePoller = StatusPoller<StatusHttpClient, DomStatusIndicator, SvgChartSurface>;

/// Controller for the stream status page.
///
/// Built once at mount; owns the poller, the refresh timer and the page
/// lifecycle hooks. `pagehide` cancels the timer and `pageshow` re-arms it
/// when the page comes back from the back/forward cache.
pub struct StatusPage {
    poller: Rc<PagePoller>,
    interval_ms: u32,
    interval: RefCell<Option<Interval>>,
    lifecycle: RefCell<Vec<EventListener>>,
}

impl StatusPage {
    pub fn mount(config: StatusPageConfig) -> AppResult<Rc<Self>> {
        let clock = BrowserTimeProvider::new();
        let utc_offset = clock.utc_offset_minutes();

        let document = browser_document()?;
        let display = query_element(&document, &config.display_selector)?;
        let container = query_element(&document, &config.chart_selector)?;
        let label = query_element(&document, &config.label_selector)?;

        let dimensions = ChartDimensions::new(container.client_width().max(0) as u32, config.chart_height);
        let surface = SvgChartSurface::mount(&document, &container, &dimensions)?;
        let chart = ChartUpdater::new(dimensions, surface);
        let indicator = DomStatusIndicator::bind(label, display)?;
        let source = StatusHttpClient::new(config.update_url.clone());
        let poller = Rc::new(StatusPoller::new(source, indicator, chart, Box::new(clock)));

        match timeline_from_dto(&config.timeline_data, utc_offset) {
            Ok(timeline) => {
                poller.render_initial(&timeline)?;
            }
            Err(e) => {
                log_warn!(LogComponent::Presentation("StatusPage"), "initial timeline not drawn: {}", e);
            }
        }

        let page = Rc::new(Self {
            poller,
            interval_ms: config.update_interval_ms,
            interval: RefCell::new(None),
            lifecycle: RefCell::new(Vec::new()),
        });
        page.start();

        log_info!(
            LogComponent::Presentation("StatusPage"),
            "🚀 polling {} every {} ms ({}x{} chart)",
            config.update_url,
            config.update_interval_ms,
            dimensions.width,
            dimensions.height
        );
        Ok(page)
    }

    fn start(self: &Rc<Self>) {
        self.arm_interval();

        let Some(window) = web_sys::window() else {
            return;
        };
        let page: Weak<Self> = Rc::downgrade(self);
        let hide = EventListener::new(&window, "pagehide", move |_| {
            if let Some(page) = page.upgrade() {
                page.on_page_hide();
            }
        });
        let page: Weak<Self> = Rc::downgrade(self);
        let show = EventListener::new(&window, "pageshow", move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|event| event.persisted());
            if let Some(page) = page.upgrade() {
                page.on_page_show(persisted);
            }
        });
        *self.lifecycle.borrow_mut() = vec![hide, show];
    }

    fn arm_interval(&self) {
        let poller = self.poller.clone();
        let interval = Interval::new(self.interval_ms, move || {
            let poller = poller.clone();
            spawn_local(async move {
                let _ = poller.poll_once().await;
            });
        });
        *self.interval.borrow_mut() = Some(interval);
    }

    fn cancel_interval(&self) {
        if let Some(interval) = self.interval.borrow_mut().take() {
            drop(interval);
            log_info!(LogComponent::Presentation("StatusPage"), "polling stopped");
        }
    }

    /// The page is being unloaded or frozen into the back/forward cache
    pub fn on_page_hide(&self) {
        self.cancel_interval();
    }

    /// Resume polling when the page is restored from the back/forward cache
    pub fn on_page_show(&self, persisted: bool) {
        if persisted && !self.is_polling() {
            self.arm_interval();
            log_info!(LogComponent::Presentation("StatusPage"), "polling resumed");
        }
    }

    /// Stop polling and detach the lifecycle hooks
    pub fn stop(&self) {
        self.cancel_interval();
        self.lifecycle.borrow_mut().clear();
    }

    pub fn is_polling(&self) -> bool {
        self.interval.borrow().is_some()
    }

    pub fn poller(&self) -> &Rc<PagePoller> {
        &self.poller
    }
}

/// JavaScript handle keeping the status page alive
#[wasm_bindgen]
pub struct StatusPageHandle {
    page: Rc<StatusPage>,
}

#[wasm_bindgen]
impl StatusPageHandle {
    /// Mount using `window.twitter_stream_status_data`
    pub fn mount() -> Result<StatusPageHandle, JsValue> {
        let config = StatusPageConfig::from_window()?;
        let page = StatusPage::mount(config)?;
        Ok(Self { page })
    }

    /// Mount with an explicit configuration object
    #[wasm_bindgen(js_name = mountWith)]
    pub fn mount_with(config: JsValue) -> Result<StatusPageHandle, JsValue> {
        let config = StatusPageConfig::from_js(&config)?;
        let page = StatusPage::mount(config)?;
        Ok(Self { page })
    }

    pub fn stop(&self) {
        self.page.stop();
    }

    /// Run one poll immediately; resolves to whether the chart was updated
    #[wasm_bindgen(js_name = pollNow)]
    pub fn poll_now(&self) -> js_sys::Promise {
        let poller = self.page.poller().clone();
        future_to_promise(async move {
            let outcome = poller.poll_once().await;
            Ok(JsValue::from_bool(outcome.is_updated()))
        })
    }

    #[wasm_bindgen(getter, js_name = isPolling)]
    pub fn is_polling(&self) -> bool {
        self.page.is_polling()
    }

    #[wasm_bindgen(getter, js_name = barCount)]
    pub fn bar_count(&self) -> usize {
        self.page.poller().chart().bar_count()
    }
}
