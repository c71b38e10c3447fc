use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Element;

use crate::domain::chart::{BarExtent, BarTween, TRANSITION_MS};
use crate::domain::logging::LogComponent;
use crate::log_warn;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A bar moving towards its new extent
pub struct ActiveTween {
    pub rect: Element,
    pub label: Element,
    /// Extent currently on screen, shared with the bar handle
    pub shown: Rc<Cell<BarExtent>>,
    pub tween: BarTween,
}

impl ActiveTween {
    fn apply(&self, extent: BarExtent) {
        let written = self
            .rect
            .set_attribute("y", &extent.y.to_string())
            .and_then(|_| self.rect.set_attribute("height", &extent.height.max(0.0).to_string()))
            .and_then(|_| self.label.set_attribute("y", &extent.label_y.to_string()));
        if let Err(e) = written {
            log_warn!(LogComponent::Infrastructure("TransitionDriver"), "bar tween write failed: {:?}", e);
        }
        self.shown.set(extent);
    }
}

/// Runs bar tweens on `requestAnimationFrame`.
///
/// Starting a new batch supersedes the running one; the superseded loop
/// stops on its next frame and the new batch continues from whatever
/// extent is on screen.
#[derive(Default)]
pub struct TransitionDriver {
    generation: Rc<Cell<u64>>,
}

impl TransitionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, tweens: Vec<ActiveTween>) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let tweens: Vec<ActiveTween> = tweens.into_iter().filter(|t| !t.tween.is_static()).collect();
        if tweens.is_empty() {
            return;
        }
        if web_sys::window().is_none() {
            tweens.iter().for_each(|t| t.apply(t.tween.to));
            return;
        }

        let current = self.generation.clone();
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let self_ref = frame.clone();
        let mut started_at: Option<f64> = None;

        *frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if current.get() != generation {
                self_ref.borrow_mut().take();
                return;
            }
            let elapsed = timestamp - *started_at.get_or_insert(timestamp);
            for tween in &tweens {
                tween.apply(tween.tween.at(elapsed));
            }
            if elapsed >= TRANSITION_MS {
                self_ref.borrow_mut().take();
                return;
            }
            request_frame(&self_ref);
        }));

        request_frame(&frame);
    }
}

fn request_frame(frame: &FrameCallback) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(callback) = frame.borrow().as_ref() {
        if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            log_warn!(LogComponent::Infrastructure("TransitionDriver"), "requestAnimationFrame failed: {:?}", e);
        }
    }
}
