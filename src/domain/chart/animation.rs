use super::value_objects::BarExtent;

pub const TRANSITION_MS: f64 = 250.0;

/// Cubic in-out easing on `[0, 1]`
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolation of one bar between two extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarTween {
    pub from: BarExtent,
    pub to: BarExtent,
}

impl BarTween {
    pub fn new(from: BarExtent, to: BarExtent) -> Self {
        Self { from, to }
    }

    pub fn is_static(&self) -> bool {
        self.from == self.to
    }

    /// Extent `elapsed_ms` into the transition
    pub fn at(&self, elapsed_ms: f64) -> BarExtent {
        if elapsed_ms >= TRANSITION_MS {
            return self.to;
        }
        let t = ease_cubic_in_out(elapsed_ms / TRANSITION_MS);
        BarExtent {
            y: lerp(self.from.y, self.to.y, t),
            height: lerp(self.from.height, self.to.height, t),
            label_y: lerp(self.from.label_y, self.to.label_y, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(4.0), 1.0);
    }

    #[test]
    fn tween_lands_on_target() {
        let tween = BarTween::new(BarExtent::baseline(215.0), BarExtent { y: 15.0, height: 200.0, label_y: 18.0 });
        assert_eq!(tween.at(0.0), BarExtent::baseline(215.0));
        assert_eq!(tween.at(TRANSITION_MS), tween.to);
        let halfway = tween.at(TRANSITION_MS / 2.0);
        assert_eq!(halfway.height, 100.0);
    }
}
