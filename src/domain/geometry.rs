/// Margin kept between a floating menu and the body edges / its trigger.
pub const PADDING: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Trigger box; `relative` is its origin in the scroll container's coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetBox {
    pub width: f64,
    pub height: f64,
    pub relative: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    pub body: Size,
    pub target: TargetBox,
    pub element: Size,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionEngine {
    pub padding: f64,
}

impl Default for PositionEngine {
    fn default() -> Self {
        Self { padding: PADDING }
    }
}

impl PositionEngine {
    pub fn new(padding: f64) -> Self {
        Self { padding }
    }

    /// Centers the menu on its trigger, kept `padding` inside the body.
    /// The outer `max` wins when the body is too narrow, pinning the menu left.
    pub fn compute_x(&self, measurement: &Measurement) -> f64 {
        let padding = self.padding;
        let pinned = measurement.target.relative.x + measurement.target.width / 2.0
            - measurement.element.width / 2.0;
        let right_limit = measurement.body.width - measurement.element.width - padding;
        padding.max(right_limit.min(pinned))
    }

    /// Directly above the trigger. The top edge is not clamped.
    pub fn compute_y(&self, measurement: &Measurement) -> f64 {
        measurement.target.relative.y - measurement.element.height - self.padding
    }

    pub fn compute(&self, measurement: &Measurement) -> Point {
        Point {
            x: self.compute_x(measurement),
            y: self.compute_y(measurement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute_x(measurement: &Measurement) -> f64 {
        PositionEngine::default().compute_x(measurement)
    }

    fn compute_y(measurement: &Measurement) -> f64 {
        PositionEngine::default().compute_y(measurement)
    }

    fn measurement(
        body_width: f64,
        element_width: f64,
        target_x: f64,
        target_width: f64,
    ) -> Measurement {
        Measurement {
            body: Size {
                width: body_width,
                height: 600.0,
            },
            target: TargetBox {
                width: target_width,
                height: 30.0,
                relative: Point { x: target_x, y: 500.0 },
            },
            element: Size {
                width: element_width,
                height: 120.0,
            },
        }
    }

    #[test]
    fn x_pins_to_left_padding_when_centering_overflows() {
        assert_eq!(compute_x(&measurement(800.0, 200.0, 0.0, 40.0)), 10.0);
    }

    #[test]
    fn x_centers_on_trigger_when_room_allows() {
        // 300 + 20 - 100
        assert_eq!(compute_x(&measurement(800.0, 200.0, 300.0, 40.0)), 220.0);
    }

    #[test]
    fn x_clamps_against_right_edge() {
        // 800 - 200 - 10
        assert_eq!(compute_x(&measurement(800.0, 200.0, 760.0, 40.0)), 590.0);
    }

    #[test]
    fn x_is_padding_when_menu_is_wider_than_body() {
        assert_eq!(compute_x(&measurement(150.0, 200.0, 60.0, 40.0)), 10.0);
        assert_eq!(compute_x(&measurement(150.0, 200.0, 0.0, 40.0)), 10.0);
    }

    #[test]
    fn x_stays_inside_the_interval() {
        for target_x in (0..=800).step_by(25) {
            let x = compute_x(&measurement(800.0, 200.0, f64::from(target_x), 40.0));
            assert!((10.0..=590.0).contains(&x), "target_x={target_x} x={x}");
        }
    }

    #[test]
    fn y_sits_above_the_trigger_regardless_of_body() {
        let mut m = measurement(800.0, 200.0, 0.0, 40.0);
        m.target.relative.y = 100.0;
        m.element.height = 50.0;
        assert_eq!(compute_y(&m), 40.0);

        m.body = Size {
            width: 10.0,
            height: 10.0,
        };
        assert_eq!(compute_y(&m), 40.0);
    }

    #[test]
    fn y_goes_negative_near_the_top() {
        let mut m = measurement(800.0, 200.0, 0.0, 40.0);
        m.target.relative.y = 20.0;
        m.element.height = 50.0;
        assert_eq!(compute_y(&m), -40.0);
    }

    #[test]
    fn custom_padding_applies_to_both_axes() {
        let engine = PositionEngine::new(1.0);
        let m = measurement(80.0, 20.0, 0.0, 4.0);
        assert_eq!(engine.compute(&m), Point { x: 1.0, y: 500.0 - 120.0 - 1.0 });
    }
}
