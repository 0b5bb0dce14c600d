// What the hand is doing this frame, independent of where the answer came from
// (landmark detector subprocess or the mouse).
use crate::types::Point;

/// Extension state of each finger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fingers {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl Fingers {
    /// Only the pointer finger matters for drawing; middle must be down.
    pub fn is_drawing(self) -> bool {
        self.index && !self.middle
    }
}

/// Per-frame gesture snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandReading {
    #[default]
    NotDetected,
    Detected { fingertip: Point, fingers: Fingers },
}

/// Mouse stand-in for a hand: left button draws, right button selects, no button idles.
pub fn pointer_reading(pos: Option<Point>, left: bool, right: bool) -> HandReading {
    let Some(fingertip) = pos else {
        return HandReading::NotDetected;
    };
    let fingers = if left {
        Fingers { index: true, ..Fingers::default() }
    } else if right {
        Fingers { index: true, middle: true, ..Fingers::default() }
    } else {
        Fingers::default()
    };
    HandReading::Detected { fingertip, fingers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_needs_middle_down() {
        assert!(Fingers { index: true, ..Fingers::default() }.is_drawing());
        assert!(!Fingers { index: true, middle: true, ..Fingers::default() }.is_drawing());
        assert!(!Fingers::default().is_drawing());
    }

    #[test]
    fn pointer_buttons_map_to_gestures() {
        let p = Some(Point::new(3, 4));
        assert_eq!(pointer_reading(None, true, false), HandReading::NotDetected);
        match pointer_reading(p, true, false) {
            HandReading::Detected { fingertip, fingers } => {
                assert_eq!(fingertip, Point::new(3, 4));
                assert!(fingers.is_drawing());
            }
            other => panic!("unexpected {other:?}"),
        }
        match pointer_reading(p, false, true) {
            HandReading::Detected { fingers, .. } => assert!(fingers.index && fingers.middle),
            other => panic!("unexpected {other:?}"),
        }
        match pointer_reading(p, false, false) {
            HandReading::Detected { fingers, .. } => assert_eq!(fingers, Fingers::default()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
