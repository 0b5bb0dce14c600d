// Where every control sits on the 1280x720 mirrored frame.
use crate::engine::{BRUSH_SIZES, ERASER_COLOR, SizeOption};
use crate::region::Region;
use crate::toggle::Panel;
use crate::types::Color;
use rand::Rng;

pub const FRAME_WIDTH: usize = 1280;
pub const FRAME_HEIGHT: usize = 720;

const BOARD_ALPHA: f32 = 0.6;

/// Every on-screen control. Built once; only labels and alphas change afterwards.
#[derive(Clone, Debug)]
pub struct Controls {
    pub board_button: Region,
    pub colors_button: Region,
    pub pen_button: Region,
    pub save_button: Region,
    pub board: Region,
    pub swatches: Vec<Region>,
    pub clear: Region,
    pub pen_sizes: Vec<SizeOption>,
}

impl Controls {
    /// Standard layout; the first swatch gets a random colour from `rng`.
    pub fn standard(rng: &mut impl Rng) -> Self {
        let random = Color::new(rng.random(), rng.random(), rng.random());
        let swatch_colors = [
            random,
            Color::new(255, 0, 0),
            Color::new(0, 0, 255),
            Color::new(0, 255, 0),
            Color::new(255, 255, 0),
        ];
        let mut swatches: Vec<Region> = swatch_colors
            .iter()
            .enumerate()
            .map(|(i, &c)| Region::new(300 + 100 * i as i32, 0, 100, 100, c))
            .collect();
        swatches.push(Region::new(800, 0, 100, 100, ERASER_COLOR).with_label("Eraser"));

        let pen_sizes = BRUSH_SIZES
            .iter()
            .enumerate()
            .map(|(i, &width)| SizeOption {
                button: Region::new(1100, 50 + 100 * i as i32, 100, 100, Color::new(50, 50, 50))
                    .with_label(width.to_string()),
                width,
            })
            .collect();

        Self {
            board_button: Region::new(50, 0, 100, 100, Color::new(0, 255, 255))
                .with_label(Panel::Board.show_label()),
            colors_button: Region::new(200, 0, 100, 100, Color::new(0, 255, 120))
                .with_label(Panel::Colors.show_label()),
            pen_button: Region::new(1100, 0, 100, 50, Color::new(0, 0, 255))
                .with_label(Panel::PenSizes.show_label()),
            save_button: Region::new(1100, 600, 100, 70, Color::new(70, 200, 70)).with_label("Save"),
            board: Region::new(50, 120, 1020, 580, Color::WHITE).with_alpha(BOARD_ALPHA),
            swatches,
            clear: Region::new(900, 0, 100, 100, Color::new(100, 100, 100)).with_label("Clear"),
            pen_sizes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_buttons(c: &Controls) -> Vec<&Region> {
        let mut v = vec![&c.board_button, &c.colors_button, &c.pen_button, &c.save_button, &c.clear];
        v.extend(c.swatches.iter());
        v.extend(c.pen_sizes.iter().map(|o| &o.button));
        v
    }

    #[test]
    fn everything_fits_the_frame() {
        let c = Controls::standard(&mut StdRng::seed_from_u64(7));
        for r in all_buttons(&c).into_iter().chain([&c.board]) {
            assert!(r.x >= 0 && r.y >= 0);
            assert!(r.x + r.w <= FRAME_WIDTH as i32 && r.y + r.h <= FRAME_HEIGHT as i32, "{r:?}");
        }
    }

    #[test]
    fn no_button_overlaps_the_board() {
        let c = Controls::standard(&mut StdRng::seed_from_u64(7));
        for r in all_buttons(&c) {
            let centre = Point::new(r.x + r.w / 2, r.y + r.h / 2);
            assert!(!c.board.hit(centre), "{} sits on the board", r.label);
        }
    }

    #[test]
    fn last_swatch_is_the_eraser() {
        let c = Controls::standard(&mut StdRng::seed_from_u64(1));
        assert_eq!(c.swatches.len(), 6);
        assert_eq!(c.swatches[5].color, ERASER_COLOR);
        assert_eq!(c.pen_sizes.iter().map(|o| o.width).collect::<Vec<_>>(), vec![5, 10, 15, 20]);
        assert_eq!(c.pen_sizes[3].button.label, "20");
    }
}
