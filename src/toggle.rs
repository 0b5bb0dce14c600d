// Show/hide state of the three panels, guarded by one shared cooldown.
// Hovering a toggle button flips its panel once; after that every trigger
// (all three toggles and Save) stays dead until the cooldown runs out, so a
// fingertip resting on a button does not make the panel flicker.
use crate::region::Region;
use crate::types::Point;
use tracing::info;

/// Frames every trigger stays blocked after one fires.
pub const DEBOUNCE_FRAMES: u32 = 10;
/// Cooldown at start-up, so a hand already in view does not toggle anything.
pub const STARTUP_COOLDOWN: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Board,
    Colors,
    PenSizes,
}

impl Panel {
    /// Button label while the panel is hidden.
    pub fn show_label(self) -> &'static str {
        match self {
            Panel::Board => "Board",
            Panel::Colors => "Colors",
            Panel::PenSizes => "Pen",
        }
    }

    /// Button label while the panel is shown.
    pub fn hide_label(self) -> &'static str {
        "Hide"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleController {
    board_visible: bool,
    colors_visible: bool,
    pen_sizes_visible: bool,
    cooling: u32,
}

impl Default for ToggleController {
    fn default() -> Self {
        Self::new(STARTUP_COOLDOWN)
    }
}

impl ToggleController {
    /// All panels hidden, cooldown preset to `cooling` frames.
    pub fn new(cooling: u32) -> Self {
        Self { board_visible: false, colors_visible: false, pen_sizes_visible: false, cooling }
    }

    /// Once per frame.
    pub fn tick(&mut self) {
        self.cooling = self.cooling.saturating_sub(1);
    }

    #[cfg(test)]
    pub fn cooling(&self) -> u32 {
        self.cooling
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Board => self.board_visible,
            Panel::Colors => self.colors_visible,
            Panel::PenSizes => self.pen_sizes_visible,
        }
    }

    fn flag_mut(&mut self, panel: Panel) -> &mut bool {
        match panel {
            Panel::Board => &mut self.board_visible,
            Panel::Colors => &mut self.colors_visible,
            Panel::PenSizes => &mut self.pen_sizes_visible,
        }
    }

    /// Fire `trigger` if the pointer is on it and the cooldown is over.
    /// The button is highlighted only on the frame it fires.
    pub fn try_trigger(&mut self, trigger: &mut Region, pointer: Point) -> bool {
        let fired = trigger.hit(pointer) && self.cooling == 0;
        if fired {
            self.cooling = DEBOUNCE_FRAMES;
        }
        trigger.highlight(fired);
        fired
    }

    /// Flip `panel` through its button and relabel the button for the new state.
    pub fn try_toggle(&mut self, panel: Panel, button: &mut Region, pointer: Point) -> bool {
        if !self.try_trigger(button, pointer) {
            return false;
        }
        let flag = self.flag_mut(panel);
        *flag = !*flag;
        let visible = *flag;
        button.label = if visible { panel.hide_label() } else { panel.show_label() }.to_string();
        info!(?panel, visible, "panel toggled");
        true
    }
}
