use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// A pointer event in scene coordinates, as consumed by the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    DoubleClick(Pos2),
}

/// Everything the canvas reacts to during one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    KeyDown { key: Key, modifiers: Modifiers },
}

/// Converts raw egui input into [`InputEvent`]s relative to the canvas.
///
/// Only the primary button is tracked. A press counts only if it lands on the
/// canvas; once it does, the matching release is reported wherever it happens.
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    press_in_canvas: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            press_in_canvas: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Screen position to scene position.
    pub fn to_scene(&self, screen: Pos2) -> Pos2 {
        screen - self.canvas_rect.min.to_vec2()
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// `canvas_hovered` tells whether the canvas is the topmost thing under the
    /// pointer; presses over other widgets are ignored.
    pub fn process_input(&mut self, ctx: &Context, canvas_hovered: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pos = input.pointer.hover_pos().or(self.last_pointer_pos);

            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::Pointer(PointerEvent::Move(self.to_scene(pos))));
                }
                self.last_pointer_pos = Some(pos);
            }

            if let Some(pos) = pos {
                let scene = self.to_scene(pos);
                if input.pointer.button_pressed(PointerButton::Primary)
                    && canvas_hovered
                    && self.canvas_rect.contains(pos)
                {
                    self.press_in_canvas = true;
                    events.push(InputEvent::Pointer(PointerEvent::Down(scene)));
                }
                if input.pointer.button_released(PointerButton::Primary) && self.press_in_canvas {
                    self.press_in_canvas = false;
                    events.push(InputEvent::Pointer(PointerEvent::Up(scene)));
                }
                if input.pointer.button_double_clicked(PointerButton::Primary)
                    && canvas_hovered
                    && self.canvas_rect.contains(pos)
                {
                    events.push(InputEvent::Pointer(PointerEvent::DoubleClick(scene)));
                }
            }

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_to_scene_is_relative_to_canvas() {
        let handler = InputHandler::new(Rect::from_min_max(pos2(10.0, 40.0), pos2(500.0, 400.0)));
        assert_eq!(handler.to_scene(pos2(110.0, 140.0)), pos2(100.0, 100.0));
    }
}
