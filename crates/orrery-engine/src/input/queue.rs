/// Input event types the engine understands.
/// Pointer coordinates are in CSS pixels relative to the canvas' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel scrolled. Positive `delta_y` scrolls down (zoom out).
    Wheel { delta_y: f32 },
    /// A completed click (down + up) at (x, y).
    Click { x: f32, y: f32 },
    /// A double click at (x, y).
    DoubleClick { x: f32, y: f32 },
    /// The canvas was resized to `width × height` CSS pixels.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (buttons, sliders, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events pushed by the page between ticks; the runner drains them once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta_y: -3.0 });
        q.push(InputEvent::PointerUp { x: 12.0, y: 20.0 });
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert!(q.is_empty());
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[1], InputEvent::Wheel { delta_y: -3.0 });
        assert_eq!(events[2], InputEvent::PointerUp { x: 12.0, y: 20.0 });
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let events = q.drain();
        assert_eq!(events.len(), 1);
        match events[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!(a, 1.5);
                assert_eq!(b, 2.5);
                assert_eq!(c, 3.5);
            }
            _ => panic!("Expected Custom event"),
        }
    }
}
