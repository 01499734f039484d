/// Which card a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSlot {
    /// The active, front-most card
    Front,
    /// The next card peeking out behind; always inert
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down,
    Up,
    Leave,
    DragStart,
    /// Offset (px) from the press origin and current velocity (px/s)
    DragMove { offset_x: f32, velocity_x: f32 },
    DragEnd { offset_x: f32, velocity_x: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInput {
    pub slot: CardSlot,
    pub event: PointerEvent,
}

impl GestureInput {
    pub fn front(event: PointerEvent) -> Self {
        Self {
            slot: CardSlot::Front,
            event,
        }
    }

    pub fn back(event: PointerEvent) -> Self {
        Self {
            slot: CardSlot::Back,
            event,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Visit: open the project, then advance
    Right,
    /// Skip: advance only
    Left,
}
