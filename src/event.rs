//! Event model: DOM events the behaviors listen for, and intersection entries.

use crate::page::NodeId;

/// A keyboard key as reported by `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// The event types a listener can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Submit,
    Scroll,
    Resize,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }

    /// Whether the event propagates from its target up to the document.
    #[must_use]
    pub fn bubbles(self) -> bool {
        matches!(self, Self::Click | Self::KeyDown | Self::Submit)
    }
}

/// A DOM event delivered to a behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click {
        target: NodeId,
        /// Pointer position in viewport coordinates.
        client_x: f64,
        client_y: f64,
    },
    KeyDown {
        key: Key,
    },
    Submit {
        form: NodeId,
    },
    Scroll,
    Resize,
    MouseEnter {
        target: NodeId,
    },
    MouseLeave {
        target: NodeId,
    },
}

impl PageEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Submit { .. } => EventKind::Submit,
            Self::Scroll => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
            Self::MouseEnter { .. } => EventKind::MouseEnter,
            Self::MouseLeave { .. } => EventKind::MouseLeave,
        }
    }

    /// The element the event originated on; `None` for window events and key presses.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Click { target, .. } | Self::MouseEnter { target } | Self::MouseLeave { target } => Some(*target),
            Self::Submit { form } => Some(*form),
            Self::KeyDown { .. } | Self::Scroll | Self::Resize => None,
        }
    }
}

/// Options for an intersection observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// Bottom root margin in pixels; negative values shrink the viewport.
    pub root_margin_bottom_px: f64,
}

impl ObserverOptions {
    #[must_use]
    pub fn threshold(threshold: f64) -> Self {
        Self { threshold, root_margin_bottom_px: 0.0 }
    }

    /// The `rootMargin` string passed to `IntersectionObserver`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.root_margin_bottom_px)
    }
}

/// One observation reported to the behavior that owns the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub ratio: f64,
}
