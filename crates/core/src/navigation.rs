//! Navigation input: raw key and swipe events, and the subscription that
//! carries them to an editor.
//!
//! The host UI publishes [`InputEvent`]s on an [`InputHub`]. Each editor
//! holds a [`Subscription`]; dropping it unsubscribes, so a torn-down
//! editor never receives stale input.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Minimum horizontal travel for a touch gesture to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Direction-level navigation understood by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    Previous,
    Next,
    /// Go to the slide at this 0-based position (clamped).
    Jump(usize),
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// Raw input as captured by the host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// A completed touch gesture, from touch-start to touch-end x position.
    Swipe { start_x: f64, end_x: f64 },
    /// A pointer click on a slide thumbnail or page dot.
    Select(usize),
}

impl InputEvent {
    /// Translate a swipe into navigation.
    ///
    /// Swiping left (finger moves towards smaller x) advances.
    pub fn swipe_direction(start_x: f64, end_x: f64) -> Option<NavigationEvent> {
        let diff = start_x - end_x;
        if diff.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        if diff > 0.0 {
            Some(NavigationEvent::Next)
        } else {
            Some(NavigationEvent::Previous)
        }
    }
}

type Queue = RefCell<VecDeque<InputEvent>>;

/// Fan-out point for input events.
#[derive(Debug, Default)]
pub struct InputHub {
    subscribers: RefCell<Vec<Weak<Queue>>>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving events. Events are delivered until the returned
    /// guard is dropped.
    pub fn subscribe(&self) -> Subscription {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        self.subscribers.borrow_mut().push(Rc::downgrade(&queue));
        Subscription { queue }
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&self, event: InputEvent) {
        self.subscribers.borrow_mut().retain(|weak| match weak.upgrade() {
            Some(queue) => {
                queue.borrow_mut().push_back(event);
                true
            }
            None => false,
        });
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// A live registration on an [`InputHub`].
#[derive(Debug)]
pub struct Subscription {
    queue: Rc<Queue>,
}

impl Subscription {
    /// Take all events received since the last drain, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
