use std::cell::RefCell;
use std::rc::Rc;

/// Shared slot for a self-scheduling callback. The callback keeps a clone to
/// re-arm itself, so the cycle stays alive until someone calls `clear`.
pub struct TickCell<C>(Rc<RefCell<Option<C>>>);

impl<C> Clone for TickCell<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C> Default for TickCell<C> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<C> TickCell<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, callback: C) {
        *self.0.borrow_mut() = Some(callback);
    }

    /// Run `f` against the stored callback; `None` once cleared.
    pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.0.borrow().as_ref().map(f)
    }

    /// Drop the callback (and everything it captured). Returns whether one
    /// was stored. A callback already mid-borrow is left for its own exit.
    pub fn clear(&self) -> bool {
        let taken = match self.0.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => return false,
        };
        taken.is_some()
    }
}
