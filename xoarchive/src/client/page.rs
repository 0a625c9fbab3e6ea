//! Page-level side effects owned by client components.
//!
//! The viewer suspends page scrolling and the date filter listens for clicks
//! outside itself. Both are acquired as guards that release on drop, so the
//! effect lives exactly as long as the component state that needs it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Value of the body's `overflow` style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Auto,
    Scroll,
    Other(String),
}

/// Handle of a registered outside-click listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The hosting page, as far as client components need it.
pub trait PageHost: Send + Sync {
    fn body_overflow(&self) -> Overflow;
    fn set_body_overflow(&self, overflow: Overflow);
    fn add_outside_click_listener(&self) -> ListenerId;
    fn remove_outside_click_listener(&self, id: ListenerId);
}

/// Suspends page scrolling until dropped, then restores the previous value.
pub struct ScrollLock {
    page: Arc<dyn PageHost>,
    original: Overflow,
}

impl ScrollLock {
    pub fn acquire(page: Arc<dyn PageHost>) -> Self {
        let original = page.body_overflow();
        page.set_body_overflow(Overflow::Hidden);
        Self { page, original }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.page.set_body_overflow(self.original.clone());
    }
}

/// Outside-click listener registration, removed on drop.
pub struct OutsideClickListener {
    page: Arc<dyn PageHost>,
    id: ListenerId,
}

impl OutsideClickListener {
    pub fn register(page: Arc<dyn PageHost>) -> Self {
        let id = page.add_outside_click_listener();
        Self { page, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for OutsideClickListener {
    fn drop(&mut self) {
        self.page.remove_outside_click_listener(self.id);
    }
}

/// In-memory page for headless embedding and tests.
#[derive(Debug)]
pub struct MemoryPage {
    overflow: Mutex<Overflow>,
    listeners: Mutex<Vec<ListenerId>>,
    next_id: AtomicU64,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            overflow: Mutex::new(Overflow::Visible),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of outside-click listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PageHost for MemoryPage {
    fn body_overflow(&self) -> Overflow {
        self.overflow.lock().clone()
    }

    fn set_body_overflow(&self, overflow: Overflow) {
        *self.overflow.lock() = overflow;
    }

    fn add_outside_click_listener(&self) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push(id);
        id
    }

    fn remove_outside_click_listener(&self, id: ListenerId) {
        self.listeners.lock().retain(|l| *l != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_lock_restores_original() {
        let page = Arc::new(MemoryPage::new());
        page.set_body_overflow(Overflow::Auto);
        {
            let _lock = ScrollLock::acquire(page.clone());
            assert_eq!(page.body_overflow(), Overflow::Hidden);
        }
        assert_eq!(page.body_overflow(), Overflow::Auto);
    }

    #[test]
    fn test_listener_removed_on_drop() {
        let page = Arc::new(MemoryPage::new());
        let a = OutsideClickListener::register(page.clone());
        let b = OutsideClickListener::register(page.clone());
        assert_ne!(a.id(), b.id());
        assert_eq!(page.listener_count(), 2);
        drop(a);
        assert_eq!(page.listener_count(), 1);
        drop(b);
        assert_eq!(page.listener_count(), 0);
    }
}
