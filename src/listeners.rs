//! Document-level listeners used to dismiss the open popover.
//!
//! A [DismissSubscription] attaches a pointer-down and a key-down listener to
//! a [Document] and detaches them when dropped, so the listeners can only
//! outlive the open popover by leaking the subscription.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

/// The kinds of document-level listener the date filter attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Fires when a pointer is pressed anywhere in the document.
    PointerDown,
    /// Fires when a key is pressed anywhere in the document.
    KeyDown,
}

/// Where a pointer-down event landed, relative to the date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerTarget {
    /// The button that opens and closes the popover.
    Trigger,
    /// Anywhere inside the popover.
    Popover,
    /// Anywhere else in the document.
    Outside,
}

/// A document-level event, stamped with the order it was dispatched in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEvent {
    sequence: u64,
    kind: DocumentEventKind,
}

/// What happened in a [DocumentEvent].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEventKind {
    /// A pointer was pressed on `target`.
    PointerDown(PointerTarget),
    /// The key named `key` was pressed, e.g. "Escape".
    KeyDown(String),
}

impl DocumentEvent {
    /// What happened.
    pub fn kind(&self) -> &DocumentEventKind {
        &self.kind
    }

    fn listener_kind(&self) -> ListenerKind {
        match self.kind {
            DocumentEventKind::PointerDown(_) => ListenerKind::PointerDown,
            DocumentEventKind::KeyDown(_) => ListenerKind::KeyDown,
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    sequence: u64,
    listeners: BTreeMap<u64, Listener>,
}

#[derive(Debug)]
struct Listener {
    kind: ListenerKind,
    attached_during: u64,
}

/// The registry of document-level listeners.
///
/// Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    /// Create an empty document with no listeners attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new event so listeners can tell which events happened after they were attached.
    pub fn dispatch(&self, kind: DocumentEventKind) -> DocumentEvent {
        let mut registry = self.registry.borrow_mut();
        registry.sequence += 1;

        DocumentEvent {
            sequence: registry.sequence,
            kind,
        }
    }

    /// Attach the pointer-down and key-down listeners used to dismiss a popover.
    ///
    /// The listeners ignore the event that is being dispatched while they are
    /// attached, so the click that opens a popover cannot also close it.
    pub fn subscribe_dismiss(&self) -> DismissSubscription {
        let ids = [ListenerKind::PointerDown, ListenerKind::KeyDown].map(|kind| self.attach(kind));
        tracing::debug!("attached dismiss listeners {ids:?}");

        DismissSubscription {
            document: self.clone(),
            ids,
        }
    }

    /// The number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// The number of listeners of `kind` currently attached.
    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    fn attach(&self, kind: ListenerKind) -> u64 {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;

        let attached_during = registry.sequence;
        registry.listeners.insert(
            id,
            Listener {
                kind,
                attached_during,
            },
        );

        id
    }

    fn detach(&self, id: u64) {
        self.registry.borrow_mut().listeners.remove(&id);
    }

    fn receives(&self, id: u64, event: &DocumentEvent) -> bool {
        self.registry
            .borrow()
            .listeners
            .get(&id)
            .is_some_and(|listener| {
                listener.kind == event.listener_kind() && event.sequence > listener.attached_during
            })
    }
}

/// The pointer-down and key-down listeners of an open popover.
///
/// Dropping the subscription detaches both listeners.
#[derive(Debug)]
pub struct DismissSubscription {
    document: Document,
    ids: [u64; 2],
}

impl DismissSubscription {
    /// Whether `event` should dismiss the popover this subscription belongs to.
    ///
    /// Presses inside the popover or on its trigger button, keys other than
    /// Escape, and the event during which the subscription was attached never
    /// dismiss.
    pub fn should_dismiss(&self, event: &DocumentEvent) -> bool {
        let received = self
            .ids
            .iter()
            .any(|&id| self.document.receives(id, event));

        received
            && match event.kind() {
                DocumentEventKind::PointerDown(target) => *target == PointerTarget::Outside,
                DocumentEventKind::KeyDown(key) => key == "Escape",
            }
    }
}

impl Drop for DismissSubscription {
    fn drop(&mut self) {
        for id in self.ids {
            self.document.detach(id);
        }
        tracing::debug!("detached dismiss listeners {:?}", self.ids);
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentEventKind, ListenerKind, PointerTarget};

    #[test]
    fn subscription_attaches_one_listener_of_each_kind() {
        let document = Document::new();
        let _subscription = document.subscribe_dismiss();

        assert_eq!(document.listener_count(), 2);
        assert_eq!(document.listener_count_of(ListenerKind::PointerDown), 1);
        assert_eq!(document.listener_count_of(ListenerKind::KeyDown), 1);
    }

    #[test]
    fn dropping_subscription_detaches_listeners() {
        let document = Document::new();
        let subscription = document.subscribe_dismiss();

        drop(subscription);

        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn ignores_event_it_was_attached_during() {
        let document = Document::new();
        let opening_click = document.dispatch(DocumentEventKind::PointerDown(PointerTarget::Outside));
        let subscription = document.subscribe_dismiss();

        assert!(!subscription.should_dismiss(&opening_click));

        let later_click = document.dispatch(DocumentEventKind::PointerDown(PointerTarget::Outside));
        assert!(subscription.should_dismiss(&later_click));
    }

    #[test]
    fn only_outside_presses_and_escape_dismiss() {
        let document = Document::new();
        let subscription = document.subscribe_dismiss();

        let inside = document.dispatch(DocumentEventKind::PointerDown(PointerTarget::Popover));
        let trigger = document.dispatch(DocumentEventKind::PointerDown(PointerTarget::Trigger));
        let enter = document.dispatch(DocumentEventKind::KeyDown("Enter".to_owned()));
        let escape = document.dispatch(DocumentEventKind::KeyDown("Escape".to_owned()));

        assert!(!subscription.should_dismiss(&inside));
        assert!(!subscription.should_dismiss(&trigger));
        assert!(!subscription.should_dismiss(&enter));
        assert!(subscription.should_dismiss(&escape));
    }

    #[test]
    fn subscriptions_are_independent() {
        let document = Document::new();
        let first = document.subscribe_dismiss();
        let second = document.subscribe_dismiss();

        drop(first);

        assert_eq!(document.listener_count(), 2);
        let escape = document.dispatch(DocumentEventKind::KeyDown("Escape".to_owned()));
        assert!(second.should_dismiss(&escape));
    }
}
