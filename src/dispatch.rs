use crate::{
    handler::{Handler, HandlerId},
    traits::Notifier,
};
use slog::{debug, o, trace, Discard, Logger};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

struct Registry<E> {
    name: &'static str,
    logger: Logger,
    last_id: HandlerId,
    handlers: BTreeMap<HandlerId, Handler<E>>,
}

impl<E> Registry<E> {
    fn allocate(&mut self) -> HandlerId {
        self.last_id = self.last_id.next();
        self.last_id
    }
}

/// A typed event channel.
///
/// Handlers are closures taking `&E`. They are invoked in registration order, which is the
/// ascending order of their [HandlerId]s.
///
/// `EventDispatch` is a handle: cloning it yields another handle to the same channel. The channel
/// and all of its handlers are dropped together with the last handle. Handlers that need to reach
/// back into their own channel should capture a [WeakDispatch] instead of a clone, otherwise the
/// channel keeps itself alive.
pub struct EventDispatch<E>(Rc<RefCell<Registry<E>>>);

impl<E: 'static> EventDispatch<E> {
    /// Create an unnamed channel.
    pub fn new() -> Self {
        Self::named("unnamed")
    }

    /// Create a channel with a name.
    ///
    /// `name` is used in log records and in the `Debug` output.
    pub fn named(name: &'static str) -> Self {
        Self(Rc::new(RefCell::new(Registry {
            name,
            logger: Logger::root(Discard, o!("channel" => name)),
            last_id: HandlerId::ZERO,
            handlers: BTreeMap::new(),
        })))
    }

    /// Attach a logger to this channel.
    ///
    /// Registrations and removals are logged at debug level, notification rounds and consumed
    /// one-shot handlers at trace level. Every record carries the channel name under `channel`.
    pub fn with_logger(self, logger: Logger) -> Self {
        {
            let mut registry = self.0.borrow_mut();
            registry.logger = logger.new(o!("channel" => registry.name));
        }
        self
    }

    /// Register a handler and return its identifier.
    pub fn add_handler<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&E) + 'static,
    {
        let mut registry = self.0.borrow_mut();
        let id = registry.allocate();
        registry.handlers.insert(id, Rc::new(handler));
        debug!(registry.logger, "handler added"; "id" => id.get());
        id
    }

    /// Register a handler that runs on the next notification only.
    ///
    /// After running, the handler deregisters itself. The returned identifier can be used to
    /// cancel the subscription before it fires.
    pub fn handle_once<F>(&self, handler: F) -> HandlerId
    where
        F: FnOnce(&E) + 'static,
    {
        let channel = Rc::downgrade(&self.0);
        let mut registry = self.0.borrow_mut();
        let id = registry.allocate();

        let handler = Cell::new(Some(handler));
        let wrapper = move |event: &E| {
            if let Some(handler) = handler.take() {
                handler(event);
            }
            if let Some(channel) = channel.upgrade() {
                let removed = channel.borrow_mut().handlers.remove(&id);
                if removed.is_some() {
                    trace!(channel.borrow().logger, "one-shot handler consumed"; "id" => id.get());
                }
            }
        };

        registry.handlers.insert(id, Rc::new(wrapper));
        debug!(registry.logger, "one-shot handler added"; "id" => id.get());
        id
    }

    /// Remove a handler.
    ///
    /// Returns false if no handler with this identifier is registered, which includes
    /// identifiers that were already removed.
    pub fn remove_handler(&self, id: HandlerId) -> bool {
        let removed = self.0.borrow_mut().handlers.remove(&id);
        let found = removed.is_some();
        debug!(self.0.borrow().logger, "handler removed"; "id" => id.get(), "found" => found);
        found
    }

    /// Invoke all handlers with `event`.
    ///
    /// The set of handlers is captured when the call starts. Handlers registered by a handler
    /// during this call are first invoked by the next notification; handlers removed during this
    /// call are still invoked by it.
    ///
    /// Handlers may notify their own channel again; the nested notification takes its own
    /// snapshot and completes before the outer one continues. Panics raised by a handler are not
    /// caught and skip the remaining handlers.
    pub fn notify(&self, event: &E) {
        let snapshot = {
            let registry = self.0.borrow();
            trace!(registry.logger, "notify"; "handlers" => registry.handlers.len());
            registry.handlers.values().cloned().collect::<Vec<_>>()
        };

        for handler in snapshot {
            handler(event);
        }
    }

    /// Alias of [add_handler](EventDispatch::add_handler).
    #[inline]
    pub fn subscribe<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&E) + 'static,
    {
        self.add_handler(handler)
    }

    /// Alias of [remove_handler](EventDispatch::remove_handler).
    #[inline]
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        self.remove_handler(id)
    }

    /// Alias of [handle_once](EventDispatch::handle_once).
    #[inline]
    pub fn subscribe_once<F>(&self, handler: F) -> HandlerId
    where
        F: FnOnce(&E) + 'static,
    {
        self.handle_once(handler)
    }

    /// Alias of [notify](EventDispatch::notify).
    #[inline]
    pub fn publish(&self, event: &E) {
        self.notify(event);
    }

    /// Name given to this channel.
    pub fn name(&self) -> &'static str {
        self.0.borrow().name
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.0.borrow().handlers.len()
    }

    /// True if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().handlers.is_empty()
    }

    /// True if a handler with this identifier is registered.
    pub fn contains(&self, id: HandlerId) -> bool {
        self.0.borrow().handlers.contains_key(&id)
    }

    /// Most recently allocated identifier, `None` before the first registration.
    pub fn last_id(&self) -> Option<HandlerId> {
        let last_id = self.0.borrow().last_id;
        if last_id == HandlerId::ZERO {
            None
        } else {
            Some(last_id)
        }
    }

    /// Create a non-owning handle to this channel.
    pub fn downgrade(&self) -> WeakDispatch<E> {
        WeakDispatch(Rc::downgrade(&self.0))
    }
}

impl<E: PartialEq + 'static> EventDispatch<E> {
    /// Invoke all handlers with `new` if it differs from `old`.
    pub fn notify_if_changed(&self, old: &E, new: &E) {
        Notifier::notify_if_changed(self, old, new);
    }

    /// Alias of [notify_if_changed](EventDispatch::notify_if_changed).
    #[inline]
    pub fn publish_if_changed(&self, old: &E, new: &E) {
        self.notify_if_changed(old, new);
    }
}

impl EventDispatch<()> {
    /// Invoke all handlers of a payload-less channel.
    pub fn notify_unit(&self) {
        self.notify(&());
    }
}

impl<E: 'static> Notifier for EventDispatch<E> {
    type Event = E;

    fn notify(&self, event: &E) {
        EventDispatch::notify(self, event);
    }
}

impl<E: 'static> Default for EventDispatch<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventDispatch<E> {
    /// The clone refers to the same channel.
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Identifiers<'a, E>(&'a BTreeMap<HandlerId, Handler<E>>);

impl<'a, E> fmt::Debug for Identifiers<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.keys()).finish()
    }
}

impl<E> fmt::Debug for EventDispatch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.0.borrow();
        f.debug_struct("EventDispatch")
            .field("name", &registry.name)
            .field("handlers", &Identifiers(&registry.handlers))
            .finish()
    }
}

/// Non-owning handle to an [EventDispatch].
///
/// Does not keep the channel alive.
pub struct WeakDispatch<E>(Weak<RefCell<Registry<E>>>);

impl<E> WeakDispatch<E> {
    /// Get a handle to the channel if it still exists.
    pub fn upgrade(&self) -> Option<EventDispatch<E>> {
        self.0.upgrade().map(EventDispatch)
    }
}

impl<E> Clone for WeakDispatch<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> fmt::Debug for WeakDispatch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakDispatch")
    }
}
