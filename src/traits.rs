/// Anything that can broadcast an event to its handlers.
///
/// Publisher code that only needs to fire events can be written against this trait instead of a
/// concrete [EventDispatch](crate::EventDispatch).
pub trait Notifier {
    /// Payload type delivered to handlers.
    type Event;

    /// Invoke every handler with `event`.
    fn notify(&self, event: &Self::Event);

    /// Invoke every handler with `new`, but only if it differs from `old`.
    ///
    /// Meant to be called from property setters, after the value has been replaced.
    fn notify_if_changed(&self, old: &Self::Event, new: &Self::Event)
    where
        Self::Event: PartialEq,
    {
        if old != new {
            self.notify(new);
        }
    }
}

/// Payload-less notification for channels of `()`.
pub trait UnitNotifier: Notifier<Event = ()> {
    /// Same as `notify(&())`.
    fn notify_unit(&self) {
        self.notify(&());
    }
}

impl<T: Notifier<Event = ()> + ?Sized> UnitNotifier for T {}
