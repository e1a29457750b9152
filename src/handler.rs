use std::{fmt, rc::Rc};

/// Token returned when registering a handler on an [EventDispatch](crate::EventDispatch).
///
/// Identifiers of a single channel are strictly increasing and never reused, not even after the
/// handler they named has been removed. Pass the identifier to
/// [remove_handler](crate::EventDispatch::remove_handler) to deregister.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) const ZERO: Self = HandlerId(0);

    /// Raw value of this identifier.
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        HandlerId(self.0 + 1)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type Handler<E> = Rc<dyn Fn(&E)>;
