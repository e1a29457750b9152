//! Typed synchronous event dispatch.
//!
//! # What is event dispatch? #
//!
//! An event dispatch is a channel on which a producer broadcasts values of a single type to any
//! number of handlers. The producer knows nothing about the handlers, the handlers know nothing
//! about each other. They only agree on the payload type.
//!
//! Dispatch is synchronous: calling [notify](crate::EventDispatch::notify) runs every handler
//! before returning. Handlers run in registration order.
//!
//! # Core Concepts #
//!
//! ## EventDispatch ##
//!
//! An [EventDispatch](crate::EventDispatch) is the channel. A publisher typically owns one per
//! event it exposes, and notifies it from its setters.
//!
//! ## HandlerId ##
//!
//! Registering a handler returns a [HandlerId](crate::HandlerId). Identifiers are strictly
//! increasing and never reused, and are the only way to remove a handler again.
//!
//! ## Notification ##
//!
//! A notification works on the set of handlers that existed when it started. A handler may
//! register or remove handlers on the channel it is being notified from; the changes apply to the
//! next notification.
//!
//! # Example #
//!
//! ```
//! use eventdispatch::EventDispatch;
//! use std::{cell::Cell, rc::Rc};
//!
//! struct Thermometer {
//!     celsius: i32,
//!     on_change: EventDispatch<i32>,
//! }
//!
//! impl Thermometer {
//!     fn set(&mut self, celsius: i32) {
//!         let old = std::mem::replace(&mut self.celsius, celsius);
//!         self.on_change.notify_if_changed(&old, &self.celsius);
//!     }
//! }
//!
//! let mut thermometer = Thermometer {
//!     celsius: 20,
//!     on_change: EventDispatch::named("celsius"),
//! };
//!
//! let changes = Rc::new(Cell::new(0));
//! let id = {
//!     let changes = changes.clone();
//!     thermometer
//!         .on_change
//!         .add_handler(move |_| changes.set(changes.get() + 1))
//! };
//!
//! // First change only.
//! thermometer.on_change.handle_once(|celsius| println!("first change: {}", celsius));
//!
//! thermometer.set(20);
//! thermometer.set(21);
//! thermometer.set(22);
//! assert_eq!(changes.get(), 2);
//!
//! assert!(thermometer.on_change.remove_handler(id));
//! assert!(thermometer.on_change.is_empty());
//! ```
//!
//! # Reaching back into the channel #
//!
//! A handler stored in a channel must not own that channel, or neither is ever dropped. Capture a
//! [WeakDispatch](crate::WeakDispatch) instead:
//!
//! ```
//! use eventdispatch::EventDispatch;
//!
//! let dispatch = EventDispatch::<u32>::new();
//! let weak = dispatch.downgrade();
//!
//! dispatch.add_handler(move |value| {
//!     if let Some(channel) = weak.upgrade() {
//!         // Runs from the next notification on.
//!         channel.handle_once(|value| println!("next value: {}", value));
//!     }
//!     println!("value: {}", value);
//! });
//!
//! dispatch.notify(&1);
//! dispatch.notify(&2);
//! ```
#![deny(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

mod dispatch;
mod handler;
mod traits;
pub use self::{
    dispatch::{EventDispatch, WeakDispatch},
    handler::HandlerId,
    traits::{Notifier, UnitNotifier},
};
