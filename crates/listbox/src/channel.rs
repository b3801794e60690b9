//! Broadcast channel that keeps at most one control open.
//!
//! Opening a control publishes an `opened` notification tagged with its
//! [`InstanceId`]. Every other live subscriber closes itself before the publish
//! call returns, in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::warn;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
	/// Allocate a fresh identity.
	#[must_use]
	pub fn next() -> Self {
		Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for InstanceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "listbox-{}", self.0)
	}
}

/// A participant in the open/close protocol.
pub trait OpenSubscriber {
	fn instance_id(&self) -> InstanceId;

	/// Remember the channel so later `open` calls can publish on it.
	fn attach(&mut self, channel: OpenChannel);

	/// Another instance opened; close without stealing focus.
	fn opened_elsewhere(&mut self, source: InstanceId);
}

struct Subscription {
	id: InstanceId,
	subscriber: Weak<RefCell<dyn OpenSubscriber>>,
}

/// Cloneable handle to a shared subscriber list.
#[derive(Clone, Default)]
pub struct OpenChannel {
	subscriptions: Rc<RefCell<Vec<Subscription>>>,
}

impl fmt::Debug for OpenChannel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OpenChannel")
			.field("subscribers", &self.subscriptions.borrow().len())
			.finish()
	}
}

impl OpenChannel {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach `subscriber` to this channel and return the shared handle that
	/// callers use from then on.
	pub fn join<S>(&self, mut subscriber: S) -> Rc<RefCell<S>>
	where
		S: OpenSubscriber + 'static,
	{
		subscriber.attach(self.clone());
		let id = subscriber.instance_id();
		let shared = Rc::new(RefCell::new(subscriber));
		let erased: Rc<RefCell<dyn OpenSubscriber>> = shared.clone();
		self.subscribe(id, Rc::downgrade(&erased));
		shared
	}

	/// Register an already shared subscriber.
	pub fn subscribe(&self, id: InstanceId, subscriber: Weak<RefCell<dyn OpenSubscriber>>) {
		self.subscriptions
			.borrow_mut()
			.push(Subscription { id, subscriber });
	}

	/// Remove the subscription for `id`, returning whether one existed.
	pub fn unsubscribe(&self, id: InstanceId) -> bool {
		let mut subscriptions = self.subscriptions.borrow_mut();
		let before = subscriptions.len();
		subscriptions.retain(|subscription| subscription.id != id);
		subscriptions.len() != before
	}

	/// Number of subscribers that are still alive.
	#[must_use]
	pub fn len(&self) -> usize {
		self.subscriptions
			.borrow()
			.iter()
			.filter(|subscription| subscription.subscriber.strong_count() > 0)
			.count()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Tell every subscriber except `source` that `source` opened.
	///
	/// The publisher is never borrowed, so it may call this while it is itself
	/// mutably borrowed. Subscribers that are busy (borrowed further up the
	/// stack) are skipped with a warning.
	pub fn publish_opened(&self, source: InstanceId) {
		let live: Vec<(InstanceId, Rc<RefCell<dyn OpenSubscriber>>)> = {
			let mut subscriptions = self.subscriptions.borrow_mut();
			subscriptions.retain(|subscription| subscription.subscriber.strong_count() > 0);
			subscriptions
				.iter()
				.filter(|subscription| subscription.id != source)
				.filter_map(|subscription| {
					subscription
						.subscriber
						.upgrade()
						.map(|subscriber| (subscription.id, subscriber))
				})
				.collect()
		};

		for (id, subscriber) in live {
			match subscriber.try_borrow_mut() {
				Ok(mut subscriber) => subscriber.opened_elsewhere(source),
				Err(_) => warn!("{id} is busy; skipping opened notification from {source}"),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Probe {
		id: InstanceId,
		attached: bool,
		closed_by: Vec<InstanceId>,
	}

	impl Probe {
		fn new() -> Self {
			Self {
				id: InstanceId::next(),
				attached: false,
				closed_by: Vec::new(),
			}
		}
	}

	impl OpenSubscriber for Probe {
		fn instance_id(&self) -> InstanceId {
			self.id
		}

		fn attach(&mut self, _channel: OpenChannel) {
			self.attached = true;
		}

		fn opened_elsewhere(&mut self, source: InstanceId) {
			self.closed_by.push(source);
		}
	}

	#[test]
	fn publisher_is_not_notified() {
		let channel = OpenChannel::new();
		let first = channel.join(Probe::new());
		let second = channel.join(Probe::new());
		let source = first.borrow().id;

		channel.publish_opened(source);

		assert!(first.borrow().attached);
		assert!(first.borrow().closed_by.is_empty());
		assert_eq!(second.borrow().closed_by, [source]);
	}

	#[test]
	fn dropped_subscribers_are_pruned() {
		let channel = OpenChannel::new();
		let kept = channel.join(Probe::new());
		let dropped = channel.join(Probe::new());
		assert_eq!(channel.len(), 2);

		drop(dropped);
		channel.publish_opened(InstanceId::next());

		assert_eq!(channel.len(), 1);
		assert_eq!(kept.borrow().closed_by.len(), 1);
	}

	#[test]
	fn busy_subscribers_are_skipped() {
		let channel = OpenChannel::new();
		let busy = channel.join(Probe::new());
		let idle = channel.join(Probe::new());

		let guard = busy.borrow_mut();
		channel.publish_opened(InstanceId::next());
		drop(guard);

		assert!(busy.borrow().closed_by.is_empty());
		assert_eq!(idle.borrow().closed_by.len(), 1);
	}

	#[test]
	fn unsubscribe_stops_notifications() {
		let channel = OpenChannel::new();
		let probe = channel.join(Probe::new());
		let id = probe.borrow().id;

		assert!(channel.unsubscribe(id));
		assert!(!channel.unsubscribe(id));
		channel.publish_opened(InstanceId::next());
		assert!(probe.borrow().closed_by.is_empty());
	}
}
