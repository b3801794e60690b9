//! Component registry that initializes widgets from declared elements.
//!
//! Components are registered under a unique name with a selector and an
//! initializer. Scanning a set of elements runs each component's initializer
//! once for every matching element; the resulting widget is kept until the
//! component is re-initialized.

use anyhow::Result;
use indexmap::IndexMap;
use log::{debug, error};
use thiserror::Error;

/// Something a component can be mounted on.
pub trait Element {
	/// Identity used to remember which elements were initialized.
	fn key(&self) -> &str;

	/// Whether the element is matched by a component's selector.
	fn matches(&self, selector: &str) -> bool;
}

/// Errors raised when mutating a [`ComponentRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
	#[error("component '{name}' is already registered")]
	DuplicateComponent { name: String },

	#[error("component '{name}' is not registered")]
	UnknownComponent { name: String },
}

type Initializer<E, W> = Box<dyn FnMut(&E) -> Result<W>>;

struct Component<E, W> {
	selector: String,
	init: Initializer<E, W>,
	instances: IndexMap<String, W>,
}

impl<E: Element, W> Component<E, W> {
	/// Initialize `element` unless it does not match or already has an
	/// instance. Returns whether a new instance was created.
	fn mount(&mut self, name: &str, element: &E) -> bool {
		if !element.matches(&self.selector) || self.instances.contains_key(element.key()) {
			return false;
		}
		match (self.init)(element) {
			Ok(widget) => {
				debug!("initialised {name} on '{}'", element.key());
				self.instances.insert(element.key().to_owned(), widget);
				true
			}
			Err(err) => {
				error!("failed to initialise {name} on '{}': {err:#}", element.key());
				false
			}
		}
	}
}

/// Registration-ordered set of components and their live instances.
pub struct ComponentRegistry<E, W> {
	components: IndexMap<String, Component<E, W>>,
	watching: bool,
}

impl<E: Element, W> ComponentRegistry<E, W> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			components: IndexMap::new(),
			watching: false,
		}
	}

	/// Register a component.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::DuplicateComponent`] when `name` is taken.
	pub fn register<F>(&mut self, name: &str, selector: &str, init: F) -> Result<(), RegistryError>
	where
		F: FnMut(&E) -> Result<W> + 'static,
	{
		if self.components.contains_key(name) {
			return Err(RegistryError::DuplicateComponent { name: name.to_owned() });
		}
		self.components.insert(
			name.to_owned(),
			Component {
				selector: selector.to_owned(),
				init: Box::new(init),
				instances: IndexMap::new(),
			},
		);
		Ok(())
	}

	/// Initialize every uninitialized element matched by any component.
	/// Returns the number of new instances.
	pub fn init_all(&mut self, elements: &[E]) -> usize {
		let mut mounted = 0;
		for (name, component) in &mut self.components {
			for element in elements {
				mounted += usize::from(component.mount(name, element));
			}
		}
		mounted
	}

	/// Start initializing elements passed to [`insert`](Self::insert).
	pub fn start(&mut self) {
		self.watching = true;
	}

	pub fn stop(&mut self) {
		self.watching = false;
	}

	#[must_use]
	pub fn is_watching(&self) -> bool {
		self.watching
	}

	/// Initialize a newly added element. Ignored unless watching.
	pub fn insert(&mut self, element: &E) -> usize {
		if !self.watching {
			return 0;
		}
		self.components
			.iter_mut()
			.map(|(name, component)| usize::from(component.mount(name, element)))
			.sum()
	}

	/// Drop a component's instances and initialize `elements` again.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::UnknownComponent`] for an unregistered name.
	pub fn reinit(&mut self, name: &str, elements: &[E]) -> Result<usize, RegistryError> {
		let (_, name, component) = self
			.components
			.get_full_mut(name)
			.ok_or_else(|| RegistryError::UnknownComponent { name: name.to_owned() })?;
		component.instances.clear();
		Ok(elements
			.iter()
			.map(|element| usize::from(component.mount(name, element)))
			.sum())
	}

	/// Drop every instance and initialize `elements` again.
	pub fn reinit_all(&mut self, elements: &[E]) -> usize {
		for component in self.components.values_mut() {
			component.instances.clear();
		}
		self.init_all(elements)
	}

	#[must_use]
	pub fn is_initialized(&self, name: &str, key: &str) -> bool {
		self.components
			.get(name)
			.is_some_and(|component| component.instances.contains_key(key))
	}

	#[must_use]
	pub fn instance(&self, name: &str, key: &str) -> Option<&W> {
		self.components.get(name)?.instances.get(key)
	}

	/// Remove an instance, handing ownership to the caller.
	pub fn take_instance(&mut self, name: &str, key: &str) -> Option<W> {
		self.components.get_mut(name)?.instances.shift_remove(key)
	}

	/// Registered component names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.components.keys().map(String::as_str)
	}
}

impl<E: Element, W> Default for ComponentRegistry<E, W> {
	fn default() -> Self {
		Self::new()
	}
}
