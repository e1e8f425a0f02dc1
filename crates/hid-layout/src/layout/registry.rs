use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;

use super::LayoutSpec;
use crate::{DeviceDescription, DeviceDescriptor, DeviceId};

pub trait Thunk: Fn() -> LayoutSpec + Send + Sync {}
impl<F: Fn() -> LayoutSpec + Send + Sync> Thunk for F {}

/// Deferred construction of a [`LayoutSpec`]
///
/// Nothing is cached: every call to [`build`](LayoutBuilder::build) produces a fresh layout
/// from whatever the thunk captured.
pub struct LayoutBuilder {
    thunk: Box<dyn Thunk>,
}

impl LayoutBuilder {
    pub fn new(thunk: impl Thunk + 'static) -> Self {
        LayoutBuilder {
            thunk: Box::new(thunk),
        }
    }

    pub fn build(&self) -> LayoutSpec {
        (self.thunk)()
    }
}

impl std::fmt::Debug for LayoutBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutBuilder").finish_non_exhaustive()
    }
}

/// Device properties a registered layout applies to
///
/// Unset fields match anything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceMatcher {
    pub interface: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub device_id: Option<DeviceId>,
}

impl DeviceMatcher {
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Whether `description` has every property this matcher asks for
    ///
    /// Vendor and product ids are read from the description's cached descriptor.
    pub fn matches(&self, description: &DeviceDescription) -> bool {
        fn field_matches(expected: &Option<String>, actual: Option<&str>) -> bool {
            expected
                .as_deref()
                .map_or(true, |expected| actual == Some(expected))
        }

        if !field_matches(&self.interface, Some(description.interface_name.as_str()))
            || !field_matches(&self.manufacturer, description.manufacturer.as_deref())
            || !field_matches(&self.product, description.product.as_deref())
        {
            return false;
        }

        match self.device_id {
            Some(device_id) => description
                .capabilities
                .as_deref()
                .and_then(|capabilities| DeviceDescriptor::from_json(capabilities).ok())
                .map(|descriptor| DeviceId::from(&descriptor) == device_id)
                .unwrap_or(false),
            None => true,
        }
    }
}

/// A named, deferred layout along with the devices it applies to
#[derive(Debug)]
pub struct LayoutRegistration {
    pub name: String,
    pub base_layout: String,
    pub matcher: DeviceMatcher,
    pub builder: LayoutBuilder,
}

/// Sink for layout registrations
pub trait LayoutRegistry {
    /// Register a layout, replacing any existing registration of the same name
    fn register_layout_builder(&self, registration: LayoutRegistration);
}

impl<T: LayoutRegistry + ?Sized> LayoutRegistry for &T {
    fn register_layout_builder(&self, registration: LayoutRegistration) {
        (**self).register_layout_builder(registration)
    }
}

impl<T: LayoutRegistry + ?Sized> LayoutRegistry for Arc<T> {
    fn register_layout_builder(&self, registration: LayoutRegistration) {
        (**self).register_layout_builder(registration)
    }
}

/// In-memory [`LayoutRegistry`] keyed by layout name
#[derive(Debug, Default)]
pub struct Layouts {
    registrations: RwLock<BTreeMap<String, LayoutRegistration>>,
}

impl Layouts {
    pub fn new() -> Self {
        Layouts::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registrations.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.registrations.read().keys().cloned().collect()
    }

    /// Build the named layout
    pub fn build(&self, name: &str) -> Option<LayoutSpec> {
        self.registrations
            .read()
            .get(name)
            .map(|registration| registration.builder.build())
    }

    /// Name of the first registered layout whose matcher accepts `description`
    pub fn find_matching(&self, description: &DeviceDescription) -> Option<String> {
        self.registrations
            .read()
            .values()
            .find(|registration| registration.matcher.matches(description))
            .map(|registration| registration.name.clone())
    }
}

impl LayoutRegistry for Layouts {
    fn register_layout_builder(&self, registration: LayoutRegistration) {
        let mut registrations = self.registrations.write();
        if registrations.contains_key(&registration.name) {
            log::debug!("Replacing layout registration {}", registration.name);
        } else {
            log::debug!("Registering layout {}", registration.name);
        }
        registrations.insert(registration.name.clone(), registration);
    }
}
