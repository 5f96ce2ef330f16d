// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback storage and dispatch for humidifier observers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::device::{Humidifier, HumidifierCall};

/// Type alias for state-changed callbacks.
type StateCallback = Arc<dyn Fn(&Humidifier) + Send + Sync>;

/// Type alias for control-requested callbacks.
type ControlCallback = Arc<dyn Fn(&HumidifierCall<'_>) + Send + Sync>;

/// Registry of humidifier observers.
///
/// Registration is append-only: callbacks live as long as the device and
/// are dispatched in registration order.
///
/// # Thread Safety
///
/// The lists are guarded by `parking_lot::RwLock`. Dispatch clones the list
/// before invoking anything, so a callback may read the device or register
/// further callbacks without deadlocking. Callbacks registered during a
/// dispatch run from the next dispatch on.
///
/// Only the device dispatches, so observers never see state that was not
/// also saved:
///
/// ```compile_fail
/// use humidifier_lib::{CallbackRegistry, Humidifier, HumidifierTraits};
/// # use humidifier_lib::{HumidifierCall, HumidifierIntegration};
/// # struct Driver;
/// # impl HumidifierIntegration for Driver {
/// #     fn traits(&self) -> HumidifierTraits { HumidifierTraits::on_off() }
/// #     fn control(&self, _: &Humidifier, _: &HumidifierCall<'_>) {}
/// # }
///
/// let registry = CallbackRegistry::new();
/// registry.dispatch_state(&Humidifier::new("Hall", Driver));
/// ```
pub struct CallbackRegistry {
    /// Fired by `publish_state`.
    state_callbacks: RwLock<Vec<StateCallback>>,
    /// Fired by `perform` after validation, before the integration runs.
    control_callbacks: RwLock<Vec<ControlCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state_callbacks: RwLock::new(Vec::new()),
            control_callbacks: RwLock::new(Vec::new()),
        }
    }

    /// Registers a callback for published state.
    pub fn on_state<F>(&self, callback: F)
    where
        F: Fn(&Humidifier) + Send + Sync + 'static,
    {
        self.state_callbacks.write().push(Arc::new(callback));
    }

    /// Registers a callback for validated control calls.
    pub fn on_control<F>(&self, callback: F)
    where
        F: Fn(&HumidifierCall<'_>) + Send + Sync + 'static,
    {
        self.control_callbacks.write().push(Arc::new(callback));
    }

    /// Invokes every state callback with `humidifier`.
    pub(crate) fn dispatch_state(&self, humidifier: &Humidifier) {
        let callbacks = self.state_callbacks.read().clone();
        for callback in &callbacks {
            callback(humidifier);
        }
    }

    /// Invokes every control callback with `call`.
    pub(crate) fn dispatch_control(&self, call: &HumidifierCall<'_>) {
        let callbacks = self.control_callbacks.read().clone();
        for callback in &callbacks {
            callback(call);
        }
    }

    /// Returns the number of state callbacks.
    #[must_use]
    pub fn state_callback_count(&self) -> usize {
        self.state_callbacks.read().len()
    }

    /// Returns the number of control callbacks.
    #[must_use]
    pub fn control_callback_count(&self) -> usize {
        self.control_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state_callback_count() == 0 && self.control_callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("state_callbacks", &self.state_callback_count())
            .field("control_callbacks", &self.control_callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::HumidifierTraits;
    use crate::device::HumidifierIntegration;
    use crate::types::HumidifierMode;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Inert;

    impl HumidifierIntegration for Inert {
        fn traits(&self) -> HumidifierTraits {
            HumidifierTraits::on_off()
        }

        fn control(&self, _humidifier: &Humidifier, _call: &HumidifierCall<'_>) {}
    }

    fn humidifier() -> Humidifier {
        Humidifier::new("Registry Test", Inert)
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.state_callback_count(), 0);
        assert_eq!(registry.control_callback_count(), 0);
    }

    #[test]
    fn state_callbacks_run_in_registration_order() {
        let registry = CallbackRegistry::new();
        let order = Arc::new(RwLock::new(Vec::new()));

        for i in 0..3 {
            let order = order.clone();
            registry.on_state(move |_| order.write().push(i));
        }

        registry.dispatch_state(&humidifier());
        assert_eq!(*order.read(), vec![0, 1, 2]);
    }

    #[test]
    fn control_callback_sees_call() {
        let registry = CallbackRegistry::new();
        let seen = Arc::new(RwLock::new(None));
        let seen_clone = seen.clone();

        registry.on_control(move |call| {
            *seen_clone.write() = call.get_mode();
        });

        let device = humidifier();
        let call = device.make_call().set_mode(HumidifierMode::On);
        registry.dispatch_control(&call);

        assert_eq!(*seen.read(), Some(HumidifierMode::On));
    }

    #[test]
    fn callback_may_register_during_dispatch() {
        let registry = Arc::new(CallbackRegistry::new());
        let counter = Arc::new(AtomicU32::new(0));

        let inner_registry = registry.clone();
        let inner_counter = counter.clone();
        registry.on_state(move |_| {
            let counter = inner_counter.clone();
            inner_registry.on_state(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        });

        let device = humidifier();
        registry.dispatch_state(&device);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(registry.state_callback_count(), 2);

        registry.dispatch_state(&device);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::new();
        registry.on_state(|_| {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("state_callbacks: 1"));
    }
}
