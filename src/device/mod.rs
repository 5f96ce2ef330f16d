// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The humidifier device.
//!
//! A [`Humidifier`] owns the observable state of one device, its observers
//! and its persistence slot. The hardware side is a
//! [`HumidifierIntegration`] supplied at construction.
//!
//! # Control flow
//!
//! 1. A caller builds a [`HumidifierCall`] with [`Humidifier::make_call`].
//! 2. `perform` validates it against [`Humidifier::get_traits`].
//! 3. Control observers run, then the integration's `control`.
//! 4. The integration writes the new state and calls
//!    [`Humidifier::publish_state`], which saves a
//!    [`RestoreRecord`] and runs the state observers.

mod call;
mod integration;

pub use call::HumidifierCall;
pub use integration::HumidifierIntegration;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::capabilities::{HumidifierTraits, VisualOverrides};
use crate::config::{HumidifierConfig, RestorePolicy};
use crate::preferences::PreferenceStore;
use crate::state::{HumidifierState, RestoreRecord};
use crate::subscription::CallbackRegistry;
use crate::types::{HumidifierAction, HumidifierMode};

/// A humidity-regulating device.
///
/// State is read by anyone and written only by the integration, through
/// [`update_state`](Self::update_state).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use humidifier_lib::{Humidifier, HumidifierCall, HumidifierIntegration, HumidifierTraits};
/// use humidifier_lib::preferences::MemoryPreferences;
/// use humidifier_lib::types::HumidifierMode;
///
/// struct Driver;
///
/// impl HumidifierIntegration for Driver {
///     fn traits(&self) -> HumidifierTraits {
///         HumidifierTraits::regulating()
///     }
///
///     fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>) {
///         humidifier.update_state(|state| {
///             if let Some(mode) = call.get_mode() {
///                 state.mode = mode;
///             }
///             if let Some(target) = call.get_target_humidity() {
///                 state.target_humidity = target;
///             }
///         });
///         humidifier.publish_state();
///     }
/// }
///
/// let prefs = Arc::new(MemoryPreferences::new());
/// let humidifier = Humidifier::new("Living Room", Driver).with_preferences(prefs);
/// humidifier.setup();
///
/// humidifier.make_call().set_mode(HumidifierMode::Auto).perform().unwrap();
/// assert_eq!(humidifier.mode(), HumidifierMode::Auto);
/// assert_eq!(humidifier.restore_state().unwrap().mode, HumidifierMode::Auto);
/// ```
pub struct Humidifier {
    name: String,
    object_id: String,
    integration: Box<dyn HumidifierIntegration>,
    state: RwLock<HumidifierState>,
    callbacks: CallbackRegistry,
    overrides: VisualOverrides,
    preferences: Option<Arc<dyn PreferenceStore>>,
    restore_policy: RestorePolicy,
}

impl Humidifier {
    /// Creates a humidifier in its default state (mode OFF, humidities
    /// unknown) without persistence.
    #[must_use]
    pub fn new(name: impl Into<String>, integration: impl HumidifierIntegration + 'static) -> Self {
        let name = name.into();
        let object_id = object_id(&name);
        Self {
            name,
            object_id,
            integration: Box::new(integration),
            state: RwLock::new(HumidifierState::default()),
            callbacks: CallbackRegistry::new(),
            overrides: VisualOverrides::default(),
            preferences: None,
            restore_policy: RestorePolicy::default(),
        }
    }

    /// Creates a humidifier from a configuration.
    #[must_use]
    pub fn from_config(
        config: &HumidifierConfig,
        integration: impl HumidifierIntegration + 'static,
    ) -> Self {
        let mut humidifier =
            Self::new(config.name.clone(), integration).with_restore_policy(config.restore);
        humidifier.overrides = config.visual.into();
        humidifier
    }

    /// Attaches the store used for restore records.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Sets how [`setup`](Self::setup) replays the restore record.
    #[must_use]
    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }

    // ========== Identity ==========

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stable identifier used as persistence key.
    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    // ========== State ==========

    /// Returns a copy of the full state.
    #[must_use]
    pub fn state(&self) -> HumidifierState {
        *self.state.read()
    }

    /// Returns the active mode.
    #[must_use]
    pub fn mode(&self) -> HumidifierMode {
        self.state.read().mode
    }

    /// Returns the current actuation status.
    #[must_use]
    pub fn action(&self) -> HumidifierAction {
        self.state.read().action
    }

    /// Returns the measured humidity, NaN if unknown.
    #[must_use]
    pub fn current_humidity(&self) -> f32 {
        self.state.read().current_humidity
    }

    /// Returns the target humidity, NaN if unset.
    #[must_use]
    pub fn target_humidity(&self) -> f32 {
        self.state.read().target_humidity
    }

    /// Mutates the state. Reserved for the integration.
    ///
    /// Observers are not notified until
    /// [`publish_state`](Self::publish_state) is called.
    ///
    /// `update` runs on a copy with no lock held, so it may read the device.
    pub fn update_state(&self, update: impl FnOnce(&mut HumidifierState)) {
        let mut state = self.state();
        update(&mut state);
        *self.state.write() = state;
    }

    // ========== Traits ==========

    /// Returns the integration's traits with the visual overrides applied.
    #[must_use]
    pub fn get_traits(&self) -> HumidifierTraits {
        self.overrides.apply(self.integration.traits())
    }

    /// Returns the visual overrides.
    #[must_use]
    pub fn visual_overrides(&self) -> VisualOverrides {
        self.overrides
    }

    /// Overrides the lowest selectable target humidity.
    ///
    /// An inconsistent result is stored anyway and logged at `warn`.
    pub fn set_visual_min_humidity_override(&mut self, min_humidity: f32) {
        self.overrides.min_humidity = Some(min_humidity);
        self.check_overrides();
    }

    /// Overrides the highest selectable target humidity.
    pub fn set_visual_max_humidity_override(&mut self, max_humidity: f32) {
        self.overrides.max_humidity = Some(max_humidity);
        self.check_overrides();
    }

    /// Overrides the target and current humidity steps.
    pub fn set_visual_humidity_step_override(&mut self, target: f32, current: f32) {
        self.overrides.target_humidity_step = Some(target);
        self.overrides.current_humidity_step = Some(current);
        self.check_overrides();
    }

    fn check_overrides(&self) {
        if let Some(problem) = self.overrides.inconsistency() {
            tracing::warn!(humidifier = %self.name, problem = %problem, "Inconsistent visual override");
        }
    }

    // ========== Observation ==========

    /// Registers a callback run on every [`publish_state`](Self::publish_state).
    pub fn add_on_state_callback<F>(&self, callback: F)
    where
        F: Fn(&Humidifier) + Send + Sync + 'static,
    {
        self.callbacks.on_state(callback);
    }

    /// Registers a callback run for every validated control call, before
    /// the integration applies it and before any state callback.
    pub fn add_on_control_callback<F>(&self, callback: F)
    where
        F: Fn(&HumidifierCall<'_>) + Send + Sync + 'static,
    {
        self.callbacks.on_control(callback);
    }

    // ========== Control ==========

    /// Starts a new control call targeting this humidifier.
    pub fn make_call(&self) -> HumidifierCall<'_> {
        HumidifierCall::new(self)
    }

    /// Saves the restore record and notifies state observers.
    ///
    /// Called by the integration after it changed the state. A failing
    /// save is logged and does not prevent the notification.
    pub fn publish_state(&self) {
        let state = self.state();
        tracing::debug!(
            humidifier = %self.name,
            mode = %state.mode,
            action = %state.action,
            current_humidity = state.current_humidity,
            target_humidity = state.target_humidity,
            "Publishing state"
        );

        self.save_state(&state);
        self.callbacks.dispatch_state(self);
    }

    // ========== Persistence ==========

    /// Loads the saved restore record.
    ///
    /// Returns `None` if there is no store, nothing was saved, the store
    /// fails, or the saved bytes belong to another record layout.
    #[must_use]
    pub fn restore_state(&self) -> Option<RestoreRecord> {
        let preferences = self.preferences.as_ref()?;

        let bytes = match preferences.load(&self.object_id) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(humidifier = %self.name, "No saved state");
                return None;
            }
            Err(e) => {
                tracing::warn!(humidifier = %self.name, error = %e, "Failed to load saved state");
                return None;
            }
        };

        match RestoreRecord::decode(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(humidifier = %self.name, error = %e, "Ignoring saved state");
                None
            }
        }
    }

    /// Replays the restore record according to the restore policy.
    ///
    /// Call once, after observers are registered.
    pub fn setup(&self) {
        match self.restore_policy {
            RestorePolicy::Disabled => {}
            RestorePolicy::Validated => {
                if let Some(record) = self.restore_state()
                    && let Err(e) = record.to_call(self).perform()
                {
                    tracing::warn!(humidifier = %self.name, error = %e, "Saved state was rejected");
                }
            }
            RestorePolicy::Direct => {
                if let Some(record) = self.restore_state() {
                    record.apply(self);
                }
            }
        }
    }

    /// Logs the device identity and its effective traits.
    pub fn dump_config(&self) {
        tracing::info!(
            humidifier = %self.name,
            object_id = %self.object_id,
            restore = ?self.restore_policy,
            "Humidifier"
        );
        self.get_traits().log_config(&self.name);
    }

    fn save_state(&self, state: &HumidifierState) {
        let Some(preferences) = &self.preferences else {
            return;
        };

        let record = RestoreRecord {
            mode: state.mode,
            target_humidity: state.target_humidity,
        };
        if let Err(e) = preferences.save(&self.object_id, &record.encode()) {
            tracing::warn!(humidifier = %self.name, error = %e, "Failed to save state");
        }
    }

    pub(crate) fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    pub(crate) fn integration(&self) -> &dyn HumidifierIntegration {
        self.integration.as_ref()
    }
}

impl fmt::Debug for Humidifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Humidifier")
            .field("name", &self.name)
            .field("object_id", &self.object_id)
            .field("state", &self.state())
            .field("overrides", &self.overrides)
            .field("callbacks", &self.callbacks)
            .field("restore_policy", &self.restore_policy)
            .finish_non_exhaustive()
    }
}

/// Derives the persistence key from a display name.
///
/// Lower-case ASCII alphanumerics are kept; every other run of characters
/// becomes a single `_`.
fn object_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c.to_ascii_lowercase());
        } else if !id.is_empty() && !id.ends_with('_') {
            id.push('_');
        }
    }
    while id.ends_with('_') {
        id.pop();
    }
    if id.is_empty() {
        id.push_str("humidifier");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualConfig;
    use crate::preferences::MemoryPreferences;

    struct Passive;

    impl HumidifierIntegration for Passive {
        fn traits(&self) -> HumidifierTraits {
            HumidifierTraits::regulating()
        }

        fn control(&self, _humidifier: &Humidifier, _call: &HumidifierCall<'_>) {}
    }

    #[test]
    fn object_id_from_name() {
        assert_eq!(object_id("Living Room"), "living_room");
        assert_eq!(object_id("  Kid's  Room #2 "), "kid_s_room_2");
        assert_eq!(object_id("BEDROOM"), "bedroom");
        assert_eq!(object_id("***"), "humidifier");
    }

    #[test]
    fn new_humidifier_has_default_state() {
        let humidifier = Humidifier::new("Test", Passive);
        assert_eq!(humidifier.mode(), HumidifierMode::Off);
        assert_eq!(humidifier.action(), HumidifierAction::Off);
        assert!(humidifier.current_humidity().is_nan());
        assert!(humidifier.target_humidity().is_nan());
    }

    #[test]
    fn update_state_changes_fields() {
        let humidifier = Humidifier::new("Test", Passive);
        humidifier.update_state(|state| {
            state.action = HumidifierAction::Idle;
            state.current_humidity = 38.0;
        });
        assert_eq!(humidifier.action(), HumidifierAction::Idle);
        assert!((humidifier.current_humidity() - 38.0).abs() < f32::EPSILON);
    }

    #[test]
    fn update_closure_may_read_the_device() {
        let humidifier = Humidifier::new("Test", Passive);
        humidifier.update_state(|state| state.target_humidity = 40.0);

        humidifier.update_state(|state| {
            state.target_humidity = humidifier.target_humidity() + 5.0;
            state.mode = humidifier.state().mode;
        });

        assert!((humidifier.target_humidity() - 45.0).abs() < f32::EPSILON);
        assert_eq!(humidifier.mode(), HumidifierMode::Off);
    }

    #[test]
    fn inconsistent_overrides_are_kept() {
        let mut humidifier = Humidifier::new("Test", Passive);
        humidifier.set_visual_min_humidity_override(70.0);
        humidifier.set_visual_max_humidity_override(40.0);

        let overrides = humidifier.visual_overrides();
        assert_eq!(overrides.min_humidity, Some(70.0));
        assert_eq!(overrides.max_humidity, Some(40.0));
        assert!(overrides.inconsistency().is_some());
    }

    #[test]
    fn traits_are_stable_across_queries() {
        let humidifier = Humidifier::new("Test", Passive);
        assert_eq!(humidifier.get_traits(), humidifier.get_traits());
    }

    #[test]
    fn overrides_apply_to_traits() {
        let mut humidifier = Humidifier::new("Test", Passive);
        humidifier.set_visual_min_humidity_override(35.0);
        humidifier.set_visual_max_humidity_override(65.0);
        humidifier.set_visual_humidity_step_override(5.0, 0.5);

        let traits = humidifier.get_traits();
        assert!((traits.visual_min_humidity - 35.0).abs() < f32::EPSILON);
        assert!((traits.visual_max_humidity - 65.0).abs() < f32::EPSILON);
        assert!((traits.visual_target_humidity_step - 5.0).abs() < f32::EPSILON);
        assert!((traits.visual_current_humidity_step - 0.5).abs() < f32::EPSILON);
        assert!(traits.supports_target_humidity);
    }

    #[test]
    fn from_config_carries_overrides_and_policy() {
        let config = HumidifierConfig::new("Cellar")
            .with_restore(RestorePolicy::Direct)
            .with_visual(VisualConfig {
                max_humidity: Some(60.0),
                ..VisualConfig::default()
            });

        let humidifier = Humidifier::from_config(&config, Passive);
        assert_eq!(humidifier.name(), "Cellar");
        assert_eq!(humidifier.object_id(), "cellar");
        assert_eq!(humidifier.visual_overrides().max_humidity, Some(60.0));
        assert!((humidifier.get_traits().visual_max_humidity - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn restore_state_without_store_is_absent() {
        let humidifier = Humidifier::new("Test", Passive);
        assert_eq!(humidifier.restore_state(), None);
    }

    #[test]
    fn publish_state_saves_record_under_object_id() {
        let prefs = Arc::new(MemoryPreferences::new());
        let humidifier = Humidifier::new("Guest Room", Passive).with_preferences(prefs.clone());

        humidifier.update_state(|state| {
            state.mode = HumidifierMode::On;
            state.target_humidity = 50.0;
        });
        humidifier.publish_state();

        let bytes = prefs.load("guest_room").unwrap().unwrap();
        let record = RestoreRecord::decode(&bytes).unwrap();
        assert_eq!(record.mode, HumidifierMode::On);
        assert!((record.target_humidity - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn debug_output() {
        let humidifier = Humidifier::new("Debug Me", Passive);
        let debug = format!("{humidifier:?}");
        assert!(debug.contains("Humidifier"));
        assert!(debug.contains("debug_me"));
    }
}
