// src/device/mock.rs

//! A recording fake of `ComposerDevice` for unit tests.
//!
//! The mock snapshots every batched call, applies a configurable per-layer
//! composition decision during prepare, produces configurable fences during
//! set, and supports failure injection per operation. Tests keep a
//! `MockHandle` to inspect state after the device has been moved into the
//! bridge.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::device::{Capability, ComposerDevice, DeviceEvent, DisplayContents, DisplaySlot};
use crate::error::HwcError;
use crate::events::EventCallbacks;
use crate::fence::Fence;
use crate::layer::{CompositionType, Layer, ListFlags};
use crate::version::ApiVersion;

/// What the mock saw for one submitted slot.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub layers: Vec<Layer>,
    pub flags: ListFlags,
}

/// One recorded batched call. Each snapshot vector has one entry per slot;
/// `None` mirrors the null slot the bridge passed.
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Prepare(Vec<Option<ListSnapshot>>),
    Set(Vec<Option<ListSnapshot>>),
    EventControl {
        slot: DisplaySlot,
        event: DeviceEvent,
        enable: bool,
    },
    RegisterProcs,
}

#[derive(Debug)]
pub struct MockState {
    pub version: ApiVersion,
    pub calls: Vec<RecordedCall>,
    /// Composition decision applied to every content layer during prepare.
    pub claim: CompositionType,
    /// Status injected as a prepare failure, consumed on use.
    pub fail_next_prepare: Option<i32>,
    pub fail_next_set: Option<i32>,
    pub fail_event_control: bool,
    /// Retire fence produced for each submitted list on a successful set.
    pub retire_fence: Fence,
    /// Release fence produced for each overlay layer on a successful set.
    pub release_fence: Fence,
    pub vsync_enabled: bool,
    pub procs_registered: bool,
    pub supported_capabilities: Vec<Capability>,
}

/// Shared view of the mock, kept by the test after the device moves into
/// the bridge.
#[derive(Clone)]
pub struct MockHandle(Arc<Mutex<MockState>>);

impl MockHandle {
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.0.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Recorded prepare/set call count, for "no side effects" assertions.
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

pub struct MockDevice {
    state: Arc<Mutex<MockState>>,
}

impl MockDevice {
    pub fn new(version: ApiVersion) -> (Self, MockHandle) {
        let state = Arc::new(Mutex::new(MockState {
            version,
            calls: Vec::new(),
            claim: CompositionType::Overlay,
            fail_next_prepare: None,
            fail_next_set: None,
            fail_event_control: false,
            retire_fence: Fence::from_raw(90),
            release_fence: Fence::from_raw(91),
            vsync_enabled: false,
            procs_registered: false,
            supported_capabilities: vec![Capability::VsyncPeriod],
        }));
        let handle = MockHandle(Arc::clone(&state));
        (Self { state }, handle)
    }

    fn snapshot(displays: &DisplayContents<'_>) -> Vec<Option<ListSnapshot>> {
        displays
            .iter()
            .map(|slot| {
                slot.as_ref().map(|list| ListSnapshot {
                    layers: list.layers().to_vec(),
                    flags: list.flags,
                })
            })
            .collect()
    }

    /// Rewrite composition decisions the way a real device does: content
    /// layers get the configured claim, the frame target is left alone.
    fn decide(claim: CompositionType, layers: &mut [Layer]) {
        let content = layers.len() - 1;
        for layer in &mut layers[..content] {
            layer.composition_type = claim;
        }
    }
}

impl ComposerDevice for MockDevice {
    fn api_version(&self) -> ApiVersion {
        self.state.lock().unwrap().version
    }

    fn query(&mut self, capability: Capability) -> bool {
        let state = self.state.lock().unwrap();
        state.supported_capabilities.contains(&capability)
    }

    fn prepare(&mut self, displays: &mut DisplayContents<'_>) -> Result<(), HwcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Prepare(Self::snapshot(displays)));
        if let Some(status) = state.fail_next_prepare.take() {
            return Err(HwcError::DeviceCallFailed(status));
        }
        let claim = state.claim;
        drop(state);
        for slot in displays.iter_mut().flatten() {
            Self::decide(claim, slot.layers_mut());
        }
        Ok(())
    }

    fn set(&mut self, displays: &mut DisplayContents<'_>) -> Result<(), HwcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Set(Self::snapshot(displays)));
        if let Some(status) = state.fail_next_set.take() {
            return Err(HwcError::DeviceCallFailed(status));
        }
        let (retire, release) = (state.retire_fence, state.release_fence);
        drop(state);
        for slot in displays.iter_mut().flatten() {
            slot.retire_fence = retire;
            for layer in slot.layers_mut() {
                if layer.composition_type == CompositionType::Overlay {
                    layer.release_fence = release;
                }
            }
        }
        Ok(())
    }

    fn event_control(
        &mut self,
        slot: DisplaySlot,
        event: DeviceEvent,
        enable: bool,
    ) -> Result<(), HwcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::EventControl { slot, event, enable });
        if state.fail_event_control {
            return Err(HwcError::DeviceCallFailed(-1));
        }
        if event == DeviceEvent::Vsync {
            state.vsync_enabled = enable;
        }
        Ok(())
    }

    fn register_procs(&mut self, _procs: EventCallbacks) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::RegisterProcs);
        state.procs_registered = true;
    }
}
