// src/bridge/mod.rs

//! `CompositionBridge` - the orchestrator between per-frame layer lists and
//! the vendor compositor device.
//!
//! ## Frame protocol
//! The compositor loop builds a `LayerList` per display slot, calls
//! `prepare` to learn which layers the device will composite itself,
//! renders the declined layers into the frame-target buffer, then calls
//! `commit` to hand the frame off. Both halves are one batched device call
//! covering all slots, with null slots for displays not in use.
//!
//! ## Threading model
//! All bridge operations must be serialized through one compositor loop;
//! the bridge does no locking of its own. Device event callbacks arrive on
//! device-owned contexts (see `crate::events`).
//!
//! ## Failure model
//! Every error is recoverable: no device means software compositing for the
//! bridge's lifetime, a failed device call means the frame is dropped and
//! retried next cycle. No failure leaves the device needing another call to
//! unblock.

use log::{debug, trace, warn};

use crate::config::BridgeConfig;
use crate::device::{Capability, ComposerDevice, DeviceEvent, DisplayContents, DisplaySlot};
use crate::error::HwcError;
use crate::events::EventCallbacks;
use crate::fence::Fence;
use crate::geometry::RectI;
use crate::layer::{Blending, BufferHandle, CompositionType, LayerFlags, LayerList, ListFlags, SourceCrop};
use crate::version::{ApiVersion, CropField, VersionProfile};


/// Version reported when no device could be opened.
const FALLBACK_VERSION: ApiVersion = ApiVersion::new(1, 0);

pub struct CompositionBridge {
    device: Option<Box<dyn ComposerDevice>>,
    /// Fixed at open; never re-read from the device.
    api_version: ApiVersion,
    config: BridgeConfig,
    callbacks_registered: bool,
}

impl CompositionBridge {
    /// Builds a bridge over an opened device, or over nothing.
    ///
    /// A `None` device leaves the bridge constructible and inert: every
    /// subsequent operation fails soft with `DeviceUnavailable` and the
    /// caller composites in software. This mirrors platforms where the
    /// compositor module simply is not present.
    pub fn new(device: Option<Box<dyn ComposerDevice>>, config: BridgeConfig) -> Self {
        let api_version = match &device {
            Some(device) => device.api_version(),
            None => {
                warn!("CompositionBridge: no compositor device available");
                FALLBACK_VERSION
            }
        };
        debug!("CompositionBridge: device API version {}", api_version);
        Self {
            device,
            api_version,
            config,
            callbacks_registered: false,
        }
    }

    /// The device API version fixed at open time.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Whether this device revision honors per-layer plane alpha.
    pub fn supports_transparency(&self) -> bool {
        VersionProfile::for_version(self.api_version).plane_alpha
    }

    /// Single capability query. With no open device this is `false` -
    /// capability absence, not failure.
    pub fn query(&mut self, capability: Capability) -> bool {
        match &mut self.device {
            Some(device) => device.query(capability),
            None => false,
        }
    }

    /// First half of the frame for one display slot.
    ///
    /// Populates the list's reserved frame-target slot with `outbuf` (the
    /// buffer already holding the caller-composited output), resets the
    /// retire/outbuf state, raises the geometry flag per the version table,
    /// and dispatches the batched prepare call. On return each layer's
    /// `composition_type` carries the device's decision: `Overlay` layers
    /// are composited by the device, `Framebuffer` layers must be rendered
    /// by the caller before `commit`.
    ///
    /// Ownership of `acquire` transfers to the device only on success. On
    /// any failure the fence is scrubbed from the list and remains the
    /// caller's to close.
    pub fn prepare(
        &mut self,
        slot: DisplaySlot,
        list: &mut LayerList,
        frame: RectI,
        outbuf: BufferHandle,
        acquire: Fence,
    ) -> Result<(), HwcError> {
        if !frame.is_valid() {
            return Err(HwcError::InvalidRect);
        }
        let device = match &mut self.device {
            Some(device) => device,
            None => {
                // The caller still owns `acquire`; without this warning a
                // missing device silently looks like a consumed fence.
                warn!("CompositionBridge: prepare without device, acquire fence stays with caller");
                return Err(HwcError::DeviceUnavailable);
            }
        };

        let profile = VersionProfile::for_version(self.api_version);

        list.retire_fence = Fence::NONE;
        list.outbuf = None;
        list.outbuf_acquire_fence = Fence::NONE;
        list.flags = if profile.geometry_always_changed || list.geometry_changed {
            ListFlags::GEOMETRY_CHANGED
        } else {
            ListFlags::empty()
        };

        let target = list.frame_target_mut();
        target.hints = 0;
        target.flags = LayerFlags::empty();
        target.transform = 0;
        target.buffer = Some(outbuf);
        target.blending = Blending::Premultiplied;
        target.composition_type = CompositionType::FramebufferTarget;
        target.source_crop = match profile.crop {
            CropField::Integer => SourceCrop::Int(frame),
            CropField::Float => SourceCrop::Float(frame.into()),
        };
        target.display_frame = frame;
        target.visible_region = vec![frame];
        target.acquire_fence = acquire;
        target.release_fence = Fence::NONE;
        if profile.plane_alpha {
            target.plane_alpha = 0xFF;
        }

        if self.config.dump_slot == Some(slot) {
            dump_list("prepare", slot, list);
        }

        let result = {
            let mut displays: DisplayContents<'_> = [None, None, None];
            displays[slot.index()] = Some(&mut *list);
            device.prepare(&mut displays)
        };

        if let Err(err) = result {
            // Ownership contract: the device consumed nothing. Scrub the
            // fence so a retried frame cannot resubmit a stale descriptor.
            let _ = list.frame_target_mut().acquire_fence.take();
            warn!("CompositionBridge: prepare failed ({err}), caller must close acquire fence");
            return Err(err);
        }
        Ok(())
    }

    /// Second half of the frame: atomic hand-off of the finalized list.
    ///
    /// `None` submits a null slot, forcing the device to a blank/safe
    /// composition state for that display (the teardown idiom, see
    /// [`reset`](Self::reset)). On failure the frame is dropped; acquire
    /// fences the caller still owns for it are unconsumed and must be
    /// closed by the caller to avoid descriptor leaks.
    pub fn commit(
        &mut self,
        slot: DisplaySlot,
        list: Option<&mut LayerList>,
    ) -> Result<(), HwcError> {
        let device = self.device.as_mut().ok_or(HwcError::DeviceUnavailable)?;

        if self.config.dump_slot == Some(slot) {
            if let Some(list) = list.as_deref() {
                dump_list("set", slot, list);
            }
        }

        let mut displays: DisplayContents<'_> = [None, None, None];
        displays[slot.index()] = list;
        device.set(&mut displays)
    }

    /// Forces the primary display to a blank composition state.
    pub fn reset(&mut self) -> Result<(), HwcError> {
        self.commit(DisplaySlot::Primary, None)
    }

    /// Enables or disables hardware vsync delivery on the primary display.
    ///
    /// Below the supported version floor this reports
    /// `UnsupportedCapability` without touching the device; the caller
    /// falls back to a software-timed vsync source.
    pub fn enable_vsync(&mut self, enable: bool) -> Result<(), HwcError> {
        let profile = VersionProfile::for_version(self.api_version);
        let device = self.device.as_mut().ok_or(HwcError::DeviceUnavailable)?;
        if !profile.hardware_vsync {
            return Err(HwcError::UnsupportedCapability);
        }
        device.event_control(DisplaySlot::Primary, DeviceEvent::Vsync, enable)
    }

    /// Installs the invalidate/vsync/hotplug procedure table, exactly once.
    ///
    /// Vsync is disabled first, unconditionally; it stays off until the
    /// caller re-enables it with an explicit `enable_vsync(true)`.
    pub fn register_event_callbacks(&mut self, procs: EventCallbacks) -> Result<(), HwcError> {
        let device = self.device.as_mut().ok_or(HwcError::DeviceUnavailable)?;
        if self.callbacks_registered {
            return Err(HwcError::CallbacksAlreadyRegistered);
        }

        // Disable vsync before the table goes live so no callback fires
        // into a half-initialized registrant. Best effort: a device that
        // cannot control vsync still gets the table.
        if let Err(err) = device.event_control(DisplaySlot::Primary, DeviceEvent::Vsync, false) {
            debug!("CompositionBridge: pre-registration vsync disable failed: {err}");
        }
        device.register_procs(procs);
        self.callbacks_registered = true;
        Ok(())
    }
}

/// Trace-level dump of a submitted list, one line per layer.
fn dump_list(phase: &str, slot: DisplaySlot, list: &LayerList) {
    trace!(
        "--- {phase} {slot:?}: {} layers, flags {:?}, retire {:?} ---",
        list.len(),
        list.flags,
        list.retire_fence
    );
    for (i, layer) in list.layers().iter().enumerate() {
        trace!(
            "layer #{i}: type {:?} blend {:?} buffer {:?} frame {:?} crop {:?} \
             acquire {:?} release {:?} alpha {} visible rects {}",
            layer.composition_type,
            layer.blending,
            layer.buffer,
            layer.display_frame,
            layer.source_crop,
            layer.acquire_fence,
            layer.release_fence,
            layer.plane_alpha,
            layer.visible_region.len()
        );
    }
}
