// src/version.rs

//! Device API versions and the version-dependent behavior table.
//!
//! The device ABI changed shape across revisions: how source crops are
//! serialized, when the geometry-changed flag must be raised, whether
//! hardware vsync timing is trustworthy, and whether per-layer plane alpha
//! exists at all. Rather than scattering version comparisons through the
//! bridge, every version-dependent decision lives in one const table that is
//! looked up once per call.

/// A two-part device API version (e.g. 1.1, 1.3).
///
/// Fixed at device-open time and never changes for the lifetime of a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Which field family a source crop is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropField {
    /// Pre-1.3 devices: integer `sourceCrop`.
    Integer,
    /// 1.3 and up: floating-point `sourceCropF`.
    Float,
}

/// Everything the bridge needs to know about one device revision band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionProfile {
    /// Source crop serialization.
    pub crop: CropField,
    /// Older devices require GEOMETRY_CHANGED on every frame; newer ones
    /// only want it when the layer arrangement actually changed.
    pub geometry_always_changed: bool,
    /// Hardware vsync is only honored on revisions with accurate timing;
    /// below this the caller must run a software-timed vsync source.
    pub hardware_vsync: bool,
    /// Per-layer plane alpha (and with it, transparency) support.
    pub plane_alpha: bool,
}

/// Version floors with their profiles, highest floor first.
///
/// The lookup picks the first row whose floor is <= the device version, so
/// appending a new band means adding one row, not editing branch logic.
const PROFILE_TABLE: &[(ApiVersion, VersionProfile)] = &[
    (
        ApiVersion::new(1, 3),
        VersionProfile {
            crop: CropField::Float,
            geometry_always_changed: false,
            hardware_vsync: true,
            plane_alpha: true,
        },
    ),
    (
        ApiVersion::new(0, 0),
        VersionProfile {
            crop: CropField::Integer,
            geometry_always_changed: true,
            hardware_vsync: false,
            plane_alpha: false,
        },
    ),
];

impl VersionProfile {
    /// Profile for a device version. Total over all versions.
    pub fn for_version(version: ApiVersion) -> VersionProfile {
        // Table is ordered highest-floor-first and ends with a 0.0 floor.
        PROFILE_TABLE
            .iter()
            .find(|(floor, _)| version >= *floor)
            .map(|(_, profile)| *profile)
            .unwrap_or(PROFILE_TABLE[PROFILE_TABLE.len() - 1].1)
    }
}
