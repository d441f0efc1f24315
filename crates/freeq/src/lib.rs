//! FreeQ
//! =====
//!
//! A ten-band parametric equalizer built as a VST3-style shared library.
//! The crate compiles both as an `rlib` for tests and tooling and as the
//! `cdylib` (`libfreeq.so`) that `freeq-bundle` packages into
//! `~/.vst3/FreeQ.vst3`.

pub mod eq;
pub mod params;

pub use eq::Equalizer;
pub use params::{
    parameter_descriptors, BandParams, EqParams, ParamDescriptor, ParamError, BAND_COUNT,
};

/// Metadata describing the plugin to a loading host.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub vendor: &'static str,
    pub version: &'static str,
    pub url: &'static str,
}

/// Stable plugin identifier, shared with hosts that have the plugin in
/// their databases.
pub const PLUGIN_ID: &str = "dab90007-3947-458d-b1b8-7c1b82b72146";

pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        id: PLUGIN_ID,
        name: "FreeQ",
        vendor: "Hjalte Nannestad",
        version: env!("CARGO_PKG_VERSION"),
        url: env!("CARGO_PKG_HOMEPAGE"),
    }
}

/// Creates an equalizer instance for a loading host.
///
/// The returned pointer is owned by the caller and must be released with
/// [`freeq_destroy`].
#[no_mangle]
pub extern "C" fn freeq_create() -> *mut Equalizer {
    Box::into_raw(Box::new(Equalizer::new()))
}

/// Releases an instance created by [`freeq_create`].
///
/// # Safety
///
/// `instance` must be a pointer previously returned by [`freeq_create`]
/// that has not already been destroyed. A null pointer is ignored.
#[no_mangle]
pub unsafe extern "C" fn freeq_destroy(instance: *mut Equalizer) {
    if !instance.is_null() {
        drop(unsafe { Box::from_raw(instance) });
    }
}
