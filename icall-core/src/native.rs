//! Identifiers and type-erased native function addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable integer key assigned to a native call at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(pub u32);

impl CallId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for CallId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Address of a native function with its signature erased.
///
/// The registry never calls through a `NativeFn`; it only hands it back to the
/// runtime, which knows the real signature and reinterprets it with
/// [`NativeFn::cast`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeFn(*const ());

// SAFETY: the pointer addresses immutable code and is never dereferenced as data.
unsafe impl Send for NativeFn {}
// SAFETY: see above.
unsafe impl Sync for NativeFn {}

impl NativeFn {
    /// Wraps a function address, typically `some_fn as *const ()`.
    pub const fn new(ptr: *const ()) -> Self {
        Self(ptr)
    }

    pub fn as_ptr(self) -> *const () {
        self.0
    }

    pub fn addr(self) -> usize {
        self.0 as usize
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Reinterprets the address as a typed function pointer.
    ///
    /// # Safety
    ///
    /// `F` must be a function pointer type matching the ABI and signature of
    /// the function this address was taken from.
    pub unsafe fn cast<F: Copy>(self) -> F {
        debug_assert_eq!(
            std::mem::size_of::<F>(),
            std::mem::size_of::<*const ()>(),
            "NativeFn::cast target must be pointer sized"
        );
        unsafe { std::mem::transmute_copy(&self.0) }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({:p})", self.0)
    }
}
