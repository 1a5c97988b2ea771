#![allow(dead_code)]

use icall_core::{CallEntry, CallFlags, NativeFn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

pub extern "C" fn fn_a() -> i32 {
    0xA
}

pub extern "C" fn fn_b() -> i32 {
    0xB
}

pub extern "C" fn fn_c() -> i32 {
    0xC
}

pub fn target(f: extern "C" fn() -> i32) -> NativeFn {
    NativeFn::new(f as *const ())
}

pub fn entry(id: u32, f: extern "C" fn() -> i32, flags: u8) -> CallEntry {
    CallEntry::new(id, target(f), CallFlags::from_raw(flags))
}

/// Calls through a resolved target the way a runtime stub would.
pub fn invoke(target: NativeFn) -> i32 {
    let f: extern "C" fn() -> i32 = unsafe { target.cast() };
    f()
}
