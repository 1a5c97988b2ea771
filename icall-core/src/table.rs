//! Compiled-in native call tables.

/// Declares a `static` slice of [`CallEntry`](crate::CallEntry) rows.
///
/// Each row is `(id, function, flags)`; the function's path becomes the
/// entry's symbol name. Rows must be listed in strictly increasing id order;
/// [`Registry::from_static`](crate::Registry::from_static) rejects the table otherwise.
///
/// ```
/// use icall_core::{icall_table, Registry, RegistryConfig};
///
/// extern "C" fn tick_count() -> i32 { 42 }
/// extern "C" fn processor_count() -> i32 { 1 }
///
/// icall_table! {
///     static ENVIRONMENT = [
///         (10, processor_count, 0),
///         (11, tick_count, 0),
///     ];
/// }
///
/// let registry = Registry::from_static("corlib", ENVIRONMENT, RegistryConfig::default()).unwrap();
/// assert_eq!(registry.symbol_of(11), Some("tick_count"));
/// ```
#[macro_export]
macro_rules! icall_table {
    ($(#[$meta:meta])* $vis:vis static $name:ident = [ $( ($id:expr, $func:path, $flags:expr) ),* $(,)? ];) => {
        $(#[$meta])*
        $vis static $name: &[$crate::CallEntry] = &[
            $(
                $crate::CallEntry::new(
                    $id,
                    $crate::NativeFn::new($func as *const ()),
                    $crate::CallFlags::from_raw($flags),
                )
                .with_symbol(stringify!($func)),
            )*
        ];
    };
}
