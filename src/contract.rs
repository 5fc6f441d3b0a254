//! Precondition checks for the per-element hot path.
//!
//! Out-of-bounds indices and wrong-length bulk assignment are programmer
//! errors. [`contract_assert!`] panics with a message naming the violated
//! bound when checks are enabled (debug builds, or the `contract-checks`
//! feature) and compiles to nothing otherwise.
//!
//! With checks disabled a violation is not detected here. The crate has no
//! `unsafe`, so the outcome is an unspecified element or a slice-index
//! panic further down, never a read outside the allocation.

/// Whether contract checks are compiled into this build.
pub const CONTRACT_CHECKS: bool = cfg!(any(debug_assertions, feature = "contract-checks"));

macro_rules! contract_assert {
    ($cond:expr, $($arg:tt)+) => {
        if $crate::contract::CONTRACT_CHECKS && !$cond {
            panic!("contract violation: {}", format_args!($($arg)+));
        }
    };
}

pub(crate) use contract_assert;
