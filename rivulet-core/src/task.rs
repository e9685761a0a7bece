// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic spawning of the futures that drive in-flight operations.
//!
//! Select the executor via feature flags: `runtime-tokio` (default) or
//! `runtime-smol`. The spawned future is detached; operations stop it
//! cooperatively through their [`CancellationToken`](crate::CancellationToken).

use core::future::Future;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("rivulet-core needs one of the `runtime-tokio` or `runtime-smol` features");

/// Spawn `future` on the configured runtime without keeping a handle to it.
///
/// # Panics
///
/// With `runtime-tokio`, panics when called outside of a Tokio runtime.
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "runtime-tokio")]
    {
        drop(tokio::spawn(future));
    }

    #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
    smol::spawn(future).detach();
}
