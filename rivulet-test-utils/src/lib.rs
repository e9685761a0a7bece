// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the rivulet workspace.
//!
//! - [`MockTransport`]: a transport whose calls stay pending until the test
//!   resolves them, counting calls and aborted calls.
//! - [`Recorder`]: a subscriber callback that records every notification.
//! - [`helpers`]: async assertions over streams.

pub mod helpers;
pub mod mock_transport;
pub mod recorder;

pub use self::helpers::{assert_no_element_emitted, next_item, settle};
pub use self::mock_transport::MockTransport;
pub use self::recorder::{record, Recorder};
