// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing and clock module.
//!
//! This module provides the clock used to timestamp recordings and the
//! wait used to pace playback.

pub mod clock;

pub use clock::{Clock, SystemClock, ThreadWaiter, VirtualClock, Waiter};
