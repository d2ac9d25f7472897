// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! psrx-reverb: a cycle-accurate PlayStation SPU reverb effect core.
//!
//! This crate reproduces the ten canonical PSX SPU reverb presets
//! ("Room", "Studio Small/Medium/Large", "Hall", "Half Echo", "Space
//! Echo", "Chaos Echo", "Delay", "Reverb Off") as a streaming stereo
//! audio filter that a host audio engine can mix into its own buffers at
//! an arbitrary sample rate.
//!
//! # Architecture
//!
//! - [`q15`]: saturating Q15 fixed-point arithmetic primitives.
//! - [`preset`]: the compile-time table of the ten canonical presets.
//! - [`ram`]: the 262,144-word circular SPU work area.
//! - [`fir`]: the 39-tap symmetric FIR used for anti-aliasing/
//!   reconstruction at the rate-converter boundary.
//! - [`tick`]: the reverb tick engine, one stereo sample at 22.05 kHz.
//! - [`resampler`]: the bidirectional host-rate <-> 22.05 kHz converter.
//! - [`filter`]: [`ReverbFilter`], the public streaming entry point.
//!
//! # Example
//!
//! ```
//! use psrx_reverb::ReverbFilter;
//!
//! let mut filter = ReverbFilter::new("Hall")?;
//! let mut block = vec![0.0f32; 256 * 2]; // 256 interleaved stereo frames
//! filter.process(&mut block, 256, 2, 44100.0);
//! # Ok::<(), psrx_reverb::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Only construction is fallible: [`ReverbFilter::new`] returns
//! [`Error::UnknownPreset`] for an unrecognized preset name. `process()`
//! treats invalid buffer geometry or a non-positive sample rate as a
//! silent no-op rather than a reportable error, since the hot path must
//! never allocate, branch into error plumbing, or perform I/O.

pub mod error;
pub mod filter;
pub mod fir;
pub mod preset;
pub mod q15;
pub mod ram;
pub mod resampler;
pub mod tick;

pub use error::{Error, Result};
pub use filter::ReverbFilter;
pub use preset::{Preset, PRESETS};
