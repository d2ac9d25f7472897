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

//! The public streaming filter: owns a preset, the reverb tick engine,
//! and the rate converter, and mixes wet reverb into a host audio buffer.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{Error, Result};
use crate::preset::{self, Preset};
use crate::q15::{float_to_q15, q15_to_float};
use crate::resampler::RateConverter;
use crate::tick::ReverbEngine;

/// A streaming stereo reverb effect bound to one of the ten canonical PSX
/// SPU presets.
///
/// One instance owns its entire state (work area, rate-converter
/// history, wet scalar); nothing is shared across instances except the
/// read-only preset table. See `DESIGN.md` for the module's grounding.
pub struct ReverbFilter {
    preset: &'static Preset,
    engine: ReverbEngine,
    converter: RateConverter,
    wet_bits: AtomicU32,
}

impl ReverbFilter {
    /// Construct a filter bound to `preset_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] if `preset_name` does not match
    /// one of the ten canonical presets.
    pub fn new(preset_name: &str) -> Result<Self> {
        let preset = preset::lookup(preset_name)?;
        log::debug!("reverb filter bound to preset {:?}", preset.name);
        Ok(Self {
            preset,
            engine: ReverbEngine::new(),
            converter: RateConverter::new(),
            wet_bits: AtomicU32::new(1.0f32.to_bits()),
        })
    }

    /// The name of the bound preset.
    pub fn preset_name(&self) -> &'static str {
        self.preset.name
    }

    /// Zero the work area and rate-converter history, and reset the
    /// cursor. The bound preset and wet scalar are unaffected.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.converter.reset();
        log::trace!("reverb filter reset ({:?})", self.preset.name);
    }

    /// Atomically update the wet scalar (clamped to `[0.0, 1.0]`). May be
    /// called from a different thread than the one calling [`process`](
    /// Self::process); the new value takes effect no later than the next
    /// `process` call.
    pub fn set_wet(&self, wet: f32) {
        let clamped = wet.clamp(0.0, 1.0);
        self.wet_bits.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Current wet scalar.
    pub fn wet(&self) -> f32 {
        f32::from_bits(self.wet_bits.load(Ordering::Relaxed))
    }

    /// Process `frame_count` frames of interleaved audio in place.
    ///
    /// `channels` must be 1 (mono, right duplicated from left on input
    /// and reverb averaged back to mono on output) or 2 (stereo
    /// interleaved: sample `i`, channel `c` lives at `i * channels + c`).
    /// `host_sample_rate` is the host's sample rate in Hz.
    ///
    /// Invalid buffer geometry (`channels` not 1 or 2, or `buffer` too
    /// short for `frame_count * channels`) or a non-positive sample rate
    /// make this a silent no-op, per the core's error-handling design:
    /// these are host programming errors, not reportable runtime faults,
    /// and the hot path must not allocate or branch into error-reporting
    /// code.
    pub fn process(
        &mut self,
        buffer: &mut [f32],
        frame_count: usize,
        channels: usize,
        host_sample_rate: f32,
    ) {
        if channels == 0 || channels > 2 {
            log::warn!("reverb filter: invalid channel count {channels}, skipping block");
            return;
        }
        if host_sample_rate <= 0.0 {
            log::warn!("reverb filter: invalid sample rate {host_sample_rate}, skipping block");
            return;
        }
        if buffer.len() < frame_count * channels {
            log::warn!(
                "reverb filter: buffer too short for {frame_count} frames * {channels} channels, skipping block"
            );
            return;
        }

        let wet = self.wet();
        let host_rate = f64::from(host_sample_rate);

        for frame in 0..frame_count {
            let base = frame * channels;
            let (dry_l, dry_r) = if channels == 2 {
                (buffer[base], buffer[base + 1])
            } else {
                (buffer[base], buffer[base])
            };

            let in_l = float_to_q15(dry_l);
            let in_r = float_to_q15(dry_r);

            let preset = self.preset;
            let engine = &mut self.engine;
            let (wet_l, wet_r) = self.converter.step(host_rate, in_l, in_r, |l, r| {
                engine.tick(preset, (l, r))
            });

            let wet_l = q15_to_float(wet_l) * wet;
            let wet_r = q15_to_float(wet_r) * wet;

            if channels == 2 {
                buffer[base] = dry_l + wet_l;
                buffer[base + 1] = dry_r + wet_r;
            } else {
                buffer[base] = dry_l + 0.5 * (wet_l + wet_r);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_name_fails_construction() {
        let err = ReverbFilter::new("Cathedral").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownPreset {
                name: "Cathedral".to_string()
            }
        );
    }

    #[test]
    fn every_canonical_preset_constructs() {
        for name in [
            "Room",
            "Studio Small",
            "Studio Medium",
            "Studio Large",
            "Hall",
            "Half Echo",
            "Space Echo",
            "Chaos Echo",
            "Delay",
            "Reverb Off",
        ] {
            assert!(ReverbFilter::new(name).is_ok());
        }
    }

    #[test]
    fn default_wet_is_unity() {
        let filter = ReverbFilter::new("Hall").unwrap();
        assert_eq!(filter.wet(), 1.0);
    }

    #[test]
    fn set_wet_clamps_to_unit_interval() {
        let filter = ReverbFilter::new("Hall").unwrap();
        filter.set_wet(5.0);
        assert_eq!(filter.wet(), 1.0);
        filter.set_wet(-5.0);
        assert_eq!(filter.wet(), 0.0);
    }

    #[test]
    fn silence_in_is_silence_out_for_every_preset() {
        for name in ["Room", "Hall", "Space Echo", "Chaos Echo", "Delay"] {
            let mut filter = ReverbFilter::new(name).unwrap();
            let mut buffer = vec![0.0f32; 4096 * 2];
            filter.process(&mut buffer, 4096, 2, 44100.0);
            for sample in &buffer {
                assert!(sample.abs() < 1e-5, "{name} leaked energy from silence");
            }
        }
    }

    #[test]
    fn reverb_off_with_zero_wet_is_bit_exact_identity() {
        let mut filter = ReverbFilter::new("Reverb Off").unwrap();
        filter.set_wet(0.0);
        let original: Vec<f32> = (0..512).map(|i| ((i as f32) * 0.01).sin() * 0.5).collect();
        let mut buffer = original.clone();
        filter.process(&mut buffer, 256, 2, 44100.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn zero_wet_still_advances_the_tick_cursor() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        filter.set_wet(0.0);
        let mut buffer = vec![0.1f32; 500 * 2];
        filter.process(&mut buffer, 500, 2, 22050.0);
        // At the SPU's native 22.05 kHz rate one tick runs per host frame,
        // so muting the wet mix must not stop the cursor from advancing.
        assert_eq!(filter.engine.cursor(), 500);
    }

    #[test]
    fn muting_and_unmuting_wet_mid_stream_matches_a_constantly_wet_run() {
        let impulse_buffer = |frames: usize| {
            let mut buffer = vec![0.0f32; frames * 2];
            buffer[0] = 1.0;
            buffer
        };

        let mut muted = ReverbFilter::new("Hall").unwrap();
        let mut reference = ReverbFilter::new("Hall").unwrap();

        let mut buf_muted = impulse_buffer(6000);
        let mut buf_reference = impulse_buffer(6000);

        // `muted` runs silent (wet = 0) for the first 2000 frames, then
        // unmutes; `reference` stays fully wet throughout. Both must still
        // tick and advance their cursor/converter state identically frame
        // for frame, so the post-unmute tail must match exactly.
        muted.set_wet(0.0);
        muted.process(&mut buf_muted[..2000 * 2], 2000, 2, 44100.0);
        muted.set_wet(1.0);
        muted.process(&mut buf_muted[2000 * 2..], 4000, 2, 44100.0);

        reference.process(&mut buf_reference, 6000, 2, 44100.0);

        assert_eq!(
            muted.engine.cursor(),
            reference.engine.cursor(),
            "cursor must advance the same whether or not wet was muted"
        );
    }

    #[test]
    fn reverb_off_with_full_wet_is_near_silent_contribution() {
        let mut filter = ReverbFilter::new("Reverb Off").unwrap();
        let mut buffer = vec![0.0f32; 2048 * 2];
        buffer[0] = 1.0;
        filter.process(&mut buffer, 2048, 2, 44100.0);
        for sample in buffer.iter().skip(2) {
            assert!(sample.abs() < 1e-3);
        }
    }

    #[test]
    fn invalid_channel_count_is_a_silent_no_op() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        let original = vec![0.25f32, -0.25, 0.5, -0.5];
        let mut buffer = original.clone();
        filter.process(&mut buffer, 2, 3, 44100.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn non_positive_sample_rate_is_a_silent_no_op() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        let original = vec![0.25f32, -0.25];
        let mut buffer = original.clone();
        filter.process(&mut buffer, 1, 2, 0.0);
        assert_eq!(buffer, original);
        filter.process(&mut buffer, 1, 2, -44100.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn buffer_shorter_than_requested_frames_is_a_silent_no_op() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        let original = vec![0.1f32, 0.2, 0.3];
        let mut buffer = original.clone();
        filter.process(&mut buffer, 10, 2, 44100.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn mono_input_duplicates_left_into_right_internally() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        let mut buffer = vec![0.0f32; 1024];
        buffer[0] = 1.0;
        filter.process(&mut buffer, 1024, 1, 44100.0);
        assert!(buffer.iter().any(|s| s.abs() > 1e-6));
        for sample in &buffer {
            assert!(sample.is_finite());
        }
    }

    #[test]
    fn impulse_produces_decaying_not_exploding_output() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        let mut buffer = vec![0.0f32; 8192 * 2];
        buffer[0] = 1.0;
        filter.process(&mut buffer, 8192, 2, 44100.0);
        for sample in &buffer {
            assert!(sample.is_finite());
            assert!(sample.abs() <= 1.5);
        }
    }

    #[test]
    fn two_fresh_instances_are_deterministic() {
        let mut a = ReverbFilter::new("Studio Medium").unwrap();
        let mut b = ReverbFilter::new("Studio Medium").unwrap();
        let input: Vec<f32> = (0..2048).map(|i| ((i as f32) * 0.03).sin() * 0.3).collect();
        let mut buf_a = input.clone();
        let mut buf_b = input;
        a.process(&mut buf_a, 1024, 2, 48000.0);
        b.process(&mut buf_b, 1024, 2, 48000.0);
        assert_eq!(buf_a, buf_b);
    }

    #[test]
    fn reset_returns_to_silence_in_silence_out() {
        let mut filter = ReverbFilter::new("Hall").unwrap();
        let mut buffer = vec![0.0f32; 4096 * 2];
        buffer[0] = 1.0;
        filter.process(&mut buffer, 4096, 2, 44100.0);
        filter.reset();
        let mut silent = vec![0.0f32; 2048 * 2];
        filter.process(&mut silent, 2048, 2, 44100.0);
        for sample in &silent {
            assert!(sample.abs() < 1e-5);
        }
    }
}
