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

//! Bidirectional sample-rate conversion between an arbitrary host rate
//! and the fixed 22.05 kHz SPU tick rate.

use crate::fir::Fir;
use crate::q15::sat16;

/// The SPU reverb core always ticks at this fixed rate.
pub const SPU_RATE_HZ: f64 = 22050.0;

/// Phase-accumulator rate converter with anti-alias/reconstruction FIRs
/// on both sides of the tick boundary.
pub struct RateConverter {
    down_fir_l: Fir,
    down_fir_r: Fir,
    up_fir_l: Fir,
    up_fir_r: Fir,

    phase: f64,

    have_prev_host: bool,
    prev_host_l: i16,
    prev_host_r: i16,

    prev_tick_out_l: i16,
    prev_tick_out_r: i16,
    last_tick_out_l: i16,
    last_tick_out_r: i16,
}

impl RateConverter {
    pub fn new() -> Self {
        Self {
            down_fir_l: Fir::new(),
            down_fir_r: Fir::new(),
            up_fir_l: Fir::new(),
            up_fir_r: Fir::new(),
            phase: 0.0,
            have_prev_host: false,
            prev_host_l: 0,
            prev_host_r: 0,
            prev_tick_out_l: 0,
            prev_tick_out_r: 0,
            last_tick_out_l: 0,
            last_tick_out_r: 0,
        }
    }

    pub fn reset(&mut self) {
        self.down_fir_l.reset();
        self.down_fir_r.reset();
        self.up_fir_l.reset();
        self.up_fir_r.reset();
        self.phase = 0.0;
        self.have_prev_host = false;
        self.prev_host_l = 0;
        self.prev_host_r = 0;
        self.prev_tick_out_l = 0;
        self.prev_tick_out_r = 0;
        self.last_tick_out_l = 0;
        self.last_tick_out_r = 0;
    }

    /// Feed one host-rate stereo frame through the converter, running
    /// zero or more SPU ticks via `tick` as the phase accumulator
    /// crosses 1.0, and return the interpolated wet sample for this
    /// host frame.
    pub fn step<F>(&mut self, host_rate_hz: f64, in_l: i16, in_r: i16, mut tick: F) -> (i16, i16)
    where
        F: FnMut(i16, i16) -> (i16, i16),
    {
        let ratio = SPU_RATE_HZ / host_rate_hz;
        self.phase += ratio;

        while self.phase >= 1.0 {
            let (src_l, src_r) = if self.have_prev_host {
                (avg(self.prev_host_l, in_l), avg(self.prev_host_r, in_r))
            } else {
                (in_l, in_r)
            };

            let filt_l = self.down_fir_l.push(src_l);
            let filt_r = self.down_fir_r.push(src_r);

            let (tick_l, tick_r) = tick(filt_l, filt_r);

            let up_l = self.up_fir_l.push(tick_l);
            let up_r = self.up_fir_r.push(tick_r);

            self.prev_tick_out_l = self.last_tick_out_l;
            self.prev_tick_out_r = self.last_tick_out_r;
            self.last_tick_out_l = up_l;
            self.last_tick_out_r = up_r;

            self.phase -= 1.0;
        }

        self.have_prev_host = true;
        self.prev_host_l = in_l;
        self.prev_host_r = in_r;

        let frac = self.phase.clamp(0.0, 1.0) as f32;
        (
            lerp(self.prev_tick_out_l, self.last_tick_out_l, frac),
            lerp(self.prev_tick_out_r, self.last_tick_out_r, frac),
        )
    }
}

impl Default for RateConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[inline(always)]
fn avg(a: i16, b: i16) -> i16 {
    sat16((i32::from(a) + i32::from(b)) / 2)
}

#[inline(always)]
fn lerp(a: i16, b: i16, t: f32) -> i16 {
    let value = (1.0 - t) * f32::from(a) + t * f32::from(b);
    sat16(value.round() as i32)
}
