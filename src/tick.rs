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

//! The reverb tick: one stereo sample processed at the fixed 22.05 kHz
//! SPU rate.

use crate::preset::Preset;
use crate::q15::{mul_q15, mul_q15_wide, sat16};
use crate::ram::ReverbRam;

/// Owns the work area and cursor; runs one preset's algorithm per call to
/// [`ReverbEngine::tick`].
pub struct ReverbEngine {
    ram: ReverbRam,
}

impl ReverbEngine {
    pub fn new() -> Self {
        Self {
            ram: ReverbRam::new(),
        }
    }

    pub fn reset(&mut self) {
        self.ram.reset();
        log::trace!("reverb engine reset");
    }

    /// Word cursor, exposed for the cursor-progression property test.
    pub fn cursor(&self) -> u32 {
        self.ram.cursor()
    }

    /// Run one 22.05 kHz reverb tick and return the wet stereo sample.
    ///
    /// Every named intermediate below (`sum`, `x`, `lout`/`rout`, ...) is
    /// carried as a wide `i32` accumulator rather than a saturating
    /// `i16`. The work area only clamps a value down to its 16-bit
    /// register range at the point it is actually written (`ram.write`,
    /// which saturates internally): that's the only place an
    /// out-of-range accumulator gets clipped, not every `+`/`-` in the
    /// formulas below. The one other saturation point is the final
    /// stereo sample handed back to the caller, which is a real 16-bit
    /// output register too.
    #[inline(always)]
    pub fn tick(&mut self, preset: &Preset, input: (i16, i16)) -> (i16, i16) {
        let ram = &mut self.ram;

        let lin = mul_q15(input.0, preset.v_lin);
        let rin = mul_q15(input.1, preset.v_rin);

        // Same-side IIR reflection, left.
        let prev = ram.read(i32::from(preset.m_lsame) - 1);
        let ds_l = ram.read(i32::from(preset.d_lsame));
        let sum = i32::from(lin) + i32::from(mul_q15(ds_l, preset.v_wall)) - i32::from(prev);
        let x = mul_q15_wide(sum, preset.v_iir) + i32::from(prev);
        ram.write(i32::from(preset.m_lsame), x);

        // Same-side IIR reflection, right.
        let prev = ram.read(i32::from(preset.m_rsame) - 1);
        let ds_r = ram.read(i32::from(preset.d_rsame));
        let sum = i32::from(rin) + i32::from(mul_q15(ds_r, preset.v_wall)) - i32::from(prev);
        let x = mul_q15_wide(sum, preset.v_iir) + i32::from(prev);
        ram.write(i32::from(preset.m_rsame), x);

        // Different-side IIR reflection, left (reads the right channel's
        // delay line; the cross-coupling is intentional, not a typo).
        let prev = ram.read(i32::from(preset.m_ldiff) - 1);
        let dr_r = ram.read(i32::from(preset.d_rdiff));
        let sum = i32::from(lin) + i32::from(mul_q15(dr_r, preset.v_wall)) - i32::from(prev);
        let x = mul_q15_wide(sum, preset.v_iir) + i32::from(prev);
        ram.write(i32::from(preset.m_ldiff), x);

        // Different-side IIR reflection, right.
        let prev = ram.read(i32::from(preset.m_rdiff) - 1);
        let dl_l = ram.read(i32::from(preset.d_ldiff));
        let sum = i32::from(rin) + i32::from(mul_q15(dl_l, preset.v_wall)) - i32::from(prev);
        let x = mul_q15_wide(sum, preset.v_iir) + i32::from(prev);
        ram.write(i32::from(preset.m_rdiff), x);

        // 4-tap comb sum, left and right.
        let mut lout = i32::from(mul_q15(ram.read(i32::from(preset.m_lcomb1)), preset.v_comb1));
        lout += i32::from(mul_q15(ram.read(i32::from(preset.m_lcomb2)), preset.v_comb2));
        lout += i32::from(mul_q15(ram.read(i32::from(preset.m_lcomb3)), preset.v_comb3));
        lout += i32::from(mul_q15(ram.read(i32::from(preset.m_lcomb4)), preset.v_comb4));

        let mut rout = i32::from(mul_q15(ram.read(i32::from(preset.m_rcomb1)), preset.v_comb1));
        rout += i32::from(mul_q15(ram.read(i32::from(preset.m_rcomb2)), preset.v_comb2));
        rout += i32::from(mul_q15(ram.read(i32::from(preset.m_rcomb3)), preset.v_comb3));
        rout += i32::from(mul_q15(ram.read(i32::from(preset.m_rcomb4)), preset.v_comb4));

        // All-pass stage 1, left.
        let fb = ram.read(i32::from(preset.m_lapf1) - i32::from(preset.d_apf1));
        let x = lout - i32::from(mul_q15(fb, preset.v_apf1));
        ram.write(i32::from(preset.m_lapf1), x);
        lout = mul_q15_wide(x, preset.v_apf1) + i32::from(fb);

        // All-pass stage 1, right.
        let fb = ram.read(i32::from(preset.m_rapf1) - i32::from(preset.d_apf1));
        let x = rout - i32::from(mul_q15(fb, preset.v_apf1));
        ram.write(i32::from(preset.m_rapf1), x);
        rout = mul_q15_wide(x, preset.v_apf1) + i32::from(fb);

        // All-pass stage 2, left.
        let fb = ram.read(i32::from(preset.m_lapf2) - i32::from(preset.d_apf2));
        let x = lout - i32::from(mul_q15(fb, preset.v_apf2));
        ram.write(i32::from(preset.m_lapf2), x);
        lout = mul_q15_wide(x, preset.v_apf2) + i32::from(fb);

        // All-pass stage 2, right.
        let fb = ram.read(i32::from(preset.m_rapf2) - i32::from(preset.d_apf2));
        let x = rout - i32::from(mul_q15(fb, preset.v_apf2));
        ram.write(i32::from(preset.m_rapf2), x);
        rout = mul_q15_wide(x, preset.v_apf2) + i32::from(fb);

        // Output coupling: this is the one non-`write` point where the
        // wide accumulator becomes a real 16-bit register again, since
        // it is handed back to the caller as the tick's output sample.
        let lout = sat16(mul_q15_wide(lout, preset.v_lout));
        let rout = sat16(mul_q15_wide(rout, preset.v_rout));

        ram.advance(preset.m_base);

        (lout, rout)
    }
}

impl Default for ReverbEngine {
    fn default() -> Self {
        Self::new()
    }
}
