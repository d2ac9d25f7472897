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

//! The ten canonical PSX SPU reverb presets.
//!
//! Every preset is a fixed record of reflection/comb/all-pass gains
//! (`v*`, Q15) and work-area offsets (`m*`/`d*`, word indices relative to
//! the moving cursor described in [`crate::ram`]). Field order follows the
//! 32-word literal layout documented for the preset table, with `vLIN`/
//! `vRIN` fixed at `0x8000` (`-1.0`) for every preset and `vROUT` set equal
//! to `vLOUT` (see `DESIGN.md`, Open Question 1).

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single reverb preset: every coefficient and work-area offset the
/// tick engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,

    pub v_iir: i16,
    pub v_wall: i16,

    pub m_base: u16,

    pub d_apf1: u16,
    pub d_apf2: u16,
    pub v_apf1: i16,
    pub v_apf2: i16,

    pub v_comb1: i16,
    pub v_comb2: i16,
    pub v_comb3: i16,
    pub v_comb4: i16,

    pub d_lsame: u16,
    pub d_rsame: u16,
    pub d_ldiff: u16,
    pub d_rdiff: u16,

    pub m_lsame: u16,
    pub m_rsame: u16,
    pub m_ldiff: u16,
    pub m_rdiff: u16,

    pub m_lcomb1: u16,
    pub m_rcomb1: u16,
    pub m_lcomb2: u16,
    pub m_rcomb2: u16,
    pub m_lcomb3: u16,
    pub m_rcomb3: u16,
    pub m_lcomb4: u16,
    pub m_rcomb4: u16,

    pub m_lapf1: u16,
    pub m_rapf1: u16,
    pub m_lapf2: u16,
    pub m_rapf2: u16,

    pub v_lout: i16,
    pub v_rout: i16,
    pub v_lin: i16,
    pub v_rin: i16,
}

/// `Preset` serializes/deserializes as just its canonical `name`: every
/// field is derived from the name via the static [`PRESETS`] table, so a
/// host's config struct only needs to persist which preset is active.
/// `name` is `&'static str`, which `serde_derive` cannot generate a
/// `Deserialize` impl for (it would require borrowing from the
/// deserializer for an arbitrary lifetime), so both directions are
/// implemented by hand instead.
impl Serialize for Preset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.name.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Preset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        lookup(&name).map(|p| *p).map_err(serde::de::Error::custom)
    }
}

/// Build a [`Preset`] from its 32 raw words, in the canonical field order
/// documented above, appending the constant `vLIN`/`vRIN` pair and
/// mirroring `vLOUT` into `vROUT`.
const fn from_words(name: &'static str, w: [u16; 32]) -> Preset {
    Preset {
        name,
        v_iir: w[0] as i16,
        v_wall: w[1] as i16,
        m_base: w[2],
        d_apf1: w[3],
        d_apf2: w[4],
        v_apf1: w[5] as i16,
        v_apf2: w[6] as i16,
        v_comb1: w[7] as i16,
        v_comb2: w[8] as i16,
        v_comb3: w[9] as i16,
        v_comb4: w[10] as i16,
        d_lsame: w[11],
        d_rsame: w[12],
        d_ldiff: w[13],
        d_rdiff: w[14],
        m_lsame: w[15],
        m_rsame: w[16],
        m_ldiff: w[17],
        m_rdiff: w[18],
        m_lcomb1: w[19],
        m_rcomb1: w[20],
        m_lcomb2: w[21],
        m_rcomb2: w[22],
        m_lcomb3: w[23],
        m_rcomb3: w[24],
        m_lcomb4: w[25],
        m_rcomb4: w[26],
        m_lapf1: w[27],
        m_rapf1: w[28],
        m_lapf2: w[29],
        m_rapf2: w[30],
        v_lout: w[31] as i16,
        v_rout: w[31] as i16,
        v_lin: 0x8000u16 as i16,
        v_rin: 0x8000u16 as i16,
    }
}

/// The ten canonical presets, in their customary listing order.
pub static PRESETS: [Preset; 10] = [
    from_words(
        "Room",
        [
            0x007D, 0x005B, 0x6D80, 0x54B8, 0xBED0, 0x0000, 0x0000, 0xBA80, 0x5800, 0x5300,
            0x04D6, 0x0333, 0x03F0, 0x0227, 0x0374, 0x01EF, 0x0334, 0x01B5, 0x0000, 0x0000,
            0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x01B4, 0x0136, 0x00B8, 0x005C,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Studio Small",
        [
            0x0033, 0x0025, 0x70F0, 0x4FA8, 0xBCE0, 0x4410, 0xC0F0, 0x9C00, 0x5280, 0x4EC0,
            0x03E4, 0x031B, 0x03A4, 0x02AF, 0x0372, 0x0266, 0x031C, 0x025D, 0x025C, 0x018E,
            0x022F, 0x0135, 0x01D2, 0x00B7, 0x018F, 0x00B5, 0x00B4, 0x0080, 0x004C, 0x0026,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Studio Medium",
        [
            0x00B1, 0x007F, 0x70F0, 0x4FA8, 0xBCE0, 0x4510, 0xBEF0, 0xB4C0, 0x5280, 0x4EC0,
            0x0904, 0x076B, 0x0824, 0x065F, 0x07A2, 0x0616, 0x076C, 0x05ED, 0x05EC, 0x042E,
            0x050F, 0x0305, 0x0462, 0x02B7, 0x042F, 0x0265, 0x0264, 0x01B2, 0x0100, 0x0080,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Studio Large",
        [
            0x00E3, 0x00A9, 0x6F60, 0x4FA8, 0xBCE0, 0x4510, 0xBEF0, 0xA680, 0x5680, 0x52C0,
            0x0DFB, 0x0B58, 0x0D09, 0x0A3C, 0x0BD9, 0x0973, 0x0B59, 0x08DA, 0x08D9, 0x05E9,
            0x07EC, 0x04B0, 0x06EF, 0x03D2, 0x05EA, 0x031D, 0x031C, 0x0238, 0x0154, 0x00AA,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Hall",
        [
            0x01A5, 0x0139, 0x6000, 0x5000, 0x4C00, 0xB800, 0xBC00, 0xC000, 0x6000, 0x5C00,
            0x15BA, 0x11BB, 0x14C2, 0x10BD, 0x11BC, 0x0DC1, 0x11C0, 0x0DC3, 0x0DC0, 0x09C1,
            0x0BC4, 0x07C1, 0x0A00, 0x06CD, 0x09C2, 0x05C1, 0x05C0, 0x041A, 0x0274, 0x013A,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Half Echo",
        [
            0x0017, 0x0013, 0x70F0, 0x4FA8, 0xBCE0, 0x4510, 0xBEF0, 0x8500, 0x5F80, 0x54C0,
            0x0371, 0x02AF, 0x02E5, 0x01DF, 0x02B0, 0x01D7, 0x0358, 0x026A, 0x01D6, 0x011E,
            0x012D, 0x00B1, 0x011F, 0x0059, 0x01A0, 0x00E3, 0x0058, 0x0040, 0x0028, 0x0014,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Space Echo",
        [
            0x033D, 0x0231, 0x7E00, 0x5000, 0xB400, 0xB000, 0x4C00, 0xB000, 0x6000, 0x5400,
            0x1ED6, 0x1A31, 0x1D14, 0x183B, 0x1BC2, 0x16B2, 0x1A32, 0x15EF, 0x15EE, 0x1055,
            0x1334, 0x0F2D, 0x11F6, 0x0C5D, 0x1056, 0x0AE1, 0x0AE0, 0x07A2, 0x0464, 0x0232,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Chaos Echo",
        [
            0x0001, 0x0001, 0x7FFF, 0x7FFF, 0x0000, 0x0000, 0x0000, 0x8100, 0x0000, 0x0000,
            0x1FFF, 0x0FFF, 0x1005, 0x0005, 0x0000, 0x0000, 0x1005, 0x0005, 0x0000, 0x0000,
            0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x1004, 0x1002, 0x0004, 0x0002,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Delay",
        [
            0x0001, 0x0001, 0x7FFF, 0x7FFF, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
            0x1FFF, 0x0FFF, 0x1005, 0x0005, 0x0000, 0x0000, 0x1005, 0x0005, 0x0000, 0x0000,
            0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x1004, 0x1002, 0x0004, 0x0002,
            0x8000, 0x8000,
        ],
    ),
    from_words(
        "Reverb Off",
        [
            0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
            0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0000, 0x0000, 0x0001, 0x0001,
            0x0001, 0x0001, 0x0001, 0x0001, 0x0000, 0x0000, 0x0001, 0x0001, 0x0001, 0x0001,
            0x0000, 0x0000,
        ],
    ),
];

/// Look up a preset by exact, case-sensitive name.
pub fn lookup(name: &str) -> Result<&'static Preset, Error> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::UnknownPreset {
            name: name.to_string(),
        })
}
