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

//! Error types for the reverb core.

/// Result type for reverb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a [`crate::ReverbFilter`] can report.
///
/// Only construction is fallible. `process()` treats a buffer that is too
/// short for the given frame/channel count, or a non-positive sample
/// rate, as a silent no-op rather than a reportable error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested preset name does not match one of the canonical
    /// presets in [`crate::preset::PRESETS`].
    #[error("unknown reverb preset: {name:?}")]
    UnknownPreset {
        /// The name that was looked up.
        name: String,
    },
}
