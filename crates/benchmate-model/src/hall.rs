// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::{Deserialize, Serialize};

/// Number of seats on a single bench.
pub const SEATS_PER_BENCH: u32 = 2;

/// An examination hall.
///
/// A hall offers `capacity` seats arranged on two-seat benches, so it can hold
/// `ceil(capacity / 2)` benches. An odd capacity therefore rounds up to a full
/// bench.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hall {
    name: String,
    capacity: u32,
}

impl Hall {
    /// Creates a new `Hall`.
    ///
    /// A zero capacity is accepted here and rejected by `Venue::new`.
    #[inline]
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }

    /// Returns the unique name of this hall.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of seats in this hall.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of benches this hall can hold, `ceil(capacity / 2)`.
    #[inline]
    pub fn bench_count(&self) -> u32 {
        self.capacity.div_ceil(SEATS_PER_BENCH)
    }
}

impl std::fmt::Display for Hall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (capacity: {}, benches: {})",
            self.name,
            self.capacity,
            self.bench_count()
        )
    }
}
