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

/// Counters describing one allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatistics {
    /// Number of students supplied.
    pub students: usize,
    /// Number of halls supplied.
    pub halls: usize,
    /// Sum of all hall capacities.
    pub total_capacity: u64,
    /// Sum of all hall bench quotas.
    pub bench_quota: u64,
    /// Number of bench records emitted.
    pub benches_emitted: usize,
    /// Number of bench slots consumed without a record.
    pub benches_skipped: usize,
    /// Number of lookahead swaps used to resolve department collisions.
    pub collision_swaps: usize,
    /// Number of students with a seat.
    pub seated: usize,
    /// Number of students without a seat.
    pub unseated: usize,
    /// Wall-clock duration of the run.
    pub duration: std::time::Duration,
}

impl std::fmt::Display for AllocationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Statistics:")?;
        writeln!(f, "  Students: {}", self.students)?;
        writeln!(f, "  Halls: {}", self.halls)?;
        writeln!(f, "  Total Capacity: {}", self.total_capacity)?;
        writeln!(f, "  Bench Quota: {}", self.bench_quota)?;
        writeln!(f, "  Benches Emitted: {}", self.benches_emitted)?;
        writeln!(f, "  Benches Skipped: {}", self.benches_skipped)?;
        writeln!(f, "  Collision Swaps: {}", self.collision_swaps)?;
        writeln!(f, "  Seated: {}", self.seated)?;
        writeln!(f, "  Unseated: {}", self.unseated)?;
        writeln!(
            f,
            "  Duration (secs): {:.3}",
            self.duration.as_secs_f64()
        )
    }
}

/// Builder for `AllocationStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationStatisticsBuilder {
    students: usize,
    halls: usize,
    total_capacity: u64,
    bench_quota: u64,
    benches_emitted: usize,
    benches_skipped: usize,
    collision_swaps: usize,
    seated: usize,
    unseated: usize,
    duration: std::time::Duration,
}

impl AllocationStatisticsBuilder {
    /// Creates a builder with every counter at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of students supplied.
    #[inline]
    pub fn students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }

    /// Sets the number of halls supplied.
    #[inline]
    pub fn halls(mut self, halls: usize) -> Self {
        self.halls = halls;
        self
    }

    /// Sets the total seat capacity.
    #[inline]
    pub fn total_capacity(mut self, total_capacity: u64) -> Self {
        self.total_capacity = total_capacity;
        self
    }

    /// Sets the total bench quota.
    #[inline]
    pub fn bench_quota(mut self, bench_quota: u64) -> Self {
        self.bench_quota = bench_quota;
        self
    }

    /// Sets the number of emitted benches.
    #[inline]
    pub fn benches_emitted(mut self, benches_emitted: usize) -> Self {
        self.benches_emitted = benches_emitted;
        self
    }

    /// Sets the number of skipped bench slots.
    #[inline]
    pub fn benches_skipped(mut self, benches_skipped: usize) -> Self {
        self.benches_skipped = benches_skipped;
        self
    }

    /// Sets the number of collision swaps.
    #[inline]
    pub fn collision_swaps(mut self, collision_swaps: usize) -> Self {
        self.collision_swaps = collision_swaps;
        self
    }

    /// Sets the number of seated students.
    #[inline]
    pub fn seated(mut self, seated: usize) -> Self {
        self.seated = seated;
        self
    }

    /// Sets the number of unseated students.
    #[inline]
    pub fn unseated(mut self, unseated: usize) -> Self {
        self.unseated = unseated;
        self
    }

    /// Sets the run duration.
    #[inline]
    pub fn duration(mut self, duration: std::time::Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Builds the `AllocationStatistics` instance.
    #[inline]
    pub fn build(self) -> AllocationStatistics {
        AllocationStatistics {
            students: self.students,
            halls: self.halls,
            total_capacity: self.total_capacity,
            bench_quota: self.bench_quota,
            benches_emitted: self.benches_emitted,
            benches_skipped: self.benches_skipped,
            collision_swaps: self.collision_swaps,
            seated: self.seated,
            unseated: self.unseated,
            duration: self.duration,
        }
    }
}
