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

//! # Allocation Pipeline
//!
//! The `Allocator` wires the four stages together:
//!
//! 1. input checks (building a `Roster` and a `Venue`),
//! 2. department interleaving with the caller's random source,
//! 3. bench assignment across halls in byte-wise name order,
//! 4. validation of the produced plan.
//!
//! `allocate` runs stages 1–3 and hands back everything it learned, including
//! the benches it had to skip and the students left without a seat.
//! `generate` additionally runs stage 4 and turns any finding into an
//! `AllocationError::Rejected`, which is the all-or-nothing acceptance rule a
//! persistence layer should apply before replacing a stored plan.
//!
//! The allocator holds no state between calls. Two calls with equal inputs and
//! equally seeded generators produce identical allocations.
//!
//! ## Usage
//!
//! ```rust
//! use benchmate_alloc::allocator::Allocator;
//! use benchmate_model::{hall::Hall, student::Student};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let students = vec![
//!     Student::new("1", "CS-01", "CS"),
//!     Student::new("2", "EE-01", "EE"),
//! ];
//! let halls = vec![Hall::new("Main", 2)];
//!
//! let allocation = Allocator::default()
//!     .generate(&students, &halls, &mut StdRng::seed_from_u64(7))
//!     .unwrap();
//! assert_eq!(allocation.plan().len(), 1);
//! ```

use crate::{
    assign::{BenchAssigner, SkippedBench},
    config::AllocatorConfig,
    error::AllocationError,
    interleave::interleave_departments,
    stats::{AllocationStatistics, AllocationStatisticsBuilder},
    validate::{Finding, Validator},
};
use benchmate_model::{
    hall::Hall,
    input::{Roster, Venue},
    plan::SeatingPlan,
    student::Student,
};
use rand::Rng;
use std::time::Instant;

/// Everything one allocation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    plan: SeatingPlan,
    sequence: Vec<String>,
    skipped: Vec<SkippedBench>,
    unseated: Vec<String>,
    statistics: AllocationStatistics,
}

impl Allocation {
    /// Returns the seating plan.
    #[inline]
    pub fn plan(&self) -> &SeatingPlan {
        &self.plan
    }

    /// Returns the roll numbers in the order the assigner considered them,
    /// after interleaving and collision swaps.
    #[inline]
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    /// Returns the bench slots consumed without a record.
    #[inline]
    pub fn skipped(&self) -> &[SkippedBench] {
        &self.skipped
    }

    /// Returns the roll numbers of every student left without a seat.
    #[inline]
    pub fn unseated(&self) -> &[String] {
        &self.unseated
    }

    /// Returns the run statistics.
    #[inline]
    pub fn statistics(&self) -> &AllocationStatistics {
        &self.statistics
    }

    /// Returns `true` if every student received a seat.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unseated.is_empty()
    }

    /// Consumes the allocation and returns the plan.
    #[inline]
    pub fn into_plan(self) -> SeatingPlan {
        self.plan
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.plan)?;
        writeln!(f)?;
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped Benches:")?;
            for skipped in &self.skipped {
                writeln!(f, "  {}", skipped)?;
            }
        }
        if !self.unseated.is_empty() {
            writeln!(f, "Unseated: {}", self.unseated.join(", "))?;
        }
        write!(f, "{}", self.statistics)
    }
}

/// A stateless, configurable allocation pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator with the given configuration.
    #[inline]
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this allocator.
    #[inline]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Interleaves `students` by department and assigns them to the benches of `halls`.
    ///
    /// The plan is returned without validation; see `generate`.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::Input` if either list is empty or fails the
    /// roster and venue checks. Nothing is computed in that case.
    pub fn allocate<R>(
        &self,
        students: &[Student],
        halls: &[Hall],
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        let roster = Roster::new(students.to_vec())?;
        let venue = Venue::new(halls.to_vec())?;
        self.allocate_checked(&roster, &venue, rng)
    }

    /// Like `allocate`, for inputs that already passed the roster and venue checks.
    ///
    /// # Errors
    ///
    /// Never fails for a `Roster` and a `Venue`, since both are non-empty.
    pub fn allocate_checked<R>(
        &self,
        roster: &Roster,
        venue: &Venue,
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        let span = tracing::info_span!("allocate", students = roster.len(), halls = venue.len());
        let _enter = span.enter();
        let start = Instant::now();

        let mut sequence = interleave_departments(roster.students(), rng);
        let assigned = BenchAssigner::new(self.config.benches_per_row).assign(&mut sequence, venue)?;

        let plan = SeatingPlan::new(assigned.benches);
        let statistics = AllocationStatisticsBuilder::new()
            .students(roster.len())
            .halls(venue.len())
            .total_capacity(venue.total_capacity())
            .bench_quota(venue.total_bench_count())
            .benches_emitted(plan.len())
            .benches_skipped(assigned.skipped.len())
            .collision_swaps(assigned.swaps)
            .seated(plan.seated_count())
            .unseated(assigned.unseated.len())
            .duration(start.elapsed())
            .build();

        if !assigned.unseated.is_empty() {
            tracing::warn!(
                unseated = assigned.unseated.len(),
                skipped_benches = assigned.skipped.len(),
                "students left without a seat"
            );
        }
        tracing::info!(
            benches = statistics.benches_emitted,
            seated = statistics.seated,
            unseated = statistics.unseated,
            swaps = statistics.collision_swaps,
            "allocation finished"
        );

        Ok(Allocation {
            plan,
            sequence: sequence
                .iter()
                .map(|s| s.roll_number().to_owned())
                .collect(),
            skipped: assigned.skipped,
            unseated: assigned.unseated,
            statistics,
        })
    }

    /// Checks `plan` with this allocator's validator settings.
    #[inline]
    pub fn validate(&self, plan: &SeatingPlan) -> Vec<Finding> {
        Validator::new(self.config.validator).findings(plan.benches())
    }

    /// Allocates and validates in one step.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::Input` as for `allocate`, or
    /// `AllocationError::Rejected` carrying every finding if the plan fails
    /// validation. A rejected plan must be discarded as a whole.
    pub fn generate<R>(
        &self,
        students: &[Student],
        halls: &[Hall],
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        let allocation = self.allocate(students, halls, rng)?;
        let findings = self.validate(allocation.plan());
        if !findings.is_empty() {
            tracing::warn!(findings = findings.len(), "seating plan rejected");
            return Err(AllocationError::Rejected { findings });
        }
        Ok(allocation)
    }
}

/// Allocates with the default configuration.
///
/// # Errors
///
/// See `Allocator::allocate`.
#[inline]
pub fn allocate<R>(
    students: &[Student],
    halls: &[Hall],
    rng: &mut R,
) -> Result<Allocation, AllocationError>
where
    R: Rng + ?Sized,
{
    Allocator::default().allocate(students, halls, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidatorConfig;
    use benchmate_model::{input::InputError, plan::Bench};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn st(roll: &str, dept: &str) -> Student {
        Student::new(format!("id-{roll}"), roll, dept)
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn cohort(depts: &[(&str, usize)]) -> Vec<Student> {
        depts
            .iter()
            .flat_map(|&(d, n)| (0..n).map(move |i| st(&format!("{d}-{i:03}"), d)))
            .collect()
    }

    #[test]
    fn test_rejects_empty_inputs_before_computing() {
        let halls = vec![Hall::new("H", 4)];
        assert_eq!(
            allocate(&[], &halls, &mut rng(0)),
            Err(AllocationError::Input(InputError::NoStudents))
        );
        let students = vec![st("1", "A")];
        assert_eq!(
            allocate(&students, &[], &mut rng(0)),
            Err(AllocationError::Input(InputError::NoHalls))
        );
    }

    #[test]
    fn test_rejects_duplicate_roll_numbers() {
        let students = vec![st("1", "A"), st("1", "B")];
        let err = allocate(&students, &[Hall::new("H", 4)], &mut rng(0)).unwrap_err();
        assert_eq!(
            err,
            AllocationError::Input(InputError::DuplicateRollNumber("1".into()))
        );
    }

    #[test]
    fn test_rejects_duplicate_hall_names() {
        let students = vec![st("1", "A"), st("2", "B"), st("3", "A"), st("4", "B")];
        let halls = vec![Hall::new("H", 2), Hall::new("H", 2)];
        assert_eq!(
            allocate(&students, &halls, &mut rng(0)),
            Err(AllocationError::Input(InputError::DuplicateHallName("H".into())))
        );
    }

    #[test]
    fn test_allocate_checked_matches_allocate() {
        let students = cohort(&[("A", 4), ("B", 3), ("C", 2)]);
        let halls = vec![Hall::new("Y", 5), Hall::new("X", 4)];
        let roster = Roster::new(students.clone()).unwrap();
        let venue = Venue::new(halls.clone()).unwrap();

        let a = allocate(&students, &halls, &mut rng(5)).unwrap();
        let b = Allocator::default()
            .allocate_checked(&roster, &venue, &mut rng(5))
            .unwrap();

        assert_eq!(a.plan(), b.plan());
        assert_eq!(a.statistics().bench_quota, venue.total_bench_count());
        assert_eq!(a.statistics().total_capacity, venue.total_capacity());
    }

    #[test]
    fn test_statistics_reflect_the_run() {
        let students = cohort(&[("A", 3), ("B", 3), ("C", 3), ("D", 3), ("E", 1)]);
        let halls = vec![Hall::new("H1", 6), Hall::new("H2", 6)];

        let allocation = allocate(&students, &halls, &mut rng(3)).unwrap();
        let stats = allocation.statistics();

        assert_eq!(stats.students, 13);
        assert_eq!(stats.halls, 2);
        assert_eq!(stats.total_capacity, 12);
        assert_eq!(stats.bench_quota, 6);
        assert_eq!(stats.benches_emitted, allocation.plan().len());
        assert_eq!(stats.seated + stats.unseated, 13);
        assert_eq!(stats.unseated, allocation.unseated().len());
        assert!(!allocation.is_complete());
    }

    #[test]
    fn test_sequence_covers_every_student_once() {
        let students = cohort(&[("A", 5), ("B", 2), ("C", 4)]);
        let allocation = allocate(&students, &[Hall::new("H", 20)], &mut rng(8)).unwrap();

        let mut seq = allocation.sequence().to_vec();
        seq.sort();
        let mut want: Vec<String> = students.iter().map(|s| s.roll_number().to_owned()).collect();
        want.sort();
        assert_eq!(seq, want);
    }

    #[test]
    fn test_same_seed_same_allocation() {
        let students = cohort(&[("A", 7), ("B", 5), ("C", 6), ("D", 2)]);
        let halls = vec![Hall::new("Z", 9), Hall::new("Y", 11)];

        let a = allocate(&students, &halls, &mut rng(42)).unwrap();
        let b = allocate(&students, &halls, &mut rng(42)).unwrap();

        assert_eq!(a.plan(), b.plan());
        assert_eq!(a.sequence(), b.sequence());
        assert_eq!(a.unseated(), b.unseated());
    }

    #[test]
    fn test_generate_accepts_clean_plan() {
        let students = cohort(&[("A", 4), ("B", 4)]);
        let allocation = Allocator::default()
            .generate(&students, &[Hall::new("H", 8)], &mut rng(1))
            .unwrap();
        assert_eq!(allocation.plan().len(), 4);
        assert!(allocation.is_complete());
    }

    #[test]
    fn test_validate_uses_configured_checks() {
        let a = st("1", "A");
        let b = st("2", "B");
        let plan = SeatingPlan::new(vec![
            Bench::new("H", 1, 1, &a, &b),
            Bench::new("H", 1, 2, &b, &a),
        ]);

        assert!(Allocator::default().validate(&plan).is_empty());

        let strict = Allocator::new(AllocatorConfig::default().validator(ValidatorConfig::strict()));
        let findings = strict.validate(&plan);
        // One reversed pair and two reused seats.
        assert_eq!(findings.len(), 3);
    }

    #[test]
    fn test_display_includes_plan_and_statistics() {
        let students = vec![st("x1", "X"), st("x2", "X"), st("y1", "Y")];
        let allocation = allocate(&students, &[Hall::new("H", 4)], &mut rng(0)).unwrap();
        let rendered = allocation.to_string();
        assert!(rendered.contains("Seating Plan"));
        assert!(rendered.contains("Unseated: "));
        assert!(rendered.contains("Allocation Statistics:"));
    }
}
