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

//! Bench assignment.
//!
//! The assigner walks an interleaved student sequence two at a time and places
//! each pair on the next bench of the current hall. Halls are processed in
//! byte-wise name order and share a single cursor into the sequence, so
//! students are consumed continuously across halls rather than being split up
//! front.
//!
//! When the two students at the cursor share a department, the assigner scans
//! forward for the first student of a different department and swaps it into
//! the second slot. If no such student exists anywhere ahead, the bench is
//! skipped: both students stay unseated, the cursor moves past them, and the
//! bench number still advances, which leaves a gap in the numbering of that
//! hall. Every skip is recorded as a `SkippedBench`.
//!
//! ## Numbering
//!
//! `bench_number` starts at 1 in every hall and advances once per slot, emitted
//! or skipped. `row` starts at 1 and advances after an emitted bench whose
//! successor number is a multiple of `benches_per_row`. The row is a coarse
//! block marker, not a physical seating row.
//!
//! ## Leftovers
//!
//! Students remaining once every hall has met its quota, or a single student
//! left at the end of the sequence, are reported in `unseated` together with
//! the students of skipped benches.

use benchmate_model::{
    input::{InputError, Venue},
    plan::Bench,
    student::Student,
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// The default number of bench numbers per row block.
pub const DEFAULT_BENCHES_PER_ROW: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

/// A bench slot that was consumed without emitting a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkippedBench {
    pub hall_name: String,
    pub row: u32,
    pub bench_number: u32,
    /// The two students that could not be paired, in sequence order.
    pub roll_numbers: [String; 2],
}

impl std::fmt::Display for SkippedBench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} row {} bench {} (unpaired: {}, {})",
            self.hall_name,
            self.row,
            self.bench_number,
            self.roll_numbers[0],
            self.roll_numbers[1]
        )
    }
}

/// The raw output of a bench assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchAssignment {
    /// Emitted benches in hall-then-position order.
    pub benches: Vec<Bench>,
    /// Slots skipped because no compatible partner was left.
    pub skipped: Vec<SkippedBench>,
    /// Roll numbers of every student without a seat, in the order reached.
    pub unseated: Vec<String>,
    /// Number of lookahead swaps performed to resolve collisions.
    pub swaps: usize,
}

/// Pairs an interleaved sequence onto hall benches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchAssigner {
    benches_per_row: NonZeroU32,
}

impl Default for BenchAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_BENCHES_PER_ROW)
    }
}

impl BenchAssigner {
    /// Creates an assigner that opens a new row block every `benches_per_row` bench numbers.
    #[inline]
    pub fn new(benches_per_row: NonZeroU32) -> Self {
        Self { benches_per_row }
    }

    /// Returns the row block width.
    #[inline]
    pub fn benches_per_row(&self) -> NonZeroU32 {
        self.benches_per_row
    }

    /// Assigns `sequence` to the benches of `venue`.
    ///
    /// The sequence is reordered in place by collision swaps; after the call it
    /// reflects the order in which students were actually considered. Hall
    /// names in a `Venue` are unique, so every emitted bench has a distinct
    /// `(hall_name, row, bench_number)` position.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoStudents` if `sequence` is empty.
    pub fn assign(
        &self,
        sequence: &mut [&Student],
        venue: &Venue,
    ) -> Result<BenchAssignment, InputError> {
        if sequence.is_empty() {
            return Err(InputError::NoStudents);
        }

        let per_row = self.benches_per_row.get();
        let mut benches = Vec::with_capacity(sequence.len() / 2);
        let mut skipped = Vec::new();
        let mut unseated = Vec::new();
        let mut swaps = 0usize;
        let mut cursor = 0usize;

        for hall in venue.halls_by_name() {
            let quota = hall.bench_count();
            let mut slots_used = 0u32;
            let mut row = 1u32;
            let mut bench_number = 1u32;
            let emitted_before = benches.len();
            let skipped_before = skipped.len();

            while slots_used < quota && cursor + 1 < sequence.len() {
                let first = sequence[cursor];

                if first.shares_department_with(sequence[cursor + 1]) {
                    match find_partner(sequence, cursor + 2, first.department()) {
                        Some(partner) => {
                            sequence.swap(cursor + 1, partner);
                            swaps += 1;
                        }
                        None => {
                            let second = sequence[cursor + 1];
                            tracing::warn!(
                                hall = hall.name(),
                                row,
                                bench = bench_number,
                                department = first.department(),
                                "no partner from another department left; skipping bench"
                            );
                            skipped.push(SkippedBench {
                                hall_name: hall.name().to_owned(),
                                row,
                                bench_number,
                                roll_numbers: [
                                    first.roll_number().to_owned(),
                                    second.roll_number().to_owned(),
                                ],
                            });
                            unseated.push(first.roll_number().to_owned());
                            unseated.push(second.roll_number().to_owned());
                            cursor += 2;
                            bench_number += 1;
                            slots_used += 1;
                            continue;
                        }
                    }
                }

                let second = sequence[cursor + 1];
                benches.push(Bench::new(hall.name(), row, bench_number, first, second));
                cursor += 2;
                bench_number += 1;
                slots_used += 1;

                if bench_number % per_row == 0 {
                    row += 1;
                }
            }

            tracing::debug!(
                hall = hall.name(),
                quota,
                emitted = benches.len() - emitted_before,
                skipped = skipped.len() - skipped_before,
                "hall filled"
            );
        }

        if let Some(rest) = sequence.get(cursor..) {
            unseated.extend(rest.iter().map(|s| s.roll_number().to_owned()));
        }

        Ok(BenchAssignment {
            benches,
            skipped,
            unseated,
            swaps,
        })
    }
}

/// Returns the index of the first student at or after `from` whose department
/// differs from `department`.
#[inline]
fn find_partner(sequence: &[&Student], from: usize, department: &str) -> Option<usize> {
    sequence
        .get(from..)?
        .iter()
        .position(|s| s.department() != department)
        .map(|offset| from + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchmate_model::hall::Hall;

    fn st(roll: &str, dept: &str) -> Student {
        Student::new(format!("id-{roll}"), roll, dept)
    }

    fn per_row(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn venue(halls: Vec<Hall>) -> Venue {
        Venue::new(halls).unwrap()
    }

    fn pairs(benches: &[Bench]) -> Vec<(&str, &str)> {
        benches
            .iter()
            .map(|b| (b.seat_a.roll_number.as_str(), b.seat_b.roll_number.as_str()))
            .collect()
    }

    #[test]
    fn test_rejects_empty_sequence() {
        let students = vec![st("1", "A"), st("2", "B")];
        let mut seq: Vec<&Student> = students.iter().collect();
        let assigner = BenchAssigner::default();

        assert_eq!(
            assigner.assign(&mut [], &venue(vec![Hall::new("H", 4)])),
            Err(InputError::NoStudents)
        );
        assert!(assigner.assign(&mut seq, &venue(vec![Hall::new("H", 4)])).is_ok());
    }

    #[test]
    fn test_duplicate_hall_names_never_reach_assigner() {
        // Two halls sharing a name would both number their benches from (1, 1).
        assert_eq!(
            Venue::new(vec![Hall::new("H", 2), Hall::new("H", 2)]),
            Err(InputError::DuplicateHallName("H".to_string()))
        );

        let students: Vec<Student> = (0..4)
            .map(|i| st(&format!("r{i}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let mut seq: Vec<&Student> = students.iter().collect();
        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 2), Hall::new("I", 2)]))
            .unwrap();

        let keys: Vec<(&str, u32, u32)> = out.benches.iter().map(|b| b.position()).collect();
        assert_eq!(keys, vec![("H", 1, 1), ("I", 1, 1)]);
    }

    #[test]
    fn test_pairs_compatible_neighbours_in_order() {
        let students = vec![st("1", "A"), st("2", "B"), st("3", "A"), st("4", "B")];
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 4)]))
            .unwrap();

        assert_eq!(
            pairs(&out.benches),
            vec![("1", "2"), ("3", "4")]
        );
        assert_eq!(out.benches[0].bench_number, 1);
        assert_eq!(out.benches[1].bench_number, 2);
        assert!(out.skipped.is_empty());
        assert!(out.unseated.is_empty());
        assert_eq!(out.swaps, 0);
    }

    #[test]
    fn test_collision_swaps_first_compatible_student_forward() {
        let students = vec![
            st("a1", "A"),
            st("a2", "A"),
            st("a3", "A"),
            st("b1", "B"),
            st("b2", "B"),
        ];
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 10)]))
            .unwrap();

        // a2 trades places with b1, then a3 collides with a2 and pulls b2 forward.
        assert_eq!(
            pairs(&out.benches),
            vec![("a1", "b1"), ("a3", "b2")]
        );
        assert_eq!(out.swaps, 2);
        assert_eq!(out.unseated, vec!["a2".to_string()]);
        let order: Vec<&str> = seq.iter().map(|s| s.roll_number()).collect();
        assert_eq!(order, vec!["a1", "b1", "a3", "b2", "a2"]);
    }

    #[test]
    fn test_unresolvable_collision_skips_bench_but_advances_number() {
        let students = vec![
            st("a1", "A"),
            st("b1", "B"),
            st("c1", "C"),
            st("c2", "C"),
            st("c3", "C"),
            st("c4", "C"),
        ];
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 6)]))
            .unwrap();

        assert_eq!(pairs(&out.benches), vec![("a1", "b1")]);
        assert_eq!(out.skipped.len(), 2);
        assert_eq!(out.skipped[0].bench_number, 2);
        assert_eq!(out.skipped[0].roll_numbers, ["c1".to_string(), "c2".to_string()]);
        assert_eq!(out.skipped[1].bench_number, 3);
        assert_eq!(out.unseated, vec!["c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_skipped_slots_count_against_quota() {
        let students = vec![
            st("x1", "X"),
            st("x2", "X"),
            st("x3", "X"),
            st("x4", "X"),
            st("x5", "X"),
            st("x6", "X"),
        ];
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("A", 2), Hall::new("B", 2)]))
            .unwrap();

        assert!(out.benches.is_empty());
        let slots: Vec<(&str, u32)> = out
            .skipped
            .iter()
            .map(|s| (s.hall_name.as_str(), s.bench_number))
            .collect();
        assert_eq!(slots, vec![("A", 1), ("B", 1)]);
        assert_eq!(out.unseated, vec!["x1", "x2", "x3", "x4", "x5", "x6"]);
    }

    #[test]
    fn test_halls_are_filled_in_bytewise_name_order_with_shared_cursor() {
        let students: Vec<Student> = (0..8)
            .map(|i| st(&format!("r{i}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let mut seq: Vec<&Student> = students.iter().collect();
        let halls = vec![Hall::new("b", 2), Hall::new("a", 3), Hall::new("B", 2)];

        let out = BenchAssigner::default().assign(&mut seq, &venue(halls)).unwrap();

        let placed: Vec<(&str, u32, &str)> = out
            .benches
            .iter()
            .map(|b| (b.hall_name.as_str(), b.bench_number, b.seat_a.roll_number.as_str()))
            .collect();
        assert_eq!(
            placed,
            vec![("B", 1, "r0"), ("a", 1, "r2"), ("a", 2, "r4"), ("b", 1, "r6")]
        );
        assert!(out.unseated.is_empty());
    }

    #[test]
    fn test_row_advances_every_ten_benches() {
        let students: Vec<Student> = (0..50)
            .map(|i| st(&format!("r{i:02}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 50)]))
            .unwrap();

        let rows: Vec<(u32, u32)> = out.benches.iter().map(|b| (b.bench_number, b.row)).collect();
        assert_eq!(rows.len(), 25);
        // Bench 9 is emitted in row 1; its successor (10) opens row 2.
        assert_eq!(rows[8], (9, 1));
        assert_eq!(rows[9], (10, 2));
        assert_eq!(rows[18], (19, 2));
        assert_eq!(rows[19], (20, 3));
        assert_eq!(rows[24], (25, 3));
    }

    #[test]
    fn test_skipped_slot_advances_bench_number_but_not_row() {
        let mut students: Vec<Student> = (0..16)
            .map(|i| st(&format!("r{i:02}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        students.push(st("x1", "X"));
        students.push(st("x2", "X"));
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 40)]))
            .unwrap();

        let rows: Vec<(u32, u32)> = out.benches.iter().map(|b| (b.row, b.bench_number)).collect();
        assert_eq!(rows, (1..=8).map(|n| (1, n)).collect::<Vec<_>>());
        assert_eq!(out.skipped.len(), 1);
        assert_eq!((out.skipped[0].row, out.skipped[0].bench_number), (1, 9));
        assert_eq!(out.unseated, vec!["x1", "x2"]);
    }

    #[test]
    fn test_consecutive_skips_across_row_boundary_stay_in_row() {
        // An emitted bench 9 would open row 2 for bench 10. Skipped slots never
        // advance the row, so both skips are recorded in row 1.
        let mut students: Vec<Student> = (0..16)
            .map(|i| st(&format!("r{i:02}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        students.extend((1..=4).map(|i| st(&format!("x{i}"), "X")));
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 40)]))
            .unwrap();

        assert_eq!(out.benches.len(), 8);
        assert!(out.benches.iter().all(|b| b.row == 1));
        let skipped: Vec<(u32, u32)> = out.skipped.iter().map(|s| (s.row, s.bench_number)).collect();
        assert_eq!(skipped, vec![(1, 9), (1, 10)]);
        assert_eq!(out.unseated, vec!["x1", "x2", "x3", "x4"]);
    }

    #[test]
    fn test_custom_row_width() {
        let students: Vec<Student> = (0..12)
            .map(|i| st(&format!("r{i:02}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::new(per_row(3))
            .assign(&mut seq, &venue(vec![Hall::new("H", 12)]))
            .unwrap();

        let rows: Vec<u32> = out.benches.iter().map(|b| b.row).collect();
        assert_eq!(rows, vec![1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn test_numbering_resets_per_hall() {
        let students: Vec<Student> = (0..8)
            .map(|i| st(&format!("r{i}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::new(per_row(2))
            .assign(&mut seq, &venue(vec![Hall::new("H1", 4), Hall::new("H2", 4)]))
            .unwrap();

        let keys: Vec<(&str, u32, u32)> = out.benches.iter().map(|b| b.position()).collect();
        assert_eq!(
            keys,
            vec![("H1", 1, 1), ("H1", 2, 2), ("H2", 1, 1), ("H2", 2, 2)]
        );
    }

    #[test]
    fn test_leftovers_when_capacity_runs_out() {
        let students: Vec<Student> = (0..7)
            .map(|i| st(&format!("r{i}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 3)]))
            .unwrap();

        assert_eq!(out.benches.len(), 2);
        assert_eq!(out.unseated, vec!["r4", "r5", "r6"]);
    }

    #[test]
    fn test_odd_student_out_is_unseated() {
        let students = vec![st("1", "A"), st("2", "B"), st("3", "C")];
        let mut seq: Vec<&Student> = students.iter().collect();

        let out = BenchAssigner::default()
            .assign(&mut seq, &venue(vec![Hall::new("H", 10)]))
            .unwrap();

        assert_eq!(out.benches.len(), 1);
        assert_eq!(out.unseated, vec!["3"]);
    }

    #[test]
    fn test_find_partner() {
        let students = vec![st("1", "A"), st("2", "A"), st("3", "B")];
        let seq: Vec<&Student> = students.iter().collect();
        assert_eq!(find_partner(&seq, 1, "A"), Some(2));
        assert_eq!(find_partner(&seq, 1, "B"), Some(1));
        assert_eq!(find_partner(&seq, 3, "A"), None);
        assert_eq!(find_partner(&seq, 10, "A"), None);
    }

    #[test]
    fn test_skipped_bench_display() {
        let skipped = SkippedBench {
            hall_name: "H".into(),
            row: 1,
            bench_number: 4,
            roll_numbers: ["x1".into(), "x2".into()],
        };
        assert_eq!(skipped.to_string(), "H row 1 bench 4 (unpaired: x1, x2)");
    }
}
