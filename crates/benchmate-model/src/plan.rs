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

//! Seating plan records.
//!
//! A `SeatingPlan` is the ordered list of `Bench` records produced by one
//! allocation run. Each bench is keyed by `(hall_name, row, bench_number)` and
//! holds two `SeatRef` snapshots. Seat A is the left-hand seat and seat B the
//! right-hand seat, which is how `locate` reports a student's position.
//!
//! The plan is a plain value. It does not check its own invariants; that is the
//! job of the validator in `benchmate_alloc`, which can therefore be pointed at
//! plans that came from anywhere (for example a persisted plan read back from
//! storage).

use crate::student::Student;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A denormalized snapshot of a seated student.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatRef {
    pub student_id: String,
    pub roll_number: String,
    pub department: String,
}

impl From<&Student> for SeatRef {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.id().to_owned(),
            roll_number: student.roll_number().to_owned(),
            department: student.department().to_owned(),
        }
    }
}

impl std::fmt::Display for SeatRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.roll_number, self.department)
    }
}

/// A two-seat bench inside a hall.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bench {
    pub hall_name: String,
    pub row: u32,
    pub bench_number: u32,
    pub seat_a: SeatRef,
    pub seat_b: SeatRef,
}

impl Bench {
    /// Creates a bench seating `a` on the left and `b` on the right.
    #[inline]
    pub fn new(
        hall_name: impl Into<String>,
        row: u32,
        bench_number: u32,
        a: &Student,
        b: &Student,
    ) -> Self {
        Self {
            hall_name: hall_name.into(),
            row,
            bench_number,
            seat_a: SeatRef::from(a),
            seat_b: SeatRef::from(b),
        }
    }

    /// Returns the `(hall_name, row, bench_number)` key of this bench.
    #[inline]
    pub fn position(&self) -> (&str, u32, u32) {
        (&self.hall_name, self.row, self.bench_number)
    }

    /// Returns `true` if both seats hold students of the same department.
    #[inline]
    pub fn is_same_department(&self) -> bool {
        self.seat_a.department == self.seat_b.department
    }

    /// Returns both seats, left first.
    #[inline]
    pub fn seats(&self) -> [&SeatRef; 2] {
        [&self.seat_a, &self.seat_b]
    }
}

/// Which side of a bench a student sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatPosition {
    /// Seat A.
    Left,
    /// Seat B.
    Right,
}

impl std::fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatPosition::Left => write!(f, "Left"),
            SeatPosition::Right => write!(f, "Right"),
        }
    }
}

/// Where a single student sits, as answered by `SeatingPlan::locate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatAssignment<'a> {
    pub bench: &'a Bench,
    pub position: SeatPosition,
}

impl<'a> SeatAssignment<'a> {
    /// The seat of the located student.
    #[inline]
    pub fn seat(&self) -> &'a SeatRef {
        match self.position {
            SeatPosition::Left => &self.bench.seat_a,
            SeatPosition::Right => &self.bench.seat_b,
        }
    }

    /// The student sharing the bench.
    #[inline]
    pub fn bench_mate(&self) -> &'a SeatRef {
        match self.position {
            SeatPosition::Left => &self.bench.seat_b,
            SeatPosition::Right => &self.bench.seat_a,
        }
    }
}

/// The complete, ordered output of one allocation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatingPlan {
    benches: Vec<Bench>,
}

impl SeatingPlan {
    /// Creates a plan from benches, keeping their order.
    #[inline]
    pub fn new(benches: Vec<Bench>) -> Self {
        Self { benches }
    }

    /// Returns the benches in plan order.
    #[inline]
    pub fn benches(&self) -> &[Bench] {
        &self.benches
    }

    /// Returns the number of benches.
    #[inline]
    pub fn len(&self) -> usize {
        self.benches.len()
    }

    /// Returns `true` if the plan seats nobody.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.benches.is_empty()
    }

    /// Returns an iterator over the benches in plan order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Bench> {
        self.benches.iter()
    }

    /// Returns the number of occupied seats (two per bench).
    #[inline]
    pub fn seated_count(&self) -> usize {
        self.benches.len().saturating_mul(2)
    }

    /// Returns the benches of one hall, in plan order.
    pub fn benches_in_hall<'a>(&'a self, hall_name: &'a str) -> impl Iterator<Item = &'a Bench> {
        self.benches.iter().filter(move |b| b.hall_name == hall_name)
    }

    /// Groups the benches by hall name.
    ///
    /// Halls are keyed in byte-wise name order; within a hall the plan order is kept.
    pub fn by_hall(&self) -> BTreeMap<&str, Vec<&Bench>> {
        let mut groups: BTreeMap<&str, Vec<&Bench>> = BTreeMap::new();
        for bench in &self.benches {
            groups.entry(bench.hall_name.as_str()).or_default().push(bench);
        }
        groups
    }

    /// Finds the bench and side on which `roll_number` is seated.
    ///
    /// Returns the first match in plan order.
    pub fn locate(&self, roll_number: &str) -> Option<SeatAssignment<'_>> {
        self.benches.iter().find_map(|bench| {
            if bench.seat_a.roll_number == roll_number {
                Some(SeatAssignment {
                    bench,
                    position: SeatPosition::Left,
                })
            } else if bench.seat_b.roll_number == roll_number {
                Some(SeatAssignment {
                    bench,
                    position: SeatPosition::Right,
                })
            } else {
                None
            }
        })
    }

    /// Returns every seated roll number, seat A before seat B, in plan order.
    pub fn seated_roll_numbers(&self) -> Vec<&str> {
        self.benches
            .iter()
            .flat_map(|b| b.seats())
            .map(|s| s.roll_number.as_str())
            .collect()
    }

    /// Consumes the plan and returns the benches.
    #[inline]
    pub fn into_inner(self) -> Vec<Bench> {
        self.benches
    }
}

impl From<Vec<Bench>> for SeatingPlan {
    fn from(benches: Vec<Bench>) -> Self {
        Self::new(benches)
    }
}

impl<'a> IntoIterator for &'a SeatingPlan {
    type Item = &'a Bench;
    type IntoIter = std::slice::Iter<'a, Bench>;

    fn into_iter(self) -> Self::IntoIter {
        self.benches.iter()
    }
}

impl IntoIterator for SeatingPlan {
    type Item = Bench;
    type IntoIter = std::vec::IntoIter<Bench>;

    fn into_iter(self) -> Self::IntoIter {
        self.benches.into_iter()
    }
}

impl std::fmt::Display for SeatingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seating Plan")?;
        writeln!(f, "   Benches: {}", self.len())?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No benches assigned)")?;
            return Ok(());
        }

        writeln!(
            f,
            "   {:<12} | {:<5} | {:<5} | {:<20} | {:<20}",
            "Hall", "Row", "Bench", "Seat A", "Seat B"
        )?;
        writeln!(
            f,
            "   {:-<12}-+-{:-<5}-+-{:-<5}-+-{:-<20}-+-{:-<20}",
            "", "", "", "", ""
        )?;
        for bench in &self.benches {
            writeln!(
                f,
                "   {:<12} | {:<5} | {:<5} | {:<20} | {:<20}",
                bench.hall_name,
                bench.row,
                bench.bench_number,
                bench.seat_a.to_string(),
                bench.seat_b.to_string()
            )?;
        }

        Ok(())
    }
}
