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

//! Department interleaving.
//!
//! Students are partitioned by department, each partition is shuffled on its
//! own, and the partitions are then merged round-robin: round `i` takes the
//! `i`-th member of every group that still has one, in group order. Group order
//! is the order in which each department first appears in the input.
//!
//! The result keeps neighbouring positions in different departments for as
//! long as at least two groups are active. Once the smaller groups run dry the
//! tail of the sequence is made up of the largest departments only, so
//! adjacency is reduced but not ruled out. Resolving the remaining collisions
//! is the bench assigner's job.

use crate::shuffle::shuffle_in_place;
use benchmate_model::student::Student;
use rand::Rng;
use rustc_hash::FxHashMap;

/// Students of one department, in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentGroup<'a> {
    department: &'a str,
    members: Vec<&'a Student>,
}

impl<'a> DepartmentGroup<'a> {
    /// Returns the department shared by every member.
    #[inline]
    pub fn department(&self) -> &'a str {
        self.department
    }

    /// Returns the members in their current order.
    #[inline]
    pub fn members(&self) -> &[&'a Student] {
        &self.members
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partitions `students` by department, keeping first-occurrence order for the
/// groups and input order within each group.
pub fn group_by_department(students: &[Student]) -> Vec<DepartmentGroup<'_>> {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<DepartmentGroup<'_>> = Vec::new();

    for student in students {
        let department = student.department();
        let slot = *slots.entry(department).or_insert_with(|| {
            groups.push(DepartmentGroup {
                department,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        if let Some(group) = groups.get_mut(slot) {
            group.members.push(student);
        }
    }

    groups
}

/// Merges groups round-robin into a single sequence.
///
/// No shuffling happens here; the members are taken in their current order.
pub fn merge_round_robin<'a>(groups: &[DepartmentGroup<'a>]) -> Vec<&'a Student> {
    let total = groups.iter().map(DepartmentGroup::len).sum();
    let rounds = groups.iter().map(DepartmentGroup::len).max().unwrap_or(0);

    let mut merged = Vec::with_capacity(total);
    for round in 0..rounds {
        merged.extend(groups.iter().filter_map(|g| g.members.get(round).copied()));
    }

    debug_assert_eq!(
        merged.len(),
        total,
        "called `merge_round_robin` and lost students: expected {}, merged {}",
        total,
        merged.len()
    );

    merged
}

/// Interleaves `students` by department.
///
/// The output is a permutation of the input: same length, every student exactly
/// once. An empty input yields an empty sequence; callers that need a non-empty
/// roster check that before reaching this stage.
pub fn interleave_departments<'a, R>(students: &'a [Student], rng: &mut R) -> Vec<&'a Student>
where
    R: Rng + ?Sized,
{
    let mut groups = group_by_department(students);
    for group in &mut groups {
        shuffle_in_place(&mut group.members, rng);
    }

    tracing::debug!(
        students = students.len(),
        departments = groups.len(),
        largest_group = groups.iter().map(DepartmentGroup::len).max().unwrap_or(0),
        "interleaving students by department"
    );

    merge_round_robin(&groups)
}
