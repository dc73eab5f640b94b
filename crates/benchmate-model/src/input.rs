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

//! Validated input collections.
//!
//! The allocator never works on raw slices. Students are wrapped in a
//! `Roster` and halls in a `Venue`, both of which check the whole collection
//! once at construction time: neither may be empty, keys must be unique and
//! non-blank, every student needs a department and every hall a positive
//! capacity. A field made only of whitespace counts as blank. Fields are not
//! trimmed, so `"CS"` and `"CS "` are distinct departments; normalising them
//! is up to whoever reads the source files. Construction preserves the caller's order, since the allocator
//! derives its department group order from the roster order.

use crate::{hall::Hall, student::Student};
use rustc_hash::FxHashSet;

/// The error type for rejected allocation inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The student list is empty.
    #[error("No students provided for seating allocation")]
    NoStudents,
    /// The hall list is empty.
    #[error("No halls provided for seating allocation")]
    NoHalls,
    /// A student at the given position has a blank roll number.
    #[error("Student at position {position} has an empty roll number")]
    EmptyRollNumber { position: usize },
    /// A roll number occurs more than once.
    #[error("Duplicate roll number: {0}")]
    DuplicateRollNumber(String),
    /// A student has an empty department.
    #[error("Student {roll_number} has an empty department")]
    EmptyDepartment { roll_number: String },
    /// A hall at the given position has an empty name.
    #[error("Hall at position {position} has an empty name")]
    EmptyHallName { position: usize },
    /// A hall name occurs more than once.
    #[error("Duplicate hall name: {0}")]
    DuplicateHallName(String),
    /// A hall has no seats.
    #[error("Hall {hall} has a capacity of zero")]
    ZeroCapacity { hall: String },
}

/// A non-empty list of students with unique roll numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Validates `students` and wraps them in a `Roster`.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, scanning in input order.
    pub fn new(students: Vec<Student>) -> Result<Self, InputError> {
        Self::check(&students)?;
        Ok(Self { students })
    }

    /// Runs the roster checks on a borrowed slice without taking ownership.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, scanning in input order.
    pub fn check(students: &[Student]) -> Result<(), InputError> {
        if students.is_empty() {
            return Err(InputError::NoStudents);
        }

        let mut seen = FxHashSet::default();
        seen.reserve(students.len());

        for (position, student) in students.iter().enumerate() {
            if student.roll_number().trim().is_empty() {
                return Err(InputError::EmptyRollNumber { position });
            }
            if student.department().trim().is_empty() {
                return Err(InputError::EmptyDepartment {
                    roll_number: student.roll_number().to_owned(),
                });
            }
            if !seen.insert(student.roll_number()) {
                return Err(InputError::DuplicateRollNumber(
                    student.roll_number().to_owned(),
                ));
            }
        }

        Ok(())
    }

    /// Returns the students in input order.
    #[inline]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Returns the number of students.
    #[inline]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Always `false`; a `Roster` is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Consumes the roster and returns the underlying students.
    #[inline]
    pub fn into_inner(self) -> Vec<Student> {
        self.students
    }
}

impl TryFrom<Vec<Student>> for Roster {
    type Error = InputError;

    fn try_from(students: Vec<Student>) -> Result<Self, Self::Error> {
        Self::new(students)
    }
}

/// A non-empty list of halls with unique names and positive capacities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Venue {
    halls: Vec<Hall>,
}

impl Venue {
    /// Validates `halls` and wraps them in a `Venue`.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, scanning in input order.
    pub fn new(halls: Vec<Hall>) -> Result<Self, InputError> {
        Self::check(&halls)?;
        Ok(Self { halls })
    }

    /// Runs the venue checks on a borrowed slice without taking ownership.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, scanning in input order.
    pub fn check(halls: &[Hall]) -> Result<(), InputError> {
        if halls.is_empty() {
            return Err(InputError::NoHalls);
        }

        let mut seen = FxHashSet::default();
        seen.reserve(halls.len());

        for (position, hall) in halls.iter().enumerate() {
            if hall.name().trim().is_empty() {
                return Err(InputError::EmptyHallName { position });
            }
            if hall.capacity() == 0 {
                return Err(InputError::ZeroCapacity {
                    hall: hall.name().to_owned(),
                });
            }
            if !seen.insert(hall.name()) {
                return Err(InputError::DuplicateHallName(hall.name().to_owned()));
            }
        }

        Ok(())
    }

    /// Returns the halls in input order.
    #[inline]
    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    /// Returns the halls ordered by name.
    ///
    /// The ordering compares the UTF-8 bytes of the names, so it does not
    /// depend on the locale of the machine running the allocation.
    pub fn halls_by_name(&self) -> Vec<&Hall> {
        let mut sorted: Vec<&Hall> = self.halls.iter().collect();
        sorted.sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));
        sorted
    }

    /// Returns the number of halls.
    #[inline]
    pub fn len(&self) -> usize {
        self.halls.len()
    }

    /// Always `false`; a `Venue` is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.halls.is_empty()
    }

    /// Returns the sum of all hall capacities.
    #[inline]
    pub fn total_capacity(&self) -> u64 {
        self.halls.iter().map(|h| u64::from(h.capacity())).sum()
    }

    /// Returns the sum of all hall bench quotas.
    #[inline]
    pub fn total_bench_count(&self) -> u64 {
        self.halls.iter().map(|h| u64::from(h.bench_count())).sum()
    }

    /// Consumes the venue and returns the underlying halls.
    #[inline]
    pub fn into_inner(self) -> Vec<Hall> {
        self.halls
    }
}

impl TryFrom<Vec<Hall>> for Venue {
    type Error = InputError;

    fn try_from(halls: Vec<Hall>) -> Result<Self, Self::Error> {
        Self::new(halls)
    }
}
