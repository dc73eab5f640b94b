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

/// An examinee, as supplied to the allocator.
///
/// The roll number is the human-facing unique key; `id` is the identifier of
/// the record in whatever store the caller loaded it from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    id: String,
    roll_number: String,
    department: String,
}

impl Student {
    /// Creates a new `Student`.
    ///
    /// No validation happens here; use `Roster::new` to reject empty fields and
    /// duplicate roll numbers across a whole list.
    #[inline]
    pub fn new(
        id: impl Into<String>,
        roll_number: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            roll_number: roll_number.into(),
            department: department.into(),
        }
    }

    /// Returns the store identifier of this student.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the roll number of this student.
    #[inline]
    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    /// Returns the department of this student.
    #[inline]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns `true` if both students belong to the same department.
    #[inline]
    pub fn shares_department_with(&self, other: &Student) -> bool {
        self.department == other.department
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.roll_number, self.department)
    }
}

#[cfg(test)]
mod tests {
    use super::Student;

    #[test]
    fn test_accessors_return_constructor_values() {
        let s = Student::new("64f0", "CS-001", "CS");
        assert_eq!(s.id(), "64f0");
        assert_eq!(s.roll_number(), "CS-001");
        assert_eq!(s.department(), "CS");
    }

    #[test]
    fn test_shares_department_with() {
        let a = Student::new("1", "CS-001", "CS");
        let b = Student::new("2", "CS-002", "CS");
        let c = Student::new("3", "EE-001", "EE");

        assert!(a.shares_department_with(&b));
        assert!(!a.shares_department_with(&c));
    }

    #[test]
    fn test_department_comparison_is_case_sensitive() {
        // Departments are opaque labels; normalization is the caller's job.
        let a = Student::new("1", "A", "cs");
        let b = Student::new("2", "B", "CS");
        assert!(!a.shares_department_with(&b));
    }

    #[test]
    fn test_display_shows_roll_and_department() {
        let s = Student::new("1", "ME-042", "ME");
        assert_eq!(format!("{}", s), "ME-042 (ME)");
    }

    #[test]
    fn test_serde_uses_snake_case_fields() {
        let s = Student::new("1", "ME-042", "ME");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","roll_number":"ME-042","department":"ME"}"#
        );
        let back: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
