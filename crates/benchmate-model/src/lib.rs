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

//! # Benchmate Model
//!
//! **The data model for department-aware exam seating.**
//!
//! This crate defines the records that flow into and out of the allocation
//! pipeline in `benchmate_alloc`. It holds no algorithmic logic of its own: the
//! allocator consumes a flat list of students and a flat list of halls, and
//! produces an ordered list of benches.
//!
//! ## Modules
//!
//! * **`student`**: `Student`, the immutable examinee record whose department
//!   drives the adjacency constraint.
//! * **`hall`**: `Hall`, a named room with a seat capacity and a derived bench quota.
//! * **`input`**: `Roster` and `Venue`, validated collections of students and
//!   halls, and the `InputError` raised when an input is rejected.
//! * **`plan`**: `SeatRef`, `Bench` and `SeatingPlan`, the output of an
//!   allocation run, plus lookups (`locate`, `by_hall`) over a finished plan.
//!
//! ## Design Philosophy
//!
//! 1.  **Snapshots, not references**: a `Bench` stores a `SeatRef` copy of each
//!     seated student, so a plan stays valid after the source records change.
//! 2.  **Fail-Fast**: `Roster` and `Venue` reject malformed input eagerly, so the
//!     allocator never sees an empty list, a duplicate key or a zero capacity.
//! 3.  **Serializable**: every record derives `serde` traits so an external
//!     persistence layer can store plans without adapters.

pub mod hall;
pub mod input;
pub mod plan;
pub mod student;
