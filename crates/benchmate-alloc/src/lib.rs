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

//! # Benchmate Alloc
//!
//! **Department-aware bench allocation and plan validation.**
//!
//! Given a flat list of students and a flat list of halls, this crate seats the
//! students two to a bench so that no bench holds two students of the same
//! department, spreading departments evenly across the available benches. It
//! also validates any seating plan against the same constraint, regardless of
//! where that plan came from.
//!
//! ## Pipeline
//!
//! Data flows strictly forward through four stages:
//!
//! 1.  **`shuffle`**: Fisher–Yates over a caller-supplied `rand::Rng`.
//! 2.  **`interleave`**: group by department, shuffle each group, merge round-robin.
//! 3.  **`assign`**: walk the sequence two at a time, fill halls in byte-wise
//!     name order and repair same-department pairs with a forward swap.
//! 4.  **`validate`**: re-check a finished plan and report findings.
//!
//! `allocator` wires the stages together and adds statistics; `coordinator`
//! serializes generate-and-replace runs against an external `PlanStore`.
//!
//! ## Guarantees
//!
//! - No global state: randomness comes only from the generator passed in, so a
//!   seeded generator makes every stage reproducible.
//! - Conservation: every student appears exactly once in the assigned
//!   sequence, either seated or listed as unseated.
//! - Capacity: a hall never receives more than `ceil(capacity / 2)` benches.
//! - Transparency: benches skipped for lack of a compatible partner and
//!   students left without a seat are reported, never dropped silently.

pub mod allocator;
pub mod assign;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod interleave;
pub mod shuffle;
pub mod stats;
pub mod validate;

pub use allocator::{Allocation, Allocator, allocate};
pub use validate::validate;
