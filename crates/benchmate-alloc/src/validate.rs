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

//! Seating plan validation.
//!
//! The validator re-scans a finished list of benches and reports every
//! constraint violation it finds. It does not care how the plan was produced
//! and never mutates it, so it can check externally supplied plans as well as
//! the allocator's own output.
//!
//! Two checks always run, bench by bench in plan order:
//!
//! - **Same department**: both seats of a bench belong to one department.
//! - **Duplicate pairing**: the same pair of roll numbers occupies more than
//!   one bench. With `PairKeyMode::Ordered` the pair `(A, B)` and its reverse
//!   `(B, A)` are distinct keys; `PairKeyMode::Unordered` treats them as one.
//!
//! Two further checks are opt-in through `ValidatorConfig`: a roll number
//! seated more than once anywhere in the plan, and a repeated
//! `(hall_name, row, bench_number)` key.
//!
//! An empty finding list means the plan is acceptable. Callers treat any
//! finding as fatal for the whole plan.

use benchmate_model::plan::Bench;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// How the duplicate-pairing check keys a bench.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKeyMode {
    /// `seat_a` then `seat_b`; a reversed pairing is a different key.
    #[default]
    Ordered,
    /// The two roll numbers in sorted order; a reversed pairing collides.
    Unordered,
}

/// Which optional checks the validator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub pair_key: PairKeyMode,
    pub detect_seat_reuse: bool,
    pub detect_duplicate_positions: bool,
}

impl ValidatorConfig {
    /// A configuration with every check enabled and order-independent pair keys.
    #[inline]
    pub fn strict() -> Self {
        Self {
            pair_key: PairKeyMode::Unordered,
            detect_seat_reuse: true,
            detect_duplicate_positions: true,
        }
    }
}

/// A single constraint violation found in a plan.
///
/// `bench_index` is the zero-based position of the offending bench in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Finding {
    /// Both seats hold students of `department`.
    SameDepartment {
        bench_index: usize,
        department: String,
    },
    /// The pairing `first`/`second` already occupies an earlier bench.
    DuplicatePair {
        bench_index: usize,
        first: String,
        second: String,
    },
    /// `roll_number` is already seated on the bench at `first_bench_index`.
    SeatReused {
        bench_index: usize,
        first_bench_index: usize,
        roll_number: String,
    },
    /// The bench key is already used by the bench at `first_bench_index`.
    DuplicatePosition {
        bench_index: usize,
        first_bench_index: usize,
        hall_name: String,
        row: u32,
        bench_number: u32,
    },
}

impl Finding {
    /// Returns the zero-based index of the bench this finding refers to.
    #[inline]
    pub fn bench_index(&self) -> usize {
        match self {
            Finding::SameDepartment { bench_index, .. }
            | Finding::DuplicatePair { bench_index, .. }
            | Finding::SeatReused { bench_index, .. }
            | Finding::DuplicatePosition { bench_index, .. } => *bench_index,
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::SameDepartment {
                bench_index,
                department,
            } => write!(
                f,
                "Bench {}: Students from same department ({}) on same bench",
                bench_index + 1,
                department
            ),
            Finding::DuplicatePair { first, second, .. } => {
                write!(f, "Duplicate student pair found: {} and {}", first, second)
            }
            Finding::SeatReused {
                bench_index,
                first_bench_index,
                roll_number,
            } => write!(
                f,
                "Bench {}: Student {} is already seated on bench {}",
                bench_index + 1,
                roll_number,
                first_bench_index + 1
            ),
            Finding::DuplicatePosition {
                bench_index,
                first_bench_index,
                hall_name,
                row,
                bench_number,
            } => write!(
                f,
                "Bench {}: Position {} row {} bench {} is already used by bench {}",
                bench_index + 1,
                hall_name,
                row,
                bench_number,
                first_bench_index + 1
            ),
        }
    }
}

/// A pure, reusable plan checker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    #[inline]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this validator.
    #[inline]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns every finding for `benches`, in bench order.
    ///
    /// Within one bench the findings appear in the order same department,
    /// duplicate pair, seat reuse, duplicate position.
    pub fn findings(&self, benches: &[Bench]) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut pairs: FxHashSet<(&str, &str)> = FxHashSet::default();
        let mut seated: FxHashMap<&str, usize> = FxHashMap::default();
        let mut positions: FxHashMap<(&str, u32, u32), usize> = FxHashMap::default();

        for (bench_index, bench) in benches.iter().enumerate() {
            let a = bench.seat_a.roll_number.as_str();
            let b = bench.seat_b.roll_number.as_str();

            if bench.is_same_department() {
                findings.push(Finding::SameDepartment {
                    bench_index,
                    department: bench.seat_a.department.clone(),
                });
            }

            let key = match self.config.pair_key {
                PairKeyMode::Ordered => (a, b),
                PairKeyMode::Unordered if b < a => (b, a),
                PairKeyMode::Unordered => (a, b),
            };
            if !pairs.insert(key) {
                findings.push(Finding::DuplicatePair {
                    bench_index,
                    first: a.to_owned(),
                    second: b.to_owned(),
                });
            }

            if self.config.detect_seat_reuse {
                for roll_number in [a, b] {
                    match seated.get(roll_number) {
                        Some(&first_bench_index) => findings.push(Finding::SeatReused {
                            bench_index,
                            first_bench_index,
                            roll_number: roll_number.to_owned(),
                        }),
                        None => {
                            seated.insert(roll_number, bench_index);
                        }
                    }
                }
            }

            if self.config.detect_duplicate_positions {
                let position = bench.position();
                match positions.get(&position) {
                    Some(&first_bench_index) => findings.push(Finding::DuplicatePosition {
                        bench_index,
                        first_bench_index,
                        hall_name: bench.hall_name.clone(),
                        row: bench.row,
                        bench_number: bench.bench_number,
                    }),
                    None => {
                        positions.insert(position, bench_index);
                    }
                }
            }
        }

        findings
    }

    /// Returns `true` if `benches` produce no findings.
    #[inline]
    pub fn is_valid(&self, benches: &[Bench]) -> bool {
        self.findings(benches).is_empty()
    }
}

/// Validates `benches` with the default checks and renders each finding as a
/// human-readable message. An empty list means the plan is acceptable.
pub fn validate(benches: &[Bench]) -> Vec<String> {
    Validator::default()
        .findings(benches)
        .iter()
        .map(ToString::to_string)
        .collect()
}
