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

//! # Single-Writer Generation
//!
//! Generating a plan reads the current students and halls, computes a full plan
//! and then replaces whatever plan the store held before. The replacement is
//! owned by the store and is usually not atomic, so two generations racing on
//! the same store could interleave their deletes and inserts.
//!
//! `SeatingCoordinator` serializes the whole read → compute → replace sequence
//! behind one `Mutex`. A generation that fails (bad input, rejected plan, store
//! error) returns before `replace_plan` is called, so the previously stored
//! plan survives untouched.

use crate::{
    allocator::{Allocation, Allocator},
    error::AllocationError,
};
use benchmate_model::{hall::Hall, plan::SeatingPlan, student::Student};
use rand::Rng;
use std::sync::Mutex;

/// The persistence seam the coordinator drives.
///
/// Implementors own storage layout, transactions and anything else outside the
/// allocation core.
pub trait PlanStore {
    /// The store's own error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the students eligible for seating.
    fn load_students(&self) -> Result<Vec<Student>, Self::Error>;

    /// Loads the available halls.
    fn load_halls(&self) -> Result<Vec<Hall>, Self::Error>;

    /// Replaces the stored plan with `plan`.
    fn replace_plan(&mut self, plan: &SeatingPlan) -> Result<(), Self::Error>;
}

/// The error type for a coordinated generation.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError<E>
where
    E: std::error::Error + 'static,
{
    /// The store failed to load inputs or persist the plan.
    #[error("plan store error: {0}")]
    Store(#[source] E),
    /// Allocation or validation failed; the store was not modified.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    /// A previous generation panicked while holding the lock.
    #[error("generation lock poisoned")]
    Poisoned,
}

/// Runs generations against one store, one at a time.
#[derive(Debug)]
pub struct SeatingCoordinator<S> {
    store: Mutex<S>,
    allocator: Allocator,
}

impl<S> SeatingCoordinator<S>
where
    S: PlanStore,
{
    /// Creates a coordinator owning `store`.
    #[inline]
    pub fn new(store: S, allocator: Allocator) -> Self {
        Self {
            store: Mutex::new(store),
            allocator,
        }
    }

    /// Returns the allocator used for every generation.
    #[inline]
    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Loads inputs, allocates, validates and replaces the stored plan while
    /// holding the generation lock.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatorError::Allocation` for rejected inputs or plans,
    /// `CoordinatorError::Store` for store failures and
    /// `CoordinatorError::Poisoned` if an earlier generation panicked.
    pub fn generate<R>(&self, rng: &mut R) -> Result<Allocation, CoordinatorError<S::Error>>
    where
        R: Rng + ?Sized,
    {
        let mut store = self.store.lock().map_err(|_| CoordinatorError::Poisoned)?;

        let students = store.load_students().map_err(CoordinatorError::Store)?;
        let halls = store.load_halls().map_err(CoordinatorError::Store)?;

        let allocation = self.allocator.generate(&students, &halls, rng)?;
        store
            .replace_plan(allocation.plan())
            .map_err(CoordinatorError::Store)?;

        tracing::info!(benches = allocation.plan().len(), "stored plan replaced");
        Ok(allocation)
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatorError::Poisoned` if an earlier generation panicked.
    pub fn with_store<T, F>(&self, f: F) -> Result<T, CoordinatorError<S::Error>>
    where
        F: FnOnce(&mut S) -> T,
    {
        let mut store = self.store.lock().map_err(|_| CoordinatorError::Poisoned)?;
        Ok(f(&mut store))
    }

    /// Consumes the coordinator and returns the store.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatorError::Poisoned` if an earlier generation panicked.
    pub fn into_store(self) -> Result<S, CoordinatorError<S::Error>> {
        self.store.into_inner().map_err(|_| CoordinatorError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("store offline")]
    struct Offline;

    #[derive(Debug, Default)]
    struct MemoryStore {
        students: Vec<Student>,
        halls: Vec<Hall>,
        plan: Option<SeatingPlan>,
        writes: usize,
        fail_writes: bool,
    }

    impl PlanStore for MemoryStore {
        type Error = Offline;

        fn load_students(&self) -> Result<Vec<Student>, Self::Error> {
            Ok(self.students.clone())
        }

        fn load_halls(&self) -> Result<Vec<Hall>, Self::Error> {
            Ok(self.halls.clone())
        }

        fn replace_plan(&mut self, plan: &SeatingPlan) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(Offline);
            }
            self.plan = Some(plan.clone());
            self.writes += 1;
            Ok(())
        }
    }

    fn st(roll: &str, dept: &str) -> Student {
        Student::new(format!("id-{roll}"), roll, dept)
    }

    fn store() -> MemoryStore {
        MemoryStore {
            students: (0..8)
                .map(|i| st(&format!("r{i}"), ["A", "B", "C", "D"][i % 4]))
                .collect(),
            halls: vec![Hall::new("H", 8)],
            ..MemoryStore::default()
        }
    }

    #[test]
    fn test_generate_replaces_stored_plan() {
        let coordinator = SeatingCoordinator::new(store(), Allocator::default());
        let allocation = coordinator
            .generate(&mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();

        let stored = coordinator.into_store().unwrap();
        assert_eq!(stored.writes, 1);
        assert_eq!(stored.plan.as_ref(), Some(allocation.plan()));
    }

    #[test]
    fn test_input_error_leaves_store_untouched() {
        let mut empty = store();
        empty.halls.clear();
        empty.plan = Some(SeatingPlan::default());

        let coordinator = SeatingCoordinator::new(empty, Allocator::default());
        let err = coordinator
            .generate(&mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();

        assert!(matches!(err, CoordinatorError::Allocation(AllocationError::Input(_))));
        let writes = coordinator.with_store(|s| s.writes).unwrap();
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_store_error_is_surfaced() {
        let mut failing = store();
        failing.fail_writes = true;

        let coordinator = SeatingCoordinator::new(failing, Allocator::default());
        let err = coordinator
            .generate(&mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();

        assert!(matches!(err, CoordinatorError::Store(Offline)));
        assert_eq!(err.to_string(), "plan store error: store offline");
    }

    /// A store that detects overlapping generations.
    #[derive(Debug, Default)]
    struct OverlapStore {
        inner: MemoryStore,
        in_flight: AtomicBool,
        overlaps: AtomicUsize,
    }

    impl PlanStore for OverlapStore {
        type Error = Offline;

        fn load_students(&self) -> Result<Vec<Student>, Self::Error> {
            if self.in_flight.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::yield_now();
            self.inner.load_students()
        }

        fn load_halls(&self) -> Result<Vec<Hall>, Self::Error> {
            self.inner.load_halls()
        }

        fn replace_plan(&mut self, plan: &SeatingPlan) -> Result<(), Self::Error> {
            let result = self.inner.replace_plan(plan);
            self.in_flight.store(false, Ordering::SeqCst);
            result
        }
    }

    #[test]
    fn test_concurrent_generations_are_serialized() {
        let coordinator = SeatingCoordinator::new(
            OverlapStore {
                inner: store(),
                ..OverlapStore::default()
            },
            Allocator::default(),
        );

        std::thread::scope(|scope| {
            for seed in 0..8u64 {
                let coordinator = &coordinator;
                scope.spawn(move || {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    for _ in 0..10 {
                        coordinator.generate(&mut rng).unwrap();
                    }
                });
            }
        });

        let stored = coordinator.into_store().unwrap();
        assert_eq!(stored.overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(stored.inner.writes, 80);
    }
}
