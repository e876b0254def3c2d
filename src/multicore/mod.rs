//! Two-context execution: a main thread and a helper relaunched per stage.
//!
//! A stage is one round trip: main launches a fresh helper, hands it a
//! [`Job`] over the forward mailbox, runs its own disjoint share of the
//! work, then blocks on the [`Completion`] token before touching anything
//! the job borrowed. The helper is joined before [`run_stage`] returns, so
//! there is never more than one job in flight.

pub mod fifo;
pub mod job;

use std::{panic, thread};

use tracing::trace;

pub use fifo::{Completion, Disconnected, HelperEnd, MainEnd};
pub use job::Job;

/// Lane split between the contexts: main takes `[0, split)`, the helper
/// takes `[split, K)`.
#[inline]
pub const fn split_point(k: usize) -> usize {
    k / 2
}

/// Helper body: take exactly one job, run it, acknowledge it.
fn helper_entry<const K: usize>(end: HelperEnd<'_, K>) {
    let Ok(job) = end.pop() else {
        return;
    };
    let name = job.name();
    trace!(job = name, "helper running job");
    job.execute();
    // Main never drops its receiver before popping.
    let _ = end.push(Completion::new(name));
}

/// Run `job` on a freshly launched helper while `main_work` runs on the
/// calling thread, then wait for the helper's completion token and tear the
/// helper down.
///
/// A panic on the helper is resumed on the caller after the barrier.
pub fn run_stage<'a, const K: usize, R>(job: Job<'a, K>, main_work: impl FnOnce() -> R) -> R {
    thread::scope(|scope| {
        let (main_end, helper_end) = fifo::pair::<K>();
        trace!(job = job.name(), "launching helper");
        let helper = scope.spawn(move || helper_entry(helper_end));

        let pushed = main_end.push(job);
        let output = main_work();
        let completion = pushed.and_then(|()| main_end.pop());

        match (helper.join(), completion) {
            (Err(payload), _) => panic::resume_unwind(payload),
            (Ok(()), Ok(token)) => {
                trace!(job = token.job(), "barrier reached, helper torn down");
                output
            }
            (Ok(()), Err(Disconnected)) => {
                unreachable!("helper exited without acknowledging its job")
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::poly::Poly;
    use crate::math::polyvec::PolyVec;

    #[test]
    fn split_point_halves_rank() {
        assert_eq!(split_point(1), 0);
        assert_eq!(split_point(2), 1);
        assert_eq!(split_point(3), 1);
        assert_eq!(split_point(4), 2);
    }

    #[test]
    fn main_work_runs_alongside_the_job() {
        let msg = [0x01u8; 32];
        let mut k = Poly::zero();
        let out = run_stage::<2, _>(Job::EncodeMessage { msg: &msg, k: &mut k }, || 40 + 2);
        assert_eq!(out, 42);
        assert_eq!(k.coeffs()[0], 1665);
        assert_eq!(k.coeffs()[1], 0);
    }

    #[test]
    fn helper_panic_reaches_main() {
        let rows = [PolyVec::<2>::zero(), PolyVec::<2>::zero()];
        let vector = PolyVec::<2>::zero();
        let mut out = [Poly::zero()];
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            // A lane-count mismatch trips the helper's debug assertion; in
            // release builds zip truncates and nothing panics.
            run_stage(
                Job::MultiplyRange {
                    rows: &rows,
                    vector: &vector,
                    out: &mut out,
                    tomont: false,
                },
                || (),
            )
        }));
        assert_eq!(result.is_err(), cfg!(debug_assertions));
    }
}
