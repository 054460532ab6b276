//! Runtime invariants with contract-test support
//!
//! Production code states its invariants with [`assert_invariant!`]; every
//! checked invariant is logged per thread so a test can later prove the
//! invariant was actually exercised.
//!
//! # Usage
//!
//! ```rust,ignore
//! use clarity::invariant_ppt::*;
//!
//! assert_invariant!(
//!     ranking.is_sorted(),
//!     "Ranked scores ascend from blur to clarity",
//!     "ranking"
//! );
//!
//! #[test]
//! fn contract_ranking() {
//!     // ... run a batch ...
//!     contract_test("ranking", &["Ranked scores ascend from blur to clarity"]);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::thread_local;

thread_local! {
    static CHECKED_INVARIANTS: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Assert an invariant and record that it was checked.
///
/// # Panics
/// Panics if the condition is false.
#[macro_export]
macro_rules! assert_invariant {
    ($condition:expr, $message:expr) => {
        $crate::invariant_ppt::__assert_invariant_impl($condition, $message, None)
    };
    ($condition:expr, $message:expr, $context:expr) => {
        $crate::invariant_ppt::__assert_invariant_impl($condition, $message, Some($context))
    };
}

#[doc(hidden)]
pub fn __assert_invariant_impl(condition: bool, message: &str, context: Option<&str>) {
    CHECKED_INVARIANTS.with(|checked| {
        checked.borrow_mut().insert(message.to_string());
    });

    if !condition {
        panic!(
            "INVARIANT VIOLATION [{}]: {}",
            context.unwrap_or("unknown"),
            message
        );
    }
}

/// Whether `message` has been checked on this thread
pub fn was_checked(message: &str) -> bool {
    CHECKED_INVARIANTS.with(|checked| checked.borrow().contains(message))
}

/// Require that every listed invariant was checked on this thread.
///
/// # Panics
/// Panics naming the invariants that were never checked.
pub fn contract_test(test_name: &str, required_invariants: &[&str]) {
    let missing: Vec<&str> = required_invariants
        .iter()
        .copied()
        .filter(|invariant| !was_checked(invariant))
        .collect();

    if !missing.is_empty() {
        panic!(
            "CONTRACT FAILURE [{}]: The following invariants were not checked:\n  - {}",
            test_name,
            missing.join("\n  - ")
        );
    }
}

pub fn clear_invariant_log() {
    CHECKED_INVARIANTS.with(|checked| checked.borrow_mut().clear());
}
