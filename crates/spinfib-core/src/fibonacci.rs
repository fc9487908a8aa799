//! Fibonacci computation.
//!
//! [`fibonacci`] is the plain double recursion: F(0) = 0, F(1) = 1,
//! F(n) = F(n-1) + F(n-2), with no memoization. Its running time is
//! exponential in the index, which is what keeps the spinner busy.
//! [`compute`] dispatches to faster [`Strategy`] variants when asked.
//!
//! Every entry point validates the index before doing any work, so negative
//! input fails immediately instead of recursing.

use spinfib_common::{FibonacciError, Strategy};

/// Compute the Fibonacci number at `index` by unmemoized recursion.
pub fn fibonacci(index: i64) -> Result<u64, FibonacciError> {
    compute(index, Strategy::Recursive)
}

/// Compute the Fibonacci number at `index` with the given strategy.
pub fn compute(index: i64, strategy: Strategy) -> Result<u64, FibonacciError> {
    let n = FibonacciError::check(index)?;

    Ok(match strategy {
        Strategy::Recursive => recursive(n),
        Strategy::Iterative => iterative(n),
        Strategy::Memoized => memoized(n),
    })
}

// Callers guarantee n <= 93, so none of the additions below overflow.

fn recursive(n: u32) -> u64 {
    if n < 2 {
        u64::from(n)
    } else {
        recursive(n - 1) + recursive(n - 2)
    }
}

fn iterative(n: u32) -> u64 {
    if n == 0 {
        return 0;
    }
    // Stops at F(n); one more step would overflow at the top index.
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 1..n {
        (a, b) = (b, a + b);
    }
    b
}

fn memoized(n: u32) -> u64 {
    fn go(n: usize, memo: &mut [Option<u64>]) -> u64 {
        if let Some(value) = memo[n] {
            return value;
        }
        let value = go(n - 1, memo) + go(n - 2, memo);
        memo[n] = Some(value);
        value
    }

    let n = n as usize;
    let mut memo = vec![None; n.max(1) + 1];
    memo[0] = Some(0);
    memo[1] = Some(1);
    go(n, &mut memo)
}
