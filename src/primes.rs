//! Prime sizing for the bucket array.
//!
//! Bucket indices are `hash % bucket_count`; a prime modulus spreads hash
//! codes with regular low bits more evenly than a power of two would.

/// Witnesses that make Miller-Rabin deterministic for every 64-bit input.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}

/// Returns whether `n` is prime.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    // n - 1 = d * 2^s with d odd
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Smallest prime `>= n`, or `None` if that prime does not fit in `usize`.
///
/// `0` and `1` both map to `2`.
pub fn next_greater_or_equal_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2) as u64;
    if candidate > 2 && candidate % 2 == 0 {
        candidate = candidate.checked_add(1)?;
    }
    loop {
        if is_prime(candidate) {
            return usize::try_from(candidate).ok();
        }
        candidate = candidate.checked_add(2)?;
    }
}
