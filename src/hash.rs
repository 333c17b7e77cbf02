//! Key functors: the hashing and equality contracts the table is generic over,
//! plus two string hashes.

use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Hash-function contract for a table keyed by `K: Borrow<Q>`.
///
/// Implementations must be pure: the same key yields the same code for the
/// lifetime of the functor and of its clones. Keys that compare equal under
/// the table's [`KeyEq`] must hash equal. Collisions are fine.
pub trait KeyHasher<Q: ?Sized> {
    fn hash_key(&self, key: &Q) -> u64;
}

/// Equality contract paired with [`KeyHasher`].
pub trait KeyEq<Q: ?Sized> {
    fn key_eq(&self, stored: &Q, probe: &Q) -> bool;
}

/// Adapts any [`BuildHasher`] to the [`KeyHasher`] contract through
/// [`Hash`]. This is the table's default hasher.
#[derive(Clone, Debug, Default)]
pub struct StdHasher<S = RandomState>(S);

impl<S> StdHasher<S> {
    pub fn new(build: S) -> Self {
        StdHasher(build)
    }
}

impl<Q, S> KeyHasher<Q> for StdHasher<S>
where
    Q: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &Q) -> u64 {
        self.0.hash_one(key)
    }
}

/// Equality through `==`. The table's default equality functor.
#[derive(Copy, Clone, Debug, Default)]
pub struct EqualTo;

impl<Q: ?Sized + Eq> KeyEq<Q> for EqualTo {
    #[inline]
    fn key_eq(&self, stored: &Q, probe: &Q) -> bool {
        stored == probe
    }
}

/// Polynomial rolling hash over bytes: `sum(b_i * 19^i)`.
///
/// The running power is reduced modulo [`Self::MODULUS`]; the sum itself
/// wraps at 64 bits. There is no finalization step, so a single byte hashes
/// to its own value.
#[derive(Copy, Clone, Debug, Default)]
pub struct PolynomialRollingHash;

impl PolynomialRollingHash {
    pub const BASE: u64 = 19;
    pub const MODULUS: u64 = 3_298_534_883_309;

    pub const fn hash_bytes(bytes: &[u8]) -> u64 {
        let mut hash = 0u64;
        let mut power = 1u64;
        let mut i = 0;
        while i < bytes.len() {
            hash = hash.wrapping_add((bytes[i] as u64).wrapping_mul(power));
            power = power.wrapping_mul(Self::BASE) % Self::MODULUS;
            i += 1;
        }
        hash
    }
}

impl<Q: ?Sized + AsRef<[u8]>> KeyHasher<Q> for PolynomialRollingHash {
    #[inline]
    fn hash_key(&self, key: &Q) -> u64 {
        Self::hash_bytes(key.as_ref())
    }
}

/// 64-bit FNV-1a: xor each byte into the state, then multiply by the prime.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fnv1a;

impl Fnv1a {
    pub const OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
    pub const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub const fn hash_bytes(bytes: &[u8]) -> u64 {
        let mut hash = Self::OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash = (hash ^ bytes[i] as u64).wrapping_mul(Self::PRIME);
            i += 1;
        }
        hash
    }
}

impl<Q: ?Sized + AsRef<[u8]>> KeyHasher<Q> for Fnv1a {
    #[inline]
    fn hash_key(&self, key: &Q) -> u64 {
        Self::hash_bytes(key.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(Fnv1a.hash_key(""), 0xCBF2_9CE4_8422_2325);
        assert_eq!(Fnv1a.hash_key("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(Fnv1a.hash_key("foobar"), 0x8594_4171_f739_67e8);
    }

    /// Invariant: bytes at or above 0x80 are mixed in unsigned, so "é"
    /// (C3 A9) hashes like any other two-byte input.
    #[test]
    fn non_ascii_bytes_are_unsigned() {
        assert_eq!(Fnv1a.hash_key("é"), 0x0ac2_1707_b718_1e01);
        assert_eq!(Fnv1a.hash_key("é"), Fnv1a::hash_bytes(&[0xC3, 0xA9]));
        assert_eq!(PolynomialRollingHash.hash_key("é"), 0xC3 + 0xA9 * 19);
        assert_eq!(PolynomialRollingHash.hash_key("é"), 3406);
    }

    #[test]
    fn polynomial_known_values() {
        assert_eq!(PolynomialRollingHash.hash_key(""), 0);
        assert_eq!(PolynomialRollingHash.hash_key("A"), 'A' as u64);
        assert_eq!(PolynomialRollingHash.hash_key("ab"), 97 + 98 * 19);
        assert_eq!(PolynomialRollingHash.hash_key("hello"), 15_247_414);
        assert_eq!(
            PolynomialRollingHash.hash_key("217.60.239.0/24"),
            651_784_768_342_589
        );
    }

    /// Invariant: owned and borrowed forms of the same bytes hash identically,
    /// so `String` keys can be probed with `&str`.
    #[test]
    fn owned_and_borrowed_agree() {
        let owned = String::from("217.60.239.0/24");
        assert_eq!(Fnv1a.hash_key(&owned), Fnv1a.hash_key(owned.as_str()));
        assert_eq!(
            PolynomialRollingHash.hash_key(&owned),
            PolynomialRollingHash.hash_key(owned.as_bytes())
        );

        let std = StdHasher::<RandomState>::default();
        assert_eq!(std.hash_key(&owned), std.hash_key(owned.as_str()));
        assert_eq!(std.clone().hash_key("x"), std.hash_key("x"));
    }

    #[test]
    fn equal_to_uses_eq() {
        assert!(EqualTo.key_eq("a", "a"));
        assert!(!EqualTo.key_eq("a", "b"));
        assert!(KeyEq::<i32>::key_eq(&EqualTo, &3, &3));
    }
}
