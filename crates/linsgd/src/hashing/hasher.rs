//! Feature hashing (the "hashing trick").
//!
//! String features are mapped to indices of a fixed-size weight table with a
//! 32-bit FNV-1a hash. The table size is an explicit [`TableSize`] value that
//! travels with the model, so training and inference always hash into the
//! same space.

use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Largest supported table size exponent (`2^31` entries).
pub const MAX_TABLE_BITS: u32 = 31;

// =============================================================================
// TableSize
// =============================================================================

/// Error returned when constructing an invalid [`TableSize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableSizeError {
    #[error("hash table size must be a power of two, got {0}")]
    NotPowerOfTwo(u32),
    #[error("hash table bits must be in 0..={MAX_TABLE_BITS}, got {0}")]
    BitsOutOfRange(u32),
}

/// Size of a hashed weight table. Always a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableSize(u32);

impl TableSize {
    /// Default table size: `2^21` entries.
    pub const DEFAULT_BITS: u32 = 21;

    /// Create a table size, rejecting values that are not a power of two.
    pub fn new(size: u32) -> Result<Self, TableSizeError> {
        if size.is_power_of_two() {
            Ok(Self(size))
        } else {
            Err(TableSizeError::NotPowerOfTwo(size))
        }
    }

    /// Create a table size of `2^bits` entries.
    pub fn from_bits(bits: u32) -> Result<Self, TableSizeError> {
        if bits > MAX_TABLE_BITS {
            return Err(TableSizeError::BitsOutOfRange(bits));
        }
        Ok(Self(1 << bits))
    }

    /// Number of entries.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of entries as `usize`.
    #[inline]
    pub fn len(self) -> usize {
        self.0 as usize
    }

    /// Always false; a table has at least one slot.
    #[inline]
    pub fn is_empty(self) -> bool {
        false
    }

    /// Exponent such that `size == 2^bits`.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0.trailing_zeros()
    }
}

impl Default for TableSize {
    fn default() -> Self {
        Self(1 << Self::DEFAULT_BITS)
    }
}

impl TryFrom<u32> for TableSize {
    type Error = TableSizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableSize> for u32 {
    fn from(value: TableSize) -> Self {
        value.0
    }
}

impl std::fmt::Display for TableSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "2^{}", self.bits())
    }
}

// =============================================================================
// FeatureHasher
// =============================================================================

/// 32-bit FNV-1a over the UTF-8 bytes of `token`.
#[inline]
pub fn fnv1a_32(token: &str) -> u32 {
    token.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Maps string tokens to indices in `[0, table_size)`.
///
/// # Example
///
/// ```
/// use linsgd::hashing::{FeatureHasher, TableSize};
///
/// let hasher = FeatureHasher::new(TableSize::from_bits(4).unwrap());
/// let indices = hasher.hash_tokens(["good", "movie", "good"]);
///
/// assert_eq!(indices.len(), 3);
/// assert_eq!(indices[0], indices[2]);
/// assert!(indices.iter().all(|&i| i < 16));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureHasher {
    table_size: TableSize,
}

impl FeatureHasher {
    pub fn new(table_size: TableSize) -> Self {
        Self { table_size }
    }

    #[inline]
    pub fn table_size(&self) -> TableSize {
        self.table_size
    }

    /// Index of a single token.
    #[inline]
    pub fn hash_token(&self, token: &str) -> u32 {
        fnv1a_32(token) % self.table_size.get()
    }

    /// Indices of a token sequence, one per token, in input order.
    ///
    /// Repeated tokens produce repeated indices.
    pub fn hash_tokens<I, S>(&self, tokens: I) -> Vec<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| self.hash_token(token.as_ref()))
            .collect()
    }
}
