// ── Voucher code generation ──

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::CoreError;

/// 32 symbols with the visually ambiguous `0 O 1 I` removed.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Upper bound on redraws before giving up on a unique code.
pub const MAX_ATTEMPTS: u32 = 64;

/// Draw `length` symbols uniformly from [`ALPHABET`].
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .filter_map(|_| ALPHABET.choose(rng).copied().map(char::from))
        .collect()
}

/// Draw codes until one is absent from `taken`.
pub fn generate_unique<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    taken: &HashSet<&str>,
) -> Result<String, CoreError> {
    if length == 0 {
        return Err(CoreError::validation("code length", "must be at least 1"));
    }
    for _ in 0..MAX_ATTEMPTS {
        let code = generate(rng, length);
        if !taken.contains(code.as_str()) {
            return Ok(code);
        }
    }
    Err(CoreError::CodeSpaceExhausted {
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn codes_use_only_unambiguous_symbols() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = generate(&mut rng, DEFAULT_CODE_LENGTH);
            assert_eq!(code.len(), 8);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
            assert!(!code.contains(['0', 'O', '1', 'I']));
        }
    }

    #[test]
    fn unique_code_avoids_taken_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = generate_unique(&mut rng, 4, &HashSet::new()).unwrap();
        let taken: HashSet<&str> = [first.as_str()].into_iter().collect();
        let mut replay = StdRng::seed_from_u64(1);
        let second = generate_unique(&mut replay, 4, &taken).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn exhausted_code_space_is_reported() {
        // Length 1 has 32 possible codes; take them all.
        let all: Vec<String> = ALPHABET.iter().map(|b| char::from(*b).to_string()).collect();
        let taken: HashSet<&str> = all.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            generate_unique(&mut rng, 1, &taken),
            Err(CoreError::CodeSpaceExhausted { attempts: MAX_ATTEMPTS })
        ));
    }
}
