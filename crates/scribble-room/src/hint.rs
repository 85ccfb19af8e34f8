//! Initial-consonant hints for Hangul words.
//!
//! A precomposed Hangul syllable encodes (initial, vowel, final) as
//! `0xAC00 + (initial * 21 + vowel) * 28 + final`, so the initial
//! consonant falls out of integer division.

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;

/// 21 vowels × 28 finals (including "no final").
const SYLLABLES_PER_INITIAL: u32 = 21 * 28;

const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
    'ㅍ', 'ㅎ',
];

/// Reduces every Hangul syllable in `word` to its initial consonant.
/// Any other character is kept as is.
///
/// ```rust
/// use scribble_room::consonant_hint;
///
/// assert_eq!(consonant_hint("고양이"), "ㄱㅇㅇ");
/// assert_eq!(consonant_hint("pizza 피자"), "pizza ㅍㅈ");
/// ```
pub fn consonant_hint(word: &str) -> String {
    word.chars().map(initial_consonant).collect()
}

fn initial_consonant(c: char) -> char {
    let code = c as u32;
    if !(SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
        return c;
    }
    let index = ((code - SYLLABLE_FIRST) / SYLLABLES_PER_INITIAL) as usize;
    INITIALS[index]
}
