//! Pronounceable lowercase codes derived from arbitrary bytes.

/// Length of a readable code unless configured otherwise.
pub const DEFAULT_READABLE_LENGTH: usize = 12;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Consonants allowed in a row before a vowel is forced.
const MAX_CONSONANT_RUN: usize = 2;

fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}

/// Derives a lowercase `a-z` string from `input`, one character per byte.
///
/// Each byte is folded into a running value, `acc = (acc * 256 + byte) % 26`,
/// which picks the letter. After two consonants in a row the next letter is
/// replaced by the vowel `VOWELS[acc % 5]`. Generation stops after `max_len`
/// characters or when the input runs out.
///
/// The fold discards information, so the output cannot be turned back into
/// the input. Empty input gives an empty string.
pub fn generate(input: &[u8], max_len: usize) -> String {
    let mut out = String::with_capacity(max_len.min(input.len()));
    let mut acc: u32 = 0;
    let mut consonants = 0;

    for &byte in input.iter().take(max_len) {
        acc = (acc * 256 + u32::from(byte)) % 26;
        let mut ch = char::from(b'a' + acc as u8);

        if consonants >= MAX_CONSONANT_RUN {
            ch = VOWELS[(acc % 5) as usize];
            consonants = 0;
        } else if is_vowel(ch) {
            consonants = 0;
        } else {
            consonants += 1;
        }

        out.push(ch);
    }

    out
}
