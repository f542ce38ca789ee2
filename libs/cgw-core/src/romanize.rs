//! Tone-marked pinyin for examples that ship without a pinyin line.

use ::pinyin::ToPinyin;

/// Transcribe `text` into tone-marked pinyin with no separator between syllables.
///
/// Each Han character uses its most common reading. Characters without a
/// reading (Latin, digits, punctuation) are copied through unchanged.
pub fn to_tone_pinyin(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (ch, reading) in text.chars().zip(text.to_pinyin()) {
        match reading {
            Some(p) => out.push_str(p.with_tone()),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribes_common_characters() {
        assert_eq!(to_tone_pinyin("你好"), "nǐhǎo");
    }

    #[test]
    fn negation_uses_fourth_tone() {
        let out = to_tone_pinyin("不好");
        assert!(out.contains("bù"));
        assert!(out.contains("hǎo"));
    }

    #[test]
    fn passes_through_non_han_text() {
        assert_eq!(to_tone_pinyin("A: 好!"), "A: hǎo!");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(to_tone_pinyin("我是学生"), to_tone_pinyin("我是学生"));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(to_tone_pinyin(""), "");
    }
}
