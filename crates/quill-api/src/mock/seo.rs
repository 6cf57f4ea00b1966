//! Heuristic SEO scoring used by the mock backend.

use quill_core::entities::SeoReport;

const MIN_WORDS: usize = 300;
const MAX_DENSITY: f64 = 3.0;
const MIN_READABILITY: f64 = 50.0;

pub(crate) fn analyze(content: &str, keywords: &[String]) -> SeoReport {
    let words: Vec<&str> = content.split_whitespace().collect();
    let word_count = words.len();
    let sentences = content
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
        .max(1);
    let lowered = content.to_lowercase();

    let keyword_density: Vec<(String, f64)> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .map(|keyword| {
            let hits = lowered.matches(keyword.as_str()).count();
            (keyword, round2(percent(hits, word_count)))
        })
        .collect();

    let readability = round2(flesch(&words, sentences));

    let mut score: i32 = 100;
    let mut suggestions = Vec::new();
    if word_count < MIN_WORDS {
        score -= 20;
        suggestions.push(format!(
            "Expand the content to at least {MIN_WORDS} words (currently {word_count})"
        ));
    }
    if keyword_density.is_empty() {
        score -= 10;
        suggestions.push("Add target keywords to measure keyword usage".to_string());
    }
    for (keyword, density) in &keyword_density {
        if density.abs() < f64::EPSILON {
            score -= 15;
            suggestions.push(format!("Use the keyword \"{keyword}\" in the content"));
        } else if *density > MAX_DENSITY {
            score -= 10;
            suggestions.push(format!(
                "Reduce use of \"{keyword}\" ({density}% is above {MAX_DENSITY}%)"
            ));
        }
    }
    if readability < MIN_READABILITY {
        score -= 10;
        suggestions.push("Shorten sentences to improve readability".to_string());
    }

    SeoReport {
        score: u8::try_from(score.clamp(0, 100)).unwrap_or(0),
        word_count: u32::try_from(word_count).unwrap_or(u32::MAX),
        keyword_density,
        readability,
        suggestions,
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(hits: usize, words: usize) -> f64 {
    if words == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / words as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flesch reading ease, clamped to `0..=100`.
#[allow(clippy::cast_precision_loss)]
fn flesch(words: &[&str], sentences: usize) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let syllables: usize = words.iter().map(|w| syllables(w)).sum();
    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0)
}

/// Vowel groups, at least one per word.
fn syllables(word: &str) -> usize {
    let mut count = 0;
    let mut previous_vowel = false;
    for c in word.chars().map(|c| c.to_ascii_lowercase()) {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_without_keywords_is_penalised() {
        let report = analyze("Short copy. Very short.", &[]);
        assert_eq!(report.word_count, 4);
        assert!(report.score <= 70);
        assert!(report.suggestions.iter().any(|s| s.contains("300 words")));
    }

    #[test]
    fn missing_keyword_is_reported() {
        let report = analyze("Spring sale starts today.", &["discount".into()]);
        assert_eq!(report.keyword_density, vec![("discount".to_string(), 0.0)]);
        assert!(report.suggestions.iter().any(|s| s.contains("\"discount\"")));
    }

    #[test]
    fn density_counts_per_hundred_words() {
        let report = analyze("sale sale sale sale", &["Sale".into()]);
        assert_eq!(report.keyword_density[0].1, 100.0);
    }

    #[test]
    fn syllable_estimate_is_never_zero() {
        assert_eq!(syllables("rhythm"), 1);
        assert_eq!(syllables("content"), 2);
        assert_eq!(syllables("--"), 1);
    }
}
