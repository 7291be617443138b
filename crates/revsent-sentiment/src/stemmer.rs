//! Porter suffix-stripping stemmer.
//!
//! Follows Porter (1980) with the NLTK extensions: an irregular-forms
//! table, words of two letters or fewer left alone, `ies`/`ied` on
//! four-letter words kept as `ie`, `y → i` only after a consonant, the
//! `alli` pre-pass in step 2, and the extra `fulli`/`logi` rules. Output
//! matches NLTK's default `PorterStemmer` for lowercase ASCII words.

/// One suffix rule: `(suffix, replacement, condition on the stem)`.
type Rule<'a> = (&'a str, &'a str, Option<&'a dyn Fn(&str) -> bool>);

const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Stems one word. Non-ASCII words are lowercased and returned as-is.
    #[must_use]
    pub fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if let Some(&(_, stem)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
            return stem.to_string();
        }
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word;
        }

        let word = step1a(word);
        let word = step1b(word);
        let word = step1c(word);
        let word = step2(word);
        let word = step3(word);
        let word = step4(word);
        let word = step5a(word);
        step5b(word)
    }
}

fn is_consonant(word: &[u8], i: usize) -> bool {
    match word[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Porter's *m*: the number of vowel→consonant transitions.
fn measure(stem: &str) -> usize {
    let bytes = stem.as_bytes();
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..bytes.len() {
        let consonant = is_consonant(bytes, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn has_positive_measure(stem: &str) -> bool {
    measure(stem) > 0
}

fn measure_gt_1(stem: &str) -> bool {
    measure(stem) > 1
}

fn contains_vowel(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    (0..bytes.len()).any(|i| !is_consonant(bytes, i))
}

fn ends_double_consonant(word: &str) -> bool {
    let b = word.as_bytes();
    let n = b.len();
    n >= 2 && b[n - 1] == b[n - 2] && is_consonant(b, n - 1)
}

/// `*o`: consonant-vowel-consonant ending, last letter not w, x or y.
/// Two-letter vowel-consonant words also count.
fn ends_cvc(word: &str) -> bool {
    let b = word.as_bytes();
    let n = b.len();
    (n >= 3
        && is_consonant(b, n - 3)
        && !is_consonant(b, n - 2)
        && is_consonant(b, n - 1)
        && !matches!(b[n - 1], b'w' | b'x' | b'y'))
        || (n == 2 && !is_consonant(b, 0) && is_consonant(b, 1))
}

/// Applies the first rule whose suffix matches. A matching rule whose
/// condition fails still ends the search.
fn apply_rules(word: &str, rules: &[Rule<'_>]) -> Option<String> {
    for &(suffix, replacement, condition) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            if condition.is_none_or(|cond| cond(stem)) {
                return Some(format!("{stem}{replacement}"));
            }
            return None;
        }
    }
    None
}

fn step1a(word: String) -> String {
    if word.len() == 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}ie");
        }
    }
    apply_rules(
        &word,
        &[
            ("sses", "ss", None),
            ("ies", "i", None),
            ("ss", "ss", None),
            ("s", "", None),
        ],
    )
    .unwrap_or(word)
}

fn step1b(word: String) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        return if word.len() == 4 {
            format!("{stem}ie")
        } else {
            format!("{stem}i")
        };
    }

    if let Some(stem) = word.strip_suffix("eed") {
        return if has_positive_measure(stem) {
            format!("{stem}ee")
        } else {
            word
        };
    }

    let Some(stem) = ["ed", "ing"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix).filter(|s| contains_vowel(s)))
    else {
        return word;
    };
    let stem = stem.to_string();

    for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
        if stem.ends_with(suffix) {
            return format!("{}{replacement}", &stem[..stem.len() - suffix.len()]);
        }
    }

    if ends_double_consonant(&stem) {
        let last = stem.as_bytes()[stem.len() - 1];
        return if matches!(last, b'l' | b's' | b'z') {
            stem
        } else {
            stem[..stem.len() - 1].to_string()
        };
    }

    if measure(&stem) == 1 && ends_cvc(&stem) {
        return format!("{stem}e");
    }
    stem
}

fn step1c(word: String) -> String {
    let after_consonant: &dyn Fn(&str) -> bool =
        &|stem: &str| stem.len() > 1 && is_consonant(stem.as_bytes(), stem.len() - 1);
    apply_rules(&word, &[("y", "i", Some(after_consonant))]).unwrap_or(word)
}

fn step2(word: String) -> String {
    if let Some(stem) = word.strip_suffix("alli") {
        if has_positive_measure(stem) {
            return step2(format!("{stem}al"));
        }
    }

    let m = &has_positive_measure as &dyn Fn(&str) -> bool;
    // The `l` of `logi` stays with the stem so short stems like `geo` qualify.
    let logi: &dyn Fn(&str) -> bool = &|_: &str| has_positive_measure(&word[..word.len() - 3]);
    let rules: [Rule<'_>; 22] = [
        ("ational", "ate", Some(m)),
        ("tional", "tion", Some(m)),
        ("enci", "ence", Some(m)),
        ("anci", "ance", Some(m)),
        ("izer", "ize", Some(m)),
        ("bli", "ble", Some(m)),
        ("alli", "al", Some(m)),
        ("entli", "ent", Some(m)),
        ("eli", "e", Some(m)),
        ("ousli", "ous", Some(m)),
        ("ization", "ize", Some(m)),
        ("ation", "ate", Some(m)),
        ("ator", "ate", Some(m)),
        ("alism", "al", Some(m)),
        ("iveness", "ive", Some(m)),
        ("fulness", "ful", Some(m)),
        ("ousness", "ous", Some(m)),
        ("aliti", "al", Some(m)),
        ("iviti", "ive", Some(m)),
        ("biliti", "ble", Some(m)),
        ("fulli", "ful", Some(m)),
        ("logi", "log", Some(logi)),
    ];
    apply_rules(&word, &rules).unwrap_or(word)
}

fn step3(word: String) -> String {
    let m = &has_positive_measure as &dyn Fn(&str) -> bool;
    apply_rules(
        &word,
        &[
            ("icate", "ic", Some(m)),
            ("ative", "", Some(m)),
            ("alize", "al", Some(m)),
            ("iciti", "ic", Some(m)),
            ("ical", "ic", Some(m)),
            ("ful", "", Some(m)),
            ("ness", "", Some(m)),
        ],
    )
    .unwrap_or(word)
}

fn step4(word: String) -> String {
    let m = &measure_gt_1 as &dyn Fn(&str) -> bool;
    let ion: &dyn Fn(&str) -> bool =
        &|stem: &str| measure(stem) > 1 && matches!(stem.as_bytes().last(), Some(b's' | b't'));
    apply_rules(
        &word,
        &[
            ("al", "", Some(m)),
            ("ance", "", Some(m)),
            ("ence", "", Some(m)),
            ("er", "", Some(m)),
            ("ic", "", Some(m)),
            ("able", "", Some(m)),
            ("ible", "", Some(m)),
            ("ant", "", Some(m)),
            ("ement", "", Some(m)),
            ("ment", "", Some(m)),
            ("ent", "", Some(m)),
            ("ion", "", Some(ion)),
            ("ou", "", Some(m)),
            ("ism", "", Some(m)),
            ("ate", "", Some(m)),
            ("iti", "", Some(m)),
            ("ous", "", Some(m)),
            ("ive", "", Some(m)),
            ("ize", "", Some(m)),
        ],
    )
    .unwrap_or(word)
}

fn step5a(word: String) -> String {
    if let Some(stem) = word.strip_suffix('e') {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_string();
        }
    }
    word
}

fn step5b(word: String) -> String {
    if word.ends_with("ll") && measure(&word[..word.len() - 1]) > 1 {
        return word[..word.len() - 1].to_string();
    }
    word
}
