//! Redis-style glob matching for the in-process store.
//!
//! Supports `*`, `?`, `[abc]`, `[^a]` or `[!a]`, `[a-z]` and `\` escapes,
//! matching what `SCAN MATCH` accepts so both backends select the same keys.

/// Returns true if `key` matches the glob `pattern`.
#[must_use]
pub fn glob_match(pattern: &str, key: &str) -> bool {
    match_bytes(pattern.as_bytes(), key.as_bytes())
}

/// Iterative matcher. Only the most recent `*` is ever retried, which keeps
/// the cost at `O(pattern * key)` however many stars the pattern has.
fn match_bytes(pattern: &[u8], key: &[u8]) -> bool {
    let (mut p, mut k) = (0, 0);
    // Pattern index just past the last `*`, and the key index it resumes from.
    let mut retry: Option<(usize, usize)> = None;

    while k < key.len() {
        if let Some(width) = match_token(pattern, p, key[k]) {
            p += width;
            k += 1;
        } else if pattern.get(p) == Some(&b'*') {
            p += 1;
            retry = Some((p, k));
        } else if let Some((star_p, star_k)) = retry {
            p = star_p;
            k = star_k + 1;
            retry = Some((star_p, k));
        } else {
            return false;
        }
    }

    while pattern.get(p) == Some(&b'*') {
        p += 1;
    }
    p == pattern.len()
}

/// Matches the single-byte token at `pattern[p]` against `ch`.
///
/// Returns the token width in pattern bytes on a match. `*` never matches
/// here; the caller handles it.
fn match_token(pattern: &[u8], p: usize, ch: u8) -> Option<usize> {
    match *pattern.get(p)? {
        b'*' => None,
        b'?' => Some(1),
        b'[' => {
            let (matched, consumed) = match_class(&pattern[p + 1..], ch);
            matched.then_some(1 + consumed)
        }
        b'\\' if p + 1 < pattern.len() => (pattern[p + 1] == ch).then_some(2),
        c => (c == ch).then_some(1),
    }
}

/// Matches `ch` against a bracket class body (the text after `[`).
///
/// Returns whether it matched and how many pattern bytes the class used,
/// including the closing `]`. An unterminated class runs to the end of the
/// pattern.
fn match_class(class: &[u8], ch: u8) -> (bool, usize) {
    let mut i = 0;
    let negate = matches!(class.first(), Some(b'^' | b'!'));
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < class.len() {
        match class[i] {
            b']' => {
                i += 1;
                return (matched != negate, i);
            }
            b'\\' if i + 1 < class.len() => {
                matched |= class[i + 1] == ch;
                i += 2;
            }
            start if i + 2 < class.len() && class[i + 1] == b'-' && class[i + 2] != b']' => {
                let end = class[i + 2];
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                matched |= (lo..=hi).contains(&ch);
                i += 3;
            }
            other => {
                matched |= other == ch;
                i += 1;
            }
        }
    }

    (matched != negate, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        assert!(glob_match("suite:1", "suite:1"));
        assert!(!glob_match("suite:1", "suite:10"));
        assert!(!glob_match("suite:10", "suite:1"));
    }

    #[test]
    fn test_star() {
        assert!(glob_match("suites:*", "suites:list:skip:0:limit:10"));
        assert!(glob_match("suites:*", "suites:"));
        assert!(!glob_match("suites:*", "suite:1"));
        assert!(glob_match("*", ""));
        assert!(glob_match("cases:list:suite:2:*", "cases:list:suite:2:skip:0:limit:100"));
        assert!(!glob_match("cases:list:suite:2:*", "cases:list:suite:20:skip:0:limit:100"));
        assert!(glob_match("a*b*c", "axxbyyc"));
        assert!(!glob_match("a*b*c", "axxbyy"));
    }

    #[test]
    fn test_many_stars_stay_linear() {
        let key = "a".repeat(200);
        assert!(!glob_match("*a*a*a*a*a*a*a*a*a*a*b", &key));
        assert!(glob_match("*a*a*a*a*a*a*a*a*a*a*", &key));
        assert!(glob_match("dashboard:*:*", "dashboard:trends:days:7"));
        assert!(!glob_match("dashboard:*:*", "dashboard:stats"));
    }

    #[test]
    fn test_question_mark() {
        assert!(glob_match("case:?", "case:5"));
        assert!(!glob_match("case:?", "case:55"));
        assert!(!glob_match("case:?", "case:"));
    }

    #[test]
    fn test_classes() {
        assert!(glob_match("case:[123]", "case:2"));
        assert!(!glob_match("case:[123]", "case:4"));
        assert!(glob_match("case:[0-9]", "case:7"));
        assert!(glob_match("case:[9-0]", "case:7"));
        assert!(!glob_match("case:[0-9]", "case:x"));
        assert!(glob_match("case:[^0-9]", "case:x"));
        assert!(glob_match("case:[!0-9]", "case:x"));
        assert!(!glob_match("case:[^0-9]", "case:3"));
    }

    #[test]
    fn test_escape() {
        assert!(glob_match(r"dash\*", "dash*"));
        assert!(!glob_match(r"dash\*", "dashboard"));
        assert!(glob_match(r"x[\]]", "x]"));
    }
}
