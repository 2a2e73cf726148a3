//! String-level arithmetic.
//!
//! The four string operators of the language. Every function allocates a
//! fresh buffer and never touches its inputs. A `None` operand is the
//! language's null string and reads as empty unless noted otherwise.
//!
//! Strings are byte strings with no encoding. A character is one byte, so
//! input that is not UTF-8 compares and filters exactly as it was given.

/// `a + b`: concatenation.
pub fn add(a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
    let a = a.unwrap_or_default();
    let b = b.unwrap_or_default();
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

/// `a - b`: every byte of `a` that occurs nowhere in `b`, in order.
///
/// This is character-class filtering, not substring removal:
/// `sub("banana", "an") == "b"`.
pub fn sub(a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
    let Some(a) = a else {
        return Vec::new();
    };
    match b {
        None | Some([]) => a.to_vec(),
        Some(b) => {
            let mut removed = [false; 256];
            for &c in b {
                removed[usize::from(c)] = true;
            }
            a.iter().copied().filter(|&c| !removed[usize::from(c)]).collect()
        }
    }
}

/// `a * b`: alternate one byte from each side, then the longer tail.
pub fn mul(a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
    let a = a.unwrap_or_default();
    let b = b.unwrap_or_default();
    let mut out = Vec::with_capacity(a.len() + b.len());
    let shared = a.len().min(b.len());
    for (&l, &r) in a.iter().zip(b) {
        out.push(l);
        out.push(r);
    }
    out.extend_from_slice(&a[shared..]);
    out.extend_from_slice(&b[shared..]);
    out
}

/// `a / b`: the language defines string division as subtraction.
pub fn div(a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
    sub(a, b)
}

/// `a == b`: a null string is never equal to anything, itself included.
pub fn string_eq(a: Option<&[u8]>, b: Option<&[u8]>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// `a != b`: logical negation of [`string_eq`].
pub fn string_ne(a: Option<&[u8]>, b: Option<&[u8]>) -> bool {
    !string_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(text: &str) -> Option<&[u8]> {
        Some(text.as_bytes())
    }

    #[test]
    fn concrete_cases() {
        assert_eq!(add(s("ab"), s("cd")), b"abcd");
        assert_eq!(mul(s("ab"), s("cd")), b"acbd");
        assert_eq!(sub(s("abc"), s("b")), b"ac");
    }

    #[test]
    fn sub_removes_every_occurrence() {
        assert_eq!(sub(s("banana"), s("an")), b"b");
        assert_eq!(sub(s("hello world"), s("lo")), b"he wrd");
    }

    #[test]
    fn sub_null_handling() {
        assert_eq!(sub(None, s("abc")), b"");
        assert_eq!(sub(s("abc"), None), b"abc");
        assert_eq!(sub(s("abc"), s("")), b"abc");
    }

    #[test]
    fn null_reads_as_empty_for_add_and_mul() {
        assert_eq!(add(None, s("x")), b"x");
        assert_eq!(add(None, None), b"");
        assert_eq!(mul(s("xyz"), None), b"xyz");
        assert_eq!(mul(None, s("xyz")), b"xyz");
    }

    #[test]
    fn mul_appends_longer_tail() {
        assert_eq!(mul(s("a"), s("1234")), b"a1234");
        assert_eq!(mul(s("abcd"), s("1")), b"a1bcd");
    }

    #[test]
    fn div_aliases_sub() {
        assert_eq!(div(s("graph"), s("ph")), b"gra");
        assert_eq!(div(None, s("x")), b"");
    }

    #[test]
    fn null_string_is_not_equal_to_itself() {
        assert!(!string_eq(None, None));
        assert!(!string_eq(s(""), None));
        assert!(string_eq(s(""), s("")));
        assert!(string_ne(None, None));
        assert!(!string_ne(s("a"), s("a")));
    }

    #[test]
    fn non_utf8_bytes_stay_distinct() {
        let (ff, fe): (&[u8], &[u8]) = (b"\xff", b"\xfe");
        assert!(!string_eq(Some(ff), Some(fe)));
        assert!(string_ne(Some(ff), Some(fe)));
        assert_eq!(sub(Some(ff), Some(fe)), b"\xff");
        let mixed: &[u8] = b"\xff\xfe\xff";
        assert_eq!(sub(Some(mixed), Some(ff)), b"\xfe");
        assert_eq!(mul(Some(ff), Some(fe)), b"\xff\xfe");
    }

    #[test]
    fn multibyte_utf8_is_filtered_per_byte() {
        // "é" is 0xC3 0xA9; removing "é" from "ä" (0xC3 0xA4) drops the
        // shared lead byte.
        assert_eq!(sub(s("ä"), s("é")), b"\xa4");
    }

    proptest! {
        #[test]
        fn mul_length_is_additive(a in proptest::collection::vec(any::<u8>(), 0..12),
                                  b in proptest::collection::vec(any::<u8>(), 0..12)) {
            let out = mul(Some(a.as_slice()), Some(b.as_slice()));
            prop_assert_eq!(out.len(), a.len() + b.len());
        }

        #[test]
        fn mul_with_empty_is_identity(a in proptest::collection::vec(any::<u8>(), 0..16)) {
            prop_assert_eq!(mul(Some(a.as_slice()), s("")), a);
        }

        #[test]
        fn sub_keeps_only_absent_bytes(a in proptest::collection::vec(any::<u8>(), 0..16),
                                       b in proptest::collection::vec(any::<u8>(), 0..4)) {
            let out = sub(Some(a.as_slice()), Some(b.as_slice()));
            for c in &out {
                prop_assert!(a.contains(c));
                prop_assert!(!b.contains(c));
            }
            prop_assert_eq!(sub(Some(a.as_slice()), s("")), a.clone());
            prop_assert_eq!(sub(s(""), Some(b.as_slice())), b"");
        }
    }
}
