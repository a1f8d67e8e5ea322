/// `hash * 31 + unit` over UTF-16 code units, wrapped to 32 bits after every
/// step. Returns the magnitude of the final signed value.
pub fn string_hash(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Same recurrence, but only the shifted term is wrapped to 32 bits; the
/// running value is carried unwrapped between steps.
pub fn accumulating_hash(input: &str) -> i64 {
    input.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        shifted - hash + i64::from(unit)
    })
}

#[test]
fn string_hash_test() {
    assert_eq!(string_hash(""), 0);
    assert_eq!(string_hash("a"), 97);
    assert_eq!(string_hash("ab"), 3105);
    assert_eq!(string_hash("KYNNGSM"), 465722995);
    assert_eq!(string_hash("DHIJL"), 65016903);
}

#[test]
fn accumulating_hash_test() {
    assert_eq!(accumulating_hash(""), 0);
    assert_eq!(accumulating_hash("1005"), 1507428);
    assert_eq!(accumulating_hash("3821374"), -331033492);
    assert_eq!(accumulating_hash("100.55.25"), 402610708);
}
