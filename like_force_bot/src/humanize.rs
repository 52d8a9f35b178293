const UNIT: i64 = 1000;
const SUFFIXES: &[char] = &['k', 'M', 'G', 'T', 'P', 'E'];

/// Shorten a count for display, like `1500` into `1.5k`.
///
/// Anything under a thousand, zero and negatives included, is printed as is.
#[must_use]
pub fn format_count(count: i64) -> String {
    if count < UNIT {
        return count.to_string();
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = count / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1}{}", count as f64 / div as f64, SUFFIXES[exp])
}
