/// Formats an integer with `,` thousands separators.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut output = String::with_capacity(len.saturating_add(len / 3));
    for (idx, ch) in digits.chars().enumerate() {
        let remaining = len.saturating_sub(idx);
        if idx > 0 && remaining % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }
    output
}
