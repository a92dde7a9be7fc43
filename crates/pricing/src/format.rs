//! Display formatting for amounts as the staff form shows them.

/// Render an amount with a `$` prefix and `.` thousands separators.
///
/// `2700000` becomes `"$2.700.000"`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');

    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
