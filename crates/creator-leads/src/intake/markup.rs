pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Dollar amount with thousands separators, e.g. `1,250` or `1,250.50`.
///
/// Digits come from the float's own decimal rendering, so large budgets print unchanged.
pub(crate) fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (digits, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    if fraction == "00" {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dollars_with_grouping() {
        assert_eq!(format_usd(300.0), "$300");
        assert_eq!(format_usd(1250.5), "$1,250.50");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000");
        assert_eq!(format_usd(-42.05), "-$42.05");
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        assert_eq!(format_usd(1e17), "$100,000,000,000,000,000");
        assert_eq!(format_usd(2.5e15), "$2,500,000,000,000,000");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">R&D's</a>"),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
    }
}
