/// Format a wallet amount with thousands separator and two decimals (e.g., 1,234.50)
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (count, c) in whole.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let whole: String = grouped.chars().rev().collect();

    if negative {
        format!("-{}.{}", whole, frac)
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// Format a count in compact form (e.g., 1M, 234k)
pub fn format_count_compact(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{}M", count / 1_000_000)
    } else if count >= 1_000 {
        format!("{}k", count / 1_000)
    } else {
        count.to_string()
    }
}

/// Split the comma separated tag string the backend stores into trimmed tags
pub fn split_tags(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
