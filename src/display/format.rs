//! Formatting helpers for terminal output

/// Format an optional statistic with fixed precision, "-" when unset
pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// Format an optional integer statistic, "-" when unset
pub fn format_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Format a year range as "min-max"
pub fn format_year_range(range: Option<(i32, i32)>) -> String {
    match range {
        Some((min, max)) => format!("{}-{}", min, max),
        None => "-".to_string(),
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a section heading with an underline
pub fn section(title: &str, width: usize) -> String {
    format!("\n{}\n{}\n", title, "─".repeat(width))
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(0.123456), 4), "0.1235");
        assert_eq!(format_value(Some(0.15), 2), "0.15");
        assert_eq!(format_value(None, 4), "-");
    }

    #[test]
    fn test_format_year_range() {
        assert_eq!(format_year_range(Some((2010, 2022))), "2010-2022");
        assert_eq!(format_year_range(None), "-");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("上海浦东发展银行股份有限公司", 8), "上海浦东发...");
        assert_eq!(truncate("浦发银行", 8), "浦发银行");
        assert_eq!(truncate("Hello World", 5), "He...");
    }
}
