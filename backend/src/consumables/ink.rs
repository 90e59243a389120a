use regex::Regex;
use std::sync::LazyLock;

/// A channel is usable while strictly above this percentage.
pub const USABLE_ABOVE_PERCENT: u32 = 10;

static INK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z]+):\s+([0-9]+)%$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkLevel {
    pub channel: String,
    pub percent: u32,
}

impl InkLevel {
    pub fn is_usable(&self) -> bool {
        self.percent > USABLE_ABOVE_PERCENT
    }
}

/// Extracts every `<channel>: <percent>%` line of an ink report.
///
/// Lines that do not match exactly are ignored.
pub fn parse_ink_levels(report: &str) -> Vec<InkLevel> {
    report
        .lines()
        .filter_map(|line| INK_LINE.captures(line.trim_end()))
        .filter_map(|caps| {
            Some(InkLevel {
                channel: caps[1].to_string(),
                percent: caps[2].parse().ok()?,
            })
        })
        .collect()
}
