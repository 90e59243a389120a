use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Number of decimal digits of `n` (0 for 0).
fn digits(mut n: u32) -> usize {
    let mut count = 0;
    while n > 0 {
        n /= 10;
        count += 1;
    }
    count
}

/// Page index as the rasterizer writes it: left-padded with zeros to the
/// digit count of `total_pages` (120 sheets → `"007"`).
pub fn page_suffix(page: u32, total_pages: u32) -> String {
    format!("{:0width$}", page, width = digits(total_pages))
}

pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg))
}
