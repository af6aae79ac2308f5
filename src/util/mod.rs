//! util — мелкие хелперы CLI (hex-ввод, разбор чисел, hex-дамп).

use anyhow::{anyhow, Result};

/// Decode a hex string; whitespace, ':' and '-' separators are skipped.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = s
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b'-')
        .collect();
    let digits = match digits.as_slice() {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        all => all,
    };
    if digits.len() % 2 != 0 {
        return Err(anyhow!("hex string must have even length"));
    }
    let mut out = Vec::with_capacity(digits.len() / 2);
    for (i, pair) in digits.chunks(2).enumerate() {
        let h = (pair[0] as char)
            .to_digit(16)
            .ok_or_else(|| anyhow!("invalid hex digit at pos {}", i * 2))?;
        let l = (pair[1] as char)
            .to_digit(16)
            .ok_or_else(|| anyhow!("invalid hex digit at pos {}", i * 2 + 1))?;
        out.push(((h << 4) | l) as u8);
    }
    Ok(out)
}

/// Parse u16 in decimal or 0x/0o/0b notation (clap value_parser).
pub fn parse_u16_auto(s: &str) -> Result<u16, String> {
    let s = s.trim();
    if let Some(x) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(x, 16).map_err(|e| e.to_string())
    } else if let Some(x) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        u16::from_str_radix(x, 8).map_err(|e| e.to_string())
    } else if let Some(x) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u16::from_str_radix(x, 2).map_err(|e| e.to_string())
    } else {
        s.parse::<u16>().map_err(|e| e.to_string())
    }
}

pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            if i % 16 == 0 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out.push_str(&format!("{:02x}", b));
    }
    out
}
