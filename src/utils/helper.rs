use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Parse a pubkey from string, with better error messages
pub fn parse_pubkey(s: &str) -> anyhow::Result<Pubkey> {
    Pubkey::from_str(s).map_err(|e| anyhow::anyhow!("Invalid pubkey {}: {}", s, e))
}

/// Format lamports as SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Fixed-point rendering with `decimals` fractional digits.
///
/// Negative zero is printed as zero so that re-formatting a parsed value
/// always reproduces the same text.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals);
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Balance figure as shown on the dashboard (2 decimals)
pub fn format_balance(balance: f64) -> String {
    format_fixed(balance, 2)
}

/// Token list amount (4 decimals)
pub fn format_token_amount(amount: f64) -> String {
    format_fixed(amount, 4)
}

/// USD figure with currency suffix
pub fn format_usd(value: f64) -> String {
    format!("${} USD", format_fixed(value, 2))
}

/// Format an address for display (truncated)
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
