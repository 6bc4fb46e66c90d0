//! Conversion and formatting helpers

pub mod helper;

pub use helper::{format_balance, format_token_amount, format_usd, lamports_to_sol, parse_pubkey};
