/// One row of the token list, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct TokenEntry {
    mint: String,
    display_amount: String,
    decimals: u8,
    symbol: Option<String>,
}

impl TokenEntry {
    /// Create a new token entry
    pub fn new(
        mint: impl Into<String>,
        display_amount: impl Into<String>,
        decimals: u8,
        symbol: Option<String>,
    ) -> Self {
        Self {
            mint: mint.into(),
            display_amount: display_amount.into(),
            decimals,
            symbol,
        }
    }

    pub fn mint(&self) -> &str {
        &self.mint
    }

    pub fn display_amount(&self) -> &str {
        &self.display_amount
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Symbol, or a generic label for tokens without metadata
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or("Unknown Token")
    }
}
