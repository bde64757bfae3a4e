//! Currency symbol to ISO code resolution.
//!
//! Symbols such as `$` or `kr` are ambiguous and map to several codes. When a
//! symbol names the input currency only the first code is used; when it names
//! an output currency every code is requested.

/// Symbol table in fixed order. The first code of each entry is the preferred
/// one for input resolution. If a symbol were listed twice, the later entry
/// wins.
pub const CURRENCY_SYMBOLS: &[(&str, &[&str])] = &[
    ("$", &["AUD", "CAD", "HKD", "MXN", "NZD", "SGD", "USD"]),
    ("€", &["EUR"]),
    ("¥", &["CNY", "JPY"]),
    ("£", &["GBP"]),
    ("A$", &["AUD"]),
    ("лв.", &["BGN"]),
    ("R$", &["BRL"]),
    ("Can$", &["CAD"]),
    ("C$", &["CAD"]),
    ("Fr.", &["CHF"]),
    ("SFr.", &["CHF"]),
    ("元", &["CNY", "HKD"]),
    ("RMB", &["CNY"]),
    ("Kč", &["CZK"]),
    ("HK$", &["HKD"]),
    ("kn", &["HRK"]),
    ("Ft", &["HUF"]),
    ("Rp", &["IDR"]),
    ("₪", &["ILS"]),
    ("₹", &["INR"]),
    ("₩", &["KRW"]),
    ("Mex$", &["MXN"]),
    ("RM", &["MYR"]),
    ("kr", &["DKK", "NOK", "SEK"]),
    ("NZ$", &["NZD"]),
    ("₱", &["PHP"]),
    ("zł", &["PLN"]),
    ("lei", &["RON"]),
    ("₽", &["RUB"]),
    ("руб", &["RUB"]),
    ("S$", &["SGD"]),
    ("฿", &["THB"]),
    ("บาท", &["THB"]),
    ("₺", &["TRY"]),
    ("TL", &["TRY"]),
    ("US$", &["USD"]),
    ("R", &["ZAR"]),
];

/// Looks up a symbol in a table, honouring last-definition-wins.
fn lookup<'a>(table: &'a [(&str, &'a [&'a str])], token: &str) -> Option<&'a [&'a str]> {
    table
        .iter()
        .rev()
        .find(|(symbol, _)| *symbol == token)
        .map(|(_, codes)| *codes)
}

#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl SymbolTable {
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        SymbolTable { entries }
    }

    /// Resolves an input currency token to a single code. Unknown tokens pass
    /// through unchanged.
    pub fn resolve_input(&self, token: &str) -> String {
        match lookup(self.entries, token).and_then(|codes| codes.first()) {
            Some(code) => (*code).to_string(),
            None => token.to_string(),
        }
    }

    /// Resolves an output currency token to every code it stands for.
    /// Unknown tokens pass through unchanged.
    pub fn resolve_output(&self, token: &str) -> Vec<String> {
        match lookup(self.entries, token) {
            Some(codes) => codes.iter().map(|c| (*c).to_string()).collect(),
            None => vec![token.to_string()],
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new(CURRENCY_SYMBOLS)
    }
}
