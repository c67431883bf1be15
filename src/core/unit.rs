//! The registry of convertible units (fiat currencies and cryptocurrencies).

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

/// Code of the unit every rate is expressed in.
pub const REFERENCE_CODE: &str = "USD";

/// Substituted when a base or "from" code is not in the catalog.
pub const FALLBACK_BASE_CODE: &str = "JPY";

/// Substituted when a "to" code is not in the catalog.
pub const FALLBACK_TARGET_CODE: &str = "INR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Fiat,
    Crypto,
}

impl UnitKind {
    /// Largest number of fraction digits shown for amounts in this kind.
    pub fn max_fraction_digits(&self) -> usize {
        match self {
            UnitKind::Fiat => 2,
            UnitKind::Crypto => 6,
        }
    }
}

impl Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UnitKind::Fiat => "fiat",
                UnitKind::Crypto => "crypto",
            }
        )
    }
}

impl FromStr for UnitKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fiat" => Ok(UnitKind::Fiat),
            "crypto" => Ok(UnitKind::Crypto),
            _ => Err(anyhow::anyhow!("Invalid unit kind: {}", s)),
        }
    }
}

/// A fiat currency or cryptocurrency with its rate against [`REFERENCE_CODE`].
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub code: String,
    pub name: String,
    pub country: Option<String>,
    pub flag: String,
    pub symbol: String,
    pub rate_to_reference: f64,
    pub change_24h: f64,
    pub kind: UnitKind,
}

impl Unit {
    pub fn is_reference(&self) -> bool {
        self.code == REFERENCE_CODE
    }

    /// Value of one unit in the reference unit.
    pub fn reference_price(&self) -> f64 {
        1.0 / self.rate_to_reference
    }
}

struct UnitDef {
    code: &'static str,
    name: &'static str,
    country: Option<&'static str>,
    flag: &'static str,
    symbol: &'static str,
    rate: f64,
    change: f64,
    kind: UnitKind,
}

const fn fiat(
    code: &'static str,
    name: &'static str,
    country: &'static str,
    flag: &'static str,
    symbol: &'static str,
    rate: f64,
    change: f64,
) -> UnitDef {
    UnitDef {
        code,
        name,
        country: Some(country),
        flag,
        symbol,
        rate,
        change,
        kind: UnitKind::Fiat,
    }
}

// Crypto is quoted by its reference price; the catalog stores units per reference.
const fn crypto(
    code: &'static str,
    name: &'static str,
    flag: &'static str,
    symbol: &'static str,
    price: f64,
    change: f64,
) -> UnitDef {
    UnitDef {
        code,
        name,
        country: None,
        flag,
        symbol,
        rate: 1.0 / price,
        change,
        kind: UnitKind::Crypto,
    }
}

#[rustfmt::skip]
const DEFINITIONS: &[UnitDef] = &[
    // Top fiat
    fiat("USD", "United States Dollar", "United States", "🇺🇸", "$", 1.0, 0.0),
    fiat("EUR", "European Euro", "European Union", "🇪🇺", "€", 0.9120, 0.21),
    fiat("JPY", "Japanese Yen", "Japan", "🇯🇵", "¥", 147.14, -0.12),
    fiat("GBP", "British Pound", "United Kingdom", "🇬🇧", "£", 0.7850, 0.15),
    fiat("INR", "Indian Rupee", "India", "🇮🇳", "₹", 83.50, 0.05),
    // Other major fiat
    fiat("AUD", "Australian Dollar", "Australia", "🇦🇺", "A$", 1.5180, 0.33),
    fiat("CAD", "Canadian Dollar", "Canada", "🇨🇦", "C$", 1.3720, -0.08),
    fiat("CHF", "Swiss Franc", "Switzerland", "🇨🇭", "CHF", 0.87, 0.01),
    fiat("CNY", "Chinese Yuan (RMB)", "China", "🇨🇳", "¥", 7.25, -0.03),
    fiat("HKD", "Hong Kong Dollar", "Hong Kong", "🇭🇰", "HK$", 7.82, 0.0),
    fiat("NZD", "New Zealand Dollar", "New Zealand", "🇳🇿", "NZ$", 1.63, 0.25),
    fiat("SEK", "Swedish Krona", "Sweden", "🇸🇪", "kr", 10.45, 0.3),
    fiat("KRW", "South Korean Won", "South Korea", "🇰🇷", "₩", 1350.00, -0.6),
    fiat("SGD", "Singapore Dollar", "Singapore", "🇸🇬", "S$", 1.35, 0.1),
    fiat("NOK", "Norwegian Krone", "Norway", "🇳🇴", "kr", 10.60, 0.2),
    fiat("MXN", "Mexican Peso", "Mexico", "🇲🇽", "$", 17.10, -0.4),
    fiat("TWD", "New Taiwan Dollar", "Taiwan", "🇹🇼", "NT$", 31.00, -0.2),
    fiat("ZAR", "South African Rand", "South Africa", "🇿🇦", "R", 18.50, 0.5),
    fiat("BRL", "Brazilian Real", "Brazil", "🇧🇷", "R$", 5.15, -1.2),
    fiat("DKK", "Danish Krone", "Denmark", "🇩🇰", "kr", 6.85, 0.2),
    fiat("PLN", "Polish Złoty", "Poland", "🇵🇱", "zł", 3.95, 0.4),
    fiat("THB", "Thai Baht", "Thailand", "🇹🇭", "฿", 36.50, -0.1),
    fiat("IDR", "Indonesian Rupiah", "Indonesia", "🇮🇩", "Rp", 15700.0, 0.3),
    fiat("HUF", "Hungarian Forint", "Hungary", "🇭🇺", "Ft", 350.00, -0.5),
    fiat("CZK", "Czech Koruna", "Czech Republic", "🇨🇿", "Kč", 23.00, 0.1),
    fiat("ILS", "Israeli New Shekel", "Israel", "🇮🇱", "₪", 3.70, 0.0),
    fiat("CLP", "Chilean Peso", "Chile", "🇨🇱", "$", 930.00, -1.0),
    fiat("PHP", "Philippine Peso", "Philippines", "🇵🇭", "₱", 58.50, 0.2),
    fiat("AED", "UAE Dirham", "United Arab Emirates", "🇦🇪", "د.إ", 3.67, 0.0),
    fiat("COP", "Colombian Peso", "Colombia", "🇨🇴", "$", 3900.00, -0.8),
    fiat("SAR", "Saudi Riyal", "Saudi Arabia", "🇸🇦", "ر.س", 3.75, 0.0),
    fiat("MYR", "Malaysian Ringgit", "Malaysia", "🇲🇾", "RM", 4.70, 0.1),
    fiat("RON", "Romanian Leu", "Romania", "🇷🇴", "lei", 4.55, 0.2),
    fiat("RUB", "Russian Ruble", "Russia", "🇷🇺", "₽", 90.00, 0.8),
    fiat("TRY", "Turkish Lira", "Turkey", "🇹🇷", "₺", 32.50, -1.5),
    // Cryptocurrencies
    crypto("BTC", "Bitcoin", "₿", "₿", 87000.0, 2.5),
    crypto("ETH", "Ethereum", "Ξ", "Ξ", 4560.0, 3.1),
    crypto("BNB", "Binance Coin", "🟡", "BNB", 640.0, 1.8),
    crypto("SOL", "Solana", "📛", "SOL", 206.0, 5.2),
    crypto("XRP", "Ripple", "💧", "XRP", 0.66, -0.5),
    crypto("DOGE", "Dogecoin", "🐶", "DOGE", 0.15, 0.2),
    crypto("ADA", "Cardano", "₳", "₳", 0.50, 1.1),
    crypto("AVAX", "Avalanche", "🔺", "AVAX", 40.0, 4.5),
    crypto("DOT", "Polkadot", "🟣", "DOT", 7.50, 2.3),
    crypto("MATIC", "Polygon", "💠", "MATIC", 0.80, 0.9),
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let units = DEFINITIONS
        .iter()
        .map(|d| Unit {
            code: d.code.to_string(),
            name: d.name.to_string(),
            country: d.country.map(str::to_string),
            flag: d.flag.to_string(),
            symbol: d.symbol.to_string(),
            rate_to_reference: d.rate,
            change_24h: d.change,
            kind: d.kind,
        })
        .collect();
    Catalog { units }
});

/// Returns the static registry in its fixed order.
pub fn list_units() -> &'static [Unit] {
    BUILTIN.units()
}

/// Looks up a unit in the static registry.
pub fn find_by_code(code: &str) -> Option<&'static Unit> {
    BUILTIN.find_by_code(code)
}

/// An ordered set of units. Membership is fixed; rates change only by
/// replacing the whole catalog (see [`crate::core::simulator::refresh_rates`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    units: Vec<Unit>,
}

impl Catalog {
    /// A fresh working copy of the static registry.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub(crate) fn from_units(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.code == code)
    }

    /// Looks up `code`, substituting `fallback_code` (and then the first unit)
    /// when it is missing.
    pub fn find_or<'a>(&'a self, code: &str, fallback_code: &str) -> &'a Unit {
        self.find_by_code(code)
            .or_else(|| {
                tracing::debug!("Unknown unit {}, falling back to {}", code, fallback_code);
                self.find_by_code(fallback_code)
            })
            .unwrap_or_else(|| self.reference())
    }

    /// The reference unit, or the first unit if the catalog has none.
    pub fn reference(&self) -> &Unit {
        self.find_by_code(REFERENCE_CODE)
            .unwrap_or_else(|| &self.units[0])
    }

    /// Units of `kind`, sorted by name.
    pub fn of_kind(&self, kind: UnitKind) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.iter().filter(|u| u.kind == kind).collect();
        units.sort_by(|a, b| a.name.cmp(&b.name));
        units
    }

    pub fn fiat(&self) -> Vec<&Unit> {
        self.of_kind(UnitKind::Fiat)
    }

    pub fn crypto(&self) -> Vec<&Unit> {
        self.of_kind(UnitKind::Crypto)
    }

    /// Case-insensitive match on name or code. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Unit> {
        let needle = term.trim().to_lowercase();
        self.units
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.code.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Maps codes to units in the same order, skipping unknown codes.
    pub fn resolve<'a, S: AsRef<str>>(&'a self, codes: &[S]) -> Vec<&'a Unit> {
        codes
            .iter()
            .filter_map(|c| self.find_by_code(c.as_ref()))
            .collect()
    }

    /// The fiat unit following `code` in catalog order, wrapping around.
    pub fn next_fiat(&self, code: &str) -> &Unit {
        let fiat: Vec<&Unit> = self
            .units
            .iter()
            .filter(|u| u.kind == UnitKind::Fiat)
            .collect();
        let next = match fiat.iter().position(|u| u.code == code) {
            Some(i) => (i + 1) % fiat.len(),
            None => 0,
        };
        fiat[next]
    }

    /// How many `to` one `from` buys.
    pub fn cross_rate(from: &Unit, to: &Unit) -> f64 {
        to.rate_to_reference / from.rate_to_reference
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
