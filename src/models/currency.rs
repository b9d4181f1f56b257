use rust_decimal::Decimal;

/// Display currency. Stored amounts are always base (USD) units; a currency
/// only changes how amounts are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
        }
    }

    /// Divisor applied to base amounts when rendering in this currency.
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Usd => Decimal::ONE,
            Self::Eur => Decimal::new(84, 2),
            Self::Gbp => Decimal::new(72, 2),
            Self::Jpy => Decimal::new(11014, 2),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            "JPY" => Some(Self::Jpy),
            _ => None,
        }
    }

    pub fn all() -> &'static [Currency] {
        &[Self::Usd, Self::Eur, Self::Gbp, Self::Jpy]
    }

    /// Render a base amount in this currency: converted by the rate, two
    /// decimal places, symbol prefixed. e.g. `display(2600) == "$2600.00"`.
    pub fn display(&self, base_amount: Decimal) -> String {
        format!("{}{:.2}", self.symbol(), base_amount / self.rate())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
