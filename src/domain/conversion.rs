use rust_decimal::Decimal;
use std::fmt;

/// Which of the two configured directed rates applies.
///
/// The table holds a *base* and a *quote* unit; each direction carries
/// its own independently configured rate. The two rates are not
/// required to be reciprocals of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    BaseToQuote,
    QuoteToBase,
}

/// A conversion to perform: a non-negative amount and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub direction: Direction,
}

impl ConversionRequest {
    /// Negative amounts clamp to zero; the amount is non-negative by
    /// construction.
    pub fn new(amount: Decimal, direction: Direction) -> Self {
        Self {
            amount: amount.max(Decimal::ZERO),
            direction,
        }
    }

    /// Builds a request from free-form input. Empty or non-numeric
    /// input coerces to zero rather than failing.
    pub fn from_input(raw: &str, direction: Direction) -> Self {
        let amount = raw.trim().parse().unwrap_or(Decimal::ZERO);
        Self::new(amount, direction)
    }
}

/// Outcome of one conversion, with a caller-facing rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub source_amount: Decimal,
    pub source_unit: String,
    pub target_amount: Decimal,
    pub target_unit: String,
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {:.3} {}",
            self.source_amount, self.source_unit, self.target_amount, self.target_unit
        )
    }
}

/// The two directed exchange rates between a base and a quote unit.
///
/// Stateless: `convert` is pure and returns identical results for
/// identical inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    base_unit: String,
    quote_unit: String,
    base_to_quote: Decimal,
    quote_to_base: Decimal,
}

impl RateTable {
    pub fn new(
        base_unit: impl Into<String>,
        quote_unit: impl Into<String>,
        base_to_quote: Decimal,
        quote_to_base: Decimal,
    ) -> Self {
        Self {
            base_unit: base_unit.into(),
            quote_unit: quote_unit.into(),
            base_to_quote,
            quote_to_base,
        }
    }

    pub fn rate(&self, direction: Direction) -> Decimal {
        match direction {
            Direction::BaseToQuote => self.base_to_quote,
            Direction::QuoteToBase => self.quote_to_base,
        }
    }

    /// Resolves a pair of unit labels to a direction, case-insensitively.
    /// Returns `None` for units the table does not carry.
    pub fn direction_for(&self, from: &str, to: &str) -> Option<Direction> {
        let matches_unit = |label: &str, unit: &str| label.eq_ignore_ascii_case(unit);
        if matches_unit(from, &self.base_unit) && matches_unit(to, &self.quote_unit) {
            Some(Direction::BaseToQuote)
        } else if matches_unit(from, &self.quote_unit) && matches_unit(to, &self.base_unit) {
            Some(Direction::QuoteToBase)
        } else {
            None
        }
    }

    /// Applies exactly one directed rate and rounds the target amount
    /// to 3 decimal places.
    pub fn convert(&self, request: &ConversionRequest) -> ConversionResult {
        let (source_unit, target_unit) = match request.direction {
            Direction::BaseToQuote => (&self.base_unit, &self.quote_unit),
            Direction::QuoteToBase => (&self.quote_unit, &self.base_unit),
        };
        let target_amount = (request.amount * self.rate(request.direction)).round_dp(3);

        ConversionResult {
            source_amount: request.amount,
            source_unit: source_unit.clone(),
            target_amount,
            target_unit: target_unit.clone(),
        }
    }
}
