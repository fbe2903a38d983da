/// Annualised yield that earns a full income score (12% a year)
pub const TARGET_ANNUAL_YIELD: f64 = 0.12;

/// Months summed for the trailing dividend yield
pub const TRAILING_YIELD_MONTHS: usize = 12;

/// Calendar months in the stability window
pub const STABILITY_WINDOW_MONTHS: usize = 6;

/// Calendar months checked by the missing-income alert
pub const MISSING_INCOME_WINDOW_MONTHS: usize = 6;

/// Prior months averaged by the portfolio and per-asset income drop checks
pub const INCOME_DROP_WINDOW_MONTHS: usize = 3;

/// Daily traded value that earns a full liquidity sub-score
pub const LIQUIDITY_REFERENCE: f64 = 1_000_000.0;

/// P/VP above book at which the price-to-book component reaches zero
pub const PRICE_TO_BOOK_DECAY_SPAN: f64 = 0.5;

/// Score at or above which an asset is flagged as an opportunity
pub const OPPORTUNITY_SIGNAL_MIN: u8 = 70;

/// Score at or below which an asset is flagged as a risk
pub const RISK_SIGNAL_MAX: u8 = 40;

/// Dashboard list sizes
pub const TOP_MOVERS_LIMIT: usize = 5;
pub const TOP_CONCENTRATION_LIMIT: usize = 6;

/// Source label stored with fetched quotes
pub const QUOTE_SOURCE_BRAPI: &str = "brapi";
