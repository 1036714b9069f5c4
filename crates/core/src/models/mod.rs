pub mod dividend;
pub mod holding;
pub mod payout;
pub mod portfolio;
pub mod settings;
pub mod valuation;
