pub mod aggregation_service;
pub mod merge_service;
pub mod payout_classifier;
pub mod portfolio_service;
pub mod quote_service;
pub mod valuation_service;
