pub mod cache;
pub mod traits;

// Live market-data implementations
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
