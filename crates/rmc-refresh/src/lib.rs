//! # RMC Refresh
//!
//! 定價請求防抖、取消與過期回應過濾

pub mod cancellation;
pub mod client;
pub mod dirty_tracking;
pub mod scheduler;

// Re-export 主要類型
pub use cancellation::CancellationToken;
pub use client::{execute, ListPriceClient, PricingClient};
pub use dirty_tracking::{DirtyTracker, PricingInput};
pub use scheduler::{PricingScheduler, PricingTicket};
