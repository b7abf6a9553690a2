pub mod asset_operations;
pub mod metadata_operations;
pub mod price_operations;
pub mod stats_operations;
pub mod system_operations;

// Re-export all operations for backward compatibility
pub use asset_operations::*;
pub use metadata_operations::*;
pub use price_operations::*;
pub use stats_operations::*;
pub use system_operations::*;

/// 外部行情API单次批量查询的上限
pub const QUOTE_BATCH_LIMIT: i64 = 100;
/// 外部行情API可解析的rank窗口上界
pub const RESOLVABLE_RANK_MAX: i32 = 100;
