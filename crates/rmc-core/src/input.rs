//! 表單輸入解析與數值輔助函式
//!
//! 表單欄位皆為字串；空字串與非數字一律視為「缺值」（`None`），不視為錯誤。

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 解析表單數量欄位
///
/// # 範例
/// ```
/// # use rmc_core::parse_quantity;
/// # use rust_decimal::Decimal;
/// assert_eq!(parse_quantity(" 12.5 "), Some(Decimal::new(125, 1)));
/// assert_eq!(parse_quantity(""), None);
/// assert_eq!(parse_quantity("abc"), None);
/// ```
pub fn parse_quantity(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// 四捨五入到指定小數位（中點往正無限大方向，與瀏覽器 `Math.round` 一致）
pub fn round_half_up(value: Decimal, decimals: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(decimals, strategy)
}

/// 取整到最接近的步長倍數（例如 MGQ 取整到百位）
///
/// 步長為 0 或計算溢出時回傳 `None`。
pub fn snap_to_step(value: Decimal, step: Decimal) -> Option<Decimal> {
    let ratio = value.checked_div(step)?;
    round_half_up(ratio, 0).checked_mul(step)
}

/// 固定小數位格式化（例如 `1200.00`）
pub fn format_quantity(value: Decimal, decimals: u32) -> String {
    let mut rounded = round_half_up(value, decimals);
    rounded.rescale(decimals);
    rounded.to_string()
}

/// 去除尾端零的顯示格式（例如 `300`）
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}
