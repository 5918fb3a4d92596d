//! # 門市貨架需求預測範例
//!
//! 這個範例展示完整的預測流程：
//! - 庫存：四項商品，其中一項沒有任何異動
//! - 異動：過去兩週的出庫記錄
//! - 批次預測後依風險等級列出補貨建議
//!
//! 執行：`RUST_LOG=debug cargo run --example smartshelf_forecast`

use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use forecast::{
    ForecastConfig, ForecastService, MovementKind, MovementRecord, RiskLevel, StockItem,
};
use forecast_cache::{InMemoryForecastStore, InMemoryInventory, InMemoryMovements};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🛒 ===== 門市貨架需求預測範例 =====");
    println!();

    // ========== 1. 建立庫存 ==========
    println!("📦 步驟 1: 建立庫存");
    let inventory = InMemoryInventory::with_items(vec![
        StockItem::new("MILK-1L", "鮮乳 1L", qty(18), qty(20), qty(120)),
        StockItem::new("RICE-5KG", "白米 5kg", qty(60), qty(10), qty(80)),
        StockItem::new("SOAP-3P", "肥皂三入", qty(0), qty(5), qty(40)),
        StockItem::new("UMBRELLA", "折疊傘", qty(25), qty(30), qty(150)),
    ]);
    println!("   ✓ 商品數: 4");
    println!();

    // ========== 2. 匯入異動歷史 ==========
    println!("📈 步驟 2: 匯入過去 14 天的異動");
    let now = Local::now().naive_local();
    let movements = InMemoryMovements::new();
    movements.extend(daily("MILK-1L", now, &[8, 9, 7, 10, 11, 9, 12, 10, 11, 13, 12, 14, 13, 15]));
    movements.extend(daily("RICE-5KG", now, &[2, 1, 3, 2, 2, 1, 2, 3, 2, 2, 1, 2, 2, 3]));
    movements.extend(daily("SOAP-3P", now, &[1, 2, 1, 1, 2, 1, 1, 2, 1, 1]));
    movements.record(MovementRecord::new(
        "RICE-5KG",
        MovementKind::StockIn,
        qty(40),
        now - Duration::days(5),
    ));
    println!("   ✓ MILK-1L / RICE-5KG / SOAP-3P 有出庫記錄");
    println!("   ⚠ UMBRELLA 無歷史，將使用基準估算");
    println!();

    // ========== 3. 設定預測參數 ==========
    println!("⚙️  步驟 3: 設定預測參數");
    let config = ForecastConfig::default()
        .with_lead_time_days(5)
        .with_parallel_batch(true);
    println!(
        "   α = {}, β = {}, 提前期 {} 天, 回溯 {} 天",
        config.alpha, config.beta, config.lead_time_days, config.lookback_days
    );
    println!();

    let service = ForecastService::new(inventory, movements, InMemoryForecastStore::new(), config)?;

    // ========== 4. 批次預測 ==========
    println!("🔮 步驟 4: 批次預測");
    let generated = service.generate_all();
    println!("   ✓ 完成 {} 筆", generated.len());
    println!();

    // ========== 5. 補貨建議 ==========
    println!("📋 步驟 5: 補貨建議（依缺貨天數排序）");
    println!(
        "   {:<10} {:>6} {:>6} {:>8} {:>8} {:>8}  {:<9} {}",
        "SKU", "庫存", "日需求", "缺貨天數", "再訂購點", "建議訂購", "風險", "演算法"
    );
    for forecast in service.forecasts()? {
        let days = if forecast.has_depletion() {
            forecast.days_until_stockout.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "   {:<10} {:>6} {:>6} {:>8} {:>8} {:>8}  {:<9} {}",
            forecast.sku,
            forecast.current_stock,
            forecast.predicted_demand,
            days,
            forecast.reorder_point,
            forecast.suggested_order_quantity,
            forecast.risk_level,
            forecast.algorithm
        );
    }
    println!();

    // ========== 6. 風險統計 ==========
    println!("🚨 步驟 6: 風險統計");
    let summary = service.risk_summary()?;
    for level in RiskLevel::ALL {
        println!("   {:<9} {}", level, summary.count(level));
    }
    println!("   需要關注: {}", summary.needs_attention());

    for forecast in service.forecasts_by_risk(RiskLevel::Critical)? {
        println!(
            "   ❗ {} ({}) 已缺貨，建議立即訂購 {}",
            forecast.product_name, forecast.sku, forecast.suggested_order_quantity
        );
    }

    println!();
    println!("✅ 預測完成");
    Ok(())
}

fn qty(value: i64) -> Decimal {
    Decimal::from(value)
}

/// 從 `quantities.len()` 天前開始，每天一筆出庫
fn daily(sku: &str, now: NaiveDateTime, quantities: &[i64]) -> Vec<MovementRecord> {
    let days = quantities.len() as i64;
    quantities
        .iter()
        .enumerate()
        .map(|(i, &q)| {
            MovementRecord::new(
                sku,
                MovementKind::StockOut,
                qty(q),
                now - Duration::days(days - i as i64),
            )
        })
        .collect()
}
