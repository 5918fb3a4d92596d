//! 日需求聚合

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use forecast_core::{ConsumptionVocabulary, DailyDemandPoint, MovementRecord};
use rust_decimal::Decimal;

/// 需求聚合器
pub struct DemandAggregator;

impl DemandAggregator {
    /// 篩選消耗類異動
    ///
    /// 保留 SKU 相符、時間嚴格晚於 `since`、且類型計入消耗的記錄，依時間排序。
    /// 缺少 SKU 或時間戳的記錄直接略過。
    pub fn select_consumption<'a>(
        records: &'a [MovementRecord],
        sku: &str,
        since: NaiveDateTime,
        vocabulary: ConsumptionVocabulary,
    ) -> Vec<&'a MovementRecord> {
        let mut selected: Vec<&MovementRecord> = records
            .iter()
            .filter(|r| r.is_well_formed() && r.belongs_to(sku))
            .filter(|r| r.timestamp.is_some_and(|at| at > since))
            .filter(|r| vocabulary.is_consumption(r.kind))
            .collect();

        selected.sort_by_key(|r| r.timestamp);
        selected
    }

    /// 按日期彙總需求（取數量絕對值），不補零
    pub fn aggregate<'a, I>(records: I) -> Vec<DailyDemandPoint>
    where
        I: IntoIterator<Item = &'a MovementRecord>,
    {
        let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

        for record in records.into_iter().filter(|r| r.is_well_formed()) {
            let Some(timestamp) = record.timestamp else {
                continue;
            };
            *buckets.entry(timestamp.date()).or_insert(Decimal::ZERO) += record.quantity.abs();
        }

        buckets
            .into_iter()
            .map(|(date, quantity)| DailyDemandPoint::new(date, quantity))
            .collect()
    }

    /// 取出每日需求數量序列
    pub fn values(points: &[DailyDemandPoint]) -> Vec<Decimal> {
        points.iter().map(|p| p.quantity).collect()
    }
}
