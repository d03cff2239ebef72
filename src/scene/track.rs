//! 时间采样变换轨道模块
//!
//! 场景节点的变换属性按 (时间, 4×4 矩阵) 采样对存储。采样语义为
//! 阶梯保持：查询时刻 t 返回 t 处或之前最近一次写入的采样，不做
//! 插值。同步器只做追加；相同时刻重复写入按标准时间采样语义替换
//! 既有采样。

use crate::core::math::Matrix4;

/// 时间采样的 4×4 变换矩阵轨道
///
/// `times` 与 `values` 等长且按时间升序索引对齐。
#[derive(Debug, Clone, Default)]
pub struct TransformTrack {
    times: Vec<f64>,
    values: Vec<Matrix4>,
}

impl TransformTrack {
    /// 创建空轨道
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取采样数量
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// 轨道是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// 获取最后一个采样时刻
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// 在指定时刻写入采样
    ///
    /// 保持时间升序：帧循环的追加落在末尾为 O(1)；乱序写入按排序
    /// 位置插入；时刻完全相等时替换既有采样值。
    pub fn set(&mut self, time: f64, value: Matrix4) {
        let idx = self.times.partition_point(|&t| t < time);
        if idx < self.times.len() && self.times[idx] == time {
            self.values[idx] = value;
        } else {
            self.times.insert(idx, time);
            self.values.insert(idx, value);
        }
    }

    /// 按阶梯保持语义采样
    ///
    /// # 返回
    ///
    /// - `Some(&Matrix4)`: 时刻 `time` 处或之前最近的采样
    /// - `None`: 轨道为空或 `time` 早于第一个采样
    pub fn sample(&self, time: f64) -> Option<&Matrix4> {
        // partition_point 返回第一个大于 time 的位置，即后继采样
        let next = self.times.partition_point(|&t| t <= time);
        if next == 0 {
            None
        } else {
            Some(&self.values[next - 1])
        }
    }

    /// 遍历 (时间, 矩阵) 采样对
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Matrix4)> {
        self.times.iter().copied().zip(self.values.iter())
    }
}
