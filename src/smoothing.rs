use crate::models::RunSeries;

/// 居中滑动平均，边界处按实际重叠的样本数归一化
///
/// 等价于 `conv(x, ones(w), "same") / conv(ones(n), ones(w), "same")`：
/// 输出位置 t 的窗口覆盖 `t - w/2 ..= t + (w-1)/2`，截断到序列范围内。
/// 输出长度与输入相同；`w <= 1` 时原样返回。
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window <= 1 || n == 0 {
        return values.to_vec();
    }

    let before = window / 2;
    let after = (window - 1) / 2;

    // 每个窗口单独求和，NaN/inf 只影响包含它的窗口
    (0..n)
        .map(|t| {
            let lo = t.saturating_sub(before);
            let hi = (t + after).min(n - 1);
            let sum: f64 = values[lo..=hi].iter().sum();
            sum / (hi + 1 - lo) as f64
        })
        .collect()
}

/// 对每个序列的指标列做平滑，原始数值列保持不变
pub fn smooth_datasets(datasets: &mut [RunSeries], window: usize) {
    if window <= 1 {
        return;
    }
    for series in datasets.iter_mut() {
        let smoothed = moving_average(&series.metric_values(), window);
        series.set_metric_values(&smoothed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricPoint, RunInfo};
    use std::path::PathBuf;

    #[test]
    fn test_boundary_normalized() {
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], 1.5);
        assert_eq!(out[1], 2.0);
        assert_eq!(out[2], 3.0);
        assert_eq!(out[4], 4.5);
    }

    #[test]
    fn test_window_one_is_noop() {
        let values = [3.0, -1.0, 7.0];
        assert_eq!(moving_average(&values, 1), values.to_vec());
        assert_eq!(moving_average(&values, 0), values.to_vec());
    }

    #[test]
    fn test_even_window_alignment() {
        // w = 4 时窗口为 t-2 ..= t+1
        let out = moving_average(&[0.0, 4.0, 8.0, 12.0, 16.0], 4);
        assert_eq!(out[0], 2.0); // [0, 4]
        assert_eq!(out[1], 4.0); // [0, 4, 8]
        assert_eq!(out[2], 6.0); // [0, 4, 8, 12]
        assert_eq!(out[4], 12.0); // [8, 12, 16]
    }

    #[test]
    fn test_window_wider_than_series() {
        let out = moving_average(&[2.0, 4.0], 11);
        assert_eq!(out, vec![3.0, 3.0]);
        assert!(moving_average(&[], 5).is_empty());
    }

    #[test]
    fn test_nan_only_affects_windows_containing_it() {
        let out = moving_average(&[1.0, f64::NAN, 1.0, 1.0, 1.0, 1.0], 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_eq!(&out[3..], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_infinite_values_stay_local() {
        let out = moving_average(&[f64::INFINITY, 1.0, 1.0, 1.0, 1.0], 3);
        assert_eq!(out[0], f64::INFINITY);
        assert_eq!(out[1], f64::INFINITY);
        assert_eq!(&out[2..], &[1.0, 1.0, 1.0]);

        let out = moving_average(&[1.0, 1.0, 1.0, f64::NEG_INFINITY], 3);
        assert_eq!(&out[..2], &[1.0, 1.0]);
        assert_eq!(out[2], f64::NEG_INFINITY);
        assert_eq!(out[3], f64::NEG_INFINITY);
    }

    #[test]
    fn test_large_early_value_does_not_swamp_later_windows() {
        let out = moving_average(&[1e17, 0.0, 0.0, 1.0, 1.0, 1.0], 3);
        assert_eq!(out[4], 1.0);
        assert_eq!(out[5], 1.0);
        assert_eq!(out[3], 2.0 / 3.0);
    }

    #[test]
    fn test_constant_series_is_unchanged() {
        let out = moving_average(&[5.0; 7], 5);
        assert!(out.iter().all(|v| (*v - 5.0).abs() < 1e-12));
    }

    #[test]
    fn test_smooth_datasets_only_touches_metric() {
        let run = RunInfo {
            path: PathBuf::from("logs/run_1"),
            exp_name: Some("ppo".to_string()),
            unit: 1,
        };
        let points: Vec<MetricPoint> = (1..=5)
            .map(|i| MetricPoint { step: i as f64, value: i as f64 })
            .collect();
        let mut datasets = vec![RunSeries::new(run, &points)];

        smooth_datasets(&mut datasets, 3);

        let series = &datasets[0];
        assert_eq!(series.len(), 5);
        assert_eq!(series.metric_values()[0], 1.5);
        let raw: Vec<f64> = series.rows.iter().map(|r| r.value).collect();
        assert_eq!(raw, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let steps: Vec<f64> = series.rows.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
