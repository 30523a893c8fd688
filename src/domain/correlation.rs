/// Variance below this is treated as degenerate (constant series).
const VARIANCE_EPSILON: f64 = 1e-12;

/// Pearson correlation coefficient between two series.
///
/// Uses sample covariance/variance (n-1). Fewer than 2 points or a
/// zero-variance side yields 0.0 rather than NaN.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }

    let x = &xs[..n];
    let y = &ys[..n];

    let n_f = n as f64;
    let mean_x: f64 = x.iter().sum::<f64>() / n_f;
    let mean_y: f64 = y.iter().sum::<f64>() / n_f;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let n_minus_1 = (n - 1) as f64;
    cov /= n_minus_1;
    var_x /= n_minus_1;
    var_y /= n_minus_1;

    if var_x <= VARIANCE_EPSILON || var_y <= VARIANCE_EPSILON {
        return 0.0;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}
