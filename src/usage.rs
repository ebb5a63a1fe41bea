//! Data usage ratios and the geometry of the circular usage gauge.

use std::f64::consts::PI;

use maud::{Markup, html};

/// The radius of the gauge circle in SVG user units.
pub const GAUGE_RADIUS: f64 = 45.0;

/// How much of the current quota has been used, in gigabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSnapshot {
    /// Gigabytes used so far.
    pub used: f64,
    /// The size of the quota in gigabytes.
    pub total: f64,
}

impl UsageSnapshot {
    /// Create a snapshot of `used` out of `total` gigabytes.
    pub fn new(used: f64, total: f64) -> Self {
        Self { used, total }
    }

    /// The fraction of the quota used, see [usage_ratio].
    pub fn ratio(&self) -> f64 {
        usage_ratio(self.used, self.total)
    }

    /// Gigabytes left in the quota, never negative.
    pub fn remaining(&self) -> f64 {
        (self.total - self.used).max(0.0)
    }

    /// The whole-number percentage shown in the middle of the gauge.
    pub fn percent(&self) -> u8 {
        // ratio is within [0, 1] so this fits in a u8
        (self.ratio() * 100.0).round() as u8
    }
}

/// The fraction of `total` that `used` represents, clamped to `[0, 1]`.
///
/// Returns 0 when `total` is not positive or either value is not a number.
pub fn usage_ratio(used: f64, total: f64) -> f64 {
    if total.is_nan() || total <= 0.0 {
        return 0.0;
    }

    let ratio = used / total;

    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// The stroke dash parameters that draw a ring filled to a given ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    /// The ring radius.
    pub radius: f64,
    /// The length of the full ring, used as the stroke dash array.
    pub circumference: f64,
    /// The unfilled length, used as the stroke dash offset.
    pub offset: f64,
}

impl GaugeGeometry {
    /// The geometry of a ring of `radius` filled to `ratio`, which is clamped to `[0, 1]`.
    pub fn new(ratio: f64, radius: f64) -> Self {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let circumference = 2.0 * PI * radius;

        Self {
            radius,
            circumference,
            offset: circumference * (1.0 - ratio),
        }
    }

    /// The geometry of the dashboard gauge for `snapshot`.
    pub fn for_snapshot(snapshot: &UsageSnapshot) -> Self {
        Self::new(snapshot.ratio(), GAUGE_RADIUS)
    }
}

/// Format a quantity of gigabytes, dropping the decimal for whole numbers.
pub fn format_gigabytes(gigabytes: f64) -> String {
    if gigabytes.fract() == 0.0 {
        format!("{gigabytes:.0}GB")
    } else {
        format!("{gigabytes:.1}GB")
    }
}

/// The circular usage gauge shown on the dashboard.
pub fn usage_gauge(snapshot: &UsageSnapshot) -> Markup {
    let geometry = GaugeGeometry::for_snapshot(snapshot);
    let size = 2.0 * (geometry.radius + 5.0);
    let centre = size / 2.0;

    html! {
        div id="usage-gauge" class="relative w-48 h-48 mx-auto"
        {
            svg
                class="w-full h-full -rotate-90"
                viewBox=(format!("0 0 {size} {size}"))
                role="img"
                aria-label=(format!("{}% of data used", snapshot.percent()))
            {
                circle
                    cx=(centre)
                    cy=(centre)
                    r=(geometry.radius)
                    fill="none"
                    stroke-width="8"
                    class="stroke-gray-200 dark:stroke-gray-700"
                {}

                circle
                    data-gauge="progress"
                    cx=(centre)
                    cy=(centre)
                    r=(geometry.radius)
                    fill="none"
                    stroke-width="8"
                    stroke-linecap="round"
                    stroke-dasharray=(format!("{:.2}", geometry.circumference))
                    stroke-dashoffset=(format!("{:.2}", geometry.offset))
                    class="stroke-blue-600 dark:stroke-blue-500"
                {}
            }

            div class="absolute inset-0 flex flex-col items-center justify-center"
            {
                span class="text-3xl font-bold" { (format_gigabytes(snapshot.used)) }
                span class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "/ " (format_gigabytes(snapshot.total))
                }
            }
        }
    }
}
