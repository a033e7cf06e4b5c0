//! # Tick Placement and Labels
//!
//! Resolves an axis' [`Ticks`] setting into `(position, label)` pairs for the
//! current view range. Automatic ticks use 1-2-5 steps; [`MultipleTicks`]
//! places ticks at fractions of a constant such as π.

use std::f64::consts::PI;

/// Upper bound on generated ticks per axis
const MAX_TICKS: usize = 1000;

/// Target tick count for automatic placement
const AUTO_TICKS: usize = 6;

const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

/// Tick setting of one axis
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Ticks {
    /// 1-2-5 spaced ticks with numeric labels
    #[default]
    Auto,
    /// Fixed positions with numeric labels
    Positions(Vec<f64>),
    /// Fixed positions with explicit labels
    Labeled(Vec<(f64, String)>),
    /// Multiples of a fraction of a constant
    Multiple(MultipleTicks),
}

impl Ticks {
    /// Ticks visible in `[lo, hi]`, sorted by position
    pub fn resolve(&self, lo: f64, hi: f64) -> Vec<(f64, String)> {
        let in_range = |x: f64| x >= lo && x <= hi;
        let mut ticks: Vec<(f64, String)> = match self {
            Ticks::Auto => nice_ticks(lo, hi, AUTO_TICKS)
                .into_iter()
                .map(|x| (x, format_tick(x)))
                .collect(),
            Ticks::Positions(positions) => positions
                .iter()
                .copied()
                .filter(|&x| in_range(x))
                .map(|x| (x, format_tick(x)))
                .collect(),
            Ticks::Labeled(labeled) => labeled
                .iter()
                .filter(|(x, _)| in_range(*x))
                .cloned()
                .collect(),
            Ticks::Multiple(multiple) => multiple
                .locate(lo, hi)
                .into_iter()
                .map(|x| (x, multiple.format(x)))
                .collect(),
        };
        ticks.sort_by(|a, b| a.0.total_cmp(&b.0));
        ticks
    }
}

/// Text markup of [`MultipleTicks`] labels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickMarkup {
    /// `π/2`, `-3π/4`
    Plain,
    /// `$\frac{\pi}{2}$`, `$-\frac{3\pi}{4}$`
    Latex,
}

/// Ticks at multiples of `number / denominator`, labelled as reduced
/// fractions of `symbol`.
///
/// ```
/// use toolbelt::plot::MultipleTicks;
///
/// let ticks = MultipleTicks::pi(2);
/// assert_eq!(ticks.format(std::f64::consts::FRAC_PI_2), "π/2");
/// assert_eq!(ticks.format(std::f64::consts::PI), "π");
/// assert_eq!(ticks.latex().format(-std::f64::consts::PI * 1.5), r"$-\frac{3\pi}{2}$");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleTicks {
    denominator: u32,
    number: f64,
    symbol: String,
    number_in_frac: bool,
    markup: TickMarkup,
}

impl MultipleTicks {
    /// Ticks every `number / denominator`; a zero denominator counts as 1
    pub fn new(denominator: u32, number: f64, symbol: impl Into<String>) -> Self {
        Self {
            denominator: denominator.max(1),
            number,
            symbol: symbol.into(),
            number_in_frac: true,
            markup: TickMarkup::Plain,
        }
    }

    /// Multiples of π / `denominator`
    pub fn pi(denominator: u32) -> Self {
        Self::new(denominator, PI, "π")
    }

    /// Switch to LaTeX markup; the π symbol becomes `\pi`
    pub fn latex(mut self) -> Self {
        if self.symbol == "π" {
            self.symbol = r"\pi".to_string();
        }
        self.markup = TickMarkup::Latex;
        self
    }

    /// Put the symbol after the fraction (`1/2π`) instead of inside it (`π/2`)
    pub fn symbol_outside_fraction(mut self) -> Self {
        self.number_in_frac = false;
        self
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn markup(&self) -> TickMarkup {
        self.markup
    }

    /// Distance between neighbouring ticks
    pub fn step(&self) -> f64 {
        self.number / f64::from(self.denominator)
    }

    /// Tick positions in `[lo, hi]`
    pub fn locate(&self, lo: f64, hi: f64) -> Vec<f64> {
        let step = self.step();
        if !(step.is_finite() && step > 0.0 && lo.is_finite() && hi.is_finite() && lo <= hi) {
            return Vec::new();
        }
        let first = (lo / step).ceil();
        let last = (hi / step).floor();
        // indices past 2^53 are no longer exact
        if last < first
            || last - first >= MAX_TICKS as f64
            || first.abs().max(last.abs()) > MAX_EXACT_INDEX
        {
            return Vec::new();
        }
        (first as i64..=last as i64).map(|k| k as f64 * step).collect()
    }

    /// Label of the tick nearest to `x`
    pub fn format(&self, x: f64) -> String {
        let den = i64::from(self.denominator);
        let num = (x * den as f64 / self.number).round() as i64;
        let divisor = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
        let (num, den) = (num / divisor, den / divisor);
        if den == 1 {
            self.format_scalar(num)
        } else {
            self.format_fraction(num, den)
        }
    }

    fn format_scalar(&self, scalar: i64) -> String {
        let body = match scalar {
            0 => "0".to_string(),
            1 => self.symbol.clone(),
            -1 => format!("-{}", self.symbol),
            n => format!("{}{}", n, self.symbol),
        };
        self.wrap(body)
    }

    fn format_fraction(&self, num: i64, den: i64) -> String {
        let sign = if num < 0 { "-" } else { "" };
        let magnitude = num.unsigned_abs();
        let body = if self.number_in_frac {
            let numerator = if magnitude == 1 {
                self.symbol.clone()
            } else {
                format!("{}{}", magnitude, self.symbol)
            };
            format!("{}{}", sign, self.fraction(&numerator, den))
        } else {
            format!("{}{}{}", sign, self.fraction(&magnitude.to_string(), den), self.symbol)
        };
        self.wrap(body)
    }

    fn fraction(&self, numerator: &str, den: i64) -> String {
        match self.markup {
            TickMarkup::Plain => format!("{}/{}", numerator, den),
            TickMarkup::Latex => format!(r"\frac{{{}}}{{{}}}", numerator, den),
        }
    }

    fn wrap(&self, body: String) -> String {
        match self.markup {
            TickMarkup::Plain => body,
            TickMarkup::Latex => format!("${}$", body),
        }
    }
}

impl Default for MultipleTicks {
    fn default() -> Self {
        Self::pi(1)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}

/// Roughly `target` ticks in `[lo, hi]` at 1, 2 or 5 times a power of ten
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return if lo.is_finite() && lo == hi { vec![lo] } else { Vec::new() };
    }
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .take(MAX_TICKS)
        .map(|k| {
            let x = k as f64 * step;
            if x == 0.0 {
                0.0
            } else {
                x
            }
        })
        .collect()
}

/// Compact numeric label: at most six decimals, no trailing zeros
pub fn format_tick(x: f64) -> String {
    let text = format!("{:.6}", x);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_plain_labels() {
        let ticks = MultipleTicks::pi(4);
        assert_eq!(ticks.format(0.0), "0");
        assert_eq!(ticks.format(PI / 4.0), "π/4");
        assert_eq!(ticks.format(FRAC_PI_2), "π/2");
        assert_eq!(ticks.format(3.0 * PI / 4.0), "3π/4");
        assert_eq!(ticks.format(PI), "π");
        assert_eq!(ticks.format(-PI), "-π");
        assert_eq!(ticks.format(2.0 * PI), "2π");
        assert_eq!(ticks.format(-1.5 * PI), "-3π/2");
    }

    #[test]
    fn test_latex_labels() {
        let ticks = MultipleTicks::pi(2).latex();
        assert_eq!(ticks.format(FRAC_PI_2), r"$\frac{\pi}{2}$");
        assert_eq!(ticks.format(-FRAC_PI_2), r"$-\frac{\pi}{2}$");
        assert_eq!(ticks.format(3.0 * FRAC_PI_2), r"$\frac{3\pi}{2}$");
        assert_eq!(ticks.format(PI), r"$\pi$");
        assert_eq!(ticks.format(0.0), "$0$");

        let outside = MultipleTicks::pi(2).latex().symbol_outside_fraction();
        assert_eq!(outside.format(-FRAC_PI_2), r"$-\frac{1}{2}\pi$");
    }

    #[test]
    fn test_locate() {
        let ticks = MultipleTicks::pi(2);
        let positions = ticks.locate(-0.1, PI + 0.1);
        assert_eq!(positions.len(), 3);
        assert_abs_diff_eq!(positions[1], FRAC_PI_2, epsilon = 1e-12);
        assert!(MultipleTicks::pi(1).locate(0.5, 1.0).is_empty());
        assert_eq!(MultipleTicks::pi(0).denominator(), 1);
    }

    #[test]
    fn test_locate_huge_ranges() {
        assert!(MultipleTicks::pi(2).locate(-1e300, 1e300).is_empty());
        assert!(MultipleTicks::pi(1).locate(1e300, 1e300 + 1e285).is_empty());
        assert!(Ticks::Multiple(MultipleTicks::pi(1)).resolve(-1e300, 1e300).is_empty());
        assert_eq!(MultipleTicks::pi(1).locate(-1000.0, 1000.0).len(), 637);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let ticks = nice_ticks(-0.93, 0.93, 6);
        assert!(ticks.iter().all(|&t| (-0.93..=0.93).contains(&t)));
        assert!(ticks.contains(&0.0));
        assert_eq!(nice_ticks(2.0, 2.0, 5), vec![2.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(-0.0000001), "0");
        assert_eq!(format_tick(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_resolve_filters_and_sorts() {
        let ticks = Ticks::Labeled(vec![(2.0, "b".into()), (0.5, "a".into()), (9.0, "out".into())]);
        let resolved = ticks.resolve(0.0, 3.0);
        assert_eq!(resolved, vec![(0.5, "a".to_string()), (2.0, "b".to_string())]);

        let resolved = Ticks::Multiple(MultipleTicks::pi(1)).resolve(-4.0, 4.0);
        let labels: Vec<&str> = resolved.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, ["-π", "0", "π"]);
    }
}
