//! Decomposed numeric strings and significant-digit bookkeeping.
//!
//! Every rendered number splits into (integer digits, fractional digits,
//! exponent); precision selection works on this decomposition rather than on
//! floats, so the digits that drive rounding are exactly the digits that end
//! up on the page.

/// A numeric string split into sign, integer digits, fractional digits, and
/// an exponent suffix. `compose` reproduces a numerically equal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumString {
    pub negative: bool,
    pub int_part: String,
    pub frac_part: String,
    pub exp_part: String,
}

impl NumString {
    pub fn parse(s: &str) -> Self {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, s),
        };
        let (body, exp_part) = match rest.split_once(['e', 'E']) {
            Some((b, e)) => (b, e.to_string()),
            None => (rest, String::new()),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (body.to_string(), String::new()),
        };
        Self {
            negative,
            int_part,
            frac_part,
            exp_part,
        }
    }

    pub fn compose(&self) -> String {
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        out.push_str(&self.int_part);
        if !self.frac_part.is_empty() {
            out.push('.');
            out.push_str(&self.frac_part);
        }
        if !self.exp_part.is_empty() {
            out.push('e');
            out.push_str(&self.exp_part);
        }
        out
    }

    /// Exponent suffix as an integer; 0 when absent.
    pub fn exponent(&self) -> i32 {
        if self.exp_part.is_empty() {
            0
        } else {
            self.exp_part.trim_start_matches('+').parse().unwrap_or(0)
        }
    }

    /// Place of the least significant digit, units place = 0.
    ///
    /// Trailing integer zeros do not count as significant, matching the
    /// shortest-form strings `fmt_sig` produces.
    pub fn min_sigdig(&self) -> i32 {
        let exp = self.exponent();
        if !self.frac_part.is_empty() {
            exp - self.frac_part.len() as i32
        } else {
            let trimmed = self.int_part.trim_end_matches('0');
            exp + trimmed.len() as i32 - 1
        }
    }

    /// Place of the most significant digit, units place = 0.
    pub fn max_sigdig(&self) -> i32 {
        if !self.exp_part.is_empty() {
            return self.exponent();
        }
        if self.int_part == "0" {
            let zeros = self.frac_part.chars().take_while(|c| *c == '0').count();
            -(zeros as i32) - 1
        } else {
            self.int_part.len() as i32 - 1
        }
    }
}

pub fn pow10(e: i32) -> f64 {
    10f64.powi(e)
}

/// Floor of log10(|v|), taken from the exponent of the shortest decimal
/// form. log10/powi round-trips misplace values near powers of ten (1e-5
/// lands in decade -6); the decimal rendering is correctly rounded, so its
/// exponent is exact. Zero and non-finite values sit in decade 0.
pub fn decade(v: f64) -> i32 {
    let a = v.abs();
    if a == 0.0 || !a.is_finite() {
        return 0;
    }
    NumString::parse(&format!("{a:e}")).exponent()
}

/// Exponent rendered for `\sn{}` markup: two-digit magnitude, no leading `+`.
pub fn padded_exp(d: i32) -> String {
    if d < 0 {
        format!("-{:02}", -d)
    } else {
        format!("{d:02}")
    }
}

fn padded_exp_signed(d: i32) -> String {
    if d < 0 {
        format!("-{:02}", -d)
    } else {
        format!("+{d:02}")
    }
}

/// Round `|v|` to `sig_figs` figures. The carry can bump the decade
/// (0.099 at one figure is 0.1), so callers re-derive the decade.
fn round_sig(a: f64, sig_figs: i32) -> f64 {
    let step = pow10(decade(a) - sig_figs + 1);
    (a / step).round() * step
}

/// Shortest-form rendering of `v` at `sig_figs` significant figures.
///
/// Follows printf `%g`: scientific notation when the rounded value's decade
/// is >= sig_figs or < -4, trailing fractional zeros stripped. The fraction
/// is then padded back out to sig_figs - 1 digits (also for scientific
/// mantissas, so 100 at two figures reads `1.0e+02`, not `1e+02`).
pub fn fmt_sig(v: f64, sig_figs: usize) -> String {
    let sig_figs = sig_figs.max(1);
    if v == 0.0 {
        return "0".to_string();
    }
    debug_assert!(v.is_finite());

    // Round in e-form first. The standard formatter keeps the mantissa
    // normalized through rounding carries (9.96 at one fractional digit is
    // 1.0e1, never 10.0e0) and never misplaces the exponent the way a
    // pow10 division can.
    let mut ns = NumString::parse(&format!("{:.*e}", sig_figs - 1, v.abs()));
    let exp = ns.exponent();
    if exp < -4 || exp >= sig_figs as i32 {
        ns.exp_part = padded_exp_signed(exp);
        ns.negative = v < 0.0;
        ns.compose()
    } else {
        fixed_sig(v, sig_figs)
    }
}

/// Fixed-point rendering of `v` at `sig_figs` significant figures, with the
/// same strip-and-pad fraction rule as `fmt_sig` but never switching to
/// scientific notation (1234 at two figures is `1200`).
pub fn fixed_sig(v: f64, sig_figs: usize) -> String {
    let sig_figs = sig_figs.max(1);
    if v == 0.0 {
        return "0".to_string();
    }
    let s = sig_figs as i32;
    let rounded = round_sig(v.abs(), s);
    let prec = (s - 1 - decade(rounded)).max(0) as usize;

    let mut ns = NumString::parse(&format!("{rounded:.prec$}"));
    ns.frac_part = ns.frac_part.trim_end_matches('0').to_string();
    if !ns.frac_part.is_empty() && ns.frac_part.len() < sig_figs - 1 {
        let pad = sig_figs - 1 - ns.frac_part.len();
        ns.frac_part.extend(std::iter::repeat_n('0', pad));
    }
    ns.negative = v < 0.0;
    ns.compose()
}
