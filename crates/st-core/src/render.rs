//! Notation selection and TeX markup rendering.
//!
//! The pipeline is classify -> select precision -> select notation -> render.
//! Scientific output uses the `\sn{..}` macro (shorthand for `\times 10^{..}`
//! in the table preamble); missing entries use `\nodata`.

use crate::error::{StError, StResult};
use crate::format::{FormatSpec, NumberFormat};
use crate::measurement::{Cell, CellClass, Measurement, classify, text_is_null};
use crate::numstr::{decade, fixed_sig, fmt_sig, padded_exp, pow10};
use crate::precision::{ensure_non_negative, least_sig_place};

/// Marker emitted for missing entries.
pub const NO_DATA: &str = "\\nodata";

/// A rendered cell plus the notation decisions behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNumber {
    pub text: String,
    pub scientific: bool,
    /// Shared power-of-ten exponent when scientific notation was used.
    pub exponent: Option<i32>,
}

impl RenderedNumber {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scientific: false,
            exponent: None,
        }
    }

    fn sci(text: String, exponent: i32) -> Self {
        Self {
            text,
            scientific: true,
            exponent: Some(exponent),
        }
    }
}

/// Render one cell to its table markup. Text cells pass through unchanged
/// unless they are the missing-value token.
pub fn format_cell(cell: &Cell, spec: &FormatSpec) -> StResult<String> {
    match cell {
        Cell::Text(s) => Ok(if text_is_null(s) {
            NO_DATA.to_string()
        } else {
            s.clone()
        }),
        Cell::Numeric(m) => Ok(format_measurement(m, spec)?.text),
    }
}

/// Render a measurement, reporting the notation chosen.
pub fn format_measurement(m: &Measurement, spec: &FormatSpec) -> StResult<RenderedNumber> {
    match classify(m)? {
        CellClass::NoData => Ok(RenderedNumber::plain(NO_DATA)),
        CellClass::LowerLimit(bound) => Ok(RenderedNumber::plain(format!(
            "$> {}$",
            fmt_sig(bound, spec.sig_figs_err)
        ))),
        CellClass::UpperLimit(bound) => Ok(RenderedNumber::plain(format!(
            "$< {}$",
            fmt_sig(bound, spec.sig_figs_err)
        ))),
        CellClass::Normal {
            value,
            errors: Some((err_neg, err_pos)),
        } => {
            if spec.force_format {
                render_forced(value, err_neg, err_pos, spec)
            } else {
                render_auto(value, err_neg, err_pos, spec.sig_figs_err)
            }
        }
        CellClass::Normal {
            value,
            errors: None,
        } => render_bare(value, spec),
    }
}

/// Error-driven path: the error pair sets the precision, then fixed-point
/// and scientific renderings compete on length.
fn render_auto(
    value: f64,
    err_neg: f64,
    err_pos: f64,
    sig_figs_err: usize,
) -> StResult<RenderedNumber> {
    let place = least_sig_place(err_neg, err_pos, sig_figs_err)?;
    let d = decade(value);
    let sig_figs = (d - place + 1).max(1) as usize;
    let exp_str = padded_exp(d);

    let prec = (-place).max(0) as usize;
    let fixed = format!("{value:.prec$}");

    // Length heuristic: scientific costs about sig_figs digits plus markup
    // overhead plus half the exponent string. Fixed wins only when strictly
    // shorter; ties go to scientific. Kept verbatim since off-by-one changes
    // flip the output near decades 3 and -2.
    let sci_cost = sig_figs as f64 + 4.0 + 0.5 * exp_str.len() as f64;
    if (fixed.len() as f64) < sci_cost {
        let en = format!("{err_neg:.prec$}");
        let ep = format!("{err_pos:.prec$}");
        Ok(RenderedNumber::plain(pair_markup(&fixed, &en, &ep, None)))
    } else {
        let scale = pow10(-d);
        let mprec = sig_figs - 1;
        let v = format!("{:.mprec$}", value * scale);
        let en = format!("{:.mprec$}", err_neg * scale);
        let ep = format!("{:.mprec$}", err_pos * scale);
        Ok(RenderedNumber::sci(
            pair_markup(&v, &en, &ep, Some(&exp_str)),
            d,
        ))
    }
}

/// Forced-format path: the column format sets the precision for the value
/// and both errors alike.
fn render_forced(
    value: f64,
    err_neg: f64,
    err_pos: f64,
    spec: &FormatSpec,
) -> StResult<RenderedNumber> {
    ensure_non_negative(err_neg, err_pos)?;
    let format = spec.format.ok_or(StError::MissingFormat)?;
    match format {
        NumberFormat::Fixed { precision } => {
            let v = format!("{value:.precision$}");
            let en = format!("{err_neg:.precision$}");
            let ep = format!("{err_pos:.precision$}");
            Ok(RenderedNumber::plain(pair_markup(&v, &en, &ep, None)))
        }
        NumberFormat::Scientific { precision } => {
            // The value's decade is factored out of value and errors alike,
            // and each error is formatted at the mantissa precision.
            let d = decade(value);
            let scale = pow10(-d);
            let v = format!("{:.precision$}", value * scale);
            let en = format!("{:.precision$}", err_neg * scale);
            let ep = format!("{:.precision$}", err_pos * scale);
            Ok(RenderedNumber::sci(
                pair_markup(&v, &en, &ep, Some(&padded_exp(d))),
                d,
            ))
        }
        NumberFormat::General { .. } => Err(StError::UnsupportedFormat {
            fmt: format.to_string(),
        }),
    }
}

/// No-error path: the explicit column format dictates everything.
fn render_bare(value: f64, spec: &FormatSpec) -> StResult<RenderedNumber> {
    let format = spec.format.ok_or(StError::MissingFormat)?;
    match format {
        NumberFormat::Fixed { precision } => {
            Ok(RenderedNumber::plain(format!("{value:.precision$}")))
        }
        NumberFormat::Scientific { precision } => {
            let d = decade(value);
            let mantissa = format!("{:.precision$}", value * pow10(-d));
            Ok(RenderedNumber::sci(
                format!("${mantissa}\\sn{{{}}}$", padded_exp(d)),
                d,
            ))
        }
        NumberFormat::General { sig_figs } => {
            let d = decade(value);
            if d > 3 || d < -2 {
                let prec = sig_figs.max(1) - 1;
                let mantissa = format!("{:.prec$}", value * pow10(-d));
                Ok(RenderedNumber::sci(format!("${mantissa}\\sn{{{d}}}$"), d))
            } else {
                Ok(RenderedNumber::plain(fixed_sig(value, sig_figs)))
            }
        }
    }
}

/// Markup for a value with its error pair. Equal rendered errors collapse to
/// the `\pm` form; a shared exponent wraps the symmetric form in parentheses.
fn pair_markup(v: &str, en: &str, ep: &str, exp: Option<&str>) -> String {
    match (en == ep, exp) {
        (true, None) => format!("$ {v} \\pm {en} $"),
        (true, Some(e)) => format!("$({v} \\pm {en})\\sn{{{e}}}$"),
        (false, None) => format!("${v}_{{-{en}}}^{{+{ep}}}$"),
        (false, Some(e)) => format!("${v}_{{-{en}}}^{{+{ep}}}\\sn{{{e}}}$"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with(fmt: &str) -> FormatSpec {
        FormatSpec::with_format(fmt.parse().unwrap())
    }

    #[test]
    fn asymmetric_errors_use_sub_superscript() {
        let m = Measurement::asymmetric(12.345, 0.6, 0.4);
        let r = format_measurement(&m, &FormatSpec::default()).unwrap();
        assert_eq!(r.text, "$12.3_{-0.6}^{+0.4}$");
        assert!(!r.scientific);
        assert_eq!(r.exponent, None);
    }

    #[test]
    fn symmetric_errors_collapse_to_pm() {
        let m = Measurement::symmetric(12.345, 0.5);
        let r = format_measurement(&m, &FormatSpec::default()).unwrap();
        assert_eq!(r.text, "$ 12.3 \\pm 0.5 $");
    }

    #[test]
    fn errors_symmetric_only_after_rounding_still_collapse() {
        // 0.504 and 0.496 both render as 0.5 at the selected precision.
        let m = Measurement::asymmetric(7.02, 0.504, 0.496);
        let r = format_measurement(&m, &FormatSpec::default()).unwrap();
        assert_eq!(r.text, "$ 7.0 \\pm 0.5 $");
    }

    #[test]
    fn long_fixed_strings_switch_to_scientific() {
        let m = Measurement::symmetric(1.2345e8, 1.0e6);
        let r = format_measurement(&m, &FormatSpec::default()).unwrap();
        assert!(r.scientific);
        assert_eq!(r.exponent, Some(8));
        assert_eq!(r.text, "$(1.234 \\pm 0.010)\\sn{08}$");
    }

    #[test]
    fn nodata_renders_marker() {
        let r = format_measurement(&Measurement::nodata(), &FormatSpec::default()).unwrap();
        assert_eq!(r.text, NO_DATA);
    }

    #[test]
    fn limits_render_bounds_at_error_figures() {
        let lo = format_measurement(&Measurement::lower_limit(100.0), &FormatSpec::default())
            .unwrap();
        assert_eq!(lo.text, "$> 1.0e+02$");
        let hi =
            format_measurement(&Measurement::upper_limit(0.37), &FormatSpec::default()).unwrap();
        assert_eq!(hi.text, "$< 0.37$");
        let tiny =
            format_measurement(&Measurement::upper_limit(0.00001), &FormatSpec::default())
                .unwrap();
        assert_eq!(tiny.text, "$< 1.0e-05$");
    }

    #[test]
    fn bare_value_without_format_is_an_error() {
        let m = Measurement::exact(1.23);
        assert!(matches!(
            format_measurement(&m, &FormatSpec::default()),
            Err(StError::MissingFormat)
        ));
    }

    #[test]
    fn bare_value_fixed_format() {
        let m = Measurement::exact(3.14159);
        let r = format_measurement(&m, &spec_with(".2f")).unwrap();
        assert_eq!(r.text, "3.14");
    }

    #[test]
    fn bare_value_scientific_format_strips_plus() {
        let m = Measurement::exact(12345.0);
        let r = format_measurement(&m, &spec_with(".2e")).unwrap();
        assert_eq!(r.text, "$1.23\\sn{04}$");
        assert_eq!(r.exponent, Some(4));
    }

    #[test]
    fn general_format_small_decade_goes_scientific() {
        let m = Measurement::exact(0.00123);
        let r = format_measurement(&m, &spec_with(".3g")).unwrap();
        assert_eq!(r.text, "$1.23\\sn{-3}$");
        assert!(r.scientific);
        assert_eq!(r.exponent, Some(-3));
    }

    #[test]
    fn general_format_mid_decade_stays_fixed() {
        let m = Measurement::exact(12.345);
        let r = format_measurement(&m, &spec_with(".3g")).unwrap();
        assert_eq!(r.text, "12.30");
        assert!(!r.scientific);
    }

    #[test]
    fn general_format_large_decade_goes_scientific() {
        let m = Measurement::exact(123456.0);
        let r = format_measurement(&m, &spec_with(".3g")).unwrap();
        assert_eq!(r.text, "$1.23\\sn{5}$");
    }

    #[test]
    fn forced_fixed_applies_one_precision_to_all_three() {
        let mut spec = spec_with(".2f");
        spec.force_format = true;
        let m = Measurement::asymmetric(12.3456, 0.6, 0.4);
        let r = format_measurement(&m, &spec).unwrap();
        assert_eq!(r.text, "$12.35_{-0.60}^{+0.40}$");
    }

    #[test]
    fn forced_scientific_scales_errors_into_the_mantissa() {
        let mut spec = spec_with(".2e");
        spec.force_format = true;
        let m = Measurement::asymmetric(12345.0, 120.0, 340.0);
        let r = format_measurement(&m, &spec).unwrap();
        assert_eq!(r.text, "$1.23_{-0.01}^{+0.03}\\sn{04}$");
        assert_eq!(r.exponent, Some(4));
    }

    #[test]
    fn forced_general_is_unsupported() {
        let mut spec = spec_with(".3g");
        spec.force_format = true;
        let m = Measurement::asymmetric(1.0, 0.1, 0.2);
        assert!(matches!(
            format_measurement(&m, &spec),
            Err(StError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn text_cells_pass_through() {
        let spec = FormatSpec::default();
        assert_eq!(
            format_cell(&Cell::text("HD 97658"), &spec).unwrap(),
            "HD 97658"
        );
        assert_eq!(format_cell(&Cell::text("none"), &spec).unwrap(), NO_DATA);
        assert_eq!(format_cell(&Cell::text(""), &spec).unwrap(), NO_DATA);
    }

    #[test]
    fn rerendering_displayed_digits_is_stable() {
        let m = Measurement::asymmetric(12.345, 0.6, 0.4);
        let spec = FormatSpec::default();
        let first = format_measurement(&m, &spec).unwrap().text;
        // Re-parse the displayed digits and render again.
        let again = Measurement::asymmetric(12.3, 0.6, 0.4);
        let second = format_measurement(&again, &spec).unwrap().text;
        assert_eq!(first, second);
    }
}
