//! Precision selection from an asymmetric error pair.

use crate::error::{StError, StResult};
use crate::numstr::{NumString, fmt_sig};

/// Decimal place of the least significant digit to keep, derived from an
/// error pair at `sig_figs` significant figures (units place = 0, negative =
/// fractional digits).
///
/// Each error is rendered at `sig_figs` figures and the lower of the two
/// least-digit places wins. When the error decades are far apart the larger
/// error contributes nothing below its own leading digits, so the coarser
/// error sets the precision; when they are close the finer error extends the
/// kept digits to `sig_figs` figures below the pair's leading decade.
pub fn least_sig_place(err_neg: f64, err_pos: f64, sig_figs: usize) -> StResult<i32> {
    ensure_non_negative(err_neg, err_pos)?;
    let place_neg = NumString::parse(&fmt_sig(err_neg, sig_figs)).min_sigdig();
    let place_pos = NumString::parse(&fmt_sig(err_pos, sig_figs)).min_sigdig();
    Ok(place_neg.min(place_pos))
}

/// Error magnitudes must be >= 0; zero is permitted.
pub(crate) fn ensure_non_negative(err_neg: f64, err_pos: f64) -> StResult<()> {
    if err_neg < 0.0 {
        return Err(StError::NegativeError {
            which: "negative",
            value: err_neg,
        });
    }
    if err_pos < 0.0 {
        return Err(StError::NegativeError {
            which: "positive",
            value: err_pos,
        });
    }
    Ok(())
}
