//! Per-cell formatting.
//!
//! A format spec is a `;`-separated list of tokens applied to numeric cells:
//!
//! | Token  | Effect                                                  |
//! |--------|---------------------------------------------------------|
//! | `~`    | round to the nearest whole number                       |
//! | `dp:N` | fixed notation with N decimals                          |
//! | `sf:N` | scientific notation with N significant digits           |
//! | `pc`   | multiply by 100 and append `%` (ignored together with `sf`) |
//! | `p:V`  | render `p < V` when the value is below V                |
//!
//! Unknown tokens are logged and skipped; malformed arguments are skipped.

use log::{debug, warn};

use crate::data::CellValue;

/// A parsed format spec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatSpec {
    /// `dp:N`
    pub decimals: Option<usize>,
    /// `sf:N`
    pub significant: Option<usize>,
    /// `p:V`, with V kept as written for display
    pub p_threshold: Option<(f64, String)>,
    /// `~`
    pub round: bool,
    /// `pc`
    pub percent: bool,
}

impl FormatSpec {
    /// Parse a `;`-separated spec; never fails.
    pub fn parse(spec: &str) -> Self {
        let mut parsed = FormatSpec::default();

        for token in spec.split(';').filter(|t| !t.is_empty()) {
            match token {
                "~" => parsed.round = true,
                "pc" => parsed.percent = true,
                "log10" => warn!("format option 'log10' is not supported, ignoring it"),
                _ => match token.split_once(':') {
                    Some(("dp", arg)) => parsed.decimals = parse_arg(token, arg),
                    Some(("sf", arg)) => parsed.significant = parse_arg(token, arg),
                    Some(("p", arg)) => {
                        parsed.p_threshold = parse_arg::<f64>(token, arg)
                            .map(|threshold| (threshold, arg.to_string()))
                    }
                    Some((key, _)) => warn!("unknown formatting option '{}'", key),
                    None => warn!("unknown formatting option '{}'", token),
                },
            }
        }

        parsed
    }

    /// Render a number according to this spec.
    pub fn apply(&self, value: f64) -> String {
        let significant = self.significant.filter(|&n| n > 0);
        let percent = self.percent && significant.is_none();
        let value = if percent { value * 100.0 } else { value };

        if let Some((threshold, written)) = &self.p_threshold {
            if value < *threshold {
                return format!("p < {}", written);
            }
        }

        let mut out = if let Some(digits) = significant {
            scientific(value, digits)
        } else if let Some(decimals) = self.decimals.filter(|&n| n > 0) {
            format!("{:.*}", decimals, value)
        } else if self.round {
            value.round().to_string()
        } else {
            value.to_string()
        };

        if percent {
            out.push('%');
        }
        out
    }
}

fn parse_arg<T: std::str::FromStr>(token: &str, arg: &str) -> Option<T> {
    match arg.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("ignoring malformed format option '{}'", token);
            None
        }
    }
}

/// C-style scientific notation: `d.ddde+XX` with `digits` significant digits.
fn scientific(value: f64, digits: usize) -> String {
    let rendered = format!("{:.*e}", digits - 1, value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, magnitude) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, magnitude)
        }
        None => rendered,
    }
}

/// Render a cell for display, applying `format` to numeric cells.
pub fn format_cell(cell: &CellValue, format: Option<&str>) -> String {
    match cell {
        CellValue::Null | CellValue::Composite(_) => String::new(),
        CellValue::Str(s) => s.clone(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Int(_) | CellValue::Real(_) => match (format, cell.as_f64()) {
            (Some(spec), Some(value)) if !spec.is_empty() => FormatSpec::parse(spec).apply(value),
            _ => cell.to_string(),
        },
    }
}
