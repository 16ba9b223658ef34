//! Configurable text output for rational numbers and matrices.

use std::fmt::{self, Write};

use rug::Integer;

use crate::{domains::rational::RationalNumber, tensors::matrix::RationalMatrix};

/// The overall print mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum PrintMode {
    /// The bracketed diagnostic format.
    #[default]
    Plain,
    Latex,
    Mathematica,
}

impl PrintMode {
    pub fn is_plain(&self) -> bool {
        *self == PrintMode::Plain
    }

    pub fn is_latex(&self) -> bool {
        *self == PrintMode::Latex
    }

    pub fn is_mathematica(&self) -> bool {
        *self == PrintMode::Mathematica
    }
}

/// Various options for printing rational numbers and matrices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub mode: PrintMode,
    /// Group the digits of numerators and denominators in blocks of three.
    pub number_thousands_separator: Option<char>,
}

impl PrintOptions {
    pub const fn new() -> Self {
        Self {
            mode: PrintMode::Plain,
            number_thousands_separator: None,
        }
    }

    /// Print the output in a Mathematica-readable format.
    pub const fn mathematica() -> PrintOptions {
        Self {
            mode: PrintMode::Mathematica,
            ..Self::new()
        }
    }

    /// Print the output in a Latex input format.
    pub const fn latex() -> PrintOptions {
        Self {
            mode: PrintMode::Latex,
            ..Self::new()
        }
    }

    pub const fn with_thousands_separator(mut self, separator: char) -> Self {
        self.number_thousands_separator = Some(separator);
        self
    }

    /// Derive the options from formatter flags: `{:#}` selects the Mathematica format.
    pub fn from_fmt(f: &fmt::Formatter) -> PrintOptions {
        if f.alternate() {
            PrintOptions::mathematica()
        } else {
            PrintOptions::new()
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn format_integer<W: Write>(n: &Integer, opts: &PrintOptions, f: &mut W) -> fmt::Result {
    let Some(separator) = opts.number_thousands_separator else {
        return write!(f, "{}", n);
    };

    let digits = n.to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", digits.as_str()),
    };

    f.write_str(sign)?;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            f.write_char(separator)?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

pub(crate) fn format_rational<W: Write>(
    r: &RationalNumber,
    opts: &PrintOptions,
    f: &mut W,
) -> fmt::Result {
    if r.is_nan() {
        return match opts.mode {
            PrintMode::Plain => f.write_str("NaN"),
            PrintMode::Latex => f.write_str("\\mathrm{NaN}"),
            PrintMode::Mathematica => f.write_str("Indeterminate"),
        };
    }

    if r.is_zero() {
        return f.write_char('0');
    }

    if r.is_integer() {
        return format_integer(r.numerator_ref(), opts, f);
    }

    if opts.mode.is_latex() {
        if r.is_negative() {
            f.write_char('-')?;
        }
        f.write_str("\\frac{")?;
        format_integer(&Integer::from(r.numerator_ref().abs_ref()), opts, f)?;
        f.write_str("}{")?;
        format_integer(r.denominator_ref(), opts, f)?;
        f.write_char('}')
    } else {
        format_integer(r.numerator_ref(), opts, f)?;
        f.write_char('/')?;
        format_integer(r.denominator_ref(), opts, f)
    }
}

/// A printer for rational numbers.
pub struct RationalPrinter<'a> {
    pub rational: &'a RationalNumber,
    pub opts: PrintOptions,
}

impl<'a> RationalPrinter<'a> {
    pub fn new(rational: &'a RationalNumber) -> RationalPrinter<'a> {
        RationalPrinter {
            rational,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(rational: &'a RationalNumber, opts: PrintOptions) -> RationalPrinter<'a> {
        RationalPrinter { rational, opts }
    }
}

impl fmt::Display for RationalPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_rational(self.rational, &self.opts, f)
    }
}

/// A printer for matrices. The plain format writes one row per line:
///
/// ```text
/// [
///  [ 1 , 2 ],
///  [ 3 , 4 ]
/// ]
/// ```
pub struct MatrixPrinter<'a> {
    pub matrix: &'a RationalMatrix,
    pub opts: PrintOptions,
}

impl<'a> MatrixPrinter<'a> {
    pub fn new(matrix: &'a RationalMatrix) -> MatrixPrinter<'a> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(matrix: &'a RationalMatrix, opts: PrintOptions) -> MatrixPrinter<'a> {
        MatrixPrinter { matrix, opts }
    }
}

impl fmt::Display for MatrixPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opts = &self.opts;
        let d = self.matrix.dimension() as usize;

        match opts.mode {
            PrintMode::Plain => {
                f.write_str("[\n")?;
                for (r, row) in self.matrix.row_iter().enumerate() {
                    f.write_str(" [ ")?;
                    for (c, e) in row.iter().enumerate() {
                        if c > 0 {
                            f.write_str(" , ")?;
                        }
                        format_rational(e, opts, f)?;
                    }
                    if r + 1 < d {
                        f.write_str(" ],\n")?;
                    } else {
                        f.write_str(" ]\n")?;
                    }
                }
                f.write_str("]\n")
            }
            PrintMode::Mathematica => {
                f.write_char('{')?;
                for (r, row) in self.matrix.row_iter().enumerate() {
                    if r > 0 {
                        f.write_char(',')?;
                    }
                    f.write_char('{')?;
                    for (c, e) in row.iter().enumerate() {
                        if c > 0 {
                            f.write_char(',')?;
                        }
                        format_rational(e, opts, f)?;
                    }
                    f.write_char('}')?;
                }
                f.write_char('}')
            }
            PrintMode::Latex => {
                f.write_str("\\begin{pmatrix}")?;
                for (r, row) in self.matrix.row_iter().enumerate() {
                    if r > 0 {
                        f.write_str(" \\\\ ")?;
                    }
                    for (c, e) in row.iter().enumerate() {
                        if c > 0 {
                            f.write_str(" & ")?;
                        }
                        format_rational(e, opts, f)?;
                    }
                }
                f.write_str("\\end{pmatrix}")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{MatrixPrinter, PrintOptions};
    use crate::{domains::rational::RationalNumber, tensors::matrix::RationalMatrix};

    #[test]
    fn rational_modes() {
        let r: RationalNumber = (-3, 4).into();
        assert_eq!(r.printer(PrintOptions::new()).to_string(), "-3/4");
        assert_eq!(r.printer(PrintOptions::latex()).to_string(), "-\\frac{3}{4}");
        assert_eq!(r.printer(PrintOptions::mathematica()).to_string(), "-3/4");

        let n = RationalNumber::nan();
        assert_eq!(n.printer(PrintOptions::mathematica()).to_string(), "Indeterminate");
    }

    #[test]
    fn thousands_separator() {
        let r: RationalNumber = (-1234567, 1000).into();
        let opts = PrintOptions::new().with_thousands_separator('_');
        assert_eq!(r.printer(opts).to_string(), "-1_234_567/1_000");

        let r: RationalNumber = 123.into();
        assert_eq!(r.printer(opts).to_string(), "123");
    }

    #[test]
    fn matrix_modes() {
        let m = RationalMatrix::from_grid(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(m.to_string(), "[\n [ 1 , 2 ],\n [ 3 , 4 ]\n]\n");
        assert_eq!(format!("{:#}", m), "{{1,2},{3,4}}");
        assert_eq!(
            MatrixPrinter::new_with_options(&m, PrintOptions::latex()).to_string(),
            "\\begin{pmatrix}1 & 2 \\\\ 3 & 4\\end{pmatrix}"
        );

        assert_eq!(RationalMatrix::new(0).to_string(), "[\n]\n");
    }
}
