use super::{LsInfo, LsSettings};
use crate::algebra::*;
use std::io::Write;
use std::time::Duration;

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

pub(crate) fn print_banner(out: &mut dyn Write, is_verbose: bool) -> std::io::Result<()> {
    if !is_verbose {
        return Ok(());
    }

    writeln!(out, "-------------------------------------------------------------")?;
    writeln!(
        out,
        "         eqkkt v{}  -  direct KKT least squares          \n",
        crate::VERSION
    )?;
    writeln!(out, "-------------------------------------------------------------")?;
    Ok(())
}

impl<T> LsInfo<T>
where
    T: FloatT,
{
    pub(crate) fn print_configuration(
        &self,
        out: &mut dyn Write,
        settings: &LsSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", self.n)?;
        writeln!(out, "  constraints   = {}", self.m)?;
        writeln!(out, "  nnz(P)        = {}", self.nnzP)?;
        writeln!(out, "  nnz(A)        = {}", self.nnzA)?;
        writeln!(out, "  nnz(KKT)      = {}", self.nnzKKT)?;
        writeln!(out,)?;

        print_settings(out, settings)?;

        Ok(())
    }

    pub(crate) fn print_footer(
        &self,
        out: &mut dyn Write,
        settings: &LsSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        writeln!(out, "-------------------------------------------------------------")?;

        match self.status {
            Some(status) => writeln!(out, "Terminated with status = {}", status)?,
            None => writeln!(out, "Terminated with status = unsolved")?,
        }
        if let Some(objective) = self.objective {
            writeln!(out, "objective      = {}", expformat!("{:+.8e}", objective))?;
        }

        match (self.status, self.failure) {
            (_, Some(failure)) => {
                writeln!(out, "KKT solve failed: {}", failure)?;
            }
            (Some(_), None) => {
                writeln!(out, "refinement     = {} steps", self.refine_iters)?;
                writeln!(out, "residual       = {}", expformat!("{:.2e}", self.residual))?;
            }
            (None, None) => {}
        }

        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        self.timers.print(out)?;
        out.flush()?;

        Ok(())
    }
}

fn print_settings<T: FloatT>(out: &mut dyn Write, set: &LsSettings<T>) -> std::io::Result<()> {
    writeln!(out, "settings:")?;

    writeln!(
        out,
        "  linear algebra: direct / {}, precision: {} bit",
        set.direct_solve_method,
        _get_precision_string::<T>()
    )?;

    writeln!(
        out,
        "  iter refine: {}, reltol = {:.1e}, abstol = {:.1e},",
        _bool_on_off(set.iterative_refinement_enable),
        set.iterative_refinement_reltol,
        set.iterative_refinement_abstol
    )?;

    writeln!(
        out,
        "               max iter = {}, stop ratio = {:.1}",
        set.iterative_refinement_max_iter, set.iterative_refinement_stop_ratio
    )?;

    writeln!(
        out,
        "  kkt accept : reltol = {:.1e}, abstol = {:.1e}, dropzeros = {}",
        set.kkt_residual_reltol,
        set.kkt_residual_abstol,
        _bool_on_off(set.input_sparse_dropzeros)
    )?;

    writeln!(out,)?;

    Ok(())
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.
fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars = match (has_sign, has_short_exp) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat("1.00e-5".to_string()), "1.00e-05");
    assert_eq!(_exp_str_reformat("1.00e5".to_string()), "1.00e+05");
    assert_eq!(_exp_str_reformat("1.00e-15".to_string()), "1.00e-15");
    assert_eq!(_exp_str_reformat("1.00e15".to_string()), "1.00e+15");
}
