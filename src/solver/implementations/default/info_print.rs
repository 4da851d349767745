use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::linsolvers::LinearSolverStats;
use std::io::Write;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for LinIpmInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

const RULE: &str =
    "------------------------------------------------------------------------------------------";

impl<T> LinIpmInfo<T>
where
    T: FloatT,
{
    pub(crate) fn print_banner(&mut self, settings: &LinIpmSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }
        let out = &mut self.stream;

        writeln!(out, "{}", RULE)?;
        writeln!(
            out,
            "      linipm v{}  -  primal-dual interior point LP solver",
            crate::VERSION
        )?;
        writeln!(out, "{}", RULE)?;
        std::io::Result::Ok(())
    }

    pub(crate) fn print_configuration(
        &mut self,
        settings: &LinIpmSettings<T>,
        data: &LinIpmProblemData<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let linsolver = self.linsolver;
        let out = &mut self.stream;

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", data.nx)?;
        writeln!(out, "  constraints   = {}", data.nl)?;
        writeln!(out, "  nnz(A)        = {}", data.A.nnz())?;
        writeln!(out,)?;

        writeln!(out, "settings:")?;
        writeln!(
            out,
            "  linear algebra: direct / {}, precision: {} bit",
            linsolver,
            _get_precision_string::<T>()
        )?;
        writeln!(
            out,
            "  max iter = {}, max step = {:.3}, pivot tol = {:.1e}",
            settings.max_iter, settings.max_step_fraction, settings.lu_pivot_tolerance
        )?;
        writeln!(
            out,
            "  tol = {:.1e}, feasibility check: {}, tol_feas = {:.1e}",
            settings.tol,
            _bool_on_off(settings.check_feasibility),
            settings.tol_feas
        )?;
        writeln!(out,)?;

        std::io::Result::Ok(())
    }

    pub(crate) fn print_status_header(
        &mut self,
        settings: &LinIpmSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        //print a subheader for the iterations info
        write!(out, "iter    ")?;
        write!(out, "pcost        ")?;
        write!(out, "dcost       ")?;
        write!(out, "gap       ")?;
        write!(out, "pres      ")?;
        write!(out, "dres      ")?;
        write!(out, " μ        ")?;
        write!(out, "σ         ")?;
        write!(out, "step      ")?;
        writeln!(out,)?;
        writeln!(out, "{}", RULE)?;
        out.flush()?;
        std::io::Result::Ok(())
    }

    pub(crate) fn print_status(&mut self, settings: &LinIpmSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        write!(out, "{:>3}  ", self.iterations)?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.cost_primal))?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.cost_dual))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.gap_rel))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_dual))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.μ))?;

        if self.iterations > 0 {
            write!(out, "{}  ", expformat!("{:6.2e}", self.sigma))?;
            let step = T::min(self.step_primal, self.step_dual);
            write!(out, "{}  ", expformat!("{:>.2e}", step))?;
        } else {
            write!(out, " ------    ------   ")?;
        }

        writeln!(out,)?;

        std::io::Result::Ok(())
    }

    pub(crate) fn print_footer(
        &mut self,
        settings: &LinIpmSettings<T>,
        stats: &LinearSolverStats,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "{}", RULE)?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "linear solver: {} factorizations, {} solves, nnz(LU) = {}",
            stats.factor_count, stats.solve_count, stats.nnz_factors
        )?;
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        out.flush()?;

        std::io::Result::Ok(())
    }
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
    assert_eq!(_exp_str_reformat("1.5e3".to_string()), "1.5e+03");
    assert_eq!(_exp_str_reformat("1.5e-3".to_string()), "1.5e-03");
    assert_eq!(_exp_str_reformat("-2.0e12".to_string()), "-2.0e+12");
    assert_eq!(_exp_str_reformat("2.0e-12".to_string()), "2.0e-12");
    assert_eq!(expformat!("{:6.2e}", f64::INFINITY), "   inf");
}
