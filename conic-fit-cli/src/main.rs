use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use conic_fit::{GradientCheck, Scientific, StepReport, finite_difference_test};
use rand::{SeedableRng, rngs::StdRng};

mod plot;

#[derive(Parser)]
#[command(name = "conic-fit", version, about, long_about = None)]
/// Checks the analytic gradient of the hinge conic fit against finite differences,
/// on random points with random parameters.
struct Cli {
    /// Number of random points.
    #[arg(short = 'm', long = "points", default_value_t = 10)]
    num_points: usize,

    /// Coordinates per point.
    #[arg(short = 'n', long = "dim", default_value_t = 2)]
    dim: usize,

    /// Seed the random data, so runs can be repeated.
    #[arg(long)]
    seed: Option<u64>,

    /// Save a log-log plot of relative error against step size as a PNG.
    #[arg(long = "plot")]
    plot_path: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let check = match main_inner(&cli) {
        Ok(check) => check,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = handle_output(&check, &cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn main_inner(cli: &Cli) -> anyhow::Result<GradientCheck> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let check = finite_difference_test(cli.num_points, cli.dim, &mut rng)?;
    Ok(check)
}

fn handle_output(check: &GradientCheck, cli: &Cli) -> anyhow::Result<()> {
    print_output(check);
    if let Some(ref path) = cli.plot_path {
        match check {
            GradientCheck::Checked { steps, .. } => plot::save_png(steps, path)?,
            GradientCheck::Degenerate { .. } => {
                println!("{}", "Nothing to plot, the directional derivative is 0".yellow());
            }
        }
    }
    Ok(())
}

/// Prints the output nicely to stdout.
fn print_output(check: &GradientCheck) {
    match check {
        GradientCheck::Degenerate { probe, gradient } => {
            println!("{}", "p:".bold());
            println!("{}", format_vector(probe));
            println!("{}", format_vector(gradient));
        }
        GradientCheck::Checked {
            directional, steps, ..
        } => {
            println!("{}", format!("g = {}", Scientific(*directional)).bold());
            print_steps(steps, check.best_step());
        }
    }
}

/// One line per step, with the most accurate one highlighted.
fn print_steps(steps: &[StepReport], best: Option<&StepReport>) {
    for step in steps {
        if best == Some(step) {
            println!("{}", step.to_string().green());
        } else {
            println!("{step}");
        }
    }
}

fn format_vector(v: &[f64]) -> String {
    let entries: Vec<String> = v.iter().map(|vi| Scientific(*vi).to_string()).collect();
    format!("[{}]", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use std::process::{Command, Stdio};

    use crate::{Cli, GradientCheck, format_vector, handle_output, main_inner};

    fn cli(seed: u64) -> Cli {
        Cli {
            num_points: 10,
            dim: 2,
            seed: Some(seed),
            plot_path: None,
        }
    }

    #[test]
    fn test_seeded_inner() {
        let a = main_inner(&cli(4)).unwrap();
        let b = main_inner(&cli(4)).unwrap();
        assert_eq!(a, b);
        if let GradientCheck::Checked { steps, .. } = &a {
            assert_eq!(steps.len(), 11);
        }
        handle_output(&a, &cli(4)).unwrap();
    }

    #[test]
    fn test_plot_inner() {
        let path = std::env::temp_dir().join("conic_fit_test_plot.png");
        let cli = Cli {
            plot_path: Some(path.clone()),
            ..cli(9)
        };
        let check = main_inner(&cli).unwrap();
        handle_output(&check, &cli).unwrap();
        if !check.is_degenerate() {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_zero_dim_inner() {
        let cli = Cli { dim: 0, ..cli(1) };
        let e = main_inner(&cli).unwrap_err();
        assert_eq!(e.to_string(), "Cannot fit a conic in 0 dimensions");
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(
            format_vector(&[24.0, 0.0, -0.5]),
            "[2.400000e+01, 0.000000e+00, -5.000000e-01]"
        );
    }

    #[test]
    fn test_default_run() {
        let out = Command::new("cargo")
            .args(["run", "--quiet", "--", "--seed", "2"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
            .wait_with_output()
            .unwrap();
        assert!(out.status.success());
        let stdout = String::from_utf8(out.stdout).unwrap();
        if stdout.starts_with("p:") {
            assert_eq!(stdout.lines().count(), 3);
        } else {
            assert!(stdout.starts_with("g = "), "{stdout}");
            let steps: Vec<&str> = stdout.lines().skip(1).collect();
            assert_eq!(steps.len(), 11);
            assert!(steps[0].starts_with("ep = 1.000000e+02, error = "));
            assert!(steps[10].starts_with("ep = 1.000000e-08, error = "));
        }
    }

    #[test]
    fn test_bad_dim() {
        let out = Command::new("cargo")
            .args(["run", "--quiet", "--", "--dim", "0"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
            .wait_with_output()
            .unwrap();
        assert_eq!(out.status.code(), Some(1));
        let stderr = String::from_utf8(out.stderr).unwrap();
        assert!(stderr.contains("Error: Cannot fit a conic in 0 dimensions"), "{stderr}");
    }
}
