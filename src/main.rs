// src/main.rs
//! Vector datapath comparison CLI
//! Benchmarks the software ALU and compares it with the hardware FSM model

use clap::{Arg, ArgMatches, Command};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use vecproc_sim::analysis::{
    clock_sweep, default_frequencies, ChartConfig, ChartMetric, ChartRenderer, ExportFormat,
    ReportConfig, ReportGenerator,
};
use vecproc_sim::config::ComparisonConfig;
use vecproc_sim::datapath::{fsm, LaneVector, OperationKind};
use vecproc_sim::pipeline::{self, SoftwareSource};
use vecproc_sim::software::{self, SoftwareMeasurement};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("validate", sub_matches)) => {
            cmd_validate(sub_matches)?;
        }
        Some(("config-gen", sub_matches)) => {
            cmd_config_gen(sub_matches)?;
        }
        Some(("bench", sub_matches)) => {
            cmd_bench(sub_matches)?;
        }
        Some(("compare", sub_matches)) => {
            cmd_compare(sub_matches)?;
        }
        Some(("sweep", sub_matches)) => {
            cmd_sweep(sub_matches)?;
        }
        _ => {
            println!("vecproc-sim v0.1");
            println!("Use --help for available commands");
        }
    }

    Ok(())
}

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Configuration file")
        .default_value("config/reference.toml")
}

fn recorded_arg() -> Arg {
    Arg::new("recorded")
        .long("recorded")
        .help("Use recorded software latencies instead of benchmarking")
        .action(clap::ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("vecproc-sim")
        .version("0.1.0")
        .about("4-lane vector datapath: hardware FSM model vs software benchmark")
        .subcommand(
            Command::new("validate")
                .about("Validate a configuration file")
                .arg(Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file to validate")
                    .required(true))
        )
        .subcommand(
            Command::new("config-gen")
                .about("Generate the reference configuration file")
                .arg(Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .help("Output file path")
                    .default_value("config/reference.toml"))
        )
        .subcommand(
            Command::new("bench")
                .about("Benchmark the software ALU")
                .arg(config_arg())
                .arg(Arg::new("op")
                    .long("op")
                    .help("Operation (add, subtract, dot_product); all when omitted"))
                .arg(Arg::new("vec-a")
                    .long("vec-a")
                    .help("Vector A lanes (comma-separated)"))
                .arg(Arg::new("vec-b")
                    .long("vec-b")
                    .help("Vector B lanes (comma-separated)"))
                .arg(Arg::new("seed")
                    .long("seed")
                    .help("Draw random operands from this seed")
                    .conflicts_with_all(["vec-a", "vec-b"]))
                .arg(Arg::new("iterations")
                    .short('n')
                    .long("iterations")
                    .help("Timed iterations"))
                .arg(Arg::new("warmup")
                    .long("warmup")
                    .help("Warm-up iterations"))
                .arg(Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .help("Save the benchmark results to a file"))
        )
        .subcommand(
            Command::new("compare")
                .about("Compare hardware and software latency, throughput and energy")
                .arg(config_arg())
                .arg(recorded_arg())
                .arg(Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .help("Write the text report to a file"))
                .arg(Arg::new("chart")
                    .long("chart")
                    .help("Print ASCII charts")
                    .action(clap::ArgAction::SetTrue))
                .arg(Arg::new("export")
                    .long("export")
                    .value_name("FILE")
                    .help("Export records (.csv or .json)"))
        )
        .subcommand(
            Command::new("sweep")
                .about("Repeat the comparison across clock frequencies")
                .arg(config_arg())
                .arg(recorded_arg())
                .arg(Arg::new("freqs")
                    .long("freqs")
                    .help("Clock frequencies in MHz (comma-separated)"))
        )
}

fn load_config(path: &str) -> Result<ComparisonConfig, Box<dyn std::error::Error>> {
    if Path::new(path).exists() {
        Ok(ComparisonConfig::from_file(path)?)
    } else {
        warn!("Configuration file {} not found, using reference values", path);
        Ok(ComparisonConfig::reference())
    }
}

fn source_from(matches: &ArgMatches) -> SoftwareSource {
    if matches.get_flag("recorded") {
        SoftwareSource::Recorded
    } else {
        SoftwareSource::Measured
    }
}

fn parse_opt<T: std::str::FromStr>(matches: &ArgMatches, id: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    matches
        .get_one::<String>(id)
        .map(|s| s.parse::<T>().map_err(|e| format!("Invalid --{}: {}", id, e)))
        .transpose()
}

fn cmd_validate(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = matches
        .get_one::<String>("config")
        .ok_or("missing --config")?;

    println!("Validating configuration: {}", config_path);

    match ComparisonConfig::from_file(config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!("  Clock: {} MHz", config.hardware.clock_frequency_mhz);
            if let Some(fmax) = config.hardware.fmax_mhz {
                println!("  Fmax: {} MHz", fmax);
            }
            for (name, cycles) in &config.hardware.cycles {
                println!("  {}: {} cycles", name, cycles);
            }
            println!("  Power: {} mW (HW), {} W (SW)",
                     config.power.hardware_milliwatts, config.power.software_watts);
            println!("  Recorded latencies: {}", config.recorded.len());
            println!("✓ All validation checks passed");
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn cmd_config_gen(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = matches
        .get_one::<String>("output")
        .ok_or("missing --output")?;

    println!("Generating reference configuration: {}", output_path);

    let config = ComparisonConfig::reference();

    // Create directory if it doesn't exist
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    config.save_to_file(output_path)?;

    println!("✓ Configuration saved to {}", output_path);
    println!("  Use 'vecproc-sim validate -c {}' to verify", output_path);

    Ok(())
}

fn cmd_bench(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches.get_one::<String>("config").ok_or("missing --config")?)?;

    let (a, b) = match parse_opt::<u64>(matches, "seed")? {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (LaneVector::random(&mut rng), LaneVector::random(&mut rng))
        }
        None => (
            parse_opt::<LaneVector>(matches, "vec-a")?.unwrap_or(config.benchmark.operand_a),
            parse_opt::<LaneVector>(matches, "vec-b")?.unwrap_or(config.benchmark.operand_b),
        ),
    };
    let iterations = parse_opt::<u64>(matches, "iterations")?.unwrap_or(config.benchmark.iterations);
    let warmup = parse_opt::<u64>(matches, "warmup")?.unwrap_or(config.benchmark.warmup_iterations);
    let ops = match parse_opt::<OperationKind>(matches, "op")? {
        Some(op) => vec![op],
        None => OperationKind::ALL.to_vec(),
    };

    let measurements = ops
        .into_iter()
        .map(|op| software::measure(op, a, b, iterations, warmup))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = bench_summary(a, b, warmup, &measurements);
    print!("{}", summary);

    if let Some(path) = matches.get_one::<String>("output") {
        std::fs::write(path, &summary)?;
        println!("Results saved to {}", path);
    }

    Ok(())
}

fn bench_summary(
    a: LaneVector,
    b: LaneVector,
    warmup: u64,
    measurements: &[SoftwareMeasurement],
) -> String {
    let mut out = String::new();
    out.push_str("Software benchmark\n");
    out.push_str(&format!("  A = {}\n", a));
    out.push_str(&format!("  B = {}\n", b));
    if let Some(first) = measurements.first() {
        out.push_str(&format!(
            "  {} iterations after {} warm-up\n",
            first.iteration_count(),
            warmup
        ));
    }
    out.push('\n');

    for m in measurements {
        out.push_str(&format!("{}\n", m.operation().label()));
        if let Some(result) = m.last_result() {
            out.push_str(&format!("  Result: {}\n", result));
        }
        out.push_str(&format!("  Mean latency: {:.4} us per operation\n", m.mean_latency_us()));
        out.push_str(&format!("  Throughput: {:.2} ops/s\n\n", 1e6 / m.mean_latency_us()));
    }
    out
}

fn cmd_compare(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches.get_one::<String>("config").ok_or("missing --config")?)?;
    let run = pipeline::run(&config, source_from(matches))?;

    let report = ReportGenerator::new(ReportConfig::default())
        .generate(&run.timing, &run.power, &run.records);
    println!("{}", report);

    if let Some(path) = matches.get_one::<String>("output") {
        std::fs::write(path, &report)?;
        println!("Report saved to {}", path);
    }

    if matches.get_flag("chart") {
        for metric in ChartMetric::ALL {
            let renderer = ChartRenderer::new(ChartConfig {
                log_scale: metric.prefers_log_scale(),
                ..ChartConfig::default()
            });
            println!("{}", renderer.bar_chart(&run.records, metric));
        }
    }

    if let Some(path) = matches.get_one::<String>("export") {
        let format = if path.ends_with(".json") { ExportFormat::Json } else { ExportFormat::Csv };
        ChartRenderer::new(ChartConfig::default()).export(&run.records, format, path)?;
        println!("Records exported to {}", path);
    }

    Ok(())
}

fn cmd_sweep(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches.get_one::<String>("config").ok_or("missing --config")?)?;
    let profile = config.hardware_profile()?;
    let run = pipeline::run(&config, source_from(matches))?;

    let frequencies = match matches.get_one::<String>("freqs") {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| "Invalid --freqs format")?,
        None => default_frequencies(&profile),
    };

    let points = clock_sweep(&profile, &run.measurements, &run.power, &frequencies)?;

    println!("Clock sweep ({} points)", points.len());
    println!("{:<12} {:<12} {}", "MHz", "Period (ns)", "Speedup per operation");
    for point in &points {
        let speedups: Vec<String> = point
            .records
            .iter()
            .map(|r| format!("{}={:.1}x", r.operation.name(), r.speedup))
            .collect();
        println!("{:<12.2} {:<12.3} {}", point.clock_frequency_mhz, point.clock_period_ns, speedups.join("  "));
    }

    println!("\nState paths:");
    for op in OperationKind::ALL {
        println!("  {:<12} {}", op.label(), fsm::describe_path(op));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        cli().debug_assert();
    }

    #[test]
    fn test_bench_args_parse() {
        let matches = cli()
            .try_get_matches_from(["vecproc-sim", "bench", "--op", "dot", "--vec-a", "1,2,3,4", "-n", "10"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(parse_opt::<OperationKind>(sub, "op").unwrap(), Some(OperationKind::DotProduct));
        assert_eq!(parse_opt::<u64>(sub, "iterations").unwrap(), Some(10));
        assert_eq!(
            parse_opt::<LaneVector>(sub, "vec-a").unwrap(),
            Some(LaneVector::new([1, 2, 3, 4]))
        );
    }

    #[test]
    fn test_bench_summary_lists_each_operation() {
        let measurements = vec![
            SoftwareMeasurement::recorded(OperationKind::Add, 2.5, 1_000).unwrap(),
            SoftwareMeasurement::recorded(OperationKind::DotProduct, 1.25, 1_000).unwrap(),
        ];
        let summary = bench_summary(
            LaneVector::new([10, 20, 30, 40]),
            LaneVector::new([5, 10, 15, 20]),
            100,
            &measurements,
        );

        assert!(summary.contains("A = [10, 20, 30, 40]"));
        assert!(summary.contains("1000 iterations after 100 warm-up"));
        assert!(summary.contains("VECTOR ADD\n  Mean latency: 2.5000 us per operation"));
        assert!(summary.contains("Throughput: 800000.00 ops/s"));
    }

    #[test]
    fn test_bench_output_arg() {
        let matches = cli()
            .try_get_matches_from(["vecproc-sim", "bench", "-o", "results.txt"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("output").map(String::as_str), Some("results.txt"));
    }

    #[test]
    fn test_seed_conflicts_with_explicit_vectors() {
        let result = cli().try_get_matches_from(["vecproc-sim", "bench", "--seed", "7", "--vec-a", "1,2,3,4"]);
        assert!(result.is_err());
    }
}
