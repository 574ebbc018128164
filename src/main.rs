use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use ripple_adder::bit::Bit;
use ripple_adder::netlist::Circuit;
use ripple_adder::ripple::{ripple_trace, ripple_trace_binary, Encoding, RippleTrace};
use ripple_adder::verify::{exhaustive, full_adder_table, half_adder_table, sample, TruthRow};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ripple", version, about = "Gate-level 4-bit ripple-carry adder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add two 4-bit operands
    Add {
        a: u64,
        b: u64,
        #[arg(long, default_value_t = 0)]
        carry: i64,
        /// `decimal` (1010 is a bit pattern) or `binary` (10 is ten)
        #[arg(long, default_value = "decimal")]
        encoding: String,
        #[arg(long, default_value_t = false)]
        trace: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the half- or full-adder truth table
    Table {
        #[arg(default_value = "full")]
        kind: String,
    },
    /// Emit the ripple-carry netlist
    Netlist {
        #[arg(long, default_value_t = 4)]
        width: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Evaluate a netlist file on the given input bits
    Eval {
        #[arg(long)]
        circuit: PathBuf,
        bits: Vec<i64>,
    },
    /// Check the netlist against integer addition for every input
    Verify {
        #[arg(long, default_value_t = 4)]
        width: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run seeded random additions through the decimal-digit surface
    Sample {
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = 1000)]
        count: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Add {
            a,
            b,
            carry,
            encoding,
            trace,
            json,
        } => {
            let encoding = Encoding::from_str(&encoding).ok_or_else(|| anyhow!("unknown encoding"))?;
            let result = add_with_encoding(encoding, a, b, carry)?;
            info!(encoding = encoding.as_str(), pattern = result.pattern, value = result.value, "add");
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                if trace {
                    print_trace(&result);
                }
                match encoding {
                    Encoding::DecimalDigits => println!("{}", result.pattern),
                    Encoding::Binary => println!("{}", result.value),
                }
            }
        }
        Commands::Table { kind } => {
            let rows = match kind.as_str() {
                "half" => half_adder_table(),
                "full" => full_adder_table(),
                other => bail!("unknown table {other}, expected half or full"),
            };
            print_table(&rows);
        }
        Commands::Netlist { width, out } => {
            if width == 0 {
                bail!("width must be at least 1");
            }
            let circuit = Circuit::ripple_carry(width);
            match out {
                Some(path) => {
                    circuit.save(&path)?;
                    println!(
                        "netlist written to {} gates={} depth={} hash={}",
                        path.to_string_lossy(),
                        circuit.gates.len(),
                        circuit.depth(),
                        circuit.hash()
                    );
                }
                None => {
                    print!("{}", circuit.canonical_text());
                    println!("# hash={}", circuit.hash());
                }
            }
        }
        Commands::Eval { circuit, bits } => {
            let circuit = Circuit::load(&circuit)?;
            let inputs = parse_bits(&bits)?;
            let out = circuit.eval(&inputs)?;
            println!("{}", join_bits(&out));
        }
        Commands::Verify { width, json } => {
            let report = exhaustive(width)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "verified width={} cases={} gates={} depth={} mismatches={} hash={}",
                    report.width,
                    report.cases,
                    report.gates,
                    report.depth,
                    report.mismatches.len(),
                    report.circuit_hash
                );
                for m in report.mismatches.iter().take(10) {
                    println!(
                        "  {} + {} + {}: expected {} netlist {} functional {}",
                        m.a, m.b, m.carry_in, m.expected, m.netlist, m.functional
                    );
                }
            }
            if !report.is_ok() {
                bail!("{} mismatches", report.mismatches.len());
            }
        }
        Commands::Sample { seed, count, json } => {
            let report = sample(seed, count)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "sample seed={} count={} failures={} digest={}",
                    report.seed, report.count, report.failures, report.digest
                );
            }
            if report.failures > 0 {
                bail!("{} sampled sums were wrong", report.failures);
            }
        }
    }
    Ok(())
}

fn add_with_encoding(encoding: Encoding, a: u64, b: u64, carry: i64) -> Result<RippleTrace> {
    let trace = match encoding {
        Encoding::DecimalDigits => ripple_trace(a, b, carry)?,
        Encoding::Binary => {
            let a = u8::try_from(a).map_err(|_| anyhow!("operand {a} does not fit in 4 bits"))?;
            let b = u8::try_from(b).map_err(|_| anyhow!("operand {b} does not fit in 4 bits"))?;
            ripple_trace_binary(a, b, carry)?
        }
    };
    Ok(trace)
}

fn parse_bits(raw: &[i64]) -> Result<Vec<Bit>> {
    let bits = raw
        .iter()
        .map(|&v| Bit::try_from(v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(bits)
}

fn join_bits(bits: &[Bit]) -> String {
    bits.iter().map(|b| b.to_string()).collect()
}

fn print_trace(t: &RippleTrace) {
    println!("a={} b={} carry_in={}", join_bits(&t.a), join_bits(&t.b), t.carry_in);
    for (i, stage) in t.stages.iter().enumerate() {
        println!("  fa{} sum={} carry={}", i, stage.sum, stage.carry);
    }
    println!("bits={} value={} pattern={:05}", join_bits(&t.bits), t.value, t.pattern);
}

fn print_table(rows: &[TruthRow]) {
    for row in rows {
        println!("{} -> sum={} carry={}", join_bits(&row.inputs), row.sum, row.carry);
    }
}
