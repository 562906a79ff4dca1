mod audit;
mod render;
mod reports;
mod seeds;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use kimeru_core::constants::TRACE_ANIMATION_MS;
use kimeru_core::{
    AmidakujiDraw, DecisionMode, LadderGenerator, LadderLayout, PickerConfig, PickerSession,
    Roster, decode_code, encode_code, generate_code_from_entropy, parse_entries, path_length,
};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use audit::run_audit;
use render::render_ladder;
use reports::{CodeReport, LadderReport, OrderReport, Report, SpinReport, TraceReport};
use seeds::{SeedInfo, resolve_seed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Spin a roulette wheel
    Roulette,
    /// Shuffle the candidates into an order
    Order,
    /// Draw an amidakuji ladder
    Amidakuji,
}

impl From<ModeArg> for DecisionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Roulette => Self::Roulette,
            ModeArg::Order => Self::Order,
            ModeArg::Amidakuji => Self::Amidakuji,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "kimeru", version)]
#[command(about = "Let chance decide - spin a wheel, shuffle an order or draw an amidakuji ladder")]
struct Args {
    /// Seed as an integer or a draw code such as AM-ORANGE42
    #[arg(long)]
    seed: Option<String>,

    /// JSON file overriding the built-in tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip animations and settle results immediately
    #[arg(long)]
    reduced_motion: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Spin the roulette wheel and report where it stops
    Spin {
        /// Candidates, separated by commas
        #[arg(long)]
        items: Option<String>,
        /// Simulated time before the stop is requested
        #[arg(long, default_value_t = 1500.0)]
        spin_ms: f64,
        /// Simulated frame interval
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,
    },
    /// Shuffle the candidates into a random order
    Order {
        #[arg(long)]
        items: Option<String>,
    },
    /// Draw an amidakuji ladder and show who wins what
    Ladder {
        #[arg(long)]
        items: Option<String>,
        /// Prize names, separated by commas
        #[arg(long)]
        prizes: Option<String>,
        /// Highlight the path of the candidate at this index
        #[arg(long)]
        trace: Option<usize>,
    },
    /// Generate many ladders and check the connectivity target
    Audit {
        #[arg(long)]
        columns: usize,
        #[arg(long, default_value_t = 100)]
        trials: usize,
        #[arg(long, default_value_t = 0.99)]
        min_rate: f64,
    },
    /// Decode a draw code, or make one for a mode and seed
    Code {
        code: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Command {
    fn mode(&self) -> DecisionMode {
        match self {
            Self::Spin { .. } => DecisionMode::Roulette,
            Self::Order { .. } => DecisionMode::Order,
            Self::Ladder { .. } | Self::Audit { .. } => DecisionMode::Amidakuji,
            Self::Code { mode, .. } => mode.map_or(DecisionMode::Roulette, DecisionMode::from),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    if args.report == "console" {
        announce_banner();
    }

    let report = execute(&args, config, rand::random())?;
    write_report(&args, &report)?;

    if let Report::Audit(audit) = &report
        && !audit.passed
    {
        eprintln!("{}", "Audit missed its connectivity target".red().bold());
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🎯 Kimeru".bright_cyan().bold());
    println!("{}", "=========".cyan());
}

fn load_config(path: Option<&Path>) -> Result<PickerConfig> {
    let Some(path) = path else {
        return Ok(PickerConfig::load_from_static());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    PickerConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn execute(args: &Args, config: PickerConfig, entropy: u64) -> Result<Report> {
    let mode = args.command.mode();
    match &args.command {
        Command::Spin {
            items,
            spin_ms,
            frame_ms,
        } => {
            let seed = resolve_seed(args.seed.as_deref(), mode, entropy)?;
            let mut session = build_session(args, config, seed.seed, items.as_deref(), None);
            run_spin(&mut session, seed, *spin_ms, *frame_ms).map(Report::Spin)
        }
        Command::Order { items } => {
            let seed = resolve_seed(args.seed.as_deref(), mode, entropy)?;
            let mut session = build_session(args, config, seed.seed, items.as_deref(), None);
            let order = session.decide_order()?.to_vec();
            Ok(Report::Order(OrderReport { seed, order }))
        }
        Command::Ladder {
            items,
            prizes,
            trace,
        } => {
            let seed = resolve_seed(args.seed.as_deref(), mode, entropy)?;
            let mut session =
                build_session(args, config, seed.seed, items.as_deref(), prizes.as_deref());
            run_ladder(&mut session, seed, *trace, args.reduced_motion).map(Report::Ladder)
        }
        Command::Audit {
            columns,
            trials,
            min_rate,
        } => {
            let seed = resolve_seed(args.seed.as_deref(), mode, entropy)?;
            let generator = LadderGenerator::new(config.ladder, config.labels);
            run_audit(&generator, *columns, *trials, *min_rate, seed.seed).map(Report::Audit)
        }
        Command::Code { code, mode, seed } => {
            run_code(code.as_deref(), *mode, *seed, entropy).map(Report::Code)
        }
    }
}

fn build_session(
    args: &Args,
    config: PickerConfig,
    seed: u64,
    items: Option<&str>,
    prizes: Option<&str>,
) -> PickerSession {
    let default_prize = config.labels.default_prize.clone();
    let mut session = PickerSession::new(config, seed);
    if items.is_some() || prizes.is_some() {
        let items = items.map_or_else(|| session.roster().items().to_vec(), parse_entries);
        let prizes = prizes.map(parse_entries).unwrap_or_default();
        session = session.with_roster(Roster::with_entries(&items, &prizes, &default_prize));
    }
    session.set_reduced_motion(args.reduced_motion);
    session
}

fn run_spin(
    session: &mut PickerSession,
    seed: SeedInfo,
    spin_ms: f64,
    frame_ms: f64,
) -> Result<SpinReport> {
    ensure!(
        frame_ms.is_finite() && frame_ms > 0.0,
        "frame-ms must be a positive number"
    );
    ensure!(spin_ms.is_finite(), "spin-ms must be a finite number");
    session.start_spin()?;

    let mut now = 0.0;
    let mut frames = 0;
    while session.wheel().is_spinning() && now < spin_ms {
        session.tick(now);
        now += frame_ms;
        frames += 1;
    }
    session.stop_spin();
    while session.wheel().is_spinning() {
        session.tick(now);
        now += frame_ms;
        frames += 1;
    }

    let selected_index = session
        .wheel()
        .selected
        .context("wheel stopped without a selection")?;
    let selected = session
        .selected_item()
        .context("selected slice has no candidate")?
        .to_string();
    Ok(SpinReport {
        seed,
        items: session.roster().items().to_vec(),
        selected_index,
        selected,
        rotation_deg: session.wheel().rotation_deg,
        frames,
    })
}

fn run_ladder(
    session: &mut PickerSession,
    seed: SeedInfo,
    trace: Option<usize>,
    reduced_motion: bool,
) -> Result<LadderReport> {
    let draw = session.decide_amidakuji()?.clone();
    let items = session.roster().items().to_vec();
    let trace = trace
        .map(|start| build_trace(session, &draw, &items, start, reduced_motion))
        .transpose()?;
    let picture = render_ladder(
        draw.ladder(),
        &items,
        &draw.prizes().bottom_labels,
        trace.as_ref().map(|trace| trace.waypoints.as_slice()),
    );
    Ok(LadderReport {
        seed,
        columns: draw.columns(),
        rows: draw.ladder().rows(),
        rungs: draw.ladder().rungs().to_vec(),
        mapping: draw.mapping().as_slice().to_vec(),
        bottom_labels: draw.prizes().bottom_labels.clone(),
        assignments: draw.assignments(&items),
        connectivity: draw.connectivity().clone(),
        trace,
        picture,
    })
}

fn build_trace(
    session: &PickerSession,
    draw: &AmidakujiDraw,
    items: &[String],
    start: usize,
    reduced_motion: bool,
) -> Result<TraceReport> {
    let waypoints = session
        .trace(start)
        .with_context(|| format!("cannot trace candidate {start}"))?;
    let points = LadderLayout::default().project(&waypoints, draw.ladder().rows());
    Ok(TraceReport {
        start,
        item: items.get(start).cloned().unwrap_or_default(),
        path_length: path_length(&points),
        points,
        waypoints,
        animation_ms: if reduced_motion {
            0.0
        } else {
            TRACE_ANIMATION_MS
        },
    })
}

fn run_code(
    code: Option<&str>,
    mode: Option<ModeArg>,
    seed: Option<u64>,
    entropy: u64,
) -> Result<CodeReport> {
    if let Some(code) = code {
        let Some((mode, seed)) = decode_code(code) else {
            bail!("not a draw code: {code}");
        };
        let code = encode_code(mode, seed).context("decoded seed lost its code")?;
        return Ok(CodeReport {
            code,
            mode: mode_name(mode).to_string(),
            seed,
        });
    }
    let Some(mode) = mode.map(DecisionMode::from) else {
        bail!("pass a draw code, or --mode with an optional --seed");
    };
    let code = match seed {
        Some(seed) => {
            let Some(code) = encode_code(mode, seed) else {
                bail!(
                    "seed {seed} has no {} draw code; only seeds printed with a code can be named by one",
                    mode_name(mode)
                );
            };
            code
        }
        None => generate_code_from_entropy(mode, entropy),
    };
    let (_, seed) = decode_code(&code).context("freshly made code failed to decode")?;
    Ok(CodeReport {
        code,
        mode: mode_name(mode).to_string(),
        seed,
    })
}

const fn mode_name(mode: DecisionMode) -> &'static str {
    match mode {
        DecisionMode::Roulette => "roulette",
        DecisionMode::Order => "order",
        DecisionMode::Amidakuji => "amidakuji",
    }
}

fn write_report(args: &Args, report: &Report) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        _ => reports::generate_console_report(&mut output_target, report)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
