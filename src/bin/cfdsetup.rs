use cfdsetup::base::{JobConfig, DEFAULT_OUT_DIR};
use cfdsetup::samples::Samples;
use cfdsetup::target::{SimulatedTarget, SurfaceProfile};
use cfdsetup::workflow::{LivenessPoll, PollEnd, SetupWorkflow};
use cfdsetup::StrError;
use std::path::Path;
use std::time::Duration;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "cfdsetup",
    about = "Opens a case and forces its physics settings, falling back through the solver's control surfaces"
)]
struct Options {
    /// Job file (JSON)
    job: String,

    /// Built-in profile name (modern, legacy, tui-only) or profile file (JSON)
    #[structopt(long, default_value = "modern")]
    profile: String,

    /// Directory of the summary file
    #[structopt(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: String,

    /// Exits after the setup instead of polling the session
    #[structopt(long)]
    no_poll: bool,

    /// Interval between health checks (overrides the job file)
    #[structopt(long)]
    interval_ms: Option<u64>,

    /// Prints the job and one row per applied setting
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // logging (RUST_LOG overrides; debug shows every refused candidate)
    let level = if options.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder().filter_level(level).parse_default_env().init();

    // load job; relative case paths are relative to the job file
    let job_path = Path::new(&options.job);
    let mut job = JobConfig::read_json(job_path)?;
    if let Some(dir) = job_path.parent() {
        job.files.rebase(dir);
    }
    if let Some(ms) = options.interval_ms {
        job.poll_interval_ms = ms;
    }
    if let Some(message) = job.validate() {
        eprintln!("ERROR: {}", message);
        return Err("job file contains inconsistent data");
    }
    if options.verbose {
        println!("{}", job);
    }

    // session
    let profile = match Samples::profile(&options.profile) {
        Some(p) => p,
        None => SurfaceProfile::read_json(&options.profile)?,
    };
    let mut target = SimulatedTarget::new(profile)?;
    println!("session: {} [profile {}]", job.launch, target.profile_name());

    // setup
    let workflow = SetupWorkflow::new(&job, options.verbose)?;
    let summary = workflow.run(&mut target)?;
    println!("\n{}", summary);

    // summary file
    let stem = job_path.file_stem().and_then(|s| s.to_str()).unwrap_or("job");
    let path = format!("{}/{}-summary.json", options.out_dir, stem);
    summary.write_json(&path)?;
    println!("summary written to {}", path);
    if options.no_poll {
        return Ok(());
    }

    // keep alive while the session is open
    println!("✅ case ready; keep this console open (Ctrl+C to quit)");
    let poll = LivenessPoll::new(Duration::from_millis(job.poll_interval_ms));
    ctrlc::set_handler(poll.interrupter()).map_err(|_| "cannot install the Ctrl+C handler")?;
    match poll.run(&mut target) {
        PollEnd::TargetLost { checks, reason } => {
            println!("🔻 solver session closed after {} check(s): {}", checks, reason)
        }
        PollEnd::Interrupted { checks } => println!("⏹ interrupted after {} check(s)", checks),
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
