use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use heliograph::{
    AnswerValue, Clock, EventHost, FaceCycle, FileStorage, HeliogramStatus, HeliogramStore,
    KeyValueStorage, MotionDriver, NewHeliogram, NewResponse, QuestionResponse, Respondent,
    ResponseStore, SimulatedHost, SystemClock, Timeline, TrackBounds, Viewport, scroll_progress,
    summarize,
};

#[derive(Parser, Debug)]
#[command(name = "heliograph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the scroll animation timeline as JSON lines.
    Timeline(TimelineArgs),
    /// Show which content variant sits on each cube face at a rotation angle.
    Faces(FacesArgs),
    /// Compute scroll progress for a tracked container.
    Scroll(ScrollArgs),
    /// Manage heliograms stored in a directory.
    Heliograms(HeliogramsArgs),
    /// Inspect and submit responses stored in a directory.
    Responses(ResponsesArgs),
}

#[derive(Args, Debug)]
struct TimelineArgs {
    /// Timeline JSON; defaults to the built-in cube reveal.
    #[arg(long)]
    timeline: Option<PathBuf>,

    /// Sample a single progress value.
    #[arg(long, conflicts_with = "steps")]
    progress: Option<f64>,

    /// Scroll a simulated page through the track in this many steps.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Simulate `prefers-reduced-motion: reduce`.
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Args, Debug)]
struct FacesArgs {
    /// Rotation angle in degrees.
    #[arg(long, allow_negative_numbers = true)]
    angle: f64,

    /// Faces around the axis.
    #[arg(long, default_value_t = 4)]
    faces: u32,

    /// Content variants cycled across faces.
    #[arg(long, default_value_t = 3)]
    variants: u32,

    /// Degrees per face.
    #[arg(long, default_value_t = 90.0)]
    step: f64,
}

#[derive(Args, Debug)]
struct ScrollArgs {
    /// Container offset from the document top, in px.
    #[arg(long, default_value_t = 0.0)]
    track_top: f64,

    /// Container height, in px.
    #[arg(long)]
    track_height: f64,

    /// Viewport height, in px.
    #[arg(long)]
    viewport: f64,

    /// Document scroll offset, in px.
    #[arg(long)]
    offset: f64,
}

#[derive(Args, Debug)]
struct HeliogramsArgs {
    /// Storage directory.
    #[arg(long)]
    dir: PathBuf,

    #[command(subcommand)]
    cmd: HeliogramsCmd,
}

#[derive(Subcommand, Debug)]
enum HeliogramsCmd {
    /// Print every heliogram as JSON.
    List,
    /// Create an empty draft heliogram.
    Create {
        /// Title.
        #[arg(long)]
        title: String,
        /// Description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Copy a heliogram as a new draft.
    Duplicate {
        /// Heliogram id.
        id: String,
    },
    /// Mark a heliogram active.
    Publish {
        /// Heliogram id.
        id: String,
    },
    /// Mark a heliogram closed.
    Close {
        /// Heliogram id.
        id: String,
    },
    /// Delete a heliogram.
    Delete {
        /// Heliogram id.
        id: String,
        /// Also delete its responses.
        #[arg(long)]
        cascade: bool,
    },
    /// Restore the sample heliograms.
    Reset,
}

#[derive(Args, Debug)]
struct ResponsesArgs {
    /// Storage directory.
    #[arg(long)]
    dir: PathBuf,

    #[command(subcommand)]
    cmd: ResponsesCmd,
}

#[derive(Subcommand, Debug)]
enum ResponsesCmd {
    /// Print the responses to a heliogram as JSON.
    List {
        /// Heliogram id.
        heliogram_id: String,
    },
    /// Per-question aggregates for a heliogram.
    Summary {
        /// Heliogram id.
        heliogram_id: String,
    },
    /// Submit a response.
    Submit {
        /// Heliogram id.
        heliogram_id: String,
        /// Respondent name.
        #[arg(long)]
        name: String,
        /// Answer as `QUESTION_ID=VALUE`; repeatable.
        #[arg(long = "answer", value_parser = parse_answer)]
        answers: Vec<QuestionResponse>,
        /// Source tag.
        #[arg(long)]
        source: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("HELIOGRAPH_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Faces(args) => cmd_faces(args),
        Command::Scroll(args) => cmd_scroll(args),
        Command::Heliograms(args) => cmd_heliograms(args),
        Command::Responses(args) => cmd_responses(args),
    }
}

fn parse_answer(s: &str) -> Result<QuestionResponse, String> {
    let (q, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION_ID=VALUE, got '{s}'"))?;
    let value = match v.parse::<f64>() {
        Ok(n) => AnswerValue::Number(n),
        Err(_) => AnswerValue::Text(v.to_owned()),
    };
    Ok(QuestionResponse {
        question_id: q.to_owned(),
        value,
    })
}

fn read_timeline(path: Option<&Path>) -> anyhow::Result<Timeline> {
    let Some(path) = path else {
        return Ok(Timeline::cube_reveal());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open timeline '{}'", path.display()))?;
    Timeline::from_json(&s).with_context(|| format!("parse timeline '{}'", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let timeline = read_timeline(args.timeline.as_deref())?;
    let cycle = FaceCycle::default();

    if let Some(p) = args.progress {
        let p = if args.reduced_motion { 1.0 } else { p };
        let frame = timeline.sample(p);
        return print_json(&serde_json::json!({
            "progress": frame.progress,
            "phases": timeline.active_phases(frame.progress),
            "values": frame.values,
            "faces": frame.get("rotate_y").map(|a| cycle.assign(a)),
        }));
    }

    // A 400vh track starting one viewport down the page.
    let viewport = Viewport::new(1280.0, 800.0)?;
    let sim = SimulatedHost::new(viewport);
    let track = sim.mount_container(viewport.height, 4.0 * viewport.height);
    sim.set_reduced_motion(args.reduced_motion);

    let host: Rc<dyn EventHost> = Rc::new(sim.clone());
    let mut driver = MotionDriver::mount(host, sim.container_source(track), timeline);

    let start = viewport.height;
    let range = 3.0 * viewport.height;
    let steps = args.steps.max(1);
    for i in 0..=steps {
        sim.scroll_to(start + range * f64::from(i) / f64::from(steps));
        let frame = driver.frame();
        print_json(&serde_json::json!({
            "scrollY": sim.scroll_y(),
            "progress": frame.progress,
            "phases": driver.timeline().active_phases(frame.progress),
            "values": frame.values,
            "faces": driver.faces(&cycle, "rotate_y"),
        }))?;
    }
    driver.unmount();
    Ok(())
}

fn cmd_faces(args: FacesArgs) -> anyhow::Result<()> {
    let cycle = FaceCycle::new(args.faces, args.variants, args.step)?;
    print_json(&cycle.assign(args.angle))
}

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    TrackBounds::new(args.track_top, args.track_height)?;
    let bounds = TrackBounds::at_scroll(args.track_top, args.track_height, args.offset);
    println!("{}", scroll_progress(Some(bounds), args.viewport));
    Ok(())
}

fn open_storage(dir: &Path) -> Rc<dyn KeyValueStorage> {
    Rc::new(FileStorage::new(dir))
}

fn cmd_heliograms(args: HeliogramsArgs) -> anyhow::Result<()> {
    let storage = open_storage(&args.dir);
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut store = HeliogramStore::new(Rc::clone(&storage), Rc::clone(&clock));
    store.hydrate();

    match args.cmd {
        HeliogramsCmd::List => print_json(&store.list()),
        HeliogramsCmd::Create { title, description } => {
            let hg = store.create(NewHeliogram {
                title,
                description,
                ..NewHeliogram::default()
            })?;
            print_json(&hg)
        }
        HeliogramsCmd::Duplicate { id } => {
            let hg = store
                .duplicate(&id)?
                .with_context(|| format!("no heliogram '{id}'"))?;
            print_json(&hg)
        }
        HeliogramsCmd::Publish { id } => set_status(&mut store, &id, HeliogramStatus::Active),
        HeliogramsCmd::Close { id } => set_status(&mut store, &id, HeliogramStatus::Closed),
        HeliogramsCmd::Delete { id, cascade } => {
            let deleted = store.delete(&id)?;
            let mut removed_responses = 0;
            if deleted && cascade {
                let mut responses = ResponseStore::new(storage, clock);
                responses.hydrate();
                removed_responses = responses.delete_for_heliogram(&id)?;
            }
            print_json(&serde_json::json!({
                "deleted": deleted,
                "responsesDeleted": removed_responses,
            }))
        }
        HeliogramsCmd::Reset => {
            store.reset()?;
            eprintln!("restored sample heliograms in {}", args.dir.display());
            Ok(())
        }
    }
}

fn set_status(store: &mut HeliogramStore, id: &str, status: HeliogramStatus) -> anyhow::Result<()> {
    let hg = store
        .set_status(id, status)?
        .with_context(|| format!("no heliogram '{id}'"))?;
    print_json(&hg)
}

fn cmd_responses(args: ResponsesArgs) -> anyhow::Result<()> {
    let storage = open_storage(&args.dir);
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut responses = ResponseStore::new(Rc::clone(&storage), Rc::clone(&clock));
    responses.hydrate();

    match args.cmd {
        ResponsesCmd::List { heliogram_id } => {
            print_json(&responses.list_by_heliogram(&heliogram_id))
        }
        ResponsesCmd::Summary { heliogram_id } => {
            let mut heliograms = HeliogramStore::new(storage, clock);
            heliograms.hydrate();
            let hg = heliograms
                .get_by_id(&heliogram_id)
                .with_context(|| format!("no heliogram '{heliogram_id}'"))?;
            print_json(&serde_json::json!({
                "heliogramId": hg.id,
                "responses": responses.count_for(&hg.id),
                "questions": summarize(hg, responses.list()),
            }))
        }
        ResponsesCmd::Submit {
            heliogram_id,
            name,
            answers,
            source,
        } => {
            let resp = responses.create(NewResponse {
                heliogram_id,
                responses: answers,
                respondent: Respondent {
                    name,
                    ..Respondent::default()
                },
                source,
            })?;
            print_json(&resp)
        }
    }
}
