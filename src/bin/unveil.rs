use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use kurbo::Rect;
use unveil::{
    Gesture, GuideTour, Language, LayoutProbe, Millis, NoScrollLock, RevealEvent, RevealSequencer,
    SilentCue, TourEvent, Viewport, WeddingData,
};

#[derive(Parser, Debug)]
#[command(name = "unveil", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an invitation data document.
    Validate(ValidateArgs),
    /// Write the built-in sample document (the admin editing starting point).
    Sample(SampleArgs),
    /// Simulate the envelope reveal and print its stage timeline.
    Reveal(RevealArgs),
    /// Replay the guided tour against a layout snapshot and print each step.
    Tour(TourArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input invitation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Output path for the sample JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RevealArgs {
    /// Invitation JSON providing the card display; the sample is used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Gesture that triggers the sequence.
    #[arg(long, value_enum, default_value_t = GestureChoice::Wheel)]
    gesture: GestureChoice,

    /// Timestamp (ms) at which the gesture arrives.
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Language the card resolves in.
    #[arg(long, value_enum, default_value_t = LangChoice::En)]
    lang: LangChoice,
}

#[derive(Parser, Debug)]
struct TourArgs {
    /// Layout snapshot JSON: `{"viewport": {"width", "scrollY"}, "anchors": {id: {x0, y0, x1, y1}}}`.
    #[arg(long)]
    layout: PathBuf,

    /// Invitation JSON providing the guide steps; the sample is used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Language the step text resolves in.
    #[arg(long, value_enum, default_value_t = LangChoice::En)]
    lang: LangChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GestureChoice {
    Wheel,
    Touch,
    Press,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LangChoice {
    En,
    Ja,
    My,
}

impl From<LangChoice> for Language {
    fn from(choice: LangChoice) -> Self {
        match choice {
            LangChoice::En => Self::En,
            LangChoice::Ja => Self::Ja,
            LangChoice::My => Self::My,
        }
    }
}

/// A frozen layout: anchor boxes keyed by id, plus viewport metrics.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutFile {
    viewport: Viewport,
    #[serde(default)]
    anchors: BTreeMap<String, Rect>,
}

impl LayoutProbe for LayoutFile {
    fn anchor_box(&self, anchor_id: &str) -> Option<Rect> {
        self.anchors.get(anchor_id).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Reveal(args) => cmd_reveal(args),
        Command::Tour(args) => cmd_tour(args),
    }
}

fn read_data_json(path: &Path) -> anyhow::Result<WeddingData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("open invitation '{}'", path.display()))?;
    Ok(WeddingData::from_json(&json)?)
}

fn read_data_or_sample(path: Option<&PathBuf>) -> anyhow::Result<WeddingData> {
    match path {
        Some(p) => read_data_json(p),
        None => Ok(WeddingData::sample()),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let data = read_data_json(&args.in_path)?;
    data.validate()?;
    println!("ok: {} is a valid invitation document", args.in_path.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let f = File::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(f, &WeddingData::sample())
        .with_context(|| "write sample JSON")?;
    println!("wrote sample invitation to {}", args.out.display());
    Ok(())
}

fn cmd_reveal(args: RevealArgs) -> anyhow::Result<()> {
    let data = read_data_or_sample(args.in_path.as_ref())?;
    data.validate()?;

    let mut seq = RevealSequencer::new(
        data.reveal_display(args.lang.into()),
        Box::new(SilentCue),
        Box::new(NoScrollLock),
    );

    let t0 = Millis(args.at_ms);
    let events = match args.gesture {
        GestureChoice::Wheel => seq.handle_gesture(Gesture::Wheel { delta_y: 12.0 }, t0),
        GestureChoice::Touch => {
            seq.handle_gesture(Gesture::TouchStart { y: 300.0 }, t0);
            seq.handle_gesture(Gesture::TouchMove { y: 280.0 }, t0)
        }
        GestureChoice::Press => seq.handle_gesture(Gesture::Press, t0),
    };
    print_reveal_events(t0, &events);

    while let Some(deadline) = seq.next_deadline() {
        let events = seq.tick(deadline);
        print_reveal_events(deadline, &events);
    }

    Ok(())
}

fn print_reveal_events(at: Millis, events: &[RevealEvent]) {
    for event in events {
        match event {
            RevealEvent::StageChanged(stage) => {
                println!("t={:>5}ms  stage={}", at.0, format!("{stage:?}").to_lowercase());
            }
            RevealEvent::Opened => {
                println!("t={:>5}ms  open (host content transitions begin)", at.0);
            }
        }
    }
}

fn cmd_tour(args: TourArgs) -> anyhow::Result<()> {
    let f = File::open(&args.layout)
        .with_context(|| format!("open layout '{}'", args.layout.display()))?;
    let layout: LayoutFile =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse layout JSON")?;

    let data = read_data_or_sample(args.in_path.as_ref())?;
    data.validate()?;

    let mut tour = GuideTour::new(data.resolve_guide(args.lang.into()), Millis::ZERO);
    let mut now = Millis::ZERO;

    while !tour.is_complete() {
        if let Some(deadline) = tour.next_deadline() {
            now = deadline;
            print_tour_events(&tour.tick(now, &layout));
        } else if tour.is_visible() {
            // Stand in for the reader tapping "next" after a beat.
            now = now.after(1_000);
            print_tour_events(&tour.next(now));
        } else {
            break;
        }
    }

    Ok(())
}

fn print_tour_events(events: &[TourEvent]) {
    for event in events {
        match event {
            TourEvent::StepShown { index, layout } => println!(
                "step {index}: shown at left={:.0} top={:.0} width={:.0} arrow={:.0}",
                layout.left, layout.top, layout.width, layout.arrow_offset
            ),
            TourEvent::StepSkipped { index } => {
                println!("step {index}: anchor not visible, skipped");
            }
            TourEvent::Completed => println!("tour complete"),
        }
    }
}
