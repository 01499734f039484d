//! Line-driven deck browsing
//!
//! Each stdin line is one command; pointer sequences are synthesized for
//! the front card so the engine sees the same input a touch screen would.

use std::time::Duration;

use anyhow::Result;
use swipedeck_core::domains::gesture::{GestureInput, PointerEvent};
use swipedeck_core::session::{DeckRuntime, SessionMessage, SessionPhase};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Offset used for synthesized swipes; beyond the commit threshold.
const SWIPE_OFFSET_PX: f32 = 160.0;

pub const HELP: &str = "commands: l = skip, r = visit, d = press, u = release, \
t = tap, c = close preview, x = retry, q = quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    SwipeLeft,
    SwipeRight,
    Press,
    Release,
    Tap,
    ClosePreview,
    Retry,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "l" => Some(Self::SwipeLeft),
            "r" => Some(Self::SwipeRight),
            "d" => Some(Self::Press),
            "u" => Some(Self::Release),
            "t" => Some(Self::Tap),
            "c" => Some(Self::ClosePreview),
            "x" => Some(Self::Retry),
            "?" | "h" => Some(Self::Help),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Messages this command feeds into the session.
    pub fn messages(self) -> Vec<SessionMessage> {
        let front = |event| SessionMessage::Gesture(GestureInput::front(event));
        match self {
            Self::SwipeLeft => Vec::from(swipe(-SWIPE_OFFSET_PX).map(front)),
            Self::SwipeRight => Vec::from(swipe(SWIPE_OFFSET_PX).map(front)),
            Self::Press => vec![front(PointerEvent::Down)],
            Self::Release => vec![front(PointerEvent::Up)],
            Self::Tap => vec![front(PointerEvent::Down), front(PointerEvent::Up)],
            Self::ClosePreview => vec![SessionMessage::ClosePreview],
            Self::Retry => vec![SessionMessage::Retry],
            Self::Help | Self::Quit => Vec::new(),
        }
    }
}

fn swipe(offset_x: f32) -> [PointerEvent; 4] {
    let velocity_x = 0.0;
    [
        PointerEvent::Down,
        PointerEvent::DragStart,
        PointerEvent::DragMove {
            offset_x,
            velocity_x,
        },
        PointerEvent::DragEnd {
            offset_x,
            velocity_x,
        },
    ]
}

/// Step the loop until the current load settles.
pub async fn wait_for_load(runtime: &mut DeckRuntime) {
    while *runtime.session().phase() == SessionPhase::Loading {
        if !runtime.step().await {
            break;
        }
    }
}

pub async fn run(mut runtime: DeckRuntime) -> Result<()> {
    runtime.dispatch(SessionMessage::Restore);
    wait_for_load(&mut runtime).await;
    if runtime.session().phase().needs_credential() {
        return Ok(());
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match BrowseCommand::parse(&line) {
                    Some(BrowseCommand::Quit) => break,
                    Some(BrowseCommand::Help) => println!("{HELP}"),
                    Some(command) => {
                        for message in command.messages() {
                            runtime.dispatch(message);
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command {:?}; {HELP}", line.trim()),
                }
            }
            alive = runtime.step() => {
                if !alive {
                    break;
                }
            }
        }
    }

    // Let a committed swipe finish before exiting.
    let drain = runtime.context().advance_delay + Duration::from_millis(50);
    let _ = tokio::time::timeout(drain, async {
        while runtime.session().deck().has_pending_advance() {
            if !runtime.step().await {
                break;
            }
        }
    })
    .await;
    Ok(())
}
