//! Terminal rendering of presentation events

use std::io::Write;

use crossterm::style::{Color, Stylize};
use swipedeck_core::domains::deck::CardPair;
use swipedeck_core::domains::gesture::SwipeDirection;
use swipedeck_core::infra::services::{PresentationEvent, PresentationSink};
use swipedeck_core::model::{AccentColor, Project};
use swipedeck_core::session::SessionPhase;

pub fn swatch_color(accent: AccentColor) -> Color {
    let rgb = accent.to_rgb();
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// One line per project: color swatch, name, framework, URL, description.
pub fn project_line(project: &Project) -> String {
    format!(
        "{} {} [{}] {}\n    {}",
        "  ".on(swatch_color(project.accent_color())),
        project.name().bold(),
        project.framework_label(),
        project.url(),
        project.description().dim(),
    )
}

fn phase_line(phase: &SessionPhase) -> String {
    match phase {
        SessionPhase::Unauthenticated { error: None } => {
            "Not connected. Run `swipedeck connect <token>`.".to_string()
        }
        SessionPhase::Unauthenticated { error: Some(e) } => {
            format!("{} Run `swipedeck connect <token>`.", e.as_str().red())
        }
        SessionPhase::Loading => "Loading projects...".to_string(),
        SessionPhase::Ready => "Deck ready.".to_string(),
        SessionPhase::Empty => {
            "No projects found. Press x to retry.".to_string()
        }
        SessionPhase::Failed { message } => {
            format!("{} Press x to retry.", message.as_str().red())
        }
    }
}

fn cards_line(cards: &CardPair) -> String {
    let mut out = format!("\n{}", project_line(&cards.current));
    if let Some(next) = &cards.next {
        out.push_str(&format!("\n  next: {}", next.name().dim()));
    }
    out
}

/// Prints events for the interactive `browse` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPresenter;

impl PresentationSink for TerminalPresenter {
    fn present(&self, event: PresentationEvent) {
        let line = match event {
            PresentationEvent::Phase(phase) => phase_line(&phase),
            PresentationEvent::Cards(cards) => cards_line(&cards),
            // Too chatty for a terminal
            PresentationEvent::Drag(_) => return,
            PresentationEvent::SnapBack => "  (snapped back)".to_string(),
            PresentationEvent::Exiting(SwipeDirection::Right) => {
                "  -> visiting".to_string()
            }
            PresentationEvent::Exiting(SwipeDirection::Left) => {
                "  <- skipped".to_string()
            }
            PresentationEvent::Tapped(project) => {
                format!("  tapped {}", project.name())
            }
            PresentationEvent::PreviewOpened(project) => format!(
                "  preview: {} ({}) - press c to close",
                project.url(),
                project.framework_label()
            ),
            PresentationEvent::PreviewClosed => "  preview closed".to_string(),
        };
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
    }
}

/// Sends events to the log only; used by the one-shot commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl PresentationSink for LogPresenter {
    fn present(&self, event: PresentationEvent) {
        log::debug!("[Presenter] {:?}", event);
    }
}
