//! Terminal output helpers for the one-shot command
//!
//! Provides:
//! - Busy spinner shown while a request is in flight
//! - In-place score counter driven by the score animator
//! - Color-coded status lines

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use colored::Colorize;

use crate::animator::ScoreAnimator;

/// Spinner animation frames
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Width of the text score bar
const SCORE_BAR_WIDTH: usize = 30;

/// Status indicators
pub struct StatusIcons;

impl StatusIcons {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const INFO: &'static str = "ℹ";
    pub const UPLOAD: &'static str = "📤";
    pub const DOCUMENT: &'static str = "📄";
}

/// Animated spinner on stderr; stops on drop
pub struct BusySpinner {
    running: Arc<AtomicBool>,
    started: Instant,
    handle: Option<thread::JoinHandle<()>>,
}

impl BusySpinner {
    /// Create and start a new spinner
    pub fn new(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let msg = message.to_string();

        let r = Arc::clone(&running);

        let handle = thread::spawn(move || {
            let mut frame = 0;
            while r.load(Ordering::Relaxed) {
                eprint!(
                    "\r{} {} ",
                    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()].cyan(),
                    msg
                );
                let _ = io::stderr().flush();

                frame += 1;
                thread::sleep(Duration::from_millis(120));
            }
        });

        Self {
            running,
            started: Instant::now(),
            handle: Some(handle),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stop with success message
    pub fn success(mut self, msg: &str) {
        self.stop();
        eprintln!(
            "{} {} ({})",
            StatusIcons::SUCCESS.green(),
            msg.green(),
            format_duration(self.elapsed())
        );
    }

    /// Stop with error message
    pub fn error(mut self, msg: &str) {
        self.stop();
        eprintln!("{} {}", StatusIcons::ERROR.red(), msg.red());
    }

    /// Stop the spinner and clear its line
    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        eprint!("\r{}\r", " ".repeat(80));
        let _ = io::stderr().flush();
    }
}

impl Drop for BusySpinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Text bar for a filled fraction
pub fn score_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * SCORE_BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(SCORE_BAR_WIDTH - filled)
    )
}

/// Play the score animation in place on stdout, one line redrawn per tick
pub async fn play_score(animator: &mut ScoreAnimator, color: (u8, u8, u8)) {
    let (r, g, b) = color;
    let mut ticker = tokio::time::interval(animator.timing().tick);
    let mut stdout = io::stdout();

    while let Some(frame) = animator.tick() {
        ticker.tick().await;
        let bar = score_bar(animator.ring_progress());
        let _ = write!(
            stdout,
            "\r  [{}] {:>3}/100",
            bar.truecolor(r, g, b),
            frame.value.to_string().bold()
        );
        let _ = stdout.flush();
    }
    println!();
}

/// Format duration for display
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print a styled header
pub fn print_header(title: &str) {
    let width: usize = 60;
    let padding = width.saturating_sub(title.chars().count() + 4) / 2;

    println!();
    println!("{}", "═".repeat(width).cyan());
    println!(
        "{}  {}  {}",
        " ".repeat(padding),
        title.bright_white().bold(),
        " ".repeat(padding)
    );
    println!("{}", "═".repeat(width).cyan());
    println!();
}

/// Print a styled subheader
pub fn print_subheader(title: &str) {
    println!("\n{} {}", "▶".bright_cyan(), title.bright_white());
    println!("{}", "─".repeat(40).bright_black());
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {}", key.bright_black(), value.white());
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("{} {}", StatusIcons::ERROR.red(), msg.red());
}

/// Print an info message
pub fn print_info(msg: &str) {
    eprintln!("{} {}", StatusIcons::INFO.cyan(), msg.cyan());
}
