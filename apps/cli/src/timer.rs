use std::time::Duration;

use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::{MissedTickBehavior, interval};

use eduai_core::{FocusTimer, timer::MAX_MINUTES};

/// Count down in the terminal until time is up or Ctrl-C is pressed.
pub async fn run(minutes: u32) -> Result<()> {
    let mut timer = FocusTimer::new();
    if minutes == 0 || !timer.set_custom_minutes(&minutes.to_string()) {
        bail!("timer length must be between 1 and {} minutes", MAX_MINUTES);
    }
    timer.apply_custom_minutes();
    timer.toggle();

    let total = timer.remaining_secs();
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {bar:40.cyan/blue}")
            .expect("valid progress template")
            .progress_chars("█▓░"),
    );
    pb.set_message(timer.display());

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                timer.tick();
                pb.set_position(total - timer.remaining_secs());
                pb.set_message(timer.display());

                if timer.is_time_up() {
                    pb.finish_with_message(format!(
                        "{} {}",
                        style("✓").green().bold(),
                        style("Time's up! Take a break.").bold()
                    ));
                    return Ok(());
                }
            }
            _ = &mut ctrl_c => {
                timer.toggle();
                pb.abandon_with_message(format!(
                    "{} {}",
                    style("Stopped at").dim(),
                    timer.display()
                ));
                return Ok(());
            }
        }
    }
}
