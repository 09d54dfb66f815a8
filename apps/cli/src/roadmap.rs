use std::io::{self, Write};

use anyhow::Result;
use console::style;

use eduai_core::{RoadmapProgress, format_roadmap_readable, watch_url};

enum RoadmapCommand {
    Toggle(usize),
    Open(usize),
    Quit,
}

/// `3` toggles the third video, `o 3` prints its link, `q` quits.
fn parse_command(input: &str) -> Option<RoadmapCommand> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Some(RoadmapCommand::Quit);
    }
    if let Some(rest) = input.strip_prefix('o').or_else(|| input.strip_prefix('O')) {
        return rest.trim().parse().ok().map(RoadmapCommand::Open);
    }
    input.parse().ok().map(RoadmapCommand::Toggle)
}

/// Interactive completion tracking until the user quits or input ends.
pub fn track(roadmap: &mut RoadmapProgress) -> Result<()> {
    loop {
        println!("\n{}", format_roadmap_readable(roadmap));
        print!(
            "{} ",
            style("Toggle video number, `o N` to open, `q` to quit:").cyan()
        );
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let video = |n: usize| n.checked_sub(1).and_then(|i| roadmap.videos().get(i)).cloned();

        match parse_command(&line) {
            Some(RoadmapCommand::Quit) => return Ok(()),
            Some(RoadmapCommand::Open(n)) => match video(n) {
                Some(v) => println!("{} {}", style(&v.title).bold(), style(watch_url(&v.id)).cyan()),
                None => println!("{}", style("No video with that number.").yellow()),
            },
            Some(RoadmapCommand::Toggle(n)) => match video(n) {
                Some(v) => {
                    roadmap.toggle(&v.id);
                }
                None => println!("{}", style("No video with that number.").yellow()),
            },
            None => println!("{}", style("Enter a video number, `o N` or `q`.").yellow()),
        }
    }
}
