use std::io::{self, Write};

use anyhow::{Result, bail};
use console::style;

use eduai_core::{AnswerOutcome, PerformanceTier, QuizSession, format_question, option_label};

/// Accepts a letter (`a`-`d`) or a number (`1`-`4`).
fn parse_choice(input: &str) -> Option<usize> {
    let input = input.trim();
    let mut chars = input.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match c.to_ascii_uppercase() {
        'A'..='D' => Some(c.to_ascii_uppercase() as usize - 'A' as usize),
        '1'..='4' => Some(c as usize - '1' as usize),
        _ => None,
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("input closed before the quiz was finished");
    }
    Ok(line)
}

/// Ask every question once, revealing feedback after each answer.
pub fn play(session: &mut QuizSession) -> Result<()> {
    let questions = session.questions().to_vec();

    for (i, question) in questions.iter().enumerate() {
        println!("\n{}", style(format_question(i + 1, question)).bold());

        if session.is_revealed(question.id) {
            println!("{}", style("(already answered)").dim());
            continue;
        }

        let outcome = loop {
            let line = prompt(&format!("{} ", style("Your answer (A-D):").cyan()))?;
            let Some(choice) = parse_choice(&line) else {
                println!("{}", style("Please choose A, B, C or D.").yellow());
                continue;
            };
            if let Some(outcome) = session.answer(question.id, choice) {
                break outcome;
            }
        };

        match outcome {
            AnswerOutcome::Correct => println!("{} Correct!", style("✓").green().bold()),
            AnswerOutcome::Incorrect { correct_option } => println!(
                "{} Incorrect. Correct answer: {}) {}",
                style("✗").red().bold(),
                option_label(question.correct_answer),
                style(correct_option).green()
            ),
        }
    }

    Ok(())
}

fn styled_message(tier: PerformanceTier) -> console::StyledObject<&'static str> {
    let message = style(tier.message()).bold();
    match tier {
        PerformanceTier::Perfect => message.magenta(),
        PerformanceTier::Excellent => message.blue(),
        PerformanceTier::Good => message.green(),
        PerformanceTier::NiceTry => message.yellow(),
        PerformanceTier::KeepPracticing => message.red(),
    }
}

pub fn print_results(session: &mut QuizSession) {
    if !session.all_answered() {
        println!(
            "\n{}",
            style("Not every question was answered; results are unavailable.").yellow()
        );
        return;
    }
    session.show_results();

    println!("\n{}", style("─".repeat(60)).dim());
    println!("{}\n", style("Quiz Results").bold());
    println!(
        "{} {} of {} ({:.0}%)",
        style("Score:").dim(),
        style(session.calculate_score()).cyan().bold(),
        session.questions().len(),
        session.calculate_percentage()
    );
    println!("{}\n", styled_message(session.performance()));

    println!("{}\n", style("Detailed Analysis").bold());
    for (i, analysis) in session.question_analysis().iter().enumerate() {
        println!("{}. {}", i + 1, analysis.question);
        let answer = analysis.user_answer.as_deref().unwrap_or("-");
        if analysis.correct {
            println!("   {} {}", style("Your answer:").green(), answer);
        } else {
            println!("   {} {}", style("Your answer:").red(), answer);
            println!(
                "   {} {}",
                style("Correct answer:").green(),
                analysis.correct_answer
            );
        }
    }
}
