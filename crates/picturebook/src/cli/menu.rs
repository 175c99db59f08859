//! Interactive text menu.

use super::commands::OutputFormat;
use super::generate::generate_story;
use super::stories::{list_stories, show_story};
use picturebook::{BackendError, PicturebookConfig, PicturebookResult};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const MENU_LIST_LIMIT: usize = 20;

/// Run the menu until the user exits or stdin closes.
pub async fn run_menu(config: &PicturebookConfig) -> PicturebookResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!();
        println!("Picturebook");
        println!("  1) Generate a story");
        println!("  2) List stories");
        println!("  3) Show a story");
        println!("  4) Exit");

        let Some(choice) = prompt(&mut lines, "Choose an option: ").await? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some((topic, age)) = read_story_request(&mut lines).await? else {
                    break;
                };
                report(generate_story(config, &topic, age).await.map(|_| ()));
            }
            "2" => report(list_stories(config, None, MENU_LIST_LIMIT, OutputFormat::Human).await),
            "3" => {
                let Some(id) = prompt(&mut lines, "Story id: ").await? else {
                    break;
                };
                report(show_story(config, &id, OutputFormat::Human).await.map(|_| ()));
            }
            "4" | "q" | "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown option '{}'", other),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Ask for a topic and an age until both are usable. `None` on end of input.
async fn read_story_request<R>(lines: &mut Lines<R>) -> PicturebookResult<Option<(String, f64)>>
where
    R: AsyncBufRead + Unpin,
{
    let topic = loop {
        match prompt(lines, "Topic: ").await? {
            None => return Ok(None),
            Some(topic) if topic.is_empty() => println!("Please enter a topic."),
            Some(topic) => break topic,
        }
    };

    let age = loop {
        match prompt(lines, "Reader age: ").await? {
            None => return Ok(None),
            Some(age) => match age.parse::<f64>() {
                Ok(age) if age.is_finite() && age > 0.0 => break age,
                _ => println!("Please enter a positive number of years."),
            },
        }
    };

    Ok(Some((topic, age)))
}

async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> PicturebookResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", label);
    std::io::stdout()
        .flush()
        .map_err(|e| BackendError::new(format!("Failed to write prompt: {}", e)))?;

    let line = lines
        .next_line()
        .await
        .map_err(|e| BackendError::new(format!("Failed to read input: {}", e)))?;
    Ok(line.map(|line| line.trim().to_string()))
}

fn report(result: PicturebookResult<()>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}
