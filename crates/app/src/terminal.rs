//! Line-based prompts on stdin/stdout.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
    out: Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            out: tokio::io::stdout(),
        }
    }

    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// Ask until the reply is yes or no. `None` on end of input or `q`.
    pub async fn yes_no(&mut self, prompt: &str) -> Result<Option<bool>> {
        loop {
            self.out.write_all(prompt.as_bytes()).await?;
            self.out.flush().await?;

            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            match parse_yes_no(&line) {
                Reply::Yes => return Ok(Some(true)),
                Reply::No => return Ok(Some(false)),
                Reply::Quit => return Ok(None),
                Reply::Unknown => self.say("Please answer y or n (q to quit).").await?,
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Yes,
    No,
    Quit,
    Unknown,
}

fn parse_yes_no(line: &str) -> Reply {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Reply::Yes,
        "n" | "no" => Reply::No,
        "q" | "quit" => Reply::Quit,
        _ => Reply::Unknown,
    }
}
