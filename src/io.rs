use std::io::Write as _;
use std::path::PathBuf;

use storyline::{application::error::AppError, infra::error::InfraError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub type Input = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Resolves `--content` / `--content-file`; the file wins when both are present.
pub async fn read_content(
    value: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, AppError> {
    if let Some(path) = file {
        let data = tokio::fs::read_to_string(&path)
            .await
            .map_err(InfraError::from)?;
        return Ok(Some(data));
    }
    Ok(value)
}

pub fn print_view(text: &str) {
    println!("{}", text.trim_end());
}

pub fn prompt(text: &str) -> Result<(), AppError> {
    let mut out = std::io::stdout();
    write!(out, "{text}")
        .and_then(|()| out.flush())
        .map_err(InfraError::from)?;
    Ok(())
}

/// Next line without its terminator, or `None` at end of input.
pub async fn read_line(input: &mut Input) -> Result<Option<String>, AppError> {
    let line = input.next_line().await.map_err(InfraError::from)?;
    Ok(line)
}

/// Asks a y/N question. Anything but `y`/`yes` (including end of input) is no.
pub async fn confirm(input: &mut Input, question: &str) -> Result<bool, AppError> {
    prompt(&format!("{question} [y/N] "))?;
    let answer = read_line(input).await?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
