use std::io::{BufRead, Write};

use anyhow::Context as _;

use crate::{
    config::canvas::Background,
    foundation::{core::Rgb8, error::PlaylistResult},
};

/// Answers collected from the interactive prompts.
#[derive(Clone, Debug, PartialEq)]
pub struct RunInputs {
    pub title: String,
    pub background: Background,
}

/// Print `question`, then read one line. The trailing newline is stripped; EOF reads as empty.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> PlaylistResult<String> {
    write!(output, "{question}\n> ").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("read answer")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask for the playlist title and background the same way every run.
///
/// A blank image path leads to the color question; a blank color keeps the default navy.
pub fn prompt_run_inputs<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_color: Rgb8,
) -> PlaylistResult<RunInputs> {
    let title = prompt_line(input, output, "Name for this playlist")?;

    let image = prompt_line(
        input,
        output,
        "Path to the image of this playlist, this should be 2560x1440. You may leave this\n\
         option blank to choose a background colour.",
    )?;
    if !image.trim().is_empty() {
        return Ok(RunInputs {
            title,
            background: Background::Image(image.trim().into()),
        });
    }

    let hex = prompt_line(
        input,
        output,
        "Hex code for the background colour of this playlist, you may leave this empty\n\
         for the default playlist colour.",
    )?;
    let color = if hex.trim().is_empty() {
        default_color
    } else {
        Rgb8::from_hex(&hex)?
    };

    Ok(RunInputs {
        title,
        background: Background::Color(color),
    })
}

#[cfg(test)]
#[path = "../tests/unit/prompt.rs"]
mod tests;
