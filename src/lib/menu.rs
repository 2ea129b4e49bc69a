use std::io::{BufRead, Write};

pub const WIDTH: usize = 60;

pub fn rule<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", "-".repeat(WIDTH))
}

/// Writes `text` centered between two rules.
pub fn title<W: Write>(writer: &mut W, text: &str) -> std::io::Result<()> {
    rule(writer)?;
    writeln!(writer, "{text:^WIDTH$}")?;
    rule(writer)
}

pub fn options<W: Write, S: AsRef<str>>(writer: &mut W, items: &[S]) -> std::io::Result<()> {
    for item in items {
        writeln!(writer, "   {}", item.as_ref())?;
    }
    Ok(())
}

/// Prompts until the user enters a non-negative whole number.
///
/// Fails with `UnexpectedEof` when the input ends before a number is read.
pub fn read_whole_number<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> std::io::Result<u64> {
    let mut line = String::new();
    loop {
        write!(writer, "{prompt}")?;
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a number was entered",
            ));
        }

        let input = line.trim();
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            match input.parse() {
                Ok(number) => return Ok(number),
                Err(error) => writeln!(writer, "{error}")?,
            }
        } else {
            writeln!(writer, "Please enter a whole number!")?;
        }
    }
}
